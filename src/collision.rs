//! Overlap detection between bullets, aliens and the ship.
//!
//! Detection is pure: it reports what collided and leaves the collections
//! untouched. Callers apply removals afterwards with [`remove_indices`].

use crate::entities::{Alien, Bullet, Entity, Ship};

/// One bullet and every alien it destroyed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulletHit {
    pub bullet: usize,
    pub aliens: Vec<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub hits: Vec<BulletHit>,
}

impl CollisionReport {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Total aliens destroyed, counting every alien of a multi-kill.
    pub fn kills(&self) -> usize {
        self.hits.iter().map(|hit| hit.aliens.len()).sum()
    }

    pub fn bullet_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.hits.iter().map(|hit| hit.bullet)
    }

    pub fn alien_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.hits.iter().flat_map(|hit| hit.aliens.iter().copied())
    }
}

/// Matches bullets against aliens in bullet order.
///
/// A bullet claims every still-unclaimed alien it overlaps, so one bullet
/// can take out several aliens at once. Aliens claimed by an earlier bullet
/// are invisible to later ones.
pub fn resolve_bullet_alien(bullets: &[Bullet], aliens: &[Alien]) -> CollisionReport {
    let mut claimed = vec![false; aliens.len()];
    let mut report = CollisionReport::default();

    for (b_idx, bullet) in bullets.iter().enumerate() {
        let bullet_bounds = bullet.bounds();
        let mut destroyed = Vec::new();

        for (a_idx, alien) in aliens.iter().enumerate() {
            if !claimed[a_idx] && bullet_bounds.intersects(&alien.bounds()) {
                claimed[a_idx] = true;
                destroyed.push(a_idx);
            }
        }

        if !destroyed.is_empty() {
            report.hits.push(BulletHit {
                bullet: b_idx,
                aliens: destroyed,
            });
        }
    }

    report
}

/// True if any alien overlaps the ship.
pub fn resolve_ship_alien(ship: &Ship, aliens: &[Alien]) -> bool {
    let ship_bounds = ship.bounds();
    aliens
        .iter()
        .any(|alien| ship_bounds.intersects(&alien.bounds()))
}

/// Removes the items at `indices`, which may be unsorted or repeated.
pub fn remove_indices<T>(items: &mut Vec<T>, indices: impl IntoIterator<Item = usize>) {
    let mut to_remove: Vec<usize> = indices.into_iter().collect();

    // Remove in reverse order to avoid index issues
    to_remove.sort_unstable();
    to_remove.reverse();
    to_remove.dedup();
    for idx in to_remove {
        if idx < items.len() {
            items.remove(idx);
        }
    }
}
