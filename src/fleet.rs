use tracing::debug;

use crate::entities::{ALIEN_HEIGHT, ALIEN_WIDTH, Alien, Entity};
use crate::geometry::Playfield;
use crate::settings::Settings;

/// Shared horizontal heading of the whole fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FleetDirection {
    Left,
    Right,
}

impl FleetDirection {
    pub fn sign(&self) -> f32 {
        match self {
            FleetDirection::Left => -1.0,
            FleetDirection::Right => 1.0,
        }
    }

    pub fn reversed(&self) -> Self {
        match self {
            FleetDirection::Left => FleetDirection::Right,
            FleetDirection::Right => FleetDirection::Left,
        }
    }
}

/// Rows and columns of a freshly spawned fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub rows: u16,
    pub columns: u16,
    /// Column pitch in alien widths
    pub spacing: u16,
}

impl GridLayout {
    /// Fits as many aliens as possible while keeping a margin of a couple of
    /// alien sizes on every side and room for the ship at the bottom.
    pub fn for_playfield(playfield: Playfield, ship_height: u16, spacing: u16) -> Self {
        let spacing = spacing.max(1);
        let available_x = playfield.width.saturating_sub(4 * ALIEN_WIDTH);
        let columns = available_x / (spacing * ALIEN_WIDTH);

        let available_y = playfield
            .height
            .saturating_sub(4 * ALIEN_HEIGHT)
            .saturating_sub(ship_height);
        let rows = available_y / (2 * ALIEN_HEIGHT);

        Self {
            rows,
            columns,
            spacing,
        }
    }

    pub fn len(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Top-left corner of the alien in `(row, column)`.
    pub fn position(&self, row: u16, column: u16) -> (f32, f32) {
        let x = ALIEN_WIDTH + self.spacing * ALIEN_WIDTH * column;
        let y = 2 * ALIEN_HEIGHT + 2 * ALIEN_HEIGHT * row;
        (x as f32, y as f32)
    }
}

#[derive(Debug, Clone)]
pub struct Fleet {
    aliens: Vec<Alien>,
    direction: FleetDirection,
}

impl Fleet {
    /// Lays out a full grid of aliens heading `direction`.
    pub fn spawn(
        settings: &Settings,
        playfield: Playfield,
        ship_height: u16,
        direction: FleetDirection,
    ) -> Self {
        let layout = GridLayout::for_playfield(playfield, ship_height, settings.alien_spacing);
        let mut aliens = Vec::with_capacity(layout.len());
        for row in 0..layout.rows {
            for column in 0..layout.columns {
                let (x, y) = layout.position(row, column);
                aliens.push(Alien::in_slot(x, y, row, column));
            }
        }
        Self::from_aliens(aliens, direction)
    }

    pub fn from_aliens(aliens: Vec<Alien>, direction: FleetDirection) -> Self {
        Self { aliens, direction }
    }

    pub fn empty(direction: FleetDirection) -> Self {
        Self::from_aliens(Vec::new(), direction)
    }

    pub fn aliens(&self) -> &[Alien] {
        &self.aliens
    }

    pub fn aliens_mut(&mut self) -> &mut [Alien] {
        &mut self.aliens
    }

    pub fn direction(&self) -> FleetDirection {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.aliens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliens.is_empty()
    }

    pub fn clear(&mut self) {
        self.aliens.clear();
    }

    /// Removes the aliens at `indices` (in any order, duplicates allowed).
    pub fn remove(&mut self, indices: &[usize]) {
        crate::collision::remove_indices(&mut self.aliens, indices.iter().copied());
    }

    /// One tick of fleet motion. Returns whether the fleet dropped and
    /// reversed this tick.
    pub fn advance(&mut self, settings: &Settings, playfield: Playfield) -> bool {
        let reversed = self.is_at_edge(playfield);
        if reversed {
            self.drop_and_reverse(settings.fleet_drop_distance);
        }

        let velocity_x = self.direction.sign() * settings.alien_speed;
        for alien in &mut self.aliens {
            alien.velocity_x = velocity_x;
            alien.advance();
        }
        reversed
    }

    fn is_at_edge(&self, playfield: Playfield) -> bool {
        self.aliens
            .iter()
            .any(|alien| alien.is_at_edge(playfield.width))
    }

    fn drop_and_reverse(&mut self, drop_distance: f32) {
        for alien in &mut self.aliens {
            alien.body_mut().translate(0.0, drop_distance);
        }
        self.direction = self.direction.reversed();
        debug!(direction = ?self.direction, "fleet reversed");
    }

    /// Any alien has reached the bottom of the playfield.
    pub fn reached_bottom(&self, playfield: Playfield) -> bool {
        self.aliens
            .iter()
            .any(|alien| alien.bounds().bottom() >= playfield.height as i32)
    }
}
