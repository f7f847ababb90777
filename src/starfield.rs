use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::entities::{Entity, STAR_GLYPHS, Star};
use crate::geometry::Playfield;
use crate::settings::Settings;

/// Fixed-size pool of falling stars.
///
/// Stars that fall past the bottom are replaced by new ones entering just
/// above the top, so the pool never changes size between updates.
pub struct Starfield {
    stars: Vec<Star>,
    rows: u16,
    capacity: usize,
    speed: f32,
    rng: StdRng,
}

impl Starfield {
    /// Creates a starfield seeded from the thread RNG.
    pub fn new(settings: &Settings, playfield: Playfield) -> Self {
        Self::with_rng(settings, playfield, StdRng::from_rng(&mut rand::rng()))
    }

    /// Same as [`Starfield::new`] with a reproducible RNG.
    pub fn with_seed(settings: &Settings, playfield: Playfield, seed: u64) -> Self {
        Self::with_rng(settings, playfield, StdRng::seed_from_u64(seed))
    }

    /// Seeds the pool with evenly spaced rows covering the whole height.
    pub fn with_rng(settings: &Settings, playfield: Playfield, rng: StdRng) -> Self {
        let mut starfield = Self {
            stars: Vec::with_capacity(settings.star_capacity()),
            rows: settings.star_rows,
            capacity: settings.star_capacity(),
            speed: settings.star_speed,
            rng,
        };
        let spacing = starfield.row_spacing(playfield);
        for row in 0..settings.star_rows {
            for _ in 0..settings.stars_per_row {
                let star = starfield.make_star(playfield, spacing * row as f32);
                starfield.stars.push(star);
            }
        }
        starfield
    }

    /// Stars in the pool.
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Number of stars in the pool.
    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Size the pool is kept at.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current falling speed in cells per tick.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Applies a new falling speed to every star.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
        for star in &mut self.stars {
            star.set_speed(speed);
        }
    }

    /// Moves the stars down one tick and refills the pool.
    pub fn advance(&mut self, playfield: Playfield) {
        for star in &mut self.stars {
            star.advance();
        }

        self.stars.retain(|star| !star.is_below(playfield.height));

        let entry_y = -self.row_spacing(playfield);
        while self.stars.len() < self.capacity {
            let star = self.make_star(playfield, entry_y);
            self.stars.push(star);
        }
    }

    fn row_spacing(&self, playfield: Playfield) -> f32 {
        (playfield.height / self.rows.max(1)) as f32
    }

    fn make_star(&mut self, playfield: Playfield, y: f32) -> Star {
        let x = self.rng.random_range(0..playfield.width.max(1)) as f32;
        let glyph = STAR_GLYPHS[self.rng.random_range(0..STAR_GLYPHS.len())];
        Star::new(x, y, self.speed, glyph)
    }
}
