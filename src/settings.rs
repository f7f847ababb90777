use std::time::Duration;

use clap::ValueEnum;
use color_eyre::eyre::bail;

use crate::entities::{ALIEN_HEIGHT, ALIEN_WIDTH, SHIP_HEIGHT};
use crate::fleet::FleetDirection;
use crate::geometry::Playfield;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn speed_factor(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.75,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.35,
        }
    }

    pub fn get_name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Game configuration.
///
/// Every speed has a `base_*` value fixed at startup and a live value that
/// level-ups scale. Speeds are in playfield cells per tick.
#[derive(Debug, Clone)]
pub struct Settings {
    pub screen_width: u16,
    pub screen_height: u16,

    pub base_ship_speed: f32,
    pub base_bullet_speed: f32,
    pub base_alien_speed: f32,
    pub base_fleet_drop_distance: f32,
    pub base_star_speed: f32,

    pub ship_speed: f32,
    pub bullet_speed: f32,
    pub alien_speed: f32,
    pub fleet_drop_distance: f32,
    pub star_speed: f32,

    pub bullet_width: u16,
    pub bullet_height: u16,
    pub max_live_bullets: usize,

    pub fleet_direction: FleetDirection,
    /// Horizontal distance between alien columns, in alien widths
    pub alien_spacing: u16,
    pub speedup_scale: f32,
    pub points_per_alien: u32,
    pub initial_lives: u32,

    pub star_rows: u16,
    pub stars_per_row: u16,

    pub life_lost_pause: Duration,
    pub tick_rate: Duration,
    pub difficulty: Difficulty,
}

impl Default for Settings {
    fn default() -> Self {
        let mut settings = Self {
            screen_width: 80,
            screen_height: 36,
            base_ship_speed: 0.6,
            base_bullet_speed: 0.8,
            base_alien_speed: 0.15,
            base_fleet_drop_distance: 1.0,
            base_star_speed: 0.1,
            ship_speed: 0.0,
            bullet_speed: 0.0,
            alien_speed: 0.0,
            fleet_drop_distance: 0.0,
            star_speed: 0.0,
            bullet_width: 1,
            bullet_height: 1,
            max_live_bullets: 3,
            fleet_direction: FleetDirection::Right,
            alien_spacing: 2,
            speedup_scale: 1.1,
            points_per_alien: 50,
            initial_lives: 3,
            star_rows: 6,
            stars_per_row: 5,
            life_lost_pause: Duration::from_secs(1),
            tick_rate: Duration::from_millis(16),
            difficulty: Difficulty::Normal,
        };
        settings.initialize_dynamic_settings();
        settings.reset_star_speed();
        settings
    }
}

impl Settings {
    pub fn playfield(&self) -> Playfield {
        Playfield::new(self.screen_width, self.screen_height)
    }

    pub fn star_capacity(&self) -> usize {
        self.star_rows as usize * self.stars_per_row as usize
    }

    /// Restores the values that change during a game, scaled by the chosen
    /// difficulty. Called at the start of every game.
    pub fn initialize_dynamic_settings(&mut self) {
        let factor = self.difficulty.speed_factor();
        self.ship_speed = self.base_ship_speed * factor;
        self.bullet_speed = self.base_bullet_speed * factor;
        self.alien_speed = self.base_alien_speed * factor;
        self.fleet_drop_distance = self.base_fleet_drop_distance * factor;
        self.fleet_direction = FleetDirection::Right;
    }

    /// Applied on every level-up; there is no upper limit.
    pub fn increase_speed(&mut self) {
        self.ship_speed *= self.speedup_scale;
        self.bullet_speed *= self.speedup_scale;
        self.alien_speed *= self.speedup_scale;
        self.fleet_drop_distance *= self.speedup_scale;
        self.star_speed *= self.speedup_scale;
    }

    pub fn reset_star_speed(&mut self) {
        self.star_speed = self.base_star_speed;
    }

    /// Clamps values that would make the game misbehave instead of failing:
    /// negative speeds become zero.
    pub fn sanitize(&mut self) {
        for speed in [
            &mut self.base_ship_speed,
            &mut self.base_bullet_speed,
            &mut self.base_alien_speed,
            &mut self.base_fleet_drop_distance,
            &mut self.base_star_speed,
        ] {
            if !speed.is_finite() || *speed < 0.0 {
                *speed = 0.0;
            }
        }
        if !self.speedup_scale.is_finite() || self.speedup_scale < 0.0 {
            self.speedup_scale = 1.0;
        }
        self.initialize_dynamic_settings();
        self.reset_star_speed();
    }

    /// Rejects a playfield that cannot hold a single row and column of aliens
    /// above the ship.
    pub fn validate(&self) -> color_eyre::Result<()> {
        let min_width = 4 * ALIEN_WIDTH + self.alien_spacing.max(1) * ALIEN_WIDTH;
        let min_height = 6 * ALIEN_HEIGHT + SHIP_HEIGHT;
        if self.screen_width < min_width || self.screen_height < min_height {
            bail!(
                "playfield {}x{} is too small, need at least {}x{}",
                self.screen_width,
                self.screen_height,
                min_width,
                min_height
            );
        }
        Ok(())
    }
}
