use clap::Parser;
use color_eyre::Result;
use std::path::PathBuf;

use crate::renderer::HUD_HEIGHT;
use crate::settings::{Difficulty, Settings};

#[derive(Parser, Debug, Clone)]
#[command(name = "alien-invasion")]
#[command(about = "Shoot down a descending alien fleet in your terminal")]
pub struct Cli {
    /// Playfield width in cells (defaults to the terminal width)
    #[arg(long)]
    pub width: Option<u16>,
    /// Playfield height in cells (defaults to the terminal height minus the scoreboard)
    #[arg(long)]
    pub height: Option<u16>,
    #[arg(long, default_value_t = 3)]
    pub lives: u32,
    #[arg(long, value_enum, default_value_t = Difficulty::Normal)]
    pub difficulty: Difficulty,
    /// Bullets allowed on screen at once
    #[arg(long, default_value_t = 3)]
    pub max_bullets: usize,
    /// Disable sound effects
    #[arg(long)]
    pub mute: bool,
    /// Seed for the starfield
    #[arg(long)]
    pub seed: Option<u64>,
    /// Where log output goes; the terminal is taken by the game
    #[arg(long, default_value = "alien-invasion.log")]
    pub log_file: PathBuf,
}

impl Cli {
    /// Builds validated settings for a terminal of `columns` x `rows`.
    pub fn settings(&self, columns: u16, rows: u16) -> Result<Settings> {
        let mut settings = Settings {
            screen_width: self.width.unwrap_or(columns),
            screen_height: self
                .height
                .unwrap_or_else(|| rows.saturating_sub(HUD_HEIGHT)),
            initial_lives: self.lives,
            max_live_bullets: self.max_bullets,
            difficulty: self.difficulty,
            ..Settings::default()
        };
        settings.sanitize();
        settings.validate()?;
        Ok(settings)
    }
}
