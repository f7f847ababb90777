// Library exports for the binary and tests
pub use app::App;
pub use audio::AudioManager;
pub use cli::Cli;
pub use entities::{Alien, Bullet, Entity, Ship, Star};
pub use fleet::{Fleet, FleetDirection};
pub use game::{Game, GameEvent, GameMode, Phase};
pub use input::{InputEvent, InputManager, Key};
pub use settings::{Difficulty, Settings};
pub use stats::GameStats;

pub mod app;
pub mod audio;
pub mod cli;
pub mod collision;
pub mod entities;
pub mod fleet;
pub mod game;
pub mod geometry;
pub mod input;
pub mod menu;
pub mod renderer;
pub mod settings;
pub mod starfield;
pub mod stats;
