mod alien;
mod bullet;
mod entity;
mod ship;
mod star;

// Re-export all public types
pub use alien::{ALIEN_HEIGHT, ALIEN_SPRITE, ALIEN_WIDTH, Alien};
pub use bullet::Bullet;
pub use entity::{Body, Entity};
pub use ship::{SHIP_HEIGHT, SHIP_SPRITE, SHIP_WIDTH, Ship};
pub use star::{STAR_GLYPHS, Star};
