use super::entity::{Body, Entity};
use super::ship::Ship;

#[derive(Debug, Clone)]
pub struct Bullet {
    body: Body,
    speed: f32,
}

impl Bullet {
    pub fn new(x: f32, y: f32, width: u16, height: u16, speed: f32) -> Self {
        Self {
            body: Body::new(x, y, width, height),
            speed,
        }
    }

    /// A bullet centred on the ship's nose, bottom edge at the ship's top.
    ///
    /// The bullet starts just above the sprite rather than overlapping the
    /// nose cell, so it never covers the `^` glyph on the tick it is fired.
    pub fn fired_from(ship: &Ship, width: u16, height: u16, speed: f32) -> Self {
        let (center_x, top) = ship.muzzle();
        Self::new(
            center_x - width as f32 / 2.0,
            top - height as f32,
            width,
            height,
            speed,
        )
    }

    /// True once the bottom edge has crossed the top of the playfield.
    pub fn is_off_top(&self) -> bool {
        self.bounds().bottom() <= 0
    }
}

impl Entity for Bullet {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn velocity(&self) -> (f32, f32) {
        (0.0, -self.speed)
    }
}
