use super::entity::{Body, Entity};
use crate::geometry::Playfield;

pub const SHIP_SPRITE: [&str; 3] = [" /^\\ ", "<|||>", " ||| "];
pub const SHIP_WIDTH: u16 = 5;
pub const SHIP_HEIGHT: u16 = 3;
/// Rows kept free below the ship.
const BOTTOM_MARGIN: u16 = 1;

#[derive(Debug, Clone)]
pub struct Ship {
    body: Body,
    pub moving_left: bool,
    pub moving_right: bool,
    speed: f32,
    field_width: u16,
}

impl Ship {
    pub fn new(playfield: Playfield, speed: f32) -> Self {
        let mut ship = Self {
            body: Body::new(0.0, 0.0, SHIP_WIDTH, SHIP_HEIGHT),
            moving_left: false,
            moving_right: false,
            speed,
            field_width: playfield.width,
        };
        ship.center(playfield);
        ship
    }

    /// Places the ship at the bottom centre of the playfield.
    pub fn center(&mut self, playfield: Playfield) {
        self.field_width = playfield.width;
        self.body.x = playfield.width.saturating_sub(SHIP_WIDTH) as f32 / 2.0;
        self.body.y = playfield
            .height
            .saturating_sub(SHIP_HEIGHT + BOTTOM_MARGIN) as f32;
    }

    pub fn stop(&mut self) {
        self.moving_left = false;
        self.moving_right = false;
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// Where a fired bullet leaves the ship: `(center_x, top)`.
    pub fn muzzle(&self) -> (f32, f32) {
        (self.body.center_x(), self.body.y)
    }

    fn max_x(&self) -> f32 {
        self.field_width.saturating_sub(SHIP_WIDTH) as f32
    }
}

impl Entity for Ship {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn velocity(&self) -> (f32, f32) {
        let bounds = self.body.bounds();
        let mut dx = 0.0;
        if self.moving_right && bounds.right() < self.field_width as i32 {
            dx += self.speed;
        }
        if self.moving_left && bounds.left() > 0 {
            dx -= self.speed;
        }
        (dx, 0.0)
    }

    fn advance(&mut self) {
        let (dx, _) = self.velocity();
        self.body.x = (self.body.x + dx).clamp(0.0, self.max_x());
    }
}
