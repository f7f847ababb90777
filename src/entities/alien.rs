use super::entity::{Body, Entity};

pub const ALIEN_SPRITE: [&str; 2] = ["<@@@>", " / \\ "];
pub const ALIEN_WIDTH: u16 = 5;
pub const ALIEN_HEIGHT: u16 = 2;

#[derive(Debug, Clone)]
pub struct Alien {
    body: Body,
    /// Horizontal speed for the current tick, written by the fleet
    pub velocity_x: f32,
    /// Grid slot assigned at spawn time
    pub row: u16,
    pub column: u16,
}

impl Alien {
    pub fn new(x: f32, y: f32) -> Self {
        Self::in_slot(x, y, 0, 0)
    }

    pub fn in_slot(x: f32, y: f32, row: u16, column: u16) -> Self {
        Self {
            body: Body::new(x, y, ALIEN_WIDTH, ALIEN_HEIGHT),
            velocity_x: 0.0,
            row,
            column,
        }
    }

    /// Touching or past either side of a playfield `field_width` wide.
    pub fn is_at_edge(&self, field_width: u16) -> bool {
        let bounds = self.bounds();
        bounds.right() >= field_width as i32 || bounds.left() <= 0
    }
}

impl Entity for Alien {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn velocity(&self) -> (f32, f32) {
        (self.velocity_x, 0.0)
    }
}
