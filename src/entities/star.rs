use super::entity::{Body, Entity};

pub const STAR_GLYPHS: [char; 3] = ['.', '·', '*'];

#[derive(Debug, Clone)]
pub struct Star {
    body: Body,
    speed: f32,
    pub glyph: char,
}

impl Star {
    pub fn new(x: f32, y: f32, speed: f32, glyph: char) -> Self {
        Self {
            body: Body::new(x, y, 1, 1),
            speed,
            glyph,
        }
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// Top edge has passed the bottom of a playfield `field_height` tall.
    pub fn is_below(&self, field_height: u16) -> bool {
        self.bounds().top() > field_height as i32
    }
}

impl Entity for Star {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn velocity(&self) -> (f32, f32) {
        (0.0, self.speed)
    }
}
