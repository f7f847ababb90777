use crate::geometry::Rect;

/// Position and size of anything that moves on the playfield.
///
/// The position is kept as floats so slow speeds accumulate across ticks;
/// the integer box is always derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub width: u16,
    pub height: u16,
}

impl Body {
    pub fn new(x: f32, y: f32, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.x.floor() as i32,
            self.y.floor() as i32,
            self.width as i32,
            self.height as i32,
        )
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width as f32 / 2.0
    }
}

/// Shared behaviour of ships, bullets, aliens and stars.
///
/// Velocities are expressed per tick, so `advance` moves by exactly one
/// tick's worth of motion.
pub trait Entity {
    fn body(&self) -> &Body;

    fn body_mut(&mut self) -> &mut Body;

    /// Displacement `(dx, dy)` applied by the next `advance`.
    fn velocity(&self) -> (f32, f32);

    fn advance(&mut self) {
        let (dx, dy) = self.velocity();
        self.body_mut().translate(dx, dy);
    }

    fn bounds(&self) -> Rect {
        self.body().bounds()
    }
}
