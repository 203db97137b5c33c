/// A grounded hazard left behind by a missed correct answer.
///
/// Picks its horizontal direction exactly once at spawn time, toward where
/// the player stood at that moment (ties patrol right), and never
/// re-evaluates it. Leaves the world when it walks off either edge or when
/// the player touches it.
use crate::constants::{OBSTACLE_HEIGHT, OBSTACLE_SPEED, OBSTACLE_WIDTH};
use crate::entity::Frame;
use crate::rect::Rect;
use crate::surface::{Color, Surface};

#[derive(Clone, Debug)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    /// +1.0 or -1.0, fixed at spawn.
    pub direction: f32,
    /// Flagged by the player on contact or by the generator's cap sweep.
    pub dead: bool,
}

impl Obstacle {
    pub fn new(x: f32, y: f32, player_x_at_spawn: f32) -> Self {
        let direction = if player_x_at_spawn >= x { 1.0 } else { -1.0 };
        Obstacle {
            x,
            y,
            direction,
            dead: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, OBSTACLE_WIDTH, OBSTACLE_HEIGHT)
    }

    pub fn update(&mut self, frame: &mut Frame) -> bool {
        if self.dead {
            return true;
        }

        self.x += self.direction * OBSTACLE_SPEED;

        // Gone once fully past either horizontal boundary.
        self.x + OBSTACLE_WIDTH <= 0.0 || self.x >= frame.bounds.width
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        surface.fill_rect(self.x, self.y, OBSTACLE_WIDTH, OBSTACLE_HEIGHT, Color::Red);
        surface.stroke_rect(self.x, self.y, OBSTACLE_WIDTH, OBSTACLE_HEIGHT, Color::Black);
    }
}
