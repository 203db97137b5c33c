/// The player's projectile. Travels straight up and resolves against the
/// first live falling number it overlaps.
use crate::audio::Sound;
use crate::constants::{BULLET_HEIGHT, BULLET_WIDTH};
use crate::entity::{target, Frame};
use crate::rect::Rect;
use crate::surface::{Color, Surface};

#[derive(Clone, Debug)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
}

impl Bullet {
    pub fn new(x: f32, y: f32, speed: f32) -> Self {
        Bullet { x, y, speed }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, BULLET_WIDTH, BULLET_HEIGHT)
    }

    pub fn update(&mut self, frame: &mut Frame) -> bool {
        self.y -= self.speed;

        if self.y + BULLET_HEIGHT < 0.0 {
            return true;
        }

        // Hit test against live targets; flag the victim dead and resolve
        // the answer. The target itself disappears on its next update.
        let rect = self.rect();
        let hit = frame
            .registry
            .targets_mut()
            .find(|t| !t.dead && rect.intersects(&t.rect()))
            .map(|t| {
                t.dead = true;
                t.is_correct
            });

        if let Some(is_correct) = hit {
            if frame.audio.is_ready(Sound::Hit) {
                frame.audio.play(Sound::Hit);
            }
            target::resolve_hit(is_correct, frame);
            return true;
        }

        false
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        surface.fill_rect(self.x, self.y, BULLET_WIDTH, BULLET_HEIGHT, Color::Yellow);
    }
}
