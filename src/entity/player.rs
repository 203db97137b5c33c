/// The player avatar: movement, jumping, shooting, damage intake, and the
/// star economy (shield purchases and shield-to-life conversion).
use crate::audio::Sound;
use crate::constants::{
    BULLET_SPEED, BULLET_WIDTH, GRAVITY, INVINCIBILITY_FRAMES, JUMP_SPEED, LIFE_COST,
    PLAYER_GROUND_OFFSET, PLAYER_HEIGHT, PLAYER_SPEED, PLAYER_WIDTH, SHIELDS_FOR_LIFE_CONVERSION,
    SHIELD_COST, SHOOT_COOLDOWN_FRAMES,
};
use crate::entity::hud::lose_life;
use crate::entity::{Bullet, Entity, Frame};
use crate::input::Key;
use crate::rect::{Bounds, Rect};
use crate::surface::{Color, Surface};

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub jump_velocity: f32,
    pub ground_y: f32,
    pub is_jumping: bool,
    pub shoot_cooldown: u32,
    /// Frames of immunity left after an obstacle hit.
    pub invincibility: u32,
    pub stars: u32,
    pub has_shield: bool,
    /// Cumulative purchases; spent in batches by the life conversion.
    pub shields_purchased: u32,
    pub shield_cost: u32,
    pub life_cost: u32,
}

impl Player {
    /// Spawns centered on the ground line.
    pub fn new(bounds: Bounds) -> Self {
        let y = bounds.height - PLAYER_GROUND_OFFSET;
        Player {
            x: (bounds.width - PLAYER_WIDTH) / 2.0,
            y,
            speed: PLAYER_SPEED,
            jump_velocity: 0.0,
            ground_y: y,
            is_jumping: false,
            shoot_cooldown: 0,
            invincibility: 0,
            stars: 0,
            has_shield: false,
            shields_purchased: 0,
            shield_cost: SHIELD_COST,
            life_cost: LIFE_COST,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    pub fn update(&mut self, frame: &mut Frame) -> bool {
        // Horizontal movement, clamped to the world.
        if frame.input.is_held(Key::Left) && self.x > 0.0 {
            self.x -= self.speed;
        }
        if frame.input.is_held(Key::Right) && self.x + PLAYER_WIDTH < frame.bounds.width {
            self.x += self.speed;
        }

        // One-shot jump impulse plus gravity, clamped to the ground line.
        if frame.input.is_held(Key::Up) && !self.is_jumping {
            self.jump_velocity = JUMP_SPEED;
            self.is_jumping = true;
        }
        self.y += self.jump_velocity;
        self.jump_velocity += GRAVITY;
        if self.y >= self.ground_y {
            self.y = self.ground_y;
            self.jump_velocity = 0.0;
            self.is_jumping = false;
        }

        // Shooting.
        if frame.input.is_held(Key::Fire) && self.shoot_cooldown == 0 {
            if frame.audio.is_ready(Sound::Shoot) {
                frame.audio.play(Sound::Shoot);
            }
            frame.registry.add(Entity::Bullet(Bullet::new(
                self.x + PLAYER_WIDTH / 2.0 - BULLET_WIDTH / 2.0,
                self.y - 10.0,
                BULLET_SPEED,
            )));
            self.shoot_cooldown = SHOOT_COOLDOWN_FRAMES;
        }

        // Obstacles hurt only while not invincible; contact consumes the
        // obstacle and opens an invincibility window.
        if self.invincibility == 0 {
            let rect = self.rect();
            let hit = frame
                .registry
                .obstacles_mut()
                .find(|o| !o.dead && rect.intersects(&o.rect()))
                .map(|o| o.dead = true)
                .is_some();
            if hit {
                self.take_damage(frame);
                self.invincibility = INVINCIBILITY_FRAMES;
            }
        }

        // Falling numbers always hurt on contact.
        let rect = self.rect();
        let mut touched = 0;
        for target in frame.registry.targets_mut() {
            if !target.dead && rect.intersects(&target.rect()) {
                target.dead = true;
                touched += 1;
            }
        }
        for _ in 0..touched {
            self.take_damage(frame);
        }

        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
        self.invincibility = self.invincibility.saturating_sub(1);

        false
    }

    /// Damage intake with `self` outside the registry: the shield eats the
    /// hit if active, otherwise a life goes.
    fn take_damage(&mut self, frame: &mut Frame) {
        if self.has_shield {
            self.has_shield = false;
            log::debug!("shield absorbed a hit");
        } else {
            lose_life(frame);
        }
    }

    /// Shield check for damage routed through a registry lookup (wrong
    /// answer hits). Returns true when the shield absorbed the damage.
    pub fn absorb_with_shield(&mut self) -> bool {
        if self.has_shield {
            self.has_shield = false;
            log::debug!("shield absorbed a hit");
            true
        } else {
            false
        }
    }

    /// Buys a shield if affordable and none is active. No-op (false)
    /// otherwise; the balance never changes on a failed attempt.
    pub fn purchase_shield(&mut self) -> bool {
        if self.stars >= self.shield_cost && !self.has_shield {
            self.stars -= self.shield_cost;
            self.has_shield = true;
            self.shields_purchased += 1;
            log::debug!("shield purchased, total {}", self.shields_purchased);
            true
        } else {
            false
        }
    }

    /// Spends a fixed batch of past shield purchases; the caller grants the
    /// life. No-op (false) below the threshold.
    pub fn convert_shields_to_life(&mut self) -> bool {
        if self.shields_purchased >= SHIELDS_FOR_LIFE_CONVERSION {
            self.shields_purchased -= SHIELDS_FOR_LIFE_CONVERSION;
            log::debug!(
                "converted {} shields to a life, {} left",
                SHIELDS_FOR_LIFE_CONVERSION,
                self.shields_purchased
            );
            true
        } else {
            false
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        // Blink while invincible.
        let faded = self.invincibility > 0 && (self.invincibility / 5) % 2 == 0;
        let body = if faded { Color::Grey } else { Color::Blue };
        surface.fill_rect(self.x, self.y, PLAYER_WIDTH, PLAYER_HEIGHT, body);

        if self.has_shield {
            surface.stroke_rect(
                self.x - 3.0,
                self.y - 3.0,
                PLAYER_WIDTH + 6.0,
                PLAYER_HEIGHT + 6.0,
                Color::Cyan,
            );
        }

        // Face.
        surface.fill_rect(self.x + 10.0, self.y + 10.0, 5.0, 5.0, Color::White);
        surface.fill_rect(self.x + 25.0, self.y + 10.0, 5.0, 5.0, Color::White);
        surface.fill_rect(self.x + 15.0, self.y + 25.0, 10.0, 3.0, Color::Red);
    }
}
