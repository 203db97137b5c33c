/// A falling number the player shoots at.
use rand::Rng;

use crate::audio::Sound;
use crate::constants::{NUMBER_HEIGHT, NUMBER_WIDTH, OBSTACLE_SPACING_MIN, PLAYER_GROUND_OFFSET};
use crate::entity::generator::{sample_wrong_value, Generator};
use crate::entity::hud::lose_life;
use crate::entity::{Command, Entity, Frame, Obstacle, Overlay, Tier};
use crate::level;
use crate::rect::Rect;
use crate::surface::{Align, Color, Surface};

#[derive(Clone, Debug)]
pub struct Target {
    pub x: f32,
    pub y: f32,
    pub value: i32,
    pub is_correct: bool,
    pub speed: f32,
    /// Flagged by bullets or the player; honored at this entity's next
    /// update so mid-pass iteration stays safe.
    pub dead: bool,
}

impl Target {
    pub fn new(x: f32, y: f32, value: i32, is_correct: bool, speed: f32) -> Self {
        Target {
            x,
            y,
            value,
            is_correct,
            speed,
            dead: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, NUMBER_WIDTH, NUMBER_HEIGHT)
    }

    pub fn update(&mut self, frame: &mut Frame) -> bool {
        if self.dead {
            return true;
        }

        self.y += self.speed;

        if self.y + NUMBER_HEIGHT >= frame.bounds.height {
            self.reached_ground(frame);
            return true;
        }

        false
    }

    /// Ground contact. On tier 2+ a missed correct answer becomes a
    /// patrolling obstacle at the player's ground line, unless another
    /// obstacle already sits nearby. Tier 1 misses cost nothing.
    fn reached_ground(&self, frame: &mut Frame) {
        let tier_spawns = frame
            .registry
            .generator()
            .map(|g| g.tier.spawns_obstacles())
            .unwrap_or(false);
        if !self.is_correct || !tier_spawns {
            return;
        }

        let crowded = frame
            .registry
            .obstacles()
            .any(|o| !o.dead && (o.x - self.x).abs() < OBSTACLE_SPACING_MIN);
        if crowded {
            return;
        }

        let default_y = frame.bounds.height - PLAYER_GROUND_OFFSET;
        let (ground_y, player_x) = frame
            .registry
            .player()
            .map(|p| (p.ground_y, p.x))
            .unwrap_or((default_y, self.x));

        log::debug!("missed correct answer, obstacle at x={}", self.x);
        frame
            .registry
            .add(Entity::Obstacle(Obstacle::new(self.x, ground_y, player_x)));
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        surface.fill_rect(self.x, self.y, NUMBER_WIDTH, NUMBER_HEIGHT, Color::LightBlue);
        surface.stroke_rect(self.x, self.y, NUMBER_WIDTH, NUMBER_HEIGHT, Color::Black);
        surface.text(
            &self.value.to_string(),
            self.x + NUMBER_WIDTH / 2.0,
            self.y + NUMBER_HEIGHT / 2.0,
            20.0,
            Color::Black,
            Align::Center,
        );
    }
}

/// Outcome of a bullet striking a target (the bullet has already flagged it
/// dead). Correct hits pay out and advance the progression; wrong hits
/// damage the player and, on tier 2+, flood in two extra wrong numbers.
pub(crate) fn resolve_hit(is_correct: bool, frame: &mut Frame) {
    if is_correct {
        if let Some(player) = frame.registry.player_mut() {
            player.stars += 1;
        }
        if let Some(eq) = frame.registry.equation_mut() {
            eq.regenerate(frame.rng);
        }
        let completed = frame
            .registry
            .generator_mut()
            .and_then(Generator::record_correct_hit);
        match completed {
            Some(Tier::One) => frame.commands.push(Command::ChangeLevel(level::TIER2)),
            Some(Tier::Two) => frame.commands.push(Command::ChangeLevel(level::TIER3)),
            Some(Tier::Three) => {
                frame.registry.add(Entity::Overlay(Overlay::win()));
                if frame.audio.is_ready(Sound::Win) {
                    frame.audio.play(Sound::Win);
                }
            }
            None => {}
        }
        return;
    }

    // Wrong answer: damage through the shield-aware path.
    let shielded = frame
        .registry
        .player_mut()
        .map(|p| p.absorb_with_shield())
        .unwrap_or(true);
    if !shielded {
        lose_life(frame);
    }

    // Tier 2+ piles on two extra wrong numbers near the real answer.
    let penalty = frame
        .registry
        .generator()
        .map(|g| (g.tier.spawns_obstacles(), g.params.fall_speed));
    if let Some((true, speed)) = penalty {
        let answer = frame.registry.equation().map(|eq| eq.answer()).unwrap_or(10);
        for _ in 0..2 {
            let x = frame.rng.gen_range(0.0..frame.bounds.width - NUMBER_WIDTH);
            let value = sample_wrong_value(answer, frame.rng);
            frame
                .registry
                .add(Entity::Target(Target::new(x, -NUMBER_HEIGHT, value, false, speed)));
        }
        if let Some(generator) = frame.registry.generator_mut() {
            generator.note_penalty_spawns(2);
        }
    }
}
