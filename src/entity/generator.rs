/// Spawner and progression state machine for one gameplay tier.
///
/// Tracks the spawn timer, correct-hit count and total targets issued
/// against the tier's fixed parameter table, enforces the concurrent
/// obstacle cap, and declares the tier outcome (complete or out of
/// targets) exactly once.
use rand::Rng;
use rand::RngCore;

use crate::audio::Sound;
use crate::constants::{MAX_OBSTACLES, NUMBER_HEIGHT, NUMBER_WIDTH};
use crate::entity::{Entity, Frame, Overlay, Target};
use crate::rect::Bounds;
use crate::surface::{Align, Color, Surface};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    One,
    Two,
    Three,
}

impl Tier {
    pub fn number(self) -> u32 {
        match self {
            Tier::One => 1,
            Tier::Two => 2,
            Tier::Three => 3,
        }
    }

    /// Whether missed correct answers turn into obstacles and wrong hits
    /// spawn penalty targets. Tier 1 stays beginner friendly.
    pub fn spawns_obstacles(self) -> bool {
        self >= Tier::Two
    }

    pub fn params(self) -> TierParams {
        match self {
            Tier::One => TierParams {
                correct_target: 5,
                total_cap: 10,
                spawn_interval: 150,
                max_concurrent: 3,
                fall_speed: 1.0,
                correct_chance: 0.40,
                max_obstacles: 0,
            },
            Tier::Two => TierParams {
                correct_target: 10,
                total_cap: 15,
                spawn_interval: 100,
                max_concurrent: 5,
                fall_speed: 2.0,
                correct_chance: 0.35,
                max_obstacles: MAX_OBSTACLES,
            },
            Tier::Three => TierParams {
                correct_target: 15,
                total_cap: 20,
                spawn_interval: 60,
                max_concurrent: 7,
                fall_speed: 3.5,
                correct_chance: 0.30,
                max_obstacles: MAX_OBSTACLES,
            },
        }
    }
}

/// Fixed per-tier tuning. Reproduced exactly; behavioral parity with the
/// canonical table matters more than feel here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TierParams {
    pub correct_target: u32,
    pub total_cap: u32,
    pub spawn_interval: u32,
    pub max_concurrent: usize,
    pub fall_speed: f32,
    pub correct_chance: f64,
    pub max_obstacles: usize,
}

#[derive(Clone, Debug)]
pub struct Generator {
    pub tier: Tier,
    pub params: TierParams,
    pub spawn_timer: u32,
    pub correct_hits: u32,
    /// Every target that ever spawned this tier, scheduled or penalty.
    pub issued: u32,
    /// Set once the tier outcome (complete or failed) has been declared.
    pub outcome_sent: bool,
}

impl Generator {
    pub fn new(tier: Tier) -> Self {
        Generator {
            tier,
            params: tier.params(),
            spawn_timer: 0,
            correct_hits: 0,
            issued: 0,
            outcome_sent: false,
        }
    }

    pub fn update(&mut self, frame: &mut Frame) -> bool {
        // Concurrent obstacle cap: mark the oldest live obstacle dead when
        // the cap is exceeded.
        if frame.registry.obstacle_count() > self.params.max_obstacles {
            if let Some(oldest) = frame.registry.obstacles_mut().find(|o| !o.dead) {
                oldest.dead = true;
                log::debug!("obstacle cap exceeded, removing oldest");
            }
        }

        self.spawn_timer += 1;
        if self.spawn_timer < self.params.spawn_interval {
            return false;
        }

        if self.issued >= self.params.total_cap {
            // Cap exhausted with the timer firing again: targets still in
            // flight had one full interval to resolve, so the session is
            // out of chances.
            if self.correct_hits < self.params.correct_target && !self.outcome_sent {
                self.outcome_sent = true;
                log::info!(
                    "tier {} failed: {}/{} correct after {} targets",
                    self.tier.number(),
                    self.correct_hits,
                    self.params.correct_target,
                    self.issued,
                );
                frame.registry.add(Entity::Overlay(Overlay::out_of_targets()));
                if frame.audio.is_ready(Sound::Lose) {
                    frame.audio.play(Sound::Lose);
                }
            }
            self.spawn_timer = 0;
        } else if frame.registry.target_count() < self.params.max_concurrent {
            self.spawn_target(frame);
            self.spawn_timer = 0;
        }
        // Concurrent cap reached: keep the timer primed so a spawn happens
        // as soon as a slot frees up.

        false
    }

    fn spawn_target(&mut self, frame: &mut Frame) {
        let Some(answer) = frame.registry.equation().map(|eq| eq.answer()) else {
            return;
        };

        let is_correct = frame.rng.gen_bool(self.params.correct_chance);
        let value = if is_correct {
            answer
        } else {
            sample_wrong_value(answer, frame.rng)
        };
        let x = frame.rng.gen_range(0.0..frame.bounds.width - NUMBER_WIDTH);

        frame.registry.add(Entity::Target(Target::new(
            x,
            -NUMBER_HEIGHT,
            value,
            is_correct,
            self.params.fall_speed,
        )));
        self.issued += 1;
    }

    /// Records a correct hit. Returns the tier exactly once when its target
    /// is reached, so the caller can request the advance.
    pub fn record_correct_hit(&mut self) -> Option<Tier> {
        self.correct_hits += 1;
        if self.correct_hits >= self.params.correct_target && !self.outcome_sent {
            self.outcome_sent = true;
            log::info!("tier {} complete", self.tier.number());
            Some(self.tier)
        } else {
            None
        }
    }

    /// Counts penalty spawns against the total-issued cap.
    pub fn note_penalty_spawns(&mut self, count: u32) {
        self.issued += count;
    }

    pub fn render(&self, surface: &mut dyn Surface, bounds: Bounds) {
        surface.text(
            &format!("Level: {}", self.tier.number()),
            bounds.width - 30.0,
            40.0,
            16.0,
            Color::Black,
            Align::Right,
        );
        surface.text(
            &format!("Progress: {}/{}", self.correct_hits, self.params.correct_target),
            bounds.width - 30.0,
            60.0,
            16.0,
            Color::Black,
            Align::Right,
        );
    }
}

/// Draws a plausible wrong answer near the correct one: uniformly from
/// [max(1, answer-5), answer+5], rejection-sampled so it never equals the
/// answer itself.
pub fn sample_wrong_value(answer: i32, rng: &mut dyn RngCore) -> i32 {
    let lo = (answer - 5).max(1);
    let hi = answer + 5;
    loop {
        let value = rng.gen_range(lo..=hi);
        if value != answer {
            return value;
        }
    }
}
