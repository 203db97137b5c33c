/// Entity-level behavior tests.
///
/// Each test drives one entity (or the hit-resolution path) through a
/// hand-built frame context, mirroring how the director vacates the slot of
/// the entity being updated.
use rand::rngs::StdRng;
use rand::SeedableRng;

use math_shooter::audio::SilentAudio;
use math_shooter::constants::{
    NUMBER_HEIGHT, SHIELDS_FOR_LIFE_CONVERSION, SHIELD_COST, SHOOT_COOLDOWN_FRAMES, STARTING_LIVES,
};
use math_shooter::entity::{
    generator::sample_wrong_value, Bullet, Command, Entity, Equation, Frame, Generator, Lives,
    Obstacle, Op, Overlay, OverlayKind, Player, Target, Tier,
};
use math_shooter::input::{InputState, Key};
use math_shooter::rect::{Bounds, Rect};
use math_shooter::registry::Registry;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn bounds() -> Bounds {
    Bounds::new(800.0, 600.0)
}

/// Owns everything a [`Frame`] borrows, so tests can build one per call.
struct Harness {
    registry: Registry,
    input: InputState,
    audio: SilentAudio,
    commands: Vec<Command>,
    rng: StdRng,
    bounds: Bounds,
}

impl Harness {
    fn new() -> Self {
        Harness {
            registry: Registry::new(),
            input: InputState::new(),
            audio: SilentAudio,
            commands: Vec::new(),
            rng: seeded_rng(),
            bounds: bounds(),
        }
    }

    fn frame(&mut self) -> Frame<'_> {
        Frame {
            registry: &mut self.registry,
            input: &mut self.input,
            bounds: self.bounds,
            audio: &mut self.audio,
            commands: &mut self.commands,
            rng: &mut self.rng,
        }
    }

    fn overlay_count(&self, kind: OverlayKind) -> usize {
        self.registry
            .iter()
            .filter(|e| matches!(e, Entity::Overlay(o) if o.kind == kind))
            .count()
    }
}

// ── Equations ─────────────────────────────────────────────────────────────────

#[test]
fn equation_answer_always_matches_operands() {
    let mut rng = seeded_rng();
    for tier in [Tier::One, Tier::Two, Tier::Three] {
        let mut eq = Equation::new(tier, &mut rng);
        for _ in 0..200 {
            eq.regenerate(&mut rng);
            assert_eq!(eq.eval(), eq.answer());
            assert!(eq.answer() >= 0, "subtraction must never go negative");
            if eq.op == Op::Mul {
                assert!((1..=5).contains(&eq.num1));
                assert!((1..=5).contains(&eq.num2));
            }
        }
    }
}

#[test]
fn multiplication_only_appears_on_the_last_tier() {
    let mut rng = seeded_rng();
    for tier in [Tier::One, Tier::Two] {
        let mut eq = Equation::new(tier, &mut rng);
        for _ in 0..200 {
            eq.regenerate(&mut rng);
            assert_ne!(eq.op, Op::Mul);
        }
    }
}

#[test]
fn wrong_values_are_near_misses() {
    let mut rng = seeded_rng();
    for answer in 1..=25 {
        for _ in 0..50 {
            let value = sample_wrong_value(answer, &mut rng);
            assert_ne!(value, answer);
            assert!(value >= 1);
            assert!((value - answer).abs() <= 5);
        }
    }
}

// ── Collision ─────────────────────────────────────────────────────────────────

#[test]
fn shared_edges_do_not_collide() {
    let a = Rect::new(0.0, 0.0, 40.0, 40.0);
    let touching_right = Rect::new(40.0, 0.0, 40.0, 40.0);
    let touching_below = Rect::new(0.0, 40.0, 40.0, 40.0);
    let overlapping = Rect::new(39.0, 39.0, 40.0, 40.0);

    assert!(!a.intersects(&touching_right));
    assert!(!a.intersects(&touching_below));
    assert!(a.intersects(&overlapping));
}

mod rect_properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn intersection_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in 1.0f32..100.0, ah in 1.0f32..100.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            bw in 1.0f32..100.0, bh in 1.0f32..100.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        }

        #[test]
        fn rect_never_intersects_its_edge_neighbor(
            x in -500.0f32..500.0, y in -500.0f32..500.0,
            w in 1.0f32..100.0, h in 1.0f32..100.0,
        ) {
            let a = Rect::new(x, y, w, h);
            let right = Rect::new(x + w, y, w, h);
            prop_assert!(!a.intersects(&right));
        }
    }
}

// ── Player movement & shooting ────────────────────────────────────────────────

#[test]
fn jump_arcs_back_to_the_ground_line() {
    let mut h = Harness::new();
    let mut player = Player::new(h.bounds);
    let ground = player.ground_y;

    h.input.set_held(Key::Up, true);
    player.update(&mut h.frame());
    assert!(player.y < ground, "jump impulse should lift off immediately");
    assert!(player.is_jumping);

    h.input.set_held(Key::Up, false);
    for _ in 0..120 {
        player.update(&mut h.frame());
    }
    assert_eq!(player.y, ground);
    assert!(!player.is_jumping);
}

#[test]
fn movement_clamps_to_world_edges() {
    let mut h = Harness::new();
    let mut player = Player::new(h.bounds);

    h.input.set_held(Key::Left, true);
    for _ in 0..500 {
        player.update(&mut h.frame());
    }
    assert!(player.x >= 0.0 - player.speed);
    assert!(player.x <= 0.0, "left clamp allows at most one step past zero");
}

#[test]
fn shoot_cooldown_limits_fire_rate() {
    let mut h = Harness::new();
    let mut player = Player::new(h.bounds);
    h.input.set_held(Key::Fire, true);

    player.update(&mut h.frame());
    player.update(&mut h.frame());
    assert_eq!(h.registry.len(), 1, "second shot must wait out the cooldown");

    for _ in 0..SHOOT_COOLDOWN_FRAMES {
        player.update(&mut h.frame());
    }
    assert_eq!(h.registry.len(), 2);
}

// ── Economy ───────────────────────────────────────────────────────────────────

#[test]
fn failed_purchase_never_touches_the_balance() {
    let mut player = Player::new(bounds());
    player.stars = SHIELD_COST - 1;
    assert!(!player.purchase_shield());
    assert_eq!(player.stars, SHIELD_COST - 1);
    assert!(!player.has_shield);
}

#[test]
fn shields_do_not_stack() {
    let mut player = Player::new(bounds());
    player.stars = SHIELD_COST * 2;
    assert!(player.purchase_shield());
    assert!(!player.purchase_shield(), "active shield blocks a second buy");
    assert_eq!(player.stars, SHIELD_COST);
    assert_eq!(player.shields_purchased, 1);
}

#[test]
fn conversion_spends_exactly_one_batch() {
    let mut player = Player::new(bounds());
    player.shields_purchased = SHIELDS_FOR_LIFE_CONVERSION - 1;
    assert!(!player.convert_shields_to_life());
    assert_eq!(player.shields_purchased, SHIELDS_FOR_LIFE_CONVERSION - 1);

    player.shields_purchased = SHIELDS_FOR_LIFE_CONVERSION + 5;
    assert!(player.convert_shields_to_life());
    assert_eq!(player.shields_purchased, 5);
}

// ── Hit resolution ────────────────────────────────────────────────────────────

fn gameplay_registry(tier: Tier, rng: &mut StdRng) -> Registry {
    let mut registry = Registry::new();
    registry.add(Entity::Player(Player::new(bounds())));
    registry.add(Entity::Lives(Lives::new(30.0, 50.0)));
    registry.add(Entity::Equation(Equation::new(tier, rng)));
    registry.add(Entity::Generator(Generator::new(tier)));
    registry
}

#[test]
fn correct_hit_awards_a_star_and_counts_progress() {
    let mut h = Harness::new();
    h.registry = gameplay_registry(Tier::One, &mut h.rng);
    h.registry
        .add(Entity::Target(Target::new(300.0, 100.0, 7, true, 1.0)));

    let mut bullet = Bullet::new(310.0, 110.0, 8.0);
    let removed = bullet.update(&mut h.frame());

    assert!(removed, "a connecting bullet leaves the world");
    assert_eq!(h.registry.player().map(|p| p.stars), Some(1));
    assert_eq!(h.registry.generator().map(|g| g.correct_hits), Some(1));
    assert!(h.registry.targets().all(|t| t.dead));
}

#[test]
fn completing_a_tier_requests_the_advance_exactly_once() {
    let mut h = Harness::new();
    h.registry = gameplay_registry(Tier::One, &mut h.rng);
    if let Some(generator) = h.registry.generator_mut() {
        generator.correct_hits = generator.params.correct_target - 1;
    }
    h.registry
        .add(Entity::Target(Target::new(300.0, 100.0, 7, true, 1.0)));

    let mut bullet = Bullet::new(310.0, 110.0, 8.0);
    bullet.update(&mut h.frame());

    assert_eq!(h.commands, vec![Command::ChangeLevel(5)]);

    // A stray extra correct hit after completion must not fire again.
    let again = h.registry.generator_mut().and_then(Generator::record_correct_hit);
    assert_eq!(again, None);
}

#[test]
fn final_tier_completion_raises_the_win_overlay() {
    let mut h = Harness::new();
    h.registry = gameplay_registry(Tier::Three, &mut h.rng);
    if let Some(generator) = h.registry.generator_mut() {
        generator.correct_hits = generator.params.correct_target - 1;
    }
    h.registry
        .add(Entity::Target(Target::new(300.0, 100.0, 7, true, 3.5)));

    let mut bullet = Bullet::new(310.0, 110.0, 8.0);
    bullet.update(&mut h.frame());

    assert!(h.commands.is_empty(), "winning never changes level");
    assert_eq!(h.overlay_count(OverlayKind::Win), 1);
}

#[test]
fn wrong_hit_costs_a_life_and_floods_targets_on_later_tiers() {
    let mut h = Harness::new();
    h.registry = gameplay_registry(Tier::Two, &mut h.rng);
    h.registry
        .add(Entity::Target(Target::new(300.0, 100.0, 999, false, 2.0)));

    let mut bullet = Bullet::new(310.0, 110.0, 8.0);
    bullet.update(&mut h.frame());

    assert_eq!(h.registry.lives().map(|l| l.count), Some(STARTING_LIVES - 1));
    assert_eq!(h.registry.target_count(), 2, "two penalty numbers flood in");
    assert_eq!(h.registry.generator().map(|g| g.issued), Some(2));
}

#[test]
fn wrong_hit_on_the_first_tier_spawns_no_penalty_targets() {
    let mut h = Harness::new();
    h.registry = gameplay_registry(Tier::One, &mut h.rng);
    h.registry
        .add(Entity::Target(Target::new(300.0, 100.0, 999, false, 1.0)));

    let mut bullet = Bullet::new(310.0, 110.0, 8.0);
    bullet.update(&mut h.frame());

    assert_eq!(h.registry.lives().map(|l| l.count), Some(STARTING_LIVES - 1));
    assert_eq!(h.registry.target_count(), 0);
}

#[test]
fn shield_absorbs_a_wrong_hit_before_any_life_is_lost() {
    let mut h = Harness::new();
    h.registry = gameplay_registry(Tier::One, &mut h.rng);
    if let Some(player) = h.registry.player_mut() {
        player.has_shield = true;
    }
    h.registry
        .add(Entity::Target(Target::new(300.0, 100.0, 999, false, 1.0)));

    let mut bullet = Bullet::new(310.0, 110.0, 8.0);
    bullet.update(&mut h.frame());

    assert_eq!(h.registry.lives().map(|l| l.count), Some(STARTING_LIVES));
    assert_eq!(h.registry.player().map(|p| p.has_shield), Some(false));
}

#[test]
fn lives_floor_at_zero_and_the_lose_overlay_appears_once() {
    let mut h = Harness::new();
    h.registry = gameplay_registry(Tier::One, &mut h.rng);
    if let Some(lives) = h.registry.lives_mut() {
        lives.count = 1;
    }

    for _ in 0..2 {
        h.registry
            .add(Entity::Target(Target::new(300.0, 100.0, 999, false, 1.0)));
        let mut bullet = Bullet::new(310.0, 110.0, 8.0);
        bullet.update(&mut h.frame());
        h.registry.compact();
        // Dead targets are filtered by their own next update.
        let pass_len = h.registry.slot_count();
        for i in 0..pass_len {
            if let Some(mut entity) = h.registry.take_slot(i) {
                let remove = entity.update(&mut h.frame());
                if !remove {
                    h.registry.restore_slot(i, entity);
                }
            }
        }
        h.registry.compact();
    }

    assert_eq!(h.registry.lives().map(|l| l.count), Some(0));
    assert_eq!(h.overlay_count(OverlayKind::Lose), 1);
}

// ── Falling targets & obstacles ───────────────────────────────────────────────

#[test]
fn missed_correct_answer_becomes_an_obstacle_on_later_tiers() {
    let mut h = Harness::new();
    h.registry = gameplay_registry(Tier::Two, &mut h.rng);

    let mut target = Target::new(300.0, 600.0 - NUMBER_HEIGHT, 7, true, 2.0);
    let removed = target.update(&mut h.frame());

    assert!(removed);
    assert_eq!(h.registry.obstacle_count(), 1);
}

#[test]
fn first_tier_misses_spawn_nothing() {
    let mut h = Harness::new();
    h.registry = gameplay_registry(Tier::One, &mut h.rng);

    let mut target = Target::new(300.0, 600.0 - NUMBER_HEIGHT, 7, true, 1.0);
    assert!(target.update(&mut h.frame()));
    assert_eq!(h.registry.obstacle_count(), 0);
}

#[test]
fn obstacles_keep_their_minimum_spacing() {
    let mut h = Harness::new();
    h.registry = gameplay_registry(Tier::Two, &mut h.rng);
    h.registry
        .add(Entity::Obstacle(Obstacle::new(320.0, 500.0, 0.0)));

    let mut target = Target::new(300.0, 600.0 - NUMBER_HEIGHT, 7, true, 2.0);
    assert!(target.update(&mut h.frame()));
    assert_eq!(h.registry.obstacle_count(), 1, "too close, no second obstacle");
}

#[test]
fn missed_wrong_answers_never_become_obstacles() {
    let mut h = Harness::new();
    h.registry = gameplay_registry(Tier::Two, &mut h.rng);

    let mut target = Target::new(300.0, 600.0 - NUMBER_HEIGHT, 999, false, 2.0);
    assert!(target.update(&mut h.frame()));
    assert_eq!(h.registry.obstacle_count(), 0);
}

#[test]
fn obstacle_direction_is_fixed_at_spawn_and_ties_go_right() {
    let toward_left = Obstacle::new(400.0, 500.0, 100.0);
    assert_eq!(toward_left.direction, -1.0);

    let toward_right = Obstacle::new(400.0, 500.0, 700.0);
    assert_eq!(toward_right.direction, 1.0);

    let tie = Obstacle::new(400.0, 500.0, 400.0);
    assert_eq!(tie.direction, 1.0);
}

#[test]
fn obstacle_leaves_the_world_at_either_edge() {
    let mut h = Harness::new();
    let mut obstacle = Obstacle::new(1.0, 500.0, 0.0);
    obstacle.direction = -1.0;

    let mut removed = false;
    for _ in 0..60 {
        if obstacle.update(&mut h.frame()) {
            removed = true;
            break;
        }
    }
    assert!(removed);
}

#[test]
fn player_contact_consumes_the_obstacle_and_opens_invincibility() {
    let mut h = Harness::new();
    h.registry = gameplay_registry(Tier::Two, &mut h.rng);
    let mut player = match h.registry.take_slot(0) {
        Some(Entity::Player(p)) => p,
        _ => panic!("player occupies slot 0"),
    };
    h.registry
        .add(Entity::Obstacle(Obstacle::new(player.x, player.y, player.x)));

    player.update(&mut h.frame());

    assert!(player.invincibility > 0);
    assert_eq!(h.registry.lives().map(|l| l.count), Some(STARTING_LIVES - 1));
    assert!(h.registry.obstacles().all(|o| o.dead));

    // A second obstacle during the invincibility window is harmless.
    h.registry
        .add(Entity::Obstacle(Obstacle::new(player.x, player.y, player.x)));
    player.update(&mut h.frame());
    assert_eq!(h.registry.lives().map(|l| l.count), Some(STARTING_LIVES - 1));
}

// ── Generator ─────────────────────────────────────────────────────────────────

#[test]
fn generator_spawns_on_its_interval() {
    let mut h = Harness::new();
    h.registry = gameplay_registry(Tier::One, &mut h.rng);
    let mut generator = match h.registry.take_slot(3) {
        Some(Entity::Generator(g)) => g,
        _ => panic!("generator occupies slot 3"),
    };

    for _ in 0..generator.params.spawn_interval - 1 {
        generator.update(&mut h.frame());
    }
    assert_eq!(h.registry.target_count(), 0);

    generator.update(&mut h.frame());
    assert_eq!(h.registry.target_count(), 1);
    assert_eq!(generator.issued, 1);
    assert_eq!(generator.spawn_timer, 0);
}

#[test]
fn generator_respects_the_concurrent_cap() {
    let mut h = Harness::new();
    h.registry = gameplay_registry(Tier::One, &mut h.rng);
    let mut generator = match h.registry.take_slot(3) {
        Some(Entity::Generator(g)) => g,
        _ => panic!("generator occupies slot 3"),
    };
    for _ in 0..generator.params.max_concurrent {
        h.registry
            .add(Entity::Target(Target::new(100.0, 100.0, 3, false, 1.0)));
    }

    for _ in 0..generator.params.spawn_interval * 2 {
        generator.update(&mut h.frame());
    }
    assert_eq!(h.registry.target_count(), generator.params.max_concurrent);

    // Freeing one slot lets the primed timer fire immediately.
    if let Some(target) = h.registry.targets_mut().next() {
        target.dead = true;
    }
    generator.update(&mut h.frame());
    assert_eq!(generator.issued, 1);
}

#[test]
fn exhausting_the_target_cap_fails_the_session_once() {
    let mut h = Harness::new();
    h.registry = gameplay_registry(Tier::One, &mut h.rng);
    let mut generator = match h.registry.take_slot(3) {
        Some(Entity::Generator(g)) => g,
        _ => panic!("generator occupies slot 3"),
    };
    generator.issued = generator.params.total_cap;

    for _ in 0..generator.params.spawn_interval * 3 {
        generator.update(&mut h.frame());
    }

    assert!(generator.outcome_sent);
    assert_eq!(h.overlay_count(OverlayKind::OutOfTargets), 1);
    assert_eq!(h.registry.target_count(), 0, "no spawns past the cap");
}

#[test]
fn obstacle_cap_sweep_retires_the_oldest() {
    let mut h = Harness::new();
    h.registry = gameplay_registry(Tier::Two, &mut h.rng);
    let mut generator = match h.registry.take_slot(3) {
        Some(Entity::Generator(g)) => g,
        _ => panic!("generator occupies slot 3"),
    };
    for i in 0..generator.params.max_obstacles + 1 {
        h.registry
            .add(Entity::Obstacle(Obstacle::new(i as f32 * 60.0, 500.0, 0.0)));
    }

    generator.update(&mut h.frame());

    assert_eq!(h.registry.obstacle_count(), generator.params.max_obstacles);
    let oldest_dead = h.registry.obstacles().next().map(|o| o.dead);
    assert_eq!(oldest_dead, Some(true));
}

// ── Overlays ──────────────────────────────────────────────────────────────────

#[test]
fn terminal_overlays_are_distinguished_from_menu_backdrops() {
    assert!(!Overlay::dim().kind.is_terminal());
    assert!(Overlay::lose().kind.is_terminal());
    assert!(Overlay::out_of_targets().kind.is_terminal());
    assert!(Overlay::win().kind.is_terminal());
}
