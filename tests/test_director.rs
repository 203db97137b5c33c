/// Director-level integration tests: full frames through the real level
/// recipes, exercising deferred transitions, the pause snapshot and the
/// carry-over rules.
use rand::rngs::StdRng;
use rand::SeedableRng;

use math_shooter::audio::SilentAudio;
use math_shooter::director::Director;
use math_shooter::entity::{Bullet, Entity, Target};
use math_shooter::input::Key;
use math_shooter::level::{MENU, MENU_CONFIRM, PAUSE, RESET_CONFIRM, TIER1, TIER2};
use math_shooter::rect::Bounds;

fn director() -> Director {
    Director::new(
        Bounds::new(800.0, 600.0),
        Box::new(SilentAudio),
        StdRng::seed_from_u64(42),
    )
}

/// One frame with a left click at the given world position.
fn click(d: &mut Director, x: f32, y: f32) {
    let input = d.input_mut();
    input.mouse_x = x;
    input.mouse_y = y;
    input.clicked = true;
    d.update();
}

/// One frame with the given key freshly pressed.
fn press(d: &mut Director, key: Key) {
    d.input_mut().set_held(key, true);
    d.update();
}

/// Clicks the menu's Start Game button.
fn start_game(d: &mut Director) {
    click(d, 400.0, 300.0);
    assert_eq!(d.current_level(), TIER1);
}

#[test]
fn the_menu_start_button_enters_the_first_tier() {
    let mut d = director();
    assert_eq!(d.current_level(), MENU);

    start_game(&mut d);
    assert!(d.registry().player().is_some());
    assert!(d.registry().generator().is_some());
    assert!(d.registry().equation().is_some());
}

#[test]
fn escape_outside_gameplay_is_ignored() {
    let mut d = director();
    press(&mut d, Key::Escape);
    assert_eq!(d.current_level(), MENU);
    assert_eq!(d.paused_level(), None);
}

#[test]
fn pause_snapshots_the_world_and_resume_restores_it() {
    let mut d = director();
    start_game(&mut d);
    if let Some(player) = d.registry_mut().player_mut() {
        player.stars = 7;
    }

    press(&mut d, Key::Escape);
    assert_eq!(d.current_level(), PAUSE);
    assert_eq!(d.paused_level(), Some(TIER1));
    assert!(d.registry().player().is_none(), "pause screen has no avatar");

    press(&mut d, Key::C);
    assert_eq!(d.current_level(), TIER1);
    assert_eq!(d.registry().player().map(|p| p.stars), Some(7));
}

#[test]
fn pressing_escape_again_while_paused_does_nothing() {
    let mut d = director();
    start_game(&mut d);
    press(&mut d, Key::Escape);

    press(&mut d, Key::Escape);
    assert_eq!(d.current_level(), PAUSE);
    assert_eq!(d.paused_level(), Some(TIER1));
}

#[test]
fn confirmed_reset_rebuilds_the_tier_without_carry() {
    let mut d = director();
    start_game(&mut d);
    if let Some(player) = d.registry_mut().player_mut() {
        player.stars = 7;
    }

    press(&mut d, Key::Escape);
    click(&mut d, 400.0, 350.0); // Reset Level
    assert_eq!(d.current_level(), RESET_CONFIRM);

    click(&mut d, 300.0, 350.0); // Yes, Reset
    assert_eq!(d.current_level(), TIER1);
    assert_eq!(d.paused_level(), None);
    assert_eq!(d.registry().player().map(|p| p.stars), Some(0));
}

#[test]
fn backing_out_of_a_confirmation_returns_to_the_pause_menu() {
    let mut d = director();
    start_game(&mut d);
    press(&mut d, Key::Escape);
    click(&mut d, 400.0, 350.0); // Reset Level
    assert_eq!(d.current_level(), RESET_CONFIRM);

    click(&mut d, 480.0, 350.0); // Back
    assert_eq!(d.current_level(), PAUSE);
    assert_eq!(d.paused_level(), Some(TIER1), "snapshot survives the detour");
}

#[test]
fn confirmed_quit_drops_the_snapshot_and_returns_to_the_menu() {
    let mut d = director();
    start_game(&mut d);
    press(&mut d, Key::Escape);
    click(&mut d, 400.0, 400.0); // Main Menu
    assert_eq!(d.current_level(), MENU_CONFIRM);

    click(&mut d, 300.0, 350.0); // Yes, Quit
    assert_eq!(d.current_level(), MENU);
    assert_eq!(d.paused_level(), None);
}

#[test]
fn completing_a_tier_advances_and_carries_progression() {
    let mut d = director();
    start_game(&mut d);
    if let Some(player) = d.registry_mut().player_mut() {
        player.stars = 3;
    }
    if let Some(generator) = d.registry_mut().generator_mut() {
        generator.correct_hits = generator.params.correct_target - 1;
    }
    d.registry_mut()
        .add(Entity::Target(Target::new(300.0, 100.0, 7, true, 1.0)));
    d.registry_mut()
        .add(Entity::Bullet(Bullet::new(310.0, 110.0, 8.0)));

    d.update();

    assert_eq!(d.current_level(), TIER2);
    assert_eq!(
        d.registry().player().map(|p| p.stars),
        Some(4),
        "stars (including the winning hit) carry into the next tier"
    );
    assert_eq!(d.registry().generator().map(|g| g.correct_hits), Some(0));
}

#[test]
fn a_mid_pass_transition_request_does_not_cut_the_pass_short() {
    let mut d = director();
    start_game(&mut d);
    if let Some(generator) = d.registry_mut().generator_mut() {
        generator.correct_hits = generator.params.correct_target - 1;
    }

    // First target/bullet pair completes the tier and requests the advance;
    // the second pair sits later in the registry and must still resolve this
    // same frame, against the pre-transition world.
    d.registry_mut()
        .add(Entity::Target(Target::new(300.0, 100.0, 7, true, 1.0)));
    d.registry_mut()
        .add(Entity::Bullet(Bullet::new(310.0, 110.0, 8.0)));
    d.registry_mut()
        .add(Entity::Target(Target::new(100.0, 300.0, 7, true, 1.0)));
    d.registry_mut()
        .add(Entity::Bullet(Bullet::new(110.0, 310.0, 8.0)));

    d.update();

    assert_eq!(d.current_level(), TIER2);
    assert_eq!(
        d.registry().player().map(|p| p.stars),
        Some(2),
        "the later bullet still scored before the registry was replaced"
    );
}

#[test]
fn entities_spawned_mid_pass_wait_a_frame_before_updating() {
    let mut d = director();
    start_game(&mut d);
    let player_y = d.registry().player().map(|p| p.y).unwrap_or_default();

    d.input_mut().set_held(Key::Fire, true);
    d.update();

    let bullet_y = |d: &Director| {
        d.registry().iter().find_map(|e| match e {
            Entity::Bullet(b) => Some(b.y),
            _ => None,
        })
    };
    assert_eq!(
        bullet_y(&d),
        Some(player_y - 10.0),
        "fresh bullet renders where it spawned, unmoved"
    );

    d.update();
    assert_eq!(bullet_y(&d), Some(player_y - 10.0 - 8.0));
}
