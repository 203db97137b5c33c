/// Level recipes.
///
/// A level is a pure recipe: a function from the director's context (world
/// bounds, RNG, explicit carry-over) to a fully populated registry. Levels
/// hold no state of their own between activations.
use rand::RngCore;

use crate::constants::{
    HUD_CONVERSION_BUTTON_Y, HUD_LEFT_MARGIN, HUD_LIVES_Y, HUD_SHIELD_BUTTON_Y, HUD_STARS_Y,
};
use crate::entity::{
    Button, Command, ConvertButton, Entity, Equation, Generator, Label, Lives, Overlay, Player,
    ShieldButton, Stars, Tier,
};
use crate::rect::Bounds;
use crate::registry::Registry;
use crate::surface::Color;

// Level indices. Gameplay sits in the TIER1..=TIER3 band; everything else
// is a menu or overlay screen.
pub const MENU: usize = 0;
pub const HOW_TO_PLAY: usize = 1;
pub const STORY: usize = 2;
pub const CONTROLS: usize = 3;
pub const TIER1: usize = 4;
pub const TIER2: usize = 5;
pub const TIER3: usize = 6;
pub const PAUSE: usize = 7;
pub const RESET_CONFIRM: usize = 8;
pub const MENU_CONFIRM: usize = 9;

pub const LEVEL_COUNT: usize = 10;

pub fn is_gameplay(index: usize) -> bool {
    (TIER1..=TIER3).contains(&index)
}

pub fn tier_for_level(index: usize) -> Option<Tier> {
    match index {
        TIER1 => Some(Tier::One),
        TIER2 => Some(Tier::Two),
        TIER3 => Some(Tier::Three),
        _ => None,
    }
}

/// Progression data copied from the outgoing player across gameplay
/// transitions. Dropped on reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerCarry {
    pub stars: u32,
    pub has_shield: bool,
    pub shields_purchased: u32,
}

impl PlayerCarry {
    pub fn from_player(player: &Player) -> Self {
        PlayerCarry {
            stars: player.stars,
            has_shield: player.has_shield,
            shields_purchased: player.shields_purchased,
        }
    }
}

/// Builds the registry for a level. `carry` only applies to gameplay tiers.
pub fn build_level(
    index: usize,
    bounds: Bounds,
    carry: Option<PlayerCarry>,
    rng: &mut dyn RngCore,
) -> Registry {
    match index {
        MENU => menu_level(bounds),
        HOW_TO_PLAY => how_to_play_level(bounds),
        STORY => story_level(bounds),
        CONTROLS => controls_level(bounds),
        PAUSE => pause_level(bounds),
        RESET_CONFIRM => reset_confirm_level(bounds),
        MENU_CONFIRM => menu_confirm_level(bounds),
        _ => {
            let tier = tier_for_level(index).unwrap_or(Tier::One);
            gameplay_level(tier, bounds, carry, rng)
        }
    }
}

// ── Gameplay ──────────────────────────────────────────────────────────────────

fn gameplay_level(
    tier: Tier,
    bounds: Bounds,
    carry: Option<PlayerCarry>,
    rng: &mut dyn RngCore,
) -> Registry {
    let mut registry = Registry::new();

    let mut player = Player::new(bounds);
    if let Some(carry) = carry {
        player.stars = carry.stars;
        player.has_shield = carry.has_shield;
        player.shields_purchased = carry.shields_purchased;
    }
    registry.add(Entity::Player(player));

    registry.add(Entity::Lives(Lives::new(HUD_LEFT_MARGIN, HUD_LIVES_Y)));
    registry.add(Entity::Stars(Stars::new(HUD_LEFT_MARGIN, HUD_STARS_Y)));
    registry.add(Entity::ShieldButton(ShieldButton::new(
        HUD_LEFT_MARGIN,
        HUD_SHIELD_BUTTON_Y,
    )));
    registry.add(Entity::ConvertButton(ConvertButton::new(
        HUD_LEFT_MARGIN,
        HUD_CONVERSION_BUTTON_Y,
    )));

    registry.add(Entity::Equation(Equation::new(tier, rng)));
    registry.add(Entity::Generator(Generator::new(tier)));

    registry
}

// ── Menu ──────────────────────────────────────────────────────────────────────

fn menu_level(bounds: Bounds) -> Registry {
    let mut registry = Registry::new();
    let cx = bounds.width / 2.0;
    let cy = bounds.height / 2.0;

    registry.add(Entity::Label(Label::new(
        cx,
        cy - 150.0,
        "Math Shooter+",
        48.0,
        Color::Purple,
    )));
    registry.add(Entity::Label(Label::new(
        cx,
        cy - 100.0,
        "Shoot the correct answers!",
        24.0,
        Color::Pink,
    )));

    let (bw, bh, spacing) = (220.0, 45.0, 55.0);
    let bx = (bounds.width - bw) / 2.0;
    let start_y = cy - 20.0;
    let items: &[(&str, Command)] = &[
        ("Start Game", Command::ChangeLevel(TIER1)),
        ("How to Play", Command::ChangeLevel(HOW_TO_PLAY)),
        ("Story", Command::ChangeLevel(STORY)),
        ("Controls", Command::ChangeLevel(CONTROLS)),
    ];
    for (i, (text, action)) in items.iter().enumerate() {
        registry.add(Entity::Button(Button::new(
            bx,
            start_y + spacing * i as f32,
            bw,
            bh,
            *text,
            *action,
        )));
    }

    registry
}

// ── Info screens ──────────────────────────────────────────────────────────────

fn info_screen(bounds: Bounds, title: &str, lines: &[(&str, f32, Color)]) -> Registry {
    let mut registry = Registry::new();
    let cx = bounds.width / 2.0;

    registry.add(Entity::Label(Label::new(cx, 100.0, title, 36.0, Color::Purple)));

    let mut y = 170.0;
    for (text, size, color) in lines {
        if !text.is_empty() {
            registry.add(Entity::Label(Label::new(cx, y, *text, *size, *color)));
        }
        y += if *size > 20.0 { 35.0 } else { 28.0 };
    }

    registry.add(Entity::Button(Button::new(
        50.0,
        bounds.height - 80.0,
        120.0,
        40.0,
        "Back to Menu",
        Command::ChangeLevel(MENU),
    )));

    registry
}

fn how_to_play_level(bounds: Bounds) -> Registry {
    let lines: &[(&str, f32, Color)] = &[
        ("OBJECTIVE: Shoot falling numbers that match the equation", 18.0, Color::Pink),
        ("SCORING: Earn 1 star for each correct answer", 18.0, Color::Pink),
        ("LEVELS: Complete 5, 10, then 15 correct answers to advance", 18.0, Color::Pink),
        ("SHIELDS: Buy protection with stars", 18.0, Color::Pink),
        ("OBSTACLES: Missed correct answers become moving obstacles (Level 2+)", 18.0, Color::Pink),
        ("LIVES: Start with 5 lives, lose 1 for wrong answers or collisions", 18.0, Color::Pink),
        ("WIN: Complete all 3 levels by reaching target correct answers", 18.0, Color::Pink),
    ];
    info_screen(bounds, "How to Play", lines)
}

fn story_level(bounds: Bounds) -> Registry {
    let lines: &[(&str, f32, Color)] = &[
        ("Ellie loved math more than anything in the world.", 20.0, Color::Pink),
        ("While other kids found numbers boring, she saw magic", 20.0, Color::Pink),
        ("in every equation and dreamed of sharing that joy.", 20.0, Color::Pink),
        ("", 20.0, Color::Pink),
        ("One day she had a brilliant idea:", 20.0, Color::Pink),
        ("\"What if learning math could be an adventure?\"", 20.0, Color::Pink),
        ("", 20.0, Color::Pink),
        ("Now it's your turn to experience her vision.", 20.0, Color::Pink),
        ("Master each level and show that math can be fun!", 20.0, Color::Pink),
    ];
    info_screen(bounds, "The Story", lines)
}

fn controls_level(bounds: Bounds) -> Registry {
    let lines: &[(&str, f32, Color)] = &[
        ("MOVEMENT:", 24.0, Color::Purple),
        ("Left / Right arrows: move", 18.0, Color::Pink),
        ("Up arrow: jump over obstacles", 18.0, Color::Pink),
        ("COMBAT:", 24.0, Color::Purple),
        ("Space: shoot upward", 18.0, Color::Pink),
        ("INTERACTION:", 24.0, Color::Purple),
        ("Mouse click: buy shields and upgrades", 18.0, Color::Pink),
        ("GAME CONTROL:", 24.0, Color::Purple),
        ("Esc or P: pause    C: continue", 18.0, Color::Pink),
    ];
    info_screen(bounds, "Game Controls", lines)
}

// ── Pause and confirmation screens ────────────────────────────────────────────

fn pause_level(bounds: Bounds) -> Registry {
    let mut registry = Registry::new();
    let cx = bounds.width / 2.0;
    let cy = bounds.height / 2.0;

    registry.add(Entity::Overlay(Overlay::dim()));
    registry.add(Entity::Label(Label::new(cx, cy - 150.0, "Game Paused", 42.0, Color::Pink)));
    registry.add(Entity::Label(Label::new(
        cx,
        cy - 100.0,
        "Press C to continue",
        16.0,
        Color::Gold,
    )));

    let (bw, bh, spacing) = (200.0, 45.0, 55.0);
    let bx = (bounds.width - bw) / 2.0;
    let start_y = cy - 20.0;
    let items: &[(&str, Command)] = &[
        ("Continue (C)", Command::Resume),
        ("Reset Level", Command::ChangeLevel(RESET_CONFIRM)),
        ("Main Menu", Command::ChangeLevel(MENU_CONFIRM)),
    ];
    for (i, (text, action)) in items.iter().enumerate() {
        registry.add(Entity::Button(Button::new(
            bx,
            start_y + spacing * i as f32,
            bw,
            bh,
            *text,
            *action,
        )));
    }

    registry
}

fn confirm_screen(
    bounds: Bounds,
    title: &str,
    message: &str,
    confirm_text: &str,
    confirm: Command,
) -> Registry {
    let mut registry = Registry::new();
    let cx = bounds.width / 2.0;
    let cy = bounds.height / 2.0;

    registry.add(Entity::Overlay(Overlay::dim()));
    registry.add(Entity::Label(Label::new(cx, cy - 80.0, title, 32.0, Color::Purple)));
    registry.add(Entity::Label(Label::new(cx, cy - 30.0, message, 18.0, Color::Gold)));

    let (bw, bh, gap) = (140.0, 40.0, 20.0);
    let left_x = cx - bw - gap / 2.0;
    let y = cy + 30.0;
    registry.add(Entity::Button(Button::new(left_x, y, bw, bh, confirm_text, confirm)));
    registry.add(Entity::Button(Button::new(
        left_x + bw + gap,
        y,
        bw,
        bh,
        "Back",
        Command::ChangeLevel(PAUSE),
    )));

    registry
}

fn reset_confirm_level(bounds: Bounds) -> Registry {
    confirm_screen(
        bounds,
        "Reset Level?",
        "This will restart the current level",
        "Yes, Reset",
        Command::Reset,
    )
}

fn menu_confirm_level(bounds: Bounds) -> Registry {
    confirm_screen(
        bounds,
        "Return to Main Menu?",
        "Your progress will be lost",
        "Yes, Quit",
        Command::QuitToMenu,
    )
}
