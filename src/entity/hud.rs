/// Gameplay HUD entities: the lives and stars counters, the two purchase
/// buttons, and the terminal (win/lose) overlays.
///
/// Counters and buttons mirror player state into their own fields during
/// update so render stays a pure read. The mirrors lag a frame behind
/// awards made later in the pass, which is invisible at 60 FPS.
use crate::audio::Sound;
use crate::constants::{SHIELDS_FOR_LIFE_CONVERSION, SHIELD_COST, STARTING_LIVES};
use crate::entity::{Entity, Frame};
use crate::rect::{Bounds, Rect};
use crate::surface::{Align, Color, Surface};

// ── Lives ─────────────────────────────────────────────────────────────────────

/// Authoritative life counter. Lives floor at zero; reaching zero raises
/// the lose overlay exactly once.
#[derive(Clone, Debug)]
pub struct Lives {
    pub x: f32,
    pub y: f32,
    pub count: u32,
}

impl Lives {
    pub fn new(x: f32, y: f32) -> Self {
        Lives {
            x,
            y,
            count: STARTING_LIVES,
        }
    }

    pub fn add_life(&mut self) {
        self.count += 1;
        log::debug!("life added, total {}", self.count);
    }

    pub fn update(&mut self, _frame: &mut Frame) -> bool {
        false
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        surface.text(
            &format!("Lives: {}", self.count),
            self.x,
            self.y,
            18.0,
            Color::Black,
            Align::Left,
        );
        for i in 0..self.count {
            let heart_x = self.x + 70.0 + i as f32 * 25.0;
            surface.fill_rect(heart_x, self.y - 12.0, 15.0, 15.0, Color::Red);
        }
    }
}

/// Decrements the life counter through a registry lookup and raises the
/// lose overlay when the last life goes. Skipped when no counter exists.
pub(crate) fn lose_life(frame: &mut Frame) {
    let exhausted = match frame.registry.lives_mut() {
        Some(lives) if lives.count > 0 => {
            lives.count -= 1;
            log::debug!("life lost, {} left", lives.count);
            lives.count == 0
        }
        _ => false,
    };
    if exhausted {
        frame.registry.add(Entity::Overlay(Overlay::lose()));
        if frame.audio.is_ready(Sound::Lose) {
            frame.audio.play(Sound::Lose);
        }
    }
}

// ── Stars ─────────────────────────────────────────────────────────────────────

/// Star (currency) display, mirrored from the player each frame.
#[derive(Clone, Debug)]
pub struct Stars {
    pub x: f32,
    pub y: f32,
    pub count: u32,
}

impl Stars {
    pub fn new(x: f32, y: f32) -> Self {
        Stars { x, y, count: 0 }
    }

    pub fn update(&mut self, frame: &mut Frame) -> bool {
        if let Some(player) = frame.registry.player() {
            self.count = player.stars;
        }
        false
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        surface.text(
            &format!("Stars: {} *", self.count),
            self.x,
            self.y,
            18.0,
            Color::Gold,
            Align::Left,
        );
    }
}

// ── Shield purchase button ────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct ShieldButton {
    pub x: f32,
    pub y: f32,
    // Display mirror of player state.
    affordable: bool,
    shield_active: bool,
    player_present: bool,
}

impl ShieldButton {
    pub const WIDTH: f32 = 140.0;
    pub const HEIGHT: f32 = 40.0;

    pub fn new(x: f32, y: f32) -> Self {
        ShieldButton {
            x,
            y,
            affordable: false,
            shield_active: false,
            player_present: false,
        }
    }

    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, Self::WIDTH, Self::HEIGHT)
    }

    pub fn update(&mut self, frame: &mut Frame) -> bool {
        let clicked =
            frame.input.clicked && self.rect().contains(frame.input.mouse_x, frame.input.mouse_y);

        match frame.registry.player_mut() {
            Some(player) => {
                if clicked {
                    player.purchase_shield();
                }
                self.affordable = player.stars >= player.shield_cost;
                self.shield_active = player.has_shield;
                self.player_present = true;
            }
            None => self.player_present = false,
        }
        false
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        if !self.player_present {
            return;
        }

        let (fill, border, label) = if self.shield_active {
            (Color::Cyan, Color::Cyan, "Shield Active!".to_string())
        } else if self.affordable {
            (Color::Green, Color::Green, format!("Buy Shield ({}*)", SHIELD_COST))
        } else {
            (Color::Grey, Color::DarkGrey, format!("Buy Shield ({}*)", SHIELD_COST))
        };

        surface.fill_rect(self.x, self.y, Self::WIDTH, Self::HEIGHT, fill);
        surface.stroke_rect(self.x, self.y, Self::WIDTH, Self::HEIGHT, border);
        surface.text(
            &label,
            self.x + Self::WIDTH / 2.0,
            self.y + Self::HEIGHT / 2.0,
            14.0,
            Color::White,
            Align::Center,
        );
    }
}

// ── Shields-to-life conversion button ─────────────────────────────────────────

/// Appears once enough shields have been bought; one click burns the batch
/// and grants a life.
#[derive(Clone, Debug)]
pub struct ConvertButton {
    pub x: f32,
    pub y: f32,
    shields_purchased: u32,
}

impl ConvertButton {
    pub const WIDTH: f32 = 160.0;
    pub const HEIGHT: f32 = 40.0;

    pub fn new(x: f32, y: f32) -> Self {
        ConvertButton {
            x,
            y,
            shields_purchased: 0,
        }
    }

    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, Self::WIDTH, Self::HEIGHT)
    }

    pub fn update(&mut self, frame: &mut Frame) -> bool {
        let clicked =
            frame.input.clicked && self.rect().contains(frame.input.mouse_x, frame.input.mouse_y);

        if clicked {
            // Two-phase: burn the batch on the player, then grant the life.
            // A missing lives counter skips the grant (never fatal).
            let converted = frame
                .registry
                .player_mut()
                .map(|p| p.convert_shields_to_life())
                .unwrap_or(false);
            if converted {
                if let Some(lives) = frame.registry.lives_mut() {
                    lives.add_life();
                }
            }
        }

        if let Some(player) = frame.registry.player() {
            self.shields_purchased = player.shields_purchased;
        }
        false
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        if self.shields_purchased < SHIELDS_FOR_LIFE_CONVERSION {
            return;
        }

        surface.fill_rect(self.x, self.y, Self::WIDTH, Self::HEIGHT, Color::Purple);
        surface.stroke_rect(self.x, self.y, Self::WIDTH, Self::HEIGHT, Color::Gold);
        surface.text(
            &format!("Convert {} Shields -> +1 Life", SHIELDS_FOR_LIFE_CONVERSION),
            self.x + Self::WIDTH / 2.0,
            self.y + Self::HEIGHT / 2.0,
            13.0,
            Color::White,
            Align::Center,
        );
        surface.text(
            &format!("({} shields purchased)", self.shields_purchased),
            self.x + Self::WIDTH / 2.0,
            self.y + Self::HEIGHT + 12.0,
            10.0,
            Color::Yellow,
            Align::Center,
        );
    }
}

// ── Terminal overlays ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayKind {
    /// Plain darkened backdrop behind pause/confirm menus.
    Dim,
    /// All lives lost.
    Lose,
    /// Target cap exhausted before the tier goal.
    OutOfTargets,
    /// Final tier cleared.
    Win,
}

impl OverlayKind {
    /// Whether this overlay ends the session (as opposed to a menu
    /// backdrop).
    pub fn is_terminal(self) -> bool {
        self != OverlayKind::Dim
    }
}

/// Full-screen end-of-session banner. Once present, the only way out is an
/// external restart of the host loop.
#[derive(Clone, Debug)]
pub struct Overlay {
    pub kind: OverlayKind,
}

impl Overlay {
    pub fn dim() -> Self {
        Overlay {
            kind: OverlayKind::Dim,
        }
    }

    pub fn lose() -> Self {
        Overlay {
            kind: OverlayKind::Lose,
        }
    }

    pub fn out_of_targets() -> Self {
        Overlay {
            kind: OverlayKind::OutOfTargets,
        }
    }

    pub fn win() -> Self {
        Overlay {
            kind: OverlayKind::Win,
        }
    }

    pub fn update(&mut self, _frame: &mut Frame) -> bool {
        false
    }

    pub fn render(&self, surface: &mut dyn Surface, bounds: Bounds) {
        surface.fill_rect(0.0, 0.0, bounds.width, bounds.height, Color::Black);

        let (title, title_color, subtitle) = match self.kind {
            OverlayKind::Dim => return,
            OverlayKind::Lose => ("GAME OVER", Color::Red, "Restart to play again"),
            OverlayKind::OutOfTargets => ("OUT OF NUMBERS", Color::Red, "Restart to play again"),
            OverlayKind::Win => ("YOU WIN!", Color::Gold, "You mastered all three levels!"),
        };

        surface.text(
            title,
            bounds.width / 2.0,
            bounds.height / 2.0,
            48.0,
            title_color,
            Align::Center,
        );
        surface.text(
            subtitle,
            bounds.width / 2.0,
            bounds.height / 2.0 + 60.0,
            24.0,
            Color::White,
            Align::Center,
        );
    }
}
