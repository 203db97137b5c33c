/// The polymorphic entity model.
///
/// Every visible or interactive object is one variant of the closed
/// [`Entity`] sum type. Each variant implements the same per-frame contract:
/// `update` may mutate its own state, spawn entities, flag other entities
/// dead, or enqueue a director command, and returns true to request its own
/// removal after the pass; `render` is a pure read that only draws.
///
/// Entities never hold references to each other. Cross-entity effects go
/// through typed registry lookups each frame, so a removed collaborator
/// simply means the dependent effect is skipped for that frame.
pub mod bullet;
pub mod equation;
pub mod generator;
pub mod hud;
pub mod obstacle;
pub mod player;
pub mod target;
pub mod ui;

pub use bullet::Bullet;
pub use equation::{Equation, Op};
pub use generator::{Generator, Tier, TierParams};
pub use hud::{ConvertButton, Lives, Overlay, OverlayKind, ShieldButton, Stars};
pub use obstacle::Obstacle;
pub use player::Player;
pub use target::Target;
pub use ui::{Button, Label};

use rand::RngCore;

use crate::audio::AudioSink;
use crate::input::InputState;
use crate::rect::Bounds;
use crate::registry::Registry;
use crate::surface::Surface;

/// Intents collected during an update pass and applied by the director in
/// one deterministic step between passes. Requesting a level change never
/// mutates the registry mid-iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Switch to the level at this index next transition point.
    ChangeLevel(usize),
    /// Snapshot the running level and open the pause menu.
    Pause,
    /// Restore the snapshot taken at pause time.
    Resume,
    /// Rebuild the current gameplay tier from scratch (no carry-over).
    Reset,
    /// Drop any pause snapshot and return to the main menu.
    QuitToMenu,
}

/// Everything an entity may touch during its update. The registry reference
/// has the updating entity's own slot vacated, so self-lookups never alias.
pub struct Frame<'a> {
    pub registry: &'a mut Registry,
    pub input: &'a mut InputState,
    pub bounds: Bounds,
    pub audio: &'a mut dyn AudioSink,
    pub commands: &'a mut Vec<Command>,
    pub rng: &'a mut dyn RngCore,
}

#[derive(Clone, Debug)]
pub enum Entity {
    Player(Player),
    Bullet(Bullet),
    Target(Target),
    Obstacle(Obstacle),
    Generator(Generator),
    Equation(Equation),
    Lives(Lives),
    Stars(Stars),
    ShieldButton(ShieldButton),
    ConvertButton(ConvertButton),
    Button(Button),
    Label(Label),
    Overlay(Overlay),
}

impl Entity {
    /// Advances this entity one frame. Returns true to request removal.
    pub fn update(&mut self, frame: &mut Frame) -> bool {
        match self {
            Entity::Player(e) => e.update(frame),
            Entity::Bullet(e) => e.update(frame),
            Entity::Target(e) => e.update(frame),
            Entity::Obstacle(e) => e.update(frame),
            Entity::Generator(e) => e.update(frame),
            Entity::Equation(e) => e.update(frame),
            Entity::Lives(e) => e.update(frame),
            Entity::Stars(e) => e.update(frame),
            Entity::ShieldButton(e) => e.update(frame),
            Entity::ConvertButton(e) => e.update(frame),
            Entity::Button(e) => e.update(frame),
            Entity::Label(e) => e.update(frame),
            Entity::Overlay(e) => e.update(frame),
        }
    }

    /// Draws this entity. Must not mutate game state.
    pub fn render(&self, surface: &mut dyn Surface, bounds: Bounds) {
        match self {
            Entity::Player(e) => e.render(surface),
            Entity::Bullet(e) => e.render(surface),
            Entity::Target(e) => e.render(surface),
            Entity::Obstacle(e) => e.render(surface),
            Entity::Generator(e) => e.render(surface, bounds),
            Entity::Equation(e) => e.render(surface, bounds),
            Entity::Lives(e) => e.render(surface),
            Entity::Stars(e) => e.render(surface),
            Entity::ShieldButton(e) => e.render(surface),
            Entity::ConvertButton(e) => e.render(surface),
            Entity::Button(e) => e.render(surface),
            Entity::Label(e) => e.render(surface),
            Entity::Overlay(e) => e.render(surface, bounds),
        }
    }
}
