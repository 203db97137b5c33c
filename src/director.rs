/// The level director: owns the active level index, the entity registry,
/// the input snapshot and the RNG, and runs the fixed-step update→render
/// cycle.
///
/// Level transitions are deferred: entities enqueue [`Command`]s during the
/// update pass, the director drains them into a single pending transition
/// after the pass, and the registry is only ever replaced between passes.
/// A transition requested by entity N therefore never changes the world
/// entities N+1.. iterate over in the same frame.
use rand::rngs::StdRng;

use crate::audio::AudioSink;
use crate::entity::{Command, Frame};
use crate::input::{InputState, Key};
use crate::level::{self, PlayerCarry};
use crate::rect::Bounds;
use crate::registry::Registry;
use crate::surface::Surface;

struct PendingTransition {
    level: usize,
    /// Registry to reinstate instead of running the level recipe
    /// (pause/resume path).
    restore: Option<Registry>,
    /// Stash the outgoing registry as the pause snapshot.
    snapshot_current: bool,
}

pub struct Director {
    bounds: Bounds,
    registry: Registry,
    input: InputState,
    current_level: usize,
    pending: Option<PendingTransition>,
    /// Tier index + entity list captured when the pause menu opened.
    paused: Option<(usize, Registry)>,
    /// Suppresses player carry-over for the next gameplay build.
    resetting: bool,
    commands: Vec<Command>,
    rng: StdRng,
    audio: Box<dyn AudioSink>,
}

impl Director {
    pub fn new(bounds: Bounds, audio: Box<dyn AudioSink>, mut rng: StdRng) -> Self {
        let registry = level::build_level(level::MENU, bounds, None, &mut rng);
        Director {
            bounds,
            registry,
            input: InputState::new(),
            current_level: level::MENU,
            pending: None,
            paused: None,
            resetting: false,
            commands: Vec::new(),
            rng,
            audio,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn current_level(&self) -> usize {
        self.current_level
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Tier index held by the pause snapshot, if any.
    pub fn paused_level(&self) -> Option<usize> {
        self.paused.as_ref().map(|(index, _)| *index)
    }

    /// One full frame: director-level keys, the entity pass, dead-entity
    /// filtering, click-edge clear, command drain, transition application.
    pub fn update(&mut self) {
        self.handle_global_keys();

        let pass_len = self.registry.slot_count();
        for i in 0..pass_len {
            let Some(mut entity) = self.registry.take_slot(i) else {
                continue;
            };
            let mut frame = Frame {
                registry: &mut self.registry,
                input: &mut self.input,
                bounds: self.bounds,
                audio: self.audio.as_mut(),
                commands: &mut self.commands,
                rng: &mut self.rng,
            };
            let remove = entity.update(&mut frame);
            if !remove {
                self.registry.restore_slot(i, entity);
            }
        }
        self.registry.compact();

        // Click edge lives for exactly one update cycle no matter who
        // looked at it.
        self.input.end_frame();

        for command in std::mem::take(&mut self.commands) {
            self.schedule(command);
        }

        if let Some(pending) = self.pending.take() {
            self.apply_transition(pending);
        }
    }

    /// Pause/resume keys work at the director level so they fire even with
    /// no entity looking at them. Consumed whether or not they had any
    /// effect, so a held key does not retrigger every frame.
    fn handle_global_keys(&mut self) {
        let escape = self.input.consume(Key::Escape);
        let pause = self.input.consume(Key::P);
        if (escape || pause) && level::is_gameplay(self.current_level) {
            self.commands.push(Command::Pause);
        }

        let resume = self.input.consume(Key::C);
        if resume && self.paused.is_some() {
            self.commands.push(Command::Resume);
        }
    }

    /// Turns a drained command into the pending transition. Later commands
    /// in the same frame win, matching the single pending slot.
    fn schedule(&mut self, command: Command) {
        match command {
            Command::ChangeLevel(index) if index < level::LEVEL_COUNT => {
                self.pending = Some(PendingTransition {
                    level: index,
                    restore: None,
                    snapshot_current: false,
                });
            }
            Command::ChangeLevel(index) => {
                log::debug!("ignoring transition to unknown level {index}");
            }
            Command::Pause => {
                self.pending = Some(PendingTransition {
                    level: level::PAUSE,
                    restore: None,
                    snapshot_current: true,
                });
            }
            Command::Resume => {
                if let Some((index, registry)) = self.paused.take() {
                    self.pending = Some(PendingTransition {
                        level: index,
                        restore: Some(registry),
                        snapshot_current: false,
                    });
                }
            }
            Command::Reset => {
                let target = self
                    .paused
                    .take()
                    .map(|(index, _)| index)
                    .unwrap_or(self.current_level);
                self.resetting = true;
                self.pending = Some(PendingTransition {
                    level: target,
                    restore: None,
                    snapshot_current: false,
                });
            }
            Command::QuitToMenu => {
                self.paused = None;
                self.pending = Some(PendingTransition {
                    level: level::MENU,
                    restore: None,
                    snapshot_current: false,
                });
            }
        }
    }

    fn apply_transition(&mut self, pending: PendingTransition) {
        if pending.snapshot_current {
            let snapshot = std::mem::take(&mut self.registry);
            self.paused = Some((self.current_level, snapshot));
            log::debug!("pause snapshot of level {}", self.current_level);
        }

        let registry = match pending.restore {
            Some(restored) => restored,
            None => {
                // Progression survives gameplay-to-gameplay transitions
                // unless this is an explicit reset.
                let carry = if level::is_gameplay(pending.level) && !self.resetting {
                    self.registry.player().map(PlayerCarry::from_player)
                } else {
                    None
                };
                level::build_level(pending.level, self.bounds, carry, &mut self.rng)
            }
        };

        log::info!("level {} -> {}", self.current_level, pending.level);
        self.current_level = pending.level;
        self.registry = registry;
        self.resetting = false;
    }

    /// Renders every live entity in registration order.
    pub fn render(&self, surface: &mut dyn Surface) {
        surface.clear();
        self.registry.render_all(surface, self.bounds);
    }
}
