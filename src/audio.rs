/// Audio collaborator. Entities trigger fire-and-forget playback on game
/// events and never wait for completion or handle failure.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    Shoot,
    Hit,
    Win,
    Lose,
}

pub trait AudioSink {
    /// Whether the named sound has loaded enough to start.
    fn is_ready(&self, sound: Sound) -> bool;

    fn play(&mut self, sound: Sound);
}

/// No-op sink used by the terminal build and by tests.
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn is_ready(&self, _sound: Sound) -> bool {
        true
    }

    fn play(&mut self, _sound: Sound) {}
}
