//! Per-frame input flags.

/// Which controls are held this frame. Produced by an `InputSource`,
/// consumed by `Camera::apply_input`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub ascend: bool,
    pub descend: bool,
    pub pitch_up: bool,
    pub pitch_down: bool,
    pub quit: bool,
}

impl InputState {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn quitting() -> Self {
        Self { quit: true, ..Self::default() }
    }
}

/// Anything that can report the held controls once per frame.
pub trait InputSource {
    fn poll(&mut self) -> InputState;
}

/// Replays a fixed list of frames, then reports `quit`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    frames: std::collections::VecDeque<InputState>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputState>) -> Self {
        Self { frames: frames.into_iter().collect() }
    }

    /// `count` idle frames followed by quit.
    pub fn idle_frames(count: usize) -> Self {
        Self::new(std::iter::repeat_n(InputState::idle(), count))
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> InputState {
        self.frames.pop_front().unwrap_or_else(InputState::quitting)
    }
}
