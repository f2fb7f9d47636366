use crate::laps::LapRecord;
use crate::state::{Mode, Reading};

/// Notifications the engine emits for the presentation layer.
///
/// The engine only queues these; it never waits on whoever consumes them.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TimerEvent {
    /// Show this value.
    Render(Reading),
    /// A start or resume took effect. Cue the start sound.
    Started,
    /// Countdown reached zero. Emitted once per completion.
    Expired,
    /// Mode switched; toggle mode-dependent controls.
    ModeChanged(Mode),
    /// Insert at the head of the visible lap list.
    LapRecorded(LapRecord),
    LapsCleared,
}
