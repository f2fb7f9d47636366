//! Pure timing logic for the dual-mode (countdown / stopwatch) timer widget.
//! No platform dependencies: time comes in through [`Clock`], frames through
//! [`Scheduler`], and everything the UI needs goes out as [`TimerEvent`]s.

pub mod clock;
pub mod events;
pub mod format;
pub mod laps;
pub mod schedule;
pub mod state;
pub mod tick;
pub mod widget;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use events::TimerEvent;
pub use format::{format_duration, format_millis};
pub use laps::{LapLog, LapRecord, MAX_LAPS};
pub use schedule::{ManualScheduler, Scheduler, TickHandle};
pub use state::{Mode, Reading, RunState, TimerState, DEFAULT_COUNTDOWN_MS};
pub use widget::{TimerWidget, WidgetConfig};
