use crate::clock::Clock;
use crate::events::TimerEvent;
use crate::laps::{LapLog, LapRecord};
use crate::schedule::{Scheduler, TickHandle};
use crate::state::{Mode, Reading, RunState, TimerState, DEFAULT_COUNTDOWN_MS};
use crate::tick::{self, Tick};

#[derive(Clone, Copy, Debug)]
pub struct WidgetConfig {
    /// Countdown length when no positive preset has been set.
    pub default_countdown_ms: u64,
    pub initial_mode: Mode,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            default_countdown_ms: DEFAULT_COUNTDOWN_MS,
            initial_mode: Mode::Countdown,
        }
    }
}

/// The single timer instance behind the widget.
///
/// Owns the timing state, the lap log and the handle of the one tick that may
/// be pending. Every control call is a no-op when it doesn't apply; none of
/// them can fail. Output goes to an event queue drained with
/// [`TimerWidget::drain_events`].
pub struct TimerWidget<C: Clock, S: Scheduler> {
    clock: C,
    scheduler: S,
    state: TimerState,
    laps: LapLog,
    pending_tick: Option<TickHandle>,
    default_countdown_ms: u64,
    events: Vec<TimerEvent>,
}

impl<C: Clock, S: Scheduler> TimerWidget<C, S> {
    pub fn new(clock: C, scheduler: S, config: WidgetConfig) -> Self {
        let mut widget = Self {
            clock,
            scheduler,
            state: TimerState::new_countdown(config.default_countdown_ms),
            laps: LapLog::new(),
            pending_tick: None,
            default_countdown_ms: config.default_countdown_ms,
            events: Vec::new(),
        };
        widget.set_mode(config.initial_mode);
        widget
    }

    /// Pauses, switches mode and reloads that mode's starting value.
    /// Laps never survive a mode switch.
    pub fn set_mode(&mut self, mode: Mode) {
        self.pause();
        let preset = self.state.preset_ms;
        self.state = match mode {
            Mode::Countdown => {
                let target = preset.filter(|ms| *ms > 0).unwrap_or(self.default_countdown_ms);
                TimerState::new_countdown(target)
            }
            Mode::Stopwatch => TimerState::new_stopwatch(),
        };
        self.state.preset_ms = preset;
        self.clear_laps();
        log::debug!("mode set to {:?}, showing {}", mode, self.state.reading().formatted());
        self.events.push(TimerEvent::ModeChanged(mode));
        self.events.push(TimerEvent::Render(self.state.reading()));
    }

    /// Loads a countdown duration. Ignored outside countdown mode.
    ///
    /// Negative durations are not rejected; they load as zero, which reads as
    /// already expired and cannot be started.
    pub fn set_preset(&mut self, duration_ms: i64) {
        if self.state.mode() != Mode::Countdown {
            log::debug!("preset ignored in {:?} mode", self.state.mode());
            return;
        }
        self.pause();
        let ms = u64::try_from(duration_ms).unwrap_or(0);
        self.state = TimerState::new_countdown(ms);
        self.state.preset_ms = Some(ms);
        self.events.push(TimerEvent::Render(self.state.reading()));
    }

    pub fn start(&mut self) {
        let now = self.clock.now_ms();
        if !self.state.start(now) {
            return;
        }
        log::debug!("started {:?} at {} from {}", self.state.mode(), now, self.state.reading().formatted());
        self.events.push(TimerEvent::Started);
        self.run_tick(now);
    }

    pub fn pause(&mut self) {
        let now = self.clock.now_ms();
        if !self.state.pause(now) {
            return;
        }
        self.cancel_tick();
        log::debug!("paused at {}", self.state.reading().formatted());
        self.events.push(TimerEvent::Render(self.state.reading()));
    }

    pub fn reset(&mut self) {
        self.pause();
        self.state.reset();
        if self.state.mode() == Mode::Stopwatch {
            self.clear_laps();
        }
        self.events.push(TimerEvent::Render(self.state.reading()));
    }

    /// Start when stopped or paused, pause when running.
    pub fn toggle(&mut self) {
        if self.state.is_running() {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Records a lap against the live stopwatch time. Only while a stopwatch
    /// is running.
    pub fn record_lap(&mut self) -> Option<LapRecord> {
        if self.state.mode() != Mode::Stopwatch || !self.state.is_running() {
            return None;
        }
        let total = self.state.live_reading(self.clock.now_ms()).millis();
        let lap = self.laps.record(total);
        log::debug!("lap {} split {} total {}", lap.index, lap.split_ms, lap.cumulative_ms);
        self.events.push(TimerEvent::LapRecorded(lap));
        Some(lap)
    }

    /// One tick loop iteration. Frames whose handle is not the pending one
    /// (cancelled or superseded) are dropped without touching state.
    pub fn on_frame(&mut self, handle: TickHandle) {
        if self.pending_tick != Some(handle) {
            log::trace!("dropping stale tick {}", handle.id());
            return;
        }
        self.pending_tick = None;
        let now = self.clock.now_ms();
        self.run_tick(now);
    }

    /// Live value, recomputed from the clock while running.
    pub fn reading(&self) -> Reading {
        self.state.live_reading(self.clock.now_ms())
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    pub fn run_state(&self) -> RunState {
        self.state.run_state()
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn laps(&self) -> &LapLog {
        &self.laps
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn drain_events(&mut self) -> Vec<TimerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Tears the widget down, cancelling any pending tick, and hands the
    /// scheduler back so the caller can shut it down.
    pub fn dispose(mut self) -> S {
        self.cancel_tick();
        self.scheduler
    }

    fn run_tick(&mut self, now_ms: u64) {
        match tick::advance(&mut self.state, now_ms) {
            Tick::Continue(reading) => {
                self.events.push(TimerEvent::Render(reading));
                self.pending_tick = Some(self.scheduler.schedule_next());
            }
            Tick::Expired => {
                self.cancel_tick();
                log::info!("countdown expired");
                self.events.push(TimerEvent::Render(self.state.reading()));
                self.events.push(TimerEvent::Expired);
            }
            Tick::Idle => {}
        }
    }

    fn cancel_tick(&mut self) {
        if let Some(handle) = self.pending_tick.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn clear_laps(&mut self) {
        self.laps.clear();
        self.events.push(TimerEvent::LapsCleared);
    }
}
