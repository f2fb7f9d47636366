use crate::state::{Reading, RunState, TimerState};

/// Result of one tick iteration.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tick {
    /// Still running; render this and ask for another tick.
    Continue(Reading),
    /// Countdown hit zero. The state is already stopped at zero.
    Expired,
    /// Not running; nothing was touched.
    Idle,
}

/// Recomputes the reading from the anchor at `now_ms`.
///
/// Elapsed time always comes from the timestamp delta, never from the number
/// of ticks, so irregular gaps between ticks don't accumulate drift.
pub fn advance(state: &mut TimerState, now_ms: u64) -> Tick {
    if !state.is_running() {
        return Tick::Idle;
    }
    let reading = state.live_reading(now_ms);
    state.reading = reading;
    match reading {
        Reading::Remaining(0) => {
            state.run = RunState::Expired;
            Tick::Expired
        }
        _ => Tick::Continue(reading),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_ticks_then_expires() {
        let mut cd = TimerState::new_countdown(100);
        cd.start(0);
        assert_eq!(advance(&mut cd, 16), Tick::Continue(Reading::Remaining(84)));
        assert_eq!(advance(&mut cd, 99), Tick::Continue(Reading::Remaining(1)));
        assert_eq!(advance(&mut cd, 100), Tick::Expired);
        assert_eq!(cd.run_state(), RunState::Expired);
        assert_eq!(cd.reading(), Reading::Remaining(0));
    }

    #[test]
    fn test_expired_is_idempotent() {
        let mut cd = TimerState::new_countdown(100);
        cd.start(0);
        assert_eq!(advance(&mut cd, 500), Tick::Expired);
        assert_eq!(advance(&mut cd, 900), Tick::Idle);
        assert_eq!(cd.reading(), Reading::Remaining(0));
    }

    #[test]
    fn test_long_gap_between_ticks() {
        let mut sw = TimerState::new_stopwatch();
        sw.start(10);
        assert_eq!(advance(&mut sw, 26), Tick::Continue(Reading::Elapsed(16)));
        // A stalled frame loop must not lose time
        assert_eq!(advance(&mut sw, 60_010), Tick::Continue(Reading::Elapsed(60_000)));
    }

    #[test]
    fn test_idle_when_paused() {
        let mut sw = TimerState::new_stopwatch();
        assert_eq!(advance(&mut sw, 100), Tick::Idle);
        assert_eq!(sw.reading(), Reading::Elapsed(0));
    }
}
