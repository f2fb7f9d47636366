use std::collections::VecDeque;

/// Identifies one scheduled tick. Handles are never reused by a scheduler.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TickHandle(u64);

impl TickHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Runs the next tick at the next display-refresh opportunity.
///
/// `schedule_next` is one-shot: a tick that wants another tick asks again.
/// `cancel` must be idempotent and accept handles that already fired.
pub trait Scheduler {
    fn schedule_next(&mut self) -> TickHandle;
    fn cancel(&mut self, handle: TickHandle);
}

/// Queue-backed scheduler for tests and headless drivers.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: VecDeque<TickHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pops the oldest pending tick, if any.
    pub fn fire(&mut self) -> Option<TickHandle> {
        self.pending.pop_front()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_next(&mut self) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle::new(self.next_id);
        self.pending.push_back(handle);
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.pending.retain(|h| *h != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_unique() {
        let mut sched = ManualScheduler::new();
        let a = sched.schedule_next();
        let b = sched.schedule_next();
        assert_ne!(a, b);
        assert_eq!(sched.pending(), 2);
        assert_eq!(sched.fire(), Some(a));
        assert_eq!(sched.fire(), Some(b));
        assert_eq!(sched.fire(), None);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut sched = ManualScheduler::new();
        let a = sched.schedule_next();
        sched.cancel(a);
        sched.cancel(a);
        assert_eq!(sched.pending(), 0);
        assert_eq!(sched.fire(), None);
    }
}
