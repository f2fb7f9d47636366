use std::collections::VecDeque;

/// Oldest laps are dropped past this many.
pub const MAX_LAPS: usize = 99;

/// One recorded stopwatch split. Never changes after creation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LapRecord {
    /// 1-based lap number.
    pub index: u32,
    /// Time since the previous lap, or since the stopwatch started.
    pub split_ms: u64,
    /// Total stopwatch time when the lap was taken.
    pub cumulative_ms: u64,
}

/// Lap history, newest first. Keeps the latest [`MAX_LAPS`] records; lap
/// numbering and splits carry on past the cap.
#[derive(Clone, Debug, Default)]
pub struct LapLog {
    records: VecDeque<LapRecord>,
    last_total_ms: u64,
    count: u32,
}

impl LapLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a lap taken at stopwatch total `total_ms` and returns it.
    pub fn record(&mut self, total_ms: u64) -> LapRecord {
        self.count += 1;
        let lap = LapRecord {
            index: self.count,
            split_ms: total_ms.saturating_sub(self.last_total_ms),
            cumulative_ms: total_ms,
        };
        self.last_total_ms = total_ms;
        self.records.push_front(lap);
        self.records.truncate(MAX_LAPS);
        lap
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.last_total_ms = 0;
        self.count = 0;
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &LapRecord> {
        self.records.iter()
    }

    pub fn latest(&self) -> Option<&LapRecord> {
        self.records.front()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
