use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};

use timer_core::{format_millis, LapRecord, Mode, TimerEvent};

use crate::alerts::AlertChannel;

/// Screen-side copy of what the timer last told us to show.
pub struct Display {
    mode: Mode,
    time_text: String,
    laps: Vec<String>,
    expired_visible: bool,
}

impl Display {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            time_text: format_millis(0),
            laps: Vec::new(),
            expired_visible: false,
        }
    }

    pub fn apply(&mut self, event: &TimerEvent) {
        match event {
            TimerEvent::Render(reading) => self.time_text = reading.formatted(),
            TimerEvent::ModeChanged(mode) => self.mode = *mode,
            TimerEvent::LapRecorded(lap) => self.laps.insert(0, lap_line(lap)),
            TimerEvent::LapsCleared => self.laps.clear(),
            TimerEvent::Started | TimerEvent::Expired => {}
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn time_text(&self) -> &str {
        &self.time_text
    }

    /// Newest first.
    pub fn lap_lines(&self) -> &[String] {
        &self.laps
    }

    pub fn shows_presets(&self) -> bool {
        self.mode == Mode::Countdown
    }

    pub fn shows_lap_key(&self) -> bool {
        self.mode == Mode::Stopwatch
    }

    pub fn expired_visible(&self) -> bool {
        self.expired_visible
    }

    pub fn dismiss_expired(&mut self) {
        self.expired_visible = false;
    }
}

impl AlertChannel for Display {
    fn notify_expired(&mut self) {
        self.expired_visible = true;
    }
}

pub fn lap_line(lap: &LapRecord) -> String {
    format!(
        "Lap {:<3} ( {} )  {}",
        lap.index,
        format_millis(lap.split_ms),
        format_millis(lap.cumulative_ms)
    )
}

/// Format a preset as "MM:SS"
pub fn preset_label(ms: u64) -> String {
    let total_secs = ms / 1000;
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, ResetColor, Clear(ClearType::All), MoveTo(0, 0))
}

fn centered(width: u16, text: &str) -> u16 {
    width.saturating_sub(text.chars().count() as u16) / 2
}

pub fn draw_timer<W: Write>(
    out: &mut W,
    size: (u16, u16),
    display: &Display,
    running: bool,
    presets: &[u64],
) -> io::Result<()> {
    let (width, height) = size;
    clear_screen(out)?;

    queue!(out, MoveTo(2, 1), SetAttribute(Attribute::Bold), Print("DUALTIMER"), SetAttribute(Attribute::Reset))?;

    // Mode tabs
    queue!(out, MoveTo(2, 3))?;
    for mode in [Mode::Countdown, Mode::Stopwatch] {
        if mode == display.mode() {
            queue!(out, SetAttribute(Attribute::Reverse), Print(format!(" {} ", mode.label())), SetAttribute(Attribute::Reset))?;
        } else {
            queue!(out, Print(format!(" {} ", mode.label())))?;
        }
        queue!(out, Print("  "))?;
    }

    let color = if running { Color::Green } else { Color::Grey };
    queue!(
        out,
        MoveTo(centered(width, display.time_text()), 6),
        SetForegroundColor(color),
        SetAttribute(Attribute::Bold),
        Print(display.time_text()),
        SetAttribute(Attribute::Reset),
        ResetColor
    )?;

    let footer_row = height.saturating_sub(2);
    let list_top = 9u16;

    if display.shows_presets() {
        queue!(out, MoveTo(2, list_top), SetAttribute(Attribute::Bold), Print("Presets"), SetAttribute(Attribute::Reset))?;
        let mut line = String::new();
        for (i, ms) in presets.iter().enumerate() {
            line.push_str(&format!("[{}] {}  ", i + 1, preset_label(*ms)));
        }
        queue!(out, MoveTo(2, list_top + 1), Print(line))?;
    } else {
        queue!(out, MoveTo(2, list_top), SetAttribute(Attribute::Bold), Print("Laps"), SetAttribute(Attribute::Reset))?;
        let room = footer_row.saturating_sub(list_top + 2) as usize;
        for (i, line) in display.lap_lines().iter().take(room).enumerate() {
            queue!(out, MoveTo(4, list_top + 1 + i as u16), Print(line))?;
        }
    }

    let action = if running { "pause" } else { "start" };
    let footer = if display.shows_lap_key() {
        format!("ENTER={}  l=lap  r=reset  c=countdown  h=help  q=quit", action)
    } else {
        format!("ENTER={}  1-9=preset  r=reset  s=stopwatch  h=help  q=quit", action)
    };
    queue!(out, MoveTo(2, footer_row), SetForegroundColor(Color::DarkGrey), Print(footer), ResetColor)?;

    out.flush()
}

pub fn draw_help<W: Write>(out: &mut W, size: (u16, u16), help_text: &str) -> io::Result<()> {
    let (_, height) = size;
    clear_screen(out)?;

    for (i, line) in help_text.lines().enumerate() {
        let row = 1 + i as u16;
        if row + 3 > height {
            break;
        }
        if i == 0 {
            queue!(out, MoveTo(2, row), SetAttribute(Attribute::Bold), Print(line), SetAttribute(Attribute::Reset))?;
        } else {
            queue!(out, MoveTo(2, row), Print(line))?;
        }
    }
    queue!(out, MoveTo(2, height.saturating_sub(2)), Print("Press any key to close"))?;

    out.flush()
}

pub fn draw_expired<W: Write>(out: &mut W, size: (u16, u16), display: &Display) -> io::Result<()> {
    let (width, height) = size;
    clear_screen(out)?;

    let title = "TIME'S UP";
    let mid = height / 2;
    queue!(
        out,
        MoveTo(centered(width, title), mid.saturating_sub(2)),
        SetForegroundColor(Color::Red),
        SetAttribute(Attribute::Bold),
        Print(title),
        SetAttribute(Attribute::Reset),
        ResetColor,
        MoveTo(centered(width, display.time_text()), mid),
        Print(display.time_text())
    )?;
    let hint = "Press any key";
    queue!(out, MoveTo(centered(width, hint), mid + 2), Print(hint))?;

    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use timer_core::Reading;

    #[test]
    fn test_display_applies_events() {
        let mut d = Display::new(Mode::Countdown);
        assert_eq!(d.time_text(), "00:00.00");
        d.apply(&TimerEvent::Render(Reading::Remaining(30_000)));
        assert_eq!(d.time_text(), "00:30.00");
        assert!(d.shows_presets());

        d.apply(&TimerEvent::ModeChanged(Mode::Stopwatch));
        assert!(d.shows_lap_key());
        assert!(!d.shows_presets());
    }

    #[test]
    fn test_laps_newest_first_and_cleared() {
        let mut d = Display::new(Mode::Stopwatch);
        d.apply(&TimerEvent::LapRecorded(LapRecord { index: 1, split_ms: 1_230, cumulative_ms: 1_230 }));
        d.apply(&TimerEvent::LapRecorded(LapRecord { index: 2, split_ms: 770, cumulative_ms: 2_000 }));
        assert_eq!(d.lap_lines().len(), 2);
        assert_eq!(d.lap_lines()[0], "Lap 2   ( 00:00.77 )  00:02.00");
        assert_eq!(d.lap_lines()[1], "Lap 1   ( 00:01.23 )  00:01.23");

        d.apply(&TimerEvent::LapsCleared);
        assert!(d.lap_lines().is_empty());
    }

    #[test]
    fn test_expired_overlay() {
        let mut d = Display::new(Mode::Countdown);
        d.notify_expired();
        assert!(d.expired_visible());
        d.dismiss_expired();
        assert!(!d.expired_visible());
    }

    #[test]
    fn test_preset_label() {
        assert_eq!(preset_label(30_000), "00:30");
        assert_eq!(preset_label(600_000), "10:00");
    }

    #[test]
    fn test_draw_timer_writes_time() {
        let mut d = Display::new(Mode::Countdown);
        d.apply(&TimerEvent::Render(Reading::Remaining(5_000)));
        let mut buf = Vec::new();
        draw_timer(&mut buf, (80, 24), &d, false, &[30_000]).unwrap();
        let text = String::from_utf8_lossy(&buf);
        assert!(text.contains("00:05.00"));
        assert!(text.contains("[1] 00:30"));
    }
}
