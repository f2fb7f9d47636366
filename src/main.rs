mod alerts;
mod cli;
mod config;
mod input;
mod pump;
mod ui;

use std::fs::File;
use std::io::{self, Stdout};
use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::KeyEvent;
use crossterm::{cursor, execute, terminal};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use timer_core::{Mode, MonotonicClock, TickHandle, TimerEvent, TimerWidget, WidgetConfig};

use crate::alerts::{fire_alert, fire_start_cue, AlertConfig, CueSource, TerminalBell};
use crate::config::Settings;
use crate::input::Action;
use crate::pump::PumpScheduler;
use crate::ui::Display;

const APP_NAME: &str = "dualtimer";

#[derive(Debug)]
pub enum AppMsg {
    Key(KeyEvent),
    Frame(TickHandle),
    Redraw,
    Quit,
}

struct TimerApp {
    widget: TimerWidget<MonotonicClock, PumpScheduler>,
    display: Display,
    cue: Box<dyn CueSource>,
    alert_config: AlertConfig,
    presets: Vec<u64>,
    out: Stdout,

    help_visible: bool,
    quit: bool,
}

impl TimerApp {
    fn new(settings: Settings, pump: PumpScheduler) -> Self {
        let config = WidgetConfig {
            default_countdown_ms: settings.countdown_ms,
            initial_mode: settings.mode,
        };
        let widget = TimerWidget::new(MonotonicClock::new(), pump, config);

        let mut app = Self {
            widget,
            display: Display::new(settings.mode),
            cue: Box::new(TerminalBell::stdout()),
            alert_config: settings.alerts,
            presets: settings.presets,
            out: io::stdout(),
            help_visible: false,
            quit: false,
        };
        app.dispatch();
        app
    }

    /// Routes queued timer events to the display, the bell and the alert.
    fn dispatch(&mut self) {
        for event in self.widget.drain_events() {
            self.display.apply(&event);
            match event {
                TimerEvent::Started => fire_start_cue(&self.alert_config, self.cue.as_mut()),
                TimerEvent::Expired => {
                    fire_alert(&self.alert_config, self.cue.as_mut(), &mut self.display)
                }
                _ => {}
            }
        }
    }

    fn redraw(&mut self) -> io::Result<()> {
        let size = terminal::size()?;
        if self.display.expired_visible() {
            return ui::draw_expired(&mut self.out, size, &self.display);
        }
        if self.help_visible {
            return ui::draw_help(&mut self.out, size, help_text(self.widget.mode()));
        }
        ui::draw_timer(&mut self.out, size, &self.display, self.widget.is_running(), &self.presets)
    }

    fn handle_frame(&mut self, handle: TickHandle) -> io::Result<()> {
        self.widget.on_frame(handle);
        self.dispatch();
        self.redraw()
    }

    fn handle_key(&mut self, key: KeyEvent) -> io::Result<()> {
        // Overlays swallow the first key
        if self.display.expired_visible() {
            self.display.dismiss_expired();
            return self.redraw();
        }
        if self.help_visible {
            self.help_visible = false;
            return self.redraw();
        }

        let Some(action) = input::action_for(&key) else {
            return Ok(());
        };
        log::debug!("key action {:?}", action);
        match action {
            Action::StartPause => self.widget.toggle(),
            Action::Reset => self.widget.reset(),
            Action::Lap => {
                self.widget.record_lap();
            }
            Action::SetMode(mode) => self.widget.set_mode(mode),
            Action::SwapMode => {
                let mode = self.widget.mode().other();
                self.widget.set_mode(mode);
            }
            Action::Preset(idx) => match self.presets.get(idx) {
                Some(ms) => self.widget.set_preset(i64::try_from(*ms).unwrap_or(i64::MAX)),
                None => log::debug!("no preset bound to key {}", idx + 1),
            },
            Action::Help => self.help_visible = true,
            Action::Quit => self.quit = true,
        }
        self.dispatch();
        self.redraw()
    }
}

fn help_text(mode: Mode) -> &'static str {
    match mode {
        Mode::Countdown => {
            "COUNTDOWN HELP\n\n\
             Enter  Start/Pause\n\
             Space  Start/Pause\n\
             1-9    Load preset\n\
             r      Reset\n\
             s      Stopwatch mode\n\
             Tab    Switch mode\n\
             q      Quit"
        }
        Mode::Stopwatch => {
            "STOPWATCH HELP\n\n\
             Enter  Start/Pause\n\
             Space  Start/Pause\n\
             l      Record lap (running)\n\
             r      Reset, clears laps\n\
             c      Countdown mode\n\
             Tab    Switch mode\n\
             q      Quit"
        }
    }
}

/// Raw mode and alternate screen for as long as this lives.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("can't enable raw mode")?;
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)
            .context("can't enter alternate screen")?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen).ok();
        terminal::disable_raw_mode().ok();
    }
}

fn init_logging(args: &cli::Args) -> Result<()> {
    let path = args.log_file.clone().unwrap_or_else(config::default_log_path);
    let level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    let file = File::create(&path).with_context(|| format!("can't create log file {}", path.display()))?;
    let log_config = ConfigBuilder::new().set_target_level(LevelFilter::Error).build();
    WriteLogger::init(level, log_config, file).context("can't install logger")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = cli::Args::parse();
    init_logging(&args)?;
    log::info!("{} {} starting", APP_NAME, env!("CARGO_PKG_VERSION"));

    let settings = Settings::from_args(&args);
    log::info!(
        "mode {:?}, countdown {}ms, frame interval {:?}",
        settings.mode,
        settings.countdown_ms,
        settings.frame_interval
    );

    let (tx, rx) = mpsc::channel();
    let pump = PumpScheduler::spawn(settings.frame_interval, tx.clone());
    thread::spawn(move || input::input_thread(tx));

    let guard = TerminalGuard::enter()?;
    let mut app = TimerApp::new(settings, pump);
    app.redraw().context("can't draw")?;

    while !app.quit {
        let msg = match rx.recv() {
            Ok(msg) => msg,
            Err(_) => break,
        };
        let drawn = match msg {
            AppMsg::Key(key) => app.handle_key(key),
            AppMsg::Frame(handle) => app.handle_frame(handle),
            AppMsg::Redraw => app.redraw(),
            AppMsg::Quit => {
                app.quit = true;
                Ok(())
            }
        };
        drawn.context("terminal output failed")?;
    }

    // Clean up
    let pump = app.widget.dispose();
    pump.shutdown();
    drop(guard);
    log::info!("{} exiting", APP_NAME);
    Ok(())
}
