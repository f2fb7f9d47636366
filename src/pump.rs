use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use timer_core::{Scheduler, TickHandle};

use crate::AppMsg;

enum PumpCtl {
    Arm(TickHandle),
    Cancel(TickHandle),
    Quit,
}

/// Frame scheduler backed by the pump thread. Each `schedule_next` asks for
/// exactly one `AppMsg::Frame` roughly one frame interval later.
pub struct PumpScheduler {
    ctl: Sender<PumpCtl>,
    next_id: u64,
    thread: Option<JoinHandle<()>>,
}

impl PumpScheduler {
    pub fn spawn(interval: Duration, frames: Sender<AppMsg>) -> Self {
        let (ctl, ctl_rx) = mpsc::channel();
        let thread = thread::spawn(move || pump_thread(interval, ctl_rx, frames));
        Self {
            ctl,
            next_id: 0,
            thread: Some(thread),
        }
    }

    pub fn shutdown(mut self) {
        self.ctl.send(PumpCtl::Quit).ok();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("frame pump panicked");
            }
        }
    }
}

impl Scheduler for PumpScheduler {
    fn schedule_next(&mut self) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle::new(self.next_id);
        self.ctl.send(PumpCtl::Arm(handle)).ok();
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.ctl.send(PumpCtl::Cancel(handle)).ok();
    }
}

fn pump_thread(interval: Duration, ctl: Receiver<PumpCtl>, frames: Sender<AppMsg>) {
    log::debug!("frame pump started, interval {:?}", interval);
    let mut armed: Option<(TickHandle, Instant)> = None;

    loop {
        // Block when idle, otherwise wait only until the armed frame is due
        let msg = match armed {
            Some((handle, due)) => {
                match ctl.recv_timeout(due.saturating_duration_since(Instant::now())) {
                    Ok(msg) => msg,
                    Err(RecvTimeoutError::Timeout) => {
                        armed = None;
                        if frames.send(AppMsg::Frame(handle)).is_err() {
                            break;
                        }
                        continue;
                    }
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            None => match ctl.recv() {
                Ok(msg) => msg,
                Err(_) => break,
            },
        };

        match msg {
            PumpCtl::Arm(handle) => armed = Some((handle, Instant::now() + interval)),
            PumpCtl::Cancel(handle) => {
                if armed.map(|(h, _)| h) == Some(handle) {
                    armed = None;
                }
            }
            PumpCtl::Quit => break,
        }
    }
    log::debug!("frame pump stopped");
}
