use std::sync::mpsc::Sender;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use timer_core::Mode;

use crate::AppMsg;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    StartPause,
    Reset,
    Lap,
    SetMode(Mode),
    SwapMode,
    Preset(usize),
    Help,
    Quit,
}

pub fn action_for(key: &KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    let action = match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => Action::StartPause,
        KeyCode::Char('r') => Action::Reset,
        KeyCode::Char('l') => Action::Lap,
        KeyCode::Char('c') => Action::SetMode(Mode::Countdown),
        KeyCode::Char('s') => Action::SetMode(Mode::Stopwatch),
        KeyCode::Tab => Action::SwapMode,
        KeyCode::Char(d @ '1'..='9') => Action::Preset(d as usize - '1' as usize),
        KeyCode::Char('h') | KeyCode::Char('?') => Action::Help,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => return None,
    };
    Some(action)
}

/// Forwards terminal input to the main loop until the receiver goes away.
pub fn input_thread(tx: Sender<AppMsg>) {
    loop {
        let msg = match event::read() {
            Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => AppMsg::Key(key),
            Ok(Event::Resize(_, _)) => AppMsg::Redraw,
            Ok(_) => continue,
            Err(e) => {
                log::error!("terminal input failed: {}", e);
                AppMsg::Quit
            }
        };
        let quit = matches!(msg, AppMsg::Quit);
        if tx.send(msg).is_err() || quit {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(action_for(&key(KeyCode::Enter)), Some(Action::StartPause));
        assert_eq!(action_for(&key(KeyCode::Char(' '))), Some(Action::StartPause));
        assert_eq!(action_for(&key(KeyCode::Char('l'))), Some(Action::Lap));
        assert_eq!(action_for(&key(KeyCode::Char('s'))), Some(Action::SetMode(Mode::Stopwatch)));
        assert_eq!(action_for(&key(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(action_for(&key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_preset_digits() {
        assert_eq!(action_for(&key(KeyCode::Char('1'))), Some(Action::Preset(0)));
        assert_eq!(action_for(&key(KeyCode::Char('9'))), Some(Action::Preset(8)));
        assert_eq!(action_for(&key(KeyCode::Char('0'))), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(action_for(&ev), Some(Action::Quit));
    }
}
