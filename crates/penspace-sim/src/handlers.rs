//! Sandbox key handling

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::state::SimState;

/// Returns false to quit
pub fn handle_key(key: KeyEvent, state: &mut SimState) -> bool {
    if key.kind != KeyEventKind::Press {
        return true;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return false;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return false,
        KeyCode::Char('w') => state.toggle_writer_mode(),
        KeyCode::Char('u') => state.toggle_ui_exclusive(),
        KeyCode::Char('n') => state.finalize(),
        KeyCode::Char('r') => state.reset(),
        _ => {
            state.stylus.process_key(key);
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use penspace::StylusConfig;
    use tokio::runtime::Handle;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let mut state = SimState::new(StylusConfig::default(), Handle::current());
        assert!(!handle_key(key(KeyCode::Char('q')), &mut state));
        assert!(!handle_key(key(KeyCode::Esc), &mut state));
        assert!(handle_key(key(KeyCode::Right), &mut state));
    }

    #[tokio::test]
    async fn test_sandbox_keys_do_not_reach_stylus() {
        let mut state = SimState::new(StylusConfig::default(), Handle::current());
        handle_key(key(KeyCode::Char('w')), &mut state);
        assert!(state.rig.drawing_enabled());

        handle_key(key(KeyCode::Char('m')), &mut state);
        assert!(state.stylus.is_middle_held());
    }
}
