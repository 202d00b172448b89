use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// The display is passive; the only keys that do anything are the quit keys.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Only handle key press events, ignore release/repeat
    if key.kind != KeyEventKind::Press {
        return;
    }

    let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c');
    if ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
        app.quit();
    }
}
