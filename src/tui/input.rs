use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::shared::InputEvent;

/// Block until the next key press that maps to an InputEvent.
pub fn next_event() -> anyhow::Result<InputEvent> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(ev) = translate(key) {
                return Ok(ev);
            }
        }
    }
}

/// Throw away everything typed while playback was blocking. Recent intent
/// during audio output is dropped on purpose, not buffered.
pub fn drain_pending() -> anyhow::Result<()> {
    while event::poll(Duration::ZERO)? {
        let _ = event::read()?;
    }
    Ok(())
}

fn translate(key: KeyEvent) -> Option<InputEvent> {
    // any control chord ends the session, same as the control-byte exit
    // of a raw terminal
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(InputEvent::Quit);
    }
    match key.code {
        KeyCode::Esc => Some(InputEvent::Quit),
        KeyCode::Up => Some(InputEvent::Up),
        KeyCode::Down => Some(InputEvent::Down),
        KeyCode::Left => Some(InputEvent::Left),
        KeyCode::Right => Some(InputEvent::Right),
        KeyCode::PageUp => Some(InputEvent::PageUp),
        KeyCode::PageDown => Some(InputEvent::PageDown),
        KeyCode::Backspace => Some(InputEvent::Backspace),
        KeyCode::Enter => Some(InputEvent::Enter),
        KeyCode::Char(c) => Some(InputEvent::Char(c)),
        _ => None,
    }
}
