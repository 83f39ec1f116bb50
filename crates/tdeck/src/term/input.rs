use std::io;
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEventKind};

use crate::nav::Key;

/// Something the render loop reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    Resize(u16, u16),
}

/// Input collaborator. `None` timeout blocks until an event arrives;
/// `Some(t)` returns `Ok(None)` once `t` elapses so an active transition
/// can advance without keystrokes.
pub trait InputSource {
    fn read(&mut self, timeout: Option<Duration>) -> io::Result<Option<InputEvent>>;
}

/// Crossterm-backed input.
pub struct TermInput;

impl InputSource for TermInput {
    fn read(&mut self, timeout: Option<Duration>) -> io::Result<Option<InputEvent>> {
        if let Some(timeout) = timeout {
            if !event::poll(timeout)? {
                return Ok(None);
            }
        }
        let event = event::read()?;
        Ok(translate(event))
    }
}

fn translate(event: CtEvent) -> Option<InputEvent> {
    match event {
        CtEvent::Key(key) if key.kind != KeyEventKind::Release => match key.code {
            KeyCode::Char(c) => Some(InputEvent::Key(Key::Char(c.to_ascii_lowercase()))),
            KeyCode::Left => Some(InputEvent::Key(Key::Left)),
            KeyCode::Right => Some(InputEvent::Key(Key::Right)),
            _ => None,
        },
        CtEvent::Resize(cols, rows) => Some(InputEvent::Resize(cols, rows)),
        _ => None,
    }
}
