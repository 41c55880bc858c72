//! Terminal input source using crossterm.
//!
//! Attaching enables raw mode and mouse capture; detaching restores the
//! terminal. Ctrl+C always quits.

use crate::error::{DrResult, DrillError};
use crate::session::{InputSource, SourceEvent};
use crate::token::RawInput;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEventKind,
};
use crossterm::{execute, terminal};
use std::io::stdout;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Default)]
pub struct TerminalInput {
    attached: bool,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self::default()
    }
}

fn term_err(e: std::io::Error) -> DrillError {
    DrillError::Terminal(e.to_string())
}

impl InputSource for TerminalInput {
    fn attach(&mut self) -> DrResult<()> {
        if self.attached {
            return Err(DrillError::Terminal("input already attached".into()));
        }
        terminal::enable_raw_mode().map_err(term_err)?;
        if let Err(e) = execute!(stdout(), EnableMouseCapture) {
            let _ = terminal::disable_raw_mode();
            return Err(term_err(e));
        }
        self.attached = true;
        Ok(())
    }

    fn detach(&mut self) {
        if !self.attached {
            return;
        }
        if let Err(e) = execute!(stdout(), DisableMouseCapture) {
            warn!("Failed to disable mouse capture: {}", e);
        }
        if let Err(e) = terminal::disable_raw_mode() {
            warn!("Failed to leave raw mode: {}", e);
        }
        self.attached = false;
    }

    fn poll(&mut self, timeout: Duration) -> DrResult<Option<SourceEvent>> {
        if !event::poll(timeout).map_err(term_err)? {
            return Ok(None);
        }
        Ok(translate(event::read().map_err(term_err)?))
    }
}

impl Drop for TerminalInput {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Maps a crossterm event onto the raw-input vocabulary.
pub fn translate(ev: Event) -> Option<SourceEvent> {
    match ev {
        Event::Key(key) => translate_key(key),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(button) => Some(SourceEvent::Input(RawInput::mouse(
                button_index(button),
            ))),
            _ => None,
        },
        _ => None,
    }
}

fn translate_key(key: KeyEvent) -> Option<SourceEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(SourceEvent::Quit);
    }

    let (value, code) = match key.code {
        KeyCode::Char(c) => (c.to_string(), char_code(c)),
        KeyCode::F(n) => (format!("F{}", n), format!("F{}", n)),
        KeyCode::Esc => named("Escape"),
        KeyCode::Enter => named("Enter"),
        KeyCode::Tab | KeyCode::BackTab => named("Tab"),
        KeyCode::Backspace => named("Backspace"),
        KeyCode::Delete => named("Delete"),
        KeyCode::Insert => named("Insert"),
        KeyCode::Home => named("Home"),
        KeyCode::End => named("End"),
        KeyCode::PageUp => named("PageUp"),
        KeyCode::PageDown => named("PageDown"),
        KeyCode::Left => named("ArrowLeft"),
        KeyCode::Right => named("ArrowRight"),
        KeyCode::Up => named("ArrowUp"),
        KeyCode::Down => named("ArrowDown"),
        KeyCode::CapsLock => named("CapsLock"),
        other => named(&format!("{:?}", other)),
    };
    Some(SourceEvent::Input(RawInput::key(value, code)))
}

fn named(name: &str) -> (String, String) {
    (name.to_string(), name.to_string())
}

/// Browser-style physical code for a printable character.
fn char_code(c: char) -> String {
    match c {
        ' ' => "Space".to_string(),
        c if c.is_ascii_alphabetic() => format!("Key{}", c.to_ascii_uppercase()),
        c if c.is_ascii_digit() => format!("Digit{}", c),
        c => c.to_string(),
    }
}

/// Browser button numbering: left 0, middle 1, right 2.
fn button_index(button: MouseButton) -> u8 {
    match button {
        MouseButton::Left => 0,
        MouseButton::Middle => 1,
        MouseButton::Right => 2,
    }
}
