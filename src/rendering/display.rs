//! # Display Management
//!
//! Terminal output and key input through crossterm.

use crate::game::Position;
use crate::rendering::Display;
use crate::{config, WukongError, WukongResult};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::Print,
    terminal, QueueableCommand,
};
use std::io::{self, Write};
use std::time::Duration;

/// How long a single [`Display::poll_key`] waits for input.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Raw-mode terminal on the alternate screen.
///
/// Call [`TerminalDisplay::enter`] before drawing. The terminal is restored by
/// [`TerminalDisplay::exit`] or, failing that, when the display is dropped.
pub struct TerminalDisplay {
    stdout: io::Stdout,
    active: bool,
}

impl TerminalDisplay {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            active: false,
        }
    }

    /// Current terminal size as `(columns, rows)`.
    pub fn terminal_size() -> WukongResult<(u16, u16)> {
        Ok(terminal::size()?)
    }

    /// Fails unless the terminal can hold the whole game screen.
    pub fn ensure_minimum_size() -> WukongResult<()> {
        let (columns, rows) = Self::terminal_size()?;
        if columns < config::SCREEN_WIDTH || rows < config::SCREEN_HEIGHT {
            return Err(WukongError::Configuration(format!(
                "Set your terminal to at least {}x{} (currently {}x{})",
                config::SCREEN_WIDTH,
                config::SCREEN_HEIGHT,
                columns,
                rows
            )));
        }
        Ok(())
    }

    pub fn enter(&mut self) -> WukongResult<()> {
        terminal::enable_raw_mode()?;
        self.active = true;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(terminal::DisableLineWrap)?;
        self.stdout.queue(terminal::Clear(terminal::ClearType::All))?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> WukongResult<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn screen_cell(pos: Position) -> Option<(u16, u16)> {
        let x = u16::try_from(pos.x).ok()?;
        let y = u16::try_from(pos.y).ok()?;
        (x < config::SCREEN_WIDTH && y < config::SCREEN_HEIGHT).then_some((x, y))
    }
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

/// Character a key press stands for; arrow keys double as `hjkl`.
pub fn key_to_char(key: KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some('Q'),
        KeyCode::Char(c) => Some(c),
        KeyCode::Left => Some('h'),
        KeyCode::Down => Some('j'),
        KeyCode::Up => Some('k'),
        KeyCode::Right => Some('l'),
        KeyCode::Enter => Some('\n'),
        KeyCode::Esc => Some('\u{1b}'),
        _ => None,
    }
}

impl Display for TerminalDisplay {
    fn draw_glyph(&mut self, pos: Position, glyph: char) -> WukongResult<()> {
        if let Some((x, y)) = Self::screen_cell(pos) {
            self.stdout.queue(cursor::MoveTo(x, y))?;
            self.stdout.queue(Print(glyph))?;
        }
        Ok(())
    }

    fn write_line(&mut self, row: u16, text: &str) -> WukongResult<()> {
        let visible: String = text.chars().take(usize::from(config::SCREEN_WIDTH)).collect();
        self.stdout.queue(cursor::MoveTo(0, row))?;
        self.stdout
            .queue(terminal::Clear(terminal::ClearType::UntilNewLine))?;
        self.stdout.queue(Print(visible))?;
        Ok(())
    }

    fn move_cursor(&mut self, pos: Position) -> WukongResult<()> {
        if let Some((x, y)) = Self::screen_cell(pos) {
            self.stdout.queue(cursor::MoveTo(x, y))?;
            self.stdout.queue(cursor::Show)?;
        }
        Ok(())
    }

    fn poll_key(&mut self) -> WukongResult<Option<char>> {
        if !event::poll(POLL_INTERVAL)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(key_to_char(key)),
            _ => Ok(None),
        }
    }

    fn flush(&mut self) -> WukongResult<()> {
        self.stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys_map_to_vi_keys() {
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(key_to_char(key(KeyCode::Left)), Some('h'));
        assert_eq!(key_to_char(key(KeyCode::Down)), Some('j'));
        assert_eq!(key_to_char(key(KeyCode::Up)), Some('k'));
        assert_eq!(key_to_char(key(KeyCode::Right)), Some('l'));
        assert_eq!(key_to_char(key(KeyCode::Char('i'))), Some('i'));
        assert_eq!(key_to_char(key(KeyCode::F(1))), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_char(event), Some('Q'));
    }

    #[test]
    fn test_screen_cell_bounds() {
        assert_eq!(TerminalDisplay::screen_cell(Position::new(79, 23)), Some((79, 23)));
        assert_eq!(TerminalDisplay::screen_cell(Position::new(80, 0)), None);
        assert_eq!(TerminalDisplay::screen_cell(Position::new(-1, 0)), None);
    }
}
