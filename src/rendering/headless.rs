//! # Headless Display
//!
//! An in-memory screen with a scripted keyboard, used to drive the turn engine
//! without a terminal.

use crate::config;
use crate::game::Position;
use crate::rendering::Display;
use crate::{WukongError, WukongResult};
use std::collections::VecDeque;

/// Character grid plus a queue of keys to replay.
#[derive(Debug, Clone)]
pub struct HeadlessDisplay {
    width: u16,
    height: u16,
    cells: Vec<char>,
    keys: VecDeque<char>,
    message_history: Vec<String>,
    cursor: Position,
}

impl HeadlessDisplay {
    /// Creates a blank screen with no keys queued.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![' '; usize::from(width) * usize::from(height)],
            keys: VecDeque::new(),
            message_history: Vec::new(),
            cursor: Position::new(0, 0),
        }
    }

    /// Queues every character of `keys`, in order.
    pub fn with_keys(mut self, keys: &str) -> Self {
        self.push_keys(keys);
        self
    }

    pub fn push_keys(&mut self, keys: &str) {
        self.keys.extend(keys.chars());
    }

    pub fn remaining_keys(&self) -> usize {
        self.keys.len()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return None;
        }
        Some(y as usize * usize::from(self.width) + x as usize)
    }

    pub fn glyph_at(&self, pos: Position) -> Option<char> {
        self.index(pos.x, pos.y).map(|i| self.cells[i])
    }

    /// Content of a screen row without trailing blanks.
    pub fn row_text(&self, row: u16) -> String {
        let width = usize::from(self.width);
        let start = usize::from(row) * width;
        self.cells
            .get(start..start + width)
            .map(|cells| cells.iter().collect::<String>().trim_end().to_string())
            .unwrap_or_default()
    }

    /// Every non-empty text written to the message line, oldest first.
    pub fn message_history(&self) -> &[String] {
        &self.message_history
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }
}

impl Display for HeadlessDisplay {
    fn draw_glyph(&mut self, pos: Position, glyph: char) -> WukongResult<()> {
        if let Some(i) = self.index(pos.x, pos.y) {
            self.cells[i] = glyph;
        }
        Ok(())
    }

    fn write_line(&mut self, row: u16, text: &str) -> WukongResult<()> {
        let y = i32::from(row);
        let mut chars = text.chars();
        for x in 0..i32::from(self.width) {
            if let Some(i) = self.index(x, y) {
                self.cells[i] = chars.next().unwrap_or(' ');
            }
        }
        if row == config::MESSAGE_ROW && !text.is_empty() {
            self.message_history.push(text.to_string());
        }
        Ok(())
    }

    fn move_cursor(&mut self, pos: Position) -> WukongResult<()> {
        self.cursor = pos;
        Ok(())
    }

    fn poll_key(&mut self) -> WukongResult<Option<char>> {
        Ok(self.keys.pop_front())
    }

    fn read_key(&mut self) -> WukongResult<char> {
        self.keys.pop_front().ok_or(WukongError::InputExhausted)
    }

    fn flush(&mut self) -> WukongResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_line_replaces_row() {
        let mut display = HeadlessDisplay::new(10, 3);
        display.write_line(1, "hello world").unwrap();
        assert_eq!(display.row_text(1), "hello worl");
        display.write_line(1, "hi").unwrap();
        assert_eq!(display.row_text(1), "hi");
        assert_eq!(display.row_text(7), "");
    }

    #[test]
    fn test_keys_replay_then_run_out() {
        let mut display = HeadlessDisplay::new(10, 3).with_keys("ab");
        assert_eq!(display.poll_key().unwrap(), Some('a'));
        assert_eq!(display.read_key().unwrap(), 'b');
        assert_eq!(display.poll_key().unwrap(), None);
        assert!(matches!(display.read_key(), Err(WukongError::InputExhausted)));
    }

    #[test]
    fn test_out_of_screen_glyphs_are_ignored() {
        let mut display = HeadlessDisplay::new(4, 4);
        display.draw_glyph(Position::new(9, 9), '@').unwrap();
        display.draw_glyph(Position::new(-1, 0), '@').unwrap();
        assert_eq!(display.glyph_at(Position::new(9, 9)), None);
        assert!(display.cells.iter().all(|&c| c == ' '));
    }
}
