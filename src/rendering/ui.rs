//! # User Interface Elements
//!
//! The status line and the paged message line.

use crate::config;
use crate::game::Fighter;
use crate::rendering::Display;
use crate::WukongResult;

/// Suffix of a message chunk that waits for a key press.
pub const MORE_PROMPT: &str = "--more--";

/// `Name (HP:h/m Power:p Defense:d) ENEMIES:n | MOVE: [hjklyubn] ITEMS: [i,.]`
pub fn status_line(name: &str, fighter: &Fighter, enemy_count: usize) -> String {
    format!(
        "{} (HP:{}/{} Power:{} Defense:{}) ENEMIES:{} | MOVE: [hjklyubn] ITEMS: [i,.]",
        name, fighter.hp, fighter.max_hp, fighter.power, fighter.defense, enemy_count
    )
}

/// Splits `text` into chunks for a line of `width` columns.
///
/// Text that fits is returned whole. Otherwise words are packed greedily so
/// every chunk but the last leaves room for [`MORE_PROMPT`].
///
/// # Examples
///
/// ```
/// use wukong::paginate;
///
/// assert_eq!(paginate("short", 80), vec!["short"]);
/// let chunks = paginate("aaaa bbbb cccc", 12);
/// assert_eq!(chunks, vec!["aaaa", "bbbb cccc"]);
/// ```
pub fn paginate(text: &str, width: usize) -> Vec<String> {
    if text.chars().count() <= width {
        return vec![text.to_string()];
    }

    let limit = width.saturating_sub(MORE_PROMPT.len()).max(1);
    let mut rest: Vec<&str> = text.split_whitespace().collect();
    let mut chunks = Vec::new();

    while !rest.is_empty() {
        let joined = rest.join(" ");
        if joined.chars().count() <= width {
            chunks.push(joined);
            break;
        }

        let mut taken = 0;
        let mut length = 0;
        for word in &rest {
            let extra = word.chars().count() + usize::from(taken > 0);
            if taken > 0 && length + extra > limit {
                break;
            }
            length += extra;
            taken += 1;
        }
        chunks.push(rest[..taken].join(" "));
        rest.drain(..taken);
    }
    chunks
}

/// Shows `text` on the message line, waiting for a key between pages.
///
/// An empty text clears the line.
pub fn show_message<D: Display + ?Sized>(display: &mut D, text: &str) -> WukongResult<()> {
    let chunks = paginate(text, usize::from(config::SCREEN_WIDTH));
    let last = chunks.len().saturating_sub(1);

    for (i, chunk) in chunks.iter().enumerate() {
        if i < last {
            display.write_line(config::MESSAGE_ROW, &format!("{}{}", chunk, MORE_PROMPT))?;
            display.flush()?;
            display.read_key()?;
        } else {
            display.write_line(config::MESSAGE_ROW, chunk)?;
            display.flush()?;
        }
    }
    Ok(())
}
