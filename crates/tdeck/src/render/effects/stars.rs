//! The `stars` transition: the incoming slide twinkles into view cell by
//! cell under a star field that thins to nothing by the last frame.

use super::{filter_cells, mix};
use crate::render::{CellStyle, Command};
use crate::theme::{Color, Paint};

const STARS: usize = 90;
const GLYPHS: [char; 3] = ['\u{2726}', '.', '+'];

pub fn frame(to: &[Command], frame: usize, total: usize, cols: u16, rows: u16) -> Vec<Command> {
    // A collapsed terminal still has a 1x1 star field; the modulo below
    // must never see zero.
    let cols = cols.max(1);
    let rows = rows.max(1);
    // Each cell is assigned a fixed reveal frame by hash; by `total` every
    // cell has been revealed.
    let mut out = filter_cells(to, |row, col| {
        let h = mix((u64::from(row) << 16) | u64::from(col));
        (h as usize % total) < frame
    });

    let remaining = STARS * (total - frame) / total;
    for s in 0..remaining {
        let h = mix(0x5747_5253 ^ (s as u64 + 1));
        let col = (h % u64::from(cols)) as u16;
        let row = ((h >> 24) % u64::from(rows)) as u16;
        // Twinkle: a star is visible only on frames matching its phase.
        if (h >> 48) as usize % 3 == frame % 3 {
            continue;
        }
        out.push(Command::Text {
            row,
            col,
            text: GLYPHS[(h >> 8) as usize % GLYPHS.len()].to_string(),
            style: CellStyle {
                fg: Paint::Named(Color::White),
                bg: Paint::Named(Color::Black),
                bold: true,
            },
            language: None,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> Vec<Command> {
        vec![Command::Text {
            row: 5,
            col: 0,
            text: "abcdefghijklmnop".to_string(),
            style: CellStyle::plain(Paint::Default, Paint::Default),
            language: None,
        }]
    }

    #[test]
    fn test_reveal_grows_monotonically() {
        let to = line();
        let mut previous = 0;
        for f in 1..12 {
            // Stars are punctuation glyphs; count only the revealed letters.
            let revealed: usize = frame(&to, f, 12, 80, 24)
                .iter()
                .filter_map(|c| match c {
                    Command::Text { row: 5, text, .. } => {
                        Some(text.chars().filter(char::is_ascii_alphabetic).count())
                    }
                    _ => None,
                })
                .sum();
            assert!(revealed >= previous);
            previous = revealed;
        }
    }

    #[test]
    fn test_zero_sized_terminal_does_not_divide_by_zero() {
        for f in 1..12 {
            frame(&line(), f, 12, 0, 0);
        }
    }

    #[test]
    fn test_star_field_empties_by_the_end() {
        let stars_at = |f: usize| {
            frame(&[], f, 12, 80, 24)
                .iter()
                .filter(|c| matches!(c, Command::Text { .. }))
                .count()
        };
        assert!(stars_at(1) > stars_at(11));
    }
}
