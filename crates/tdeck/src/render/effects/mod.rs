pub mod explosions;
pub mod stars;

use unicode_width::UnicodeWidthChar;

use super::Command;

/// The named transition effects a slide can declare. The vocabulary is
/// closed; directives naming anything else fall back to an instantaneous
/// cut and never enter a transition at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Explosions,
    Stars,
}

impl Effect {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "explosions" => Some(Self::Explosions),
            "stars" => Some(Self::Stars),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Explosions => "explosions",
            Self::Stars => "stars",
        }
    }

    /// Fixed frame count per effect. Deterministic: a transition always
    /// runs for exactly this many ticks.
    pub fn total_frames(self) -> usize {
        match self {
            Self::Explosions => 16,
            Self::Stars => 12,
        }
    }
}

/// Produce the draw commands for one intermediate frame, `frame` in
/// `1..=total`. Pure function of its arguments: no clock, no shared RNG.
/// The final frame is exactly the destination's static layout.
pub fn frame(
    from: &[Command],
    to: &[Command],
    effect: Effect,
    frame: usize,
    total: usize,
    cols: u16,
    rows: u16,
) -> Vec<Command> {
    if frame >= total {
        return to.to_vec();
    }
    match effect {
        Effect::Explosions => explosions::frame(from, to, frame, total, cols, rows),
        Effect::Stars => stars::frame(to, frame, total, cols, rows),
    }
}

/// splitmix64 finalizer, used as a stateless hash so every frame is
/// reproducible without carrying an RNG.
pub(crate) fn mix(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

/// Keep only the cells of `commands` for which `keep(row, col)` holds,
/// re-grouping surviving characters into contiguous text runs. Image
/// commands are kept or dropped whole, judged by their center cell.
pub(crate) fn filter_cells<F>(commands: &[Command], keep: F) -> Vec<Command>
where
    F: Fn(u16, u16) -> bool,
{
    let mut out = Vec::new();
    for command in commands {
        match command {
            Command::Image { area, .. } => {
                let center = (area.row + area.height / 2, area.col + area.width / 2);
                if keep(center.0, center.1) {
                    out.push(command.clone());
                }
            }
            Command::Text {
                row,
                col,
                text,
                style,
                language,
            } => {
                let mut run = String::new();
                let mut run_col = *col;
                let mut cursor = *col;
                for ch in text.chars() {
                    let width = ch.width().unwrap_or(0) as u16;
                    if keep(*row, cursor) {
                        if run.is_empty() {
                            run_col = cursor;
                        }
                        run.push(ch);
                    } else if !run.is_empty() {
                        out.push(Command::Text {
                            row: *row,
                            col: run_col,
                            text: std::mem::take(&mut run),
                            style: *style,
                            language: language.clone(),
                        });
                    }
                    cursor += width.max(1);
                }
                if !run.is_empty() {
                    out.push(Command::Text {
                        row: *row,
                        col: run_col,
                        text: run,
                        style: *style,
                        language: language.clone(),
                    });
                }
            }
        }
    }
    out
}

/// Distance from the slide center in cell space, with columns halved so
/// the blast front looks circular despite 1:2 cell aspect.
pub(crate) fn center_distance(row: u16, col: u16, cols: u16, rows: u16) -> f32 {
    let cx = f32::from(cols) / 2.0;
    let cy = f32::from(rows) / 2.0;
    let dx = (f32::from(col) - cx) / 2.0;
    let dy = f32::from(row) - cy;
    (dx * dx + dy * dy).sqrt()
}

pub(crate) fn max_distance(cols: u16, rows: u16) -> f32 {
    center_distance(0, 0, cols, rows).max(1.0)
}
