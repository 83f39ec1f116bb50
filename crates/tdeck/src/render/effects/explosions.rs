//! The `explosions` transition: the outgoing slide is blasted from the
//! center outwards while particle glyphs radiate, then the incoming slide
//! settles center-first under the dying sparks.

use std::f32::consts::TAU;

use super::{center_distance, filter_cells, max_distance, mix};
use crate::render::{CellStyle, Command};
use crate::theme::{Color, Paint};

const PARTICLES: usize = 56;
const GLYPHS: [char; 4] = ['*', '+', 'x', '\u{00b7}'];
const SPARK_COLORS: [Color; 3] = [Color::Yellow, Color::Red, Color::White];

pub fn frame(
    from: &[Command],
    to: &[Command],
    frame: usize,
    total: usize,
    cols: u16,
    rows: u16,
) -> Vec<Command> {
    let half = total / 2;
    let reach = max_distance(cols, rows);
    let mut out;

    if frame <= half {
        // Blast phase: a growing front swallows the outgoing layout.
        let progress = frame as f32 / half as f32;
        let radius = progress * reach;
        out = filter_cells(from, |row, col| {
            center_distance(row, col, cols, rows) > radius
        });
        out.extend(particles(frame, total, cols, rows, 1.0));
    } else {
        // Settle phase: the incoming layout fills back in, center first,
        // while the sparks thin out.
        let progress = (frame - half) as f32 / (total - half) as f32;
        let radius = progress * reach;
        out = filter_cells(to, |row, col| {
            center_distance(row, col, cols, rows) <= radius
        });
        out.extend(particles(frame, total, cols, rows, 1.0 - progress));
    }
    out
}

/// Deterministic spark cloud for one frame. Each particle's angle, speed
/// and look come from its index alone, so any frame can be regenerated
/// independently.
fn particles(frame: usize, total: usize, cols: u16, rows: u16, density: f32) -> Vec<Command> {
    let count = (PARTICLES as f32 * density) as usize;
    let cx = f32::from(cols) / 2.0;
    let cy = f32::from(rows) / 2.0;
    let reach = max_distance(cols, rows);

    let mut sparks = Vec::with_capacity(count);
    for p in 0..count {
        let h = mix(p as u64 + 1);
        let angle = (h % 10_000) as f32 / 10_000.0 * TAU;
        let speed = 0.35 + ((h >> 16) % 1_000) as f32 / 1_000.0 * 0.85;
        let dist = speed * reach * frame as f32 / total as f32;

        let col = cx + angle.cos() * dist * 2.0;
        let row = cy + angle.sin() * dist;
        if col < 0.0 || row < 0.0 || col >= f32::from(cols) || row >= f32::from(rows) {
            continue;
        }

        let glyph = GLYPHS[((h >> 32) as usize + frame) % GLYPHS.len()];
        let color = SPARK_COLORS[(h >> 40) as usize % SPARK_COLORS.len()];
        sparks.push(Command::Text {
            row: row as u16,
            col: col as u16,
            text: glyph.to_string(),
            style: CellStyle {
                fg: Paint::Named(color),
                bg: Paint::Named(Color::Black),
                bold: true,
            },
            language: None,
        });
    }
    sparks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blast_phase_erodes_the_center_first() {
        let from = vec![Command::Text {
            row: 12,
            col: 40,
            text: "center".to_string(),
            style: CellStyle::plain(Paint::Default, Paint::Default),
            language: None,
        }];
        // Halfway through the blast, a cell at the exact center is gone.
        let cmds = frame(&from, &[], 4, 16, 80, 24);
        assert!(!cmds.iter().any(|c| matches!(
            c,
            Command::Text { row: 12, text, .. } if text.contains("center")
        )));
    }

    #[test]
    fn test_sparks_stay_in_bounds() {
        for f in 1..16 {
            for cmd in particles(f, 16, 40, 12, 1.0) {
                let Command::Text { row, col, .. } = cmd else {
                    panic!("particles are text commands");
                };
                assert!(row < 12 && col < 40);
            }
        }
    }

    #[test]
    fn test_spark_density_fades_in_settle_phase() {
        let early = particles(9, 16, 80, 24, 1.0).len();
        let late = particles(15, 16, 80, 24, 0.1).len();
        assert!(late < early);
    }
}
