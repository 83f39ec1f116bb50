//! Half-block image rendering: every terminal cell shows two pixels, the
//! upper via the foreground of `▀` and the lower via the background.

use std::io::{self, Write};
use std::path::Path;

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, Colors, Print, ResetColor, SetColors};
use image::imageops::FilterType;
use image::GenericImageView;

use crate::error::RenderError;
use crate::render::Area;

const UPPER_HALF: char = '\u{2580}';

pub fn draw(out: &mut impl Write, path: &Path, area: Area) -> Result<(), RenderError> {
    let img = image::open(path).map_err(|source| RenderError::Image {
        path: path.display().to_string(),
        source,
    })?;

    // Fit the picture into the cell area; one cell is two pixels tall.
    let img = img.resize(
        u32::from(area.width),
        u32::from(area.height) * 2,
        FilterType::Triangle,
    );
    let (px_w, px_h) = img.dimensions();
    let rgba = img.to_rgba8();

    let cell_w = px_w.min(u32::from(area.width)) as u16;
    let cell_h = (px_h.div_ceil(2)).min(u32::from(area.height)) as u16;
    let left = area.col + (area.width.saturating_sub(cell_w)) / 2;
    let top = area.row + (area.height.saturating_sub(cell_h)) / 2;

    for cell_row in 0..cell_h {
        write_row(out, &rgba, px_w, px_h, cell_row, cell_w, left, top)?;
    }
    queue!(out, ResetColor).map_err(RenderError::Io)?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn write_row(
    out: &mut impl Write,
    rgba: &image::RgbaImage,
    px_w: u32,
    px_h: u32,
    cell_row: u16,
    cell_w: u16,
    left: u16,
    top: u16,
) -> io::Result<()> {
    queue!(out, MoveTo(left, top + cell_row))?;
    for cell_col in 0..cell_w {
        let x = u32::from(cell_col).min(px_w - 1);
        let upper_y = u32::from(cell_row) * 2;
        let lower_y = upper_y + 1;

        let fg = pixel_color(rgba, x, upper_y.min(px_h - 1));
        let bg = if lower_y < px_h {
            pixel_color(rgba, x, lower_y)
        } else {
            Color::Reset
        };
        queue!(
            out,
            SetColors(Colors::new(fg, bg)),
            Print(UPPER_HALF)
        )?;
    }
    Ok(())
}

fn pixel_color(rgba: &image::RgbaImage, x: u32, y: u32) -> Color {
    let p = rgba.get_pixel(x, y).0;
    // Mostly-transparent pixels fall back to the terminal default.
    if p[3] < 128 {
        Color::Reset
    } else {
        Color::Rgb {
            r: p[0],
            g: p[1],
            b: p[2],
        }
    }
}
