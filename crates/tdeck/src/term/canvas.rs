use std::io::{self, Stdout, Write};
use std::path::{Path, PathBuf};

use crossterm::cursor::MoveTo;
use crossterm::style::{
    Attribute, Colors, Print, SetAttribute, SetBackgroundColor, SetColors,
};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::queue;

use super::image;
use crate::error::RenderError;
use crate::render::{Area, CellStyle};
use crate::theme::Paint;

/// Render target collaborator. The core only ever talks to this trait, so
/// tests drive the whole session against a recording implementation.
pub trait Canvas {
    /// Current size as `(cols, rows)`.
    fn size(&self) -> io::Result<(u16, u16)>;
    fn clear(&mut self, bg: Paint) -> io::Result<()>;
    fn write(&mut self, row: u16, col: u16, text: &str, style: &CellStyle) -> io::Result<()>;
    fn render_image(&mut self, path: &str, area: Area) -> Result<(), RenderError>;
    fn flush(&mut self) -> io::Result<()>;
}

/// Crossterm-backed canvas writing half-block image cells and styled text
/// runs, batched until `flush`.
pub struct TermCanvas {
    out: Stdout,
    /// Image paths resolve relative to the presented document.
    base_path: PathBuf,
}

impl TermCanvas {
    pub fn new(base_path: PathBuf) -> Self {
        Self {
            out: io::stdout(),
            base_path,
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.base_path.join(p)
        }
    }
}

impl Canvas for TermCanvas {
    fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn clear(&mut self, bg: Paint) -> io::Result<()> {
        queue!(
            self.out,
            SetBackgroundColor(bg.to_crossterm()),
            Clear(ClearType::All)
        )
    }

    fn write(&mut self, row: u16, col: u16, text: &str, style: &CellStyle) -> io::Result<()> {
        queue!(
            self.out,
            MoveTo(col, row),
            SetColors(Colors::new(
                style.fg.to_crossterm(),
                style.bg.to_crossterm()
            )),
        )?;
        if style.bold {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        queue!(self.out, Print(text), SetAttribute(Attribute::Reset))
    }

    fn render_image(&mut self, path: &str, area: Area) -> Result<(), RenderError> {
        let resolved = self.resolve(path);
        image::draw(&mut self.out, &resolved, area)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
