pub mod effects;
pub mod syntax;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::deck::Slide;
use crate::parser::{Block, INDENT_UNIT};
use crate::theme::{Color, Paint, Theme};

/// Style of one draw command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Paint,
    pub bg: Paint,
    pub bold: bool,
}

impl CellStyle {
    pub fn plain(fg: Paint, bg: Paint) -> Self {
        Self {
            fg,
            bg,
            bold: false,
        }
    }
}

/// A rectangle in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Area {
    pub row: u16,
    pub col: u16,
    pub width: u16,
    pub height: u16,
}

/// One positioned draw command. `language` rides along on code lines so
/// the highlighter collaborator can split them into colored spans; the
/// layout engine itself never parses code.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Text {
        row: u16,
        col: u16,
        text: String,
        style: CellStyle,
        language: Option<String>,
    },
    Image {
        path: String,
        area: Area,
    },
}

/// Base style of a slide: its directive colors over the terminal default.
/// Effect slides render white on black, so the particle frames always have
/// a stable backdrop to explode against.
pub fn base_style(slide: &Slide, _theme: &Theme) -> CellStyle {
    if slide.style.effect.is_some() {
        return CellStyle::plain(Paint::Named(Color::White), Paint::Named(Color::Black));
    }
    CellStyle::plain(
        slide.style.fg.map_or(Paint::Default, Paint::Named),
        slide.style.bg.map_or(Paint::Default, Paint::Named),
    )
}

/// Lay out a slide for the given terminal size. Pure and deterministic:
/// the same slide and dimensions always produce the same command list.
///
/// Policies: the block stack is vertically centered and each block is
/// horizontally centered as a unit; overflow truncates (no scrolling).
pub fn layout(slide: &Slide, cols: u16, rows: u16, theme: &Theme) -> Vec<Command> {
    let base = base_style(slide, theme);
    let chunks = chunk_blocks(&slide.blocks);

    let mut rendered: Vec<RenderedChunk> = chunks
        .iter()
        .map(|c| render_chunk(c, cols, rows, theme, base))
        .collect();

    let total_height: usize = rendered.iter().map(RenderedChunk::height).sum::<usize>()
        + rendered.len().saturating_sub(1);
    let mut row = usize::from(rows).saturating_sub(total_height) / 2;

    let mut commands = Vec::new();
    for chunk in rendered.drain(..) {
        match chunk {
            RenderedChunk::Lines(lines) => {
                let width = lines
                    .iter()
                    .map(|l| l.text.width() + usize::from(l.indent))
                    .max()
                    .unwrap_or(0);
                let left = usize::from(cols).saturating_sub(width) / 2;
                for line in lines {
                    if row >= usize::from(rows) {
                        return commands;
                    }
                    let col = left + usize::from(line.indent);
                    let text = truncate_to_width(&line.text, usize::from(cols).saturating_sub(col));
                    if !text.is_empty() {
                        commands.push(Command::Text {
                            row: row as u16,
                            col: col as u16,
                            text,
                            style: line.style,
                            language: line.language,
                        });
                    }
                    row += 1;
                }
            }
            RenderedChunk::Image { path, width, height } => {
                if row >= usize::from(rows) {
                    return commands;
                }
                let height = height.min(usize::from(rows) - row);
                let left = usize::from(cols).saturating_sub(width) / 2;
                commands.push(Command::Image {
                    path,
                    area: Area {
                        row: row as u16,
                        col: left as u16,
                        width: width as u16,
                        height: height as u16,
                    },
                });
                row += height;
            }
        }
        row += 1; // gap between blocks
    }
    commands
}

/// A run of blocks laid out as one centered unit. Consecutive list items
/// group together so nesting indentation stays aligned.
enum Chunk<'a> {
    List(Vec<&'a Block>),
    Single(&'a Block),
}

fn chunk_blocks(blocks: &[Block]) -> Vec<Chunk<'_>> {
    let mut chunks: Vec<Chunk> = Vec::new();
    for block in blocks {
        match block {
            Block::ListItem { .. } => match chunks.last_mut() {
                Some(Chunk::List(items)) => items.push(block),
                _ => chunks.push(Chunk::List(vec![block])),
            },
            _ => chunks.push(Chunk::Single(block)),
        }
    }
    chunks
}

struct Line {
    indent: u16,
    text: String,
    style: CellStyle,
    language: Option<String>,
}

enum RenderedChunk {
    Lines(Vec<Line>),
    Image {
        path: String,
        width: usize,
        height: usize,
    },
}

impl RenderedChunk {
    fn height(&self) -> usize {
        match self {
            Self::Lines(lines) => lines.len(),
            Self::Image { height, .. } => *height,
        }
    }
}

fn render_chunk(
    chunk: &Chunk<'_>,
    cols: u16,
    rows: u16,
    theme: &Theme,
    base: CellStyle,
) -> RenderedChunk {
    match chunk {
        Chunk::List(items) => {
            let lines = items
                .iter()
                .map(|item| match item {
                    Block::ListItem { depth, text } => Line {
                        indent: (depth * INDENT_UNIT) as u16,
                        text: format!("\u{2022} {text}"),
                        style: base,
                        language: None,
                    },
                    _ => unreachable!("list chunks only hold list items"),
                })
                .collect();
            RenderedChunk::Lines(lines)
        }
        Chunk::Single(block) => render_block(block, cols, rows, theme, base),
    }
}

fn render_block(
    block: &Block,
    cols: u16,
    rows: u16,
    theme: &Theme,
    base: CellStyle,
) -> RenderedChunk {
    match block {
        Block::Heading { level, text } => {
            let bold = CellStyle { bold: true, ..base };
            let mut lines = vec![Line {
                indent: 0,
                text: text.clone(),
                style: bold,
                language: None,
            }];
            let rule = match level {
                1 => Some('\u{2550}'),
                2 => Some('\u{2500}'),
                _ => None,
            };
            if let Some(rule) = rule {
                lines.push(Line {
                    indent: 0,
                    text: rule.to_string().repeat(text.width()),
                    style: CellStyle {
                        fg: theme.accent,
                        ..base
                    },
                    language: None,
                });
            }
            RenderedChunk::Lines(lines)
        }
        Block::CodeFence { language, lines } => {
            let style = CellStyle::plain(theme.code_foreground, theme.code_background);
            let inner = lines.iter().map(|l| l.width()).max().unwrap_or(0);
            let mut out = vec![Line {
                indent: 0,
                text: " ".repeat(inner + 2),
                style,
                language: None,
            }];
            for line in lines {
                let pad = inner + 1 - line.width();
                out.push(Line {
                    indent: 0,
                    text: format!(" {line}{}", " ".repeat(pad)),
                    style,
                    language: language.clone(),
                });
            }
            out.push(Line {
                indent: 0,
                text: " ".repeat(inner + 2),
                style,
                language: None,
            });
            RenderedChunk::Lines(out)
        }
        Block::Image { path, .. } => RenderedChunk::Image {
            path: path.clone(),
            width: usize::from(cols).saturating_sub(8).max(1),
            height: (usize::from(rows) / 2).max(1),
        },
        Block::Paragraph { text } => RenderedChunk::Lines(vec![Line {
            indent: 0,
            text: text.clone(),
            style: base,
            language: None,
        }]),
        Block::ListItem { .. } | Block::Directive { .. } => {
            unreachable!("handled by chunking / consumed at compile time")
        }
    }
}

/// Cut a string to at most `max` display columns.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    let mut width = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > max {
            break;
        }
        width += w;
        out.push(ch);
    }
    out
}
