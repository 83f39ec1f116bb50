pub mod frontmatter;
pub mod lexer;

use crate::error::ParseError;

/// Columns per list nesting level.
pub const INDENT_UNIT: usize = 2;

/// One structural unit of the document. Blocks are immutable once parsed
/// and keep document order within a slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    ListItem { depth: usize, text: String },
    CodeFence { language: Option<String>, lines: Vec<String> },
    Image { alt: String, path: String },
    Directive { key: String, value: String },
    Paragraph { text: String },
}

/// Lexer output: blocks interleaved with slide boundaries. The separator
/// line itself never belongs to any block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Block(Block),
    Boundary,
}

/// Lex a document body (frontmatter already stripped) into a flat event
/// stream, or fail with the offending line number.
pub fn parse(body: &str) -> Result<Vec<Event>, ParseError> {
    lexer::lex(body)
}

impl Block {
    /// Re-serialize the block to the source dialect. Re-parsing the result
    /// yields an identical block, which keeps slide text round-trip stable.
    pub fn to_markdown(&self) -> String {
        match self {
            Self::Heading { level, text } => {
                format!("{} {}", "#".repeat(usize::from(*level)), text)
            }
            Self::ListItem { depth, text } => {
                format!("{}- {}", " ".repeat(depth * INDENT_UNIT), text)
            }
            Self::CodeFence { language, lines } => {
                let mut out = format!("```{}", language.as_deref().unwrap_or(""));
                for line in lines {
                    out.push('\n');
                    out.push_str(line);
                }
                out.push_str("\n```");
                out
            }
            Self::Image { alt, path } => format!("![{alt}]({path})"),
            Self::Directive { key, value } => format!("<!-- {key}={value} -->"),
            Self::Paragraph { text } => text.clone(),
        }
    }
}

pub fn blocks_to_markdown(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(Block::to_markdown)
        .collect::<Vec<_>>()
        .join("\n")
}
