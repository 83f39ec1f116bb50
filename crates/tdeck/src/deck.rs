use anyhow::Result;

use crate::error::CompileError;
use crate::parser::frontmatter::{self, DeckMeta};
use crate::parser::{self, Block, Event};
use crate::theme::Color;

/// Resolved per-slide style. Unset `fg`/`bg` means the terminal's ambient
/// default; styles are fully self-contained and never inherited from
/// sibling slides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub effect: Option<String>,
}

/// One screen's worth of content. Created once by `compile` and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub blocks: Vec<Block>,
    pub style: Style,
    /// Raw directive pairs as written, unknown keys included. Downstream
    /// consumers only read what `Style` resolved.
    pub directives: Vec<(String, String)>,
}

/// The full ordered slide collection for one document. Invariant: never
/// empty, so index 0 always exists.
#[derive(Debug, Clone)]
pub struct Deck {
    pub slides: Vec<Slide>,
    pub meta: DeckMeta,
}

impl Deck {
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn slide(&self, index: usize) -> &Slide {
        &self.slides[index]
    }
}

/// Parse and compile a whole document in one go. Any failure here is fatal
/// to session startup; the render loop is never entered with a bad deck.
pub fn build(content: &str) -> Result<Deck> {
    let (meta, body) = frontmatter::extract(content);
    let events = parser::parse(&body)?;
    let deck = compile(events, meta)?;
    Ok(deck)
}

/// Group the event stream into slides. Directives collected since the
/// previous boundary are consumed into the slide's style; they never
/// survive as blocks.
pub fn compile(events: Vec<Event>, meta: DeckMeta) -> Result<Deck, CompileError> {
    let mut slides: Vec<Slide> = Vec::new();
    let mut blocks: Vec<Block> = Vec::new();
    let mut directives: Vec<(String, String)> = Vec::new();

    for event in events {
        match event {
            Event::Boundary => {
                let slide = close_slide(
                    std::mem::take(&mut blocks),
                    std::mem::take(&mut directives),
                    slides.len() + 1,
                )?;
                slides.push(slide);
            }
            Event::Block(Block::Directive { key, value }) => directives.push((key, value)),
            Event::Block(block) => blocks.push(block),
        }
    }

    if !blocks.is_empty() || !directives.is_empty() {
        let slide = close_slide(blocks, directives, slides.len() + 1)?;
        slides.push(slide);
    }

    if slides.is_empty() {
        return Err(CompileError::EmptyDeck);
    }
    Ok(Deck { slides, meta })
}

fn close_slide(
    blocks: Vec<Block>,
    directives: Vec<(String, String)>,
    number: usize,
) -> Result<Slide, CompileError> {
    let mut style = Style::default();
    for (key, value) in &directives {
        match key.as_str() {
            "fg" => {
                style.fg = Some(Color::from_name(value).ok_or_else(|| {
                    CompileError::UnknownColor {
                        slide: number,
                        name: value.clone(),
                    }
                })?);
            }
            "bg" => {
                style.bg = Some(Color::from_name(value).ok_or_else(|| {
                    CompileError::UnknownColor {
                        slide: number,
                        name: value.clone(),
                    }
                })?);
            }
            "effect" => style.effect = Some(value.clone()),
            // Unknown keys are kept in `directives` for forward
            // compatibility but resolve to nothing.
            _ => {}
        }
    }

    if style.effect.is_some() {
        if style.fg.is_some() || style.bg.is_some() {
            return Err(CompileError::EffectWithColors { slide: number });
        }
        if blocks.iter().any(|b| matches!(b, Block::CodeFence { .. })) {
            return Err(CompileError::EffectWithCode { slide: number });
        }
    }

    Ok(Slide {
        blocks,
        style,
        directives,
    })
}
