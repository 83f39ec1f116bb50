use thiserror::Error;

/// Structural errors raised while lexing the document. All carry the
/// 1-based line number of the offending construct.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: code fence is never closed")]
    UnterminatedCodeFence { line: usize },

    #[error("line {line}: list indentation is not a multiple of 2 spaces")]
    MalformedList { line: usize },

    #[error("line {line}: slide separator is not followed by any content")]
    TrailingEmptySlide { line: usize },
}

/// Deck-level violations found while grouping blocks into slides.
/// Slide numbers are 1-based, matching what a presenter sees.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("document contains no slides")]
    EmptyDeck,

    #[error("slide {slide}: color '{name}' is not supported")]
    UnknownColor { slide: usize, name: String },

    #[error("slide {slide}: effects and colors on the same slide are not supported")]
    EffectWithColors { slide: usize },

    #[error("slide {slide}: effects and code on the same slide are not supported")]
    EffectWithCode { slide: usize },
}

/// Failures while putting a frame on screen. I/O errors are fatal to the
/// session; anything else degrades to a skipped element for that frame.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("terminal I/O failed")]
    Io(#[from] std::io::Error),

    #[error("could not load image '{path}'")]
    Image {
        path: String,
        #[source]
        source: image::ImageError,
    },
}
