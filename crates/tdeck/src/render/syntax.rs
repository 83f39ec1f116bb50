//! Syntax highlighting for code-fence lines, kept out of the layout
//! engine: layout emits plain code-line commands tagged with a language,
//! and this pass splits them into colored spans just before drawing.

use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;
use unicode_width::UnicodeWidthStr;

use super::Command;
use crate::theme::{Paint, Theme};

pub struct Highlighter {
    syntaxes: SyntaxSet,
    theme: syntect::highlighting::Theme,
}

impl Highlighter {
    pub fn new(theme: &Theme) -> Self {
        let themes = ThemeSet::load_defaults();
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            theme: themes.themes[theme.syntect_theme_name()].clone(),
        }
    }

    /// Replace each language-tagged command with per-span commands.
    /// Commands without a language pass through untouched, as does any
    /// language syntect does not know.
    pub fn apply(&self, commands: Vec<Command>) -> Vec<Command> {
        commands
            .into_iter()
            .flat_map(|command| match &command {
                Command::Text {
                    language: Some(language),
                    ..
                } => self.split(&command, &language.clone()),
                _ => vec![command],
            })
            .collect()
    }

    fn split(&self, command: &Command, language: &str) -> Vec<Command> {
        let Command::Text {
            row,
            col,
            text,
            style,
            ..
        } = command
        else {
            return vec![command.clone()];
        };
        let Some(syntax) = self.syntaxes.find_syntax_by_token(language) else {
            return vec![command.clone()];
        };

        let mut highlighter = HighlightLines::new(syntax, &self.theme);
        let mut out = Vec::new();
        let mut cursor = usize::from(*col);
        for line in LinesWithEndings::from(text) {
            let Ok(ranges) = highlighter.highlight_line(line, &self.syntaxes) else {
                return vec![command.clone()];
            };
            for (span_style, span_text) in ranges {
                let span_text = span_text.trim_end_matches('\n');
                if span_text.is_empty() {
                    continue;
                }
                let fg = span_style.foreground;
                out.push(Command::Text {
                    row: *row,
                    col: cursor as u16,
                    text: span_text.to_string(),
                    style: super::CellStyle {
                        fg: Paint::Rgb(fg.r, fg.g, fg.b),
                        bg: style.bg,
                        bold: span_style
                            .font_style
                            .contains(syntect::highlighting::FontStyle::BOLD),
                    },
                    language: None,
                });
                cursor += span_text.width();
            }
        }
        out
    }
}
