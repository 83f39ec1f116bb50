use std::sync::LazyLock;

use regex::Regex;

use super::{Block, Event, INDENT_UNIT};
use crate::error::ParseError;

static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^!\[([^\]]*)\]\(([^)]+)\)$").expect("valid image regex"));

static DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)=([\w./#-]+)").expect("valid directive regex"));

/// Lex the document body line by line into blocks and slide boundaries.
pub fn lex(body: &str) -> Result<Vec<Event>, ParseError> {
    let body = body.replace("\r\n", "\n");
    let lines: Vec<&str> = body.lines().collect();

    let mut events: Vec<Event> = Vec::new();
    let mut last_boundary_line = 0usize;
    let mut i = 0;
    while i < lines.len() {
        let raw = lines[i];
        let line_no = i + 1;
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            i += 1;
            continue;
        }

        if is_separator(trimmed) {
            events.push(Event::Boundary);
            last_boundary_line = line_no;
            i += 1;
            continue;
        }

        if let Some(block) = lex_heading(trimmed) {
            events.push(Event::Block(block));
            i += 1;
            continue;
        }

        if trimmed.starts_with("```") {
            let language = match trimmed.trim_start_matches('`').trim() {
                "" => None,
                tag => Some(tag.to_string()),
            };
            let open_line = line_no;
            let mut code: Vec<String> = Vec::new();
            i += 1;
            loop {
                let Some(line) = lines.get(i) else {
                    return Err(ParseError::UnterminatedCodeFence { line: open_line });
                };
                if line.trim() == "```" {
                    break;
                }
                code.push((*line).to_string());
                i += 1;
            }
            events.push(Event::Block(Block::CodeFence {
                language,
                lines: code,
            }));
            i += 1;
            continue;
        }

        if let Some(block) = lex_list_item(raw, line_no)? {
            events.push(Event::Block(block));
            i += 1;
            continue;
        }

        if let Some(caps) = IMAGE_RE.captures(trimmed) {
            events.push(Event::Block(Block::Image {
                alt: caps[1].to_string(),
                path: caps[2].to_string(),
            }));
            i += 1;
            continue;
        }

        // Length guard so `<!--` and `-->` cannot overlap in a stub like
        // `<!-->`; anything that short is plain paragraph text.
        if trimmed.len() >= 7 && trimmed.starts_with("<!--") && trimmed.ends_with("-->") {
            let inner = &trimmed[4..trimmed.len() - 3];
            for caps in DIRECTIVE_RE.captures_iter(inner) {
                events.push(Event::Block(Block::Directive {
                    key: caps[1].to_string(),
                    value: caps[2].to_string(),
                }));
            }
            i += 1;
            continue;
        }

        events.push(Event::Block(Block::Paragraph {
            text: trimmed.to_string(),
        }));
        i += 1;
    }

    if events.last() == Some(&Event::Boundary) {
        return Err(ParseError::TrailingEmptySlide {
            line: last_boundary_line,
        });
    }

    Ok(events)
}

/// A slide separator is a line of three or more dashes and nothing else.
fn is_separator(trimmed: &str) -> bool {
    trimmed.len() >= 3 && trimmed.chars().all(|c| c == '-')
}

fn lex_heading(trimmed: &str) -> Option<Block> {
    let level = trimmed.chars().take_while(|&c| c == '#').count();
    if level == 0 {
        return None;
    }
    let rest = &trimmed[level..];
    Some(Block::Heading {
        level: level.min(6) as u8,
        text: rest.trim().to_string(),
    })
}

/// `- text`, possibly indented; indentation must sit on a 2-space unit.
fn lex_list_item(raw: &str, line_no: usize) -> Result<Option<Block>, ParseError> {
    let rest = raw.trim_start();
    if !rest.starts_with('-') {
        return Ok(None);
    }
    let after = &rest[1..];
    if !(after.is_empty() || after.starts_with(' ')) {
        // Something like `-dashed-word`: plain paragraph text.
        return Ok(None);
    }
    let leading = &raw[..raw.len() - rest.len()];
    if leading.chars().any(|c| c != ' ') || leading.len() % INDENT_UNIT != 0 {
        return Err(ParseError::MalformedList { line: line_no });
    }
    Ok(Some(Block::ListItem {
        depth: leading.len() / INDENT_UNIT,
        text: after.trim().to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(event: &Event) -> &Block {
        match event {
            Event::Block(b) => b,
            Event::Boundary => panic!("expected block, got boundary"),
        }
    }

    #[test]
    fn test_separator_never_becomes_a_block() {
        let events = lex("one\n\n---\n\ntwo").unwrap();
        assert_eq!(
            events,
            vec![
                Event::Block(Block::Paragraph {
                    text: "one".into()
                }),
                Event::Boundary,
                Event::Block(Block::Paragraph {
                    text: "two".into()
                }),
            ]
        );
    }

    #[test]
    fn test_longer_dash_runs_are_separators() {
        let events = lex("a\n-----\nb").unwrap();
        assert_eq!(events[1], Event::Boundary);
    }

    #[test]
    fn test_heading_levels() {
        let events = lex("# One\n## Two\n### Three").unwrap();
        assert_eq!(
            *block(&events[0]),
            Block::Heading {
                level: 1,
                text: "One".into()
            }
        );
        assert_eq!(
            *block(&events[1]),
            Block::Heading {
                level: 2,
                text: "Two".into()
            }
        );
        assert_eq!(
            *block(&events[2]),
            Block::Heading {
                level: 3,
                text: "Three".into()
            }
        );
    }

    #[test]
    fn test_list_depth_from_indentation() {
        let events = lex("- a\n  - b\n    - c").unwrap();
        let depths: Vec<usize> = events
            .iter()
            .map(|e| match block(e) {
                Block::ListItem { depth, .. } => *depth,
                other => panic!("expected list item, got {other:?}"),
            })
            .collect();
        assert_eq!(depths, vec![0, 1, 2]);
    }

    #[test]
    fn test_misaligned_list_indent_is_an_error() {
        let err = lex("- a\n   - b").unwrap_err();
        assert_eq!(err, ParseError::MalformedList { line: 2 });
    }

    #[test]
    fn test_unterminated_fence_reports_opening_line() {
        let err = lex("# Title\n\n```rust\nfn main() {}").unwrap_err();
        assert_eq!(err, ParseError::UnterminatedCodeFence { line: 3 });
    }

    #[test]
    fn test_fence_content_is_verbatim() {
        let events = lex("```\n# not a heading\n- not a list\n---\n```").unwrap();
        assert_eq!(events.len(), 1);
        match block(&events[0]) {
            Block::CodeFence { language, lines } => {
                assert_eq!(*language, None);
                assert_eq!(lines, &["# not a heading", "- not a list", "---"]);
            }
            other => panic!("expected code fence, got {other:?}"),
        }
    }

    #[test]
    fn test_fence_language_tag() {
        let events = lex("```rust\nlet x = 1;\n```").unwrap();
        match block(&events[0]) {
            Block::CodeFence { language, .. } => assert_eq!(language.as_deref(), Some("rust")),
            other => panic!("expected code fence, got {other:?}"),
        }
    }

    #[test]
    fn test_image_reference() {
        let events = lex("![a chart](images/chart.png)").unwrap();
        assert_eq!(
            *block(&events[0]),
            Block::Image {
                alt: "a chart".into(),
                path: "images/chart.png".into()
            }
        );
    }

    #[test]
    fn test_directive_comment_yields_one_block_per_pair() {
        let events = lex("<!-- fg=white bg=red effect=explosions -->").unwrap();
        let pairs: Vec<(String, String)> = events
            .iter()
            .map(|e| match block(e) {
                Block::Directive { key, value } => (key.clone(), value.clone()),
                other => panic!("expected directive, got {other:?}"),
            })
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("fg".into(), "white".into()),
                ("bg".into(), "red".into()),
                ("effect".into(), "explosions".into()),
            ]
        );
    }

    #[test]
    fn test_comment_without_pairs_is_dropped() {
        let events = lex("<!-- just a note -->\ntext").unwrap();
        assert_eq!(
            events,
            vec![Event::Block(Block::Paragraph {
                text: "text".into()
            })]
        );
    }

    #[test]
    fn test_stub_comment_with_overlapping_delimiters_is_text() {
        // The `<!--` prefix and `-->` suffix share characters here; these
        // must lex as paragraphs, not slice out of bounds.
        for stub in ["<!-->", "<!--->"] {
            let events = lex(stub).unwrap();
            assert_eq!(
                events,
                vec![Event::Block(Block::Paragraph { text: stub.into() })]
            );
        }
    }

    #[test]
    fn test_tab_indented_list_is_malformed() {
        let err = lex("- a\n\t- b").unwrap_err();
        assert_eq!(err, ParseError::MalformedList { line: 2 });
    }

    #[test]
    fn test_trailing_separator_is_an_error() {
        let err = lex("# A\n\n---\n\n").unwrap_err();
        assert_eq!(err, ParseError::TrailingEmptySlide { line: 3 });
    }

    #[test]
    fn test_document_without_separators() {
        let events = lex("# Only\n\ntext").unwrap();
        assert!(!events.contains(&Event::Boundary));
    }
}
