use serde::Deserialize;

/// Presentation metadata from an optional YAML frontmatter fence at the
/// very top of the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DeckMeta {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
}

/// Split frontmatter from the document body.
///
/// A frontmatter fence is a `---` on the first line, a closing `---`, and
/// nothing but blank or `key: value` lines in between. Anything else means
/// the leading `---` is an ordinary slide separator and the whole input is
/// body text.
pub fn extract(content: &str) -> (DeckMeta, String) {
    let mut lines = content.lines();
    if lines.next().map(str::trim) != Some("---") {
        return (DeckMeta::default(), content.to_string());
    }

    let rest: Vec<&str> = lines.collect();
    let Some(close) = rest.iter().position(|l| l.trim() == "---") else {
        return (DeckMeta::default(), content.to_string());
    };

    let header = &rest[..close];
    let looks_like_yaml = header
        .iter()
        .all(|l| l.trim().is_empty() || is_key_value(l));
    if !looks_like_yaml || header.iter().all(|l| l.trim().is_empty()) {
        return (DeckMeta::default(), content.to_string());
    }

    let yaml = header.join("\n");
    let meta = serde_yaml::from_str::<DeckMeta>(&yaml).unwrap_or_default();
    let body = rest[close + 1..].join("\n");
    (meta, body)
}

fn is_key_value(line: &str) -> bool {
    let trimmed = line.trim_start();
    match trimmed.split_once(':') {
        Some((key, _)) => {
            !key.is_empty()
                && key
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_meta() {
        let content = "---\ntitle: Demo\nauthor: Someone\ntheme: light\n---\n\n# Hello";
        let (meta, body) = extract(content);
        assert_eq!(meta.title.as_deref(), Some("Demo"));
        assert_eq!(meta.author.as_deref(), Some("Someone"));
        assert_eq!(meta.theme.as_deref(), Some("light"));
        assert_eq!(body.trim(), "# Hello");
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Hello\n\nBody";
        let (meta, body) = extract(content);
        assert_eq!(meta, DeckMeta::default());
        assert_eq!(body, content);
    }

    #[test]
    fn test_leading_separator_is_not_frontmatter() {
        // Slide content between the dashes, not key: value lines.
        let content = "---\n# First slide\n---\n# Second";
        let (meta, body) = extract(content);
        assert_eq!(meta, DeckMeta::default());
        assert_eq!(body, content);
    }

    #[test]
    fn test_unknown_meta_keys_ignored() {
        let content = "---\ntitle: Demo\naspect: 16:9\n---\nBody";
        let (meta, _) = extract(content);
        assert_eq!(meta.title.as_deref(), Some("Demo"));
    }
}
