//! Control string parser
//!
//! Controls are free text with an optional inline classification tag, e.g.
//! `"Use MFA for all admin accounts [mandatory]"`. The tag may appear anywhere
//! in the string and is matched case-insensitively. Every renderer and
//! exporter goes through [`parse`] so the tag rules live in one place.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Classification tag embedded in a control string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Mandatory,
    Optional,
    Basic,
    Advanced,
}

impl Tag {
    pub const ALL: [Tag; 4] = [Tag::Mandatory, Tag::Optional, Tag::Basic, Tag::Advanced];

    /// Lower-case name, as written in the data and in the `Type` column
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Mandatory => "mandatory",
            Tag::Optional => "optional",
            Tag::Basic => "basic",
            Tag::Advanced => "advanced",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A control as displayed and exported. Derived on every read, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedControl {
    /// 1-based position within the parent category
    pub index: usize,
    pub text: String,
    pub tag: Option<Tag>,
}

impl ParsedControl {
    /// Tag name for tabular output, `N/A` when untagged
    pub fn type_label(&self) -> &'static str {
        self.tag.map(|t| t.as_str()).unwrap_or("N/A")
    }
}

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        let names: Vec<&str> = Tag::ALL.iter().map(Tag::as_str).collect();
        // ASCII-only case folding, so `[baſic]` is not a tag
        let pattern = format!(r"(?i-u)\[({})\]", names.join("|"));
        Regex::new(&pattern).expect("tag pattern is a valid regex")
    })
}

/// Split a raw control into display text and optional tag.
///
/// Only the first tag token is removed; `position` is passed through as the
/// control's index.
pub fn parse(raw: &str, position: usize) -> ParsedControl {
    let found = tag_pattern().captures(raw).and_then(|caps| {
        let whole = caps.get(0)?.range();
        let tag = Tag::from_name(caps.get(1)?.as_str())?;
        Some((whole, tag))
    });

    // The token is only removed when it names a tag
    let Some((whole, tag)) = found else {
        return ParsedControl {
            index: position,
            text: raw.trim().to_string(),
            tag: None,
        };
    };

    let mut text = String::with_capacity(raw.len());
    text.push_str(&raw[..whole.start]);
    text.push_str(&raw[whole.end..]);

    ParsedControl {
        index: position,
        text: text.trim().to_string(),
        tag: Some(tag),
    }
}

/// Parse a whole category's controls, numbering from 1
pub fn parse_all<S: AsRef<str>>(controls: &[S]) -> Vec<ParsedControl> {
    controls
        .iter()
        .enumerate()
        .map(|(i, raw)| parse(raw.as_ref(), i + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_text_is_trimmed() {
        for s in ["Use TLS", "  padded both sides  ", "", "brackets [but] not a tag", "[]"] {
            let parsed = parse(s, 4);
            assert_eq!(parsed.tag, None, "input {s:?}");
            assert_eq!(parsed.text, s.trim());
            assert_eq!(parsed.index, 4);
        }
    }

    #[test]
    fn test_trailing_tag_any_case() {
        let base = "Enforce strong passwords ";
        for tag in Tag::ALL {
            let lower = tag.as_str().to_string();
            let upper = lower.to_uppercase();
            let mut title = lower.clone();
            title[..1].make_ascii_uppercase();

            for spelled in [lower, upper, title] {
                let raw = format!("{} [{}]", base, spelled);
                let parsed = parse(&raw, 1);
                assert_eq!(parsed.tag, Some(tag), "input {raw:?}");
                assert_eq!(parsed.text, base.trim());
            }
        }
    }

    #[test]
    fn test_tag_in_middle_of_text() {
        let parsed = parse("Rotate keys [Advanced] every 90 days", 2);
        assert_eq!(parsed.tag, Some(Tag::Advanced));
        // Only the token is removed; inner spacing is left as-is
        assert_eq!(parsed.text, "Rotate keys  every 90 days");
    }

    #[test]
    fn test_only_first_tag_honoured() {
        let parsed = parse("Log access [optional] [mandatory]", 1);
        assert_eq!(parsed.tag, Some(Tag::Optional));
        assert_eq!(parsed.text, "Log access  [mandatory]");
    }

    #[test]
    fn test_unknown_bracket_token_left_alone() {
        let parsed = parse("Patch OS [critical]", 1);
        assert_eq!(parsed.tag, None);
        assert_eq!(parsed.text, "Patch OS [critical]");

        let parsed = parse("[note] Patch OS [basic]", 1);
        assert_eq!(parsed.tag, Some(Tag::Basic));
        assert_eq!(parsed.text, "[note] Patch OS");
    }

    #[test]
    fn test_non_ascii_lookalike_is_not_a_tag() {
        // U+017F LATIN SMALL LETTER LONG S folds to 's' under Unicode rules
        let raw = "  Harden host [ba\u{17F}ic] ";
        let parsed = parse(raw, 3);
        assert_eq!(parsed.tag, None);
        assert_eq!(parsed.text, "Harden host [ba\u{17F}ic]");

        // A real tag later in the string is still found
        let parsed = parse("Harden host [ba\u{17F}ic] [BASIC]", 1);
        assert_eq!(parsed.tag, Some(Tag::Basic));
        assert_eq!(parsed.text, "Harden host [ba\u{17F}ic]");
    }

    #[test]
    fn test_type_label() {
        assert_eq!(parse("x [mandatory]", 1).type_label(), "mandatory");
        assert_eq!(parse("x", 1).type_label(), "N/A");
    }

    #[test]
    fn test_parse_all_numbers_from_one() {
        let parsed = parse_all(&["a", "b [basic]", "c"]);
        let indices: Vec<usize> = parsed.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        assert_eq!(parsed[1].tag, Some(Tag::Basic));
    }
}
