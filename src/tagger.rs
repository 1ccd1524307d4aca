//! Line tagging: one physical line in, one [`TaggedLine`] out.
//!
//! A line may carry a bracketed language code (`aquarius [L]`), a trailing
//! part-of-speech group (`euar -s (m n)`), or be a citation URL. Lines
//! without a recognized code belong to the native language. Tagging never
//! fails; anything unrecognized stays in the text.

use crate::tables::tables;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    pub static ref BRACKET_TAG: Regex = Regex::new(r"\[([A-Z]+)\]").unwrap();
    static ref TRAILING_GROUP: Regex = Regex::new(r"\(([^()]*)\)\s*$").unwrap();
}

/// A non-blank physical line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub content: String,
    /// 1-based
    pub line_number: usize,
}

impl RawLine {
    pub fn new(content: impl Into<String>, line_number: usize) -> Self {
        RawLine {
            content: content.into(),
            line_number,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedLine {
    pub text: String,
    /// Language name, or the native origin when no code was recognized.
    pub origin: String,
    pub language_code: Option<String>,
    /// Full POS names (`noun`, `verb`), native lines only.
    pub part_of_speech: Option<Vec<String>>,
    /// The abbreviations as written (`m n`), kept for gender detection.
    pub pos_abbreviations: Option<Vec<String>>,
    pub is_url: bool,
    pub line_number: usize,
}

impl TaggedLine {
    /// True for lines in the target language itself (no recognized code).
    pub fn is_native(&self) -> bool {
        self.language_code.is_none() && !self.is_url
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.language_code.as_deref() == Some(code)
    }

    pub fn has_pos(&self, name: &str) -> bool {
        self.part_of_speech
            .as_ref()
            .is_some_and(|names| names.iter().any(|n| n == name))
    }
}

/// A trailing `( ... )` group whose every comma-separated item is a known
/// POS abbreviation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosMatch {
    /// Byte offset where the group starts in the searched text.
    pub start: usize,
    pub abbreviations: Vec<String>,
    pub names: Vec<String>,
}

/// Find a trailing POS group. Partial matches (`(see below)`, `(v, later)`)
/// are ordinary text and yield `None`.
pub fn trailing_pos(text: &str) -> Option<PosMatch> {
    let caps = TRAILING_GROUP.captures(text)?;
    let whole = caps.get(0)?;
    let t = tables();

    let mut abbreviations = Vec::new();
    let mut names: Vec<String> = Vec::new();
    for item in caps[1].split(',').map(str::trim) {
        if item.is_empty() {
            return None;
        }
        let class = t.pos_class(item)?;
        abbreviations.push(item.to_string());
        if !names.contains(&class.name) {
            names.push(class.name.clone());
        }
    }

    Some(PosMatch {
        start: whole.start(),
        abbreviations,
        names,
    })
}

/// Remove every `[XX]` tag. Repeats until none remain so that removing one
/// tag can never leave another behind (`[A[B]]`).
pub fn strip_bracket_tags(text: &str) -> String {
    let mut current = text.to_string();
    while BRACKET_TAG.is_match(&current) {
        current = BRACKET_TAG.replace_all(&current, " ").into_owned();
    }
    current.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn tag_line(raw: &RawLine) -> TaggedLine {
    let t = tables();
    let content = raw.content.trim();
    let is_url = content.starts_with("http");

    let language_code = BRACKET_TAG
        .captures_iter(content)
        .map(|cap| cap[1].to_string())
        .find(|code| t.language_name(code).is_some());

    let origin = language_code
        .as_deref()
        .and_then(|code| t.language_name(code))
        .unwrap_or(&t.native_origin)
        .to_string();

    let mut text = strip_bracket_tags(content);
    let mut part_of_speech = None;
    let mut pos_abbreviations = None;

    if language_code.is_none() && !is_url {
        if let Some(pos) = trailing_pos(&text) {
            text = text[..pos.start].trim_end().to_string();
            part_of_speech = Some(pos.names);
            pos_abbreviations = Some(pos.abbreviations);
        }
    }

    TaggedLine {
        text,
        origin,
        language_code,
        part_of_speech,
        pos_abbreviations,
        is_url,
        line_number: raw.line_number,
    }
}

/// Non-blank lines of `text`, numbered by physical position.
pub fn raw_lines(text: &str) -> Vec<RawLine> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| RawLine::new(line, idx + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tag(s: &str) -> TaggedLine {
        tag_line(&RawLine::new(s, 1))
    }

    // ─────────────────────────────────────────────────────────────
    // Language tags
    // ─────────────────────────────────────────────────────────────

    #[test]
    fn recognized_tag_sets_origin() {
        let line = tag("aquarius [L]");
        assert_eq!(line.text, "aquarius");
        assert_eq!(line.origin, "Latin");
        assert_eq!(line.language_code.as_deref(), Some("L"));
        assert!(!line.is_url);
        assert!(line.part_of_speech.is_none());
    }

    #[test]
    fn multi_form_line_keeps_commas() {
        let line = tag("aiguiere, eviere [OF]");
        assert_eq!(line.text, "aiguiere, eviere");
        assert_eq!(line.origin, "Old French");
    }

    #[test]
    fn untagged_line_is_native() {
        let line = tag("euar -s");
        assert_eq!(line.origin, "Inglish");
        assert!(line.language_code.is_none());
        assert!(line.is_native());
    }

    #[test]
    fn unknown_tag_is_stripped_but_native() {
        let line = tag("blorf [QQQ]");
        assert_eq!(line.text, "blorf");
        assert_eq!(line.origin, "Inglish");
        assert!(line.language_code.is_none());
    }

    #[test]
    fn first_recognized_tag_wins() {
        let line = tag("word [QQ] [OE] [L]");
        assert_eq!(line.language_code.as_deref(), Some("OE"));
        assert_eq!(line.text, "word");
    }

    #[test]
    fn nested_tags_fully_removed() {
        assert_eq!(strip_bracket_tags("x [A[B]] y"), "x y");
    }

    // ─────────────────────────────────────────────────────────────
    // Part of speech
    // ─────────────────────────────────────────────────────────────

    #[test]
    fn pos_group_expanded_and_stripped() {
        let line = tag("euar -s (m n)");
        assert_eq!(line.text, "euar -s");
        assert_eq!(line.part_of_speech, Some(vec!["noun".to_string()]));
        assert_eq!(line.pos_abbreviations, Some(vec!["m n".to_string()]));
    }

    #[test]
    fn multiple_pos_items() {
        let line = tag("fyre (n, v)");
        assert_eq!(line.text, "fyre");
        assert_eq!(
            line.part_of_speech,
            Some(vec!["noun".to_string(), "verb".to_string()])
        );
    }

    #[test]
    fn partial_pos_group_left_as_text() {
        let line = tag("fyre (n, see below)");
        assert_eq!(line.text, "fyre (n, see below)");
        assert!(line.part_of_speech.is_none());
    }

    #[test]
    fn parenthetical_remark_left_as_text() {
        let line = tag("wunder (archaic)");
        assert_eq!(line.text, "wunder (archaic)");
        assert!(line.part_of_speech.is_none());
    }

    #[test]
    fn pos_not_extracted_from_tagged_lines() {
        let line = tag("abandon [ME] (v)");
        assert_eq!(line.text, "abandon (v)");
        assert!(line.part_of_speech.is_none());
        assert!(trailing_pos(&line.text).is_some());
    }

    #[test]
    fn trailing_pos_reports_offset() {
        let m = trailing_pos("abandon (v)").unwrap();
        assert_eq!(m.start, 8);
        assert_eq!(m.names, vec!["verb"]);
    }

    #[test]
    fn empty_group_is_not_pos() {
        assert!(trailing_pos("word ()").is_none());
        assert!(trailing_pos("word (v,)").is_none());
    }

    // ─────────────────────────────────────────────────────────────
    // URLs and raw lines
    // ─────────────────────────────────────────────────────────────

    #[test]
    fn url_line() {
        let line = tag("https://example.com/word/ewer");
        assert!(line.is_url);
        assert!(!line.is_native());
        assert_eq!(line.text, "https://example.com/word/ewer");
    }

    #[test]
    fn raw_lines_skip_blanks_and_keep_numbers() {
        let lines = raw_lines("a [L]\n\n  \nb [OF]\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].line_number, 1);
        assert_eq!(lines[1].line_number, 4);
        assert_eq!(lines[1].content, "b [OF]");
    }

    proptest! {
        #[test]
        fn untagged_content_is_always_native(content in "[a-z ,.()'-]{0,40}") {
            let line = tag(&content);
            prop_assert_eq!(line.origin, "Inglish");
            prop_assert!(line.language_code.is_none());
        }

        #[test]
        fn text_never_contains_bracket_tag(content in "[a-zA-Z \\[\\]()]{0,40}") {
            let line = tag(&content);
            prop_assert!(!BRACKET_TAG.is_match(&line.text));
        }
    }
}
