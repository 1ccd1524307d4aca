//! Choosing the canonical word for an entry.

use crate::grouper::EntryGroup;
use crate::tables::tables;
use crate::tagger::trailing_pos;
use log::debug;
use std::path::Path;

/// Which rule produced a headword, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadwordSource {
    /// The POS-bearing line also carries a language tag.
    InlineTagged,
    /// The `[ME]` line.
    ModernForm,
    /// The `[MI]` line.
    IntermediateForm,
    /// The line just above the POS-bearing line.
    PrecedingLine,
    Fallback,
}

/// Strip a leading infinitive marker (`to abandon`, `ta abàndone`).
pub fn strip_infinitive(text: &str) -> &str {
    let text = text.trim();
    for marker in &tables().infinitive_markers {
        if let Some(rest) = text.strip_prefix(marker.as_str()) {
            if rest.starts_with(char::is_whitespace) {
                return rest.trim_start();
            }
        }
    }
    text
}

/// First word token after the infinitive marker, without trailing
/// list punctuation.
pub fn first_word(text: &str) -> Option<String> {
    strip_infinitive(text)
        .split_whitespace()
        .next()
        .map(|token| token.trim_end_matches([',', ';']))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Index into `etymology_lines` of the line carrying the POS tag. On a
/// language-tagged line the group is still in the text, so it is detected
/// there.
pub fn metadata_line(group: &EntryGroup) -> Option<usize> {
    group.etymology_lines.iter().position(|line| {
        line.part_of_speech.is_some()
            || (line.language_code.is_some() && trailing_pos(&line.text).is_some())
    })
}

pub fn find_headword(group: &EntryGroup) -> Option<(String, HeadwordSource)> {
    let t = tables();
    let meta = metadata_line(group);

    if let Some(idx) = meta {
        let line = &group.etymology_lines[idx];
        if line.language_code.is_some() {
            let text = match trailing_pos(&line.text) {
                Some(pos) => &line.text[..pos.start],
                None => line.text.as_str(),
            };
            if let Some(word) = first_word(text) {
                return Some((word, HeadwordSource::InlineTagged));
            }
        }
    }

    let tagged = [
        (&t.modern_marker, HeadwordSource::ModernForm),
        (&t.intermediate_marker, HeadwordSource::IntermediateForm),
    ];
    for (code, source) in tagged {
        if let Some(word) = group
            .line_with_code(code)
            .and_then(|line| first_word(&line.text))
        {
            return Some((word, source));
        }
    }

    meta.filter(|&idx| idx > 0)
        .and_then(|idx| first_word(&group.etymology_lines[idx - 1].text))
        .map(|word| (word, HeadwordSource::PrecedingLine))
}

/// Total: falls back to `fallback` when no rule applies.
pub fn resolve_headword(group: &EntryGroup, fallback: &str) -> String {
    match find_headword(group) {
        Some((word, _)) => word,
        None => {
            debug!("no headword found, using fallback {:?}", fallback);
            fallback.to_string()
        }
    }
}

/// Fallback name from a source file name: the stem up to the first `_`
/// (`abandon_v.txt` -> `abandon`).
pub fn fallback_headword(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match stem.split('_').next() {
        Some(head) if !head.is_empty() => head.to_string(),
        _ if !stem.is_empty() => stem,
        _ => file_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouper::group_blank_line;

    fn group(text: &str) -> EntryGroup {
        group_blank_line(text).remove(0)
    }

    #[test]
    fn infinitive_markers_stripped() {
        assert_eq!(strip_infinitive("to abandon"), "abandon");
        assert_eq!(strip_infinitive("ta abàndone -s -d -ing"), "abàndone -s -d -ing");
        assert_eq!(strip_infinitive("today"), "today");
        assert_eq!(strip_infinitive("tack"), "tack");
    }

    #[test]
    fn first_word_trims_list_punctuation() {
        assert_eq!(first_word("aiguiere, eviere").as_deref(), Some("aiguiere"));
        assert_eq!(first_word("to be; 's").as_deref(), Some("be"));
        assert_eq!(first_word("   "), None);
        assert_eq!(first_word(","), None);
    }

    #[test]
    fn modern_form_line() {
        let g = group("aquarius [L]\naiguiere, eviere [OF]\newer [ME]\neuar -s (m n)\n");
        assert_eq!(
            find_headword(&g),
            Some(("ewer".to_string(), HeadwordSource::ModernForm))
        );
    }

    #[test]
    fn inline_tag_beats_modern_form() {
        let g = group("abandonner [OF]\nabandon [MI] (v)\nabandonment [ME]\n");
        assert_eq!(
            find_headword(&g),
            Some(("abandon".to_string(), HeadwordSource::InlineTagged))
        );
    }

    #[test]
    fn inline_tag_on_modern_line_strips_infinitive() {
        let g = group("abandonner [OF]\nto abandon [ME] (v)\n");
        assert_eq!(resolve_headword(&g, "x"), "abandon");
    }

    #[test]
    fn intermediate_form_when_no_modern_form() {
        let g = group("aqua [L]\newere [MI]\neuar (n)\n");
        assert_eq!(
            find_headword(&g),
            Some(("ewere".to_string(), HeadwordSource::IntermediateForm))
        );
    }

    #[test]
    fn preceding_line_when_untagged() {
        let g = group("aqua [L]\nwater stuff\nwotter (n)\n");
        assert_eq!(
            find_headword(&g),
            Some(("water".to_string(), HeadwordSource::PrecedingLine))
        );
    }

    #[test]
    fn fallback_when_nothing_matches() {
        let g = group("aqua [L]\nwotter\n");
        assert_eq!(find_headword(&g), None);
        assert_eq!(resolve_headword(&g, "water"), "water");
    }

    #[test]
    fn pos_on_first_line_has_no_preceding_line() {
        let g = group("wotter (n)\naqua [L]\n");
        assert_eq!(find_headword(&g), None);
    }

    #[test]
    fn fallback_from_file_name() {
        assert_eq!(fallback_headword("abandon_v.txt"), "abandon");
        assert_eq!(fallback_headword("ewer.txt"), "ewer");
        assert_eq!(fallback_headword("words/fount"), "fount");
        assert_eq!(fallback_headword("_n.txt"), "_n");
    }
}
