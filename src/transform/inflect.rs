//! Suffix expansion for the `-s -d -ing` shorthand used in entry lines.

/// Attach a written suffix (`-s`, `-d`, `-ing`, `-er`, ...) to `base`.
///
/// - `-d`/`-ed` after a final `e` adds only `d`, otherwise `ed`
/// - `-ing` drops a single final `e` (`abàndone` -> `abàndoning`, but `see` -> `seeing`)
/// - `-er`/`-est` after a final `e` drop their own leading `e`
/// - anything else is appended as written (`-ting` -> `sitting`)
pub fn apply_suffix(base: &str, suffix: &str) -> String {
    let suffix = suffix.trim_start_matches('-');
    let ends_in_e = base.ends_with('e');

    match suffix {
        "d" | "ed" => {
            if ends_in_e {
                format!("{}d", base)
            } else {
                format!("{}ed", base)
            }
        }
        "ing" => {
            if ends_in_e && !base.ends_with("ee") {
                format!("{}ing", &base[..base.len() - 1])
            } else {
                format!("{}ing", base)
            }
        }
        "er" | "est" if ends_in_e => format!("{}{}", base, &suffix[1..]),
        _ => format!("{}{}", base, suffix),
    }
}

pub fn is_suffix(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-')
}

/// A token is either a suffix to attach to `base` or a full form.
pub fn expand_form(base: &str, token: &str) -> String {
    if is_suffix(token) {
        apply_suffix(base, token)
    } else {
        token.to_string()
    }
}
