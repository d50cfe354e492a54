//! Mask matching utilities.

use crate::casemap::irc_lower_char;

/// Returns true if `mask` contains a glob metacharacter (`*` or `?`).
#[inline]
pub fn has_wildcards(mask: &str) -> bool {
    mask.contains(['*', '?'])
}

/// Match `text` against a glob `pattern` (`*` any run, `?` one char).
///
/// Comparison uses RFC 1459 case mapping, so `[]\~` are equivalent to `{}|^`.
///
/// # Examples
///
/// ```
/// use slirc_proto::util::wildcard_match;
///
/// assert!(wildcard_match("*", "anything"));
/// assert!(wildcard_match("irc.*.net", "IRC.EXAMPLE.NET"));
/// assert!(wildcard_match("te?t", "test"));
/// assert!(!wildcard_match("hub.*", "leaf.example.net"));
/// ```
pub fn wildcard_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().map(irc_lower_char).collect();
    let text: Vec<char> = text.chars().map(irc_lower_char).collect();

    let (mut p, mut t) = (0, 0);
    // Pattern index after the last '*', and the text index it was tried at.
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p + 1, t));
                p += 1;
            }
            Some(&c) if c == '?' || c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match backtrack {
                Some((bp, bt)) => {
                    p = bp;
                    t = bt + 1;
                    backtrack = Some((bp, bt + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_wildcards() {
        assert!(has_wildcards("*.example.net"));
        assert!(has_wildcards("ali?e"));
        assert!(!has_wildcards("irc.example.net"));
    }

    #[test]
    fn star_matches_any_run() {
        assert!(wildcard_match("*", ""));
        assert!(wildcard_match("a*", "a"));
        assert!(wildcard_match("*bc", "abcbc"));
        assert!(wildcard_match("a*b*c", "axxbyyc"));
        assert!(!wildcard_match("a*b*c", "axxbyy"));
    }

    #[test]
    fn question_matches_exactly_one() {
        assert!(wildcard_match("a?c", "abc"));
        assert!(!wildcard_match("a?c", "ac"));
    }

    #[test]
    fn casemapping_applies() {
        assert!(wildcard_match("NICK[*]", "nick{away}"));
        assert!(wildcard_match("*@*.Example.COM", "ident@host.example.com"));
    }

    proptest::proptest! {
        #[test]
        fn literal_pattern_matches_itself(s in "[a-z0-9.]{0,20}") {
            proptest::prop_assert!(wildcard_match(&s, &s));
        }

        #[test]
        fn star_prefix_matches_any_suffix(prefix in "[a-z]{0,8}", rest in "[a-z.]{0,12}") {
            let pattern = format!("{}*", prefix);
            let text = format!("{}{}", prefix, rest);
            proptest::prop_assert!(wildcard_match(&pattern, &text));
        }
    }
}
