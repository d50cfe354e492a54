//! IRC case-mapping functions.
//!
//! Nick and server names compare case-insensitively under the `rfc1459`
//! mapping, where `[]\~` fold to `{}|^` in addition to ASCII letters.

/// Fold a single character under RFC 1459 rules.
#[inline]
pub const fn irc_lower_char(c: char) -> char {
    match c {
        'A'..='Z' => (c as u8 + 32) as char,
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        '~' => '^',
        _ => c,
    }
}

/// Fold a whole string under RFC 1459 rules.
pub fn irc_to_lower(s: &str) -> String {
    s.chars().map(irc_lower_char).collect()
}

/// Case-insensitive equality under RFC 1459 rules.
///
/// Equivalent to `irccmp(a, b) == 0`.
pub fn irc_eq(a: &str, b: &str) -> bool {
    let mut left = a.chars().map(irc_lower_char);
    let mut right = b.chars().map(irc_lower_char);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return true,
            (Some(x), Some(y)) if x == y => continue,
            _ => return false,
        }
    }
}
