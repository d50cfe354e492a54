//! Privilege levels for categories and the oper-only listing policy.

use super::Viewer;
use crate::config::OperOnly;

/// Minimum privilege a category requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Privilege {
    None,
    Oper,
    Admin,
}

/// How much of a policy-controlled listing a viewer gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Every entry.
    Full,
    /// Only the entry that applies to the viewer's own connection.
    OwnEntry,
    /// Nothing; the viewer is told they lack privileges.
    Denied,
}

impl Visibility {
    /// Operators always see everything; others get what `policy` allows.
    pub fn of(viewer: &Viewer, policy: OperOnly) -> Self {
        if viewer.is_oper {
            return Self::Full;
        }
        match policy {
            OperOnly::No => Self::Full,
            OperOnly::Masked => Self::OwnEntry,
            OperOnly::Yes => Self::Denied,
        }
    }
}

/// Whether a simple oper-only switch refuses this viewer.
#[inline]
pub fn refused(viewer: &Viewer, oper_only: bool) -> bool {
    oper_only && !viewer.is_oper
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::stats::test_support::{oper, user};

    #[test]
    fn operators_ignore_policy() {
        let v = Viewer::of(&oper("001AAAAAB", "root", false));
        assert_eq!(Visibility::of(&v, OperOnly::Yes), Visibility::Full);
        assert!(!refused(&v, true));
    }

    #[test]
    fn users_follow_policy() {
        let v = Viewer::of(&user("001AAAAAA", "alice"));
        assert_eq!(Visibility::of(&v, OperOnly::No), Visibility::Full);
        assert_eq!(Visibility::of(&v, OperOnly::Masked), Visibility::OwnEntry);
        assert_eq!(Visibility::of(&v, OperOnly::Yes), Visibility::Denied);
        assert!(refused(&v, true));
        assert!(!refused(&v, false));
    }
}
