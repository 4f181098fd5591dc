//! # Unsaved-Changes Coordinator
//!
//! Combines the page and theme dirty flags into the single gate every
//! leaving action (switching pages, opening the preview, signing out,
//! closing the editor) must pass through.

/// What the user is about to lose, phrased exactly as the confirmation
/// dialog shows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsavedWarning {
    Page,
    Theme,
    PageAndTheme,
}

impl std::fmt::Display for UnsavedWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnsavedWarning::Page => f.write_str("unsaved page changes"),
            UnsavedWarning::Theme => f.write_str("unsaved theme settings"),
            UnsavedWarning::PageAndTheme => {
                f.write_str("unsaved page changes and theme settings")
            }
        }
    }
}

/// Combine the two dirty flags into a warning, if any.
pub fn assess(page_dirty: bool, theme_dirty: bool) -> Option<UnsavedWarning> {
    match (page_dirty, theme_dirty) {
        (false, false) => None,
        (true, false) => Some(UnsavedWarning::Page),
        (false, true) => Some(UnsavedWarning::Theme),
        (true, true) => Some(UnsavedWarning::PageAndTheme),
    }
}

/// Result of consulting the coordinator before a leaving action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveCheck {
    /// Nothing unsaved; proceed immediately.
    Proceed,
    /// Block and present the warning with exactly two resolutions.
    Blocked(UnsavedWarning),
}

/// The user's answer to a blocked leave. There is no partial discard
/// (e.g. theme only): the protocol is all-or-nothing per leave attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveResolution {
    /// Abort the leave; no state changes.
    Stay,
    /// Discard every dirty working copy, then proceed.
    DiscardAndLeave,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_the_dialog_copy() {
        assert_eq!(assess(false, false), None);
        assert_eq!(
            assess(true, false).unwrap().to_string(),
            "unsaved page changes"
        );
        assert_eq!(
            assess(false, true).unwrap().to_string(),
            "unsaved theme settings"
        );
        assert_eq!(
            assess(true, true).unwrap().to_string(),
            "unsaved page changes and theme settings"
        );
    }
}
