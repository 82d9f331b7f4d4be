//! Keyword input validation.

use thiserror::Error;

use crate::blocklist::{find_blocked_keyword, BlockedKeyword};

/// Minimum trimmed keyword length, in characters.
pub const MIN_KEYWORD_CHARS: usize = 2;
/// Maximum trimmed keyword length, in characters.
pub const MAX_KEYWORD_CHARS: usize = 50;

/// Why a keyword was refused before any lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeywordRejection {
    #[error("keyword is required")]
    Missing,
    #[error("keyword must be at least {MIN_KEYWORD_CHARS} characters, got {len}")]
    TooShort { len: usize },
    #[error("keyword must be at most {MAX_KEYWORD_CHARS} characters, got {len}")]
    TooLong { len: usize },
}

/// Outcome of a keyword that passed the length check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordCheck<'a> {
    Allowed(&'a str),
    Blocked {
        keyword: &'a str,
        rule: &'static BlockedKeyword,
    },
}

impl<'a> KeywordCheck<'a> {
    /// The trimmed keyword, regardless of verdict.
    #[must_use]
    pub fn keyword(&self) -> &'a str {
        match self {
            KeywordCheck::Allowed(k) | KeywordCheck::Blocked { keyword: k, .. } => k,
        }
    }
}

/// Trim `raw`, enforce the length bounds, then run the denylist.
///
/// Length is counted in Unicode scalar values so Hangul keywords are measured
/// per syllable, not per byte.
///
/// # Errors
///
/// Returns [`KeywordRejection`] when the trimmed keyword is empty or out of
/// bounds.
pub fn check_keyword(raw: &str) -> Result<KeywordCheck<'_>, KeywordRejection> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(KeywordRejection::Missing);
    }

    let len = trimmed.chars().count();
    if len < MIN_KEYWORD_CHARS {
        return Err(KeywordRejection::TooShort { len });
    }
    if len > MAX_KEYWORD_CHARS {
        return Err(KeywordRejection::TooLong { len });
    }

    Ok(match find_blocked_keyword(trimmed) {
        Some(rule) => KeywordCheck::Blocked {
            keyword: trimmed,
            rule,
        },
        None => KeywordCheck::Allowed(trimmed),
    })
}
