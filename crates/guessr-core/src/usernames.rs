//! Username rules that need no I/O.
//!
//! Two checks target "anonymous": a fuzzy pattern that catches repeated
//! letters and the y/i, o/0 swaps people use to slip past an exact match,
//! and the exact lowercase comparison itself. They overlap on purpose; the
//! exact check still holds if the pattern is ever loosened.

use std::fmt;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::Serialize;

pub const ANONYMOUS_PATTERN: &str = r"^an+[o0]+n+[yi]+m+[o0]+u*s$";

static ANONYMOUS_RE: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(ANONYMOUS_PATTERN)
        .case_insensitive(true)
        .build()
        .unwrap_or_else(|err| unreachable!("invalid anonymous pattern: {err}"))
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", content = "word", rename_all = "snake_case")]
pub enum RejectReason {
    AnonymousPattern,
    AnonymousExact,
    BannedWord(String),
}

impl RejectReason {
    #[must_use]
    pub const fn rule(&self) -> &'static str {
        match self {
            Self::AnonymousPattern => "anonymous_pattern",
            Self::AnonymousExact => "anonymous_exact",
            Self::BannedWord(_) => "banned_word",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rule())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", content = "reason", rename_all = "snake_case")]
pub enum UsernameVerdict {
    Accepted,
    Rejected(RejectReason),
}

impl UsernameVerdict {
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

#[must_use]
pub fn matches_anonymous_pattern(username: &str) -> bool {
    ANONYMOUS_RE.is_match(username)
}

#[must_use]
pub fn is_exact_anonymous(username: &str) -> bool {
    username.to_lowercase() == "anonymous"
}

/// Checks that run before the banned-word list is consulted. Surrounding
/// whitespace is ignored, so "anonymous\n" is still caught.
#[must_use]
pub fn check_anonymous(username: &str) -> Option<RejectReason> {
    let username = username.trim();
    if matches_anonymous_pattern(username) {
        return Some(RejectReason::AnonymousPattern);
    }
    if is_exact_anonymous(username) {
        return Some(RejectReason::AnonymousExact);
    }
    None
}

/// Compiled-size cap per banned-word pattern.
pub const PATTERN_SIZE_LIMIT: usize = 10 * (1 << 20);

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// `\b` only holds next to a word character, so a side that starts or ends
/// with a symbol is delimited by a non-word character or the string edge.
fn token_pattern(word: &str) -> String {
    let lead = if word.starts_with(is_word_char) {
        r"\b"
    } else {
        r"(?:^|\W)"
    };
    let trail = if word.ends_with(is_word_char) {
        r"\b"
    } else {
        r"(?:\W|$)"
    };
    format!("{lead}{}{trail}", regex::escape(word))
}

/// Whole-token matcher over a banned-word list.
///
/// "ass" matches "ass hat" but not "classic"; "@ss" matches "my @ss" but not
/// "cl@ssic". Blank entries are skipped. Words whose pattern does not compile
/// are kept aside in [`BannedWordMatcher::skipped`].
pub struct BannedWordMatcher {
    patterns: Vec<(String, Regex)>,
    skipped: Vec<String>,
}

impl BannedWordMatcher {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_size_limit(words, PATTERN_SIZE_LIMIT)
    }

    pub fn with_size_limit<I, S>(words: I, size_limit: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut patterns = Vec::new();
        let mut skipped = Vec::new();
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if word.is_empty() {
                continue;
            }
            match RegexBuilder::new(&token_pattern(&word))
                .case_insensitive(true)
                .size_limit(size_limit)
                .build()
            {
                Ok(re) => patterns.push((word, re)),
                Err(_) => skipped.push(word),
            }
        }
        Self { patterns, skipped }
    }

    /// First banned word found in `username`, in list order.
    #[must_use]
    pub fn find(&self, username: &str) -> Option<&str> {
        let lowered = username.to_lowercase();
        self.patterns
            .iter()
            .find(|(_, re)| re.is_match(&lowered))
            .map(|(word, _)| word.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Words left out because their pattern failed to compile.
    #[must_use]
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }
}
