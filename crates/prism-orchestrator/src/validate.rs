//! Local submission checks.
//!
//! These run before any network call; a failed check prevents submission
//! entirely and never becomes a controller error.

use thiserror::Error;

/// Minimum word count for pasted-text submissions.
pub const MIN_TEXT_WORDS: usize = 50;

/// Reasons a submission is rejected locally.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Pasted text is too short to analyze meaningfully.
    #[error("text must contain at least {minimum} words to analyze, got {words}")]
    TooShort { words: usize, minimum: usize },

    /// The given URL does not identify a playlist.
    #[error("not a playlist url: missing list parameter")]
    NotAPlaylist,
}

/// Result type for validation checks.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Checks that pasted text is long enough to submit.
pub fn validate_text_submission(text: &str) -> Result<()> {
    let words = text.split_whitespace().count();
    if words < MIN_TEXT_WORDS {
        return Err(ValidationError::TooShort {
            words,
            minimum: MIN_TEXT_WORDS,
        });
    }
    Ok(())
}

/// Checks that a URL identifies a playlist.
pub fn validate_playlist_url(url: &str) -> Result<()> {
    if !url.contains("list=") {
        return Err(ValidationError::NotAPlaylist);
    }
    Ok(())
}
