//! Gallery error type.
//!
//! Route handlers turn these into inline HTML error fragments; nothing in the
//! request path panics.

use thiserror::Error;

use crate::gallery::card::CardId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GalleryError {
    /// `random_in_range` was called with `max < min`.
    #[error("invalid range: max ({max}) is below min ({min})")]
    InvalidRange { min: i64, max: i64 },

    /// The card id is well-formed but not in the current collection.
    #[error("no card with id {0} in the gallery")]
    UnknownCard(CardId),

    #[error("malformed card id: {0:?}")]
    InvalidCardId(String),

    #[error("invalid gallery config: {0}")]
    InvalidConfig(String),
}

impl GalleryError {
    /// Render the error as an inline fragment for HTMX to swap in.
    pub fn to_html(&self) -> String {
        format!(r#"<span class="text-red-600">{}</span>"#, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_inline_fragment() {
        let html = GalleryError::InvalidRange { min: 5, max: 1 }.to_html();
        assert!(html.contains("text-red-600"));
        assert!(html.contains("max (1) is below min (5)"));
    }

    #[test]
    fn unknown_card_names_the_id() {
        let err = GalleryError::UnknownCard(CardId::new(7));
        assert_eq!(err.to_string(), "no card with id card-7 in the gallery");
    }
}
