//! Thin wrappers, one per DATEVconnect resource action.
//!
//! Each wrapper fixes a path template, percent-encodes the id segments and
//! passes list options through untouched; value ranges are the API's problem.

use std::borrow::Cow;

pub mod accounting;
pub mod master_data;

pub const MASTER_DATA: &str = "datev/api/master-data/v1";
pub const ACCOUNTING: &str = "datev/api/accounting/v1";

/// Percent-encode one path segment (`encodeURIComponent` semantics).
pub fn segment(id: &str) -> Cow<'_, str> {
    urlencoding::encode(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_encodes_reserved_characters() {
        assert_eq!(segment("455148-1"), "455148-1");
        assert_eq!(segment("a/b c"), "a%2Fb%20c");
        assert_eq!(segment("x?y#z"), "x%3Fy%23z");
    }
}
