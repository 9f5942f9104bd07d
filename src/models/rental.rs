//! Rental record model

use serde::{Deserialize, Serialize};

/// A rental of one book copy by one reader.
///
/// Dates are opaque labels supplied by the caller; no parsing or ordering is
/// performed on them. A rental with no end date is still ongoing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rental {
    pub book_id: u32,
    pub reader_id: u32,
    pub start_date: String,
    pub end_date: Option<String>,
}

impl Rental {
    pub fn new(book_id: u32, reader_id: u32, start_date: impl Into<String>) -> Self {
        Self {
            book_id,
            reader_id,
            start_date: start_date.into(),
            end_date: None,
        }
    }

    pub fn is_ongoing(&self) -> bool {
        self.end_date.is_none()
    }

    /// Formats the rental as `"<readerId> <start> <end>"`, with the literal
    /// `ONGOING` in place of the end date while the rental is open.
    pub fn summary(&self) -> String {
        match &self.end_date {
            Some(end) => format!("{} {} {}", self.reader_id, self.start_date, end),
            None => format!("{} {} ONGOING", self.reader_id, self.start_date),
        }
    }
}
