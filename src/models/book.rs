//! Book (physical copy) model

use serde::{Deserialize, Serialize};

/// One physical copy of a title in the archive.
///
/// Several copies of the same title are distinct books with distinct ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: u32,
    pub title: String,
    pub available: bool,
}

impl Book {
    pub fn new(id: u32, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            available: true,
        }
    }
}
