//! Reader model and rental history

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::rental::Rental;

/// A registered reader.
///
/// The reader owns their rental history, keyed by book id: one record per
/// distinct copy ever rented. `available` is false while a rental is open.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reader {
    pub id: u32,
    pub name: String,
    pub surname: String,
    pub available: bool,
    pub rentals: BTreeMap<u32, Rental>,
}

impl Reader {
    pub fn new(id: u32, name: impl Into<String>, surname: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            surname: surname.into(),
            available: true,
            rentals: BTreeMap::new(),
        }
    }

    /// Display name in "name surname" form
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}
