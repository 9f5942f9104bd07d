//! Statistics snapshot over the catalog state

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::LibraryCatalog;

/// Book archive statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookStats {
    /// Copies currently in the archive
    pub total: usize,
    /// Copies not out on rental
    pub available: usize,
    /// Copies ever added, per title
    pub by_title: BTreeMap<String, u32>,
}

/// Reader register statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaderStats {
    pub total: usize,
    /// Readers with an open rental
    pub active: usize,
}

/// Rental statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalStats {
    /// Rentals still open
    pub active: usize,
    /// Rentals ever started
    pub total: u32,
    /// Rentals ever started, per title
    pub by_title: BTreeMap<String, u32>,
}

/// One-shot snapshot of the whole catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogStats {
    pub books: BookStats,
    pub readers: ReaderStats,
    pub rentals: RentalStats,
}

impl LibraryCatalog {
    /// Compute a statistics snapshot of the current state
    pub fn stats(&self) -> CatalogStats {
        let available = self.books.values().filter(|b| b.available).count();
        let active_readers = self.readers.values().filter(|r| !r.available).count();
        let ongoing = self
            .readers
            .values()
            .flat_map(|r| r.rentals.values())
            .filter(|r| r.is_ongoing())
            .count();

        CatalogStats {
            books: BookStats {
                total: self.books.len(),
                available,
                by_title: self.num_copies.clone(),
            },
            readers: ReaderStats {
                total: self.readers.len(),
                active: active_readers,
            },
            rentals: RentalStats {
                active: ongoing,
                total: self.num_rentals.values().sum(),
                by_title: self.num_rentals.clone(),
            },
        }
    }
}
