//! In-memory catalog and circulation operations

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use crate::{
    config::CatalogConfig,
    error::{CatalogError, CatalogResult},
    models::{Book, Reader, Rental},
};

/// The circulation desk state: book archive, registered readers and the
/// per-title counters.
///
/// Identifiers are handed out from two independent counters owned by the
/// catalog and cross the API boundary as strings. Internally every map is
/// keyed by the numeric id, so ascending iteration is ascending id order.
#[derive(Debug, Clone)]
pub struct LibraryCatalog {
    pub(crate) books: BTreeMap<u32, Book>,
    pub(crate) readers: BTreeMap<u32, Reader>,
    /// title -> copies ever added (not decremented by rentals)
    pub(crate) num_copies: BTreeMap<String, u32>,
    /// title -> rentals ever started
    pub(crate) num_rentals: BTreeMap<String, u32>,
    next_book_id: u32,
    next_reader_id: u32,
}

impl LibraryCatalog {
    /// Create an empty catalog with the default id bases
    pub fn new() -> Self {
        Self::with_config(&CatalogConfig::default())
    }

    /// Create an empty catalog configured from the environment
    pub fn from_env() -> CatalogResult<Self> {
        let config = CatalogConfig::load()?;
        Ok(Self::with_config(&config))
    }

    /// Create an empty catalog with the given configuration
    pub fn with_config(config: &CatalogConfig) -> Self {
        Self {
            books: BTreeMap::new(),
            readers: BTreeMap::new(),
            num_copies: BTreeMap::new(),
            num_rentals: BTreeMap::new(),
            next_book_id: config.ids.books,
            next_reader_id: config.ids.readers,
        }
    }

    /// Add one copy of a title to the archive and return its fresh id.
    ///
    /// Invoked repeatedly with the same title it registers additional
    /// copies, each with its own id.
    pub fn add_book(&mut self, title: &str) -> String {
        let id = self.next_book_id;
        self.next_book_id += 1;
        self.books.insert(id, Book::new(id, title));
        *self.num_copies.entry(title.to_string()).or_insert(0) += 1;
        debug!("book {} added: {}", id, title);
        id.to_string()
    }

    /// All known titles, sorted alphabetically, with the cumulative number
    /// of copies added for each
    pub fn get_titles(&self) -> BTreeMap<String, u32> {
        self.num_copies.clone()
    }

    /// Ids of every book currently in the archive
    pub fn get_books(&self) -> BTreeSet<String> {
        self.books.keys().map(|id| id.to_string()).collect()
    }

    /// Register a new reader and return their fresh id
    pub fn add_reader(&mut self, name: &str, surname: &str) -> String {
        let id = self.next_reader_id;
        self.next_reader_id += 1;
        self.readers.insert(id, Reader::new(id, name, surname));
        debug!("reader {} registered: {} {}", id, name, surname);
        id.to_string()
    }

    /// Display name ("name surname") of a registered reader
    pub fn get_reader_name(&self, reader_id: &str) -> CatalogResult<String> {
        Ok(self.reader(reader_id)?.full_name())
    }

    /// Find a free copy of a title.
    ///
    /// Returns the id of the free copy with the smallest id, or `None` when
    /// every copy of the title is currently out. A title that was never
    /// registered is an error.
    pub fn get_available_book(&self, title: &str) -> CatalogResult<Option<String>> {
        if !self.num_copies.contains_key(title) {
            return Err(CatalogError::NotFound(format!(
                "Title \"{}\" not in the archive",
                title
            )));
        }
        Ok(self
            .books
            .values()
            .find(|b| b.title == title && b.available)
            .map(|b| b.id.to_string()))
    }

    /// Start a rental of a book copy for a reader.
    ///
    /// The reader keeps one record per distinct copy: renting the same copy
    /// again replaces the earlier record.
    pub fn start_rental(
        &mut self,
        book_id: &str,
        reader_id: &str,
        start_date: &str,
    ) -> CatalogResult<()> {
        let (rid, reader_free) = {
            let reader = self.reader(reader_id)?;
            (reader.id, reader.available)
        };
        let (bid, title, book_free) = {
            let book = self.book(book_id)?;
            (book.id, book.title.clone(), book.available)
        };

        if !reader_free {
            return Err(CatalogError::Conflict(format!(
                "Reader with id {} is already renting a book",
                rid
            )));
        }
        if !book_free {
            return Err(CatalogError::Conflict(format!(
                "Book with id {} is already rented",
                bid
            )));
        }

        let reader = self
            .readers
            .get_mut(&rid)
            .ok_or_else(|| reader_not_found(reader_id))?;
        reader.rentals.insert(bid, Rental::new(bid, rid, start_date));
        reader.available = false;

        let book = self
            .books
            .get_mut(&bid)
            .ok_or_else(|| book_not_found(book_id))?;
        book.available = false;

        *self.num_rentals.entry(title).or_insert(0) += 1;
        info!("rental started: book {} by reader {} on {}", bid, rid, start_date);
        Ok(())
    }

    /// End a rental of a book copy for a reader.
    ///
    /// There must be an open rental record for the pair: a pair that never
    /// rented is an error, as is ending the same rental twice.
    pub fn end_rental(
        &mut self,
        book_id: &str,
        reader_id: &str,
        end_date: &str,
    ) -> CatalogResult<()> {
        let rid = self.reader(reader_id)?.id;
        let bid = self.book(book_id)?.id;

        let reader = self
            .readers
            .get_mut(&rid)
            .ok_or_else(|| reader_not_found(reader_id))?;
        let rental = reader.rentals.get_mut(&bid).ok_or_else(|| {
            CatalogError::NotFound(format!(
                "No rental of book {} by reader {}",
                book_id, reader_id
            ))
        })?;
        if rental.end_date.is_some() {
            return Err(CatalogError::Conflict(format!(
                "Rental of book {} by reader {} already ended",
                book_id, reader_id
            )));
        }
        rental.end_date = Some(end_date.to_string());
        reader.available = true;

        let book = self
            .books
            .get_mut(&bid)
            .ok_or_else(|| book_not_found(book_id))?;
        book.available = true;

        info!("rental ended: book {} by reader {} on {}", bid, rid, end_date);
        Ok(())
    }

    /// Every rental record for a book copy, keyed by reader id, each
    /// formatted as `"<readerId> <start> <end|ONGOING>"`.
    ///
    /// A book id with no recorded rentals (including an unknown id) yields
    /// an empty map.
    pub fn get_rentals(&self, book_id: &str) -> BTreeMap<String, String> {
        let mut rentals = BTreeMap::new();
        let key = match book_id.parse::<u32>() {
            Ok(key) => key,
            Err(_) => return rentals,
        };
        for reader in self.readers.values() {
            if let Some(rental) = reader.rentals.get(&key) {
                rentals
                    .entry(reader.id.to_string())
                    .or_insert_with(|| rental.summary());
            }
        }
        rentals
    }

    /// Accept a donation: a comma-separated list of titles, each added to
    /// the archive as a new copy. Returns the assigned ids in list order.
    ///
    /// There is no escaping of embedded commas; empty segments are skipped.
    pub fn receive_donation(&mut self, donated_titles: &str) -> Vec<String> {
        let mut ids = Vec::new();
        for title in donated_titles.split(',') {
            if title.is_empty() {
                debug!("skipping empty title in donation");
                continue;
            }
            ids.push(self.add_book(title));
        }
        info!("donation received: {} books", ids.len());
        ids
    }

    /// Reader id -> book id for every rental still open
    pub fn get_ongoing_rentals(&self) -> BTreeMap<String, String> {
        let mut ongoing = BTreeMap::new();
        for reader in self.readers.values() {
            for rental in reader.rentals.values().filter(|r| r.is_ongoing()) {
                ongoing.insert(reader.id.to_string(), rental.book_id.to_string());
            }
        }
        ongoing
    }

    /// Prune the archive: drop every copy that was never rented, and the
    /// copy counter of each title a copy was dropped for.
    pub fn remove_books(&mut self) {
        let ever_rented: BTreeSet<u32> = self
            .readers
            .values()
            .flat_map(|r| r.rentals.keys().copied())
            .collect();
        let doomed: Vec<u32> = self
            .books
            .keys()
            .filter(|id| !ever_rented.contains(id))
            .copied()
            .collect();

        let mut titles = BTreeSet::new();
        for id in &doomed {
            if let Some(book) = self.books.remove(id) {
                titles.insert(book.title);
            }
        }
        for title in &titles {
            self.num_copies.remove(title);
        }
        info!(
            "removed {} never-rented books across {} titles",
            doomed.len(),
            titles.len()
        );
    }

    /// Display name of the reader with the most rental records.
    ///
    /// Ties go to the reader encountered first in ascending id order. An
    /// empty register is an error.
    pub fn find_book_worm(&self) -> CatalogResult<String> {
        let mut worm: Option<&Reader> = None;
        for reader in self.readers.values() {
            let beats_current = match worm {
                Some(best) => reader.rentals.len() > best.rentals.len(),
                None => true,
            };
            if beats_current {
                worm = Some(reader);
            }
        }
        worm.map(Reader::full_name)
            .ok_or_else(|| CatalogError::NotFound("No readers registered".to_string()))
    }

    /// Cumulative number of rentals started per title
    pub fn rental_counts(&self) -> BTreeMap<String, u32> {
        self.num_rentals.clone()
    }

    fn book(&self, id: &str) -> CatalogResult<&Book> {
        id.parse()
            .ok()
            .and_then(|key: u32| self.books.get(&key))
            .ok_or_else(|| book_not_found(id))
    }

    fn reader(&self, id: &str) -> CatalogResult<&Reader> {
        id.parse()
            .ok()
            .and_then(|key: u32| self.readers.get(&key))
            .ok_or_else(|| reader_not_found(id))
    }
}

impl Default for LibraryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn book_not_found(id: &str) -> CatalogError {
    CatalogError::NotFound(format!("Book with id {} not found", id))
}

fn reader_not_found(id: &str) -> CatalogError {
    CatalogError::NotFound(format!("Reader with id {} not found", id))
}
