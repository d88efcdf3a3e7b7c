//! Catalog owning every book record.
//!
//! Records keep insertion order; the back of the sequence is the newest
//! book. Lookups never fail, they return `None` on a miss.

use super::book::{BookFormat, BookId, BookKind, BookRecord, LiveCount};

/// Outcome of [`Catalog::remove_by_identity`]
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The record was removed and dropped
    Removed,

    /// No record with that identity is in the catalog
    NotFound,
}

impl Removal {
    pub fn is_removed(self) -> bool {
        self == Removal::Removed
    }
}

/// Catalog of book records
#[derive(Debug, Default)]
pub struct Catalog {
    /// Records in insertion order
    books: Vec<BookRecord>,

    /// Live records constructed through this catalog
    live: LiveCount,
}

impl Catalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a physical book counted by this catalog (not yet added)
    pub fn physical(
        &self,
        title: impl Into<String>,
        author: impl Into<String>,
        shelf_number: u32,
    ) -> BookRecord {
        BookRecord::new(&self.live, title, author, BookFormat::Physical { shelf_number })
    }

    /// Construct an online book counted by this catalog (not yet added)
    pub fn online(
        &self,
        title: impl Into<String>,
        author: impl Into<String>,
        url: impl Into<String>,
    ) -> BookRecord {
        BookRecord::new(&self.live, title, author, BookFormat::Online { url: url.into() })
    }

    /// Append a record to the end of the catalog
    pub fn add(&mut self, mut record: BookRecord) -> BookId {
        record.rebind(&self.live);
        let id = record.id();
        self.books.push(record);
        id
    }

    /// All records in insertion order
    pub fn list_all(&self) -> impl Iterator<Item = &BookRecord> + '_ {
        self.books.iter()
    }

    /// Records of one kind, in insertion order
    pub fn list_by_kind(&self, kind: BookKind) -> impl Iterator<Item = &BookRecord> + '_ {
        self.books.iter().filter(move |book| book.kind() == kind)
    }

    /// Records matching a kind name ("Physical", "OnlineBook", ...).
    ///
    /// An unknown name yields nothing.
    pub fn list_by_variant(&self, tag: &str) -> impl Iterator<Item = &BookRecord> + '_ {
        let kind = BookKind::from_variant_tag(tag);
        self.books
            .iter()
            .filter(move |book| Some(book.kind()) == kind)
    }

    /// First record whose title matches exactly
    pub fn find_first_by_title(&self, title: &str) -> Option<&BookRecord> {
        self.books.iter().find(|book| book.title() == title)
    }

    /// First record whose author matches exactly
    pub fn find_first_by_author(&self, author: &str) -> Option<&BookRecord> {
        self.books.iter().find(|book| book.author() == author)
    }

    /// Get a record by identity
    pub fn get(&self, id: BookId) -> Option<&BookRecord> {
        self.books.iter().find(|book| book.id() == id)
    }

    /// Get a mutable record by identity (fields stay curator-only)
    pub fn get_mut(&mut self, id: BookId) -> Option<&mut BookRecord> {
        self.books.iter_mut().find(|book| book.id() == id)
    }

    /// Remove and drop the record with this identity
    pub fn remove_by_identity(&mut self, id: BookId) -> Removal {
        match self.books.iter().position(|book| book.id() == id) {
            Some(pos) => {
                drop(self.books.remove(pos));
                Removal::Removed
            }
            None => Removal::NotFound,
        }
    }

    /// The newest record, if any
    pub fn most_recently_added(&self) -> Option<&BookRecord> {
        self.books.last()
    }

    /// Number of live records constructed through this catalog.
    ///
    /// Counts records that were built but never added, or are still held
    /// elsewhere; see [`Catalog::len`] for the sequence length.
    pub fn count(&self) -> usize {
        self.live.get()
    }

    /// Number of records in the catalog
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
