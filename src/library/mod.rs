//! In-memory book catalog.
//!
//! - `book`: records, kinds and the live-record counter
//! - `catalog`: the owning collection and its lookups
//! - `curation`: the curator capability for renaming records

pub mod book;
pub mod catalog;
pub mod curation;

use thiserror::Error;

pub use book::{BookFormat, BookId, BookKind, BookRecord, LiveCount};
pub use catalog::{Catalog, Removal};
pub use curation::{Curator, Librarian};

/// Domain errors for the library.
///
/// No catalog operation produces one today; misses are reported with
/// `Option` and [`Removal`].
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("{0}")]
    Message(String),
}
