//! Privileged rewrites of record identity fields.
//!
//! Readers get `&BookRecord` and can only inspect it. Title and author are
//! rewritten through the [`Curator`] capability, implemented by
//! [`Librarian`].

use super::BookRecord;

/// Capability to rewrite a record's title and author
pub trait Curator {
    /// Overwrite the title in place (no validation, empty allowed)
    fn rename_title(&self, record: &mut BookRecord, new_title: &str);

    /// Overwrite the author in place (no validation, empty allowed)
    fn rename_author(&self, record: &mut BookRecord, new_author: &str);
}

/// The curator role
#[derive(Debug, Clone, Copy, Default)]
pub struct Librarian;

impl Librarian {
    pub fn new() -> Self {
        Self
    }
}

impl Curator for Librarian {
    fn rename_title(&self, record: &mut BookRecord, new_title: &str) {
        record.set_title(new_title.to_string());
    }

    fn rename_author(&self, record: &mut BookRecord, new_author: &str) {
        record.set_author(new_author.to_string());
    }
}
