//! Book records held by the catalog.
//!
//! A record is either a physical book on a shelf or an online book behind
//! a URL. Title and author are readable by anyone; only the curator can
//! rewrite them (see [`crate::library::curation`]).

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use uuid::Uuid;

/// Identity of a book record (UUID v4, assigned at construction)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookId(Uuid);

impl BookId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind tag of a book record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookKind {
    /// Shelved physical copy
    Physical,

    /// Book available at a URL
    Online,
}

impl fmt::Display for BookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookKind::Physical => write!(f, "Physical"),
            BookKind::Online => write!(f, "Online"),
        }
    }
}

impl BookKind {
    /// Match a variant tag: `Physical`, `PhysicalBook`, `Online` or
    /// `OnlineBook`, ignoring ASCII case. Anything else is `None`.
    pub fn from_variant_tag(tag: &str) -> Option<Self> {
        const TAGS: [(&str, BookKind); 4] = [
            ("Physical", BookKind::Physical),
            ("PhysicalBook", BookKind::Physical),
            ("Online", BookKind::Online),
            ("OnlineBook", BookKind::Online),
        ];

        TAGS.iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(tag))
            .map(|&(_, kind)| kind)
    }
}

/// Variant-specific location data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookFormat {
    Physical { shelf_number: u32 },
    Online { url: String },
}

impl BookFormat {
    /// Kind tag of this format
    pub fn kind(&self) -> BookKind {
        match self {
            BookFormat::Physical { .. } => BookKind::Physical,
            BookFormat::Online { .. } => BookKind::Online,
        }
    }
}

impl fmt::Display for BookFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookFormat::Physical { shelf_number } => write!(f, "Shelf Number: {}", shelf_number),
            BookFormat::Online { url } => write!(f, "Url: {}", url),
        }
    }
}

/// Counter of live book records.
///
/// Incremented when a record is constructed and decremented when it is
/// dropped, whether or not the record ever sat in a catalog.
#[derive(Debug, Clone, Default)]
pub struct LiveCount(Arc<AtomicUsize>);

impl LiveCount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current number of live records
    pub fn get(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }

    fn token(&self) -> LiveToken {
        self.0.fetch_add(1, Ordering::Relaxed);
        LiveToken(Arc::clone(&self.0))
    }

    fn tracks(&self, token: &LiveToken) -> bool {
        Arc::ptr_eq(&self.0, &token.0)
    }
}

/// Membership of one record in a [`LiveCount`]; decrements on drop.
#[derive(Debug)]
struct LiveToken(Arc<AtomicUsize>);

impl Drop for LiveToken {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}

/// A physical or online book.
///
/// Not `Clone`: every record has one owner and a unique [`BookId`].
#[derive(Debug)]
pub struct BookRecord {
    id: BookId,
    title: String,
    author: String,
    format: BookFormat,
    live: LiveToken,
}

impl BookRecord {
    /// Construct a record counted by `live`
    pub fn new(
        live: &LiveCount,
        title: impl Into<String>,
        author: impl Into<String>,
        format: BookFormat,
    ) -> Self {
        Self {
            id: BookId::generate(),
            title: title.into(),
            author: author.into(),
            format,
            live: live.token(),
        }
    }

    pub fn id(&self) -> BookId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn format(&self) -> &BookFormat {
        &self.format
    }

    pub fn kind(&self) -> BookKind {
        self.format.kind()
    }

    pub(crate) fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub(crate) fn set_author(&mut self, author: String) {
        self.author = author;
    }

    /// Move this record's membership to `live` if it is counted elsewhere
    pub(crate) fn rebind(&mut self, live: &LiveCount) {
        if !live.tracks(&self.live) {
            // Old token drops here, decrementing the previous counter
            self.live = live.token();
        }
    }
}

impl fmt::Display for BookRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title: {}, Author: {}", self.title, self.author)?;
        write!(f, "{}", self.format)
    }
}
