//! Human-readable descriptions of catalog changes.

use std::fmt;

use crate::library::BookKind;

/// A catalog mutation to announce
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeNotice {
    Added {
        kind: BookKind,
        title: String,
        author: String,
    },
    Deleted {
        title: String,
        author: String,
    },
    TitleChanged {
        from: String,
        to: String,
    },
    AuthorChanged {
        from: String,
        to: String,
    },
}

impl fmt::Display for ChangeNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeNotice::Added { kind, title, author } => write!(
                f,
                "New {} Book added to library titled: {}, author: {}",
                kind, title, author
            ),
            ChangeNotice::Deleted { title, author } => write!(
                f,
                "Deleted book from library titled: {}, author: {}",
                title, author
            ),
            ChangeNotice::TitleChanged { from, to } => {
                write!(f, "Book title updated in library from: {}, to: {}", from, to)
            }
            ChangeNotice::AuthorChanged { from, to } => {
                write!(f, "Book author updated in library from: {}, to: {}", from, to)
            }
        }
    }
}
