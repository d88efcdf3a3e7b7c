//! bookshelf - In-memory library catalog with change notifications
//!
//! A catalog of physical and online books driven from an interactive
//! menu. Every mutation is announced to a remote listener over a
//! persistent TCP connection.
//!
//! # Modules
//!
//! - `library`: Book records, the owning Catalog and the curator role
//! - `adapters`: Notification sinks (TCP client, offline logger)
//! - `config`: Listener address and startup options
//! - `cli`: Command-line entry and the interactive menu
//!
//! # Usage
//!
//! ```bash
//! # Start the menu, notifying 127.0.0.1:55555
//! bookshelf
//!
//! # Use another listener, or none at all
//! bookshelf --host 10.0.0.5 --port 6000
//! bookshelf --offline
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod library;

// Re-export main types at crate root for convenience
pub use adapters::{ChangeNotice, LogNotifier, NotificationClient, Notifier, NotifyError};
pub use library::{BookFormat, BookId, BookKind, BookRecord, Catalog, Curator, Librarian, LibraryError, Removal};
