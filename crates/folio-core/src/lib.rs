//! Folio Core Library
//!
//! Configuration, error handling, the page metadata registry and content
//! store primitives for the Folio portfolio site.

pub mod config;
pub mod content;
pub mod error;
pub mod frontmatter;
pub mod pages;

pub use config::{Config, InvalidPolicy};
pub use content::{ContentKind, ContentPath, Slug, SourceFormat};
pub use error::{CoreError, Result};
pub use frontmatter::RawRecord;
pub use pages::{PageId, PageMeta, lookup};
