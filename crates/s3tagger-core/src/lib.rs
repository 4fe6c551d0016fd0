//! Bucket tag auditing and bulk tag application for s3tagger.
//!
//! This crate holds everything that does not depend on a concrete storage
//! backend: the tabular data model shared with CSV I/O, the [`StorageClient`]
//! seam with its closed [`StorageError`] set, and the two operations built on
//! top of it.
//!
//! # Architecture
//!
//! ```text
//! StorageClient ──> read_tags  ──> Table ──> CSV sink
//! CSV source ──> Table ──> write_tags ──> StorageClient
//! ```
//!
//! The read path enumerates buckets, keeps the ones in the target region and
//! projects their tags into a [`Table`]. The write path merges a table's
//! values into each bucket's current tag set and replaces it.

pub mod client;
pub mod config;
pub mod error;
pub mod memory;
mod read;
pub mod table;
pub mod tags;
mod types;
mod write;

pub use client::{StorageClient, StorageError};
pub use config::{ErrorPolicy, TaggerConfig};
pub use error::{TaggerError, TaggerResult, handle_write_error};
pub use memory::InMemoryStorage;
pub use read::read_tags;
pub use table::{NAME_COLUMN, Table, parse_tag_keys};
pub use tags::{Tag, TagSet};
pub use types::AwsRegion;
pub use write::{WriteSummary, write_tags};
