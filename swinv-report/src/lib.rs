//! swinv-report library - inventory normalization and aggregation pipeline
//!
//! Turns a spreadsheet export of installed-software records into one
//! consolidated row per canonical title: titles are normalized through an
//! ordered regex chain, enriched from the metadata store, and duplicate
//! titles reduced by summing counts and joining version annotations.

pub mod aggregate;
pub mod annotate;
pub mod lookup;
pub mod models;
pub mod normalizer;
pub mod reader;
pub mod render;

pub use aggregate::{InventoryAggregator, MetadataLookup};
pub use models::{AggregatedRecord, RawRecord};
pub use normalizer::normalize;
