//! Inventory aggregation
//!
//! Reduces normalized rows into one record per canonical title: install
//! counts are summed, version annotations joined in input order, and the
//! categorical metadata of the group's first row carried through.

use crate::annotate::build_version_annotation;
use crate::models::{AggregatedRecord, NormalizedRecord, RawRecord};
use crate::normalizer::normalize;
use async_trait::async_trait;
use std::collections::HashMap;
use swinv_common::db::MetadataTriple;
use swinv_common::Result;
use tracing::{debug, error};

/// Metadata-lookup collaborator
///
/// One keyed query per canonical title. Implementations must not retry:
/// the aggregator treats any error as a miss for that row and continues
/// (fail-fast-to-default, never fail-the-batch).
#[async_trait]
pub trait MetadataLookup: Send + Sync {
    /// Query categorical metadata for one canonical title
    async fn fetch(&self, title: &str) -> Result<MetadataTriple>;
}

/// Batch aggregator over raw inventory rows
pub struct InventoryAggregator<L: MetadataLookup> {
    lookup: L,
}

impl<L: MetadataLookup> InventoryAggregator<L> {
    /// Create an aggregator around a lookup collaborator
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    /// Normalize, enrich and reduce the input rows.
    ///
    /// Rows whose title normalizes to the empty string are unusable data
    /// and silently dropped. Group order is first-seen order of the
    /// canonical titles. Each call is independent and reentrant; lookups
    /// run once per surviving row, and a failing lookup degrades that row
    /// to empty metadata without touching its siblings.
    pub async fn aggregate(&self, rows: &[RawRecord]) -> Vec<AggregatedRecord> {
        let normalized = normalize_rows(rows);

        let mut index: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<AggregatedRecord> = Vec::new();

        for row in normalized {
            let metadata = match self.lookup.fetch(&row.canonical_title).await {
                Ok(triple) => triple,
                Err(e) => {
                    error!(
                        title = %row.canonical_title,
                        error = %e,
                        "Metadata lookup failed, continuing with empty metadata"
                    );
                    MetadataTriple::default()
                }
            };

            match index.get(&row.canonical_title) {
                Some(&i) => {
                    let group = &mut groups[i];
                    group.total_install_count += row.install_count;
                    // Empty annotations are skipped, not joined as blanks
                    if !row.version_annotation.is_empty() {
                        if !group.version_details.is_empty() {
                            group.version_details.push_str(", ");
                        }
                        group.version_details.push_str(&row.version_annotation);
                    }
                }
                None => {
                    index.insert(row.canonical_title.clone(), groups.len());
                    // Metadata comes from the group's first row; later
                    // rows still query, but their result is not applied
                    groups.push(AggregatedRecord {
                        canonical_title: row.canonical_title,
                        category: metadata.category,
                        department: metadata.department,
                        description: metadata.description,
                        total_install_count: row.install_count,
                        version_details: row.version_annotation,
                    });
                }
            }
        }

        groups
    }
}

/// Normalize titles and build per-row annotations, dropping rows whose
/// title dissolves to nothing
fn normalize_rows(rows: &[RawRecord]) -> Vec<NormalizedRecord> {
    let mut normalized = Vec::with_capacity(rows.len());
    let mut dropped = 0usize;

    for row in rows {
        let canonical_title = normalize(row.title.as_deref());
        if canonical_title.is_empty() {
            dropped += 1;
            continue;
        }

        let version_annotation = build_version_annotation(
            &canonical_title,
            row.install_count,
            row.version.as_deref(),
        );

        normalized.push(NormalizedRecord {
            canonical_title,
            install_count: row.install_count,
            version_annotation,
        });
    }

    if dropped > 0 {
        debug!(dropped, "Dropped rows with empty canonical title");
    }

    normalized
}
