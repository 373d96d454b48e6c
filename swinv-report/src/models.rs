//! Pipeline value types
//!
//! All records are plain values owned by one pipeline invocation; nothing
//! here is shared across runs.

use serde::Serialize;

/// One input row as delivered by the spreadsheet reader
///
/// Field names in the export are fixed: `Softwarebezeichnung` (title),
/// `Installationsanzahl` (install count), `Version`.
#[derive(Debug, Clone)]
pub struct RawRecord {
    /// Free-text software title; blank cells arrive as `None`
    pub title: Option<String>,

    /// Number of installations reported for this row
    pub install_count: i64,

    /// Raw version string; blank cells arrive as `None`
    pub version: Option<String>,
}

/// A raw record after title normalization and annotation
#[derive(Debug, Clone)]
pub struct NormalizedRecord {
    /// Canonical title used as the grouping key (trimmed, never blank)
    pub canonical_title: String,

    /// Install count carried through unchanged
    pub install_count: i64,

    /// Derived per-row version annotation; empty when the row has no version
    pub version_annotation: String,
}

/// One output row per distinct canonical title
///
/// Serialized field names match the fixed output column set consumed by the
/// presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct AggregatedRecord {
    /// Canonical software title (grouping key)
    #[serde(rename = "Softwarebezeichnung")]
    pub canonical_title: String,

    /// Software category from the lookup store
    #[serde(rename = "Softwarekategorie")]
    pub category: String,

    /// Owning department from the lookup store
    #[serde(rename = "Fachbereich")]
    pub department: String,

    /// Free-text description from the lookup store
    #[serde(rename = "Softwarebeschreibung")]
    pub description: String,

    /// Sum of install counts over all rows in the group
    #[serde(rename = "Gesamtanzahl")]
    pub total_install_count: i64,

    /// Non-empty version annotations joined with ", " in input order
    #[serde(rename = "Version Details")]
    pub version_details: String,
}
