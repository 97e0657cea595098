//! Index type and index parameter validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::error::{Error, Result};

/// Build-parameter keys accepted by the server.
pub const VALID_INDEX_PARAMS_KEYS: [&str; 7] =
    ["nlist", "m", "nbits", "M", "efConstruction", "PQM", "n_trees"];

/// Metrics usable with binary indexes.
pub const VALID_BINARY_METRIC_TYPES: [&str; 5] =
    ["JACCARD", "HAMMING", "TANIMOTO", "SUBSTRUCTURE", "SUPERSTRUCTURE"];

/// Supported index types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum IndexType {
    /// GPU brute force.
    GpuFlat,
    /// GPU inverted file.
    GpuIvfFlat,
    /// GPU inverted file, scalar quantized.
    GpuIvfSq8,
    /// GPU inverted file, product quantized.
    GpuIvfPq,
    /// RAFT inverted file.
    RaftIvfFlat,
    /// RAFT inverted file, product quantized.
    RaftIvfPq,
    /// Brute force.
    Flat,
    /// Inverted file.
    IvfFlat,
    /// Inverted file, scalar quantized.
    IvfSq8,
    /// Inverted file, product quantized.
    IvfPq,
    /// Hierarchical navigable small world graph.
    Hnsw,
    /// Random projection trees.
    Annoy,
    /// Binary brute force.
    BinFlat,
    /// Binary inverted file.
    BinIvfFlat,
    /// On-disk graph index.
    DiskAnn,
    /// Server-selected index.
    AutoIndex,
}

impl IndexType {
    /// Every supported index type.
    pub const ALL: [Self; 16] = [
        Self::GpuFlat,
        Self::GpuIvfFlat,
        Self::GpuIvfSq8,
        Self::GpuIvfPq,
        Self::RaftIvfFlat,
        Self::RaftIvfPq,
        Self::Flat,
        Self::IvfFlat,
        Self::IvfSq8,
        Self::IvfPq,
        Self::Hnsw,
        Self::Annoy,
        Self::BinFlat,
        Self::BinIvfFlat,
        Self::DiskAnn,
        Self::AutoIndex,
    ];

    /// Wire name of the index type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GpuFlat => "GPU_FLAT",
            Self::GpuIvfFlat => "GPU_IVF_FLAT",
            Self::GpuIvfSq8 => "GPU_IVF_SQ8",
            Self::GpuIvfPq => "GPU_IVF_PQ",
            Self::RaftIvfFlat => "RAFT_IVF_FLAT",
            Self::RaftIvfPq => "RAFT_IVF_PQ",
            Self::Flat => "FLAT",
            Self::IvfFlat => "IVF_FLAT",
            Self::IvfSq8 => "IVF_SQ8",
            Self::IvfPq => "IVF_PQ",
            Self::Hnsw => "HNSW",
            Self::Annoy => "ANNOY",
            Self::BinFlat => "BIN_FLAT",
            Self::BinIvfFlat => "BIN_IVF_FLAT",
            Self::DiskAnn => "DISKANN",
            Self::AutoIndex => "AUTOINDEX",
        }
    }

    /// Returns true for indexes over binary vectors.
    #[must_use]
    pub const fn is_binary(self) -> bool {
        matches!(self, Self::BinFlat | Self::BinIvfFlat)
    }
}

impl fmt::Display for IndexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndexType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::InvalidArgument(format!("invalid index type '{s}'")))
    }
}

impl TryFrom<String> for IndexType {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<IndexType> for String {
    fn from(t: IndexType) -> Self {
        t.as_str().to_string()
    }
}

/// Returns true if `name` is a supported index type.
#[must_use]
pub fn is_valid_index_type(name: &str) -> bool {
    name.parse::<IndexType>().is_ok()
}

/// Returns true if `key` is an accepted build parameter (case sensitive).
#[must_use]
pub fn is_valid_index_params_key(key: &str) -> bool {
    VALID_INDEX_PARAMS_KEYS.contains(&key)
}

/// Returns true if `metric` can be used with a binary index.
#[must_use]
pub fn is_valid_binary_metric_type(metric: &str) -> bool {
    VALID_BINARY_METRIC_TYPES.contains(&metric)
}

/// Checks build parameters and metric for an index.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] naming the first unknown parameter
/// key, or the metric if a binary index is paired with a non-binary metric.
pub fn validate_index_params(
    index_type: IndexType,
    metric_type: &str,
    params: &Map<String, JsonValue>,
) -> Result<()> {
    if let Some(key) = params.keys().find(|k| !is_valid_index_params_key(k)) {
        return Err(Error::InvalidArgument(format!(
            "invalid index parameter '{key}' for {index_type}"
        )));
    }

    if index_type.is_binary() && !is_valid_binary_metric_type(metric_type) {
        return Err(Error::InvalidArgument(format!(
            "metric type '{metric_type}' is not valid for binary index {index_type}"
        )));
    }

    Ok(())
}
