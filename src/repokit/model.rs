use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Component, Path};

use crate::inventory::FileStats;

pub const UNCATEGORISED: &str = "Uncategorised";
pub const DEFAULT_DATA_ROOT: &str = "data";

/// One tracked dataset: a file or a folder registered in the provenance store.
///
/// `file_formats`, `number_of_files`, `total_size_mb` and `data_size` are derived
/// from `data_files` at registration time and never authored directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRecord {
    pub data_name: String,
    #[serde(default = "default_data_type")]
    pub data_type: String,
    pub destination: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    pub number_of_files: usize,
    pub total_size_mb: f64,
    pub file_formats: BTreeSet<String>,
    pub data_files: Vec<String>,
    pub data_size: Vec<f64>,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "DOI", default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn default_data_type() -> String {
    UNCATEGORISED.to_string()
}

/// Descriptive metadata passed through to the record without validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Citation {
    pub doi: Option<String>,
    pub citation: Option<String>,
    pub license: Option<String>,
    pub notes: Option<String>,
}

impl DatasetRecord {
    pub fn new(
        data_name: String,
        destination: String,
        data_files: Vec<String>,
        stats: FileStats,
    ) -> Self {
        Self {
            data_type: data_type_from_path(&destination, DEFAULT_DATA_ROOT),
            data_name,
            destination,
            source: None,
            run_command: None,
            hash: None,
            number_of_files: stats.count,
            total_size_mb: stats.total_size_mb,
            file_formats: stats.formats,
            data_files,
            data_size: stats.sizes_mb,
            timestamp: Utc::now(),
            doi: None,
            citation: None,
            license: None,
            notes: None,
        }
    }

    /// Re-derive `data_type` against a configured data root.
    pub fn under_data_root(mut self, data_root: &str) -> Self {
        self.data_type = data_type_from_path(&self.destination, data_root);
        self
    }

    pub fn with_citation(mut self, citation: Citation) -> Self {
        self.doi = citation.doi;
        self.citation = citation.citation;
        self.license = citation.license;
        self.notes = citation.notes;
        self
    }

    pub fn key(&self) -> RecordKey<'_> {
        RecordKey {
            data_name: &self.data_name,
            destination: &self.destination,
            hash: self.hash.as_deref().filter(|h| !h.is_empty()),
        }
    }

    /// "Provided" records ship their files; the rest must be re-created from the run command.
    pub fn is_provided(&self) -> bool {
        !self.data_files.is_empty()
    }
}

/// Upsert identity of a record. An empty hash counts as no hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordKey<'a> {
    pub data_name: &'a str,
    pub destination: &'a str,
    pub hash: Option<&'a str>,
}

/// The folder right below `data_root` that a destination lives in (`raw`,
/// `processed`, ...). The root matches anywhere in the destination, so an
/// absolute destination inside the project still resolves.
pub fn data_type_from_path(destination: &str, data_root: &str) -> String {
    let parts = normal_components(destination);
    let root = normal_components(data_root);

    let below = if root.is_empty() {
        parts.first()
    } else {
        parts
            .windows(root.len())
            .position(|w| w == root.as_slice())
            .and_then(|i| parts.get(i + root.len()))
    };
    below.cloned().unwrap_or_else(default_data_type)
}

fn normal_components(path: &str) -> Vec<String> {
    let normalized = path.replace('\\', "/");
    Path::new(&normalized)
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => s.to_str().map(String::from),
            _ => None,
        })
        .collect()
}

/// Make an auto-derived dataset name safe to use as a folder name.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            ' ' | '/' | '\\' | ':' => '_',
            c => c,
        })
        .collect()
}
