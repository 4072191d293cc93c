//! Candidate discovery: walk a directory, keep the files whose name matches a
//! pattern, and optionally re-order them by a number embedded in the name.

use std::cmp::Ordering;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use walkdir::WalkDir;

use crate::error::DiscoveryError;

pub const DEFAULT_PATTERN: &str = "*snr*.png";

static SNR_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"snr_(.+?)_rank").expect("valid snr regex"));
static RANK_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"rank_(.+?)\.png").expect("valid rank regex"));

/// Numeric token used to re-order candidates, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Signal-to-noise ratio, `snr_<x>_rank`.
    Snr,
    /// Candidate rank, `rank_<x>.png`.
    Rank,
}

impl SortKey {
    fn name(self) -> &'static str {
        match self {
            SortKey::Snr => "snr",
            SortKey::Rank => "rank",
        }
    }

    fn regex(self) -> &'static Regex {
        match self {
            SortKey::Snr => &SNR_TOKEN,
            SortKey::Rank => &RANK_TOKEN,
        }
    }

    /// Extract this key's number from the file name of `item`.
    pub fn extract(self, item: &str) -> Result<f64, DiscoveryError> {
        let name = Path::new(item)
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        self.regex()
            .captures(&name)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .ok_or_else(|| DiscoveryError::MissingSortToken {
                key: self.name(),
                path: item.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// File-name pattern; `*` matches any run of characters.
    pub pattern: String,
    /// Sorts applied one after another, each stable and descending.
    pub sort_keys: Vec<SortKey>,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            sort_keys: Vec::new(),
        }
    }
}

/// Recursively list candidate files under `root`.
///
/// The result is sorted by path, then re-ordered by each of `opts.sort_keys`.
pub fn discover(root: impl AsRef<Path>, opts: &DiscoveryOptions) -> Result<Vec<String>, DiscoveryError> {
    let root = root.as_ref();
    if !root.exists() {
        return Err(DiscoveryError::MissingRoot(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(DiscoveryError::NotADirectory(root.to_path_buf()));
    }
    let matcher = pattern_regex(&opts.pattern)?;

    let mut items: Vec<String> = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!("walkdir error: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if matcher.is_match(&name) {
            items.push(entry.path().to_string_lossy().into_owned());
        }
    }
    items.sort();

    for key in &opts.sort_keys {
        sort_by_key(&mut items, *key)?;
    }
    tracing::info!("Found {} candidates under {}", items.len(), root.display());
    Ok(items)
}

/// Stable descending sort on `key`. Fails without reordering if any item
/// lacks the token.
pub fn sort_by_key(items: &mut [String], key: SortKey) -> Result<(), DiscoveryError> {
    let mut keyed = items
        .iter()
        .map(|item| Ok((key.extract(item)?, item.clone())))
        .collect::<Result<Vec<(f64, String)>, DiscoveryError>>()?;
    keyed.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
    for (slot, (_, item)) in items.iter_mut().zip(keyed) {
        *slot = item;
    }
    Ok(())
}

fn pattern_regex(pattern: &str) -> Result<Regex, DiscoveryError> {
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    Regex::new(&format!("^{body}$")).map_err(|source| DiscoveryError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}
