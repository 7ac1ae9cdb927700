//! JSON snapshot save/load for a whole catalogue.
//!
//! # Responsibility
//! - Serialize summaries in insertion order with the table capacities.
//! - Replay a snapshot through `CatalogIndex::add` to rebuild every index.
//!
//! # Invariants
//! - Writes go to a unique temporary sibling, then rename over the target.
//! - `load_snapshot` never fails; it logs and returns an empty catalogue.
//! - Bucket counts come from the caller's config; stored counts are informational.

use super::{SnapshotError, SnapshotResult};
use crate::catalog::index::CatalogIndex;
use crate::config::CatalogConfig;
use crate::model::summary::Summary;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use uuid::Uuid;

/// Version tag written into every snapshot document.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct SnapshotOut<'a> {
    format_version: u32,
    title_buckets: usize,
    keyword_buckets: usize,
    summaries: Vec<&'a Summary>,
}

#[derive(Deserialize)]
struct SnapshotIn {
    format_version: u32,
    #[serde(default)]
    title_buckets: usize,
    #[serde(default)]
    keyword_buckets: usize,
    summaries: Vec<Summary>,
}

/// Writes `catalog` to `path` as a JSON snapshot.
///
/// # Side effects
/// - Creates missing parent directories.
/// - Emits `snapshot_save` logging events with duration and status.
///
/// # Errors
/// - [`SnapshotError::Encode`] when serialization fails.
/// - [`SnapshotError::Io`] when writing or renaming fails.
pub fn save_snapshot(catalog: &CatalogIndex, path: impl AsRef<Path>) -> SnapshotResult<()> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=snapshot_save module=store status=start");

    match write_snapshot(catalog, path) {
        Ok(bytes) => {
            info!(
                "event=snapshot_save module=store status=ok duration_ms={} summaries={} bytes={}",
                started_at.elapsed().as_millis(),
                catalog.len(),
                bytes
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=snapshot_save module=store status=error duration_ms={} error_code=snapshot_save_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Reads a snapshot from `path` and rebuilds a catalogue sized by `config`.
///
/// # Errors
/// - [`SnapshotError::Io`] when the file is missing or unreadable.
/// - [`SnapshotError::Decode`] when the content is not a snapshot document
///   or a stored summary fails validation.
/// - [`SnapshotError::Validation`] for unknown versions or duplicate titles.
pub fn try_load_snapshot(
    path: impl AsRef<Path>,
    config: &CatalogConfig,
) -> SnapshotResult<CatalogIndex> {
    let raw = fs::read(path.as_ref())?;
    let document: SnapshotIn = serde_json::from_slice(&raw).map_err(SnapshotError::Decode)?;

    if document.format_version != SNAPSHOT_FORMAT_VERSION {
        return Err(SnapshotError::Validation(format!(
            "snapshot format version {} is not supported (expected {})",
            document.format_version, SNAPSHOT_FORMAT_VERSION
        )));
    }

    if document.title_buckets != config.title_buckets
        || document.keyword_buckets != config.keyword_buckets
    {
        info!(
            "event=snapshot_load module=store status=resized stored_title_buckets={} stored_keyword_buckets={}",
            document.title_buckets, document.keyword_buckets
        );
    }

    let mut catalog = CatalogIndex::new(config);
    for summary in document.summaries {
        if catalog.find_by_title(summary.title()).is_some() {
            return Err(SnapshotError::Validation(format!(
                "duplicate title `{}`",
                summary.title()
            )));
        }
        catalog.add(summary);
    }
    Ok(catalog)
}

/// Loads a catalogue from `path`, or an empty one when that is impossible.
///
/// # Side effects
/// - Emits `snapshot_load` logging events with duration and status.
pub fn load_snapshot(path: impl AsRef<Path>, config: &CatalogConfig) -> CatalogIndex {
    let started_at = Instant::now();
    info!("event=snapshot_load module=store status=start");

    match try_load_snapshot(path, config) {
        Ok(catalog) => {
            info!(
                "event=snapshot_load module=store status=ok duration_ms={} summaries={}",
                started_at.elapsed().as_millis(),
                catalog.len()
            );
            catalog
        }
        Err(err) if err.is_missing_file() => {
            info!(
                "event=snapshot_load module=store status=skipped duration_ms={} reason=missing_file",
                started_at.elapsed().as_millis()
            );
            CatalogIndex::new(config)
        }
        Err(err) => {
            warn!(
                "event=snapshot_load module=store status=error duration_ms={} error_code=snapshot_load_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            CatalogIndex::new(config)
        }
    }
}

fn write_snapshot(catalog: &CatalogIndex, path: &Path) -> SnapshotResult<usize> {
    let document = SnapshotOut {
        format_version: SNAPSHOT_FORMAT_VERSION,
        title_buckets: catalog.title_bucket_count(),
        keyword_buckets: catalog.keyword_bucket_count(),
        summaries: catalog.summaries_in_insertion_order(),
    };
    let encoded = serde_json::to_vec_pretty(&document).map_err(SnapshotError::Encode)?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let staging = staging_path(path);
    if let Err(err) = fs::write(&staging, &encoded).and_then(|()| fs::rename(&staging, path)) {
        let _ = fs::remove_file(&staging);
        return Err(err.into());
    }
    Ok(encoded.len())
}

fn staging_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "snapshot".to_string());
    path.with_file_name(format!(".{file_name}.{}.tmp", Uuid::new_v4()))
}
