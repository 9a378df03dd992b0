//! Artifact cache for preprocessed real segments.
//!
//! Preprocessing is expensive, so its output is persisted under a directory
//! keyed by the profile fingerprint and reloaded on later runs. The spatial
//! index is cheap to rebuild and is not cached.

use std::fs;
use std::path::{Path, PathBuf};

use geo::{Coord, LineString};
use tracing::info;

use crate::error::{Error, Result};

const SEGMENTS_FILE: &str = "real-segments.json";

pub struct ArtifactCache {
    root: PathBuf,
}

impl ArtifactCache {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn segments_path(&self, fingerprint: &str) -> PathBuf {
        self.root.join(fingerprint).join(SEGMENTS_FILE)
    }

    /// Whether a cached artifact exists for this fingerprint.
    pub fn contains(&self, fingerprint: &str) -> bool {
        self.segments_path(fingerprint).exists()
    }

    /// Load the cached segment list, or `None` if absent. A present but
    /// unreadable artifact is a format error, not a cache miss: silently
    /// rebuilding would mask corruption.
    pub fn load(&self, fingerprint: &str) -> Result<Option<Vec<LineString<f64>>>> {
        let path = self.segments_path(fingerprint);
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)?;
        let raw: Vec<Vec<[f64; 2]>> = serde_json::from_str(&contents).map_err(|e| {
            Error::Format(format!("corrupt cached artifact {}: {e}", path.display()))
        })?;

        let mut segments = Vec::with_capacity(raw.len());
        for (i, coords) in raw.iter().enumerate() {
            if coords.len() < 2 {
                return Err(Error::Format(format!(
                    "corrupt cached artifact {}: segment {i} has {} vertices",
                    path.display(),
                    coords.len()
                )));
            }
            segments.push(LineString::new(
                coords.iter().map(|&[x, y]| Coord { x, y }).collect(),
            ));
        }

        info!("Loaded {} cached real segments", segments.len());
        Ok(Some(segments))
    }

    /// Persist the segment list for this fingerprint.
    pub fn store(&self, fingerprint: &str, segments: &[LineString<f64>]) -> Result<()> {
        let path = self.segments_path(fingerprint);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let raw: Vec<Vec<[f64; 2]>> = segments
            .iter()
            .map(|segment| segment.0.iter().map(|c| [c.x, c.y]).collect())
            .collect();
        fs::write(&path, serde_json::to_string(&raw)?)?;

        info!("Stored {} real segments in {}", segments.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(coords: &[(f64, f64)]) -> LineString<f64> {
        coords.iter().map(|&(x, y)| Coord { x, y }).collect()
    }

    #[test]
    fn round_trips_the_segment_list() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ArtifactCache::new(dir.path());

        let segments = vec![
            line(&[(0.0, 0.0), (5.0, 0.0)]),
            line(&[(5.0, 0.0), (5.0, 5.0), (6.0, 6.0)]),
        ];
        cache.store("abc123", &segments).unwrap();

        assert!(cache.contains("abc123"));
        let loaded = cache.load("abc123").unwrap().unwrap();
        assert_eq!(loaded, segments);
    }

    #[test]
    fn absent_fingerprint_is_a_miss_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ArtifactCache::new(dir.path());

        assert!(!cache.contains("missing"));
        assert!(cache.load("missing").unwrap().is_none());
    }

    #[test]
    fn corrupt_artifact_is_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ArtifactCache::new(dir.path());

        let target = dir.path().join("bad");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join(SEGMENTS_FILE), "not json at all").unwrap();

        let err = cache.load("bad").unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn degenerate_cached_segment_is_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ArtifactCache::new(dir.path());

        let target = dir.path().join("short");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join(SEGMENTS_FILE), "[[[1.0, 2.0]]]").unwrap();

        let err = cache.load("short").unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }
}
