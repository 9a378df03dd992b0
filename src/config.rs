//! Configuration profiles: one per city, naming the two source files.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh64::xxh64;

use crate::nearest::MIN_SIZE;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Where derived artifacts are cached, keyed by profile fingerprint
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
    pub profiles: BTreeMap<String, CityProfile>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CityProfile {
    /// GeoJSON road-network file (one feature per edge)
    pub street_network: PathBuf,
    /// CSV mapping street_edge_id -> street_name
    pub edge_names: PathBuf,
    /// Query-window half-width in degrees. A property of the dataset's edge
    /// density: must be large enough that every query window reaches at
    /// least one sub-edge.
    #[serde(default = "default_window_half_width")]
    pub window_half_width: f64,
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("intermediates")
}

fn default_window_half_width() -> f64 {
    MIN_SIZE
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

impl CityProfile {
    /// Stable fingerprint over the profile contents, used as the artifact
    /// cache key. Any change to the sources or the window size invalidates
    /// cached segments.
    pub fn fingerprint(&self) -> String {
        // Serialization of a struct with a fixed field order is canonical
        let serialized = serde_json::to_string(self).unwrap_or_default();
        format!("{:016x}", xxh64(serialized.as_bytes(), 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_a_profile_table() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
cache_dir = "/tmp/wayside-cache"

[profiles.seattle]
street_network = "roads-for-cv-seattle.geojson"
edge_names = "street-edge-name-seattle.csv"

[profiles.chicago]
street_network = "roads-chicago.geojson"
edge_names = "names-chicago.csv"
window_half_width = 0.001
"#
        )
        .unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.cache_dir, PathBuf::from("/tmp/wayside-cache"));
        assert_eq!(config.profiles.len(), 2);
        assert_eq!(config.profiles["seattle"].window_half_width, MIN_SIZE);
        assert_eq!(config.profiles["chicago"].window_half_width, 0.001);
    }

    #[test]
    fn fingerprint_is_stable_and_input_sensitive() {
        let profile = CityProfile {
            street_network: PathBuf::from("roads.geojson"),
            edge_names: PathBuf::from("names.csv"),
            window_half_width: MIN_SIZE,
        };
        assert_eq!(profile.fingerprint(), profile.fingerprint());

        let mut other = profile.clone();
        other.edge_names = PathBuf::from("other-names.csv");
        assert_ne!(profile.fingerprint(), other.fingerprint());

        let mut wider = profile.clone();
        wider.window_half_width = 0.01;
        assert_ne!(profile.fingerprint(), wider.fingerprint());
    }
}
