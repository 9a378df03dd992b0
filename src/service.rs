//! Public entry points: one-shot preprocessing and the query service.
//!
//! The service owns everything a query needs — the immutable segment list,
//! the spatial index, and an optional result cache — so queries take `&self`
//! and can run concurrently without locking anything but the cache.

use std::sync::Mutex;

use geo::{Coord, LineString};
use hashbrown::HashMap;
use tracing::info;

use crate::cache::ArtifactCache;
use crate::config::CityProfile;
use crate::detect::detect_intersections;
use crate::error::{Error, Result};
use crate::index::SegmentIndex;
use crate::loading::{load_edge_names, load_street_network};
use crate::model::ProximityResult;
use crate::nearest::nearest_segment;
use crate::proximity::proximity;
use crate::split::build_real_segments;

/// Inserts stop past this point; the cache is a memo, not an LRU.
const RESULT_CACHE_CAP: usize = 65_536;

/// Run the full preprocessing batch for a profile: load sources, detect
/// intersections, split streets into real segments.
pub fn preprocess(profile: &CityProfile) -> Result<Vec<LineString<f64>>> {
    if !profile.street_network.exists() {
        return Err(Error::Config(format!(
            "street network file not found: {}",
            profile.street_network.display()
        )));
    }
    if !profile.edge_names.exists() {
        return Err(Error::Config(format!(
            "edge names file not found: {}",
            profile.edge_names.display()
        )));
    }

    let edges = load_street_network(&profile.street_network)?;
    let names = load_edge_names(&profile.edge_names)?;

    let intersections = detect_intersections(&edges, &names);
    info!("Found {} intersections", intersections.len());

    build_real_segments(&edges, &names, &intersections)
}

/// Initialized query context for one city profile.
pub struct ProximityService {
    segments: Vec<LineString<f64>>,
    index: SegmentIndex,
    window_half_width: f64,
    results: Option<Mutex<HashMap<(u64, u64), ProximityResult>>>,
}

impl ProximityService {
    /// Load the cached artifact for this profile, or run preprocessing and
    /// cache the result, then build the spatial index. Any failure here
    /// aborts initialization; no partial service is ever returned.
    pub fn initialize(
        profile: &CityProfile,
        cache: &ArtifactCache,
        cache_results: bool,
    ) -> Result<Self> {
        let fingerprint = profile.fingerprint();

        let segments = match cache.load(&fingerprint)? {
            Some(segments) => segments,
            None => {
                info!("No cached artifact for {fingerprint}, preprocessing");
                let segments = preprocess(profile)?;
                cache.store(&fingerprint, &segments)?;
                segments
            }
        };

        let index = SegmentIndex::build(&segments);

        Ok(Self {
            segments,
            index,
            window_half_width: profile.window_half_width,
            results: cache_results.then(|| Mutex::new(HashMap::new())),
        })
    }

    /// Distance to the nearer end of the enclosing street segment (meters)
    /// and middleness percentage for a label coordinate.
    pub fn compute_proximity(&self, lat: f64, lng: f64) -> Result<ProximityResult> {
        let key = (lat.to_bits(), lng.to_bits());
        if let Some(results) = &self.results {
            let cached = results
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .get(&key)
                .copied();
            if let Some(result) = cached {
                return Ok(result);
            }
        }

        let point = Coord { x: lng, y: lat };
        let found = nearest_segment(&self.index, point, self.window_half_width)?;
        let result = proximity(&self.segments[found.segment], found.closest)?;

        if let Some(results) = &self.results {
            let mut results = results
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if results.len() < RESULT_CACHE_CAP {
                results.insert(key, result);
            }
        }

        Ok(result)
    }

    /// The preprocessed real-segment list, id = position.
    pub fn segments(&self) -> &[LineString<f64>] {
        &self.segments
    }
}
