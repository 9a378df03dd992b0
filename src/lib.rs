//! Wayside - intersection proximity for street-network survey labels
//!
//! Turns a raw road-network dump into atomic street segments cut at true
//! intersections, indexes them in an R-tree, and answers point queries with
//! the metric distance to the nearer segment end and a "middleness"
//! percentage (0 at either end, 100 at the midpoint).

pub mod cache;
pub mod config;
pub mod detect;
pub mod error;
pub mod index;
pub mod loading;
pub mod model;
pub mod nearest;
pub mod projection;
pub mod proximity;
pub mod service;
pub mod split;

pub use error::{Error, Result};
pub use model::{Edge, ProximityResult, StreetName};
pub use service::ProximityService;
