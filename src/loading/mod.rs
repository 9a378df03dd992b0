//! Road-network and edge-name source loading.

mod names;
mod network;

pub use names::load_edge_names;
pub use network::load_street_network;
