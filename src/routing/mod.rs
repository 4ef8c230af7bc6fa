//! Route synthesis: path computation, step generation and air-quality
//! analysis along the path.

pub mod analysis;
pub mod path;
pub mod steps;
mod to_geojson;

pub use analysis::analyze_route_air_quality;
pub use path::{ComputedPath, compute_path};
pub use steps::synthesize_steps;
