//! Air-quality scoring and spatial attribution.

pub mod score;
pub mod snapshot;
pub mod spatial;

pub use score::{NEUTRAL_SCORE, QualityLevel, air_quality_score};
pub use snapshot::{air_quality_snapshot, collect_snapshot};
pub use spatial::{Located, nearest_within};
