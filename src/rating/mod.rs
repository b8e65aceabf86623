//! Rating areas and the per-zip records the pipeline fills in

mod area;
mod record;

pub use area::RateArea;
pub use record::{AreaResolution, Observation, RateRecord};

/// The only metal tier whose plans count toward the SLCSP
pub const TARGET_TIER: &str = "Silver";
