//! Per-zip rating state

use super::RateArea;

/// What is known about a zip's rating area.
///
/// Transitions only move forward: `Unset -> Resolved -> Ambiguous`.
/// `Ambiguous` is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AreaResolution {
    #[default]
    Unset,
    Resolved(RateArea),
    Ambiguous,
}

/// Outcome of observing one rating area for a zip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// First area seen for this zip
    Recorded,
    /// Same area as already recorded
    Unchanged,
    /// A differing area was seen; the zip is now ambiguous
    Conflict,
    /// The zip was already ambiguous
    AlreadyAmbiguous,
}

/// Rating data collected for one target zip
#[derive(Debug, Clone, Default)]
pub struct RateRecord {
    resolution: AreaResolution,
    rates: Vec<f64>,
}

impl RateRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolution(&self) -> &AreaResolution {
        &self.resolution
    }

    /// The resolved rating area, if the zip maps to exactly one
    pub fn rate_area(&self) -> Option<&RateArea> {
        match &self.resolution {
            AreaResolution::Resolved(area) => Some(area),
            _ => None,
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        self.resolution == AreaResolution::Ambiguous
    }

    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    /// Record one zip -> rating area association
    pub fn observe_area(&mut self, area: RateArea) -> Observation {
        let observation = match &self.resolution {
            AreaResolution::Unset => Observation::Recorded,
            AreaResolution::Resolved(current) if *current == area => Observation::Unchanged,
            AreaResolution::Resolved(_) => Observation::Conflict,
            AreaResolution::Ambiguous => Observation::AlreadyAmbiguous,
        };

        match observation {
            Observation::Recorded => self.resolution = AreaResolution::Resolved(area),
            Observation::Conflict => {
                self.resolution = AreaResolution::Ambiguous;
                self.rates.clear();
            }
            Observation::Unchanged | Observation::AlreadyAmbiguous => {}
        }

        observation
    }

    /// Append a plan rate. Ignored unless the zip has a single resolved area.
    /// Returns whether the rate was kept.
    pub fn push_rate(&mut self, rate: f64) -> bool {
        match self.resolution {
            AreaResolution::Resolved(_) => {
                self.rates.push(rate);
                true
            }
            _ => false,
        }
    }

    /// The rate at sorted position 1 (second lowest offered, ties retained).
    /// `None` when fewer than two rates were collected.
    pub fn second_lowest(&self) -> Option<f64> {
        if self.rates.len() < 2 {
            return None;
        }
        let mut sorted = self.rates.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));
        Some(sorted[1])
    }
}
