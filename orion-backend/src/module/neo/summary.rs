///! Single-day summary card: counts, closest approach and risk level
use orion_common::{NearEarthObject, RiskLevel, TodaySummary};
use serde::{Deserialize, Serialize};

/// Threshold policy for [`RiskLevel`]
///
/// - `Low` when nothing is hazardous
/// - `High` when the hazardous share is strictly above `high_above_percent`
/// - `Moderate` otherwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskPolicy {
    #[serde(default = "default_high_above_percent")]
    pub high_above_percent: u8,
}

fn default_high_above_percent() -> u8 {
    30
}

impl Default for RiskPolicy {
    fn default() -> Self {
        Self {
            high_above_percent: default_high_above_percent(),
        }
    }
}

impl RiskPolicy {
    pub fn classify(&self, hazardous: usize, hazardous_percent: u8) -> RiskLevel {
        if hazardous == 0 {
            RiskLevel::Low
        } else if hazardous_percent > self.high_above_percent {
            RiskLevel::High
        } else {
            RiskLevel::Moderate
        }
    }
}

/// `round(hazardous / total * 100)`, half up, or 0 for an empty day
pub fn hazardous_percent(hazardous: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let hazardous = hazardous.min(total);
    // floor(100h/t + 1/2) in integers
    ((200 * hazardous + total) / (2 * total)) as u8
}

/// Minimum parsed miss distance over every approach of every object
pub fn closest_distance_km(objects: &[NearEarthObject]) -> Option<f64> {
    objects
        .iter()
        .filter_map(NearEarthObject::closest_miss_distance_km)
        .fold(None, |min, km| match min {
            Some(m) if m <= km => Some(m),
            _ => Some(km),
        })
}

pub fn summarize(objects: &[NearEarthObject], policy: &RiskPolicy) -> TodaySummary {
    let total = objects.len();
    let hazardous = objects.iter().filter(|o| o.is_hazardous).count();
    let percent = hazardous_percent(hazardous, total);

    TodaySummary {
        total,
        hazardous,
        closest_km: closest_distance_km(objects),
        hazardous_percent: percent,
        risk_level: policy.classify(hazardous, percent),
    }
}
