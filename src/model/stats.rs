//! Aggregate system statistics

use serde::{Deserialize, Serialize};

/// Derived aggregate metrics for the current build.
///
/// Always a pure function of the installed part list, recomputed in full on
/// every add/remove (see [`crate::core::engine::compute_stats`]); never
/// persisted except as part of a saved build summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemStats {
    /// Sum of part price estimates, rounded to whole currency units
    pub total_cost: i64,

    /// Sum of part wattage draw, rounded to whole watts
    pub total_wattage: i64,

    /// Performance-score sum weighted for workstation use
    pub workstation_score: i64,

    /// Performance-score sum weighted for gaming use
    pub gaming_score: i64,

    /// PSU headroom rating, 0-100 (100 with no PSU installed)
    pub power_efficiency: i64,
}

impl Default for SystemStats {
    fn default() -> Self {
        Self {
            total_cost: 0,
            total_wattage: 0,
            workstation_score: 0,
            gaming_score: 0,
            power_efficiency: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty_build() {
        let stats = SystemStats::default();
        assert_eq!(stats.total_cost, 0);
        assert_eq!(stats.total_wattage, 0);
        assert_eq!(stats.power_efficiency, 100);
    }
}
