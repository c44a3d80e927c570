// ABOUTME: Heart rate training zone calculation from maximum heart rate
// ABOUTME: Pure functions producing the six standard zones and age-predicted max HR
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Heart rate zone calculation
//!
//! Zones are fixed percentage bands of maximum heart rate, in ascending
//! intensity order. Bounds are truncated to whole BPM; the top zone's
//! ceiling is the maximum heart rate itself rather than a rounded product,
//! so the band structure always covers the full range up to `max_hr`.

use crate::constants::heart_rate::{
    AEROBIC_LOW_FRACTION, AGE_PREDICTED_HR_BASE, ANAEROBIC_LOW_FRACTION, RECOVERY_LOW_FRACTION,
    TEMPO_LOW_FRACTION, THRESHOLD_LOW_FRACTION, VO2_MAX_LOW_FRACTION,
};
use crate::models::HeartRateZone;

/// Calculate the six heart rate training zones for a maximum heart rate
///
/// Deterministic for any input; implausibly small values simply produce
/// degenerate zones. Callers validate physiological plausibility.
#[must_use]
pub fn calculate_zones(max_hr: u32) -> Vec<HeartRateZone> {
    let bound = |fraction: f64| (f64::from(max_hr) * fraction) as u32;

    vec![
        HeartRateZone {
            name: "Recovery".into(),
            min_bpm: bound(RECOVERY_LOW_FRACTION),
            max_bpm: bound(AEROBIC_LOW_FRACTION),
        },
        HeartRateZone {
            name: "Aerobic".into(),
            min_bpm: bound(AEROBIC_LOW_FRACTION),
            max_bpm: bound(TEMPO_LOW_FRACTION),
        },
        HeartRateZone {
            name: "Tempo".into(),
            min_bpm: bound(TEMPO_LOW_FRACTION),
            max_bpm: bound(THRESHOLD_LOW_FRACTION),
        },
        HeartRateZone {
            name: "Threshold".into(),
            min_bpm: bound(THRESHOLD_LOW_FRACTION),
            max_bpm: bound(VO2_MAX_LOW_FRACTION),
        },
        HeartRateZone {
            name: "VO2 Max".into(),
            min_bpm: bound(VO2_MAX_LOW_FRACTION),
            max_bpm: bound(ANAEROBIC_LOW_FRACTION),
        },
        HeartRateZone {
            name: "Anaerobic".into(),
            min_bpm: bound(ANAEROBIC_LOW_FRACTION),
            max_bpm: max_hr,
        },
    ]
}

/// Age-predicted maximum heart rate using the 220 - age formula
///
/// Saturates at zero for ages beyond the formula's base.
#[must_use]
pub const fn max_hr_from_age(age: u32) -> u32 {
    AGE_PREDICTED_HR_BASE.saturating_sub(age)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zones_for_200_bpm() {
        let zones = calculate_zones(200);
        assert_eq!(zones.len(), 6);

        assert_eq!(zones[0].name, "Recovery");
        assert_eq!(zones[0].min_bpm, 100);
        assert_eq!(zones[0].max_bpm, 120);

        assert_eq!(zones[5].name, "Anaerobic");
        assert_eq!(zones[5].min_bpm, 190);
        assert_eq!(zones[5].max_bpm, 200);
    }

    #[test]
    fn test_zones_for_default_max_hr() {
        let zones = calculate_zones(190);
        assert_eq!(zones[0].min_bpm, 95);
        assert_eq!(zones[0].max_bpm, 114);
        assert_eq!(zones[4].name, "VO2 Max");
        assert_eq!(zones[4].min_bpm, 171);
        assert_eq!(zones[4].max_bpm, 180);
        assert_eq!(zones[5].max_bpm, 190);
    }

    #[test]
    fn test_zone_bands_are_contiguous_and_ascending() {
        for max_hr in [150_u32, 173, 185, 190, 200, 220] {
            let zones = calculate_zones(max_hr);
            for pair in zones.windows(2) {
                assert_eq!(
                    pair[0].max_bpm, pair[1].min_bpm,
                    "zones must share boundaries for max_hr {max_hr}"
                );
                assert!(pair[0].min_bpm <= pair[1].min_bpm);
            }
            assert_eq!(zones[5].max_bpm, max_hr);
        }
    }

    #[test]
    fn test_top_zone_ceiling_is_exact_for_odd_values() {
        // 0.95 * 185 = 175.75 truncates to 175; the ceiling must still be 185
        let zones = calculate_zones(185);
        assert_eq!(zones[5].min_bpm, 175);
        assert_eq!(zones[5].max_bpm, 185);
    }

    #[test]
    fn test_degenerate_input_produces_zero_zones() {
        let zones = calculate_zones(0);
        assert!(zones.iter().all(|z| z.min_bpm == 0 && z.max_bpm == 0));
    }

    #[test]
    fn test_max_hr_from_age() {
        assert_eq!(max_hr_from_age(30), 190);
        assert_eq!(max_hr_from_age(45), 175);
        assert_eq!(max_hr_from_age(230), 0);
    }
}
