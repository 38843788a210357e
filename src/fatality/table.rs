//! Age-rate table and fatality lookup

use crate::config::{AgeBand, REFERENCE_BANDS};
use crate::error::{DistancingError, Result};
use once_cell::sync::Lazy;
use smallvec::SmallVec;

/// Reference table, built once
static REFERENCE_TABLE: Lazy<AgeRateTable> = Lazy::new(|| AgeRateTable {
    bands: SmallVec::from_slice(&REFERENCE_BANDS),
});

/// Ordered, immutable table of age bands.
///
/// Bands are sorted by non-decreasing `max_age` and every rate lies in
/// `[0, 1]`. The table is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct AgeRateTable {
    bands: SmallVec<[AgeBand; 9]>,
}

impl AgeRateTable {
    /// Build a table from bands in probe order
    pub fn new(bands: impl IntoIterator<Item = AgeBand>) -> Result<Self> {
        let bands: SmallVec<[AgeBand; 9]> = bands.into_iter().collect();

        if bands.is_empty() {
            return Err(DistancingError::InvalidRateTable(
                "table must contain at least one band".to_string(),
            ));
        }

        for (index, band) in bands.iter().enumerate() {
            if !band.rate.is_finite() || !(0.0..=1.0).contains(&band.rate) {
                return Err(DistancingError::InvalidRateTable(format!(
                    "band {} has rate {} outside [0, 1]",
                    index, band.rate
                )));
            }
        }

        if let Some(index) = bands
            .windows(2)
            .position(|pair| pair[1].max_age < pair[0].max_age)
        {
            return Err(DistancingError::InvalidRateTable(format!(
                "band {} threshold {} is below the previous threshold {}",
                index + 1,
                bands[index + 1].max_age,
                bands[index].max_age
            )));
        }

        Ok(Self { bands })
    }

    /// The March 2020 reference table
    pub fn reference() -> &'static AgeRateTable {
        &REFERENCE_TABLE
    }

    pub fn bands(&self) -> &[AgeBand] {
        &self.bands
    }

    /// Fatality rate for an age.
    ///
    /// Returns the rate of the first threshold at or above `age`, or the
    /// last band's rate when `age` is past every threshold. When several
    /// bands share that threshold the last of them wins. Negative ages land
    /// in the first band.
    #[inline]
    pub fn lookup(&self, age: i32) -> f64 {
        let mut rate = 0.0;
        let mut bands = self.bands.iter().peekable();
        while let Some(band) = bands.next() {
            rate = band.rate;
            let shared = bands.peek().is_some_and(|next| next.max_age == band.max_age);
            if age <= band.max_age && !shared {
                break;
            }
        }
        rate
    }
}

/// Fatality rate for an age using the reference table
#[inline]
pub fn lookup_fatality_rate(age: i32) -> f64 {
    AgeRateTable::reference().lookup(age)
}

/// Render a rate as a percentage with one decimal place, e.g. `3.6%`
pub fn format_rate(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_boundaries() {
        assert_eq!(lookup_fatality_rate(9), 0.0);
        assert_eq!(lookup_fatality_rate(10), 0.002);
        assert_eq!(lookup_fatality_rate(60), 0.036);
        assert_eq!(lookup_fatality_rate(100), 0.148);
    }

    #[test]
    fn test_duplicate_threshold() {
        // the later of the two 79 bands overrides the earlier one
        assert_eq!(lookup_fatality_rate(70), 0.08);
        assert_eq!(lookup_fatality_rate(78), 0.08);
        assert_eq!(lookup_fatality_rate(79), 0.148);
        assert_eq!(lookup_fatality_rate(80), 0.148);
    }

    #[test]
    fn test_shared_threshold_mid_table() {
        let table = AgeRateTable::new([
            AgeBand::new(10, 0.1),
            AgeBand::new(20, 0.2),
            AgeBand::new(20, 0.3),
            AgeBand::new(20, 0.4),
            AgeBand::new(30, 0.5),
        ])
        .unwrap();
        assert_eq!(table.lookup(10), 0.1);
        assert_eq!(table.lookup(11), 0.4);
        assert_eq!(table.lookup(20), 0.4);
        assert_eq!(table.lookup(21), 0.5);
        assert_eq!(table.lookup(31), 0.5);
    }

    #[test]
    fn test_out_of_range_ages() {
        assert_eq!(lookup_fatality_rate(-5), 0.0);
        assert_eq!(lookup_fatality_rate(i32::MIN), 0.0);
        assert_eq!(lookup_fatality_rate(150), 0.148);
        assert_eq!(lookup_fatality_rate(i32::MAX), 0.148);
    }

    #[test]
    fn test_single_band_table() {
        let table = AgeRateTable::new([AgeBand::new(0, 0.5)]).unwrap();
        assert_eq!(table.lookup(-1), 0.5);
        assert_eq!(table.lookup(99), 0.5);
    }

    #[test]
    fn test_rejects_unsorted() {
        let result = AgeRateTable::new([AgeBand::new(20, 0.1), AgeBand::new(10, 0.2)]);
        assert!(matches!(result, Err(DistancingError::InvalidRateTable(_))));
    }

    #[test]
    fn test_rejects_bad_rate() {
        let result = AgeRateTable::new([AgeBand::new(20, -0.1)]);
        assert!(result.is_err());
        let result = AgeRateTable::new([AgeBand::new(20, f64::NAN)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_reference_matches_constant() {
        assert_eq!(AgeRateTable::reference().bands(), &REFERENCE_BANDS[..]);
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(0.0), "0.0%");
        assert_eq!(format_rate(0.002), "0.2%");
        assert_eq!(format_rate(0.036), "3.6%");
        assert_eq!(format_rate(0.148), "14.8%");
    }
}
