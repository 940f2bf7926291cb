// 🏷️ Sample-Size Scale - Ordered buckets as data
// Thresholds evaluated highest-first with strict > semantics

// ============================================================================
// CATEGORY
// ============================================================================

/// Legend class for a country's cumulative sample size.
///
/// Totally ordered, largest bucket first, exactly as the figure legend lists
/// them. `NoData` marks countries absent from the monitor export and sorts
/// last; a literal 0 total is a real observation and gets its own class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SampleSizeCategory {
    OverOneMillion,
    HundredKToOneMillion,
    FiveKToHundredK,
    FiveHundredOneToFiveK,
    HundredOneToFiveHundred,
    OneToHundred,
    Zero,
    NoData,
}

/// Legend order, top to bottom.
pub const ALL_CATEGORIES: [SampleSizeCategory; 8] = [
    SampleSizeCategory::OverOneMillion,
    SampleSizeCategory::HundredKToOneMillion,
    SampleSizeCategory::FiveKToHundredK,
    SampleSizeCategory::FiveHundredOneToFiveK,
    SampleSizeCategory::HundredOneToFiveHundred,
    SampleSizeCategory::OneToHundred,
    SampleSizeCategory::Zero,
    SampleSizeCategory::NoData,
];

impl SampleSizeCategory {
    /// Display label used in the legend
    pub fn label(&self) -> &'static str {
        match self {
            SampleSizeCategory::OverOneMillion => ">1 million",
            SampleSizeCategory::HundredKToOneMillion => "100k-1M",
            SampleSizeCategory::FiveKToHundredK => "5k-100k",
            SampleSizeCategory::FiveHundredOneToFiveK => "501-5k",
            SampleSizeCategory::HundredOneToFiveHundred => "101-500",
            SampleSizeCategory::OneToHundred => "1-100",
            SampleSizeCategory::Zero => "0",
            SampleSizeCategory::NoData => "No Data",
        }
    }

    /// Fill color of the published figure, as (r, g, b).
    ///
    /// Zero and NoData both render white; the legend still lists them
    /// separately because they mean different things.
    pub fn fill_rgb(&self) -> (u8, u8, u8) {
        match self {
            SampleSizeCategory::OverOneMillion => (0x04, 0x20, 0x37),
            SampleSizeCategory::HundredKToOneMillion => (0x08, 0x45, 0x94),
            SampleSizeCategory::FiveKToHundredK => (0x6b, 0xae, 0xd6),
            SampleSizeCategory::FiveHundredOneToFiveK => (0xbf, 0xd3, 0xe6),
            SampleSizeCategory::HundredOneToFiveHundred => (0xd9, 0xe2, 0xf8),
            SampleSizeCategory::OneToHundred => (0xf0, 0xf5, 0xfc),
            SampleSizeCategory::Zero => (0xff, 0xff, 0xff),
            SampleSizeCategory::NoData => (0xff, 0xff, 0xff),
        }
    }
}

// ============================================================================
// SCALE
// ============================================================================

/// The scale as data: (threshold, category) pairs evaluated in order, first
/// match wins. Every boundary is strict >, so a total of exactly 100_000
/// stays in the 5k-100k bucket.
const THRESHOLDS: &[(f64, SampleSizeCategory)] = &[
    (1_000_000.0, SampleSizeCategory::OverOneMillion),
    (100_000.0, SampleSizeCategory::HundredKToOneMillion),
    (5_000.0, SampleSizeCategory::FiveKToHundredK),
    (500.0, SampleSizeCategory::FiveHundredOneToFiveK),
    (100.0, SampleSizeCategory::HundredOneToFiveHundred),
    (0.0, SampleSizeCategory::OneToHundred),
];

/// Bucket a cumulative sample size; `None` means the country had no
/// observations at all.
pub fn categorize(total: Option<f64>) -> SampleSizeCategory {
    let total = match total {
        Some(total) => total,
        None => return SampleSizeCategory::NoData,
    };

    for (threshold, category) in THRESHOLDS {
        if total > *threshold {
            return *category;
        }
    }

    SampleSizeCategory::Zero
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_maps_to_no_data() {
        assert_eq!(categorize(None), SampleSizeCategory::NoData);
    }

    #[test]
    fn test_literal_zero_is_its_own_class() {
        assert_eq!(categorize(Some(0.0)), SampleSizeCategory::Zero);
        assert_ne!(categorize(Some(0.0)), categorize(None));
    }

    #[test]
    fn test_boundaries_are_strict() {
        // Exactly on a threshold stays in the lower bucket
        assert_eq!(categorize(Some(100_000.0)), SampleSizeCategory::FiveKToHundredK);
        assert_eq!(categorize(Some(100_001.0)), SampleSizeCategory::HundredKToOneMillion);

        assert_eq!(categorize(Some(1_000_000.0)), SampleSizeCategory::HundredKToOneMillion);
        assert_eq!(categorize(Some(1_000_001.0)), SampleSizeCategory::OverOneMillion);

        assert_eq!(categorize(Some(500.0)), SampleSizeCategory::HundredOneToFiveHundred);
        assert_eq!(categorize(Some(501.0)), SampleSizeCategory::FiveHundredOneToFiveK);
    }

    #[test]
    fn test_every_band_reachable() {
        assert_eq!(categorize(Some(2_000_000.0)), SampleSizeCategory::OverOneMillion);
        assert_eq!(categorize(Some(200_000.0)), SampleSizeCategory::HundredKToOneMillion);
        assert_eq!(categorize(Some(10_000.0)), SampleSizeCategory::FiveKToHundredK);
        assert_eq!(categorize(Some(1_000.0)), SampleSizeCategory::FiveHundredOneToFiveK);
        assert_eq!(categorize(Some(150.0)), SampleSizeCategory::HundredOneToFiveHundred);
        assert_eq!(categorize(Some(1.0)), SampleSizeCategory::OneToHundred);
        assert_eq!(categorize(Some(0.5)), SampleSizeCategory::OneToHundred);
    }

    #[test]
    fn test_totality_over_sampled_range() {
        // Every non-negative total lands in exactly one of the 7 value
        // classes; NoData is reserved for absent countries.
        let mut n = 0.0f64;
        while n < 2_000_000.0 {
            let category = categorize(Some(n));
            assert_ne!(category, SampleSizeCategory::NoData);
            n += 13_456.789;
        }
    }

    #[test]
    fn test_legend_order_matches_enum_order() {
        let labels: Vec<&str> = ALL_CATEGORIES.iter().map(|c| c.label()).collect();
        assert_eq!(
            labels,
            vec![">1 million", "100k-1M", "5k-100k", "501-5k", "101-500", "1-100", "0", "No Data"]
        );

        // Ord agrees with legend order
        let mut sorted = ALL_CATEGORIES;
        sorted.sort();
        assert_eq!(sorted, ALL_CATEGORIES);
    }
}
