use crate::measurement::Measurement;
use anyhow::Result;

/// Size categories kept by default; the rest of the sweep is too dense to chart
pub const DEFAULT_SIZES: &[&str] = &["500", "5000", "50000"];

/// Keeps only rows whose size is one of an exact set of strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeFilter {
    sizes: Vec<String>,
}

impl SizeFilter {
    pub fn new<I, S>(sizes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sizes: Vec<String> = sizes.into_iter().map(Into::into).collect();
        if sizes.is_empty() {
            anyhow::bail!("Size filter needs at least one size");
        }
        Ok(Self { sizes })
    }

    pub fn sizes(&self) -> &[String] {
        &self.sizes
    }

    /// Exact string comparison: "0500" does not match "500"
    pub fn matches(&self, measurement: &Measurement) -> bool {
        self.sizes.iter().any(|s| *s == measurement.size)
    }

    pub fn apply(&self, measurements: Vec<Measurement>) -> Vec<Measurement> {
        measurements
            .into_iter()
            .filter(|m| self.matches(m))
            .collect()
    }
}

impl Default for SizeFilter {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::collection::vec as prop_vec;
    use proptest::prelude::*;

    fn row(size: &str) -> Measurement {
        Measurement::new(size, "Lookup", "BBloom", "1", "ns")
    }

    #[test]
    fn test_default_sizes() {
        let filter = SizeFilter::default();
        assert!(filter.matches(&row("500")));
        assert!(filter.matches(&row("5000")));
        assert!(filter.matches(&row("50000")));
        assert!(!filter.matches(&row("1000")));
        assert!(!filter.matches(&row("0500")));
        assert!(!filter.matches(&row("500000")));
    }

    #[test]
    fn test_excludes_parsed_row() {
        let parsed =
            crate::measurement::parse_line("Filters/size=1000/Insert/PanmariCuckoo-4   45 ns")
                .unwrap();
        assert_eq!(parsed.size, "1000");
        assert!(SizeFilter::default().apply(vec![parsed]).is_empty());
    }

    #[test]
    fn test_apply_keeps_order() {
        let rows = vec![row("50000"), row("1000"), row("500"), row("5000")];
        let kept = SizeFilter::default().apply(rows);
        let sizes: Vec<&str> = kept.iter().map(|m| m.size.as_str()).collect();
        assert_eq!(sizes, vec!["50000", "500", "5000"]);
    }

    #[test]
    fn test_custom_sizes() {
        let filter = SizeFilter::new(["1000"]).unwrap();
        assert_eq!(filter.sizes(), ["1000".to_string()]);
        assert!(filter.matches(&row("1000")));
        assert!(!filter.matches(&row("500")));
    }

    #[test]
    fn test_empty_sizes_rejected() {
        assert!(SizeFilter::new(Vec::<String>::new()).is_err());
    }

    proptest! {
        #[test]
        fn prop_filter_idempotent(sizes in prop_vec(prop::sample::select(vec!["5", "50", "500", "5000", "50000", "1000"]), 0..40)) {
            let rows: Vec<Measurement> = sizes.iter().map(|s| row(s)).collect();
            let filter = SizeFilter::default();
            let once = filter.apply(rows);
            let twice = filter.apply(once.clone());
            prop_assert_eq!(once, twice);
        }
    }
}
