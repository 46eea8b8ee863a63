//! Per-source visibility series.
//!
//! One [`VisibilityReport`] accumulates every scored sample of a single run.
//! It is the sole output contract of the core pipeline: renderers read the
//! series to draw elevation/azimuth tracks and polar trajectories, exporters
//! persist them as tabular data. The report itself derives nothing.

use std::collections::HashMap;

use hifitime::Epoch;

use crate::constants::Degree;

/// One scored grid sample of one source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub epoch: Epoch,
    /// Source altitude at `epoch`, degrees.
    pub altitude: Degree,
    /// Source azimuth at `epoch`, degrees from North.
    pub azimuth: Degree,
    /// Visibility score in `[0, 1]`.
    pub score: f64,
}

/// Ordered per-source collections of scored samples.
///
/// Samples keep their insertion order within a source, and
/// [`sources`](VisibilityReport::sources) iterates source names in first-seen
/// order, so a report built from identical inputs is always bit-identical.
/// Read-only once the producing run completes.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct VisibilityReport {
    order: Vec<String>,
    series: HashMap<String, Vec<SamplePoint>>,
}

impl VisibilityReport {
    pub fn new() -> Self {
        VisibilityReport::default()
    }

    /// Record one scored sample for `source`.
    pub fn append(
        &mut self,
        source: &str,
        epoch: Epoch,
        altitude: Degree,
        azimuth: Degree,
        score: f64,
    ) {
        if !self.series.contains_key(source) {
            self.order.push(source.to_owned());
        }
        self.series.entry(source.to_owned()).or_default().push(SamplePoint {
            epoch,
            altitude,
            azimuth,
            score,
        });
    }

    /// The scored series of one source, in insertion order.
    pub fn series_for(&self, source: &str) -> Option<&[SamplePoint]> {
        self.series.get(source).map(Vec::as_slice)
    }

    /// Source names in first-insertion order.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// All series in source insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SamplePoint])> {
        self.order
            .iter()
            .map(|name| (name.as_str(), self.series[name].as_slice()))
    }

    /// Number of distinct sources recorded.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod report_test {
    use super::*;

    fn epoch(hours: u8) -> Epoch {
        Epoch::from_gregorian_utc_hms(2018, 6, 26, hours, 0, 0)
    }

    #[test]
    fn test_append_preserves_sample_order() {
        let mut report = VisibilityReport::new();
        report.append("Crab", epoch(22), 40.0, 100.0, 0.5);
        report.append("Crab", epoch(23), 45.0, 110.0, 0.6);

        let series = report.series_for("Crab").unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].epoch, epoch(22));
        assert_eq!(series[1].epoch, epoch(23));
        assert_eq!(series[1].score, 0.6);
    }

    #[test]
    fn test_sources_keep_insertion_order() {
        let mut report = VisibilityReport::new();
        report.append("Mrk 501", epoch(22), 10.0, 0.0, 0.0);
        report.append("Crab", epoch(22), 20.0, 0.0, 0.1);
        report.append("Mrk 501", epoch(23), 11.0, 1.0, 0.0);

        let names: Vec<&str> = report.sources().collect();
        assert_eq!(names, vec!["Mrk 501", "Crab"]);
        assert_eq!(report.len(), 2);

        let collected: Vec<(&str, usize)> =
            report.iter().map(|(name, s)| (name, s.len())).collect();
        assert_eq!(collected, vec![("Mrk 501", 2), ("Crab", 1)]);
    }

    #[test]
    fn test_unknown_source_is_none() {
        let report = VisibilityReport::new();
        assert!(report.is_empty());
        assert!(report.series_for("PKS 2155-304").is_none());
    }
}
