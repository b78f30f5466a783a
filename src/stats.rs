// Derived launch statistics: per-entity success counters and the
// year/month launch histograms. The store builds these once per fetch
// pass; afterwards they are read through sorted views only.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

/// Successful/total launch counters for one rocket or launchpad.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySummary {
    pub name: String,
    pub successful_launches: u32,
    pub total_launches: u32,
}

impl EntitySummary {
    pub fn new(name: impl Into<String>) -> Self {
        EntitySummary {
            name: name.into(),
            successful_launches: 0,
            total_launches: 0,
        }
    }

    /// Count one launch against this entity. A success always counts
    /// toward the total as well, so `successful_launches` can never
    /// exceed `total_launches`.
    pub fn record_launch(&mut self, success: bool) {
        self.total_launches += 1;
        if success {
            self.successful_launches += 1;
        }
    }

    /// Success percentage over all counted launches, `None` before any
    /// launch has been counted.
    pub fn success_rate(&self) -> Option<f64> {
        if self.total_launches == 0 {
            return None;
        }
        Some(f64::from(self.successful_launches) / f64::from(self.total_launches) * 100.0)
    }
}

/// Launch counts bucketed by year and by month of year (1 = January).
///
/// A bucket is created zero-initialized the first time its year or
/// month is seen, so both histograms cover exactly the dates that were
/// recorded and their counts sum to the same total.
#[derive(Debug, Clone, Default)]
pub struct LaunchStats {
    years: BTreeMap<i32, u32>,
    months: BTreeMap<u32, u32>,
}

impl LaunchStats {
    /// Count one launch date in both histograms.
    pub fn record(&mut self, date: NaiveDate) {
        *self.years.entry(date.year()).or_insert(0) += 1;
        *self.months.entry(date.month()).or_insert(0) += 1;
    }

    /// Year buckets, ascending by year.
    pub fn yearly(&self) -> Vec<(i32, u32)> {
        self.years.iter().map(|(&year, &count)| (year, count)).collect()
    }

    /// Month buckets, ascending by month number.
    pub fn monthly(&self) -> Vec<(u32, u32)> {
        self.months.iter().map(|(&month, &count)| (month, count)).collect()
    }
}
