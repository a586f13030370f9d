// MANET-EVAL: Aggregation and Comparison Plots for MANET Routing Simulation Results
// Copyright (C) 2024-2025 The manet-eval developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//! Loading, filtering, and aggregation of raw simulation records into the summary table.
use std::{collections::BTreeMap, path::Path};

use itertools::Itertools;
use statrs::statistics::Statistics;
use strum::IntoEnumIterator;

use crate::{
    records::{Metric, Router, SimulationRecord, SummaryRecord},
    SummaryTable,
};

/// 95% normal quantile used for the confidence-interval half-widths.
pub const CI_FACTOR: f64 = 1.96;

#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error("could not process simulation results: {0}")]
    Csv(#[from] csv::Error),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Restricts the raw records to one experiment configuration before aggregation.
#[derive(Clone, Debug)]
pub struct RecordFilter {
    /// Only keep runs with exactly this buffer size (MB).
    pub buffer_size: u32,
    /// Discard runs on networks larger than this.
    pub max_nodes: u32,
}

impl Default for RecordFilter {
    fn default() -> Self {
        Self {
            buffer_size: 150,
            max_nodes: 600,
        }
    }
}

impl RecordFilter {
    pub fn matches(&self, record: &SimulationRecord) -> bool {
        record.buffer_size == self.buffer_size && record.nodes <= self.max_nodes
    }
}

/// Identifies one aggregation bucket of the summary table.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    pub router: Router,
    pub nodes: u32,
    pub message_interval: String,
}

impl GroupKey {
    pub fn new(router: Router, nodes: u32, message_interval: impl Into<String>) -> Self {
        Self {
            router,
            nodes,
            message_interval: message_interval.into(),
        }
    }

    pub fn of(record: &SimulationRecord) -> Self {
        Self::new(record.router, record.nodes, record.message_interval.clone())
    }
}

/// Mean and 95%-CI half-width of one metric within one group.
#[derive(Clone, Copy, Debug)]
pub struct MetricSummary {
    pub mean: f64,
    /// `1.96 * sample_std / sqrt(n)`; NaN for groups of size 1.
    pub ci: f64,
}

/// Aggregated statistics of one group. Metrics no run of the group recorded are absent.
#[derive(Clone, Debug, Default)]
pub struct SummaryRow {
    stats: BTreeMap<Metric, MetricSummary>,
}

impl SummaryRow {
    pub fn get(&self, metric: Metric) -> Option<MetricSummary> {
        self.stats.get(&metric).copied()
    }
}

/// Loads all simulation records from a results CSV.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<SimulationRecord>, EvalError> {
    let mut rdr = csv::Reader::from_path(path.as_ref())?;
    Ok(rdr.deserialize().collect::<Result<Vec<_>, _>>()?)
}

/// Keeps exactly the records matching the filter, leaving their values untouched.
pub fn filter_records(
    records: Vec<SimulationRecord>,
    filter: &RecordFilter,
) -> Vec<SimulationRecord> {
    records
        .into_iter()
        .filter(|record| filter.matches(record))
        .collect()
}

/// Groups the records by `(router, nodes, message_interval)` and computes mean and CI
/// half-width per metric. Duplicate rows count as independent samples.
pub fn summarize(records: &[SimulationRecord]) -> SummaryTable {
    records
        .iter()
        .into_group_map_by(|record| GroupKey::of(record))
        .into_iter()
        .map(|(key, group)| (key, summarize_group(&group)))
        .collect()
}

fn summarize_group(group: &[&SimulationRecord]) -> SummaryRow {
    let stats = Metric::iter()
        .filter_map(|metric| {
            let values = group
                .iter()
                .filter_map(|record| record.metric(metric))
                .collect_vec();
            if values.is_empty() {
                return None;
            }
            let mean = values.iter().mean();
            // sample std dev of a single observation is NaN, and so is the CI
            let ci = CI_FACTOR * values.iter().std_dev() / (values.len() as f64).sqrt();
            Some((metric, MetricSummary { mean, ci }))
        })
        .collect();
    SummaryRow { stats }
}

/// Dumps the summary table to a CSV next to the figures for further processing.
pub fn write_summary_csv(table: &SummaryTable, path: impl AsRef<Path>) -> Result<(), EvalError> {
    let mut csv = csv::Writer::from_path(path.as_ref())?;
    for (key, row) in table {
        let stat = |metric| row.get(metric).unwrap_or(MetricSummary {
            mean: f64::NAN,
            ci: f64::NAN,
        });
        let speed = row.get(Metric::SpeedAvg);
        csv.serialize(SummaryRecord {
            router: key.router,
            nodes: key.nodes,
            message_interval: key.message_interval.clone(),
            delivery_prob: stat(Metric::DeliveryProb).mean,
            delivery_prob_err: stat(Metric::DeliveryProb).ci,
            latency_avg: stat(Metric::LatencyAvg).mean,
            latency_avg_err: stat(Metric::LatencyAvg).ci,
            overhead_ratio: stat(Metric::OverheadRatio).mean,
            overhead_ratio_err: stat(Metric::OverheadRatio).ci,
            speed_avg: speed.map(|s| s.mean),
            speed_avg_err: speed.map(|s| s.ci),
        })?;
    }
    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn record(
        router: Router,
        nodes: u32,
        message_interval: &str,
        buffer_size: u32,
        delivery_prob: f64,
    ) -> SimulationRecord {
        SimulationRecord {
            router,
            nodes,
            message_interval: message_interval.to_string(),
            buffer_size,
            delivery_prob,
            latency_avg: 1000.0,
            overhead_ratio: 20.0,
            speed_avg: None,
        }
    }

    #[test]
    fn group_mean_is_arithmetic_average() {
        let records = vec![
            record(Router::Epidemic, 100, "5,25", 150, 0.5),
            record(Router::Epidemic, 100, "5,25", 150, 0.7),
        ];
        let table = summarize(&records);
        let row = &table[&GroupKey::new(Router::Epidemic, 100, "5,25")];
        let stat = row.get(Metric::DeliveryProb).unwrap();
        assert!((stat.mean - 0.6).abs() < 1e-12);
    }

    #[test]
    fn ci_half_width_uses_standard_error() {
        let records = vec![
            record(Router::Prophet, 200, "25,35", 150, 0.5),
            record(Router::Prophet, 200, "25,35", 150, 0.7),
        ];
        let table = summarize(&records);
        let stat = table[&GroupKey::new(Router::Prophet, 200, "25,35")]
            .get(Metric::DeliveryProb)
            .unwrap();
        // sample std of {0.5, 0.7} is 0.1 * sqrt(2), standard error is 0.1
        assert!((stat.ci - CI_FACTOR * 0.1).abs() < 1e-12);
    }

    #[test]
    fn singleton_group_has_nan_ci() {
        let records = vec![record(Router::Seer, 400, "35,60", 150, 0.4)];
        let table = summarize(&records);
        let stat = table[&GroupKey::new(Router::Seer, 400, "35,60")]
            .get(Metric::DeliveryProb)
            .unwrap();
        assert!((stat.mean - 0.4).abs() < 1e-12);
        assert!(stat.ci.is_nan());
    }

    #[test]
    fn filter_keeps_matching_rows_untouched() {
        let records = vec![
            record(Router::Epidemic, 100, "5,25", 150, 0.5),
            record(Router::Epidemic, 100, "5,25", 50, 0.9),
            record(Router::Epidemic, 800, "5,25", 150, 0.1),
            record(Router::MaxProp, 600, "60, 120", 150, 0.3),
        ];
        let kept = filter_records(records, &RecordFilter::default());
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].delivery_prob, 0.5);
        assert_eq!(kept[1].router, Router::MaxProp);
        assert_eq!(kept[1].delivery_prob, 0.3);
    }

    #[test]
    fn summarize_empty_input() {
        assert!(summarize(&[]).is_empty());
    }

    #[test]
    fn load_records_tolerates_extra_columns_and_missing_speed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        std::fs::write(
            &path,
            "scenario,router,nodes,message_interval,buffer_size,delivery_prob,latency_avg,overhead_ratio\n\
             run-1,Epidemic,100,\"5,25\",150,0.5,1200.0,23.0\n\
             run-2,Spray n' Wait,200,\"60, 120\",150,0.7,900.0,11.0\n",
        )
        .unwrap();

        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].router, Router::Epidemic);
        assert_eq!(records[1].router, Router::SprayNWait);
        assert_eq!(records[1].message_interval, "60, 120");
        assert_eq!(records[0].speed_avg, None);
    }

    #[test]
    fn load_records_fails_on_malformed_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.csv");
        std::fs::write(&path, "router,nodes\nEpidemic,not-a-number\n").unwrap();
        assert!(load_records(&path).is_err());
        assert!(load_records(dir.path().join("missing.csv")).is_err());
    }
}
