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
//! Module defining record data types to (de-)serialize simulation results to CSV.
use serde::{Deserialize, Serialize};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Deserialize,
    Serialize,
    strum::Display,
    strum::EnumIter,
    strum_macros::EnumString,
)]
/// Routing protocols under comparison. The declaration order is the fixed order in which the
/// routers are drawn and styled in every figure.
pub enum Router {
    Proposed,
    #[serde(rename = "Spray n' Wait")]
    #[strum(serialize = "Spray n' Wait")]
    SprayNWait,
    Epidemic,
    #[serde(rename = "PRoPHET")]
    #[strum(serialize = "PRoPHET")]
    Prophet,
    #[serde(rename = "SeeR")]
    #[strum(serialize = "SeeR")]
    Seer,
    #[serde(rename = "MaxPROP")]
    #[strum(serialize = "MaxPROP")]
    MaxProp,
    #[serde(rename = "Epidemic with Oracle")]
    #[strum(serialize = "Epidemic with Oracle")]
    EpidemicWithOracle,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumIter,
)]
/// Outcome metrics tracked per simulation run.
pub enum Metric {
    #[strum(serialize = "delivery_prob")]
    DeliveryProb,
    #[strum(serialize = "latency_avg")]
    LatencyAvg,
    #[strum(serialize = "overhead_ratio")]
    OverheadRatio,
    #[strum(serialize = "speed_avg")]
    SpeedAvg,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
/// One row of the results CSV, i.e., the outcome of a single simulation run.
pub struct SimulationRecord {
    pub router: Router,
    pub nodes: u32,
    pub message_interval: String,
    pub buffer_size: u32,
    pub delivery_prob: f64,
    pub latency_avg: f64,
    pub overhead_ratio: f64,
    /// Only some simulation exports carry the average node speed.
    #[serde(default)]
    pub speed_avg: Option<f64>,
}

impl SimulationRecord {
    /// The value of the given metric for this run, if the run recorded it.
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::DeliveryProb => Some(self.delivery_prob),
            Metric::LatencyAvg => Some(self.latency_avg),
            Metric::OverheadRatio => Some(self.overhead_ratio),
            Metric::SpeedAvg => self.speed_avg,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
/// Aggregated results for one group, as written to `summary.csv`. The `*_err` columns hold the
/// 95%-CI half-widths of the corresponding means.
pub struct SummaryRecord {
    pub router: Router,
    pub nodes: u32,
    pub message_interval: String,
    pub delivery_prob: f64,
    pub delivery_prob_err: f64,
    pub latency_avg: f64,
    pub latency_avg_err: f64,
    pub overhead_ratio: f64,
    pub overhead_ratio_err: f64,
    pub speed_avg: Option<f64>,
    pub speed_avg_err: Option<f64>,
}
