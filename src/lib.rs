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
//! Library for aggregating MANET routing-protocol simulation results and rendering the
//! comparison figures of the paper.
use std::collections::BTreeMap;

/// Interval buckets as they appear in the `message_interval` column of the results CSV. The
/// stray space in `"60, 120"` is an artifact of the simulation exports and must be matched
/// verbatim.
pub const MESSAGE_INTERVALS: [&str; 4] = ["5,25", "25,35", "35,60", "60, 120"];

/// Cleaned-up x-axis tick labels, index-aligned with [`MESSAGE_INTERVALS`].
pub const INTERVAL_LABELS: [&str; 4] = ["[5,25]", "[25,35]", "[35,60]", "[60,120]"];

/// Network sizes shown in the figures, one subplot each, in left-to-right order.
pub const NETWORK_SIZES: [u32; 3] = [100, 200, 400];

/// Aggregated results, one row per `(router, nodes, message_interval)` group.
pub type SummaryTable = BTreeMap<aggregate::GroupKey, aggregate::SummaryRow>;

pub mod aggregate;
pub mod records;
pub mod render;
pub mod style;
pub mod util;

pub mod prelude {
    pub use super::{
        aggregate::{EvalError, GroupKey, MetricSummary, RecordFilter, SummaryRow},
        records::{Metric, Router, SimulationRecord},
        render::{RenderConfig, SplitConfig},
        SummaryTable,
    };
}
