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
//! Fixed visual style assignment per router, identical across all figures of a run.
use std::collections::BTreeMap;

use lazy_static::lazy_static;
use plotly::common::{DashType, MarkerSymbol};
use strum::IntoEnumIterator;

use crate::records::Router;

/// Line color, marker shape, and dash pattern of one router.
#[derive(Clone, Debug)]
pub struct LineStyle {
    pub color: &'static str,
    pub marker: MarkerSymbol,
    pub dash: DashType,
}

/// Black plus the default color cycle.
const COLOR_WHEEL: [&str; 11] = [
    "#000000", "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2",
    "#7f7f7f", "#bcbd22", "#17becf",
];

/// Hollow markers so overlapping lines stay readable.
const MARKERS: [MarkerSymbol; 7] = [
    MarkerSymbol::CircleOpen,
    MarkerSymbol::Cross,
    MarkerSymbol::TriangleUpOpen,
    MarkerSymbol::TriangleDownOpen,
    MarkerSymbol::TriangleLeftOpen,
    MarkerSymbol::TriangleRightOpen,
    MarkerSymbol::SquareOpen,
];

const DASHES: [DashType; 4] = [
    DashType::Dash,
    DashType::Solid,
    DashType::DashDot,
    DashType::LongDashDot,
];

lazy_static! {
    static ref STYLES: BTreeMap<Router, LineStyle> = Router::iter()
        .zip(
            COLOR_WHEEL
                .iter()
                .zip(MARKERS.iter().cycle().zip(DASHES.iter().cycle()))
        )
        .map(|(router, (&color, (marker, dash)))| (
            router,
            LineStyle {
                color,
                marker: marker.clone(),
                dash: dash.clone(),
            }
        ))
        .collect();
}

/// The style assigned to the given router. Built once per process, so every figure of a run
/// draws the same router with the same style.
pub fn line_style(router: Router) -> &'static LineStyle {
    &STYLES[&router]
}

#[cfg(test)]
mod test {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn assignment_is_stable() {
        for router in Router::iter() {
            // the map is built once, so repeated lookups yield the very same entry
            assert!(std::ptr::eq(line_style(router), line_style(router)));
            assert_eq!(line_style(router).color, line_style(router).color);
        }
    }

    #[test]
    fn routers_get_distinct_colors() {
        let colors = Router::iter().map(|r| line_style(r).color).collect_vec();
        assert_eq!(colors.iter().unique().count(), colors.len());
    }

    #[test]
    fn first_router_is_black() {
        assert_eq!(line_style(Router::Proposed).color, "#000000");
        assert!(matches!(
            line_style(Router::Proposed).marker,
            MarkerSymbol::CircleOpen
        ));
    }
}
