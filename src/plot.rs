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
//! Binary producing the comparison figures of the paper from a simulation results CSV.
use std::{fs, path::Path, process};

use clap::Parser;

use manet_eval::{
    aggregate::{self, RecordFilter},
    render, util,
};

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    /// CSV file to plot results from.
    #[arg(short, long)]
    csv: String,
    /// Overwrite the output path for plots.
    #[arg(short, long, default_value = "./plots/")]
    output_path: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    util::init_logging();
    let args = Args::parse();

    let output_dir = Path::new(&args.output_path);
    fs::create_dir_all(output_dir)?;

    let records = match aggregate::load_records(&args.csv) {
        Ok(records) => records,
        Err(err) => {
            log::error!("Error processing file {}: {err}", args.csv);
            process::exit(1);
        }
    };
    log::info!("Loaded {} simulation runs from {}", records.len(), args.csv);

    let records = aggregate::filter_records(records, &RecordFilter::default());
    if records.is_empty() {
        log::warn!("No simulation runs left after filtering, plots will be empty");
    }

    let summary = aggregate::summarize(&records);
    log::info!("Aggregated {} groups", summary.len());
    aggregate::write_summary_csv(&summary, output_dir.join("summary.csv"))?;

    render::render_all(&summary, output_dir)?;
    Ok(())
}
