//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `karma_core` linkage.
//! - Print the derived series and plot for a snapshot file.
//!
//! Usage: `karma_cli [snapshot.json] [screen_width]`

use karma_core::{ChartService, FileSnapshotSource};
use std::process::ExitCode;

const DEFAULT_SCREEN_WIDTH: f64 = 390.0;

fn main() -> ExitCode {
    println!("karma_core ping={}", karma_core::ping());
    println!("karma_core version={}", karma_core::core_version());

    let mut args = std::env::args().skip(1);
    let Some(snapshot_path) = args.next() else {
        return ExitCode::SUCCESS;
    };
    let screen_width = match args.next().map(|raw| raw.parse::<f64>()) {
        None => DEFAULT_SCREEN_WIDTH,
        Some(Ok(width)) => width,
        Some(Err(err)) => {
            eprintln!("invalid screen width: {err}");
            return ExitCode::FAILURE;
        }
    };

    let service = ChartService::new(FileSnapshotSource::new(snapshot_path));
    let chart = match service.refresh(screen_width) {
        Ok(chart) => chart,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let Some(headline) = &chart.headline else {
        println!("no history");
        return ExitCode::SUCCESS;
    };
    println!(
        "total={} tone={} mean={}",
        headline.total_text,
        headline.tone.as_str(),
        headline.mean_text
    );
    for (point, plotted) in chart.series.iter().zip(&chart.plot.points) {
        println!(
            "{} {} delta={:+} score={} x={:.1} y={:.1}",
            point.occurred_at,
            point.action_id,
            point.delta,
            point.cumulative_score,
            plotted.x,
            plotted.y
        );
    }
    println!(
        "zero_y={:.1} visible={} mean_y={:.1} visible={}",
        chart.plot.zero_y.y,
        chart.plot.zero_y.in_bounds,
        chart.plot.mean_y.y,
        chart.plot.mean_y.in_bounds
    );
    ExitCode::SUCCESS
}
