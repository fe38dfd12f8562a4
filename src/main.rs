// Entry point and high-level CLI flow.
//
// - Load and clean the order CSV once, printing diagnostics.
// - Recompute every dashboard table for the requested date range, preview
//   them on the console and export them.
// - In interactive mode, keep asking for new ranges until the user quits.
use anyhow::{bail, Result};
use clap::Parser;
use ecom_dashboard::util::{format_int, parse_date};
use ecom_dashboard::{loader, output, Args, Dashboard, DateRange};
use std::io::{self, Write};

/// Build a range from optional endpoints, defaulting to the table bounds and
/// refusing anything outside them.
fn resolve_range(
    bounds: &DateRange,
    start: Option<chrono::NaiveDate>,
    end: Option<chrono::NaiveDate>,
) -> Result<DateRange> {
    let range = DateRange::new(
        start.unwrap_or(bounds.start()),
        end.unwrap_or(bounds.end()),
    )?;
    if !range.is_within(bounds) {
        bail!("range {range} lies outside the loaded data ({bounds})");
    }
    Ok(range)
}

fn run_report(dashboard: &Dashboard, range: DateRange, preview_rows: usize) -> Result<()> {
    let tables = dashboard.recompute(range);
    output::print_dashboard(&tables, preview_rows);
    let dir = &dashboard.config().output_dir;
    let written = output::export_tables(dir, &tables)?;
    println!("(Full tables exported to {}, {} files)\n", dir.display(), written.len());
    Ok(())
}

/// Read a `start end` pair from stdin. `None` means the user asked to quit.
fn read_range_line() -> Option<String> {
    print!("Date range (YYYY-MM-DD YYYY-MM-DD, q to quit): ");
    if let Err(e) = io::stdout().flush() {
        log::warn!("failed to flush prompt: {e}");
    }
    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        Ok(0) => None,
        Err(e) => {
            log::warn!("failed to read date range from stdin: {e}");
            None
        }
        Ok(_) => {
            let line = buf.trim().to_string();
            (!line.eq_ignore_ascii_case("q")).then_some(line)
        }
    }
}

fn parse_range_line(bounds: &DateRange, line: &str) -> Result<DateRange> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 2 {
        bail!("expected two dates separated by a space");
    }
    resolve_range(bounds, Some(parse_date(parts[0])?), Some(parse_date(parts[1])?))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = args.resolve_config()?;

    let (records, report) = loader::load_orders(&args.input)?;
    println!(
        "Processing dataset... ({} rows read, {} loaded)",
        format_int(report.total_rows),
        format_int(report.loaded_rows)
    );
    if report.parse_errors > 0 {
        println!(
            "Note: {} rows skipped due to parse/validation errors.",
            format_int(report.parse_errors)
        );
    }
    println!();

    let dashboard = Dashboard::new(records, config);
    let Some(bounds) = dashboard.bounds() else {
        bail!("no valid orders in {}", args.input.display());
    };

    let range = resolve_range(&bounds, args.start_date()?, args.end_date()?)?;
    run_report(&dashboard, range, args.preview_rows)?;

    if args.interactive {
        while let Some(line) = read_range_line() {
            match parse_range_line(&bounds, &line) {
                Ok(range) => run_report(&dashboard, range, args.preview_rows)?,
                Err(e) => println!("Invalid range: {e}\n"),
            }
        }
        println!("Exiting the program.");
    }
    Ok(())
}
