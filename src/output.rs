use crate::error::Result;
use crate::types::{DashboardTables, RfmSummary};
use crate::util::{format_int, format_optional};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

/// Header row comes from the `Tabled` column names, so an empty table still
/// produces a readable file.
pub fn write_csv<T: Serialize + Tabled>(path: &Path, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    if rows.is_empty() {
        let headers = T::headers();
        wtr.write_record(headers.iter().map(|h| h.as_bytes()))?;
    }
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

#[derive(Serialize)]
struct SummaryFile<'a> {
    start: String,
    end: String,
    filtered_rows: usize,
    #[serde(flatten)]
    rfm: &'a RfmSummary,
}

/// Writes every table of one recompute into `dir`, returning the paths written.
pub fn export_tables(dir: &Path, tables: &DashboardTables) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let group_tables = [
        ("customers_by_city.csv", &tables.customers_by_city),
        ("customers_by_state.csv", &tables.customers_by_state),
        ("orders_by_city.csv", &tables.orders_by_city),
        ("orders_by_state.csv", &tables.orders_by_state),
        ("payment_type_ranks.csv", &tables.payment_types),
    ];
    let rfm_tables = [
        ("rfm_by_state.csv", &tables.rfm),
        ("rfm_top_recency.csv", &tables.rfm_by_recency),
        ("rfm_top_frequency.csv", &tables.rfm_by_frequency),
        ("rfm_top_monetary.csv", &tables.rfm_by_monetary),
    ];

    let mut written = Vec::new();
    for (name, rows) in group_tables {
        let path = dir.join(name);
        write_csv(&path, rows)?;
        written.push(path);
    }
    for (name, rows) in rfm_tables {
        let path = dir.join(name);
        write_csv(&path, rows)?;
        written.push(path);
    }

    let summary = SummaryFile {
        start: tables.range.start().to_string(),
        end: tables.range.end().to_string(),
        filtered_rows: tables.filtered.len(),
        rfm: &tables.rfm_summary,
    };
    let path = dir.join("rfm_summary.json");
    write_json(&path, &summary)?;
    written.push(path);

    log::debug!("exported {} files to {}", written.len(), dir.display());
    Ok(written)
}

pub fn preview_table<T>(title: &str, rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    println!("{}\n", title);
    let slice: Vec<T> = rows.iter().cloned().take(max_rows).collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}

/// Console rendition of one recompute.
pub fn print_dashboard(tables: &DashboardTables, max_rows: usize) {
    println!("E-Commerce Dashboard ({})", tables.range);
    println!("{} order rows in range\n", format_int(tables.filtered.len()));

    preview_table("Customers by City", &tables.customers_by_city, max_rows);
    preview_table("Customers by State", &tables.customers_by_state, max_rows);
    preview_table("Most Order City", &tables.orders_by_city, max_rows);
    preview_table("Most Order State", &tables.orders_by_state, max_rows);
    preview_table("Payment Type Ranks", &tables.payment_types, max_rows);

    let s = &tables.rfm_summary;
    println!("Best State on RFM Analysis\n");
    println!("Average Recency (days): {}", format_optional(s.mean_recency_days, 1));
    println!("Average Frequency: {}", format_optional(s.mean_frequency, 2));
    println!("Average Monetary: {}\n", format_optional(s.mean_monetary, 2));
    preview_table("By Recency (days)", &tables.rfm_by_recency, max_rows);
    preview_table("By Frequency", &tables.rfm_by_frequency, max_rows);
    preview_table("By Monetary", &tables.rfm_by_monetary, max_rows);
}
