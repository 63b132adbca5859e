use crate::stats::YearlyWinners;
use anyhow::Result;
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Flat row used for both export formats.
#[derive(Debug, Serialize)]
struct WinnerRow<'a> {
    year: &'a str,
    value: f64,
    regions: &'a [String],
}

fn rows(winners: &YearlyWinners) -> Vec<WinnerRow<'_>> {
    winners
        .iter()
        .map(|(year, w)| WinnerRow {
            year,
            value: w.value,
            regions: &w.regions,
        })
        .collect()
}

/// Prefix cells that a spreadsheet would evaluate as a formula.
fn neutralize(cell: &str) -> String {
    if cell.starts_with(['=', '+', '-', '@']) {
        format!("'{}", cell)
    } else {
        cell.to_string()
    }
}

/// Save yearly winners as CSV with header. Regions are joined with `"; "`.
pub fn save_csv<P: AsRef<Path>>(winners: &YearlyWinners, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("year", "value", "regions"))?;
    for r in rows(winners) {
        let regions = r
            .regions
            .iter()
            .map(|s| neutralize(s))
            .collect::<Vec<_>>()
            .join("; ");
        wtr.serialize((neutralize(r.year), r.value, regions))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save yearly winners as pretty JSON array.
pub fn save_json<P: AsRef<Path>>(winners: &YearlyWinners, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(&rows(winners))?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
