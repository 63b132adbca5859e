use crate::aggregate;
use crate::api::DataSource;
use crate::stats::{YearlyWinners, compute_yearly_winners};
use anyhow::{Context, Result};
use log::info;

/// Fetch, aggregate and select: the whole run short of rendering.
pub fn yearly_winners<S>(
    source: &S,
    contents_code: &str,
    excluded_region: &str,
) -> Result<YearlyWinners>
where
    S: DataSource + ?Sized,
{
    let regions = source.fetch_metadata().context("fetch metadata")?;
    info!("metadata lists {} regions", regions.len());
    let records = source
        .fetch_records(contents_code)
        .with_context(|| format!("fetch records for {}", contents_code))?;
    info!("fetched {} records for {}", records.len(), contents_code);

    let agg = aggregate::build(regions, records).context("aggregate records")?;
    let winners =
        compute_yearly_winners(&agg, excluded_region).context("select yearly maxima")?;
    info!("computed winners for {} years", winners.len());
    Ok(winners)
}
