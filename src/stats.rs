use crate::aggregate::RegionYearValues;
use crate::error::ModelError;
use std::collections::BTreeMap;

/// Highest value of a year and every region that reached it.
#[derive(Debug, Clone, PartialEq)]
pub struct YearWinner {
    pub value: f64,
    /// Ascending by name.
    pub regions: Vec<String>,
}

/// year -> winner, iterated in ascending year order.
pub type YearlyWinners = BTreeMap<String, YearWinner>;

/// For every year, find the maximum value over all regions except
/// `excluded_region` and the regions tied at it.
///
/// The running maximum starts at `0.0`, so a year without data reports
/// `0.0` and no regions. Ties use exact float equality. An `excluded_region`
/// that is not in the catalog excludes nothing.
pub fn compute_yearly_winners<T>(
    table: &T,
    excluded_region: &str,
) -> Result<YearlyWinners, ModelError>
where
    T: RegionYearValues + ?Sized,
{
    let regions = table.region_names();
    let mut out = YearlyWinners::new();
    for year in table.years() {
        let mut best = 0.0_f64;
        let mut winners: Vec<String> = Vec::new();
        for region in regions.iter().filter(|r| r.as_str() != excluded_region) {
            let v = match table.value_of(&year, region) {
                Ok(v) => v,
                Err(ModelError::NoSuchValue { .. }) => continue,
                Err(e) => return Err(e),
            };
            if v > best {
                best = v;
                winners.clear();
                winners.push(region.clone());
            } else if v == best {
                winners.push(region.clone());
            }
        }
        out.insert(
            year,
            YearWinner {
                value: best,
                regions: winners,
            },
        );
    }
    Ok(out)
}
