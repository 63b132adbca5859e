//! Aggregator: turns raw records plus the region dictionary into a
//! year -> region -> value table.
//!
//! Value parsing and the missing-data policy are applied once, in [`build`].
//! After that the table is read-only.

use crate::error::ModelError;
use crate::models::{MISSING_SENTINEL, RawRecord};
use log::debug;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Read contract the selector works against.
pub trait RegionYearValues {
    /// Year labels, ascending and deduplicated.
    fn years(&self) -> Vec<String>;
    /// Region names with at least one value, ascending and deduplicated.
    fn region_names(&self) -> Vec<String>;
    /// Value for `year` and `region_name`.
    ///
    /// Returns [`ModelError::NoSuchValue`] when the pair has no observation and
    /// [`ModelError::UnknownRegionName`] when the name is not in the dictionary.
    fn value_of(&self, year: &str, region_name: &str) -> Result<f64, ModelError>;
}

/// Aggregated table plus the catalog of regions that carry data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregate {
    /// year -> region code -> value. A year whose records were all
    /// sentinels is kept with an empty inner map.
    table: BTreeMap<String, BTreeMap<String, f64>>,
    catalog: BTreeSet<String>,
    name_to_code: HashMap<String, String>,
}

/// Build the table from the region dictionary and the raw records.
///
/// Later dictionary entries win on duplicate codes or names, and later records
/// win on duplicate (year, code) pairs. A `".."` value removes the pair.
pub fn build<D, R>(region_dictionary: D, records: R) -> Result<Aggregate, ModelError>
where
    D: IntoIterator<Item = (String, String)>,
    R: IntoIterator<Item = RawRecord>,
{
    let mut code_to_name: HashMap<String, String> = HashMap::new();
    let mut name_to_code: HashMap<String, String> = HashMap::new();
    for (code, name) in region_dictionary {
        // a renamed code must not stay reachable under its old name
        if let Some(old) = code_to_name.insert(code.clone(), name.clone())
            && old != name
            && name_to_code.get(&old) == Some(&code)
        {
            name_to_code.remove(&old);
        }
        name_to_code.insert(name, code);
    }

    let mut table: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    let mut seen = 0usize;
    for rec in records {
        seen += 1;
        if !code_to_name.contains_key(&rec.region_code) {
            return Err(ModelError::UnknownRegionCode {
                code: rec.region_code,
            });
        }
        let parsed = parse_value(&rec.raw_value);
        let by_code = table.entry(rec.year.clone()).or_default();
        match parsed {
            Some(v) => {
                by_code.insert(rec.region_code, v);
            }
            None if rec.raw_value == MISSING_SENTINEL => {
                by_code.remove(&rec.region_code);
            }
            None => {
                return Err(ModelError::MalformedValue {
                    year: rec.year,
                    code: rec.region_code,
                    raw: rec.raw_value,
                });
            }
        }
    }

    let catalog: BTreeSet<String> = table
        .values()
        .flat_map(|by_code| by_code.keys())
        .filter_map(|code| code_to_name.get(code).cloned())
        .collect();

    debug!(
        "aggregated {} records into {} years, {} regions with data",
        seen,
        table.len(),
        catalog.len()
    );

    Ok(Aggregate {
        table,
        catalog,
        name_to_code,
    })
}

/// Parse a decimal value, rejecting non-finite results.
fn parse_value(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

impl Aggregate {
    /// Number of (year, region) pairs holding a value.
    pub fn len(&self) -> usize {
        self.table.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RegionYearValues for Aggregate {
    fn years(&self) -> Vec<String> {
        self.table.keys().cloned().collect()
    }

    fn region_names(&self) -> Vec<String> {
        self.catalog.iter().cloned().collect()
    }

    fn value_of(&self, year: &str, region_name: &str) -> Result<f64, ModelError> {
        let code = self
            .name_to_code
            .get(region_name)
            .ok_or_else(|| ModelError::UnknownRegionName {
                name: region_name.to_string(),
            })?;
        self.table
            .get(year)
            .and_then(|by_code| by_code.get(code))
            .copied()
            .ok_or_else(|| ModelError::NoSuchValue {
                year: year.to_string(),
                region: region_name.to_string(),
            })
    }
}
