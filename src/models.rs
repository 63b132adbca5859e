use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Placeholder the API uses when no observation exists for a (year, region) pair.
pub const MISSING_SENTINEL: &str = "..";

/// Which election's turnout to request from the ME0104T4 table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElectionKind {
    /// Riksdag (national parliament) elections
    Parliament,
    /// County / regional council elections
    County,
    /// Municipal council elections
    Municipal,
}

impl ElectionKind {
    /// The `ContentsCode` value selecting this election's turnout series.
    pub fn contents_code(&self) -> &'static str {
        match *self {
            ElectionKind::Parliament => "ME0104B8",
            ElectionKind::County => "ME0104C5",
            ElectionKind::Municipal => "ME0104C6",
        }
    }
}

/// Table metadata returned by a `GET` on a table path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableMeta {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub variables: Vec<Variable>,
}

/// One dimension of a table, e.g. `Region` or `Tid`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variable {
    pub code: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(rename = "valueTexts", default)]
    pub value_texts: Vec<String>,
    #[serde(default)]
    pub time: bool,
}

impl TableMeta {
    /// Code/name pairs of the `Region` variable, in metadata order.
    ///
    /// Tables without a `Region` variable yield an empty dictionary.
    pub fn region_dictionary(&self) -> Vec<(String, String)> {
        self.variables
            .iter()
            .filter(|v| v.code == "Region")
            .flat_map(|v| v.values.iter().cloned().zip(v.value_texts.iter().cloned()))
            .collect()
    }
}

/// Column description in a data response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub code: String,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// One row of a data response: dimension keys plus the measured value(s).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataRow {
    pub key: Vec<String>,
    pub values: Vec<String>,
}

/// Body returned by a `POST` query with `"format": "json"`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataResponse {
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub data: Vec<DataRow>,
}

impl DataResponse {
    /// Flatten the response into raw records.
    ///
    /// Key positions come from `columns` when they list `Region` and `Tid`,
    /// otherwise region is key 0 and year is key 1.
    pub fn records(&self) -> Result<Vec<RawRecord>> {
        let key_columns: Vec<&Column> =
            self.columns.iter().filter(|c| c.kind != "c").collect();
        let pos = |code: &str, fallback: usize| {
            key_columns
                .iter()
                .position(|c| c.code == code)
                .unwrap_or(fallback)
        };
        let region_at = pos("Region", 0);
        let year_at = pos("Tid", 1);

        let mut out = Vec::with_capacity(self.data.len());
        for (i, row) in self.data.iter().enumerate() {
            let (Some(region), Some(year)) = (row.key.get(region_at), row.key.get(year_at)) else {
                bail!("data row {} has key {:?}, expected region and year", i, row.key);
            };
            let Some(value) = row.values.first() else {
                bail!("data row {} has no values", i);
            };
            out.push(RawRecord {
                region_code: region.clone(),
                year: year.clone(),
                raw_value: value.clone(),
            });
        }
        Ok(out)
    }
}

/// A single (region, year, value-text) observation as delivered by the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub region_code: String,
    /// Year label kept verbatim (e.g. `"1973"`).
    pub year: String,
    pub raw_value: String,
}

impl RawRecord {
    pub fn new(
        region_code: impl Into<String>,
        year: impl Into<String>,
        raw_value: impl Into<String>,
    ) -> Self {
        Self {
            region_code: region_code.into(),
            year: year.into(),
            raw_value: raw_value.into(),
        }
    }
}

/// Selection part of a query filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub filter: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFilter {
    pub code: String,
    pub selection: Selection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseFormat {
    pub format: String,
}

/// Body of a data `POST`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataQuery {
    pub query: Vec<QueryFilter>,
    pub response: ResponseFormat,
}

impl DataQuery {
    /// All regions and all years for a single contents code.
    pub fn all_regions_and_years(contents_code: &str) -> Self {
        let filter = |code: &str, filter: &str, value: &str| QueryFilter {
            code: code.into(),
            selection: Selection {
                filter: filter.into(),
                values: vec![value.into()],
            },
        };
        Self {
            query: vec![
                filter("Region", "all", "*"),
                filter("ContentsCode", "item", contents_code),
                filter("Tid", "all", "*"),
            ],
            response: ResponseFormat {
                format: "json".into(),
            },
        }
    }
}
