use crate::api::{DEFAULT_BASE_URL, DEFAULT_TABLE};
use crate::models::ElectionKind;

/// Name of the nationwide aggregate row in SCB region lists.
pub const NATIONWIDE_REGION: &str = "Riket";

/// Settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub table_path: String,
    pub contents_code: String,
    /// Aggregate pseudo-region left out of the per-year maximum (exact match).
    pub excluded_region: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            table_path: DEFAULT_TABLE.into(),
            contents_code: ElectionKind::Parliament.contents_code().into(),
            excluded_region: NATIONWIDE_REGION.into(),
        }
    }
}

impl Settings {
    pub fn with_election(mut self, kind: ElectionKind) -> Self {
        self.contents_code = kind.contents_code().into();
        self
    }
}
