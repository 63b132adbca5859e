use thiserror::Error;

/// Failures raised while building or querying the aggregated table.
///
/// `NoSuchValue` is the expected "no observation" case and is handled by
/// the caller; every other variant means the input contract was broken.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("record references region code {code:?} missing from the metadata")]
    UnknownRegionCode { code: String },

    #[error("malformed value {raw:?} for region {code:?} in {year}")]
    MalformedValue {
        year: String,
        code: String,
        raw: String,
    },

    #[error("no value for {region:?} in {year}")]
    NoSuchValue { year: String, region: String },

    #[error("unknown region name {name:?}")]
    UnknownRegionName { name: String },
}
