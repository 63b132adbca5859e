/// Synchronous client for the **SCB PxWeb API (v1)**.
///
/// A table is addressed by its path below the base URL. A `GET` on the path
/// returns the table metadata; a `POST` with a JSON query returns the data.
///
/// ### Notes
/// - Data responses are prefixed with a UTF-8 byte-order mark; it is stripped
///   before decoding.
/// - The API rate limits callers, so the whole table is fetched in one query
///   and filtered locally.
/// - Network timeouts use a sane default (30s) and can be adjusted by editing the client builder.
///
/// Typical usage:
/// ```no_run
/// # use scb_turnout::api::{Client, DataSource};
/// let client = Client::default();
/// let regions = client.fetch_metadata()?;
/// let records = client.fetch_records("ME0104B8")?;
/// # Ok::<(), anyhow::Error>(())
/// ```
use crate::models::{DataQuery, DataResponse, RawRecord, TableMeta};
use anyhow::{Context, Result, bail};
use log::{debug, warn};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::{Client as HttpClient, RequestBuilder};
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.scb.se/OV0104/v1/doris/sv/ssd";
pub const DEFAULT_TABLE: &str = "START/ME/ME0104/ME0104D/ME0104T4";

/// Where region dictionaries and raw records come from.
pub trait DataSource {
    /// Region code/name pairs of the table.
    fn fetch_metadata(&self) -> Result<Vec<(String, String)>>;
    /// All (region, year, value) records for one contents code.
    fn fetch_records(&self, contents_code: &str) -> Result<Vec<RawRecord>>;
}

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    pub table_path: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_TABLE)
    }
}

// Allow -, _, . unescaped in path segments
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

fn enc_path(path: &str) -> String {
    path.split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| percent_encoding::utf8_percent_encode(s, SAFE).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Strip a leading UTF-8 byte-order mark, if any.
pub fn strip_bom(body: &[u8]) -> &[u8] {
    body.strip_prefix(b"\xEF\xBB\xBF".as_slice()).unwrap_or(body)
}

/// Decode a JSON body that may start with a byte-order mark.
pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(strip_bom(body)).context("decode json")
}

impl Client {
    pub fn new(base_url: impl Into<String>, table_path: impl Into<String>) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("scb_turnout/", env!("CARGO_PKG_VERSION"))) // set user agent
            .build()
            .expect("reqwest client build");
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            table_path: table_path.into(),
            http,
        }
    }

    /// Full URL of the configured table.
    pub fn table_url(&self) -> String {
        format!("{}/{}", self.base_url, enc_path(&self.table_path))
    }

    /// Send a request, retrying on 5xx responses and network errors.
    fn send_with_retry(&self, build: impl Fn() -> RequestBuilder) -> Result<Vec<u8>> {
        let mut last_err: Option<anyhow::Error> = None;
        for backoff_ms in [100u64, 300, 700] {
            match build().send() {
                Ok(r) if r.status().is_success() => {
                    return Ok(r.bytes().context("read response body")?.to_vec());
                }
                Ok(r) if r.status().is_server_error() => {
                    warn!("server error {}, retrying in {}ms", r.status(), backoff_ms);
                    last_err = Some(anyhow::anyhow!("HTTP {}", r.status()));
                }
                Ok(r) => bail!("request failed with HTTP {}", r.status()),
                Err(e) => {
                    warn!("network error ({}), retrying in {}ms", e, backoff_ms);
                    last_err = Some(e.into());
                }
            }
            std::thread::sleep(Duration::from_millis(backoff_ms));
        }
        bail!("network error: {:?}", last_err);
    }

    /// Fetch the table metadata.
    pub fn fetch_table_meta(&self) -> Result<TableMeta> {
        let url = self.table_url();
        debug!("GET {}", url);
        let body = self
            .send_with_retry(|| self.http.get(&url))
            .with_context(|| format!("GET {}", url))?;
        decode_json(&body).context("parse table metadata")
    }

    /// Fetch every region and year for `contents_code`.
    pub fn fetch_data(&self, contents_code: &str) -> Result<DataResponse> {
        let url = self.table_url();
        let query = DataQuery::all_regions_and_years(contents_code);
        debug!("POST {} (ContentsCode={})", url, contents_code);
        let body = self
            .send_with_retry(|| self.http.post(&url).json(&query))
            .with_context(|| format!("POST {}", url))?;
        decode_json(&body).context("parse data response")
    }
}

impl DataSource for Client {
    fn fetch_metadata(&self) -> Result<Vec<(String, String)>> {
        Ok(self.fetch_table_meta()?.region_dictionary())
    }

    fn fetch_records(&self, contents_code: &str) -> Result<Vec<RawRecord>> {
        self.fetch_data(contents_code)?.records()
    }
}
