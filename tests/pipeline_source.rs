//! Runs the pipeline against an in-memory data source.

use anyhow::{Result, bail};
use scb_turnout::config::Settings;
use scb_turnout::{DataSource, RawRecord, YearWinner, pipeline};

struct FixedSource {
    regions: Vec<(String, String)>,
    records: Vec<RawRecord>,
}

impl DataSource for FixedSource {
    fn fetch_metadata(&self) -> Result<Vec<(String, String)>> {
        Ok(self.regions.clone())
    }

    fn fetch_records(&self, contents_code: &str) -> Result<Vec<RawRecord>> {
        if contents_code != "ME0104B8" {
            bail!("unknown contents code {}", contents_code);
        }
        Ok(self.records.clone())
    }
}

struct Unavailable;

impl DataSource for Unavailable {
    fn fetch_metadata(&self) -> Result<Vec<(String, String)>> {
        bail!("request failed with HTTP 429 Too Many Requests")
    }

    fn fetch_records(&self, _contents_code: &str) -> Result<Vec<RawRecord>> {
        unreachable!("metadata fails first")
    }
}

fn source() -> FixedSource {
    FixedSource {
        regions: vec![
            ("00".into(), "Riket".into()),
            ("1231".into(), "Burlöv".into()),
            ("1262".into(), "Lomma".into()),
            ("1233".into(), "Vellinge".into()),
        ],
        records: vec![
            RawRecord::new("00", "1973", "90.8"),
            RawRecord::new("1231", "1973", "90.1"),
            RawRecord::new("1262", "1973", "95.1"),
            RawRecord::new("1233", "1973", "95.4"),
            RawRecord::new("00", "1979", "99.0"),
            RawRecord::new("1231", "1979", ".."),
            RawRecord::new("1262", "1979", "95.3"),
            RawRecord::new("1233", "1979", "95.3"),
        ],
    }
}

#[test]
fn default_settings_drive_the_pipeline() {
    let s = Settings::default();
    let w = pipeline::yearly_winners(&source(), &s.contents_code, &s.excluded_region).unwrap();
    assert_eq!(w.keys().collect::<Vec<_>>(), vec!["1973", "1979"]);
    assert_eq!(
        w["1973"],
        YearWinner {
            value: 95.4,
            regions: vec!["Vellinge".into()]
        }
    );
    assert_eq!(
        w["1979"],
        YearWinner {
            value: 95.3,
            regions: vec!["Lomma".into(), "Vellinge".into()]
        }
    );
}

#[test]
fn build_errors_abort_the_run() {
    let mut src = source();
    src.records.push(RawRecord::new("9999", "1979", "50.0"));
    let err = pipeline::yearly_winners(&src, "ME0104B8", "Riket").unwrap_err();
    assert!(format!("{:#}", err).contains("9999"));
}

#[test]
fn source_errors_propagate() {
    let err = pipeline::yearly_winners(&Unavailable, "ME0104B8", "Riket").unwrap_err();
    assert!(format!("{:#}", err).contains("429"));
    let err = pipeline::yearly_winners(&source(), "ME0104C6", "Riket").unwrap_err();
    assert!(format!("{:#}", err).contains("ME0104C6"));
}
