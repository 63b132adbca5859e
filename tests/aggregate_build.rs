use scb_turnout::aggregate::{RegionYearValues, build};
use scb_turnout::{ModelError, RawRecord};

fn dict(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(c, n)| (c.to_string(), n.to_string()))
        .collect()
}

fn rec(code: &str, year: &str, raw: &str) -> RawRecord {
    RawRecord::new(code, year, raw)
}

#[test]
fn empty_input_yields_empty_table() {
    let agg = build(Vec::new(), Vec::new()).unwrap();
    assert!(agg.years().is_empty());
    assert!(agg.region_names().is_empty());
    assert!(agg.is_empty());
}

#[test]
fn single_record_is_queryable() {
    let agg = build(dict(&[("00", "Nyk")]), vec![rec("00", "1975", "12.5")]).unwrap();
    assert_eq!(agg.years(), vec!["1975"]);
    assert_eq!(agg.region_names(), vec!["Nyk"]);
    assert_eq!(agg.value_of("1975", "Nyk"), Ok(12.5));
}

#[test]
fn missing_year_is_no_such_value() {
    let agg = build(dict(&[("00", "Nyk")]), vec![rec("00", "1975", "12.5")]).unwrap();
    assert_eq!(
        agg.value_of("1976", "Nyk"),
        Err(ModelError::NoSuchValue {
            year: "1976".into(),
            region: "Nyk".into()
        })
    );
}

#[test]
fn unknown_region_name_is_distinct_from_missing_value() {
    let agg = build(dict(&[("00", "Nyk")]), vec![rec("00", "1975", "12.5")]).unwrap();
    assert_eq!(
        agg.value_of("1975", "Esk"),
        Err(ModelError::UnknownRegionName { name: "Esk".into() })
    );
}

#[test]
fn sentinel_removes_earlier_value() {
    let agg = build(
        dict(&[("00", "Nyk"), ("01", "Esk")]),
        vec![
            rec("00", "1975", "12.5"),
            rec("00", "1975", ".."),
            rec("01", "1975", "40"),
        ],
    )
    .unwrap();
    assert!(matches!(
        agg.value_of("1975", "Nyk"),
        Err(ModelError::NoSuchValue { .. })
    ));
    assert_eq!(agg.value_of("1975", "Esk"), Ok(40.0));
}

#[test]
fn sentinel_is_not_zero() {
    let agg = build(
        dict(&[("00", "Nyk"), ("01", "Esk")]),
        vec![rec("00", "1975", "0"), rec("01", "1975", "..")],
    )
    .unwrap();
    assert_eq!(agg.value_of("1975", "Nyk"), Ok(0.0));
    assert!(agg.value_of("1975", "Esk").is_err());
}

#[test]
fn catalog_only_lists_regions_with_data() {
    let agg = build(
        dict(&[("00", "Nyk"), ("01", "Esk"), ("02", "Ume")]),
        vec![
            rec("00", "1975", "12.5"),
            rec("01", "1975", ".."),
            rec("01", "1979", ".."),
        ],
    )
    .unwrap();
    assert_eq!(agg.region_names(), vec!["Nyk"]);
    // years follow the records, even when every value in a year was missing
    assert_eq!(agg.years(), vec!["1975", "1979"]);
}

#[test]
fn years_and_names_are_sorted_and_unique() {
    let agg = build(
        dict(&[("00", "Vellinge"), ("01", "Danderyd"), ("02", "Lomma")]),
        vec![
            rec("00", "1982", "95.0"),
            rec("01", "1973", "90.0"),
            rec("02", "1976", "96.0"),
            rec("00", "1973", "95.4"),
        ],
    )
    .unwrap();
    assert_eq!(agg.years(), vec!["1973", "1976", "1982"]);
    assert_eq!(agg.region_names(), vec!["Danderyd", "Lomma", "Vellinge"]);
}

#[test]
fn unknown_region_code_is_fatal() {
    let err = build(dict(&[("00", "Nyk")]), vec![rec("99", "1975", "1.0")]).unwrap_err();
    assert_eq!(err, ModelError::UnknownRegionCode { code: "99".into() });
}

#[test]
fn malformed_value_is_fatal() {
    let err = build(dict(&[("00", "Nyk")]), vec![rec("00", "1975", "n/a")]).unwrap_err();
    assert_eq!(
        err,
        ModelError::MalformedValue {
            year: "1975".into(),
            code: "00".into(),
            raw: "n/a".into()
        }
    );
}

#[test]
fn record_order_does_not_matter() {
    let d = dict(&[("00", "Nyk"), ("01", "Esk"), ("02", "Ume")]);
    let records = vec![
        rec("00", "1973", "88.1"),
        rec("01", "1973", "91.2"),
        rec("02", "1973", ".."),
        rec("00", "1976", "90.0"),
        rec("02", "1976", "89.5"),
    ];
    let forward = build(d.clone(), records.clone()).unwrap();
    let mut reversed = records.clone();
    reversed.reverse();
    let backward = build(d.clone(), reversed).unwrap();
    let mut rotated = records;
    rotated.rotate_left(2);
    let shifted = build(d, rotated).unwrap();
    assert_eq!(forward, backward);
    assert_eq!(forward, shifted);
}
