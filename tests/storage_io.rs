use std::fs;
use tempfile::tempdir;
use weo_rs::Frame;
use weo_rs::storage;

fn sample() -> Frame {
    Frame::new(
        vec!["2018".into(), "2019".into()],
        vec!["DEU".into(), "USA".into()],
        vec![vec![Some(1.5), None], vec![Some(2.0), Some(20.25)]],
    )
}

#[test]
fn save_csv_and_json() {
    let frame = sample();
    let dir = tempdir().unwrap();

    let csv_path = dir.path().join("weo_test.csv");
    storage::save_csv(&frame, "year", &csv_path).unwrap();
    let csv_txt = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = csv_txt.lines().collect();
    assert_eq!(lines, vec!["year,DEU,USA", "2018,1.5,", "2019,2,20.25"]);

    let json_path = dir.path().join("weo_test.json");
    storage::save_json(&frame, &json_path).unwrap();
    let json_txt = fs::read_to_string(&json_path).unwrap();
    let v: serde_json::Value = serde_json::from_str(&json_txt).unwrap();
    let arr = v.as_array().unwrap();
    assert_eq!(arr.len(), frame.index.len());
    assert_eq!(arr[0]["index"], "2018");
    assert_eq!(arr[0]["values"]["DEU"], 1.5);
    assert!(arr[0]["values"]["USA"].is_null());
}

//labels starting with =, +, - or @ would be evaluated by spreadsheet software
#[test]
fn csv_labels_are_prefixed_to_avoid_formulas() {
    let frame = Frame::new(
        vec!["=HYPERLINK(\"http://evil\")".into()],
        vec!["@foo".into()],
        vec![vec![Some(-1.0)]],
    );
    let dir = tempdir().unwrap();
    let p = dir.path().join("csv_injection.csv");
    storage::save_csv(&frame, "+SUM(A1:A9)", &p).unwrap();

    let mut rdr = csv::Reader::from_path(&p).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(&headers[0], "'+SUM(A1:A9)");
    assert_eq!(&headers[1], "'@foo");
    let row = rdr.records().next().expect("one data row expected").unwrap();
    assert!(row[0].starts_with('\''), "row label not prefixed: {}", &row[0]);
    // values are numbers, not labels
    assert_eq!(&row[1], "-1");
}
