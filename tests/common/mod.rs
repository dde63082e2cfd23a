#![allow(dead_code)]

use std::path::{Path, PathBuf};

pub const YEARS: [&str; 3] = ["2017", "2018", "2019"];

/// (WEO country code, ISO, name)
pub const COUNTRIES: [(&str, &str, &str); 4] = [
    ("134", "DEU", "Germany"),
    ("138", "NLD", "Netherlands"),
    ("111", "USA", "United States"),
    ("662", "CIV", "Côte d'Ivoire"),
];

/// (code, subject descriptor, unit)
pub const SUBJECTS: [(&str, &str, &str); 10] = [
    ("NGDP_RPCH", "Gross domestic product, constant prices", "Percent change"),
    ("NGDP", "Gross domestic product, current prices", "National currency"),
    ("NGDPD", "Gross domestic product, current prices", "U.S. dollars"),
    ("PCPIEPCH", "Inflation, end of period consumer prices", "Percent change"),
    ("LUR", "Unemployment rate", "Percent of total labor force"),
    ("LP", "Population", "Persons"),
    ("GGXCNL_NGDP", "General government net lending/borrowing", "Percent of GDP"),
    ("GGXWDG_NGDP", "General government gross debt", "Percent of GDP"),
    ("BCA", "Current account balance", "U.S. dollars"),
    ("BCA_NGDPD", "Current account balance", "Percent of GDP"),
];

pub const LIBOR: (&str, &str, &str) = (
    "FLIBOR6",
    "Six-month London interbank offered rate (LIBOR)",
    "Percent",
);

pub const FOOTNOTE: &str =
    "International Monetary Fund, World Economic Outlook Database, October 2019";

const HEADER: [&str; 9] = [
    "WEO Country Code",
    "ISO",
    "WEO Subject Code",
    "Country",
    "Subject Descriptor",
    "Subject Notes",
    "Units",
    "Scale",
    "Country/Series-specific Notes",
];

/// Cell value for country `c`, subject `s`, year `y` (indices into the
/// constants above). Côte d'Ivoire has no unemployment data and no 2019
/// population.
pub fn value(c: usize, s: usize, y: usize) -> Option<f64> {
    let (_, iso, _) = COUNTRIES[c];
    let (code, _, _) = SUBJECTS[s];
    match (iso, code, y) {
        ("CIV", "LUR", _) => None,
        ("CIV", "LP", 2) => None,
        _ => Some(1000.0 * (c + 1) as f64 + 10.0 * s as f64 + y as f64 + 0.5),
    }
}

fn cell(c: usize, s: usize, y: usize) -> String {
    match value(c, s, y) {
        None if SUBJECTS[s].0 == "LUR" => "n/a".to_string(),
        None => "--".to_string(),
        Some(v) => with_thousands(v),
    }
}

fn with_thousands(v: f64) -> String {
    let s = format!("{:.1}", v);
    let (int, frac) = s.split_once('.').unwrap();
    let mut grouped = String::new();
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}.{}", grouped, frac)
}

fn row(weo: &str, iso: &str, name: &str, subject: (&str, &str, &str), cells: Vec<String>) -> String {
    let (code, descriptor, unit) = subject;
    let mut fields = vec![
        weo.to_string(),
        iso.to_string(),
        code.to_string(),
        name.to_string(),
        descriptor.to_string(),
        "Notes".to_string(),
        unit.to_string(),
        "Units".to_string(),
        "See notes".to_string(),
    ];
    fields.extend(cells);
    fields.push("2018".to_string());
    fields.join("\t")
}

/// Tab-delimited sample table in the layout of the WEO country file.
/// `trailing_tab` adds the empty trailing column seen in newer files.
pub fn sample_text(trailing_tab: bool) -> String {
    let mut lines = Vec::new();
    let mut header: Vec<&str> = HEADER.to_vec();
    header.extend(YEARS);
    header.push("Estimates Start After");
    lines.push(header.join("\t"));
    for (c, (weo, iso, name)) in COUNTRIES.iter().enumerate() {
        for (s, subject) in SUBJECTS.iter().enumerate() {
            let cells = (0..YEARS.len()).map(|y| cell(c, s, y)).collect();
            lines.push(row(weo, iso, name, *subject, cells));
        }
        if *iso == "USA" {
            let cells = vec!["1.5".to_string(), "2.5".to_string(), "2.25".to_string()];
            lines.push(row(weo, iso, name, LIBOR, cells));
        }
    }
    lines.push(String::new());
    lines.push(FOOTNOTE.to_string());
    let sep = if trailing_tab { "\t\r\n" } else { "\r\n" };
    let mut text = lines.join(sep);
    text.push_str(sep);
    text
}

pub fn latin1(text: &str) -> Vec<u8> {
    text.chars().map(|c| c as u32 as u8).collect()
}

pub fn utf16le(text: &str) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xFE];
    bytes.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
    bytes
}

/// Write the sample as an ISO-8859-1 file (the pre-2020 layout).
pub fn write_latin1(dir: &Path) -> PathBuf {
    let p = dir.join("weo_latin1.csv");
    std::fs::write(&p, latin1(&sample_text(false))).unwrap();
    p
}

/// Write the sample as a UTF-16LE file with trailing empty columns.
pub fn write_utf16(dir: &Path) -> PathBuf {
    let p = dir.join("weo_utf16.csv");
    std::fs::write(&p, utf16le(&sample_text(true))).unwrap();
    p
}
