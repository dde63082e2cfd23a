use weo_rs::Frame;
use weo_rs::stats::column_summary;

#[test]
fn column_stats_handle_missing_and_median_even_odd() {
    // AAA: [1,2,3,4] -> median = (2+3)/2 = 2.5
    // BBB: [10, None, 30, None] -> missing = 2, median = 20
    let frame = Frame::new(
        vec!["2018".into(), "2019".into(), "2020".into(), "2021".into()],
        vec!["AAA".into(), "BBB".into(), "CCC".into()],
        vec![
            vec![Some(1.0), Some(10.0), None],
            vec![Some(2.0), None, None],
            vec![Some(3.0), Some(30.0), None],
            vec![Some(4.0), None, None],
        ],
    );
    let got = column_summary(&frame);
    assert_eq!(got.len(), 3);

    let a = &got[0];
    assert_eq!(a.column, "AAA");
    assert_eq!(a.count, 4);
    assert_eq!(a.missing, 0);
    assert_eq!(a.min, Some(1.0));
    assert_eq!(a.max, Some(4.0));
    assert!((a.mean.unwrap() - 2.5).abs() < 1e-9);
    assert!((a.median.unwrap() - 2.5).abs() < 1e-9);

    let b = &got[1];
    assert_eq!(b.column, "BBB");
    assert_eq!(b.count, 2);
    assert_eq!(b.missing, 2);
    assert_eq!(b.min, Some(10.0));
    assert_eq!(b.max, Some(30.0));
    assert_eq!(b.mean.unwrap(), 20.0);
    assert_eq!(b.median.unwrap(), 20.0);

    let c = &got[2];
    assert_eq!(c.count, 0);
    assert_eq!(c.missing, 4);
    assert_eq!(c.mean, None);
    assert_eq!(c.median, None);
}
