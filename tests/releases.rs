use chrono::NaiveDate;
use weo_rs::release::{FLOOR, all_releases_at, current_at};
use weo_rs::{DateError, Half, Release, commodities_address, countries_address};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn tag_and_string_constructors_agree() {
    let pairs: [(Release, &str); 6] = [
        (Release::from_tag(2019, 2).unwrap(), "2019-10"),
        (Release::from_tag(2019, "Oct").unwrap(), "2019-Oct"),
        (Release::from_tag(2020, "apr").unwrap(), "2020-April"),
        (Release::from_tag(2020, 1).unwrap(), "2020-04"),
        (Release::from_tag(2011, "SEP").unwrap(), "2011-Sep"),
        (Release::from_tag(2011, "october").unwrap(), "2011-September"),
    ];
    for (from_tag, s) in pairs {
        assert_eq!(from_tag, Release::parse(s).unwrap(), "{s}");
    }
    assert_eq!("2019-Oct".parse::<Release>().unwrap(), Release::new(2019, Half::Second));
}

#[test]
fn unrecognized_input_is_a_date_error() {
    assert_eq!(Release::from_tag(2019, 3), Err(DateError::Tag("3".into())));
    assert_eq!(Release::from_tag(2019, "may"), Err(DateError::Tag("may".into())));
    assert!(matches!(Release::parse("2020-01"), Err(DateError::Month { month: 1, .. })));
    assert!(matches!(Release::parse("2019-Feb"), Err(DateError::Month { month: 2, .. })));
    assert!(matches!(Release::parse("Oct 2019"), Err(DateError::Unparsable(_))));
    assert!(matches!(Release::parse(""), Err(DateError::Unparsable(_))));
}

#[test]
fn validation_bounds_are_inclusive() {
    let today = day(2023, 6, 15);
    let current = current_at(today);
    assert_eq!(current, Release::new(2023, Half::First));

    assert!(FLOOR.validate_at(today).is_ok());
    assert!(current.validate_at(today).is_ok());

    assert_eq!(
        Release::new(2007, Half::First).validate_at(today),
        Err(DateError::TooEarly {
            got: Release::new(2007, Half::First),
            floor: FLOOR
        })
    );
    assert!(matches!(
        Release::new(1999, Half::First).validate_at(today),
        Err(DateError::TooEarly { .. })
    ));
    assert_eq!(
        current.successor().validate_at(today),
        Err(DateError::Future {
            got: Release::new(2023, Half::Second),
            current
        })
    );
}

#[test]
fn validation_against_the_real_calendar() {
    assert!(FLOOR.validate().is_ok());
    assert!(weo_rs::release::current().validate().is_ok());
    assert!(weo_rs::release::current().successor().validate().is_err());
}

#[test]
fn successors_enumerate_without_gaps() {
    let today = day(2021, 2, 1);
    let all = all_releases_at(today);
    assert_eq!(all.first(), Some(&FLOOR));
    assert_eq!(all.last(), Some(&current_at(today)));
    assert_eq!(all.len(), 27); // 2007-Oct, 2008..=2020 twice each
    for w in all.windows(2) {
        assert!(w[0] < w[1]);
        assert_eq!(w[0].successor(), w[1]);
    }
}

#[test]
fn september_2011_uses_legacy_layout() {
    assert_eq!(
        countries_address(Release::new(2011, Half::Second)),
        "https://www.imf.org/external/pubs/ft/weo/2011/02/weodata/WEOSep2011all.xls"
    );
    assert_eq!(
        countries_address(Release::new(2011, Half::First)),
        "https://www.imf.org/external/pubs/ft/weo/2011/01/weodata/WEOApr2011all.xls"
    );
}

#[test]
fn october_2020_uses_media_path_with_period() {
    let url = countries_address(Release::new(2020, Half::Second));
    assert_eq!(
        url,
        "https://www.imf.org/-/media/Files/Publications/WEO/WEO-Database/2020/02/WEOOct2020all.xls"
    );
    assert!(url.contains("/02/"));
}

#[test]
fn from_2021_the_period_segment_is_gone() {
    let url = countries_address(Release::new(2021, Half::First));
    assert_eq!(
        url,
        "https://www.imf.org/-/media/Files/Publications/WEO/WEO-Database/2021/WEOApr2021all.ashx"
    );
    assert!(!url.contains("/01/"));
    assert_eq!(
        commodities_address(Release::new(2023, Half::Second)),
        "https://www.imf.org/-/media/Files/Publications/WEO/WEO-Database/2023/WEOOct2023alla.ashx"
    );
}

#[test]
fn display_and_period_marker() {
    let r = Release::new(2008, Half::First);
    assert_eq!(r.to_string(), "2008-Apr");
    assert_eq!(r.period_marker(), "01");
    assert_eq!(r.half.number(), 1);
}
