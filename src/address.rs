//! Download addresses on the IMF website.
//!
//! The provider moved the files twice. Each move is one row in [`ERAS`]; the
//! row with the latest `since` that is not after the release wins.
//!
//! ```
//! use weo_rs::address::countries_address;
//! use weo_rs::release::{Half, Release};
//!
//! assert_eq!(
//!     countries_address(Release::new(2019, Half::Second)),
//!     "https://www.imf.org/external/pubs/ft/weo/2019/02/weodata/WEOOct2019all.xls"
//! );
//! ```
use crate::release::{FLOOR, Half, Release};
use serde::{Deserialize, Serialize};

/// Which table of a release to retrieve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Flavor {
    /// By-country data (`...all.xls`)
    Countries,
    /// Country-group and commodity data (`...alla.xls`)
    Commodities,
}

impl Flavor {
    pub fn suffix(self) -> &'static str {
        match self {
            Flavor::Countries => "all",
            Flavor::Commodities => "alla",
        }
    }
}

/// One address layout, in use from `since` until the next era starts.
#[derive(Debug, Clone, Copy)]
struct Era {
    since: Release,
    base: &'static str,
    /// Insert `{period}/` after the year directory.
    period_segment: bool,
    /// Directory between the period segment and the file name.
    subdir: &'static str,
    extension: &'static str,
}

const LEGACY_BASE: &str = "https://www.imf.org/external/pubs/ft/weo";
const MEDIA_BASE: &str = "https://www.imf.org/-/media/Files/Publications/WEO/WEO-Database";

/// Ordered by `since`.
const ERAS: &[Era] = &[
    Era {
        since: FLOOR,
        base: LEGACY_BASE,
        period_segment: true,
        subdir: "weodata/",
        extension: "xls",
    },
    Era {
        since: Release::new(2020, Half::Second),
        base: MEDIA_BASE,
        period_segment: true,
        subdir: "",
        extension: "xls",
    },
    Era {
        since: Release::new(2021, Half::First),
        base: MEDIA_BASE,
        period_segment: false,
        subdir: "",
        extension: "ashx",
    },
];

fn era_for(release: Release) -> &'static Era {
    ERAS.iter()
        .rev()
        .find(|e| e.since <= release)
        .unwrap_or(&ERAS[0])
}

/// Retrieval address of `flavor` for `release`. The release is not validated.
pub fn address(release: Release, flavor: Flavor) -> String {
    let era = era_for(release);
    let year = release.year;
    let period = if era.period_segment {
        format!("{}/", release.period_marker())
    } else {
        String::new()
    };
    format!(
        "{base}/{year}/{period}{subdir}WEO{month}{year}{suffix}.{ext}",
        base = era.base,
        subdir = era.subdir,
        month = release.month_abbr(),
        suffix = flavor.suffix(),
        ext = era.extension,
    )
}

/// Address of the by-country table.
pub fn countries_address(release: Release) -> String {
    address(release, Flavor::Countries)
}

/// Address of the commodities / country-groups table.
pub fn commodities_address(release: Release) -> String {
    address(release, Flavor::Commodities)
}
