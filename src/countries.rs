//! ISO 3166-1 alpha-2 / alpha-3 lookup.
//!
//! The dataset only carries three-letter codes. [`CountryCodes`] is the seam
//! used by [`crate::Dataset`] to translate from and to two-letter codes, so a
//! caller can plug in a smaller table (tests) or a fuller one.

use std::collections::HashMap;

/// Read-only country code translation.
pub trait CountryCodes: Send + Sync {
    /// Two-letter code for a three-letter code. Territories without an ISO
    /// entry may return a fixed name instead.
    fn alpha2(&self, alpha3: &str) -> Option<String>;

    /// Three-letter code for a two-letter code.
    fn alpha3(&self, alpha2: &str) -> Option<String>;
}

/// ISO 3166-1 (alpha-2, alpha-3) pairs.
const ISO_3166: &[(&str, &str)] = &[
    ("AF", "AFG"), ("AX", "ALA"), ("AL", "ALB"), ("DZ", "DZA"), ("AS", "ASM"),
    ("AD", "AND"), ("AO", "AGO"), ("AI", "AIA"), ("AQ", "ATA"), ("AG", "ATG"),
    ("AR", "ARG"), ("AM", "ARM"), ("AW", "ABW"), ("AU", "AUS"), ("AT", "AUT"),
    ("AZ", "AZE"), ("BS", "BHS"), ("BH", "BHR"), ("BD", "BGD"), ("BB", "BRB"),
    ("BY", "BLR"), ("BE", "BEL"), ("BZ", "BLZ"), ("BJ", "BEN"), ("BM", "BMU"),
    ("BT", "BTN"), ("BO", "BOL"), ("BQ", "BES"), ("BA", "BIH"), ("BW", "BWA"),
    ("BV", "BVT"), ("BR", "BRA"), ("IO", "IOT"), ("BN", "BRN"), ("BG", "BGR"),
    ("BF", "BFA"), ("BI", "BDI"), ("CV", "CPV"), ("KH", "KHM"), ("CM", "CMR"),
    ("CA", "CAN"), ("KY", "CYM"), ("CF", "CAF"), ("TD", "TCD"), ("CL", "CHL"),
    ("CN", "CHN"), ("CX", "CXR"), ("CC", "CCK"), ("CO", "COL"), ("KM", "COM"),
    ("CG", "COG"), ("CD", "COD"), ("CK", "COK"), ("CR", "CRI"), ("CI", "CIV"),
    ("HR", "HRV"), ("CU", "CUB"), ("CW", "CUW"), ("CY", "CYP"), ("CZ", "CZE"),
    ("DK", "DNK"), ("DJ", "DJI"), ("DM", "DMA"), ("DO", "DOM"), ("EC", "ECU"),
    ("EG", "EGY"), ("SV", "SLV"), ("GQ", "GNQ"), ("ER", "ERI"), ("EE", "EST"),
    ("SZ", "SWZ"), ("ET", "ETH"), ("FK", "FLK"), ("FO", "FRO"), ("FJ", "FJI"),
    ("FI", "FIN"), ("FR", "FRA"), ("GF", "GUF"), ("PF", "PYF"), ("TF", "ATF"),
    ("GA", "GAB"), ("GM", "GMB"), ("GE", "GEO"), ("DE", "DEU"), ("GH", "GHA"),
    ("GI", "GIB"), ("GR", "GRC"), ("GL", "GRL"), ("GD", "GRD"), ("GP", "GLP"),
    ("GU", "GUM"), ("GT", "GTM"), ("GG", "GGY"), ("GN", "GIN"), ("GW", "GNB"),
    ("GY", "GUY"), ("HT", "HTI"), ("HM", "HMD"), ("VA", "VAT"), ("HN", "HND"),
    ("HK", "HKG"), ("HU", "HUN"), ("IS", "ISL"), ("IN", "IND"), ("ID", "IDN"),
    ("IR", "IRN"), ("IQ", "IRQ"), ("IE", "IRL"), ("IM", "IMN"), ("IL", "ISR"),
    ("IT", "ITA"), ("JM", "JAM"), ("JP", "JPN"), ("JE", "JEY"), ("JO", "JOR"),
    ("KZ", "KAZ"), ("KE", "KEN"), ("KI", "KIR"), ("KP", "PRK"), ("KR", "KOR"),
    ("KW", "KWT"), ("KG", "KGZ"), ("LA", "LAO"), ("LV", "LVA"), ("LB", "LBN"),
    ("LS", "LSO"), ("LR", "LBR"), ("LY", "LBY"), ("LI", "LIE"), ("LT", "LTU"),
    ("LU", "LUX"), ("MO", "MAC"), ("MG", "MDG"), ("MW", "MWI"), ("MY", "MYS"),
    ("MV", "MDV"), ("ML", "MLI"), ("MT", "MLT"), ("MH", "MHL"), ("MQ", "MTQ"),
    ("MR", "MRT"), ("MU", "MUS"), ("YT", "MYT"), ("MX", "MEX"), ("FM", "FSM"),
    ("MD", "MDA"), ("MC", "MCO"), ("MN", "MNG"), ("ME", "MNE"), ("MS", "MSR"),
    ("MA", "MAR"), ("MZ", "MOZ"), ("MM", "MMR"), ("NA", "NAM"), ("NR", "NRU"),
    ("NP", "NPL"), ("NL", "NLD"), ("NC", "NCL"), ("NZ", "NZL"), ("NI", "NIC"),
    ("NE", "NER"), ("NG", "NGA"), ("NU", "NIU"), ("NF", "NFK"), ("MK", "MKD"),
    ("MP", "MNP"), ("NO", "NOR"), ("OM", "OMN"), ("PK", "PAK"), ("PW", "PLW"),
    ("PS", "PSE"), ("PA", "PAN"), ("PG", "PNG"), ("PY", "PRY"), ("PE", "PER"),
    ("PH", "PHL"), ("PN", "PCN"), ("PL", "POL"), ("PT", "PRT"), ("PR", "PRI"),
    ("QA", "QAT"), ("RE", "REU"), ("RO", "ROU"), ("RU", "RUS"), ("RW", "RWA"),
    ("BL", "BLM"), ("SH", "SHN"), ("KN", "KNA"), ("LC", "LCA"), ("MF", "MAF"),
    ("PM", "SPM"), ("VC", "VCT"), ("WS", "WSM"), ("SM", "SMR"), ("ST", "STP"),
    ("SA", "SAU"), ("SN", "SEN"), ("RS", "SRB"), ("SC", "SYC"), ("SL", "SLE"),
    ("SG", "SGP"), ("SX", "SXM"), ("SK", "SVK"), ("SI", "SVN"), ("SB", "SLB"),
    ("SO", "SOM"), ("ZA", "ZAF"), ("GS", "SGS"), ("SS", "SSD"), ("ES", "ESP"),
    ("LK", "LKA"), ("SD", "SDN"), ("SR", "SUR"), ("SJ", "SJM"), ("SE", "SWE"),
    ("CH", "CHE"), ("SY", "SYR"), ("TW", "TWN"), ("TJ", "TJK"), ("TZ", "TZA"),
    ("TH", "THA"), ("TL", "TLS"), ("TG", "TGO"), ("TK", "TKL"), ("TO", "TON"),
    ("TT", "TTO"), ("TN", "TUN"), ("TR", "TUR"), ("TM", "TKM"), ("TC", "TCA"),
    ("TV", "TUV"), ("UG", "UGA"), ("UA", "UKR"), ("AE", "ARE"), ("GB", "GBR"),
    ("US", "USA"), ("UM", "UMI"), ("UY", "URY"), ("UZ", "UZB"), ("VU", "VUT"),
    ("VE", "VEN"), ("VN", "VNM"), ("VG", "VGB"), ("VI", "VIR"), ("WF", "WLF"),
    ("EH", "ESH"), ("YE", "YEM"), ("ZM", "ZMB"), ("ZW", "ZWE"),
];

/// Territories the dataset codes outside ISO 3166.
const ALPHA3_OVERRIDES: &[(&str, &str)] = &[("UVK", "Kosovo"), ("WBG", "West Bank/Gaza Strip")];
const ALPHA2_OVERRIDES: &[(&str, &str)] = &[("XK", "UVK")];

/// [`CountryCodes`] backed by the ISO 3166-1 table plus territory overrides.
#[derive(Debug, Clone)]
pub struct IsoCountryCodes {
    to_alpha2: HashMap<String, String>,
    to_alpha3: HashMap<String, String>,
}

impl Default for IsoCountryCodes {
    fn default() -> Self {
        let mut to_alpha2 = HashMap::with_capacity(ISO_3166.len() + ALPHA3_OVERRIDES.len());
        let mut to_alpha3 = HashMap::with_capacity(ISO_3166.len() + ALPHA2_OVERRIDES.len());
        for (a2, a3) in ISO_3166 {
            to_alpha2.insert(a3.to_string(), a2.to_string());
            to_alpha3.insert(a2.to_string(), a3.to_string());
        }
        let mut codes = Self {
            to_alpha2,
            to_alpha3,
        };
        for (a3, value) in ALPHA3_OVERRIDES {
            codes = codes.with_alpha3_override(a3, value);
        }
        for (a2, a3) in ALPHA2_OVERRIDES {
            codes = codes.with_alpha2_override(a2, a3);
        }
        codes
    }
}

impl IsoCountryCodes {
    /// Answer `alpha3 -> value` ahead of the ISO table.
    pub fn with_alpha3_override(mut self, alpha3: &str, value: &str) -> Self {
        self.to_alpha2
            .insert(alpha3.to_ascii_uppercase(), value.to_string());
        self
    }

    /// Answer `alpha2 -> alpha3` ahead of the ISO table.
    pub fn with_alpha2_override(mut self, alpha2: &str, alpha3: &str) -> Self {
        self.to_alpha3
            .insert(alpha2.to_ascii_uppercase(), alpha3.to_ascii_uppercase());
        self
    }
}

impl CountryCodes for IsoCountryCodes {
    fn alpha2(&self, alpha3: &str) -> Option<String> {
        self.to_alpha2.get(&alpha3.to_ascii_uppercase()).cloned()
    }

    fn alpha3(&self, alpha2: &str) -> Option<String> {
        self.to_alpha3.get(&alpha2.to_ascii_uppercase()).cloned()
    }
}
