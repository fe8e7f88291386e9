//! Coordinate Reference System handling
//!
//! Profiles carry their CRS as free text: an `EPSG:n` code, a PROJ string
//! or WKT. The GeoTIFF writer needs only a rough reading of that text, which
//! is what [`CrsDescription::parse`] provides.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EPSG_CODE: Regex = Regex::new(r"(?i)^\s*epsg:(\d+)\s*$").expect("valid regex");
    static ref PROJ_INIT: Regex = Regex::new(r"(?i)\+init=epsg:(\d+)").expect("valid regex");
    // Authority of the outermost WKT node: the last element before the closing bracket
    static ref WKT_AUTHORITY: Regex =
        Regex::new(r#"(?i)(?:AUTHORITY\["EPSG",\s*"(\d+)"\]|ID\["EPSG",\s*(\d+)\])\]\s*$"#).expect("valid regex");
    static ref PROJ_NAME: Regex = Regex::new(r"\+proj=(\w+)").expect("valid regex");
    static ref PROJ_UNITS: Regex = Regex::new(r"\+units=(\w+)").expect("valid regex");
    static ref WKT_METRE: Regex = Regex::new(r#"(?i)UNIT\["(metre|meter)""#).expect("valid regex");
}

/// Model type of a coordinate system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrsKind {
    /// Projected (map) coordinates
    Projected,
    /// Longitude/latitude coordinates
    Geographic,
    /// Nothing in the text says which
    Unknown,
}

/// What the writer could learn from a CRS string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrsDescription {
    /// The CRS text, untouched
    pub text: String,
    pub kind: CrsKind,
    /// EPSG code, when the text names one for the whole system
    pub epsg: Option<u32>,
    /// Whether the projected axes are in metres
    pub metre_units: bool,
}

impl CrsDescription {
    /// Reads an `EPSG:n` code, a PROJ string or a WKT string
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();

        let epsg = EPSG_CODE
            .captures(trimmed)
            .or_else(|| PROJ_INIT.captures(trimmed))
            .and_then(|caps| caps.get(1))
            .or_else(|| {
                WKT_AUTHORITY
                    .captures(trimmed)
                    .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
            })
            .and_then(|code| code.as_str().parse::<u32>().ok());

        let kind = Self::sniff_kind(trimmed, epsg);
        let metre_units = kind == CrsKind::Projected && Self::sniff_metre(trimmed);

        CrsDescription {
            text: text.to_string(),
            kind,
            epsg,
            metre_units,
        }
    }

    fn sniff_kind(text: &str, epsg: Option<u32>) -> CrsKind {
        let upper = text.to_uppercase();
        if upper.starts_with("PROJCS[") || upper.starts_with("PROJCRS[") {
            return CrsKind::Projected;
        }
        if upper.starts_with("GEOGCS[") || upper.starts_with("GEOGCRS[") || upper.starts_with("GEODCRS[") {
            return CrsKind::Geographic;
        }
        if let Some(caps) = PROJ_NAME.captures(text) {
            return match &caps[1] {
                "longlat" | "latlong" | "lonlat" | "latlon" => CrsKind::Geographic,
                _ => CrsKind::Projected,
            };
        }
        match epsg {
            Some(4000..=4999) => CrsKind::Geographic,
            Some(_) => CrsKind::Projected,
            None => CrsKind::Unknown,
        }
    }

    fn sniff_metre(text: &str) -> bool {
        if text.contains("+proj=") {
            // PROJ defaults to metres when no unit is given
            return PROJ_UNITS
                .captures(text)
                .map_or(true, |caps| &caps[1] == "m");
        }
        WKT_METRE.is_match(text)
    }
}

impl fmt::Display for CrsDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.epsg {
            Some(code) => write!(f, "{:?} CRS (EPSG:{})", self.kind, code),
            None => write!(f, "{:?} CRS", self.kind),
        }
    }
}
