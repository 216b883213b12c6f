//! Regional variants of Spanish

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Regional variant of Latin American Spanish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionTag {
    Neutral,
    Rioplatense,
    Colombian,
    Mexican,
    Chilean,
    Caribbean,
    Andean,
}

impl RegionTag {
    /// Number of variants, used to size per-region arrays
    pub const COUNT: usize = 7;

    /// Tie-break order for region detection (highest priority first)
    pub const DETECTION_PRIORITY: [RegionTag; 6] = [
        RegionTag::Rioplatense,
        RegionTag::Colombian,
        RegionTag::Mexican,
        RegionTag::Chilean,
        RegionTag::Caribbean,
        RegionTag::Andean,
    ];

    /// All regions in declaration order
    pub fn all() -> [RegionTag; Self::COUNT] {
        [
            RegionTag::Neutral,
            RegionTag::Rioplatense,
            RegionTag::Colombian,
            RegionTag::Mexican,
            RegionTag::Chilean,
            RegionTag::Caribbean,
            RegionTag::Andean,
        ]
    }

    /// Stable array index of this region
    pub fn index(&self) -> usize {
        match self {
            RegionTag::Neutral => 0,
            RegionTag::Rioplatense => 1,
            RegionTag::Colombian => 2,
            RegionTag::Mexican => 3,
            RegionTag::Chilean => 4,
            RegionTag::Caribbean => 5,
            RegionTag::Andean => 6,
        }
    }

    /// Lowercase identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            RegionTag::Neutral => "neutral",
            RegionTag::Rioplatense => "rioplatense",
            RegionTag::Colombian => "colombian",
            RegionTag::Mexican => "mexican",
            RegionTag::Chilean => "chilean",
            RegionTag::Caribbean => "caribbean",
            RegionTag::Andean => "andean",
        }
    }

    /// Human-readable description of where the variant is spoken
    pub fn description(&self) -> &'static str {
        match self {
            RegionTag::Neutral => "Neutral Latin American Spanish",
            RegionTag::Rioplatense => "Río de la Plata (Argentina, Uruguay)",
            RegionTag::Colombian => "Colombian (Andean Colombia, Bogotá)",
            RegionTag::Mexican => "Mexican (central Mexico)",
            RegionTag::Chilean => "Chilean",
            RegionTag::Caribbean => "Caribbean (Cuba, Puerto Rico, Dominican Republic, Venezuela)",
            RegionTag::Andean => "Andean (Peru, Bolivia, Ecuador)",
        }
    }
}

impl fmt::Display for RegionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegionTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_lowercase();
        RegionTag::all()
            .into_iter()
            .find(|r| r.as_str() == key)
            .ok_or_else(|| Error::InvalidRegion(s.trim().to_string()))
    }
}

/// Region requested by the caller: detect it, or use a fixed variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RegionSelection {
    Auto,
    Fixed(RegionTag),
}

impl Default for RegionSelection {
    fn default() -> Self {
        RegionSelection::Auto
    }
}

impl fmt::Display for RegionSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionSelection::Auto => f.write_str("auto"),
            RegionSelection::Fixed(region) => region.fmt(f),
        }
    }
}

impl TryFrom<String> for RegionSelection {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<RegionSelection> for String {
    fn from(selection: RegionSelection) -> Self {
        selection.to_string()
    }
}

impl FromStr for RegionSelection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("auto") {
            Ok(RegionSelection::Auto)
        } else {
            s.parse().map(RegionSelection::Fixed)
        }
    }
}
