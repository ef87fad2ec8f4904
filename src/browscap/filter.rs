//! Output flavors. A filter only decides which catalog properties a flavor
//! keeps; it never changes values.

use crate::catalog::PropertyInfo;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flavor {
    #[default]
    Full,
    Standard,
    Lite,
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flavor::Full => f.write_str("full"),
            Flavor::Standard => f.write_str("standard"),
            Flavor::Lite => f.write_str("lite"),
        }
    }
}

impl FromStr for Flavor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "full" => Ok(Flavor::Full),
            "standard" => Ok(Flavor::Standard),
            "lite" => Ok(Flavor::Lite),
            other => Err(format!("unknown flavor: {}", other)),
        }
    }
}

pub trait PropertyFilter {
    fn flavor(&self) -> Flavor;

    fn includes(&self, property: &PropertyInfo) -> bool;
}

pub struct FullFilter;

impl PropertyFilter for FullFilter {
    fn flavor(&self) -> Flavor {
        Flavor::Full
    }

    fn includes(&self, _property: &PropertyInfo) -> bool {
        true
    }
}

pub struct StandardFilter;

impl PropertyFilter for StandardFilter {
    fn flavor(&self) -> Flavor {
        Flavor::Standard
    }

    fn includes(&self, property: &PropertyInfo) -> bool {
        property.standard
    }
}

pub struct LiteFilter;

impl PropertyFilter for LiteFilter {
    fn flavor(&self) -> Flavor {
        Flavor::Lite
    }

    fn includes(&self, property: &PropertyInfo) -> bool {
        property.lite
    }
}

impl Flavor {
    pub fn filter(self) -> Box<dyn PropertyFilter> {
        match self {
            Flavor::Full => Box::new(FullFilter),
            Flavor::Standard => Box::new(StandardFilter),
            Flavor::Lite => Box::new(LiteFilter),
        }
    }
}
