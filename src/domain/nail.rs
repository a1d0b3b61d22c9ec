//! Nail domain model
//!
//! A nail is the removable unit of a level. It carries a type tag that
//! decides which stacks will take it, and a one-way `removed` flag.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum NailParseError {
    #[error("Invalid nail ID: expected a positive number, got '{0}'")]
    InvalidId(String),

    #[error("Unknown nail type '{0}': expected red, blue, green, yellow or purple")]
    UnknownType(String),
}

/// Identity of a nail, unique within a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NailId(u32);

impl NailId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NailId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NailId {
    type Err = NailParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        s.parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .map(Self)
            .ok_or_else(|| NailParseError::InvalidId(s.to_string()))
    }
}

impl From<u32> for NailId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// The closed set of nail types. Only like-typed nails share a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NailType {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
}

/// Neutral grey used wherever no type applies (an empty stack, for example)
pub const NEUTRAL_RGB: (u8, u8, u8) = (128, 128, 128);

impl NailType {
    pub const ALL: [NailType; 5] = [
        NailType::Red,
        NailType::Blue,
        NailType::Green,
        NailType::Yellow,
        NailType::Purple,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NailType::Red => "red",
            NailType::Blue => "blue",
            NailType::Green => "green",
            NailType::Yellow => "yellow",
            NailType::Purple => "purple",
        }
    }

    /// Display color as an RGB triple
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            NailType::Red => (255, 0, 0),
            NailType::Blue => (0, 0, 255),
            NailType::Green => (0, 255, 0),
            NailType::Yellow => (255, 255, 0),
            NailType::Purple => (128, 0, 128),
        }
    }
}

/// Display color for an optional type tag, grey when there is none
pub fn type_rgb(nail_type: Option<NailType>) -> (u8, u8, u8) {
    match nail_type {
        Some(t) => t.rgb(),
        None => NEUTRAL_RGB,
    }
}

impl fmt::Display for NailType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NailType {
    type Err = NailParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "red" => Ok(NailType::Red),
            "blue" => Ok(NailType::Blue),
            "green" => Ok(NailType::Green),
            "yellow" => Ok(NailType::Yellow),
            "purple" => Ok(NailType::Purple),
            _ => Err(NailParseError::UnknownType(s.to_string())),
        }
    }
}

/// A nail on the board
///
/// Dependencies are not stored here; they live as edges in
/// [`NailGraph`](super::NailGraph).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Nail {
    pub id: NailId,

    #[serde(rename = "type")]
    pub nail_type: NailType,

    pub removed: bool,
}

impl Nail {
    pub fn new(id: NailId, nail_type: NailType) -> Self {
        Self {
            id,
            nail_type,
            removed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_nail_id() {
        assert_eq!("7".parse::<NailId>().unwrap(), NailId::new(7));
        assert_eq!(" 12 ".parse::<NailId>().unwrap(), NailId::new(12));
    }

    #[test]
    fn parse_nail_id_rejects_zero_and_garbage() {
        assert!(matches!("0".parse::<NailId>(), Err(NailParseError::InvalidId(_))));
        assert!(matches!("-3".parse::<NailId>(), Err(NailParseError::InvalidId(_))));
        assert!(matches!("abc".parse::<NailId>(), Err(NailParseError::InvalidId(_))));
    }

    #[test]
    fn parse_type_case_insensitive() {
        assert_eq!("RED".parse::<NailType>().unwrap(), NailType::Red);
        assert_eq!("Purple".parse::<NailType>().unwrap(), NailType::Purple);
        assert!("orange".parse::<NailType>().is_err());
    }

    #[test]
    fn type_roundtrip_through_str() {
        for t in NailType::ALL {
            assert_eq!(t.as_str().parse::<NailType>().unwrap(), t);
        }
    }

    #[test]
    fn colors() {
        assert_eq!(NailType::Red.rgb(), (255, 0, 0));
        assert_eq!(NailType::Purple.rgb(), (128, 0, 128));
        assert_eq!(type_rgb(Some(NailType::Green)), (0, 255, 0));
        assert_eq!(type_rgb(None), NEUTRAL_RGB);
    }

    #[test]
    fn new_nail_is_present() {
        let nail = Nail::new(NailId::new(1), NailType::Blue);
        assert!(!nail.removed);
    }

    #[test]
    fn nail_serializes_type_field() {
        let nail = Nail::new(NailId::new(3), NailType::Yellow);
        let json = serde_json::to_value(&nail).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["type"], "yellow");
        assert_eq!(json["removed"], false);
    }
}
