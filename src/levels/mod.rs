//! # Level Catalog
//!
//! The compiled-in levels, numbered from 1.
//!
//! | # | Level | Nails | Stack capacity |
//! |---|-------|-------|----------------|
//! | 1 | Simple Triangle | 3 | 3 |
//! | 2 | Small Ecosystem | 7 | 4 |
//! | 3 | City Development | 12 | 5 |
//! | 4 | Giant Christmas Tree | generated | 6 |
//!
//! Levels are plain [`Level`] values; loading one means handing it to
//! [`Session::new`](crate::domain::Session::new), which validates it.

mod builtin;
mod christmas;

use crate::domain::{Level, LevelError};

pub use christmas::christmas_tree;

/// Number of built-in levels
pub fn count() -> u32 {
    4
}

/// Returns a built-in level by number
pub fn get(number: u32) -> Option<Level> {
    match number {
        1 => Some(builtin::triangle()),
        2 => Some(builtin::ecosystem()),
        3 => Some(builtin::city()),
        4 => Some(christmas::christmas_tree()),
        _ => None,
    }
}

/// All built-in levels in order
pub fn all() -> Vec<Level> {
    (1..=count()).filter_map(get).collect()
}

/// Validates every built-in level, returning the failures
pub fn check_all() -> Vec<(u32, LevelError)> {
    all()
        .into_iter()
        .filter_map(|level| level.validate().err().map(|e| (level.number, e)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_match_positions() {
        for (i, level) in all().iter().enumerate() {
            assert_eq!(level.number, i as u32 + 1);
        }
        assert_eq!(all().len(), count() as usize);
    }

    #[test]
    fn out_of_range() {
        assert!(get(0).is_none());
        assert!(get(count() + 1).is_none());
    }

    #[test]
    fn every_level_is_valid() {
        assert!(check_all().is_empty());
    }
}
