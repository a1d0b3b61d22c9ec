//! Hand-authored levels

use crate::domain::{Level, NailType::*};

/// Level 1: three nails, one shared root
pub fn triangle() -> Level {
    Level::new(1, "Simple Triangle", 3)
        .with_size(3, 3)
        .nail(1, (1, 0), Red)
        .nail(2, (0, 2), Red)
        .nail(3, (2, 2), Blue)
        .depends_on(2, &[1])
        .depends_on(3, &[1])
}

/// Level 2: a small food chain
pub fn ecosystem() -> Level {
    Level::new(2, "Small Ecosystem", 4)
        .with_size(5, 5)
        .nail(1, (2, 0), Yellow)
        .nail(2, (1, 2), Blue)
        .nail(3, (3, 2), Blue)
        .nail(4, (0, 3), Red)
        .nail(5, (2, 3), Red)
        .nail(6, (4, 3), Red)
        .nail(7, (2, 4), Green)
        .depends_on(2, &[1])
        .depends_on(3, &[1])
        .depends_on(4, &[2, 3])
        .depends_on(5, &[3])
        .depends_on(6, &[5])
        .depends_on(7, &[2, 3])
        .describe(1, "Sun: powers the ecosystem")
        .describe(2, "Tree: oxygen and shelter")
        .describe(3, "Grass: the base plant")
        .describe(4, "Rabbit: herbivore")
        .describe(5, "Bug: small creature")
        .describe(6, "Bird: predator")
        .describe(7, "Soil: the ground everything stands on")
}

/// Level 3: infrastructure before districts before services
pub fn city() -> Level {
    Level::new(3, "City Development", 5)
        .with_size(7, 7)
        .nail(1, (3, 0), Purple)
        .nail(2, (1, 1), Green)
        .nail(3, (3, 1), Green)
        .nail(4, (5, 1), Green)
        .nail(5, (0, 3), Yellow)
        .nail(6, (2, 3), Yellow)
        .nail(7, (4, 3), Yellow)
        .nail(8, (6, 3), Blue)
        .nail(9, (1, 5), Red)
        .nail(10, (3, 5), Red)
        .nail(11, (5, 5), Red)
        .nail(12, (3, 6), Blue)
        .depends_on(2, &[1])
        .depends_on(3, &[1])
        .depends_on(4, &[1])
        .depends_on(5, &[2, 3, 4])
        .depends_on(6, &[2, 3, 4])
        .depends_on(7, &[2, 3, 4])
        .depends_on(8, &[2])
        .depends_on(9, &[5, 6])
        .depends_on(10, &[5, 6])
        .depends_on(11, &[6])
        .depends_on(12, &[7, 8])
        .describe(1, "City plan: the blueprint")
        .describe(2, "Roads: the transport network")
        .describe(3, "Power grid: energy supply")
        .describe(4, "Waterworks: water management")
        .describe(5, "Housing: where people live")
        .describe(6, "Commerce: economic activity")
        .describe(7, "Industry: manufacturing")
        .describe(8, "Park: leisure")
        .describe(9, "School: education")
        .describe(10, "Hospital: health care")
        .describe(11, "Culture center: the arts")
        .describe(12, "Recycling plant: environmental protection")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NailId;

    #[test]
    fn handmade_levels_validate() {
        for level in [triangle(), ecosystem(), city()] {
            assert_eq!(level.validate(), Ok(()), "level {}", level.number);
        }
    }

    #[test]
    fn nail_counts() {
        assert_eq!(triangle().nail_count(), 3);
        assert_eq!(ecosystem().nail_count(), 7);
        assert_eq!(city().nail_count(), 12);
    }

    #[test]
    fn city_housing_needs_all_utilities() {
        let level = city();
        let deps = level.dependencies_of(NailId::new(5));
        assert_eq!(deps, &[NailId::new(2), NailId::new(3), NailId::new(4)]);
    }
}
