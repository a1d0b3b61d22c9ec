//! Procedurally generated Christmas tree level
//!
//! Layout: a star, ten widening layers of branches, a sparse trunk and a set
//! of scattered decorations. Dependencies are derived from distance after
//! each nail is placed, so the level is run through the same validation as
//! hand-made ones rather than assumed acyclic.

use crate::domain::{Level, NailId, NailType, Position};

const NUMBER: u32 = 4;
const WIDTH: u16 = 40;
const HEIGHT: u16 = 45;
const STACK_CAPACITY: usize = 6;

const CENTER_X: i32 = 20;
const LAYERS: i32 = 10;
const MAX_LAYER_WIDTH: i32 = 35;
const LAYER_SPACING: i32 = 4;
const TOP_MARGIN: i32 = 5;

const TRUNK_WIDTH: i32 = 8;
const TRUNK_HEIGHT: i32 = 6;
const TRUNK_X: i32 = 16;

/// Reach, on both axes, within which a decoration hangs on earlier nails
const DECORATION_REACH: i32 = 5;

const DECORATIONS: [(i32, i32, NailType, &str); 18] = [
    (10, 8, NailType::Yellow, "Large golden bell"),
    (30, 8, NailType::Yellow, "Large golden bell"),
    (8, 16, NailType::Red, "Giant bow"),
    (32, 16, NailType::Red, "Giant bow"),
    (15, 24, NailType::Yellow, "Golden candy cane"),
    (25, 24, NailType::Yellow, "Golden candy cane"),
    (12, 12, NailType::Purple, "Purple ribbon"),
    (28, 12, NailType::Purple, "Purple ribbon"),
    (14, 20, NailType::Red, "Gift box"),
    (26, 20, NailType::Red, "Gift box"),
    (20, 28, NailType::Yellow, "Large ornament star"),
    (8, 28, NailType::Blue, "Icicle"),
    (32, 28, NailType::Blue, "Icicle"),
    (14, 32, NailType::Green, "Pine cone"),
    (26, 32, NailType::Green, "Pine cone"),
    (20, 36, NailType::Red, "Santa"),
    (10, 36, NailType::Blue, "Snowman"),
    (30, 36, NailType::Blue, "Reindeer"),
];

/// Accumulates nails with dense ids in creation order
struct TreeBuilder {
    level: Level,
    placed: Vec<(u32, i32, i32)>,
    next_id: u32,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            level: Level::new(NUMBER, "Giant Christmas Tree", STACK_CAPACITY)
                .with_size(WIDTH, HEIGHT),
            placed: Vec::new(),
            next_id: 1,
        }
    }

    fn add(&mut self, x: i32, y: i32, nail_type: NailType, deps: &[u32], description: &str) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.placed.push((id, x, y));

        let nail = NailId::new(id);
        let position = Position {
            x: to_coord(x),
            y: to_coord(y),
        };
        self.level.add_nail(nail, position, nail_type);
        self.level.set_description(nail, description);
        if !deps.is_empty() {
            self.level
                .add_dependencies(nail, deps.iter().copied().map(NailId::new));
        }
        id
    }

    fn position(&self, id: u32) -> Option<(i32, i32)> {
        self.placed
            .iter()
            .find(|(placed, _, _)| *placed == id)
            .map(|(_, x, y)| (*x, *y))
    }
}

fn to_coord(v: i32) -> u16 {
    u16::try_from(v).unwrap_or(0)
}

fn branch_style(index: i32) -> (NailType, &'static str) {
    match index % 4 {
        0 => (NailType::Red, "Red bauble"),
        1 => (NailType::Green, "Pine branch"),
        2 => (NailType::Blue, "Blue LED light"),
        _ => (NailType::Yellow, "Small golden bell"),
    }
}

/// Horizontal spacing between branch nails on a layer
fn layer_spacing(layer: i32) -> i32 {
    if layer < 3 {
        3
    } else if layer < 6 {
        4
    } else {
        5
    }
}

/// Builds level 4
pub fn christmas_tree() -> Level {
    let mut tree = TreeBuilder::new();

    let star = tree.add(CENTER_X, 1, NailType::Yellow, &[], "Tree-top star");

    let mut previous_layer: Vec<u32> = Vec::new();
    for layer in 0..LAYERS {
        let width = (5 + layer * 4).min(MAX_LAYER_WIDTH);
        let start_x = CENTER_X - width / 2;
        let y = layer * LAYER_SPACING + TOP_MARGIN;
        let spacing = layer_spacing(layer);
        let count = width / spacing + 1;

        let mut current_layer = Vec::new();
        for i in 0..count {
            let x = start_x + i * spacing;
            if x >= start_x + width {
                continue;
            }

            // Hang on every nail of the layer above within 1.5 spacings
            let deps: Vec<u32> = if layer == 0 {
                vec![star]
            } else {
                previous_layer
                    .iter()
                    .copied()
                    .filter(|prev| {
                        tree.position(*prev)
                            .is_some_and(|(px, _)| 2 * (px - x).abs() <= 3 * spacing)
                    })
                    .collect()
            };
            if deps.is_empty() {
                continue;
            }

            let (nail_type, description) = branch_style(i);
            current_layer.push(tree.add(x, y, nail_type, &deps, description));
        }
        previous_layer = current_layer;
    }

    let trunk_y = LAYERS * LAYER_SPACING + TOP_MARGIN;
    for dy in 0..TRUNK_HEIGHT {
        for dx in 0..TRUNK_WIDTH {
            if (dx + dy) % 3 == 0 {
                tree.add(
                    TRUNK_X + dx,
                    trunk_y + dy,
                    NailType::Purple,
                    &previous_layer,
                    "Trunk",
                );
            }
        }
    }

    for (x, y, nail_type, description) in DECORATIONS {
        let deps: Vec<u32> = tree
            .placed
            .iter()
            .filter(|(_, ox, oy)| {
                (ox - x).abs() <= DECORATION_REACH && (oy - y).abs() <= DECORATION_REACH
            })
            .map(|(id, _, _)| *id)
            .collect();
        if !deps.is_empty() {
            tree.add(x, y, nail_type, &deps, description);
        }
    }

    tree.level
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NailGraph;

    #[test]
    fn tree_validates() {
        let level = christmas_tree();
        assert_eq!(level.validate(), Ok(()));
        assert_eq!(level.number, 4);
        assert_eq!(level.stack_capacity, 6);
        assert_eq!(level.nail_count(), 90);
    }

    #[test]
    fn ids_are_dense() {
        let level = christmas_tree();
        let ids: Vec<u32> = level.nail_ids().map(NailId::get).collect();
        let expected: Vec<u32> = (1..=level.nail_count() as u32).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn dependencies_point_to_earlier_nails() {
        let level = christmas_tree();
        for (nail, deps) in &level.dependencies {
            assert!(!deps.is_empty());
            assert!(deps.iter().all(|d| d < nail), "nail {nail}");
        }
    }

    #[test]
    fn only_the_star_starts_removable() {
        let level = christmas_tree();
        let graph = NailGraph::from_level(&level).unwrap();
        assert_eq!(graph.removable(), vec![NailId::new(1)]);
    }

    #[test]
    fn trunk_is_purple_and_hangs_on_the_bottom_layer() {
        let level = christmas_tree();
        let trunk: Vec<NailId> = level
            .descriptions
            .iter()
            .filter(|(_, d)| d.as_str() == "Trunk")
            .map(|(id, _)| *id)
            .collect();

        // (dx + dy) % 3 == 0 over an 8x6 block
        assert_eq!(trunk.len(), 16);
        let bottom = level.dependencies_of(trunk[0]).to_vec();
        for id in trunk {
            assert_eq!(level.types[&id], NailType::Purple);
            assert_eq!(level.dependencies_of(id), bottom.as_slice());
        }
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(christmas_tree(), christmas_tree());
    }
}
