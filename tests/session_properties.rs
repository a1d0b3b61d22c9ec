//! Property tests: random levels and random play traces

use proptest::prelude::*;

use nail_puzzle::domain::{GameStatus, Level, NailId, NailType, PlacementResult, Session};

/// A random acyclic level: nail `i` may only depend on nails below `i`
fn arb_level() -> impl Strategy<Value = Level> {
    (1usize..12, 1usize..5).prop_flat_map(|(nails, capacity)| {
        let types = prop::collection::vec(prop::sample::select(NailType::ALL.to_vec()), nails);
        let deps = prop::collection::vec(prop::collection::vec(any::<prop::sample::Index>(), 0..3), nails);

        (types, deps).prop_map(move |(types, deps)| {
            let mut level = Level::new(1, "Random", capacity);
            for (i, nail_type) in types.into_iter().enumerate() {
                let id = i as u32 + 1;
                level = level.nail(id, (i as u16, 0), nail_type);
            }
            for (i, picks) in deps.into_iter().enumerate().skip(1) {
                let mut below: Vec<u32> = picks.iter().map(|p| p.index(i) as u32 + 1).collect();
                below.sort_unstable();
                below.dedup();
                level = level.depends_on(i as u32 + 1, &below);
            }
            level
        })
    })
}

/// Actions: `None` adds a stack, `Some(n)` tries to remove nail `n`
fn arb_actions() -> impl Strategy<Value = Vec<Option<u32>>> {
    prop::collection::vec(prop::option::weighted(0.85, 1u32..14), 0..40)
}

fn apply(session: &mut Session, action: Option<u32>) {
    match action {
        Some(n) => {
            let _ = session.attempt_remove(NailId::new(n));
        }
        None => {
            let _ = session.add_stack();
        }
    }
}

proptest! {
    #[test]
    fn generated_levels_are_valid(level in arb_level()) {
        prop_assert!(level.validate().is_ok());
    }

    #[test]
    fn removed_set_only_grows(level in arb_level(), actions in arb_actions()) {
        let mut session = Session::new(level).unwrap();
        let mut removed = session.removed_nails();

        for action in actions {
            apply(&mut session, action);
            let now = session.removed_nails();
            prop_assert!(removed.iter().all(|id| now.contains(id)));
            prop_assert!(now.len() <= removed.len() + 1);
            removed = now;
        }
    }

    #[test]
    fn stacks_respect_capacity_and_type(level in arb_level(), actions in arb_actions()) {
        let mut session = Session::new(level).unwrap();

        for action in actions {
            apply(&mut session, action);
            for stack in session.stacks() {
                prop_assert!(stack.len() < stack.capacity());
                if let Some(accepted) = stack.accepted_type() {
                    for id in stack.items() {
                        prop_assert_eq!(session.nail(*id).unwrap().nail_type, accepted);
                    }
                } else {
                    prop_assert!(stack.is_empty());
                }
            }
        }
    }

    #[test]
    fn removed_nails_had_their_dependencies_removed(level in arb_level(), actions in arb_actions()) {
        let mut session = Session::new(level).unwrap();

        for action in actions {
            apply(&mut session, action);
        }

        for id in session.removed_nails() {
            for dep in session.graph().dependencies(id) {
                prop_assert!(session.nail(dep).unwrap().removed);
            }
        }
    }

    #[test]
    fn complete_iff_every_nail_removed(level in arb_level(), actions in arb_actions()) {
        let mut session = Session::new(level).unwrap();

        for action in actions {
            apply(&mut session, action);
            let all_removed = session.nails().all(|n| n.removed);
            prop_assert_eq!(session.is_complete(), all_removed);
            if session.status() == GameStatus::LevelComplete {
                prop_assert!(session.winner().is_some());
            }
        }
    }

    #[test]
    fn game_over_is_final(level in arb_level(), actions in arb_actions()) {
        let mut session = Session::new(level).unwrap();
        let mut over = false;

        for action in actions {
            if let Some(n) = action {
                if let Ok(removal) = session.attempt_remove(NailId::new(n)) {
                    prop_assert!(!over);
                    if removal.placement == PlacementResult::Rejected {
                        over = true;
                    }
                }
            } else {
                apply(&mut session, None);
            }

            prop_assert_eq!(session.is_game_over(), over);
        }
    }

    #[test]
    fn players_alternate_on_placements(level in arb_level(), actions in arb_actions()) {
        let mut session = Session::new(level).unwrap();

        for action in actions {
            apply(&mut session, action);
            let expected = if session.moves() % 2 == 0 { 1 } else { 2 };
            prop_assert_eq!(session.current_player().number(), expected);
        }
    }
}
