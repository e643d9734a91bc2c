use proptest::prelude::*;

use crate::constants::*;
use crate::errors::InvalidInputError;
use crate::game::{Move, Puzzle, PuzzleState};

fn states(puzzle: &Puzzle, state: &PuzzleState) -> Vec<PuzzleState> {
    puzzle
        .successors(state)
        .into_iter()
        .map(|(_, next)| next)
        .collect()
}

#[test]
fn test_puzzle_539_successors() {
    let puzzle = Puzzle::new(&PUZZLE_539).unwrap();
    assert_eq!(
        vec![
            PuzzleState::from([1, 4, 3, 9]),
            PuzzleState::from([5, 1, 2, 9]),
            PuzzleState::from([5, 3, 1, 8]),
            PuzzleState::from([5, 3, 2, 7]),
            PuzzleState::from([8, 9]),
        ],
        states(&puzzle, puzzle.initial())
    );
}

#[test]
fn test_puzzle_539_moves() {
    let puzzle = Puzzle::new(&PUZZLE_539).unwrap();
    let moves: Vec<Move> = puzzle
        .successors(puzzle.initial())
        .into_iter()
        .map(|(step, _)| step)
        .collect();
    assert_eq!(
        moves,
        vec![
            Move::Split { position: 0, left: 1, right: 4 },
            Move::Split { position: 1, left: 1, right: 2 },
            Move::Split { position: 2, left: 1, right: 8 },
            Move::Split { position: 2, left: 2, right: 7 },
            Move::Merge { position: 0 },
        ]
    );
}

#[test]
fn test_goal_is_reversed_initial() {
    let puzzle = Puzzle::new(&PUZZLE_851).unwrap();
    assert_eq!(puzzle.goal(), &PuzzleState::from(PUZZLE_851_GOAL));
    assert!(puzzle.is_goal(&PuzzleState::from([1, 5, 8])));
    assert!(!puzzle.is_goal(&PuzzleState::from([8, 5, 1])));
    assert!(!puzzle.is_goal(&PuzzleState::from([1, 5])));
    assert_eq!(puzzle.max_value(), 8);
}

#[test]
fn test_bound_comes_from_the_instance() {
    // 12 may appear because the instance's own maximum is 12
    let puzzle = Puzzle::new(&PUZZLE_31279).unwrap();
    assert_eq!(puzzle.max_value(), 12);
    let merged = states(&puzzle, &PuzzleState::from([3, 12, 7, 9]));
    assert!(!merged.contains(&PuzzleState::from([15, 7, 9])));
    let wide = states(&puzzle, &PuzzleState::from([3, 2, 7, 10]));
    assert!(wide.contains(&PuzzleState::from([5, 7, 10])));
    assert!(wide.iter().all(|s| s.iter().all(|&v| v <= 12)));
    assert!(states(&puzzle, &PuzzleState::from([12, 3, 7, 1]))
        .contains(&PuzzleState::from([12, 10, 1])));
}

#[test]
fn test_stuck_puzzle_has_no_moves() {
    let puzzle = Puzzle::new(&PUZZLE_STUCK).unwrap();
    assert!(puzzle.successors(puzzle.initial()).is_empty());
}

#[test]
fn test_single_values() {
    let one = Puzzle::new(&[1]).unwrap();
    assert!(one.is_degenerate());
    assert!(one.successors(one.initial()).is_empty());
    let nine = Puzzle::new(&[9]).unwrap();
    assert!(nine.is_degenerate());
    assert_eq!(nine.successors(nine.initial()).len(), 4);
}

#[test]
fn test_value_range() {
    let widest = Puzzle::new(&[u32::MAX as i64, 1]).unwrap();
    assert_eq!(widest.max_value(), u32::MAX);
    assert_eq!(
        Puzzle::new(&[u32::MAX as i64 + 1, 1]),
        Err(InvalidInputError::TooLarge(u32::MAX as i64 + 1))
    );
    // merges up to the bound are found without overflowing
    let puzzle = Puzzle::new(&[40, 2, 1]).unwrap();
    let merged = states(&puzzle, &PuzzleState::from([38, 2, 1]));
    assert!(merged.contains(&PuzzleState::from([40, 1])));
    assert!(merged.contains(&PuzzleState::from([38, 3])));
    assert_eq!(merged.len(), 18);
}

#[test]
fn test_split_keeps_smaller_part_first() {
    let state = PuzzleState::from([7]);
    let split = Move::Split { position: 0, left: 2, right: 5 };
    assert_eq!(split.apply(&state), Some(PuzzleState::from([2, 5])));
    assert_eq!(Move::Merge { position: 0 }.apply(&PuzzleState::from([2, 5])), Some(state));
}

#[test]
fn test_moves_that_do_not_fit() {
    let state = PuzzleState::from([u32::MAX, 1, 6]);
    assert_eq!(Move::Merge { position: 0 }.apply(&state), None);
    assert_eq!(Move::Merge { position: 2 }.apply(&state), None);
    assert_eq!(Move::Merge { position: usize::MAX }.apply(&state), None);
    assert_eq!(Move::Split { position: 2, left: 1, right: 4 }.apply(&state), None);
    assert_eq!(Move::Split { position: 3, left: 2, right: 4 }.apply(&state), None);
    assert_eq!(
        Move::Split { position: 2, left: 2, right: 4 }.apply(&state),
        Some(PuzzleState::from([u32::MAX, 1, 2, 4]))
    );
    assert_eq!(
        Move::Merge { position: 1 }.apply(&state),
        Some(PuzzleState::from([u32::MAX, 7]))
    );
}

#[test]
fn test_move_between_and_validate_path() {
    let puzzle = Puzzle::new(&PUZZLE_851).unwrap();
    let a = PuzzleState::from([8, 5, 1]);
    let b = PuzzleState::from([8, 6]);
    assert_eq!(puzzle.move_between(&a, &b), Some(Move::Merge { position: 1 }));
    assert_eq!(puzzle.move_between(&b, &a), None);
    assert!(!puzzle.validate_path(&[]));
    assert!(!puzzle.validate_path(&[a.clone(), b.clone()]));
    assert!(!puzzle.validate_path(&[a, PuzzleState::from([1, 5, 8])]));
}

#[test]
fn test_parsing() {
    let puzzle: Puzzle = "5 3 9".parse().unwrap();
    assert_eq!(puzzle, Puzzle::new(&PUZZLE_539).unwrap());
    let puzzle: Puzzle = "[8, 5, 1]".parse().unwrap();
    assert_eq!(puzzle.initial(), &PuzzleState::from([8, 5, 1]));
    assert_eq!(
        "5 x".parse::<Puzzle>(),
        Err(InvalidInputError::NotAnInteger("x".to_string()))
    );
    assert_eq!(
        "5 2.5".parse::<Puzzle>(),
        Err(InvalidInputError::NotAnInteger("2.5".to_string()))
    );
    assert_eq!("4 9 4".parse::<Puzzle>(), Err(InvalidInputError::Duplicate(4)));
    assert_eq!("0 1".parse::<Puzzle>(), Err(InvalidInputError::NonPositive(0)));
    assert_eq!("-3 2".parse::<Puzzle>(), Err(InvalidInputError::NonPositive(-3)));
    assert_eq!("  ".parse::<Puzzle>(), Err(InvalidInputError::Empty));
    assert_eq!(Puzzle::new(&[1 << 40]), Err(InvalidInputError::TooLarge(1 << 40)));
}

#[test]
fn test_state_display() {
    assert_eq!(PuzzleState::from([5, 3, 9]).to_string(), "[5, 3, 9]");
    assert_eq!(PuzzleState::default().to_string(), "[]");
    assert_eq!(
        Move::Split { position: 2, left: 1, right: 8 }.to_string(),
        "split@2 -> 1 + 8"
    );
}

fn distinct_values() -> impl Strategy<Value = Vec<i64>> {
    proptest::collection::hash_set(1i64..=24, 1..7)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
}

proptest! {
    #[test]
    fn successors_respect_invariants(values in distinct_values()) {
        let puzzle = Puzzle::new(&values).unwrap();
        let mut layer = vec![puzzle.initial().clone()];
        // two layers deep
        for _ in 0..2 {
            let mut next_layer = vec![];
            for state in &layer {
                for (_, next) in puzzle.successors(state) {
                    prop_assert!(puzzle.admits(&next), "{} breaks the invariants", next);
                    prop_assert_eq!(next.iter().sum::<u32>(), state.iter().sum::<u32>());
                    next_layer.push(next);
                }
            }
            layer = next_layer;
        }
    }

    #[test]
    fn merge_undoes_split(values in distinct_values()) {
        let puzzle = Puzzle::new(&values).unwrap();
        let state = puzzle.initial();
        for (step, next) in puzzle.successors(state) {
            if let Move::Split { position, left, right } = step {
                prop_assert_eq!(left + right, state[position]);
                prop_assert!(left != right);
                let merge = Move::Merge { position };
                let merged = merge.apply(&next);
                prop_assert_eq!(merged.as_ref(), Some(state));
                prop_assert_eq!(puzzle.move_between(&next, state), Some(merge));
            }
        }
    }
}
