//! Property tests for board, ledger and mapping invariants.

use proptest::prelude::*;

use osero_duel::{
    Board, Direction, Disc, GameRng, NoteIndex, NoteMapping, Player, Position, ResourceLedger,
};

/// Walk a random game from the opening, choosing moves by index.
fn random_board(choices: &[usize]) -> (Board, Player) {
    let mut board = Board::standard();
    let mut player = Player::Black;
    for &choice in choices {
        let moves = board.legal_moves(player);
        if moves.is_empty() {
            player = player.opponent();
            if board.legal_moves(player).is_empty() {
                break;
            }
            continue;
        }
        board.place(moves[choice % moves.len()], player).unwrap();
        player = player.opponent();
    }
    (board, player)
}

fn notes() -> impl Strategy<Value = Vec<NoteIndex>> {
    prop::collection::vec((0u8..7).prop_map(|i| NoteIndex::new(i).unwrap()), 0..12)
}

proptest! {
    #[test]
    fn placement_changes_only_target_and_flips(
        choices in prop::collection::vec(any::<usize>(), 0..40),
        pick in any::<usize>(),
    ) {
        let (board, player) = random_board(&choices);
        let moves = board.legal_moves(player);
        prop_assume!(!moves.is_empty());
        let target = moves[pick % moves.len()];

        let flips = board.legal_flips(target, player);
        let before_total = 64 - board.count(Disc::Empty);
        let mut after = board.clone();
        let flipped = after.place(target, player).unwrap();

        prop_assert_eq!(flipped, flips.len());
        prop_assert!(flipped >= 1);
        prop_assert_eq!(64 - after.count(Disc::Empty), before_total + 1);

        let (black, white) = after.disc_counts();
        prop_assert_eq!(black + white + after.count(Disc::Empty), 64);

        let mover = Disc::of(player);
        let opponent = Disc::of(player.opponent());
        for cell in &flips {
            prop_assert_eq!(board.get(*cell), opponent);
        }
        let gained = flipped as u32;
        prop_assert_eq!(after.count(mover), board.count(mover) + 1 + gained);
        prop_assert_eq!(after.count(opponent) + gained, board.count(opponent));

        for cell in Position::all() {
            if cell == target || flips.contains(&cell) {
                prop_assert_eq!(after.get(cell), Disc::of(player));
            } else {
                prop_assert_eq!(after.get(cell), board.get(cell));
            }
        }
    }

    #[test]
    fn flips_stay_on_their_ray(
        choices in prop::collection::vec(any::<usize>(), 0..40),
    ) {
        let (board, player) = random_board(&choices);
        for target in board.legal_moves(player) {
            for dir in Direction::ALL {
                let ray = board.flips_in_direction(target, player, dir);
                let back = board.flips_in_direction(target, player, dir.opposite());
                for cell in &ray {
                    prop_assert!(!back.contains(cell));
                    let (dx, dy) = dir.delta();
                    let ox = cell.x() as i32 - target.x() as i32;
                    let oy = cell.y() as i32 - target.y() as i32;
                    // Same direction: offset is a positive multiple of the step.
                    let k = if dx != 0 { ox / dx } else { oy / dy };
                    prop_assert!(k > 0);
                    prop_assert_eq!((ox, oy), (dx * k, dy * k));
                }
            }
        }
    }

    #[test]
    fn has_any_legal_move_matches_enumeration(
        choices in prop::collection::vec(any::<usize>(), 0..60),
    ) {
        let (board, _) = random_board(&choices);
        for player in Player::ALL {
            prop_assert_eq!(board.has_any_legal_move(player), !board.legal_moves(player).is_empty());
        }
    }

    #[test]
    fn mapping_is_bijective(seed in any::<u64>()) {
        let mapping = NoteMapping::generate(&mut GameRng::new(seed));
        let mut order = *mapping.order();
        order.sort();
        prop_assert_eq!(order, NoteIndex::ALL);
        for n in 1..30 {
            prop_assert_eq!(mapping.note_for(n).unwrap(), mapping.note_for(n + 7).unwrap());
        }
    }

    #[test]
    fn health_stays_in_bounds(
        max in 1u32..500,
        ops in prop::collection::vec((any::<bool>(), 0u32..300, any::<bool>()), 0..40),
    ) {
        let mut ledger = ResourceLedger::new(max);
        for (damage, amount, shield) in ops {
            if shield {
                ledger.set_shield(Player::White, true);
            }
            if damage {
                ledger.apply_damage(Player::White, amount);
            } else {
                ledger.heal(Player::White, amount);
            }
            prop_assert!(ledger.health(Player::White) <= max);
        }
    }

    #[test]
    fn consume_removes_at_most_requested(stock in notes(), request in notes()) {
        let mut ledger = ResourceLedger::new(100);
        for &n in &stock {
            ledger.add_to_stock(Player::Black, n);
        }

        ledger.consume_from_stock(Player::Black, &request);

        for n in NoteIndex::ALL {
            let had = stock.iter().filter(|&&s| s == n).count();
            let asked = request.iter().filter(|&&r| r == n).count();
            let left = ledger.resources(Player::Black).count_of(n);
            prop_assert_eq!(left, had.saturating_sub(asked));
        }
    }
}
