//! The match state machine.
//!
//! ## Turn cycle
//!
//! ```text
//! AwaitingPlacement(p) -> AwaitingGuess(p, k) -> AwaitingAttackSelection(p)
//!     -> AwaitingPlacement(next) | GameOver
//! ```
//!
//! Every submit call runs to completion synchronously. A rejected call
//! returns an error and leaves the controller untouched: board, ledger,
//! phase, history and event queue are all as they were.

use im::Vector;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::event::MatchEvent;
use super::phase::{GameResult, Phase, WinReason};
use crate::adapters::SeedProvider;
use crate::board::{Board, Position};
use crate::combat::{AttackReport, CombinationResolver, CombinationSelection, Notes};
use crate::core::{
    Command, CommandRecord, GameRng, GameRngState, MatchConfig, MatchError, Player, Result,
};
use crate::ledger::ResourceLedger;
use crate::quiz::{GuessResult, NoteIndex, NoteMapping, QuizChallenge, QuizOutcome, QuizRound};

/// Serializable view of a match at one point in time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub board: Board,
    pub ledger: ResourceLedger,
    pub phase: Phase,
    pub mapping: NoteMapping,
    pub quiz_round: Option<QuizRound>,
    pub selection: CombinationSelection,
    pub rng: GameRngState,
    pub turn: u32,
    pub commands: usize,
}

/// Owns the board and ledger for a match and sequences its phases.
///
/// Outcome events queue up until the host takes them with
/// [`drain_events`](Self::drain_events). Hosts are expected to drain after
/// every call; only `reset` clears the queue on its own.
#[derive(Clone, Debug)]
pub struct MatchController {
    config: MatchConfig,
    rng: GameRng,
    opening: Board,
    board: Board,
    ledger: ResourceLedger,
    quiz: QuizChallenge,
    resolver: CombinationResolver,
    selection: CombinationSelection,
    phase: Phase,
    turn: u32,
    history: Vector<CommandRecord>,
    events: Vec<MatchEvent>,
}

impl MatchController {
    /// Start a match on the standard opening board.
    pub fn new(config: MatchConfig) -> Result<Self> {
        Self::with_board(config, Board::standard())
    }

    /// Start a match with the seed taken from `provider`.
    pub fn from_provider(config: MatchConfig, provider: &mut impl SeedProvider) -> Result<Self> {
        let seed = provider.seed();
        Self::new(MatchConfig { seed, ..config })
    }

    /// Start a match from a custom opening position. `reset()` returns to
    /// this position.
    pub fn with_board(config: MatchConfig, opening: Board) -> Result<Self> {
        config.validate()?;

        let mut rng = GameRng::new(config.seed);
        let mapping = NoteMapping::generate(&mut rng);

        let mut controller = Self {
            rng,
            board: opening.clone(),
            opening,
            ledger: ResourceLedger::new(config.max_health),
            quiz: QuizChallenge::new(mapping, config.max_mistakes),
            resolver: CombinationResolver::new(config.damage_per_note),
            selection: CombinationSelection::new(),
            phase: Phase::AwaitingPlacement {
                player: Player::Black,
            },
            turn: 0,
            history: Vector::new(),
            events: Vec::new(),
            config,
        };
        controller.begin();
        Ok(controller)
    }

    /// Rebuild a standard-opening match by resubmitting `commands` in order.
    pub fn replay<'a>(
        config: MatchConfig,
        commands: impl IntoIterator<Item = &'a Command>,
    ) -> Result<Self> {
        Self::replay_from(config, Board::standard(), commands)
    }

    /// Rebuild a match that started from `opening`.
    pub fn replay_from<'a>(
        config: MatchConfig,
        opening: Board,
        commands: impl IntoIterator<Item = &'a Command>,
    ) -> Result<Self> {
        let mut controller = Self::with_board(config, opening)?;
        for command in commands {
            controller.apply(command)?;
        }
        Ok(controller)
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The position this match started from and resets to.
    #[must_use]
    pub fn opening(&self) -> &Board {
        &self.opening
    }

    #[must_use]
    pub fn ledger(&self) -> &ResourceLedger {
        &self.ledger
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The player expected to act, or `None` once the match is over.
    #[must_use]
    pub fn active_player(&self) -> Option<Player> {
        self.phase.player()
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        match self.phase {
            Phase::GameOver(result) => Some(result),
            _ => None,
        }
    }

    #[must_use]
    pub fn mapping(&self) -> &NoteMapping {
        self.quiz.mapping()
    }

    #[must_use]
    pub fn quiz_round(&self) -> Option<&QuizRound> {
        self.quiz.round()
    }

    #[must_use]
    pub fn selection(&self) -> &CombinationSelection {
        &self.selection
    }

    /// Number of turns started so far in this match.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Every accepted command since construction, resets included.
    #[must_use]
    pub fn history(&self) -> &Vector<CommandRecord> {
        &self.history
    }

    /// Take the queued outcome events.
    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            board: self.board.clone(),
            ledger: self.ledger.clone(),
            phase: self.phase,
            mapping: *self.quiz.mapping(),
            quiz_round: self.quiz.round().copied(),
            selection: self.selection.clone(),
            rng: self.rng.state(),
            turn: self.turn,
            commands: self.history.len(),
        }
    }

    // === Commands ===

    /// Dispatch a command to the matching submit call.
    pub fn apply(&mut self, command: &Command) -> Result<()> {
        match command {
            Command::Place(pos) => self.submit_placement(*pos).map(drop),
            Command::Guess(note) => self.submit_guess(*note).map(drop),
            Command::ToggleSelection(slot) => self.toggle_selection(*slot).map(drop),
            Command::ConfirmAttack => self.confirm_attack().map(drop),
            Command::Attack(notes) => self.submit_attack(notes).map(drop),
            Command::Heal { player, amount } => self.heal(*player, *amount).map(drop),
            Command::SetShield { player, active } => self.set_shield(*player, *active),
            Command::Reset => {
                self.reset();
                Ok(())
            }
        }
    }

    /// Place a disc for the active player. Returns the number of flips.
    pub fn submit_placement(&mut self, pos: Position) -> Result<usize> {
        let command = Command::Place(pos);
        let Phase::AwaitingPlacement { player } = self.phase else {
            return Err(self.out_of_phase(&command));
        };

        // Nothing is committed until the quiz round has started.
        let mut next = self.board.clone();
        let flipped = next.place(pos, player).inspect_err(|err| {
            warn!("rejected placement: {err}");
        })?;
        let note = self.quiz.start(flipped as i32)?;
        self.board = next;

        self.phase = Phase::AwaitingGuess {
            player,
            flip_count: flipped as u32,
        };
        self.events.push(MatchEvent::DiscPlaced {
            player,
            pos,
            flipped,
        });
        self.events.push(MatchEvent::QuizStarted { player, note });
        self.record(player, command);
        Ok(flipped)
    }

    /// Answer the running quiz round.
    pub fn submit_guess(&mut self, note: NoteIndex) -> Result<GuessResult> {
        let command = Command::Guess(note);
        let Phase::AwaitingGuess { player, .. } = self.phase else {
            return Err(self.out_of_phase(&command));
        };
        let Some(result) = self.quiz.guess(note) else {
            return Err(self.out_of_phase(&command));
        };

        let correct = matches!(result, GuessResult::Resolved(QuizOutcome::Success(_)));
        debug!("{player} guessed {note}: {}", if correct { "hit" } else { "miss" });
        self.events.push(MatchEvent::GuessMade {
            player,
            note,
            correct,
        });
        self.record(player, command);

        if let GuessResult::Resolved(outcome) = result {
            match outcome {
                QuizOutcome::Success(stocked) => {
                    self.ledger.add_to_stock(player, stocked);
                    self.events.push(MatchEvent::StockAdded {
                        player,
                        note: stocked,
                    });
                }
                QuizOutcome::Failure(_) => {
                    self.events.push(MatchEvent::QuizFailed { player });
                }
            }
            self.enter_attack_phase(player);
        }
        Ok(result)
    }

    /// Toggle a stock slot in the pending attack selection. Returns whether
    /// the slot is now selected.
    pub fn toggle_selection(&mut self, slot: usize) -> Result<bool> {
        let command = Command::ToggleSelection(slot);
        let Phase::AwaitingAttackSelection { player } = self.phase else {
            return Err(self.out_of_phase(&command));
        };

        let selected = self
            .selection
            .toggle(slot, self.ledger.stock_of(player).len())?;
        self.record(player, command);
        Ok(selected)
    }

    /// Attack with the toggled selection.
    pub fn confirm_attack(&mut self) -> Result<AttackReport> {
        let command = Command::ConfirmAttack;
        let Phase::AwaitingAttackSelection { player } = self.phase else {
            return Err(self.out_of_phase(&command));
        };

        let notes = self.selection.notes(self.ledger.stock_of(player));
        self.resolve_attack(player, &notes, command)
    }

    /// Attack with an explicit selection of notes. An empty selection
    /// skips the attack.
    pub fn submit_attack(&mut self, notes: &[NoteIndex]) -> Result<AttackReport> {
        let command = Command::Attack(Notes::from_slice(notes));
        let Phase::AwaitingAttackSelection { player } = self.phase else {
            return Err(self.out_of_phase(&command));
        };

        self.resolve_attack(player, notes, command)
    }

    /// Host-driven heal. Rejected once the match is over.
    pub fn heal(&mut self, player: Player, amount: u32) -> Result<u32> {
        let command = Command::Heal { player, amount };
        let Some(active) = self.phase.player() else {
            return Err(self.out_of_phase(&command));
        };

        let healed = self.ledger.heal(player, amount);
        self.events.push(MatchEvent::Healed {
            player,
            amount: healed,
        });
        self.record(active, command);
        Ok(healed)
    }

    /// Host-driven shield toggle. Rejected once the match is over.
    pub fn set_shield(&mut self, player: Player, active: bool) -> Result<()> {
        let command = Command::SetShield { player, active };
        let Some(acting) = self.phase.player() else {
            return Err(self.out_of_phase(&command));
        };

        self.ledger.set_shield(player, active);
        self.events.push(MatchEvent::ShieldChanged { player, active });
        self.record(acting, command);
        Ok(())
    }

    /// Start a new match with the same config and opening board.
    ///
    /// The note mapping is redrawn from the continuing RNG stream, so a
    /// rematch gets a fresh mapping while staying replayable.
    pub fn reset(&mut self) {
        let player = self.phase.player();
        let mapping = NoteMapping::generate(&mut self.rng);

        self.board = self.opening.clone();
        self.ledger = ResourceLedger::new(self.config.max_health);
        self.quiz = QuizChallenge::new(mapping, self.config.max_mistakes);
        self.selection.clear();
        self.turn = 0;
        self.events.clear();
        self.push_record(player, Command::Reset);
        self.begin();
    }

    // === Internals ===

    fn begin(&mut self) {
        info!("match started");
        self.events.push(MatchEvent::MatchStarted);
        self.settle_turn(Player::Black);
    }

    fn resolve_attack(
        &mut self,
        player: Player,
        notes: &[NoteIndex],
        command: Command,
    ) -> Result<AttackReport> {
        let report = self
            .resolver
            .resolve(&mut self.ledger, player, notes)
            .inspect_err(|err| warn!("rejected attack: {err}"))?;

        self.events.push(MatchEvent::AttackResolved(report));
        self.selection.clear();
        self.record(player, command);
        self.advance_turn(player);
        Ok(report)
    }

    fn enter_attack_phase(&mut self, player: Player) {
        self.selection.clear();
        self.phase = Phase::AwaitingAttackSelection { player };
        self.events.push(MatchEvent::AttackPhaseStarted {
            player,
            stock: self.ledger.stock_of(player).len(),
        });
    }

    /// End-of-turn resolution. A knockout beats everything else.
    fn advance_turn(&mut self, current: Player) {
        let black_down = self.ledger.is_knocked_out(Player::Black);
        let white_down = self.ledger.is_knocked_out(Player::White);

        let knockout = match (black_down, white_down) {
            (true, true) => Some(GameResult::Draw {
                reason: WinReason::Knockout,
            }),
            (true, false) => Some(GameResult::Winner {
                player: Player::White,
                reason: WinReason::Knockout,
            }),
            (false, true) => Some(GameResult::Winner {
                player: Player::Black,
                reason: WinReason::Knockout,
            }),
            (false, false) => None,
        };

        match knockout {
            Some(result) => self.finish(result),
            None => self.settle_turn(current.opponent()),
        }
    }

    /// Give the turn to `candidate`, passing silently if they cannot move.
    fn settle_turn(&mut self, candidate: Player) {
        if self.board.has_any_legal_move(candidate) {
            self.start_turn(candidate);
            return;
        }

        info!("{candidate} has no legal move and passes");
        self.events.push(MatchEvent::Passed { player: candidate });

        let other = candidate.opponent();
        if self.board.has_any_legal_move(other) {
            self.start_turn(other);
        } else {
            let result = self.disc_count_result();
            self.finish(result);
        }
    }

    fn start_turn(&mut self, player: Player) {
        self.turn += 1;
        self.phase = Phase::AwaitingPlacement { player };
        self.events.push(MatchEvent::TurnStarted {
            player,
            turn: self.turn,
        });
    }

    fn disc_count_result(&self) -> GameResult {
        let (black, white) = self.board.disc_counts();
        let reason = WinReason::DiscCount;
        match black.cmp(&white) {
            std::cmp::Ordering::Greater => GameResult::Winner {
                player: Player::Black,
                reason,
            },
            std::cmp::Ordering::Less => GameResult::Winner {
                player: Player::White,
                reason,
            },
            std::cmp::Ordering::Equal => GameResult::Draw { reason },
        }
    }

    fn finish(&mut self, result: GameResult) {
        info!("game over: {result}");
        self.quiz.cancel();
        self.selection.clear();
        self.phase = Phase::GameOver(result);
        self.events.push(MatchEvent::GameOver(result));
    }

    fn out_of_phase(&self, command: &Command) -> MatchError {
        warn!("ignored {} during {}", command.label(), self.phase);
        MatchError::OutOfPhase {
            event: command.label(),
            phase: self.phase,
        }
    }

    fn record(&mut self, player: Player, command: Command) {
        self.push_record(Some(player), command);
    }

    fn push_record(&mut self, player: Option<Player>, command: Command) {
        let sequence = self.history.len() as u32;
        self.history
            .push_back(CommandRecord::new(sequence, player, command));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::FixedSeed;

    fn pos(x: i32, y: i32) -> Position {
        Position::new(x, y).unwrap()
    }

    fn note(i: u8) -> NoteIndex {
        NoteIndex::new(i).unwrap()
    }

    fn wrong_note(controller: &MatchController) -> NoteIndex {
        let correct = controller.quiz_round().unwrap().correct_note;
        NoteIndex::ALL.into_iter().find(|&n| n != correct).unwrap()
    }

    #[test]
    fn test_new_match_awaits_black() {
        let controller = MatchController::new(MatchConfig::new(1)).unwrap();
        assert_eq!(
            controller.phase(),
            Phase::AwaitingPlacement {
                player: Player::Black
            }
        );
        assert_eq!(controller.turn(), 1);
        assert!(controller.history().is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = MatchController::new(MatchConfig::new(1).with_max_health(0)).unwrap_err();
        assert!(matches!(err, MatchError::InvalidConfig(_)));
    }

    #[test]
    fn test_placement_opens_quiz() {
        let mut controller = MatchController::new(MatchConfig::new(1)).unwrap();
        controller.drain_events();

        assert_eq!(controller.submit_placement(pos(2, 3)).unwrap(), 1);
        assert_eq!(
            controller.phase(),
            Phase::AwaitingGuess {
                player: Player::Black,
                flip_count: 1
            }
        );
        let expected = controller.mapping().note_for(1).unwrap();
        assert_eq!(controller.quiz_round().unwrap().correct_note, expected);

        let events = controller.drain_events();
        assert_eq!(
            events,
            vec![
                MatchEvent::DiscPlaced {
                    player: Player::Black,
                    pos: pos(2, 3),
                    flipped: 1
                },
                MatchEvent::QuizStarted {
                    player: Player::Black,
                    note: expected
                },
            ]
        );
    }

    #[test]
    fn test_illegal_placement_leaves_state() {
        let mut controller = MatchController::new(MatchConfig::new(1)).unwrap();
        let before = controller.snapshot();

        assert!(controller.submit_placement(pos(0, 0)).is_err());
        assert!(controller.submit_placement(pos(3, 3)).is_err());
        assert_eq!(controller.snapshot(), before);
    }

    #[test]
    fn test_rejected_placement_queues_nothing() {
        let mut controller = MatchController::new(MatchConfig::new(1)).unwrap();
        controller.drain_events();

        assert!(controller.submit_placement(pos(5, 5)).is_err());

        assert_eq!(controller.board(), &Board::standard());
        assert!(controller.quiz_round().is_none());
        assert!(controller.drain_events().is_empty());
        assert!(controller.history().is_empty());
    }

    #[test]
    fn test_out_of_phase_events_are_rejected() {
        let mut controller = MatchController::new(MatchConfig::new(1)).unwrap();
        controller.drain_events();

        assert!(matches!(
            controller.submit_guess(note(0)),
            Err(MatchError::OutOfPhase { event: "guess", .. })
        ));
        assert!(controller.submit_attack(&[]).is_err());
        assert!(controller.toggle_selection(0).is_err());

        controller.submit_placement(pos(2, 3)).unwrap();
        let before = controller.snapshot();
        assert!(matches!(
            controller.submit_placement(pos(2, 2)),
            Err(MatchError::OutOfPhase { event: "placement", .. })
        ));
        assert!(controller.confirm_attack().is_err());
        assert_eq!(controller.snapshot(), before);
    }

    #[test]
    fn test_correct_guess_stocks_note() {
        let mut controller = MatchController::new(MatchConfig::new(3)).unwrap();
        controller.submit_placement(pos(2, 3)).unwrap();
        let correct = controller.quiz_round().unwrap().correct_note;

        controller.submit_guess(correct).unwrap();

        assert_eq!(
            controller.phase(),
            Phase::AwaitingAttackSelection {
                player: Player::Black
            }
        );
        assert_eq!(
            controller.ledger().stock_of(Player::Black).iter().copied().collect::<Vec<_>>(),
            vec![correct]
        );
    }

    #[test]
    fn test_failed_quiz_still_grants_attack() {
        let mut controller = MatchController::new(MatchConfig::new(3)).unwrap();
        controller.submit_placement(pos(2, 3)).unwrap();

        for _ in 0..3 {
            let wrong = wrong_note(&controller);
            controller.submit_guess(wrong).unwrap();
        }

        assert_eq!(
            controller.phase(),
            Phase::AwaitingAttackSelection {
                player: Player::Black
            }
        );
        assert!(controller.ledger().stock_of(Player::Black).is_empty());
    }

    #[test]
    fn test_attack_switches_turn() {
        let mut controller = MatchController::new(MatchConfig::new(3)).unwrap();
        controller.submit_placement(pos(2, 3)).unwrap();
        let correct = controller.quiz_round().unwrap().correct_note;
        controller.submit_guess(correct).unwrap();

        assert!(controller.toggle_selection(0).unwrap());
        assert!(controller.selection().is_selected(0));
        let report = controller.confirm_attack().unwrap();

        assert_eq!(report.damage, 10);
        assert_eq!(controller.ledger().health(Player::White), 90);
        assert!(controller.ledger().stock_of(Player::Black).is_empty());
        assert_eq!(
            controller.phase(),
            Phase::AwaitingPlacement {
                player: Player::White
            }
        );
        assert_eq!(controller.turn(), 2);
    }

    #[test]
    fn test_invalid_selection_keeps_phase() {
        let mut controller = MatchController::new(MatchConfig::new(3)).unwrap();
        controller.submit_placement(pos(2, 3)).unwrap();
        for _ in 0..3 {
            let wrong = wrong_note(&controller);
            controller.submit_guess(wrong).unwrap();
        }
        let before = controller.snapshot();

        assert!(matches!(
            controller.submit_attack(&[note(0)]),
            Err(MatchError::InvalidSelection(_))
        ));
        assert!(controller.toggle_selection(0).is_err());
        assert_eq!(controller.snapshot(), before);
    }

    #[test]
    fn test_game_over_rejects_everything_but_reset() {
        let board = Board::from_rows(["BBBBBBBB"; 8]);
        let mut controller = MatchController::with_board(MatchConfig::new(0), board).unwrap();
        assert!(controller.phase().is_game_over());

        assert!(controller.submit_placement(pos(0, 0)).is_err());
        assert!(controller.heal(Player::Black, 5).is_err());
        assert!(controller.set_shield(Player::Black, true).is_err());

        controller.reset();
        assert_eq!(controller.history().len(), 1);
        assert_eq!(controller.history()[0].player, None);
    }

    #[test]
    fn test_reset_restores_fresh_match() {
        let mut controller = MatchController::new(MatchConfig::new(5)).unwrap();
        controller.submit_placement(pos(2, 3)).unwrap();

        controller.reset();

        assert_eq!(controller.board(), &Board::standard());
        assert_eq!(controller.ledger(), &ResourceLedger::new(100));
        assert_eq!(
            controller.phase(),
            Phase::AwaitingPlacement {
                player: Player::Black
            }
        );
        assert!(controller.quiz_round().is_none());
        // Redrawn from the continuing stream; still a valid permutation.
        let mut order = *controller.mapping().order();
        order.sort();
        assert_eq!(order, NoteIndex::ALL);
    }

    #[test]
    fn test_replay_from_custom_opening() {
        let board = Board::from_rows([
            "BW......", "........", "BW......", "........", "........", "........", "........",
            "........",
        ]);
        let config = MatchConfig::new(3);
        let mut controller = MatchController::with_board(config.clone(), board.clone()).unwrap();
        controller.submit_placement(pos(2, 0)).unwrap();

        let commands: Vec<Command> = controller.history().iter().map(|r| r.command.clone()).collect();
        let replayed = MatchController::replay_from(config, board, &commands).unwrap();

        assert_eq!(replayed.opening(), controller.opening());
        assert_eq!(replayed.snapshot(), controller.snapshot());
    }

    #[test]
    fn test_host_effects() {
        let mut controller = MatchController::new(MatchConfig::new(5)).unwrap();
        controller.set_shield(Player::White, true).unwrap();
        assert!(controller.ledger().has_shield(Player::White));
        assert_eq!(controller.heal(Player::White, 10).unwrap(), 0);
        assert_eq!(controller.history().len(), 2);
    }

    #[test]
    fn test_fixed_seed_provider() {
        let a = MatchController::from_provider(MatchConfig::default(), &mut FixedSeed(77)).unwrap();
        let b = MatchController::new(MatchConfig::new(77)).unwrap();
        assert_eq!(a.mapping(), b.mapping());
        assert_eq!(a.config().seed, 77);
    }
}
