//! Host loop tests: commands in, rendering and audio out.

use osero_duel::{
    run_session, AudioPlayer, Board, Command, MatchConfig, MatchController, MatchEvent,
    NoteIndex, Position, Presenter, Renderer, ScriptedInput, SessionSummary,
};

#[derive(Default)]
struct RecordingRenderer {
    boards: Vec<String>,
    messages: Vec<String>,
}

impl Renderer for RecordingRenderer {
    fn draw_board(&mut self, board: &Board) {
        self.boards.push(board.to_string());
    }

    fn show_message(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }
}

#[derive(Default)]
struct RecordingAudio {
    played: Vec<NoteIndex>,
}

impl AudioPlayer for RecordingAudio {
    fn play(&mut self, note: NoteIndex) {
        self.played.push(note);
    }
}

fn pos(x: i32, y: i32) -> Position {
    Position::new(x, y).unwrap()
}

#[test]
fn test_scripted_turn() {
    let mut controller = MatchController::new(MatchConfig::new(17)).unwrap();
    let answer = controller.mapping().note_for(1).unwrap();

    let mut input = ScriptedInput::new([
        Command::Guess(answer),         // out of phase
        Command::Place(pos(0, 0)),      // illegal
        Command::Place(pos(2, 3)),
        Command::Guess(answer),
        Command::ToggleSelection(0),
        Command::ConfirmAttack,
    ]);
    let mut presenter = Presenter::new(RecordingRenderer::default(), RecordingAudio::default());

    let summary = run_session(&mut controller, &mut input, &mut presenter);

    assert_eq!(
        summary,
        SessionSummary {
            accepted: 4,
            rejected: 2
        }
    );
    assert_eq!(controller.ledger().health(osero_duel::Player::White), 90);

    let (renderer, audio) = presenter.into_parts();
    // Quiz prompt plus the player's guess.
    assert_eq!(audio.played, vec![answer, answer]);
    // Opening board and the board after the placement.
    assert_eq!(renderer.boards.len(), 2);
    assert!(renderer.messages.iter().any(|m| m.contains("not accepted")));
    assert!(renderer.messages.iter().any(|m| m == "White took 10 damage (90 left)"));
}

#[test]
fn test_presenter_plays_each_guess() {
    let mut presenter = Presenter::new(RecordingRenderer::default(), RecordingAudio::default());
    let player = osero_duel::Player::Black;
    let events = [
        MatchEvent::GuessMade {
            player,
            note: NoteIndex::new(2).unwrap(),
            correct: false,
        },
        MatchEvent::QuizFailed { player },
    ];

    presenter.present(&Board::standard(), &events);

    assert_eq!(presenter.audio().played, vec![NoteIndex::new(2).unwrap()]);
    assert!(presenter.renderer().boards.is_empty());
    assert_eq!(presenter.renderer().messages.len(), 2);
}
