//! Outward collaborators and the host loop that feeds them.
//!
//! The engine never calls these itself. A host drains events from the
//! controller and passes them through a `Presenter`; `run_session` does
//! exactly that for a scripted or interactive `InputSource`.

use std::collections::VecDeque;

use log::{debug, warn};

use crate::board::Board;
use crate::core::{Command, MatchError};
use crate::game::{MatchController, MatchEvent};
use crate::quiz::NoteIndex;

/// Draws the board and shows outcome text.
pub trait Renderer {
    fn draw_board(&mut self, board: &Board);
    fn show_message(&mut self, text: &str);
}

/// Plays note clips. Fire and forget.
pub trait AudioPlayer {
    fn play(&mut self, note: NoteIndex);
}

/// Turns raw UI events into commands. Performs no validation.
pub trait InputSource {
    /// Next command, or `None` when the input is exhausted.
    fn next_command(&mut self) -> Option<Command>;
}

/// Fixed queue of commands.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    queue: VecDeque<Command>,
}

impl ScriptedInput {
    pub fn new(commands: impl IntoIterator<Item = Command>) -> Self {
        Self {
            queue: commands.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn next_command(&mut self) -> Option<Command> {
        self.queue.pop_front()
    }
}

/// Routes match events to a renderer and an audio player.
pub struct Presenter<R, A> {
    renderer: R,
    audio: A,
}

impl<R: Renderer, A: AudioPlayer> Presenter<R, A> {
    pub fn new(renderer: R, audio: A) -> Self {
        Self { renderer, audio }
    }

    /// Present a batch of drained events against the current board.
    pub fn present(&mut self, board: &Board, events: &[MatchEvent]) {
        let redraw = events
            .iter()
            .any(|e| matches!(e, MatchEvent::MatchStarted | MatchEvent::DiscPlaced { .. }));
        if redraw {
            self.renderer.draw_board(board);
        }

        for event in events {
            match event {
                MatchEvent::QuizStarted { note, .. } | MatchEvent::GuessMade { note, .. } => {
                    self.audio.play(*note);
                }
                _ => {}
            }
            self.renderer.show_message(&event.to_string());
        }
    }

    /// Show a rejected command to the user.
    pub fn report_error(&mut self, err: &MatchError) {
        self.renderer.show_message(&err.to_string());
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn into_parts(self) -> (R, A) {
        (self.renderer, self.audio)
    }
}

/// Counts from a finished session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub accepted: usize,
    pub rejected: usize,
}

/// Feed every command from `input` to `controller`, presenting events as
/// they are produced. Rejected commands are reported and skipped.
pub fn run_session<R, A>(
    controller: &mut MatchController,
    input: &mut impl InputSource,
    presenter: &mut Presenter<R, A>,
) -> SessionSummary
where
    R: Renderer,
    A: AudioPlayer,
{
    let mut summary = SessionSummary::default();
    let events = controller.drain_events();
    presenter.present(controller.board(), &events);

    while let Some(command) = input.next_command() {
        match controller.apply(&command) {
            Ok(()) => {
                summary.accepted += 1;
                debug!("accepted {}", command.label());
            }
            Err(err) => {
                summary.rejected += 1;
                warn!("rejected {}: {err}", command.label());
                presenter.report_error(&err);
            }
        }
        let events = controller.drain_events();
        presenter.present(controller.board(), &events);
    }

    summary
}
