//! Turn orchestration: puzzle lifecycle, periodic ticks, and phase flow.
//!
//! The controller runs on a single logical thread driven by an external
//! scheduler. Two periodic activities exist per puzzle, both scoped to that
//! puzzle's lifetime: a score tick that accrues open time and refreshes the
//! display, and a search tick that advances every still-searching automated
//! contestant. Cancellation is cooperative; a late tick for a cancelled
//! task is ignored.

use crate::contestant::{Contestant, ContestantId};
use crate::puzzle::{Puzzle, PuzzleEvent};
use crate::session::Match;
use crate::words::WordList;
use derive_more::{Display, Error};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Interval of the score tick in milliseconds.
pub const SCORE_TICK_MILLIS: u32 = 100;

/// Interval of the search tick in milliseconds.
pub const SEARCH_TICK_MILLIS: u32 = 10;

/// Identifies one scheduled periodic activity.
///
/// Schedulers must never reuse a handle within a match; the controller
/// relies on stale handles being distinguishable from live ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(pub u64);

/// Which periodic activity a schedule request is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickTask {
    /// The 100 ms score/display tick.
    Score,
    /// The 10 ms search-advance tick.
    Search,
}

/// The scheduling collaborator. The core depends only on this contract,
/// not on any particular timing mechanism, and assumes single-flight
/// periodic delivery.
pub trait Scheduler {
    /// Registers a periodic activity and returns its handle.
    fn schedule_repeating(&mut self, task: TickTask, interval_millis: u32) -> TaskHandle;

    /// Stops a periodic activity. Cancelling an unknown handle is a no-op.
    fn cancel(&mut self, handle: TaskHandle);
}

/// The rendering/input collaborator, treated purely as an event sink.
pub trait Screen {
    /// The puzzle display is out of date.
    fn refresh_puzzle(&mut self, puzzle: &Puzzle);

    /// The score display is out of date.
    fn refresh_score(&mut self, puzzle: &Puzzle);

    /// Input focus should move to the solution field.
    fn focus_solution(&mut self);

    /// Input focus should move to the response field.
    fn focus_response(&mut self);

    /// The round is over; focus the next-puzzle control.
    fn focus_next_button(&mut self);

    /// An automated contestant is still thinking.
    fn show_thinking(&mut self);
}

/// Where the current round stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the owner's solution.
    AwaitingSolution,
    /// Solution accepted; waiting for a challenge.
    AwaitingResponse,
    /// Round resolved (or no puzzle dealt yet); ready for the next puzzle.
    Resolved,
}

/// Contract violations by the orchestrating layer.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ControllerError {
    /// An operation needed an active puzzle and none exists.
    #[display("no puzzle is active")]
    NoPuzzle,
    /// A search session already exists for the current puzzle.
    #[display("a search session already exists for {name}")]
    SearchAlreadyRunning {
        /// The contestant whose session is still live.
        name: String,
    },
}

/// Sequences the full turn cycle over a [`Match`].
pub struct Controller {
    session: Match,
    words: Arc<WordList>,
    screen: Box<dyn Screen>,
    scheduler: Box<dyn Scheduler>,
    score_task: Option<TaskHandle>,
    search_task: Option<TaskHandle>,
    searching: Vec<ContestantId>,
    phase: Phase,
}

impl Controller {
    /// Creates a controller around a match and its collaborators.
    pub fn new(
        session: Match,
        words: Arc<WordList>,
        screen: Box<dyn Screen>,
        scheduler: Box<dyn Scheduler>,
    ) -> Self {
        Self {
            session,
            words,
            screen,
            scheduler,
            score_task: None,
            search_task: None,
            searching: Vec::new(),
            phase: Phase::Resolved,
        }
    }

    /// The match being played.
    pub fn session(&self) -> &Match {
        &self.session
    }

    /// Where the current round stands.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether any automated contestant is still searching.
    pub fn thinking(&self) -> bool {
        !self.searching.is_empty()
    }

    /// The match winner, once one exists.
    pub fn winner(&self) -> Option<&Contestant> {
        self.session.winner()
    }

    /// Starts the match by dealing the first puzzle.
    ///
    /// # Errors
    ///
    /// Propagates the contract errors of [`Controller::next_puzzle`].
    pub fn start(&mut self) -> Result<(), ControllerError> {
        self.next_puzzle()
    }

    /// Deals the next puzzle and begins the turn cycle: automated
    /// contestants start searching, both periodic activities are scheduled,
    /// and focus goes to the solution field (or a thinking indicator for an
    /// automated owner).
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::SearchAlreadyRunning`] if a contestant
    /// still holds a live search session, which means the previous round
    /// was never torn down.
    #[instrument(skip(self))]
    pub fn next_puzzle(&mut self) -> Result<(), ControllerError> {
        for contestant in self.session.contestants() {
            if contestant.is_searching() {
                return Err(ControllerError::SearchAlreadyRunning {
                    name: contestant.name().to_string(),
                });
            }
        }
        self.session.create_puzzle(Arc::clone(&self.words));
        self.phase = Phase::AwaitingSolution;

        self.searching.clear();
        for id in 0..self.session.contestants().len() {
            if let Some(contestant) = self.session.contestant_mut(id)
                && contestant.begin_search()
            {
                self.searching.push(id);
            }
        }

        if self.score_task.is_none() {
            self.score_task = Some(
                self.scheduler
                    .schedule_repeating(TickTask::Score, SCORE_TICK_MILLIS),
            );
        }
        if self.search_task.is_none() && !self.searching.is_empty() {
            self.search_task = Some(
                self.scheduler
                    .schedule_repeating(TickTask::Search, SEARCH_TICK_MILLIS),
            );
        }

        if let Some(puzzle) = self.session.puzzle() {
            self.screen.refresh_puzzle(puzzle);
        }
        let owner_is_automated = self
            .session
            .puzzle()
            .map(Puzzle::owner)
            .and_then(|owner| self.session.contestant(owner))
            .is_some_and(Contestant::is_automated);
        if owner_is_automated {
            self.screen.show_thinking();
        } else {
            self.screen.focus_solution();
        }
        Ok(())
    }

    /// Delivers one periodic tick. Ticks carrying a handle that is no
    /// longer live are ignored, so a timer firing once more after
    /// cancellation cannot mutate anything.
    pub fn tick(&mut self, handle: TaskHandle) {
        if self.score_task == Some(handle) {
            self.score_tick();
        } else if self.search_task == Some(handle) {
            self.search_tick();
        } else {
            debug!(handle = handle.0, "stale tick ignored");
        }
    }

    fn score_tick(&mut self) {
        if let Some(puzzle) = self.session.puzzle_mut() {
            puzzle.adjust_score(SCORE_TICK_MILLIS as f32 / 1000.0);
        }
        if let Some(puzzle) = self.session.puzzle() {
            self.screen.refresh_score(puzzle);
        }
    }

    fn search_tick(&mut self) {
        let Some((letters, minimum)) = self
            .session
            .puzzle()
            .map(|puzzle| (puzzle.letters(), puzzle.minimum_word_length()))
        else {
            return;
        };
        let words = Arc::clone(&self.words);
        let mut finished = Vec::new();
        let mut still = Vec::new();
        for id in std::mem::take(&mut self.searching) {
            let done = match self.session.contestant_mut(id) {
                Some(contestant) => contestant.run_search_batch(letters, minimum, &words),
                None => true,
            };
            if done {
                finished.push(id);
            } else {
                still.push(id);
            }
        }
        self.searching = still;
        for id in finished {
            self.finish_search(id);
        }
        if self.searching.is_empty()
            && let Some(handle) = self.search_task.take()
        {
            self.scheduler.cancel(handle);
        }
    }

    /// A contestant's search is done. An automated owner's best find
    /// becomes the solution (empty means skip); a non-owner keeps its best
    /// for the response phase.
    #[instrument(skip(self))]
    fn finish_search(&mut self, id: ContestantId) {
        let Some(owner) = self.session.puzzle().map(Puzzle::owner) else {
            return;
        };
        if owner != id {
            return;
        }
        let best = self
            .session
            .contestant_mut(id)
            .and_then(Contestant::take_best)
            .unwrap_or_default();
        let Some(puzzle) = self.session.puzzle_mut() else {
            return;
        };
        let event = puzzle.set_solution(&best);
        info!(solution = %best, "automated owner answered");
        self.apply_event(event);
        if !event.completed && event.outcome.is_valid_solution() {
            self.invite_responses();
        }
    }

    /// Records the owner's solution text without finalizing it.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::NoPuzzle`] when no puzzle is active.
    pub fn set_solution(&mut self, text: &str) -> Result<PuzzleEvent, ControllerError> {
        let event = self
            .session
            .puzzle_mut()
            .ok_or(ControllerError::NoPuzzle)?
            .set_solution(text);
        if let Some(puzzle) = self.session.puzzle() {
            self.screen.refresh_puzzle(puzzle);
        }
        Ok(event)
    }

    /// Finalizes the owner's solution. A solution that fails the letter
    /// constraint is not an error: focus returns to the solution field and
    /// the round continues. Otherwise the search tick is cancelled and
    /// every non-owner is invited to counter-offer.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::NoPuzzle`] when no puzzle is active.
    #[instrument(skip(self))]
    pub fn solve(&mut self) -> Result<(), ControllerError> {
        let Some(puzzle) = self.session.puzzle() else {
            return Err(ControllerError::NoPuzzle);
        };
        if puzzle.is_completed() {
            return Ok(());
        }
        if !puzzle.result().is_valid_solution() {
            debug!("solution rejected, asking again");
            self.screen.focus_solution();
            return Ok(());
        }
        // No further automated improvement once resolution begins.
        if let Some(handle) = self.search_task.take() {
            self.scheduler.cancel(handle);
        }
        self.searching.clear();
        self.invite_responses();
        if let Some(puzzle) = self.session.puzzle() {
            self.screen.refresh_puzzle(puzzle);
        }
        Ok(())
    }

    /// Applies a challenge response from an interactive contestant. A
    /// response arriving after the round already resolved is ignored; the
    /// standing event is returned and nothing is re-scored.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::NoPuzzle`] when no puzzle is active.
    pub fn set_response(&mut self, text: &str) -> Result<PuzzleEvent, ControllerError> {
        let puzzle = self.session.puzzle_mut().ok_or(ControllerError::NoPuzzle)?;
        if puzzle.is_completed() {
            debug!("response after resolution ignored");
            return Ok(PuzzleEvent {
                outcome: puzzle.result(),
                completed: true,
            });
        }
        let event = puzzle.set_response(text);
        self.apply_event(event);
        Ok(event)
    }

    /// Invites every non-owner to challenge. The first automated
    /// counter-offer resolves the round immediately; an interactive
    /// challenger gets focus instead.
    fn invite_responses(&mut self) {
        let Some((owner, solution)) = self
            .session
            .puzzle()
            .map(|puzzle| (puzzle.owner(), puzzle.solution().map(str::to_string)))
        else {
            return;
        };
        self.phase = Phase::AwaitingResponse;
        let mut interactive_waiting = false;
        for id in 0..self.session.contestants().len() {
            if id == owner {
                continue;
            }
            let offer = self
                .session
                .contestant_mut(id)
                .and_then(|contestant| contestant.counter_offer(solution.as_deref()));
            match offer {
                Some(response) => {
                    if let Some(puzzle) = self.session.puzzle_mut() {
                        let event = puzzle.set_response(&response);
                        self.apply_event(event);
                    }
                    return;
                }
                None => interactive_waiting = true,
            }
        }
        if interactive_waiting {
            self.screen.focus_response();
        }
    }

    fn apply_event(&mut self, event: PuzzleEvent) {
        if let Some(puzzle) = self.session.puzzle() {
            self.screen.refresh_puzzle(puzzle);
        }
        if event.completed {
            self.complete_puzzle();
        }
    }

    /// Terminal outcome reached: cancel both periodic activities, discard
    /// in-flight searches, credit the owner, and publish the hint.
    #[instrument(skip(self))]
    fn complete_puzzle(&mut self) {
        self.cancel_tasks();
        for id in 0..self.session.contestants().len() {
            if let Some(contestant) = self.session.contestant_mut(id) {
                contestant.abandon_search();
            }
        }
        let Some((owner, delta, outcome)) = self
            .session
            .puzzle()
            .map(|puzzle| (puzzle.owner(), puzzle.score(), puzzle.result()))
        else {
            return;
        };
        if let Some(contestant) = self.session.contestant_mut(owner) {
            contestant.add_score(delta);
        }
        info!(%outcome, delta, "puzzle resolved");
        let hint = match self.session.puzzle().and_then(Puzzle::find_next_better) {
            Some(word) => format!("hint: {word}"),
            None => "Perfect!".to_string(),
        };
        if let Some(puzzle) = self.session.puzzle_mut() {
            puzzle.set_hint(hint);
        }
        self.phase = Phase::Resolved;
        if let Some(puzzle) = self.session.puzzle() {
            self.screen.refresh_puzzle(puzzle);
            self.screen.refresh_score(puzzle);
        }
        self.screen.focus_next_button();
    }

    /// Tears the match down early. Safe to call at any time, any number of
    /// times.
    pub fn cancel_match(&mut self) {
        self.cancel_tasks();
        for id in 0..self.session.contestants().len() {
            if let Some(contestant) = self.session.contestant_mut(id) {
                contestant.abandon_search();
            }
        }
    }

    fn cancel_tasks(&mut self) {
        if let Some(handle) = self.score_task.take() {
            self.scheduler.cancel(handle);
        }
        if let Some(handle) = self.search_task.take() {
            self.scheduler.cancel(handle);
        }
        self.searching.clear();
    }
}
