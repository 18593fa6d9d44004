//! Tests for turn orchestration: tick delivery, search lifecycle, and the
//! solution/response phases.

mod common;

use common::ScriptedRandom;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use ultraghost::{
    AutomatedSettings, Contestant, Controller, ControllerError, Match, Outcome, Phase, Puzzle,
    Scheduler, Screen, TaskHandle, TickTask, WordList,
};

#[derive(Debug, Default)]
struct ScreenLog {
    events: Vec<&'static str>,
}

struct RecordingScreen(Rc<RefCell<ScreenLog>>);

impl Screen for RecordingScreen {
    fn refresh_puzzle(&mut self, _puzzle: &Puzzle) {
        self.0.borrow_mut().events.push("refresh_puzzle");
    }

    fn refresh_score(&mut self, _puzzle: &Puzzle) {
        self.0.borrow_mut().events.push("refresh_score");
    }

    fn focus_solution(&mut self) {
        self.0.borrow_mut().events.push("focus_solution");
    }

    fn focus_response(&mut self) {
        self.0.borrow_mut().events.push("focus_response");
    }

    fn focus_next_button(&mut self) {
        self.0.borrow_mut().events.push("focus_next_button");
    }

    fn show_thinking(&mut self) {
        self.0.borrow_mut().events.push("show_thinking");
    }
}

#[derive(Debug, Default)]
struct SchedulerState {
    next: u64,
    active: Vec<(TaskHandle, TickTask)>,
    cancelled: Vec<TaskHandle>,
}

struct RecordingScheduler(Rc<RefCell<SchedulerState>>);

impl Scheduler for RecordingScheduler {
    fn schedule_repeating(&mut self, task: TickTask, _interval_millis: u32) -> TaskHandle {
        let mut state = self.0.borrow_mut();
        state.next += 1;
        let handle = TaskHandle(state.next);
        state.active.push((handle, task));
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        let mut state = self.0.borrow_mut();
        state.active.retain(|(active, _)| *active != handle);
        state.cancelled.push(handle);
    }
}

struct Fixture {
    controller: Controller,
    screen: Rc<RefCell<ScreenLog>>,
    scheduler: Rc<RefCell<SchedulerState>>,
}

impl Fixture {
    fn new(
        words: &[&str],
        contestants: Vec<Contestant>,
        letters: &[&str],
        indices: &[usize],
    ) -> Self {
        let screen = Rc::new(RefCell::new(ScreenLog::default()));
        let scheduler = Rc::new(RefCell::new(SchedulerState::default()));
        let session = Match::new(
            20,
            contestants,
            Box::new(ScriptedRandom::new(letters, indices)),
        );
        let controller = Controller::new(
            session,
            Arc::new(WordList::from_words(words)),
            Box::new(RecordingScreen(Rc::clone(&screen))),
            Box::new(RecordingScheduler(Rc::clone(&scheduler))),
        );
        Self {
            controller,
            screen,
            scheduler,
        }
    }

    fn handle(&self, task: TickTask) -> Option<TaskHandle> {
        self.scheduler
            .borrow()
            .active
            .iter()
            .find(|(_, kind)| *kind == task)
            .map(|(handle, _)| *handle)
    }

    /// Delivers search ticks until every automated contestant is done.
    fn pump_search(&mut self) {
        while self.controller.thinking() {
            let Some(handle) = self.handle(TickTask::Search) else {
                break;
            };
            self.controller.tick(handle);
        }
    }

    fn saw(&self, event: &str) -> bool {
        self.screen.borrow().events.iter().any(|seen| *seen == event)
    }
}

fn human_versus_computer(words: &[&str], settings: AutomatedSettings, indices: &[usize]) -> Fixture {
    Fixture::new(
        words,
        vec![
            Contestant::interactive("You"),
            Contestant::automated("Computer", settings),
        ],
        &["pie"],
        indices,
    )
}

fn quick_settings() -> AutomatedSettings {
    AutomatedSettings {
        batch_size: 100,
        max_batches: None,
    }
}

#[test]
fn test_human_owner_is_asked_to_solve() {
    let mut fixture = human_versus_computer(&["PICKLE", "PIPE"], quick_settings(), &[0]);
    fixture.controller.start().unwrap();
    assert_eq!(fixture.controller.phase(), Phase::AwaitingSolution);
    assert!(fixture.saw("focus_solution"));
    assert!(!fixture.saw("show_thinking"));
    assert!(fixture.handle(TickTask::Score).is_some());
    assert!(fixture.handle(TickTask::Search).is_some());
}

#[test]
fn test_computer_challenges_a_beatable_solution() {
    let mut fixture = human_versus_computer(&["PICKLE", "PIPE"], quick_settings(), &[0]);
    fixture.controller.start().unwrap();
    fixture.pump_search();

    fixture.controller.set_solution("PICKLE").unwrap();
    fixture.controller.solve().unwrap();

    assert_eq!(fixture.controller.phase(), Phase::Resolved);
    let puzzle = fixture.controller.session().puzzle().unwrap();
    assert_eq!(puzzle.response(), Some("PIPE"));
    assert_eq!(puzzle.result(), Outcome::Shorter);
    assert_eq!(puzzle.hint(), Some("Perfect!"));
    // The owner is credited even when the challenge wins.
    assert_eq!(fixture.controller.session().contestant(0).unwrap().score(), 1);
    assert!(fixture.saw("focus_next_button"));
}

#[test]
fn test_computer_declines_an_unbeatable_solution() {
    let mut fixture = human_versus_computer(&["PICKLE", "PIPE", "PINE"], quick_settings(), &[0]);
    fixture.controller.start().unwrap();
    fixture.pump_search();

    fixture.controller.set_solution("PINE").unwrap();
    fixture.controller.solve().unwrap();

    let puzzle = fixture.controller.session().puzzle().unwrap();
    assert_eq!(puzzle.response(), Some(""));
    assert_eq!(puzzle.result(), Outcome::NotImproved);
    assert_eq!(fixture.controller.session().contestant(0).unwrap().score(), 3);
}

#[test]
fn test_rejected_solution_asks_again() {
    let mut fixture = human_versus_computer(&["PICKLE", "PIPE", "MAIN"], quick_settings(), &[0]);
    fixture.controller.start().unwrap();
    fixture.pump_search();

    // MAIN is a word but not a match, so the round stays open.
    fixture.controller.set_solution("MAIN").unwrap();
    fixture.controller.solve().unwrap();
    assert_eq!(fixture.controller.phase(), Phase::AwaitingSolution);
    assert!(!fixture.controller.session().puzzle().unwrap().is_completed());

    fixture.controller.set_solution("PINE").unwrap();
    fixture.controller.solve().unwrap();
    assert_eq!(fixture.controller.phase(), Phase::Resolved);
}

#[test]
fn test_computer_owner_solves_and_waits_for_a_challenge() {
    let mut fixture = human_versus_computer(&["PICKLE", "PIPE"], quick_settings(), &[1]);
    fixture.controller.start().unwrap();
    assert!(fixture.saw("show_thinking"));
    fixture.pump_search();

    assert_eq!(fixture.controller.phase(), Phase::AwaitingResponse);
    assert_eq!(
        fixture.controller.session().puzzle().unwrap().solution(),
        Some("PIPE")
    );
    assert!(fixture.saw("focus_response"));

    fixture.controller.set_response("").unwrap();
    assert_eq!(fixture.controller.phase(), Phase::Resolved);
    // The computer owns the puzzle and banks the undefeated bonus.
    assert_eq!(fixture.controller.session().contestant(0).unwrap().score(), 3);
    assert_eq!(
        fixture.controller.session().contestant(0).unwrap().name(),
        "Computer"
    );
}

#[test]
fn test_capped_computer_skips_and_loses_to_a_found_word() {
    let settings = AutomatedSettings {
        batch_size: 1,
        max_batches: Some(1),
    };
    // The cap stops the scan after MAIN, so TALE is never seen.
    let mut fixture = Fixture::new(
        &["MAIN", "TALE"],
        vec![
            Contestant::interactive("You"),
            Contestant::automated("Computer", settings),
        ],
        &["tae"],
        &[1],
    );
    fixture.controller.start().unwrap();
    fixture.pump_search();

    assert_eq!(fixture.controller.phase(), Phase::AwaitingResponse);
    assert_eq!(
        fixture.controller.session().puzzle().unwrap().solution(),
        Some("")
    );

    fixture.controller.set_response("TALE").unwrap();
    let puzzle = fixture.controller.session().puzzle().unwrap();
    assert_eq!(puzzle.result(), Outcome::WordFound);
    assert_eq!(fixture.controller.session().contestant(0).unwrap().score(), -1);
}

#[test]
fn test_search_task_is_cancelled_once_thinking_ends() {
    let mut fixture = human_versus_computer(&["PICKLE", "PIPE"], quick_settings(), &[0]);
    fixture.controller.start().unwrap();
    let search = fixture.handle(TickTask::Search).unwrap();
    fixture.pump_search();
    assert!(fixture.handle(TickTask::Search).is_none());
    assert!(fixture.scheduler.borrow().cancelled.contains(&search));
}

#[test]
fn test_stale_tick_is_ignored() {
    let mut fixture = human_versus_computer(&["PICKLE", "PIPE"], quick_settings(), &[0]);
    fixture.controller.start().unwrap();
    let score = fixture.handle(TickTask::Score).unwrap();
    fixture.pump_search();
    fixture.controller.set_solution("PICKLE").unwrap();
    fixture.controller.solve().unwrap();
    assert_eq!(fixture.controller.phase(), Phase::Resolved);

    // Both tasks are gone; a timer firing late must not accrue time.
    assert!(fixture.handle(TickTask::Score).is_none());
    let before = fixture
        .controller
        .session()
        .puzzle()
        .unwrap()
        .elapsed_seconds();
    fixture.controller.tick(score);
    let after = fixture
        .controller
        .session()
        .puzzle()
        .unwrap()
        .elapsed_seconds();
    assert_eq!(before, after);
}

#[test]
fn test_score_tick_accrues_open_time() {
    let mut fixture = human_versus_computer(&["PICKLE", "PIPE"], quick_settings(), &[0]);
    fixture.controller.start().unwrap();
    let score = fixture.handle(TickTask::Score).unwrap();
    fixture.controller.tick(score);
    fixture.controller.tick(score);
    let elapsed = fixture
        .controller
        .session()
        .puzzle()
        .unwrap()
        .elapsed_seconds();
    assert!((elapsed - 0.2).abs() < 1e-6);
    assert!(fixture.saw("refresh_score"));
}

#[test]
fn test_next_puzzle_rejects_a_live_search() {
    let settings = AutomatedSettings {
        batch_size: 1,
        max_batches: None,
    };
    let mut fixture = human_versus_computer(&["PICKLE", "PIPE", "PINE"], settings, &[0]);
    fixture.controller.start().unwrap();
    // The search has not been driven to completion yet.
    let result = fixture.controller.next_puzzle();
    assert!(matches!(
        result,
        Err(ControllerError::SearchAlreadyRunning { .. })
    ));
}

#[test]
fn test_operations_need_a_puzzle() {
    let mut fixture = human_versus_computer(&["PICKLE"], quick_settings(), &[0]);
    assert_eq!(fixture.controller.solve(), Err(ControllerError::NoPuzzle));
    assert!(fixture.controller.set_solution("PIPE").is_err());
    assert!(fixture.controller.set_response("PIPE").is_err());
}

#[test]
fn test_consecutive_rounds_accumulate_scores() {
    let mut fixture = Fixture::new(
        &["PICKLE", "PIPE"],
        vec![
            Contestant::interactive("You"),
            Contestant::automated("Computer", quick_settings()),
        ],
        &["pie", "pie"],
        &[0],
    );
    fixture.controller.start().unwrap();
    fixture.pump_search();
    fixture.controller.set_solution("PICKLE").unwrap();
    fixture.controller.solve().unwrap();
    assert_eq!(fixture.controller.phase(), Phase::Resolved);

    // Round two belongs to the computer.
    fixture.controller.next_puzzle().unwrap();
    fixture.pump_search();
    assert_eq!(fixture.controller.phase(), Phase::AwaitingResponse);
    fixture.controller.set_response("").unwrap();

    let session = fixture.controller.session();
    assert_eq!(session.contestant(0).unwrap().score(), 1);
    assert_eq!(session.contestant(0).unwrap().score_events(), 1);
    assert_eq!(session.contestant(1).unwrap().score(), 3);
    assert_eq!(session.contestant(1).unwrap().score_events(), 1);
    assert!(fixture.controller.winner().is_none());
}

#[test]
fn test_late_response_does_not_rescore() {
    let mut fixture = human_versus_computer(&["PICKLE", "PIPE", "PINE"], quick_settings(), &[0]);
    fixture.controller.start().unwrap();
    fixture.pump_search();
    fixture.controller.set_solution("PINE").unwrap();
    fixture.controller.solve().unwrap();
    assert_eq!(fixture.controller.phase(), Phase::Resolved);
    assert_eq!(fixture.controller.session().contestant(0).unwrap().score(), 3);

    // A stray response after resolution reports the standing event and
    // must not credit the owner a second time.
    let event = fixture.controller.set_response("").unwrap();
    assert!(event.completed);
    assert_eq!(event.outcome, Outcome::NotImproved);
    assert_eq!(fixture.controller.session().contestant(0).unwrap().score(), 3);
    assert_eq!(
        fixture.controller.session().contestant(0).unwrap().score_events(),
        1
    );
}

#[test]
fn test_cancel_match_is_idempotent() {
    let mut fixture = human_versus_computer(&["PICKLE", "PIPE"], quick_settings(), &[0]);
    fixture.controller.start().unwrap();
    fixture.controller.cancel_match();
    fixture.controller.cancel_match();
    assert!(!fixture.controller.thinking());
    assert!(fixture.handle(TickTask::Score).is_none());
    assert!(fixture.handle(TickTask::Search).is_none());
}
