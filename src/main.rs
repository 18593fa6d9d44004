//! Ultraghost - play word duels against the computer in a terminal.
//!
//! The engine is driven through its scheduler and screen seams: a loop
//! scheduler records which periodic activities are live and the main loop
//! delivers search ticks by hand, so the computer opponent thinks between
//! prompts without any real timers.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use ultraghost::{
    AutomatedSettings, Contestant, Controller, FairRandom, Match, Phase, Puzzle, Scheduler,
    Screen, TaskHandle, TickTask, WordList,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let words = Arc::new(
        WordList::open(&cli.words)
            .with_context(|| format!("reading word list {}", cli.words.display()))?,
    );
    info!(count = words.len(), "word list loaded");

    let contestants = vec![
        Contestant::interactive(cli.name.clone()),
        Contestant::automated(
            "Computer",
            AutomatedSettings {
                batch_size: cli.batch_size,
                max_batches: Some(cli.max_batches),
            },
        ),
    ];
    let mut session = Match::new(cli.win_score, contestants, Box::new(FairRandom::new()));
    session.set_hyperghost(cli.hyperghost);
    session.set_minimum_word_length(cli.min_length);

    let ticks = Rc::new(RefCell::new(TickState::default()));
    let controller = Controller::new(
        session,
        words,
        Box::new(ConsoleScreen),
        Box::new(LoopScheduler {
            ticks: Rc::clone(&ticks),
        }),
    );

    run(controller, ticks, cli.json)
}

/// One full match, puzzle by puzzle, until somebody wins or input ends.
fn run(mut controller: Controller, ticks: Rc<RefCell<TickState>>, json: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        controller.next_puzzle()?;
        pump_search(&mut controller, &ticks);

        if let Some(puzzle) = controller.session().puzzle() {
            println!();
            println!("Letters: {}", puzzle.letters());
            if let Some(previous) = puzzle.previous_word() {
                println!("Word to beat: {previous}");
            }
        }

        while controller.phase() == Phase::AwaitingSolution {
            let Some(text) = prompt(&mut input, "Your solution (empty to skip)")? else {
                controller.cancel_match();
                return Ok(());
            };
            controller.set_solution(&text)?;
            controller.solve()?;
            if controller.phase() == Phase::AwaitingSolution
                && let Some(puzzle) = controller.session().puzzle()
            {
                println!("{}, try again", puzzle.result());
            }
        }

        if controller.phase() == Phase::AwaitingResponse {
            if let Some(solution) = controller.session().puzzle().and_then(Puzzle::solution) {
                let owner = owner_name(&controller);
                if solution.is_empty() {
                    println!("{owner} skipped");
                } else {
                    println!("{owner} played: {solution}");
                }
            }
            let Some(text) = prompt(&mut input, "Your challenge (empty to pass)")? else {
                controller.cancel_match();
                return Ok(());
            };
            controller.set_response(&text)?;
        }

        if let Some(puzzle) = controller.session().puzzle() {
            if let Some(response) = puzzle.response().filter(|word| !word.is_empty()) {
                println!("Challenge: {response}");
            }
            println!("Outcome for {}: {}", owner_name(&controller), puzzle.result());
            if let Some(hint) = puzzle.hint() {
                println!("{hint}");
            }
        }
        for standing in controller.session().standings() {
            println!(
                "  {}: {} ({} rounds)",
                standing.name, standing.score, standing.score_events
            );
        }
        if json {
            println!(
                "{}",
                serde_json::to_string(&controller.session().standings())?
            );
        }
        if let Some(winner) = controller.winner() {
            println!("{} wins!", winner.name());
            controller.cancel_match();
            return Ok(());
        }
    }
}

/// Delivers search ticks until every automated contestant is done thinking.
fn pump_search(controller: &mut Controller, ticks: &Rc<RefCell<TickState>>) {
    while controller.thinking() {
        let handle = ticks.borrow().handle_for(TickTask::Search);
        match handle {
            Some(handle) => controller.tick(handle),
            None => break,
        }
    }
}

fn owner_name(controller: &Controller) -> String {
    controller
        .session()
        .puzzle()
        .map(Puzzle::owner)
        .and_then(|owner| controller.session().contestant(owner))
        .map(|contestant| contestant.name().to_string())
        .unwrap_or_default()
}

/// Prints a prompt and reads one line. `None` means input ended.
fn prompt(input: &mut impl BufRead, label: &str) -> Result<Option<String>> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Periodic activities currently live, shared between the scheduler the
/// controller holds and the loop that delivers ticks.
#[derive(Debug, Default)]
struct TickState {
    next: u64,
    active: Vec<(TaskHandle, TickTask)>,
}

impl TickState {
    fn handle_for(&self, task: TickTask) -> Option<TaskHandle> {
        self.active
            .iter()
            .find(|(_, kind)| *kind == task)
            .map(|(handle, _)| *handle)
    }
}

/// Scheduler that only records what was asked of it; the main loop decides
/// when ticks actually fire.
struct LoopScheduler {
    ticks: Rc<RefCell<TickState>>,
}

impl Scheduler for LoopScheduler {
    fn schedule_repeating(&mut self, task: TickTask, interval_millis: u32) -> TaskHandle {
        let mut state = self.ticks.borrow_mut();
        state.next += 1;
        let handle = TaskHandle(state.next);
        state.active.push((handle, task));
        debug!(?task, interval_millis, handle = handle.0, "tick scheduled");
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.ticks
            .borrow_mut()
            .active
            .retain(|(active, _)| *active != handle);
    }
}

/// Screen that narrates the few cues a line-oriented console needs; the
/// main loop does the rest of the talking.
struct ConsoleScreen;

impl Screen for ConsoleScreen {
    fn refresh_puzzle(&mut self, puzzle: &Puzzle) {
        debug!(letters = %puzzle.letters(), "puzzle refreshed");
    }

    fn refresh_score(&mut self, puzzle: &Puzzle) {
        debug!(elapsed = puzzle.elapsed_seconds(), "score refreshed");
    }

    fn focus_solution(&mut self) {
        debug!("solution focused");
    }

    fn focus_response(&mut self) {
        debug!("response focused");
    }

    fn focus_next_button(&mut self) {
        debug!("next puzzle focused");
    }

    fn show_thinking(&mut self) {
        println!("Computer is thinking...");
    }
}
