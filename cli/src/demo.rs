use std::cell::Cell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use lolo_core::{AutoPlayer, DemoLimits, EngineEvent, EventKind, MoveOutcome};

use crate::{GameArgs, render};

#[derive(Args, Debug, Clone)]
pub(crate) struct DemoArgs {
    #[command(flatten)]
    game: GameArgs,

    /// Stop after this many moves
    #[arg(long, default_value_t = 200)]
    moves: u32,

    /// Pause between moves, in milliseconds
    #[arg(long, default_value_t = 350)]
    delay_ms: u64,

    /// Stop at the first game over instead of starting again
    #[arg(long)]
    no_restart: bool,

    /// Only print the summary
    #[arg(long)]
    summary_only: bool,
}

pub(crate) fn run(args: &DemoArgs) -> Result<()> {
    let seed = args.game.seed();
    let config = args
        .game
        .config(seed)
        .with_resolve_delay(Duration::from_millis(args.delay_ms));
    let mut engine = args.game.new_engine(config)?;
    let mut player = AutoPlayer::new(seed);

    // the engine only hints at pacing; sleeping is our job
    let pending_delay = Rc::new(Cell::new(None));
    {
        let pending_delay = Rc::clone(&pending_delay);
        engine.on(EventKind::Resolved, move |event| {
            if let EngineEvent::Resolved(delay) = event {
                pending_delay.set(Some(*delay));
            }
        });
    }

    let limits = DemoLimits {
        max_moves: args.moves,
        restart: !args.no_restart,
    };
    let summary = player.run_demo_with(&mut engine, limits, |engine, outcome, progress| {
        if !args.summary_only {
            print!("{}", render(engine));
            println!("move {} | score {}", progress.moves, engine.score());
        }
        if let MoveOutcome::GameOver { .. } = outcome {
            println!(
                "Game {} over with {} points",
                progress.games_finished,
                engine.score()
            );
        }
        if let Some(delay) = pending_delay.take() {
            thread::sleep(delay);
        }
    })?;

    println!(
        "Seed {seed}: {} moves, {} finished games, best score {}",
        summary.moves, summary.games_finished, summary.best_score
    );
    Ok(())
}
