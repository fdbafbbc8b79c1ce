use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Args;
use lolo_core::{Coord2, EngineEvent, EventKind, MoveOutcome, PlayEngine};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::power::PowerGrantPolicy;
use crate::{GameArgs, render};

#[derive(Args, Debug, Clone)]
pub(crate) struct PlayArgs {
    #[command(flatten)]
    game: GameArgs,

    /// Faces of the die rolled after each scoring move
    #[arg(long, default_value_t = 10)]
    power_sides: u32,

    /// Die faces that grant a power charge
    #[arg(long, value_delimiter = ',', default_values_t = [1, 10])]
    power_faces: Vec<u32>,
}

const HELP: &str = "\
  <row> <col>  select a tile
  l            arm lightning: the next selected tile is removed on its own
  n            new game
  h            list the playable groups
  q            quit";

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Select(Coord2),
    Lightning,
    NewGame,
    Hint,
    Quit,
}

fn parse_input(line: &str) -> Option<Input> {
    let mut words = line.split_whitespace();
    let first = words.next()?;
    let input = match first {
        "l" => Input::Lightning,
        "n" => Input::NewGame,
        "h" => Input::Hint,
        "q" => Input::Quit,
        _ => {
            let row = first.parse().ok()?;
            let col = words.next()?.parse().ok()?;
            Input::Select((row, col))
        }
    };
    words.next().is_none().then_some(input)
}

/// Host-side state around the engine: the armed lightning toggle and the
/// power-grant roll after scoring moves.
struct Session {
    engine: PlayEngine,
    policy: PowerGrantPolicy,
    rng: SmallRng,
    lightning_armed: bool,
}

impl Session {
    fn select(&mut self, coords: Coord2) -> Result<()> {
        let outcome = if self.lightning_armed {
            let outcome = self.engine.remove_one(coords)?;
            self.lightning_armed = false;
            outcome
        } else {
            self.engine.activate(coords)?
        };

        match outcome {
            MoveOutcome::InvalidMove => println!("No group at {coords:?}"),
            MoveOutcome::NoPowerAvailable => println!("No lightning left"),
            MoveOutcome::GameAlreadyOver => println!("Game over, press n for a new game"),
            MoveOutcome::Resolved { points, .. } | MoveOutcome::GameOver { points, .. } => {
                if points > 0 && self.policy.roll(&mut self.rng) {
                    let charges = self.engine.grant_power();
                    println!("Lightning earned! ({charges} available)");
                }
            }
        }
        Ok(())
    }

    fn arm_lightning(&mut self) {
        if self.engine.power_charges() == 0 {
            println!("No lightning left");
            return;
        }
        self.lightning_armed = !self.lightning_armed;
        if self.lightning_armed {
            println!("Lightning armed, select a tile to destroy");
        } else {
            println!("Lightning disarmed");
        }
    }

    fn print_hint(&self) {
        let groups: Vec<_> = self.engine.find_groups().collect();
        if groups.is_empty() {
            println!("No groups left");
        }
        for group in groups {
            println!("{} tiles from {:?}", group.len(), group.origin());
        }
    }

    fn print_status(&self) {
        print!("{}", render(&self.engine));
        println!(
            "{} | score {} | lightning {}{}",
            self.engine.mode_name(),
            self.engine.score(),
            self.engine.power_charges(),
            if self.lightning_armed { " (armed)" } else { "" },
        );
    }
}

pub(crate) fn run(args: &PlayArgs) -> Result<()> {
    let seed = args.game.seed();
    let mut engine = args.game.new_engine(args.game.config(seed))?;
    engine.on(EventKind::ScoreChanged, |event| {
        if let EngineEvent::ScoreChanged(score) = event {
            log::info!("Score: {score}");
        }
    });
    engine.on(EventKind::GameOver, |event| {
        if let EngineEvent::GameOver { score, grid } = event {
            println!("Game over! You scored {score} points.");
            match grid.to_json() {
                Ok(json) => println!("Final board: {json}"),
                Err(err) => log::warn!("{err}"),
            }
        }
    });

    let mut session = Session {
        engine,
        policy: PowerGrantPolicy::new(args.power_sides, args.power_faces.clone()),
        rng: SmallRng::seed_from_u64(seed.rotate_left(32)),
        lightning_armed: false,
    };
    println!("Seed {seed}\n{HELP}");
    session.print_status();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Could not read input")?;
        match parse_input(&line) {
            Some(Input::Select(coords)) => {
                if let Err(err) = session.select(coords) {
                    println!("{err}");
                    continue;
                }
            }
            Some(Input::Lightning) => session.arm_lightning(),
            Some(Input::NewGame) => {
                session.engine.restart();
                session.lightning_armed = false;
            }
            Some(Input::Hint) => {
                session.print_hint();
                continue;
            }
            Some(Input::Quit) => break,
            None => {
                println!("{HELP}");
                continue;
            }
        }
        session.print_status();
        io::stdout().flush()?;
    }
    Ok(())
}
