use alloc::vec::Vec;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::*;

/// Exhibition player: picks a random cell out of all current groups, so
/// larger groups are proportionally more likely to be played.
#[derive(Clone, Debug)]
pub struct AutoPlayer {
    rng: SmallRng,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoLimits {
    pub max_moves: u32,
    /// Start a new game instead of stopping when the board runs out of moves.
    pub restart: bool,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoSummary {
    pub moves: u32,
    pub games_finished: u32,
    pub best_score: Score,
}

impl AutoPlayer {
    pub const MAX_BARREN_RESTARTS: u32 = 8;

    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn choose_move(&mut self, engine: &PlayEngine) -> Option<Coord2> {
        let cells: Vec<Coord2> = engine.find_groups().flat_map(Group::into_positions).collect();
        cells.choose(&mut self.rng).copied()
    }

    /// Plays one move. `None` when there is nothing left to play.
    pub fn play_move(&mut self, engine: &mut PlayEngine) -> Result<Option<MoveOutcome>> {
        if engine.is_terminal() {
            return Ok(None);
        }
        match self.choose_move(engine) {
            Some(coords) => engine.activate(coords).map(Some),
            None => Ok(None),
        }
    }

    /// Plays until the move cap, without waiting between moves.
    pub fn run_demo(&mut self, engine: &mut PlayEngine, limits: DemoLimits) -> Result<DemoSummary> {
        self.run_demo_with(engine, limits, |_, _, _| {})
    }

    /// Same as [`run_demo`](Self::run_demo), calling `on_move` after every
    /// move with the engine, the move's outcome and the running summary.
    ///
    /// Stops early when [`MAX_BARREN_RESTARTS`](Self::MAX_BARREN_RESTARTS)
    /// restarts in a row leave the board without a single group.
    pub fn run_demo_with<F>(
        &mut self,
        engine: &mut PlayEngine,
        limits: DemoLimits,
        mut on_move: F,
    ) -> Result<DemoSummary>
    where
        F: FnMut(&PlayEngine, &MoveOutcome, &DemoSummary),
    {
        let mut summary = DemoSummary::default();
        let mut barren_restarts = 0;

        while summary.moves < limits.max_moves {
            let Some(outcome) = self.play_move(engine)? else {
                summary.best_score = summary.best_score.max(engine.score());
                if !limits.restart {
                    break;
                }
                if barren_restarts >= Self::MAX_BARREN_RESTARTS {
                    log::warn!("No group after {barren_restarts} restarts, ending demo");
                    break;
                }
                log::debug!("Demo stuck at {} points, restarting", engine.score());
                engine.restart();
                barren_restarts += 1;
                continue;
            };
            barren_restarts = 0;

            summary.moves += 1;
            if let MoveOutcome::GameOver { .. } = outcome {
                summary.games_finished += 1;
                summary.best_score = summary.best_score.max(engine.score());
            }
            on_move(engine, &outcome, &summary);
        }

        summary.best_score = summary.best_score.max(engine.score());
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;

    use super::*;

    fn replay(mode: Box<dyn GameMode>, rows: &[&[u8]]) -> PlayEngine {
        let snapshot = Grid::from_rows(rows).unwrap().snapshot();
        PlayEngine::from_snapshot(mode, &snapshot, GameConfig::default()).unwrap()
    }

    #[test]
    fn only_picks_cells_inside_groups() {
        let engine = replay(ModeKind::Regular.build(), &[&[1, 1, 2], &[3, 4, 5]]);
        let mut player = AutoPlayer::new(1);

        for _ in 0..50 {
            let coords = player.choose_move(&engine).unwrap();
            assert!(coords == (0, 0) || coords == (0, 1));
        }
    }

    #[test]
    fn no_move_without_groups() {
        let mut engine = replay(ModeKind::Unlimited.build(), &[&[1, 2], &[2, 1]]);
        let mut player = AutoPlayer::new(1);

        assert_eq!(player.choose_move(&engine), None);
        assert_eq!(player.play_move(&mut engine), Ok(None));
    }

    #[test]
    fn demo_stops_at_move_cap() {
        let config = GameConfig::new((6, 6), 42);
        let mut engine = PlayEngine::new(ModeKind::Unlimited.build(), config).unwrap();
        let mut player = AutoPlayer::new(42);

        let limits = DemoLimits {
            max_moves: 25,
            restart: true,
        };
        let summary = player.run_demo(&mut engine, limits).unwrap();

        assert_eq!(summary.moves, 25);
        assert_eq!(summary.games_finished, 0);
        assert!(engine.grid().is_settled());
    }

    #[test]
    fn demo_ends_on_board_that_never_groups() {
        let config = GameConfig::new((1, 1), 5);
        let mut engine = PlayEngine::new(ModeKind::Regular.build(), config).unwrap();
        let mut player = AutoPlayer::new(5);

        let limits = DemoLimits {
            max_moves: 10,
            restart: true,
        };
        let summary = player.run_demo(&mut engine, limits).unwrap();

        assert_eq!(summary.moves, 0);
        assert_eq!(summary.games_finished, 0);
    }

    #[test]
    fn demo_reports_every_move() {
        let config = GameConfig::new((5, 5), 9);
        let mut engine = PlayEngine::new(ModeKind::Regular.build(), config).unwrap();
        let mut player = AutoPlayer::new(9);

        let limits = DemoLimits {
            max_moves: 40,
            restart: true,
        };
        let mut seen = Vec::new();
        let summary = player
            .run_demo_with(&mut engine, limits, |engine, outcome, progress| {
                assert!(outcome.has_update());
                assert!(engine.grid().is_settled());
                seen.push(progress.moves);
            })
            .unwrap();

        let expected: Vec<u32> = (1..=summary.moves).collect();
        assert_eq!(seen, expected);
    }
}
