use alloc::boxed::Box;
use core::num::Saturating;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Ready -> Resolving -> Ready
/// - Ready -> Resolving -> Terminal
/// - any -> Ready on reset
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    /// Grid settled, waiting for a move
    Ready,
    /// A removal/refill cycle is running; only listeners can observe this
    Resolving,
    /// The mode declared the game over
    Terminal,
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Terminal)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Ready
    }
}

/// Outcome of a move. Only [`Resolved`](Self::Resolved) and
/// [`GameOver`](Self::GameOver) changed anything.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// No group at the selected position
    InvalidMove,
    /// One-shot removal requested without a charge
    NoPowerAvailable,
    /// The game already ended, no new moves are accepted
    GameAlreadyOver,
    Resolved { removed: CellCount, points: Score },
    GameOver { removed: CellCount, points: Score },
}

impl MoveOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        use MoveOutcome::*;
        match self {
            InvalidMove => false,
            NoPowerAvailable => false,
            GameAlreadyOver => false,
            Resolved { .. } => true,
            GameOver { .. } => true,
        }
    }
}

/// Runs one game: owns the grid, the score, the power charges and the mode,
/// and notifies listeners as moves resolve.
#[derive(Debug)]
pub struct PlayEngine {
    mode: Box<dyn GameMode>,
    config: GameConfig,
    grid: Grid,
    score: Saturating<Score>,
    power: Saturating<PowerCount>,
    state: EngineState,
    rng: SmallRng,
    events: EventFeed,
}

impl PlayEngine {
    /// Starts a fresh game on a randomly generated grid. Groups present in
    /// the initial fill are left for the player.
    pub fn new(mode: Box<dyn GameMode>, config: GameConfig) -> Result<Self> {
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let grid = Grid::generate(config.size, mode.as_ref(), &mut rng)?;
        log::debug!(
            "New {} game {}x{} seed {}",
            mode.name(),
            config.size.0,
            config.size.1,
            config.seed
        );
        Ok(Self::with_grid(mode, config, grid, rng))
    }

    /// Rebuilds a game over a stored grid, e.g. a high-score board. The state
    /// reflects whether the mode considers that grid finished.
    pub fn from_snapshot(
        mode: Box<dyn GameMode>,
        snapshot: &Snapshot,
        config: GameConfig,
    ) -> Result<Self> {
        let grid = snapshot.to_grid()?;
        if !grid.is_settled() {
            return Err(GameError::InvalidSnapshot);
        }
        let config = GameConfig {
            size: grid.size(),
            ..config
        };
        let rng = SmallRng::seed_from_u64(config.seed);
        let mut engine = Self::with_grid(mode, config, grid, rng);
        if engine.mode.is_terminal(&engine.grid) {
            engine.state = EngineState::Terminal;
        }
        Ok(engine)
    }

    fn with_grid(mode: Box<dyn GameMode>, config: GameConfig, grid: Grid, rng: SmallRng) -> Self {
        let power = mode.starting_power();
        Self {
            mode,
            config,
            grid,
            score: Saturating(0),
            power: Saturating(power),
            state: EngineState::Ready,
            rng,
            events: EventFeed::default(),
        }
    }

    pub fn on<F>(&mut self, kind: EventKind, listener: F)
    where
        F: FnMut(&EngineEvent) + 'static,
    {
        self.events.on(kind, listener);
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn score(&self) -> Score {
        self.score.0
    }

    pub fn power_charges(&self) -> PowerCount {
        self.power.0
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snapshot(&self) -> Snapshot {
        self.grid.snapshot()
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn mode(&self) -> &dyn GameMode {
        self.mode.as_ref()
    }

    pub fn mode_name(&self) -> &str {
        self.mode.name()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn find_groups(&self) -> Groups<'_, dyn GameMode> {
        find_groups(&self.grid, self.mode.as_ref())
    }

    pub fn group_at(&self, coords: Coord2) -> Result<Option<Group>> {
        find_group_containing(&self.grid, self.mode.as_ref(), coords)
    }

    /// Removes the group containing `coords`, settles the grid and scores
    /// the group.
    pub fn activate(&mut self, coords: Coord2) -> Result<MoveOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        if !self.state.is_ready() {
            return Ok(MoveOutcome::GameAlreadyOver);
        }

        let Some(group) = self.group_at(coords)? else {
            log::debug!("No group at {coords:?}");
            self.events.emit(&EngineEvent::InvalidMove(coords));
            return Ok(MoveOutcome::InvalidMove);
        };

        self.state = EngineState::Resolving;
        for pos in group.positions() {
            self.grid.set(pos, None)?;
        }
        self.grid.settle(self.mode.as_ref(), &mut self.rng);

        let points = self.mode.score_for(&group);
        self.score += points;
        // group size is bounded by the cell count
        let removed = group.len() as CellCount;
        log::debug!("Removed {removed} tiles at {coords:?} for {points} points");

        self.events.emit(&EngineEvent::ScoreChanged(self.score.0));
        self.events.emit(&EngineEvent::Resolved(self.config.resolve_delay));

        Ok(self.finish_cycle(removed, points))
    }

    /// Spends a power charge to remove the single tile at `coords`,
    /// regardless of matching rules.
    pub fn remove_one(&mut self, coords: Coord2) -> Result<MoveOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        if !self.state.is_ready() {
            return Ok(MoveOutcome::GameAlreadyOver);
        }
        if self.power.0 == 0 {
            log::debug!("No power charge left for {coords:?}");
            return Ok(MoveOutcome::NoPowerAvailable);
        }
        let Some(tile) = self.grid[coords] else {
            return Ok(MoveOutcome::InvalidMove);
        };

        self.state = EngineState::Resolving;
        self.power -= 1;
        self.grid.set(coords, None)?;
        self.grid.settle(self.mode.as_ref(), &mut self.rng);

        log::debug!("Power removal at {coords:?}, {} charges left", self.power.0);
        let reward = self.mode.removal_score(tile);
        if let Some(points) = reward {
            self.score += points;
            self.events.emit(&EngineEvent::ScoreChanged(self.score.0));
        }
        self.events.emit(&EngineEvent::Resolved(self.config.resolve_delay));

        Ok(self.finish_cycle(1, reward.unwrap_or(0)))
    }

    /// Adds one power charge. When to call this is up to the host.
    pub fn grant_power(&mut self) -> PowerCount {
        self.power += 1;
        self.power.0
    }

    /// Starts over with `mode`: new grid, zero score, the mode's starting
    /// charges. Listeners stay registered.
    pub fn reset(&mut self, mode: Box<dyn GameMode>) {
        self.mode = mode;
        self.restart();
    }

    /// Starts over with the current mode.
    pub fn restart(&mut self) {
        self.grid.clear();
        self.grid.refill(self.mode.as_ref(), &mut self.rng);
        self.score = Saturating(0);
        self.power = Saturating(self.mode.starting_power());
        self.state = EngineState::Ready;
        log::debug!("Restarted {} game", self.mode.name());
    }

    fn finish_cycle(&mut self, removed: CellCount, points: Score) -> MoveOutcome {
        if self.mode.is_terminal(&self.grid) {
            self.state = EngineState::Terminal;
            log::debug!("Game over with {} points", self.score.0);
            self.events.emit(&EngineEvent::GameOver {
                score: self.score.0,
                grid: self.grid.snapshot(),
            });
            MoveOutcome::GameOver { removed, points }
        } else {
            self.state = EngineState::Ready;
            MoveOutcome::Resolved { removed, points }
        }
    }
}
