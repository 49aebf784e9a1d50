//! Game session state
//!
//! The session owns the board outright. Every mutation goes through
//! `&mut self`, so ticks, mirror rotations and level changes are applied in a
//! single total order.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::beam::{BeamState, Outcome, Terminal, advance};
use super::board::{Board, Cell};
use super::level::{generate_level, level_rng};
use crate::error::{Result, SimError};
use crate::settings::Settings;

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Status {
    /// Level loaded (or paused), beam not moving
    #[default]
    Idle,
    /// Beam advances on every tick
    Running,
    Won,
    LostOffGrid,
    LostObstacle,
}

impl Status {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Won | Status::LostOffGrid | Status::LostObstacle)
    }

    /// Status line shown to the player
    pub fn message(&self) -> &'static str {
        match self {
            Status::Won => "You Won! Laser reached the end!",
            Status::LostOffGrid => "Game Over: Laser went off grid!",
            Status::LostObstacle => "Game Over: Laser hit a planet!",
            Status::Idle | Status::Running => "",
        }
    }
}

impl From<Terminal> for Status {
    fn from(t: Terminal) -> Self {
        match t {
            Terminal::Won => Status::Won,
            Terminal::LostOffGrid => Status::LostOffGrid,
            Terminal::LostObstacle => Status::LostObstacle,
        }
    }
}

/// External commands, in the order the host received them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Start,
    Pause,
    /// Start/pause button
    Toggle,
    Tick,
    RotateMirror { x: i32, y: i32 },
    Reset,
    NewLevel,
    PreviousLevel,
}

/// A running game: one level, one beam
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    settings: Settings,
    /// Run seed; each level's layout derives from it
    seed: u64,
    /// 1-based level number
    level: u32,
    status: Status,
    board: Board,
    beam: BeamState,
    /// Beam steps taken on this level
    ticks: u64,
    /// Cells the beam has visited, oldest first, capped at [`Session::max_trail_len`]
    trail: Vec<IVec2>,
}

impl Session {
    /// Create a session on level 1
    pub fn new(settings: Settings, seed: u64) -> Result<Self> {
        let (board, beam) = generate_level(&settings.level, &mut level_rng(seed, 1))?;
        log::info!("Session created (seed {seed}), level 1");
        Ok(Self {
            settings,
            seed,
            level: 1,
            status: Status::Idle,
            board,
            beam,
            ticks: 0,
            trail: vec![beam.pos],
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn beam(&self) -> &BeamState {
        &self.beam
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn trail(&self) -> &[IVec2] {
        &self.trail
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Longest trail kept: one entry per distinct beam state plus the start.
    /// A beam still running past that is looping, so older points add nothing.
    pub fn max_trail_len(&self) -> usize {
        let side = self.board.side() as usize;
        4 * side * side + 1
    }

    /// Begin (or resume) moving the beam.
    ///
    /// Only acts from `Idle`. From a terminal status this is a silent no-op:
    /// the frozen beam can only be replaced by `reset` or a level change.
    pub fn start(&mut self) {
        match self.status {
            Status::Idle => {
                // 1x1 board: the beam already sits on End
                if self.board.get(self.beam.pos) == Some(Cell::End) {
                    self.finish(Terminal::Won);
                } else {
                    self.status = Status::Running;
                    log::debug!("Level {} running", self.level);
                }
            }
            Status::Running => {}
            _ => log::debug!("Ignoring start in terminal status {:?}", self.status),
        }
    }

    /// Stop the beam without touching board or beam
    pub fn pause(&mut self) {
        if self.status == Status::Running {
            self.status = Status::Idle;
            log::debug!("Level {} paused at tick {}", self.level, self.ticks);
        }
    }

    /// Start when idle, pause when running
    pub fn toggle_running(&mut self) {
        match self.status {
            Status::Running => self.pause(),
            _ => self.start(),
        }
    }

    /// Advance the beam one cell. No-op unless running. Returns the new status.
    pub fn tick(&mut self) -> Status {
        if self.status != Status::Running {
            return self.status;
        }

        match advance(&self.board, &self.beam) {
            Outcome::Continue(next) => {
                log::trace!("tick {}: {:?} -> {:?}", self.ticks, self.beam, next);
                self.beam = next;
                self.ticks += 1;
                self.trail.push(next.pos);
                if self.trail.len() > self.max_trail_len() {
                    self.trail.remove(0);
                }
            }
            Outcome::Terminal(terminal) => self.finish(terminal),
        }
        self.status
    }

    fn finish(&mut self, terminal: Terminal) {
        self.status = terminal.into();
        log::info!(
            "Level {} ended after {} ticks: {}",
            self.level,
            self.ticks,
            self.status.message()
        );
    }

    /// Turn the mirror at `(x, y)`. Allowed in any status; the beam picks up
    /// the new rotation on its next step.
    pub fn rotate_mirror(&mut self, x: i32, y: i32) -> Result<u8> {
        let rotation = self.board.rotate_mirror(x, y)?;
        log::debug!("Mirror ({x}, {y}) rotated to {rotation}");
        Ok(rotation)
    }

    /// Regenerate the current level from its seed
    pub fn reset(&mut self) -> Result<()> {
        self.load_level(self.level)
    }

    /// Move on to the next level
    pub fn new_level(&mut self) -> Result<()> {
        self.load_level(self.level.saturating_add(1))
    }

    /// Go back one level (stays on level 1)
    pub fn previous_level(&mut self) -> Result<()> {
        self.load_level(self.level.saturating_sub(1).max(1))
    }

    fn load_level(&mut self, level: u32) -> Result<()> {
        let (board, beam) = generate_level(&self.settings.level, &mut level_rng(self.seed, level))?;
        self.level = level;
        self.load_board(board, beam)?;
        log::info!("Loaded level {level}");
        Ok(())
    }

    /// Apply one external command
    pub fn apply(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Start => self.start(),
            Command::Pause => self.pause(),
            Command::Toggle => self.toggle_running(),
            Command::Tick => {
                self.tick();
            }
            Command::RotateMirror { x, y } => {
                self.rotate_mirror(x, y)?;
            }
            Command::Reset => self.reset()?,
            Command::NewLevel => self.new_level()?,
            Command::PreviousLevel => self.previous_level()?,
        }
        Ok(())
    }

    /// Replace the board and beam with a hand-built layout (status `Idle`).
    ///
    /// The board must hold exactly one `End` and one `Start` (none on a 1x1
    /// board) and the beam must sit on it; otherwise the session is unchanged.
    pub fn load_board(&mut self, board: Board, beam: BeamState) -> Result<()> {
        board.check_endpoints()?;
        if !board.contains(beam.pos) {
            return Err(SimError::OutOfBounds {
                x: beam.pos.x,
                y: beam.pos.y,
                side: board.side(),
            });
        }
        self.board = board;
        self.beam = beam;
        self.status = Status::Idle;
        self.ticks = 0;
        self.trail.clear();
        self.trail.push(beam.pos);
        Ok(())
    }
}
