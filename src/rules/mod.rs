//! Running games.
//!
//! - `GameEngine`: deals, schedules turns, validates decisions, ranks
//! - `GameResult`: final positions
//! - `setup`: lineups and whole matches

pub mod engine;
pub mod result;
pub mod setup;

pub use engine::{EngineStatus, GameEngine, PlayerState};
pub use result::GameResult;
pub use setup::{competition_lineup, demo_lineup, internal_lineup, Match, Seat, Standings};
