//! Pluggable decision-makers.
//!
//! - `Strategy`: the capability interface the engine drives
//! - `RandomStrategy`, `GreedyFirstFit`: baselines
//! - `HeuristicStrategy`: phase-weighted feature scoring (`features`, `memory`)
//! - `StrategyProvider`, `StaticRegistry`: resolve strategies by locator

pub mod traits;
pub mod random;
pub mod greedy;
pub mod features;
pub mod memory;
pub mod heuristic;
pub mod registry;

pub use traits::{first_legal, legal_indices, Strategy};
pub use random::RandomStrategy;
pub use greedy::GreedyFirstFit;
pub use features::{CandidateFeatures, Phase, PhaseSignal};
pub use memory::{OpponentTracker, BLOCKED_PASS_THRESHOLD};
pub use heuristic::{HeuristicStrategy, HeuristicWeights, PhaseWeights};
pub use registry::{StaticRegistry, StrategyFactory, StrategyModule, StrategyProvider};
