//! Resolving strategy implementations by locator.
//!
//! How to add a strategy to a registry:
//!
//! 1) Implement [`Strategy`] for your type.
//! 2) Write a `fn(seed: u64) -> Option<Box<dyn Strategy>>` factory for it.
//! 3) `register` it under a stable locator.
//! 4) Determinism: the same seed must give the same behaviour.
//!
//! Engines only see the [`StrategyProvider`] trait. [`StaticRegistry`] is the
//! statically linked implementation; anything else that can produce a boxed
//! `Strategy` (shared objects, sandboxed processes) fits behind the same trait.

use tracing::debug;

use crate::core::{GameRng, StrategyError};

use super::greedy::GreedyFirstFit;
use super::heuristic::HeuristicStrategy;
use super::random::RandomStrategy;
use super::traits::Strategy;

/// Construction entry point of a strategy module.
pub type StrategyFactory = fn(seed: u64) -> Option<Box<dyn Strategy>>;

/// Turns locators into live strategies.
pub trait StrategyProvider {
    /// Cheap probe: would `resolve` find a module with a factory?
    fn is_valid(&self, locator: &str) -> bool;

    /// Build a fresh strategy instance.
    fn resolve(&self, locator: &str) -> Result<Box<dyn Strategy>, StrategyError>;
}

/// A named module, possibly without a usable factory.
#[derive(Clone, Debug)]
pub struct StrategyModule {
    pub locator: String,
    pub factory: Option<StrategyFactory>,
}

/// Statically linked factory table.
///
/// Each resolution seeds its factory from the registry seed and the locator,
/// so resolving the same locator twice yields identically seeded instances.
#[derive(Clone, Debug)]
pub struct StaticRegistry {
    modules: Vec<StrategyModule>,
    seed: u64,
}

impl StaticRegistry {
    pub const RANDOM: &'static str = "random";
    pub const GREEDY: &'static str = "greedy";
    pub const HEURISTIC: &'static str = "heuristic";
    pub const HAND_PRESSURE: &'static str = "hand-pressure";

    /// An empty registry.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            modules: Vec::new(),
            seed,
        }
    }

    /// A registry holding every built-in strategy.
    #[must_use]
    pub fn with_builtins(seed: u64) -> Self {
        let mut registry = Self::new(seed);
        registry.register(Self::RANDOM, make_random);
        registry.register(Self::GREEDY, make_greedy);
        registry.register(Self::HEURISTIC, make_heuristic);
        registry.register(Self::HAND_PRESSURE, make_hand_pressure);
        registry
    }

    /// Add or replace a module with a factory.
    pub fn register(&mut self, locator: impl Into<String>, factory: StrategyFactory) {
        self.insert(StrategyModule {
            locator: locator.into(),
            factory: Some(factory),
        });
    }

    /// Add or replace a module that exports no factory.
    pub fn declare(&mut self, locator: impl Into<String>) {
        self.insert(StrategyModule {
            locator: locator.into(),
            factory: None,
        });
    }

    /// Registered locators in registration order.
    pub fn locators(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(|m| m.locator.as_str())
    }

    fn insert(&mut self, module: StrategyModule) {
        match self.modules.iter_mut().find(|m| m.locator == module.locator) {
            Some(existing) => *existing = module,
            None => self.modules.push(module),
        }
    }

    fn find(&self, locator: &str) -> Option<&StrategyModule> {
        let locator = locator.trim();
        self.modules.iter().find(|m| m.locator == locator)
    }
}

impl StrategyProvider for StaticRegistry {
    fn is_valid(&self, locator: &str) -> bool {
        self.find(locator).is_some_and(|m| m.factory.is_some())
    }

    fn resolve(&self, locator: &str) -> Result<Box<dyn Strategy>, StrategyError> {
        let module = self
            .find(locator)
            .ok_or_else(|| StrategyError::load(locator, "no such module"))?;

        let factory = module.factory.ok_or_else(|| StrategyError::MissingFactory {
            locator: module.locator.clone(),
        })?;

        let seed = GameRng::new(self.seed).for_context(&module.locator).seed();
        let strategy = factory(seed).ok_or_else(|| StrategyError::Instantiation {
            locator: module.locator.clone(),
        })?;

        debug!(locator = %module.locator, name = strategy.name(), "resolved strategy");
        Ok(strategy)
    }
}

fn make_random(seed: u64) -> Option<Box<dyn Strategy>> {
    Some(Box::new(RandomStrategy::new(seed)))
}

fn make_greedy(_seed: u64) -> Option<Box<dyn Strategy>> {
    Some(Box::new(GreedyFirstFit))
}

fn make_heuristic(_seed: u64) -> Option<Box<dyn Strategy>> {
    Some(Box::new(HeuristicStrategy::table_progress()))
}

fn make_hand_pressure(_seed: u64) -> Option<Box<dyn Strategy>> {
    Some(Box::new(HeuristicStrategy::hand_pressure()))
}
