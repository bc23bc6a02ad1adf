//! The shared table.
//!
//! `TableLayout` is owned and mutated only by the engine; strategies see it
//! through a shared borrow for the duration of a single decision.

pub mod layout;

pub use layout::TableLayout;
