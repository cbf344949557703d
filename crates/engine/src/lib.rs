//! Attempt scheduling and classification engine for Olympic-style
//! weightlifting meets.
//!
//! The engine decides, at any instant, which lifter is called to the bar
//! next, and at competition end, who wins — reproducing the federation
//! tie-break rules under concurrent mutation. It consumes a roster and
//! attempt events from collaborators and emits an ordering and a
//! classification; it performs no I/O, rendering, or storage of its own.

pub mod config;
pub mod error;
pub mod models;
pub mod platform;
pub mod rules;
pub mod sort;

pub use config::{CoefficientConstants, CompetitionRules};
pub use error::{EngineError, Result, RosterInconsistency, RuleViolation};
pub use models::{AttemptSlot, Category, Gender, LiftKind, LiftResult, Lifter, SlotState};
pub use platform::{OrderChange, Platform, PlatformObserver};
pub use sort::{LotAssigner, Ranking, classify, lifting_order, lifting_order_copy};
