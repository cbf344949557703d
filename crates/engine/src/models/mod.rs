pub mod attempt;
pub mod category;
pub mod lifter;

pub use attempt::{AttemptSlot, LiftKind, LiftResult, SlotState};
pub use category::{Category, Gender};
pub use lifter::Lifter;
