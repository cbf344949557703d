use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The two lifts contested, three attempts each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiftKind {
    Snatch,
    CleanJerk,
}

impl LiftKind {
    pub fn label(&self) -> &'static str {
        match self {
            LiftKind::Snatch => "snatch",
            LiftKind::CleanJerk => "clean & jerk",
        }
    }
}

/// A recorded attempt outcome. The weight keeps the referee-card sign
/// convention: positive magnitude for a good lift, negative for a failed
/// one, zero for a declined attempt (counted as a failure at no weight).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiftResult {
    pub weight: Decimal,
    pub at: NaiveDateTime,
}

impl LiftResult {
    pub fn is_successful(&self) -> bool {
        self.weight > Decimal::ZERO
    }

    /// The weight on the bar, regardless of outcome.
    pub fn bar_weight(&self) -> Decimal {
        self.weight.abs()
    }
}

/// Where a single attempt sits in its lifecycle. Transitions only move
/// forward; `Resulted` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotState {
    Empty,
    Declared,
    Changed1,
    Changed2,
    Resulted,
}

/// One attempt card cell: the declaration, its up to two permitted
/// revisions, and the eventual result. Values are only ever appended,
/// never erased, so the card remains auditable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttemptSlot {
    pub declaration: Option<Decimal>,
    pub change1: Option<Decimal>,
    pub change2: Option<Decimal>,
    pub result: Option<LiftResult>,
}

impl AttemptSlot {
    pub fn state(&self) -> SlotState {
        if self.result.is_some() {
            SlotState::Resulted
        } else if self.change2.is_some() {
            SlotState::Changed2
        } else if self.change1.is_some() {
            SlotState::Changed1
        } else if self.declaration.is_some() {
            SlotState::Declared
        } else {
            SlotState::Empty
        }
    }

    pub fn is_taken(&self) -> bool {
        self.result.is_some()
    }

    /// The weight currently asked for: the latest of change2, change1,
    /// declaration.
    pub fn requested(&self) -> Option<Decimal> {
        self.change2.or(self.change1).or(self.declaration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(secs: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 5, 14)
            .unwrap()
            .and_hms_opt(10, 0, secs)
            .unwrap()
    }

    #[test]
    fn state_advances_with_each_revision() {
        let mut slot = AttemptSlot::default();
        assert_eq!(slot.state(), SlotState::Empty);

        slot.declaration = Some(Decimal::from(60));
        assert_eq!(slot.state(), SlotState::Declared);

        slot.change1 = Some(Decimal::from(62));
        assert_eq!(slot.state(), SlotState::Changed1);

        slot.change2 = Some(Decimal::from(63));
        assert_eq!(slot.state(), SlotState::Changed2);

        slot.result = Some(LiftResult {
            weight: Decimal::from(63),
            at: at(0),
        });
        assert_eq!(slot.state(), SlotState::Resulted);
    }

    #[test]
    fn requested_prefers_latest_revision() {
        let mut slot = AttemptSlot {
            declaration: Some(Decimal::from(60)),
            ..Default::default()
        };
        assert_eq!(slot.requested(), Some(Decimal::from(60)));

        slot.change1 = Some(Decimal::from(61));
        assert_eq!(slot.requested(), Some(Decimal::from(61)));

        slot.change2 = Some(Decimal::from(64));
        assert_eq!(slot.requested(), Some(Decimal::from(64)));
    }

    #[test]
    fn signed_result_encodes_outcome() {
        let good = LiftResult {
            weight: Decimal::from(80),
            at: at(1),
        };
        let missed = LiftResult {
            weight: Decimal::from(-80),
            at: at(2),
        };
        let declined = LiftResult {
            weight: Decimal::ZERO,
            at: at(3),
        };

        assert!(good.is_successful());
        assert!(!missed.is_successful());
        assert!(!declined.is_successful());
        assert_eq!(missed.bar_weight(), Decimal::from(80));
    }
}
