use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// A federation-rule check failed. The mutation that triggered it is
/// rejected and state is left unchanged; nothing is auto-corrected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuleViolation {
    #[error("declared weight {proposed} is below the progression floor of {floor}")]
    WeightBelowProgression { proposed: Decimal, floor: Decimal },

    #[error("revised weight {proposed} is below the {current} it replaces")]
    RevisionLowersWeight { proposed: Decimal, current: Decimal },

    #[error("declaration already recorded for this attempt")]
    AlreadyDeclared,

    #[error("change must follow a declaration")]
    NoDeclarationToChange,

    #[error("both permitted changes already used for this attempt")]
    TooManyRevisions,

    #[error("attempt already has a recorded result")]
    AttemptAlreadyTaken,

    #[error("attempt {requested} out of order; next open attempt is {expected}")]
    AttemptOutOfOrder { requested: u8, expected: u8 },

    #[error("starting total {declared} is below the category minimum of {minimum}")]
    StartingTotalTooLow { declared: Decimal, minimum: Decimal },
}

/// A collaborator handed the engine inconsistent roster data. These are
/// integration bugs, not user input; the operation aborts without any
/// partial mutation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RosterInconsistency {
    #[error("duplicate lot number {0}")]
    DuplicateLotNumber(u32),

    #[error("unknown lifter {0}")]
    UnknownLifter(Uuid),

    #[error("lot numbers already assigned; reset before redrawing")]
    LotsAlreadyAssigned,

    #[error("lot numbers not assigned yet")]
    LotsNotAssigned,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Rule(#[from] RuleViolation),

    #[error(transparent)]
    Roster(#[from] RosterInconsistency),
}

pub type Result<T> = std::result::Result<T, EngineError>;
