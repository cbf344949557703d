use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::attempt::{AttemptSlot, LiftKind, LiftResult};
use super::category::Gender;

/// One roster entry: identity and static attributes from the registration
/// collaborator, the six attempt card cells, and the engine-owned flags.
///
/// Everything the schedulers need (requested weight, total, attempts done,
/// previous lift time) is derived from the card on demand rather than
/// cached, so a mutation can never leave a stale derived field behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lifter {
    pub lifter_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub body_weight: Option<Decimal>,
    /// Category the lifter entered under, when ranking is configured to
    /// use registration categories rather than weigh-in ones.
    pub registration_category: Option<String>,
    pub team_member: bool,
    /// Drawn once before the competition; unique across the roster.
    pub lot_number: Option<u32>,
    /// Printed-program numbering only; never consulted by live scheduling.
    pub start_number: Option<u32>,
    /// Terminal: a withdrawn lifter never reappears in the active order.
    pub withdrawn: bool,
    /// Transient operator override placing this lifter at the head of the
    /// order until their next result is recorded or the flag is cleared.
    pub forced_as_current: bool,
    /// Written only by rank assignment, scoped to a category group.
    pub rank: Option<u32>,
    pub snatch: [AttemptSlot; 3],
    pub clean_jerk: [AttemptSlot; 3],
}

impl Lifter {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, gender: Gender) -> Self {
        Self {
            lifter_id: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            gender,
            body_weight: None,
            registration_category: None,
            team_member: true,
            lot_number: None,
            start_number: None,
            withdrawn: false,
            forced_as_current: false,
            rank: None,
            snatch: Default::default(),
            clean_jerk: Default::default(),
        }
    }

    pub fn slots(&self, kind: LiftKind) -> &[AttemptSlot; 3] {
        match kind {
            LiftKind::Snatch => &self.snatch,
            LiftKind::CleanJerk => &self.clean_jerk,
        }
    }

    pub(crate) fn slots_mut(&mut self, kind: LiftKind) -> &mut [AttemptSlot; 3] {
        match kind {
            LiftKind::Snatch => &mut self.snatch,
            LiftKind::CleanJerk => &mut self.clean_jerk,
        }
    }

    /// Attempt numbers are 1..=3.
    pub fn slot(&self, kind: LiftKind, number: u8) -> Option<&AttemptSlot> {
        self.slots(kind).get(usize::from(number).checked_sub(1)?)
    }

    /// Count of recorded results, 0..=6.
    pub fn attempts_done(&self) -> u8 {
        self.snatch
            .iter()
            .chain(self.clean_jerk.iter())
            .filter(|s| s.is_taken())
            .count() as u8
    }

    /// The next open attempt number for a lift kind, if any remain.
    pub fn next_attempt(&self, kind: LiftKind) -> Option<u8> {
        self.slots(kind)
            .iter()
            .position(|s| !s.is_taken())
            .map(|i| i as u8 + 1)
    }

    /// Still in contention for the lifting order: not withdrawn and with
    /// attempts remaining.
    pub fn is_active(&self) -> bool {
        !self.withdrawn && self.attempts_done() < 6
    }

    /// Best successful attempt of a kind.
    pub fn best(&self, kind: LiftKind) -> Option<LiftResult> {
        self.slots(kind)
            .iter()
            .filter_map(|s| s.result)
            .filter(LiftResult::is_successful)
            .max_by_key(|r| r.weight)
    }

    /// All three attempts of a kind taken, none successful.
    pub fn bombed_out(&self, kind: LiftKind) -> bool {
        let slots = self.slots(kind);
        slots.iter().all(|s| s.is_taken())
            && !slots
                .iter()
                .filter_map(|s| s.result)
                .any(|r| r.is_successful())
    }

    /// Best snatch plus best clean & jerk. Undefined once either lift is
    /// fully failed; a kind without successes that is still open simply
    /// contributes zero.
    pub fn total(&self) -> Option<Decimal> {
        if self.bombed_out(LiftKind::Snatch) || self.bombed_out(LiftKind::CleanJerk) {
            return None;
        }
        let snatch = self.best(LiftKind::Snatch).map_or(Decimal::ZERO, |r| r.weight);
        let clean_jerk = self
            .best(LiftKind::CleanJerk)
            .map_or(Decimal::ZERO, |r| r.weight);
        Some(snatch + clean_jerk)
    }

    /// The instant the current total became complete: the later of the
    /// two best successful attempts. None if nothing succeeded yet.
    pub fn total_achieved_at(&self) -> Option<NaiveDateTime> {
        let snatch = self.best(LiftKind::Snatch).map(|r| r.at);
        let clean_jerk = self.best(LiftKind::CleanJerk).map(|r| r.at);
        match (snatch, clean_jerk) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        }
    }

    /// Timestamp of the most recent recorded result, any kind.
    pub fn previous_lift_time(&self) -> Option<NaiveDateTime> {
        self.snatch
            .iter()
            .chain(self.clean_jerk.iter())
            .filter_map(|s| s.result)
            .map(|r| r.at)
            .max()
    }

    /// The automatic-progression default for an attempt with no declaration
    /// of its own: one kilo above the previous attempt after a good lift,
    /// the same weight after a miss. First attempts have no default.
    pub fn automatic_progression(&self, kind: LiftKind, number: u8) -> Option<Decimal> {
        if number < 2 {
            return None;
        }
        let previous = self.slot(kind, number - 1)?;
        let result = previous.result?;
        if result.is_successful() {
            Some(result.bar_weight() + Decimal::ONE)
        } else {
            Some(result.bar_weight())
        }
    }

    /// The weight this lifter is asking for on a given attempt: the latest
    /// declared value, or the automatic-progression default.
    pub fn requested_for(&self, kind: LiftKind, number: u8) -> Option<Decimal> {
        let slot = self.slot(kind, number)?;
        slot.requested()
            .or_else(|| self.automatic_progression(kind, number))
    }

    /// The weight for the next untaken attempt overall, snatch before
    /// clean & jerk. Zero when nothing has been declared yet; None once
    /// all six attempts are done.
    pub fn requested_weight(&self) -> Option<Decimal> {
        for kind in [LiftKind::Snatch, LiftKind::CleanJerk] {
            if let Some(number) = self.next_attempt(kind) {
                return Some(
                    self.requested_for(kind, number)
                        .unwrap_or(Decimal::ZERO),
                );
            }
        }
        None
    }
}
