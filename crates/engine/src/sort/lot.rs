//! Pre-competition numbering: the random lot draw and the printed-program
//! start numbers. Both run once, before lifting starts; neither is consulted
//! by live scheduling except as the first-attempt tie-break.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::info;

use crate::error::RosterInconsistency;
use crate::models::{Gender, Lifter};

/// Performs the one-time lot draw. The entropy source is injected so tests
/// can seed it and get a reproducible assignment.
#[derive(Debug, Default)]
pub struct LotAssigner {
    assigned: bool,
}

impl LotAssigner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws a unique lot number 1..=N for each lifter. No-op on an empty
    /// roster. A second draw without `reset` is rejected.
    pub fn assign_lot_numbers<R: Rng>(
        &mut self,
        roster: &mut [Lifter],
        rng: &mut R,
    ) -> Result<(), RosterInconsistency> {
        if roster.is_empty() {
            return Ok(());
        }
        if self.assigned {
            return Err(RosterInconsistency::LotsAlreadyAssigned);
        }

        let mut lots: Vec<u32> = (1..=roster.len() as u32).collect();
        lots.shuffle(rng);
        for (lifter, lot) in roster.iter_mut().zip(lots) {
            lifter.lot_number = Some(lot);
        }
        self.assigned = true;
        info!(lifters = roster.len(), "lot numbers drawn");
        Ok(())
    }

    /// Allows a fresh draw, e.g. after a roster correction before the
    /// competition starts.
    pub fn reset(&mut self) {
        self.assigned = false;
    }

    /// Assigns the stable secondary numbering used for the printed program:
    /// women before men, categories alphabetically, lot order within each.
    /// Requires the lot draw to have happened.
    pub fn assign_start_numbers(roster: &mut [Lifter]) -> Result<(), RosterInconsistency> {
        if roster.iter().any(|l| l.lot_number.is_none()) {
            return Err(RosterInconsistency::LotsNotAssigned);
        }

        let mut order: Vec<usize> = (0..roster.len()).collect();
        order.sort_by_key(|&i| {
            let l = &roster[i];
            (
                match l.gender {
                    Gender::Female => 0u8,
                    Gender::Male => 1,
                },
                l.registration_category.clone().unwrap_or_default(),
                l.lot_number.unwrap_or(u32::MAX),
            )
        });
        for (start, i) in order.into_iter().enumerate() {
            roster[i].start_number = Some(start as u32 + 1);
        }
        Ok(())
    }
}
