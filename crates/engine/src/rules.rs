//! Pure rule checks gating declarations and weight changes. Nothing here
//! mutates state; callers apply the mutation only after a check passes.

use rust_decimal::Decimal;

use crate::config::CompetitionRules;
use crate::error::RuleViolation;
use crate::models::{LiftKind, Lifter};

/// Which card cell a proposed weight targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Revision {
    Declaration,
    Change1,
    Change2,
}

/// Validates a proposed declaration or change for one attempt.
///
/// Enforced rules:
/// - weights never go below the progression floor of the previous attempt
///   in the same lift (one kilo above a good lift, the same weight after a
///   miss); first declarations of a lift are exempt;
/// - a revision never goes below the value it replaces;
/// - at most one change1 and one change2 per attempt, in order;
/// - taken attempts are closed.
pub fn validate_declaration(
    lifter: &Lifter,
    kind: LiftKind,
    number: u8,
    revision: Revision,
    proposed: Decimal,
) -> Result<(), RuleViolation> {
    let slot = lifter
        .slot(kind, number)
        .ok_or(RuleViolation::AttemptOutOfOrder {
            requested: number,
            expected: lifter.next_attempt(kind).unwrap_or(0),
        })?;

    if slot.is_taken() {
        return Err(RuleViolation::AttemptAlreadyTaken);
    }

    match revision {
        Revision::Declaration => {
            if slot.declaration.is_some() {
                return Err(RuleViolation::AlreadyDeclared);
            }
        }
        Revision::Change1 => {
            if slot.declaration.is_none() {
                return Err(RuleViolation::NoDeclarationToChange);
            }
            if slot.change1.is_some() {
                return Err(RuleViolation::TooManyRevisions);
            }
        }
        Revision::Change2 => {
            if slot.change1.is_none() {
                return Err(RuleViolation::NoDeclarationToChange);
            }
            if slot.change2.is_some() {
                return Err(RuleViolation::TooManyRevisions);
            }
        }
    }

    if let Some(current) = slot.requested() {
        if proposed < current {
            return Err(RuleViolation::RevisionLowersWeight { proposed, current });
        }
    }

    if let Some(floor) = progression_floor(lifter, kind, number) {
        if proposed < floor {
            return Err(RuleViolation::WeightBelowProgression { proposed, floor });
        }
    }

    Ok(())
}

/// The lowest weight an attempt may ask for, derived from the previous
/// attempt of the same lift: its automatic progression once taken, its
/// current declared value while still open. First attempts have no floor.
fn progression_floor(lifter: &Lifter, kind: LiftKind, number: u8) -> Option<Decimal> {
    if number < 2 {
        return None;
    }
    if let Some(auto) = lifter.automatic_progression(kind, number) {
        return Some(auto);
    }
    lifter.slot(kind, number - 1)?.requested()
}

/// Checks the minimum-qualifying-total rule for the lifter's category, when
/// one is configured: the two first declarations must add up to at least the
/// category minimum. Non-fatal; the caller decides whether to block or warn.
pub fn check_qualifying_total(
    lifter: &Lifter,
    rules: &CompetitionRules,
) -> Option<RuleViolation> {
    let label = rules.category_label(lifter)?;
    let minimum = rules.category_by_name(&label)?.minimum_qualifying_total?;

    let snatch = lifter.requested_for(LiftKind::Snatch, 1)?;
    let clean_jerk = lifter.requested_for(LiftKind::CleanJerk, 1)?;
    let declared = snatch + clean_jerk;

    if declared < minimum {
        Some(RuleViolation::StartingTotalTooLow { declared, minimum })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Gender, LiftResult};
    use chrono::NaiveDate;

    fn lifter() -> Lifter {
        Lifter::new("Ulrich", "Verne", Gender::Male)
    }

    fn record(lifter: &mut Lifter, kind: LiftKind, number: u8, weight: i64) {
        lifter.slots_mut(kind)[usize::from(number) - 1].result = Some(LiftResult {
            weight: Decimal::from(weight),
            at: NaiveDate::from_ymd_opt(2026, 5, 14)
                .unwrap()
                .and_hms_opt(10, 0, u32::from(number))
                .unwrap(),
        });
    }

    #[test]
    fn first_declaration_has_no_floor() {
        let l = lifter();
        assert!(validate_declaration(
            &l,
            LiftKind::Snatch,
            1,
            Revision::Declaration,
            Decimal::from(55)
        )
        .is_ok());
    }

    #[test]
    fn floor_is_one_kilo_above_a_good_lift() {
        let mut l = lifter();
        record(&mut l, LiftKind::Snatch, 1, 60);

        let too_low = validate_declaration(
            &l,
            LiftKind::Snatch,
            2,
            Revision::Declaration,
            Decimal::from(60),
        );
        assert_eq!(
            too_low,
            Err(RuleViolation::WeightBelowProgression {
                proposed: Decimal::from(60),
                floor: Decimal::from(61),
            })
        );

        assert!(validate_declaration(
            &l,
            LiftKind::Snatch,
            2,
            Revision::Declaration,
            Decimal::from(61)
        )
        .is_ok());
    }

    #[test]
    fn floor_stays_level_after_a_miss() {
        let mut l = lifter();
        record(&mut l, LiftKind::Snatch, 1, -60);
        assert!(validate_declaration(
            &l,
            LiftKind::Snatch,
            2,
            Revision::Declaration,
            Decimal::from(60)
        )
        .is_ok());
    }

    #[test]
    fn clean_jerk_floor_independent_of_snatch() {
        let mut l = lifter();
        record(&mut l, LiftKind::Snatch, 1, 60);
        // First clean & jerk may open below the snatch weights.
        assert!(validate_declaration(
            &l,
            LiftKind::CleanJerk,
            1,
            Revision::Declaration,
            Decimal::from(50)
        )
        .is_ok());
    }

    #[test]
    fn revision_may_not_lower_the_request() {
        let mut l = lifter();
        l.snatch[0].declaration = Some(Decimal::from(60));

        let lowered = validate_declaration(
            &l,
            LiftKind::Snatch,
            1,
            Revision::Change1,
            Decimal::from(58),
        );
        assert_eq!(
            lowered,
            Err(RuleViolation::RevisionLowersWeight {
                proposed: Decimal::from(58),
                current: Decimal::from(60),
            })
        );
    }

    #[test]
    fn third_revision_is_rejected() {
        let mut l = lifter();
        l.snatch[0].declaration = Some(Decimal::from(58));
        l.snatch[0].change1 = Some(Decimal::from(59));
        l.snatch[0].change2 = Some(Decimal::from(60));

        assert_eq!(
            validate_declaration(
                &l,
                LiftKind::Snatch,
                1,
                Revision::Change2,
                Decimal::from(61)
            ),
            Err(RuleViolation::TooManyRevisions)
        );
    }

    #[test]
    fn change_requires_a_declaration() {
        let l = lifter();
        assert_eq!(
            validate_declaration(
                &l,
                LiftKind::Snatch,
                1,
                Revision::Change1,
                Decimal::from(61)
            ),
            Err(RuleViolation::NoDeclarationToChange)
        );
    }

    #[test]
    fn taken_attempt_is_closed() {
        let mut l = lifter();
        l.snatch[0].declaration = Some(Decimal::from(60));
        record(&mut l, LiftKind::Snatch, 1, 60);
        assert_eq!(
            validate_declaration(
                &l,
                LiftKind::Snatch,
                1,
                Revision::Change1,
                Decimal::from(62)
            ),
            Err(RuleViolation::AttemptAlreadyTaken)
        );
    }

    #[test]
    fn qualifying_total_warns_below_category_minimum() {
        let mut rules = CompetitionRules::default();
        rules.categories.push(Category {
            name: "M77".to_string(),
            gender: Gender::Male,
            weight_class_min: Some(Decimal::from(69)),
            weight_class_max: Some(Decimal::from(77)),
            minimum_qualifying_total: Some(Decimal::from(160)),
        });

        let mut l = lifter();
        l.body_weight = Some(Decimal::from(75));
        l.snatch[0].declaration = Some(Decimal::from(60));
        l.clean_jerk[0].declaration = Some(Decimal::from(80));

        assert_eq!(
            check_qualifying_total(&l, &rules),
            Some(RuleViolation::StartingTotalTooLow {
                declared: Decimal::from(140),
                minimum: Decimal::from(160),
            })
        );

        l.snatch[0].change1 = Some(Decimal::from(80));
        assert_eq!(check_qualifying_total(&l, &rules), None);
    }

    #[test]
    fn qualifying_total_silent_without_configured_minimum() {
        let rules = CompetitionRules::default();
        let mut l = lifter();
        l.body_weight = Some(Decimal::from(75));
        l.snatch[0].declaration = Some(Decimal::from(20));
        l.clean_jerk[0].declaration = Some(Decimal::from(20));
        assert_eq!(check_qualifying_total(&l, &rules), None);
    }
}
