//! Recomputes, after every mutation, the order in which the remaining
//! lifters must lift.
//!
//! Weight ascending reflects the bar-loading rule: the lightest requested
//! weight always goes next. The lot number seeds a fair starting rotation
//! for lifters who have not yet lifted; once two lifters both have a
//! recorded attempt, the one who lifted longest ago goes first, and the
//! lot draw is never consulted again between them.

use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::models::Lifter;

/// Sorts the roster in place into lifting order. The caller's slice is the
/// live order handed to displays and timers.
pub fn lifting_order(roster: &mut [Lifter]) {
    roster.sort_by(lift_order);
}

/// Non-destructive variant for read-only displays.
pub fn lifting_order_copy(roster: &[Lifter]) -> Vec<Lifter> {
    let mut copy = roster.to_vec();
    lifting_order(&mut copy);
    copy
}

/// The full lifting-order comparator. Total over any pair of lifters.
pub fn lift_order(a: &Lifter, b: &Lifter) -> Ordering {
    // Operator override beats everything until cleared.
    match b.forced_as_current.cmp(&a.forced_as_current) {
        Ordering::Equal => {}
        forced => return forced,
    }

    // Active lifters always precede withdrawn or finished ones.
    match b.is_active().cmp(&a.is_active()) {
        Ordering::Equal => {}
        active => return active,
    }

    if a.is_active() {
        active_order(a, b)
    } else {
        inactive_order(a, b)
    }
}

fn active_order(a: &Lifter, b: &Lifter) -> Ordering {
    let weight_a = a.requested_weight().unwrap_or(Decimal::ZERO);
    let weight_b = b.requested_weight().unwrap_or(Decimal::ZERO);

    weight_a.cmp(&weight_b).then_with(|| {
        match (a.previous_lift_time(), b.previous_lift_time()) {
            // Neither has lifted: the lot draw decides.
            (None, None) => lot(a).cmp(&lot(b)),
            // A first attempt loads before a repeat attempt at the same bar.
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            // Both have lifted: whoever went longest ago goes next.
            (Some(at_a), Some(at_b)) => at_a.cmp(&at_b).then_with(|| lot(a).cmp(&lot(b))),
        }
    })
}

/// Finished and withdrawn lifters keep a stable end-of-session display
/// order: total descending, then bodyweight ascending, then lot.
fn inactive_order(a: &Lifter, b: &Lifter) -> Ordering {
    descending_option(a.total(), b.total())
        .then_with(|| ascending_option(a.body_weight, b.body_weight))
        .then_with(|| lot(a).cmp(&lot(b)))
}

fn lot(l: &Lifter) -> u32 {
    l.lot_number.unwrap_or(u32::MAX)
}

/// Higher values first; None sorts last.
pub(crate) fn descending_option(a: Option<Decimal>, b: Option<Decimal>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Lower values first; None sorts last.
pub(crate) fn ascending_option(a: Option<Decimal>, b: Option<Decimal>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
