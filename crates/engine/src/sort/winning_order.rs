//! End-of-event (or live) classification and category-scoped rank
//! assignment, reproducing the federation tie-break chain: higher result,
//! then lighter bodyweight, then earlier achievement.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::config::CompetitionRules;
use crate::models::{LiftKind, Lifter};
use crate::sort::lifting_order::{ascending_option, descending_option};

/// What the classification is ranked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ranking {
    Total,
    Snatch,
    CleanJerk,
    /// Bodyweight-coefficient score (total × coefficient).
    Score,
}

/// The ranked quantity for one lifter. None when undefined: a bombed-out
/// total, a lift with no success yet, or a score without a weigh-in.
pub fn metric(lifter: &Lifter, ranking: Ranking, rules: &CompetitionRules) -> Option<Decimal> {
    match ranking {
        Ranking::Total => lifter.total(),
        Ranking::Snatch => lifter.best(LiftKind::Snatch).map(|r| r.weight),
        Ranking::CleanJerk => lifter.best(LiftKind::CleanJerk).map(|r| r.weight),
        Ranking::Score => {
            let total = lifter.total()?;
            let coefficient = rules.coefficient(lifter)?;
            Some((total * coefficient).round_dp(2))
        }
    }
}

/// When the lifter's maximal metric was achieved.
fn achieved_at(lifter: &Lifter, ranking: Ranking) -> Option<NaiveDateTime> {
    match ranking {
        Ranking::Total | Ranking::Score => lifter.total_achieved_at(),
        Ranking::Snatch => lifter.best(LiftKind::Snatch).map(|r| r.at),
        Ranking::CleanJerk => lifter.best(LiftKind::CleanJerk).map(|r| r.at),
    }
}

/// The winning-order comparator. Always yields a total order: lifters
/// without a defined metric rank last as a block (bombed-out lifters,
/// missing weigh-ins for coefficient rankings), ordered among themselves
/// by bodyweight then lot.
pub fn winning_order(
    a: &Lifter,
    b: &Lifter,
    ranking: Ranking,
    rules: &CompetitionRules,
) -> Ordering {
    descending_option(metric(a, ranking, rules), metric(b, ranking, rules))
        .then_with(|| ascending_option(a.body_weight, b.body_weight))
        .then_with(|| earlier_first(achieved_at(a, ranking), achieved_at(b, ranking)))
        .then_with(|| {
            a.lot_number
                .unwrap_or(u32::MAX)
                .cmp(&b.lot_number.unwrap_or(u32::MAX))
        })
}

fn earlier_first(a: Option<NaiveDateTime>, b: Option<NaiveDateTime>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Classifies a roster snapshot without touching it.
pub fn classify(roster: &[Lifter], ranking: Ranking, rules: &CompetitionRules) -> Vec<Lifter> {
    let mut classified = roster.to_vec();
    classified.sort_by(|a, b| winning_order(a, b, ranking, rules));
    classified
}

/// Groups the classified order by category — registration category when so
/// configured, weigh-in category otherwise — and assigns rank 1..K
/// independently within each group. The global order only derives the
/// group-local order; rank numbers restart per group. Lifters without a
/// defined metric stay unranked.
pub fn assign_category_ranks(roster: &mut [Lifter], ranking: Ranking, rules: &CompetitionRules) {
    let mut order: Vec<usize> = (0..roster.len()).collect();
    order.sort_by(|&i, &j| winning_order(&roster[i], &roster[j], ranking, rules));

    let mut counters: HashMap<Option<String>, u32> = HashMap::new();
    for i in order {
        if metric(&roster[i], ranking, rules).is_none() {
            roster[i].rank = None;
            continue;
        }
        let group = rules.category_label(&roster[i]);
        let next = counters.entry(group).or_insert(0);
        *next += 1;
        roster[i].rank = Some(*next);
    }
}
