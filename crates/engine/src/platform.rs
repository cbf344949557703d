//! One lifting platform: the roster behind a single exclusive critical
//! section. Every mutating command runs "validate → mutate → resort →
//! publish" under the lock, so no reader ever observes a recorded attempt
//! without the matching reordering. Readers pull cloned snapshots, never
//! live references.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDateTime;
use rand::Rng;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::CompetitionRules;
use crate::error::{EngineError, Result, RosterInconsistency, RuleViolation};
use crate::models::{LiftKind, LiftResult, Lifter};
use crate::rules::{Revision, check_qualifying_total, validate_declaration};
use crate::sort::lot::LotAssigner;
use crate::sort::winning_order::{Ranking, assign_category_ranks, classify};
use crate::sort::{lifting_order, lifting_order_copy};

/// Outcome of an accepted command: the republished order plus what the
/// timer/display collaborators need to react to.
#[derive(Debug, Clone)]
pub struct OrderChange {
    /// The full roster in lifting order.
    pub order: Vec<Lifter>,
    /// The lifter now called to the bar, if anyone is left.
    pub current: Option<Lifter>,
    /// Whether the head of the order moved — the timer pause/resume cue.
    pub head_changed: bool,
    /// Non-fatal rule findings (qualifying-total shortfalls). The command
    /// was applied; the caller decides how to present these.
    pub warnings: Vec<RuleViolation>,
}

/// Output port for presentation and timer collaborators. Called inside the
/// critical section, after the resort, whenever the head of the order
/// changes or an override/withdrawal occurs.
pub trait PlatformObserver: Send + Sync {
    fn order_changed(&self, change: &OrderChange);
}

struct PlatformState {
    roster: Vec<Lifter>,
    rules: CompetitionRules,
    lots: LotAssigner,
}

/// A lifting site: single writer, many snapshot readers.
pub struct Platform {
    name: String,
    state: Mutex<PlatformState>,
    observers: Vec<Arc<dyn PlatformObserver>>,
}

impl Platform {
    /// Builds a platform over a roster from the registration collaborator.
    /// Pre-assigned lot numbers must be unique; duplicates are a fatal
    /// integration error.
    pub fn new(
        name: impl Into<String>,
        mut roster: Vec<Lifter>,
        rules: CompetitionRules,
    ) -> Result<Self> {
        let mut seen = HashSet::new();
        for lifter in &roster {
            if let Some(lot) = lifter.lot_number {
                if !seen.insert(lot) {
                    return Err(RosterInconsistency::DuplicateLotNumber(lot).into());
                }
            }
        }
        lifting_order(&mut roster);
        Ok(Self {
            name: name.into(),
            state: Mutex::new(PlatformState {
                roster,
                rules,
                lots: LotAssigner::new(),
            }),
            observers: Vec::new(),
        })
    }

    /// Registers an output-port observer. Call before lifting starts.
    pub fn subscribe(&mut self, observer: Arc<dyn PlatformObserver>) {
        self.observers.push(observer);
    }

    /// Runs the one-time lot draw with the injected entropy source.
    pub fn draw_lots<R: Rng>(&self, rng: &mut R) -> Result<OrderChange> {
        let mut state = self.lock();
        let previous_head = head_id(&state.roster);
        let state = &mut *state;
        state.lots.assign_lot_numbers(&mut state.roster, rng)?;
        self.publish(state, previous_head, false, Vec::new())
    }

    /// Assigns printed-program start numbers; requires the lot draw.
    pub fn assign_start_numbers(&self) -> Result<()> {
        let mut state = self.lock();
        LotAssigner::assign_start_numbers(&mut state.roster)?;
        Ok(())
    }

    pub fn record_declaration(
        &self,
        lifter_id: Uuid,
        kind: LiftKind,
        number: u8,
        weight: Decimal,
    ) -> Result<OrderChange> {
        self.record_revision(lifter_id, kind, number, Revision::Declaration, weight)
    }

    pub fn record_change1(
        &self,
        lifter_id: Uuid,
        kind: LiftKind,
        number: u8,
        weight: Decimal,
    ) -> Result<OrderChange> {
        self.record_revision(lifter_id, kind, number, Revision::Change1, weight)
    }

    pub fn record_change2(
        &self,
        lifter_id: Uuid,
        kind: LiftKind,
        number: u8,
        weight: Decimal,
    ) -> Result<OrderChange> {
        self.record_revision(lifter_id, kind, number, Revision::Change2, weight)
    }

    fn record_revision(
        &self,
        lifter_id: Uuid,
        kind: LiftKind,
        number: u8,
        revision: Revision,
        weight: Decimal,
    ) -> Result<OrderChange> {
        let mut state = self.lock();
        let previous_head = head_id(&state.roster);
        let idx = index_of(&state.roster, lifter_id)?;

        if let Err(violation) =
            validate_declaration(&state.roster[idx], kind, number, revision, weight)
        {
            warn!(
                platform = %self.name,
                lifter = %state.roster[idx].last_name,
                %violation,
                "declaration rejected"
            );
            return Err(violation.into());
        }

        let slot = &mut state.roster[idx].slots_mut(kind)[usize::from(number) - 1];
        match revision {
            Revision::Declaration => slot.declaration = Some(weight),
            Revision::Change1 => slot.change1 = Some(weight),
            Revision::Change2 => slot.change2 = Some(weight),
        }
        info!(
            platform = %self.name,
            lifter = %state.roster[idx].last_name,
            kind = kind.label(),
            attempt = number,
            %weight,
            "declaration recorded"
        );

        let mut warnings = Vec::new();
        if let Some(violation) = check_qualifying_total(&state.roster[idx], &state.rules) {
            warn!(
                platform = %self.name,
                lifter = %state.roster[idx].last_name,
                %violation,
                "qualifying-total shortfall"
            );
            warnings.push(violation);
        }

        self.publish(&mut state, previous_head, false, warnings)
    }

    /// Records the outcome of the attempt on the bar. The signed weight
    /// keeps the card convention: positive for a good lift, negative for a
    /// miss. The timestamp comes from the caller's monotonic clock.
    pub fn record_actual_lift(
        &self,
        lifter_id: Uuid,
        kind: LiftKind,
        number: u8,
        signed_weight: Decimal,
        at: NaiveDateTime,
    ) -> Result<OrderChange> {
        let mut state = self.lock();
        let previous_head = head_id(&state.roster);
        let idx = index_of(&state.roster, lifter_id)?;

        let expected = state.roster[idx]
            .next_attempt(kind)
            .ok_or(RuleViolation::AttemptAlreadyTaken)?;
        if number != expected {
            return Err(RuleViolation::AttemptOutOfOrder {
                requested: number,
                expected,
            }
            .into());
        }

        let lifter = &mut state.roster[idx];
        lifter.slots_mut(kind)[usize::from(number) - 1].result = Some(LiftResult {
            weight: signed_weight,
            at,
        });
        // The override ends with the lift it was forcing.
        lifter.forced_as_current = false;
        info!(
            platform = %self.name,
            lifter = %lifter.last_name,
            kind = kind.label(),
            attempt = number,
            weight = %signed_weight,
            good = signed_weight > Decimal::ZERO,
            "attempt result recorded"
        );

        self.publish(&mut state, previous_head, false, Vec::new())
    }

    /// Terminal: the lifter never reappears in the active order.
    pub fn withdraw(&self, lifter_id: Uuid) -> Result<OrderChange> {
        let mut state = self.lock();
        let previous_head = head_id(&state.roster);
        let idx = index_of(&state.roster, lifter_id)?;
        state.roster[idx].withdrawn = true;
        state.roster[idx].forced_as_current = false;
        info!(platform = %self.name, lifter = %state.roster[idx].last_name, "withdrawn");
        self.publish(&mut state, previous_head, true, Vec::new())
    }

    /// Operator override: put a lifter at the head of the order until their
    /// next result is recorded or the override is revoked. Only one lifter
    /// holds the override at a time.
    pub fn force_as_current(&self, lifter_id: Uuid) -> Result<OrderChange> {
        let mut state = self.lock();
        let previous_head = head_id(&state.roster);
        let idx = index_of(&state.roster, lifter_id)?;
        for lifter in state.roster.iter_mut() {
            lifter.forced_as_current = false;
        }
        state.roster[idx].forced_as_current = true;
        info!(platform = %self.name, lifter = %state.roster[idx].last_name, "forced as current");
        self.publish(&mut state, previous_head, true, Vec::new())
    }

    pub fn clear_forced_as_current(&self, lifter_id: Uuid) -> Result<OrderChange> {
        let mut state = self.lock();
        let previous_head = head_id(&state.roster);
        let idx = index_of(&state.roster, lifter_id)?;
        state.roster[idx].forced_as_current = false;
        self.publish(&mut state, previous_head, true, Vec::new())
    }

    /// The lifter currently called to the bar.
    pub fn current_lifter(&self) -> Option<Lifter> {
        let state = self.lock();
        state.roster.first().filter(|l| l.is_active()).cloned()
    }

    /// A pulled snapshot of the full lifting order.
    pub fn lifting_order_snapshot(&self) -> Vec<Lifter> {
        // The roster is kept sorted by every command; the copy re-sorts
        // defensively in case it is taken before any command ran.
        lifting_order_copy(&self.lock().roster)
    }

    /// Interim or final classification of a snapshot.
    pub fn classification(&self, ranking: Ranking) -> Vec<Lifter> {
        let state = self.lock();
        classify(&state.roster, ranking, &state.rules)
    }

    /// Assigns category-scoped ranks in place and returns the classified
    /// order.
    pub fn assign_category_ranks(&self, ranking: Ranking) -> Vec<Lifter> {
        let mut state = self.lock();
        let state = &mut *state;
        assign_category_ranks(&mut state.roster, ranking, &state.rules);
        classify(&state.roster, ranking, &state.rules)
    }

    fn lock(&self) -> MutexGuard<'_, PlatformState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Resorts, rebuilds the published view, and notifies observers when
    /// the head moved or the command demands it. Runs under the lock.
    fn publish(
        &self,
        state: &mut PlatformState,
        previous_head: Option<Uuid>,
        always_notify: bool,
        warnings: Vec<RuleViolation>,
    ) -> Result<OrderChange> {
        lifting_order(&mut state.roster);
        let head = head_id(&state.roster);
        let head_changed = head != previous_head;
        if head_changed {
            debug!(platform = %self.name, "head of lifting order changed");
        }

        let change = OrderChange {
            order: state.roster.clone(),
            current: state.roster.first().filter(|l| l.is_active()).cloned(),
            head_changed,
            warnings,
        };
        if head_changed || always_notify {
            for observer in &self.observers {
                observer.order_changed(&change);
            }
        }
        Ok(change)
    }
}

fn head_id(roster: &[Lifter]) -> Option<Uuid> {
    roster.first().filter(|l| l.is_active()).map(|l| l.lifter_id)
}

fn index_of(roster: &[Lifter], lifter_id: Uuid) -> Result<usize> {
    roster
        .iter()
        .position(|l| l.lifter_id == lifter_id)
        .ok_or_else(|| EngineError::Roster(RosterInconsistency::UnknownLifter(lifter_id)))
}
