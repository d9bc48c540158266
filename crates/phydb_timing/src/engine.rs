//! The external timing engine seam.
//!
//! The database never computes timing itself. A host integration implements
//! [`TimingEngine`] (directly, or by wiring closures into a
//! [`CallbackEngineBuilder`]) and hands it to
//! [`TimingApi`](crate::api::TimingApi) at construction. Every call is a
//! synchronous call-through that blocks until the engine returns.

use crate::foreign::ForeignEdge;
use crate::ids::ConstraintId;
use phydb_common::{PhyDbError, PhyResult};
use std::fmt;

/// The raw fast and slow witness paths of one constraint, in engine terms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Witness {
    /// Edges of the fastest path through the constraint.
    pub fast_path: Vec<ForeignEdge>,
    /// Edges of the slowest path through the constraint.
    pub slow_path: Vec<ForeignEdge>,
}

/// Operations the database requires from an external timing engine.
pub trait TimingEngine {
    /// Returns the number of timing constraints the engine knows about.
    fn constraint_count(&mut self) -> usize;

    /// Recomputes timing incrementally after the design changed.
    fn update_timing_incremental(&mut self);

    /// Returns one slack per requested constraint, in request order.
    fn slack(&mut self, constraints: &[ConstraintId]) -> Vec<f64>;

    /// Returns the witness paths explaining the slack of `constraint`.
    fn witness(&mut self, constraint: ConstraintId) -> Witness;

    /// Returns the currently violated constraints.
    fn violated_constraints(&mut self) -> Vec<ConstraintId>;
}

type CountFn = Box<dyn FnMut() -> usize>;
type UpdateFn = Box<dyn FnMut()>;
type SlackFn = Box<dyn FnMut(&[ConstraintId]) -> Vec<f64>>;
type WitnessFn = Box<dyn FnMut(ConstraintId) -> Witness>;
type ViolatedFn = Box<dyn FnMut() -> Vec<ConstraintId>>;

/// A [`TimingEngine`] assembled from five host closures.
///
/// Only obtainable from [`CallbackEngineBuilder::build`], so every slot is
/// always populated.
pub struct CallbackEngine {
    count: CountFn,
    update: UpdateFn,
    slack: SlackFn,
    witness: WitnessFn,
    violated: ViolatedFn,
}

impl CallbackEngine {
    /// Starts wiring a new callback engine.
    pub fn builder() -> CallbackEngineBuilder {
        CallbackEngineBuilder::default()
    }
}

impl fmt::Debug for CallbackEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackEngine").finish_non_exhaustive()
    }
}

impl TimingEngine for CallbackEngine {
    fn constraint_count(&mut self) -> usize {
        (self.count)()
    }

    fn update_timing_incremental(&mut self) {
        (self.update)()
    }

    fn slack(&mut self, constraints: &[ConstraintId]) -> Vec<f64> {
        (self.slack)(constraints)
    }

    fn witness(&mut self, constraint: ConstraintId) -> Witness {
        (self.witness)(constraint)
    }

    fn violated_constraints(&mut self) -> Vec<ConstraintId> {
        (self.violated)()
    }
}

/// Set-once slots for the five [`CallbackEngine`] closures.
#[derive(Default)]
pub struct CallbackEngineBuilder {
    count: Option<CountFn>,
    update: Option<UpdateFn>,
    slack: Option<SlackFn>,
    witness: Option<WitnessFn>,
    violated: Option<ViolatedFn>,
}

fn fill<F>(slot: &mut Option<F>, name: &'static str, f: F) -> PhyResult<()> {
    if slot.is_some() {
        return Err(PhyDbError::CallbackAlreadySet(name));
    }
    *slot = Some(f);
    Ok(())
}

fn take<F>(slot: Option<F>, name: &'static str) -> PhyResult<F> {
    slot.ok_or(PhyDbError::MissingCallback(name))
}

impl CallbackEngineBuilder {
    /// Sets the constraint-count callback.
    pub fn constraint_count(&mut self, f: impl FnMut() -> usize + 'static) -> PhyResult<&mut Self> {
        fill(&mut self.count, "constraint_count", Box::new(f) as CountFn)?;
        Ok(self)
    }

    /// Sets the incremental-update callback.
    pub fn update_timing_incremental(&mut self, f: impl FnMut() + 'static) -> PhyResult<&mut Self> {
        fill(&mut self.update, "update_timing_incremental", Box::new(f) as UpdateFn)?;
        Ok(self)
    }

    /// Sets the batch slack callback.
    pub fn slack(
        &mut self,
        f: impl FnMut(&[ConstraintId]) -> Vec<f64> + 'static,
    ) -> PhyResult<&mut Self> {
        fill(&mut self.slack, "slack", Box::new(f) as SlackFn)?;
        Ok(self)
    }

    /// Sets the witness callback.
    pub fn witness(&mut self, f: impl FnMut(ConstraintId) -> Witness + 'static) -> PhyResult<&mut Self> {
        fill(&mut self.witness, "witness", Box::new(f) as WitnessFn)?;
        Ok(self)
    }

    /// Sets the violated-constraints callback.
    pub fn violated_constraints(
        &mut self,
        f: impl FnMut() -> Vec<ConstraintId> + 'static,
    ) -> PhyResult<&mut Self> {
        fill(&mut self.violated, "violated_constraints", Box::new(f) as ViolatedFn)?;
        Ok(self)
    }

    /// Assembles the engine; every slot must be set.
    pub fn build(self) -> PhyResult<CallbackEngine> {
        Ok(CallbackEngine {
            count: take(self.count, "constraint_count")?,
            update: take(self.update, "update_timing_incremental")?,
            slack: take(self.slack, "slack")?,
            witness: take(self.witness, "witness")?,
            violated: take(self.violated, "violated_constraints")?,
        })
    }
}

impl fmt::Debug for CallbackEngineBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackEngineBuilder")
            .field("constraint_count", &self.count.is_some())
            .field("update_timing_incremental", &self.update.is_some())
            .field("slack", &self.slack.is_some())
            .field("witness", &self.witness.is_some())
            .field("violated_constraints", &self.violated.is_some())
            .finish()
    }
}
