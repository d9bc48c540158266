//! The timing-engine bridge.
//!
//! [`TimingApi`] owns the injected [`TimingEngine`], the [`PointerBridge`]
//! used to translate the engine's pointers, and a [`TimingDag`] into which
//! witness paths can be folded.

use crate::bridge::PointerBridge;
use crate::engine::TimingEngine;
use crate::foreign::ForeignEdge;
use crate::graph::TimingDag;
use crate::ids::ConstraintId;
use crate::parasitics::{ExternalNode, ParasiticsProvider};
use crate::path::Path;
use crate::pin::Pin;
use crate::translate;
use phydb_common::{PhyDbError, PhyResult};
use std::fmt;

/// Translated fast and slow witness paths of one constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WitnessPaths {
    /// The fastest path.
    pub fast: Path,
    /// The slowest path.
    pub slow: Path,
}

/// Synchronous call-through to an external timing engine.
pub struct TimingApi<E: TimingEngine> {
    engine: E,
    bridge: PointerBridge,
    dag: TimingDag,
    parasitics: Option<Box<dyn ParasiticsProvider>>,
}

impl<E: TimingEngine> TimingApi<E> {
    /// Creates a bridge around `engine` with empty pointer maps and DAG.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            bridge: PointerBridge::new(),
            dag: TimingDag::new(),
            parasitics: None,
        }
    }

    /// Plugs in a parasitics provider.
    pub fn with_parasitics(mut self, provider: impl ParasiticsProvider + 'static) -> Self {
        self.parasitics = Some(Box::new(provider));
        self
    }

    /// Returns `true` if a parasitics provider is plugged in.
    pub fn has_parasitics(&self) -> bool {
        self.parasitics.is_some()
    }

    /// Returns the injected engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Returns the injected engine mutably.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Returns the pointer bridge.
    pub fn bridge(&self) -> &PointerBridge {
        &self.bridge
    }

    /// Returns the pointer bridge mutably, for registrations.
    pub fn bridge_mut(&mut self) -> &mut PointerBridge {
        &mut self.bridge
    }

    /// Returns the timing DAG.
    pub fn dag(&self) -> &TimingDag {
        &self.dag
    }

    /// Returns the timing DAG mutably.
    pub fn dag_mut(&mut self) -> &mut TimingDag {
        &mut self.dag
    }

    /// Returns the number of constraints known to the engine.
    pub fn constraint_count(&mut self) -> usize {
        self.engine.constraint_count()
    }

    /// Asks the engine to recompute timing incrementally.
    pub fn update_timing_incremental(&mut self) {
        tracing::debug!("incremental timing update");
        self.engine.update_timing_incremental();
    }

    /// Returns the slack of a single constraint.
    pub fn slack(&mut self, constraint: ConstraintId) -> PhyResult<f64> {
        let slacks = self.slacks(&[constraint])?;
        Ok(slacks[0])
    }

    /// Returns one slack per constraint, in request order.
    ///
    /// Fails with [`PhyDbError::EngineContract`] if the engine returns a
    /// different number of values than requested.
    pub fn slacks(&mut self, constraints: &[ConstraintId]) -> PhyResult<Vec<f64>> {
        let slacks = self.engine.slack(constraints);
        if slacks.len() != constraints.len() {
            tracing::warn!(
                requested = constraints.len(),
                returned = slacks.len(),
                "timing engine returned wrong number of slacks"
            );
            return Err(PhyDbError::EngineContract(format!(
                "requested {} slacks, got {}",
                constraints.len(),
                slacks.len()
            )));
        }
        Ok(slacks)
    }

    /// Fetches and translates the witness paths of `constraint`.
    pub fn witness(&mut self, constraint: ConstraintId) -> PhyResult<WitnessPaths> {
        let raw = self.engine.witness(constraint);
        let mut paths = WitnessPaths::default();
        translate::translate_path(&self.bridge, &raw.fast_path, &mut paths.fast)?;
        translate::translate_path(&self.bridge, &raw.slow_path, &mut paths.slow)?;
        Ok(paths)
    }

    /// Returns the constraints the engine reports as violated.
    pub fn violated_constraints(&mut self) -> Vec<ConstraintId> {
        self.engine.violated_constraints()
    }

    /// Translates foreign edges into `out` through this bridge's pointer maps.
    ///
    /// See [`translate_path`](crate::translate::translate_path).
    pub fn translate_path(&self, edges: &[ForeignEdge], out: &mut Path) -> PhyResult<()> {
        translate::translate_path(&self.bridge, edges, out)
    }

    /// Folds the fast witness path of `constraint` into the owned DAG.
    pub fn add_witness_to_dag(&mut self, constraint: ConstraintId) -> PhyResult<()> {
        let paths = self.witness(constraint)?;
        self.dag.add_path(&paths.fast)?;
        tracing::debug!(
            constraint = constraint.as_raw(),
            hops = paths.fast.len(),
            "added witness to timing DAG"
        );
        Ok(())
    }

    /// Resolves `pin` to a node of the plugged-in parasitics model.
    pub fn pin_to_parasitic_node(&self, pin: Pin) -> PhyResult<ExternalNode> {
        let provider = self
            .parasitics
            .as_deref()
            .ok_or(PhyDbError::CapabilityUnavailable("parasitics"))?;
        let ptr = self.bridge.pin_ptr_of(pin).ok_or_else(|| PhyDbError::UnknownPin {
            pin: pin.to_string(),
            context: "pointer bridge",
        })?;
        provider.find_pin(ptr).ok_or_else(|| {
            tracing::warn!(%pin, %ptr, "parasitics provider has no node for pin");
            PhyDbError::EngineContract(format!("parasitics provider has no node for pin {pin}"))
        })
    }
}

impl<E: TimingEngine + fmt::Debug> fmt::Debug for TimingApi<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimingApi")
            .field("engine", &self.engine)
            .field("bridge", &self.bridge)
            .field("dag", &self.dag)
            .field("parasitics", &self.parasitics.is_some())
            .finish()
    }
}
