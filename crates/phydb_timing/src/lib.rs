//! Timing exchange between the physical-design database and an external
//! timing engine.
//!
//! The external engine reports timing paths as lists of arcs between its own
//! pin and net objects. This crate maps those foreign pointers to design
//! identities ([`Pin`]s and [`NetId`]s), translates the arcs into contiguous
//! [`Path`]s, and folds paths into a shared [`TimingDag`].
//!
//! # Usage
//!
//! ```
//! use phydb_timing::{translate_path, ForeignEdge, ForeignPtr, NetId, Path, Pin, PointerBridge};
//!
//! let (a, b, n1) = (ForeignPtr::from_raw(0xa), ForeignPtr::from_raw(0xb), ForeignPtr::from_raw(0x1));
//! let mut bridge = PointerBridge::new();
//! bridge.register_pin(a, Pin::new(0, 0)).unwrap();
//! bridge.register_pin(b, Pin::new(1, 2)).unwrap();
//! bridge.register_net(n1, NetId::from_raw(7)).unwrap();
//!
//! let mut path = Path::new();
//! translate_path(&bridge, &[ForeignEdge::new(a, b, n1, 0.35)], &mut path).unwrap();
//! assert_eq!(path.root(), Some(Pin::new(0, 0)));
//! assert_eq!(path.edges()[0].net, NetId::from_raw(7));
//! ```
//!
//! # Architecture
//!
//! - [`pin`], [`path`], [`graph`]: pin identity, edges, nodes, paths, and the DAG
//! - [`foreign`], [`bridge`], [`translate`]: foreign pointers and their translation
//! - [`engine`], [`api`]: the injected engine and the call-through bridge
//! - [`parasitics`]: optional electrical-model capability

#![warn(missing_docs)]

pub mod api;
pub mod bridge;
pub mod engine;
pub mod foreign;
pub mod graph;
pub mod ids;
pub mod parasitics;
pub mod path;
pub mod pin;
pub mod translate;

pub use api::{TimingApi, WitnessPaths};
pub use bridge::PointerBridge;
pub use engine::{CallbackEngine, CallbackEngineBuilder, TimingEngine, Witness};
pub use foreign::{ForeignEdge, ForeignPtr};
pub use graph::{TimingDag, TimingEdge, TimingNode};
pub use ids::{ConstraintId, NetId, TimingNodeId};
pub use parasitics::{ExternalNode, ParasiticsProvider};
pub use path::Path;
pub use pin::Pin;
pub use translate::translate_path;
