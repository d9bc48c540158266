//! Translation of foreign edge lists into internal [`Path`]s.

use crate::bridge::PointerBridge;
use crate::foreign::{ForeignEdge, ForeignPtr};
use crate::path::Path;
use crate::pin::Pin;
use phydb_common::{PhyDbError, PhyResult};

/// Translates an ordered list of foreign edges into `out`.
///
/// `out` is cleared first. Every pointer of every edge must already be
/// registered in `bridge` and every delay must be non-negative; the edges
/// must also form a contiguous chain. Each hop is appended with a count of 1.
///
/// On failure `out` is left empty.
pub fn translate_path(
    bridge: &PointerBridge,
    edges: &[ForeignEdge],
    out: &mut Path,
) -> PhyResult<()> {
    out.clear();
    let mut path = Path::new();
    for (hop, edge) in edges.iter().enumerate() {
        let source = resolve_pin(bridge, edge.source, "source pin", hop)?;
        let target = resolve_pin(bridge, edge.target, "target pin", hop)?;
        let net = bridge
            .net_id_of(edge.net)
            .ok_or_else(|| unregistered("net", edge.net, hop))?;
        path.add_edge(source, target, net, edge.delay, 1)?;
        tracing::trace!(hop, %source, %target, net = net.as_raw(), delay = edge.delay, "translated hop");
    }
    *out = path;
    Ok(())
}

fn resolve_pin(
    bridge: &PointerBridge,
    ptr: ForeignPtr,
    kind: &'static str,
    hop: usize,
) -> PhyResult<Pin> {
    bridge.pin_of(ptr).ok_or_else(|| unregistered(kind, ptr, hop))
}

fn unregistered(kind: &'static str, ptr: ForeignPtr, hop: usize) -> PhyDbError {
    PhyDbError::UnregisteredPointer {
        kind,
        ptr: ptr.as_raw(),
        hop,
    }
}
