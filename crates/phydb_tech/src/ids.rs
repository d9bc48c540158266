//! Opaque ID newtypes for technology entities.
//!
//! Each ID equals the entity's 0-based registration order within its
//! registry in [`Tech`](crate::Tech).

use phydb_common::define_id;

define_id!(
    /// Opaque, copyable ID for a layer.
    LayerId
);

define_id!(
    /// Opaque, copyable ID for a macro (standard-cell or block master).
    MacroId
);

define_id!(
    /// Opaque, copyable ID for a pin of a macro, local to that macro.
    MacroPinId
);

define_id!(
    /// Opaque, copyable ID for a fixed LEF via.
    ViaId
);

define_id!(
    /// Opaque, copyable ID for a via-rule-generate.
    ViaRuleId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_of_different_kinds_are_distinct_types() {
        let layer = LayerId::from_raw(3);
        let via = ViaId::from_raw(3);
        assert_eq!(layer.as_raw(), via.as_raw());
        assert_eq!(format!("{layer}"), "3");
    }

    #[test]
    fn id_serde_roundtrip() {
        let id = MacroId::from_raw(12);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "12");
        let restored: MacroId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, restored);
    }
}
