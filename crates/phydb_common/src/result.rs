//! Common result and error types for the physical-design database.

/// The standard result type for operations that can hit a fatal precondition.
///
/// `Err` never describes bad input data that a caller should retry with. It
/// signals a defect in the producer that feeds the database (a duplicate
/// registration, a broken path) or in the external timing engine (a pointer
/// the database never saw). Expected absences are reported through `Option`
/// or `bool` instead.
pub type PhyResult<T> = Result<T, PhyDbError>;

/// A fatal precondition violation detected by the database.
///
/// The operation that returns one of these is aborted; depending on the
/// operation, the data structure it was applied to is left unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PhyDbError {
    /// A name was registered twice in the same registry.
    #[error("{kind} '{name}' is already registered")]
    DuplicateName {
        /// The kind of entity (e.g. "layer", "macro").
        kind: &'static str,
        /// The duplicated name.
        name: String,
    },

    /// A name lookup that requires the entity to exist found nothing.
    #[error("{kind} '{name}' does not exist")]
    UnknownName {
        /// The kind of entity.
        kind: &'static str,
        /// The missing name.
        name: String,
    },

    /// An entity ID is outside the range allocated by its registry.
    #[error("{kind} id {id} is out of range ({len} registered)")]
    IdOutOfRange {
        /// The kind of entity.
        kind: &'static str,
        /// The offending raw ID.
        id: u32,
        /// The number of entities in the registry.
        len: usize,
    },

    /// A pin key was inserted twice into a pin-keyed store.
    #[error("pin {pin} is already present in {context}")]
    DuplicatePin {
        /// The pin, formatted as `(comp, pin)`.
        pin: String,
        /// The store that rejected the pin (e.g. "timing DAG").
        context: &'static str,
    },

    /// A pin-keyed lookup that requires the pin to exist found nothing.
    #[error("pin {pin} is not present in {context}")]
    UnknownPin {
        /// The pin, formatted as `(comp, pin)`.
        pin: String,
        /// The store that was searched.
        context: &'static str,
    },

    /// The unmapped sentinel pin was used where a real pin is required.
    #[error("the unmapped sentinel pin cannot be used as a real pin")]
    ReservedPin,

    /// An edge re-added for an existing (node, target) pair disagrees with the stored edge.
    #[error(
        "inconsistent timing edge {from} -> {to}: stored net {stored_net} delay {stored_delay}, \
         new net {net} delay {delay}"
    )]
    InconsistentEdge {
        /// The node the edge leaves.
        from: String,
        /// The edge target.
        to: String,
        /// The net ID already stored on the edge.
        stored_net: u32,
        /// The delay already stored on the edge.
        stored_delay: f64,
        /// The net ID carried by the rejected edge.
        net: u32,
        /// The delay carried by the rejected edge.
        delay: f64,
    },

    /// A path hop does not start where the previous hop ended.
    #[error("path hop starts at {found} but the previous hop ends at {expected}")]
    DiscontinuousPath {
        /// The target of the previous hop.
        expected: String,
        /// The source of the rejected hop.
        found: String,
    },

    /// The replayed paths formed a cycle, so the graph is not a DAG.
    #[error("timing graph contains a cycle through pin {pin}")]
    CyclicDag {
        /// A pin on the cycle.
        pin: String,
    },

    /// A foreign pointer was registered twice.
    #[error("{kind} pointer {ptr:#x} is already registered")]
    DuplicatePointer {
        /// "net" or "pin".
        kind: &'static str,
        /// The pointer bit pattern.
        ptr: u64,
    },

    /// An internal identity was bound to a second foreign pointer.
    #[error("{kind} {identity} is already bound to pointer {ptr:#x}")]
    DuplicateIdentity {
        /// "net" or "pin".
        kind: &'static str,
        /// The internal identity (net ID or pin).
        identity: String,
        /// The pointer the identity is already bound to.
        ptr: u64,
    },

    /// The null pointer was used as a registration key.
    #[error("cannot register a null {kind} pointer")]
    NullPointer {
        /// "net" or "pin".
        kind: &'static str,
    },

    /// A foreign edge references a pointer the database never registered.
    #[error("{kind} pointer {ptr:#x} in hop {hop} is not registered")]
    UnregisteredPointer {
        /// "source pin", "target pin" or "net".
        kind: &'static str,
        /// The pointer bit pattern.
        ptr: u64,
        /// Index of the offending hop.
        hop: usize,
    },

    /// A timing edge carries a negative (or NaN) delay.
    #[error("hop {hop} has invalid delay {delay}")]
    NegativeDelay {
        /// The offending delay.
        delay: f64,
        /// Index of the offending hop (or out edge, for a single node).
        hop: usize,
    },

    /// A timing edge carries an occurrence count of zero.
    #[error("hop {hop} has a zero occurrence count")]
    ZeroEdgeCount {
        /// Index of the offending hop (or out edge, for a single node).
        hop: usize,
    },

    /// Merging an edge would overflow its occurrence count.
    #[error("occurrence count of timing edge {from} -> {to} overflows: {stored} + {added}")]
    EdgeCountOverflow {
        /// The node the edge leaves.
        from: String,
        /// The edge target.
        to: String,
        /// The count already stored.
        stored: u32,
        /// The count being merged in.
        added: u32,
    },

    /// A deserialized path is not a well-formed hop chain.
    #[error("malformed path: {reason}")]
    MalformedPath {
        /// What is wrong with the path.
        reason: &'static str,
    },

    /// A timing-engine callback slot was never populated.
    #[error("callback for {0} is not set")]
    MissingCallback(&'static str),

    /// A timing-engine callback slot was populated twice.
    #[error("callback for {0} is already set")]
    CallbackAlreadySet(&'static str),

    /// The external engine or provider broke its return contract.
    #[error("external engine contract violated: {0}")]
    EngineContract(String),

    /// A set-once technology parameter was set again with a different value.
    #[error("{setting} is already set")]
    SettingAlreadySet {
        /// The parameter name.
        setting: &'static str,
    },

    /// A technology parameter value is outside its valid range.
    #[error("invalid {setting}: {reason}")]
    InvalidSetting {
        /// The parameter name.
        setting: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// An optional capability was used without being configured.
    #[error("{0} is not available in this configuration")]
    CapabilityUnavailable(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_count_overflow() {
        let err = PhyDbError::EdgeCountOverflow {
            from: "(0, 0)".into(),
            to: "(1, 0)".into(),
            stored: u32::MAX,
            added: 1,
        };
        assert_eq!(
            format!("{err}"),
            "occurrence count of timing edge (0, 0) -> (1, 0) overflows: 4294967295 + 1"
        );
    }

    #[test]
    fn display_duplicate_name() {
        let err = PhyDbError::DuplicateName {
            kind: "layer",
            name: "metal1".into(),
        };
        assert_eq!(format!("{err}"), "layer 'metal1' is already registered");
    }

    #[test]
    fn display_pointer_in_hex() {
        let err = PhyDbError::UnregisteredPointer {
            kind: "net",
            ptr: 0xdead_beef,
            hop: 2,
        };
        assert_eq!(
            format!("{err}"),
            "net pointer 0xdeadbeef in hop 2 is not registered"
        );
    }

    #[test]
    fn display_missing_callback() {
        let err = PhyDbError::MissingCallback("get_slack");
        assert_eq!(format!("{err}"), "callback for get_slack is not set");
    }

    #[test]
    fn ok_path() {
        let r: PhyResult<i32> = Ok(42);
        assert_eq!(r.ok(), Some(42));
    }

    #[test]
    fn errors_compare_by_value() {
        let a = PhyDbError::NegativeDelay {
            delay: -1.0,
            hop: 0,
        };
        let b = PhyDbError::NegativeDelay {
            delay: -1.0,
            hop: 0,
        };
        assert_eq!(a, b);
        assert_ne!(a, PhyDbError::ReservedPin);
    }
}
