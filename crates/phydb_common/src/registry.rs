//! Name-indexed entity registry with stable sequential IDs.
//!
//! A [`NamedRegistry`] stores entity records densely in insertion order and
//! keeps a `lasso` interner as its name index. Because the interner hands out
//! keys sequentially, the key of a name always equals the index of its record,
//! so the ID allocated by [`add`](NamedRegistry::add) is the entity's 0-based
//! insertion order. Records are never removed or renamed.
//!
//! References returned by `add`/`get_mut` borrow the registry mutably, so they
//! cannot outlive the next insertion. Callers that need a long-lived handle
//! keep the ID and look the record up again.

use crate::ids::EntityId;
use crate::result::{PhyDbError, PhyResult};
use lasso::Rodeo;
use std::fmt;
use std::marker::PhantomData;
use std::ops::Index;

/// Interner key for registry names; its index equals the record index.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
struct NameKey(u32);

// SAFETY: `NameKey` wraps a `u32` which is always a valid `usize` on 32-bit and
// 64-bit platforms. `try_from_usize` rejects values that don't fit in `u32`.
unsafe impl lasso::Key for NameKey {
    fn into_usize(self) -> usize {
        self.0 as usize
    }

    fn try_from_usize(int: usize) -> Option<Self> {
        u32::try_from(int).ok().map(NameKey)
    }
}

/// A uniqueness-enforced store of named entities.
///
/// `I` is the ID type handed out for each entity, `T` the record type. The
/// `kind` label (e.g. `"layer"`) is used in errors and log events.
pub struct NamedRegistry<I: EntityId, T> {
    kind: &'static str,
    items: Vec<T>,
    names: Rodeo<NameKey>,
    _marker: PhantomData<I>,
}

impl<I: EntityId, T> NamedRegistry<I, T> {
    /// Creates an empty registry for entities of the given kind.
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            items: Vec::new(),
            names: Rodeo::new(),
            _marker: PhantomData,
        }
    }

    /// Returns the entity kind label of this registry.
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Returns `true` if an entity with this name is registered.
    pub fn exists(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Registers a new entity and returns a mutable reference to its record.
    ///
    /// `make` receives the freshly allocated ID and builds the record. The
    /// name index and the record storage are updated together; nothing is
    /// touched when the name is already registered.
    pub fn add(&mut self, name: &str, make: impl FnOnce(I) -> T) -> PhyResult<&mut T> {
        if self.exists(name) {
            return Err(PhyDbError::DuplicateName {
                kind: self.kind,
                name: name.to_string(),
            });
        }
        let raw = u32::try_from(self.items.len()).map_err(|_| PhyDbError::IdOutOfRange {
            kind: self.kind,
            id: u32::MAX,
            len: self.items.len(),
        })?;
        let id = I::from_raw(raw);
        let item = make(id);
        let key = self.names.get_or_intern(name);
        debug_assert_eq!(key.0, raw, "name index out of sync with records");
        self.items.push(item);
        tracing::debug!(kind = self.kind, name, id = raw, "registered entity");
        Ok(&mut self.items[raw as usize])
    }

    /// Returns the record registered under `name`.
    pub fn get(&self, name: &str) -> PhyResult<&T> {
        let id = self.require(name)?;
        Ok(&self.items[id.as_raw() as usize])
    }

    /// Returns a mutable reference to the record registered under `name`.
    pub fn get_mut(&mut self, name: &str) -> PhyResult<&mut T> {
        let id = self.require(name)?;
        Ok(&mut self.items[id.as_raw() as usize])
    }

    /// Returns the ID of `name`, or `None` if it is not registered.
    pub fn id_of(&self, name: &str) -> Option<I> {
        self.names.get(name).map(|key| I::from_raw(key.0))
    }

    /// Returns the name registered under `id`.
    pub fn name_of(&self, id: I) -> PhyResult<&str> {
        self.names
            .try_resolve(&NameKey(id.as_raw()))
            .ok_or(PhyDbError::IdOutOfRange {
                kind: self.kind,
                id: id.as_raw(),
                len: self.items.len(),
            })
    }

    /// Returns the record with the given ID, or `None` if it is out of range.
    pub fn by_id(&self, id: I) -> Option<&T> {
        self.items.get(id.as_raw() as usize)
    }

    /// Returns a mutable reference to the record with the given ID.
    pub fn by_id_mut(&mut self, id: I) -> Option<&mut T> {
        self.items.get_mut(id.as_raw() as usize)
    }

    /// Returns the number of registered entities.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over `(ID, &T)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (I::from_raw(i as u32), item))
    }

    /// Iterates over records in registration order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    fn require(&self, name: &str) -> PhyResult<I> {
        self.id_of(name).ok_or_else(|| PhyDbError::UnknownName {
            kind: self.kind,
            name: name.to_string(),
        })
    }
}

impl<I: EntityId, T> Index<I> for NamedRegistry<I, T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if the ID was not allocated by this registry.
    fn index(&self, id: I) -> &T {
        &self.items[id.as_raw() as usize]
    }
}

impl<I: EntityId, T: fmt::Debug> fmt::Debug for NamedRegistry<I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedRegistry")
            .field("kind", &self.kind)
            .field("items", &self.items)
            .finish()
    }
}
