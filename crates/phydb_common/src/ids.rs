//! Opaque ID newtypes shared by every database crate.
//!
//! [`define_id!`] generates a thin `u32` wrapper that is `Copy`, `Hash`,
//! `Ord`, and `Serialize`/`Deserialize`, and implements [`EntityId`] so it can
//! key a [`NamedRegistry`](crate::NamedRegistry).

/// Trait for opaque ID types allocated by a registry.
///
/// Implementors must provide a bijection between `u32` indices and the ID type.
pub trait EntityId: Copy {
    /// Creates an ID from a raw `u32` index.
    fn from_raw(index: u32) -> Self;

    /// Returns the raw `u32` index.
    fn as_raw(self) -> u32;
}

/// Defines a `u32` ID newtype implementing [`EntityId`].
///
/// The invoking crate must depend on `serde` with the `derive` feature.
#[macro_export]
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        pub struct $name(u32);

        impl $name {
            /// Creates an ID from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }
        }

        impl $crate::EntityId for $name {
            fn from_raw(index: u32) -> Self {
                Self(index)
            }

            fn as_raw(self) -> u32 {
                self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}
