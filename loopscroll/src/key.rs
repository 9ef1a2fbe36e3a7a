#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type Map<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type Map<K, V> = BTreeMap<K, V>;

/// Bound for element handles and template ids, which key the pool's maps.
#[cfg(feature = "std")]
pub trait MapKey: core::hash::Hash + Eq {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq> MapKey for K {}

#[cfg(not(feature = "std"))]
pub trait MapKey: Ord {}
#[cfg(not(feature = "std"))]
impl<K: Ord> MapKey for K {}
