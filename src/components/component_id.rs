//! A unique runtime identifier tied to a [Component](crate::components::Component) type.
//!
//! Developers shouldn't rely on [component ids](ComponentId), as they are not stable between program re-runs.
//! [Component ids](ComponentId) are handed out in the order component types are first used,
//! and are the lookup key for every type-based query in the [EntityManager](crate::entities::EntityManager).

use crate::components::ComponentTypeInfo;
use lazy_static::lazy_static;
use parking_lot::RwLock;
use std::fmt;

lazy_static! {
	static ref NAMES: RwLock<Vec<&'static str>> = RwLock::new(Vec::default());
}

/// A globally unique identifier for a type implementing the [`Component`](crate::components::Component) trait.
#[derive(Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone)]
pub struct ComponentId {
	value: u32,
}

impl nohash_hasher::IsEnabled for ComponentId {}

impl ComponentId {
	/// Get the [ComponentId] of the type `T`.
	#[inline(always)]
	pub fn of<T: ComponentTypeInfo>() -> ComponentId {
		T::component_id()
	}

	#[inline(always)]
	pub const fn value(&self) -> u32 {
		self.value
	}

	/// The name of the type this id was generated for.
	pub fn name(&self) -> &'static str {
		NAMES.read().get(self.value as usize).copied().unwrap_or("<unregistered>")
	}
}

impl fmt::Debug for ComponentId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}#{}", self.name(), self.value)
	}
}

impl fmt::Display for ComponentId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Generates a new [ComponentId]. **Should not be called from user code.**
///
/// To be called from code generated by #\[derive(Component)], once per type.
#[doc(hidden)]
pub fn get_next(name: &'static str) -> ComponentId {
	let mut names = NAMES.write();
	let value = names.len();
	debug_assert!(
		value <= u32::MAX as usize,
		"This is an insane number of components. Please seek help."
	);

	names.push(name);
	tracing::debug!(component = name, id = value, "registered component type");
	ComponentId { value: value as u32 }
}
