use crate::components::{ComponentId, ComponentSet};
use crate::entities::{Entity, EntityManager};
use std::marker::PhantomData;
use std::sync::Arc;

/// Decides whether an [entity](Entity) belongs to a system's watched set.
///
/// Validators must be pure: no side effects and no per-entity state.
pub trait Validator {
	fn is_valid(&self, entity: Entity, entities: &EntityManager) -> bool;
}

/// Accepts entities carrying at least one component of every type in `S`.
pub struct HasComponents<S: ComponentSet> {
	ids: Arc<[ComponentId]>,
	phantom: PhantomData<fn() -> S>,
}

impl<S: ComponentSet> HasComponents<S> {
	pub fn new() -> Self {
		Self {
			ids: S::component_ids(),
			phantom: PhantomData,
		}
	}
}

impl<S: ComponentSet> Default for HasComponents<S> {
	fn default() -> Self {
		Self::new()
	}
}

impl<S: ComponentSet> Validator for HasComponents<S> {
	fn is_valid(&self, entity: Entity, entities: &EntityManager) -> bool {
		self.ids.iter().all(|id| entities.has_component_id(entity, *id))
	}
}

/// Accepts entities carrying none of the component types in `S`.
pub struct ExcludesComponents<S: ComponentSet> {
	ids: Arc<[ComponentId]>,
	phantom: PhantomData<fn() -> S>,
}

impl<S: ComponentSet> ExcludesComponents<S> {
	pub fn new() -> Self {
		Self {
			ids: S::component_ids(),
			phantom: PhantomData,
		}
	}
}

impl<S: ComponentSet> Default for ExcludesComponents<S> {
	fn default() -> Self {
		Self::new()
	}
}

impl<S: ComponentSet> Validator for ExcludesComponents<S> {
	fn is_valid(&self, entity: Entity, entities: &EntityManager) -> bool {
		!self.ids.iter().any(|id| entities.has_component_id(entity, *id))
	}
}

/// Wraps a closure into a [Validator].
pub struct FnValidator<F> {
	predicate: F,
}

impl<F: Fn(Entity, &EntityManager) -> bool> FnValidator<F> {
	pub fn new(predicate: F) -> Self {
		Self { predicate }
	}
}

impl<F: Fn(Entity, &EntityManager) -> bool> Validator for FnValidator<F> {
	fn is_valid(&self, entity: Entity, entities: &EntityManager) -> bool {
		(self.predicate)(entity, entities)
	}
}
