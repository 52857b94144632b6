use crate::components::{AnyComponent, Component};

/// A set of components to be attached to a new [entity](crate::entities::Entity) in one step.
///
/// Bundles travel inside [EntityCreationRequested](crate::events::Event::EntityCreationRequested) events.
/// Each component instance can only be attached once: publishing the same bundle twice
/// yields a second entity without components.
#[derive(Clone, Debug, Default)]
pub struct EntityBundle {
	components: Vec<AnyComponent>,
}

impl EntityBundle {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with<T: Component>(mut self, component: T) -> Self {
		self.components.push(AnyComponent::new(component));
		self
	}

	pub fn with_any(mut self, component: AnyComponent) -> Self {
		self.components.push(component);
		self
	}

	pub fn push<T: Component>(&mut self, component: T) {
		self.components.push(AnyComponent::new(component));
	}

	pub fn components(&self) -> &[AnyComponent] {
		&self.components
	}

	pub fn len(&self) -> usize {
		self.components.len()
	}

	pub fn is_empty(&self) -> bool {
		self.components.is_empty()
	}
}

impl FromIterator<AnyComponent> for EntityBundle {
	fn from_iter<I: IntoIterator<Item = AnyComponent>>(iter: I) -> Self {
		Self {
			components: iter.into_iter().collect(),
		}
	}
}
