use crate::components::{Component, ComponentId, ComponentType};
use std::cell::{Cell, Ref, RefCell, RefMut};
use crate::entities::Entity;
use std::any::Any;
use std::rc::Rc;
use std::fmt;

/// Object-safe view over a `RefCell<T: Component>`.
trait ErasedComponent {
	fn attach(&self, entity: Entity);
	fn detach(&self, entity: Entity);
	fn into_any(self: Rc<Self>) -> Rc<dyn Any>;
}

impl<T: Component> ErasedComponent for RefCell<T> {
	fn attach(&self, entity: Entity) {
		match self.try_borrow_mut() {
			Ok(mut value) => value.on_attach(entity),
			Err(_) => tracing::warn!(%entity, component = std::any::type_name::<T>(), "component borrowed, on_attach skipped"),
		}
	}

	fn detach(&self, entity: Entity) {
		match self.try_borrow_mut() {
			Ok(mut value) => value.on_detach(entity),
			Err(_) => tracing::warn!(%entity, component = std::any::type_name::<T>(), "component borrowed, on_detach skipped"),
		}
	}

	fn into_any(self: Rc<Self>) -> Rc<dyn Any> {
		self
	}
}

struct ComponentSlot {
	ty: ComponentType,
	entity: Cell<Option<Entity>>,
	value: Rc<dyn ErasedComponent>,
}

/// A type-erased handle to a component instance.
///
/// Handles are shared views: cloning one never copies the component.
/// The owning entity can only be changed by the [EntityManager](crate::entities::EntityManager).
#[derive(Clone)]
pub struct AnyComponent {
	slot: Rc<ComponentSlot>,
}

impl AnyComponent {
	/// Wraps a component so it can be attached or bundled.
	pub fn new<T: Component>(value: T) -> Self {
		Self {
			slot: Rc::new(ComponentSlot {
				ty: ComponentType::of::<T>(),
				entity: Cell::new(None),
				value: Rc::new(RefCell::new(value)),
			}),
		}
	}

	#[inline(always)]
	pub fn component_type(&self) -> ComponentType {
		self.slot.ty
	}

	#[inline(always)]
	pub fn id(&self) -> ComponentId {
		self.slot.ty.id()
	}

	#[inline(always)]
	pub fn priority(&self) -> i32 {
		self.slot.ty.priority()
	}

	/// The entity currently owning this component, if it is stored in a registry.
	#[inline(always)]
	pub fn entity(&self) -> Option<Entity> {
		self.slot.entity.get()
	}

	#[inline(always)]
	pub fn is_attached(&self) -> bool {
		self.slot.entity.get().is_some()
	}

	/// Whether both handles point at the same component instance.
	pub fn ptr_eq(&self, other: &AnyComponent) -> bool {
		Rc::ptr_eq(&self.slot, &other.slot)
	}

	/// Recovers a typed handle. Returns `None` if the component is not a `T`.
	pub fn downcast<T: Component>(&self) -> Option<ComponentRef<T>> {
		if self.id() != T::component_id() {
			return None;
		}

		let value = self.slot.value.clone().into_any().downcast::<RefCell<T>>().ok()?;
		Some(ComponentRef {
			slot: self.slot.clone(),
			value,
		})
	}

	pub(crate) fn bind(&self, entity: Entity) {
		self.slot.entity.set(Some(entity));
	}

	pub(crate) fn unbind(&self) {
		self.slot.entity.set(None);
	}

	pub(crate) fn on_attach(&self, entity: Entity) {
		self.slot.value.attach(entity);
	}

	pub(crate) fn on_detach(&self, entity: Entity) {
		self.slot.value.detach(entity);
	}
}

impl fmt::Debug for AnyComponent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AnyComponent")
			.field("type", &self.id())
			.field("entity", &self.entity())
			.finish()
	}
}

/// A typed handle to a component instance.
pub struct ComponentRef<T: Component> {
	slot: Rc<ComponentSlot>,
	value: Rc<RefCell<T>>,
}

impl<T: Component> ComponentRef<T> {
	/// The entity currently owning this component, if it is stored in a registry.
	#[inline(always)]
	pub fn entity(&self) -> Option<Entity> {
		self.slot.entity.get()
	}

	/// Immutably borrows the component.
	///
	/// # Panics
	/// Panics if the component is currently mutably borrowed.
	#[inline(always)]
	pub fn borrow(&self) -> Ref<'_, T> {
		self.value.borrow()
	}

	/// Mutably borrows the component.
	///
	/// # Panics
	/// Panics if the component is currently borrowed.
	#[inline(always)]
	pub fn borrow_mut(&self) -> RefMut<'_, T> {
		self.value.borrow_mut()
	}

	/// Erases the type of the handle.
	pub fn as_any(&self) -> AnyComponent {
		AnyComponent { slot: self.slot.clone() }
	}
}

impl<T: Component> Clone for ComponentRef<T> {
	fn clone(&self) -> Self {
		Self {
			slot: self.slot.clone(),
			value: self.value.clone(),
		}
	}
}

impl<T: Component + fmt::Debug> fmt::Debug for ComponentRef<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ComponentRef")
			.field("entity", &self.entity())
			.field("value", &self.value)
			.finish()
	}
}
