use crate::components::{AnyComponent, Component, ComponentId, ComponentRef, ComponentTypeInfo};
use crate::events::{Event, EventBus, EventKind, EventListener, Sender};
use crate::entities::{Entity, EntityAllocator, EntityBundle};
use nohash_hasher::{IntMap, IntSet};
use crate::config::EcsConfig;
use tracing::{debug, trace, warn};
use std::cell::{Ref, RefCell};
use std::rc::Rc;

struct EntityState {
	allocator: EntityAllocator,
	active: IntSet<Entity>,
	removing: IntSet<Entity>,
	components: IntMap<Entity, Vec<AnyComponent>>,
	component_count: usize,
}

impl EntityState {
	fn components_of(&self, entity: Entity) -> &[AnyComponent] {
		self.components.get(&entity).map(Vec::as_slice).unwrap_or_default()
	}

	fn has_component_id(&self, entity: Entity, id: ComponentId) -> bool {
		self.components_of(entity).iter().any(|c| c.id() == id)
	}

	/// Whether `entity` is live and may take `component` without breaking its multiplicity.
	fn can_hold(&self, entity: Entity, component: &AnyComponent) -> bool {
		let ty = component.component_type();
		self.active.contains(&entity)
			&& !self.removing.contains(&entity)
			&& (ty.allow_multiple() || !self.has_component_id(entity, ty.id()))
	}

	fn detach(&mut self, entity: Entity, predicate: impl Fn(&AnyComponent) -> bool) -> Vec<AnyComponent> {
		let list = match self.components.get_mut(&entity) {
			None => return Vec::new(),
			Some(list) => list,
		};

		let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(list).into_iter().partition(|c| predicate(c));
		if kept.is_empty() {
			self.components.remove(&entity);
		} else {
			*list = kept;
		}

		self.component_count -= removed.len();
		removed
	}
}

/// The sole authority over entity existence and component attachment.
///
/// Every structural mutation is announced on the [EventBus] the manager was built with.
/// The store is never borrowed while an event is being dispatched, so listeners are free
/// to query and mutate the manager from within their notification.
///
/// Rejected mutations return *false*, and missing components yield `None` or an empty list:
/// none of the operations can fail in any other way.
pub struct EntityManager {
	bus: Rc<EventBus>,
	config: EcsConfig,
	state: RefCell<EntityState>,
}

impl EntityManager {
	/// Creates a manager publishing on `bus`, and subscribes it to the structural request events.
	pub fn new(bus: Rc<EventBus>, config: EcsConfig) -> Rc<Self> {
		let manager = Rc::new(Self {
			state: RefCell::new(EntityState {
				allocator: EntityAllocator::new(),
				active: IntSet::with_capacity_and_hasher(config.entity_capacity, Default::default()),
				removing: IntSet::default(),
				components: IntMap::with_capacity_and_hasher(config.component_capacity, Default::default()),
				component_count: 0,
			}),
			bus,
			config,
		});

		for kind in [
			EventKind::EntityCreationRequested,
			EventKind::EntityRemovalRequested,
			EventKind::ComponentRemovalRequested,
		] {
			manager.bus.subscribe(&manager, kind);
		}

		manager
	}

	pub fn bus(&self) -> &Rc<EventBus> {
		&self.bus
	}

	pub fn config(&self) -> &EcsConfig {
		&self.config
	}

	/// Creates a new [entity](Entity), reusing the oldest freed id if there is one.
	/// Publishes [EntityCreated](Event::EntityCreated) if `notify` is set.
	pub fn create_entity(&self, notify: bool) -> Entity {
		let entity = {
			let mut state = self.state.borrow_mut();
			let entity = state.allocator.allocate();
			let inserted = state.active.insert(entity);
			assert_inactive(inserted, entity);
			entity
		};

		trace!(%entity, notify, "entity created");
		if notify {
			self.publish(Event::EntityCreated(entity));
		}

		entity
	}

	/// Creates an entity carrying every component of `bundle`.
	///
	/// Components are attached silently; a single [ComponentAdded](Event::ComponentAdded)
	/// is published once all of them are in place. No [EntityCreated](Event::EntityCreated) is published.
	pub fn create_entity_from_bundle(&self, bundle: &EntityBundle) -> Entity {
		let entity = self.create_entity(false);
		for component in bundle.components() {
			if !self.add_any_component(entity, component.clone(), false) {
				trace!(%entity, component = %component.id(), "bundled component rejected");
			}
		}

		self.publish(Event::ComponentAdded(entity));
		entity
	}

	#[inline(always)]
	pub fn entity_exists(&self, entity: Entity) -> bool {
		self.state.borrow().active.contains(&entity)
	}

	/// All active entities, sorted by id.
	pub fn entities(&self) -> Vec<Entity> {
		let mut entities = self.state.borrow().active.iter().copied().collect::<Vec<_>>();
		entities.sort_unstable();
		entities
	}

	pub fn entity_count(&self) -> usize {
		self.state.borrow().active.len()
	}

	/// Number of components in the store, including those attached to inactive ids.
	pub fn component_count(&self) -> usize {
		self.state.borrow().component_count
	}

	/// Number of freed ids waiting to be reused.
	pub fn recycled_count(&self) -> usize {
		self.state.borrow().allocator.recycled()
	}

	/// Attaches `component` to `entity`. See [add_any_component](Self::add_any_component).
	pub fn add_component<T: Component>(&self, entity: Entity, component: T, inform_systems: bool) -> bool {
		self.add_any_component(entity, AnyComponent::new(component), inform_systems)
	}

	/// Attaches `component` to `entity` and publishes [ComponentAdded](Event::ComponentAdded)
	/// if `inform_systems` is set.
	///
	/// Returns *false* without touching the store if the component is already attached somewhere,
	/// or if `entity` already holds a component of the same kind and the kind doesn't allow multiples.
	/// The entity doesn't have to be active: components attached to an inactive id
	/// become visible once that id is activated.
	pub fn add_any_component(&self, entity: Entity, component: AnyComponent, inform_systems: bool) -> bool {
		{
			let mut state = self.state.borrow_mut();
			if let Some(owner) = component.entity() {
				warn!(%entity, %owner, component = %component.id(), "component is already attached");
				return false;
			}

			let ty = component.component_type();
			if !ty.allow_multiple() && state.has_component_id(entity, ty.id()) {
				trace!(%entity, component = %ty.id(), "duplicate component rejected");
				return false;
			}

			component.bind(entity);
			state.components.entry(entity).or_default().push(component.clone());
			state.component_count += 1;
		}

		component.on_attach(entity);
		trace!(%entity, component = %component.id(), "component added");

		if inform_systems {
			self.publish(Event::ComponentAdded(entity));
		}

		true
	}

	/// Gets the first component of type `T` attached to `entity`.
	pub fn get_component<T: Component>(&self, entity: Entity) -> Option<ComponentRef<T>> {
		let id = T::component_id();
		self.state.borrow().components_of(entity).iter().find(|c| c.id() == id)?.downcast::<T>()
	}

	/// Gets the first component of kind `id` attached to `entity`.
	pub fn get_component_by_id(&self, entity: Entity, id: ComponentId) -> Option<AnyComponent> {
		self.state.borrow().components_of(entity).iter().find(|c| c.id() == id).cloned()
	}

	/// Gets every component attached to `entity`, in attachment order.
	pub fn get_components(&self, entity: Entity) -> Vec<AnyComponent> {
		self.state.borrow().components_of(entity).to_vec()
	}

	/// Gets every component of type `T` attached to `entity`, in attachment order.
	pub fn get_components_of<T: Component>(&self, entity: Entity) -> Vec<ComponentRef<T>> {
		self.state.borrow().components_of(entity).iter().filter_map(AnyComponent::downcast::<T>).collect()
	}

	/// Gets every component of kind `id` attached to `entity`, in attachment order.
	pub fn get_components_by_id(&self, entity: Entity, id: ComponentId) -> Vec<AnyComponent> {
		self.state.borrow().components_of(entity).iter().filter(|c| c.id() == id).cloned().collect()
	}

	/// Gets every component attached to `entity`, ordered by [priority](ComponentTypeInfo::PRIORITY).
	/// Components sharing a priority keep their attachment order.
	pub fn get_components_by_priority(&self, entity: Entity) -> Vec<AnyComponent> {
		let mut components = self.get_components(entity);
		components.sort_by_key(AnyComponent::priority);
		components
	}

	#[inline(always)]
	pub fn has_component<T: ComponentTypeInfo>(&self, entity: Entity) -> bool {
		self.has_component_id(entity, T::component_id())
	}

	pub fn has_component_id(&self, entity: Entity, id: ComponentId) -> bool {
		self.state.borrow().has_component_id(entity, id)
	}

	/// Active entities holding at least one component of type `T`, sorted by id.
	pub fn entities_with_component<T: ComponentTypeInfo>(&self) -> Vec<Entity> {
		self.entities_with_component_id(T::component_id())
	}

	/// Active entities holding at least one component of kind `id`, sorted by id.
	pub fn entities_with_component_id(&self, id: ComponentId) -> Vec<Entity> {
		let state = self.state.borrow();
		let mut entities = state
			.active
			.iter()
			.copied()
			.filter(|e| state.has_component_id(*e, id))
			.collect::<Vec<_>>();
		entities.sort_unstable();
		entities
	}

	/// Hands `component` over to `target` without recreating it.
	///
	/// Observers see a [ComponentsRemoved](Event::ComponentsRemoved) for the previous owner,
	/// published once the component left it, followed by a [ComponentAdded](Event::ComponentAdded)
	/// for `target`. Returns *false* if `target` is not active, the component is not attached,
	/// or `target` already holds a component of that kind and the kind doesn't allow multiples.
	///
	/// If a listener removes `target` while the component is in transit, the component goes back
	/// to its previous owner (announced with a [ComponentAdded](Event::ComponentAdded)), or is
	/// detached if that owner is gone too. The move then returns *false*.
	pub fn move_component(&self, target: Entity, component: &AnyComponent) -> bool {
		let source = {
			let mut state = self.state.borrow_mut();
			if !state.active.contains(&target) {
				trace!(%target, "move target is not active");
				return false;
			}

			let source = match component.entity() {
				Some(source) => source,
				None => {
					warn!(%target, component = %component.id(), "cannot move a detached component");
					return false;
				},
			};

			if source == target {
				return true;
			}

			let ty = component.component_type();
			if !ty.allow_multiple() && state.has_component_id(target, ty.id()) {
				trace!(%target, component = %ty.id(), "move would duplicate component");
				return false;
			}

			if state.detach(source, |c| c.ptr_eq(component)).is_empty() {
				warn!(%source, %target, component = %component.id(), "component is in transit");
				return false;
			}

			source
		};

		self.publish(Event::ComponentsRemoved(source));

		let owner = {
			let mut state = self.state.borrow_mut();
			let owner = [target, source].into_iter().find(|e| state.can_hold(*e, component));
			if let Some(owner) = owner {
				component.bind(owner);
				state.components.entry(owner).or_default().push(component.clone());
				state.component_count += 1;
			}
			owner
		};

		match owner {
			Some(owner) if owner == target => {
				trace!(%source, %target, component = %component.id(), "component moved");
				self.publish(Event::ComponentAdded(target));
				true
			},
			Some(_) => {
				debug!(%source, %target, component = %component.id(), "move target went away, component returned");
				self.publish(Event::ComponentAdded(source));
				false
			},
			None => {
				debug!(%source, %target, component = %component.id(), "move target and source went away, component detached");
				component.on_detach(source);
				component.unbind();
				false
			},
		}
	}

	/// Moves every component of type `T` from `source` to `target`.
	/// Returns *false* if `source` is not active or any of the moves failed.
	pub fn move_components<T: Component>(&self, source: Entity, target: Entity) -> bool {
		if !self.entity_exists(source) {
			return false;
		}

		self.get_components_by_id(source, T::component_id())
			.iter()
			.fold(true, |moved, component| self.move_component(target, component) & moved)
	}

	/// Removes every component attached to `entity`, then publishes one
	/// [ComponentsRemoved](Event::ComponentsRemoved). Returns the number of removed components.
	pub fn remove_components(&self, entity: Entity) -> usize {
		self.remove_components_where(entity, |_| true)
	}

	/// Removes every component of type `T` attached to `entity`, then publishes one
	/// [ComponentsRemoved](Event::ComponentsRemoved). Returns the number of removed components.
	pub fn remove_components_of<T: ComponentTypeInfo>(&self, entity: Entity) -> usize {
		self.remove_components_by_id(entity, T::component_id())
	}

	/// Removes every component of kind `id` attached to `entity`, then publishes one
	/// [ComponentsRemoved](Event::ComponentsRemoved). Returns the number of removed components.
	pub fn remove_components_by_id(&self, entity: Entity, id: ComponentId) -> usize {
		self.remove_components_where(entity, |c| c.id() == id)
	}

	/// Removes `entity` and all of its components.
	///
	/// Components are removed first (one [ComponentsRemoved](Event::ComponentsRemoved)), then
	/// the entity is deactivated, [EntityRemoved](Event::EntityRemoved) is published, and
	/// finally the id is queued for reuse. Returns *false* if the entity wasn't active.
	pub fn remove_entity(&self, entity: Entity) -> bool {
		{
			let mut state = self.state.borrow_mut();
			if !state.active.contains(&entity) || !state.removing.insert(entity) {
				trace!(%entity, "entity is not active or already being removed");
				return false;
			}
		}

		self.remove_components(entity);
		self.state.borrow_mut().active.remove(&entity);

		let stragglers = self.detach_silently(entity);
		if stragglers > 0 {
			debug!(%entity, stragglers, "detached components added during removal");
		}

		trace!(%entity, "entity removed");
		self.publish(Event::EntityRemoved(entity));

		let leftovers = self.detach_silently(entity);
		if leftovers > 0 {
			debug!(%entity, leftovers, "detached components added after removal");
		}

		let mut state = self.state.borrow_mut();
		state.removing.remove(&entity);
		state.allocator.free(entity);
		true
	}

	/// Read access to the ids of every active entity, without copying.
	///
	/// The store stays borrowed for as long as the returned guard lives,
	/// so no mutation may happen in the meantime.
	pub fn active_entities(&self) -> Ref<'_, IntSet<Entity>> {
		Ref::map(self.state.borrow(), |state| &state.active)
	}

	fn remove_components_where(&self, entity: Entity, predicate: impl Fn(&AnyComponent) -> bool) -> usize {
		let removed = self.state.borrow_mut().detach(entity, predicate);
		for component in removed.iter() {
			component.on_detach(entity);
			component.unbind();
		}

		trace!(%entity, removed = removed.len(), "components removed");
		self.publish(Event::ComponentsRemoved(entity));
		removed.len()
	}

	fn detach_silently(&self, entity: Entity) -> usize {
		let removed = self.state.borrow_mut().detach(entity, |_| true);
		for component in removed.iter() {
			component.on_detach(entity);
			component.unbind();
		}
		removed.len()
	}

	#[inline(always)]
	fn publish(&self, event: Event) {
		self.bus.publish(Sender::REGISTRY, &event);
	}
}

impl EventListener for EntityManager {
	fn notify(&self, sender: Sender, event: &Event) {
		match event {
			Event::EntityCreationRequested(bundle) => {
				let entity = self.create_entity_from_bundle(bundle);
				trace!(%sender, %entity, components = bundle.len(), "entity creation request handled");
			},
			Event::EntityRemovalRequested(entity) => {
				self.remove_entity(*entity);
			},
			Event::ComponentRemovalRequested { entity, component } => {
				self.remove_components_by_id(*entity, *component);
			},
			Event::EntityCreated(_)
			| Event::EntityRemoved(_)
			| Event::ComponentAdded(_)
			| Event::ComponentsRemoved(_) => {},
		}
	}
}

impl std::fmt::Debug for EntityManager {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let state = self.state.borrow();
		f.debug_struct("EntityManager")
			.field("entities", &state.active.len())
			.field("components", &state.component_count)
			.field("recycled", &state.allocator.recycled())
			.finish()
	}
}

#[inline(always)]
fn assert_inactive(inserted: bool, entity: Entity) {
	#[cfg(not(feature = "debug_only_assertions"))]
	assert!(inserted, "{} was handed out while still active", entity);

	#[cfg(feature = "debug_only_assertions")]
	debug_assert!(inserted, "{} was handed out while still active", entity);
}
