use crate::tests::{context, Position, Tag, Velocity};
use crate::prelude::*;
use std::time::Duration;
use std::rc::Rc;

struct MovementSystem {
	base: Rc<SystemBase>,
}

impl MovementSystem {
	fn new(entities: &Rc<EntityManager>) -> Self {
		let base = SystemBase::builder("movement")
			.validator(HasComponents::<(Position, Velocity)>::new())
			.build(entities);
		Self { base }
	}
}

impl System for MovementSystem {
	fn update(&mut self, tick: &Tick) {
		let entities = self.base.entities();
		let delta = tick.delta.as_secs_f32();

		for entity in self.base.watched_entities().iter() {
			let (position, velocity) = match (
				entities.get_component::<Position>(*entity),
				entities.get_component::<Velocity>(*entity),
			) {
				(Some(position), Some(velocity)) => (position, velocity),
				_ => continue,
			};

			let velocity = velocity.borrow();
			let mut position = position.borrow_mut();
			position.x += velocity.x * delta;
			position.y += velocity.y * delta;
		}
	}
}

/// Consumes tagged entities: every watched entity is removed during the update.
struct ReaperSystem {
	base: Rc<SystemBase>,
	reaped: usize,
}

impl System for ReaperSystem {
	fn update(&mut self, _tick: &Tick) {
		for entity in self.base.watched_entities().iter() {
			if self.base.entities().remove_entity(*entity) {
				self.reaped += 1;
			}
		}
	}
}

#[test]
pub fn entity_is_watched_once_it_passes_every_validator() {
	let ecs = context();
	let system = SystemBase::builder("test")
		.validator(HasComponents::<(Position, Velocity)>::new())
		.build(ecs.entity_manager());

	let entity = ecs.create_entity(true);
	assert!(!system.is_watching(entity));

	ecs.add_component(entity, Position::default(), true);
	assert!(!system.is_watching(entity), "Entity watched with a missing component");

	ecs.add_component(entity, Velocity::default(), true);
	assert!(system.is_watching(entity));
	assert_eq!(&*system.watched_entities(), &[entity], "Entity was watched more than once");

	ecs.remove_components_of::<Velocity>(entity);
	assert!(!system.is_watching(entity), "Entity still watched after losing a component");
	assert_eq!(system.watched_count(), 0);
}

#[test]
pub fn system_without_validators_watches_every_entity() {
	let ecs = context();
	let existing = ecs.create_entity(false);
	let system = SystemBase::new("all", ecs.entity_manager(), Vec::new());
	assert!(system.is_watching(existing), "Entities created before the system were skipped");

	let created = ecs.create_entity(true);
	assert_eq!(&*system.watched_entities(), &[existing, created]);

	ecs.remove_entity(existing);
	assert_eq!(&*system.watched_entities(), &[created], "Removed entity is still watched");
}

#[test]
pub fn excluded_components_unwatch() {
	let ecs = context();
	let system = SystemBase::builder("untagged")
		.validator(HasComponents::<(Position,)>::new())
		.validator(ExcludesComponents::<(Tag,)>::new())
		.build(ecs.entity_manager());

	let entity = ecs.create_entity(false);
	ecs.add_component(entity, Position::default(), true);
	assert!(system.is_watching(entity));

	ecs.add_component(entity, Tag("frozen"), true);
	assert!(!system.is_watching(entity));

	ecs.remove_components_of::<Tag>(entity);
	assert!(system.is_watching(entity));
}

#[test]
pub fn closure_validators() {
	let ecs = context();
	let system = SystemBase::builder("even")
		.validator(FnValidator::new(|entity: Entity, _: &EntityManager| entity.index() % 2 == 0))
		.build(ecs.entity_manager());

	let entities = (0..4).map(|_| ecs.create_entity(true)).collect::<Vec<_>>();
	assert_eq!(&*system.watched_entities(), &[entities[0], entities[2]]);
}

#[test]
pub fn bundled_and_moved_components_are_tracked() {
	let ecs = context();
	let system = SystemBase::builder("positioned")
		.validator(HasComponents::<(Position,)>::new())
		.build(ecs.entity_manager());

	ecs.bus().publish(
		Sender("spawner"),
		&Event::EntityCreationRequested(EntityBundle::new().with(Position::default())),
	);
	let source = Entity::from_raw(0);
	assert!(system.is_watching(source), "Bundled entity was not watched");

	let target = ecs.create_entity(true);
	let position = ecs.get_component_by_id(source, ComponentId::of::<Position>()).unwrap();
	assert!(ecs.move_component(target, &position));

	assert!(!system.is_watching(source), "Previous owner is still watched");
	assert!(system.is_watching(target), "New owner is not watched");
}

#[test]
pub fn systems_update_through_the_context() {
	let mut ecs = context();
	let entity = ecs.create_entity(false);
	ecs.add_component(entity, Position { x: 0.0, y: 0.0 }, false);
	ecs.add_component(entity, Velocity { x: 2.0, y: -4.0 }, true);

	let movement = MovementSystem::new(ecs.entity_manager());
	ecs.register_system(movement).unwrap();
	ecs.setup_systems().unwrap();

	let first = Tick::first(Duration::from_millis(500));
	ecs.run_systems(&first).unwrap();
	ecs.run_systems(&first.next(Duration::from_millis(500))).unwrap();

	let position = ecs.get_component::<Position>(entity).unwrap();
	assert_eq!(*position.borrow(), Position { x: 2.0, y: -4.0 });
}

#[test]
pub fn systems_may_remove_entities_while_updating() {
	let ecs = context();
	let base = SystemBase::builder("reaper")
		.validator(HasComponents::<(Tag,)>::new())
		.build(ecs.entity_manager());

	for _ in 0..10 {
		let entity = ecs.create_entity(false);
		ecs.add_component(entity, Tag("doomed"), true);
	}
	let survivor = ecs.create_entity(true);

	let mut reaper = ReaperSystem { base: base.clone(), reaped: 0 };
	reaper.update(&Tick::default());

	assert_eq!(reaper.reaped, 10);
	assert_eq!(base.watched_count(), 0);
	assert_eq!(ecs.entities(), vec![survivor]);
}

#[test]
pub fn system_registration_errors() {
	struct Idle;
	impl System for Idle {
		fn update(&mut self, _tick: &Tick) {}
	}

	let mut ecs = context();
	assert_eq!(ecs.run_systems(&Tick::default()), Err(SystemError::NotInitialized));

	ecs.register_system(Idle).unwrap();
	assert!(matches!(ecs.register_system(Idle), Err(SystemError::AlreadyRegistered(_))));
	assert_eq!(ecs.system_count(), 1);

	ecs.setup_systems().unwrap();
	assert_eq!(ecs.setup_systems(), Err(SystemError::AlreadyInitialized));
	assert!(matches!(ecs.register_system(Idle), Err(SystemError::RegisteredAfterSetup(_))));
	assert_eq!(ecs.run_systems(&Tick::default()), Ok(()));
}

#[test]
pub fn ticks_accumulate() {
	let first = Tick::first(Duration::from_millis(16));
	let second = first.next(Duration::from_millis(20));

	assert_eq!(second.frame, 1);
	assert_eq!(second.delta, Duration::from_millis(20));
	assert_eq!(second.total, Duration::from_millis(36));
}
