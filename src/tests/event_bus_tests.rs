use crate::tests::{context, Position, Recorder};
use crate::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

struct Named {
	name: &'static str,
	log: Rc<RefCell<Vec<&'static str>>>,
}

impl EventListener for Named {
	fn notify(&self, _sender: Sender, _event: &Event) {
		self.log.borrow_mut().push(self.name);
	}
}

fn named(name: &'static str, log: &Rc<RefCell<Vec<&'static str>>>) -> Rc<Named> {
	Rc::new(Named { name, log: log.clone() })
}

/// Removes every entity it hears about.
struct Remover {
	entities: Rc<EntityManager>,
}

impl EventListener for Remover {
	fn notify(&self, _sender: Sender, event: &Event) {
		if let Some(entity) = event.entity() {
			self.entities.remove_entity(entity);
		}
	}
}

#[test]
pub fn listeners_run_in_subscription_order() {
	let bus = EventBus::new();
	let log = Rc::new(RefCell::new(Vec::new()));
	let listeners = [named("a", &log), named("b", &log), named("c", &log)];
	for listener in listeners.iter().rev() {
		bus.subscribe(listener, EventKind::EntityCreated);
	}

	bus.publish(Sender("test"), &Event::EntityCreated(Entity::from_raw(0)));
	bus.publish(Sender("test"), &Event::EntityRemoved(Entity::from_raw(0)));
	assert_eq!(*log.borrow(), vec!["c", "b", "a"]);
}

#[test]
pub fn subscriptions_are_per_kind_and_unique() {
	let bus = EventBus::new();
	let log = Rc::new(RefCell::new(Vec::new()));
	let listener = named("a", &log);

	assert!(bus.subscribe(&listener, EventKind::ComponentAdded));
	assert!(!bus.subscribe(&listener, EventKind::ComponentAdded), "Listener was subscribed twice");
	assert_eq!(bus.listener_count(EventKind::ComponentAdded), 1);
	assert_eq!(bus.listener_count(EventKind::EntityCreated), 0);

	bus.publish(Sender("test"), &Event::ComponentAdded(Entity::from_raw(1)));
	assert_eq!(log.borrow().len(), 1, "Listener was notified twice");

	assert!(bus.unsubscribe(&listener, EventKind::ComponentAdded));
	assert!(!bus.unsubscribe(&listener, EventKind::ComponentAdded));
	bus.publish(Sender("test"), &Event::ComponentAdded(Entity::from_raw(1)));
	assert_eq!(log.borrow().len(), 1, "Unsubscribed listener was notified");
}

#[test]
pub fn dropped_listeners_are_pruned() {
	let bus = EventBus::new();
	let log = Rc::new(RefCell::new(Vec::new()));
	let kept = named("kept", &log);
	let dropped = named("dropped", &log);
	bus.subscribe(&kept, EventKind::EntityRemoved);
	bus.subscribe(&dropped, EventKind::EntityRemoved);

	drop(dropped);
	assert_eq!(bus.listener_count(EventKind::EntityRemoved), 1);

	bus.publish(Sender("test"), &Event::EntityRemoved(Entity::from_raw(0)));
	assert_eq!(*log.borrow(), vec!["kept"]);
}

#[test]
pub fn clear_drops_every_subscription() {
	let ecs = context();
	Recorder::attach(ecs.bus(), &EventKind::ALL);
	let recorder = Recorder::attach(ecs.bus(), &EventKind::ALL);

	ecs.bus().clear();
	for kind in EventKind::ALL {
		assert_eq!(ecs.bus().listener_count(kind), 0);
	}

	ecs.create_entity(true);
	assert!(recorder.events().is_empty());
}

#[test]
pub fn reentrant_removal_reaches_every_listener() {
	let ecs = context();
	let remover = Rc::new(Remover {
		entities: ecs.entity_manager().clone(),
	});

	let before = Recorder::attach(ecs.bus(), &[EventKind::ComponentAdded, EventKind::EntityRemoved]);
	ecs.bus().subscribe(&remover, EventKind::ComponentAdded);
	let after = Recorder::attach(ecs.bus(), &[EventKind::ComponentAdded, EventKind::EntityRemoved]);

	let entity = ecs.create_entity(false);
	assert!(ecs.add_component(entity, Position::default(), true));
	assert!(!ecs.entity_exists(entity), "Listener failed to remove the entity");

	let added = (EventKind::ComponentAdded, Some(entity));
	let removed = (EventKind::EntityRemoved, Some(entity));
	assert_eq!(before.events(), vec![added, removed]);
	assert_eq!(after.events(), vec![removed, added], "Later listeners must still see the original event");
	assert!(!ecs.bus().is_dispatching());
}

#[test]
pub fn listeners_subscribed_during_dispatch_wait_for_the_next_event() {
	struct Subscriber {
		bus: Rc<EventBus>,
		late: Rc<Recorder>,
	}

	impl EventListener for Subscriber {
		fn notify(&self, _sender: Sender, _event: &Event) {
			assert!(self.bus.is_dispatching());
			self.bus.subscribe(&self.late, EventKind::EntityCreated);
		}
	}

	let bus = Rc::new(EventBus::new());
	let late = Rc::new(Recorder::default());
	let subscriber = Rc::new(Subscriber {
		bus: bus.clone(),
		late: late.clone(),
	});
	bus.subscribe(&subscriber, EventKind::EntityCreated);

	bus.publish(Sender("test"), &Event::EntityCreated(Entity::from_raw(0)));
	assert!(late.events().is_empty(), "Late listener saw the event it subscribed during");

	bus.publish(Sender("test"), &Event::EntityCreated(Entity::from_raw(1)));
	assert_eq!(late.events(), vec![(EventKind::EntityCreated, Some(Entity::from_raw(1)))]);
}
