//! [Entities](Entity) represent the individual "things" in your game or application.
//!
//! An [Entity] doesn't store any data and has no associated behaviour;
//! instead, it identifies which pieces of data ([Components](crate::components::Component)) belong together.
//! The [EntityManager] owns every entity and component, and announces each structural change
//! on the [EventBus](crate::events::EventBus).

mod entity;
mod entity_bundle;
mod entity_manager;

pub use entity::*;
pub use entity_bundle::*;
pub use entity_manager::*;
