extern crate self as courier_ecs;

pub mod config;
pub mod events;
pub mod entities;
pub mod systems;
pub mod components;
pub mod data_structures;
mod context;

pub use lazy_static::lazy_static;

pub mod prelude {
	pub use crate::events::*;
	pub use crate::systems::*;
	pub use crate::components::*;
	pub use crate::config::EcsConfig;
	pub use crate::context::EcsContext;
	pub use crate::entities::{Entity, EntityBundle, EntityManager};
	pub use crate::data_structures::{ConcurrentPool, ObjectPool, Pool, PoolBorrow, Reset};
}

#[cfg(test)]
mod tests;
