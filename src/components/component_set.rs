use crate::components::{ComponentId, ComponentTypeInfo};
use std::hash::BuildHasherDefault;
use nohash_hasher::NoHashHasher;
use std::collections::HashMap;
use lazy_static::lazy_static;
use parking_lot::Mutex;
use std::any::TypeId;
use std::sync::Arc;

type Hasher = BuildHasherDefault<NoHashHasher<u64>>;

lazy_static! {
	static ref EMPTY_SET: Arc<[ComponentId]> = Arc::from(Vec::new());
	static ref TYPE_TO_IDS: Mutex<HashMap<TypeId, Arc<[ComponentId]>, Hasher>> = Mutex::new(HashMap::default());
}

/// A compile-time set of [Component](crate::components::Component) types, expressed as a tuple.
///
/// Used by the stock [validators](crate::systems::Validator) to describe which component kinds
/// an entity must (or must not) carry.
pub trait ComponentSet: 'static {
	/// The sorted, de-duplicated [ComponentIds](ComponentId) of the set.
	fn component_ids() -> Arc<[ComponentId]>;
}

impl ComponentSet for () {
	fn component_ids() -> Arc<[ComponentId]> {
		EMPTY_SET.clone()
	}
}

macro_rules! impl_component_set {
    ($($t: ident),*) => {
        impl <$($t: ComponentTypeInfo),*> ComponentSet for ($($t),*,) {
            fn component_ids() -> Arc<[ComponentId]> {
                let key = TypeId::of::<Self>();
                let mut tti = TYPE_TO_IDS.lock();
                if let Some(ids) = tti.get(&key) {
                    return ids.clone();
                }

                let mut components = vec![$(<$t>::component_id()),*];
                components.sort();
                components.dedup();

                let ids: Arc<[ComponentId]> = Arc::from(components);
                tti.insert(key, ids.clone());
                ids
            }
        }
    };
}

impl_component_set!(T0);
impl_component_set!(T0, T1);
impl_component_set!(T0, T1, T2);
impl_component_set!(T0, T1, T2, T3);
impl_component_set!(T0, T1, T2, T3, T4);
impl_component_set!(T0, T1, T2, T3, T4, T5);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7, T8);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);
