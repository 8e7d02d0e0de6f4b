//! Per-type single-instance registry
//!
//! The first instance constructed for a concrete type is retained
//! process-wide and handed back on every later request for that type.

use once_cell::sync::Lazy;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

static INSTANCES: Lazy<RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// The process-wide instance of `T`, constructing it with `init` on first
/// use
///
/// `init` runs at most once per type; later calls return the retained
/// instance and ignore their own `init`.
///
/// # Example
///
/// ```
/// use ferro_hla::instance_of;
///
/// struct TypingConfig {
///     max_fields: usize,
/// }
///
/// let config = instance_of(|| TypingConfig { max_fields: 4 });
/// let again = instance_of(|| TypingConfig { max_fields: 2 });
/// assert_eq!(again.max_fields, 4);
/// ```
pub fn instance_of<T, F>(init: F) -> Arc<T>
where
    T: Any + Send + Sync,
    F: FnOnce() -> T,
{
    let type_id = TypeId::of::<T>();
    if let Some(existing) = INSTANCES.read().unwrap().get(&type_id) {
        return downcast(existing);
    }
    let mut instances = INSTANCES.write().unwrap();
    let entry = instances
        .entry(type_id)
        .or_insert_with(|| Arc::new(init()) as Arc<dyn Any + Send + Sync>);
    downcast(entry)
}

fn downcast<T: Any + Send + Sync>(instance: &Arc<dyn Any + Send + Sync>) -> Arc<T> {
    Arc::clone(instance)
        .downcast::<T>()
        .expect("registry entries are keyed by their own TypeId")
}
