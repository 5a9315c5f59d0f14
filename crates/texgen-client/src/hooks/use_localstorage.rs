use serde::Serialize;
use serde::de::DeserializeOwned;
use web_sys::Storage;
use yew::prelude::*;

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Raw string stored under `key`, if storage is available.
pub fn read_raw(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

fn write<T: Serialize>(key: &str, value: &T) {
    let Some(storage) = local_storage() else {
        return;
    };
    match serde_json::to_string(value) {
        Ok(json) => {
            if storage.set_item(key, &json).is_err() {
                tracing::warn!("Failed to persist '{}'", key);
            }
        }
        Err(err) => tracing::warn!("Failed to serialize '{}': {}", key, err),
    }
}

/// State mirrored to `localStorage` under `key` as JSON.
///
/// Falls back to `init_fn` when the key is missing or does not parse.
#[hook]
pub fn use_localstorage<T, F>(key: &'static str, init_fn: F) -> UseStateHandle<T>
where
    T: 'static + Clone + Serialize + DeserializeOwned + PartialEq,
    F: FnOnce() -> T + 'static,
{
    let state = use_state(|| {
        read_raw(key)
            .and_then(|json| serde_json::from_str::<T>(&json).ok())
            .unwrap_or_else(init_fn)
    });
    use_effect_with((*state).clone(), move |value| {
        write(key, value);
        || ()
    });
    state
}
