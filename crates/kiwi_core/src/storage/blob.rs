//! JSON blob codec for whole collections.

use super::{KvStore, StorageResult, THEME_KEY};
use crate::model::theme::Theme;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Loads a JSON array stored under `key`.
///
/// Missing keys, read failures and blobs that are not a JSON array yield an
/// empty collection so the app always starts in a usable state. Elements
/// that fail to decode are skipped; the rest are kept.
pub fn load_collection<T: DeserializeOwned>(store: &impl KvStore, key: &str) -> Vec<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("event=blob_load module=storage status=skip key={key} reason=missing");
            return Vec::new();
        }
        Err(err) => {
            warn!("event=blob_load module=storage status=error key={key} error={err}");
            return Vec::new();
        }
    };

    let elements = match serde_json::from_str::<Vec<Value>>(&raw) {
        Ok(elements) => elements,
        Err(err) => {
            warn!(
                "event=blob_load module=storage status=error key={key} error_code=blob_parse_failed bytes={} error={err}",
                raw.len()
            );
            return Vec::new();
        }
    };

    let total = elements.len();
    let items: Vec<T> = elements
        .into_iter()
        .enumerate()
        .filter_map(|(index, element)| match serde_json::from_value(element) {
            Ok(item) => Some(item),
            Err(err) => {
                debug!(
                    "event=blob_load module=storage status=skip key={key} index={index} error={err}"
                );
                None
            }
        })
        .collect();

    let skipped = total - items.len();
    if skipped > 0 {
        warn!(
            "event=blob_load module=storage status=error key={key} error_code=blob_entry_invalid count={} skipped={skipped}",
            items.len()
        );
    } else {
        debug!(
            "event=blob_load module=storage status=ok key={key} count={}",
            items.len()
        );
    }
    items
}

/// Replaces the blob under `key` with the JSON encoding of `items`.
pub fn save_collection<T: Serialize>(
    store: &impl KvStore,
    key: &str,
    items: &[T],
) -> StorageResult<()> {
    let encoded = serde_json::to_string(items)?;
    store.set(key, &encoded)?;
    debug!(
        "event=blob_save module=storage status=ok key={key} count={} bytes={}",
        items.len(),
        encoded.len()
    );
    Ok(())
}

/// Loads the saved theme, falling back to `system_default`.
pub fn load_theme(store: &impl KvStore, system_default: Theme) -> Theme {
    match store.get(THEME_KEY) {
        Ok(Some(raw)) => raw.parse().unwrap_or_else(|err| {
            warn!("event=theme_load module=storage status=error error={err}");
            system_default
        }),
        Ok(None) => system_default,
        Err(err) => {
            warn!("event=theme_load module=storage status=error error={err}");
            system_default
        }
    }
}

pub fn save_theme(store: &impl KvStore, theme: Theme) -> StorageResult<()> {
    store.set(THEME_KEY, theme.as_str())
}
