//! Persisting entered scores and coefficients in browser local storage.
//!
//! Every field is stored under its own key as a JSON array, one element per
//! subject. `subject_ids` records which subject each position belonged to,
//! so a restore matches by id rather than trusting the catalog order.

use crate::error::StoreError;
use crate::scoring::{Component, ScoreEntry, Scores};
use crate::subject::{is_valid_coefficient, Catalog, SubjectId};
use seed::browser::web_storage::{LocalStorage, WebStorage, WebStorageError};
use serde_json::Value;
use std::collections::HashMap;

pub const EXAM_KEY: &str = "exam_scores";
pub const CC_KEY: &str = "cc_scores";
pub const TP_KEY: &str = "tp_scores";
pub const COEFFICIENT_KEY: &str = "coef_scores";
pub const SUBJECT_IDS_KEY: &str = "subject_ids";

pub const KEYS: [&str; 5] = [EXAM_KEY, CC_KEY, TP_KEY, COEFFICIENT_KEY, SUBJECT_IDS_KEY];

/// JSON values stored under string keys. `read` yields `Ok(None)` for a
/// missing key and an error for text that is not JSON.
pub trait KeyValueStore {
    fn read(&self, key: &str) -> Result<Option<Value>, StoreError>;
    fn write(&mut self, key: &str, value: &Value) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

// ------ BrowserStore ------

/// `window.localStorage`, through Seed's `LocalStorage`.
pub struct BrowserStore;

impl BrowserStore {
    /// Fails when the page has no usable local storage.
    pub fn open() -> Result<Self, StoreError> {
        LocalStorage::len().map_err(|err| StoreError::Unavailable(format!("{:?}", err)))?;
        Ok(BrowserStore)
    }
}

impl KeyValueStore for BrowserStore {
    fn read(&self, key: &str) -> Result<Option<Value>, StoreError> {
        match LocalStorage::get(key) {
            Ok(value) => Ok(Some(value)),
            Err(WebStorageError::KeyNotFoundError) => Ok(None),
            Err(err) => Err(StoreError::Read {
                key: key.into(),
                reason: format!("{:?}", err),
            }),
        }
    }

    fn write(&mut self, key: &str, value: &Value) -> Result<(), StoreError> {
        LocalStorage::insert(key, value).map_err(|err| StoreError::Write {
            key: key.into(),
            reason: format!("{:?}", err),
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        LocalStorage::remove(key).map_err(|err| StoreError::Remove {
            key: key.into(),
            reason: format!("{:?}", err),
        })
    }
}

// ------ MemoryStore ------

/// Session-only store, used when local storage is unavailable. Values are
/// held as JSON text, the way local storage holds them.
#[derive(Default, Debug, Clone)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    pub fn insert_raw(&mut self, key: &str, text: &str) {
        self.items.insert(key.into(), text.into());
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<Value>, StoreError> {
        self.raw(key)
            .map(|text| {
                serde_json::from_str(text).map_err(|err| StoreError::Read {
                    key: key.into(),
                    reason: err.to_string(),
                })
            })
            .transpose()
    }

    fn write(&mut self, key: &str, value: &Value) -> Result<(), StoreError> {
        self.items.insert(key.into(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.items.remove(key);
        Ok(())
    }
}

// ------ save / load / clear ------

fn write_array<S, T>(store: &mut S, key: &str, items: &[T]) -> Result<(), StoreError>
where
    S: KeyValueStore + ?Sized,
    T: serde::Serialize,
{
    let value = serde_json::to_value(items).map_err(|err| StoreError::Write {
        key: key.into(),
        reason: err.to_string(),
    })?;
    store.write(key, &value)
}

/// Writes the full snapshot. All arrays are rewritten together so they stay
/// aligned position for position.
pub fn save<S>(store: &mut S, catalog: &Catalog, scores: &Scores) -> Result<(), StoreError>
where
    S: KeyValueStore + ?Sized,
{
    let mut exam = Vec::with_capacity(catalog.len());
    let mut cc = Vec::with_capacity(catalog.len());
    let mut tp = Vec::with_capacity(catalog.len());
    let mut coefficients = Vec::with_capacity(catalog.len());
    let mut ids = Vec::with_capacity(catalog.len());

    for subject in catalog.iter() {
        exam.push(scores.field(subject.id, Component::Exam));
        cc.push(scores.field(subject.id, Component::Cc));
        tp.push(if subject.has_tp {
            scores.field(subject.id, Component::Tp)
        } else {
            ""
        });
        coefficients.push(subject.effective_coefficient());
        ids.push(subject.id);
    }

    write_array(store, EXAM_KEY, &exam)?;
    write_array(store, CC_KEY, &cc)?;
    write_array(store, TP_KEY, &tp)?;
    write_array(store, COEFFICIENT_KEY, &coefficients)?;
    write_array(store, SUBJECT_IDS_KEY, &ids)
}

fn read_array<S>(store: &S, key: &str) -> Option<Vec<Value>>
where
    S: KeyValueStore + ?Sized,
{
    match store.read(key) {
        Ok(Some(Value::Array(values))) => Some(values),
        Ok(Some(_)) => {
            console_log!("ignoring `{}`: not an array", key);
            None
        }
        Ok(None) => None,
        Err(err) => {
            console_log!("ignoring malformed data: {}", err);
            None
        }
    }
}

fn text_at(values: &[Value], position: usize) -> String {
    match values.get(position) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    }
}

fn coefficient_at(values: &[Value], position: usize) -> Option<f64> {
    let coefficient = match values.get(position)? {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    Some(coefficient).filter(|coefficient| is_valid_coefficient(*coefficient))
}

/// Restores persisted scores and applies persisted coefficients to `catalog`.
/// Missing or malformed data leaves defaults in place.
pub fn load<S>(store: &S, catalog: &mut Catalog) -> Scores
where
    S: KeyValueStore + ?Sized,
{
    let exam = read_array(store, EXAM_KEY).unwrap_or_default();
    let cc = read_array(store, CC_KEY).unwrap_or_default();
    let tp = read_array(store, TP_KEY).unwrap_or_default();
    let coefficients = read_array(store, COEFFICIENT_KEY).unwrap_or_default();
    let ids = read_array(store, SUBJECT_IDS_KEY);

    let count = [exam.len(), cc.len(), tp.len(), coefficients.len()]
        .iter()
        .copied()
        .max()
        .unwrap_or(0);

    let mut scores = Scores::new();
    for position in 0..count {
        let id = match &ids {
            Some(ids) => ids
                .get(position)
                .and_then(Value::as_str)
                .and_then(SubjectId::from_key),
            None => catalog.at(position).map(|subject| subject.id),
        };
        let subject = match id.and_then(|id| catalog.get_mut(id)) {
            Some(subject) => subject,
            None => continue,
        };

        if let Some(coefficient) = coefficient_at(&coefficients, position) {
            subject.coefficient = coefficient;
        }

        let entry = ScoreEntry {
            exam: text_at(&exam, position),
            cc: text_at(&cc, position),
            tp: if subject.has_tp {
                text_at(&tp, position)
            } else {
                String::new()
            },
        };
        if !entry.is_blank() {
            scores.insert(subject.id, entry);
        }
    }
    scores
}

/// Removes every key, even when an earlier removal fails, and reports the
/// first failure.
pub fn clear<S>(store: &mut S) -> Result<(), StoreError>
where
    S: KeyValueStore + ?Sized,
{
    let mut first_error = None;
    for key in KEYS.iter() {
        if let Err(err) = store.remove(key) {
            console_error!("{}", err);
            first_error.get_or_insert(err);
        }
    }
    first_error.map_or(Ok(()), Err)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use crate::subject::Preset;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn local_storage_round_trip() {
        let mut store = BrowserStore::open().unwrap();
        clear(&mut store).unwrap();

        let mut catalog = Catalog::default();
        catalog.apply_preset(Preset::S4);
        let mut scores = Scores::new();
        scores.insert(SubjectId::Physics, ScoreEntry::new("13", "11", "17"));
        save(&mut store, &catalog, &scores).unwrap();

        let mut restored = Catalog::default();
        assert_eq!(load(&store, &mut restored), scores);
        assert_eq!(restored, catalog);

        clear(&mut store).unwrap();
        assert!(KEYS.iter().all(|key| matches!(store.read(key), Ok(None))));
    }
}
