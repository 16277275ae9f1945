//! Persisted promo selection (which promo sections a user displays).
//!
//! The selection is stored as a JSON array of promo keys in a per-user
//! preference slot. It is a set: order in storage is irrelevant.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::CoreError;
use crate::types::DbId;

/// Preference slot holding the promo selection.
pub const SELECTED_PROMOS_KEY: &str = "selected_promos";

/// A set of promo keys (`"<level> <specialty>"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromoSelection(BTreeSet<String>);

impl PromoSelection {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(keys.into_iter().map(Into::into).collect())
    }

    /// Parse a stored value. Anything that is not a JSON array of strings
    /// yields an empty selection.
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str::<Vec<String>>(raw) {
            Ok(keys) => Self::new(keys),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding malformed promo selection");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::Value::from(self.0.iter().cloned().collect::<Vec<_>>()).to_string()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Drop keys that are not in `known`.
    pub fn retain_known<'a>(&mut self, known: impl IntoIterator<Item = &'a str>) {
        let known: BTreeSet<&str> = known.into_iter().collect();
        self.0.retain(|key| known.contains(key.as_str()));
    }
}

/// Per-user key/value slots.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get(&self, user_id: DbId, key: &str) -> Result<Option<String>, CoreError>;

    async fn set(&self, user_id: DbId, key: &str, value: &str) -> Result<(), CoreError>;
}

/// Preference store held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryPreferenceStore {
    slots: RwLock<HashMap<(DbId, String), String>>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn get(&self, user_id: DbId, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self
            .slots
            .read()
            .await
            .get(&(user_id, key.to_string()))
            .cloned())
    }

    async fn set(&self, user_id: DbId, key: &str, value: &str) -> Result<(), CoreError> {
        self.slots
            .write()
            .await
            .insert((user_id, key.to_string()), value.to_string());
        Ok(())
    }
}

/// Load a user's promo selection.
///
/// Without a stored value every known promo is selected. A malformed value
/// reads as an empty selection.
pub async fn load_selection<S>(
    store: &S,
    user_id: DbId,
    known_promos: &[String],
) -> Result<PromoSelection, CoreError>
where
    S: PreferenceStore + ?Sized,
{
    let selection = match store.get(user_id, SELECTED_PROMOS_KEY).await? {
        Some(raw) => PromoSelection::from_json(&raw),
        None => PromoSelection::new(known_promos.iter().cloned()),
    };
    Ok(selection)
}

/// Persist a user's promo selection.
pub async fn save_selection<S>(
    store: &S,
    user_id: DbId,
    selection: &PromoSelection,
) -> Result<(), CoreError>
where
    S: PreferenceStore + ?Sized,
{
    store
        .set(user_id, SELECTED_PROMOS_KEY, &selection.to_json())
        .await
}
