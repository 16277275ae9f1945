//! Storage seam for relations.
//!
//! [`RelationStore`] is implemented by the PostgreSQL store in `yboard-db`
//! and by [`InMemoryRelationStore`] here. Handlers and the transition logic
//! only see `dyn RelationStore`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::CoreError;
use crate::relation::{NewRelation, Relation, RelationKey, RelationPatch, RelationState};
use crate::types::DbId;

/// Create/read/update/delete/move operations over relations in all states.
///
/// Every implementation must:
/// - validate inputs before touching storage ([`CoreError::Validation`]);
/// - reject a `create` on an existing key ([`CoreError::Conflict`]);
/// - reject `update`/`delete`/`move_relation` on a missing key
///   ([`CoreError::RelationNotFound`]).
#[async_trait]
pub trait RelationStore: Send + Sync {
    async fn find(&self, key: &RelationKey) -> Result<Option<Relation>, CoreError>;

    async fn list_by_state(&self, state: RelationState) -> Result<Vec<Relation>, CoreError>;

    async fn list_for_promo_module(&self, promo_module_id: DbId)
        -> Result<Vec<Relation>, CoreError>;

    async fn list_for_teacher(&self, teacher_id: DbId) -> Result<Vec<Relation>, CoreError>;

    async fn create(&self, input: &NewRelation) -> Result<Relation, CoreError>;

    async fn update(&self, key: &RelationKey, patch: &RelationPatch)
        -> Result<Relation, CoreError>;

    async fn delete(&self, key: &RelationKey) -> Result<(), CoreError>;

    /// Move the relation at `key` to state `to`.
    ///
    /// The default runs delete then create as two separate steps. An
    /// occupied target is a [`CoreError::Conflict`] and nothing is deleted.
    /// If the create fails after the delete went through, the relation is
    /// gone from both states and [`CoreError::TransitionIncomplete`] is
    /// returned.
    /// Stores that can do both steps atomically should override this.
    async fn move_relation(
        &self,
        key: &RelationKey,
        to: RelationState,
    ) -> Result<Relation, CoreError> {
        let source = self
            .find(key)
            .await?
            .ok_or(CoreError::RelationNotFound(*key))?;
        let target = NewRelation::copy_of(&source, to);
        target.validate()?;
        let target_key = target.key();
        if self.find(&target_key).await?.is_some() {
            return Err(CoreError::Conflict(format!("{target_key} already exists")));
        }

        self.delete(key).await?;
        self.create(&target)
            .await
            .map_err(|e| CoreError::TransitionIncomplete {
                key: *key,
                to,
                reason: e.to_string(),
            })
    }
}

/// Relation store held in process memory.
///
/// Used by tests and by local runs without a database. All mutations take
/// the write lock, so a move is atomic.
#[derive(Debug, Default)]
pub struct InMemoryRelationStore {
    relations: RwLock<BTreeMap<RelationKey, Relation>>,
}

impl InMemoryRelationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored relations across all states.
    pub async fn len(&self) -> usize {
        self.relations.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.relations.read().await.is_empty()
    }

    async fn filtered(&self, predicate: impl Fn(&RelationKey) -> bool) -> Vec<Relation> {
        self.relations
            .read()
            .await
            .iter()
            .filter(|(key, _)| predicate(key))
            .map(|(_, relation)| relation.clone())
            .collect()
    }
}

#[async_trait]
impl RelationStore for InMemoryRelationStore {
    async fn find(&self, key: &RelationKey) -> Result<Option<Relation>, CoreError> {
        Ok(self.relations.read().await.get(key).cloned())
    }

    async fn list_by_state(&self, state: RelationState) -> Result<Vec<Relation>, CoreError> {
        Ok(self.filtered(|k| k.state == state).await)
    }

    async fn list_for_promo_module(
        &self,
        promo_module_id: DbId,
    ) -> Result<Vec<Relation>, CoreError> {
        Ok(self.filtered(|k| k.promo_module_id == promo_module_id).await)
    }

    async fn list_for_teacher(&self, teacher_id: DbId) -> Result<Vec<Relation>, CoreError> {
        Ok(self.filtered(|k| k.teacher_id == teacher_id).await)
    }

    async fn create(&self, input: &NewRelation) -> Result<Relation, CoreError> {
        input.validate()?;
        let key = input.key();
        let mut relations = self.relations.write().await;
        if relations.contains_key(&key) {
            return Err(CoreError::Conflict(format!("{key} already exists")));
        }
        let relation = input.clone().into_relation();
        relations.insert(key, relation.clone());
        Ok(relation)
    }

    async fn update(
        &self,
        key: &RelationKey,
        patch: &RelationPatch,
    ) -> Result<Relation, CoreError> {
        patch.validate()?;
        let mut relations = self.relations.write().await;
        let current = relations
            .get(key)
            .ok_or(CoreError::RelationNotFound(*key))?;

        let mut updated = current.clone();
        updated.apply(patch)?;
        relations.insert(*key, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, key: &RelationKey) -> Result<(), CoreError> {
        self.relations
            .write()
            .await
            .remove(key)
            .map(|_| ())
            .ok_or(CoreError::RelationNotFound(*key))
    }

    async fn move_relation(
        &self,
        key: &RelationKey,
        to: RelationState,
    ) -> Result<Relation, CoreError> {
        let mut relations = self.relations.write().await;
        let source = relations
            .get(key)
            .ok_or(CoreError::RelationNotFound(*key))?;

        let target = NewRelation::copy_of(source, to);
        target.validate()?;
        let target_key = target.key();
        if relations.contains_key(&target_key) {
            return Err(CoreError::Conflict(format!("{target_key} already exists")));
        }

        relations.remove(key);
        let relation = target.into_relation();
        relations.insert(target_key, relation.clone());
        Ok(relation)
    }
}
