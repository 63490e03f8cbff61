/// Remote subscriptions cache
///
/// Mirrors what the API knows about the user's subscriptions. Every
/// operation returns an iced `Task` that talks to the API; the task's
/// result comes back as a `CacheEvent` and is folded in by `apply`.
use chrono::{DateTime, Utc};
use iced::Task;
use std::collections::HashSet;

use super::data::{Subscription, SubscriptionKind, SubscriptionsList};
use super::edit::SubscriptionPatch;
use crate::api::MoonstreamClient;
use crate::error::ApiError;

#[derive(Debug, Clone)]
pub enum CacheEvent {
    Listed(Result<SubscriptionsList, ApiError>),
    Updated {
        id: String,
        result: Result<Subscription, ApiError>,
    },
    Deleted {
        id: String,
        result: Result<(), ApiError>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryStatus {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// What `apply` did to the cache
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Cached data changed and should be snapshotted
    Changed,
    Unchanged,
    Failed(ApiError),
}

#[derive(Debug)]
pub struct SubscriptionsCache {
    client: MoonstreamClient,
    data: Option<SubscriptionsList>,
    status: QueryStatus,
    fetched_at: Option<DateTime<Utc>>,
    /// Ids with an update or delete in flight
    pending: HashSet<String>,
}

impl SubscriptionsCache {
    pub fn new(client: MoonstreamClient) -> Self {
        Self {
            client,
            data: None,
            status: QueryStatus::Idle,
            fetched_at: None,
            pending: HashSet::new(),
        }
    }

    /// Start from a local snapshot until the first list completes
    pub fn seed(&mut self, list: SubscriptionsList, saved_at: DateTime<Utc>) {
        log::info!(
            "📦 Seeded cache with {} subscriptions from {}",
            list.subscriptions.len(),
            saved_at.format("%Y-%m-%d %H:%M")
        );
        self.data = Some(list);
        self.fetched_at = Some(saved_at);
    }

    /// Fetch the full list
    pub fn list(&mut self) -> Task<CacheEvent> {
        self.status = QueryStatus::Loading;
        let client = self.client.clone();
        Task::perform(
            async move { client.list_subscriptions().await },
            CacheEvent::Listed,
        )
    }

    /// Patch one subscription
    pub fn update(&mut self, id: String, patch: SubscriptionPatch) -> Task<CacheEvent> {
        if patch.is_empty() {
            return Task::none();
        }
        log::debug!("✏️  Updating {} with {}", id, patch.to_json().unwrap_or_default());
        self.pending.insert(id.clone());
        let client = self.client.clone();
        Task::perform(
            async move {
                let result = client.update_subscription(&id, &patch).await;
                (id, result)
            },
            |(id, result)| CacheEvent::Updated { id, result },
        )
    }

    /// Delete one subscription
    pub fn delete(&mut self, id: String) -> Task<CacheEvent> {
        self.pending.insert(id.clone());
        let client = self.client.clone();
        Task::perform(
            async move {
                let result = client.delete_subscription(&id).await;
                (id, result)
            },
            |(id, result)| CacheEvent::Deleted { id, result },
        )
    }

    /// Fold a completed request into the cache
    pub fn apply(&mut self, event: CacheEvent) -> Outcome {
        match event {
            CacheEvent::Listed(Ok(list)) => {
                log::info!("✅ Fetched {} subscriptions", list.subscriptions.len());
                for subscription in &list.subscriptions {
                    if subscription.kind() == SubscriptionKind::Unknown {
                        log::warn!(
                            "⚠️  Unknown subscription type {:?} on {}",
                            subscription.subscription_type_id,
                            subscription.id
                        );
                    }
                }
                self.status = QueryStatus::Ready;
                self.fetched_at = Some(Utc::now());
                if self.data.as_ref() == Some(&list) {
                    return Outcome::Unchanged;
                }
                self.data = Some(list);
                Outcome::Changed
            }
            CacheEvent::Listed(Err(err)) => {
                log::error!("⚠️  Failed to fetch subscriptions: {}", err);
                self.status = QueryStatus::Failed(err.to_string());
                Outcome::Failed(err)
            }
            CacheEvent::Updated { id, result } => {
                self.pending.remove(&id);
                match result {
                    Ok(updated) => self.replace(updated),
                    Err(err) => {
                        log::error!("⚠️  Failed to update subscription {}: {}", id, err);
                        Outcome::Failed(err)
                    }
                }
            }
            CacheEvent::Deleted { id, result } => {
                self.pending.remove(&id);
                match result {
                    Ok(()) => self.remove(&id),
                    Err(err) => {
                        log::error!("⚠️  Failed to delete subscription {}: {}", id, err);
                        Outcome::Failed(err)
                    }
                }
            }
        }
    }

    fn replace(&mut self, updated: Subscription) -> Outcome {
        let Some(slot) = self
            .data
            .as_mut()
            .and_then(|list| list.subscriptions.iter_mut().find(|s| s.id == updated.id))
        else {
            return Outcome::Unchanged;
        };
        if *slot == updated {
            return Outcome::Unchanged;
        }
        *slot = updated;
        Outcome::Changed
    }

    fn remove(&mut self, id: &str) -> Outcome {
        let Some(list) = self.data.as_mut() else {
            return Outcome::Unchanged;
        };
        let before = list.subscriptions.len();
        list.subscriptions.retain(|s| s.id != id);
        if list.subscriptions.len() == before {
            Outcome::Unchanged
        } else {
            log::info!("🗑️  Deleted subscription {}", id);
            Outcome::Changed
        }
    }

    pub fn data(&self) -> Option<&SubscriptionsList> {
        self.data.as_ref()
    }

    pub fn status(&self) -> &QueryStatus {
        &self.status
    }

    /// Loading with nothing to show yet
    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Loading && self.data.is_none()
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.pending.contains(id)
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }
}
