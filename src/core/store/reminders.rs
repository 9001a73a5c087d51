// Pending reminders. Same shape as the custom-command store: a trait-backed
// in-memory map with a validating service on top. Reminders do not survive a
// restart; the trait is the seam for a durable store if that ever matters.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;

/// Bounds on how far out a reminder may be scheduled.
pub const MIN_LEAD: Duration = Duration::from_secs(10);
pub const MAX_LEAD: Duration = Duration::from_secs(30 * 24 * 60 * 60);

pub const MAX_MESSAGE_LEN: usize = 500;
pub const MAX_PENDING_PER_USER: usize = 25;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReminderError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("reminders must be at least 10 seconds in the future")]
    TooSoon,

    #[error("reminders cannot be more than 30 days in the future")]
    TooFar,

    #[error("reminder text must be 1-{MAX_MESSAGE_LEN} characters")]
    InvalidMessage,

    #[error("you already have {MAX_PENDING_PER_USER} pending reminders")]
    TooManyPending,

    #[error("no pending reminder #{0}")]
    NotFound(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub id: u64,
    pub user_id: u64,
    pub channel_id: u64,
    pub guild_id: Option<u64>,
    pub message: String,
    pub due_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Persistence contract for pending reminders.
#[async_trait]
pub trait ReminderStore: Send + Sync {
    async fn add(&self, reminder: Reminder) -> Result<(), ReminderError>;

    async fn list_for_user(&self, user_id: u64) -> Result<Vec<Reminder>, ReminderError>;

    /// Remove by id, returning the removed reminder if it existed.
    async fn remove(&self, id: u64) -> Result<Option<Reminder>, ReminderError>;
}

/// Validating service over a [`ReminderStore`]. Allocates ids and enforces
/// the lead-time, length, and per-user pending bounds.
pub struct ReminderService<S: ReminderStore> {
    store: S,
    next_id: AtomicU64,
}

impl<S: ReminderStore> ReminderService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            next_id: AtomicU64::new(1),
        }
    }

    pub async fn schedule(
        &self,
        user_id: u64,
        channel_id: u64,
        guild_id: Option<u64>,
        message: &str,
        lead: Duration,
    ) -> Result<Reminder, ReminderError> {
        if lead < MIN_LEAD {
            return Err(ReminderError::TooSoon);
        }
        if lead > MAX_LEAD {
            return Err(ReminderError::TooFar);
        }

        let message = message.trim();
        if message.is_empty() || message.len() > MAX_MESSAGE_LEN {
            return Err(ReminderError::InvalidMessage);
        }

        if self.store.list_for_user(user_id).await?.len() >= MAX_PENDING_PER_USER {
            return Err(ReminderError::TooManyPending);
        }

        let now = Utc::now();
        let reminder = Reminder {
            id: self.next_id.fetch_add(1, Ordering::AcqRel),
            user_id,
            channel_id,
            guild_id,
            message: message.to_string(),
            due_at: now + chrono::Duration::from_std(lead).unwrap_or(chrono::Duration::zero()),
            created_at: now,
        };
        self.store.add(reminder.clone()).await?;
        Ok(reminder)
    }

    /// A user's pending reminders, soonest first.
    pub async fn pending_for(&self, user_id: u64) -> Result<Vec<Reminder>, ReminderError> {
        let mut reminders = self.store.list_for_user(user_id).await?;
        reminders.sort_by_key(|r| r.due_at);
        Ok(reminders)
    }

    /// Cancel one of the caller's own reminders. A reminder belonging to
    /// someone else reads as not-found rather than forbidden.
    pub async fn cancel(&self, user_id: u64, id: u64) -> Result<Reminder, ReminderError> {
        let owned = self
            .store
            .list_for_user(user_id)
            .await?
            .into_iter()
            .any(|r| r.id == id);
        if !owned {
            return Err(ReminderError::NotFound(id));
        }
        self.store.remove(id).await?.ok_or(ReminderError::NotFound(id))
    }

    /// Take a due reminder for delivery, removing it from the store. `None`
    /// means the user cancelled it before the timer fired; the caller must
    /// not deliver in that case.
    pub async fn claim(&self, id: u64) -> Result<Option<Reminder>, ReminderError> {
        self.store.remove(id).await
    }
}
