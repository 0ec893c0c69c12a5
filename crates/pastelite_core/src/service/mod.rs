//! Paste lifecycle: validation, expiry computation, and counted reads.
//!
//! A paste is ACTIVE from creation until either its view budget is spent
//! (EXHAUSTED) or its TTL passes (EXPIRED). Both end states are terminal and
//! look identical to readers: [`PasteService::consume`] returns `None`.

use crate::clock::{Clock, SystemClock};
use crate::deadline::CommitGate;
use crate::error::AppError;
use crate::models::paste::{CreatePasteRequest, CreatedPaste, NewPaste, Paste, PasteView};
use crate::store::PasteStore;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

/// Availability predicate evaluated inside every store's consume transaction.
///
/// `false` once `now` is strictly past `expires_at`, or once `view_count` has
/// reached `max_views`.
pub fn is_available(record: &Paste, now: DateTime<Utc>) -> bool {
    record.is_available_at(now)
}

/// Entry point used by collaborators to create and read pastes.
///
/// Holds no mutable state of its own; concurrent callers coordinate solely
/// through the store's atomic consume.
pub struct PasteService<S: ?Sized, C = SystemClock> {
    store: Arc<S>,
    clock: C,
}

impl<S: PasteStore + ?Sized, C: Clock> PasteService<S, C> {
    pub fn new(store: Arc<S>, clock: C) -> Self {
        Self { store, clock }
    }

    /// Validate `request`, compute the absolute expiry, and persist the paste.
    ///
    /// # Errors
    /// [`AppError::Validation`] for blank content or non-positive limits (the
    /// store is not touched), or a storage error from the insert.
    pub fn create(&self, request: CreatePasteRequest) -> Result<CreatedPaste, AppError> {
        self.create_within(request, &CommitGate::new())
    }

    /// [`Self::create`] whose insert only lands if `gate` admits it.
    ///
    /// # Errors
    /// As for [`Self::create`], plus a storage error when `gate` was abandoned.
    pub fn create_within(
        &self,
        request: CreatePasteRequest,
        gate: &CommitGate,
    ) -> Result<CreatedPaste, AppError> {
        let now = self.clock.now();
        let draft = validate_create(request, now)?;
        let content_len = draft.content.len();

        let paste = self.store.insert(draft, gate)?;
        tracing::info!(
            paste_id = %paste.id,
            content_len,
            expires_at = ?paste.expires_at,
            max_views = ?paste.max_views,
            "Created paste"
        );
        Ok(CreatedPaste::from(&paste))
    }

    /// Serve one counted read of `id`.
    ///
    /// # Returns
    /// `Ok(None)` when the paste never existed, expired, or ran out of views.
    /// These cases are deliberately indistinguishable.
    ///
    /// # Errors
    /// Storage errors from the underlying consume.
    pub fn consume(&self, id: &str) -> Result<Option<PasteView>, AppError> {
        self.consume_within(id, &CommitGate::new())
    }

    /// [`Self::consume`] whose view is only counted if `gate` admits the
    /// commit. A refused gate leaves the paste untouched.
    ///
    /// # Errors
    /// Storage errors from the underlying consume, including a refused gate.
    pub fn consume_within(
        &self,
        id: &str,
        gate: &CommitGate,
    ) -> Result<Option<PasteView>, AppError> {
        let now = self.clock.now();
        match self.store.try_consume(id, now, gate)? {
            Some(paste) => {
                tracing::debug!(
                    paste_id = %paste.id,
                    view_count = paste.view_count,
                    "Served paste view"
                );
                Ok(Some(PasteView::from(paste)))
            }
            None => {
                tracing::debug!(paste_id = %id, "Paste unavailable");
                Ok(None)
            }
        }
    }

    /// Liveness of the backing store.
    pub fn ping(&self) -> Result<(), AppError> {
        self.store.ping()
    }
}

fn positive(field: &str, value: Option<i64>) -> Result<Option<i64>, AppError> {
    match value {
        Some(value) if value < 1 => Err(AppError::Validation(format!(
            "{} must be an integer >= 1",
            field
        ))),
        other => Ok(other),
    }
}

fn validate_create(request: CreatePasteRequest, now: DateTime<Utc>) -> Result<NewPaste, AppError> {
    if request.content.trim().is_empty() {
        return Err(AppError::Validation(
            "content is required and must be a non-empty string".to_string(),
        ));
    }

    let expires_at = match positive("ttl_seconds", request.ttl_seconds)? {
        Some(ttl) => Some(
            Duration::try_seconds(ttl)
                .and_then(|ttl| now.checked_add_signed(ttl))
                .ok_or_else(|| {
                    AppError::Validation("ttl_seconds is too large".to_string())
                })?,
        ),
        None => None,
    };

    let max_views = match positive("max_views", request.max_views)? {
        Some(max_views) => Some(u32::try_from(max_views).map_err(|_| {
            AppError::Validation(format!("max_views must be at most {}", u32::MAX))
        })?),
        None => None,
    };

    Ok(NewPaste {
        content: request.content,
        created_at: now,
        expires_at,
        max_views,
    })
}
