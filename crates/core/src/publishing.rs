//! Status/publish rule engine for content items.
//!
//! Enforced transition graph:
//!
//! ```text
//! DRAFT ──▶ REVIEW ──▶ PUBLISHED ──▶ ARCHIVED
//!   ▲         │  ▲          │            │
//!   └─────────┘  └──────────┘            │
//!   ▲                                    │
//!   └────────────────────────────────────┘
//! ```
//!
//! - `DRAFT`     -> `REVIEW`
//! - `REVIEW`    -> `PUBLISHED`, `DRAFT` (send back)
//! - `PUBLISHED` -> `ARCHIVED`, `REVIEW` (reopen)
//! - `ARCHIVED`  -> `DRAFT` (reopen)
//!
//! Requesting the current status is a no-op. Entering `PUBLISHED` stamps
//! `published_at`; nothing ever clears it.

use serde::Serialize;

use crate::content::ContentStatus;
use crate::error::CoreError;
use crate::translation::TranslationStatus;
use crate::types::{DbId, Timestamp};

/// Statuses reachable in one step from `from`.
pub fn valid_transitions(from: ContentStatus) -> &'static [ContentStatus] {
    use ContentStatus::*;
    match from {
        Draft => &[Review],
        Review => &[Published, Draft],
        Published => &[Archived, Review],
        Archived => &[Draft],
    }
}

/// Validate that `from` -> `to` is an edge of the graph (or a no-op).
pub fn validate_transition(from: ContentStatus, to: ContentStatus) -> Result<(), CoreError> {
    if from == to || valid_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition {
            from: from.as_str(),
            to: to.as_str(),
        })
    }
}

/// Outcome of applying a requested status to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub status: ContentStatus,
    pub published_at: Option<Timestamp>,
    /// `true` when the status actually moved.
    pub changed: bool,
}

/// Apply an optional status request to the current state.
///
/// `published_at` is set to `now` only when the item moves into
/// `PUBLISHED` from another status; every other outcome carries the
/// existing value through unchanged.
pub fn plan_transition(
    current: ContentStatus,
    published_at: Option<Timestamp>,
    requested: Option<ContentStatus>,
    now: Timestamp,
) -> Result<StatusChange, CoreError> {
    let Some(next) = requested else {
        return Ok(StatusChange {
            status: current,
            published_at,
            changed: false,
        });
    };

    validate_transition(current, next)?;

    let changed = next != current;
    let published_at = if changed && next == ContentStatus::Published {
        Some(now)
    } else {
        published_at
    };

    Ok(StatusChange {
        status: next,
        published_at,
        changed,
    })
}

/// `published_at` for an item created directly in `status`.
pub fn initial_published_at(status: ContentStatus, now: Timestamp) -> Option<Timestamp> {
    (status == ContentStatus::Published).then_some(now)
}

/// Translations of archived content are read-only until it is reopened.
pub fn ensure_translations_editable(
    content_id: DbId,
    status: ContentStatus,
) -> Result<(), CoreError> {
    if status == ContentStatus::Archived {
        return Err(CoreError::Conflict(format!(
            "Content {content_id} is archived; its translations are read-only"
        )));
    }
    Ok(())
}

/// Completeness summary of a content item's translations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TranslationProgress {
    pub total: usize,
    pub not_started: usize,
    pub in_progress: usize,
    pub review: usize,
    pub completed: usize,
    /// `true` when at least one translation exists and all are completed.
    pub is_complete: bool,
}

/// Summarise translation statuses.
pub fn translation_progress<I>(statuses: I) -> TranslationProgress
where
    I: IntoIterator<Item = TranslationStatus>,
{
    let mut progress = TranslationProgress::default();
    for status in statuses {
        progress.total += 1;
        match status {
            TranslationStatus::NotStarted => progress.not_started += 1,
            TranslationStatus::InProgress => progress.in_progress += 1,
            TranslationStatus::Review => progress.review += 1,
            TranslationStatus::Completed => progress.completed += 1,
        }
    }
    progress.is_complete = progress.total > 0 && progress.completed == progress.total;
    progress
}
