//! Database integration tests.

use super::*;
use crate::deadline::CommitGate;
use crate::models::paste::*;
use crate::test_support::{setup_temp_db, t0};
use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, Barrier};
use std::thread;

fn draft(content: &str, expires_at: Option<DateTime<Utc>>, max_views: Option<u32>) -> NewPaste {
    NewPaste {
        content: content.to_string(),
        created_at: t0(),
        expires_at,
        max_views,
    }
}

/// A gate nobody abandons.
fn gate() -> CommitGate {
    CommitGate::new()
}
