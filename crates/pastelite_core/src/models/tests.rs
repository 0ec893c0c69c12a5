//! Model-level unit tests.

use super::paste::*;
use chrono::{DateTime, Duration, TimeZone, Utc};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 6, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn paste(expires_at: Option<DateTime<Utc>>, max_views: Option<u32>, view_count: u32) -> Paste {
    Paste {
        id: "model-test".to_string(),
        content: "hello".to_string(),
        created_at: t0(),
        expires_at,
        max_views,
        view_count,
    }
}

#[test]
fn unlimited_paste_without_ttl_is_always_available() {
    let record = paste(None, None, 10_000);
    assert!(record.is_available_at(t0() + Duration::days(3650)));
    assert_eq!(record.remaining_views(), None);
}

#[test]
fn expiry_is_strictly_after_expires_at() {
    let expires_at = t0() + Duration::seconds(60);
    let record = paste(Some(expires_at), None, 0);

    assert!(record.is_available_at(expires_at - Duration::milliseconds(1)));
    assert!(record.is_available_at(expires_at), "exact expiry instant is still readable");
    assert!(!record.is_available_at(expires_at + Duration::milliseconds(1)));
    assert!(record.is_expired_at(expires_at + Duration::milliseconds(1)));
}

#[test]
fn view_budget_uses_pre_increment_count() {
    assert!(paste(None, Some(2), 0).is_available_at(t0()));
    assert!(paste(None, Some(2), 1).is_available_at(t0()));

    let spent = paste(None, Some(2), 2);
    assert!(spent.is_exhausted());
    assert!(!spent.is_available_at(t0()));
}

#[test]
fn either_limit_alone_makes_paste_unavailable() {
    let far_future = Some(t0() + Duration::days(1));
    assert!(!paste(far_future, Some(1), 1).is_available_at(t0()));

    let past = Some(t0() - Duration::seconds(1));
    assert!(!paste(past, Some(5), 0).is_available_at(t0()));
}

#[test]
fn paste_view_reports_remaining_budget_after_count() {
    let view = PasteView::from(paste(Some(t0()), Some(3), 1));
    assert_eq!(view.remaining_views, Some(2));
    assert_eq!(view.expires_at, Some(t0()));
    assert_eq!(view.content, "hello");
}

#[test]
fn from_new_starts_at_zero_views() {
    let draft = NewPaste {
        content: "draft".to_string(),
        created_at: t0(),
        expires_at: None,
        max_views: Some(4),
    };
    let record = Paste::from_new("id-1".to_string(), draft);
    assert_eq!(record.view_count, 0);
    assert_eq!(record.remaining_views(), Some(4));
    assert_eq!(CreatedPaste::from(&record).max_views, Some(4));
}

#[test]
fn create_request_accepts_missing_and_null_limits() {
    let req: CreatePasteRequest =
        serde_json::from_str(r#"{"content":"x","ttl_seconds":null}"#).expect("parse");
    assert_eq!(req.ttl_seconds, None);
    assert_eq!(req.max_views, None);
}

#[test]
fn paste_view_serializes_unlimited_as_null() {
    let view = PasteView {
        content: "c".to_string(),
        remaining_views: None,
        expires_at: None,
    };
    let json = serde_json::to_value(&view).expect("json");
    assert!(json["remaining_views"].is_null());
    assert!(json["expires_at"].is_null());
}
