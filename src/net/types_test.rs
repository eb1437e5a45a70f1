use super::*;
use serde_json::json;

// =============================================================
// AuthResponse
// =============================================================

#[test]
fn auth_response_keeps_unknown_fields() {
    let resp = AuthResponse::from(json!({ "token": "T", "user": { "id": 1 }, "expiresIn": 3600 }));
    assert_eq!(resp.token(), Some("T"));
    assert_eq!(resp.user(), Some(&json!({ "id": 1 })));
    assert_eq!(resp.get("expiresIn"), Some(&json!(3600)));
}

#[test]
fn auth_response_without_token() {
    let resp = AuthResponse::from(json!({ "message": "check your inbox", "user": null }));
    assert!(resp.token().is_none());
    assert!(resp.user().is_none());
}

#[test]
fn auth_response_odd_shapes_pass_through() {
    let numeric = AuthResponse::from(json!({ "token": 42 }));
    assert!(numeric.token().is_none());
    assert_eq!(numeric.body(), &json!({ "token": 42 }));

    let bare = AuthResponse::from(json!("ok"));
    assert!(bare.token().is_none());
    assert_eq!(bare.into_body(), json!("ok"));
}

// =============================================================
// PeriodLogEntry
// =============================================================

#[test]
fn period_entry_serializes_camel_case_and_skips_unset() {
    let entry = PeriodLogEntry {
        end_date: Some("2024-03-05".to_owned()),
        flow: Some(FlowIntensity::Heavy),
        ..PeriodLogEntry::starting("2024-03-01")
    };
    assert_eq!(
        serde_json::to_value(&entry).unwrap(),
        json!({ "startDate": "2024-03-01", "endDate": "2024-03-05", "flow": "heavy" })
    );
}

#[test]
fn period_entry_start_only_is_valid() {
    assert!(PeriodLogEntry::starting("2024-03-01").validate().is_ok());
}

#[test]
fn period_entry_rejects_malformed_start() {
    let err = PeriodLogEntry::starting("03/01/2024").validate().unwrap_err();
    assert_eq!(err.to_string(), "Invalid start date: expected YYYY-MM-DD.");
}

#[test]
fn period_entry_rejects_end_before_start() {
    let entry = PeriodLogEntry { end_date: Some("2024-02-28".to_owned()), ..PeriodLogEntry::starting("2024-03-01") };
    assert!(matches!(entry.validate(), Err(ApiError::Invalid(_))));
}

#[test]
fn period_entry_length_bounds() {
    let ten_days = PeriodLogEntry { end_date: Some("2024-03-10".to_owned()), ..PeriodLogEntry::starting("2024-03-01") };
    assert!(ten_days.validate().is_ok());

    let same_day = PeriodLogEntry { end_date: Some("2024-03-01".to_owned()), ..PeriodLogEntry::starting("2024-03-01") };
    assert!(same_day.validate().is_ok());

    let eleven_days =
        PeriodLogEntry { end_date: Some("2024-03-11".to_owned()), ..PeriodLogEntry::starting("2024-03-01") };
    assert_eq!(
        eleven_days.validate().unwrap_err().to_string(),
        "Period length must be between 1 and 10 days."
    );
}

// =============================================================
// SymptomQuery
// =============================================================

#[test]
fn symptom_query_pairs_follow_backend_order() {
    let query = SymptomQuery { date: Some("d".to_owned()), start: Some("s".to_owned()), end: Some("e".to_owned()) };
    assert_eq!(query.pairs(), vec![("date", "d"), ("startDate", "s"), ("endDate", "e")]);
}

#[test]
fn symptom_query_empty_has_no_pairs() {
    assert!(SymptomQuery::default().pairs().is_empty());
}

// =============================================================
// CyclePhase
// =============================================================

#[test]
fn cycle_phase_boundaries() {
    assert_eq!(CyclePhase::for_day(0), None);
    assert_eq!(CyclePhase::for_day(1), Some(CyclePhase::Menstrual));
    assert_eq!(CyclePhase::for_day(5), Some(CyclePhase::Menstrual));
    assert_eq!(CyclePhase::for_day(6), Some(CyclePhase::Follicular));
    assert_eq!(CyclePhase::for_day(13), Some(CyclePhase::Follicular));
    assert_eq!(CyclePhase::for_day(14), Some(CyclePhase::Ovulation));
    assert_eq!(CyclePhase::for_day(16), Some(CyclePhase::Ovulation));
    assert_eq!(CyclePhase::for_day(17), Some(CyclePhase::Luteal));
    assert_eq!(CyclePhase::for_day(40), Some(CyclePhase::Luteal));
}
