use std::collections::BTreeMap;

use chrono::Utc;
use hovor::application::services::aggregate_status;
use hovor::domain::HealthStatus;

fn services(entries: &[(&str, bool)]) -> BTreeMap<String, bool> {
    entries
        .iter()
        .map(|(name, ready)| (name.to_string(), *ready))
        .collect()
}

#[test]
fn given_all_ready_when_aggregating_then_overall_is_healthy() {
    let report = aggregate_status(&services(&[("whisper", true), ("openai", true)]), Utc::now());

    assert_eq!(report.status, HealthStatus::Healthy);
    assert!(report.services.values().all(|s| s.ready));
}

#[test]
fn given_one_not_ready_when_aggregating_then_overall_is_degraded() {
    let now = Utc::now();
    let report = aggregate_status(&services(&[("whisper", false), ("openai", true)]), now);

    assert_eq!(report.status, HealthStatus::Degraded);
    assert_eq!(report.services["whisper"].status, HealthStatus::Degraded);
    assert_eq!(report.services["openai"].status, HealthStatus::Healthy);
    assert_eq!(report.services["whisper"].last_check, now);
    assert_eq!(report.checked_at, now);
}

#[test]
fn given_no_services_when_aggregating_then_overall_is_healthy() {
    let report = aggregate_status(&BTreeMap::new(), Utc::now());

    assert_eq!(report.status, HealthStatus::Healthy);
    assert!(report.services.is_empty());
}
