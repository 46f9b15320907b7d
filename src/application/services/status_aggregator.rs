use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::{HealthReport, HealthStatus, ServiceStatus};

/// Folds per-service readiness into a single verdict.
///
/// The report is healthy only when every tracked service is ready; an empty
/// map counts as healthy.
pub fn aggregate_status(
    services: &BTreeMap<String, bool>,
    checked_at: DateTime<Utc>,
) -> HealthReport {
    let statuses: BTreeMap<String, ServiceStatus> = services
        .iter()
        .map(|(name, &ready)| {
            (
                name.clone(),
                ServiceStatus {
                    service: name.clone(),
                    ready,
                    status: HealthStatus::from_ready(ready),
                    last_check: checked_at,
                },
            )
        })
        .collect();

    let all_ready = services.values().all(|&ready| ready);

    HealthReport {
        status: HealthStatus::from_ready(all_ready),
        checked_at,
        services: statuses,
    }
}
