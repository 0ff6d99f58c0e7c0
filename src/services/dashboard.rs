use crate::{
    error::Result,
    models::{hive::Hive, task::Task},
    repositories::{hive as hive_repo, task as task_repo},
    state::AppState,
};
use serde::Serialize;
use uuid::Uuid;

/// How many upcoming tasks the dashboard shows.
const UPCOMING_TASK_LIMIT: i64 = 4;

/// Scores hive temperature: 100 in the 32-35°C brood-nest band, 70 in the
/// tolerable 30-37°C band, 40 otherwise. Missing readings score 40, the
/// conservative bucket.
fn temp_score(temperature: Option<f64>) -> f64 {
    match temperature {
        Some(t) if (32.0..=35.0).contains(&t) => 100.0,
        Some(t) if (30.0..=37.0).contains(&t) => 70.0,
        _ => 40.0,
    }
}

/// Scores hive humidity: 100 in 40-60%, 70 in 30-70%, 40 otherwise or when
/// missing.
fn humidity_score(humidity: Option<f64>) -> f64 {
    match humidity {
        Some(h) if (40.0..=60.0).contains(&h) => 100.0,
        Some(h) if (30.0..=70.0).contains(&h) => 70.0,
        _ => 40.0,
    }
}

/// Scores bee activity: the raw percentage, 0 when missing. Clamped so a
/// bad sensor reading cannot push the composite past 100.
fn activity_score(activity: Option<f64>) -> f64 {
    activity.unwrap_or(0.0).clamp(0.0, 100.0)
}

/// Computes the 0-100 composite health score for a hive snapshot.
///
/// Pure and deterministic; rounding is half-away-from-zero.
pub fn health_score(hive: &Hive) -> u8 {
    let total = temp_score(hive.temperature)
        + humidity_score(hive.humidity)
        + activity_score(hive.activity);
    (total / 3.0).round() as u8
}

/// The rounded mean health score over a collection of hives, 0 when empty.
pub fn average_health_score(hives: &[Hive]) -> u8 {
    if hives.is_empty() {
        return 0;
    }

    let sum: f64 = hives.iter().map(|h| health_score(h) as f64).sum();
    (sum / hives.len() as f64).round() as u8
}

/// Counts hives whose status is warning or critical.
pub fn active_alert_count(hives: &[Hive]) -> usize {
    hives
        .iter()
        .filter(|h| h.status.is_some_and(|s| s.is_alert()))
        .count()
}

/// A hive together with its computed health score.
#[derive(Serialize)]
pub struct ScoredHive {
    #[serde(flatten)]
    pub hive: Hive,
    pub health_score: u8,
}

/// The dashboard aggregate.
#[derive(Serialize)]
pub struct DashboardSummary {
    pub total_hives: usize,
    pub average_health_score: u8,
    pub active_alerts: usize,
    pub hives: Vec<ScoredHive>,
    pub upcoming_tasks: Vec<Task>,
}

/// Assembles the dashboard for a user: hive list (newest first) with
/// per-hive scores, aggregate statistics, and the next few incomplete
/// tasks in due-date order.
pub async fn summary(state: &AppState, user_id: Uuid) -> Result<DashboardSummary> {
    let hives = hive_repo::list_hives(&state.db, user_id).await?;
    let upcoming_tasks = task_repo::upcoming_tasks(&state.db, user_id, UPCOMING_TASK_LIMIT).await?;

    let total_hives = hives.len();
    let average = average_health_score(&hives);
    let alerts = active_alert_count(&hives);

    let hives = hives
        .into_iter()
        .map(|hive| ScoredHive {
            health_score: health_score(&hive),
            hive,
        })
        .collect();

    Ok(DashboardSummary {
        total_hives,
        average_health_score: average,
        active_alerts: alerts,
        hives,
        upcoming_tasks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::hive::HiveStatus;
    use chrono::Utc;

    fn hive(
        status: Option<HiveStatus>,
        temperature: Option<f64>,
        humidity: Option<f64>,
        activity: Option<f64>,
    ) -> Hive {
        Hive {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Test hive".to_string(),
            location: "Orchard".to_string(),
            status,
            temperature,
            humidity,
            weight: None,
            activity,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn perfect_telemetry_scores_high() {
        // (100 + 100 + 90) / 3 = 96.67, rounds to 97
        let h = hive(None, Some(34.0), Some(50.0), Some(90.0));
        assert_eq!(health_score(&h), 97);
    }

    #[test]
    fn tolerable_bands_score_seventy() {
        let h = hive(None, Some(36.0), Some(65.0), Some(50.0));
        // (70 + 70 + 50) / 3 = 63.33 -> 63
        assert_eq!(health_score(&h), 63);
    }

    #[test]
    fn missing_telemetry_scores_conservatively() {
        let h = hive(None, None, None, None);
        // (40 + 40 + 0) / 3 = 26.67 -> 27
        assert_eq!(health_score(&h), 27);
    }

    #[test]
    fn out_of_range_readings_score_forty() {
        let h = hive(None, Some(28.0), Some(75.0), Some(10.0));
        // (40 + 40 + 10) / 3 = 30
        assert_eq!(health_score(&h), 30);
    }

    #[test]
    fn health_score_stays_in_bounds() {
        let cases = [
            hive(None, Some(34.0), Some(50.0), Some(100.0)),
            hive(None, Some(34.0), Some(50.0), Some(250.0)),
            hive(None, Some(-10.0), Some(200.0), Some(-5.0)),
            hive(None, None, None, Some(f64::MAX)),
        ];
        for h in &cases {
            assert!(health_score(h) <= 100);
        }
    }

    #[test]
    fn average_of_empty_collection_is_zero() {
        assert_eq!(average_health_score(&[]), 0);
    }

    #[test]
    fn average_rounds_the_mean() {
        let hives = vec![
            hive(None, Some(34.0), Some(50.0), Some(100.0)), // 100
            hive(None, None, None, None),                    // 27
        ];
        // (100 + 27) / 2 = 63.5 -> 64
        assert_eq!(average_health_score(&hives), 64);
    }

    #[test]
    fn alert_count_only_counts_warning_and_critical() {
        let hives = vec![
            hive(Some(HiveStatus::Healthy), None, None, None),
            hive(Some(HiveStatus::Warning), None, None, None),
            hive(Some(HiveStatus::Critical), None, None, None),
            hive(None, None, None, None),
        ];
        assert_eq!(active_alert_count(&hives), 2);
    }
}
