//! Measurement batch ingestion
//!
//! Turns a batch of tagged measurements into bounded per-sensor histories and
//! runs the evaluator over each of them.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info};

use crate::alerting::AlertEvaluator;
use crate::error::{Error, Result};
use crate::models::{Measurement, Reading, SensorReport, Verdict};

/// Parse a JSON array of measurements
pub fn parse_batch(json: &str) -> Result<Vec<Measurement>> {
    let measurements: Vec<Measurement> = serde_json::from_str(json)?;

    if measurements.is_empty() {
        return Err(Error::validation("no measurements provided"));
    }

    debug!(count = measurements.len(), "Parsed measurement batch");

    Ok(measurements)
}

/// Read and parse a measurement batch file
pub fn load_batch(path: impl AsRef<Path>) -> Result<Vec<Measurement>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;

    info!(path = %path.display(), "Loading measurement batch");

    parse_batch(&contents)
}

/// Group measurements by sensor, keeping at most `history_limit` readings each.
///
/// Each history is ordered newest first. Readings sharing a timestamp keep their
/// batch order.
pub fn group_by_sensor(
    measurements: Vec<Measurement>,
    history_limit: usize,
) -> BTreeMap<String, Vec<Reading>> {
    let mut histories: BTreeMap<String, Vec<Reading>> = BTreeMap::new();

    for measurement in measurements {
        let code = measurement.sensor_code.clone();
        histories
            .entry(code)
            .or_default()
            .push(measurement.into_reading());
    }

    for history in histories.values_mut() {
        history.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        history.truncate(history_limit);
    }

    histories
}

/// Evaluate every sensor in a batch, returning reports sorted by sensor code
pub fn evaluate_batch(
    evaluator: &AlertEvaluator,
    measurements: Vec<Measurement>,
    history_limit: usize,
) -> Vec<SensorReport> {
    group_by_sensor(measurements, history_limit)
        .iter()
        .map(|(code, history)| evaluator.assess(code, history))
        .collect()
}

/// Most severe verdict across reports, `None` when there are none
pub fn highest_verdict(reports: &[SensorReport]) -> Verdict {
    reports
        .iter()
        .map(|r| r.verdict)
        .max()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::io::Write;

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn measurement(code: &str, value: i64, minutes_ago: i64) -> Measurement {
        Measurement {
            sensor_code: code.to_string(),
            measured_at: base_time() - Duration::minutes(minutes_ago),
            value: Decimal::from(value),
        }
    }

    #[test]
    fn test_parse_batch() {
        let json = r#"[
            {"sensor_code": "PRESS-7", "measured_at": "2024-06-01T09:00:00-03:00", "value": "0.5"},
            {"sensor_code": "PRESS-7", "measured_at": "2024-06-01T11:59:00Z", "value": 55}
        ]"#;

        let batch = parse_batch(json).unwrap();

        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].measured_at, base_time());
        assert_eq!(batch[0].value, Decimal::new(5, 1));
        assert_eq!(batch[1].value, Decimal::from(55));
    }

    #[test]
    fn test_parse_empty_batch_rejected() {
        let err = parse_batch("[]").unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(err.to_string(), "Validation error: no measurements provided");
    }

    #[test]
    fn test_parse_malformed_batch() {
        assert!(matches!(
            parse_batch(r#"[{"sensor_code": "X"}]"#),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn test_load_batch_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"sensor_code": "T1", "measured_at": "2024-06-01T12:00:00Z", "value": "25"}}]"#
        )
        .unwrap();

        let batch = load_batch(file.path()).unwrap();

        assert_eq!(batch, vec![measurement("T1", 25, 0)]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        assert!(matches!(
            load_batch(dir.path().join("missing.json")),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_group_by_sensor_bounds_history() {
        let measurements = vec![
            measurement("B", 10, 3),
            measurement("A", 1, 5),
            measurement("A", 2, 1),
            measurement("A", 3, 9),
            measurement("A", 4, 0),
        ];

        let histories = group_by_sensor(measurements, 2);

        assert_eq!(histories.keys().collect::<Vec<_>>(), vec!["A", "B"]);
        let a: Vec<Decimal> = histories["A"].iter().map(|r| r.value).collect();
        assert_eq!(a, vec![Decimal::from(4), Decimal::from(2)]);
        assert_eq!(histories["B"].len(), 1);
    }

    #[test]
    fn test_evaluate_batch_per_sensor() {
        let mut measurements: Vec<Measurement> =
            (0..6).map(|i| measurement("HOT", 55, i)).collect();
        measurements.extend((0..50).map(|i| measurement("DRIFT", 50, i)));
        measurements.extend((0..50).map(|i| measurement("OK", 25, i)));

        let reports = evaluate_batch(&AlertEvaluator::new(), measurements, 50);

        let verdicts: Vec<(&str, Verdict)> = reports
            .iter()
            .map(|r| (r.sensor_code.as_str(), r.verdict))
            .collect();
        assert_eq!(
            verdicts,
            vec![
                ("DRIFT", Verdict::Attention),
                ("HOT", Verdict::Critical),
                ("OK", Verdict::None),
            ]
        );
        assert_eq!(highest_verdict(&reports), Verdict::Critical);
    }

    #[test]
    fn test_history_limit_hides_old_drift() {
        let measurements: Vec<Measurement> = (0..50).map(|i| measurement("S", 50, i)).collect();

        let reports = evaluate_batch(&AlertEvaluator::new(), measurements, 10);

        assert_eq!(reports[0].readings_considered, 10);
        assert_eq!(reports[0].window_mean, None);
        assert_eq!(reports[0].verdict, Verdict::None);
    }

    #[test]
    fn test_highest_verdict_of_nothing() {
        assert_eq!(highest_verdict(&[]), Verdict::None);
    }
}
