use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use cron::Schedule;

use crate::SchedError;

/// Convert a 5-field cron expression to the 7-field format the `cron` crate expects.
///
/// Standard cron: `min hour day month weekday`
/// Cron crate:    `sec min hour day month weekday year`
pub fn normalize_cron_expression(expr: &str) -> String {
    let fields: Vec<&str> = expr.split_whitespace().collect();
    match fields.len() {
        5 => format!("0 {expr} *"),
        6 => format!("0 {expr}"),
        _ => expr.to_string(),
    }
}

/// A parsed cron schedule for one job.
#[derive(Debug, Clone)]
pub struct JobSchedule {
    expression: String,
    schedule: Schedule,
}

impl JobSchedule {
    /// The expression as declared in the params file.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Next occurrence strictly after `now`.
    pub fn next_after(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.schedule.after(&now).next()
    }

    /// How long to sleep from `now` until the next occurrence.
    pub fn delay_from(&self, now: DateTime<Utc>) -> Result<Duration, SchedError> {
        let next = self
            .next_after(now)
            .ok_or_else(|| SchedError::NoUpcoming(self.expression.clone()))?;
        Ok((next - now)
            .to_std()
            .unwrap_or(Duration::from_millis(100)))
    }
}

impl FromStr for JobSchedule {
    type Err = SchedError;

    fn from_str(expr: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_cron_expression(expr);
        let schedule =
            normalized
                .parse::<Schedule>()
                .map_err(|e| SchedError::InvalidExpression {
                    expr: expr.to_string(),
                    reason: e.to_string(),
                })?;
        Ok(Self {
            expression: expr.to_string(),
            schedule,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn normalize_5_field() {
        assert_eq!(normalize_cron_expression("30 21 * * *"), "0 30 21 * * * *");
    }

    #[test]
    fn normalize_6_field() {
        assert_eq!(normalize_cron_expression("0 30 21 * * *"), "0 0 30 21 * * *");
    }

    #[test]
    fn normalize_7_field_passthrough() {
        assert_eq!(
            normalize_cron_expression("0 30 21 * * * *"),
            "0 30 21 * * * *"
        );
    }

    #[test]
    fn parses_standard_expression() {
        let schedule: JobSchedule = "30 21 * * *".parse().unwrap();
        assert_eq!(schedule.expression(), "30 21 * * *");
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            "not a cron".parse::<JobSchedule>(),
            Err(SchedError::InvalidExpression { .. })
        ));
    }

    #[test]
    fn next_after_daily_schedule() {
        let schedule: JobSchedule = "30 21 * * *".parse().unwrap();
        let now = Utc.with_ymd_and_hms(2026, 8, 28, 12, 0, 0).unwrap();
        let next = schedule.next_after(now).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2026, 8, 28, 21, 30, 0).unwrap());

        // past today's occurrence it rolls to tomorrow
        let later = Utc.with_ymd_and_hms(2026, 8, 28, 22, 0, 0).unwrap();
        let next = schedule.next_after(later).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2026, 8, 29, 21, 30, 0).unwrap());
    }

    #[test]
    fn delay_is_positive() {
        let schedule: JobSchedule = "30 21 * * *".parse().unwrap();
        let now = Utc.with_ymd_and_hms(2026, 8, 28, 21, 29, 0).unwrap();
        let delay = schedule.delay_from(now).unwrap();
        assert_eq!(delay, Duration::from_secs(60));
    }
}
