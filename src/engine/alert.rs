// ==========================================
// Cycle Radar - alert generator
// ==========================================
// Deficit  -> always one Rupture alert
// Surplus  -> one Waste alert only when |variance| > waste threshold
// Assertive -> never
// ==========================================

use crate::config::analytics_config::{DEFAULT_LOCALE, DEFAULT_WASTE_ALERT_PCT};
use crate::domain::cycle::Cycle;
use crate::domain::metrics::{CycleMetric, VarianceClassification};
use crate::domain::report::Alert;
use crate::domain::types::{AlertKind, VarianceBucket};
use crate::i18n::t_for;

// ==========================================
// AlertGenerator
// ==========================================
#[derive(Debug, Clone)]
pub struct AlertGenerator {
    waste_alert_pct: f64,
    locale: String,
}

impl AlertGenerator {
    pub fn new(waste_alert_pct: f64, locale: &str) -> Self {
        Self {
            waste_alert_pct,
            locale: locale.to_string(),
        }
    }

    /// Alert for one classified cycle, if any
    pub fn generate(
        &self,
        cycle: &Cycle,
        metric: &CycleMetric,
        classification: &VarianceClassification,
    ) -> Option<Alert> {
        match classification.bucket {
            VarianceBucket::Assertive => None,
            VarianceBucket::Deficit => {
                let meals = metric.shortfall_meals().round();
                Some(self.build(
                    AlertKind::Rupture,
                    cycle,
                    classification.variance_pct,
                    meals,
                ))
            }
            VarianceBucket::Surplus => {
                let magnitude = classification.variance_pct.abs();
                if magnitude <= self.waste_alert_pct {
                    return None;
                }
                let meals = metric.excess_meals().round();
                Some(self.build(AlertKind::Waste, cycle, magnitude, meals))
            }
        }
    }

    fn build(&self, kind: AlertKind, cycle: &Cycle, magnitude: f64, meals: f64) -> Alert {
        let pct = format!("{:.1}", magnitude);
        let meals = format!("{}", meals as i64);
        let message = t_for(
            &self.locale,
            kind.message_key(),
            &[("pct", pct.as_str()), ("meals", meals.as_str())],
        );

        Alert {
            kind,
            branch_id: cycle.branch_id,
            cycle_id: cycle.id,
            message,
            magnitude,
            occurred_on: cycle.week_start,
        }
    }
}

impl Default for AlertGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_WASTE_ALERT_PCT, DEFAULT_LOCALE)
    }
}

/// Order alerts most recent first
///
/// Stable: alerts sharing a date keep their encounter order.
pub fn rank_alerts(mut alerts: Vec<Alert>) -> Vec<Alert> {
    alerts.sort_by(|a, b| b.occurred_on.cmp(&a.occurred_on));
    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::classifier::VarianceClassifier;
    use chrono::NaiveDate;

    fn cycle(id: i64, day: u32) -> Cycle {
        let start = NaiveDate::from_ymd_opt(2025, 5, day).unwrap();
        Cycle {
            id,
            branch_id: 3,
            week_start: start,
            week_end: start + chrono::Duration::days(6),
            cancelled: false,
            sent_at: None,
            completed_at: None,
        }
    }

    fn metric(id: i64, planned: f64, realized: f64) -> CycleMetric {
        CycleMetric {
            cycle_id: id,
            branch_id: Some(3),
            total_planned: planned,
            total_realized: realized,
            efficiency_pct: realized * 100.0 / planned,
            planned_cost: 0.0,
            realized_cost: 0.0,
            cost_per_realized_meal: 0.0,
            record_count: 7,
        }
    }

    fn alert_for(planned: f64, realized: f64) -> Option<Alert> {
        let c = cycle(1, 5);
        let m = metric(1, planned, realized);
        let class = VarianceClassifier::default().classify(&m);
        AlertGenerator::default().generate(&c, &m, &class)
    }

    #[test]
    fn test_assertive_never_alerts() {
        assert!(alert_for(100.0, 105.0).is_none());
        assert!(alert_for(100.0, 95.0).is_none());
    }

    #[test]
    fn test_deficit_always_alerts() {
        let alert = alert_for(10_000.0, 10_501.0).unwrap();
        assert_eq!(alert.kind, AlertKind::Rupture);
        assert!((alert.magnitude - 5.01).abs() < 1e-9);
        assert_eq!(alert.message, "Déficit de 5.0% - faltaram 501 refeições");
        assert_eq!(alert.occurred_on, NaiveDate::from_ymd_opt(2025, 5, 5).unwrap());
    }

    #[test]
    fn test_minor_surplus_is_not_alert_worthy() {
        assert!(alert_for(100.0, 94.0).is_none());
        assert!(alert_for(100.0, 90.0).is_none());
    }

    #[test]
    fn test_significant_surplus_alerts_with_positive_magnitude() {
        let alert = alert_for(100.0, 89.0).unwrap();
        assert_eq!(alert.kind, AlertKind::Waste);
        assert_eq!(alert.magnitude, 11.0);
        assert_eq!(alert.message, "Desperdício de 11.0% - sobraram 11 refeições");
    }

    #[test]
    fn test_english_messages() {
        let c = cycle(2, 12);
        let m = metric(2, 200.0, 150.0);
        let class = VarianceClassifier::default().classify(&m);
        let alert = AlertGenerator::new(10.0, "en").generate(&c, &m, &class).unwrap();
        assert_eq!(alert.message, "Waste of 25.0% - 50 meals left over");
    }

    #[test]
    fn test_rank_is_stable_and_descending() {
        let gen = AlertGenerator::default();
        let mut alerts = Vec::new();
        for (id, day) in [(1, 5), (2, 19), (3, 12), (4, 19)] {
            let c = cycle(id, day);
            let m = metric(id, 100.0, 120.0);
            let class = VarianceClassifier::default().classify(&m);
            alerts.push(gen.generate(&c, &m, &class).unwrap());
        }

        let ranked = rank_alerts(alerts);
        let ids: Vec<i64> = ranked.iter().map(|a| a.cycle_id).collect();
        assert_eq!(ids, vec![2, 4, 3, 1]);
    }
}
