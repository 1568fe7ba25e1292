use crate::config::AlertThresholds;
use crate::model::Alert;

/// One entry of an ordered rule table: a predicate plus an alert factory.
///
/// Rules are independent and evaluated in declared order; each appends zero
/// or one alert. The output is the concatenation in that order, never
/// reordered by severity.
pub struct AlertRule<M> {
    pub id: &'static str,
    pub applies: fn(&M, &AlertThresholds) -> bool,
    pub build: fn(&M, &AlertThresholds) -> Alert,
}

pub fn evaluate<M>(
    rules: &[AlertRule<M>],
    metrics: &M,
    thresholds: &AlertThresholds,
) -> Vec<Alert> {
    let mut alerts = Vec::new();
    for rule in rules {
        if (rule.applies)(metrics, thresholds) {
            alerts.push((rule.build)(metrics, thresholds));
        }
    }
    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AlertLevel;

    struct Fake {
        value: i64,
    }

    fn rules() -> Vec<AlertRule<Fake>> {
        vec![
            AlertRule {
                id: "acima_de_dez",
                applies: |m, _| m.value > 10,
                build: |m, _| Alert {
                    id: "acima_de_dez".into(),
                    level: AlertLevel::Amarelo,
                    title: "Acima de dez".into(),
                    description: format!("valor {}", m.value),
                    recommended_action: None,
                    link: None,
                },
            },
            AlertRule {
                id: "acima_de_cem",
                applies: |m, _| m.value > 100,
                build: |m, _| Alert {
                    id: "acima_de_cem".into(),
                    level: AlertLevel::Critico,
                    title: "Acima de cem".into(),
                    description: format!("valor {}", m.value),
                    recommended_action: None,
                    link: None,
                },
            },
        ]
    }

    #[test]
    fn rules_fire_independently_in_declared_order() {
        let thresholds = AlertThresholds::default();
        let alerts = evaluate(&rules(), &Fake { value: 150 }, &thresholds);
        assert_eq!(alerts.len(), 2);
        // Declared order, not severity order.
        assert_eq!(alerts[0].id, "acima_de_dez");
        assert_eq!(alerts[1].id, "acima_de_cem");
    }

    #[test]
    fn non_matching_rules_append_nothing() {
        let thresholds = AlertThresholds::default();
        assert!(evaluate(&rules(), &Fake { value: 5 }, &thresholds).is_empty());
    }
}
