//! Flattening of an analysis into key/value rows for line-oriented output
//! (shell pipelines, diffing two runs, spreadsheet import).

use prodmix_solver::SolveStatus;

use crate::analysis::{AnalysisResult, ShadowPrice};

/// One key/value line of the flat report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub key: String,
    pub value: String,
}

impl ReportRow {
    fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

pub fn status_label(status: SolveStatus) -> &'static str {
    match status {
        SolveStatus::Optimal => "optimal",
        SolveStatus::Infeasible => "infeasible",
        SolveStatus::Unbounded => "unbounded",
        SolveStatus::Error => "error",
    }
}

/// Flatten an analysis into stable dotted keys, in presentation order.
pub fn flatten(analysis: &AnalysisResult) -> Vec<ReportRow> {
    let mut rows = vec![
        ReportRow::new("problem", analysis.problem.clone()),
        ReportRow::new("status", status_label(analysis.status)),
    ];

    if let Some(explanation) = &analysis.explanation {
        rows.push(ReportRow::new("explanation", explanation.clone()));
    }
    if let Some(objective) = analysis.objective_value {
        rows.push(ReportRow::new("objective", format_number(objective)));
    }

    for q in &analysis.quantities {
        rows.push(ReportRow::new(
            format!("quantity.{}", q.product),
            format_number(q.quantity),
        ));
        rows.push(ReportRow::new(
            format!("unit_value.{}", q.product),
            format_number(q.unit_value),
        ));
        rows.push(ReportRow::new(
            format!("value.{}", q.product),
            format_number(q.total_value),
        ));
    }

    for usage in &analysis.resources {
        let prefix = format!("resource.{}", usage.resource);
        rows.push(ReportRow::new(
            format!("{prefix}.used"),
            format_number(usage.used),
        ));
        rows.push(ReportRow::new(
            format!("{prefix}.available"),
            format_number(usage.available),
        ));
        rows.push(ReportRow::new(
            format!("{prefix}.slack"),
            format_number(usage.slack),
        ));
        rows.push(ReportRow::new(
            format!("{prefix}.utilization_pct"),
            format_number(usage.utilization_pct),
        ));
        rows.push(ReportRow::new(
            format!("{prefix}.binding"),
            if usage.is_binding { "true" } else { "false" },
        ));
    }

    for entry in &analysis.shadow_prices {
        let value = match entry.price {
            ShadowPrice::PerUnit(price) => format_number(price),
            ShadowPrice::NotApplicable => "n/a".to_string(),
        };
        rows.push(ReportRow::new(
            format!("shadow_price.{}", entry.resource),
            value,
        ));
    }

    rows
}

/// Up to four decimals, trailing zeros trimmed.
pub fn format_number(value: f64) -> String {
    let text = format!("{:.4}", value);
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{ProductQuantity, ResourceUsage, ShadowPriceEntry};

    fn optimal_analysis() -> AnalysisResult {
        AnalysisResult {
            problem: "wyndor".to_string(),
            status: SolveStatus::Optimal,
            explanation: None,
            objective_value: Some(3600.0),
            quantities: vec![ProductQuantity {
                product: "doors".to_string(),
                quantity: 2.0,
                unit_value: 300.0,
                total_value: 600.0,
            }],
            resources: vec![ResourceUsage {
                resource: "plant_1".to_string(),
                used: 2.0,
                available: 4.0,
                slack: 2.0,
                utilization_pct: 50.0,
                is_binding: false,
            }],
            shadow_prices: vec![ShadowPriceEntry {
                resource: "plant_1".to_string(),
                price: ShadowPrice::PerUnit(0.0),
            }],
        }
    }

    fn value_of<'a>(rows: &'a [ReportRow], key: &str) -> &'a str {
        rows.iter()
            .find(|row| row.key == key)
            .map(|row| row.value.as_str())
            .unwrap_or_else(|| panic!("missing key {key}"))
    }

    #[test]
    fn flattens_optimal_analysis() {
        let rows = flatten(&optimal_analysis());

        assert_eq!(value_of(&rows, "problem"), "wyndor");
        assert_eq!(value_of(&rows, "status"), "optimal");
        assert_eq!(value_of(&rows, "objective"), "3600");
        assert_eq!(value_of(&rows, "quantity.doors"), "2");
        assert_eq!(value_of(&rows, "unit_value.doors"), "300");
        assert_eq!(value_of(&rows, "value.doors"), "600");
        assert_eq!(value_of(&rows, "resource.plant_1.slack"), "2");
        assert_eq!(value_of(&rows, "resource.plant_1.utilization_pct"), "50");
        assert_eq!(value_of(&rows, "resource.plant_1.binding"), "false");
        assert_eq!(value_of(&rows, "shadow_price.plant_1"), "0");
    }

    #[test]
    fn flattens_failure_with_explanation() {
        let analysis = AnalysisResult {
            problem: "bad".to_string(),
            status: SolveStatus::Infeasible,
            explanation: Some("no combination works".to_string()),
            objective_value: None,
            quantities: Vec::new(),
            resources: Vec::new(),
            shadow_prices: Vec::new(),
        };

        let rows = flatten(&analysis);
        assert_eq!(value_of(&rows, "status"), "infeasible");
        assert_eq!(value_of(&rows, "explanation"), "no combination works");
        assert!(rows.iter().all(|row| row.key != "objective"));
    }

    #[test]
    fn renders_unpriced_capacities_as_na() {
        let mut analysis = optimal_analysis();
        analysis.shadow_prices[0].price = ShadowPrice::NotApplicable;
        let rows = flatten(&analysis);
        assert_eq!(value_of(&rows, "shadow_price.plant_1"), "n/a");
    }

    #[test]
    fn trims_trailing_zeros() {
        assert_eq!(format_number(3600.0), "3600");
        assert_eq!(format_number(66.666666), "66.6667");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(0.0), "0");
    }
}
