//! Case counts and rankings.
//!
//! Rankings sort by count descending with ties broken alphabetically so
//! the output is stable across runs. Blank labels are not counted.

use std::collections::BTreeMap;

use conflict_map_analytics_models::{
    CaseSummary, CategoryFlow, FlowSummary, LabelCount, SummaryConfig,
};
use conflict_map_conflict_models::{CaseDimension, ConflictCase};

use crate::normalize::normalize_department;

/// Counts cases per normalized department, most cases first.
#[must_use]
pub fn count_by_department(cases: &[ConflictCase]) -> Vec<LabelCount> {
    let mut counts = count_labels(cases.iter().map(|c| normalize_department(&c.department)));
    sort_descending(&mut counts);
    counts
}

/// Counts cases per involved entity, most cases first.
#[must_use]
pub fn count_by_entity(cases: &[ConflictCase]) -> Vec<LabelCount> {
    let mut counts = count_labels(cases.iter().map(|c| c.entity.trim().to_string()));
    sort_descending(&mut counts);
    counts
}

/// Keeps the first `n` rows of an already ranked list.
#[must_use]
pub fn top_n(mut counts: Vec<LabelCount>, n: usize) -> Vec<LabelCount> {
    counts.truncate(n);
    counts
}

/// The `n` departments with the most cases.
#[must_use]
pub fn top_departments(cases: &[ConflictCase], n: usize) -> Vec<LabelCount> {
    top_n(count_by_department(cases), n)
}

/// The `n` entities involved in the most cases.
#[must_use]
pub fn top_entities(cases: &[ConflictCase], n: usize) -> Vec<LabelCount> {
    top_n(count_by_entity(cases), n)
}

/// Counts cases with status `active_status` per conflict phase, fewest
/// cases first.
#[must_use]
pub fn active_by_phase(cases: &[ConflictCase], active_status: &str) -> Vec<LabelCount> {
    let mut counts = count_labels(
        cases
            .iter()
            .filter(|c| c.has_status(active_status))
            .map(|c| c.phase.trim().to_string()),
    );
    counts.sort_by(|a, b| a.count.cmp(&b.count).then_with(|| a.label.cmp(&b.label)));
    counts
}

/// Counts every combination of values across `dimensions`, most common
/// path first.
#[must_use]
pub fn category_flows(cases: &[ConflictCase], dimensions: &[CaseDimension]) -> FlowSummary {
    let mut paths: BTreeMap<Vec<String>, u64> = BTreeMap::new();
    for case in cases {
        let path = dimensions
            .iter()
            .map(|dim| dim.value(case).trim().to_string())
            .collect();
        *paths.entry(path).or_insert(0) += 1;
    }

    let mut flows: Vec<CategoryFlow> = paths
        .into_iter()
        .map(|(path, count)| CategoryFlow { path, count })
        .collect();
    // BTreeMap iteration already orders paths; a stable sort keeps that
    // order among equal counts.
    flows.sort_by(|a, b| b.count.cmp(&a.count));

    FlowSummary {
        dimensions: dimensions.to_vec(),
        labels: dimensions.iter().map(|dim| dim.label().to_string()).collect(),
        flows,
    }
}

/// Builds the full descriptive summary of `cases`.
#[must_use]
pub fn summarize(cases: &[ConflictCase], config: &SummaryConfig) -> CaseSummary {
    let summary = CaseSummary {
        total_cases: cases.len() as u64,
        top_departments: top_departments(cases, config.top_n),
        top_entities: top_entities(cases, config.top_n),
        active_by_phase: active_by_phase(cases, &config.active_status),
        flows: category_flows(cases, &config.flow_dimensions),
    };

    log::info!(
        "Summarized {} cases ({} active phases, {} flows)",
        summary.total_cases,
        summary.active_by_phase.len(),
        summary.flows.flows.len()
    );

    summary
}

fn count_labels(labels: impl Iterator<Item = String>) -> Vec<LabelCount> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for label in labels.filter(|l| !l.is_empty()) {
        *counts.entry(label).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(label, count)| LabelCount { label, count })
        .collect()
}

fn sort_descending(counts: &mut [LabelCount]) {
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(department: &str, entity: &str, status: &str, phase: &str) -> ConflictCase {
        ConflictCase {
            department: department.to_string(),
            entity: entity.to_string(),
            status: status.to_string(),
            phase: phase.to_string(),
            violence: "No".to_string(),
            dialogue: "Sí".to_string(),
            ..ConflictCase::default()
        }
    }

    fn sample() -> Vec<ConflictCase> {
        vec![
            case("Apurímac", "Minera Las Bambas", "Activo", "Diálogo"),
            case("APURIMAC", "Minera Las Bambas", "Activo", "Diálogo"),
            case("Cusco", "Glencore", "Activo", "Desescalamiento"),
            case("Cusco", "Minería informal", "Latente", "Temprana"),
            case("Ayacucho", "Minería informal", "Activo", "Diálogo"),
            case("Puno", "", "Resuelto", ""),
        ]
    }

    fn labels(counts: &[LabelCount]) -> Vec<(&str, u64)> {
        counts.iter().map(|c| (c.label.as_str(), c.count)).collect()
    }

    #[test]
    fn departments_are_merged_after_normalization() {
        let counts = count_by_department(&sample());
        assert_eq!(
            labels(&counts),
            vec![("apurimac", 2), ("cusco", 2), ("ayacucho", 1), ("puno", 1)]
        );
    }

    #[test]
    fn top_n_truncates_ranking() {
        let top = top_departments(&sample(), 2);
        assert_eq!(labels(&top), vec![("apurimac", 2), ("cusco", 2)]);
    }

    #[test]
    fn blank_entities_are_not_counted() {
        let counts = count_by_entity(&sample());
        assert_eq!(
            labels(&counts),
            vec![
                ("Minera Las Bambas", 2),
                ("Minería informal", 2),
                ("Glencore", 1)
            ]
        );
    }

    #[test]
    fn active_cases_grouped_by_phase_ascending() {
        let counts = active_by_phase(&sample(), "Activo");
        assert_eq!(labels(&counts), vec![("Desescalamiento", 1), ("Diálogo", 3)]);
    }

    #[test]
    fn flows_count_each_path() {
        let summary = category_flows(&sample(), &[CaseDimension::Status, CaseDimension::Phase]);
        assert_eq!(summary.flows[0].path, vec!["Activo", "Diálogo"]);
        assert_eq!(summary.flows[0].count, 3);
        let total: u64 = summary.flows.iter().map(|f| f.count).sum();
        assert_eq!(total, 6);
    }

    #[test]
    fn flows_carry_axis_labels() {
        let summary = category_flows(&sample(), &[CaseDimension::Violence, CaseDimension::Phase]);
        assert_eq!(summary.labels, vec!["Hubo violencia", "Fase"]);
    }

    #[test]
    fn summarize_uses_config() {
        let config = SummaryConfig {
            top_n: 1,
            ..SummaryConfig::default()
        };
        let summary = summarize(&sample(), &config);
        assert_eq!(summary.total_cases, 6);
        assert_eq!(summary.top_departments.len(), 1);
        assert_eq!(summary.top_entities.len(), 1);
        assert_eq!(summary.flows.dimensions, CaseDimension::all().to_vec());
    }

    #[test]
    fn empty_input_summarizes_to_empty_rankings() {
        let summary = summarize(&[], &SummaryConfig::default());
        assert_eq!(summary.total_cases, 0);
        assert!(summary.top_departments.is_empty());
        assert!(summary.flows.flows.is_empty());
    }
}
