//! Structural validation of generation responses. Closed enums are enforced by
//! deserialisation; cardinality and metric coverage are enforced here.

use std::{collections::HashMap, hash::Hash};

use thiserror::Error;

use crate::domain::{
    common::entities::app_errors::CoreError,
    suggestion::entities::{
        DietCategory, DietMetric, DietarySuggestions, ProgressMetric, ProgressSummary,
        SuggestionKind, SuggestionResult, WorkoutMetric, WorkoutSuggestions,
    },
};

pub const MIN_CATEGORY_ITEMS: usize = 3;
pub const DAILY_PLAN_COUNT: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .reasons.join("; "))]
pub struct ContractViolation {
    pub reasons: Vec<String>,
}

impl From<ContractViolation> for CoreError {
    fn from(violation: ContractViolation) -> Self {
        CoreError::ContractViolation(violation.to_string())
    }
}

#[derive(Default)]
struct Findings(Vec<String>);

impl Findings {
    fn check(&mut self, ok: bool, reason: impl FnOnce() -> String) {
        if !ok {
            self.0.push(reason());
        }
    }

    /// Every declared metric must appear exactly once, and nothing else.
    fn exact_coverage<M: Copy + Eq + Hash>(
        &mut self,
        field: &str,
        declared: &[M],
        seen: impl Iterator<Item = M>,
        label: impl Fn(&M) -> &'static str,
    ) {
        let mut counts: HashMap<M, usize> = HashMap::new();
        let mut total = 0;
        for metric in seen {
            *counts.entry(metric).or_default() += 1;
            total += 1;
        }

        self.check(total == declared.len(), || {
            format!("{field} must have exactly {} entries, got {total}", declared.len())
        });

        for metric in declared {
            let count = counts.get(metric).copied().unwrap_or(0);
            self.check(count == 1, || {
                format!("{field} must cover {} exactly once, got {count}", label(metric))
            });
        }
    }

    fn finish(self) -> Result<(), ContractViolation> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ContractViolation { reasons: self.0 })
        }
    }
}

pub fn validate_dietary(suggestions: &DietarySuggestions) -> Result<(), ContractViolation> {
    let mut findings = Findings::default();

    findings.exact_coverage(
        "analysis",
        &DietMetric::ALL,
        suggestions.analysis.iter().map(|a| a.metric),
        DietMetric::label,
    );

    for category in DietCategory::ALL {
        let count = suggestions.category(category).len();
        findings.check(count >= MIN_CATEGORY_ITEMS, || {
            format!(
                "{} must have at least {MIN_CATEGORY_ITEMS} items, got {count}",
                category.field_name()
            )
        });
    }

    findings.finish()
}

pub fn validate_workout(suggestions: &WorkoutSuggestions) -> Result<(), ContractViolation> {
    let mut findings = Findings::default();

    findings.exact_coverage(
        "analysis",
        &WorkoutMetric::ALL,
        suggestions.analysis.iter().map(|a| a.metric),
        WorkoutMetric::label,
    );

    let days = suggestions.weekly_plan.len();
    findings.check(days == DAILY_PLAN_COUNT, || {
        format!("weeklyPlan must have exactly {DAILY_PLAN_COUNT} days, got {days}")
    });

    findings.finish()
}

pub fn validate_progress_summary(summary: &ProgressSummary) -> Result<(), ContractViolation> {
    let mut findings = Findings::default();

    findings.exact_coverage(
        "metricChanges",
        &ProgressMetric::ALL,
        summary.metric_changes.iter().map(|c| c.metric),
        ProgressMetric::label,
    );

    findings.finish()
}

pub fn validate_suggestions(result: &SuggestionResult) -> Result<(), ContractViolation> {
    match result {
        SuggestionResult::Diet(diet) => validate_dietary(diet),
        SuggestionResult::Workout(workout) => validate_workout(workout),
    }
}

/// Parses a raw model response for `kind` and validates it. Any deviation is an error.
pub fn parse_suggestions(kind: SuggestionKind, raw: &str) -> Result<SuggestionResult, CoreError> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| CoreError::ContractViolation(format!("response is not JSON: {e}")))?;

    let result = SuggestionResult::from_value(kind, value)?;
    validate_suggestions(&result)?;

    Ok(result)
}

pub fn parse_progress_summary(raw: &str) -> Result<ProgressSummary, CoreError> {
    let summary: ProgressSummary = serde_json::from_str(raw)
        .map_err(|e| CoreError::ContractViolation(format!("progress summary: {e}")))?;

    validate_progress_summary(&summary)?;

    Ok(summary)
}
