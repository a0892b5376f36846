use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PathfinderError;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::validation::{invalid, require_amount, require_signed_amount};
use crate::PathfinderResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One period of an offering's value/cost series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodPoint {
    /// Period label, e.g. "Q1"
    pub period: String,
    /// Value realised to date (already cumulative)
    pub value: Money,
    /// Cost incurred in this period alone
    pub cost: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineInput {
    pub subject_name: String,
    pub comparator_name: String,
    pub subject: Vec<PeriodPoint>,
    pub comparator: Vec<PeriodPoint>,
}

/// When an offering's realised value first covers its cumulative cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Breakeven {
    /// 1-based position in the series plus its label
    Period { index: usize, label: String },
    /// Not reached within the series
    BeyondHorizon { periods: usize, label: String },
}

impl Breakeven {
    pub fn label(&self) -> &str {
        match self {
            Breakeven::Period { label, .. } | Breakeven::BeyondHorizon { label, .. } => label,
        }
    }

    pub fn is_reached(&self) -> bool {
        matches!(self, Breakeven::Period { .. })
    }
}

/// One row of the combined chart series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineRow {
    pub period: String,
    pub subject_value: Money,
    pub subject_cumulative_cost: Money,
    pub comparator_value: Money,
    pub comparator_cumulative_cost: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineOutput {
    pub rows: Vec<TimelineRow>,
    pub subject_breakeven: Breakeven,
    pub comparator_breakeven: Breakeven,
    /// Final-period value of the subject minus that of the comparator
    pub value_advantage: Money,
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Accumulate per-period cost, keep value as supplied, and locate the
/// breakeven period of each offering.
pub fn build_timeline(input: &TimelineInput) -> PathfinderResult<ComputationOutput<TimelineOutput>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    tracing::debug!(
        periods = input.subject.len(),
        subject = %input.subject_name,
        comparator = %input.comparator_name,
        "building value-realization timeline"
    );

    validate_timeline_input(input)?;

    let subject_cumulative = cumulative_costs(&input.subject);
    let comparator_cumulative = cumulative_costs(&input.comparator);

    let subject_breakeven = find_breakeven(&input.subject, &subject_cumulative);
    let comparator_breakeven = find_breakeven(&input.comparator, &comparator_cumulative);

    let rows = input
        .subject
        .iter()
        .zip(input.comparator.iter())
        .enumerate()
        .map(|(idx, (s, c))| TimelineRow {
            period: s.period.clone(),
            subject_value: s.value,
            subject_cumulative_cost: subject_cumulative[idx],
            comparator_value: c.value,
            comparator_cumulative_cost: comparator_cumulative[idx],
        })
        .collect();

    // Both series are non-empty after validation
    let value_advantage = match (input.subject.last(), input.comparator.last()) {
        (Some(s), Some(c)) => s.value - c.value,
        _ => Decimal::ZERO,
    };

    let output = TimelineOutput {
        rows,
        subject_breakeven,
        comparator_breakeven,
        value_advantage,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Cumulative value vs. cumulative cost with first-crossing breakeven",
        &serde_json::json!({
            "periods": input.subject.len(),
            "subject": input.subject_name,
            "comparator": input.comparator_name,
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// Running sum of per-period cost, inclusive of each period.
pub fn cumulative_costs(series: &[PeriodPoint]) -> Vec<Money> {
    series
        .iter()
        .scan(Decimal::ZERO, |acc, p| {
            *acc += p.cost;
            Some(*acc)
        })
        .collect()
}

/// First period where value ≥ cumulative cost.
pub fn find_breakeven(series: &[PeriodPoint], cumulative: &[Money]) -> Breakeven {
    series
        .iter()
        .zip(cumulative.iter())
        .position(|(p, cum)| p.value >= *cum)
        .map(|idx| Breakeven::Period {
            index: idx + 1,
            label: series[idx].period.clone(),
        })
        .unwrap_or_else(|| Breakeven::BeyondHorizon {
            periods: series.len(),
            label: match series.last() {
                Some(last) => format!("Beyond {}", last.period),
                None => "Beyond horizon".to_string(),
            },
        })
}

fn validate_timeline_input(input: &TimelineInput) -> PathfinderResult<()> {
    if input.subject.is_empty() || input.comparator.is_empty() {
        return Err(PathfinderError::InsufficientData(
            "Both value series need at least one period".into(),
        ));
    }
    if input.subject.len() != input.comparator.len() {
        return Err(invalid(
            "comparator",
            &format!(
                "Series lengths differ: subject has {} periods, comparator has {}",
                input.subject.len(),
                input.comparator.len()
            ),
        ));
    }
    for (side, series) in [("subject", &input.subject), ("comparator", &input.comparator)] {
        for (idx, p) in series.iter().enumerate() {
            require_amount(&format!("{side}[{idx}].cost"), p.cost)?;
            require_signed_amount(&format!("{side}[{idx}].value"), p.value)?;
        }
    }
    Ok(())
}
