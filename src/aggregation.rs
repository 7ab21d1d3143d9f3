// src/aggregation.rs
//
// Owns the per-trial records of a run and derives per-length and overall
// modulus averages from them on demand.

use std::path::PathBuf;

use crate::data_analysis::trial_analysis::TrialResult;

/// How trials without a usable frequency enter the averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AveragingPolicy {
    #[default]
    ExcludeDegenerate,
    /// Count them with their 0 GPa modulus.
    IncludeDegenerate,
}

impl AveragingPolicy {
    pub fn from_include_flag(include_degenerate: bool) -> Self {
        if include_degenerate {
            AveragingPolicy::IncludeDegenerate
        } else {
            AveragingPolicy::ExcludeDegenerate
        }
    }

    fn admits(&self, result: &TrialResult) -> bool {
        match self {
            AveragingPolicy::ExcludeDegenerate => result.is_measured(),
            AveragingPolicy::IncludeDegenerate => true,
        }
    }
}

/// What happened to one (length, trial) slot.
#[derive(Debug, Clone, PartialEq)]
pub enum TrialRecord {
    Recorded(TrialResult),
    /// Input file was missing.
    Skipped {
        length_mm: u32,
        trial: u32,
        path: PathBuf,
    },
}

impl TrialRecord {
    pub fn length_mm(&self) -> u32 {
        match self {
            TrialRecord::Recorded(result) => result.length_mm,
            TrialRecord::Skipped { length_mm, .. } => *length_mm,
        }
    }

    pub fn result(&self) -> Option<&TrialResult> {
        match self {
            TrialRecord::Recorded(result) => Some(result),
            TrialRecord::Skipped { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthSummary {
    pub length_mm: u32,
    pub average_modulus_gpa: f64,
    pub contributing_trials: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverallSummary {
    pub average_modulus_gpa: f64,
    pub contributing_trials: usize,
}

/// Trial records in processing order.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    records: Vec<TrialRecord>,
    policy: AveragingPolicy,
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

impl Aggregator {
    pub fn new(policy: AveragingPolicy) -> Self {
        Self {
            records: Vec::new(),
            policy,
        }
    }

    pub fn record(&mut self, result: TrialResult) {
        self.records.push(TrialRecord::Recorded(result));
    }

    pub fn skip(&mut self, length_mm: u32, trial: u32, path: PathBuf) {
        self.records.push(TrialRecord::Skipped {
            length_mm,
            trial,
            path,
        });
    }

    pub fn records(&self) -> &[TrialRecord] {
        &self.records
    }

    /// Recorded results in processing order.
    pub fn results(&self) -> impl Iterator<Item = &TrialResult> {
        self.records.iter().filter_map(TrialRecord::result)
    }

    fn contributing_moduli<'a>(
        &'a self,
        length_mm: Option<u32>,
    ) -> impl Iterator<Item = f64> + 'a {
        let policy = self.policy;
        self.results()
            .filter(move |r| length_mm.map_or(true, |l| r.length_mm == l))
            .filter(move |r| policy.admits(r))
            .map(|r| r.modulus_gpa)
    }

    /// Average for one length, None when no trial of that length contributed.
    pub fn length_summary(&self, length_mm: u32) -> Option<LengthSummary> {
        let moduli: Vec<f64> = self.contributing_moduli(Some(length_mm)).collect();
        mean(&moduli).map(|average_modulus_gpa| LengthSummary {
            length_mm,
            average_modulus_gpa,
            contributing_trials: moduli.len(),
        })
    }

    /// One summary per length, in first-seen order, skipping lengths with nothing to average.
    pub fn length_summaries(&self) -> Vec<LengthSummary> {
        let mut lengths: Vec<u32> = Vec::new();
        for record in &self.records {
            let length = record.length_mm();
            if !lengths.contains(&length) {
                lengths.push(length);
            }
        }
        lengths
            .into_iter()
            .filter_map(|length| self.length_summary(length))
            .collect()
    }

    pub fn overall_summary(&self) -> Option<OverallSummary> {
        let moduli: Vec<f64> = self.contributing_moduli(None).collect();
        mean(&moduli).map(|average_modulus_gpa| OverallSummary {
            average_modulus_gpa,
            contributing_trials: moduli.len(),
        })
    }

    pub fn skipped_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r, TrialRecord::Skipped { .. }))
            .count()
    }
}
