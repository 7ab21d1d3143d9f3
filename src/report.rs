// src/report.rs
//
// Tabular results: one row per recorded trial, an "avg" row after each length,
// and an "overall" row at the end. Written as CSV and echoed to the console.

use std::path::Path;

use crate::aggregation::{Aggregator, TrialRecord};
use crate::constants::REPORT_DECIMALS;
use crate::error::AnalysisError;

pub const REPORT_HEADER: [&str; 4] = [
    "Length(mm)",
    "Trial",
    "Frequency(Hz)",
    "Young's Modulus(GPa)",
];

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

fn format_value(value: f64) -> String {
    format!(
        "{:.*}",
        REPORT_DECIMALS as usize,
        round_to(value, REPORT_DECIMALS)
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub length: String,
    pub trial: String,
    pub frequency: String,
    pub modulus: String,
}

impl ReportRow {
    fn fields(&self) -> [&str; 4] {
        [&self.length, &self.trial, &self.frequency, &self.modulus]
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResultsReport {
    rows: Vec<ReportRow>,
}

impl ResultsReport {
    pub fn from_aggregator(aggregator: &Aggregator) -> Self {
        let mut rows = Vec::new();
        let records = aggregator.records();

        for (index, record) in records.iter().enumerate() {
            if let TrialRecord::Recorded(result) = record {
                rows.push(ReportRow {
                    length: result.length_mm.to_string(),
                    trial: result.trial.to_string(),
                    frequency: format_value(result.frequency_hz),
                    modulus: format_value(result.modulus_gpa),
                });
            }

            // Close a length group when the next record belongs to another length.
            let length_mm = record.length_mm();
            let group_ends = records
                .get(index + 1)
                .map_or(true, |next| next.length_mm() != length_mm);
            if group_ends {
                if let Some(summary) = aggregator.length_summary(length_mm) {
                    rows.push(ReportRow {
                        length: length_mm.to_string(),
                        trial: "avg".to_string(),
                        frequency: String::new(),
                        modulus: format_value(summary.average_modulus_gpa),
                    });
                }
            }
        }

        if let Some(overall) = aggregator.overall_summary() {
            rows.push(ReportRow {
                length: "overall".to_string(),
                trial: String::new(),
                frequency: String::new(),
                modulus: format_value(overall.average_modulus_gpa),
            });
        }

        Self { rows }
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn write_csv(&self, path: &Path) -> Result<(), AnalysisError> {
        let to_report_error = |source: csv::Error| AnalysisError::Report {
            path: path.to_path_buf(),
            source,
        };
        let mut writer = csv::Writer::from_path(path).map_err(to_report_error)?;
        writer.write_record(REPORT_HEADER).map_err(to_report_error)?;
        for row in &self.rows {
            writer.write_record(row.fields()).map_err(to_report_error)?;
        }
        writer
            .flush()
            .map_err(|e| to_report_error(csv::Error::from(e)))?;
        log::info!("Report written to '{}'.", path.display());
        Ok(())
    }

    /// Prints the averages block of the report.
    pub fn print_summary(&self) {
        println!("\n--- Summary ---");
        let mut printed = false;
        for row in &self.rows {
            if row.trial == "avg" {
                println!("  {} mm average: {} GPa", row.length, row.modulus);
                printed = true;
            } else if row.length == "overall" {
                println!("  Overall average: {} GPa", row.modulus);
                printed = true;
            }
        }
        if !printed {
            println!("  No trials contributed to an average.");
        }
    }
}
