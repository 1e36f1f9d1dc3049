use std::fs::File;
use std::io::{Error, Write};
use std::path::Path;

use chrono::{DateTime, Local};

use crate::tasks::{DatasetReport, SelectionAlgorithm};

/// Collects one row per dataset and renders the comparison table the way
/// the reports are archived: semicolon-separated, three columns per
/// algorithm (mean, sample std, p-value against the baseline).
pub struct ComparisonReport {
    created: DateTime<Local>,
    algorithms: Vec<SelectionAlgorithm>,
    rows: Vec<DatasetReport>,
}

impl ComparisonReport {
    pub fn new(algorithms: Vec<SelectionAlgorithm>) -> Self {
        ComparisonReport {
            created: Local::now(),
            algorithms,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: DatasetReport) {
        debug_assert_eq!(row.summaries.len(), self.algorithms.len());
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[DatasetReport] {
        &self.rows
    }

    /// Timestamped file name for runs that did not name a target.
    pub fn default_file_name(&self) -> String {
        format!(
            "selection-comparison-{}.csv",
            self.created.format("%Y%m%d-%H%M%S")
        )
    }

    pub fn export_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let mut w = File::create(path)?;
        write!(w, "file name")?;
        for algorithm in &self.algorithms {
            write!(w, ";{a} (mean);{a} (std);{a} (p)", a = algorithm.label())?;
        }
        writeln!(w)?;

        for row in &self.rows {
            write!(w, "{}", row.dataset)?;
            for summary in &row.summaries {
                write!(w, ";{:.6};{:.6};", summary.mean, summary.std_dev)?;
                if let Some(p) = summary.p_value_vs_baseline {
                    write!(w, "{p:.6}")?;
                }
            }
            writeln!(w)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::AlgorithmSummary;
    use std::fs;
    use tempfile::NamedTempFile;

    fn summary(
        algorithm: SelectionAlgorithm,
        mean: f64,
        std_dev: f64,
        p: Option<f64>,
    ) -> AlgorithmSummary {
        AlgorithmSummary {
            algorithm,
            fold_accuracies: vec![mean; 2],
            mean,
            std_dev,
            p_value_vs_baseline: p,
        }
    }

    #[test]
    fn export_csv_with_two_rows() {
        let algorithms = vec![
            SelectionAlgorithm::OverallLocalAccuracy,
            SelectionAlgorithm::MajorityVote,
        ];
        let mut report = ComparisonReport::new(algorithms);
        report.push(DatasetReport {
            dataset: "iris.arff".into(),
            pool_size: 10,
            summaries: vec![
                summary(SelectionAlgorithm::OverallLocalAccuracy, 0.9, 0.05, Some(0.04)),
                summary(SelectionAlgorithm::MajorityVote, 0.85, 0.1, None),
            ],
            ram_hours: 0.0,
            seconds: 1.0,
        });
        report.push(DatasetReport {
            dataset: "wine.arff".into(),
            pool_size: 10,
            summaries: vec![
                summary(SelectionAlgorithm::OverallLocalAccuracy, 0.75, 0.125, Some(0.5)),
                summary(SelectionAlgorithm::MajorityVote, 0.75, 0.0625, None),
            ],
            ram_hours: 0.0,
            seconds: 1.0,
        });

        let tf = NamedTempFile::new().unwrap();
        report.export_csv(tf.path()).unwrap();

        let got = fs::read_to_string(tf.path()).unwrap();
        let exp = "\
file name;OLA (mean);OLA (std);OLA (p);MV (mean);MV (std);MV (p)
iris.arff;0.900000;0.050000;0.040000;0.850000;0.100000;
wine.arff;0.750000;0.125000;0.500000;0.750000;0.062500;
";
        assert_eq!(got, exp);
    }

    #[test]
    fn export_empty_report_is_just_the_header() {
        let report = ComparisonReport::new(vec![SelectionAlgorithm::MajorityVote]);

        let tf = NamedTempFile::new().unwrap();
        report.export_csv(tf.path()).unwrap();

        let got = fs::read_to_string(tf.path()).unwrap();
        assert_eq!(got, "file name;MV (mean);MV (std);MV (p)\n");
    }

    #[test]
    fn default_file_name_is_timestamped() {
        let report = ComparisonReport::new(vec![SelectionAlgorithm::MajorityVote]);
        let name = report.default_file_name();
        assert!(name.starts_with("selection-comparison-"));
        assert!(name.ends_with(".csv"));
    }
}
