use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};

use seleto::data::load_arff;
use seleto::tasks::{ComparisonExperiment, ComparisonReport};
use seleto::ui::cli::drivers::InquireDriver;
use seleto::ui::cli::wizard::prompt_choice;
use seleto::ui::types::build::{ConfiguredTask, build_task};
use seleto::ui::types::choices::TaskChoice;

fn main() -> Result<()> {
    let choice = match env::args().nth(1) {
        Some(path) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config {path}"))?;
            serde_json::from_str::<TaskChoice>(&text)
                .with_context(|| format!("failed to parse config {path}"))?
        }
        None => prompt_choice::<TaskChoice, _>(&InquireDriver)?,
    };

    match build_task(choice)? {
        ConfiguredTask::CompareSelectors {
            inputs,
            class_index,
            experiment,
            report_path,
        } => run_comparison(inputs, class_index, experiment, report_path),
        ConfiguredTask::EvaluateSelector {
            input,
            class_index,
            mut run,
        } => {
            let dataset = load_arff(&input, class_index)
                .with_context(|| format!("failed to load {}", input.display()))?;
            let report = run.run(&dataset)?;
            println!(
                "{}: accuracy {:.4} with a pool of {} ({:.1}s)",
                report.label, report.accuracy, report.pool_size, report.seconds
            );
            Ok(())
        }
    }
}

fn run_comparison(
    inputs: Vec<PathBuf>,
    class_index: Option<usize>,
    experiment: ComparisonExperiment,
    report_path: Option<PathBuf>,
) -> Result<()> {
    let mut report = ComparisonReport::new(experiment.algorithms().to_vec());

    let (sender, receiver) = mpsc::channel();
    let experiment = experiment.with_progress(sender);
    let printer = thread::spawn(move || {
        for progress in receiver {
            println!("{progress}");
        }
    });

    for input in &inputs {
        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.display().to_string());
        let dataset = load_arff(input, class_index)
            .with_context(|| format!("failed to load {}", input.display()))?;

        let row = experiment.run(&dataset, &name)?;
        println!("{name}: pool of {}, {:.1}s", row.pool_size, row.seconds);
        for summary in &row.summaries {
            print!(
                "  {:<7} {:.4} ± {:.4}",
                summary.algorithm.label(),
                summary.mean,
                summary.std_dev
            );
            match summary.p_value_vs_baseline {
                Some(p) => println!("  p={p:.4}"),
                None => println!(),
            }
        }
        report.push(row);
    }

    // dropping the experiment hangs up the progress channel
    drop(experiment);
    let _ = printer.join();

    let path = report_path.unwrap_or_else(|| PathBuf::from(report.default_file_name()));
    report
        .export_csv(&path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("report written to {}", path.display());
    Ok(())
}
