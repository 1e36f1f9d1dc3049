use std::path::{Path, PathBuf};

use crate::data::collect_arff_files;
use crate::tasks::{ComparisonConfig, ComparisonExperiment, SingleRun};
use crate::ui::types::build::{BuildError, build_selector};
use crate::ui::types::choices::{CompareParams, EvaluateParams, TaskChoice};

/// A task checked and assembled, ready to be fed with datasets.
pub enum ConfiguredTask {
    CompareSelectors {
        inputs: Vec<PathBuf>,
        class_index: Option<usize>,
        experiment: ComparisonExperiment,
        /// `None` falls back to the report's timestamped file name.
        report_path: Option<PathBuf>,
    },
    EvaluateSelector {
        input: PathBuf,
        class_index: Option<usize>,
        run: SingleRun,
    },
}

pub fn build_task(choice: TaskChoice) -> Result<ConfiguredTask, BuildError> {
    match choice {
        TaskChoice::CompareSelectors(p) => compare_task(p),
        TaskChoice::EvaluateSelector(p) => evaluate_task(p),
    }
}

fn compare_task(p: CompareParams) -> Result<ConfiguredTask, BuildError> {
    let inputs = resolve_inputs(Path::new(&p.path))?;
    let config = ComparisonConfig {
        folds: p.folds,
        outer_seed: p.outer_seed,
        inner_seed: p.inner_seed,
        k_neighbors: p.k_neighbors,
        multilabel_threshold: p.multilabel_threshold,
    };
    let experiment = ComparisonExperiment::new(p.algorithms, config)?;
    let report_path = match p.report_path.trim() {
        "" => None,
        path => Some(PathBuf::from(path)),
    };
    Ok(ConfiguredTask::CompareSelectors {
        inputs,
        class_index: p.class_index,
        experiment,
        report_path,
    })
}

fn evaluate_task(p: EvaluateParams) -> Result<ConfiguredTask, BuildError> {
    let input = PathBuf::from(&p.path);
    if !input.is_file() {
        return Err(BuildError::InvalidParameter(format!(
            "not a file: {}",
            input.display()
        )));
    }
    let label = p.selector.algorithm().label();
    let selector = build_selector(p.selector)?;
    let run = SingleRun::new(label, selector, p.folds, p.outer_seed, p.inner_seed)?;
    Ok(ConfiguredTask::EvaluateSelector {
        input,
        class_index: p.class_index,
        run,
    })
}

fn resolve_inputs(path: &Path) -> Result<Vec<PathBuf>, BuildError> {
    let inputs = if path.is_dir() {
        collect_arff_files(path)?
    } else if path.is_file() {
        vec![path.to_path_buf()]
    } else {
        return Err(BuildError::InvalidParameter(format!(
            "no such file or directory: {}",
            path.display()
        )));
    };
    if inputs.is_empty() {
        return Err(BuildError::InvalidParameter(format!(
            "no .arff files under {}",
            path.display()
        )));
    }
    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::types::choices::{NeighborhoodParams, SelectorChoice};
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    const TINY_ARFF: &str = "\
@relation tiny
@attribute x numeric
@attribute class {a,b}
@data
1.0,a
2.0,b
";

    #[test]
    fn a_directory_of_arff_files_becomes_a_comparison() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("one.arff"), TINY_ARFF).unwrap();
        fs::write(dir.path().join("two.arff"), TINY_ARFF).unwrap();
        fs::write(dir.path().join("notes.txt"), "skip me").unwrap();

        let params: CompareParams = serde_json::from_value(json!({
            "path": dir.path().to_str().unwrap(),
        }))
        .unwrap();

        let task = build_task(TaskChoice::CompareSelectors(params)).unwrap();
        let ConfiguredTask::CompareSelectors {
            inputs,
            report_path,
            ..
        } = task
        else {
            panic!("wrong task");
        };
        assert_eq!(inputs.len(), 2);
        assert!(report_path.is_none());
    }

    #[test]
    fn an_empty_directory_is_rejected() {
        let dir = tempdir().unwrap();
        let params: CompareParams = serde_json::from_value(json!({
            "path": dir.path().to_str().unwrap(),
        }))
        .unwrap();

        assert!(matches!(
            build_task(TaskChoice::CompareSelectors(params)),
            Err(BuildError::InvalidParameter(_))
        ));
    }

    #[test]
    fn evaluating_needs_an_existing_file() {
        let dir = tempdir().unwrap();
        let params = EvaluateParams {
            selector: SelectorChoice::KnoraEliminate(NeighborhoodParams::default()),
            path: dir
                .path()
                .join("missing.arff")
                .to_string_lossy()
                .into_owned(),
            class_index: None,
            folds: 10,
            outer_seed: 100,
            inner_seed: 400,
        };

        assert!(matches!(
            build_task(TaskChoice::EvaluateSelector(params)),
            Err(BuildError::InvalidParameter(_))
        ));
    }

    #[test]
    fn evaluating_an_existing_file_builds_the_run() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("tiny.arff");
        fs::write(&file, TINY_ARFF).unwrap();

        let params = EvaluateParams {
            selector: SelectorChoice::KnoraEliminate(NeighborhoodParams::default()),
            path: file.to_string_lossy().into_owned(),
            class_index: None,
            folds: 10,
            outer_seed: 100,
            inner_seed: 400,
        };

        let task = build_task(TaskChoice::EvaluateSelector(params)).unwrap();
        let ConfiguredTask::EvaluateSelector { input, .. } = task else {
            panic!("wrong task");
        };
        assert_eq!(input, file);
    }
}
