use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::Path;
use strum::{EnumMessage, IntoEnumIterator};

use crate::ui::cli::drivers::PromptDriver;
use crate::ui::types::choices::{FieldKind, UIChoice, specs_for_kind};

const DIM_ITALIC: &str = "\x1b[2m\x1b[3m";
const RESET: &str = "\x1b[0m";

fn kind_menu<K>() -> (Vec<K>, Vec<String>)
where
    K: Copy + Into<&'static str> + EnumMessage + IntoEnumIterator,
{
    let kinds: Vec<K> = K::iter().collect();
    let options = kinds
        .iter()
        .map(|&kind| {
            let label = kind.get_message().unwrap_or_else(|| kind.into());
            let description = kind.get_detailed_message().unwrap_or("");
            if description.is_empty() {
                label.to_string()
            } else {
                format!("{label}  {DIM_ITALIC}{description}{RESET}")
            }
        })
        .collect();
    (kinds, options)
}

/// Walks the user through one choice: a kind menu, then one prompt per
/// params field of the picked kind, then the kind's subprompts. Answers
/// are assembled back into the typed enum.
pub fn prompt_choice<C: UIChoice, D: PromptDriver>(driver: &D) -> Result<C> {
    let (kinds, options) = kind_menu::<C::Kind>();
    let picked = driver.ask_select(
        C::prompt_label(),
        C::prompt_help().unwrap_or(""),
        &options,
    )?;
    let choice_kind = kinds
        .get(picked)
        .copied()
        .context("selected option out of range")?;

    let key: &'static str = choice_kind.into();
    let schema = C::schema();
    let specs = specs_for_kind(&schema, key)?;

    let defaults = C::default_params(choice_kind);

    let mut params = Map::new();
    for s in specs {
        let init = s.default.clone().or_else(|| defaults.get(&s.name).cloned());
        let help = s.description.as_deref().unwrap_or("");

        let is_optional_numeric = !s.required
            && matches!(s.kind, FieldKind::Integer | FieldKind::Number)
            && matches!(init, None | Some(Value::Null));

        let val_opt: Option<Value> = if is_optional_numeric {
            // blank answer means "leave unset"
            let def_txt = match s.kind {
                FieldKind::Integer => init
                    .as_ref()
                    .and_then(|v| v.as_u64())
                    .map(|n| n.to_string()),
                FieldKind::Number => init
                    .as_ref()
                    .and_then(|v| v.as_f64())
                    .map(|x| x.to_string()),
                _ => None,
            }
            .unwrap_or_default();

            let answer = driver.ask_string(
                &s.title,
                &format!("{help}\n(leave blank for none)"),
                &def_txt,
            )?;

            let answer = answer.trim();
            if answer.is_empty() {
                None
            } else {
                Some(match s.kind {
                    FieldKind::Integer => {
                        let n: u64 = answer
                            .parse()
                            .with_context(|| format!("invalid integer for {}", s.title))?;
                        Value::from(n)
                    }
                    FieldKind::Number => {
                        let x: f64 = answer
                            .parse()
                            .with_context(|| format!("invalid number for {}", s.title))?;
                        Value::from(x)
                    }
                    _ => unreachable!(),
                })
            }
        } else {
            Some(match s.kind {
                FieldKind::Boolean => {
                    let def = init.and_then(|v| v.as_bool()).unwrap_or(false);
                    Value::Bool(driver.ask_bool(&s.title, help, def)?)
                }
                FieldKind::String => {
                    let def = init
                        .and_then(|v| v.as_str().map(|s| s.to_string()))
                        .unwrap_or_default();

                    let answered = if s.file_path {
                        let more_help = if help.is_empty() {
                            "An .arff file, or a directory of them"
                        } else {
                            help
                        };
                        prompt_data_path_until_ok(driver, &s.title, more_help, &def)?
                    } else {
                        driver.ask_string(&s.title, help, &def)?
                    };

                    Value::String(answered)
                }
                FieldKind::Integer => {
                    let def = init.and_then(|v| v.as_u64()).unwrap_or(0);
                    Value::from(driver.ask_u64(
                        &s.title,
                        help,
                        def,
                        s.min.map(|x| x as u64),
                        s.max.map(|x| x as u64),
                    )?)
                }
                FieldKind::Number => {
                    let def = init.and_then(|v| v.as_f64()).unwrap_or(0.0);
                    Value::from(driver.ask_f64(&s.title, help, def, s.min, s.max)?)
                }
            })
        };

        if let Some(val) = val_opt {
            params.insert(s.name.clone(), val);
        }
    }

    if let Some(extra) = C::subprompts(driver, choice_kind)? {
        params.extend(extra);
    }
    C::from_parts(choice_kind, Value::Object(params))
}

/// Accepts an existing `.arff` file or an existing directory; anything
/// else names what is wrong.
fn validate_data_path(input: &str) -> Result<(), String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Path cannot be empty".into());
    }
    let p = Path::new(trimmed);

    if !p.exists() {
        return Err(format!("Path does not exist: {}", p.display()));
    }
    if p.is_file() {
        match p.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("arff") => {}
            _ => return Err("Expected an .arff file".into()),
        }
    }
    Ok(())
}

fn prompt_data_path_until_ok<D: PromptDriver>(
    driver: &D,
    title: &str,
    help: &str,
    default: &str,
) -> Result<String> {
    loop {
        let answer = driver.ask_string(title, help, default)?;
        match validate_data_path(&answer) {
            Ok(()) => return Ok(answer.trim().to_string()),
            Err(msg) => {
                eprintln!("✗ {}", msg);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::SelectionAlgorithm;
    use crate::ui::types::choices::{SelectorChoice, TaskChoice};
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::fs;
    use tempfile::tempdir;

    /// Driver that replays canned answers, in call order per question
    /// type.
    #[derive(Default)]
    struct ScriptedDriver {
        selects: RefCell<VecDeque<usize>>,
        multi_selects: RefCell<VecDeque<Vec<usize>>>,
        strings: RefCell<VecDeque<String>>,
        u64s: RefCell<VecDeque<u64>>,
        f64s: RefCell<VecDeque<f64>>,
    }

    impl ScriptedDriver {
        fn push_select(&self, index: usize) {
            self.selects.borrow_mut().push_back(index);
        }

        fn push_multi_select(&self, indexes: Vec<usize>) {
            self.multi_selects.borrow_mut().push_back(indexes);
        }

        fn push_string(&self, answer: &str) {
            self.strings.borrow_mut().push_back(answer.to_string());
        }

        fn push_u64(&self, answer: u64) {
            self.u64s.borrow_mut().push_back(answer);
        }

        fn push_f64(&self, answer: f64) {
            self.f64s.borrow_mut().push_back(answer);
        }
    }

    impl PromptDriver for ScriptedDriver {
        fn ask_select(&self, title: &str, _help: &str, _options: &[String]) -> Result<usize> {
            self.selects
                .borrow_mut()
                .pop_front()
                .with_context(|| format!("unscripted select: {title}"))
        }

        fn ask_multi_select(
            &self,
            title: &str,
            _help: &str,
            _options: &[String],
        ) -> Result<Vec<usize>> {
            self.multi_selects
                .borrow_mut()
                .pop_front()
                .with_context(|| format!("unscripted multi-select: {title}"))
        }

        fn ask_bool(&self, title: &str, _help: &str, _default: bool) -> Result<bool> {
            anyhow::bail!("unscripted bool: {title}")
        }

        fn ask_string(&self, title: &str, _help: &str, _default: &str) -> Result<String> {
            self.strings
                .borrow_mut()
                .pop_front()
                .with_context(|| format!("unscripted string: {title}"))
        }

        fn ask_u64(
            &self,
            title: &str,
            _help: &str,
            _default: u64,
            _min: Option<u64>,
            _max: Option<u64>,
        ) -> Result<u64> {
            self.u64s
                .borrow_mut()
                .pop_front()
                .with_context(|| format!("unscripted u64: {title}"))
        }

        fn ask_f64(
            &self,
            title: &str,
            _help: &str,
            _default: f64,
            _min: Option<f64>,
            _max: Option<f64>,
        ) -> Result<f64> {
            self.f64s
                .borrow_mut()
                .pop_front()
                .with_context(|| format!("unscripted f64: {title}"))
        }
    }

    const TINY_ARFF: &str = "\
@relation tiny
@attribute x numeric
@attribute class {a,b}
@data
1.0,a
2.0,b
";

    #[test]
    fn a_scripted_run_assembles_a_selector_choice() {
        let driver = ScriptedDriver::default();
        // KNORA-Eliminate sits seventh in the menu
        driver.push_select(6);
        driver.push_u64(7);

        let choice: SelectorChoice = prompt_choice(&driver).unwrap();
        let SelectorChoice::KnoraEliminate(params) = choice else {
            panic!("wrong variant");
        };
        assert_eq!(params.k_neighbors, 7);
    }

    #[test]
    fn a_scripted_comparison_collects_paths_and_algorithms() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("tiny.arff"), TINY_ARFF).unwrap();

        let driver = ScriptedDriver::default();
        driver.push_select(0); // Compare Selectors
        driver.push_string(dir.path().to_str().unwrap()); // path
        driver.push_string(""); // class index: keep the last attribute
        driver.push_u64(5); // folds
        driver.push_u64(100); // outer seed
        driver.push_u64(400); // inner seed
        driver.push_u64(3); // k neighbors
        driver.push_f64(0.7); // competence threshold
        driver.push_string(""); // report path: timestamped
        driver.push_multi_select(vec![1, 8]); // OLA and the baseline

        let choice: TaskChoice = prompt_choice(&driver).unwrap();
        let TaskChoice::CompareSelectors(params) = choice else {
            panic!("wrong variant");
        };
        assert_eq!(params.folds, 5);
        assert_eq!(params.class_index, None);
        assert_eq!(params.k_neighbors, 3);
        assert_eq!(
            params.algorithms,
            vec![
                SelectionAlgorithm::OverallLocalAccuracy,
                SelectionAlgorithm::MajorityVote
            ]
        );
    }

    #[test]
    fn evaluating_prompts_for_the_nested_selector() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("tiny.arff");
        fs::write(&file, TINY_ARFF).unwrap();

        let driver = ScriptedDriver::default();
        driver.push_select(1); // Evaluate Selector
        driver.push_string(file.to_str().unwrap()); // path
        driver.push_string(""); // class index
        driver.push_u64(10); // folds
        driver.push_u64(100); // outer seed
        driver.push_u64(400); // inner seed
        driver.push_select(7); // nested menu: MCB
        driver.push_u64(5); // k neighbors
        driver.push_f64(0.6); // similarity threshold

        let choice: TaskChoice = prompt_choice(&driver).unwrap();
        let TaskChoice::EvaluateSelector(params) = choice else {
            panic!("wrong variant");
        };
        let SelectorChoice::McbBased(mcb) = params.selector else {
            panic!("wrong selector");
        };
        assert_eq!(mcb.k_neighbors, 5);
        assert!((mcb.similarity_threshold - 0.6).abs() < 1e-9);
    }

    #[test]
    fn data_paths_must_exist_and_be_arff() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("absent.arff");
        assert!(validate_data_path(missing.to_str().unwrap()).is_err());
        assert!(validate_data_path("").is_err());

        let text = dir.path().join("notes.txt");
        fs::write(&text, "not a dataset").unwrap();
        assert!(validate_data_path(text.to_str().unwrap()).is_err());

        let arff = dir.path().join("tiny.arff");
        fs::write(&arff, TINY_ARFF).unwrap();
        assert!(validate_data_path(arff.to_str().unwrap()).is_ok());
        assert!(validate_data_path(dir.path().to_str().unwrap()).is_ok());
    }
}
