use crate::ui::cli::drivers::PromptDriver;
use anyhow::Result;
use inquire::{Confirm, CustomType, MultiSelect, Select, Text, validator::Validation};
use std::fmt;

pub struct InquireDriver;

/// List entry that remembers its position, since inquire hands back the
/// rendered items rather than indexes.
struct Numbered {
    index: usize,
    text: String,
}

impl fmt::Display for Numbered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn numbered(options: &[String]) -> Vec<Numbered> {
    options
        .iter()
        .enumerate()
        .map(|(index, text)| Numbered {
            index,
            text: text.clone(),
        })
        .collect()
}

fn range_check<T>(value: T, min: Option<T>, max: Option<T>) -> Validation
where
    T: PartialOrd + fmt::Display,
{
    if let Some(lo) = min {
        if value < lo {
            return Validation::Invalid(format!("Must be ≥ {lo}").into());
        }
    }
    if let Some(hi) = max {
        if value > hi {
            return Validation::Invalid(format!("Must be ≤ {hi}").into());
        }
    }
    Validation::Valid
}

impl PromptDriver for InquireDriver {
    fn ask_select(&self, title: &str, help: &str, options: &[String]) -> Result<usize> {
        let picked = Select::new(title, numbered(options))
            .with_help_message(help)
            .prompt()?;
        Ok(picked.index)
    }

    fn ask_multi_select(&self, title: &str, help: &str, options: &[String]) -> Result<Vec<usize>> {
        let all: Vec<usize> = (0..options.len()).collect();
        let picked = MultiSelect::new(title, numbered(options))
            .with_default(&all)
            .with_help_message(help)
            .prompt()?;

        let mut indexes: Vec<usize> = picked.into_iter().map(|item| item.index).collect();
        indexes.sort_unstable();
        Ok(indexes)
    }

    fn ask_bool(&self, title: &str, help: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new(title)
            .with_default(default)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_string(&self, title: &str, help: &str, default: &str) -> Result<String> {
        Ok(Text::new(title)
            .with_initial_value(default)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_u64(
        &self,
        title: &str,
        help: &str,
        default: u64,
        min: Option<u64>,
        max: Option<u64>,
    ) -> Result<u64> {
        Ok(CustomType::<u64>::new(title)
            .with_default(default)
            .with_help_message(help)
            .with_validator(move |x: &u64| Ok(range_check(*x, min, max)))
            .prompt()?)
    }

    fn ask_f64(
        &self,
        title: &str,
        help: &str,
        default: f64,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<f64> {
        Ok(CustomType::<f64>::new(title)
            .with_default(default)
            .with_help_message(help)
            .with_validator(move |x: &f64| Ok(range_check(*x, min, max)))
            .prompt()?)
    }
}
