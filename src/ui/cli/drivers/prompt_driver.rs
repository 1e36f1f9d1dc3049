use anyhow::Result;

/// Terminal-question backend of the wizard. Everything the wizard asks
/// goes through here, so tests can script the whole flow.
pub trait PromptDriver {
    /// Single choice out of `options`; returns the picked index.
    fn ask_select(&self, title: &str, help: &str, options: &[String]) -> Result<usize>;

    /// Any number of choices out of `options`; returns the picked
    /// indexes, ascending.
    fn ask_multi_select(&self, title: &str, help: &str, options: &[String]) -> Result<Vec<usize>>;

    fn ask_bool(&self, title: &str, help: &str, default: bool) -> Result<bool>;

    fn ask_string(&self, title: &str, help: &str, default: &str) -> Result<String>;

    fn ask_u64(
        &self,
        title: &str,
        help: &str,
        default: u64,
        min: Option<u64>,
        max: Option<u64>,
    ) -> Result<u64>;

    fn ask_f64(
        &self,
        title: &str,
        help: &str,
        default: f64,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<f64>;
}
