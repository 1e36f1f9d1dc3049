use anyhow::Result;
use schemars::{JsonSchema, Schema};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use strum::{EnumMessage, IntoEnumIterator};

/// Contract for the wizard's tagged choice enums.
///
/// A choice serializes as `{ "type": <kind>, "params": {...} }`. The kind
/// is a strum discriminant enum carrying the menu label and description;
/// the params surface as schema fields the wizard prompts for one by one.
pub trait UIChoice: Sized + Serialize + DeserializeOwned + JsonSchema {
    type Kind: Copy + Into<&'static str> + EnumMessage + IntoEnumIterator;

    /// JSON Schema for the whole tagged enum.
    fn schema() -> Schema;

    fn prompt_label() -> &'static str {
        "Choose a type:"
    }

    fn prompt_help() -> Option<&'static str> {
        Some("↑/↓ to navigate, ↵ to select")
    }

    /// Starting `params` values for `kind`, keyed by field name.
    fn default_params(kind: Self::Kind) -> Value;

    /// Collects params the schema walk cannot prompt for, such as nested
    /// choices or multi-selects. `None` means there are none.
    fn subprompts<D: crate::ui::cli::drivers::PromptDriver>(
        _driver: &D,
        _kind: Self::Kind,
    ) -> Result<Option<Map<String, Value>>> {
        Ok(None)
    }

    /// Assembles the typed enum back from a kind and its answered params.
    fn from_parts(kind: Self::Kind, params: Value) -> Result<Self> {
        let key: &'static str = kind.into();
        Ok(serde_json::from_value(
            json!({ "type": key, "params": params }),
        )?)
    }
}
