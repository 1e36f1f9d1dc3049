use anyhow::{Context, Result, anyhow};
use schemars::{Schema, schema_for};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
}

/// One promptable params field, flattened out of the choice schema.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    pub required: bool,
    pub kind: FieldKind,
    pub default: Option<Value>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Set by the `"x-file" = true` schema extension: the wizard treats
    /// the answer as a filesystem path and validates it on the spot.
    pub file_path: bool,
}

/// The whole tagged-enum schema for `T`.
pub fn schema_for<T: schemars::JsonSchema>() -> Schema {
    schema_for!(T)
}

/// Field specs of the `params` object behind the variant tagged
/// `kind_key`, in schema order. Empty when the variant has no promptable
/// params.
pub fn specs_for_kind(root: &Schema, kind_key: &str) -> Result<Vec<FieldSpec>> {
    let root_obj = root.as_object().context("root schema is not an object")?;

    let branches = root_obj
        .get("oneOf")
        .or_else(|| root_obj.get("anyOf"))
        .and_then(|v| v.as_array())
        .context("missing oneOf/anyOf")?;

    let branch = branches
        .iter()
        .filter_map(|branch| branch.as_object())
        .find(|branch| {
            branch
                .get("properties")
                .and_then(|v| v.as_object())
                .is_some_and(|props| tag_matches(props, kind_key))
        })
        .ok_or_else(|| anyhow!("no branch found for type={kind_key}"))?;

    let Some(params) = branch
        .get("properties")
        .and_then(|v| v.as_object())
        .and_then(|props| props.get("params"))
        .and_then(|v| v.as_object())
        .and_then(|params| deref(root_obj, params))
    else {
        return Ok(vec![]);
    };

    let Some(fields) = params.get("properties").and_then(|v| v.as_object()) else {
        return Ok(vec![]);
    };

    let required: Vec<&str> = params
        .get("required")
        .and_then(|v| v.as_array())
        .map(|a| a.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let mut specs = Vec::new();
    for (name, field) in fields {
        let field = field
            .as_object()
            .with_context(|| format!("field schema for '{name}' is not an object"))?;
        let field = deref(root_obj, field)
            .ok_or_else(|| anyhow!("failed to resolve field $ref for '{name}'"))?;
        if let Some(spec) = spec_from_field(name, field, &required) {
            specs.push(spec);
        }
    }
    Ok(specs)
}

fn spec_from_field(name: &str, field: &Map<String, Value>, required: &[&str]) -> Option<FieldSpec> {
    let kind = detect_field_kind(field.get("type"))?;
    Some(FieldSpec {
        name: name.to_string(),
        title: field
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or(name)
            .to_string(),
        description: field
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string),
        required: required.contains(&name),
        kind,
        default: field.get("default").cloned(),
        min: field
            .get("minimum")
            .or_else(|| field.get("exclusiveMinimum"))
            .and_then(Value::as_f64),
        max: field
            .get("maximum")
            .or_else(|| field.get("exclusiveMaximum"))
            .and_then(Value::as_f64),
        file_path: field.get("x-file").and_then(Value::as_bool).unwrap_or(false),
    })
}

fn tag_matches(props: &Map<String, Value>, kind_key: &str) -> bool {
    let Some(tag) = props.get("type").and_then(|v| v.as_object()) else {
        return false;
    };
    if tag.get("const").and_then(Value::as_str) == Some(kind_key) {
        return true;
    }
    tag.get("enum")
        .and_then(|v| v.as_array())
        .is_some_and(|values| values.len() == 1 && values[0].as_str() == Some(kind_key))
}

/// Follows a local `$ref` like `#/$defs/NeighborhoodParams` against the
/// root object; objects without a `$ref` come back unchanged.
fn deref<'a>(
    root_obj: &'a Map<String, Value>,
    obj: &'a Map<String, Value>,
) -> Option<&'a Map<String, Value>> {
    let Some(Value::String(reference)) = obj.get("$ref") else {
        return Some(obj);
    };
    let path = reference.strip_prefix("#/")?;
    let mut current = root_obj;
    for raw_segment in path.split('/') {
        // JSON Pointer unescape: ~1 is '/', ~0 is '~'
        let segment = raw_segment.replace("~1", "/").replace("~0", "~");
        current = current.get(&segment)?.as_object()?;
    }
    Some(current)
}

fn detect_field_kind(ty: Option<&Value>) -> Option<FieldKind> {
    let name_to_kind = |s: &str| match s {
        "string" => Some(FieldKind::String),
        "integer" => Some(FieldKind::Integer),
        "number" => Some(FieldKind::Number),
        "boolean" => Some(FieldKind::Boolean),
        _ => None,
    };
    match ty {
        Some(Value::String(s)) => name_to_kind(s),
        // unions like ["integer","null"] for Option<T>
        Some(Value::Array(alternatives)) => alternatives
            .iter()
            .filter_map(Value::as_str)
            .find_map(name_to_kind),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::JsonSchema;
    use serde::{Deserialize, Serialize};
    use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

    fn default_count() -> u64 {
        4
    }

    #[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
    struct ProbeParams {
        #[schemars(
            title = "Input",
            description = "Where to read from",
            extend("x-file" = true)
        )]
        input: String,

        #[serde(default = "default_count")]
        #[schemars(title = "Count", range(min = 1, max = 16), default = "default_count")]
        count: u64,

        #[serde(default)]
        #[schemars(title = "Cut-off")]
        cut_off: Option<f64>,

        #[serde(default)]
        #[schemars(skip)]
        hidden: Option<String>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants)]
    #[serde(tag = "type", content = "params", rename_all = "kebab-case")]
    #[strum_discriminants(name(ProbeKind))]
    #[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
    #[strum_discriminants(strum(serialize_all = "kebab-case"))]
    enum ProbeChoice {
        WithFields(ProbeParams),
    }

    fn spec<'a>(specs: &'a [FieldSpec], name: &str) -> &'a FieldSpec {
        specs
            .iter()
            .find(|s| s.name == name)
            .unwrap_or_else(|| panic!("no spec named {name}"))
    }

    #[test]
    fn flattens_titles_ranges_and_extensions() {
        let root = schema_for::<ProbeChoice>();
        let specs = specs_for_kind(&root, "with-fields").unwrap();

        let input = spec(&specs, "input");
        assert_eq!(input.title, "Input");
        assert_eq!(input.kind, FieldKind::String);
        assert!(input.file_path);
        assert!(input.required);

        let count = spec(&specs, "count");
        assert_eq!(count.kind, FieldKind::Integer);
        assert_eq!(count.min, Some(1.0));
        assert_eq!(count.max, Some(16.0));
        assert_eq!(count.default.as_ref().and_then(Value::as_u64), Some(4));

        let cut_off = spec(&specs, "cut_off");
        assert_eq!(cut_off.kind, FieldKind::Number);
        assert!(!cut_off.required);
        assert!(!cut_off.file_path);
    }

    #[test]
    fn skipped_fields_stay_hidden() {
        let root = schema_for::<ProbeChoice>();
        let specs = specs_for_kind(&root, "with-fields").unwrap();
        assert!(specs.iter().all(|s| s.name != "hidden"));
    }

    #[test]
    fn unknown_kind_is_an_error() {
        let root = schema_for::<ProbeChoice>();
        assert!(specs_for_kind(&root, "no-such-kind").is_err());
    }
}
