use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::attributes::{Attribute, AttributeRef, NominalAttribute, NumericAttribute};
use crate::core::dataset::Dataset;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::{DenseInstance, InstanceRef};
use crate::utils::file_parsing::{split_preserving_quotes, strip_surrounding_quotes};

/// Reads an ARFF file from disk. A `class_index` of `None` marks the last
/// declared attribute as the class.
pub fn load_arff<P: AsRef<Path>>(path: P, class_index: Option<usize>) -> io::Result<Dataset> {
    let text = fs::read_to_string(path)?;
    parse_arff(&text, class_index)
}

/// Parses ARFF text: `@relation`, a run of `@attribute` declarations
/// (numeric or nominal), then dense `@data` rows. `?` marks a missing
/// value; sparse `{index value}` rows are rejected.
pub fn parse_arff(text: &str, class_index: Option<usize>) -> io::Result<Dataset> {
    let mut relation_name: Option<String> = None;
    let mut attributes: Vec<AttributeRef> = Vec::new();
    let mut header: Option<Arc<InstanceHeader>> = None;
    let mut instances: Vec<InstanceRef> = Vec::new();

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }

        if let Some(header) = &header {
            if line.starts_with('{') {
                return Err(invalid_data(
                    "sparse ARFF rows are not supported".to_string(),
                ));
            }
            let fields = split_preserving_quotes(line, ',');
            if fields.len() != attributes.len() {
                return Err(invalid_data(format!(
                    "expected {} values per row, got {} in: {line}",
                    attributes.len(),
                    fields.len()
                )));
            }
            let mut values = Vec::with_capacity(fields.len());
            for (attribute, field) in attributes.iter().zip(&fields) {
                values.push(parse_value(attribute.as_ref(), field)?);
            }
            instances.push(Arc::new(DenseInstance::new(Arc::clone(header), values)) as InstanceRef);
        } else if let Some(rest) = directive(line, "@relation") {
            relation_name = Some(strip_surrounding_quotes(rest).to_string());
        } else if let Some(rest) = directive(line, "@attribute") {
            attributes.push(parse_attribute(rest)?);
        } else if directive(line, "@data").is_some() {
            if attributes.is_empty() {
                return Err(invalid_data("no attributes declared".to_string()));
            }
            let class = match class_index {
                Some(index) if index >= attributes.len() => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!(
                            "class index {index} out of range for {} attributes",
                            attributes.len()
                        ),
                    ));
                }
                Some(index) => index,
                None => attributes.len() - 1,
            };
            let name = relation_name
                .take()
                .ok_or_else(|| invalid_data("missing @relation declaration".to_string()))?;
            header = Some(Arc::new(InstanceHeader::new(
                name,
                attributes.clone(),
                class,
            )));
        } else {
            return Err(invalid_data(format!("unrecognized header line: {line}")));
        }
    }

    let header = header.ok_or_else(|| invalid_data("missing @data section".to_string()))?;
    Ok(Dataset::with_instances(header, instances))
}

/// All `.arff` files directly inside `dir`, sorted by path for stable
/// processing order.
pub fn collect_arff_files<P: AsRef<Path>>(dir: P) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_arff = path
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case("arff"));
        if is_arff && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// The remainder of `line` when it opens with `keyword` (ASCII
/// case-insensitive) followed by whitespace or nothing.
fn directive<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let head = line.get(..keyword.len())?;
    let tail = &line[keyword.len()..];
    (head.eq_ignore_ascii_case(keyword) && tail.chars().next().is_none_or(char::is_whitespace))
        .then(|| tail.trim())
}

fn parse_attribute(spec: &str) -> io::Result<AttributeRef> {
    let (name, kind) = split_attribute_name(spec)?;
    let kind = kind.trim();

    if let Some(body) = kind.strip_prefix('{') {
        let body = body
            .strip_suffix('}')
            .ok_or_else(|| invalid_data(format!("unterminated nominal listing: {spec}")))?;
        let labels: Vec<String> = split_preserving_quotes(body, ',')
            .iter()
            .map(|label| strip_surrounding_quotes(label).to_string())
            .collect();
        if labels.is_empty() {
            return Err(invalid_data(format!("empty nominal listing: {spec}")));
        }
        return Ok(Arc::new(NominalAttribute::from_values(name, labels)));
    }

    match kind.to_ascii_lowercase().as_str() {
        "numeric" | "real" | "integer" => Ok(Arc::new(NumericAttribute::new(name))),
        _ => Err(invalid_data(format!(
            "unsupported attribute type in: {spec}"
        ))),
    }
}

fn split_attribute_name(spec: &str) -> io::Result<(String, &str)> {
    let spec = spec.trim();
    if let Some(quote) = spec.chars().next().filter(|&c| c == '\'' || c == '"') {
        let body = &spec[1..];
        let end = body
            .find(quote)
            .ok_or_else(|| invalid_data(format!("unterminated attribute name: {spec}")))?;
        Ok((body[..end].to_string(), &body[end + 1..]))
    } else {
        let end = spec
            .find(char::is_whitespace)
            .ok_or_else(|| invalid_data(format!("attribute declaration has no type: {spec}")))?;
        Ok((spec[..end].to_string(), &spec[end..]))
    }
}

fn parse_value(attribute: &dyn Attribute, field: &str) -> io::Result<f64> {
    if field == "?" {
        return Ok(f64::NAN);
    }
    let text = strip_surrounding_quotes(field);
    if let Some(nominal) = attribute.as_any().downcast_ref::<NominalAttribute>() {
        let index = nominal.index_of_value(text).ok_or_else(|| {
            invalid_data(format!(
                "value {text:?} is not declared for attribute {:?}",
                attribute.name()
            ))
        })?;
        Ok(index as f64)
    } else {
        text.parse::<f64>()
            .map_err(|_| invalid_data(format!("{text:?} is not numeric")))
    }
}

fn invalid_data(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}
