//! Frontmatter codec: splits a note file into `(body, metadata)` and
//! re-serializes it deterministically.
//!
//! A metadata block is present when the first line of the file is `---`
//! (a leading BOM is tolerated). The block ends at the next `---` or `...`
//! line; a file that opens a block but never closes it is treated as having
//! no block at all. Keys are emitted in lexicographic order so repeated
//! round-trips never reorder a file.

use crate::model::{MetaValue, Metadata};
use thiserror::Error;

/// Codec-level failure. Callers that know the file path wrap this in
/// [`crate::error::VaultzError::MalformedMetadata`].
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("unparseable YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0}")]
    Unsupported(String),
}

/// Split file contents into body and metadata.
///
/// A file with no metadata block yields the whole input as body and an
/// empty map.
pub fn decode(input: &str) -> Result<(String, Metadata), CodecError> {
    let text = input.strip_prefix('\u{feff}').unwrap_or(input);

    let Some(first_line_end) = text.find('\n') else {
        return Ok((input.to_string(), Metadata::new()));
    };
    if text[..first_line_end].trim_end() != "---" {
        return Ok((input.to_string(), Metadata::new()));
    }

    // Scan for the closing delimiter, tracking the byte offset of the line
    // that follows it.
    let mut yaml_end = None;
    let mut body_start = text.len();
    let mut offset = first_line_end + 1;
    for line in text[first_line_end + 1..].split_inclusive('\n') {
        let trimmed = line.trim_end();
        if trimmed == "---" || trimmed == "..." {
            yaml_end = Some(offset);
            body_start = offset + line.len();
            break;
        }
        offset += line.len();
    }

    let Some(yaml_end) = yaml_end else {
        // Opened but never closed: not a block.
        return Ok((input.to_string(), Metadata::new()));
    };

    let raw_yaml = &text[first_line_end + 1..yaml_end];
    let mut body = &text[body_start..];
    // Encoding separates the block from the body with one blank line; strip
    // the counterpart here so round-trips are exact.
    if let Some(stripped) = body.strip_prefix('\n') {
        body = stripped;
    } else if let Some(stripped) = body.strip_prefix("\r\n") {
        body = stripped;
    }

    let metadata = parse_yaml_block(raw_yaml)?;
    Ok((body.to_string(), metadata))
}

/// Serialize body and metadata back into file contents.
///
/// Empty metadata encodes to the bare body with no block.
pub fn encode(body: &str, metadata: &Metadata) -> Result<String, CodecError> {
    if metadata.is_empty() {
        return Ok(body.to_string());
    }

    let mut mapping = serde_yaml::Mapping::new();
    for (key, value) in metadata.iter() {
        let yaml_value = match value {
            MetaValue::Scalar(s) => serde_yaml::Value::String(s.clone()),
            MetaValue::List(items) => serde_yaml::Value::Sequence(
                items
                    .iter()
                    .map(|s| serde_yaml::Value::String(s.clone()))
                    .collect(),
            ),
        };
        mapping.insert(serde_yaml::Value::String(key.clone()), yaml_value);
    }

    let yaml = serde_yaml::to_string(&mapping)?;
    Ok(format!("---\n{yaml}---\n\n{body}"))
}

fn parse_yaml_block(raw_yaml: &str) -> Result<Metadata, CodecError> {
    if raw_yaml.trim().is_empty() {
        return Ok(Metadata::new());
    }

    let value: serde_yaml::Value = serde_yaml::from_str(raw_yaml)?;
    let mapping = match value {
        serde_yaml::Value::Mapping(m) => m,
        serde_yaml::Value::Null => return Ok(Metadata::new()),
        other => {
            return Err(CodecError::Unsupported(format!(
                "expected a key-value mapping, got {}",
                yaml_kind(&other)
            )))
        }
    };

    let mut metadata = Metadata::new();
    for (key, value) in mapping {
        let key = scalar_to_string(&key).ok_or_else(|| {
            CodecError::Unsupported(format!("non-scalar key ({})", yaml_kind(&key)))
        })?;
        let value = match value {
            serde_yaml::Value::Sequence(items) => {
                let mut list = Vec::with_capacity(items.len());
                for item in &items {
                    let item = scalar_to_string(item).ok_or_else(|| {
                        CodecError::Unsupported(format!(
                            "non-scalar list element under '{}' ({})",
                            key,
                            yaml_kind(item)
                        ))
                    })?;
                    list.push(item);
                }
                MetaValue::List(list)
            }
            other => MetaValue::Scalar(scalar_to_string(&other).ok_or_else(|| {
                CodecError::Unsupported(format!(
                    "nested value under '{}' ({})",
                    key,
                    yaml_kind(&other)
                ))
            })?),
        };
        metadata.0.insert(key, value);
    }
    Ok(metadata)
}

fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Null => Some(String::new()),
        _ => None,
    }
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "bool",
        serde_yaml::Value::Number(_) => "number",
        serde_yaml::Value::String(_) => "string",
        serde_yaml::Value::Sequence(_) => "sequence",
        serde_yaml::Value::Mapping(_) => "mapping",
        serde_yaml::Value::Tagged(_) => "tagged value",
    }
}
