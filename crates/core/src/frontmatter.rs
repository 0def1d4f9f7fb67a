use serde_json::Value as JsonValue;
use thiserror::Error;

/// Metadata block at the top of an MDX document.
#[derive(Debug, Clone, PartialEq)]
pub struct Frontmatter {
    /// Parsed frontmatter as a JSON object.
    pub value: JsonValue,
    /// Byte offset inside the original document where the body begins.
    pub body_start: usize,
}

impl Frontmatter {
    fn empty() -> Self {
        Self {
            value: JsonValue::Object(Default::default()),
            body_start: 0,
        }
    }

    /// Returns a string field of the frontmatter mapping.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.value.get(key).and_then(JsonValue::as_str)
    }

    /// The `title` field, if present and non-blank.
    pub fn title(&self) -> Option<&str> {
        self.get_str("title").map(str::trim).filter(|t| !t.is_empty())
    }

    /// The `description` field, if present.
    pub fn description(&self) -> Option<&str> {
        self.get_str("description")
    }

    /// Returns true when the document had no metadata.
    pub fn is_empty(&self) -> bool {
        self.value.as_object().is_none_or(|map| map.is_empty())
    }
}

/// Errors emitted while parsing or extracting frontmatter.
#[derive(Debug, Error)]
pub enum FrontmatterError {
    /// YAML failed to parse.
    #[error("Frontmatter parse error: {0}")]
    Parse(String),
    /// Top-level YAML node was not a mapping.
    #[error("Frontmatter must be a YAML mapping at the top level")]
    InvalidRootType,
}

/// Extracts YAML frontmatter from a document.
///
/// Leading blank lines and a UTF-8 BOM are skipped. A document whose first
/// non-blank line is not `---`, or whose opening `---` is never closed, has
/// no frontmatter; the lone `---` is then an ordinary thematic break.
pub fn extract_frontmatter(input: &str) -> Result<Frontmatter, FrontmatterError> {
    let Some((block, body_start)) = find_yaml_block(input)? else {
        return Ok(Frontmatter::empty());
    };
    Ok(Frontmatter {
        value: parse_yaml_block(block)?,
        body_start,
    })
}

/// Splits a document into its frontmatter and the remaining body.
pub fn split_frontmatter(input: &str) -> Result<(Frontmatter, &str), FrontmatterError> {
    let frontmatter = extract_frontmatter(input)?;
    let body = &input[frontmatter.body_start..];
    Ok((frontmatter, body))
}

fn parse_yaml_block(block: &str) -> Result<JsonValue, FrontmatterError> {
    if block.trim().is_empty() {
        return Ok(JsonValue::Object(Default::default()));
    }

    let yaml: serde_yaml::Value =
        serde_yaml::from_str(block).map_err(|err| FrontmatterError::Parse(err.to_string()))?;
    let json =
        serde_json::to_value(yaml).map_err(|err| FrontmatterError::Parse(err.to_string()))?;

    match json {
        JsonValue::Null => Ok(JsonValue::Object(Default::default())),
        JsonValue::Object(_) => Ok(json),
        _ => Err(FrontmatterError::InvalidRootType),
    }
}

/// Yields `(line, offset_after_line)` pairs, with `\r` stripped from the line.
fn lines_with_offsets(input: &str, start: usize) -> impl Iterator<Item = (&str, usize)> {
    let mut cursor = start;
    std::iter::from_fn(move || {
        if cursor >= input.len() {
            return None;
        }
        let rest = &input[cursor..];
        let (line, consumed) = match rest.find('\n') {
            Some(pos) => (&rest[..pos], pos + 1),
            None => (rest, rest.len()),
        };
        cursor += consumed;
        Some((line.trim_end_matches('\r'), cursor))
    })
}

fn find_yaml_block(input: &str) -> Result<Option<(&str, usize)>, FrontmatterError> {
    let start = if input.starts_with('\u{feff}') {
        '\u{feff}'.len_utf8()
    } else {
        0
    };

    let mut lines = lines_with_offsets(input, start).skip_while(|(line, _)| line.trim().is_empty());
    let Some((opener, block_start)) = lines.next() else {
        return Ok(None);
    };
    if opener != "---" {
        return Ok(None);
    }

    let mut block_end = block_start;
    for (line, after) in lines {
        if line == "---" {
            let block = input[block_start..block_end].trim_end_matches(['\r', '\n']);
            return Ok(Some((block, after)));
        }
        block_end = after;
    }
    Ok(None)
}
