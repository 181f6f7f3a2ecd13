// MIT License
// Copyright (c) 2024 Graham King

use std::fs;
use std::io;
use std::path::Path;

use serde_yaml::Value;

use crate::error::PopulateError;
use crate::tag::TagSet;

// Top level of messages.yaml
#[derive(serde::Deserialize, Debug)]
struct SourceFile {
    #[serde(default)]
    messages: Option<Vec<Entry>>,
}

/// One item of the `messages` list, as written. It only becomes a `Record`
/// once we know it has a message, so one bad entry doesn't sink the file.
#[derive(serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct Entry(Value);

/// A message ready to insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub message: String,
    pub tags: TagSet,
}

/// Read and parse the YAML source. Nothing here touches the database.
pub fn load(path: &Path) -> Result<Vec<Entry>, PopulateError> {
    let contents = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(PopulateError::SourceNotFound(path.to_path_buf()));
        }
        Err(source) => {
            return Err(PopulateError::SourceRead {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    parse(&contents).map_err(|source| PopulateError::SourceParse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse(s: &str) -> Result<Vec<Entry>, serde_yaml::Error> {
    // An empty (or comments only) document is null, same as no messages
    let doc: Value = serde_yaml::from_str(s)?;
    if doc.is_null() {
        return Ok(vec![]);
    }
    let sf: SourceFile = serde_yaml::from_value(doc)?;
    Ok(sf.messages.unwrap_or_default())
}

impl Entry {
    /// How we refer to this entry in error output
    pub fn label(&self) -> String {
        self.0
            .get("message")
            .and_then(scalar_text)
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

impl TryFrom<&Entry> for Record {
    type Error = PopulateError;

    fn try_from(entry: &Entry) -> Result<Record, PopulateError> {
        let Value::Mapping(fields) = &entry.0 else {
            return Err(PopulateError::record(&entry.label(), "entry is not a mapping"));
        };
        let message = match fields.get("message") {
            None | Some(Value::Null) => {
                return Err(PopulateError::record(
                    &entry.label(),
                    "missing required field 'message'",
                ));
            }
            Some(v) => scalar_text(v).ok_or_else(|| {
                PopulateError::record(&entry.label(), "field 'message' is not a string")
            })?,
        };
        let tags = match fields.get("tags") {
            None | Some(Value::Null) => TagSet::default(),
            // Non-string items can't name a tag, drop them like unknown tags
            Some(Value::Sequence(names)) => {
                TagSet::from_names(names.iter().filter_map(Value::as_str))
            }
            Some(_) => {
                return Err(PopulateError::record(
                    &entry.label(),
                    "field 'tags' is not a list",
                ));
            }
        };
        Ok(Record { message, tags })
    }
}

// Numbers and booleans are stored by their text form
fn scalar_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
