//! Structural validation for standalone adventure files.
//!
//! Checks the shape of the decoded JSON before it is turned into a graph,
//! so a user-chosen file gets a message naming the offending field.

use serde_json::{Map, Value};

use crate::error::LoadError;

fn schema_error(path: impl Into<String>, reason: impl Into<String>) -> LoadError {
    LoadError::Schema {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Which JSON types a field accepts.
#[derive(Debug, Clone, Copy)]
enum Expect {
    Integer,
    Text,
    Flag,
    /// Style props: an object, encoded text, or null.
    Props,
}

impl Expect {
    fn accepts(self, value: &Value) -> bool {
        match self {
            Expect::Integer => value.is_i64(),
            Expect::Text => value.is_string(),
            Expect::Flag => value.is_boolean(),
            Expect::Props => value.is_object() || value.is_string() || value.is_null(),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Expect::Integer => "an integer",
            Expect::Text => "a string",
            Expect::Flag => "a boolean",
            Expect::Props => "an object or JSON text",
        }
    }
}

fn require(
    obj: &Map<String, Value>,
    path: &str,
    key: &str,
    expect: Expect,
) -> Result<(), LoadError> {
    let field = format!("{path}{key}");
    match obj.get(key) {
        None | Some(Value::Null) => Err(schema_error(field, "is missing")),
        Some(value) if expect.accepts(value) => Ok(()),
        Some(_) => Err(schema_error(field, format!("must be {}", expect.describe()))),
    }
}

fn optional(
    obj: &Map<String, Value>,
    path: &str,
    key: &str,
    expect: Expect,
) -> Result<(), LoadError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(()),
        Some(value) if expect.accepts(value) => Ok(()),
        Some(_) => Err(schema_error(
            format!("{path}{key}"),
            format!("must be {}", expect.describe()),
        )),
    }
}

fn array<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<&'a Vec<Value>, LoadError> {
    match obj.get(key) {
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(schema_error(key, "must be an array")),
        None => Err(schema_error(key, "is missing")),
    }
}

/// Confirm that `value` has the adventure shape.
///
/// Requires `id`, `title`, `nodes[]` (each with `nodeId`) and `links[]`
/// (each with `linkId`, `source` and `target`).
pub fn validate(value: &Value) -> Result<(), LoadError> {
    let root = value
        .as_object()
        .ok_or_else(|| schema_error("$", "must be an object"))?;

    require(root, "", "id", Expect::Integer)?;
    require(root, "", "title", Expect::Text)?;
    optional(root, "", "slug", Expect::Text)?;
    optional(root, "", "viewSlug", Expect::Text)?;
    optional(root, "", "props", Expect::Props)?;

    for (i, node) in array(root, "nodes")?.iter().enumerate() {
        let path = format!("nodes[{i}].");
        let node = node
            .as_object()
            .ok_or_else(|| schema_error(format!("nodes[{i}]"), "must be an object"))?;
        require(node, &path, "nodeId", Expect::Integer)?;
        optional(node, &path, "text", Expect::Text)?;
        optional(node, &path, "props", Expect::Props)?;
        optional(node, &path, "isStart", Expect::Flag)?;
    }

    for (i, link) in array(root, "links")?.iter().enumerate() {
        let path = format!("links[{i}].");
        let link = link
            .as_object()
            .ok_or_else(|| schema_error(format!("links[{i}]"), "must be an object"))?;
        require(link, &path, "linkId", Expect::Integer)?;
        require(link, &path, "source", Expect::Integer)?;
        require(link, &path, "target", Expect::Integer)?;
        optional(link, &path, "label", Expect::Text)?;
        optional(link, &path, "type", Expect::Text)?;
    }

    Ok(())
}
