//! Property paths addressing values inside nested parameter maps
//!
//! A path is a sequence of keys written with index notation (`[page]`),
//! property notation (`filter.page`) or a mix of both (`filter[page]`).
//! Assigning through a path creates the intermediate objects it needs.
//!
//! ```rust
//! use acton_pager::property_path::PropertyPath;
//! use serde_json::{json, Map};
//!
//! let path: PropertyPath = "filter[page]".parse().unwrap();
//! let mut params = Map::new();
//! path.set_value(&mut params, json!(3)).unwrap();
//!
//! assert_eq!(serde_json::Value::Object(params), json!({ "filter": { "page": 3 } }));
//! ```

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Parsed property path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPath {
    path: String,
    elements: Vec<String>,
}

impl PropertyPath {
    /// Parse a path expression.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPropertyPath`] for an empty path, an empty key,
    /// an unclosed bracket or a misplaced `.`.
    pub fn parse(path: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidPropertyPath {
            path: path.to_string(),
            reason: reason.to_string(),
        };

        if path.is_empty() {
            return Err(invalid("the path is empty"));
        }

        let mut elements = Vec::new();
        let mut rest = path;

        while !rest.is_empty() {
            if let Some(inner) = rest.strip_prefix('[') {
                let end = inner
                    .find(']')
                    .ok_or_else(|| invalid("unclosed bracket"))?;
                let key = &inner[..end];
                if key.is_empty() {
                    return Err(invalid("empty index"));
                }
                elements.push(key.to_string());
                rest = &inner[end + 1..];
                continue;
            }

            let name = if elements.is_empty() {
                rest
            } else {
                rest.strip_prefix('.')
                    .ok_or_else(|| invalid("expected `.` or `[` between elements"))?
            };

            let end = name.find(['.', '[']).unwrap_or(name.len());
            let key = &name[..end];
            if key.is_empty() {
                return Err(invalid("empty property name"));
            }
            if key.contains(']') {
                return Err(invalid("unexpected `]`"));
            }
            elements.push(key.to_string());
            rest = &name[end..];
        }

        Ok(Self {
            path: path.to_string(),
            elements,
        })
    }

    /// Keys of the path, outermost first
    #[must_use]
    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    /// Number of keys in the path
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Always false, a parsed path has at least one key
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Read the value at this path
    #[must_use]
    pub fn get_value<'a>(&self, target: &'a Map<String, Value>) -> Option<&'a Value> {
        let (first, rest) = self.elements.split_first()?;
        rest.iter()
            .try_fold(target.get(first)?, |value, key| value.as_object()?.get(key))
    }

    /// Assign `value` at this path, creating missing intermediate objects.
    ///
    /// Null intermediates are replaced by objects.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPropertyPath`] when an intermediate key holds a
    /// scalar or an array.
    pub fn set_value(&self, target: &mut Map<String, Value>, value: Value) -> Result<()> {
        let Some((last, parents)) = self.elements.split_last() else {
            return Err(Error::InvalidPropertyPath {
                path: self.path.clone(),
                reason: "the path is empty".to_string(),
            });
        };

        let mut current = target;
        for key in parents {
            let entry = current
                .entry(key.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if entry.is_null() {
                *entry = Value::Object(Map::new());
            }
            current = match entry {
                Value::Object(map) => map,
                _ => {
                    return Err(Error::InvalidPropertyPath {
                        path: self.path.clone(),
                        reason: format!("\"{key}\" does not hold an object"),
                    })
                }
            };
        }

        current.insert(last.clone(), value);
        Ok(())
    }
}

impl FromStr for PropertyPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn elements(path: &str) -> Vec<String> {
        PropertyPath::parse(path).unwrap().elements().to_vec()
    }

    #[test]
    fn test_parse_notations() {
        assert_eq!(elements("[page]"), vec!["page"]);
        assert_eq!(elements("page"), vec!["page"]);
        assert_eq!(elements("filter[page]"), vec!["filter", "page"]);
        assert_eq!(elements("[filter][page]"), vec!["filter", "page"]);
        assert_eq!(elements("filter.page"), vec!["filter", "page"]);
        assert_eq!(elements("a[b].c[d]"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_parse_errors() {
        for path in ["", "[]", "[page", "a..b", ".a", "a.", "a]b", "[a]b"] {
            assert!(
                matches!(
                    PropertyPath::parse(path),
                    Err(Error::InvalidPropertyPath { .. })
                ),
                "{path:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_display_keeps_expression() {
        let path: PropertyPath = "filter[page]".parse().unwrap();
        assert_eq!(path.to_string(), "filter[page]");
        assert_eq!(path.len(), 2);
        assert!(!path.is_empty());
    }

    #[test]
    fn test_set_top_level() {
        let mut params = Map::new();
        params.insert("sort".to_string(), json!("name"));

        PropertyPath::parse("[page]")
            .unwrap()
            .set_value(&mut params, json!(2))
            .unwrap();

        assert_eq!(Value::Object(params), json!({ "sort": "name", "page": 2 }));
    }

    #[test]
    fn test_set_nested_creates_intermediates() {
        let mut params = Map::new();
        PropertyPath::parse("search[filter][page]")
            .unwrap()
            .set_value(&mut params, json!(4))
            .unwrap();

        assert_eq!(
            Value::Object(params),
            json!({ "search": { "filter": { "page": 4 } } })
        );
    }

    #[test]
    fn test_set_nested_keeps_siblings() {
        let mut params = json!({ "filter": { "status": "open", "page": 1 } })
            .as_object()
            .cloned()
            .unwrap();

        PropertyPath::parse("filter[page]")
            .unwrap()
            .set_value(&mut params, json!(7))
            .unwrap();

        assert_eq!(
            Value::Object(params),
            json!({ "filter": { "status": "open", "page": 7 } })
        );
    }

    #[test]
    fn test_set_replaces_null_intermediate() {
        let mut params = json!({ "filter": null }).as_object().cloned().unwrap();
        PropertyPath::parse("filter[page]")
            .unwrap()
            .set_value(&mut params, json!(2))
            .unwrap();
        assert_eq!(Value::Object(params), json!({ "filter": { "page": 2 } }));
    }

    #[test]
    fn test_set_through_scalar_fails() {
        let mut params = json!({ "filter": "open" }).as_object().cloned().unwrap();
        let result = PropertyPath::parse("filter[page]")
            .unwrap()
            .set_value(&mut params, json!(2));
        assert!(matches!(result, Err(Error::InvalidPropertyPath { .. })));
    }

    #[test]
    fn test_get_value() {
        let params = json!({ "filter": { "page": 3 } }).as_object().cloned().unwrap();
        let path = PropertyPath::parse("filter[page]").unwrap();
        assert_eq!(path.get_value(&params), Some(&json!(3)));

        let missing = PropertyPath::parse("filter[sort]").unwrap();
        assert_eq!(missing.get_value(&params), None);
    }
}
