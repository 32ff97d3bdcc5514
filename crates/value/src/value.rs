use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Insertion-ordered object map with unique keys
pub type Map = IndexMap<String, Value>;

/// A JSON-shaped value.
///
/// The union is closed: every traversal in the workspace matches on all six
/// variants. Values of different variants never compare equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(Map),
}

/// Shape of a [`Value`] without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl Value {
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Number(_) => ValueKind::Number,
            Self::String(_) => ValueKind::String,
            Self::Array(_) => ValueKind::Array,
            Self::Object(_) => ValueKind::Object,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a direct child key of an object
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// String form of a primitive.
    ///
    /// Numbers use the shortest decimal form (`100`, not `100.0`). Null and
    /// containers have no scalar text.
    #[must_use]
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            Self::Bool(b) => Some(b.to_string()),
            Self::Number(n) => Some(format_number(*n)),
            Self::String(s) => Some(s.clone()),
            Self::Null | Self::Array(_) | Self::Object(_) => None,
        }
    }

    /// Primitive that carries an indexable value: a boolean, a number or a
    /// string with non-whitespace content.
    #[must_use]
    pub fn is_indexable_scalar(&self) -> bool {
        match self {
            Self::Bool(_) | Self::Number(_) => true,
            Self::String(s) => !s.trim().is_empty(),
            Self::Null | Self::Array(_) | Self::Object(_) => false,
        }
    }

    /// Null, or a container with no entries.
    ///
    /// Strings are never considered empty here; completeness treats `""` as a
    /// present value.
    #[must_use]
    pub fn is_empty_like(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Array(items) => items.is_empty(),
            Self::Object(map) => map.is_empty(),
            Self::Bool(_) | Self::Number(_) | Self::String(_) => false,
        }
    }

    /// Resolve a dotted path by sequential key lookup.
    ///
    /// Arrays met along the way fan out over their elements, so a path that
    /// the indexer collapsed through a list of objects resolves to every
    /// matching element. An empty result means the path is unresolved.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Vec<&Value> {
        if path.is_empty() {
            return Vec::new();
        }

        let mut frontier = vec![self];
        for key in path.split('.') {
            let mut next = Vec::new();
            for value in frontier {
                collect_child(value, key, &mut next);
            }
            if next.is_empty() {
                return next;
            }
            frontier = next;
        }
        frontier
    }
}

fn collect_child<'a>(value: &'a Value, key: &str, out: &mut Vec<&'a Value>) {
    match value {
        Value::Object(map) => {
            if let Some(child) = map.get(key) {
                out.push(child);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_child(item, key, out);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}

fn format_number(n: f64) -> String {
    if n == 0.0 {
        // Avoid "-0"
        return "0".to_string();
    }
    n.to_string()
}

/// Parse text as a finite number.
///
/// Surrounding whitespace is ignored; blank input, NaN and infinities are
/// not numbers.
#[must_use]
pub fn parse_finite_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(key, child)| (key, Self::from(child)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    fn v(raw: serde_json::Value) -> Value {
        Value::from(raw)
    }

    #[test]
    fn conversion_preserves_key_order() {
        let value = v(json!({"zeta": 1, "alpha": 2, "mid": 3}));
        let keys: Vec<&str> = value
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn scalar_text_formats_numbers_without_trailing_zero() {
        assert_eq!(v(json!(100)).scalar_text().as_deref(), Some("100"));
        assert_eq!(v(json!(2.5)).scalar_text().as_deref(), Some("2.5"));
        assert_eq!(v(json!(-0.0)).scalar_text().as_deref(), Some("0"));
        assert_eq!(v(json!(true)).scalar_text().as_deref(), Some("true"));
        assert_eq!(v(json!(null)).scalar_text(), None);
        assert_eq!(v(json!([1])).scalar_text(), None);
    }

    #[test]
    fn resolve_walks_nested_objects() {
        let record = v(json!({"habitat": {"type": "forest", "notes": null}}));
        assert_eq!(
            record.resolve("habitat.type"),
            vec![&Value::String("forest".into())]
        );
        assert_eq!(record.resolve("habitat.notes"), vec![&Value::Null]);
        assert!(record.resolve("habitat.soil").is_empty());
        assert!(record.resolve("habitat.type.deeper").is_empty());
        assert!(record.resolve("").is_empty());
    }

    #[test]
    fn resolve_fans_out_over_arrays_of_objects() {
        let record = v(json!({
            "specimens": [
                {"collector": "Silva"},
                {"collector": "Lima"},
                {"other": 1}
            ]
        }));
        let found: Vec<String> = record
            .resolve("specimens.collector")
            .into_iter()
            .filter_map(Value::scalar_text)
            .collect();
        assert_eq!(found, vec!["Silva".to_string(), "Lima".to_string()]);
    }

    #[test]
    fn empty_like_covers_null_and_empty_containers() {
        assert!(v(json!(null)).is_empty_like());
        assert!(v(json!({})).is_empty_like());
        assert!(v(json!([])).is_empty_like());
        assert!(!v(json!("")).is_empty_like());
        assert!(!v(json!(0)).is_empty_like());
        assert!(!v(json!([null])).is_empty_like());
    }

    #[test]
    fn indexable_scalars_exclude_blank_strings() {
        assert!(v(json!("x")).is_indexable_scalar());
        assert!(v(json!(false)).is_indexable_scalar());
        assert!(!v(json!("   ")).is_indexable_scalar());
        assert!(!v(json!(null)).is_indexable_scalar());
        assert!(!v(json!({"a": 1})).is_indexable_scalar());
    }

    #[test]
    fn parse_finite_number_rejects_non_numbers() {
        assert_eq!(parse_finite_number(" 100 "), Some(100.0));
        assert_eq!(parse_finite_number("1e3"), Some(1000.0));
        assert_eq!(parse_finite_number(""), None);
        assert_eq!(parse_finite_number("abc"), None);
        assert_eq!(parse_finite_number("NaN"), None);
        assert_eq!(parse_finite_number("inf"), None);
    }

    proptest! {
        #[test]
        fn proptest_integer_text_round_trips(n in -1_000_000i64..1_000_000i64) {
            let text = Value::Number(n as f64).scalar_text().expect("number text");
            prop_assert_eq!(text.clone(), n.to_string());
            prop_assert_eq!(parse_finite_number(&text), Some(n as f64));
        }
    }
}
