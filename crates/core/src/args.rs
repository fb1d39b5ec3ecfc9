// Command arguments and their serialization into `var` declarations.

use serde_json::{Map, Value};

/// A single argument value, classified once at the call boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    /// Declared without an initializer.
    Absent,
    /// Emitted as a quoted string literal.
    Text(String),
    /// Numbers, booleans and anything else emitted as a bare literal.
    Scalar(Value),
    /// Emitted as an array literal.
    List(Vec<Value>),
}

impl ArgValue {
    /// Render the right-hand side of the declaration, or `None` for `Absent`.
    fn literal(&self) -> Option<String> {
        match self {
            ArgValue::Absent => None,
            ArgValue::Text(text) => Some(js_string_literal(text)),
            ArgValue::Scalar(value) => Some(js_safe(value.to_string())),
            ArgValue::List(items) => Some(js_safe(Value::Array(items.clone()).to_string())),
        }
    }
}

impl From<Value> for ArgValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ArgValue::Absent,
            Value::String(text) => ArgValue::Text(text),
            Value::Array(items) => ArgValue::List(items),
            other => ArgValue::Scalar(other),
        }
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::Text(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::Text(value)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Scalar(Value::Bool(value))
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(impl From<$ty> for ArgValue {
            fn from(value: $ty) -> Self {
                ArgValue::from(Value::from(value))
            }
        })*
    };
}

impl_from_number!(i32, i64, u32, u64, f64);

impl From<Vec<Value>> for ArgValue {
    fn from(items: Vec<Value>) -> Self {
        ArgValue::List(items)
    }
}

impl<T: Into<ArgValue>> From<Option<T>> for ArgValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(ArgValue::Absent)
    }
}

/// Ordered argument set. Iteration order is insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    entries: Vec<(String, ArgValue)>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an argument. A replaced argument keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ArgValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Chainable form of [`Args::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.entries.iter().find(|(existing, _)| existing == name).map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<ArgValue>> FromIterator<(K, V)> for Args {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = Args::new();
        for (name, value) in iter {
            args.insert(name, value);
        }
        args
    }
}

impl From<Map<String, Value>> for Args {
    fn from(map: Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

/// Serialize arguments into newline-joined `var` declarations, in order.
///
/// Returns an empty string when `args` is `None` or empty.
pub fn serialize_variables(args: Option<&Args>) -> String {
    let Some(args) = args else {
        return String::new();
    };

    args.iter()
        .map(|(name, value)| match value.literal() {
            Some(literal) => format!("var {name}={literal};"),
            None => format!("var {name};"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn js_string_literal(text: &str) -> String {
    js_safe(Value::from(text).to_string())
}

// JSON leaves U+2028/U+2029 raw, which ES3 parsers reject inside literals.
fn js_safe(json: String) -> String {
    if json.contains(['\u{2028}', '\u{2029}']) {
        json.replace('\u{2028}', "\\u2028").replace('\u{2029}', "\\u2029")
    } else {
        json
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_set_serializes_to_empty_string() {
        assert_eq!(serialize_variables(None), "");
        assert_eq!(serialize_variables(Some(&Args::new())), "");
    }

    #[test]
    fn each_kind_uses_its_own_quoting() {
        let args = Args::new()
            .with("title", "Hello")
            .with("width", 800)
            .with("ratio", 0.5)
            .with("visible", true)
            .with("layers", vec![json!(1), json!(2), json!(3)])
            .with("height", ArgValue::Absent);

        assert_eq!(
            serialize_variables(Some(&args)),
            [
                r#"var title="Hello";"#,
                "var width=800;",
                "var ratio=0.5;",
                "var visible=true;",
                "var layers=[1,2,3];",
                "var height;",
            ]
            .join("\n")
        );
    }

    #[test]
    fn falsy_values_keep_their_initializer() {
        let args = Args::new().with("count", 0).with("enabled", false).with("label", "");
        assert_eq!(
            serialize_variables(Some(&args)),
            "var count=0;\nvar enabled=false;\nvar label=\"\";"
        );
    }

    #[test]
    fn text_with_quotes_and_newlines_is_escaped() {
        let args = Args::new().with("caption", "say \"hi\"\nbye \\ now");
        assert_eq!(
            serialize_variables(Some(&args)),
            r#"var caption="say \"hi\"\nbye \\ now";"#
        );
    }

    #[test]
    fn line_separator_is_escaped_for_es3() {
        let args = Args::new().with("text", "a\u{2028}b");
        assert_eq!(serialize_variables(Some(&args)), r#"var text="a\u2028b";"#);
    }

    #[test]
    fn nested_structures_use_literal_path() {
        let args = Args::from(
            json!({
                "matrix": [[1, 2], ["a", null]],
                "options": {"mode": "fast"},
            })
            .as_object()
            .cloned()
            .unwrap(),
        );
        assert_eq!(
            serialize_variables(Some(&args)),
            "var matrix=[[1,2],[\"a\",null]];\nvar options={\"mode\":\"fast\"};"
        );
    }

    #[test]
    fn json_values_classify_by_kind() {
        assert_eq!(ArgValue::from(json!(null)), ArgValue::Absent);
        assert_eq!(ArgValue::from(json!("x")), ArgValue::Text("x".into()));
        assert_eq!(ArgValue::from(json!([1])), ArgValue::List(vec![json!(1)]));
        assert_eq!(ArgValue::from(json!(3)), ArgValue::Scalar(json!(3)));
        assert_eq!(ArgValue::from(None::<i32>), ArgValue::Absent);
        assert_eq!(ArgValue::from(Some("y")), ArgValue::Text("y".into()));
    }

    #[test]
    fn reinserting_keeps_original_position() {
        let mut args = Args::new().with("a", 1).with("b", 2);
        args.insert("a", 3);
        assert_eq!(serialize_variables(Some(&args)), "var a=3;\nvar b=2;");
        assert_eq!(args.len(), 2);
        assert_eq!(args.get("a"), Some(&ArgValue::from(3)));
    }

    #[test]
    fn json_object_keeps_document_order() {
        let map: Map<String, Value> =
            serde_json::from_str(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#).unwrap();
        let args = Args::from(map);
        let names: Vec<&str> = args.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }
}
