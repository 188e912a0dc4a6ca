/// Builds a [`Value`](crate::Value) from JSON-like tokens.
///
/// Object keys are string literals. Any other Rust expression is converted
/// with [`to_value`](crate::to_value); wrap negative numbers and compound
/// expressions in parentheses.
///
/// An expression that fails to serialize (a map with non-string, non-integer
/// keys, for example) becomes `null`. Call `to_value` directly to see the
/// error.
///
/// # Examples
///
/// ```rust
/// use serde_record::{document, Value};
///
/// let limit = 3;
/// let doc = document!({
///     "val": 5,
///     "offset": (-2),
///     "limit": limit,
///     "tags": ["a", null, true]
/// });
///
/// assert_eq!(doc.get("offset"), Some(&Value::from(-2)));
/// assert_eq!(doc.get("limit"), Some(&Value::from(3)));
/// ```
#[macro_export]
macro_rules! document {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::document!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::Map::new();
        $(
            object.insert($key.to_string(), $crate::document!($value));
        )*
        $crate::Value::Object(object)
    }};

    // Anything else goes through Serialize
    ($s:expr) => {
        $crate::to_value(&$s).unwrap_or($crate::Value::Null)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Map, Number, Value};

    #[test]
    fn test_document_macro_primitives() {
        assert_eq!(document!(null), Value::Null);
        assert_eq!(document!(true), Value::Bool(true));
        assert_eq!(document!(5), Value::Number(Number::Integer(5)));
        assert_eq!(document!(0.5), Value::Number(Number::Float(0.5)));
        assert_eq!(document!("five"), Value::String("five".to_string()));
    }

    #[test]
    fn test_document_macro_nested() {
        assert_eq!(document!({}), Value::Object(Map::new()));

        let doc = document!({
            "val": 5,
            "inner": { "val": [0, (-1)] },
        });

        let inner = doc.get("inner").and_then(|v| v.get("val"));
        assert_eq!(
            inner,
            Some(&Value::Array(vec![Value::from(0), Value::from(-1)]))
        );
        assert_eq!(doc.to_string(), r#"{"val":5,"inner":{"val":[0,-1]}}"#);
    }

    #[test]
    fn test_document_macro_unserializable_expression_is_null() {
        let mut bad = std::collections::BTreeMap::new();
        bad.insert(vec![1], 1);
        assert!(crate::to_value(&bad).is_err());
        assert_eq!(document!({ "bad": bad }), document!({ "bad": null }));
    }
}
