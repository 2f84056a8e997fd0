use async_graphql::{InputValueError, InputValueResult, Scalar, ScalarType, Value};
use serde::{Deserialize, Serialize};

/// Opaque row identifier.
///
/// Input and output pass the string through unchanged and any string is
/// accepted. Non-string input (e.g. `user(id: 42)`) is not coerced to null:
/// `is_valid` rejects it, so the whole document fails validation instead of
/// only the field failing at resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uuid(pub String);

#[Scalar(name = "UUID")]
/// A UUID string
impl ScalarType for Uuid {
    fn parse(value: Value) -> InputValueResult<Self> {
        match value {
            Value::String(s) => Ok(Uuid(s)),
            other => Err(InputValueError::expected_type(other)),
        }
    }

    fn is_valid(value: &Value) -> bool {
        matches!(value, Value::String(_))
    }

    fn to_value(&self) -> Value {
        Value::String(self.0.clone())
    }
}

impl Uuid {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for Uuid {
    fn from(s: String) -> Self {
        Uuid(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_identity() {
        let id = <Uuid as ScalarType>::parse(Value::from("not-even-a-uuid")).unwrap();
        assert_eq!(id.as_str(), "not-even-a-uuid");
        assert_eq!(id.to_value(), Value::from("not-even-a-uuid"));
    }

    #[test]
    fn test_non_string_fails_validation_instead_of_parsing_to_null() {
        assert!(<Uuid as ScalarType>::parse(Value::from(42)).is_err());
        assert!(<Uuid as ScalarType>::parse(Value::Boolean(true)).is_err());
        assert!(!<Uuid as ScalarType>::is_valid(&Value::Null));
    }
}
