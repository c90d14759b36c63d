use async_graphql::{InputValueError, InputValueResult, Scalar, ScalarType, Value};
use chrono::{DateTime, NaiveDate, Utc};

/// Calendar instant exchanged as epoch milliseconds.
///
/// Outbound values are always integers. Inbound values (inline literals and
/// variables alike) may be an integer number of milliseconds, or a string in
/// RFC 3339, `YYYY-MM-DD` or `MM-DD-YYYY` form. Anything else is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(pub DateTime<Utc>);

impl Date {
    pub fn from_millis(millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(Self)
    }

    pub fn timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Parse the string forms accepted from clients
    pub fn parse_str(s: &str) -> Option<Self> {
        let s = s.trim();

        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            return s.parse::<i64>().ok().and_then(Self::from_millis);
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self(dt.with_timezone(&Utc)));
        }

        ["%Y-%m-%d", "%m-%d-%Y"]
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| Self(dt.and_utc()))
    }
}

#[Scalar(name = "Date")]
impl ScalarType for Date {
    fn parse(value: Value) -> InputValueResult<Self> {
        match value {
            Value::Number(n) => n.as_i64().and_then(Date::from_millis).ok_or_else(|| {
                InputValueError::custom("Date must be an integer number of epoch milliseconds")
            }),
            Value::String(s) => Date::parse_str(&s).ok_or_else(|| {
                InputValueError::custom(format!("'{}' is not a recognised date", s))
            }),
            other => Err(InputValueError::expected_type(other)),
        }
    }

    fn is_valid(value: &Value) -> bool {
        matches!(value, Value::Number(_) | Value::String(_))
    }

    fn to_value(&self) -> Value {
        Value::Number(self.timestamp_millis().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VENOMS_MILLIS: i64 = 434_592_000_000;

    #[test]
    fn test_serializes_to_epoch_millis() {
        let date = Date::from_millis(VENOMS_MILLIS + 123).unwrap();
        assert_eq!(date.to_value(), Value::Number((VENOMS_MILLIS + 123).into()));
    }

    #[test]
    fn test_integer_roundtrip_keeps_millis() {
        let original = Date::from_millis(1_700_000_000_987).unwrap();
        let reparsed = <Date as ScalarType>::parse(original.to_value()).unwrap();
        assert_eq!(reparsed, original);
    }

    #[test]
    fn test_parses_string_forms() {
        let expected = Date::from_millis(VENOMS_MILLIS).unwrap();
        for input in [
            "1983-10-10",
            "10-10-1983",
            "1983-10-10T00:00:00Z",
            "1983-10-10T02:00:00+02:00",
            "434592000000",
        ] {
            let parsed = <Date as ScalarType>::parse(Value::String(input.to_string()));
            assert_eq!(parsed.ok(), Some(expected), "input {}", input);
        }
    }

    #[test]
    fn test_rejects_non_dates() {
        for value in [
            Value::String("yesterday".to_string()),
            Value::Boolean(true),
            Value::Null,
            Value::Number(serde_json::Number::from_f64(1.5).unwrap()),
        ] {
            assert!(<Date as ScalarType>::parse(value).is_err());
        }
        assert!(!<Date as ScalarType>::is_valid(&Value::Boolean(false)));
    }
}
