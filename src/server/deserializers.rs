use serde::{de, Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Str(String),
}

// ids come as numbers from JSON clients but as strings from <select> values and query
// strings; an empty string means the field was left blank
pub fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawId>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawId::Int(value)) => Ok(Some(value)),
        Some(RawId::Str(value)) if value.trim().is_empty() => Ok(None),
        Some(RawId::Str(value)) => value
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("Wrong value {value}, can not parse to id"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize, Debug)]
    struct Payload {
        #[serde(default, deserialize_with = "deserialize_optional_id")]
        id: Option<i64>,
    }

    fn parse(body: &str) -> Result<Option<i64>, serde_json::Error> {
        serde_json::from_str::<Payload>(body).map(|p| p.id)
    }

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        assert_eq!(parse(r#"{"id": 7}"#).unwrap(), Some(7));
        assert_eq!(parse(r#"{"id": "42"}"#).unwrap(), Some(42));
        assert_eq!(parse(r#"{"id": " 3 "}"#).unwrap(), Some(3));
    }

    #[test]
    fn blank_or_absent_is_missing() {
        assert_eq!(parse(r#"{}"#).unwrap(), None);
        assert_eq!(parse(r#"{"id": null}"#).unwrap(), None);
        assert_eq!(parse(r#"{"id": ""}"#).unwrap(), None);
    }

    #[test]
    fn rejects_non_numeric_strings() {
        let err = parse(r#"{"id": "abc"}"#).unwrap_err();
        assert!(err.to_string().contains("can not parse to id"));
    }
}
