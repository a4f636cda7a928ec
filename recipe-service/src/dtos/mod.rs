pub mod recipes;

pub use recipes::{CreateRecipeRequest, RecipeResponse};

/// Accepts `favorite` either as a JSON boolean or as the strings
/// `"true"`/`"false"`, which form-style clients send.
pub mod lenient_bool {
    use serde::{de::Error, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<BoolOrString>::deserialize(deserializer)? {
            None => Ok(None),
            Some(BoolOrString::Bool(value)) => Ok(Some(value)),
            Some(BoolOrString::String(value)) => match value.trim().to_lowercase().as_str() {
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                other => Err(D::Error::custom(format!(
                    "invalid boolean value: {}",
                    other
                ))),
            },
        }
    }

}

/// Accepts `dateCreated` as an RFC 3339 string or as epoch milliseconds,
/// either a JSON number or a numeric string such as `"1760659200000"`.
pub mod lenient_date {
    use chrono::{DateTime, Utc};
    use serde::{de::Error, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MillisOrString {
        Millis(i64),
        String(String),
    }

    fn from_millis<E: Error>(millis: i64) -> Result<DateTime<Utc>, E> {
        DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| E::custom(format!("timestamp out of range: {}", millis)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<MillisOrString>::deserialize(deserializer)? {
            None => Ok(None),
            Some(MillisOrString::Millis(millis)) => from_millis(millis).map(Some),
            Some(MillisOrString::String(value)) => {
                let value = value.trim();
                if let Ok(date) = DateTime::parse_from_rfc3339(value) {
                    return Ok(Some(date.with_timezone(&Utc)));
                }
                match value.parse::<i64>() {
                    Ok(millis) => from_millis(millis).map(Some),
                    Err(_) => Err(D::Error::custom(format!("invalid date value: {}", value))),
                }
            }
        }
    }

}
