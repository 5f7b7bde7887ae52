use serde::{Deserialize, Deserializer};

// non-numeric page numbers fall back to the default page instead of rejecting the request
pub fn deserialize_lenient_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.trim().parse::<i64>().ok()))
}
