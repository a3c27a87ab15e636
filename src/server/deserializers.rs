use serde::{Deserialize, Deserializer};

// query strings carry everything as text; a page that is not a number falls back to the default
pub fn deserialize_lenient_page<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.trim().parse::<u32>().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct PageQuery {
        #[serde(default, deserialize_with = "deserialize_lenient_page")]
        page: Option<u32>,
    }

    fn page(json: &str) -> Option<u32> {
        serde_json::from_str::<PageQuery>(json).unwrap().page
    }

    #[test]
    fn parses_numeric_pages() {
        assert_eq!(page(r#"{"page": "3"}"#), Some(3));
        assert_eq!(page(r#"{"page": " 2 "}"#), Some(2));
    }

    #[test]
    fn garbage_and_absent_pages_are_none() {
        assert_eq!(page(r#"{"page": "two"}"#), None);
        assert_eq!(page(r#"{"page": "-1"}"#), None);
        assert_eq!(page("{}"), None);
    }
}
