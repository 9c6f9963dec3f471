/// A field the api sends as either a number or a string.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    /// Returns true if this is an empty string.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Number(_) => false,
            Self::Text(text) => text.is_empty(),
        }
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(number) => number.fmt(f),
            Self::Text(text) => text.fmt(f),
        }
    }
}

/// A field the api sends as either a list of strings or one string.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(untagged)]
pub enum TextOrList {
    List(Vec<String>),
    Text(String),
}

impl TextOrList {
    /// Returns true if there is nothing to show.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::List(list) => list.iter().all(|item| item.is_empty()),
            Self::Text(text) => text.is_empty(),
        }
    }
}

impl std::fmt::Display for TextOrList {
    /// Lists are joined with ", ".
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::List(list) => {
                let mut first = true;
                for item in list.iter().filter(|item| !item.is_empty()) {
                    if !first {
                        f.write_str(", ")?;
                    }
                    f.write_str(item)?;
                    first = false;
                }
                Ok(())
            }
            Self::Text(text) => text.fmt(f),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn scalar() {
        let number: Scalar = serde_json::from_str("42").unwrap();
        assert_eq!(number.to_string(), "42");
        assert!(!number.is_empty());

        let text: Scalar = serde_json::from_str("\"4.5/5\"").unwrap();
        assert_eq!(text.to_string(), "4.5/5");

        let empty: Scalar = serde_json::from_str("\"\"").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn text_or_list() {
        let list: TextOrList = serde_json::from_str(r#"["Action", "", "Drama"]"#).unwrap();
        assert_eq!(list.to_string(), "Action, Drama");

        let text: TextOrList = serde_json::from_str("\"Action, Drama\"").unwrap();
        assert_eq!(text.to_string(), "Action, Drama");

        let empty: TextOrList = serde_json::from_str("[]").unwrap();
        assert!(empty.is_empty());
    }
}
