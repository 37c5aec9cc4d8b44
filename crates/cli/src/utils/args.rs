//! Parsing of `key:value` command-line arguments
//!
//! Rules, variable values, permissions and evaluation targets are all typed
//! as one string joined by a colon. The split happens at the first colon
//! outside single or double quotes, so expressions such as
//! `name == 'a:b'` stay intact.

use simpleflags_compiler::{RuleArg, UsageError};

/// Index of the first `:` outside quotes
fn separator_index(raw: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in raw.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, ':') => return Some(i),
            (None, _) => {}
        }
    }
    None
}

/// Split `key:value`. The key must be non-empty and is trimmed; the value
/// may be empty and is kept exactly as typed.
pub fn parse_pair(raw: &str) -> Result<(String, String), UsageError> {
    let index = separator_index(raw).ok_or_else(|| UsageError::MalformedArgument {
        raw: raw.to_string(),
        reason: "expected <key>:<value>".to_string(),
    })?;
    let key = raw[..index].trim();
    if key.is_empty() {
        return Err(UsageError::MalformedArgument {
            raw: raw.to_string(),
            reason: "key before ':' is empty".to_string(),
        });
    }
    Ok((key.to_string(), raw[index + 1..].to_string()))
}

pub fn parse_rule(raw: &str) -> Result<RuleArg, UsageError> {
    let (expression, value) = parse_pair(raw)?;
    Ok(RuleArg::new(expression, value))
}

/// Boolean spellings accepted on the command line
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

/// `key:bool`; a bare key grants the permission.
pub fn parse_permission(raw: &str) -> Result<(String, bool), UsageError> {
    if separator_index(raw).is_none() {
        let key = raw.trim();
        if key.is_empty() {
            return Err(UsageError::MalformedArgument {
                raw: raw.to_string(),
                reason: "permission key is empty".to_string(),
            });
        }
        return Ok((key.to_string(), true));
    }
    let (key, value) = parse_pair(raw)?;
    let granted = parse_bool(&value).ok_or_else(|| UsageError::MalformedArgument {
        raw: raw.to_string(),
        reason: format!("'{value}' is not a boolean"),
    })?;
    Ok((key, granted))
}

/// Parse every argument, failing on the first malformed one.
pub fn parse_all<T>(
    raws: &[String],
    parse: impl Fn(&str) -> Result<T, UsageError>,
) -> Result<Vec<T>, UsageError> {
    raws.iter().map(|raw| parse(raw)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair_splits_at_first_colon() {
        assert_eq!(
            parse_pair("prod:http://example.com").unwrap(),
            ("prod".to_string(), "http://example.com".to_string())
        );
        assert_eq!(
            parse_pair("dev:").unwrap(),
            ("dev".to_string(), String::new())
        );
    }

    #[test]
    fn test_parse_pair_keeps_value_whitespace() {
        assert_eq!(
            parse_pair(" dev :  padded ").unwrap(),
            ("dev".to_string(), "  padded ".to_string())
        );
        let rule = parse_rule("beta: 'x' ").unwrap();
        assert_eq!(rule.expression, "beta");
        assert_eq!(rule.value, " 'x' ");
        assert_eq!(
            parse_permission("flag: false").unwrap(),
            ("flag".to_string(), false)
        );
    }

    #[test]
    fn test_parse_pair_ignores_quoted_colons() {
        let rule = parse_rule("user.id == 'a:b':true").unwrap();
        assert_eq!(rule.expression, "user.id == 'a:b'");
        assert_eq!(rule.value, "true");

        let rule = parse_rule(r#"name == "x:y":"v:w""#).unwrap();
        assert_eq!(rule.expression, r#"name == "x:y""#);
        assert_eq!(rule.value, r#""v:w""#);
    }

    #[test]
    fn test_parse_pair_rejects_malformed() {
        assert!(matches!(
            parse_pair("novalue"),
            Err(UsageError::MalformedArgument { .. })
        ));
        assert!(matches!(
            parse_pair(":true"),
            Err(UsageError::MalformedArgument { .. })
        ));
    }

    #[test]
    fn test_parse_bool_spellings() {
        for raw in ["1", "t", "T", "true", "TRUE", "True"] {
            assert_eq!(parse_bool(raw), Some(true), "{raw}");
        }
        for raw in ["0", "f", "F", "false", "FALSE", "False"] {
            assert_eq!(parse_bool(raw), Some(false), "{raw}");
        }
        assert_eq!(parse_bool("yes"), None);
    }

    #[test]
    fn test_parse_permission() {
        assert_eq!(
            parse_permission("delete_flag:false").unwrap(),
            ("delete_flag".to_string(), false)
        );
        assert_eq!(parse_permission("flag").unwrap(), ("flag".to_string(), true));
        assert!(parse_permission("flag:maybe").is_err());
    }

    #[test]
    fn test_parse_all_stops_on_error() {
        let raws = vec!["a:1".to_string(), "broken".to_string()];
        assert!(parse_all(&raws, parse_pair).is_err());
        let raws = vec!["a:1".to_string(), "b:2".to_string()];
        assert_eq!(parse_all(&raws, parse_pair).unwrap().len(), 2);
    }
}
