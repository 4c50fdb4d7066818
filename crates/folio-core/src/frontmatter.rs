//! Raw record extraction from content files.
//!
//! Markdown sources carry their fields in a YAML frontmatter block delimited
//! by `---` lines; data files (YAML, JSON) are the record themselves. Either
//! way the result is an untyped [`serde_json::Value`] tree handed to the
//! schema validators.

use std::path::Path;

use serde_json::{Map, Value};

use crate::{
    content::SourceFormat,
    error::{CoreError, Result},
};

const DELIMITER: &str = "---";

/// An unvalidated content record as authored.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// Structured fields.
    pub data: Value,

    /// Markdown body following the frontmatter, if any.
    pub body: Option<String>,
}

/// Split markdown content into frontmatter and body.
///
/// The opening and closing delimiters must each sit on their own line.
/// Returns `None` when the content has no complete frontmatter block.
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let content = content.trim_start_matches('\u{feff}').trim_start();
    let rest = content.strip_prefix(DELIMITER)?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            let frontmatter = rest[..offset].trim();
            let body = rest[offset + line.len()..].trim_start();
            return Some((frontmatter, body));
        }
        offset += line.len();
    }

    None
}

/// Parse a content file into a raw record.
pub fn parse_source(content: &str, format: SourceFormat, path: &Path) -> Result<RawRecord> {
    match format {
        SourceFormat::Markdown => parse_markdown(content, path),
        SourceFormat::Yaml => Ok(RawRecord {
            data: parse_yaml(content, path)?,
            body: None,
        }),
        SourceFormat::Json => {
            let data: Value = serde_json::from_str(content)
                .map_err(|e| CoreError::frontmatter(path, e.to_string()))?;
            Ok(RawRecord { data, body: None })
        }
    }
}

fn parse_markdown(content: &str, path: &Path) -> Result<RawRecord> {
    let Some((frontmatter, body)) = split_frontmatter(content) else {
        if content.trim_start().starts_with(DELIMITER) {
            return Err(CoreError::frontmatter(
                path,
                "frontmatter is missing its closing `---` line",
            ));
        }
        // No frontmatter: every required field will be reported missing.
        return Ok(RawRecord {
            data: Value::Object(Map::new()),
            body: Some(content.to_string()),
        });
    };

    Ok(RawRecord {
        data: parse_yaml(frontmatter, path)?,
        body: Some(body.to_string()),
    })
}

fn parse_yaml(source: &str, path: &Path) -> Result<Value> {
    let value: Value =
        serde_yaml::from_str(source).map_err(|e| CoreError::frontmatter(path, e.to_string()))?;

    // An empty document is an empty record.
    Ok(match value {
        Value::Null => Value::Object(Map::new()),
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_split_frontmatter() {
        let content = r#"---
title: "Atlas"
year: 2023
---

The long-form case study."#;

        let (fm, body) = split_frontmatter(content).expect("split");
        assert!(fm.starts_with("title:"));
        assert!(fm.ends_with("2023"));
        assert_eq!(body, "The long-form case study.");
    }

    #[test]
    fn test_split_ignores_dashes_inside_values() {
        let content = "---\ntitle: \"A---B\"\n---\nBody";
        let (fm, body) = split_frontmatter(content).expect("split");
        assert_eq!(fm, "title: \"A---B\"");
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_split_crlf() {
        let content = "---\r\ntitle: Atlas\r\n---\r\nBody";
        let (fm, body) = split_frontmatter(content).expect("split");
        assert_eq!(fm, "title: Atlas");
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_no_frontmatter() {
        assert!(split_frontmatter("Just some content.").is_none());
    }

    #[test]
    fn test_parse_markdown_source() {
        let content = r#"---
title: Atlas
constraints:
  - Two engineers
  - Six weeks
featured: true
---

Body text."#;

        let raw = parse_source(content, SourceFormat::Markdown, Path::new("atlas.md"))
            .expect("parse");

        assert_eq!(raw.data["title"], json!("Atlas"));
        assert_eq!(raw.data["constraints"], json!(["Two engineers", "Six weeks"]));
        assert_eq!(raw.data["featured"], json!(true));
        assert_eq!(raw.body.as_deref(), Some("Body text."));
    }

    #[test]
    fn test_unquoted_yaml_date_stays_text() {
        let raw = parse_source(
            "date: 2023-05-01\n",
            SourceFormat::Yaml,
            Path::new("first-job.yaml"),
        )
        .expect("parse");

        assert_eq!(raw.data["date"], json!("2023-05-01"));
        assert!(raw.body.is_none());
    }

    #[test]
    fn test_parse_json_source() {
        let raw = parse_source(
            r#"{"category": "tools", "order": 1, "items": []}"#,
            SourceFormat::Json,
            Path::new("tools.json"),
        )
        .expect("parse");

        assert_eq!(raw.data["order"], json!(1));
    }

    #[test]
    fn test_markdown_without_frontmatter_is_empty_record() {
        let raw = parse_source("Only body.", SourceFormat::Markdown, Path::new("x.md"))
            .expect("parse");
        assert_eq!(raw.data, json!({}));
        assert_eq!(raw.body.as_deref(), Some("Only body."));
    }

    #[test]
    fn test_unterminated_frontmatter() {
        let err = parse_source(
            "---\ntitle: Atlas\n\nBody",
            SourceFormat::Markdown,
            Path::new("atlas.md"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("closing"));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = parse_source(
            "---\ntitle: [unclosed\n---\n",
            SourceFormat::Markdown,
            Path::new("atlas.md"),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Frontmatter { .. }));
    }
}
