use crate::front_matter::types::FrontMatter;
use crate::utils::error::{BoxResult, QuillError};

/// Check if content opens with a front matter block
pub fn has_front_matter(content: &str) -> bool {
    content.starts_with("---\n") || content.starts_with("---\r\n")
}

/// Split content into its raw YAML block and the body that follows.
///
/// Returns `None` when the content carries no front matter. A block that
/// opens but never closes is malformed and reported as an error.
pub fn split_front_matter(content: &str) -> BoxResult<Option<(&str, &str)>> {
    if !has_front_matter(content) {
        return Ok(None);
    }

    match content[3..].find("\n---") {
        Some(end) => {
            let yaml = &content[3..end + 3];
            let rest = &content[end + 3 + 4..];
            Ok(Some((yaml, rest.trim_start_matches(['\r', '\n']))))
        }
        None => Err(QuillError::FrontMatter(
            "missing closing '---' delimiter".to_string(),
        )
        .into()),
    }
}

/// Parse content into typed front matter and the remaining body.
///
/// Content without a front matter block yields defaults and the body
/// untouched.
pub fn parse(content: &str) -> BoxResult<(FrontMatter, String)> {
    match split_front_matter(content)? {
        Some((yaml, body)) if yaml.trim().is_empty() => {
            Ok((FrontMatter::default(), body.to_string()))
        }
        Some((yaml, body)) => {
            let front_matter: FrontMatter = serde_yaml::from_str(yaml)
                .map_err(|e| QuillError::FrontMatter(e.to_string()))?;
            Ok((front_matter, body.to_string()))
        }
        None => Ok((FrontMatter::default(), content.to_string())),
    }
}

/// Parse the raw front matter block into a YAML mapping for schema
/// validation. Content without front matter yields an empty mapping.
pub fn parse_raw(content: &str) -> BoxResult<serde_yaml::Mapping> {
    match split_front_matter(content)? {
        Some((yaml, _)) if yaml.trim().is_empty() => Ok(serde_yaml::Mapping::new()),
        Some((yaml, _)) => {
            let value: serde_yaml::Value = serde_yaml::from_str(yaml)
                .map_err(|e| QuillError::FrontMatter(e.to_string()))?;
            match value {
                serde_yaml::Value::Mapping(mapping) => Ok(mapping),
                serde_yaml::Value::Null => Ok(serde_yaml::Mapping::new()),
                _ => Err(QuillError::FrontMatter(
                    "front matter must be a YAML mapping".to_string(),
                )
                .into()),
            }
        }
        None => Ok(serde_yaml::Mapping::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_front_matter() {
        let content = "---\ntitle: Test Page\nlayout: default\n---\n\nPage content here";
        let (front_matter, body) = parse(content).unwrap();

        assert_eq!(front_matter.title, Some("Test Page".to_string()));
        assert_eq!(front_matter.layout, Some("default".to_string()));
        assert_eq!(front_matter.permalink, None);
        assert_eq!(body, "Page content here");
    }

    #[test]
    fn test_content_without_front_matter() {
        let content = "Just some markdown.\n";
        let (front_matter, body) = parse(content).unwrap();

        assert_eq!(front_matter.title, None);
        assert_eq!(body, content);
    }

    #[test]
    fn test_unclosed_front_matter_is_an_error() {
        let content = "---\ntitle: Broken\n\nNo closing delimiter";
        assert!(parse(content).is_err());
    }

    #[test]
    fn test_parse_raw_mapping() {
        let content = "---\ntitle: Hello\ntags: [a, b]\n---\nBody";
        let mapping = parse_raw(content).unwrap();

        assert_eq!(
            mapping
                .get(&serde_yaml::Value::String("title".into()))
                .and_then(|v| v.as_str()),
            Some("Hello")
        );
    }

    #[test]
    fn test_empty_front_matter_block() {
        let content = "---\n---\nBody";
        let (front_matter, body) = parse(content).unwrap();

        assert_eq!(front_matter.title, None);
        assert_eq!(body, "Body");
        assert!(parse_raw(content).unwrap().is_empty());
    }
}
