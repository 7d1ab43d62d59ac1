use std::path::{Path, PathBuf};

/// Get file extension as a string
pub fn get_extension<P: AsRef<Path>>(path: P) -> Option<String> {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_string())
}

/// Get file name without extension
pub fn get_stem<P: AsRef<Path>>(path: P) -> Option<String> {
    path.as_ref()
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(|s| s.to_string())
}

/// Check if a path has one of the given extensions (case-insensitive)
pub fn has_any_extension<P: AsRef<Path>>(path: P, exts: &[&str]) -> bool {
    get_extension(path)
        .map(|e| e.to_lowercase())
        .map_or(false, |e| exts.iter().any(|x| *x == e))
}

/// Map a URL path to an output file path under the destination directory.
///
/// URLs ending in `/` map to `index.html` inside the corresponding directory.
pub fn url_to_output_path<P: AsRef<Path>>(destination: P, url: &str) -> PathBuf {
    let trimmed = url.trim_start_matches('/');
    let mut path = destination.as_ref().to_path_buf();

    if trimmed.is_empty() {
        path.push("index.html");
    } else if url.ends_with('/') {
        path.push(trimmed);
        path.push("index.html");
    } else {
        path.push(trimmed);
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_to_output_path() {
        let dest = Path::new("_site");

        assert_eq!(
            url_to_output_path(dest, "/posts/hello/"),
            PathBuf::from("_site/posts/hello/index.html")
        );
        assert_eq!(
            url_to_output_path(dest, "/about.html"),
            PathBuf::from("_site/about.html")
        );
        assert_eq!(url_to_output_path(dest, "/"), PathBuf::from("_site/index.html"));
    }

    #[test]
    fn test_has_any_extension() {
        assert!(has_any_extension("post.md", &["md", "markdown"]));
        assert!(has_any_extension("post.MD", &["md"]));
        assert!(!has_any_extension("style.css", &["md", "markdown"]));
    }
}
