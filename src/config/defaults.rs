use std::path::PathBuf;

pub fn default_source() -> PathBuf {
    PathBuf::from(".")
}

pub fn default_destination() -> PathBuf {
    PathBuf::from("./_site")
}

pub fn default_layouts_dir() -> PathBuf {
    PathBuf::from("_layouts")
}

pub fn default_includes_dir() -> PathBuf {
    PathBuf::from("_includes")
}

pub fn default_base_url() -> String {
    String::new()
}

pub fn default_site_title() -> String {
    "A Quillpress Blog".to_string()
}

pub fn default_site_description() -> String {
    String::new()
}

pub fn default_permalink() -> String {
    "pretty".to_string()
}

pub fn default_posts_dir() -> String {
    "_posts".to_string()
}

pub fn default_drafts_dir() -> String {
    "_drafts".to_string()
}

pub fn default_exclude() -> Vec<String> {
    vec![
        "Cargo.toml".to_string(),
        "Cargo.lock".to_string(),
        "target".to_string(),
        "README.md".to_string(),
        "node_modules".to_string(),
        ".git".to_string(),
        ".gitignore".to_string(),
    ]
}

pub fn default_markdown_extensions() -> Vec<String> {
    vec!["md".to_string(), "markdown".to_string()]
}

pub fn default_highlighter_theme() -> String {
    "InspiredGitHub".to_string()
}

pub fn default_true() -> bool {
    true
}
