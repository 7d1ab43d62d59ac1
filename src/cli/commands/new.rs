use std::path::Path;

use chrono::Utc;
use log::{error, info};

use crate::utils::error::{BoxResult, QuillError};
use crate::utils::fs;

const CONFIG_TEMPLATE: &str = r#"title: My New Blog
description: Words, occasionally
base_url: ""
permalink: pretty

collections:
  posts:
    schema:
      fields:
        title: { type: string, required: true }
        date: { type: date }
        tags: { type: string_list }
        description: { type: string }
"#;

const DEFAULT_LAYOUT: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ page.title }} | {{ site.title }}</title>
</head>
<body>
  <header><a href="{{ '/' | relative_url }}">{{ site.title }}</a></header>
  <main>{{ content }}</main>
</body>
</html>
"#;

const POST_LAYOUT: &str = r#"---
layout: default
---
<article>
  <h1>{{ page.title }}</h1>
  <time datetime="{{ page.date }}">{{ page.date | date }}</time>
  {{ toc }}
  {{ content }}
</article>
"#;

const INDEX_TEMPLATE: &str = r#"---
title: Home
---

# {{ site.title }}

{% for post in site.posts %}
- [{{ post.title }}]({{ post.url }})
{% endfor %}
"#;

const WELCOME_POST: &str = r#"---
title: Welcome
tags: [meta]
description: The first post on this blog.
---

## Hello

This is your first post. Edit or delete it, then start writing.

### Headings become navigation

Second-level headings and their third-level children show up in the
table of contents automatically.
"#;

/// Handle the new command: scaffold a minimal site
pub fn handle_new_command(path: &Path, force: bool) {
    match scaffold_site(path, force) {
        Ok(()) => info!("New site scaffolded at {}", path.display()),
        Err(e) => error!("Failed to scaffold site: {}", e),
    }
}

fn scaffold_site(path: &Path, force: bool) -> BoxResult<()> {
    if path.exists() && path.read_dir()?.next().is_some() && !force {
        return Err(QuillError::File(format!(
            "{} is not empty (use --force to scaffold anyway)",
            path.display()
        ))
        .into());
    }

    fs::write_file(path.join("_config.yml"), CONFIG_TEMPLATE)?;
    fs::write_file(path.join("_layouts/default.html"), DEFAULT_LAYOUT)?;
    fs::write_file(path.join("_layouts/post.html"), POST_LAYOUT)?;
    fs::write_file(path.join("index.md"), INDEX_TEMPLATE)?;

    let today = Utc::now().format("%Y-%m-%d");
    let post = format!("---\nlayout: post\n{}", WELCOME_POST.trim_start_matches("---\n"));
    fs::write_file(
        path.join(format!("_posts/{}-welcome.md", today)),
        &post,
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as stdfs;
    use std::path::PathBuf;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("quillpress-new-{}", name));
        let _ = stdfs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_scaffold_creates_expected_files() {
        let dir = temp_dir("scaffold");
        scaffold_site(&dir, false).unwrap();

        assert!(dir.join("_config.yml").exists());
        assert!(dir.join("_layouts/default.html").exists());
        assert!(dir.join("_layouts/post.html").exists());
        assert!(dir.join("index.md").exists());

        let posts: Vec<_> = stdfs::read_dir(dir.join("_posts")).unwrap().collect();
        assert_eq!(posts.len(), 1);
    }

    #[test]
    fn test_scaffold_refuses_non_empty_directory() {
        let dir = temp_dir("occupied");
        stdfs::create_dir_all(&dir).unwrap();
        stdfs::write(dir.join("existing.txt"), "hello").unwrap();

        assert!(scaffold_site(&dir, false).is_err());
        assert!(scaffold_site(&dir, true).is_ok());
    }

    #[test]
    fn test_scaffolded_site_builds() {
        use crate::builder;
        use crate::collections::LoadOptions;
        use crate::config;

        let dir = temp_dir("builds");
        scaffold_site(&dir, false).unwrap();

        let config = config::load_config(&dir, None).unwrap();
        let stats = builder::build_site(&config, LoadOptions::default()).unwrap();

        assert_eq!(stats.documents, 1);
        let post_dirs: Vec<_> = stdfs::read_dir(builder::destination_dir(&config).join("posts"))
            .unwrap()
            .collect();
        assert_eq!(post_dirs.len(), 1);
    }
}
