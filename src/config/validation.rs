use log::warn;

use crate::config::types::Config;
use crate::utils::error::{BoxResult, QuillError};

/// Validate a loaded configuration before the build starts
pub fn validate_config(config: &Config) -> BoxResult<()> {
    if config.permalink.trim().is_empty() {
        return Err(QuillError::Config("permalink pattern must not be empty".to_string()).into());
    }

    let levels = config.markdown.toc_levels;
    if !(1..=6).contains(&levels.section) || !(1..=6).contains(&levels.subsection) {
        return Err(QuillError::Config(format!(
            "toc_levels must use heading depths 1-6, got section {} / subsection {}",
            levels.section, levels.subsection
        ))
        .into());
    }
    if levels.section == levels.subsection {
        return Err(QuillError::Config(
            "toc_levels section and subsection must differ".to_string(),
        )
        .into());
    }
    if levels.subsection < levels.section {
        warn!(
            "toc_levels subsection ({}) is shallower than section ({})",
            levels.subsection, levels.section
        );
    }

    for label in config.collections.keys() {
        if label.is_empty() || label.contains('/') || label.contains('\\') {
            return Err(QuillError::Config(format!(
                "invalid collection label: '{}'",
                label
            ))
            .into());
        }
    }

    Ok(())
}
