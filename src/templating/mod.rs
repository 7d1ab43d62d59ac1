pub mod filters;

use std::collections::HashMap;

use liquid::model::Value;
use liquid::partials::{EagerCompiler, InMemorySource};
use liquid::{Object, Parser, ParserBuilder};

use crate::config::Config;
use crate::utils::error::{BoxResult, QuillError};

/// Create a Liquid parser with the stdlib, the site's includes as partials,
/// and the custom filter set
pub fn create_parser(config: &Config, includes: HashMap<String, String>) -> BoxResult<Parser> {
    let mut source = InMemorySource::new();
    for (name, content) in includes {
        source.add(name, content);
    }
    let partials = EagerCompiler::new(source);

    let parser_builder = ParserBuilder::with_stdlib().partials(partials);
    let parser_builder = filters::register_filters(parser_builder, config);

    let parser = parser_builder
        .build()
        .map_err(|e| QuillError::Template(format!("Failed to build Liquid parser: {}", e)))?;

    Ok(parser)
}

/// Parse and render content with Liquid
pub fn parse_liquid(content: &str, parser: &Parser, globals: &Object) -> BoxResult<String> {
    let template = parser
        .parse(content)
        .map_err(|e| QuillError::Template(format!("Error parsing Liquid template: {}", e)))?;

    let rendered = template.render(globals).map_err(|e| {
        for (key, _value) in globals {
            log::debug!("Template global available: {}", key);
        }
        QuillError::Template(format!("Error rendering Liquid template: {}", e))
    })?;

    Ok(rendered)
}

/// Create the `site` object exposed to every template
pub fn create_site_object(config: &Config) -> Object {
    let mut site = config.to_liquid();

    let now = chrono::Utc::now();
    site.insert("time".into(), Value::scalar(now.to_rfc3339()));

    site
}
