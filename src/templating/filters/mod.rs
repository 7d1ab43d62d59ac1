mod date;
mod markdownify;
mod relative_url;

use liquid::partials::PartialCompiler;
use liquid::ParserBuilder;

use crate::config::Config;

pub use date::DateFilterParser;
pub use markdownify::MarkdownifyFilterParser;
pub use relative_url::RelativeUrlFilterParser;

/// Register custom filters for use in Liquid templates
pub fn register_filters<P: PartialCompiler>(
    parser_builder: ParserBuilder<P>,
    config: &Config,
) -> ParserBuilder<P> {
    parser_builder
        .filter(DateFilterParser)
        .filter(MarkdownifyFilterParser)
        .filter(RelativeUrlFilterParser {
            base_url: config.base_url.clone(),
        })
}
