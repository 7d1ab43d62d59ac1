use std::fmt;

use liquid_core::parser::{FilterArguments, ParameterReflection, ParseFilter};
use liquid_core::FilterReflection;
use liquid_core::{Result as LiquidResult, Runtime, Value, ValueView};

/// RelativeUrl filter implementation
#[derive(Debug, Clone)]
pub struct RelativeUrlFilter {
    base_url: String,
}

impl fmt::Display for RelativeUrlFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "relative_url")
    }
}

impl liquid_core::Filter for RelativeUrlFilter {
    fn evaluate(&self, input: &dyn ValueView, _runtime: &dyn Runtime) -> LiquidResult<Value> {
        let path = input.to_kstr().to_string();

        let mut url = if self.base_url.is_empty() {
            path
        } else {
            format!(
                "{}/{}",
                self.base_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            )
        };

        if !url.starts_with('/') {
            url = format!("/{}", url);
        }
        while url.contains("//") {
            url = url.replace("//", "/");
        }

        Ok(Value::scalar(url))
    }
}

/// Parse filter factory for relative_url
#[derive(Debug, Clone)]
pub struct RelativeUrlFilterParser {
    pub base_url: String,
}

impl FilterReflection for RelativeUrlFilterParser {
    fn name(&self) -> &str {
        "relative_url"
    }

    fn description(&self) -> &str {
        "Prepends the site base URL to the given path"
    }

    fn positional_parameters(&self) -> &'static [ParameterReflection] {
        &[]
    }

    fn keyword_parameters(&self) -> &'static [ParameterReflection] {
        &[]
    }
}

impl ParseFilter for RelativeUrlFilterParser {
    fn parse(&self, _args: FilterArguments) -> LiquidResult<Box<dyn liquid_core::Filter>> {
        Ok(Box::new(RelativeUrlFilter {
            base_url: self.base_url.clone(),
        }))
    }

    fn reflection(&self) -> &dyn FilterReflection {
        self
    }
}
