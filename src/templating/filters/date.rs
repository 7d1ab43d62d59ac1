use std::fmt;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use liquid_core::parser::{FilterArguments, ParameterReflection, ParseFilter};
use liquid_core::FilterReflection;
use liquid_core::{Result as LiquidResult, Runtime, Value, ValueView};

/// Date filter implementation
#[derive(Debug, Clone)]
pub struct DateFilter {
    format: String,
}

impl fmt::Display for DateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "date")
    }
}

impl liquid_core::Filter for DateFilter {
    fn evaluate(&self, input: &dyn ValueView, _runtime: &dyn Runtime) -> LiquidResult<Value> {
        let date_str = input.to_kstr().to_string();

        let date = if date_str == "now" || date_str == "today" {
            Some(Utc::now())
        } else {
            parse_date_string(&date_str)
        };

        match date {
            Some(dt) => Ok(Value::scalar(dt.format(&self.format).to_string())),
            // Unparseable input passes through unchanged
            None => Ok(Value::scalar(date_str)),
        }
    }
}

fn parse_date_string(date_str: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&dt));
    }

    if let Ok(dt) =
        NaiveDateTime::parse_from_str(&format!("{} 00:00:00", date_str), "%Y-%m-%d %H:%M:%S")
    {
        return Some(Utc.from_utc_datetime(&dt));
    }

    None
}

/// Parse filter factory for date
#[derive(Debug, Clone)]
pub struct DateFilterParser;

impl FilterReflection for DateFilterParser {
    fn name(&self) -> &str {
        "date"
    }

    fn description(&self) -> &str {
        "Formats a date according to the specified format string"
    }

    fn positional_parameters(&self) -> &'static [ParameterReflection] {
        &[]
    }

    fn keyword_parameters(&self) -> &'static [ParameterReflection] {
        &[]
    }
}

impl ParseFilter for DateFilterParser {
    fn parse(&self, _args: FilterArguments) -> LiquidResult<Box<dyn liquid_core::Filter>> {
        Ok(Box::new(DateFilter {
            format: "%B %d, %Y".to_string(),
        }))
    }

    fn reflection(&self) -> &dyn FilterReflection {
        self
    }
}
