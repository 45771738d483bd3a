// Raw parameter sources

use gauntlet_core::HttpRequest;
use std::collections::HashMap;
use std::fmt;

/// Where a request parameter comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Path,
    Query,
    Header,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Path => "path",
            Source::Query => "query",
            Source::Header => "header",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name to raw string lookup over the parameter sources of a request
pub trait ParameterSource {
    fn raw(&self, source: Source, name: &str) -> Option<&str>;
}

impl ParameterSource for HttpRequest {
    fn raw(&self, source: Source, name: &str) -> Option<&str> {
        match source {
            Source::Path => self.param(name),
            Source::Query => self.query(name),
            Source::Header => self.header(name),
        }
        .map(String::as_str)
    }
}

/// Plain maps act as a query-only source
impl ParameterSource for HashMap<String, String> {
    fn raw(&self, source: Source, name: &str) -> Option<&str> {
        match source {
            Source::Query => self.get(name).map(String::as_str),
            Source::Path | Source::Header => None,
        }
    }
}

/// One named value as read from a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawParameter {
    pub name: String,
    pub source: Source,
    pub raw: Option<String>,
}

impl RawParameter {
    pub fn new(name: impl Into<String>, source: Source, raw: Option<String>) -> Self {
        Self {
            name: name.into(),
            source,
            raw,
        }
    }

    /// Read `name` from `source`, trimming surrounding whitespace when asked
    pub fn read<S: ParameterSource + ?Sized>(
        params: &S,
        source: Source,
        name: &str,
        trim: bool,
    ) -> Self {
        let raw = params.raw(source, name).map(|value| {
            if trim {
                value.trim().to_string()
            } else {
                value.to_string()
            }
        });
        Self::new(name, source, raw)
    }

    /// The raw value, treating an empty string as absent
    pub fn value(&self) -> Option<&str> {
        self.raw.as_deref().filter(|value| !value.is_empty())
    }

    pub fn is_present(&self) -> bool {
        self.value().is_some()
    }
}
