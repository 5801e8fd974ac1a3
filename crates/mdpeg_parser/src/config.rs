//! Syntax extension configuration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Optional syntax accepted on top of plain markdown.
///
/// Every extension is off by default. The grammar consults these flags at
/// the exact points where an extension could otherwise be misread as
/// standard syntax.
///
/// # Example
///
/// ```rust
/// use mdpeg_parser::Extensions;
///
/// let from_list: Extensions = "tables,smart".parse().unwrap();
/// let from_json = Extensions::from_json(r#"{ "tables": true, "smart": true }"#).unwrap();
/// assert_eq!(from_list, from_json);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Extensions {
    /// Pipe tables.
    pub tables: bool,

    /// Footnotes: `[^id]` references, declarations and `^[inline]` notes.
    pub notes: bool,

    /// Definition lists.
    pub dlists: bool,

    /// Typographic quotes, dashes and ellipses.
    pub smart: bool,

    /// Drop raw HTML blocks and inline HTML.
    #[serde(rename = "filterHTML")]
    pub filter_html: bool,

    /// Drop `<style>` blocks.
    #[serde(rename = "filterStyles")]
    pub filter_styles: bool,
}

impl Extensions {
    /// Option names accepted by [`FromStr`], in declaration order.
    pub const NAMES: [&'static str; 6] = [
        "tables",
        "notes",
        "dlists",
        "smart",
        "filterHTML",
        "filterStyles",
    ];

    /// Creates a configuration with every extension disabled.
    pub const fn new() -> Self {
        Self {
            tables: false,
            notes: false,
            dlists: false,
            smart: false,
            filter_html: false,
            filter_styles: false,
        }
    }

    /// Enables every syntax extension. HTML and style filtering stay off.
    pub const fn all() -> Self {
        Self {
            tables: true,
            notes: true,
            dlists: true,
            smart: true,
            filter_html: false,
            filter_styles: false,
        }
    }

    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Turns on the option called `name`.
    pub fn enable(&mut self, name: &str) -> Result<(), ConfigError> {
        let flag = match name {
            "tables" => &mut self.tables,
            "notes" => &mut self.notes,
            "dlists" => &mut self.dlists,
            "smart" => &mut self.smart,
            "filterHTML" => &mut self.filter_html,
            "filterStyles" => &mut self.filter_styles,
            unknown => return Err(ConfigError::UnknownOption(unknown.to_string())),
        };
        *flag = true;
        Ok(())
    }
}

impl FromStr for Extensions {
    type Err = ConfigError;

    /// Parses a comma separated list of option names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut extensions = Self::new();
        for name in s.split(',').map(str::trim).filter(|name| !name.is_empty()) {
            extensions.enable(name)?;
        }
        Ok(extensions)
    }
}
