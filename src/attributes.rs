//! Attribute translation
//!
//!     Turns the raw attribute list of an element node into the [`Props`] handed to the factory.
//!
//!     Rules, per attribute:
//!     - renamed attributes (by default only `class` → `className`) keep their value verbatim
//!     - `style` is parsed into a [`StyleMap`], one entry per well-formed declaration
//!     - everything else passes through unchanged, empty values included (`<input disabled>`
//!       still carries `disabled`)
//!
//!     Malformed style declarations are dropped one by one; they never abort the rest of the
//!     translation. The output never has a `children` property.

use crate::config::AttributeConfig;
use crate::element::{PropValue, Props, StyleMap};
use once_cell::sync::Lazy;

const STYLE: &str = "style";
const CHILDREN: &str = "children";

static DEFAULT_TRANSLATOR: Lazy<AttributeTranslator> = Lazy::new(AttributeTranslator::default);

/// Translate an attribute list with the default rules.
pub fn translate<'a, I>(attributes: I) -> Props
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    DEFAULT_TRANSLATOR.translate(attributes)
}

/// Attribute list → property mapping.
#[derive(Debug, Clone, Default)]
pub struct AttributeTranslator {
    config: AttributeConfig,
}

impl AttributeTranslator {
    pub fn new(config: AttributeConfig) -> Self {
        AttributeTranslator { config }
    }

    pub fn config(&self) -> &AttributeConfig {
        &self.config
    }

    pub fn translate<'a, I>(&self, attributes: I) -> Props
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut props = Props::new();
        for (name, value) in attributes {
            if name == STYLE {
                let style = parse_style(value, self.config.camel_case_style);
                props.insert(STYLE.to_string(), PropValue::Style(style));
            } else if let Some(renamed) = self.config.renames.get(name) {
                props.insert(renamed.clone(), PropValue::Text(value.to_string()));
            } else if name != CHILDREN {
                props.insert(name.to_string(), PropValue::Text(value.to_string()));
            }
        }
        props
    }
}

/// Parse an inline style declaration string.
///
/// `color: red; ; margin:0` gives `{color: red, margin: 0}`. A segment without a `:` or with a
/// blank property name is skipped.
pub fn parse_style(declarations: &str, camel_case: bool) -> StyleMap {
    let mut style = StyleMap::new();
    for segment in declarations.split(';') {
        if segment.trim().is_empty() {
            continue;
        }
        let Some((name, value)) = segment.split_once(':') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        let name = if camel_case {
            camel_case_property(name)
        } else {
            name.to_string()
        };
        style.insert(name, value.trim().to_string());
    }
    style
}

/// `background-color` → `backgroundColor`, `-webkit-transition` → `WebkitTransition`,
/// `-ms-transition` → `msTransition`. Custom properties (`--gap`) are left alone.
fn camel_case_property(name: &str) -> String {
    if name.starts_with("--") {
        return name.to_string();
    }
    let name = match name.strip_prefix("-ms-") {
        Some(rest) => format!("ms-{}", rest),
        None => name.to_string(),
    };

    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '-' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
