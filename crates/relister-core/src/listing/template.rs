use crate::{Error, Result};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::BTreeMap;

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{\{|\}\}|\{([^{}]*)\}").unwrap();
}

/// Replace `{Name}` placeholders with values from `values`
///
/// `{{` and `}}` produce literal braces. A placeholder naming an unknown
/// field is an error rather than being left in the output.
pub fn render(template: &str, values: &BTreeMap<String, String>) -> Result<String> {
    let mut missing: Option<String> = None;

    let rendered = PLACEHOLDER.replace_all(template, |caps: &Captures| {
        match caps.get(0).map(|m| m.as_str()) {
            Some("{{") => return "{".to_string(),
            Some("}}") => return "}".to_string(),
            _ => {}
        }

        let name = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
        match values.get(name) {
            Some(value) => value.clone(),
            None => {
                missing.get_or_insert_with(|| name.to_string());
                String::new()
            }
        }
    });

    match missing {
        Some(name) => Err(Error::Template(format!("unknown placeholder '{{{}}}'", name))),
        None => Ok(rendered.into_owned()),
    }
}
