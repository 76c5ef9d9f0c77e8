//! Message templates for user-visible audit strings
//!
//! Templates are plain values handed to the audit at construction time. Two
//! shapes are understood:
//!
//! - simple substitution: `"{nodeCount} elements"`
//! - ICU-style plurals: `"{nodeCount, plural, =1 {1 element found} other {# elements found}}"`

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

fn plural_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)^\{\s*(\w+)\s*,\s*plural\s*,(.*)\}$").expect("plural regex compiles")
    })
}

fn plural_option_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(=\d+|zero|one|two|few|many|other)\s*\{([^{}]*)\}")
            .expect("plural option regex compiles")
    })
}

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{(\w+)\}").expect("placeholder regex compiles"))
}

/// A message template with one named numeric parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageTemplate {
    pub template: String,
    #[serde(default)]
    pub param_name: String,
}

impl MessageTemplate {
    pub fn new(template: impl Into<String>, param_name: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            param_name: param_name.into(),
        }
    }

    /// A template with no parameter
    pub fn literal(text: impl Into<String>) -> Self {
        Self::new(text, "")
    }

    /// Check that the template only references `param_name`
    pub fn validate(&self) -> Result<(), String> {
        if let Some(caps) = plural_re().captures(&self.template) {
            if caps[1] != self.param_name {
                return Err(format!(
                    "plural template references '{}' but parameter is '{}'",
                    &caps[1], self.param_name
                ));
            }
            let has_other = plural_option_re()
                .captures_iter(&caps[2])
                .any(|opt| &opt[1] == "other");
            if !has_other {
                return Err(format!(
                    "plural template for '{}' has no 'other' form",
                    self.param_name
                ));
            }
            return Ok(());
        }

        for caps in placeholder_re().captures_iter(&self.template) {
            if caps[1] != self.param_name {
                return Err(format!(
                    "template references unknown parameter '{}' (expected '{}')",
                    &caps[1], self.param_name
                ));
            }
        }
        Ok(())
    }

    /// Render the template with `value` bound to the parameter
    pub fn format(&self, value: usize) -> String {
        if let Some(caps) = plural_re().captures(&self.template) {
            if caps[1] == self.param_name {
                if let Some(form) = select_plural_form(&caps[2], value) {
                    return form.replace('#', &value.to_string());
                }
            }
        }

        placeholder_re()
            .replace_all(&self.template, |caps: &regex::Captures| {
                if caps[1] == self.param_name {
                    value.to_string()
                } else {
                    caps[0].to_string()
                }
            })
            .into_owned()
    }

    /// Render a template that takes no parameter
    pub fn text(&self) -> &str {
        &self.template
    }
}

/// Pick the plural form for `value`: exact `=N` first, then `one`, then `other`
fn select_plural_form(options: &str, value: usize) -> Option<String> {
    let exact = format!("={}", value);
    let mut one = None;
    let mut other = None;

    for opt in plural_option_re().captures_iter(options) {
        let selector = &opt[1];
        if selector == exact {
            return Some(opt[2].trim().to_string());
        }
        match selector {
            "one" => one = Some(opt[2].trim().to_string()),
            "other" => other = Some(opt[2].trim().to_string()),
            _ => {}
        }
    }

    if value == 1 {
        one.or(other)
    } else {
        other
    }
}

/// User-visible strings of the layout-shift-elements audit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiStrings {
    pub title: MessageTemplate,
    pub description: MessageTemplate,
    pub column_element: MessageTemplate,
    pub column_contribution: MessageTemplate,
    pub display_value_elements_found: MessageTemplate,
}

impl Default for UiStrings {
    fn default() -> Self {
        Self {
            title: MessageTemplate::literal("Avoid large layout shifts"),
            description: MessageTemplate::literal(
                "These DOM elements contribute most to the CLS of the page. \
                 [Learn how to improve CLS](https://web.dev/optimize-cls/)",
            ),
            column_element: MessageTemplate::literal("Element"),
            column_contribution: MessageTemplate::literal("CLS Contribution"),
            display_value_elements_found: MessageTemplate::new(
                "{nodeCount, plural, =1 {1 element found} other {# elements found}}",
                "nodeCount",
            ),
        }
    }
}

impl UiStrings {
    pub fn validate(&self) -> Result<(), String> {
        for (name, template) in [
            ("title", &self.title),
            ("description", &self.description),
            ("column_element", &self.column_element),
            ("column_contribution", &self.column_contribution),
            ("display_value_elements_found", &self.display_value_elements_found),
        ] {
            template.validate().map_err(|e| format!("{}: {}", name, e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_elements_found() {
        let strings = UiStrings::default();
        let t = &strings.display_value_elements_found;
        assert_eq!(t.format(1), "1 element found");
        assert_eq!(t.format(2), "2 elements found");
        assert_eq!(t.format(0), "0 elements found");
        assert!(strings.validate().is_ok());
    }

    #[test]
    fn test_one_selector_used_without_exact_match() {
        let t = MessageTemplate::new("{n, plural, one {# Element} other {# Elemente}}", "n");
        assert_eq!(t.format(1), "1 Element");
        assert_eq!(t.format(7), "7 Elemente");
    }

    #[test]
    fn test_simple_substitution() {
        let t = MessageTemplate::new("{nodeCount} elements", "nodeCount");
        assert_eq!(t.format(12), "12 elements");
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_literal_with_markdown_link() {
        let t = UiStrings::default().description;
        assert!(t.validate().is_ok());
        assert!(t.text().contains("[Learn how to improve CLS]"));
    }

    #[test]
    fn test_validate_rejects_foreign_parameter() {
        let t = MessageTemplate::new("{count} elements", "nodeCount");
        assert!(t.validate().is_err());

        let t = MessageTemplate::new("{count, plural, other {# elements}}", "nodeCount");
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_validate_requires_other_form() {
        let t = MessageTemplate::new("{nodeCount, plural, =1 {one element}}", "nodeCount");
        assert!(t.validate().is_err());
    }
}
