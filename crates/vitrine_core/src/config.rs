//! Data-attribute configuration
//!
//! Widgets read their tuning values from `data-*` attributes on the elements
//! they wrap. The rules are asymmetric on purpose: a *missing* attribute
//! silently falls back to the widget's default, while a present-but-malformed
//! value is a hard [`ConfigError`] so typos surface at init instead of
//! feeding NaN into an animation.

use std::str::FromStr;

use crate::dom::{DomTree, ElementId};
use crate::error::{ConfigError, Result};

/// Reader over one element's `data-*` attributes
pub struct DataAttrs<'a> {
    dom: &'a dyn DomTree,
    element: ElementId,
}

impl<'a> DataAttrs<'a> {
    pub fn new(dom: &'a dyn DomTree, element: ElementId) -> Self {
        Self { dom, element }
    }

    /// Raw attribute value; `name` is given without the `data-` prefix
    pub fn raw(&self, name: &str) -> Option<String> {
        self.dom.attr(self.element, &format!("data-{name}"))
    }

    /// Parse an optional attribute
    ///
    /// `expected` describes the accepted values for the error message.
    pub fn parse_opt<T: FromStr>(&self, name: &str, expected: &'static str) -> Result<Option<T>> {
        match self.raw(name) {
            None => Ok(None),
            Some(raw) => match raw.trim().parse::<T>() {
                Ok(value) => Ok(Some(value)),
                Err(_) => Err(ConfigError::InvalidAttribute {
                    attr: format!("data-{name}"),
                    value: raw,
                    expected,
                }),
            },
        }
    }

    /// Parse an attribute, falling back to `default` when missing
    pub fn parse_or<T: FromStr>(
        &self,
        name: &str,
        default: T,
        expected: &'static str,
    ) -> Result<T> {
        Ok(self.parse_opt(name, expected)?.unwrap_or(default))
    }

    /// Parse an optional numeric attribute, rejecting NaN and infinities
    ///
    /// `"NaN"` parses successfully as `f32`, so the finiteness check has to
    /// be explicit.
    pub fn number_opt(&self, name: &str) -> Result<Option<f32>> {
        match self.parse_opt::<f32>(name, "a number")? {
            None => Ok(None),
            Some(value) if value.is_finite() => Ok(Some(value)),
            Some(_) => Err(ConfigError::NonFinite {
                attr: format!("data-{name}"),
            }),
        }
    }

    /// Parse a numeric attribute, falling back to `default` when missing
    pub fn number_or(&self, name: &str, default: f32) -> Result<f32> {
        Ok(self.number_opt(name)?.unwrap_or(default))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{MemoryDom, ViewNode};

    fn dom_with(attrs: &[(&str, &str)]) -> (MemoryDom, ElementId) {
        let mut node = ViewNode::new("button").id("target");
        for (name, value) in attrs {
            node = node.attr(*name, *value);
        }
        let dom = MemoryDom::build(&[node]);
        let element = dom.element_by_id("target").unwrap();
        (dom, element)
    }

    #[test]
    fn missing_attribute_falls_back() {
        let (dom, el) = dom_with(&[]);
        let attrs = DataAttrs::new(&dom, el);
        assert_eq!(attrs.number_or("speed", 1.0).unwrap(), 1.0);
        assert_eq!(attrs.parse_opt::<f32>("count", "a number").unwrap(), None);
    }

    #[test]
    fn valid_attribute_parses() {
        let (dom, el) = dom_with(&[("data-speed", "1.8"), ("data-count", " 250 ")]);
        let attrs = DataAttrs::new(&dom, el);
        assert_eq!(attrs.number_or("speed", 1.0).unwrap(), 1.8);
        assert_eq!(attrs.number_opt("count").unwrap(), Some(250.0));
    }

    #[test]
    fn malformed_attribute_is_an_error() {
        let (dom, el) = dom_with(&[("data-speed", "fast")]);
        let attrs = DataAttrs::new(&dom, el);
        let err = attrs.number_or("speed", 1.0).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidAttribute {
                attr: "data-speed".into(),
                value: "fast".into(),
                expected: "a number",
            }
        );
    }

    #[test]
    fn nan_is_rejected_not_propagated() {
        let (dom, el) = dom_with(&[("data-value", "NaN")]);
        let attrs = DataAttrs::new(&dom, el);
        assert_eq!(
            attrs.number_opt("value").unwrap_err(),
            ConfigError::NonFinite {
                attr: "data-value".into()
            }
        );
    }
}
