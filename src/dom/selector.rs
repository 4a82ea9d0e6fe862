// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! CSS selector parsing and matching
//!
//! Compound selectors only (`meta[name="csrf-token"]`, `div#app.main`).
//! Combinators are rejected since the flattened DOM keeps no tree.

use crate::error::{Error, Result};

use super::element::Element;

/// A parsed compound CSS selector
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    parts: Vec<SelectorPart>,
}

/// A part of a selector
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorPart {
    /// Universal selector (*)
    Universal,
    /// Tag name
    Tag(String),
    /// ID selector (#id)
    Id(String),
    /// Class selector (.class)
    Class(String),
    /// Attribute selector ([attr], [attr=value], etc.)
    Attribute(AttributeSelector),
}

/// Attribute selector
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSelector {
    pub name: String,
    pub operator: Option<AttributeOperator>,
    pub value: Option<String>,
}

/// Attribute selector operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeOperator {
    /// [attr=value] - exact match
    Equals,
    /// [attr~=value] - word in space-separated list
    Includes,
    /// [attr^=value] - starts with
    Prefix,
    /// [attr$=value] - ends with
    Suffix,
    /// [attr*=value] - contains substring
    Substring,
}

impl Selector {
    /// Parse a CSS selector string
    pub fn parse(selector: &str) -> Result<Self> {
        let selector = selector.trim();
        if selector.is_empty() {
            return Err(Error::selector(selector, "empty selector"));
        }

        SelectorParser::new(selector).parse()
    }

    /// Selector parts in source order
    pub fn parts(&self) -> &[SelectorPart] {
        &self.parts
    }

    /// Check if an element matches this selector
    pub fn matches(&self, element: &Element) -> bool {
        self.parts.iter().all(|part| Self::part_matches(part, element))
    }

    fn part_matches(part: &SelectorPart, element: &Element) -> bool {
        match part {
            SelectorPart::Universal => true,
            SelectorPart::Tag(tag) => element.tag_name().eq_ignore_ascii_case(tag),
            SelectorPart::Id(id) => element.id() == Some(id.as_str()),
            SelectorPart::Class(class) => element.has_class(class),
            SelectorPart::Attribute(attr) => Self::attribute_matches(attr, element),
        }
    }

    fn attribute_matches(attr: &AttributeSelector, element: &Element) -> bool {
        let Some(value) = element.get_attribute(&attr.name) else {
            return false;
        };

        let (Some(op), Some(target)) = (&attr.operator, &attr.value) else {
            return true; // Just checking existence
        };

        match op {
            AttributeOperator::Equals => value == target,
            AttributeOperator::Includes => value.split_whitespace().any(|w| w == target),
            AttributeOperator::Prefix => value.starts_with(target.as_str()),
            AttributeOperator::Suffix => value.ends_with(target.as_str()),
            AttributeOperator::Substring => value.contains(target.as_str()),
        }
    }
}

struct SelectorParser<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> SelectorParser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().peekable(),
        }
    }

    fn error(&self, reason: impl Into<String>) -> Error {
        Error::selector(self.source, reason)
    }

    fn parse(mut self) -> Result<Selector> {
        let mut parts = Vec::new();

        while let Some(&c) = self.chars.peek() {
            let part = match c {
                '*' => {
                    self.chars.next();
                    SelectorPart::Universal
                }
                '#' => {
                    self.chars.next();
                    SelectorPart::Id(self.ident()?)
                }
                '.' => {
                    self.chars.next();
                    SelectorPart::Class(self.ident()?)
                }
                '[' => {
                    self.chars.next();
                    SelectorPart::Attribute(self.attribute()?)
                }
                c if is_ident_char(c) => SelectorPart::Tag(self.ident()?.to_ascii_lowercase()),
                c if c.is_whitespace() || matches!(c, '>' | '+' | '~' | ',') => {
                    return Err(self.error("combinators are not supported"));
                }
                c => return Err(self.error(format!("unexpected character '{}'", c))),
            };
            parts.push(part);
        }

        Ok(Selector { parts })
    }

    fn ident(&mut self) -> Result<String> {
        let mut ident = String::new();
        while let Some(&c) = self.chars.peek() {
            if !is_ident_char(c) {
                break;
            }
            ident.push(c);
            self.chars.next();
        }
        if ident.is_empty() {
            return Err(self.error("expected identifier"));
        }
        Ok(ident)
    }

    fn attribute(&mut self) -> Result<AttributeSelector> {
        self.skip_whitespace();
        let name = self.ident()?;
        self.skip_whitespace();

        let operator = match self.chars.next() {
            Some(']') => {
                return Ok(AttributeSelector {
                    name,
                    operator: None,
                    value: None,
                })
            }
            Some('=') => AttributeOperator::Equals,
            Some(c @ ('~' | '^' | '$' | '*')) => {
                if self.chars.next() != Some('=') {
                    return Err(self.error("expected '=' in attribute selector"));
                }
                match c {
                    '~' => AttributeOperator::Includes,
                    '^' => AttributeOperator::Prefix,
                    '$' => AttributeOperator::Suffix,
                    _ => AttributeOperator::Substring,
                }
            }
            _ => return Err(self.error("malformed attribute selector")),
        };

        self.skip_whitespace();
        let value = match self.chars.peek() {
            Some(&quote @ ('"' | '\'')) => {
                self.chars.next();
                let mut value = String::new();
                loop {
                    match self.chars.next() {
                        Some(c) if c == quote => break,
                        Some(c) => value.push(c),
                        None => return Err(self.error("unterminated string")),
                    }
                }
                value
            }
            _ => self.ident()?,
        };

        self.skip_whitespace();
        if self.chars.next() != Some(']') {
            return Err(self.error("expected ']'"));
        }

        Ok(AttributeSelector {
            name,
            operator: Some(operator),
            value: Some(value),
        })
    }

    fn skip_whitespace(&mut self) {
        while self.chars.peek().map_or(false, |c| c.is_whitespace()) {
            self.chars.next();
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}
