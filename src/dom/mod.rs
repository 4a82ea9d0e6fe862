// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Minimal DOM for reading the device web UI pages
//!
//! Pages are parsed with html5ever and flattened into a list of elements
//! in document order, which is all the CSRF and page lookups need.

mod document;
mod element;
mod parser;
mod selector;

pub use document::Document;
pub use element::Element;
pub use parser::parse_html;
pub use selector::Selector;
