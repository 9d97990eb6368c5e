//! `mdattr_core` implements the attribute list and extension syntax of
//! kramdown-style markdown as a library a host markdown parser can drive.
//!
//! ## Syntax
//!
//! ```text
//! {:ref: #id .class key="value"}     attribute list definition (ALD)
//! {:.class #id ref}                  block inline attribute list (IAL)
//! *emphasis*{:.class}                span inline attribute list
//! {::comment}hidden{:/comment}       extension with a body
//! {::options auto_ids="false" /}     self-closing extension
//! ```
//!
//! ## Processing Pipeline
//!
//! ```text
//! Host parser at `{:`
//!   → Block or span driver (classifies ALD, IAL or extension tag)
//!   → Lexer (tokenizes the attribute list with logos)
//!   → Extension tag engine (reads attributes, finds the stop tag, extracts the body)
//!   → Extension dispatcher (comment, nomarkdown, options)
//! ```
//!
//! ## Key Types
//!
//! - [`ExtensionParser`] - The per-document parse state and the two driver
//!   entry points.
//! - [`AttributeList`] - An attribute mapping with accumulating `class` and
//!   references.
//! - [`Element`] - A node of the document tree the drivers append to.
//! - [`OptionRegistry`] - The option definitions consulted by `options`
//!   extensions. [`StandardOptions`] is the built-in set.
//! - [`ParseDiagnostic`] - A recoverable problem found while parsing.
//! - [`MdattrConfig`] - Configuration loaded from `mdattr.toml`.
//! - [`Document`] - The result of the bundled [`parse`] loop.
//!
//! ## Configuration
//!
//! An `mdattr.toml` at the project root sets the options every parse starts
//! with:
//!
//! ```toml
//! [options]
//! auto_ids = false
//! toc_levels = "1..3"
//! ```

pub use attributes::*;
pub use config::*;
pub use diagnostic::*;
pub use document::*;
pub use error::*;
pub use extension::Extension;
pub use extension::ExtensionKind;
pub use lexer::parse_attribute_list;
pub use options::*;
pub use parser::*;
pub use scanner::*;
pub use tree::*;

mod attributes;
pub mod config;
mod diagnostic;
pub mod document;
#[allow(unused_assignments)]
mod error;
mod extension;
pub(crate) mod lexer;
mod options;
mod parser;
pub(crate) mod patterns;
mod scanner;
mod tree;

#[cfg(test)]
mod __fixtures;
