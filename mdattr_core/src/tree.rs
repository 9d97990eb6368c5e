use std::collections::BTreeMap;

use crate::AttributeList;
use crate::Attributes;
use crate::OptionValue;

/// Whether a construct was found at block level or inside a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
	Block,
	Span,
}

impl std::fmt::Display for Category {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Block => write!(f, "block"),
			Self::Span => write!(f, "span"),
		}
	}
}

/// What produced an end-of-block marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EobOrigin {
	/// An attribute list definition.
	Ald,
	/// A block inline attribute list.
	Ial,
	/// A block level extension.
	Extension,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ElementKind {
	/// The document root.
	Root,
	/// One or more blank lines.
	Blank,
	Paragraph,
	/// Plain text.
	Text,
	/// A backtick delimited code span.
	CodeSpan,
	/// The body of a `comment` extension.
	Comment,
	/// The body of a `nomarkdown` extension, passed through unparsed.
	Raw,
	/// A zero-content marker left for the attribute application pass.
	Eob(EobOrigin),
}

/// Typed option slots of an [`Element`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementOptions {
	/// Attribute list waiting to be applied to the element.
	pub ial: Option<AttributeList>,
	/// Where a comment or raw element was found.
	pub category: Option<Category>,
	/// Output formats a raw element is meant for. Empty means unrestricted.
	pub formats: Vec<String>,
	/// Document options set by `options` extensions. Only used on the root.
	pub options: BTreeMap<String, OptionValue>,
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
	pub kind: ElementKind,
	/// Text content for text, code, comment and raw elements.
	pub value: Option<String>,
	pub children: Vec<Element>,
	/// The attributes the element is rendered with.
	pub attr: Attributes,
	pub options: ElementOptions,
}

impl Element {
	pub fn new(kind: ElementKind) -> Self {
		Self {
			kind,
			value: None,
			children: vec![],
			attr: Attributes::default(),
			options: ElementOptions::default(),
		}
	}

	pub fn with_value(kind: ElementKind, value: impl Into<String>) -> Self {
		Self {
			value: Some(value.into()),
			..Self::new(kind)
		}
	}

	pub fn root() -> Self {
		Self::new(ElementKind::Root)
	}

	pub fn eob(origin: EobOrigin) -> Self {
		Self::new(ElementKind::Eob(origin))
	}

	pub fn text(text: impl Into<String>) -> Self {
		Self::with_value(ElementKind::Text, text)
	}

	/// Append `text` to the trailing text child, creating one if the last
	/// child isn't text.
	pub fn add_text(&mut self, text: &str) {
		if let Some(last) = self.children.last_mut() {
			if last.kind == ElementKind::Text {
				last.value.get_or_insert_with(String::new).push_str(text);
				return;
			}
		}

		self.children.push(Self::text(text));
	}

	/// The pending attribute list, created empty if absent.
	pub fn ial_mut(&mut self) -> &mut AttributeList {
		self.options.ial.get_or_insert_with(AttributeList::default)
	}

	/// Whether a block level attribute list may attach to this element.
	pub fn accepts_block_ial(&self) -> bool {
		!matches!(self.kind, ElementKind::Blank | ElementKind::Eob(_))
	}
}
