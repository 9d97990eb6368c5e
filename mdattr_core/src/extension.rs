use regex::Captures;

use crate::AttributeList;
use crate::Category;
use crate::Element;
use crate::ElementKind;
use crate::EobOrigin;
use crate::ExtensionParser;
use crate::ParseDiagnostic;
use crate::Scanner;
use crate::lexer::parse_attribute_list;
use crate::patterns;

/// A start or stop tag matched at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tag<'a> {
	/// `{::name attrs}` or the self-closing `{::name attrs/}`.
	Start {
		name: &'a str,
		attributes: &'a str,
		self_closing: bool,
	},
	/// `{:/name}` or `{:/}`.
	Stop { name: Option<&'a str> },
}

impl<'a> Tag<'a> {
	/// Build a tag from the captures of [`patterns::ext_block_start`] or
	/// [`patterns::ext_span_start`].
	pub(crate) fn from_captures(captures: &Captures<'a>) -> Self {
		match captures.get(1) {
			Some(name) => {
				Self::Start {
					name: name.as_str(),
					attributes: captures.get(2).map_or("", |attributes| attributes.as_str()),
					self_closing: captures.get(3).is_some(),
				}
			}
			None => {
				Self::Stop {
					name: captures.get(4).map(|name| name.as_str()),
				}
			}
		}
	}
}

/// A fully read extension, ready to be dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
	pub name: String,
	pub attributes: AttributeList,
	/// The text between the start and stop tag. `None` for self-closing tags.
	pub body: Option<String>,
	pub category: Category,
}

/// The built-in extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExtensionKind {
	/// Drops its body from the output but keeps it in the tree as a comment.
	Comment,
	/// Passes its body through to the output without parsing it.
	NoMarkdown,
	/// Sets document options from its attributes.
	Options,
}

impl ExtensionKind {
	pub fn from_name(name: &str) -> Option<Self> {
		match name {
			"comment" => Some(Self::Comment),
			"nomarkdown" => Some(Self::NoMarkdown),
			"options" => Some(Self::Options),
			_ => None,
		}
	}
}

impl std::fmt::Display for ExtensionKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Comment => write!(f, "comment"),
			Self::NoMarkdown => write!(f, "nomarkdown"),
			Self::Options => write!(f, "options"),
		}
	}
}

/// Remove exactly one trailing line terminator.
fn chomp(text: &str) -> &str {
	text.strip_suffix("\r\n")
		.or_else(|| text.strip_suffix('\n'))
		.or_else(|| text.strip_suffix('\r'))
		.unwrap_or(text)
}

impl ExtensionParser<'_> {
	/// Parse the extension tag at the cursor. `matched` is the length of the
	/// text matched for `tag`.
	///
	/// On failure a diagnostic is recorded and the cursor is reset to where it
	/// was. In span position one character is then consumed as text so the
	/// caller always makes progress.
	pub(crate) fn parse_extension_start_tag(
		&mut self,
		src: &mut Scanner<'_>,
		tree: &mut Element,
		tag: Tag<'_>,
		matched: usize,
		category: Category,
	) -> bool {
		let orig_pos = src.pos();

		match self.read_extension(src, tree, tag, matched, category) {
			Ok(()) => true,
			Err(diagnostic) => {
				self.warn(diagnostic);
				src.set_pos(orig_pos);
				if category == Category::Span {
					if let Some(ch) = src.getch() {
						tree.add_text(ch);
					}
				}
				false
			}
		}
	}

	fn read_extension(
		&mut self,
		src: &mut Scanner<'_>,
		tree: &mut Element,
		tag: Tag<'_>,
		matched: usize,
		category: Category,
	) -> Result<(), ParseDiagnostic> {
		src.set_pos(src.pos() + matched);

		let (name, attribute_text, self_closing) = match tag {
			Tag::Start {
				name,
				attributes,
				self_closing,
			} => (name, attributes, self_closing),
			Tag::Stop { name } => {
				return Err(ParseDiagnostic::InvalidStopTag {
					name: name.map(ToString::to_string),
				});
			}
		};

		let mut attributes = AttributeList::new();
		parse_attribute_list(attribute_text, &mut attributes);

		let body = if self_closing {
			None
		} else {
			tracing::trace!(name, %category, "seeking stop tag");
			let stop_tag = match category {
				Category::Block => patterns::block_stop_tag(name),
				Category::Span => patterns::span_stop_tag(name),
			};
			let Some(body) = stop_tag.as_ref().and_then(|stop_tag| src.scan_until(stop_tag)) else {
				return Err(ParseDiagnostic::MissingStopTag {
					name: name.to_string(),
				});
			};

			match category {
				Category::Block => Some(chomp(body).to_string()),
				Category::Span => Some(body.to_string()),
			}
		};

		let extension = Extension {
			name: name.to_string(),
			attributes,
			body,
			category,
		};

		if self.handle_extension(tree, extension) {
			Ok(())
		} else {
			Err(ParseDiagnostic::UnknownExtension {
				name: name.to_string(),
			})
		}
	}

	/// Run the built-in behavior for `extension`. Returns false if the name
	/// isn't a built-in extension, in which case the tree is left untouched.
	///
	/// Options set by an `options` extension are kept on the parser until
	/// [`persist_document_options`](ExtensionParser::persist_document_options)
	/// copies them onto the document root.
	pub fn handle_extension(&mut self, tree: &mut Element, extension: Extension) -> bool {
		let Some(kind) = ExtensionKind::from_name(&extension.name) else {
			return false;
		};

		tracing::debug!(%kind, category = %extension.category, "handling extension");

		match kind {
			ExtensionKind::Comment => {
				if let Some(body) = extension.body {
					let mut comment = Element::with_value(ElementKind::Comment, body);
					comment.options.category = Some(extension.category);
					tree.children.push(comment);
				}
			}
			ExtensionKind::NoMarkdown => {
				if let Some(body) = extension.body {
					let mut raw = Element::with_value(ElementKind::Raw, body);
					raw.options.category = Some(extension.category);
					raw.options.formats = extension
						.attributes
						.get("type")
						.map(|formats| formats.split_whitespace().map(ToString::to_string).collect())
						.unwrap_or_default();
					tree.children.push(raw);
				}
			}
			ExtensionKind::Options => {
				for (key, value) in extension.attributes.entries() {
					if !self.registry.is_defined(key) {
						self.warn(ParseDiagnostic::UnknownOption {
							name: key.to_string(),
						});
						continue;
					}

					match self.registry.parse(key, value) {
						Ok(parsed) => {
							self.options.set(key, parsed.clone());
							self.document_options.insert(key.to_string(), parsed);
						}
						Err(error) => {
							tracing::debug!(option = key, %error, "dropping option value");
						}
					}
				}

				if extension.category == Category::Block {
					tree.children.push(Element::eob(EobOrigin::Extension));
				}
			}
		}

		true
	}
}
