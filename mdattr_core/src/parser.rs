use std::collections::BTreeMap;

use crate::AldRegistry;
use crate::AttributeList;
use crate::Category;
use crate::Element;
use crate::ElementKind;
use crate::EobOrigin;
use crate::OptionRegistry;
use crate::OptionValue;
use crate::Options;
use crate::ParseDiagnostic;
use crate::Scanner;
use crate::extension::Tag;
use crate::lexer::parse_attribute_list;
use crate::patterns;

/// The state of one parse: attribute list definitions, the pending block
/// attribute list, document options and collected diagnostics.
///
/// A host parser creates one `ExtensionParser` per document and calls
/// [`parse_block_extensions`](Self::parse_block_extensions) at block starts
/// beginning with `{:` and [`parse_span_extensions`](Self::parse_span_extensions)
/// at `{:` inside inline content.
pub struct ExtensionParser<'r> {
	pub(crate) registry: &'r dyn OptionRegistry,
	alds: AldRegistry,
	block_ial: Option<AttributeList>,
	pub(crate) options: Options,
	pub(crate) document_options: BTreeMap<String, OptionValue>,
	diagnostics: Vec<ParseDiagnostic>,
}

impl std::fmt::Debug for ExtensionParser<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ExtensionParser")
			.field("alds", &self.alds)
			.field("block_ial", &self.block_ial)
			.field("options", &self.options)
			.field("document_options", &self.document_options)
			.field("diagnostics", &self.diagnostics)
			.finish_non_exhaustive()
	}
}

impl<'r> ExtensionParser<'r> {
	/// Create a parser starting from the registry's default options.
	pub fn new(registry: &'r dyn OptionRegistry) -> Self {
		Self::with_options(registry, registry.defaults())
	}

	/// Create a parser starting from `options`.
	pub fn with_options(registry: &'r dyn OptionRegistry, options: Options) -> Self {
		Self {
			registry,
			alds: AldRegistry::default(),
			block_ial: None,
			options,
			document_options: BTreeMap::new(),
			diagnostics: vec![],
		}
	}

	pub fn alds(&self) -> &AldRegistry {
		&self.alds
	}

	/// The attribute list waiting for the next block element.
	pub fn block_ial(&self) -> Option<&AttributeList> {
		self.block_ial.as_ref()
	}

	/// Take the attribute list waiting for the next block element.
	pub fn take_block_ial(&mut self) -> Option<AttributeList> {
		self.block_ial.take()
	}

	/// The live option set, including values set by `options` extensions.
	pub fn options(&self) -> &Options {
		&self.options
	}

	/// Only the options set by `options` extensions, to be persisted on the
	/// document root.
	pub fn document_options(&self) -> &BTreeMap<String, OptionValue> {
		&self.document_options
	}

	/// Copy the options set by `options` extensions onto `root`.
	///
	/// The drivers only receive the container they append to, so a host
	/// calling them directly must persist the options on its root once the
	/// parse is done.
	pub fn persist_document_options(&self, root: &mut Element) {
		root.options.options.extend(
			self.document_options
				.iter()
				.map(|(name, value)| (name.clone(), value.clone())),
		);
	}

	pub fn diagnostics(&self) -> &[ParseDiagnostic] {
		&self.diagnostics
	}

	pub(crate) fn warn(&mut self, diagnostic: ParseDiagnostic) {
		tracing::warn!("{diagnostic}");
		self.diagnostics.push(diagnostic);
	}

	/// Consume the parser, returning its registry of definitions, final
	/// options, document options and diagnostics.
	pub fn finish(
		self,
	) -> (
		AldRegistry,
		Options,
		BTreeMap<String, OptionValue>,
		Vec<ParseDiagnostic>,
	) {
		(
			self.alds,
			self.options,
			self.document_options,
			self.diagnostics,
		)
	}

	/// Parse an attribute list definition, a block extension or a block
	/// inline attribute list at the cursor. `tree` is the container the block
	/// belongs to.
	///
	/// Returns false without consuming anything if none of them match, so the
	/// host can try its other block parsers.
	pub fn parse_block_extensions(&mut self, src: &mut Scanner<'_>, tree: &mut Element) -> bool {
		if let Some(captures) = src.scan(patterns::ald_start()) {
			let name = captures.get(1).map_or("", |name| name.as_str());
			let attributes = captures.get(2).map_or("", |attributes| attributes.as_str());
			tracing::trace!(name, "attribute list definition");
			parse_attribute_list(attributes, self.alds.definition_mut(name));
			tree.children.push(Element::eob(EobOrigin::Ald));
			return true;
		}

		if let Some(captures) = src.check(patterns::ext_block_start()) {
			let tag = Tag::from_captures(&captures);
			let matched = captures.get(0).map_or(0, |full| full.len());
			return self.parse_extension_start_tag(src, tree, tag, matched, Category::Block);
		}

		if let Some(captures) = src.scan(patterns::ial_block_start()) {
			let attributes = captures.get(1).map_or("", |attributes| attributes.as_str());

			match tree.children.last_mut() {
				Some(last) if last.accepts_block_ial() => {
					parse_attribute_list(attributes, last.ial_mut());
					if src.check(patterns::ial_block_start()).is_none() {
						tree.children.push(Element::eob(EobOrigin::Ial));
					}
				}
				_ => {
					let block_ial = self.block_ial.get_or_insert_with(AttributeList::default);
					parse_attribute_list(attributes, block_ial);
				}
			}

			return true;
		}

		false
	}

	/// Parse a span extension or a span inline attribute list at the cursor.
	/// `tree` is the element whose inline children are being built.
	///
	/// Always consumes input: when nothing valid starts at the cursor a single
	/// character is added as text.
	pub fn parse_span_extensions(&mut self, src: &mut Scanner<'_>, tree: &mut Element) -> bool {
		if let Some(captures) = src.check(patterns::ext_span_start()) {
			let tag = Tag::from_captures(&captures);
			let matched = captures.get(0).map_or(0, |full| full.len());
			self.parse_extension_start_tag(src, tree, tag, matched, Category::Span);
			return true;
		}

		if let Some(captures) = src.check(patterns::ial_span_start()) {
			match tree.children.last_mut() {
				Some(last) if last.kind != ElementKind::Text => {
					let matched = captures.get(0).map_or(0, |full| full.len());
					src.set_pos(src.pos() + matched);

					let mut ial = AttributeList::new();
					parse_attribute_list(captures.get(1).map_or("", |a| a.as_str()), &mut ial);
					last.ial_mut().merge(&ial);
					last.attr.apply_ial(&ial, &self.alds);
				}
				_ => {
					self.warn(ParseDiagnostic::SpanIalAfterText);
					if let Some(ch) = src.getch() {
						tree.add_text(ch);
					}
				}
			}

			return true;
		}

		if let Some(ch) = src.getch() {
			tree.add_text(ch);
		}

		true
	}
}
