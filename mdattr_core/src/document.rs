//! A minimal block and span loop that drives an [`ExtensionParser`] over a
//! whole document.
//!
//! Only blank lines, paragraphs and code spans are recognised natively.
//! Everything starting with `{:` is handed to the extension parser.

use crate::AldRegistry;
use crate::Element;
use crate::ElementKind;
use crate::ExtensionParser;
use crate::OptionRegistry;
use crate::Options;
use crate::ParseDiagnostic;
use crate::Scanner;
use crate::StandardOptions;
use crate::patterns;

/// The result of parsing a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
	/// The root element. Its `options.options` holds the options set by
	/// `options` extensions. End-of-block markers are kept in place and block
	/// attribute lists are left in `options.ial` for the host to apply.
	pub root: Element,
	/// Every attribute list definition found.
	pub alds: AldRegistry,
	/// The options in effect at the end of the parse.
	pub options: Options,
	pub diagnostics: Vec<ParseDiagnostic>,
}

impl Document {
	/// Parse `source` with the standard options and their defaults.
	pub fn parse(source: &str) -> Self {
		let registry = StandardOptions;
		parse(source, &registry, registry.defaults())
	}
}

/// Parse `source`, starting from `options` and validating `options`
/// extensions against `registry`.
pub fn parse(source: &str, registry: &dyn OptionRegistry, options: Options) -> Document {
	let mut text = source.to_string();
	if !text.ends_with('\n') {
		text.push('\n');
	}

	let mut src = Scanner::new(&text);
	let mut parser = ExtensionParser::with_options(registry, options);
	let mut root = Element::root();

	while !src.eos() {
		if let Some(captures) = src.scan(patterns::blank_lines()) {
			let blank = captures.get(0).map_or("", |blank| blank.as_str());
			root.children.push(Element::with_value(ElementKind::Blank, blank));
			continue;
		}

		if src.check(patterns::block_extensions_start()).is_some()
			&& parser.parse_block_extensions(&mut src, &mut root)
		{
			continue;
		}

		parse_paragraph(&mut src, &mut parser, &mut root);
	}

	parser.persist_document_options(&mut root);
	let (alds, options, _, diagnostics) = parser.finish();

	Document {
		root,
		alds,
		options,
		diagnostics,
	}
}

/// Returns true if the line at the cursor would be consumed by the block
/// driver.
fn starts_block_extension(src: &Scanner<'_>) -> bool {
	src.check(patterns::ald_start()).is_some()
		|| src.check(patterns::ext_block_start()).is_some()
		|| src.check(patterns::ial_block_start()).is_some()
}

fn parse_paragraph(src: &mut Scanner<'_>, parser: &mut ExtensionParser<'_>, root: &mut Element) {
	let mut text = String::new();

	// The first line always belongs to the paragraph so the loop progresses
	// even when a `{:` line was rejected by the block driver.
	if let Some(line) = src.scan_line() {
		text.push_str(line);
	}

	while !src.eos()
		&& src.check(patterns::blank_lines()).is_none()
		&& !starts_block_extension(src)
	{
		if let Some(line) = src.scan_line() {
			text.push_str(line);
		}
	}

	let text = text.strip_suffix('\n').unwrap_or(&text);
	let mut paragraph = Element::new(ElementKind::Paragraph);
	paragraph.options.ial = parser.take_block_ial();
	parse_spans(text, parser, &mut paragraph);
	root.children.push(paragraph);
}

fn parse_spans(text: &str, parser: &mut ExtensionParser<'_>, tree: &mut Element) {
	let mut src = Scanner::new(text);

	while !src.eos() {
		let rest = src.rest();

		if rest.starts_with("{:") {
			parser.parse_span_extensions(&mut src, tree);
			continue;
		}

		if let Some((code, consumed)) = code_span(rest) {
			tree.children.push(Element::with_value(ElementKind::CodeSpan, code));
			src.set_pos(src.pos() + consumed);
			continue;
		}

		// An unclosed backtick run is literal text as a whole.
		let fence = backtick_run(rest);
		let end = if fence > 0 {
			fence
		} else {
			rest.char_indices()
				.skip(1)
				.find(|(_, ch)| matches!(ch, '`' | '{'))
				.map_or(rest.len(), |(index, _)| index)
		};
		tree.add_text(&rest[..end]);
		src.set_pos(src.pos() + end);
	}
}

/// Match a code span at the start of `text`: a run of backticks closed by a
/// run of the same length. Returns the trimmed code and the consumed length.
fn code_span(text: &str) -> Option<(&str, usize)> {
	let fence = backtick_run(text);
	if fence == 0 {
		return None;
	}

	let body = &text[fence..];
	let mut offset = 0;

	while let Some(found) = body[offset..].find('`') {
		let start = offset + found;
		let run = backtick_run(&body[start..]);

		if run == fence {
			return Some((body[..start].trim(), fence + start + run));
		}

		offset = start + run;
	}

	None
}

fn backtick_run(text: &str) -> usize {
	text.len() - text.trim_start_matches('`').len()
}
