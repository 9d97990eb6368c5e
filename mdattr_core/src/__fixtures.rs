use rstest::fixture;

use crate::AttributeList;
use crate::Element;
use crate::ElementKind;
use crate::ExtensionParser;
use crate::Scanner;
use crate::StandardOptions;
use crate::parse_attribute_list;

pub static REGISTRY: StandardOptions = StandardOptions;

#[fixture]
pub fn extension_parser() -> ExtensionParser<'static> {
	ExtensionParser::new(&REGISTRY)
}

#[fixture]
pub fn paragraph() -> Element {
	Element::new(ElementKind::Paragraph)
}

pub fn tokenize(source: &str) -> AttributeList {
	let mut list = AttributeList::new();
	parse_attribute_list(source, &mut list);
	list
}

/// Call the block driver until it stops consuming input. Returns the final
/// cursor position.
pub fn drive_blocks(parser: &mut ExtensionParser<'_>, tree: &mut Element, source: &str) -> usize {
	let mut src = Scanner::new(source);
	while !src.eos() && parser.parse_block_extensions(&mut src, tree) {}
	src.pos()
}

/// Call the span driver once. Returns the cursor position afterwards.
pub fn drive_span(parser: &mut ExtensionParser<'_>, tree: &mut Element, source: &str) -> usize {
	let mut src = Scanner::new(source);
	assert!(parser.parse_span_extensions(&mut src, tree));
	src.pos()
}

pub fn config_with_options() -> &'static str {
	r#"[options]
auto_ids = false
footnote_nr = 3
toc_levels = "1..3"
smart_quotes = ["apos", "apos", "quot", "quot"]
"#
}
