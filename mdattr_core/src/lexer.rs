use logos::Logos;

use crate::AttributeList;

/// Raw tokens produced by logos for flat tokenization of an attribute list
/// such as `#id .class key="value" reference`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
	#[regex(r"[ \t\r\n\x0B\x0C]+")]
	Whitespace,
	#[regex(r#"[a-zA-Z0-9_][a-zA-Z0-9_-]*="(\\\}|\\"|[^"}])*""#)]
	DoubleQuotedPair,
	#[regex(r"[a-zA-Z0-9_][a-zA-Z0-9_-]*='(\\\}|\\'|[^'}])*'")]
	SingleQuotedPair,
	#[regex(r"#[a-zA-Z0-9_][a-zA-Z0-9_:-]*")]
	Id,
	#[regex(r"\.[a-zA-Z0-9_][a-zA-Z0-9_-]*")]
	Class,
	#[regex(r"[a-zA-Z0-9_][a-zA-Z0-9_-]*")]
	Reference,
}

/// Walks the logos token stream and applies every token that stands on its
/// own, i.e. is preceded by the start of the input or whitespace and followed
/// by whitespace or the end of the input.
struct TokenWalker<'a> {
	/// The raw attribute list text.
	source: &'a str,
	/// The collected raw tokens and their byte spans.
	raw_tokens: Vec<(Result<RawToken, ()>, std::ops::Range<usize>)>,
}

impl<'a> TokenWalker<'a> {
	fn new(source: &'a str) -> Self {
		let raw_tokens = RawToken::lexer(source).spanned().collect();

		Self { source, raw_tokens }
	}

	fn is_whitespace(&self, index: Option<usize>) -> bool {
		match index.and_then(|index| self.raw_tokens.get(index)) {
			Some((Ok(RawToken::Whitespace), _)) | None => true,
			Some(_) => false,
		}
	}

	fn process(&self, list: &mut AttributeList) {
		for (index, (result, span)) in self.raw_tokens.iter().enumerate() {
			let Ok(token) = result else {
				continue;
			};

			if *token == RawToken::Whitespace {
				continue;
			}

			let slice = &self.source[span.clone()];
			let standalone = self.is_whitespace(index.checked_sub(1))
				&& self.is_whitespace(Some(index + 1));

			if !standalone {
				tracing::trace!(token = slice, "skipping attribute token touching other text");
				continue;
			}

			match token {
				RawToken::DoubleQuotedPair | RawToken::SingleQuotedPair => {
					let Some((key, quoted)) = slice.split_once('=') else {
						continue;
					};
					let quote = if *token == RawToken::DoubleQuotedPair {
						'"'
					} else {
						'\''
					};
					let value = &quoted[1..quoted.len() - 1];
					list.insert(key, unescape_value(value, quote));
				}
				RawToken::Id => list.set_id(&slice[1..]),
				RawToken::Class => list.add_class(&slice[1..]),
				RawToken::Reference => list.add_ref(slice),
				RawToken::Whitespace => {}
			}
		}
	}
}

/// Replace `\}` and `\<quote>` with the literal character. Every other
/// backslash is kept as is.
fn unescape_value(value: &str, quote: char) -> String {
	let mut unescaped = String::with_capacity(value.len());
	let mut chars = value.chars().peekable();

	while let Some(ch) = chars.next() {
		if ch == '\\' {
			if let Some(&next) = chars.peek() {
				if next == '}' || next == quote {
					unescaped.push(next);
					chars.next();
					continue;
				}
			}
		}

		unescaped.push(ch);
	}

	unescaped
}

/// Parse the attribute list `source` and add every attribute found to `list`.
///
/// Tokens are applied left to right: `key="value"` and `key='value'` set a
/// key, `#name` sets the id, `.name` appends a class and a bare `name` is
/// recorded as a reference to an attribute list definition.
pub fn parse_attribute_list(source: &str, list: &mut AttributeList) {
	TokenWalker::new(source).process(list);
}
