use regex::Captures;
use regex::Regex;

/// A cursor over the source text that matches regular expressions at its
/// current position.
///
/// Patterns passed to [`check`](Scanner::check) and [`scan`](Scanner::scan)
/// should be anchored with `\A`; unanchored patterns are still only accepted
/// when they match right at the cursor.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
	/// The text being scanned.
	source: &'a str,
	/// Byte offset of the cursor into `source`.
	pos: usize,
}

impl<'a> Scanner<'a> {
	pub fn new(source: &'a str) -> Self {
		Self { source, pos: 0 }
	}

	/// The current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Move the cursor. The offset is clamped to the input length.
	pub fn set_pos(&mut self, pos: usize) {
		self.pos = pos.min(self.source.len());
	}

	/// Returns true if the cursor is at the end of the input.
	pub fn eos(&self) -> bool {
		self.pos >= self.source.len()
	}

	/// The input from the cursor to the end.
	pub fn rest(&self) -> &'a str {
		&self.source[self.pos..]
	}

	/// Match `pattern` at the cursor without advancing.
	pub fn check(&self, pattern: &Regex) -> Option<Captures<'a>> {
		pattern
			.captures(self.rest())
			.filter(|captures| captures.get(0).is_some_and(|full| full.start() == 0))
	}

	/// Match `pattern` at the cursor and advance past the match.
	pub fn scan(&mut self, pattern: &Regex) -> Option<Captures<'a>> {
		let captures = self.check(pattern)?;
		self.pos += captures.get(0).map_or(0, |full| full.end());
		Some(captures)
	}

	/// Search forward for `pattern`. On success the cursor moves past the
	/// match and the text between the old cursor and the start of the match is
	/// returned. On failure the cursor stays put.
	pub fn scan_until(&mut self, pattern: &Regex) -> Option<&'a str> {
		let rest = self.rest();
		let found = pattern.find(rest)?;
		self.pos += found.end();
		Some(&rest[..found.start()])
	}

	/// Consume and return the next character.
	pub fn getch(&mut self) -> Option<&'a str> {
		let rest = self.rest();
		let ch = rest.chars().next()?;
		let text = &rest[..ch.len_utf8()];
		self.pos += text.len();
		Some(text)
	}

	/// Advance the cursor until the end of the current line, including the
	/// line terminator, and return the consumed text.
	pub fn scan_line(&mut self) -> Option<&'a str> {
		let rest = self.rest();
		if rest.is_empty() {
			return None;
		}

		let end = rest.find('\n').map_or(rest.len(), |index| index + 1);
		self.pos += end;
		Some(&rest[..end])
	}
}
