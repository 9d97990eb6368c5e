//! Regular expressions for every tag shape recognised at the cursor.
//!
//! All cursor patterns are anchored with `\A` because they are matched against
//! the remaining input of a [`Scanner`](crate::Scanner).

use std::sync::OnceLock;

use regex::Regex;

/// Up to three spaces of indentation before a block level tag.
const OPT_SPACE: &str = " {0,3}";
/// A definition, class or reference name.
const ID_NAME: &str = "[A-Za-z0-9_][A-Za-z0-9_-]*";
/// A single character of an attribute list: anything but an unescaped `}`.
const ANY_CHAR: &str = r"(?:\\\}|[^}])";

fn compile(slot: &'static OnceLock<Regex>, pattern: impl FnOnce() -> String) -> &'static Regex {
	slot.get_or_init(|| Regex::new(&pattern()).expect("invalid built-in tag pattern"))
}

/// `{::name attrs}` or `{::name attrs/}`.
///
/// Groups: 1 = name, 2 = attribute text, 3 = self-closing slash.
fn start_tag() -> String {
	format!(r"\{{::([A-Za-z0-9_]+)(?:\s({ANY_CHAR}*?)|)(/)?\}}")
}

/// `{:/name}` or `{:/}` for any name, the name is the fourth group.
fn any_stop_tag() -> String {
	format!(r"\{{:/({ID_NAME})?\}}")
}

/// `{:name: attrs}` alone on a line.
///
/// Groups: 1 = definition name, 2 = attribute text.
pub fn ald_start() -> &'static Regex {
	static PATTERN: OnceLock<Regex> = OnceLock::new();
	compile(&PATTERN, || {
		format!(r"\A{OPT_SPACE}\{{:({ID_NAME}):({ANY_CHAR}+)\}}\s*?\n")
	})
}

/// A start or stop tag alone on a line.
pub fn ext_block_start() -> &'static Regex {
	static PATTERN: OnceLock<Regex> = OnceLock::new();
	compile(&PATTERN, || {
		format!(
			r"\A{OPT_SPACE}(?:{}|{})\s*?\n",
			start_tag(),
			any_stop_tag()
		)
	})
}

/// `{:attrs}` alone on a line where `attrs` doesn't start with `:` or `/`.
///
/// Groups: 1 = attribute text.
pub fn ial_block_start() -> &'static Regex {
	static PATTERN: OnceLock<Regex> = OnceLock::new();
	compile(&PATTERN, || {
		format!(r"\A{OPT_SPACE}\{{:((?:\\\}}|[^:/}}]){ANY_CHAR}*)\}}\s*?\n")
	})
}

/// The start of anything the block driver handles.
pub fn block_extensions_start() -> &'static Regex {
	static PATTERN: OnceLock<Regex> = OnceLock::new();
	compile(&PATTERN, || format!(r"\A{OPT_SPACE}\{{:"))
}

/// One or more lines containing only spaces and tabs.
pub fn blank_lines() -> &'static Regex {
	static PATTERN: OnceLock<Regex> = OnceLock::new();
	compile(&PATTERN, || r"\A(?:[ \t]*\n)+".to_string())
}

/// A start or stop tag inside a span.
pub fn ext_span_start() -> &'static Regex {
	static PATTERN: OnceLock<Regex> = OnceLock::new();
	compile(&PATTERN, || {
		format!(r"\A(?:{}|{})", start_tag(), any_stop_tag())
	})
}

/// `{:attrs}` inside a span.
///
/// Groups: 1 = attribute text.
pub fn ial_span_start() -> &'static Regex {
	static PATTERN: OnceLock<Regex> = OnceLock::new();
	compile(&PATTERN, || format!(r"\A\{{:({ANY_CHAR}+)\}}"))
}

/// The stop tag closing a block extension called `name`: `{:/name}` or
/// `{:/}` on its own line.
pub fn block_stop_tag(name: &str) -> Option<Regex> {
	let name = regex::escape(name);
	Regex::new(&format!(r"(?m)^{OPT_SPACE}\{{:/({name})?\}}[ \t\r]*\n")).ok()
}

/// The stop tag closing a span extension called `name`.
pub fn span_stop_tag(name: &str) -> Option<Regex> {
	let name = regex::escape(name);
	Regex::new(&format!(r"\{{:/({name})?\}}")).ok()
}
