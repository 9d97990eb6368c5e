use std::collections::BTreeMap;

use derive_more::Deref;
use derive_more::DerefMut;
use thiserror::Error;

/// A typed document option value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum OptionValue {
	String(String),
	Bool(bool),
	Integer(i64),
	/// A symbolic value such as `as_char`, stored without the leading colon.
	Symbol(String),
	/// An explicitly unset value.
	None,
	Integers(Vec<i64>),
	Strings(Vec<String>),
}

impl std::fmt::Display for OptionValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::String(value) => write!(f, "{value}"),
			Self::Bool(value) => write!(f, "{value}"),
			Self::Integer(value) => write!(f, "{value}"),
			Self::Symbol(value) => write!(f, ":{value}"),
			Self::None => write!(f, "nil"),
			Self::Integers(values) => {
				let values: Vec<String> = values.iter().map(ToString::to_string).collect();
				write!(f, "{}", values.join(","))
			}
			Self::Strings(values) => write!(f, "{}", values.join(",")),
		}
	}
}

/// Why a raw option value was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum OptionError {
	#[error("no option named `{0}` is defined")]
	Undefined(String),

	#[error("invalid integer value for option `{name}`: `{value}`")]
	InvalidInteger { name: String, value: String },

	#[error("invalid value for option `{name}`: {reason}")]
	InvalidValue { name: String, reason: String },
}

/// The document option registry consulted by the `options` extension.
pub trait OptionRegistry {
	/// Returns true if `name` is a known option.
	fn is_defined(&self, name: &str) -> bool;

	/// Parse the raw string `raw` into the typed value of option `name`.
	fn parse(&self, name: &str, raw: &str) -> Result<OptionValue, OptionError>;

	/// The option set a parse starts with.
	fn defaults(&self) -> Options {
		Options::default()
	}
}

/// The live option set of a parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, DerefMut)]
pub struct Options(BTreeMap<String, OptionValue>);

impl Options {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set(&mut self, name: impl Into<String>, value: OptionValue) {
		self.0.insert(name.into(), value);
	}

	/// Returns the boolean value of `name`, or `None` if it isn't a boolean.
	pub fn get_bool(&self, name: &str) -> Option<bool> {
		match self.0.get(name) {
			Some(OptionValue::Bool(value)) => Some(*value),
			_ => None,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OptionType {
	String,
	Boolean,
	Integer,
	Symbol,
	/// Heading levels, written as `1..3` or a comma/space separated list.
	TocLevels,
	/// Four comma separated entity names.
	SmartQuotes,
}

struct OptionDefinition {
	name: &'static str,
	kind: OptionType,
	/// Raw default, parsed like any user supplied value.
	default: &'static str,
}

const DEFINITIONS: &[OptionDefinition] = &[
	OptionDefinition {
		name: "template",
		kind: OptionType::String,
		default: "",
	},
	OptionDefinition {
		name: "auto_ids",
		kind: OptionType::Boolean,
		default: "true",
	},
	OptionDefinition {
		name: "auto_id_prefix",
		kind: OptionType::String,
		default: "",
	},
	OptionDefinition {
		name: "parse_block_html",
		kind: OptionType::Boolean,
		default: "false",
	},
	OptionDefinition {
		name: "parse_span_html",
		kind: OptionType::Boolean,
		default: "true",
	},
	OptionDefinition {
		name: "html_to_native",
		kind: OptionType::Boolean,
		default: "false",
	},
	OptionDefinition {
		name: "footnote_nr",
		kind: OptionType::Integer,
		default: "1",
	},
	OptionDefinition {
		name: "entity_output",
		kind: OptionType::Symbol,
		default: ":as_char",
	},
	OptionDefinition {
		name: "toc_levels",
		kind: OptionType::TocLevels,
		default: "1..6",
	},
	OptionDefinition {
		name: "line_width",
		kind: OptionType::Integer,
		default: "72",
	},
	OptionDefinition {
		name: "smart_quotes",
		kind: OptionType::SmartQuotes,
		default: "lsquo,rsquo,ldquo,rdquo",
	},
];

const ENTITY_OUTPUT_MODES: [&str; 4] = ["as_char", "as_input", "numeric", "symbolic"];

/// The built-in option definitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardOptions;

impl StandardOptions {
	fn definition(name: &str) -> Option<&'static OptionDefinition> {
		DEFINITIONS.iter().find(|definition| definition.name == name)
	}

	/// Names of all defined options in definition order.
	pub fn names() -> impl Iterator<Item = &'static str> {
		DEFINITIONS.iter().map(|definition| definition.name)
	}
}

impl OptionRegistry for StandardOptions {
	fn is_defined(&self, name: &str) -> bool {
		Self::definition(name).is_some()
	}

	fn parse(&self, name: &str, raw: &str) -> Result<OptionValue, OptionError> {
		let Some(definition) = Self::definition(name) else {
			return Err(OptionError::Undefined(name.to_string()));
		};

		let value = match definition.kind {
			OptionType::String => OptionValue::String(raw.to_string()),
			OptionType::Boolean => {
				OptionValue::Bool(!raw.is_empty() && !raw.trim().eq_ignore_ascii_case("false"))
			}
			OptionType::Integer => {
				let parsed = raw.trim().parse::<i64>().map_err(|_| {
					OptionError::InvalidInteger {
						name: name.to_string(),
						value: raw.to_string(),
					}
				})?;
				OptionValue::Integer(parsed)
			}
			OptionType::Symbol => parse_symbol(raw),
			OptionType::TocLevels => parse_toc_levels(name, raw)?,
			OptionType::SmartQuotes => parse_smart_quotes(name, raw)?,
		};

		if name == "entity_output" {
			if let OptionValue::Symbol(mode) = &value {
				if !ENTITY_OUTPUT_MODES.contains(&mode.as_str()) {
					return Err(OptionError::InvalidValue {
						name: name.to_string(),
						reason: format!("unknown entity output mode `{mode}`"),
					});
				}
			}
		}

		Ok(value)
	}

	fn defaults(&self) -> Options {
		let mut options = Options::default();
		for definition in DEFINITIONS {
			if let Ok(value) = self.parse(definition.name, definition.default) {
				options.set(definition.name, value);
			}
		}
		options
	}
}

fn parse_symbol(raw: &str) -> OptionValue {
	let trimmed = raw.trim();
	let symbol = trimmed.strip_prefix(':').unwrap_or(trimmed);

	if symbol.is_empty() || symbol == "nil" {
		OptionValue::None
	} else {
		OptionValue::Symbol(symbol.to_string())
	}
}

fn parse_toc_levels(name: &str, raw: &str) -> Result<OptionValue, OptionError> {
	let invalid = |reason: String| {
		OptionError::InvalidValue {
			name: name.to_string(),
			reason,
		}
	};
	let level = |text: &str| {
		text.trim()
			.parse::<i64>()
			.map_err(|_| invalid(format!("`{}` is not a heading level", text.trim())))
	};

	let out_of_range = || invalid("levels must be between 1 and 6".to_string());

	let levels = if let Some((start, end)) = raw.split_once("..") {
		let (start, end) = (level(start)?, level(end)?);
		// Both ends are checked before the range is expanded.
		if !(1..=6).contains(&start) || !(1..=6).contains(&end) || start > end {
			return Err(out_of_range());
		}
		(start..=end).collect::<Vec<_>>()
	} else {
		raw.split(|ch: char| ch == ',' || ch.is_whitespace())
			.filter(|part| !part.is_empty())
			.map(level)
			.collect::<Result<Vec<_>, _>>()?
	};

	if levels.is_empty() || levels.iter().any(|level| !(1..=6).contains(level)) {
		return Err(out_of_range());
	}

	Ok(OptionValue::Integers(levels))
}

fn parse_smart_quotes(name: &str, raw: &str) -> Result<OptionValue, OptionError> {
	let quotes: Vec<String> = raw.split(',').map(|part| part.trim().to_string()).collect();

	if quotes.len() != 4 || quotes.iter().any(String::is_empty) {
		return Err(OptionError::InvalidValue {
			name: name.to_string(),
			reason: "expected four comma separated entity names".to_string(),
		});
	}

	Ok(OptionValue::Strings(quotes))
}
