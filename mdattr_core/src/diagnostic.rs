use thiserror::Error;

/// A diagnostic produced while parsing attribute lists and extensions. These
/// never abort the parse; the offending construct is either dropped or kept as
/// literal text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseDiagnostic {
	/// A stop tag (`{:/name}` or `{:/}`) appeared where a start tag was
	/// expected.
	#[error("Invalid extension stop tag {}found - ignoring it", stop_tag_name(.name.as_deref()))]
	InvalidStopTag { name: Option<String> },
	/// An extension was opened but the matching stop tag never appeared.
	#[error("No stop tag for extension '{name}' found - ignoring it")]
	MissingStopTag { name: String },
	/// The extension name is not one of the built-in extensions.
	#[error("Invalid extension with name '{name}' specified - ignoring it")]
	UnknownExtension { name: String },
	/// An `options` extension named an option the registry doesn't define.
	#[error("Unknown option '{name}'")]
	UnknownOption { name: String },
	/// A span attribute list directly followed plain text.
	#[error("Found span IAL after text - ignoring it")]
	SpanIalAfterText,
}

fn stop_tag_name(name: Option<&str>) -> String {
	name.map(|name| format!("for '{name}' ")).unwrap_or_default()
}
