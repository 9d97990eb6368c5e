use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::MdattrError;
use crate::MdattrResult;
use crate::OptionError;
use crate::OptionRegistry;
use crate::Options;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["mdattr.toml", ".mdattr.toml", ".config/mdattr.toml"];

/// Configuration loaded from an `mdattr.toml` file.
///
/// ```toml
/// [options]
/// auto_ids = false
/// footnote_nr = 3
/// toc_levels = "1..3"
/// entity_output = ":numeric"
/// ```
///
/// The `[options]` table sets the options a parse starts with. Values are
/// checked against the option registry when converted with
/// [`to_options`](MdattrConfig::to_options).
#[derive(Debug, Default, Deserialize)]
pub struct MdattrConfig {
	/// Option name to raw value.
	#[serde(default)]
	pub options: BTreeMap<String, toml::Value>,
}

impl MdattrConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if the file does not exist.
	pub fn load(root: &Path) -> MdattrResult<Option<MdattrConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		tracing::debug!(path = %config_path.display(), "loading config");
		let content = std::fs::read_to_string(&config_path)?;
		let config = Self::from_toml(&content)?;

		Ok(Some(config))
	}

	/// Parse the config from TOML text.
	pub fn from_toml(content: &str) -> MdattrResult<MdattrConfig> {
		toml::from_str(content).map_err(|e| MdattrError::ConfigParse(e.to_string()))
	}

	/// Build the starting option set: the registry defaults overridden by every
	/// configured option.
	///
	/// Unlike the inline `options` extension this is strict. An undefined name
	/// or a value the registry rejects is an error.
	pub fn to_options(&self, registry: &dyn OptionRegistry) -> MdattrResult<Options> {
		let mut options = registry.defaults();

		for (name, value) in &self.options {
			if !registry.is_defined(name) {
				return Err(MdattrError::UnknownOption(name.clone()));
			}

			let raw = toml_to_raw(name, value)?;
			let parsed = registry.parse(name, &raw).map_err(|error| {
				match error {
					OptionError::Undefined(name) => MdattrError::UnknownOption(name),
					other => {
						MdattrError::InvalidOptionValue {
							name: name.clone(),
							reason: other.to_string(),
						}
					}
				}
			})?;

			options.set(name.as_str(), parsed);
		}

		Ok(options)
	}
}

/// Convert a TOML value to the raw string form the option registry parses.
/// Arrays become comma separated lists.
fn toml_to_raw(name: &str, value: &toml::Value) -> MdattrResult<String> {
	let raw = match value {
		toml::Value::String(s) => s.clone(),
		toml::Value::Integer(i) => i.to_string(),
		toml::Value::Boolean(b) => b.to_string(),
		toml::Value::Array(items) => {
			let items: MdattrResult<Vec<String>> =
				items.iter().map(|item| toml_to_raw(name, item)).collect();
			items?.join(",")
		}
		toml::Value::Float(_) | toml::Value::Datetime(_) | toml::Value::Table(_) => {
			return Err(MdattrError::InvalidOptionValue {
				name: name.to_string(),
				reason: format!("unsupported value type `{}`", value.type_str()),
			});
		}
	};

	Ok(raw)
}
