use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum MdattrError {
	#[error(transparent)]
	#[diagnostic(code(mdattr::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(mdattr::config_parse),
		help("check that mdattr.toml is valid TOML with an [options] table")
	)]
	ConfigParse(String),

	#[error("unknown option: `{0}`")]
	#[diagnostic(
		code(mdattr::unknown_option),
		help(
			"available options: template, auto_ids, auto_id_prefix, parse_block_html, \
			 parse_span_html, html_to_native, footnote_nr, entity_output, toc_levels, \
			 line_width, smart_quotes"
		)
	)]
	UnknownOption(String),

	#[error("invalid value for option `{name}`: {reason}")]
	#[diagnostic(code(mdattr::invalid_option_value))]
	InvalidOptionValue { name: String, reason: String },
}

pub type MdattrResult<T> = Result<T, MdattrError>;
