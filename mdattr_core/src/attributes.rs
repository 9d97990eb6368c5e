use std::collections::BTreeMap;

use derive_more::Deref;
use derive_more::DerefMut;

/// The attribute key that accumulates rather than overwrites.
pub const CLASS_ATTR: &str = "class";
/// The attribute key that follows last-writer-wins semantics.
pub const ID_ATTR: &str = "id";

/// An ordered attribute mapping as produced by an inline attribute list (IAL)
/// or an attribute list definition (ALD).
///
/// Plain keys keep their first insertion position and are overwritten in
/// place. The `class` value and the reference names live in dedicated slots
/// so that they can only ever accumulate:
///
/// ```rust
/// use mdattr_core::AttributeList;
/// use mdattr_core::parse_attribute_list;
///
/// let mut ial = AttributeList::new();
/// parse_attribute_list(r#".note #intro title="Hi" shared"#, &mut ial);
/// parse_attribute_list(".wide #final", &mut ial);
///
/// assert_eq!(ial.class(), Some("note wide"));
/// assert_eq!(ial.id(), Some("final"));
/// assert_eq!(ial.get("title"), Some("Hi"));
/// assert_eq!(ial.ref_names(), vec!["shared"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeList {
	entries: Vec<(String, String)>,
	class: Option<String>,
	refs: Vec<Reference>,
}

/// An entry of the reference side-channel of an [`AttributeList`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
	/// A bare reference name written directly in an attribute list.
	Name(String),
	/// The complete reference list of another attribute list that was merged
	/// in. Kept grouped (and possibly empty) so every merge leaves one entry.
	Group(Vec<Reference>),
}

impl Reference {
	fn collect_names<'a>(&'a self, names: &mut Vec<&'a str>) {
		match self {
			Self::Name(name) => names.push(name),
			Self::Group(group) => {
				for reference in group {
					reference.collect_names(names);
				}
			}
		}
	}
}

impl AttributeList {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty() && self.class.is_none() && self.refs.is_empty()
	}

	/// Look up a key. `class` resolves to the accumulated class value.
	pub fn get(&self, key: &str) -> Option<&str> {
		if key == CLASS_ATTR {
			return self.class();
		}

		self.entries
			.iter()
			.find(|(name, _)| name == key)
			.map(|(_, value)| value.as_str())
	}

	pub fn id(&self) -> Option<&str> {
		self.get(ID_ATTR)
	}

	pub fn class(&self) -> Option<&str> {
		self.class.as_deref()
	}

	/// The plain key/value pairs in insertion order. Neither `class` nor the
	/// references are part of this view.
	pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries
			.iter()
			.map(|(key, value)| (key.as_str(), value.as_str()))
	}

	pub fn refs(&self) -> &[Reference] {
		&self.refs
	}

	/// All reference names, flattened in encounter order.
	pub fn ref_names(&self) -> Vec<&str> {
		let mut names = vec![];
		for reference in &self.refs {
			reference.collect_names(&mut names);
		}
		names
	}

	/// Set a key. Assigning `class` appends to the accumulated class instead
	/// of replacing it.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
		let key = key.into();
		let value = value.into();

		if key == CLASS_ATTR {
			self.add_class(&value);
			return;
		}

		match self.entries.iter_mut().find(|(name, _)| *name == key) {
			Some(entry) => entry.1 = value,
			None => self.entries.push((key, value)),
		}
	}

	pub fn set_id(&mut self, id: impl Into<String>) {
		self.insert(ID_ATTR, id);
	}

	pub fn add_class(&mut self, class: &str) {
		let joined = format!("{} {class}", self.class.as_deref().unwrap_or_default());
		self.class = Some(joined.trim_start().to_string());
	}

	pub fn add_ref(&mut self, name: impl Into<String>) {
		self.refs.push(Reference::Name(name.into()));
	}

	/// Merge `other` into this list.
	///
	/// The references of `other` are appended as a single grouped entry, the
	/// class is concatenated and every other key overwrites.
	pub fn merge(&mut self, other: &AttributeList) {
		self.refs.push(Reference::Group(other.refs.clone()));

		if let Some(class) = other.class() {
			self.add_class(class);
		}

		for (key, value) in other.entries() {
			self.insert(key, value);
		}
	}
}

/// The attribute list definitions of one document, keyed by definition name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, DerefMut)]
pub struct AldRegistry(BTreeMap<String, AttributeList>);

impl AldRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// The definition called `name`, created empty if it doesn't exist yet.
	pub fn definition_mut(&mut self, name: &str) -> &mut AttributeList {
		self.0.entry(name.to_string()).or_default()
	}
}

/// The attributes an element is rendered with.
///
/// Unlike [`AttributeList`] this is a flat ordered mapping where `class` is a
/// regular key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.0
			.iter()
			.find(|(name, _)| name == key)
			.map(|(_, value)| value.as_str())
	}

	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
		let key = key.into();
		let value = value.into();

		match self.0.iter_mut().find(|(name, _)| *name == key) {
			Some(entry) => entry.1 = value,
			None => self.0.push((key, value)),
		}
	}

	/// Apply an attribute list to these attributes.
	///
	/// Referenced definitions are applied first, in order, each at most once.
	/// Unknown references are skipped. The class of `ial` is appended to the
	/// existing class and all other keys overwrite.
	pub fn apply_ial(&mut self, ial: &AttributeList, alds: &AldRegistry) {
		let mut applied = vec![];
		self.apply_ial_inner(ial, alds, &mut applied);
	}

	fn apply_ial_inner<'a>(
		&mut self,
		ial: &'a AttributeList,
		alds: &'a AldRegistry,
		applied: &mut Vec<&'a str>,
	) {
		for name in ial.ref_names() {
			if applied.contains(&name) {
				continue;
			}

			if let Some(definition) = alds.get(name) {
				applied.push(name);
				self.apply_ial_inner(definition, alds, applied);
			}
		}

		if let Some(class) = ial.class() {
			let joined = format!("{} {class}", self.get(CLASS_ATTR).unwrap_or_default());
			self.insert(CLASS_ATTR, joined.trim_start());
		}

		for (key, value) in ial.entries() {
			self.insert(key, value);
		}
	}
}
