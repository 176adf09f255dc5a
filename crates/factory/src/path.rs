//! Context paths addressing slots of the build tree.

use std::fmt;

use smallvec::SmallVec;

/// One step from a parent slot to a child slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
	/// Overload `index` of `class`.
	Constructor { class: Box<str>, index: usize },
	/// A named constructor parameter.
	Param(Box<str>),
	/// The element slot of a sequence.
	Element,
}

impl fmt::Display for Segment {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Segment::Constructor { class, index } => write!(f, "{class}#{index}"),
			Segment::Param(name) => f.write_str(name),
			Segment::Element => f.write_str("[]"),
		}
	}
}

/// Ordered segments from the build root to a slot, rendered like
/// `Product#0/addr/Address#0/street`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ContextPath {
	segments: SmallVec<[Segment; 8]>,
}

impl ContextPath {
	/// The empty path of the root slot.
	pub fn root() -> Self {
		Self::default()
	}

	/// Returns this path extended by `segment`.
	pub fn child(&self, segment: Segment) -> Self {
		let mut segments = self.segments.clone();
		segments.push(segment);
		Self { segments }
	}

	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	pub fn last(&self) -> Option<&Segment> {
		self.segments.last()
	}

	pub fn is_root(&self) -> bool {
		self.segments.is_empty()
	}

	/// Name of the parameter this path ends in.
	pub fn param_name(&self) -> Option<&str> {
		match self.segments.last() {
			Some(Segment::Param(name)) => Some(name),
			_ => None,
		}
	}

	/// True when this path addresses a sequence element.
	pub fn is_element(&self) -> bool {
		matches!(self.segments.last(), Some(Segment::Element))
	}

	/// Joins only the parameter names, e.g. `addr__street` for `sep = "__"`.
	///
	/// Flat sources use this key to address nested parameters.
	pub fn field_key(&self, sep: &str) -> String {
		let mut key = String::new();
		for segment in &self.segments {
			if let Segment::Param(name) = segment {
				if !key.is_empty() {
					key.push_str(sep);
				}
				key.push_str(name);
			}
		}
		key
	}
}

impl fmt::Display for ContextPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.segments.is_empty() {
			return f.write_str("/");
		}
		for (i, segment) in self.segments.iter().enumerate() {
			if i > 0 {
				f.write_str("/")?;
			}
			write!(f, "{segment}")?;
		}
		Ok(())
	}
}
