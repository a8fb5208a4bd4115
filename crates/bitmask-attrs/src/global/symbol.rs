use std::{borrow::Borrow, fmt, ops::Deref, sync::Arc};

/// A declared value of a bitmask attribute.
///
/// Cheap to clone, and compares equal to any string holding the same text,
/// so `"web"`, `String::from("web")` and a `Symbol` all resolve to the same bit.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Symbol(Arc<str>);

impl Symbol {
	/// Returns the name of this symbol
	#[inline(always)]
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// The single normalization step applied wherever a value enters the crate.
	/// Returns `None` for blank input, which is never treated as a value.
	#[inline]
	pub fn normalize(value: &str) -> Option<&str> {
		if value.trim().is_empty() {
			None
		} else {
			Some(value)
		}
	}
}

impl Deref for Symbol {
	type Target = str;

	#[inline(always)]
	fn deref(&self) -> &str {
		&self.0
	}
}

impl AsRef<str> for Symbol {
	#[inline(always)]
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl Borrow<str> for Symbol {
	#[inline(always)]
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl From<&str> for Symbol {
	fn from(value: &str) -> Symbol {
		Symbol(Arc::from(value))
	}
}

impl From<String> for Symbol {
	fn from(value: String) -> Symbol {
		Symbol(Arc::from(value))
	}
}

impl PartialEq<str> for Symbol {
	fn eq(&self, other: &str) -> bool {
		self.as_str() == other
	}
}

impl PartialEq<&str> for Symbol {
	fn eq(&self, other: &&str) -> bool {
		self.as_str() == *other
	}
}

impl fmt::Display for Symbol {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl fmt::Debug for Symbol {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, ":{}", self.0)
	}
}
