//! Dotted module names.
//!
//! ```text
//! DottedName::parse("sys.fake.mod")
//!   ├── Split  → ["sys", "fake", "mod"]
//!   ├── Check  → every part is a non-empty identifier
//!   └── Prefix → "sys", "sys.fake", "sys.fake.mod"
//! ```

use smallvec::SmallVec;
use std::sync::Arc;

// =============================================================================
// Dotted Name
// =============================================================================

/// Parsed dotted module name with pre-split components.
///
/// Invariant: at least one part, and every part is an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DottedName {
    /// The full dotted name (e.g., "os.path.join").
    full_name: Arc<str>,
    /// Pre-split components; the common case is 2-3 parts.
    parts: SmallVec<[Arc<str>; 4]>,
}

impl DottedName {
    /// Parse a dotted module name.
    ///
    /// Returns `None` for empty names, empty parts (".os", "os.", "os..path")
    /// and parts that are not identifiers ("os.2x", "my-mod").
    pub fn parse(name: &str) -> Option<Self> {
        if name.is_empty() {
            return None;
        }

        let mut parts = SmallVec::new();
        for part in name.split('.') {
            if !is_identifier(part) {
                return None;
            }
            parts.push(Arc::from(part));
        }

        Some(Self {
            full_name: Arc::from(name),
            parts,
        })
    }

    /// Get the full dotted name.
    #[inline]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Get the parts of the dotted name.
    #[inline]
    pub fn parts(&self) -> &[Arc<str>] {
        &self.parts
    }

    /// Get the number of components.
    #[inline]
    pub fn depth(&self) -> usize {
        self.parts.len()
    }

    /// Iterate over the cumulative prefixes, shortest first.
    ///
    /// Each item is `(depth_index, part, prefix)`; the last prefix is the
    /// full name.
    pub fn prefixes(&self) -> impl Iterator<Item = (usize, &Arc<str>, Arc<str>)> + '_ {
        let mut end = 0;
        self.parts.iter().enumerate().map(move |(i, part)| {
            end += if i == 0 { part.len() } else { part.len() + 1 };
            (i, part, Arc::from(&self.full_name[..end]))
        })
    }
}

impl std::fmt::Display for DottedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_name)
    }
}

// =============================================================================
// Name Utilities
// =============================================================================

/// Check whether `s` is an identifier: a letter or `_`, then letters,
/// digits or `_`.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_alphanumeric())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // DottedName Tests
    // =========================================================================

    #[test]
    fn test_dotted_name_simple() {
        let dn = DottedName::parse("math").unwrap();
        assert_eq!(dn.full_name(), "math");
        assert_eq!(dn.depth(), 1);
        assert_eq!(dn.parts()[0].as_ref(), "math");
    }

    #[test]
    fn test_dotted_name_three_parts() {
        let dn = DottedName::parse("a.b.c").unwrap();
        assert_eq!(dn.depth(), 3);
        assert_eq!(dn.parts()[0].as_ref(), "a");
        assert_eq!(dn.parts()[1].as_ref(), "b");
        assert_eq!(dn.parts()[2].as_ref(), "c");
        assert_eq!(dn.to_string(), "a.b.c");
    }

    #[test]
    fn test_dotted_name_rejects_malformed() {
        for bad in ["", ".os", "os.", "os..path", ".", "os.2x", "my-mod", "a b"] {
            assert!(DottedName::parse(bad).is_none(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_dotted_name_accepts_underscores_and_unicode() {
        assert!(DottedName::parse("_private.__init__").is_some());
        assert!(DottedName::parse("pkg.mod2").is_some());
        assert!(DottedName::parse("paquete.módulo").is_some());
    }

    #[test]
    fn test_dotted_name_prefixes() {
        let dn = DottedName::parse("sys.fake.mod").unwrap();
        let prefixes: Vec<(usize, String, String)> = dn
            .prefixes()
            .map(|(i, part, prefix)| (i, part.to_string(), prefix.to_string()))
            .collect();
        assert_eq!(
            prefixes,
            vec![
                (0, "sys".to_string(), "sys".to_string()),
                (1, "fake".to_string(), "sys.fake".to_string()),
                (2, "mod".to_string(), "sys.fake.mod".to_string()),
            ]
        );
    }

    #[test]
    fn test_dotted_name_prefixes_multibyte() {
        let dn = DottedName::parse("é.ü").unwrap();
        let last = dn.prefixes().last().unwrap().2;
        assert_eq!(last.as_ref(), "é.ü");
    }

    // =========================================================================
    // Utility Tests
    // =========================================================================

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("x"));
        assert!(is_identifier("_x1"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("1x"));
        assert!(!is_identifier("x.y"));
    }
}
