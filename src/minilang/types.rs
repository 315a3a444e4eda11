//! Types used through multiple phases of the language, mostly
//! in an auxiliary fashion to support (better) error reporting.

use core::cmp::Ordering;
use core::error::Error;
use core::fmt::{Display, Formatter};
use std::rc::Rc;

/// A Location names a source together with a line and column position.
///
/// Locations are immutable once created; every [`Token`](crate::minilang::token::tokens::Token)
/// carries one, which is why the source name is shared instead of copied.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Location {
    /// Name of the source, used purely for diagnostics.
    source_name: Rc<str>,
    /// Line of the location, 1-indexed.
    line: usize,
    /// Column of the location, 1-indexed.
    col: usize,
}

impl Location {
    /// Construct a location in the named source.
    #[must_use]
    pub const fn new(source_name: Rc<str>, line: usize, col: usize) -> Self {
        Location {
            source_name,
            line,
            col,
        }
    }

    /// Name of the source this location points into.
    #[must_use]
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Line of the location, 1-indexed.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Column of the location, 1-indexed.
    #[must_use]
    pub const fn col(&self) -> usize {
        self.col
    }
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Location {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then(self.col.cmp(&other.col))
            .then_with(|| self.source_name.cmp(&other.source_name))
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}:{}:{}", self.source_name, self.line, self.col)
    }
}

/// A Located value pairs a value, usually a diagnostic, with a source location.
#[derive(Clone, Debug, PartialEq, Eq)]
#[expect(clippy::exhaustive_structs, reason = "this is set in stone")]
pub struct Located<T>(pub T, pub Location);

impl<T: Display> Display for Located<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.1, self.0)
    }
}

impl<T: Error + 'static> Error for Located<T> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

#[cfg(test)]
mod test {
    use std::rc::Rc;

    use super::Location;

    #[test]
    fn locations_order_by_line_then_column() {
        let name: Rc<str> = "order.ml".into();
        let early = Location::new(Rc::clone(&name), 1, 9);
        let later_col = Location::new(Rc::clone(&name), 1, 10);
        let later_line = Location::new(name, 2, 1);

        assert!(early < later_col);
        assert!(later_col < later_line);
    }

    #[test]
    fn display_includes_source_line_and_column() {
        let loc = Location::new("prog.ml".into(), 3, 14);
        assert_eq!(loc.to_string(), "prog.ml:3:14");
    }
}
