//! Runtime values stored in an [`Environment`](crate::minilang::environment::Environment).
use core::fmt::{Display, Formatter};

/// A value of the language.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[expect(
    clippy::exhaustive_enums,
    reason = "adding a new variant MUST be handled and is a breaking change."
)]
pub enum Value {
    /// The result of a statement that produces no value.
    #[default]
    Unit,
    /// A signed integer; comparisons and logical operators produce 0 or 1.
    Integer(i64),
}

impl Value {
    /// Whether the value counts as true in a condition: any non-zero integer.
    #[must_use]
    pub const fn is_truthy(&self) -> bool {
        match *self {
            Value::Unit => false,
            Value::Integer(n) => n != 0,
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match *self {
            Value::Unit => write!(f, "<unit>"),
            Value::Integer(n) => write!(f, "{n}"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Value;

    #[test]
    fn truthiness() {
        assert!(Value::from(-3).is_truthy());
        assert!(!Value::Integer(0).is_truthy());
        assert!(!Value::Unit.is_truthy());
    }
}
