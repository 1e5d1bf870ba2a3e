use crate::literal::Literal;

/// Capability interface over a storage backend's predicate objects.
///
/// The resolver never looks inside a predicate: it builds leaves from a
/// field-path key and a value, then only combines and negates them.
pub trait Backend {
    type Predicate;

    /// Separator joining relation, field and lookup into a key, e.g. `__`
    const PATH_SEPARATOR: &'static str;

    fn leaf(&self, key: String, value: Literal) -> Self::Predicate;

    fn and(&self, lhs: Self::Predicate, rhs: Self::Predicate) -> Self::Predicate;

    fn or(&self, lhs: Self::Predicate, rhs: Self::Predicate) -> Self::Predicate;

    fn not(&self, predicate: Self::Predicate) -> Self::Predicate;
}
