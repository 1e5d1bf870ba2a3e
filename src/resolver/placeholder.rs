use std::collections::HashMap;

/// Marker that opens every placeholder name
pub const SENTINEL: &str = "#Q";

/// Predicates computed for parenthesized groups, keyed by the synthetic name
/// spliced into the expression in their place.
///
/// Names are numbered from a counter that is never reset during a single
/// resolution, so a name bound in one pass can't shadow one still embedded
/// from an earlier pass.
#[derive(Debug)]
pub struct PlaceholderMap<P> {
    bound: HashMap<String, P>,
    next: usize,
}

impl<P> Default for PlaceholderMap<P> {
    fn default() -> Self {
        Self {
            bound: HashMap::new(),
            next: 0,
        }
    }
}

impl<P> PlaceholderMap<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `predicate` to a fresh name and return the name
    pub fn bind(&mut self, predicate: P) -> String {
        let name = format!("{}{}", SENTINEL, self.next);
        self.next += 1;
        self.bound.insert(name.clone(), predicate);
        name
    }

    /// Remove and return the predicate bound to `name`. Each name is spliced
    /// into the expression exactly once, so it is consumed exactly once.
    pub fn take(&mut self, name: &str) -> Option<P> {
        self.bound.remove(name)
    }

    pub fn len(&self) -> usize {
        self.bound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }

    /// True if `text` starts with the sentinel followed by a digit
    pub fn is_placeholder(text: &str) -> bool {
        text.trim()
            .strip_prefix(SENTINEL)
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| c.is_ascii_digit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_sequential_and_consumed_once() {
        let mut map = PlaceholderMap::new();
        assert_eq!(map.bind(1), "#Q0");
        assert_eq!(map.bind(2), "#Q1");
        assert_eq!(map.take("#Q1"), Some(2));
        assert_eq!(map.take("#Q1"), None);
        assert_eq!(map.bind(3), "#Q2");
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_is_placeholder() {
        assert!(PlaceholderMap::<()>::is_placeholder("#Q0"));
        assert!(PlaceholderMap::<()>::is_placeholder("  #Q12 "));
        assert!(!PlaceholderMap::<()>::is_placeholder("#Q"));
        assert!(!PlaceholderMap::<()>::is_placeholder("#Qx"));
        assert!(!PlaceholderMap::<()>::is_placeholder("q0"));
    }
}
