/// Construction-time settings for a [`crate::Filter`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// When set, every field-path key is namespaced under this related record
    /// (`relation__field__lookup` instead of `field__lookup`)
    pub relation: Option<String>,
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_relation(relation: impl Into<String>) -> Self {
        Self {
            relation: Some(relation.into()),
        }
    }
}
