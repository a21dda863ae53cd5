///
/// Store names
///
/// Entities are assigned to a named backing store. Everything defaults to the
/// main store; additional stores are declared through runtime configuration
/// and recorded as a class annotation during the build.
///

pub const MAIN_STORE: &str = "main";

///
/// Stores
///

#[derive(Clone, Debug, Default)]
pub struct Stores {
    additional: Vec<String>,
}

impl Stores {
    #[must_use]
    pub fn new(additional: Vec<String>) -> Self {
        Self { additional }
    }

    #[must_use]
    pub fn additional(&self) -> &[String] {
        &self.additional
    }

    #[must_use]
    pub fn has_additional(&self) -> bool {
        !self.additional.is_empty()
    }

    #[must_use]
    pub fn is_main(name: &str) -> bool {
        name == MAIN_STORE
    }

    /// True for the main store or any configured additional store.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        Self::is_main(name) || self.additional.iter().any(|s| s == name)
    }
}
