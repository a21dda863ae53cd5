use std::{collections::BTreeMap, fmt};

///
/// ErrorTree
///
/// Route-keyed aggregation of validation failures. Routes identify the
/// offending node (entity path, field path); messages under the empty route
/// are schema-wide.
///

#[derive(Debug, Default)]
pub struct ErrorTree {
    entries: BTreeMap<String, Vec<String>>,
}

impl ErrorTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a schema-wide error under the root route.
    pub fn add(&mut self, err: impl fmt::Display) {
        self.add_at("", err);
    }

    /// Add an error under a specific route.
    pub fn add_at(&mut self, route: impl Into<String>, err: impl fmt::Display) {
        self.entries
            .entry(route.into())
            .or_default()
            .push(err.to_string());
    }

    /// Merge another tree into this one, prefixing its routes.
    pub fn merge(&mut self, route: &str, other: Self) {
        for (sub, messages) in other.entries {
            let key = if sub.is_empty() {
                route.to_string()
            } else {
                format!("{route}.{sub}")
            };
            self.entries.entry(key).or_default().extend(messages);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of collected messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Resolve into a `Result`, consuming the tree.
    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (route, messages) in &self.entries {
            for message in messages {
                if !first {
                    writeln!(f)?;
                }
                first = false;
                if route.is_empty() {
                    write!(f, "{message}")?;
                } else {
                    write!(f, "{route}: {message}")?;
                }
            }
        }

        Ok(())
    }
}

impl std::error::Error for ErrorTree {}

// err
// push a formatted error onto an ErrorTree
#[macro_export]
macro_rules! err {
    ($errs:expr, $($arg:tt)*) => {
        $errs.add(format!($($arg)*))
    };
}
