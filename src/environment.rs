use rustc_hash::FxHashMap;
use std::rc::Rc;

/// Program state: a single flat scope of numeric variables.
///
/// Blocks do not introduce scopes. An assignment anywhere in a program
/// is visible everywhere after it, and the bindings outlive a single run so
/// that a REPL can carry them from one line to the next.
#[derive(Debug, PartialEq, Default, Clone)]
pub struct Environment {
    vars: FxHashMap<Rc<str>, f64>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<f64> {
        self.vars.get(id).copied()
    }

    pub fn set(&mut self, id: Rc<str>, val: f64) {
        self.vars.insert(id, val);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.vars.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn clear(&mut self) {
        self.vars.clear();
    }

    /// Bindings ordered by name, for listing.
    pub fn iter_sorted(&self) -> impl Iterator<Item = (&str, f64)> {
        let mut entries = self.vars.iter().map(|(k, v)| (&**k, *v)).collect::<Vec<_>>();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }
}
