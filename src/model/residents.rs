use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Ordered list of unique resident names. Loaded lists go through [`ResidentList::add`],
/// so blank names and duplicates are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ResidentList(IndexSet<String>);

impl ResidentList {
    pub fn new() -> Self {
        ResidentList(IndexSet::new())
    }

    /// Add a name (trimmed). Returns false for blanks and duplicates.
    pub fn add(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.0.insert(name.to_string())
    }

    /// Remove a name, keeping the order of the rest
    pub fn remove(&mut self, name: &str) -> bool {
        self.0.shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get_index(index).map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for ResidentList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = ResidentList::new();
        for name in iter {
            list.add(name.as_ref());
        }
        list
    }
}

impl From<Vec<String>> for ResidentList {
    fn from(names: Vec<String>) -> Self {
        names.into_iter().collect()
    }
}

impl From<ResidentList> for Vec<String> {
    fn from(list: ResidentList) -> Self {
        list.0.into_iter().collect()
    }
}
