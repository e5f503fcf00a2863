//! Git hooks keyed by hook name.

/// One git hook and the commands it runs, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookEntry {
    /// Hook name as git knows it (e.g. `pre-commit`).
    pub name: String,
    /// Shell lines appended to the hook script, in order.
    pub commands: Vec<String>,
}

impl HookEntry {
    /// Create a hook entry.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            commands: commands.into_iter().map(Into::into).collect(),
        }
    }
}

/// Ordered set of hooks, unique by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookRegistry {
    entries: Vec<HookEntry>,
}

impl HookRegistry {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert `entry`, replacing (in place) any hook with the same name.
    pub fn insert(&mut self, entry: HookEntry) -> Option<HookEntry> {
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(slot) => Some(std::mem::replace(slot, entry)),
            None => {
                self.entries.push(entry);
                None
            }
        }
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, entry: HookEntry) -> Self {
        self.insert(entry);
        self
    }

    /// Remove the hook called `name`.
    pub fn remove(&mut self, name: &str) -> Option<HookEntry> {
        let index = self.entries.iter().position(|e| e.name == name)?;
        Some(self.entries.remove(index))
    }

    /// Look up the hook called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&HookEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Iterate over hooks in installation order.
    pub fn iter(&self) -> std::slice::Iter<'_, HookEntry> {
        self.entries.iter()
    }

    /// Hook names in installation order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Number of hooks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the registry has no hooks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a HookRegistry {
    type Item = &'a HookEntry;
    type IntoIter = std::slice::Iter<'a, HookEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<HookEntry> for HookRegistry {
    fn from_iter<I: IntoIterator<Item = HookEntry>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), Self::with)
    }
}
