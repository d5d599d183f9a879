/// Ordered list of website features with no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureList {
    items: Vec<String>,
}

impl FeatureList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a trimmed entry. Empty and already-present entries leave the
    /// list unchanged and return `false`.
    pub fn add(&mut self, entry: &str) -> bool {
        let entry = entry.trim();
        if entry.is_empty() || self.contains(entry) {
            return false;
        }
        self.items.push(entry.to_string());
        true
    }

    pub fn remove(&mut self, index: usize) -> Option<String> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.items.iter().any(|i| i == entry)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Wire encoding for `fitur_website`: a JSON array string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.items).unwrap_or_else(|_| "[]".to_string())
    }
}

impl<S: AsRef<str>> FromIterator<S> for FeatureList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = Self::new();
        for entry in iter {
            list.add(entry.as_ref());
        }
        list
    }
}

/// Text box plus list: the draft is committed with the add button or Enter.
#[derive(Debug, Clone, Default)]
pub struct FeatureEditor {
    pub draft: String,
    list: FeatureList,
}

impl FeatureEditor {
    pub fn new(list: FeatureList) -> Self {
        Self {
            draft: String::new(),
            list,
        }
    }

    /// Commit the draft. The draft is cleared only when the entry was added.
    pub fn commit(&mut self) -> bool {
        let added = self.list.add(&self.draft);
        if added {
            self.draft.clear();
        }
        added
    }

    /// Type `text` into the box and commit it.
    pub fn add(&mut self, text: &str) -> bool {
        self.draft = text.to_string();
        self.commit()
    }

    pub fn remove(&mut self, index: usize) -> Option<String> {
        self.list.remove(index)
    }

    pub fn list(&self) -> &FeatureList {
        &self.list
    }
}
