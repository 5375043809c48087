/// Ids of the tracks the user has liked, in the order they were liked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LikeSet {
    ids: Vec<String>,
}

impl LikeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from stored ids, dropping duplicates but keeping the
    /// first occurrence's position.
    pub fn from_ids(ids: impl IntoIterator<Item = String>) -> Self {
        let mut set = Self::new();
        for id in ids {
            if !set.contains(&id) {
                set.ids.push(id);
            }
        }
        set
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i == id)
    }

    /// Flips membership of `id`. Returns whether it is liked afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.remove(id) {
            false
        } else {
            self.ids.push(id.to_string());
            true
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|i| i != id);
        self.ids.len() != before
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
