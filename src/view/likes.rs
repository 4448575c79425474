/// Outcome of toggling a title in the like-set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeChange {
    Liked,
    Unliked,
}

/// Titles the user has liked this session
///
/// Membership is what matters; the insertion order is kept only so the titles go out
/// to the recommendation service in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LikedSet {
    titles: Vec<String>,
}

impl LikedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the title if absent, removes it if present
    pub fn toggle(&mut self, title: &str) -> LikeChange {
        if let Some(pos) = self.titles.iter().position(|t| t == title) {
            self.titles.remove(pos);
            LikeChange::Unliked
        } else {
            self.titles.push(title.to_string());
            LikeChange::Liked
        }
    }

    pub fn contains(&self, title: &str) -> bool {
        self.titles.iter().any(|t| t == title)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Materializes the set as the ordered list sent with a recommendation request
    pub fn to_request_list(&self) -> Vec<String> {
        self.titles.clone()
    }

    pub fn clear(&mut self) {
        self.titles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut likes = LikedSet::new();
        assert_eq!(likes.toggle("Dune"), LikeChange::Liked);
        assert!(likes.contains("Dune"));
        assert_eq!(likes.toggle("Dune"), LikeChange::Unliked);
        assert!(!likes.contains("Dune"));
        assert!(likes.is_empty());
    }

    #[test]
    fn test_double_toggle_restores_membership() {
        let mut likes = LikedSet::new();
        likes.toggle("Emma");
        likes.toggle("Persuasion");
        let before = likes.clone();

        likes.toggle("Dune");
        likes.toggle("Dune");
        assert_eq!(likes, before);

        likes.toggle("Emma");
        likes.toggle("Emma");
        assert_eq!(likes.len(), 2);
        assert!(likes.contains("Emma"));
        assert!(likes.contains("Persuasion"));
    }

    #[test]
    fn test_request_list_keeps_insertion_order() {
        let mut likes = LikedSet::new();
        likes.toggle("C");
        likes.toggle("A");
        likes.toggle("B");
        likes.toggle("A");
        assert_eq!(likes.to_request_list(), vec!["C", "B"]);
    }

    #[test]
    fn test_clear() {
        let mut likes = LikedSet::new();
        likes.toggle("Dune");
        likes.clear();
        assert!(likes.is_empty());
    }
}
