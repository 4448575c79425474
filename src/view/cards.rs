/// Display projections of books for a renderer
use crate::models::Book;

use super::likes::LikedSet;
use super::pagination::{PageIndicator, Paginator};

const CARD_TITLE_MAX: usize = 30;
const CARD_META_MAX: usize = 20;
const LIKED_TITLE_MAX: usize = 50;
const DESCRIPTION_MAX: usize = 1250;

/// Shortens `text` to `max_chars` characters followed by "..."
///
/// Empty text becomes "Untitled".
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.is_empty() {
        return "Untitled".to_string();
    }
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn or_unknown(text: &str, max_chars: usize) -> String {
    if text.is_empty() {
        "Unknown".to_string()
    } else {
        truncate_text(text, max_chars)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookCard {
    /// Identity key, used to route like/select actions back
    pub key: String,
    pub title: String,
    pub authors: String,
    pub categories: String,
    pub image_url: String,
    pub liked: bool,
    pub like_label: &'static str,
}

impl BookCard {
    pub fn new(book: &Book, liked: bool) -> Self {
        Self {
            key: book.key().to_string(),
            title: truncate_text(&book.title, CARD_TITLE_MAX),
            authors: or_unknown(&book.authors, CARD_META_MAX),
            categories: or_unknown(&book.categories, CARD_META_MAX),
            image_url: book.image_url.clone(),
            liked,
            like_label: if liked { "Unlike" } else { "Like" },
        }
    }
}

/// One paged row of cards with its navigation state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelfView {
    pub cards: Vec<BookCard>,
    pub indicator: Option<PageIndicator>,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

impl ShelfView {
    pub fn new(pages: &Paginator<Book>, likes: &LikedSet) -> Self {
        Self {
            cards: pages
                .page_items()
                .iter()
                .map(|book| BookCard::new(book, likes.contains(book.key())))
                .collect(),
            indicator: pages.indicator(),
            can_go_previous: pages.has_previous(),
            can_go_next: pages.has_next(),
        }
    }
}

/// Contents of the detail panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDetail {
    pub title: String,
    pub authors: String,
    pub categories: String,
    pub image_url: String,
    description: String,
    expanded: bool,
}

impl BookDetail {
    pub fn new(book: &Book) -> Self {
        Self {
            title: if book.title.is_empty() {
                "Untitled Book".to_string()
            } else {
                book.title.clone()
            },
            authors: or_unknown(&book.authors, CARD_META_MAX),
            categories: or_unknown(&book.categories, CARD_META_MAX),
            image_url: book.secure_image_url(),
            description: book.description.clone(),
            expanded: false,
        }
    }

    pub fn is_truncatable(&self) -> bool {
        self.description.chars().count() > DESCRIPTION_MAX
    }

    /// Description as currently shown, collapsed unless expanded
    pub fn description(&self) -> String {
        if self.expanded || !self.is_truncatable() {
            return self.description.clone();
        }
        truncate_text(&self.description, DESCRIPTION_MAX)
    }

    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
    }

    /// Label for the expand button, absent when the description fits
    pub fn toggle_label(&self) -> Option<&'static str> {
        if !self.is_truncatable() {
            return None;
        }
        Some(if self.expanded { "Show Less" } else { "Read More" })
    }
}

/// The liked-books sidebar with its action button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikedPanel {
    pub titles: Vec<String>,
    pub button_label: &'static str,
    pub button_enabled: bool,
}

impl LikedPanel {
    pub fn new(likes: &LikedSet, loading: bool) -> Self {
        Self {
            titles: likes
                .titles()
                .iter()
                .map(|t| truncate_text(t, LIKED_TITLE_MAX))
                .collect(),
            button_label: if loading {
                "Loading..."
            } else {
                "Calculate Recommendations"
            },
            button_enabled: !loading && !likes.is_empty(),
        }
    }
}
