use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use super::debounce::Debouncer;
use crate::models::Book;

/// Default quiescence window for selection
pub const SELECT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Tracks the book shown in the detail panel
///
/// Rapid clicks across several cards collapse into a single selection of the last
/// card clicked. Re-selecting the current book (by title) leaves the selection
/// untouched, so watchers see no change.
pub struct SelectionController {
    debouncer: Debouncer<Book>,
    selected: watch::Receiver<Option<Book>>,
}

impl SelectionController {
    /// Must be called from within a tokio runtime
    pub fn new(delay: Duration) -> Self {
        let (tx, selected) = watch::channel(None);

        let debouncer = Debouncer::spawn(
            delay,
            Arc::new(|a: &Book, b: &Book| a.same_book(b)),
            move |book: Book| {
                tracing::debug!(title = %book.title, "Book selected");
                tx.send_replace(Some(book));
            },
        );

        Self {
            debouncer,
            selected,
        }
    }

    /// Requests `book` as the selection once input settles
    pub fn select(&self, book: Book) {
        self.debouncer.call(book);
    }

    /// Drops a selection request that has not settled yet
    pub fn cancel_pending(&self) {
        self.debouncer.cancel();
    }

    pub fn selected(&self) -> Option<Book> {
        self.selected.borrow().clone()
    }

    /// Receiver that is notified on every effective selection change
    pub fn subscribe(&self) -> watch::Receiver<Option<Book>> {
        self.selected.clone()
    }
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new(SELECT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wait_past_window() -> tokio::time::Sleep {
        tokio::time::sleep(SELECT_DEBOUNCE + Duration::from_millis(100))
    }

    #[tokio::test(start_paused = true)]
    async fn test_three_rapid_selections_settle_on_last() {
        let selection = SelectionController::default();
        let mut changes = selection.subscribe();

        selection.select(Book::new("Dune"));
        selection.select(Book::new("Emma"));
        selection.select(Book::new("Ulysses"));
        assert_eq!(selection.selected(), None);

        wait_past_window().await;

        assert!(changes.has_changed().unwrap());
        let settled = changes.borrow_and_update().clone();
        assert_eq!(settled.map(|b| b.title), Some("Ulysses".to_string()));
        assert_eq!(selection.selected().unwrap().title, "Ulysses");
    }

    #[tokio::test(start_paused = true)]
    async fn test_reselecting_same_title_is_noop() {
        let selection = SelectionController::default();
        let mut changes = selection.subscribe();

        selection.select(Book::new("Dune"));
        wait_past_window().await;
        let _ = changes.borrow_and_update();

        let mut same_title = Book::new("Dune");
        same_title.description = "another edition".to_string();
        selection.select(same_title);
        wait_past_window().await;

        assert!(!changes.has_changed().unwrap());
        assert!(selection.selected().unwrap().description.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_pending_keeps_previous_selection() {
        let selection = SelectionController::default();

        selection.select(Book::new("Dune"));
        wait_past_window().await;

        selection.select(Book::new("Emma"));
        selection.cancel_pending();
        wait_past_window().await;

        assert_eq!(selection.selected().unwrap().title, "Dune");
    }
}
