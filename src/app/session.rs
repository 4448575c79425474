use std::fmt::Display;
use std::num::NonZeroUsize;
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    cache::ImageCache,
    config::Config,
    error::{AppError, AppResult},
    models::Book,
    services::BookService,
    view::{
        BookDetail, ImageLoader, LikeChange, LikedPanel, LikedSet, Paginator, SelectionController,
        ShelfView, VisibilityNotifier,
    },
};

use super::notify::{UserNotifier, EMPTY_LIKES_MESSAGE, RECOMMENDATIONS_FAILED_MESSAGE};

const CATALOG_FAILED_MESSAGE: &str = "Failed to load books. Please try again.";

/// The two independently paged rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shelf {
    Catalog,
    Recommendations,
}

/// Catalog lifecycle as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogStatus {
    Loading,
    Failed(String),
    /// Loaded, but the service had no books
    Empty,
    Ready,
}

impl CatalogStatus {
    /// Full-page message replacing the shelves, if any
    pub fn message(&self) -> Option<String> {
        match self {
            CatalogStatus::Loading => Some("Loading books...".to_string()),
            CatalogStatus::Failed(error) => Some(format!("Error: {}", error)),
            CatalogStatus::Empty => Some("No books found. Please check the database.".to_string()),
            CatalogStatus::Ready => None,
        }
    }
}

/// Identifies one recommendation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(Uuid);

impl Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An issued recommendation request awaiting its response
#[derive(Debug, Clone)]
pub struct RecommendationTicket {
    pub token: RequestToken,
    pub liked_titles: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationOutcome {
    /// Results shown, like-set cleared
    Applied { count: usize },
    /// Request failed; user notified, like-set untouched
    Failed,
    /// A newer request was issued before this one finished; result dropped
    Superseded,
    /// Nothing was liked; no request made
    Rejected,
}

/// Per-session view state
///
/// Owns both shelves, the like-set, the selection and the image cache. State lives
/// only as long as the session; nothing is persisted.
///
/// Overlapping recommendation requests resolve in favour of the most recently
/// issued one: earlier responses that arrive later are discarded, so they can
/// neither overwrite newer results nor clear the like-set.
pub struct Session {
    service: Arc<dyn BookService>,
    notifier: Arc<dyn UserNotifier>,
    catalog_status: CatalogStatus,
    catalog: Paginator<Book>,
    recommendations: Paginator<Book>,
    likes: LikedSet,
    selection: SelectionController,
    images: ImageCache,
    root_margin_px: u32,
    pending_request: Option<RequestToken>,
}

impl Session {
    /// Must be called from within a tokio runtime
    pub fn new(
        config: &Config,
        service: Arc<dyn BookService>,
        notifier: Arc<dyn UserNotifier>,
    ) -> Self {
        let page_size = NonZeroUsize::new(config.page_size).unwrap_or(NonZeroUsize::MIN);

        Self {
            service,
            notifier,
            catalog_status: CatalogStatus::Loading,
            catalog: Paginator::new(page_size),
            recommendations: Paginator::new(page_size),
            likes: LikedSet::new(),
            selection: SelectionController::new(config.select_debounce()),
            images: ImageCache::new(),
            root_margin_px: config.image_root_margin_px,
            pending_request: None,
        }
    }

    // Catalog

    /// Fetches the catalog into the catalog shelf
    pub async fn load_catalog(&mut self) -> &CatalogStatus {
        self.catalog_status = CatalogStatus::Loading;

        match self.service.fetch_catalog().await {
            Ok(books) => {
                self.catalog_status = if books.is_empty() {
                    CatalogStatus::Empty
                } else {
                    CatalogStatus::Ready
                };
                self.catalog.set_items(books);
                tracing::info!(
                    books = self.catalog.len(),
                    pages = self.catalog.total_pages(),
                    "Catalog loaded"
                );
            }
            Err(e) => {
                tracing::error!(error = %e, provider = self.service.name(), "Error fetching books");
                self.catalog_status = CatalogStatus::Failed(CATALOG_FAILED_MESSAGE.to_string());
            }
        }

        &self.catalog_status
    }

    pub fn catalog_status(&self) -> &CatalogStatus {
        &self.catalog_status
    }

    // Shelves

    pub fn pages(&self, shelf: Shelf) -> &Paginator<Book> {
        match shelf {
            Shelf::Catalog => &self.catalog,
            Shelf::Recommendations => &self.recommendations,
        }
    }

    fn pages_mut(&mut self, shelf: Shelf) -> &mut Paginator<Book> {
        match shelf {
            Shelf::Catalog => &mut self.catalog,
            Shelf::Recommendations => &mut self.recommendations,
        }
    }

    pub fn next_page(&mut self, shelf: Shelf) -> bool {
        self.pages_mut(shelf).next()
    }

    pub fn previous_page(&mut self, shelf: Shelf) -> bool {
        self.pages_mut(shelf).previous()
    }

    pub fn shelf(&self, shelf: Shelf) -> ShelfView {
        ShelfView::new(self.pages(shelf), &self.likes)
    }

    /// The recommendation shelf is only shown once it has something in it
    pub fn has_recommendations(&self) -> bool {
        !self.recommendations.is_empty()
    }

    // Likes

    pub fn toggle_like(&mut self, title: &str) -> LikeChange {
        let change = self.likes.toggle(title);
        tracing::debug!(title = %title, change = ?change, liked = self.likes.len(), "Like toggled");
        change
    }

    pub fn likes(&self) -> &LikedSet {
        &self.likes
    }

    pub fn liked_panel(&self) -> LikedPanel {
        LikedPanel::new(&self.likes, self.is_loading_recommendations())
    }

    // Selection

    /// Debounced; see [`SelectionController`]
    pub fn select(&self, book: Book) {
        self.selection.select(book);
    }

    /// Selects the book with `key` on the current page of `shelf`
    pub fn select_on_shelf(&self, shelf: Shelf, key: &str) -> bool {
        match self.pages(shelf).page_items().iter().find(|b| b.key() == key) {
            Some(book) => {
                self.selection.select(book.clone());
                true
            }
            None => false,
        }
    }

    pub fn selected(&self) -> Option<Book> {
        self.selection.selected()
    }

    pub fn selected_detail(&self) -> Option<BookDetail> {
        self.selection.selected().as_ref().map(BookDetail::new)
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    // Images

    pub fn image_cache(&self) -> &ImageCache {
        &self.images
    }

    /// Loader sharing this session's image cache
    pub fn image_loader(&self, visibility: Arc<dyn VisibilityNotifier>) -> ImageLoader {
        ImageLoader::new(self.images.clone(), visibility, self.root_margin_px)
    }

    // Recommendations

    pub fn is_loading_recommendations(&self) -> bool {
        self.pending_request.is_some()
    }

    /// Issues a recommendation request for the current like-set
    ///
    /// With nothing liked the user is told so and no request is made.
    pub fn begin_recommendations(&mut self) -> AppResult<RecommendationTicket> {
        if self.likes.is_empty() {
            self.notifier.notify(EMPTY_LIKES_MESSAGE);
            return Err(AppError::EmptyInput);
        }

        let token = RequestToken(Uuid::new_v4());
        if let Some(previous) = self.pending_request.replace(token) {
            tracing::debug!(previous = %previous, token = %token, "Superseding pending recommendation request");
        }

        Ok(RecommendationTicket {
            token,
            liked_titles: self.likes.to_request_list(),
        })
    }

    /// Applies the response for `ticket`, unless a newer request has been issued
    pub fn finish_recommendations(
        &mut self,
        ticket: &RecommendationTicket,
        result: AppResult<Vec<Book>>,
    ) -> RecommendationOutcome {
        if self.pending_request != Some(ticket.token) {
            tracing::info!(token = %ticket.token, "Discarding stale recommendation response");
            return RecommendationOutcome::Superseded;
        }
        self.pending_request = None;

        match result {
            Ok(books) => {
                let count = books.len();
                self.recommendations.reset_items(books);
                self.likes.clear();
                tracing::info!(count, "Recommendations applied");
                RecommendationOutcome::Applied { count }
            }
            Err(e) => {
                tracing::error!(error = %e, kind = ?e.kind(), "Error fetching recommendations");
                self.notifier.notify(RECOMMENDATIONS_FAILED_MESSAGE);
                RecommendationOutcome::Failed
            }
        }
    }

    /// Gives up on `ticket` without a response, clearing the loading flag if it is
    /// still the latest request
    pub fn abandon_recommendations(&mut self, ticket: &RecommendationTicket) -> bool {
        if self.pending_request != Some(ticket.token) {
            return false;
        }
        self.pending_request = None;
        tracing::info!(token = %ticket.token, "Recommendation request abandoned");
        true
    }

    /// Requests recommendations for the like-set and applies the result
    ///
    /// Dropping the returned future before it completes abandons the request.
    pub async fn compute_recommendations(&mut self) -> RecommendationOutcome {
        let ticket = match self.begin_recommendations() {
            Ok(ticket) => ticket,
            Err(_) => return RecommendationOutcome::Rejected,
        };

        let service = Arc::clone(&self.service);
        let guard = AbandonOnDrop {
            session: self,
            ticket: &ticket,
        };

        let result = service.fetch_recommendations(&ticket.liked_titles).await;

        guard.session.finish_recommendations(&ticket, result)
    }
}

// Clears the loading flag of an in-flight request whose future was dropped.
// After `finish_recommendations` has run the token no longer matches, so this is
// a no-op on the normal path.
struct AbandonOnDrop<'a> {
    session: &'a mut Session,
    ticket: &'a RecommendationTicket,
}

impl Drop for AbandonOnDrop<'_> {
    fn drop(&mut self) {
        self.session.abandon_recommendations(self.ticket);
    }
}
