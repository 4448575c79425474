/// Viewport-driven image loading
///
/// Each mounted image walks `Idle -> Loading -> Loaded | Failed`. While idle, its
/// container is watched by a [`VisibilityNotifier`]; the first report that it is within
/// the root margin of the viewport starts the load and releases the watch. URLs that
/// already loaded this session skip the watch and render immediately.
use std::fmt::Display;
use std::sync::Arc;

use uuid::Uuid;

use crate::cache::ImageCache;
use crate::models::Book;

/// Start loading when the container is this close to the viewport
pub const ROOT_MARGIN_PX: u32 = 100;

/// Text shown in place of an image that has not started loading
pub const LOADING_PLACEHOLDER: &str = "Loading...";

const CARD_FALLBACK_URL: &str = "https://via.placeholder.com/120x180?text=No+Image";
const DETAIL_FALLBACK_URL: &str = "https://via.placeholder.com/150x200?text=No+Image";

/// Identity of the element that hosts an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(Uuid);

impl ElementId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Live visibility watch; dropping it stops the watch
pub struct Observation {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Observation {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }
}

impl Drop for Observation {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

/// Platform hook reporting when an element nears the viewport
///
/// After `observe`, the platform delivers intersection reports for `element` to
/// [`LazyImage::on_intersection`] until the returned [`Observation`] is dropped.
pub trait VisibilityNotifier: Send + Sync {
    fn observe(&self, element: ElementId, root_margin_px: u32) -> Observation;
}

/// Where an image is shown; decides the fallback and URL handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlot {
    Card,
    Detail,
}

impl ImageSlot {
    pub fn fallback_url(self) -> &'static str {
        match self {
            ImageSlot::Card => CARD_FALLBACK_URL,
            ImageSlot::Detail => DETAIL_FALLBACK_URL,
        }
    }

    /// Image URL for `book` in this slot
    pub fn source(self, book: &Book) -> String {
        match self {
            ImageSlot::Card => book.image_url.clone(),
            ImageSlot::Detail => book.secure_image_url(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// What the renderer should draw for an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageDisplay<'a> {
    /// Placeholder text; no request issued yet
    Placeholder(&'static str),
    /// Request in flight; the element exists but stays hidden
    Pending { src: &'a str },
    Image { src: &'a str },
}

/// One mounted image
pub struct LazyImage {
    element: ElementId,
    src: String,
    fallback: String,
    state: LoadState,
    cache: ImageCache,
    observation: Option<Observation>,
}

impl LazyImage {
    pub fn mount(
        src: impl Into<String>,
        fallback: impl Into<String>,
        cache: &ImageCache,
        notifier: &dyn VisibilityNotifier,
        root_margin_px: u32,
    ) -> Self {
        let src = src.into();
        let element = ElementId::new();

        let (state, observation) = if cache.contains(&src) {
            tracing::trace!(src = %src, "Image already cached, rendering immediately");
            (LoadState::Loaded, None)
        } else {
            (LoadState::Idle, Some(notifier.observe(element, root_margin_px)))
        };

        Self {
            element,
            src,
            fallback: fallback.into(),
            state,
            cache: cache.clone(),
            observation,
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_observing(&self) -> bool {
        self.observation.is_some()
    }

    /// Handles a visibility report; returns `true` when the image request should start
    pub fn on_intersection(&mut self, is_intersecting: bool) -> bool {
        if !is_intersecting || self.state != LoadState::Idle {
            return false;
        }
        self.observation = None;
        self.state = LoadState::Loading;
        tracing::trace!(element = %self.element, src = %self.src, "Image entered viewport");
        true
    }

    /// The image decoded successfully
    pub fn on_load(&mut self) {
        if self.state != LoadState::Loading {
            return;
        }
        self.cache.mark_loaded(&self.src);
        self.state = LoadState::Loaded;
    }

    /// The image failed to load; switches to the fallback for good
    pub fn on_error(&mut self) {
        if self.state != LoadState::Loading {
            return;
        }
        tracing::warn!(src = %self.src, "Failed to load image");
        self.state = LoadState::Failed;
    }

    pub fn display(&self) -> ImageDisplay<'_> {
        match self.state {
            LoadState::Idle => ImageDisplay::Placeholder(LOADING_PLACEHOLDER),
            LoadState::Loading => ImageDisplay::Pending { src: &self.src },
            LoadState::Loaded => ImageDisplay::Image { src: &self.src },
            LoadState::Failed => ImageDisplay::Image {
                src: &self.fallback,
            },
        }
    }

    /// Tears the image down, releasing any outstanding watch
    pub fn unmount(self) {}
}

/// Mounts images against one session cache and one notifier
#[derive(Clone)]
pub struct ImageLoader {
    cache: ImageCache,
    notifier: Arc<dyn VisibilityNotifier>,
    root_margin_px: u32,
}

impl ImageLoader {
    pub fn new(cache: ImageCache, notifier: Arc<dyn VisibilityNotifier>, root_margin_px: u32) -> Self {
        Self {
            cache,
            notifier,
            root_margin_px,
        }
    }

    pub fn cache(&self) -> &ImageCache {
        &self.cache
    }

    pub fn mount(&self, book: &Book, slot: ImageSlot) -> LazyImage {
        LazyImage::mount(
            slot.source(book),
            slot.fallback_url(),
            &self.cache,
            self.notifier.as_ref(),
            self.root_margin_px,
        )
    }
}
