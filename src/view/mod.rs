pub mod cards;
pub mod debounce;
pub mod lazy_image;
pub mod likes;
pub mod pagination;
pub mod selection;

pub use cards::{truncate_text, BookCard, BookDetail, LikedPanel, ShelfView};
pub use debounce::{Comparator, Debouncer};
pub use lazy_image::{
    ElementId, ImageDisplay, ImageLoader, ImageSlot, LazyImage, LoadState, Observation,
    VisibilityNotifier, LOADING_PLACEHOLDER, ROOT_MARGIN_PX,
};
pub use likes::{LikeChange, LikedSet};
pub use pagination::{PageIndicator, Paginator};
pub use selection::{SelectionController, SELECT_DEBOUNCE};
