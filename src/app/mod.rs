pub mod notify;
pub mod session;

pub use notify::{LogNotifier, UserNotifier};
pub use session::{CatalogStatus, RecommendationOutcome, RecommendationTicket, Session, Shelf};
