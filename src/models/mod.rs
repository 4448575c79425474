mod book;

pub use book::{Book, RecommendationRequest};
