pub mod catalogue;
pub mod crawler;
pub mod web;

pub use catalogue::Catalogue;
pub use crawler::PageFetcher;
pub use web::HttpFetcher;
