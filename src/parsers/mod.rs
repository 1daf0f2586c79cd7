pub mod html;


pub use html::{ListingSelectors, extract_records, extract_records_with};
