//! Page envelope and listing state primitives shared by catalogue endpoints.
//!
//! The upstream catalogue API paginates every listing with the same
//! `{ info, results }` envelope and one-based page numbers. This crate owns
//! that envelope, the validated [`PageNumber`] type, and [`ListingState`], the
//! page-plus-filters state a listing view mutates through its setters.

mod envelope;
mod listing;
mod page_number;

pub use envelope::{Page, PageInfo};
pub use listing::ListingState;
pub use page_number::{PageNumber, PageNumberError};
