//! cireview GitHub - GitHub integration for cireview
//!
//! This crate recognizes GitHub repository locators and retrieves README
//! content from the raw-content host on a best-effort basis.

mod error;
pub mod readme;
pub mod repo_ref;
pub mod transport;

pub use error::{Error, Result};
pub use readme::{Attempt, ReadmeFetcher, ReadmeResult, CANDIDATE_BRANCHES};
pub use repo_ref::RepositoryReference;
pub use transport::{HttpRawSource, RawContentSource, RawResponse};
