//! Page-level views.

pub mod landing;

pub use landing::LandingPage;
