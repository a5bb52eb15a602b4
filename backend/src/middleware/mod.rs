//! Request middleware.
//!
//! Purpose: request lifecycle concerns that sit outside the handlers. The
//! error boundary must be the outermost wrapper so it sees panics and the
//! responses of every other layer.

pub mod error_boundary;
pub mod observer;

pub use error_boundary::ErrorBoundary;
pub use observer::RequestObserver;
