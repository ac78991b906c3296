//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, wildcard GET handler)
//!     → request.rs (request ID)
//!     → routing::resolve (route, mode, format)
//!     → snapshot provider + projection
//!     → response.rs (encode, 200 / 404 contract, content type)
//!     → Send to client
//! ```

pub mod error;
pub mod request;
pub mod response;
pub mod server;

pub use error::ApiError;
pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
