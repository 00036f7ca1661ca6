//! Static asset subsystem.
//!
//! # Data Flow
//! ```text
//! Request path containing '.'
//!     → resolver.rs (navigation check, query strip, path join)
//!     → mime.rs (extension → content type + read mode)
//!     → StaticAsset (bytes + content type) or StaticError
//! ```

pub mod mime;
pub mod resolver;

pub use mime::{ContentClass, MimeType};
pub use resolver::{
    is_asset_path, is_browser_navigation, strip_query, StaticAsset, StaticError, StaticResolver,
};
