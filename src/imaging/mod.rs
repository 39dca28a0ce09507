//! Image decode/encode — pure Rust, zero external dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Format hint** | extension table, exactly jpg/png/gif |
//! | **Decode** | `image` crate, dispatched on the hint |
//! | **Fit math** | [`fit_within`] (pure, unit testable) |
//! | **Encode** | `JpegEncoder`, default quality |
//!
//! The module is split into:
//! - **Format**: extension → [`ImageKind`] hint
//! - **Calculations**: pure bounding-box math
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod calculations;
pub mod format;
pub mod rust_backend;

pub use backend::{ImageBackend, ImagingError};
pub use calculations::fit_within;
pub use format::{ImageKind, is_image_path};
pub use rust_backend::RustBackend;
