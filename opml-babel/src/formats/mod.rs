//! Format implementations
//!
//! This module contains all format implementations that convert between
//! the canonical outline tree and various text representations.

pub mod common;
pub mod icons;
pub mod json;
pub mod opml;
pub mod treeviz;

pub use json::JsonFormat;
pub use opml::{ExportOptions, OpmlFormat};
pub use treeviz::TreevizFormat;
