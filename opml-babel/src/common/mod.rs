//! Contains logic shared across formats that works on the canonical tree.

pub mod visit;
