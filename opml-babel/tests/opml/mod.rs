//! OPML format tests
//!
//! Tests for OPML ↔ canonical tree conversion.

mod export;
mod import;
mod roundtrip;
