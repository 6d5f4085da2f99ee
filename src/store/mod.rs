//! Repository boundary: the capability trait the engines consume, an
//! in-memory implementation, and the read-only query surface.

pub mod repository;
