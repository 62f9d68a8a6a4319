//! Catalog client library for cinefeed.
//!
//! Provides a typed client for the TMDB v3 catalog API and the named
//! aggregation operations used by presentation surfaces.

/// TMDB catalog client and aggregation facade.
pub mod catalog;
