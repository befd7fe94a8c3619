//! Search engine scrapers.
//!
//! Each module turns a query into a results-page URL and parses the
//! organic result links out of the returned HTML.

pub mod duckduckgo;
