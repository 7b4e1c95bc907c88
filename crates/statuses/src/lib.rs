//! Shape validation and message rendering for homework status payloads.
//!
//! The API client hands over raw JSON without interpreting it; `validate`
//! asserts the envelope shape and `format` lifts individual records into the
//! chat messages announced to the user.

pub mod format;
pub mod validate;
