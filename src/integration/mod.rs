//! API integration module
//!
//! Resolves integration objects against live REST endpoints and writes the
//! outcome back into their `dataReturn` field.
//!
//! # Failure classes
//!
//! - **Validation**: missing or malformed input, nothing was sent
//! - **Network**: the transport failed
//! - **Http**: the endpoint answered with a non-2xx status
//! - **Extraction**: the JSONPath was invalid or matched nothing
//!
//! All of them are returned as [`IntegrationError`] values.

mod descriptor;
mod extract;
mod resolver;
mod types;

pub use descriptor::{IntegrationDescriptor, API_URL_KEY, DATA_RETURN_KEY, JSON_PATH_KEY};
pub use extract::{extract, is_definite, normalize_path};
pub use resolver::{Fetcher, Resolver};
pub use types::IntegrationError;
