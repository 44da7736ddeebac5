//! HTTP client and view controllers for the HR portal onboarding module.
//!
//! [`api::PortalApi`] talks to the backend; [`backend::PortalBackend`] is the
//! seam the views are written against. Views keep the authoritative state
//! returned by the backend, re-fetch after every mutation and report
//! failures through an error banner.

pub mod api;
pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod pending;
pub mod views;

pub use api::PortalApi;
pub use backend::PortalBackend;
pub use cache::{EmployeeDirectory, ReadThroughCache};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
