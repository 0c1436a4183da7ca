//! # sct-client -- Terminology records and traceability client
//!
//! Two surfaces built on top of [`sct_core`]:
//! - **Records** ([`records`]): reference set members and their MRCM
//!   additional fields, as exchanged with terminology servers. A member's
//!   concept id resolves only when the referenced component is a valid
//!   concept identifier.
//! - **Traceability** ([`traceability`]): a cookie-authenticated client for
//!   the traceability service that walks the paginated `activitiesBulk`
//!   endpoint and accumulates every page into one ordered list.
//!
//! ## API Path Convention
//!
//! The traceability service is a Spring Boot application with a context
//! path. The full URL pattern is `{base_url}/traceability-service/{resource}`.

pub mod config;
pub mod error;
pub mod records;
pub(crate) mod retry;
pub mod traceability;

pub use config::{ConfigError, TraceabilityConfig};
pub use error::TraceabilityError;
pub use records::{AdditionalFields, RefsetMember, SnomedComponent};
pub use traceability::{Activity, ActivityPage, ActivityType, TraceabilityClient};
