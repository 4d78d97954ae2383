//! Collector-Common: shared types and error handling.
//!
//! - **Core Types**: [`MediaType`], the two catalog kinds the collector handles
//! - **Error Handling**: common error type and result alias
//!
//! # Examples
//!
//! ```
//! use collector_common::{Error, MediaType};
//!
//! let media: MediaType = "tv".parse().unwrap();
//! assert_eq!(media.api_path(), "tv");
//!
//! let err = "anime".parse::<MediaType>().unwrap_err();
//! assert!(matches!(err, Error::InvalidInput(_)));
//! ```

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
