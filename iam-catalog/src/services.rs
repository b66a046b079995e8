//! Action constants and ARN builders for each service
//!
//! Generated at build time from the data files in `resources/services`. Each
//! service gets a module with an `actions` module of `"<service>:<Action>"`
//! constants, an `ALL_ACTIONS` table, and a `resources` module holding one
//! builder function per resource type:
//!
//! ```
//! use iam_catalog::services::frauddetector::resources::{detector, DetectorArn};
//!
//! let arn = detector(&DetectorArn {
//!     region: Some("us-east-1"),
//!     resource_path: Some("myDetector"),
//!     ..Default::default()
//! });
//! assert_eq!(arn, "arn:*:frauddetector:us-east-1:*:detector/myDetector");
//! ```
#![allow(clippy::doc_markdown, clippy::needless_lifetimes)]

include!(concat!(env!("OUT_DIR"), "/services.rs"));
