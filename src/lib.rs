//! Path manipulation for S3 object storage.
//!
//! [`S3Path`] is an immutable value type for a location in an S3 namespace:
//! a bucket plus a `/`-delimited key, or a bare relative key fragment. It
//! parses, joins, and decomposes paths entirely offline - bring your own
//! storage client and hand it [`S3Path::bucket`] and [`S3Path::key`] when
//! you actually need to talk to S3.
//!
//! ```
//! use s3_path::S3Path;
//!
//! let logs = S3Path::parse("s3://my-bucket/logs");
//! let today = &logs / "2024/01/15.json";
//!
//! assert_eq!(today.bucket().unwrap(), "my-bucket");
//! assert_eq!(today.key(), "logs/2024/01/15.json");
//! assert_eq!(today.name(), "15.json");
//! assert_eq!(today.parent(), logs / "2024/01");
//! ```
//!
//! Parsing is permissive: repeated, leading, and trailing slashes collapse
//! away rather than erroring, so any string round-trips through its
//! normalized form.

pub mod error;
pub mod path;

mod bucket;

pub use error::Error;
pub use path::S3Path;
