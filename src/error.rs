/// Errors returned by path operations.
///
/// Parsing never fails - malformed input normalizes instead. Only bucket
/// access on a bucket-less path and explicit bucket-name validation can
/// error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The path carries no bucket: it is relative or has no segments.
    #[error("cannot compute the bucket of a relative or empty path")]
    InvalidBucketAccess,

    /// A supplied bucket name does not satisfy the S3 naming rules.
    #[error("{name:?} is not a valid bucket name")]
    InvalidBucket {
        /// The rejected name
        name: String,
    },
}
