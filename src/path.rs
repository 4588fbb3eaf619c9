use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::ops::Div;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::bucket;
use crate::error::Error;

/// URI scheme marking an absolute path.
const SCHEME_PREFIX: &str = "s3://";

/// Represents a relative or absolute path in an S3 namespace
///
/// An absolute path is rooted at a bucket (its first segment); a relative
/// path is a bare key fragment. Values are immutable: every transformation
/// returns a new `S3Path`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct S3Path {
    /// Path segments (e.g., ["bucket", "prefix", "file.txt"])
    parts: Vec<String>,
    /// Whether the first segment names a bucket
    is_absolute: bool,
}

impl S3Path {
    /// Parse a path string into an `S3Path`
    ///
    /// A leading `s3://` marks the path absolute; without it the path is
    /// relative. Repeated, leading, and trailing slashes collapse away, so
    /// any input string is accepted.
    pub fn parse(path: &str) -> Self {
        let (rest, is_absolute) = match path.strip_prefix(SCHEME_PREFIX) {
            Some(rest) => (rest, true),
            None => (path, false),
        };

        S3Path {
            parts: split_segments(rest),
            is_absolute,
        }
    }

    /// Build a path from individual segments
    ///
    /// Segments containing slashes are flattened into their components and
    /// empty segments are dropped, so this converges with [`S3Path::parse`]
    /// on equivalent input.
    pub fn from_parts<I, S>(parts: I, is_absolute: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parts = parts
            .into_iter()
            .flat_map(|part| split_segments(part.as_ref()))
            .collect();

        S3Path { parts, is_absolute }
    }

    /// Build an absolute path pointing at a bucket
    ///
    /// The name is checked against the S3 bucket naming rules.
    pub fn from_bucket(name: &str) -> Result<Self, Error> {
        bucket::validate(name)?;
        Ok(S3Path {
            parts: vec![name.to_string()],
            is_absolute: true,
        })
    }

    /// Get the path segments
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Check if this is an absolute path
    pub fn is_absolute(&self) -> bool {
        self.is_absolute
    }

    /// Check if this path has no segments
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Get the bucket this path is rooted at
    ///
    /// Fails with [`Error::InvalidBucketAccess`] on relative paths (which
    /// are not bucket-aware) and on paths with no segments.
    pub fn bucket(&self) -> Result<&str, Error> {
        if !self.is_absolute {
            return Err(Error::InvalidBucketAccess);
        }
        self.parts
            .first()
            .map(String::as_str)
            .ok_or(Error::InvalidBucketAccess)
    }

    /// Get the S3 key of this path
    ///
    /// For absolute paths this is everything after the bucket; for relative
    /// paths it is the whole path. Empty when no segments apply.
    pub fn key(&self) -> String {
        let start = if self.is_absolute { 1 } else { 0 };
        if self.parts.len() <= start {
            return String::new();
        }
        self.parts[start..].join("/")
    }

    /// Get the last segment (file or folder name), empty if there is none
    pub fn name(&self) -> &str {
        self.parts.last().map(String::as_str).unwrap_or("")
    }

    /// Get the parent path
    ///
    /// Drops the last segment and keeps the absoluteness flag. The parent
    /// of an empty or single-segment path is the empty path with the same
    /// flag.
    pub fn parent(&self) -> S3Path {
        let end = self.parts.len().saturating_sub(1);
        S3Path {
            parts: self.parts[..end].to_vec(),
            is_absolute: self.is_absolute,
        }
    }

    /// Append another path's segments to this one
    ///
    /// The result keeps the left side's absoluteness; the right side's flag
    /// is never consulted. Also available as the `/` operator, which
    /// additionally accepts strings.
    pub fn join(&self, other: &S3Path) -> S3Path {
        let mut parts = self.parts.clone();
        parts.extend_from_slice(&other.parts);
        S3Path {
            parts,
            is_absolute: self.is_absolute,
        }
    }

    /// Reinterpret a relative path as absolute, with its first segment as
    /// the bucket
    ///
    /// Already-absolute paths are returned unchanged. Fails when there is
    /// no first segment or it is not a valid bucket name.
    pub fn to_absolute(&self) -> Result<S3Path, Error> {
        if self.is_absolute {
            return Ok(self.clone());
        }
        let first = self.parts.first().ok_or(Error::InvalidBucketAccess)?;
        bucket::validate(first)?;
        Ok(S3Path {
            parts: self.parts.clone(),
            is_absolute: true,
        })
    }

    /// Produce an absolute path with the given bucket
    ///
    /// Replaces the bucket of an absolute path; prepends one to a relative
    /// path, treating the relative path as a key within that bucket.
    /// Surrounding slashes on the name are stripped before validation.
    pub fn with_bucket(&self, name: &str) -> Result<S3Path, Error> {
        let name = name.trim_matches('/');
        bucket::validate(name)?;

        let tail = if self.is_absolute {
            self.parts.get(1..).unwrap_or(&[])
        } else {
            &self.parts[..]
        };
        let mut parts = Vec::with_capacity(tail.len() + 1);
        parts.push(name.to_string());
        parts.extend_from_slice(tail);

        Ok(S3Path {
            parts,
            is_absolute: true,
        })
    }

    /// Compare segments against a raw string's normalized segments
    ///
    /// A leading `s3://` on the string is ignored, so a path compares equal
    /// to both its prefixed and unprefixed renderings.
    fn cmp_segments(&self, other: &str) -> Ordering {
        let trimmed = other.strip_prefix(SCHEME_PREFIX).unwrap_or(other);
        self.parts
            .iter()
            .map(String::as_str)
            .cmp(trimmed.split('/').filter(|s| !s.is_empty()))
    }
}

/// Split on `/`, dropping the empty segments left by repeated, leading, or
/// trailing slashes.
fn split_segments(input: &str) -> Vec<String> {
    input
        .split('/')
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

impl fmt::Display for S3Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_absolute {
            f.write_str(SCHEME_PREFIX)?;
        }
        f.write_str(&self.parts.join("/"))
    }
}

impl From<&str> for S3Path {
    fn from(path: &str) -> Self {
        S3Path::parse(path)
    }
}

impl From<String> for S3Path {
    fn from(path: String) -> Self {
        S3Path::parse(&path)
    }
}

impl FromStr for S3Path {
    type Err = Infallible;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        Ok(S3Path::parse(path))
    }
}

// String comparisons work over normalized segments, so "s3://bucket/a" and
// "bucket/a" both equal the same absolute path.

impl PartialEq<str> for S3Path {
    fn eq(&self, other: &str) -> bool {
        self.cmp_segments(other) == Ordering::Equal
    }
}

impl PartialEq<&str> for S3Path {
    fn eq(&self, other: &&str) -> bool {
        self.cmp_segments(other) == Ordering::Equal
    }
}

impl PartialEq<String> for S3Path {
    fn eq(&self, other: &String) -> bool {
        self.cmp_segments(other) == Ordering::Equal
    }
}

impl PartialEq<S3Path> for str {
    fn eq(&self, other: &S3Path) -> bool {
        other == self
    }
}

impl PartialEq<S3Path> for &str {
    fn eq(&self, other: &S3Path) -> bool {
        other == self
    }
}

impl PartialEq<S3Path> for String {
    fn eq(&self, other: &S3Path) -> bool {
        other == self
    }
}

impl PartialOrd<str> for S3Path {
    fn partial_cmp(&self, other: &str) -> Option<Ordering> {
        Some(self.cmp_segments(other))
    }
}

impl PartialOrd<&str> for S3Path {
    fn partial_cmp(&self, other: &&str) -> Option<Ordering> {
        Some(self.cmp_segments(other))
    }
}

impl PartialOrd<String> for S3Path {
    fn partial_cmp(&self, other: &String) -> Option<Ordering> {
        Some(self.cmp_segments(other))
    }
}

impl PartialOrd<S3Path> for str {
    fn partial_cmp(&self, other: &S3Path) -> Option<Ordering> {
        Some(other.cmp_segments(self).reverse())
    }
}

impl PartialOrd<S3Path> for &str {
    fn partial_cmp(&self, other: &S3Path) -> Option<Ordering> {
        Some(other.cmp_segments(self).reverse())
    }
}

impl PartialOrd<S3Path> for String {
    fn partial_cmp(&self, other: &S3Path) -> Option<Ordering> {
        Some(other.cmp_segments(self).reverse())
    }
}

// The `/` operator. String right-hand sides parse like relative paths; a
// scheme prefix on the right is stripped and never flips the result's
// absoluteness.

impl Div<&S3Path> for &S3Path {
    type Output = S3Path;

    fn div(self, rhs: &S3Path) -> S3Path {
        self.join(rhs)
    }
}

impl Div<S3Path> for &S3Path {
    type Output = S3Path;

    fn div(self, rhs: S3Path) -> S3Path {
        self.join(&rhs)
    }
}

impl Div<&S3Path> for S3Path {
    type Output = S3Path;

    fn div(self, rhs: &S3Path) -> S3Path {
        self.join(rhs)
    }
}

impl Div<S3Path> for S3Path {
    type Output = S3Path;

    fn div(self, rhs: S3Path) -> S3Path {
        self.join(&rhs)
    }
}

impl Div<&str> for &S3Path {
    type Output = S3Path;

    fn div(self, rhs: &str) -> S3Path {
        self.join(&S3Path::parse(rhs))
    }
}

impl Div<&str> for S3Path {
    type Output = S3Path;

    fn div(self, rhs: &str) -> S3Path {
        self.join(&S3Path::parse(rhs))
    }
}

impl Div<String> for &S3Path {
    type Output = S3Path;

    fn div(self, rhs: String) -> S3Path {
        self.join(&S3Path::parse(&rhs))
    }
}

impl Div<String> for S3Path {
    type Output = S3Path;

    fn div(self, rhs: String) -> S3Path {
        self.join(&S3Path::parse(&rhs))
    }
}

impl Serialize for S3Path {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for S3Path {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PathVisitor;

        impl Visitor<'_> for PathVisitor {
            type Value = S3Path;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an S3 path string")
            }

            fn visit_str<E>(self, value: &str) -> Result<S3Path, E>
            where
                E: de::Error,
            {
                Ok(S3Path::parse(value))
            }
        }

        deserializer.deserialize_str(PathVisitor)
    }
}
