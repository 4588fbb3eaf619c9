use crate::error::Error;

/// Longest bucket name S3 accepts.
const MAX_BUCKET_LEN: usize = 63;

/// Checks a bucket name against the S3 DNS naming rules.
///
/// Buckets must be 1-63 ASCII alphanumeric/hyphen characters, must not
/// start or end with a hyphen, and must not look like a bare number.
/// See <https://docs.aws.amazon.com/AmazonS3/latest/dev/BucketRestrictions.html#bucketnamingrules>
pub(crate) fn validate(name: &str) -> Result<(), Error> {
    if is_valid(name) {
        Ok(())
    } else {
        Err(Error::InvalidBucket {
            name: name.to_string(),
        })
    }
}

fn is_valid(name: &str) -> bool {
    if name.is_empty() || name.len() > MAX_BUCKET_LEN {
        return false;
    }
    if name.starts_with('-') || name.ends_with('-') {
        return false;
    }
    if name.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(validate("my-bucket").is_ok());
        assert!(validate("b").is_ok());
        assert!(validate("logs2024").is_ok());
        assert!(validate(&"a".repeat(63)).is_ok());
    }

    #[test]
    fn test_invalid_names() {
        assert!(validate("").is_err());
        assert!(validate("-leading").is_err());
        assert!(validate("trailing-").is_err());
        assert!(validate("under_score").is_err());
        assert!(validate("dot.name").is_err());
        assert!(validate("not$a%valid&bucket*name!").is_err());
        assert!(validate("12345").is_err());
        assert!(validate(&"a".repeat(64)).is_err());
    }

    #[test]
    fn test_error_carries_name() {
        assert_eq!(
            validate("bad_name"),
            Err(Error::InvalidBucket {
                name: "bad_name".to_string()
            })
        );
    }
}
