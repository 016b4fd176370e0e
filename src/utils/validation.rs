use crate::api::error::AppError;

/// Parse the `width`/`height` form fields.
///
/// Both must be base-10 integers strictly greater than zero; anything else
/// (missing, empty, signed garbage, floats, zero) is rejected with the one
/// canonical message. Values above `max_dimension` are rejected separately
/// so callers can tell a typo from an oversized request.
pub fn parse_dimensions(
    width: Option<&str>,
    height: Option<&str>,
    max_dimension: u32,
) -> Result<(u32, u32), AppError> {
    let width = parse_dimension(width)?;
    let height = parse_dimension(height)?;

    if width > max_dimension || height > max_dimension {
        return Err(AppError::DimensionTooLarge(max_dimension));
    }

    Ok((width, height))
}

fn parse_dimension(raw: Option<&str>) -> Result<u32, AppError> {
    let value: u32 = raw
        .ok_or(AppError::InvalidDimensions)?
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidDimensions)?;

    if value == 0 {
        return Err(AppError::InvalidDimensions);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_integers() {
        assert_eq!(parse_dimensions(Some("50"), Some("25"), 10_000).unwrap(), (50, 25));
        assert_eq!(parse_dimensions(Some(" 1 "), Some("1"), 10_000).unwrap(), (1, 1));
    }

    #[test]
    fn rejects_zero_and_negative() {
        for (w, h) in [("0", "50"), ("50", "0"), ("-3", "50"), ("50", "-1")] {
            let err = parse_dimensions(Some(w), Some(h), 10_000).unwrap_err();
            assert!(matches!(err, AppError::InvalidDimensions));
        }
    }

    #[test]
    fn rejects_non_numeric_and_missing() {
        for raw in [Some("abc"), Some("12.5"), Some(""), None] {
            let err = parse_dimensions(raw, Some("50"), 10_000).unwrap_err();
            assert!(matches!(err, AppError::InvalidDimensions));
        }
    }

    #[test]
    fn enforces_dimension_cap() {
        let err = parse_dimensions(Some("20000"), Some("10"), 10_000).unwrap_err();
        assert!(matches!(err, AppError::DimensionTooLarge(10_000)));
        assert!(parse_dimensions(Some("10000"), Some("10000"), 10_000).is_ok());
    }
}
