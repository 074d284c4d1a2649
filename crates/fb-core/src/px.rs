//! CSS pixel lengths as stored in save records (`"120px"`).
//!
//! Built on `winnow` 0.7. Accepts an optional sign, digits with an optional
//! fraction, and an optional `px` suffix, surrounded by optional spaces.
//! The empty string means "no explicit offset" (a card that was never
//! dragged) and maps to `None`.

use crate::error::PxError;
use winnow::ascii::{digit0, digit1, space0};
use winnow::combinator::{delimited, opt, terminated};
use winnow::prelude::*;

fn number(input: &mut &str) -> ModalResult<f64> {
    (opt('-'), digit1, opt(('.', digit0)))
        .take()
        .try_map(str::parse::<f64>)
        .parse_next(input)
}

fn px_length(input: &mut &str) -> ModalResult<f64> {
    delimited(space0, terminated(number, opt("px")), space0).parse_next(input)
}

/// Parse a stored pixel length.
pub fn parse_px(text: &str) -> Result<Option<f64>, PxError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    let mut rest = text;
    let value = px_length
        .parse_next(&mut rest)
        .map_err(|_| PxError(text.to_string()))?;
    if !rest.is_empty() {
        return Err(PxError(text.to_string()));
    }
    Ok(Some(value))
}

/// Format a coordinate the way it is stored: shortest float form plus `px`.
pub fn format_px(value: f64) -> String {
    format!("{value}px")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_forms() {
        assert_eq!(parse_px("120px"), Ok(Some(120.0)));
        assert_eq!(parse_px("12.5px"), Ok(Some(12.5)));
        assert_eq!(parse_px("7"), Ok(Some(7.0)));
        assert_eq!(parse_px(" 3px "), Ok(Some(3.0)));
        assert_eq!(parse_px("-4px"), Ok(Some(-4.0)));
        assert_eq!(parse_px("10.px"), Ok(Some(10.0)));
    }

    #[test]
    fn empty_means_unset() {
        assert_eq!(parse_px(""), Ok(None));
        assert_eq!(parse_px("   "), Ok(None));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_px("px").is_err());
        assert!(parse_px("12em").is_err());
        assert!(parse_px("abc").is_err());
        assert!(parse_px("1px2").is_err());
    }

    #[test]
    fn formats_shortest() {
        assert_eq!(format_px(120.0), "120px");
        assert_eq!(format_px(12.5), "12.5px");
        assert_eq!(format_px(0.0), "0px");
    }
}
