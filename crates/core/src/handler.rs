//! Request-to-reply computation
//!
//! [`handle_body`] turns a raw request body into a `(status, body)` pair. The
//! transport layer is responsible for headers, pre-flight requests and
//! writing the reply out.

use crate::calendar::{CalendarConverter, HijriFormat};
use crate::request::{extract_date, is_valid_format};
use crate::response::{ConversionData, ConversionResponse, HijriDates};

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;

pub const SUCCESS_MESSAGE: &str = "Date converted successfully.";

/// Reasons a request can be rejected
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertError {
    #[error("No date provided. Please send a JSON payload with a 'date' key. e.g., {{\"date\": \"27/07/2025\"}}")]
    MissingInput,

    #[error("Invalid date format. Please use 'dd/mm/yyyy'.")]
    FormatInvalid,

    #[error("Could not parse the provided date. Make sure it is a valid Gregorian date.")]
    ConversionFailed,
}

impl ConvertError {
    pub fn status_code(&self) -> u16 {
        STATUS_BAD_REQUEST
    }
}

/// HTTP status code and body for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: ConversionResponse,
}

impl From<ConvertError> for Reply {
    fn from(err: ConvertError) -> Self {
        Reply {
            status: err.status_code(),
            body: ConversionResponse::error(err.to_string()),
        }
    }
}

/// Validate and convert a single Gregorian date string
///
/// The pattern check runs first; calendar validity (`31/02/2025`) is left to
/// the converter and surfaces as [`ConvertError::ConversionFailed`].
pub fn convert_date<C>(date: &str, converter: &C) -> Result<ConversionData, ConvertError>
where
    C: CalendarConverter + ?Sized,
{
    if !is_valid_format(date) {
        return Err(ConvertError::FormatInvalid);
    }

    let render = |format| {
        converter
            .convert(date, format)
            .map_err(|_| ConvertError::ConversionFailed)
    };

    Ok(ConversionData {
        gregorian_date: date.to_string(),
        hijri_date: HijriDates {
            numeric: render(HijriFormat::Numeric)?,
            long_arabic: render(HijriFormat::LongArabic)?,
            full_arabic: render(HijriFormat::FullArabic)?,
        },
    })
}

/// Compute the reply for a raw request body
pub fn handle_body<C>(body: &[u8], converter: &C) -> Reply
where
    C: CalendarConverter + ?Sized,
{
    let result = extract_date(body)
        .ok_or(ConvertError::MissingInput)
        .and_then(|request| convert_date(&request.date, converter));

    match result {
        Ok(data) => Reply {
            status: STATUS_OK,
            body: ConversionResponse::success(SUCCESS_MESSAGE, data),
        },
        Err(err) => err.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{ConversionError, UmmAlQuraConverter};
    use crate::response::ResponseStatus;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Converter that echoes its input and counts calls
    #[derive(Default)]
    struct EchoConverter {
        calls: AtomicUsize,
    }

    impl CalendarConverter for EchoConverter {
        fn convert(
            &self,
            gregorian: &str,
            format: HijriFormat,
        ) -> Result<String, ConversionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("{}|{}", format.pattern(), gregorian))
        }
    }

    /// Converter that rejects everything
    struct FailingConverter;

    impl CalendarConverter for FailingConverter {
        fn convert(&self, gregorian: &str, _: HijriFormat) -> Result<String, ConversionError> {
            Err(ConversionError::OutOfRange(gregorian.to_string()))
        }
    }

    fn missing_message() -> String {
        ConvertError::MissingInput.to_string()
    }

    // ============================================================================
    // ConvertError tests
    // ============================================================================

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ConvertError::MissingInput.to_string(),
            r#"No date provided. Please send a JSON payload with a 'date' key. e.g., {"date": "27/07/2025"}"#
        );
        assert_eq!(
            ConvertError::FormatInvalid.to_string(),
            "Invalid date format. Please use 'dd/mm/yyyy'."
        );
        assert_eq!(
            ConvertError::ConversionFailed.to_string(),
            "Could not parse the provided date. Make sure it is a valid Gregorian date."
        );
    }

    #[test]
    fn test_all_errors_are_bad_request() {
        for err in [
            ConvertError::MissingInput,
            ConvertError::FormatInvalid,
            ConvertError::ConversionFailed,
        ] {
            assert_eq!(err.status_code(), 400);
        }
    }

    // ============================================================================
    // handle_body tests
    // ============================================================================

    #[test]
    fn test_missing_or_empty_date() {
        let converter = EchoConverter::default();
        for body in [
            "",
            "{}",
            "not json",
            r#"{"date": ""}"#,
            r#"{"date": null}"#,
            r#"{"other": "27/07/2025"}"#,
        ] {
            let reply = handle_body(body.as_bytes(), &converter);
            assert_eq!(reply.status, 400, "{body}");
            assert_eq!(reply.body.status, ResponseStatus::Error);
            assert_eq!(reply.body.message, missing_message());
            assert!(reply.body.data.is_none());
        }
        assert_eq!(converter.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_format_invalid() {
        let converter = EchoConverter::default();
        for date in ["2025-07-27", "32/01/2025", "01/13/2025", "7/27/2025"] {
            let body = format!(r#"{{"date": "{date}"}}"#);
            let reply = handle_body(body.as_bytes(), &converter);
            assert_eq!(reply.status, 400, "{date}");
            assert_eq!(reply.body.message, ConvertError::FormatInvalid.to_string());
        }
        assert_eq!(converter.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_non_string_date_is_format_invalid() {
        let reply = handle_body(br#"{"date": 27072025}"#, &EchoConverter::default());
        assert_eq!(reply.status, 400);
        assert_eq!(reply.body.message, ConvertError::FormatInvalid.to_string());
    }

    #[test]
    fn test_converter_failure_is_conversion_failed() {
        let reply = handle_body(br#"{"date": "27/07/2025"}"#, &FailingConverter);
        assert_eq!(reply.status, 400);
        assert_eq!(reply.body.message, ConvertError::ConversionFailed.to_string());
        assert!(reply.body.data.is_none());
    }

    #[test]
    fn test_success_uses_all_three_formats() {
        let converter = EchoConverter::default();
        let reply = handle_body(br#"{"date": "27/07/2025"}"#, &converter);

        assert_eq!(reply.status, 200);
        assert_eq!(reply.body.status, ResponseStatus::Success);
        assert_eq!(reply.body.message, SUCCESS_MESSAGE);

        let data = reply.body.data.unwrap();
        assert_eq!(data.gregorian_date, "27/07/2025");
        assert_eq!(data.hijri_date.numeric, "yyyy-MM-dd|27/07/2025");
        assert_eq!(data.hijri_date.long_arabic, "d MMMM, yyyy|27/07/2025");
        assert_eq!(data.hijri_date.full_arabic, "eeee, d MMMM, yyyy G|27/07/2025");
        assert_eq!(converter.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_works_through_trait_object() {
        let converter: Box<dyn CalendarConverter> = Box::new(EchoConverter::default());
        let reply = handle_body(br#"{"date": "01/01/2000"}"#, converter.as_ref());
        assert_eq!(reply.status, 200);
    }

    // ============================================================================
    // handle_body with the Umm al-Qura converter
    // ============================================================================

    #[test]
    fn test_umm_al_qura_calendar_invalid_date() {
        let reply = handle_body(br#"{"date": "31/02/2025"}"#, &UmmAlQuraConverter::default());
        assert_eq!(reply.status, 400);
        assert_eq!(reply.body.message, ConvertError::ConversionFailed.to_string());
    }

    #[test]
    fn test_umm_al_qura_success() {
        let reply = handle_body(br#"{"date": "27/07/2025"}"#, &UmmAlQuraConverter::default());
        assert_eq!(reply.status, 200);

        let data = reply.body.data.unwrap();
        assert_eq!(data.gregorian_date, "27/07/2025");
        assert!(!data.hijri_date.numeric.is_empty());
        assert!(!data.hijri_date.long_arabic.is_empty());
        assert!(!data.hijri_date.full_arabic.is_empty());
    }

    #[test]
    fn test_umm_al_qura_is_idempotent() {
        let converter = UmmAlQuraConverter::default();
        let first = handle_body(br#"{"date": "27/07/2025"}"#, &converter);
        let second = handle_body(br#"{"date": "27/07/2025"}"#, &converter);
        assert_eq!(first, second);
    }
}
