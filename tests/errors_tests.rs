use channelizer::errors::{ChannelizerError, Result};
use std::error::Error;

#[cfg(test)]
mod error_creation_tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        let cases = [
            (ChannelizerError::config("x"), "E001", "Configuration Error"),
            (ChannelizerError::date_parse("x"), "E002", "Date Parse Error"),
            (ChannelizerError::api_request("x"), "E003", "API Request Error"),
            (ChannelizerError::api_response("x"), "E004", "API Response Error"),
            (
                ChannelizerError::database_config("x"),
                "E005",
                "Database Configuration Error",
            ),
            (
                ChannelizerError::database_connection("x"),
                "E006",
                "Database Connection Error",
            ),
            (
                ChannelizerError::database_operation("x"),
                "E007",
                "Database Operation Error",
            ),
            (ChannelizerError::file_operation("x"), "E008", "File Operation Error"),
            (ChannelizerError::serialization("x"), "E009", "Serialization Error"),
        ];

        for (error, code, kind) in cases {
            assert_eq!(error.code(), code);
            assert_eq!(error.error_type(), kind);
            assert_eq!(error.message(), "x");
        }
    }

    #[test]
    fn test_display_uses_simple_format() {
        let error = ChannelizerError::api_request("HTTP 503 from https://api.example.com");
        assert_eq!(
            error.to_string(),
            "API Request Error: HTTP 503 from https://api.example.com"
        );
        assert_eq!(error.to_string(), error.format_simple());
    }

    #[test]
    fn test_colored_format_contains_code_and_message() {
        let error = ChannelizerError::date_parse("api.from_date '2021-13-01'");
        let colored = error.format_colored();
        assert!(colored.contains("E002"));
        assert!(colored.contains("api.from_date '2021-13-01'"));
    }

    #[test]
    fn test_is_std_error() {
        let error = ChannelizerError::config("bad");
        let boxed: Box<dyn Error> = Box::new(error);
        assert!(boxed.source().is_none());
    }
}

#[cfg(test)]
mod error_conversion_tests {
    use super::*;

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.toml");
        let error: ChannelizerError = io.into();
        assert!(matches!(error, ChannelizerError::FileOperation(_)));
        assert!(error.message().contains("missing.toml"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<Vec<u32>>("[1,").unwrap_err();
        let error: ChannelizerError = json_err.into();
        assert_eq!(error.code(), "E009");
    }

    #[test]
    fn test_from_chrono_parse_error() {
        let parse_err = chrono::NaiveDate::parse_from_str("2021-02-30", "%Y-%m-%d").unwrap_err();
        let error: ChannelizerError = parse_err.into();
        assert_eq!(error.code(), "E002");
    }

    #[test]
    fn test_from_db_err() {
        let error: ChannelizerError = sea_orm::DbErr::Custom("constraint failed".into()).into();
        assert_eq!(error.code(), "E007");
        assert!(error.message().contains("constraint failed"));
    }

    #[test]
    fn test_question_mark_propagation() {
        fn read_missing() -> Result<String> {
            Ok(std::fs::read_to_string("/definitely/not/here.toml")?)
        }
        assert_eq!(read_missing().unwrap_err().code(), "E008");
    }
}
