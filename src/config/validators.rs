//! 配置值验证模块

use chrono::NaiveDate;

use crate::errors::{ChannelizerError, Result};

/// API 接受的日期格式
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 校验可选日期参数，空值视为未设置
pub fn validate_date(field: &str, value: Option<&str>) -> Result<Option<NaiveDate>> {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(Some)
        .map_err(|e| {
            ChannelizerError::date_parse(format!(
                "{} '{}' is not a valid YYYY-MM-DD date: {}",
                field, raw, e
            ))
        })
}

/// 校验日期范围（两端都存在时 from <= to）
pub fn validate_date_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<()> {
    if let (Some(from), Some(to)) = (from, to)
        && from > to
    {
        return Err(ChannelizerError::config(format!(
            "from_date {} is after to_date {}",
            from, to
        )));
    }
    Ok(())
}

pub fn validate_api_key(api_key: &str) -> Result<()> {
    if api_key.trim().is_empty() {
        return Err(ChannelizerError::config(
            "api.api_key is not set (use CHANNELIZER__API__API_KEY or the [api] section)",
        ));
    }
    Ok(())
}

pub fn validate_page_limit(page_limit: u32) -> Result<()> {
    if page_limit == 0 {
        return Err(ChannelizerError::config("api.page_limit must be greater than 0"));
    }
    Ok(())
}

/// 品牌域名会被直接写入视图定义，只允许主机名字符
pub fn validate_brand_domain(domain: &str) -> Result<()> {
    let valid = !domain.is_empty()
        && domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    if !valid {
        return Err(ChannelizerError::config(format!(
            "report.brand_domain '{}' must only contain letters, digits, '.' and '-'",
            domain
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_date() {
        assert_eq!(
            validate_date("from_date", Some("2021-08-01")).unwrap(),
            NaiveDate::from_ymd_opt(2021, 8, 1)
        );
        assert_eq!(validate_date("from_date", None).unwrap(), None);
        assert_eq!(validate_date("from_date", Some("  ")).unwrap(), None);

        let err = validate_date("to_date", Some("2021-13-01")).unwrap_err();
        assert!(matches!(err, ChannelizerError::DateParse(_)));
        assert!(err.message().contains("to_date"));
        assert!(validate_date("to_date", Some("01.08.2021")).is_err());
    }

    #[test]
    fn test_validate_date_range() {
        let aug = NaiveDate::from_ymd_opt(2021, 8, 1);
        let sep = NaiveDate::from_ymd_opt(2021, 9, 30);
        assert!(validate_date_range(aug, sep).is_ok());
        assert!(validate_date_range(aug, aug).is_ok());
        assert!(validate_date_range(None, sep).is_ok());
        assert!(validate_date_range(sep, aug).is_err());
    }

    #[test]
    fn test_validate_api_key() {
        assert!(validate_api_key("woope").is_ok());
        assert!(validate_api_key("").is_err());
        assert!(validate_api_key("   ").is_err());
    }

    #[test]
    fn test_validate_page_limit() {
        assert!(validate_page_limit(1).is_ok());
        assert!(validate_page_limit(0).is_err());
    }

    #[test]
    fn test_validate_brand_domain() {
        assert!(validate_brand_domain("fashion-brand.com").is_ok());
        assert!(validate_brand_domain("shop").is_ok());
        assert!(validate_brand_domain("").is_err());
        assert!(validate_brand_domain("x' OR 1=1 --").is_err());
        assert!(validate_brand_domain("brand%").is_err());
    }
}
