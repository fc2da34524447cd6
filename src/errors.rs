use std::fmt;

#[derive(Debug, Clone)]
pub enum ChannelizerError {
    Config(String),
    DateParse(String),
    ApiRequest(String),
    ApiResponse(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Serialization(String),
}

impl ChannelizerError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ChannelizerError::Config(_) => "E001",
            ChannelizerError::DateParse(_) => "E002",
            ChannelizerError::ApiRequest(_) => "E003",
            ChannelizerError::ApiResponse(_) => "E004",
            ChannelizerError::DatabaseConfig(_) => "E005",
            ChannelizerError::DatabaseConnection(_) => "E006",
            ChannelizerError::DatabaseOperation(_) => "E007",
            ChannelizerError::FileOperation(_) => "E008",
            ChannelizerError::Serialization(_) => "E009",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            ChannelizerError::Config(_) => "Configuration Error",
            ChannelizerError::DateParse(_) => "Date Parse Error",
            ChannelizerError::ApiRequest(_) => "API Request Error",
            ChannelizerError::ApiResponse(_) => "API Response Error",
            ChannelizerError::DatabaseConfig(_) => "Database Configuration Error",
            ChannelizerError::DatabaseConnection(_) => "Database Connection Error",
            ChannelizerError::DatabaseOperation(_) => "Database Operation Error",
            ChannelizerError::FileOperation(_) => "File Operation Error",
            ChannelizerError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            ChannelizerError::Config(msg) => msg,
            ChannelizerError::DateParse(msg) => msg,
            ChannelizerError::ApiRequest(msg) => msg,
            ChannelizerError::ApiResponse(msg) => msg,
            ChannelizerError::DatabaseConfig(msg) => msg,
            ChannelizerError::DatabaseConnection(msg) => msg,
            ChannelizerError::DatabaseOperation(msg) => msg,
            ChannelizerError::FileOperation(msg) => msg,
            ChannelizerError::Serialization(msg) => msg,
        }
    }

    /// 格式化为彩色输出（终端）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（日志）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ChannelizerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 默认使用简洁格式
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ChannelizerError {}

// 便捷的构造函数
impl ChannelizerError {
    pub fn config<T: Into<String>>(msg: T) -> Self {
        ChannelizerError::Config(msg.into())
    }

    pub fn date_parse<T: Into<String>>(msg: T) -> Self {
        ChannelizerError::DateParse(msg.into())
    }

    pub fn api_request<T: Into<String>>(msg: T) -> Self {
        ChannelizerError::ApiRequest(msg.into())
    }

    pub fn api_response<T: Into<String>>(msg: T) -> Self {
        ChannelizerError::ApiResponse(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        ChannelizerError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        ChannelizerError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        ChannelizerError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        ChannelizerError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        ChannelizerError::Serialization(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for ChannelizerError {
    fn from(err: sea_orm::DbErr) -> Self {
        ChannelizerError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for ChannelizerError {
    fn from(err: std::io::Error) -> Self {
        ChannelizerError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for ChannelizerError {
    fn from(err: serde_json::Error) -> Self {
        ChannelizerError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for ChannelizerError {
    fn from(err: csv::Error) -> Self {
        ChannelizerError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for ChannelizerError {
    fn from(err: chrono::ParseError) -> Self {
        ChannelizerError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ChannelizerError>;
