use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodelinkError {
    GenerationExhausted(String),
    NotFound(String),
    EmptyInput(String),
    Validation(String),
    Config(String),
    FileOperation(String),
}

impl CodelinkError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            CodelinkError::GenerationExhausted(_) => "E001",
            CodelinkError::NotFound(_) => "E002",
            CodelinkError::EmptyInput(_) => "E003",
            CodelinkError::Validation(_) => "E004",
            CodelinkError::Config(_) => "E005",
            CodelinkError::FileOperation(_) => "E006",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            CodelinkError::GenerationExhausted(_) => "Generation Exhausted",
            CodelinkError::NotFound(_) => "Resource Not Found",
            CodelinkError::EmptyInput(_) => "Empty Input",
            CodelinkError::Validation(_) => "Validation Error",
            CodelinkError::Config(_) => "Configuration Error",
            CodelinkError::FileOperation(_) => "File Operation Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            CodelinkError::GenerationExhausted(msg) => msg,
            CodelinkError::NotFound(msg) => msg,
            CodelinkError::EmptyInput(msg) => msg,
            CodelinkError::Validation(msg) => msg,
            CodelinkError::Config(msg) => msg,
            CodelinkError::FileOperation(msg) => msg,
        }
    }

    /// 映射到 HTTP 状态码
    pub fn http_status(&self) -> StatusCode {
        match self {
            CodelinkError::NotFound(_) => StatusCode::NOT_FOUND,
            CodelinkError::EmptyInput(_) | CodelinkError::Validation(_) => StatusCode::BAD_REQUEST,
            CodelinkError::GenerationExhausted(_)
            | CodelinkError::Config(_)
            | CodelinkError::FileOperation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于 Server 模式）
    #[cfg(feature = "server")]
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

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for CodelinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CodelinkError {}

// 便捷的构造函数
impl CodelinkError {
    pub fn generation_exhausted<T: Into<String>>(msg: T) -> Self {
        CodelinkError::GenerationExhausted(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        CodelinkError::NotFound(msg.into())
    }

    pub fn empty_input<T: Into<String>>(msg: T) -> Self {
        CodelinkError::EmptyInput(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        CodelinkError::Validation(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        CodelinkError::Config(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        CodelinkError::FileOperation(msg.into())
    }
}

impl From<std::io::Error> for CodelinkError {
    fn from(err: std::io::Error) -> Self {
        CodelinkError::FileOperation(err.to_string())
    }
}

impl From<config::ConfigError> for CodelinkError {
    fn from(err: config::ConfigError) -> Self {
        CodelinkError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for CodelinkError {
    fn from(err: toml::ser::Error) -> Self {
        CodelinkError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CodelinkError>;
