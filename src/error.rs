use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid pool: {0}")]
    InvalidPool(String),

    #[error("No boxes left to open")]
    Exhausted,

    #[error("Persisted record is corrupt: {0}")]
    PersistenceCorruption(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] std::io::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    ConfigError(String),
}

impl AppError {
    /// 供界面层使用的稳定错误码
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::InvalidPool(_) => "INVALID_POOL",
            AppError::Exhausted => "EXHAUSTED",
            AppError::PersistenceCorruption(_) => "PERSISTENCE_CORRUPTION",
            AppError::StorageError(_) => "STORAGE_ERROR",
            AppError::SerdeJsonError(_) => "SERIALIZATION_ERROR",
            AppError::ConfigError(_) => "CONFIG_ERROR",
        }
    }

    /// 记录日志并返回 (错误码, 提示信息)
    ///
    /// 用户输入类错误只记 warn，存储类错误记 error。
    pub fn report(&self) -> (&'static str, String) {
        match self {
            AppError::ValidationError(msg) => log::warn!("Validation error: {msg}"),
            AppError::Exhausted => log::info!("Draw rejected: pool exhausted"),
            AppError::InvalidPool(msg) => log::warn!("Invalid pool: {msg}"),
            AppError::PersistenceCorruption(msg) => {
                log::warn!("Persisted record discarded: {msg}")
            }
            AppError::StorageError(err) => log::error!("Storage error: {err}"),
            _ => log::error!("Internal error: {self}"),
        }
        (self.error_code(), self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::ValidationError("x".into()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(AppError::Exhausted.error_code(), "EXHAUSTED");
        assert_eq!(
            AppError::InvalidPool("empty".into()).error_code(),
            "INVALID_POOL"
        );
    }

    #[test]
    fn test_report_keeps_message() {
        let (code, message) = AppError::ValidationError("percentage out of range".into()).report();
        assert_eq!(code, "VALIDATION_ERROR");
        assert_eq!(message, "Validation error: percentage out of range");
    }

    #[test]
    fn test_io_error_converts() {
        let err: AppError = std::io::Error::other("disk full").into();
        assert!(matches!(err, AppError::StorageError(_)));
    }
}
