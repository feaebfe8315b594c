use std::error::Error;
use std::fmt::{Display, Formatter};

pub type FertigateResult<T> = Result<T, FertigateError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Success,
    InputValidationError,
    IoSystemError,
    ComputationError,
    InternalError,
}

impl ErrorCategory {
    pub const fn exit_mapping(self) -> ExitMapping {
        match self {
            Self::Success => ExitMapping {
                exit_code: 0,
                category_name: "Success",
            },
            Self::InputValidationError => ExitMapping {
                exit_code: 2,
                category_name: "InputValidationError",
            },
            Self::IoSystemError => ExitMapping {
                exit_code: 3,
                category_name: "IoSystemError",
            },
            Self::ComputationError => ExitMapping {
                exit_code: 4,
                category_name: "ComputationError",
            },
            Self::InternalError => ExitMapping {
                exit_code: 5,
                category_name: "InternalError",
            },
        }
    }

    pub const fn exit_code(self) -> i32 {
        self.exit_mapping().exit_code
    }

    pub const fn category_name(self) -> &'static str {
        self.exit_mapping().category_name
    }

    pub const fn is_fatal(self) -> bool {
        !matches!(self, Self::Success)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitMapping {
    pub exit_code: i32,
    pub category_name: &'static str,
}

/// Failure raised by the I/O edges around the pipeline (input documents,
/// profile files, exports). The pipeline itself never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FertigateError {
    category: ErrorCategory,
    placeholder: &'static str,
    message: String,
}

impl FertigateError {
    pub fn new(category: ErrorCategory, placeholder: &'static str, message: impl Into<String>) -> Self {
        Self {
            category,
            placeholder,
            message: message.into(),
        }
    }

    pub fn input_validation(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::InputValidationError, placeholder, message)
    }

    pub fn io_system(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::IoSystemError, placeholder, message)
    }

    pub fn computation(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::ComputationError, placeholder, message)
    }

    pub fn internal(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::InternalError, placeholder, message)
    }

    pub const fn category(&self) -> ErrorCategory {
        self.category
    }

    pub const fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        let severity = if self.category.is_fatal() {
            "ERROR"
        } else {
            "INFO"
        };
        format!("{}: [{}] {}", severity, self.placeholder, self.message)
    }
}

impl Display for FertigateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.category.category_name(),
            self.placeholder,
            self.message
        )
    }
}

impl Error for FertigateError {}

#[cfg(test)]
mod tests {
    use super::{ErrorCategory, FertigateError};

    #[test]
    fn exit_mapping_is_stable() {
        let cases = [
            (ErrorCategory::Success, 0, "Success"),
            (ErrorCategory::InputValidationError, 2, "InputValidationError"),
            (ErrorCategory::IoSystemError, 3, "IoSystemError"),
            (ErrorCategory::ComputationError, 4, "ComputationError"),
            (ErrorCategory::InternalError, 5, "InternalError"),
        ];

        for (category, exit_code, category_name) in cases {
            let mapping = category.exit_mapping();
            assert_eq!(mapping.exit_code, exit_code);
            assert_eq!(mapping.category_name, category_name);
        }
    }

    #[test]
    fn fatal_error_renders_diagnostic_line() {
        let error = FertigateError::input_validation(
            "INPUT.UNKNOWN_ION",
            "unknown ion 'Fe' in analysis vector",
        );

        assert_eq!(error.exit_code(), 2);
        assert_eq!(
            error.diagnostic_line(),
            "ERROR: [INPUT.UNKNOWN_ION] unknown ion 'Fe' in analysis vector"
        );
        assert_eq!(
            error.to_string(),
            "InputValidationError [INPUT.UNKNOWN_ION] unknown ion 'Fe' in analysis vector"
        );
    }

    #[test]
    fn success_category_is_not_fatal() {
        let info = FertigateError::new(ErrorCategory::Success, "RUN.OK", "done");
        assert!(info.diagnostic_line().starts_with("INFO:"));
        assert!(!ErrorCategory::Success.is_fatal());
    }
}
