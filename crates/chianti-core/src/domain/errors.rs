use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::naming::IonNameError;
use crate::numerics::{LuError, SplineError};
use crate::scaling::{ScalingError, SplomError, SplomTableLoadError};

pub type ChiantiResult<T> = Result<T, ChiantiError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChiantiErrorCategory {
    Success,
    InputValidationError,
    IoSystemError,
    ComputationError,
    InternalError,
}

impl ChiantiErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::InputValidationError => 2,
            Self::IoSystemError => 3,
            Self::ComputationError => 4,
            Self::InternalError => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::InputValidationError => "InputValidationError",
            Self::IoSystemError => "IoSystemError",
            Self::ComputationError => "ComputationError",
            Self::InternalError => "InternalError",
        }
    }

    pub const fn is_fatal(self) -> bool {
        !matches!(self, Self::Success)
    }
}

/// Error surfaced at the crate boundary: a category with a stable exit code,
/// a dotted diagnostic code (`INPUT.SPLOM`) and a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChiantiError {
    category: ChiantiErrorCategory,
    code: &'static str,
    message: String,
}

impl ChiantiError {
    pub fn new(
        category: ChiantiErrorCategory,
        code: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            code,
            message: message.into(),
        }
    }

    pub fn input_validation(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(ChiantiErrorCategory::InputValidationError, code, message)
    }

    pub fn io_system(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(ChiantiErrorCategory::IoSystemError, code, message)
    }

    pub fn computation(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(ChiantiErrorCategory::ComputationError, code, message)
    }

    pub fn internal(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(ChiantiErrorCategory::InternalError, code, message)
    }

    pub const fn category(&self) -> ChiantiErrorCategory {
        self.category
    }

    pub const fn code(&self) -> &'static str {
        self.code
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
        format!("{}: [{}] {}", severity, self.code, self.message)
    }
}

impl Display for ChiantiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.category.as_str(),
            self.code,
            self.message
        )
    }
}

impl Error for ChiantiError {}

impl From<SplomError> for ChiantiError {
    fn from(error: SplomError) -> Self {
        match error {
            SplomError::Spline { .. } => Self::computation("RUN.SPLINE", error.to_string()),
            _ => Self::input_validation("INPUT.SPLOM", error.to_string()),
        }
    }
}

impl From<ScalingError> for ChiantiError {
    fn from(error: ScalingError) -> Self {
        match error {
            ScalingError::NonFiniteResult { .. } => {
                Self::computation("RUN.BURGESS_TULLY", error.to_string())
            }
            _ => Self::input_validation("INPUT.BURGESS_TULLY", error.to_string()),
        }
    }
}

impl From<SplineError> for ChiantiError {
    fn from(error: SplineError) -> Self {
        Self::computation("RUN.SPLINE", error.to_string())
    }
}

impl From<LuError> for ChiantiError {
    fn from(error: LuError) -> Self {
        Self::computation("RUN.LINALG", error.to_string())
    }
}

impl From<IonNameError> for ChiantiError {
    fn from(error: IonNameError) -> Self {
        Self::input_validation("INPUT.ION_NAME", error.to_string())
    }
}

impl From<SplomTableLoadError> for ChiantiError {
    fn from(error: SplomTableLoadError) -> Self {
        match error {
            SplomTableLoadError::Read { .. } => Self::io_system("IO.SPLOM_TABLE", error.to_string()),
            _ => Self::input_validation("INPUT.SPLOM_TABLE", error.to_string()),
        }
    }
}
