//! Error types.
//!
//! - `AnalysisError`: what can go wrong while ingesting, fitting, or evaluating
//! - `AppError`: what the binary reports (message + process exit code)
//!
//! Exit codes:
//! - `2`: input / IO / format problems
//! - `3`: degenerate fit or insufficient data
//! - `4`: evaluation, rendering, or compute failures

use thiserror::Error;

/// Failures of the fitting core and its inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// The two-point system has no unique solution.
    #[error("Degenerate fit: {0}")]
    DegenerateFit(String),

    /// Evaluation requested at the curve's pole `n = -b`.
    #[error("Curve is undefined at n = {n} (pole at n = {pole})")]
    Domain { n: f64, pole: f64 },

    /// Missing or malformed input columns/values.
    #[error("{}", format_input_error(.line, .message))]
    InputFormat { line: Option<usize>, message: String },
}

impl AnalysisError {
    pub fn degenerate(reason: impl Into<String>) -> Self {
        AnalysisError::DegenerateFit(reason.into())
    }

    pub fn input(line: Option<usize>, message: impl Into<String>) -> Self {
        AnalysisError::InputFormat {
            line,
            message: message.into(),
        }
    }

    /// Process exit code used when this error reaches `main`.
    pub fn exit_code(&self) -> u8 {
        match self {
            AnalysisError::InputFormat { .. } => 2,
            AnalysisError::DegenerateFit(_) => 3,
            AnalysisError::Domain { .. } => 4,
        }
    }
}

fn format_input_error(line: &Option<usize>, message: &str) -> String {
    match line {
        Some(line) => format!("Invalid input (line {line}): {message}"),
        None => format!("Invalid input: {message}"),
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_errors_map_to_exit_codes() {
        let err: AppError = AnalysisError::degenerate("n1 == n2").into();
        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.to_string(), "Degenerate fit: n1 == n2");

        let err: AppError = AnalysisError::input(Some(3), "bad `n`").into();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "Invalid input (line 3): bad `n`");

        let err: AppError = AnalysisError::Domain { n: 2.0, pole: 2.0 }.into();
        assert_eq!(err.exit_code(), 4);
    }
}
