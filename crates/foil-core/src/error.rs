use thiserror::Error;

#[derive(Debug, Error)]
pub enum FoilError {
    #[error("Invalid operand: {0}")]
    InvalidOperand(String),

    #[error("Degenerate vector: cannot normalize a zero-length vector")]
    DegenerateVector,

    #[error("Curve fit failed: {0}")]
    CurveFit(String),

    #[error("Parameter {0} is outside the curve domain [0, 1]")]
    ParameterOutOfRange(f64),

    #[error(
        "No root bracketed in [{lower}, {upper}]: f(lower) = {f_lower}, f(upper) = {f_upper}"
    )]
    NoBracketingRoot {
        lower: f64,
        upper: f64,
        f_lower: f64,
        f_upper: f64,
    },

    #[error("No convergence after {iterations} iterations (last estimate {estimate})")]
    ConvergenceFailure { iterations: usize, estimate: f64 },

    #[error("Invalid side: `{0}`")]
    InvalidSide(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FoilError {
    pub fn is_no_bracketing_root(&self) -> bool {
        matches!(self, Self::NoBracketingRoot { .. })
    }

    pub fn is_convergence_failure(&self) -> bool {
        matches!(self, Self::ConvergenceFailure { .. })
    }
}

pub type Result<T> = std::result::Result<T, FoilError>;
