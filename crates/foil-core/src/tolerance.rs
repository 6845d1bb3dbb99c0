/// Convergence settings of the parameter-space solvers.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// Convergence tolerance of root-finding and minimization (in parameter units)
    pub parameter: f64,
    /// Iteration budget of a single solver run
    pub max_iterations: usize,
}

impl Tolerance {
    pub const DEFAULT_PARAMETER: f64 = 1e-6;
    pub const DEFAULT_MAX_ITERATIONS: usize = 100;

    pub fn new(parameter: f64, max_iterations: usize) -> Self {
        Self {
            parameter,
            max_iterations,
        }
    }

    pub fn default_precision() -> Self {
        Self::new(Self::DEFAULT_PARAMETER, Self::DEFAULT_MAX_ITERATIONS)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::default_precision()
    }
}
