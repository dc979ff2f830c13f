/// An equation `residuals(x) = 0` posed over a model.
///
/// The problem owns the mapping from the solver's `N` variables to a model
/// input, and from the model's input/output pair back to `N` residuals.
pub trait EquationProblem<const N: usize> {
    type Input;
    type Output;
    type InputError: std::error::Error + Send + Sync + 'static;
    type ResidualError: std::error::Error + Send + Sync + 'static;

    /// Maps solver variables (`x`) into a model input.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be constructed from `x`.
    fn input(&self, x: &[f64; N]) -> Result<Self::Input, Self::InputError>;

    /// Computes residuals from a model input/output pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the residuals cannot be computed.
    fn residuals(
        &self,
        input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; N], Self::ResidualError>;
}
