use riddle_core::{Model, Snapshot};
use thiserror::Error;

use super::EquationProblem;

/// The result of evaluating an equation problem at a given `x`.
#[derive(Debug, Clone)]
pub struct Evaluation<I, O, const N: usize> {
    pub x: [f64; N],
    pub residuals: [f64; N],
    pub snapshot: Snapshot<I, O>,
}

/// Errors that can occur when evaluating an equation problem.
#[derive(Debug, Error)]
pub enum EvalError<IE, ME, RE> {
    /// Failed to construct the model input from solver variables.
    #[error("failed to compute input")]
    Input(#[source] IE),
    /// The model call failed.
    #[error("model call failed")]
    Model(#[source] ME),
    /// Failed to compute residuals.
    #[error("failed to compute residuals")]
    Residual(#[source] RE),
}

/// Type alias for the result of [`evaluate`].
pub type EvaluateResult<M, P, const N: usize> = Result<
    Evaluation<<M as Model>::Input, <M as Model>::Output, N>,
    EvalError<
        <P as EquationProblem<N>>::InputError,
        <M as Model>::Error,
        <P as EquationProblem<N>>::ResidualError,
    >,
>;

/// Maps `x` to a model input, calls the model, and computes residuals.
///
/// # Errors
///
/// Returns an error if input mapping, model call, or residual computation fails.
pub fn evaluate<M, P, const N: usize>(
    model: &M,
    problem: &P,
    x: [f64; N],
) -> EvaluateResult<M, P, N>
where
    M: Model,
    P: EquationProblem<N, Input = M::Input, Output = M::Output>,
{
    let input = problem.input(&x).map_err(EvalError::Input)?;
    let output = model.call(&input).map_err(EvalError::Model)?;
    let residuals = problem
        .residuals(&input, &output)
        .map_err(EvalError::Residual)?;

    Ok(Evaluation {
        x,
        residuals,
        snapshot: Snapshot::new(input, output),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::{convert::Infallible, num::ParseIntError};

    /// Counts the characters of its input.
    struct Length;

    impl Model for Length {
        type Input = String;
        type Output = usize;
        type Error = Infallible;

        fn call(&self, input: &String) -> Result<usize, Self::Error> {
            Ok(input.len())
        }
    }

    /// Formats `x` with no decimals and wants a length of three.
    struct ThreeDigits;

    impl EquationProblem<1> for ThreeDigits {
        type Input = String;
        type Output = usize;
        type InputError = Infallible;
        type ResidualError = ParseIntError;

        fn input(&self, x: &[f64; 1]) -> Result<String, Self::InputError> {
            Ok(format!("{:.0}", x[0]))
        }

        fn residuals(&self, input: &String, output: &usize) -> Result<[f64; 1], Self::ResidualError> {
            let value: i64 = input.parse()?;
            let digits = if value < 0 { *output - 1 } else { *output };
            #[allow(clippy::cast_precision_loss)]
            Ok([digits as f64 - 3.0])
        }
    }

    #[test]
    fn captures_snapshot_and_residuals() {
        let eval = evaluate(&Length, &ThreeDigits, [12345.0]).unwrap();

        assert_eq!(eval.snapshot.input, "12345");
        assert_eq!(eval.snapshot.output, 5);
        assert_eq!(eval.residuals, [2.0]);
    }

    #[test]
    fn residual_failures_are_reported() {
        let result = evaluate(&Length, &ThreeDigits, [f64::NAN]);
        assert!(matches!(result, Err(EvalError::Residual(_))));
    }
}
