/// A deterministic function from a typed input to a typed output.
///
/// Solvers in `riddle-solve` drive a `Model` by mapping their scalar search
/// variable into `Input` and judging the returned `Output`.
pub trait Model {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Calls the model with the given input.
    ///
    /// # Errors
    ///
    /// Each model defines its own `Error` type for domain-specific failures.
    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error>;
}

/// A captured input/output pair from a model call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot<I, O> {
    pub input: I,
    pub output: O,
}

impl<I, O> Snapshot<I, O> {
    /// Creates a new snapshot from input and output values.
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    struct Doubler;

    impl Model for Doubler {
        type Input = i32;
        type Output = i32;
        type Error = Infallible;

        fn call(&self, input: &i32) -> Result<i32, Self::Error> {
            Ok(input * 2)
        }
    }

    #[test]
    fn snapshot_captures_call() {
        let input = 21;
        let output = Doubler.call(&input).unwrap();
        let snapshot = Snapshot::new(input, output);

        assert_eq!(snapshot.input, 21);
        assert_eq!(snapshot.output, 42);
    }
}
