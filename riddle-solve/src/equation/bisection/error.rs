use std::{error::Error as StdError, fmt};

use thiserror::Error;

use crate::equation::EvalError;

/// Errors that can occur during bisection solving.
#[derive(Debug, Error)]
pub enum Error {
    #[error("bracket endpoint {value} is not finite")]
    NonFiniteBracket { value: f64 },

    #[error("bracket has zero width at {value}")]
    ZeroWidthBracket { value: f64 },

    #[error("no sign change in bracket: f({left}) = {left_residual}, f({right}) = {right_residual}")]
    NoBracket {
        left: f64,
        right: f64,
        left_residual: f64,
        right_residual: f64,
    },

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: &'static str },

    #[error("evaluation failed while computing the {stage}")]
    Evaluation {
        stage: EvalStage,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("residual {residual} at x = {x} is not finite")]
    NonFiniteResidual { x: f64, residual: f64 },
}

/// The step of an evaluation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalStage {
    Input,
    Model,
    Residual,
}

impl fmt::Display for EvalStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EvalStage::Input => "model input",
            EvalStage::Model => "model output",
            EvalStage::Residual => "residual",
        })
    }
}

impl<IE, ME, RE> From<EvalError<IE, ME, RE>> for Error
where
    IE: StdError + Send + Sync + 'static,
    ME: StdError + Send + Sync + 'static,
    RE: StdError + Send + Sync + 'static,
{
    fn from(err: EvalError<IE, ME, RE>) -> Self {
        let (stage, source): (_, Box<dyn StdError + Send + Sync>) = match err {
            EvalError::Input(e) => (EvalStage::Input, Box::new(e)),
            EvalError::Model(e) => (EvalStage::Model, Box::new(e)),
            EvalError::Residual(e) => (EvalStage::Residual, Box::new(e)),
        };
        Self::Evaluation { stage, source }
    }
}
