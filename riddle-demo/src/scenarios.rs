use std::{fs, path::Path};

use riddle_core::constraint::ConstraintError;
use riddle_problems::squares::Square;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Inputs for one box-counting run.
#[derive(Debug, Clone, Deserialize)]
pub struct BoxCase {
    pub apple: Vec<u32>,
    pub capacity: Vec<u32>,
}

/// Every input the demo runs, grouped by puzzle.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scenarios {
    pub boxes: Vec<BoxCase>,
    pub squares: Vec<Vec<Square>>,
    pub matrices: Vec<Vec<Vec<i32>>>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("built-in square {square:?} is invalid")]
    BuiltinSquare {
        square: [i64; 3],
        #[source]
        source: ConstraintError,
    },
}

impl Scenarios {
    /// Reads scenarios from a JSON file.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let shown = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: shown.clone(),
            source,
        })?;
        let scenarios: Self = serde_json::from_str(&text).map_err(|source| LoadError::Parse {
            path: shown.clone(),
            source,
        })?;

        info!(
            path = %shown,
            boxes = scenarios.boxes.len(),
            squares = scenarios.squares.len(),
            matrices = scenarios.matrices.len(),
            "loaded scenarios"
        );
        Ok(scenarios)
    }

    /// The worked examples used when no file is given.
    pub fn builtin() -> Result<Self, LoadError> {
        Ok(Self {
            boxes: vec![
                BoxCase {
                    apple: vec![1, 3, 2],
                    capacity: vec![4, 3, 1, 5, 2],
                },
                BoxCase {
                    apple: vec![5, 5, 5],
                    capacity: vec![2, 4, 2, 7],
                },
            ],
            squares: vec![
                builtin_squares(&[[0, 0, 1], [2, 2, 1]])?,
                builtin_squares(&[[0, 0, 2], [1, 1, 1]])?,
                builtin_squares(&[[0, 0, 2]])?,
            ],
            matrices: vec![
                vec![vec![1, -1], vec![-1, 1]],
                vec![vec![1, 2, 3], vec![-1, -2, -3], vec![1, 2, 3]],
            ],
        })
    }
}

fn builtin_squares(triples: &[[i64; 3]]) -> Result<Vec<Square>, LoadError> {
    triples
        .iter()
        .map(|&square| {
            Square::try_from(square).map_err(|source| LoadError::BuiltinSquare { square, source })
        })
        .collect()
}
