use ferrochem_core::MoleculeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeaturizerError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("invalid molecule: {0}")]
    Molecule(#[from] MoleculeError),

    #[error("feature array shape mismatch: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("tensor conversion failed: {0}")]
    Candle(#[from] candle_core::Error),
}
