//! Batch featurization over mixed SMILES / molecule input.
use crate::error::FeaturizerError;
use ferrochem_core::Molecule;

/// One featurizer input.
#[derive(Debug, Clone, PartialEq)]
pub enum Datapoint {
    Molecule(Molecule),
    Smiles(String),
}

impl From<Molecule> for Datapoint {
    fn from(mol: Molecule) -> Self {
        Datapoint::Molecule(mol)
    }
}

impl From<&str> for Datapoint {
    fn from(smiles: &str) -> Self {
        Datapoint::Smiles(smiles.to_string())
    }
}

impl From<String> for Datapoint {
    fn from(smiles: String) -> Self {
        Datapoint::Smiles(smiles)
    }
}

/// A featurizer that turns one molecule into one output record.
pub trait MolecularFeaturizer {
    type Output;

    fn featurize_datapoint(&self, datapoint: &Datapoint) -> Result<Self::Output, FeaturizerError>;

    /// Featurize every datapoint; failures are logged and become `None`.
    ///
    /// SMILES are parsed first. A SMILES that does not parse is handed over
    /// as-is, so the featurizer reports it as invalid input.
    fn featurize(&self, datapoints: &[Datapoint]) -> Vec<Option<Self::Output>> {
        datapoints
            .iter()
            .enumerate()
            .map(|(idx, datapoint)| {
                let parsed;
                let datapoint = match datapoint {
                    Datapoint::Smiles(smiles) => match Molecule::from_smiles(smiles) {
                        Ok(mol) => {
                            parsed = Datapoint::Molecule(mol);
                            &parsed
                        }
                        Err(err) => {
                            log::debug!("could not parse SMILES {smiles:?}: {err}");
                            datapoint
                        }
                    },
                    Datapoint::Molecule(_) => datapoint,
                };
                match self.featurize_datapoint(datapoint) {
                    Ok(output) => Some(output),
                    Err(err) => {
                        log::warn!("Failed to featurize datapoint {idx}. Appending None. {err}");
                        None
                    }
                }
            })
            .collect()
    }
}
