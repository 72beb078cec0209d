//! Molecule-level descriptors appended to the graph features.
use crate::fingerprint::CircularFingerprint;
use ferrochem_core::{MolecularGraph, Molecule};
use ndarray::Array1;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString};

/// Whole-molecule featurizers that can be requested by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum FeatureGenerator {
    /// Circular fingerprint, radius 2, 2048 bits.
    #[strum(serialize = "morgan")]
    Morgan,
}

impl FeatureGenerator {
    pub fn featurize<M: MolecularGraph>(&self, mol: &M) -> Array1<f32> {
        match self {
            FeatureGenerator::Morgan => CircularFingerprint::new(2, 2048).featurize(mol),
        }
    }

    /// Output width, taken from the generator's output on methane.
    pub fn output_width(&self) -> usize {
        match Molecule::from_smiles("C") {
            Ok(methane) => self.featurize(&methane).len(),
            Err(_) => 0,
        }
    }
}

/// Concatenated output of the named generators.
///
/// Unknown names are skipped with a warning. A molecule without heavy atoms
/// gets zeros of each generator's width, and NaN entries become 0.
///
/// ```
/// use ferrochem_core::Molecule;
/// use ferrochem_featurizers::generate_global_features;
///
/// let mol = Molecule::from_smiles("CCO").unwrap();
/// let features = generate_global_features(&mol, &["morgan".to_string()]);
/// assert_eq!(features.len(), 2048);
/// ```
pub fn generate_global_features<M: MolecularGraph>(mol: &M, features_generators: &[String]) -> Array1<f32> {
    let mut global_features: Vec<f32> = Vec::new();
    for name in features_generators {
        let Ok(generator) = FeatureGenerator::from_str(name) else {
            log::warn!("{name} generator is not available in DMPNN");
            continue;
        };
        if mol.num_heavy_atoms() > 0 {
            global_features.extend(generator.featurize(mol));
        } else {
            global_features.extend(std::iter::repeat(0.0).take(generator.output_width()));
        }
    }
    Array1::from_vec(global_features).mapv_into(|v| if v.is_nan() { 0.0 } else { v })
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_generator_names() {
        assert_eq!(FeatureGenerator::from_str("morgan").unwrap(), FeatureGenerator::Morgan);
        assert!(FeatureGenerator::from_str("rdkit_desc").is_err());
        let names: Vec<String> = FeatureGenerator::iter().map(|g| g.to_string()).collect();
        assert_eq!(names, vec!["morgan"]);
    }

    #[test]
    fn test_unknown_generator_skipped() {
        let mol = Molecule::from_smiles("CCO").unwrap();
        assert_eq!(generate_global_features(&mol, &["unknown".to_string()]).len(), 0);
        let mixed = generate_global_features(&mol, &["unknown".to_string(), "morgan".to_string()]);
        assert_eq!(mixed.len(), 2048);
        assert_eq!(generate_global_features(&mol, &[]).len(), 0);
    }

    #[test]
    fn test_no_heavy_atoms_gives_zeros() {
        for smiles in ["[H][H]", "[H+]"] {
            let mol = Molecule::from_smiles(smiles).unwrap();
            let features = generate_global_features(&mol, &["morgan".to_string()]);
            assert_eq!(features.len(), 2048);
            assert!(features.iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn test_repeated_generator_concatenates() {
        let mol = Molecule::from_smiles("c1ccccc1").unwrap();
        let features = generate_global_features(&mol, &["morgan".to_string(), "morgan".to_string()]);
        assert_eq!(features.len(), 4096);
        assert_eq!(
            features.slice(ndarray::s![..2048]),
            features.slice(ndarray::s![2048..])
        );
    }
}
