//! Circular (ECFP/Morgan-style) fingerprints.
use ferrochem_core::{AtomView, BondType, MolecularGraph};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Dense circular fingerprint.
///
/// Each atom starts from a hash of its local invariants and is refined `radius`
/// times by hashing in its sorted neighbor environment. Every identifier seen
/// along the way is folded onto `size` bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircularFingerprint {
    pub radius: usize,
    pub size: usize,
}

impl Default for CircularFingerprint {
    fn default() -> Self {
        CircularFingerprint {
            radius: 2,
            size: 2048,
        }
    }
}

fn hash_value<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn initial_identifier(atom: &AtomView, heavy_degree: usize) -> u64 {
    hash_value(&(
        atom.atomic_num,
        heavy_degree,
        atom.total_num_hs,
        atom.formal_charge,
        atom.is_in_ring,
        atom.is_aromatic,
    ))
}

fn bond_code(bond_type: BondType) -> u8 {
    match bond_type {
        BondType::Single => 1,
        BondType::Double => 2,
        BondType::Triple => 3,
        BondType::Quadruple => 4,
        BondType::Aromatic => 12,
    }
}

impl CircularFingerprint {
    pub fn new(radius: usize, size: usize) -> Self {
        CircularFingerprint { radius, size }
    }

    /// Indices of the set bits, ascending.
    pub fn on_bits<M: MolecularGraph>(&self, mol: &M) -> Vec<usize> {
        if self.size == 0 {
            return Vec::new();
        }
        let neighbors: Vec<Vec<(usize, usize)>> =
            (0..mol.num_atoms()).map(|idx| mol.neighbors(idx)).collect();
        let mut identifiers: Vec<u64> = mol
            .atoms()
            .map(|atom| {
                let heavy_degree = neighbors[atom.index]
                    .iter()
                    .filter(|&&(n, _)| mol.atom(n).atomic_num > 1)
                    .count();
                initial_identifier(&atom, heavy_degree)
            })
            .collect();

        let mut bits: Vec<usize> = identifiers
            .iter()
            .map(|&id| (id % self.size as u64) as usize)
            .collect();
        for iteration in 0..self.radius {
            identifiers = (0..identifiers.len())
                .map(|idx| {
                    let mut environment: Vec<(u8, u64)> = neighbors[idx]
                        .iter()
                        .map(|&(n, b)| (bond_code(mol.bond(b).bond_type), identifiers[n]))
                        .collect();
                    environment.sort_unstable();
                    hash_value(&(iteration, identifiers[idx], environment))
                })
                .collect();
            bits.extend(identifiers.iter().map(|&id| (id % self.size as u64) as usize));
        }
        bits.sort_unstable();
        bits.dedup();
        bits
    }

    /// `size`-wide 0/1 vector.
    pub fn featurize<M: MolecularGraph>(&self, mol: &M) -> Array1<f32> {
        let mut fingerprint = Array1::zeros(self.size);
        for bit in self.on_bits(mol) {
            fingerprint[bit] = 1.0;
        }
        fingerprint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrochem_core::Molecule;

    #[test]
    fn test_deterministic_and_dense() {
        let fp = CircularFingerprint::default();
        let aspirin = Molecule::from_smiles("CC(=O)Oc1ccccc1C(=O)O").unwrap();
        let first = fp.featurize(&aspirin);
        let second = fp.featurize(&aspirin);
        assert_eq!(first.len(), 2048);
        assert_eq!(first, second);
        assert!(first.iter().all(|&v| v == 0.0 || v == 1.0));
        assert!(first.sum() > 0.0);
    }

    #[test]
    fn test_methane_single_environment() {
        let fp = CircularFingerprint::default();
        let methane = Molecule::from_smiles("C").unwrap();
        // no neighbors: every radius re-hashes the same lone atom
        let bits = fp.on_bits(&methane);
        assert!(!bits.is_empty() && bits.len() <= 3);
    }

    #[test]
    fn test_kekule_and_aromatic_agree() {
        let fp = CircularFingerprint::default();
        let kekule = Molecule::from_smiles("C1=CC=CC=C1").unwrap();
        let aromatic = Molecule::from_smiles("c1ccccc1").unwrap();
        assert_eq!(fp.on_bits(&kekule), fp.on_bits(&aromatic));
    }

    #[test]
    fn test_different_molecules_differ() {
        let fp = CircularFingerprint::new(2, 1024);
        let ethanol = Molecule::from_smiles("CCO").unwrap();
        let ethylamine = Molecule::from_smiles("CCN").unwrap();
        assert_eq!(fp.featurize(&ethanol).len(), 1024);
        assert_ne!(fp.on_bits(&ethanol), fp.on_bits(&ethylamine));
    }
}
