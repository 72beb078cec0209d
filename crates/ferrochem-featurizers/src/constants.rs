//! Featurization vocabularies.
use ferrochem_core::Hybridization;
use serde::{Deserialize, Serialize};

/// Atomic numbers covered by the atomic-number one-hot block.
pub const MAX_ATOMIC_NUM: usize = 100;

/// Atom feature width of the reference configuration.
pub const ATOM_FDIM: usize = 133;

/// Bond feature width: missing flag, 4 bond types, conjugated, in ring, 6 stereo values + unknown.
pub const BOND_FDIM: usize = 14;

/// Allowable values for each atom and bond feature block.
///
/// Every categorical block carries one extra "unknown" slot, so the atom width is
/// `sum(len + 1)` over the categorical blocks plus the aromatic flag and the mass.
/// The [`Default`] value is the reference vocabulary used by D-MPNN models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphConvConstants {
    /// Zero-based atomic numbers (`atomic_num - 1`).
    pub atomic_num: Vec<u8>,
    pub degree: Vec<usize>,
    pub formal_charge: Vec<i8>,
    pub chiral_tag: Vec<i32>,
    pub num_hs: Vec<u8>,
    pub hybridization: Vec<Hybridization>,
    /// `BondStereo` integer values.
    pub bond_stereo: Vec<i32>,
}

impl Default for GraphConvConstants {
    fn default() -> Self {
        GraphConvConstants {
            atomic_num: (0..MAX_ATOMIC_NUM as u8).collect(),
            degree: vec![0, 1, 2, 3, 4, 5],
            formal_charge: vec![-1, -2, 1, 2, 0],
            chiral_tag: vec![0, 1, 2, 3],
            num_hs: vec![0, 1, 2, 3, 4],
            hybridization: vec![
                Hybridization::Sp,
                Hybridization::Sp2,
                Hybridization::Sp3,
                Hybridization::Sp3d,
                Hybridization::Sp3d2,
            ],
            bond_stereo: (0..6).collect(),
        }
    }
}

impl GraphConvConstants {
    /// Width of the atomic-number block, unknown slot included.
    pub fn atomic_num_fdim(&self) -> usize {
        self.atomic_num.len() + 1
    }

    pub fn atom_fdim(&self) -> usize {
        [
            self.atomic_num.len(),
            self.degree.len(),
            self.formal_charge.len(),
            self.chiral_tag.len(),
            self.num_hs.len(),
            self.hybridization.len(),
        ]
        .iter()
        .map(|len| len + 1)
        .sum::<usize>()
            + 2
    }

    pub fn bond_fdim(&self) -> usize {
        1 + 4 + 2 + self.bond_stereo.len() + 1
    }

    pub fn concat_fdim(&self) -> usize {
        self.atom_fdim() + self.bond_fdim()
    }
}
