use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Bond
///
/// Struct for creating Bonds of type [BondType]. Ring membership, conjugation and
/// stereo are assigned when the owning [`Molecule`](crate::Molecule) is built.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Bond {
    begin: usize,
    end: usize,
    bond_type: BondType,
    is_conjugated: bool,
    is_in_ring: bool,
    stereo: BondStereo,
}

impl Bond {
    pub fn new(begin: usize, end: usize, bond_type: BondType) -> Self {
        Bond {
            begin,
            end,
            bond_type,
            is_conjugated: false,
            is_in_ring: false,
            stereo: BondStereo::None,
        }
    }
    pub fn get_atom_indices(&self) -> (usize, usize) {
        (self.begin, self.end)
    }
    pub fn begin_atom_idx(&self) -> usize {
        self.begin
    }
    pub fn end_atom_idx(&self) -> usize {
        self.end
    }
    /// The atom across the bond from `idx`, if `idx` is one of its ends.
    pub fn other_atom_idx(&self, idx: usize) -> Option<usize> {
        if idx == self.begin {
            Some(self.end)
        } else if idx == self.end {
            Some(self.begin)
        } else {
            None
        }
    }
    pub fn bond_type(&self) -> BondType {
        self.bond_type
    }
    pub fn is_conjugated(&self) -> bool {
        self.is_conjugated
    }
    pub fn is_in_ring(&self) -> bool {
        self.is_in_ring
    }
    pub fn stereo(&self) -> BondStereo {
        self.stereo
    }
    pub fn with_stereo(mut self, stereo: BondStereo) -> Self {
        self.stereo = stereo;
        self
    }

    pub(crate) fn set_bond_type(&mut self, bond_type: BondType) {
        self.bond_type = bond_type;
    }
    pub(crate) fn set_conjugated(&mut self, is_conjugated: bool) {
        self.is_conjugated = is_conjugated;
    }
    pub(crate) fn set_in_ring(&mut self, is_in_ring: bool) {
        self.is_in_ring = is_in_ring;
    }
    pub(crate) fn set_stereo(&mut self, stereo: BondStereo) {
        self.stereo = stereo;
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
/// BondType:
///
/// Enum for defining bond types as they appear in SMILES.
/// - see also [rdkit](https://www.rdkit.org/docs/cppapi/classRDKit_1_1Bond.html)
pub enum BondType {
    #[strum(serialize = "SINGLE")]
    Single,
    #[strum(serialize = "DOUBLE")]
    Double,
    #[strum(serialize = "TRIPLE")]
    Triple,
    /// `$` in SMILES
    #[strum(serialize = "QUADRUPLE")]
    Quadruple,
    #[strum(serialize = "AROMATIC")]
    Aromatic,
}

impl BondType {
    pub fn match_bond(bond_int: u8) -> Option<BondType> {
        match bond_int {
            1 => Some(BondType::Single),
            2 => Some(BondType::Double),
            3 => Some(BondType::Triple),
            4 => Some(BondType::Quadruple),
            _ => None,
        }
    }

    /// Valence contribution, aromatic bonds counting 1.5.
    pub fn order(&self) -> f64 {
        match self {
            BondType::Single => 1.0,
            BondType::Double => 2.0,
            BondType::Triple => 3.0,
            BondType::Quadruple => 4.0,
            BondType::Aromatic => 1.5,
        }
    }

    /// Number of pi bonds in a localized (non-aromatic) bond.
    pub(crate) fn pi_bonds(&self) -> u8 {
        match self {
            BondType::Single | BondType::Aromatic => 0,
            BondType::Double => 1,
            BondType::Triple => 2,
            BondType::Quadruple => 3,
        }
    }

    pub(crate) fn is_multiple(&self) -> bool {
        !matches!(self, BondType::Single)
    }
}

#[repr(u8)]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
/// Double-bond stereo, numbered like RDKit's `BondStereo`.
pub enum BondStereo {
    #[default]
    #[strum(serialize = "STEREONONE")]
    None = 0,
    #[strum(serialize = "STEREOANY")]
    Any = 1,
    #[strum(serialize = "STEREOZ")]
    Z = 2,
    #[strum(serialize = "STEREOE")]
    E = 3,
    #[strum(serialize = "STEREOCIS")]
    Cis = 4,
    #[strum(serialize = "STEREOTRANS")]
    Trans = 5,
}

impl BondStereo {
    pub fn to_int(&self) -> i32 {
        *self as i32
    }
}
