//! The molecule interface consumed by featurizers.
//!
//! Featurizers only need a handful of per-atom and per-bond queries plus a
//! bond lookup by atom pair. [`MolecularGraph`] captures exactly that, so a
//! featurizer can run over [`Molecule`](crate::Molecule) or over any other
//! representation that can answer the same questions.
use crate::atom::{ChiralTag, Hybridization};
use crate::bond::{BondStereo, BondType};

/// Snapshot of the atom properties a featurizer reads.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomView {
    pub index: usize,
    pub atomic_num: u8,
    /// Graph degree plus attached (non-node) hydrogens.
    pub total_degree: usize,
    pub formal_charge: i8,
    pub chiral_tag: ChiralTag,
    pub total_num_hs: u8,
    pub hybridization: Hybridization,
    pub is_aromatic: bool,
    pub is_in_ring: bool,
    pub mass: f64,
}

/// Snapshot of the bond properties a featurizer reads.
#[derive(Debug, Clone, PartialEq)]
pub struct BondView {
    pub index: usize,
    pub begin: usize,
    pub end: usize,
    pub bond_type: BondType,
    pub is_conjugated: bool,
    pub is_in_ring: bool,
    pub stereo: BondStereo,
}

pub trait MolecularGraph {
    fn num_atoms(&self) -> usize;

    fn num_bonds(&self) -> usize;

    /// Atoms other than hydrogen.
    fn num_heavy_atoms(&self) -> usize;

    /// Panics if `idx >= num_atoms()`.
    fn atom(&self, idx: usize) -> AtomView;

    /// Panics if `idx >= num_bonds()`.
    fn bond(&self, idx: usize) -> BondView;

    /// Zero-based lookup; `None` when the atoms are not bonded or out of range.
    fn bond_between(&self, a1: usize, a2: usize) -> Option<BondView>;

    /// `(neighbor atom, bond index)` pairs of an atom.
    fn neighbors(&self, idx: usize) -> Vec<(usize, usize)>;

    /// Copy of the molecule with every hydrogen turned into a graph node.
    fn add_hs(&self) -> Self
    where
        Self: Sized;

    fn atoms(&self) -> impl Iterator<Item = AtomView> + '_ {
        (0..self.num_atoms()).map(move |idx| self.atom(idx))
    }

    /// Bonds in storage order, which is the order bonds were created.
    fn bonds(&self) -> impl Iterator<Item = BondView> + '_ {
        (0..self.num_bonds()).map(move |idx| self.bond(idx))
    }
}
