use crate::atom::Atom;
use crate::bond::{Bond, BondType};
use crate::element::Element;
use crate::error::MoleculeError;
use crate::graph::{AtomView, BondView, MolecularGraph};
use crate::perception::{self, Adjacency, BondDirection};
use crate::smiles;

/// Molecule
///
/// Atoms, bonds and an adjacency list. A molecule is immutable once built;
/// ring membership, aromaticity, conjugation, hybridization and implicit
/// hydrogens are perceived once by [`MoleculeBuilder::build`].
///
/// ```
/// use ferrochem_core::{MolecularGraph, Molecule};
///
/// let ethanol = Molecule::from_smiles("CCO").unwrap();
/// assert_eq!(ethanol.num_atoms(), 3);
/// assert_eq!(ethanol.total_num_hs(0), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Molecule {
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    adjacency: Adjacency,
}

impl Molecule {
    pub fn builder() -> MoleculeBuilder {
        MoleculeBuilder::new()
    }

    pub fn from_smiles(smiles: &str) -> Result<Self, MoleculeError> {
        smiles::parse_smiles(smiles)
    }

    pub fn get_atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn get_bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn get_atom(&self, idx: usize) -> Option<&Atom> {
        self.atoms.get(idx)
    }

    pub fn get_bond(&self, idx: usize) -> Option<&Bond> {
        self.bonds.get(idx)
    }

    /// Index of the bond joining `a1` and `a2`.
    pub fn bond_index_between(&self, a1: usize, a2: usize) -> Option<usize> {
        self.adjacency
            .get(a1)?
            .iter()
            .find(|&&(neighbor, _)| neighbor == a2)
            .map(|&(_, bond)| bond)
    }

    /// Number of bonded graph neighbors.
    pub fn degree(&self, idx: usize) -> usize {
        self.adjacency[idx].len()
    }

    /// Graph degree plus hydrogens that are not graph nodes.
    pub fn total_degree(&self, idx: usize) -> usize {
        self.degree(idx) + self.atoms[idx].total_num_hs() as usize
    }

    pub fn total_num_hs(&self, idx: usize) -> u8 {
        self.atoms[idx].total_num_hs()
    }

    pub fn mass(&self, idx: usize) -> f64 {
        self.atoms[idx].mass()
    }

    pub fn is_atom_in_ring(&self, idx: usize) -> bool {
        self.adjacency[idx]
            .iter()
            .any(|&(_, bond)| self.bonds[bond].is_in_ring())
    }

    pub fn heavy_atom_count(&self) -> usize {
        self.atoms.iter().filter(|a| a.atomic_number() > 1).count()
    }
}

impl MolecularGraph for Molecule {
    fn num_atoms(&self) -> usize {
        self.atoms.len()
    }

    fn num_bonds(&self) -> usize {
        self.bonds.len()
    }

    fn num_heavy_atoms(&self) -> usize {
        self.heavy_atom_count()
    }

    fn atom(&self, idx: usize) -> AtomView {
        let atom = &self.atoms[idx];
        AtomView {
            index: idx,
            atomic_num: atom.atomic_number(),
            total_degree: self.total_degree(idx),
            formal_charge: atom.formal_charge(),
            chiral_tag: atom.chiral_tag(),
            total_num_hs: atom.total_num_hs(),
            hybridization: atom.hybridization(),
            is_aromatic: atom.is_aromatic(),
            is_in_ring: self.is_atom_in_ring(idx),
            mass: atom.mass(),
        }
    }

    fn bond(&self, idx: usize) -> BondView {
        let bond = &self.bonds[idx];
        BondView {
            index: idx,
            begin: bond.begin_atom_idx(),
            end: bond.end_atom_idx(),
            bond_type: bond.bond_type(),
            is_conjugated: bond.is_conjugated(),
            is_in_ring: bond.is_in_ring(),
            stereo: bond.stereo(),
        }
    }

    fn bond_between(&self, a1: usize, a2: usize) -> Option<BondView> {
        self.bond_index_between(a1, a2).map(|idx| self.bond(idx))
    }

    fn neighbors(&self, idx: usize) -> Vec<(usize, usize)> {
        self.adjacency[idx].clone()
    }

    fn add_hs(&self) -> Self {
        let mut builder = MoleculeBuilder::new();
        for atom in &self.atoms {
            let mut heavy = atom.clone();
            heavy.clear_hs();
            builder.add_atom(heavy);
        }
        for bond in &self.bonds {
            builder.push_bond(bond.clone(), None);
        }
        for (parent, atom) in self.atoms.iter().enumerate() {
            for _ in 0..atom.total_num_hs() {
                let hydrogen = builder.add_atom(Atom::new(Element::HYDROGEN).with_no_implicit(true));
                builder.push_bond(Bond::new(parent, hydrogen, BondType::Single), None);
            }
        }
        builder.build()
    }
}

/// Collects atoms and bonds, then perceives chemistry in [`build`](Self::build).
///
/// ```
/// use ferrochem_core::{Atom, BondType, Element, MoleculeBuilder};
///
/// let mut builder = MoleculeBuilder::new();
/// let c = builder.add_atom(Atom::new(Element::CARBON));
/// let o = builder.add_atom(Atom::new(Element::from_symbol("O").unwrap()));
/// builder.add_bond(c, o, BondType::Double).unwrap();
/// let formaldehyde = builder.build();
/// assert_eq!(formaldehyde.total_num_hs(c), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MoleculeBuilder {
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    directions: Vec<Option<BondDirection>>,
}

impl MoleculeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_atoms(&self) -> usize {
        self.atoms.len()
    }

    pub fn add_atom(&mut self, atom: Atom) -> usize {
        self.atoms.push(atom);
        self.atoms.len() - 1
    }

    pub fn add_bond(&mut self, begin: usize, end: usize, bond_type: BondType) -> Result<usize, MoleculeError> {
        self.add_directed_bond(begin, end, bond_type, None)
    }

    pub(crate) fn add_directed_bond(
        &mut self,
        begin: usize,
        end: usize,
        bond_type: BondType,
        direction: Option<BondDirection>,
    ) -> Result<usize, MoleculeError> {
        let num_atoms = self.atoms.len();
        for index in [begin, end] {
            if index >= num_atoms {
                return Err(MoleculeError::AtomIndexOutOfRange { index, num_atoms });
            }
        }
        if begin == end {
            return Err(MoleculeError::SelfBond(begin));
        }
        let duplicate = self.bonds.iter().any(|bond| {
            let (b, e) = bond.get_atom_indices();
            (b == begin && e == end) || (b == end && e == begin)
        });
        if duplicate {
            return Err(MoleculeError::DuplicateBond(begin, end));
        }
        Ok(self.push_bond(Bond::new(begin, end, bond_type), direction))
    }

    fn push_bond(&mut self, bond: Bond, direction: Option<BondDirection>) -> usize {
        self.bonds.push(bond);
        self.directions.push(direction);
        self.bonds.len() - 1
    }

    pub fn build(self) -> Molecule {
        let MoleculeBuilder {
            mut atoms,
            mut bonds,
            directions,
        } = self;

        let mut adjacency: Adjacency = vec![Vec::new(); atoms.len()];
        for (idx, bond) in bonds.iter().enumerate() {
            let (begin, end) = bond.get_atom_indices();
            adjacency[begin].push((end, idx));
            adjacency[end].push((begin, idx));
        }

        perception::assign_implicit_hs(&mut atoms, &bonds, &adjacency);
        perception::assign_ring_bonds(&mut bonds, &adjacency);
        perception::perceive_aromaticity(&mut atoms, &mut bonds, &adjacency);
        perception::assign_conjugation(&atoms, &mut bonds, &adjacency);
        perception::assign_hybridization(&mut atoms, &bonds, &adjacency);
        perception::assign_double_bond_stereo(&atoms, &mut bonds, &adjacency, &directions);

        log::trace!(
            "built molecule with {} atoms, {} bonds ({} aromatic atoms)",
            atoms.len(),
            bonds.len(),
            atoms.iter().filter(|a| a.is_aromatic()).count()
        );
        Molecule {
            atoms,
            bonds,
            adjacency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::Hybridization;
    use crate::bond::BondStereo;

    #[test]
    fn test_builder_rejects_bad_bonds() {
        let mut builder = MoleculeBuilder::new();
        let a = builder.add_atom(Atom::new(Element::CARBON));
        let b = builder.add_atom(Atom::new(Element::CARBON));
        assert_eq!(builder.add_bond(a, a, BondType::Single), Err(MoleculeError::SelfBond(a)));
        assert!(builder.add_bond(a, b, BondType::Single).is_ok());
        assert_eq!(
            builder.add_bond(b, a, BondType::Double),
            Err(MoleculeError::DuplicateBond(b, a))
        );
        assert_eq!(
            builder.add_bond(a, 7, BondType::Single),
            Err(MoleculeError::AtomIndexOutOfRange { index: 7, num_atoms: 2 })
        );
    }

    #[test]
    fn test_implicit_hydrogens() {
        let mol = Molecule::from_smiles("CC(=O)O").unwrap();
        let hs: Vec<u8> = (0..mol.num_atoms()).map(|i| mol.total_num_hs(i)).collect();
        assert_eq!(hs, vec![3, 0, 0, 1]);

        let benzene = Molecule::from_smiles("c1ccccc1").unwrap();
        assert!((0..6).all(|i| benzene.total_num_hs(i) == 1));

        let pyrrole = Molecule::from_smiles("c1cc[nH]c1").unwrap();
        assert_eq!(pyrrole.total_num_hs(3), 1);
        assert_eq!(pyrrole.total_num_hs(4), 1);

        let mut builder = Molecule::builder();
        let n = builder.add_atom(Atom::new(Element::from_symbol("N").unwrap()).with_formal_charge(1));
        let o = builder.add_atom(Atom::new(Element::from_symbol("O").unwrap()).with_formal_charge(-1));
        builder.add_bond(n, o, BondType::Single).unwrap();
        let charged = builder.build();
        assert_eq!(charged.total_num_hs(n), 3);
        assert_eq!(charged.total_num_hs(o), 0);
    }

    #[test]
    fn test_ring_and_aromaticity() {
        let kekule = Molecule::from_smiles("C1=CC=CC=C1").unwrap();
        assert!(kekule.atoms().all(|a| a.is_aromatic && a.is_in_ring));
        assert!(kekule.bonds().all(|b| b.bond_type == BondType::Aromatic && b.is_conjugated));

        let cyclohexane = Molecule::from_smiles("C1CCCCC1").unwrap();
        assert!(cyclohexane.atoms().all(|a| !a.is_aromatic && a.is_in_ring));

        let toluene = Molecule::from_smiles("Cc1ccccc1").unwrap();
        assert!(!toluene.is_atom_in_ring(0));
        assert!(!toluene.bond(0).is_in_ring);
        assert!(!toluene.bond(0).is_conjugated);

        let naphthalene = Molecule::from_smiles("C1=CC=C2C=CC=CC2=C1").unwrap();
        assert!(naphthalene.atoms().all(|a| a.is_aromatic));
    }

    #[test]
    fn test_hybridization() {
        let mol = Molecule::from_smiles("C=CC#N").unwrap();
        let hybs: Vec<Hybridization> = mol.atoms().map(|a| a.hybridization).collect();
        assert_eq!(
            hybs,
            vec![Hybridization::Sp2, Hybridization::Sp2, Hybridization::Sp, Hybridization::Sp]
        );
        let methane = Molecule::from_smiles("C").unwrap();
        assert_eq!(methane.atom(0).hybridization, Hybridization::Sp3);
        let water = Molecule::from_smiles("O").unwrap();
        assert_eq!(water.atom(0).hybridization, Hybridization::Sp3);
    }

    #[test]
    fn test_double_bond_stereo() {
        let trans = Molecule::from_smiles("F/C=C/F").unwrap();
        assert_eq!(trans.bond(1).stereo, BondStereo::E);
        let cis = Molecule::from_smiles("F/C=C\\F").unwrap();
        assert_eq!(cis.bond(1).stereo, BondStereo::Z);
        let branched = Molecule::from_smiles("C(\\F)=C/F").unwrap();
        assert_eq!(branched.bond_between(0, 2).unwrap().stereo, BondStereo::E);
        let plain = Molecule::from_smiles("FC=CF").unwrap();
        assert_eq!(plain.bond(1).stereo, BondStereo::None);
    }

    #[test]
    fn test_add_hs() {
        let ethanol = Molecule::from_smiles("CCO").unwrap();
        let with_hs = ethanol.add_hs();
        assert_eq!(with_hs.num_atoms(), 9);
        assert_eq!(with_hs.num_bonds(), 8);
        assert_eq!(with_hs.num_heavy_atoms(), 3);
        // hydrogens follow the heavy atoms in parent order
        let parents: Vec<usize> = (3..9)
            .map(|h| with_hs.neighbors(h)[0].0)
            .collect();
        assert_eq!(parents, vec![0, 0, 0, 1, 1, 2]);
        assert_eq!(with_hs.atom(0).total_num_hs, 0);
        assert_eq!(with_hs.atom(0).total_degree, 4);
        assert_eq!(with_hs.atom(0).hybridization, Hybridization::Sp3);
    }
}
