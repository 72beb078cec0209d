//! Directed-bond index space for D-MPNN message passing.
//!
//! Atoms are numbered from 1 and directed bonds from 1; index 0 is the padding
//! row in every emitted array. Each undirected bond `a1 < a2` becomes the
//! consecutive pair `a1 -> a2`, `a2 -> a1`, discovered by walking atom pairs in
//! lexicographic order.
use crate::constants::GraphConvConstants;
use crate::encoders::bond_features;
use crate::error::FeaturizerError;
use ferrochem_core::MolecularGraph;
use itertools::Itertools;
use ndarray::{Array2, ErrorKind, ShapeError};

/// A real directed bond, numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DirectedBond(usize);

impl DirectedBond {
    pub fn index(&self) -> usize {
        self.0
    }
}

fn emitted(bond: Option<DirectedBond>) -> i64 {
    bond.map_or(0, |b| b.0 as i64)
}

/// Mapper output.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectedBondMapping {
    /// `[num_directed + 1, atom_width + bond_fdim]`: origin-atom features then bond features.
    pub f_ini_atoms_bonds_zero_padded: Array2<f32>,
    /// `[num_directed + 1, max_in_degree]`: bonds arriving at each bond's origin atom, own reverse zeroed.
    pub mapping: Array2<i64>,
    /// `[num_atoms + 1, max_in_degree]`: bonds arriving at each atom.
    pub atom_to_incoming_bonds: Array2<i64>,
    /// Origin atom of each directed bond; entry 0 is the padding atom.
    pub bond_to_ini_atom: Vec<usize>,
    /// Reverse of each directed bond; entry 0 is 0.
    pub b2revb: Vec<usize>,
    pub max_in_degree: usize,
}

impl DirectedBondMapping {
    /// Real directed bonds, padding row excluded.
    pub fn num_directed_bonds(&self) -> usize {
        self.bond_to_ini_atom.len() - 1
    }
}

/// Running state of one mapper call.
struct MapperState {
    concat_fdim: usize,
    concat: Vec<f32>,
    incoming: Vec<Vec<DirectedBond>>,
    bond_to_ini_atom: Vec<usize>,
    b2revb: Vec<Option<DirectedBond>>,
}

impl MapperState {
    fn new(num_atoms: usize, concat_fdim: usize) -> Self {
        MapperState {
            concat_fdim,
            concat: vec![0.0; concat_fdim],
            incoming: vec![Vec::new(); num_atoms + 1],
            bond_to_ini_atom: vec![0],
            b2revb: vec![None],
        }
    }

    fn push_bond_pair(&mut self, a1: usize, a2: usize, f_atoms_zero_padded: &Array2<f32>, b_feats: &[f32]) {
        let b1 = DirectedBond(self.bond_to_ini_atom.len());
        let b2 = DirectedBond(b1.0 + 1);
        for origin in [a1, a2] {
            self.concat.extend(f_atoms_zero_padded.row(origin).iter().copied());
            self.concat.extend_from_slice(b_feats);
        }
        self.incoming[a2].push(b1);
        self.incoming[a1].push(b2);
        self.bond_to_ini_atom.extend([a1, a2]);
        self.b2revb.extend([Some(b2), Some(b1)]);
    }

    fn finish(self) -> Result<DirectedBondMapping, FeaturizerError> {
        let num_rows = self.bond_to_ini_atom.len();
        let max_in_degree = self
            .incoming
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(1);

        let mut atom_to_incoming_bonds = Array2::<i64>::zeros((self.incoming.len(), max_in_degree));
        for (atom, bonds) in self.incoming.iter().enumerate() {
            for (slot, bond) in bonds.iter().enumerate() {
                atom_to_incoming_bonds[[atom, slot]] = emitted(Some(*bond));
            }
        }

        let mut mapping = Array2::<i64>::zeros((num_rows, max_in_degree));
        for (bond, &origin) in self.bond_to_ini_atom.iter().enumerate() {
            let reverse = emitted(self.b2revb[bond]);
            let mut row = mapping.row_mut(bond);
            row.assign(&atom_to_incoming_bonds.row(origin));
            // a bond never receives a message from its own reverse
            row.mapv_inplace(|b| if b == reverse { 0 } else { b });
        }

        let f_ini_atoms_bonds_zero_padded =
            Array2::from_shape_vec((num_rows, self.concat_fdim), self.concat)?;
        Ok(DirectedBondMapping {
            f_ini_atoms_bonds_zero_padded,
            mapping,
            atom_to_incoming_bonds,
            bond_to_ini_atom: self.bond_to_ini_atom,
            b2revb: self.b2revb.into_iter().map(|b| emitted(b) as usize).collect(),
            max_in_degree,
        })
    }
}

/// Build the concatenated atom+bond table and the incoming-bond mapping.
///
/// `f_atoms_zero_padded` holds one row per atom preceded by a zero row, so row
/// `i` is atom `i - 1`.
pub fn map_directed_bonds<M: MolecularGraph>(
    mol: &M,
    f_atoms_zero_padded: &Array2<f32>,
    constants: &GraphConvConstants,
) -> Result<DirectedBondMapping, FeaturizerError> {
    let num_atoms = mol.num_atoms();
    if f_atoms_zero_padded.nrows() != num_atoms + 1 {
        return Err(ShapeError::from_kind(ErrorKind::IncompatibleShape).into());
    }
    let concat_fdim = f_atoms_zero_padded.ncols() + constants.bond_fdim();
    let mut state = MapperState::new(num_atoms, concat_fdim);

    for (a1, a2) in (1..=num_atoms).tuple_combinations() {
        let Some(bond) = mol.bond_between(a1 - 1, a2 - 1) else {
            continue;
        };
        let b_feats = bond_features(Some(&bond), constants);
        state.push_bond_pair(a1, a2, f_atoms_zero_padded, &b_feats);
    }
    state.finish()
}
