//! D-MPNN featurizer.
//!
//! Produces, per molecule, the node feature matrix and edge index of a regular
//! graph featurizer plus the directed-bond tables a D-MPNN encoder consumes:
//! the zero-padded atom table, the concatenated (origin atom, bond) table and
//! the incoming-bond mapping. See [`crate::mapper`] for the index space.
use crate::base::{Datapoint, MolecularFeaturizer};
use crate::constants::GraphConvConstants;
use crate::encoders::atom_features;
use crate::error::FeaturizerError;
use crate::global_features::generate_global_features;
use crate::graph_data::GraphData;
use crate::mapper::map_directed_bonds;
use bon::Builder;
use ferrochem_core::MolecularGraph;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// DMPNNFeaturizer
///
/// ```
/// use ferrochem_core::Molecule;
/// use ferrochem_featurizers::DMPNNFeaturizer;
///
/// let featurizer = DMPNNFeaturizer::builder()
///     .features_generators(vec!["morgan".to_string()])
///     .build();
/// let mol = Molecule::from_smiles("CCC").unwrap();
/// let graph = featurizer.featurize_graph(&mol).unwrap();
/// assert_eq!(graph.node_features.dim(), (3, 133));
/// assert_eq!(graph.num_edges(), 4);
/// assert_eq!(graph.global_features.len(), 2048);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Builder, Serialize, Deserialize)]
pub struct DMPNNFeaturizer {
    /// Names of global feature generators, e.g. `"morgan"`.
    pub features_generators: Option<Vec<String>>,
    /// Turn hydrogens into graph nodes before featurizing.
    #[builder(default)]
    #[serde(default)]
    pub is_adding_hs: bool,
    #[builder(default)]
    #[serde(default)]
    pub constants: GraphConvConstants,
}

impl DMPNNFeaturizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Featurize a molecule graph directly.
    pub fn featurize_graph<M: MolecularGraph>(&self, mol: &M) -> Result<GraphData, FeaturizerError> {
        let with_hs;
        let mol = if self.is_adding_hs {
            with_hs = mol.add_hs();
            &with_hs
        } else {
            mol
        };

        let global_features = match &self.features_generators {
            Some(generators) => generate_global_features(mol, generators),
            None => Array1::zeros(0),
        };

        let atom_fdim = self.constants.atom_fdim();
        let num_atoms = mol.num_atoms();
        let f_atoms: Vec<f32> = mol
            .atoms()
            .flat_map(|atom| atom_features(Some(&atom), &self.constants, None, false))
            .collect();
        let node_features = Array2::from_shape_vec((num_atoms, atom_fdim), f_atoms)?;

        let mut node_features_zero_padded = Array2::zeros((num_atoms + 1, atom_fdim));
        node_features_zero_padded
            .slice_mut(ndarray::s![1.., ..])
            .assign(&node_features);

        let mapped = map_directed_bonds(mol, &node_features_zero_padded, &self.constants)?;
        let edge_index = construct_bond_index(mol)?;

        Ok(GraphData {
            node_features,
            edge_index,
            global_features,
            mapping: mapped.mapping,
            node_features_zero_padded,
            concatenated_features_zero_padded: mapped.f_ini_atoms_bonds_zero_padded,
        })
    }
}

/// `[2, 2 * num_bonds]` COO edge index, each bond as `(begin, end)` then `(end, begin)`.
pub fn construct_bond_index<M: MolecularGraph>(mol: &M) -> Result<Array2<i64>, FeaturizerError> {
    let (src, dest): (Vec<i64>, Vec<i64>) = mol
        .bonds()
        .flat_map(|bond| {
            let (start, end) = (bond.begin as i64, bond.end as i64);
            [(start, end), (end, start)]
        })
        .unzip();
    let num_edges = src.len();
    Ok(Array2::from_shape_vec((2, num_edges), [src, dest].concat())?)
}

impl MolecularFeaturizer for DMPNNFeaturizer {
    type Output = GraphData;

    fn featurize_datapoint(&self, datapoint: &Datapoint) -> Result<GraphData, FeaturizerError> {
        match datapoint {
            Datapoint::Molecule(mol) => self.featurize_graph(mol),
            Datapoint::Smiles(_) => Err(FeaturizerError::InvalidInput(
                "Feature field should contain SMILES for DMPNN featurizer!".to_string(),
            )),
        }
    }
}
