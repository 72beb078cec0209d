//! # ferrochem-featurizers
//!
//! Graph featurizers for molecular message passing networks.
//!
//! __ferrochem-featurizers__ provides:
//! * Atom and bond one-hot encoders over a configurable vocabulary ([`GraphConvConstants`])
//! * Molecule-level descriptors selected by name ([`FeatureGenerator`])
//! * The directed-bond index space of D-MPNN ([`map_directed_bonds`])
//! * [`DMPNNFeaturizer`], which assembles all of the above into [`GraphData`]
//!
pub mod base;
pub mod constants;
pub mod dmpnn;
pub mod encoders;
pub mod error;
pub mod fingerprint;
pub mod global_features;
pub mod graph_data;
pub mod mapper;

pub use self::base::{Datapoint, MolecularFeaturizer};
pub use self::constants::{GraphConvConstants, ATOM_FDIM, BOND_FDIM, MAX_ATOMIC_NUM};
pub use self::dmpnn::{construct_bond_index, DMPNNFeaturizer};
pub use self::encoders::{atom_features, bond_features, one_hot_encode};
pub use self::error::FeaturizerError;
pub use self::fingerprint::CircularFingerprint;
pub use self::global_features::{generate_global_features, FeatureGenerator};
pub use self::graph_data::{GraphData, GraphTensors};
pub use self::mapper::{map_directed_bonds, DirectedBond, DirectedBondMapping};
