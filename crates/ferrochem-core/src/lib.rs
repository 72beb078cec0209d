//! # ferrochem-core
//!
//! Small-molecule graphs for featurization.
//!
//! __ferrochem-core__ provides:
//! * A SMILES reader covering the organic subset, bracket atoms, rings and branches
//! * Perception of implicit hydrogens, rings, aromaticity, conjugation, hybridization and E/Z
//! * Explicit-hydrogen expansion and reactant/product atom-map correspondence
//!
//! The main entry point is [`Molecule`]. Featurizers consume molecules through the
//! [`MolecularGraph`] trait.
//!
mod atom;
mod bond;
mod element;
mod error;
mod graph;
mod molecule;
mod perception;
mod reaction;
mod smiles;

pub use self::atom::{Atom, ChiralTag, Hybridization};
pub use self::bond::{Bond, BondStereo, BondType};
pub use self::element::Element;
pub use self::error::MoleculeError;
pub use self::graph::{AtomView, BondView, MolecularGraph};
pub use self::molecule::{Molecule, MoleculeBuilder};
pub use self::reaction::{map_reac_to_prod, ReactionAtomMapping};
