//! Atom and bond feature encoders.
//!
//! Each categorical property is one-hot encoded against an allowable list from
//! [`GraphConvConstants`]. Values outside the list land in a trailing "unknown"
//! slot when one is requested, otherwise the block stays all zeros.
use crate::constants::GraphConvConstants;
use ferrochem_core::{AtomView, BondType, BondView};
use std::fmt::Debug;

/// One-hot vector of `value` over `allowable_set`, `len + 1` wide when `include_unknown_set`.
///
/// ```
/// use ferrochem_featurizers::one_hot_encode;
///
/// assert_eq!(one_hot_encode(&2, &[0, 1, 2], false), vec![0.0, 0.0, 1.0]);
/// assert_eq!(one_hot_encode(&7, &[0, 1, 2], true), vec![0.0, 0.0, 0.0, 1.0]);
/// assert_eq!(one_hot_encode(&7, &[0, 1, 2], false), vec![0.0, 0.0, 0.0]);
/// ```
pub fn one_hot_encode<T: PartialEq + Debug>(
    value: &T,
    allowable_set: &[T],
    include_unknown_set: bool,
) -> Vec<f32> {
    let width = allowable_set.len() + usize::from(include_unknown_set);
    let mut one_hot = vec![0.0; width];
    match allowable_set.iter().position(|allowed| allowed == value) {
        Some(idx) => one_hot[idx] = 1.0,
        None if include_unknown_set => one_hot[width - 1] = 1.0,
        None => log::debug!("{value:?} is not in the allowable set {allowable_set:?}"),
    }
    one_hot
}

/// Encodes `atomic_num - 1`, so hydrogen lands in slot 0.
pub fn get_atomic_num_one_hot(atom: &AtomView, allowable_set: &[u8], include_unknown_set: bool) -> Vec<f32> {
    one_hot_encode(
        &atom.atomic_num.saturating_sub(1),
        allowable_set,
        include_unknown_set,
    )
}

pub fn get_atom_total_degree_one_hot(
    atom: &AtomView,
    allowable_set: &[usize],
    include_unknown_set: bool,
) -> Vec<f32> {
    one_hot_encode(&atom.total_degree, allowable_set, include_unknown_set)
}

pub fn get_atom_formal_charge_one_hot(
    atom: &AtomView,
    allowable_set: &[i8],
    include_unknown_set: bool,
) -> Vec<f32> {
    one_hot_encode(&atom.formal_charge, allowable_set, include_unknown_set)
}

pub fn get_atom_chiral_tag_one_hot(
    atom: &AtomView,
    allowable_set: &[i32],
    include_unknown_set: bool,
) -> Vec<f32> {
    one_hot_encode(&atom.chiral_tag.to_int(), allowable_set, include_unknown_set)
}

pub fn get_atom_total_num_hs_one_hot(
    atom: &AtomView,
    allowable_set: &[u8],
    include_unknown_set: bool,
) -> Vec<f32> {
    one_hot_encode(&atom.total_num_hs, allowable_set, include_unknown_set)
}

pub fn get_atom_hybridization_one_hot(
    atom: &AtomView,
    allowable_set: &[ferrochem_core::Hybridization],
    include_unknown_set: bool,
) -> Vec<f32> {
    one_hot_encode(&atom.hybridization, allowable_set, include_unknown_set)
}

pub fn get_atom_is_in_aromatic_one_hot(atom: &AtomView) -> Vec<f32> {
    vec![if atom.is_aromatic { 1.0 } else { 0.0 }]
}

/// Mass scaled by 0.01 so it sits on the same order as the one-hot blocks.
pub fn get_atom_mass(atom: &AtomView) -> Vec<f32> {
    vec![(atom.mass * 0.01) as f32]
}

/// Feature vector of one atom.
///
/// `None` is the padding atom and gives `atom_fdim` zeros. With `only_atom_num`
/// every block after the atomic number is zero-filled, keeping the width. A
/// functional-group k-hot vector, when given, is appended after the mass.
///
/// ```
/// use ferrochem_core::{MolecularGraph, Molecule};
/// use ferrochem_featurizers::{atom_features, GraphConvConstants, ATOM_FDIM};
///
/// let mol = Molecule::from_smiles("C").unwrap();
/// let features = atom_features(Some(&mol.atom(0)), &GraphConvConstants::default(), None, false);
/// assert_eq!(features.len(), ATOM_FDIM);
/// ```
pub fn atom_features(
    atom: Option<&AtomView>,
    constants: &GraphConvConstants,
    functional_groups: Option<&[f32]>,
    only_atom_num: bool,
) -> Vec<f32> {
    let Some(atom) = atom else {
        return vec![0.0; constants.atom_fdim()];
    };
    let mut features = get_atomic_num_one_hot(atom, &constants.atomic_num, true);
    if only_atom_num {
        features.resize(constants.atom_fdim(), 0.0);
        return features;
    }
    features.extend(get_atom_total_degree_one_hot(atom, &constants.degree, true));
    features.extend(get_atom_formal_charge_one_hot(atom, &constants.formal_charge, true));
    features.extend(get_atom_chiral_tag_one_hot(atom, &constants.chiral_tag, true));
    features.extend(get_atom_total_num_hs_one_hot(atom, &constants.num_hs, true));
    features.extend(get_atom_hybridization_one_hot(atom, &constants.hybridization, true));
    features.extend(get_atom_is_in_aromatic_one_hot(atom));
    features.extend(get_atom_mass(atom));
    if let Some(groups) = functional_groups {
        features.extend_from_slice(groups);
    }
    features
}

/// Feature vector of one bond; `None` is a missing bond, `[1, 0, ..., 0]`.
pub fn bond_features(bond: Option<&BondView>, constants: &GraphConvConstants) -> Vec<f32> {
    let Some(bond) = bond else {
        let mut missing = vec![0.0; constants.bond_fdim()];
        missing[0] = 1.0;
        return missing;
    };
    let flag = |value: bool| if value { 1.0 } else { 0.0 };
    let mut features = vec![
        0.0,
        flag(bond.bond_type == BondType::Single),
        flag(bond.bond_type == BondType::Double),
        flag(bond.bond_type == BondType::Triple),
        flag(bond.bond_type == BondType::Aromatic),
        flag(bond.is_conjugated),
        flag(bond.is_in_ring),
    ];
    features.extend(one_hot_encode(&bond.stereo.to_int(), &constants.bond_stereo, true));
    features
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{ATOM_FDIM, BOND_FDIM, MAX_ATOMIC_NUM};
    use approx::assert_relative_eq;
    use ferrochem_core::{MolecularGraph, Molecule};

    #[test]
    fn test_methane_atom_features() {
        let constants = GraphConvConstants::default();
        let mol = Molecule::from_smiles("C").unwrap();
        let features = atom_features(Some(&mol.atom(0)), &constants, None, false);
        assert_eq!(features.len(), ATOM_FDIM);

        // carbon -> slot 5; degree 4 -> 101 + 4; charge 0 -> 108 + 4;
        // chiral unspecified -> 114; 4 Hs -> 119 + 4; SP3 -> 125 + 2
        let hot: Vec<usize> = features[..131]
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == 1.0)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(hot, vec![5, 105, 112, 114, 123, 127]);
        assert_eq!(features[131], 0.0);
        assert_relative_eq!(features[132], 0.12011, epsilon = 1e-6);
    }

    #[test]
    fn test_padding_and_atom_num_only() {
        let constants = GraphConvConstants::default();
        assert_eq!(atom_features(None, &constants, None, false), vec![0.0; ATOM_FDIM]);

        let mol = Molecule::from_smiles("O").unwrap();
        let features = atom_features(Some(&mol.atom(0)), &constants, None, true);
        assert_eq!(features.len(), ATOM_FDIM);
        assert_eq!(features[7], 1.0);
        assert!(features[MAX_ATOMIC_NUM + 1..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_unknown_buckets() {
        let constants = GraphConvConstants::default();
        // uranium with charge +3 is outside both vocabularies
        let mol = Molecule::from_smiles("[U+3]").unwrap();
        let features = atom_features(Some(&mol.atom(0)), &constants, None, false);
        assert_eq!(features[91], 1.0);
        assert_eq!(features[101], 1.0);
        assert_eq!(features[108 + 5], 1.0);

        let heavy = Molecule::from_smiles("[Og]").unwrap();
        let features = atom_features(Some(&heavy.atom(0)), &constants, None, false);
        assert_eq!(features[MAX_ATOMIC_NUM], 1.0);
    }

    #[test]
    fn test_functional_groups_appended() {
        let constants = GraphConvConstants::default();
        let mol = Molecule::from_smiles("N").unwrap();
        let groups = [1.0, 0.0, 1.0];
        let features = atom_features(Some(&mol.atom(0)), &constants, Some(&groups), false);
        assert_eq!(features.len(), ATOM_FDIM + 3);
        assert_eq!(&features[ATOM_FDIM..], &groups);
    }

    #[test]
    fn test_bond_features() {
        let constants = GraphConvConstants::default();
        let missing = bond_features(None, &constants);
        assert_eq!(missing.len(), BOND_FDIM);
        assert_eq!(missing[0], 1.0);
        assert!(missing[1..].iter().all(|&v| v == 0.0));

        let benzene = Molecule::from_smiles("c1ccccc1").unwrap();
        let aromatic = bond_features(Some(&benzene.bond(0)), &constants);
        assert_eq!(
            aromatic,
            vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]
        );

        let trans = Molecule::from_smiles("F/C=C/F").unwrap();
        let double = bond_features(Some(&trans.bond(1)), &constants);
        assert_eq!(double[2], 1.0);
        assert_eq!(double[7 + 3], 1.0);
    }
}
