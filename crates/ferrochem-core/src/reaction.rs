use crate::molecule::Molecule;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Correspondence between reactant and product atoms through atom-map numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReactionAtomMapping {
    /// Reactant atom index -> product atom index.
    pub reac_id_to_prod_id: BTreeMap<usize, usize>,
    /// Product atoms that are unmapped or whose map number is absent from the reactants.
    pub only_prod_ids: Vec<usize>,
    /// Reactant atoms that are unmapped or have no mapped partner in the products.
    pub only_reac_ids: Vec<usize>,
}

/// Pair up reactant and product atoms that share a non-zero atom-map number.
///
/// ```
/// use ferrochem_core::{map_reac_to_prod, Molecule};
///
/// let reac = Molecule::from_smiles("[CH3:1][OH:2].[Na+]").unwrap();
/// let prod = Molecule::from_smiles("[OH:2][CH2:1]C").unwrap();
/// let mapping = map_reac_to_prod(&reac, &prod);
/// assert_eq!(mapping.reac_id_to_prod_id.get(&0), Some(&1));
/// assert_eq!(mapping.only_prod_ids, vec![2]);
/// assert_eq!(mapping.only_reac_ids, vec![2]);
/// ```
pub fn map_reac_to_prod(mol_reac: &Molecule, mol_prod: &Molecule) -> ReactionAtomMapping {
    let reactant_map_numbers: HashSet<u32> = mol_reac
        .get_atoms()
        .iter()
        .map(|atom| atom.map_number())
        .collect();

    let mut prod_map_to_id: HashMap<u32, usize> = HashMap::new();
    let mut only_prod_ids = Vec::new();
    for (idx, atom) in mol_prod.get_atoms().iter().enumerate() {
        let map_number = atom.map_number();
        if map_number > 0 {
            prod_map_to_id.insert(map_number, idx);
            if !reactant_map_numbers.contains(&map_number) {
                only_prod_ids.push(idx);
            }
        } else {
            only_prod_ids.push(idx);
        }
    }

    let mut reac_id_to_prod_id = BTreeMap::new();
    let mut only_reac_ids = Vec::new();
    for (idx, atom) in mol_reac.get_atoms().iter().enumerate() {
        let map_number = atom.map_number();
        match prod_map_to_id.get(&map_number) {
            Some(&prod_idx) if map_number > 0 => {
                reac_id_to_prod_id.insert(idx, prod_idx);
            }
            _ => only_reac_ids.push(idx),
        }
    }

    ReactionAtomMapping {
        reac_id_to_prod_id,
        only_prod_ids,
        only_reac_ids,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_esterification_mapping() {
        let reac = Molecule::from_smiles("[CH3:1][C:2](=[O:3])[OH:4].[CH3:5][OH:6]").unwrap();
        let prod = Molecule::from_smiles("[CH3:1][C:2](=[O:3])[O:6][CH3:5].[OH2:4]").unwrap();
        let mapping = map_reac_to_prod(&reac, &prod);
        let expected: BTreeMap<usize, usize> =
            [(0, 0), (1, 1), (2, 2), (3, 5), (4, 4), (5, 3)].into_iter().collect();
        assert_eq!(mapping.reac_id_to_prod_id, expected);
        assert!(mapping.only_prod_ids.is_empty());
        assert!(mapping.only_reac_ids.is_empty());
    }

    #[test]
    fn test_unmapped_atoms() {
        let reac = Molecule::from_smiles("CC").unwrap();
        let prod = Molecule::from_smiles("C[CH3:1]").unwrap();
        let mapping = map_reac_to_prod(&reac, &prod);
        assert!(mapping.reac_id_to_prod_id.is_empty());
        assert_eq!(mapping.only_prod_ids, vec![0, 1]);
        assert_eq!(mapping.only_reac_ids, vec![0, 1]);
    }
}
