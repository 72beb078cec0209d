//! Chemistry perception run once when a molecule is built.
//!
//! Order matters: implicit hydrogens are read off the kekulé bond orders, ring
//! bonds gate aromaticity, and hybridization looks at aromaticity and
//! conjugation.
use crate::atom::{Atom, Hybridization};
use crate::bond::{Bond, BondStereo, BondType};
use std::collections::{HashSet, VecDeque};

pub(crate) type Adjacency = Vec<Vec<(usize, usize)>>;

/// `/` and `\` in SMILES, recorded relative to the bond's begin -> end direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BondDirection {
    Up,
    Down,
}

impl BondDirection {
    fn sign(&self) -> i8 {
        match self {
            BondDirection::Up => 1,
            BondDirection::Down => -1,
        }
    }

    pub(crate) fn flipped(&self) -> Self {
        match self {
            BondDirection::Up => BondDirection::Down,
            BondDirection::Down => BondDirection::Up,
        }
    }
}

pub(crate) fn assign_implicit_hs(atoms: &mut [Atom], bonds: &[Bond], adjacency: &Adjacency) {
    for (idx, atom) in atoms.iter_mut().enumerate() {
        let valences = atom.element().default_valences();
        if atom.no_implicit() || valences.is_empty() {
            atom.set_implicit_hs(0);
            continue;
        }
        // N+ behaves like C, O- like F; C+ and C- both lose one bonding slot
        let charge = atom.formal_charge() as i16;
        let shift = match atom.element().main_group() {
            Some(group) if group >= 15 => charge,
            _ => -charge.abs(),
        };
        let bond_types = adjacency[idx].iter().map(|&(_, b)| bonds[b].bond_type());
        let implicit = if atom.is_aromatic() {
            // aromatic atoms sit on one localized pi bond; a full lowest valence means no H
            let used: i16 = bond_types
                .map(|bt| match bt {
                    BondType::Aromatic => 1,
                    other => other.pi_bonds() as i16 + 1,
                })
                .sum::<i16>()
                + 1;
            (valences[0] as i16 + shift - used).max(0)
        } else {
            let used: i16 = bond_types.map(|bt| bt.order() as i16).sum();
            valences
                .iter()
                .map(|&valence| valence as i16 + shift)
                .find(|&valence| valence >= used)
                .map_or(0, |valence| valence - used)
        };
        atom.set_implicit_hs(implicit.clamp(0, u8::MAX as i16) as u8);
    }
}

/// A bond is in a ring when its ends stay connected without it.
pub(crate) fn assign_ring_bonds(bonds: &mut [Bond], adjacency: &Adjacency) {
    let in_ring: Vec<bool> = bonds
        .iter()
        .enumerate()
        .map(|(idx, bond)| {
            let (begin, end) = bond.get_atom_indices();
            connected_without(adjacency, begin, end, idx)
        })
        .collect();
    for (bond, is_in_ring) in bonds.iter_mut().zip(in_ring) {
        bond.set_in_ring(is_in_ring);
    }
}

fn connected_without(adjacency: &Adjacency, start: usize, target: usize, skip_bond: usize) -> bool {
    let mut seen = vec![false; adjacency.len()];
    let mut queue = VecDeque::from([start]);
    seen[start] = true;
    while let Some(current) = queue.pop_front() {
        if current == target {
            return true;
        }
        for &(next, bond) in &adjacency[current] {
            if bond != skip_bond && !seen[next] {
                seen[next] = true;
                queue.push_back(next);
            }
        }
    }
    false
}

/// Simple cycles of 5 or 6 atoms made of ring bonds, each reported once,
/// starting from its lowest atom index.
pub(crate) fn small_rings(bonds: &[Bond], adjacency: &Adjacency) -> Vec<Vec<usize>> {
    fn extend(path: &mut Vec<usize>, bonds: &[Bond], adjacency: &Adjacency, rings: &mut Vec<Vec<usize>>) {
        let start = path[0];
        let last = path[path.len() - 1];
        for &(next, bond) in &adjacency[last] {
            if !bonds[bond].is_in_ring() {
                continue;
            }
            if next == start {
                if path.len() >= 5 && path[1] < last {
                    rings.push(path.clone());
                }
                continue;
            }
            if next < start || path.contains(&next) || path.len() == 6 {
                continue;
            }
            path.push(next);
            extend(path, bonds, adjacency, rings);
            path.pop();
        }
    }

    let mut rings = Vec::new();
    for start in 0..adjacency.len() {
        let mut path = vec![start];
        extend(&mut path, bonds, adjacency, &mut rings);
    }
    rings
}

fn ring_bond_indices(ring: &[usize], adjacency: &Adjacency) -> Option<Vec<usize>> {
    (0..ring.len())
        .map(|i| {
            let (a, b) = (ring[i], ring[(i + 1) % ring.len()]);
            adjacency[a]
                .iter()
                .find(|&&(n, _)| n == b)
                .map(|&(_, bond)| bond)
        })
        .collect()
}

/// Hückel (4n + 2) check over 5- and 6-membered rings of kekulé input.
///
/// Rings written in aromatic form keep their aromatic bonds untouched. Fused
/// systems are handled by repeating until no further ring flips.
pub(crate) fn perceive_aromaticity(atoms: &mut [Atom], bonds: &mut [Bond], adjacency: &Adjacency) {
    let rings: Vec<(Vec<usize>, Vec<usize>)> = small_rings(bonds, adjacency)
        .into_iter()
        .filter_map(|ring| ring_bond_indices(&ring, adjacency).map(|b| (ring, b)))
        .collect();

    loop {
        let mut changed = false;
        for (ring, ring_bonds) in &rings {
            if ring_bonds
                .iter()
                .all(|&b| bonds[b].bond_type() == BondType::Aromatic)
            {
                continue;
            }
            let ring_bond_set: HashSet<usize> = ring_bonds.iter().copied().collect();
            let electrons: Option<u8> = ring
                .iter()
                .map(|&idx| atom_pi_electrons(idx, &ring_bond_set, atoms, bonds, adjacency))
                .sum();
            if let Some(electrons) = electrons {
                if electrons >= 2 && (electrons - 2) % 4 == 0 {
                    for &idx in ring {
                        atoms[idx].set_aromatic(true);
                    }
                    for &b in ring_bonds {
                        bonds[b].set_bond_type(BondType::Aromatic);
                    }
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
}

fn atom_pi_electrons(
    idx: usize,
    ring_bonds: &HashSet<usize>,
    atoms: &[Atom],
    bonds: &[Bond],
    adjacency: &Adjacency,
) -> Option<u8> {
    let atom = &atoms[idx];
    let mut endocyclic_double = false;
    let mut exocyclic_partner = None;
    let mut has_aromatic_bond = false;
    for &(neighbor, bond) in &adjacency[idx] {
        match bonds[bond].bond_type() {
            BondType::Double if ring_bonds.contains(&bond) => endocyclic_double = true,
            BondType::Double => exocyclic_partner = Some(atoms[neighbor].atomic_number()),
            BondType::Aromatic => has_aromatic_bond = true,
            BondType::Triple | BondType::Quadruple => return None,
            BondType::Single => {}
        }
    }
    if endocyclic_double {
        return Some(1);
    }
    if let Some(partner) = exocyclic_partner {
        // C=O / C=N / C=S pointing out of the ring leaves an empty p orbital
        return matches!(partner, 7 | 8 | 16).then_some(0);
    }
    let degree = adjacency[idx].len() + atom.total_num_hs() as usize;
    match (atom.element().main_group(), atom.formal_charge()) {
        (Some(15), 0) if degree == 3 => Some(2),
        (Some(16), 0) if degree == 2 => Some(2),
        (Some(14), -1) if degree == 3 => Some(2),
        (Some(14), 1) if degree == 3 => Some(0),
        _ if has_aromatic_bond && atom.is_aromatic() => Some(1),
        _ => None,
    }
}

/// Lone-pair atoms (N, O, S, P family) that can donate into an adjacent pi system.
fn is_lone_pair_donor(idx: usize, atoms: &[Atom], bonds: &[Bond], adjacency: &Adjacency) -> bool {
    let atom = &atoms[idx];
    let degree = adjacency[idx].len() + atom.total_num_hs() as usize;
    let saturated = adjacency[idx]
        .iter()
        .all(|&(_, b)| bonds[b].bond_type() == BondType::Single);
    saturated
        && atom.formal_charge() <= 0
        && match atom.element().main_group() {
            Some(15) => degree <= 3,
            Some(16) => degree <= 2,
            _ => false,
        }
}

pub(crate) fn assign_conjugation(atoms: &[Atom], bonds: &mut [Bond], adjacency: &Adjacency) {
    let unsaturated: Vec<bool> = (0..atoms.len())
        .map(|idx| {
            adjacency[idx]
                .iter()
                .any(|&(_, b)| bonds[b].bond_type().is_multiple())
        })
        .collect();
    let donor: Vec<bool> = (0..atoms.len())
        .map(|idx| is_lone_pair_donor(idx, atoms, bonds, adjacency))
        .collect();

    let mut conjugated: Vec<bool> = bonds
        .iter()
        .map(|bond| {
            let (u, v) = bond.get_atom_indices();
            match bond.bond_type() {
                BondType::Aromatic => true,
                BondType::Single => {
                    (unsaturated[u] && (unsaturated[v] || donor[v])) || (unsaturated[v] && donor[u])
                }
                _ => false,
            }
        })
        .collect();

    // a localized multiple bond is conjugated when a conjugated single bond touches it
    let inherited: Vec<bool> = bonds
        .iter()
        .enumerate()
        .map(|(idx, bond)| {
            let (u, v) = bond.get_atom_indices();
            bond.bond_type().is_multiple()
                && !conjugated[idx]
                && [u, v].iter().any(|&end| {
                    adjacency[end].iter().any(|&(_, other)| {
                        other != idx
                            && conjugated[other]
                            && bonds[other].bond_type() == BondType::Single
                    })
                })
        })
        .collect();
    for (flag, extra) in conjugated.iter_mut().zip(inherited) {
        *flag |= extra;
    }
    for (bond, is_conjugated) in bonds.iter_mut().zip(conjugated) {
        bond.set_conjugated(is_conjugated);
    }
}

pub(crate) fn assign_hybridization(atoms: &mut [Atom], bonds: &[Bond], adjacency: &Adjacency) {
    let hybridizations: Vec<Hybridization> = (0..atoms.len())
        .map(|idx| atom_hybridization(idx, atoms, bonds, adjacency))
        .collect();
    for (atom, hybridization) in atoms.iter_mut().zip(hybridizations) {
        atom.set_hybridization(hybridization);
    }
}

fn atom_hybridization(idx: usize, atoms: &[Atom], bonds: &[Bond], adjacency: &Adjacency) -> Hybridization {
    let atom = &atoms[idx];
    let Some(group) = atom.element().main_group() else {
        return Hybridization::Unspecified;
    };
    if atom.is_aromatic() {
        return Hybridization::Sp2;
    }
    let pi_bonds: u8 = adjacency[idx]
        .iter()
        .map(|&(_, b)| bonds[b].bond_type().pi_bonds())
        .sum();
    match pi_bonds {
        0 => {}
        1 => return Hybridization::Sp2,
        _ => return Hybridization::Sp,
    }
    let conjugated_donor = is_lone_pair_donor(idx, atoms, bonds, adjacency)
        && adjacency[idx].iter().any(|&(_, b)| bonds[b].is_conjugated());
    if conjugated_donor {
        return Hybridization::Sp2;
    }

    let degree = adjacency[idx].len() + atom.total_num_hs() as usize;
    let bonding: i32 = adjacency[idx]
        .iter()
        .map(|&(_, b)| bonds[b].bond_type().order() as i32)
        .sum::<i32>()
        + atom.total_num_hs() as i32;
    let valence_electrons = (group % 10) as i32;
    let lone_pairs = ((valence_electrons - atom.formal_charge() as i32 - bonding).max(0) / 2) as usize;
    match degree + lone_pairs {
        0 => Hybridization::Unspecified,
        1 => Hybridization::S,
        2 => Hybridization::Sp,
        3 => Hybridization::Sp2,
        4 => Hybridization::Sp3,
        5 => Hybridization::Sp3d,
        6 => Hybridization::Sp3d2,
        _ => Hybridization::Other,
    }
}

/// E/Z for acyclic double bonds flanked by directional single bonds.
///
/// Each side is referenced to its highest atomic-number substituent, a
/// first-sphere approximation of CIP priority.
pub(crate) fn assign_double_bond_stereo(
    atoms: &[Atom],
    bonds: &mut [Bond],
    adjacency: &Adjacency,
    directions: &[Option<BondDirection>],
) {
    if directions.iter().all(Option::is_none) {
        return;
    }
    for idx in 0..bonds.len() {
        let bond = &bonds[idx];
        if bond.bond_type() != BondType::Double || bond.is_in_ring() {
            continue;
        }
        let (u, v) = bond.get_atom_indices();
        let sides = (
            side_sign(u, idx, atoms, bonds, adjacency, directions),
            side_sign(v, idx, atoms, bonds, adjacency, directions),
        );
        if let (Some(su), Some(sv)) = sides {
            let stereo = if su == sv { BondStereo::Z } else { BondStereo::E };
            bonds[idx].set_stereo(stereo);
        }
    }
}

fn side_sign(
    atom: usize,
    double_bond: usize,
    atoms: &[Atom],
    bonds: &[Bond],
    adjacency: &Adjacency,
    directions: &[Option<BondDirection>],
) -> Option<i8> {
    let substituents: Vec<(usize, usize)> = adjacency[atom]
        .iter()
        .filter(|&&(_, b)| b != double_bond)
        .copied()
        .collect();
    let (reference, direction) = substituents
        .iter()
        .find_map(|&(n, b)| directions[b].map(|d| ((n, b), d)))?;
    let (ref_atom, ref_bond) = reference;

    let mut sign = direction.sign();
    if bonds[ref_bond].begin_atom_idx() != atom {
        sign = -sign;
    }
    if let Some(&(other, _)) = substituents.iter().find(|&&(n, _)| n != ref_atom) {
        if atoms[other].atomic_number() > atoms[ref_atom].atomic_number() {
            sign = -sign;
        }
    }
    Some(sign)
}
