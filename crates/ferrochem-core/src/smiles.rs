//! SMILES reader.
//!
//! Covers the organic subset, bracket atoms (isotope, chirality, hydrogen
//! count, charge, atom map), branches, ring closures including `%nn`, all bond
//! symbols and `.`-separated fragments. Input stops at the first whitespace so
//! a trailing name column is ignored.
use crate::atom::{Atom, ChiralTag};
use crate::bond::BondType;
use crate::element::Element;
use crate::error::MoleculeError;
use crate::molecule::{Molecule, MoleculeBuilder};
use crate::perception::BondDirection;
use std::collections::BTreeMap;

pub(crate) fn parse_smiles(smiles: &str) -> Result<Molecule, MoleculeError> {
    let input = smiles.split_whitespace().next().unwrap_or_default();
    if input.is_empty() {
        return Err(MoleculeError::EmptySmiles);
    }
    SmilesParser::new(input).parse()
}

#[derive(Debug, Clone, Copy)]
struct PendingBond {
    bond_type: Option<BondType>,
    direction: Option<BondDirection>,
    position: usize,
}

#[derive(Debug, Clone, Copy)]
struct RingOpening {
    atom: usize,
    bond: Option<PendingBond>,
}

struct SmilesParser {
    chars: Vec<char>,
    pos: usize,
    builder: MoleculeBuilder,
    aromatic: Vec<bool>,
    previous: Option<usize>,
    pending: Option<PendingBond>,
    branches: Vec<(usize, usize)>,
    rings: BTreeMap<u16, RingOpening>,
}

impl SmilesParser {
    fn new(input: &str) -> Self {
        SmilesParser {
            chars: input.chars().collect(),
            pos: 0,
            builder: MoleculeBuilder::new(),
            aromatic: Vec::new(),
            previous: None,
            pending: None,
            branches: Vec::new(),
            rings: BTreeMap::new(),
        }
    }

    fn unexpected(&self, position: usize) -> MoleculeError {
        MoleculeError::UnexpectedCharacter {
            character: self.chars[position],
            position,
        }
    }

    fn parse(mut self) -> Result<Molecule, MoleculeError> {
        while self.pos < self.chars.len() {
            match self.chars[self.pos] {
                '(' => {
                    let atom = self.previous.ok_or_else(|| self.unexpected(self.pos))?;
                    if self.pending.is_some() {
                        return Err(self.unexpected(self.pos));
                    }
                    self.branches.push((atom, self.pos));
                    self.pos += 1;
                }
                ')' => {
                    let (atom, _) = self
                        .branches
                        .pop()
                        .ok_or(MoleculeError::UnbalancedBranch(self.pos))?;
                    if let Some(pending) = self.pending {
                        return Err(MoleculeError::DanglingBond(pending.position));
                    }
                    self.previous = Some(atom);
                    self.pos += 1;
                }
                '-' | '=' | '#' | '$' | ':' | '/' | '\\' => {
                    if self.previous.is_none() || self.pending.is_some() {
                        return Err(self.unexpected(self.pos));
                    }
                    self.pending = Some(self.bond_symbol());
                    self.pos += 1;
                }
                '.' => {
                    if let Some(pending) = self.pending {
                        return Err(MoleculeError::DanglingBond(pending.position));
                    }
                    self.previous = None;
                    self.pos += 1;
                }
                '%' | '0'..='9' => self.ring_closure()?,
                '[' => {
                    let atom = self.bracket_atom()?;
                    self.attach(atom)?;
                }
                _ => {
                    let atom = self.organic_atom()?;
                    self.attach(atom)?;
                }
            }
        }

        if let Some(pending) = self.pending {
            return Err(MoleculeError::DanglingBond(pending.position));
        }
        if let Some(&(_, position)) = self.branches.last() {
            return Err(MoleculeError::UnbalancedBranch(position));
        }
        if !self.rings.is_empty() {
            return Err(MoleculeError::UnclosedRing(self.rings.keys().copied().collect()));
        }
        Ok(self.builder.build())
    }

    fn bond_symbol(&self) -> PendingBond {
        let (bond_type, direction) = match self.chars[self.pos] {
            '=' => (Some(BondType::Double), None),
            '#' => (Some(BondType::Triple), None),
            '$' => (Some(BondType::Quadruple), None),
            ':' => (Some(BondType::Aromatic), None),
            '/' => (Some(BondType::Single), Some(BondDirection::Up)),
            '\\' => (Some(BondType::Single), Some(BondDirection::Down)),
            _ => (Some(BondType::Single), None),
        };
        PendingBond {
            bond_type,
            direction,
            position: self.pos,
        }
    }

    /// Unmarked bonds between two aromatic atoms are aromatic.
    fn resolve_bond_type(&self, explicit: Option<BondType>, a1: usize, a2: usize) -> BondType {
        explicit.unwrap_or(if self.aromatic[a1] && self.aromatic[a2] {
            BondType::Aromatic
        } else {
            BondType::Single
        })
    }

    fn attach(&mut self, (atom, is_aromatic): (Atom, bool)) -> Result<(), MoleculeError> {
        let idx = self.builder.add_atom(atom);
        self.aromatic.push(is_aromatic);
        if let Some(previous) = self.previous {
            let pending = self.pending.take();
            let bond_type = self.resolve_bond_type(pending.and_then(|p| p.bond_type), previous, idx);
            let direction = pending.and_then(|p| p.direction);
            self.builder
                .add_directed_bond(previous, idx, bond_type, direction)?;
        }
        self.previous = Some(idx);
        Ok(())
    }

    fn ring_closure(&mut self) -> Result<(), MoleculeError> {
        let start = self.pos;
        let atom = self.previous.ok_or_else(|| self.unexpected(start))?;
        let number = if self.chars[start] == '%' {
            let digits: Option<u16> = self
                .chars
                .get(start + 1..start + 3)
                .filter(|d| d.iter().all(char::is_ascii_digit))
                .map(|d| d.iter().fold(0, |acc, c| acc * 10 + c.to_digit(10).unwrap_or(0) as u16));
            self.pos += 3;
            digits.ok_or_else(|| self.unexpected(start))?
        } else {
            self.pos += 1;
            self.chars[start].to_digit(10).unwrap_or(0) as u16
        };

        let pending = self.pending.take();
        match self.rings.remove(&number) {
            Some(opening) => {
                let bond_type = pending
                    .and_then(|p| p.bond_type)
                    .or_else(|| opening.bond.and_then(|p| p.bond_type));
                let bond_type = self.resolve_bond_type(bond_type, opening.atom, atom);
                // the bond runs opening -> closing; a mark written at the closing atom points the other way
                let direction = opening
                    .bond
                    .and_then(|p| p.direction)
                    .or_else(|| pending.and_then(|p| p.direction).map(|d| d.flipped()));
                self.builder
                    .add_directed_bond(opening.atom, atom, bond_type, direction)?;
            }
            None => {
                self.rings.insert(number, RingOpening { atom, bond: pending });
            }
        }
        Ok(())
    }

    fn organic_atom(&mut self) -> Result<(Atom, bool), MoleculeError> {
        let start = self.pos;
        let next = self.chars.get(start + 1).copied();
        let (symbol, is_aromatic, width) = match (self.chars[start], next) {
            ('C', Some('l')) => ("Cl", false, 2),
            ('B', Some('r')) => ("Br", false, 2),
            ('B', _) => ("B", false, 1),
            ('C', _) => ("C", false, 1),
            ('N', _) => ("N", false, 1),
            ('O', _) => ("O", false, 1),
            ('P', _) => ("P", false, 1),
            ('S', _) => ("S", false, 1),
            ('F', _) => ("F", false, 1),
            ('I', _) => ("I", false, 1),
            ('b', _) => ("B", true, 1),
            ('c', _) => ("C", true, 1),
            ('n', _) => ("N", true, 1),
            ('o', _) => ("O", true, 1),
            ('p', _) => ("P", true, 1),
            ('s', _) => ("S", true, 1),
            _ => return Err(self.unexpected(start)),
        };
        let element =
            Element::from_symbol(symbol).ok_or_else(|| MoleculeError::UnknownElement(symbol.to_string()))?;
        self.pos += width;
        Ok((Atom::new(element).with_aromatic(is_aromatic), is_aromatic))
    }

    fn read_number(&mut self, end: usize) -> Option<u32> {
        let start = self.pos;
        while self.pos < end && self.chars[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        (self.pos > start).then(|| {
            self.chars[start..self.pos]
                .iter()
                .fold(0u32, |acc, c| acc.saturating_mul(10).saturating_add(c.to_digit(10).unwrap_or(0)))
        })
    }

    fn starts_with_at(&self, pattern: &str, end: usize) -> bool {
        let pattern: Vec<char> = pattern.chars().collect();
        self.pos + pattern.len() <= end && self.chars[self.pos..self.pos + pattern.len()] == pattern[..]
    }

    /// `[` isotope? symbol chirality? hcount? charge? class? `]`
    fn bracket_atom(&mut self) -> Result<(Atom, bool), MoleculeError> {
        let open = self.pos;
        let close = self.chars[open..]
            .iter()
            .position(|&c| c == ']')
            .map(|offset| open + offset)
            .ok_or(MoleculeError::UnclosedBracket(open))?;
        self.pos = open + 1;

        let isotope = self.read_number(close);

        let symbol_start = self.pos;
        let first = *self
            .chars
            .get(symbol_start)
            .filter(|c| c.is_ascii_alphabetic() && symbol_start < close)
            .ok_or_else(|| self.unexpected(symbol_start))?;
        let second = self
            .chars
            .get(symbol_start + 1)
            .copied()
            .filter(|c| c.is_ascii_lowercase() && symbol_start + 1 < close);
        let (element, is_aromatic) = if first.is_ascii_uppercase() {
            let two_letter = second
                .map(|s| format!("{first}{s}"))
                .and_then(|symbol| Element::from_symbol(&symbol));
            match two_letter {
                Some(element) => {
                    self.pos += 2;
                    (element, false)
                }
                None => {
                    self.pos += 1;
                    let symbol = first.to_string();
                    (
                        Element::from_symbol(&symbol).ok_or(MoleculeError::UnknownElement(symbol))?,
                        false,
                    )
                }
            }
        } else {
            let aromatic_two = second.filter(|&s| matches!((first, s), ('s', 'e') | ('a', 's')));
            let symbol = match aromatic_two {
                Some(s) => {
                    self.pos += 2;
                    format!("{}{s}", first.to_ascii_uppercase())
                }
                None if matches!(first, 'b' | 'c' | 'n' | 'o' | 'p' | 's') => {
                    self.pos += 1;
                    first.to_ascii_uppercase().to_string()
                }
                None => return Err(MoleculeError::UnknownElement(first.to_string())),
            };
            (
                Element::from_symbol(&symbol).ok_or(MoleculeError::UnknownElement(symbol))?,
                true,
            )
        };

        let mut chiral_tag = ChiralTag::Unspecified;
        if self.pos < close && self.chars[self.pos] == '@' {
            self.pos += 1;
            chiral_tag = ChiralTag::CounterClockwise;
            if self.pos < close && self.chars[self.pos] == '@' {
                self.pos += 1;
                chiral_tag = ChiralTag::Clockwise;
            } else if let Some(class) = ["TH", "AL", "SP", "TB", "OH"]
                .into_iter()
                .find(|class| self.starts_with_at(class, close))
            {
                self.pos += 2;
                chiral_tag = match (class, self.read_number(close)) {
                    ("TH", Some(1)) => ChiralTag::CounterClockwise,
                    ("TH", Some(2)) => ChiralTag::Clockwise,
                    _ => ChiralTag::Other,
                };
            }
        }

        let mut num_hs = 0;
        if self.pos < close && self.chars[self.pos] == 'H' {
            self.pos += 1;
            num_hs = self.read_number(close).unwrap_or(1).min(u8::MAX as u32) as u8;
        }

        let mut charge: i32 = 0;
        if self.pos < close && matches!(self.chars[self.pos], '+' | '-') {
            let sign_char = self.chars[self.pos];
            let sign = if sign_char == '+' { 1 } else { -1 };
            self.pos += 1;
            charge = match self.read_number(close) {
                Some(magnitude) => sign * magnitude.min(i8::MAX as u32) as i32,
                None => {
                    let mut count = 1;
                    while self.pos < close && self.chars[self.pos] == sign_char {
                        count += 1;
                        self.pos += 1;
                    }
                    sign * count
                }
            };
        }

        let mut map_number = 0;
        if self.pos < close && self.chars[self.pos] == ':' {
            self.pos += 1;
            map_number = self.read_number(close).ok_or_else(|| self.unexpected(self.pos))?;
        }

        if self.pos != close {
            return Err(self.unexpected(self.pos));
        }
        self.pos = close + 1;

        let mut atom = Atom::new(element)
            .with_aromatic(is_aromatic)
            .with_explicit_hs(num_hs)
            .with_formal_charge(charge.clamp(i8::MIN as i32, i8::MAX as i32) as i8)
            .with_chiral_tag(chiral_tag)
            .with_map_number(map_number);
        if let Some(isotope) = isotope {
            atom = atom.with_isotope(isotope.min(u16::MAX as u32) as u16);
        }
        Ok((atom, is_aromatic))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bond::BondType;
    use crate::graph::MolecularGraph;
    use approx::assert_relative_eq;

    #[test]
    fn test_organic_subset() {
        let mol = parse_smiles("ClCCBr").unwrap();
        let symbols: Vec<&str> = mol.get_atoms().iter().map(|a| a.symbol()).collect();
        assert_eq!(symbols, vec!["Cl", "C", "C", "Br"]);
        assert_eq!(mol.num_bonds(), 3);
    }

    #[test]
    fn test_branches_and_rings() {
        let mol = parse_smiles("CC(C)(C)C").unwrap();
        assert_eq!(mol.degree(1), 4);

        let cyclopropane = parse_smiles("C1CC1").unwrap();
        assert_eq!(cyclopropane.num_bonds(), 3);
        assert!(cyclopropane.bond_between(0, 2).is_some());

        let percent = parse_smiles("C%10CCCC%10").unwrap();
        assert!(percent.bond_between(0, 4).unwrap().is_in_ring);

        let ring_bond_order = parse_smiles("C=1CCCC1").unwrap();
        assert_eq!(ring_bond_order.bond_between(0, 4).unwrap().bond_type, BondType::Double);
    }

    #[test]
    fn test_bracket_atoms() {
        let mol = parse_smiles("[13CH3:7][NH3+].[O-2]").unwrap();
        let carbon = mol.get_atom(0).unwrap();
        assert_eq!(carbon.isotope(), Some(13));
        assert_eq!(carbon.explicit_hs(), 3);
        assert_eq!(carbon.map_number(), 7);
        assert_relative_eq!(carbon.mass(), 13.0);
        let nitrogen = mol.get_atom(1).unwrap();
        assert_eq!(nitrogen.formal_charge(), 1);
        assert_eq!(nitrogen.total_num_hs(), 3);
        assert_eq!(mol.get_atom(2).unwrap().formal_charge(), -2);
        assert_eq!(mol.num_bonds(), 1);

        let double_plus = parse_smiles("[Fe++]").unwrap();
        assert_eq!(double_plus.get_atom(0).unwrap().formal_charge(), 2);
    }

    #[test]
    fn test_chirality() {
        let mol = parse_smiles("N[C@@H](C)C(=O)O").unwrap();
        assert_eq!(mol.get_atom(1).unwrap().chiral_tag(), ChiralTag::Clockwise);
        let mol = parse_smiles("N[C@H](C)C(=O)O").unwrap();
        assert_eq!(mol.get_atom(1).unwrap().chiral_tag(), ChiralTag::CounterClockwise);
        let mol = parse_smiles("F[C@TB1](Cl)(Br)(I)C").unwrap();
        assert_eq!(mol.get_atom(1).unwrap().chiral_tag(), ChiralTag::Other);
    }

    #[test]
    fn test_aromatic_defaults() {
        let mol = parse_smiles("c1ccccc1-c1ccccc1").unwrap();
        assert_eq!(mol.bond_between(0, 1).unwrap().bond_type, BondType::Aromatic);
        assert_eq!(mol.bond_between(5, 6).unwrap().bond_type, BondType::Single);
        let selenophene = parse_smiles("c1cc[se]c1").unwrap();
        assert_eq!(selenophene.get_atom(3).unwrap().symbol(), "Se");
    }

    #[test]
    fn test_whitespace_terminates() {
        let mol = parse_smiles("CCO ethanol").unwrap();
        assert_eq!(mol.num_atoms(), 3);
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_smiles("").unwrap_err(), MoleculeError::EmptySmiles);
        assert_eq!(parse_smiles("   ").unwrap_err(), MoleculeError::EmptySmiles);
        assert_eq!(parse_smiles("C1CC").unwrap_err(), MoleculeError::UnclosedRing(vec![1]));
        assert_eq!(parse_smiles("CC(C").unwrap_err(), MoleculeError::UnbalancedBranch(2));
        assert_eq!(parse_smiles("CC)").unwrap_err(), MoleculeError::UnbalancedBranch(2));
        assert_eq!(parse_smiles("C[NH").unwrap_err(), MoleculeError::UnclosedBracket(1));
        assert_eq!(parse_smiles("CC=").unwrap_err(), MoleculeError::DanglingBond(2));
        assert_eq!(
            parse_smiles("[Xx]").unwrap_err(),
            MoleculeError::UnknownElement("X".to_string())
        );
        assert_eq!(
            parse_smiles("CQ").unwrap_err(),
            MoleculeError::UnexpectedCharacter { character: 'Q', position: 1 }
        );
        assert!(parse_smiles("not a smiles").is_err());
    }
}
