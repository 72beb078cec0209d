use crate::element::Element;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[repr(u8)]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
/// ChiralTag:
///
/// Tetrahedral chirality as written in the input. The discriminants follow the
/// RDKit `ChiralType` numbering, which is what the atom featurizer one-hot encodes.
pub enum ChiralTag {
    #[default]
    #[strum(serialize = "CHI_UNSPECIFIED")]
    Unspecified = 0,
    /// `@@` in SMILES
    #[strum(serialize = "CHI_TETRAHEDRAL_CW")]
    Clockwise = 1,
    /// `@` in SMILES
    #[strum(serialize = "CHI_TETRAHEDRAL_CCW")]
    CounterClockwise = 2,
    #[strum(serialize = "CHI_OTHER")]
    Other = 3,
}

impl ChiralTag {
    pub fn to_int(&self) -> i32 {
        *self as i32
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
/// Orbital hybridization of an atom, named the way RDKit prints it.
pub enum Hybridization {
    #[default]
    #[strum(serialize = "UNSPECIFIED")]
    Unspecified,
    S,
    #[strum(serialize = "SP")]
    Sp,
    #[strum(serialize = "SP2")]
    Sp2,
    #[strum(serialize = "SP3")]
    Sp3,
    #[strum(serialize = "SP3D")]
    Sp3d,
    #[strum(serialize = "SP3D2")]
    Sp3d2,
    #[strum(serialize = "OTHER")]
    Other,
}

/// Atom
///
/// A single atom of a [`Molecule`](crate::Molecule). The fields set by the caller
/// (element, charge, isotope, ...) are fixed once the molecule is built; the derived
/// fields (implicit hydrogens, hybridization) are filled in by perception.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    element: Element,
    formal_charge: i8,
    isotope: Option<u16>,
    is_aromatic: bool,
    explicit_hs: u8,
    no_implicit: bool,
    chiral_tag: ChiralTag,
    map_number: u32,
    // perceived
    implicit_hs: u8,
    hybridization: Hybridization,
}

impl Atom {
    pub fn new(element: Element) -> Self {
        Atom {
            element,
            formal_charge: 0,
            isotope: None,
            is_aromatic: false,
            explicit_hs: 0,
            no_implicit: false,
            chiral_tag: ChiralTag::Unspecified,
            map_number: 0,
            implicit_hs: 0,
            hybridization: Hybridization::Unspecified,
        }
    }

    pub fn with_formal_charge(mut self, charge: i8) -> Self {
        self.formal_charge = charge;
        self
    }

    pub fn with_isotope(mut self, isotope: u16) -> Self {
        self.isotope = Some(isotope);
        self
    }

    pub fn with_aromatic(mut self, is_aromatic: bool) -> Self {
        self.is_aromatic = is_aromatic;
        self
    }

    /// Hydrogens stated explicitly (e.g. `[NH4+]`). Setting them turns off implicit hydrogens.
    pub fn with_explicit_hs(mut self, num_hs: u8) -> Self {
        self.explicit_hs = num_hs;
        self.no_implicit = true;
        self
    }

    pub fn with_no_implicit(mut self, no_implicit: bool) -> Self {
        self.no_implicit = no_implicit;
        self
    }

    pub fn with_chiral_tag(mut self, tag: ChiralTag) -> Self {
        self.chiral_tag = tag;
        self
    }

    pub fn with_map_number(mut self, map_number: u32) -> Self {
        self.map_number = map_number;
        self
    }

    pub fn element(&self) -> Element {
        self.element
    }

    pub fn atomic_number(&self) -> u8 {
        self.element.atomic_number()
    }

    pub fn symbol(&self) -> &'static str {
        self.element.symbol()
    }

    pub fn formal_charge(&self) -> i8 {
        self.formal_charge
    }

    pub fn isotope(&self) -> Option<u16> {
        self.isotope
    }

    pub fn is_aromatic(&self) -> bool {
        self.is_aromatic
    }

    pub fn explicit_hs(&self) -> u8 {
        self.explicit_hs
    }

    pub fn implicit_hs(&self) -> u8 {
        self.implicit_hs
    }

    pub fn no_implicit(&self) -> bool {
        self.no_implicit
    }

    /// Explicit plus implicit hydrogens. Hydrogens present as graph nodes are not counted.
    pub fn total_num_hs(&self) -> u8 {
        self.explicit_hs + self.implicit_hs
    }

    pub fn chiral_tag(&self) -> ChiralTag {
        self.chiral_tag
    }

    /// Atom-map number from a bracket atom (`[CH3:4]`), 0 when unmapped.
    pub fn map_number(&self) -> u32 {
        self.map_number
    }

    pub fn hybridization(&self) -> Hybridization {
        self.hybridization
    }

    /// Standard atomic weight, or the nominal isotope mass when an isotope is given.
    pub fn mass(&self) -> f64 {
        match self.isotope {
            Some(isotope) => isotope as f64,
            None => self.element.atomic_weight(),
        }
    }

    pub(crate) fn set_aromatic(&mut self, is_aromatic: bool) {
        self.is_aromatic = is_aromatic;
    }

    pub(crate) fn set_implicit_hs(&mut self, num_hs: u8) {
        self.implicit_hs = num_hs;
    }

    pub(crate) fn set_hybridization(&mut self, hybridization: Hybridization) {
        self.hybridization = hybridization;
    }

    /// Drop explicit and implicit hydrogens; used once they become graph nodes.
    pub(crate) fn clear_hs(&mut self) {
        self.explicit_hs = 0;
        self.implicit_hs = 0;
        self.no_implicit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::str::FromStr;

    #[test]
    fn test_hybridization_names() {
        assert_eq!(Hybridization::Sp3d2.to_string(), "SP3D2");
        assert_eq!(Hybridization::from_str("SP2").unwrap(), Hybridization::Sp2);
        assert_eq!(Hybridization::S.to_string(), "S");
    }

    #[test]
    fn test_chiral_tag_values() {
        assert_eq!(ChiralTag::Unspecified.to_int(), 0);
        assert_eq!(ChiralTag::Clockwise.to_int(), 1);
        assert_eq!(ChiralTag::CounterClockwise.to_int(), 2);
        assert_eq!(ChiralTag::Other.to_int(), 3);
    }

    #[test]
    fn test_explicit_hs_disable_implicit() {
        let nitrogen = Atom::new(Element::from_symbol("N").unwrap())
            .with_formal_charge(1)
            .with_explicit_hs(4);
        assert!(nitrogen.no_implicit());
        assert_eq!(nitrogen.total_num_hs(), 4);
        assert_relative_eq!(nitrogen.mass(), 14.007);
    }
}
