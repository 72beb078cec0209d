use thiserror::Error;

/// Errors raised while reading SMILES or assembling a [`Molecule`](crate::Molecule).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoleculeError {
    #[error("empty SMILES string")]
    EmptySmiles,

    #[error("unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { character: char, position: usize },

    #[error("unknown element '{0}'")]
    UnknownElement(String),

    #[error("unclosed bracket atom starting at position {0}")]
    UnclosedBracket(usize),

    #[error("unbalanced parenthesis at position {0}")]
    UnbalancedBranch(usize),

    #[error("ring bond(s) {0:?} opened but never closed")]
    UnclosedRing(Vec<u16>),

    #[error("bond symbol at position {0} is not followed by an atom")]
    DanglingBond(usize),

    #[error("atom {0} cannot be bonded to itself")]
    SelfBond(usize),

    #[error("atoms {0} and {1} are already bonded")]
    DuplicateBond(usize, usize),

    #[error("atom index {index} is out of range for a molecule with {num_atoms} atoms")]
    AtomIndexOutOfRange { index: usize, num_atoms: usize },
}
