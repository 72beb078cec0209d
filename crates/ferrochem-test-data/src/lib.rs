//! ferrochem-test-data
//!
//! Small SMILES sets embedded in the crate for use in tests.
//!
//! Each set is a `.smi` file with one `SMILES name` record per line. Lines starting
//! with `#` are comments.
use anyhow::{anyhow, Result};

/// A parsed line of a `.smi` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmilesRecord {
    pub smiles: String,
    pub name: String,
}

#[derive(Debug)]
/// Test Molecules
///
/// Example usage:
///
/// ```
/// use ferrochem_test_data::TestMolecule;
/// let records = TestMolecule::aromatics_01().records().unwrap();
/// assert_eq!(records[0].name, "benzene");
/// ```
pub struct TestMolecule {
    contents: &'static str,
    name: &'static str,
}

impl TestMolecule {
    /// Common drugs, with stereocenters and a charged quaternary amine.
    pub fn drugs_01() -> Self {
        Self {
            contents: include_str!("../data/smiles/drugs.smi"),
            name: "drugs",
        }
    }
    /// Aromatic rings, in both aromatic and kekulé form.
    pub fn aromatics_01() -> Self {
        Self {
            contents: include_str!("../data/smiles/aromatics.smi"),
            name: "aromatics",
        }
    }
    /// Single atoms, hydrogen-only molecules and disconnected salts.
    pub fn edge_cases_01() -> Self {
        Self {
            contents: include_str!("../data/smiles/edge_cases.smi"),
            name: "edge_cases",
        }
    }
    /// Malformed SMILES, one per error kind.
    pub fn invalid_01() -> Self {
        Self {
            contents: include_str!("../data/smiles/invalid.smi"),
            name: "invalid",
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn records(&self) -> Result<Vec<SmilesRecord>> {
        self.contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty() && !line.starts_with('#'))
            .map(|(lineno, line)| {
                let mut fields = line.split_whitespace();
                match (fields.next(), fields.next()) {
                    (Some(smiles), Some(name)) => Ok(SmilesRecord {
                        smiles: smiles.to_string(),
                        name: name.to_string(),
                    }),
                    _ => Err(anyhow!(
                        "{}.smi line {}: expected `SMILES name`",
                        self.name,
                        lineno + 1
                    )),
                }
            })
            .collect()
    }

    pub fn smiles(&self) -> Result<Vec<String>> {
        Ok(self.records()?.into_iter().map(|r| r.smiles).collect())
    }

    /// SMILES of the record called `name`.
    pub fn get(&self, name: &str) -> Result<String> {
        self.records()?
            .into_iter()
            .find(|r| r.name == name)
            .map(|r| r.smiles)
            .ok_or_else(|| anyhow!("no molecule named {name} in {}", self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records() -> Result<()> {
        let drugs = TestMolecule::drugs_01().records()?;
        assert_eq!(drugs.len(), 7);
        assert_eq!(drugs[0].name, "aspirin");
        assert_eq!(TestMolecule::aromatics_01().get("pyridine")?, "C1=CC=CN=C1");
        assert!(TestMolecule::edge_cases_01().get("unobtainium").is_err());
        Ok(())
    }
}
