use anyhow::Result;
use ferrochem_core::{BondType, Hybridization, MolecularGraph, Molecule};
use ferrochem_test_data::TestMolecule;

#[test]
fn test_fixture_molecules_parse() -> Result<()> {
    for set in [
        TestMolecule::drugs_01(),
        TestMolecule::aromatics_01(),
        TestMolecule::edge_cases_01(),
    ] {
        for record in set.records()? {
            let mol = Molecule::from_smiles(&record.smiles)?;
            assert!(mol.num_atoms() > 0, "{} parsed empty", record.name);
        }
    }
    Ok(())
}

#[test]
fn test_invalid_fixtures_fail() -> Result<()> {
    for record in TestMolecule::invalid_01().records()? {
        assert!(
            Molecule::from_smiles(&record.smiles).is_err(),
            "{} should not parse",
            record.name
        );
    }
    Ok(())
}

#[test]
fn test_aromatic_fixtures() -> Result<()> {
    for record in TestMolecule::aromatics_01().records()? {
        let mol = Molecule::from_smiles(&record.smiles)?;
        assert!(
            mol.atoms().all(|a| a.is_aromatic && a.hybridization == Hybridization::Sp2),
            "{} should be fully aromatic",
            record.name
        );
        assert!(mol.bonds().all(|b| b.bond_type == BondType::Aromatic && b.is_in_ring));
    }
    Ok(())
}

#[test]
fn test_drug_counts() -> Result<()> {
    let drugs = TestMolecule::drugs_01();
    let aspirin = Molecule::from_smiles(&drugs.get("aspirin")?)?;
    assert_eq!(aspirin.num_heavy_atoms(), 13);
    assert_eq!(aspirin.num_bonds(), 13);
    let total_hs: usize = aspirin.atoms().map(|a| a.total_num_hs as usize).sum();
    assert_eq!(total_hs, 8);

    let caffeine = Molecule::from_smiles(&drugs.get("caffeine")?)?;
    assert_eq!(caffeine.num_atoms(), 14);

    let quat = Molecule::from_smiles(&drugs.get("ethyltrimethylammonium")?)?;
    assert_eq!(quat.atom(2).formal_charge, 1);
    assert_eq!(quat.atom(2).total_degree, 4);
    assert_eq!(quat.atom(2).hybridization, Hybridization::Sp3);
    Ok(())
}
