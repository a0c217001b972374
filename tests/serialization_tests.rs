/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

use approx::assert_relative_eq;
use defcorr_rs::corrections::{
    CorrectionError, EfnvInput, ExtendedFnvCorrection, GkfoCorrection, PotentialSite, ToJsonFile,
};
use defcorr_rs::ewald::{DielectricTensor, EwaldConfig};
use defcorr_rs::lattice::Lattice;
use defcorr_rs::structure::{CalcResults, Structure};
use tempfile::tempdir;

fn efnv() -> ExtendedFnvCorrection {
    ExtendedFnvCorrection::new(
        -3,
        1.234_567_890_123,
        4.5,
        vec![
            PotentialSite::new("Mg", 2.1, 0.7, None),
            PotentialSite::new("O", 4.500_000_1, -0.3, Some(-0.4)),
            PotentialSite::new("O", 6.2, 0.1 + 0.2, Some(1.0 / 3.0)),
        ],
        -0.05,
    )
    .unwrap()
}

#[test]
fn test_efnv_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("efnv.json");

    let original = efnv();
    original.to_json_file(&path).unwrap();
    let restored = ExtendedFnvCorrection::from_json_file(&path).unwrap();

    assert_eq!(restored, original);
    assert_relative_eq!(
        restored.correction_energy().unwrap(),
        original.correction_energy().unwrap(),
        epsilon = 1e-9
    );
}

#[test]
fn test_gkfo_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gkfo.json");

    let original = GkfoCorrection::new(
        efnv(),
        1,
        0.42,
        vec![
            PotentialSite::new("Mg", 2.1, 0.01, None),
            PotentialSite::new("O", 6.2, 0.02, Some(0.015)),
        ],
        9.8,
        3.0,
    )
    .unwrap();
    original.to_json_file(&path).unwrap();
    let restored = GkfoCorrection::from_json_file(&path).unwrap();

    assert_eq!(restored.additional_charge(), 1);
    assert_eq!(restored.init_efnv_correction(), original.init_efnv_correction());
    assert_relative_eq!(
        restored.correction_energy().unwrap(),
        original.correction_energy().unwrap(),
        epsilon = 1e-9
    );
}

#[test]
fn test_input_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("input.json");

    let structure = Structure::new(
        Lattice::new([[4.0, 0.0, 0.0], [2.0, 3.4641016151377544, 0.0], [0.0, 0.0, 6.0]]).unwrap(),
        vec!["Zn".to_string(), "O".to_string()],
        vec![[0.0, 0.0, 0.0], [1.0 / 3.0, 2.0 / 3.0, 0.5]],
    )
    .unwrap();
    let input = EfnvInput {
        charge: 2,
        defect: CalcResults::new(structure.clone(), vec![-1.0, -2.0], Some(-10.5)).unwrap(),
        perfect: CalcResults::new(structure, vec![-1.1, -2.2], None).unwrap(),
        atom_mapping: EfnvInput::identity_mapping(2),
        dielectric_tensor: DielectricTensor::diagonal(8.0, 8.0, 9.5).unwrap(),
        defect_coords: [0.0, 0.0, 0.0],
        defect_region_radius: None,
        additional_correction: 0.0,
    };

    input.to_json_file(&path).unwrap();
    let restored = EfnvInput::from_json_file(&path).unwrap();

    assert_eq!(restored.defect, input.defect);
    assert_eq!(restored.perfect, input.perfect);
    assert_eq!(restored.atom_mapping, vec![(0, 0), (1, 1)]);
    assert_eq!(restored.dielectric_tensor, input.dielectric_tensor);
    assert_eq!(restored.defect_region_radius, None);
}

#[test]
fn test_config_defaults_fill_missing_fields() {
    let config: EwaldConfig = serde_json::from_str(r#"{"accuracy": 8.0}"#).unwrap();
    assert_eq!(config.accuracy, 8.0);
    assert_eq!(config.convergence, EwaldConfig::default().convergence);
    assert_eq!(config.unit_conversion, EwaldConfig::default().unit_conversion);
}

#[test]
fn test_invalid_documents_are_rejected() {
    let singular_lattice = r#"[[1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]"#;
    assert!(serde_json::from_str::<Lattice>(singular_lattice).is_err());

    let indefinite = r#"[[1.0, 0.0, 0.0], [0.0, -1.0, 0.0], [0.0, 0.0, 1.0]]"#;
    assert!(serde_json::from_str::<DielectricTensor>(indefinite).is_err());

    assert!(matches!(
        ExtendedFnvCorrection::from_json_str("{ not json"),
        Err(CorrectionError::Serialization(_))
    ));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        GkfoCorrection::from_json_file(dir.path().join("absent.json")),
        Err(CorrectionError::Io(_))
    ));
}
