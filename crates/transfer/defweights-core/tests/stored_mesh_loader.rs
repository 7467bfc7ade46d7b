use defweights_core::{parse_stored_mesh_json, MeshData};

/// it should parse and validate every manifest mesh fixture
#[test]
fn all_fixture_meshes_parse() {
    let names = defweights_test_fixtures::list_meshes();
    assert!(!names.is_empty());
    for name in names {
        let json = defweights_test_fixtures::stored_mesh_json(&name).unwrap();
        let mesh = parse_stored_mesh_json(&json).unwrap();
        assert!(mesh.validate().is_ok(), "{name}");
    }
}

/// it should load grid10 identical to the generated grid
#[test]
fn grid10_matches_generated_grid() {
    let json = defweights_test_fixtures::stored_mesh_json("grid10").unwrap();
    let mesh = parse_stored_mesh_json(&json).unwrap();
    assert_eq!(mesh.point_count(), 100);
    assert_eq!(mesh.triangles.len(), 162);
    assert_eq!(mesh, MeshData::grid(10, 10, 1.0));
}

/// it should reject malformed JSON and out-of-range triangles
#[test]
fn loader_rejects_bad_input() {
    assert!(parse_stored_mesh_json("not json").is_err());
    assert!(parse_stored_mesh_json(r#"{"points": []}"#).is_err());
    assert!(parse_stored_mesh_json(
        r#"{"points": [[0,0,0],[1,0,0]], "triangles": [[0,1,7]]}"#
    )
    .is_err());
}

/// it should error on unknown fixture names
#[test]
fn unknown_fixture_is_an_error() {
    assert!(defweights_test_fixtures::stored_mesh_json("nope").is_err());
}
