//! End-to-end integration tests for FieldMask
//!
//! These tests wire configuration loading to both masking subsystems to
//! verify whole payloads, not single components.

#[cfg(test)]
mod e2e_tests {
    use fieldmask_config_file::FileConfigLoader;
    use serde_json::json;

    #[test]
    fn test_e2e_config_to_both_subsystems() {
        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        std::fs::write(
            file.path(),
            r#"
masking:
  mappings:
    common:
      - path: pfmidata.rlno
        masking_type: type_rlno
    NCDP_CUSAFT10A0:
      - jsonPath: CUSAFT_IN.CUSAFT_IN_SUB.acno
        maskingType: type_account
legacy:
  sensitive_keys: [abc, xyz]
"#,
        )
        .unwrap();

        let config = FileConfigLoader::new(file.path()).unwrap().load().unwrap();

        let mut payload = json!({
            "pfmidata": {"rlno": "1234567890123", "svc_id": "CUSAFT10A0"},
            "CUSAFT_IN": {"CUSAFT_IN_SUB": [
                {"acno": "1234567890", "name": "김철수"},
                {"acno": "0987654321", "name": "이영희"}
            ]}
        });
        config
            .path_masker()
            .apply_masking("NCDP_CUSAFT10A0", &mut payload);

        assert_eq!(
            payload,
            json!({
                "pfmidata": {"rlno": "<Protected_Mci_Data>", "svc_id": "CUSAFT10A0"},
                "CUSAFT_IN": {"CUSAFT_IN_SUB": [
                    {"acno": "<Protected_Mci_Data>", "name": "김철수"},
                    {"acno": "<Protected_Mci_Data>", "name": "이영희"}
                ]}
            })
        );

        let masked = config
            .legacy_masker()
            .mask("[abc=secret, xyz=password, test=value]")
            .unwrap();
        assert_eq!(masked, "[abc=<Masked>, xyz=<Masked>, test=value]");
    }
}
