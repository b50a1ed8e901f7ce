use std::path::PathBuf;

use wellsplit_core::pipeline::config::BatchConfig;
use wellsplit_core::profile::{MicroscopeProfile, ProfileParams};

#[test]
fn test_minimal_toml_uses_defaults() {
    let config: BatchConfig = toml::from_str(
        r#"
        input_dir = "frames"
        output_dir = "tiles"
        genotype_table = "plate.csv"
        "#,
    )
    .unwrap();

    assert_eq!(config.input_dir, PathBuf::from("frames"));
    assert_eq!(config.plate.wells, 384);
    assert_eq!(config.microscope, MicroscopeProfile::Cobra);
    assert_eq!(config.acquisition.channels, 3);
    assert_eq!(config.acquisition.fields_per_well, None);
    assert_eq!(config.contrast.modes, vec!["none".to_string()]);
    assert_eq!(config.contrast.file_bit_depth, 16);
    assert_eq!(config.naming.channel_symbols, vec!["W", "N", "A"]);
    assert_eq!(config.table.delimiter, ',');
    assert!(!config.execution.overwrite);
    assert_eq!(config.execution.engine_program, "convert");
}

#[test]
fn test_full_toml() {
    let config: BatchConfig = toml::from_str(
        r#"
        input_dir = "/data/run7"
        output_dir = "/data/run7/tiles"
        genotype_table = "/data/run7/plate.tsv"
        microscope = "Joe"

        [plate]
        wells = 96

        [naming]
        input_prefix = "img_"
        channel_separator = "-c"
        digit_width = 5
        group_prefix = "run7_"
        channel_symbols = ["D", "G"]

        [table]
        delimiter = "\t"
        label_column = 2

        [acquisition]
        channels = 2
        fields_per_well = 6

        [contrast]
        modes = ["auto", "none"]

        [execution]
        jobs = 3
        overwrite = true
        "#,
    )
    .unwrap();

    assert_eq!(config.plate.wells, 96);
    assert_eq!(config.microscope, MicroscopeProfile::Joe);
    assert_eq!(config.naming.digit_width, Some(5));
    assert_eq!(config.naming.channel_separator, "-c");
    // Unspecified naming fields keep their defaults.
    assert_eq!(config.naming.input_extension, "tif");
    assert_eq!(config.table.delimiter, '\t');
    assert_eq!(config.table.label_column, 2);
    assert_eq!(config.acquisition.fields_per_well, Some(6));
    assert_eq!(config.contrast.modes.len(), 2);
    assert_eq!(config.execution.jobs, Some(3));
    assert!(config.execution.overwrite);
}

#[test]
fn test_custom_microscope_toml() {
    let config: BatchConfig = toml::from_str(
        r#"
        input_dir = "a"
        output_dir = "b"
        genotype_table = "c"

        [microscope.Custom]
        tiles_per_frame = 6
        sensor_bit_depth = 14
        transform_ops = ["-crop", "3x2@", "+repage"]
        "#,
    )
    .unwrap();

    let params = config.microscope.params();
    assert_eq!(params.tiles_per_frame, 6);
    assert_eq!(params.sensor_bit_depth, 14);
    assert_eq!(params.transform_ops, vec!["-crop", "3x2@", "+repage"]);
}

#[test]
fn test_default_config_roundtrips_through_toml() {
    let mut config = BatchConfig::new("frames", "tiles", "plate.csv");
    config.acquisition.fields_per_well = Some(4);
    let text = toml::to_string_pretty(&config).unwrap();
    let parsed: BatchConfig = toml::from_str(&text).unwrap();
    assert_eq!(parsed.acquisition, config.acquisition);
    assert_eq!(parsed.naming, config.naming);
    assert_eq!(parsed.microscope, config.microscope);
}

// ---------------------------------------------------------------------------
// Microscope profiles
// ---------------------------------------------------------------------------

#[test]
fn test_builtin_profiles() {
    let cobra = MicroscopeProfile::Cobra.params();
    assert_eq!(cobra.tiles_per_frame, 4);
    assert_eq!(cobra.sensor_bit_depth, 11);
    assert!(cobra.validate().is_ok());

    let joe = MicroscopeProfile::Joe.params();
    assert_eq!(joe.tiles_per_frame, 9);
    assert!(joe.transform_ops.contains(&"-rotate".to_string()));
}

#[test]
fn test_profile_validation() {
    let zero_tiles = ProfileParams {
        tiles_per_frame: 0,
        sensor_bit_depth: 12,
        transform_ops: vec![],
    };
    assert!(zero_tiles.validate().is_err());

    let bad_depth = ProfileParams {
        tiles_per_frame: 4,
        sensor_bit_depth: 40,
        transform_ops: vec![],
    };
    assert!(bad_depth.validate().is_err());
}

#[test]
fn test_profile_display() {
    assert_eq!(MicroscopeProfile::Cobra.to_string(), "Cobra");
    let custom = MicroscopeProfile::Custom(ProfileParams {
        tiles_per_frame: 6,
        sensor_bit_depth: 14,
        transform_ops: vec![],
    });
    let s = custom.to_string();
    assert!(s.contains("Custom"), "got: {s}");
    assert!(s.contains("14-bit"), "got: {s}");
}
