// framepair-core/src/hyper_params_test.rs

use super::*;
use approx::assert_relative_eq;

fn pair_schema() -> HyperParamSchema {
    HyperParamSchema::new()
        .with("pair_gap_max", 3)
        .with("negative_pair_ratio", 0.0)
        .with("dataset_ratios", Vec::<f64>::new())
}

#[test]
fn test_from_schema_copies_defaults() {
    let schema = pair_schema();
    let params = HyperParams::from_schema(&schema);
    assert_eq!(params.len(), 3);
    assert_eq!(params.get("pair_gap_max"), Some(&HyperParam::Int(3)));
    assert_eq!(params.get_usize("pair_gap_max").unwrap(), 3);
}

#[test]
fn test_instances_do_not_share_defaults() {
    let schema = pair_schema();
    let mut first = HyperParams::from_schema(&schema);
    let second = HyperParams::from_schema(&schema);
    first
        .merge(&HyperParams::new().with("pair_gap_max", 10))
        .unwrap();
    assert_eq!(first.get_usize("pair_gap_max").unwrap(), 10);
    assert_eq!(second.get_usize("pair_gap_max").unwrap(), 3);
    assert_eq!(schema.default_of("pair_gap_max"), Some(&HyperParam::Int(3)));
}

#[test]
fn test_merge_rejects_unknown_key_atomically() {
    let mut params = HyperParams::from_schema(&pair_schema());
    let before = params.clone();
    // "pair_gap_max" is a valid key seen before the unknown one; it must not leak in.
    let overrides = HyperParams::new()
        .with("pair_gap_max", 9)
        .with("zzz_unknown", 1);
    match params.merge(&overrides) {
        Err(FramePairError::UnknownKey { key }) => assert_eq!(key, "zzz_unknown"),
        other => panic!("Expected UnknownKey, got {:?}", other),
    }
    assert_eq!(params, before);
}

#[test]
fn test_merge_empty_overrides_is_noop() {
    let mut params = HyperParams::from_schema(&pair_schema());
    let before = params.clone();
    params.merge(&HyperParams::new()).unwrap();
    assert_eq!(params, before);
}

#[test]
fn test_schema_validate() {
    let schema = pair_schema();
    assert!(schema
        .validate(&HyperParams::new().with("negative_pair_ratio", 0.5))
        .is_ok());
    assert_eq!(
        schema.validate(&HyperParams::new().with("unknown_key", 1)),
        Err(FramePairError::UnknownKey {
            key: "unknown_key".to_string()
        })
    );
}

#[test]
fn test_typed_getters() {
    let params = HyperParams::from_schema(&pair_schema()).with("negative_pair_ratio", 1);
    // Integers coerce to floats.
    assert_relative_eq!(params.get_f64("negative_pair_ratio").unwrap(), 1.0);
    assert!(params.get_f64_list("dataset_ratios").unwrap().is_empty());

    let params = params.with("dataset_ratios", vec![1.0, 2.5]);
    let ratios = params.get_f64_list("dataset_ratios").unwrap();
    assert_relative_eq!(ratios[1], 2.5);
}

#[test]
fn test_typed_getter_mismatches() {
    let params = HyperParams::new()
        .with("gap", -1)
        .with("name", "uniform")
        .with("ratio", 1.5)
        .with("flag", true);
    assert!(matches!(
        params.get_usize("gap"),
        Err(FramePairError::InvalidHyperParam { .. })
    ));
    assert!(matches!(
        params.get_f64("name"),
        Err(FramePairError::InvalidHyperParam { .. })
    ));
    assert!(matches!(
        params.get_probability("ratio"),
        Err(FramePairError::InvalidHyperParam { .. })
    ));
    assert_eq!(params.get_str("name").unwrap(), "uniform");
    assert!(params.get_bool("flag").unwrap());
    assert!(matches!(
        params.get_bool("missing"),
        Err(FramePairError::UnknownKey { .. })
    ));
}

#[test]
fn test_display() {
    let value: HyperParam = vec![1, 2].into();
    assert_eq!(value.to_string(), "[1, 2]");
    assert_eq!(HyperParam::from("a").to_string(), "\"a\"");
}
