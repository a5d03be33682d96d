//! Serde roundtrip and JsonSchema validation tests for stored entity types.

use std::collections::BTreeMap;

use chrono::Utc;
use pretty_assertions::assert_eq;
use schemars::schema_for;
use srp_core::compliance::{ComplianceResult, DiffEntry, FitDiff};
use srp_core::entities::{Claim, ReferenceFit, ReferenceFitItem};
use srp_core::enums::{SlotCategory, Verdict};
use srp_core::fitting::{Fitting, ModuleMultiset};
use srp_core::killmail::{Attacker, Killmail, KillmailItem, Victim};

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            // Serde roundtrip
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            // Schema validation
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn sample_killmail() -> Killmail {
    Killmail {
        killmail_id: Some(118_000_001),
        killmail_time: Some("2025-03-01T18:22:05Z".into()),
        solar_system_id: Some(30_002_187),
        victim: Victim {
            character_id: Some(2_112_000_001),
            corporation_id: Some(98_000_001),
            alliance_id: Some(99_000_001),
            ship_type_id: Some(17_738),
            items: vec![
                KillmailItem {
                    flag: 27,
                    item_type_id: Some(2_929),
                    quantity_destroyed: Some(1),
                    quantity_dropped: None,
                },
                KillmailItem {
                    flag: 5,
                    item_type_id: Some(12_779),
                    quantity_destroyed: None,
                    quantity_dropped: Some(2_000),
                },
            ],
        },
        attackers: vec![Attacker {
            character_id: None,
            corporation_id: Some(1_000_125),
            alliance_id: None,
            damage_done: Some(4_210),
            ship_type_id: None,
        }],
    }
}

fn sample_diff() -> FitDiff {
    let mut missing = BTreeMap::new();
    missing.insert(
        SlotCategory::Low,
        vec![DiffEntry {
            type_id: 2_048,
            qty: 1,
        }],
    );
    let mut extra = BTreeMap::new();
    extra.insert(
        SlotCategory::High,
        vec![DiffEntry {
            type_id: 3_001,
            qty: 2,
        }],
    );
    FitDiff { missing, extra }
}

roundtrip_and_validate!(killmail_roundtrip, Killmail, sample_killmail());

roundtrip_and_validate!(
    fitting_roundtrip,
    Fitting,
    Fitting {
        high: [(2_929, 7)].into_iter().collect(),
        mid: ModuleMultiset::new(),
        low: [(2_048, 1), (1_999, 3)].into_iter().collect(),
        rig: [(31_718, 3)].into_iter().collect(),
    }
);

roundtrip_and_validate!(
    reference_fit_roundtrip,
    ReferenceFit,
    ReferenceFit {
        id: "dft-a3f8b2c1".into(),
        ship_type_id: 17_738,
        ship_name: "Machariel".into(),
        name: "Mach - Fleet".into(),
        eft_text: "[Machariel, Mach - Fleet]\nDamage Control II\n".into(),
        active: true,
        items: vec![ReferenceFitItem {
            slot: SlotCategory::Low,
            type_id: 2_048,
            type_name: "Damage Control II".into(),
            qty: 1,
        }],
        updated_by: Some("fc-admin".into()),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    compliance_result_roundtrip,
    ComplianceResult,
    ComplianceResult {
        verdict: Some(Verdict::FitClose),
        best_fit_id: Some("dft-a3f8b2c1".into()),
        best_fit_name: Some("Mach - Fleet".into()),
        match_pct: Some(0.8125),
        no_rigs: false,
        diff: Some(sample_diff()),
        computed_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    compliance_unknown_hull_roundtrip,
    ComplianceResult,
    ComplianceResult {
        verdict: None,
        best_fit_id: None,
        best_fit_name: None,
        match_pct: None,
        no_rigs: true,
        diff: None,
        computed_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    claim_roundtrip,
    Claim,
    Claim {
        id: "clm-0b1c2d3e".into(),
        killmail_id: Some(118_000_001),
        killmail_hash: Some("abc123def".into()),
        killmail: Some(sample_killmail()),
        ship_type_id: Some(17_738),
        ship_name: Some("Machariel".into()),
        compliance: None,
        selected_fit_id: None,
        no_rigs_flag: false,
        submitted_at: Utc::now(),
    }
);
