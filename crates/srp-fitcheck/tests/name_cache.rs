//! Read-through name cache against a scripted resolver.

mod common;

use std::collections::HashMap;

use pretty_assertions::assert_eq;
use srp_config::FitCheckConfig;
use srp_core::enums::EntityKind;
use srp_db::SrpDb;
use srp_fitcheck::NameResolutionCache;

use common::{
    Call, DAMAGE_CONTROL, RIFTER, ScriptedResolver, WARP_SCRAMBLER, test_engine, test_engine_with,
};

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

#[tokio::test]
async fn misses_are_fetched_then_served_from_cache() {
    let engine = test_engine().await;
    let wanted = names(&["Warp Scrambler II", " Damage Control II ", "Unknown Thing"]);

    let first = engine.type_ids(&wanted).await.unwrap();
    assert_eq!(
        first,
        HashMap::from([
            ("Warp Scrambler II".to_string(), WARP_SCRAMBLER),
            ("Damage Control II".to_string(), DAMAGE_CONTROL),
        ])
    );
    assert_eq!(engine.resolver().calls().len(), 1);

    engine.resolver().clear_calls();
    let second = engine.type_ids(&wanted).await.unwrap();
    assert_eq!(second, first);
    // Only the name nobody knows is asked for again.
    assert_eq!(engine.resolver().calls(), vec![Call::Names(names(&["Unknown Thing"]))]);
}

#[tokio::test]
async fn unrequested_mappings_are_not_stored() {
    let engine = test_engine().await;
    engine.type_ids(&names(&["Warp Scrambler II"])).await.unwrap();

    let cached = engine.db().cached_type_ids(&names(&["Rifter"])).await.unwrap();
    assert!(cached.is_empty());
}

#[tokio::test]
async fn resolver_failure_resolves_nothing() {
    let engine = test_engine().await;
    engine.resolver().set_failing(true);

    assert!(engine.type_ids(&names(&["Warp Scrambler II"])).await.unwrap().is_empty());
    assert!(engine.type_names(&[WARP_SCRAMBLER]).await.unwrap().is_empty());
    assert!(engine.entity_names(EntityKind::Alliance, &[99_000_001]).await.unwrap().is_empty());
    assert_eq!(engine.resolver().calls().len(), 3);

    engine.resolver().set_failing(false);
    let recovered = engine.type_names(&[WARP_SCRAMBLER]).await.unwrap();
    assert_eq!(recovered.get(&WARP_SCRAMBLER).map(String::as_str), Some("Warp Scrambler II"));
}

#[tokio::test]
async fn bulk_lookups_are_batched() {
    let engine = test_engine_with(FitCheckConfig::default(), 2).await;
    let wanted = names(&["a", "b", "c", "d", "e"]);
    engine.type_ids(&wanted).await.unwrap();

    let sizes: Vec<usize> = engine
        .resolver()
        .calls()
        .into_iter()
        .map(|call| match call {
            Call::Names(batch) => batch.len(),
            other => panic!("unexpected call: {other:?}"),
        })
        .collect();
    assert_eq!(sizes, vec![2, 2, 1]);
}

#[tokio::test]
async fn fetch_cap_bounds_resolver_calls() {
    let db = SrpDb::open_local(":memory:").await.unwrap();
    let resolver = ScriptedResolver::new();
    let cache = NameResolutionCache::new(&db, &resolver, 100);

    let found = cache
        .resolve_ids_to_names(&[RIFTER, WARP_SCRAMBLER, DAMAGE_CONTROL], 2)
        .await
        .unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(
        resolver.calls(),
        vec![Call::TypeName(RIFTER), Call::TypeName(WARP_SCRAMBLER)]
    );

    let found = cache
        .resolve_names_to_ids(&["Rifter", "Warp Scrambler II", "Damage Control II"], 0)
        .await
        .unwrap();
    assert_eq!(found.len(), 2, "cached names still answer with a zero cap");
    assert_eq!(resolver.calls().len(), 2);
}

#[tokio::test]
async fn entity_names_are_scoped_by_kind() {
    let engine = test_engine().await;
    let corp = engine.entity_names(EntityKind::Corporation, &[98_000_001]).await.unwrap();
    assert_eq!(corp.get(&98_000_001).map(String::as_str), Some("Tackle Works"));

    engine.resolver().clear_calls();
    engine.entity_names(EntityKind::Corporation, &[98_000_001]).await.unwrap();
    assert!(engine.resolver().calls().is_empty());

    let alliance = engine.entity_names(EntityKind::Alliance, &[98_000_001]).await.unwrap();
    assert!(alliance.is_empty());
    assert_eq!(
        engine.resolver().calls(),
        vec![Call::Entity(EntityKind::Alliance, 98_000_001)]
    );
}

#[tokio::test]
async fn blank_and_invalid_inputs_never_reach_the_resolver() {
    let engine = test_engine().await;
    assert!(engine.type_ids(&names(&["", "   "])).await.unwrap().is_empty());
    assert!(engine.type_names(&[0, -5]).await.unwrap().is_empty());
    assert!(engine.resolver().calls().is_empty());
}
