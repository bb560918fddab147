//! Override + manifest 해석 통합 테스트
//!
//! `cargo test -p mfe-core --test resolution`

use mfe_core::{
    resolve_manifest, resolve_override, ClientHints, ManifestResolver, PersistedOverrides,
    ResolutionSource, ShellFederationConfig,
};
use mfe_foundation::{Environment, Error, RegistryStore, RemoteDescriptor};

fn store() -> RegistryStore {
    RegistryStore::register(vec![
        RemoteDescriptor::new("mfe1", "Dashboard", "/mfe1", 3001),
        RemoteDescriptor::new("mfe2", "Settings", "/mfe2", 3002),
    ])
    .unwrap()
}

#[test]
fn test_session_hint_beats_persisted_end_to_end() {
    let persisted = PersistedOverrides::in_memory();
    persisted.set("mfe1", "9999").unwrap();
    let raw = persisted.raw().unwrap();

    let target = resolve_override("mfe1", "?mfe-override=mfe1:8888", raw.as_deref());
    assert_eq!(target.as_deref(), Some("http://localhost:8888"));

    let url = resolve_manifest("mfe1", &store(), target.as_deref(), &Environment::production(""))
        .unwrap();
    assert_eq!(url, "http://localhost:8888/mf-manifest.json");
}

#[test]
fn test_no_override_uses_environment() {
    let store = store();
    let target = resolve_override("mfe1", "?page=1", None);
    assert_eq!(target, None);

    assert_eq!(
        resolve_manifest("mfe1", &store, None, &Environment::production("")).unwrap(),
        "/mfe1/mf-manifest.json"
    );
    assert_eq!(
        resolve_manifest("mfe1", &store, None, &Environment::development()).unwrap(),
        "http://localhost:3001/mf-manifest.json"
    );
}

#[test]
fn test_malformed_hint_does_not_break_other_remotes() {
    let hints = ClientHints::new().with_session_query("mfe-override=mfe1&mfe-override=mfe2:4002");
    let resolver = ManifestResolver::new(store().shared(), Environment::development()).with_hints(&hints);

    let mfe1 = resolver.resolve("mfe1").unwrap();
    assert_eq!(mfe1.source, ResolutionSource::Development);
    assert_eq!(mfe1.url, "http://localhost:3001/mf-manifest.json");

    let mfe2 = resolver.resolve("mfe2").unwrap();
    assert_eq!(mfe2.source, ResolutionSource::Override);
    assert_eq!(mfe2.url, "http://localhost:4002/mf-manifest.json");
}

#[test]
fn test_override_for_unknown_remote_is_inert() {
    let hints = ClientHints::new().with_session_query("mfe-override=ghost:4000");
    let resolver = ManifestResolver::new(store().shared(), Environment::development()).with_hints(&hints);

    assert!(matches!(resolver.resolve("ghost"), Err(Error::NotFound(_))));
    assert_eq!(
        resolver.resolve_url("mfe1").unwrap(),
        "http://localhost:3001/mf-manifest.json"
    );
    assert_eq!(resolver.overrides().inert(resolver.store()).collect::<Vec<_>>(), vec!["ghost"]);
}

#[test]
fn test_shell_federation_matches_resolver() {
    let store = store();
    let env = Environment::production("https://shell.example.com");
    let config = ShellFederationConfig::from_store(&store, &env).unwrap();

    for descriptor in store.all() {
        let url = resolve_manifest(&descriptor.name, &store, None, &env).unwrap();
        assert_eq!(config.remotes[&descriptor.name], format!("{}@{}", descriptor.name, url));
    }
}
