//! CLI 서브커맨드 구현

use anyhow::{bail, Context as _};
use mfe_core::{
    ClientHints, FileKeyValueStore, HttpRemoteLoader, LoaderMap, ManifestResolver, MountOutcome,
    MountState, PersistedOverrides, RemoteFederationConfig, RouteBinder, ShellFederationConfig,
};
use mfe_foundation::{
    Environment, JsonStore, PlatformConfig, RegistryFile, RegistryStore, SharedRegistry,
};
use std::path::Path;
use std::sync::Arc;

// ============================================================================
// Context - 한 번의 실행에 필요한 설정/레지스트리
// ============================================================================

pub struct Context {
    pub config: PlatformConfig,
    pub store: SharedRegistry,
    pub environment: Environment,
}

impl Context {
    /// 설정 로드 후 레지스트리 결정
    ///
    /// 우선순위: `--registry` 파일 → mfe.json의 remotes → .mfe-shell/remotes.json
    pub fn load(
        registry: Option<&Path>,
        production: bool,
        base_origin: Option<String>,
    ) -> anyhow::Result<Self> {
        let mut config = PlatformConfig::load().context("failed to load mfe.json")?;
        if production {
            config.production = Some(true);
        }
        if let Some(origin) = base_origin {
            config.base_origin = Some(origin);
        }

        let store = match registry {
            Some(path) => RegistryFile::load_path(path)?.into_store()?,
            None if !config.remotes.is_empty() => config.build_store()?,
            None => load_project_registry()?,
        };
        tracing::debug!("{} remotes registered", store.len());

        let environment = config.environment();
        Ok(Self {
            config,
            store: store.shared(),
            environment,
        })
    }

    fn resolver(&self, hints: &ClientHints) -> ManifestResolver {
        ManifestResolver::new(self.store.clone(), self.environment.clone()).with_hints(hints)
    }
}

fn load_project_registry() -> anyhow::Result<RegistryStore> {
    let project = JsonStore::current_project()?;
    if !project.exists(mfe_foundation::REMOTES_FILE) {
        tracing::warn!("No remotes registered (mfe.json or .mfe-shell/remotes.json)");
        return Ok(RegistryStore::empty());
    }
    Ok(RegistryFile::load_from(&project)?.into_store()?)
}

/// 영속 override 저장소 (사용자 전역)
fn persisted_overrides() -> anyhow::Result<PersistedOverrides> {
    let store = JsonStore::global()?;
    Ok(PersistedOverrides::new(Arc::new(FileKeyValueStore::new(store))))
}

// ============================================================================
// Registry
// ============================================================================

pub fn list(ctx: &Context) -> anyhow::Result<()> {
    if ctx.store.is_empty() {
        println!("No remotes registered.");
        return Ok(());
    }

    println!("{:<16} {:<20} {:<16} {:>6}  {}", "NAME", "DISPLAY", "ROUTE", "PORT", "TEAM");
    for remote in ctx.store.all() {
        println!(
            "{:<16} {:<20} {:<16} {:>6}  {}",
            remote.name,
            remote.display_name,
            remote.route_path,
            remote.dev_port,
            remote.team.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}

pub fn routes(ctx: &Context) -> anyhow::Result<()> {
    let loader = Arc::new(HttpRemoteLoader::from_config(&ctx.config.loader)?);
    let binder = RouteBinder::new(
        ctx.resolver(&ClientHints::new()),
        LoaderMap::uniform(&ctx.store, loader),
    );
    let table = binder.bind();

    println!("Environment: {}", ctx.environment);
    for binding in table.bindings() {
        let manifest = binder.resolver().resolve_url(binding.handler.name())?;
        println!("  {:<20} → {:<16} {}", binding.match_prefix, binding.handler.name(), manifest);
    }
    Ok(())
}

pub fn next_port(ctx: &Context) -> anyhow::Result<()> {
    let Some(port) = ctx
        .store
        .next_available_dev_port_from(ctx.config.effective_dev_port_floor())
    else {
        bail!("no free dev port left above {}", ctx.config.effective_dev_port_floor());
    };
    println!("{}", port);
    Ok(())
}

// ============================================================================
// Resolution
// ============================================================================

pub fn resolve(ctx: &Context, name: &str, query: &str, use_persisted: bool) -> anyhow::Result<()> {
    let mut hints = ClientHints::new().with_session_query(query);
    if use_persisted {
        if let Some(raw) = persisted_overrides()?.raw()? {
            hints = hints.with_persisted(raw);
        }
    }

    let resolver = ctx.resolver(&hints);
    for inert in resolver.overrides().inert(resolver.store()) {
        tracing::warn!("Override for unregistered remote '{}' has no effect", inert);
    }

    let resolved = resolver.resolve(name)?;
    println!("{}", resolved.url);
    tracing::info!("{} resolved from {} ({})", name, resolved.source, ctx.environment);
    Ok(())
}

pub fn federation(ctx: &Context, name: Option<&str>, shell: bool) -> anyhow::Result<()> {
    let json = match (name, shell) {
        (None, true) => {
            let config = ShellFederationConfig::from_store(&ctx.store, &ctx.environment)?;
            serde_json::to_string_pretty(&config)?
        }
        (Some(name), false) => {
            let descriptor = ctx.store.require(name)?;
            serde_json::to_string_pretty(&RemoteFederationConfig::for_remote(descriptor))?
        }
        _ => bail!("pass either a remote name or --shell"),
    };
    println!("{}", json);
    Ok(())
}

// ============================================================================
// Persisted overrides
// ============================================================================

pub fn override_set(ctx: &Context, name: &str, location: &str) -> anyhow::Result<()> {
    if !ctx.store.contains(name) {
        tracing::warn!("'{}' is not registered; the override will be inert", name);
    }
    persisted_overrides()?.set(name, location)?;
    println!("Override set: {} → {}", name, location);
    Ok(())
}

pub fn override_remove(name: &str) -> anyhow::Result<()> {
    if persisted_overrides()?.remove(name)? {
        println!("Override removed: {}", name);
    } else {
        println!("No override for {}", name);
    }
    Ok(())
}

pub fn override_list(ctx: &Context) -> anyhow::Result<()> {
    let overrides = persisted_overrides()?.load()?;
    if overrides.is_empty() {
        println!("No overrides.");
        return Ok(());
    }
    for entry in overrides {
        let marker = if ctx.store.contains(&entry.name) { "" } else { "  (inert)" };
        println!("  {:<16} {}{}", entry.name, entry.url, marker);
    }
    Ok(())
}

pub fn override_clear() -> anyhow::Result<()> {
    persisted_overrides()?.clear()?;
    println!("Overrides cleared.");
    Ok(())
}

// ============================================================================
// Fetch
// ============================================================================

pub async fn fetch(ctx: &Context, name: &str, query: &str) -> anyhow::Result<()> {
    let mut hints = ClientHints::new().with_session_query(query);
    if let Some(raw) = persisted_overrides()?.raw()? {
        hints = hints.with_persisted(raw);
    }

    let loader = Arc::new(HttpRemoteLoader::from_config(&ctx.config.loader)?);
    let table = RouteBinder::new(ctx.resolver(&hints), LoaderMap::uniform(&ctx.store, loader)).bind();
    let binding = table
        .get(name)
        .with_context(|| format!("Remote not found: {}", name))?;

    let mount = binding.handler.mount();
    match mount.load().await {
        MountOutcome::Applied(MountState::Ready(module)) => {
            println!("{}", serde_json::to_string_pretty(module.as_ref())?);
            Ok(())
        }
        MountOutcome::Applied(MountState::Failed(error)) => Err(error.into_error(name).into()),
        other => bail!("unexpected mount outcome for {}: {:?}", name, other),
    }
}
