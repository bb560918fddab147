//! Manifest - remote의 federation manifest URL 해석

mod resolver;

pub use resolver::{
    manifest_url, resolve, resolve_detailed, ManifestResolver, ResolutionSource,
    ResolvedManifest, MANIFEST_FILE_NAME,
};
