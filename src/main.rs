//! `vitrine [projects.toml] [options.toml]`
//!
//! Opens the project grid in a native window. Without a manifest, nine
//! placeholder tiles are shown. Icon paths resolve relative to the
//! manifest's directory.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use vitrine::options::Options;
use vitrine::scene::ProjectManifest;
use vitrine::{Viewer, VitrineError};

fn load_manifest(path: Option<&Path>) -> Result<(ProjectManifest, PathBuf), VitrineError> {
    let Some(path) = path else {
        log::info!("no manifest given, showing placeholders");
        return Ok((ProjectManifest::placeholder(), PathBuf::from("assets")));
    };
    let manifest = ProjectManifest::load(path)?;
    let root = path
        .parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    log::info!("{} projects from {}", manifest.len(), path.display());
    Ok((manifest, root))
}

fn run() -> Result<(), VitrineError> {
    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let manifest_path = args.next();
    let options_path = args.next();

    let (manifest, icon_root) = load_manifest(manifest_path.as_deref())?;
    let options = options_path
        .as_deref()
        .map(Options::load)
        .transpose()?
        .unwrap_or_default();

    Viewer::builder()
        .with_manifest(manifest)
        .with_options(options)
        .with_icon_root(icon_root)
        .build()
        .run()
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
