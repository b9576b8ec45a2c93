// warm-rs: Git-backed firmware library package manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The `up` command: parse, diff, install, report.
//!
//! ```text
//! paths.libraries set?           no --> fatal
//! find_manifest(project)         0 / >1 --> fatal
//! ManifestParser + resolver      mirrors in <scratch>/warm-resolve-XXXX
//! SyncPlanner::plan()
//! Installer::install_all()       TaskPool(sync.workers), Ctrl+C cancels
//! SyncReport                     printed on stdout
//! ```

use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::Result;
use crate::git::backend::{GitBackend, VersionControl};
use crate::install::Installer;
use crate::manifest::{ManifestParser, find_manifest};
use crate::report::SyncReport;
use crate::resolve::VersionResolver;
use crate::state::SyncPlanner;
use crate::task::TaskPool;

/// Run the full sync pipeline with the given backend.
///
/// # Errors
///
/// Returns an error for fatal conditions only: missing installation root,
/// missing or ambiguous manifest, or an unusable scratch directory.
/// Per-dependency problems end up in the report.
pub async fn run_up(
    config: &Config,
    vcs: Arc<dyn VersionControl>,
    cancel_token: CancellationToken,
) -> Result<SyncReport> {
    let libraries = config.require_libraries()?.to_path_buf();
    let project = config.paths.project_dir();
    let manifest = find_manifest(&project, &config.sync.manifest_file)?;
    tracing::info!("found dependency file {}", manifest.display());

    let scratch_root = config.paths.scratch_dir();
    std::fs::create_dir_all(&scratch_root).with_context(|| {
        format!(
            "failed to create scratch directory {}",
            scratch_root.display()
        )
    })?;

    let dependencies = {
        let resolve_scratch = tempfile::Builder::new()
            .prefix("warm-resolve-")
            .tempdir_in(&scratch_root)
            .context("failed to create resolution scratch directory")?;
        let resolver = VersionResolver::new(Arc::clone(&vcs));
        ManifestParser::new(&config.sync, &resolver, resolve_scratch.path())
            .parse_file(&manifest)?
    };

    let plan = SyncPlanner::new(&libraries, &config.sync.marker_file).plan(&dependencies);
    let planned = plan.len();
    let report = if plan.is_empty() {
        SyncReport::from_outcomes(0, &[])
    } else {
        tracing::info!("installing {planned} dependencies");
        let pool = TaskPool::new(config.sync.workers).with_cancel_token(cancel_token);
        let installer = Installer::from_config(vcs, &libraries, &scratch_root, &config.sync);
        let outcomes = installer.install_all(&pool, plan).await;
        SyncReport::from_outcomes(planned, &outcomes)
    };

    report.log();
    Ok(report)
}

/// Run `warm up` against real git remotes and print the report.
///
/// Returns `Ok(false)` when at least one dependency failed to install.
///
/// # Errors
///
/// Returns an error if the installation root is missing, git is not
/// installed, or any other fatal condition of [`run_up`] occurs.
pub async fn run_up_command(config: &Config) -> Result<bool> {
    config.require_libraries()?;
    let vcs: Arc<dyn VersionControl> = Arc::new(GitBackend::new()?);

    let cancel_token = CancellationToken::new();
    let interrupt = {
        let token = cancel_token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupted, waiting for running installs to finish");
                token.cancel();
            }
        })
    };

    let result = run_up(config, vcs, cancel_token).await;
    interrupt.abort();

    let report = result?;
    println!("{report}");
    Ok(!report.has_failures())
}
