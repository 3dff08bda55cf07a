use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cbuild::{DryRunRunner, Orchestrator, Platform, ProjectPaths, Runner, ShellRunner, Toolchain};

mod cli;

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if cli.dry_run {
        drive(&cli, DryRunRunner)
    } else {
        drive(&cli, ShellRunner)
    }
}

fn drive<R: Runner>(cli: &Cli, runner: R) -> Result<()> {
    let paths = ProjectPaths::new(&cli.root, cli.bin_layout)
        .with_context(|| format!("resolving project root {}", cli.root.display()))?;
    let platform = Platform::from(cli.platform);
    let toolchain = Toolchain::new(platform, cli.exe.as_str());
    tracing::debug!(%platform, build_dir = %paths.build_dir().display(), "resolved project");

    if !cli.dry_run {
        for tool in toolchain.missing_tools() {
            tracing::warn!(tool, "not found on PATH");
        }
    }

    let mut orch = Orchestrator::new(paths, toolchain, runner)
        .reset_policy(cli.reset)
        .with_tests(!cli.no_tests)
        .build_type(cli.build_type.as_str());
    for define in &cli.defines {
        orch = orch.add_define(define.as_str());
    }
    if let Some(preset) = &cli.preset {
        orch = orch.preset(preset.as_str());
    }

    let action = match cli.action {
        Some(action) => action,
        None => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            cbuild::menu::prompt(&mut stdin.lock(), &mut stdout.lock())
                .context("reading menu choice")?
        }
    };

    orch.run_action(action)
        .with_context(|| format!("{action} failed"))
}
