//! Application orchestrator.
//! Loads and merges config, initializes logging, relocates the uploads given on the
//! command line and optionally registers them.

use anyhow::{Result, bail};
use tracing::{debug, error};

use upload_relocator::cli::Args;
use upload_relocator::config::{CONFIG_ENV, load_config};
use upload_relocator::output as out;
use upload_relocator::{
    FileRelocator, ManifestRegistrar, RelocateError, RelocationReport, StaticUploadDir,
    default_config_path, default_log_path,
};

use crate::logging::init_tracing;

pub fn run(args: Args) -> Result<()> {
    if args.print_config {
        print_config_location();
        return Ok(());
    }

    let mut cfg = load_config()?;
    args.apply_overrides(&mut cfg);

    let _guard = init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json)?;
    debug!(?cfg, "starting upload_relocator");

    if args.uploads.is_empty() {
        out::print_info("No uploads given; nothing to do.");
        return Ok(());
    }

    let provider = StaticUploadDir::new(&cfg.upload_dir);
    let relocator = FileRelocator::new(args.uploads.clone(), &provider)?
        .with_max_name_attempts(cfg.max_name_attempts);

    let (report, registration_error) = if args.register {
        let registrar = ManifestRegistrar::new(&cfg.manifest, cfg.upload_url.as_str());
        match relocator.relocate_and_register(&registrar) {
            Ok(report) => (report, None),
            Err(RelocateError::Registration { report, source }) => (report, Some(source)),
            Err(e) => return Err(e.into()),
        }
    } else {
        (relocator.relocate(args.dest.as_deref()), None)
    };

    print_report(&report);

    if let Some(e) = registration_error {
        error!(manifest = %cfg.manifest.display(), error = %e, "registration failed");
        bail!(
            "{} file(s) were relocated but not registered: {e}",
            report.relocated().len()
        );
    }
    if !report.is_complete() {
        bail!(
            "{} of {} upload(s) were not relocated",
            report.failed_count(),
            report.len()
        );
    }
    if args.register {
        out::print_success(&format!(
            "Registered {} file(s) in {}",
            report.len(),
            cfg.manifest.display()
        ));
    }
    Ok(())
}

fn print_report(report: &RelocationReport) {
    for outcome in report.outcomes() {
        match &outcome.result {
            Ok(dest) => out::print_user(&format!(
                "Moved '{}' -> '{}'",
                outcome.source.display(),
                dest.display()
            )),
            Err(e) => out::print_error(&format!("{}: {e}", outcome.original_name)),
        }
    }
}

fn print_config_location() {
    if let Some(p) = std::env::var_os(CONFIG_ENV) {
        out::print_info(&format!("Using {CONFIG_ENV} (explicit): {}", p.to_string_lossy()));
        return;
    }
    match default_config_path() {
        Some(p) if p.exists() => out::print_info(&format!("Config file: {}", p.display())),
        Some(p) => out::print_info(&format!(
            "No config file yet; defaults apply. Expected at: {}",
            p.display()
        )),
        None => out::print_warn("Could not determine a default config path; defaults apply."),
    }
    if let Some(log) = default_log_path() {
        out::print_info(&format!("Suggested log_file: {}", log.display()));
    }
}
