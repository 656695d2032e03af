use anyhow::{Context, Result};

use release_selector::cli::{parse_flags, InvocationFlags};
use release_selector::config::load_config;
use release_selector::controller::CommandController;
use release_selector::git::Git2Repository;
use release_selector::registry::SnapRegistry;
use release_selector::{logging, ui};
use release_selector::{PackageSource, ReleaseSelector, SelectorError};

fn main() {
    let flags = match parse_flags(std::env::args_os().skip(1)) {
        Ok(flags) => flags,
        Err(e) => fail(e.into()),
    };

    logging::init_tracing(flags.debug);

    if let Err(e) = run(flags) {
        fail(e);
    }

    std::process::exit(0);
}

fn fail(error: anyhow::Error) -> ! {
    ui::display_error(&format!("{:#}", error));
    let code = error
        .downcast_ref::<SelectorError>()
        .map(SelectorError::exit_code)
        .unwrap_or(1);
    std::process::exit(code);
}

fn run(flags: InvocationFlags) -> Result<()> {
    let config = load_config().context("Error loading config")?;
    let tag_pattern = config.tag_pattern()?;

    // Discovered per query: the pull hook may be what creates the repository.
    let vcs = Git2Repository::new(".").with_dirty_suffix(config.dirty_suffix.clone());
    let registry = SnapRegistry::new(&config.commands.registry, &config.stable_label);
    let controller = CommandController::new(&config.commands.controller);
    let package = PackageSource::new(&config.package_name_env, config.package_name_from_env());

    let selector = ReleaseSelector::new(&vcs, &registry, &controller, tag_pattern);
    let outcome = selector.run(flags, &package)?;

    if outcome.reported {
        ui::display_success(&format!("Reported version {}", outcome.version));
    }

    Ok(())
}
