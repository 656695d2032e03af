use crate::error::{Result, SelectorError};
use clap::Parser;
use std::ffi::OsString;

#[derive(clap::Parser, Debug)]
#[command(
    name = "release-selector",
    about = "Choose between a release and a snapshot build at pull time",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Args {
    #[arg(long, action = clap::ArgAction::Count, help = "Always build a snapshot")]
    force_snapshot: u8,

    #[arg(long, action = clap::ArgAction::Count, help = "Trace every step to stderr")]
    debug: u8,

    #[arg(
        long,
        action = clap::ArgAction::Count,
        help = "Skip the controller pull and set-version calls"
    )]
    dry_run: u8,
}

/// Flags given on the command line. Fixed for the rest of the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvocationFlags {
    pub force_snapshot: bool,
    pub dry_run: bool,
    pub debug: bool,
}

impl From<Args> for InvocationFlags {
    fn from(args: Args) -> Self {
        InvocationFlags {
            force_snapshot: args.force_snapshot > 0,
            dry_run: args.dry_run > 0,
            debug: args.debug > 0,
        }
    }
}

/// Parse the arguments that follow the program name
///
/// Only `--force-snapshot`, `--debug` and `--dry-run` are accepted, in any
/// order and any number of times. Anything else is a usage error.
pub fn parse_flags<I, T>(args: I) -> Result<InvocationFlags>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let argv = std::iter::once(OsString::from("release-selector"))
        .chain(args.into_iter().map(Into::into));

    Args::try_parse_from(argv)
        .map(InvocationFlags::from)
        .map_err(|e| SelectorError::usage(first_line(&e.to_string())))
}

fn first_line(message: &str) -> String {
    let line = message.lines().next().unwrap_or_default();
    line.trim_start_matches("error: ").to_string()
}
