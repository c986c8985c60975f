//! The runnable command and its dispatcher.
//!
//! Each invocation takes exactly one path, in priority order:
//!
//! 1. `--version` prints the version.
//! 2. `-h` (repeatable) or `--help` prints usage at that verbosity.
//! 3. `-w` (repeatable) lists the markers of the selected generators.
//! 4. Otherwise the selected generators run.
//!
//! Every error bubbles up to [`Cmd::execute`], the only place that prints
//! usage, the re-run hint, and picks the exit status.

use crate::config::Config;
use crate::engine::{registry_from_options, Runtime};
use crate::error::{CommandError, ConfigurationError};
use crate::help::{self, HelpLevel, SortOrder};
use crate::markers::Registry;
use crate::registrar;
use clap::{ArgAction, Args, FromArgMatches};
use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::{debug, error};

// Flags shared by every composed command. No doc comment here: clap would
// turn it into the command's about text.
#[derive(Debug, Args)]
struct Flags {
    /// print out all markers available with the requested generators
    /// (up to -www for the most detailed output, or -wwww for json output)
    #[arg(short = 'w', long = "which-markers", action = ArgAction::Count)]
    which_markers: u8,

    /// print out more detailed help
    /// (up to -hhh for the most detailed output, or -hhhh for json output)
    #[arg(short = 'h', long = "detailed-help", action = ArgAction::Count)]
    detailed_help: u8,

    /// show version
    #[arg(long)]
    version: bool,

    /// print out usage and a summary of options
    #[arg(long)]
    help: bool,

    /// generator options, e.g. `paths=./...` or `<generator>:<field>=<value>`
    #[arg(value_name = "MARKERS")]
    options: Vec<String>,
}

impl Flags {
    fn help_level(&self) -> Option<HelpLevel> {
        match HelpLevel::from_count(self.detailed_help) {
            None if self.help => Some(HelpLevel::Summary),
            level => level,
        }
    }
}

/// A frozen command, ready to run.
///
/// Built by [`CmdBuilder::apply`](crate::builder::CmdBuilder::apply).
#[derive(Debug, Clone)]
pub struct Cmd {
    config: Config,
}

impl Cmd {
    pub(crate) fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the marker registry for this command.
    pub fn register(&self) -> Result<Registry, ConfigurationError> {
        registrar::register(&self.config, Registry::new())
    }

    /// Run against the process arguments and streams.
    ///
    /// Installs the tracing subscriber first; see [`init_tracing`](crate::init_tracing).
    pub fn run(self) -> ExitCode {
        crate::logging::init_tracing();
        let status = self.execute(std::env::args_os(), &mut io::stdout(), &mut io::stderr());
        ExitCode::from(status)
    }

    /// Run one invocation. `args` includes the program name.
    ///
    /// Returns the exit status: `0` on success, `1` on any failure. A
    /// configuration error is reported before the command line is even
    /// parsed, and nothing runs.
    pub fn execute<I, T>(&self, args: I, out: &mut dyn Write, diag: &mut dyn Write) -> u8
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

        let registry = match self.register() {
            Ok(registry) => registry,
            Err(err) => {
                error!(command = self.config.name(), error = %err, "invalid command configuration");
                let _ = writeln!(diag, "invalid configuration for `{}`: {err}", self.config.name());
                return 1;
            }
        };

        let dispatcher = Dispatcher::new(&self.config, registry);
        match dispatcher.dispatch(&args, out, diag) {
            Ok(()) => 0,
            Err(err) => {
                debug!(error = %err, usage = !err.suppresses_usage(), "command failed");
                let _ = dispatcher.report(&err, &args, out, diag);
                1
            }
        }
    }
}

struct Dispatcher<'a> {
    config: &'a Config,
    registry: Registry,
    command: clap::Command,
}

impl<'a> Dispatcher<'a> {
    fn new(config: &'a Config, registry: Registry) -> Self {
        let command = clap::Command::new(config.name().to_string())
            .disable_help_flag(true)
            .disable_version_flag(true)
            .next_help_heading("Flags");
        let command = Flags::augment_args(command)
            .about(config.description().to_string())
            .long_about(None::<&'static str>)
            .after_help(config.helper().to_string());
        Self {
            config,
            registry,
            command,
        }
    }

    fn dispatch(&self, args: &[OsString], out: &mut dyn Write, diag: &mut dyn Write) -> Result<(), CommandError> {
        let matches = self.command.clone().try_get_matches_from(args)?;
        let flags = Flags::from_arg_matches(&matches)?;

        if flags.version {
            writeln!(out, "Version: {}", self.config.version())?;
            return Ok(());
        }

        if let Some(level) = flags.help_level() {
            debug!(?level, "printing usage");
            return Ok(self.usage(level, out, diag)?);
        }

        if let Some(level) = HelpLevel::from_count(flags.which_markers) {
            debug!(?level, "printing marker docs");
            // a registry alone is enough; loading roots would only slow this down
            let markers = registry_from_options(&self.registry, &flags.options)?;
            return Ok(help::render(level, out, diag, &markers, SortOrder::ByCategory)?);
        }

        let runtime = Runtime::from_options(&self.registry, &flags.options)?;
        if runtime.is_empty() {
            return Err(CommandError::NoGenerators);
        }

        debug!(generators = ?runtime.generator_names(), "running generators");
        if runtime.run(diag) {
            // the generators already reported the details
            return Err(CommandError::GenerationFailed.without_usage());
        }
        Ok(())
    }

    /// Standard usage followed by the option markers at `level`.
    fn usage(&self, level: HelpLevel, out: &mut dyn Write, diag: &mut dyn Write) -> io::Result<()> {
        write!(diag, "{}", self.command.clone().render_long_help())?;
        write!(diag, "\n\nOptions\n\n")?;
        help::render(level, out, diag, &self.registry, SortOrder::ByOption)
    }

    fn report(
        &self,
        err: &CommandError,
        args: &[OsString],
        out: &mut dyn Write,
        diag: &mut dyn Write,
    ) -> io::Result<()> {
        writeln!(diag, "Error: {err}")?;
        if !err.suppresses_usage() {
            self.usage(HelpLevel::Summary, out, diag)?;
        }

        let invocation = std::iter::once(self.config.name().to_string())
            .chain(args.iter().skip(1).map(|a| a.to_string_lossy().into_owned()))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(
            diag,
            "run `{invocation} -w` to see all available markers, or `{invocation} -h` for usage"
        )
    }
}
