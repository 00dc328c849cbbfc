use std::io::BufRead;
use testrun::cli::{color_allowed, Invocation};
use testrun::output::Output;
use testrun::reporters::builtin_registry;
use testrun_args::{usage, ArgumentError, CommandLine, RealFileSystem, TransformRegistry};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Reset SIGPIPE handler to default (terminate) so piping to head/tail works correctly
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    init_logging();

    let reporters = builtin_registry();
    let transforms = TransformRegistry::builtin();
    let use_color = color_allowed(atty::Stream::Stdout);

    let args = match Invocation::from_args(std::env::args().skip(1).collect()) {
        Invocation::Run(args) => args,
        invocation => {
            let mut output = Output::new(use_color);
            output.print_banner()?;
            output.print_usage(&usage(&reporters, &transforms))?;
            if invocation == Invocation::Usage {
                debug!("no arguments given, exiting with usage");
                std::process::exit(2);
            }
            return Ok(());
        }
    };

    let command_line = CommandLine::new(&RealFileSystem, &reporters, &transforms);
    let project = match command_line.parse(&args) {
        Ok(project) => project,
        Err(err) => {
            if let ArgumentError::InvalidValue { switch, .. } = &err {
                debug!(switch = %switch, "rejected switch value");
            }
            let mut errors = Output::stderr(color_allowed(atty::Stream::Stderr));
            errors.print_error(&err)?;
            std::process::exit(1);
        }
    };

    let config = project.configuration();
    let mut output = Output::new(use_color && !config.no_color_or_default());

    if !config.no_logo_or_default() {
        output.print_banner()?;
    }
    if config.pause_or_default() {
        output.prompt("Press ENTER to continue...")?;
        debug!("waiting for input before running");
        wait_for_enter()?;
    }

    output.print_project(&project, config.debug_or_default())?;

    if config.wait_or_default() {
        output.prompt("Press ENTER to exit...")?;
        debug!("waiting for input before exit");
        wait_for_enter()?;
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("TESTRUN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(color_allowed(atty::Stream::Stderr))
        .with_target(false)
        .init();
}

fn wait_for_enter() -> std::io::Result<()> {
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(())
}
