/// What the process was asked to do, decided before the switch parser runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// No arguments at all: show usage and fail.
    Usage,
    /// An explicit help request: show usage and succeed.
    Help,
    Run(Vec<String>),
}

const HELP_SWITCHES: &[&str] = &["-?", "/?", "-h", "-help", "--help"];

impl Invocation {
    pub fn from_args(args: Vec<String>) -> Self {
        match args.first() {
            None => Invocation::Usage,
            Some(first) if HELP_SWITCHES.iter().any(|h| first.eq_ignore_ascii_case(h)) => {
                Invocation::Help
            }
            Some(_) => Invocation::Run(args),
        }
    }
}

/// Colors are used only on a terminal, and never when `NO_COLOR` is set.
pub fn color_allowed(stream: atty::Stream) -> bool {
    std::env::var_os("NO_COLOR").is_none() && atty::is(stream)
}
