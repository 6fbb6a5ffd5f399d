use std::ffi::OsString;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Base URL of the service exposing /analyze and /chat.
    /// Falls back to PHISHLINE_BASE_URL, then http://127.0.0.1:5000.
    #[clap(short = 'u', long, help = "service base URL")]
    base_url: Option<String>,

    /// Request timeout in seconds. Falls back to PHISHLINE_TIMEOUT_SECS, then 30.
    #[clap(short = 't', long = "timeout", help = "request timeout in seconds")]
    timeout_secs: Option<u64>,

    /// Keep rendering analysis results that resolve after `clear`
    #[clap(long, help = "apply analysis results that arrive after clear")]
    keep_stale_results: bool,

    #[clap(short = 'v', long, help = "verbose logging")]
    verbose: bool,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    keep_stale_results: bool,
    verbose: bool,
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            base_url: args.base_url,
            timeout_secs: args.timeout_secs,
            keep_stale_results: args.keep_stale_results,
            verbose: args.verbose,
        }
    }
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn base_url(&self) -> Option<&String> {
        self.base_url.as_ref()
    }

    pub fn timeout_secs(&self) -> Option<u64> {
        self.timeout_secs
    }

    pub fn keep_stale_results(&self) -> bool {
        self.keep_stale_results
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}
