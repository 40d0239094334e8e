use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use zounds_console::{logging, HttpTransport, InteractiveConsole};

#[derive(Parser)]
#[command(
    name = "zounds-console",
    version,
    about = "Interactive terminal console for a remote zounds REPL service",
    long_about = None
)]
struct Cli {
    /// Base URL of the zounds REPL server
    #[arg(short, long, env = "ZOUNDS_SERVER", default_value = "http://localhost:8888")]
    server: String,

    /// HTTP request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,

    /// Append tracing output to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref())?;

    tracing::info!(server = %cli.server, "connecting");
    let transport = HttpTransport::new(&cli.server, Duration::from_secs(cli.timeout))?;

    let mut console = InteractiveConsole::new(Box::new(transport));
    console.run()
}
