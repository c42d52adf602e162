//! wpactl - query and drive wpa_supplicant from the command line.
//!
//! Results go to stdout as pretty JSON; logs go to stderr.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;
use wpa_ctrl::{CancellationToken, CtrlConfig, WpaSession};

#[derive(Parser, Debug)]
#[command(name = "wpactl")]
#[command(about = "Client for the wpa_supplicant control socket")]
struct Args {
    /// Wireless interface whose control socket to use
    #[arg(short, long, global = true, default_value = "wlan0")]
    iface: String,

    /// Directory holding the daemon's control sockets
    #[arg(long, global = true, default_value = CtrlConfig::DEFAULT_CTRL_DIR)]
    ctrl_dir: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Check that the daemon answers
    Ping,
    /// Show connection status
    Status,
    /// List configured networks
    ListNetworks,
    /// Trigger a scan and print the results once it completes
    Scan {
        /// Seconds to wait for the scan to complete
        #[arg(long, default_value = "10")]
        timeout: u64,
    },
    /// Print the most recent scan results without scanning
    ScanResults,
    /// Stream events until interrupted
    Events,
    /// Send a raw command and print the reply
    Raw {
        #[arg(required = true, trailing_var_arg = true)]
        command: Vec<String>,
    },
}

impl Cmd {
    fn needs_events(&self) -> bool {
        matches!(self, Cmd::Scan { .. } | Cmd::Events)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { Level::DEBUG } else { Level::WARN };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                debug!("Interrupt received, shutting down");
                cancel.cancel();
            }
        });
    }

    let mut session = WpaSession::builder(&args.iface)
        .ctrl_dir(&args.ctrl_dir)
        .cancellation(cancel.clone())
        .attach(args.command.needs_events())
        .connect()
        .await?;

    let outcome = match args.command {
        Cmd::Ping => commands::ping(&session).await,
        Cmd::Status => commands::status(&session).await,
        Cmd::ListNetworks => commands::list_networks(&session).await,
        Cmd::Scan { timeout } => commands::scan(&mut session, timeout, &cancel).await,
        Cmd::ScanResults => commands::scan_results(&session).await,
        Cmd::Events => commands::events(&mut session, &cancel).await,
        Cmd::Raw { command } => commands::raw(&session, &command.join(" ")).await,
    };

    // Interrupted sessions are already stopped and have nothing to detach.
    let closed = session.close().await;
    outcome?;
    closed?;
    Ok(())
}
