use std::sync::Arc;

use chrono::Utc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use relay_sync::relay_client::helpers::{format_last_contact, format_time, progress_ratio};
use relay_sync::{
    CommandDispatcher, Config, HttpGateway, RelayError, RelayId, SyncSnapshot, Synchronizer,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("relay_sync=info")),
        )
        .init();

    if let Err(err) = run().await {
        error!(error = %err, "relay-sync exited with error");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), RelayError> {
    let config = Config::load().await;
    let gateway = HttpGateway::from_config(&config)?;
    info!(device = %gateway.base_url(), "Using relay device");

    let synchronizer = Synchronizer::with_interval(Arc::new(gateway), config.poll_interval());
    let dispatcher = CommandDispatcher::new(synchronizer.clone());

    let last_line = std::sync::Mutex::new(String::new());
    synchronizer.subscribe(move |snapshot| {
        let line = render(snapshot);
        let mut last = last_line.lock().unwrap_or_else(|e| e.into_inner());
        if *last != line {
            info!("{line}");
            *last = line;
        }
    });

    let handle = synchronizer.start();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let mut stdin_open = true;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            line = lines.next_line(), if stdin_open => match line? {
                Some(line) => handle_input(&synchronizer, &dispatcher, line.trim()).await,
                // Headless: keep polling until interrupted.
                None => stdin_open = false,
            },
        }
    }

    synchronizer.stop(handle);
    Ok(())
}

async fn handle_input(synchronizer: &Synchronizer, dispatcher: &CommandDispatcher, input: &str) {
    let relay = match input.parse::<u8>().ok().and_then(RelayId::from_number) {
        Some(relay) => relay,
        None => {
            if input == "s" || input == "status" {
                info!("{}", render(&synchronizer.snapshot()));
                if let Some(last) = synchronizer.last_contact() {
                    info!("last contact {}", format_last_contact(last, Utc::now()));
                }
            } else if !input.is_empty() {
                warn!(input, "Expected 1, 2 or status");
            }
            return;
        }
    };

    if let Ok(action) = dispatcher.toggle(relay).await {
        info!(relay = %relay, action = %action, "Command sent");
    }
}

fn render(snapshot: &SyncSnapshot) -> String {
    let link = if snapshot.connected {
        "connected"
    } else {
        "disconnected"
    };
    let relays: Vec<String> = RelayId::ALL
        .iter()
        .map(|id| {
            let state = snapshot.relay(*id);
            match state.countdown() {
                Some(countdown) => format!(
                    "{id}: ON {countdown} ({:.0}%)",
                    progress_ratio(state.display_seconds()).min(1.0) * 100.0
                ),
                None => format!("{id}: OFF {}", format_time(state.display_seconds())),
            }
        })
        .collect();
    format!("[{link}] {}", relays.join(" | "))
}
