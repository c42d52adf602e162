//! Subcommand handlers. Each one prints its result to stdout.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::time::Duration;
use wpa_ctrl::{CancellationToken, ScanResult, WpaSession};

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(Serialize)]
struct ScanOutput {
    results: Vec<ScanResult>,
    errors: Vec<String>,
}

pub async fn ping(session: &WpaSession) -> Result<()> {
    session.ping().await?;
    println!("PONG");
    Ok(())
}

pub async fn status(session: &WpaSession) -> Result<()> {
    print_json(&session.status().await?)
}

pub async fn list_networks(session: &WpaSession) -> Result<()> {
    print_json(&session.list_networks().await?)
}

pub async fn scan_results(session: &WpaSession) -> Result<()> {
    let (results, errors) = session.scan_results().await;
    print_json(&ScanOutput {
        results,
        errors: errors.iter().map(ToString::to_string).collect(),
    })
}

pub async fn scan(
    session: &mut WpaSession,
    timeout_secs: u64,
    cancel: &CancellationToken,
) -> Result<()> {
    let mut events = session
        .take_events()
        .context("event queue already taken")?;

    session.scan().await.context("daemon rejected SCAN")?;

    let wait = async {
        while let Some(event) = events.recv().await {
            if event.is("SCAN-RESULTS") {
                return true;
            }
        }
        false
    };

    let completed = tokio::select! {
        _ = cancel.cancelled() => bail!("interrupted"),
        done = tokio::time::timeout(Duration::from_secs(timeout_secs), wait) => done,
    };

    match completed {
        Ok(true) => scan_results(session).await,
        Ok(false) => bail!("session closed before the scan completed"),
        Err(_) => bail!("scan did not complete within {}s", timeout_secs),
    }
}

pub async fn events(session: &mut WpaSession, cancel: &CancellationToken) -> Result<()> {
    let mut events = session
        .take_events()
        .context("event queue already taken")?;

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => return Ok(()),
            event = events.recv() => event,
        };
        match event {
            Some(event) => println!("{}", serde_json::to_string(&event)?),
            None => return Ok(()),
        }
    }
}

pub async fn raw(session: &WpaSession, command: &str) -> Result<()> {
    let reply = session.request(command).await?;
    print!("{}", reply);
    if !reply.ends_with('\n') {
        println!();
    }
    Ok(())
}
