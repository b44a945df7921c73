//! Wedge-scanner mode: payloads arrive one per line on stdin, exactly as a
//! keyboard-wedge QR scanner types them.

use std::time::Duration;

use anyhow::Result;
use gate_config::GateConfig;
use gate_core::ScanGate;
use gate_resolve::Resolver;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::decoder_from;

pub async fn handle(config: &GateConfig) -> Result<()> {
    let gate = ScanGate::new();
    let decoder = decoder_from(config);
    let base = config.resolver.base.clone();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        // A scanner can fire faster than a probe pass finishes. One cycle in
        // flight at a time; a payload arriving mid-cycle is dropped, not
        // queued.
        let Some(permit) = gate.try_begin() else {
            tracing::warn!("scan in flight, payload skipped");
            continue;
        };

        let decoder = decoder.clone();
        let base = base.clone();
        tokio::spawn(async move {
            let _permit = permit;
            match decoder.decode(&line) {
                Ok(decoded) => {
                    let resolution = Resolver::for_base(&base).resolve(&decoded.code).await;
                    match &resolution.resolved {
                        Some(location) => println!("{} -> {location}", decoded.code),
                        None => println!("{} -> not found", decoded.code),
                    }
                }
                Err(error) => println!("rejected: {error}"),
            }
        });
    }

    // Let an in-flight cycle finish before the process exits.
    while gate.is_busy() {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    Ok(())
}
