use anyhow::Result;
use gate_config::GateConfig;
use gate_resolve::Resolver;

use crate::cli::LookupArgs;

use super::decoder_from;

/// The full scan flow: decode a payload, probe for its card, print a
/// shareable lookup URL.
pub async fn handle(args: &LookupArgs, config: &GateConfig, json: bool) -> Result<()> {
    let decoded = decoder_from(config).decode(&args.payload)?;

    let base = args.base.as_deref().unwrap_or(&config.resolver.base);
    let resolution = Resolver::for_base(base).resolve(&decoded.code).await;

    let share = share_url(
        &config.server.redirect,
        &config.policy.param,
        decoded.code.as_str(),
    );

    if json {
        let report = serde_json::json!({
            "code": decoded.code,
            "meta": decoded.meta,
            "resolution": resolution,
            "share": share,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", decoded.code);
    match &resolution.resolved {
        Some(location) => println!("card: {location}"),
        None => println!("card: not found"),
    }
    println!("share: {share}");

    Ok(())
}

/// A URL that replays this lookup when scanned or pasted.
fn share_url(page: &str, param: &str, code: &str) -> String {
    format!("{page}?{param}={code}")
}
