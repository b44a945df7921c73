use anyhow::Result;
use gate_config::GateConfig;
use gate_core::AgentCode;
use gate_resolve::Resolver;

use crate::cli::ResolveArgs;

pub async fn handle(args: &ResolveArgs, config: &GateConfig, json: bool) -> Result<()> {
    let code = AgentCode::parse(&args.code, &config.policy.code_policy())?;
    let base = args.base.as_deref().unwrap_or(&config.resolver.base);

    let resolution = Resolver::for_base(base).resolve(&code).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
        return Ok(());
    }

    match &resolution.resolved {
        Some(location) => println!("found: {location}"),
        None => {
            let tried: Vec<&str> = resolution.tried.iter().map(|e| e.as_str()).collect();
            println!("not found (tried {})", tried.join(", "));
        }
    }

    Ok(())
}
