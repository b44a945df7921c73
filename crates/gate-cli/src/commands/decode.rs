use anyhow::Result;
use gate_config::GateConfig;

use crate::cli::DecodeArgs;

use super::decoder_from;

pub fn handle(args: &DecodeArgs, config: &GateConfig, json: bool) -> Result<()> {
    let decoded = decoder_from(config).decode(&args.payload)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&decoded)?);
        return Ok(());
    }

    println!("{}", decoded.code);
    if let Some(name) = &decoded.meta.name {
        println!("name: {name}");
    }
    if let Some(department) = &decoded.meta.department {
        println!("department: {department}");
    }
    if let Some(location) = &decoded.meta.location {
        println!("location: {location}");
    }
    if let Some(valid_from) = &decoded.meta.valid_from {
        println!("valid from: {valid_from}");
    }
    if let Some(valid_until) = &decoded.meta.valid_until {
        println!("valid until: {valid_until}");
    }

    Ok(())
}
