use anyhow::{bail, Context as _};
use regex::Regex;
use roast::{parse_config, App, CommandConfig, Invocation};
use std::process;

const DEMO_CONFIG: &str = include_str!("demo.yml");

const ENVIRONMENTS: &[&str] = &["dev", "staging", "prod"];

fn main() {
    env_logger::init();

    let app = match build_app() {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    };

    if let Err(e) = app.run_from_env() {
        // Usage errors already printed the relevant help
        if !e.is_usage_error() {
            eprintln!("Error: {}", e);
        }
        process::exit(1);
    }
}

fn build_app() -> anyhow::Result<App> {
    let mut config: CommandConfig = parse_config(DEMO_CONFIG)?;

    let vpc_name = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9-]*$")?;

    config.bind("deploy", deploy)?;
    config.bind_validator("deploy", "target", |value| ENVIRONMENTS.contains(&value))?;

    config.bind("vpc create", vpc_create)?;
    config.bind_validator("vpc create", "name", move |value| vpc_name.is_match(value))?;
    config.bind_formatter("vpc create", "name", |value| value.to_lowercase())?;

    config.bind("vpc delete", vpc_delete)?;
    config.bind_formatter("vpc delete", "name", |value| value.to_lowercase())?;

    App::new("roast", config).context("invalid command tree")
}

fn region(invocation: &Invocation) -> String {
    invocation
        .option("region")
        .map(|value| value.to_string())
        .unwrap_or_default()
}

fn deploy(invocation: &Invocation) -> anyhow::Result<()> {
    let target = &invocation.args[0];
    let retries = invocation
        .option("retries")
        .and_then(|value| value.as_i64())
        .unwrap_or_default();

    if target == "prod" && !invocation.flag("force") && retries < 1 {
        bail!("refusing to deploy to prod without retries; pass --force to override");
    }

    println!(
        "Deploying to {} in {} ({} retries{})",
        target,
        region(invocation),
        retries,
        if invocation.flag("force") { ", forced" } else { "" }
    );
    Ok(())
}

fn vpc_create(invocation: &Invocation) -> anyhow::Result<()> {
    println!("Creating VPC {} in {}", invocation.args[0], region(invocation));
    Ok(())
}

fn vpc_delete(invocation: &Invocation) -> anyhow::Result<()> {
    if !invocation.flag("yes") {
        bail!("deleting VPC {} requires --yes", invocation.args[0]);
    }

    println!("Deleting VPC {} in {}", invocation.args[0], region(invocation));
    Ok(())
}
