#![forbid(unsafe_code)]

mod commands;
mod inventory;
mod psst;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use hikctl_actions::MemoryRegistry;
use hikctl_isapi::Client;
use log::LevelFilter;

use crate::{
    commands::{
        call::CallCommand, completions::CompletionsCommand, ptz::PtzCommand,
        ptz_move::PtzMoveCommand, ptz_stop::PtzStopCommand, reboot::RebootCommand,
        request::RequestCommand,
    },
    inventory::Inventory,
};

#[derive(Parser)]
struct Cli {
    /// Location of the inventory of devices and entities.
    #[clap(long, env = "HIKCTL_INVENTORY")]
    inventory: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn exec(self) -> anyhow::Result<()> {
        let Self { inventory, command } = self;
        match command {
            Commands::Reboot(cmd) => cmd.exec(&open(inventory)?).await?,
            Commands::Request(cmd) => cmd.exec(&open(inventory)?).await?,
            Commands::PtzMove(cmd) => cmd.exec(&open(inventory)?).await?,
            Commands::PtzStop(cmd) => cmd.exec(&open(inventory)?).await?,
            Commands::Ptz(cmd) => cmd.exec(&open(inventory)?).await?,
            Commands::Call(cmd) => cmd.exec(&open(inventory)?).await?,
            Commands::Completions(cmd) => cmd.exec::<Self>()?,
        }
        Ok(())
    }
}

fn open(inventory: Option<PathBuf>) -> anyhow::Result<MemoryRegistry<Client>> {
    let file = match inventory {
        Some(file) => file,
        None => dirs::config_dir()
            .context("Could not infer a config directory")?
            .join("hikctl")
            .join("inventory.json"),
    };
    Inventory::read(&file)?.into_registry()
}

#[derive(Subcommand)]
enum Commands {
    /// Restart a device
    Reboot(RebootCommand),
    /// Send a raw ISAPI request and print the response, even if it is an error
    Request(RequestCommand),
    /// Move by named direction or by explicit pan, tilt and zoom speeds
    PtzMove(PtzMoveCommand),
    /// Stop any movement
    PtzStop(PtzStopCommand),
    /// Move using ONVIF style tokens
    Ptz(PtzCommand),
    /// Invoke an action by name with JSON parameters, as a host would
    Call(CallCommand),
    /// Print a completion file for the given shell.
    ///
    /// Example: `hikctl completions zsh | source /dev/stdin`.
    Completions(CompletionsCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .init();
    Cli::parse().exec().await
}
