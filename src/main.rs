mod commands;
mod config;
mod error;
mod core {
    pub mod codec;
    pub mod descriptor;
    pub mod schema;
    pub mod store;
}
mod ai {
    pub mod prompts;
    pub mod request;
}

use clap::Parser;
use commands::Cli;
use config::Config;
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?.with_state_override(cli.state);

    commands::run(cli.command, &config).await?;

    Ok(())
}
