use clap::Parser;
use fastloop::cli::{Cli, Commands};
use fastloop::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_or_default(&cli.config);
    if let Some(path) = &cli.run.state_file {
        config.state_file = path.clone();
    }

    fastloop::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Some(Commands::Config) => {
            println!("Current configuration:");
            print!("{}", toml::to_string_pretty(&config)?);
        }
        None => cli.run.execute(&config).await?,
    }

    Ok(())
}
