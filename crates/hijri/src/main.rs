use crate::prelude::*;
use clap::Parser;

mod convert;
mod error;
mod prelude;
mod server;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Convert Gregorian dates to Umm al-Qura Hijri dates rendered in Arabic"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "HIJRI_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Start the conversion HTTP server
    Serve(crate::server::App),

    /// Convert a single date and print the JSON response
    Convert(crate::convert::App),
}

/// `RUST_LOG` wins over the `--verbose` default.
fn init_logging(global: &Global) {
    let default_filter = if global.verbose { "debug" } else { "info" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let app = App::parse();
    init_logging(&app.global);

    match app.command {
        SubCommands::Serve(sub_app) => crate::server::run(sub_app, app.global).await,
        SubCommands::Convert(sub_app) => crate::convert::run(sub_app, app.global),
    }
}
