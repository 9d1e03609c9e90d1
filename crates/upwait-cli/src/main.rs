//! upwait - should you update, or wait?

use anyhow::Result;
use clap::Parser;

use upwait_cli::cli::commands::{
    run_popular, run_search, run_serve, run_suggest, run_trending, run_vote, ServeOverrides,
};
use upwait_cli::cli::{join_words, Cli, Commands};
use upwait_cli::context::ClientContext;
use upwait_cli::logging::init_tracing;
use upwait_cli::output::{Formatter, OutputFormat};

#[tokio::main]
async fn main() -> Result<()> {
    let Cli {
        json,
        log_json,
        api_url,
        ledger,
        command,
    } = Cli::parse();

    // The server logs its lifecycle; client commands stay quiet unless asked
    let default_level = if matches!(command, Commands::Serve { .. }) {
        "info"
    } else {
        "warn"
    };
    init_tracing(default_level, log_json);

    let format = if json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let client_context =
        move || ClientContext::from_flags(api_url.as_deref(), ledger, Formatter::new(format));

    match command {
        Commands::Serve {
            host,
            port,
            db,
            listing_limit,
        } => {
            run_serve(ServeOverrides {
                host,
                port,
                db,
                listing_limit,
            })
            .await?;
        }
        Commands::Search { name } => run_search(&client_context()?, &join_words(&name)).await?,
        Commands::Suggest { term } => run_suggest(&client_context()?, &join_words(&term)).await?,
        Commands::Trending => run_trending(&client_context()?).await?,
        Commands::Popular => run_popular(&client_context()?).await?,
        Commands::Vote { direction, name } => {
            let mut ctx = client_context()?;
            run_vote(&mut ctx, &join_words(&name), direction).await?;
        }
    }

    Ok(())
}
