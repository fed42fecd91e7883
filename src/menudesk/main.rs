use clap::Parser;
use colored::*;
use menudesk::config::CONFIG_KEYS;
use menudesk::error::Result;
use menudesk::init::{initialize, MenudeskContext};
use std::io;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::args::{Cli, Commands};
use cli::print::print_messages;
use cli::session::Session;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so they never interleave with prompts on stdout.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("MENUDESK_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut ctx = initialize(cli.home, cli.store)?;

    match cli.command {
        None => handle_session(&ctx),
        Some(Commands::Init) => handle_init(&ctx),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
    }
}

fn handle_session(ctx: &MenudeskContext) -> Result<()> {
    let mut api = ctx.open_api()?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(&mut api, stdin.lock(), stdout.lock(), &ctx.config.currency).run()
}

fn handle_init(ctx: &MenudeskContext) -> Result<()> {
    let result = ctx.init_store()?;
    print_messages(&mut io::stdout(), &result.messages)?;
    Ok(())
}

fn handle_config(
    ctx: &mut MenudeskContext,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    match (key, value) {
        (None, _) => {
            for key in CONFIG_KEYS {
                println!("{} = {}", key, ctx.config.get(key)?);
            }
            println!("{}", format!("store = {}", ctx.paths.store.display()).dimmed());
        }
        (Some(key), None) => println!("{} = {}", key, ctx.config.get(&key)?),
        (Some(key), Some(value)) => {
            ctx.config.set(&key, &value)?;
            ctx.config.save(&ctx.paths.home)?;
            println!("{}", format!("{} set to {}", key, ctx.config.get(&key)?).green());
        }
    }
    Ok(())
}
