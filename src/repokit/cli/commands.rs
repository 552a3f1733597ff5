use super::render::{print_full_records, print_messages, print_record_list};
use super::setup::{Cli, Commands, RegisterArgs};
use clap::Parser;
use repokit::api::{ConfigAction, RegisterRequest, RepokitApi};
use repokit::error::{RepokitError, Result};
use repokit::init::initialize;
use repokit::model::Citation;
use repokit::report::table_row_count;
use repokit::store::fs::FileStore;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: RepokitApi<FileStore>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = init_context()?;

    match cli.command {
        Commands::Register(args) => handle_register(&mut ctx, args),
        Commands::List => handle_list(&ctx),
        Commands::Show { name } => handle_show(&ctx, &name),
        Commands::Report => handle_report(&ctx),
        Commands::Doctor => handle_doctor(&ctx),
        Commands::Archive { name } => handle_archive(&ctx, &name),
        Commands::Init => handle_init(&ctx),
        Commands::Config { key, value } => handle_config(&ctx, key, value),
    }
}

/// Logs go to stderr so they never mix with command output.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("repokit=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn init_context() -> Result<AppContext> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let ctx = initialize(&cwd)?;
    Ok(AppContext { api: ctx.api })
}

fn handle_register(ctx: &mut AppContext, args: RegisterArgs) -> Result<()> {
    let result = if args.is_batch() {
        ctx.api.register_all()?
    } else {
        let data_name = args
            .name
            .ok_or_else(|| RepokitError::Api("--name is required to register a dataset".into()))?;
        ctx.api.register(RegisterRequest {
            data_name,
            destination: args.destination,
            source: args.source,
            run_command: args.run_command,
            citation: Citation {
                doi: args.doi,
                citation: args.citation,
                license: args.license,
                notes: args.notes,
            },
        })?
    };

    print_messages(&result.messages);
    for path in &result.written_paths {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list()?;
    print_record_list(&result.listed_records);
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &AppContext, name: &str) -> Result<()> {
    let result = ctx.api.show(name)?;
    print_full_records(&result.listed_records);
    print_messages(&result.messages);
    Ok(())
}

fn handle_report(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.report()?;
    print_messages(&result.messages);
    for path in &result.written_paths {
        let rows = std::fs::read_to_string(path)
            .map(|content| table_row_count(&content))
            .unwrap_or(0);
        println!("{}: {} table rows", path.display(), rows);
    }
    Ok(())
}

fn handle_doctor(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.doctor()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_archive(ctx: &AppContext, name: &str) -> Result<()> {
    let result = ctx.api.archive(name)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_init(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.init()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if let Some(config) = &result.config {
        if result.messages.is_empty() {
            for (key, value) in config.list_all() {
                println!("{} = {}", key, value);
            }
        }
    }
    print_messages(&result.messages);
    Ok(())
}
