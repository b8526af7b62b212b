use clap::Parser;
use mapnotes::cli::{
    handle_add, handle_delete, handle_edit, handle_init, handle_list, handle_visible, Cli, Commands,
};
use mapnotes::AppConfig;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(&AppConfig::load(&cli.data_dir).log_level);

    let data_dir = cli.data_dir.as_path();
    let result = match cli.command {
        Commands::Init => handle_init(data_dir),
        Commands::Add {
            text,
            lat,
            lng,
            json,
        } => handle_add(data_dir, text, lat, lng, json),
        Commands::Edit {
            index,
            text,
            lat,
            lng,
            json,
        } => handle_edit(data_dir, index, text, lat, lng, json),
        Commands::Delete { index } => handle_delete(data_dir, index),
        Commands::List { json } => handle_list(data_dir, json),
        Commands::Visible { center, zoom, json } => handle_visible(data_dir, center, zoom, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(default_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
