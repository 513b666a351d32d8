mod commands;

use clap::{Parser, Subcommand};
use pizzeria::config;

#[derive(Parser)]
#[command(
    name = "pizzeria",
    version,
    about = "REST API for restaurants, pizzas, and their menus"
)]
struct Cli {
    /// Database location: a file path or sqlite:/// URI (default: app.db)
    #[arg(long, env = "DB_URI", global = true)]
    db: Option<String>,

    /// Output as JSON instead of table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database and schema
    Init,
    /// Load sample restaurants, pizzas, and menu entries
    Seed {
        /// Keep existing rows instead of clearing them first
        #[arg(long)]
        keep: bool,
    },
    /// List restaurants
    Restaurants,
    /// List pizzas
    Pizzas,
    /// Show a restaurant and its menu
    Show {
        /// Restaurant ID
        id: i64,
    },
    /// Run the HTTP API
    Serve {
        /// Address to bind
        #[arg(long, env = "HOST", default_value = config::DEFAULT_HOST)]
        host: String,
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value_t = config::DEFAULT_PORT)]
        port: u16,
    },
}

fn main() {
    pizzeria::logging::init();
    let cli = Cli::parse();

    let result = config::resolve_db_path(cli.db.as_deref()).and_then(|db_path| match cli.command {
        Commands::Init => commands::init::run(&db_path),
        Commands::Seed { keep } => commands::seed::run(&db_path, keep, cli.json),
        Commands::Restaurants => commands::list::restaurants(&db_path, cli.json),
        Commands::Pizzas => commands::list::pizzas(&db_path, cli.json),
        Commands::Show { id } => commands::show::run(&db_path, id, cli.json),
        Commands::Serve { host, port } => commands::serve::run(&db_path, &host, port),
    });

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
