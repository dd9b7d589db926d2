use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use log::error;

use foyer_core::kernel::bootstrap::Bootloader;
use foyer_core::kernel::constants::{APP_NAME, APP_VERSION, DATA_DIR_ENV};
use foyer_core::storage::{KeyValueStore, LocalStore, MemoryStore, StorageFormat};

/// Foyer: module runtime for the events platform extension
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Data directory for persisted module state (defaults to $FOYER_DATA_DIR;
    /// without either, state is in-memory and lost at exit)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Inspect and change module activation state
    Module {
        #[command(subcommand)]
        command: ModuleCommand,
    },
    /// Simulate one host request through the full lifecycle pipeline
    Boot,
    /// Show runtime status
    Status,
}

#[derive(Subcommand, Debug)]
enum ModuleCommand {
    /// List registered modules
    List,
    /// Show one module's diagnostic projection as JSON
    Info { id: String },
    /// Activate a module (persists when a data directory is configured)
    Enable { id: String },
    /// Deactivate a module
    Disable { id: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = CliArgs::parse();

    let store = match open_store(&args) {
        Ok(store) => store,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    let mut bootloader = Bootloader::new(store);
    bootloader.boot().await;

    match args.command {
        Commands::Module { command } => run_module_command(&bootloader, command).await,
        Commands::Boot => run_request_simulation(&bootloader).await,
        Commands::Status => {
            print_status(&bootloader).await;
            ExitCode::SUCCESS
        }
    }
}

fn open_store(args: &CliArgs) -> Result<Arc<dyn KeyValueStore>, String> {
    let dir = args
        .data_dir
        .clone()
        .or_else(|| std::env::var_os(DATA_DIR_ENV).map(PathBuf::from));
    match dir {
        Some(dir) => {
            let store = LocalStore::new(dir, StorageFormat::default())
                .map_err(|e| format!("Failed to open data directory: {}", e))?;
            Ok(Arc::new(store))
        }
        None => {
            println!("No data directory configured; module state is in-memory for this run.");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

async fn run_module_command(bootloader: &Bootloader, command: ModuleCommand) -> ExitCode {
    let registry = bootloader.registry();
    match command {
        ModuleCommand::List => {
            let registry = registry.lock().await;
            let infos = registry.get_modules_info();
            if infos.is_empty() {
                println!("No modules registered.");
                return ExitCode::SUCCESS;
            }
            println!("Registered modules:");
            for (id, info) in &infos {
                let status = if info.active { "enabled" } else { "disabled" };
                let deps = if info.dependencies.is_empty() {
                    String::new()
                } else {
                    format!(" (requires {})", info.dependencies.join(", "))
                };
                println!("  - {} v{} [{}] {}{}", id, info.version, status, info.name, deps);
            }
            ExitCode::SUCCESS
        }
        ModuleCommand::Info { id } => {
            let registry = registry.lock().await;
            match registry.get_modules_info().get(&id) {
                Some(info) => {
                    match serde_json::to_string_pretty(info) {
                        Ok(rendered) => println!("{}", rendered),
                        Err(e) => {
                            error!("failed to render module info: {}", e);
                            return ExitCode::FAILURE;
                        }
                    }
                    ExitCode::SUCCESS
                }
                None => {
                    eprintln!("Unknown module '{}'.", id);
                    ExitCode::FAILURE
                }
            }
        }
        ModuleCommand::Enable { id } => {
            let mut registry = registry.lock().await;
            if registry.activate(&id) {
                println!("Module '{}' is enabled.", id);
                ExitCode::SUCCESS
            } else {
                eprintln!("Could not enable module '{}'.", id);
                ExitCode::FAILURE
            }
        }
        ModuleCommand::Disable { id } => {
            let mut registry = registry.lock().await;
            if registry.deactivate(&id) {
                println!("Module '{}' is disabled.", id);
                ExitCode::SUCCESS
            } else {
                eprintln!("Could not disable module '{}'.", id);
                ExitCode::FAILURE
            }
        }
    }
}

/// Fire the host lifecycle events in request order, then print what the
/// active modules contributed to each extension point.
async fn run_request_simulation(bootloader: &Bootloader) -> ExitCode {
    if let Err(e) = bootloader.run_request_pipeline().await {
        // Phase-4 forwarding is not failure-isolated; surface the abort the
        // way the host would see it.
        eprintln!("Host pass aborted: {}", e);
        return ExitCode::FAILURE;
    }

    print_status(bootloader).await;

    let routes = bootloader.routes();
    let routes = routes.lock().await;
    println!("API routes under {}:", routes.namespace());
    for route in routes.routes() {
        println!("  {} {}  -> {}", route.method, route.path, route.handler);
    }

    let tags = bootloader.content_tags();
    let tags = tags.lock().await;
    println!("Content tags: {}", tag_names(tags.tags()));

    let panels = bootloader.ui_panels();
    let panels = panels.lock().await;
    println!("UI panels:");
    for panel in panels.panels() {
        println!("  [{}] {} ({})", panel.kind.as_str(), panel.id, panel.module);
    }

    let assets = bootloader.assets();
    let mut assets = assets.lock().await;
    println!("Frontend assets, in emit order:");
    for asset in assets.flush(foyer_core::assets::AssetSurface::Frontend) {
        println!("  <{}> {}", asset.kind.as_str(), asset.src);
    }
    ExitCode::SUCCESS
}

fn tag_names(tags: &std::collections::BTreeMap<String, foyer_core::platform::ContentTag>) -> String {
    if tags.is_empty() {
        return "(none)".to_string();
    }
    tags.keys().cloned().collect::<Vec<_>>().join(", ")
}

async fn print_status(bootloader: &Bootloader) {
    println!("{} v{}", APP_NAME, APP_VERSION);
    println!("Store backend: {}", bootloader.store().name());
    let registry = bootloader.registry();
    let registry = registry.lock().await;
    let active: Vec<String> = registry
        .get_active()
        .iter()
        .map(|m| m.id().to_string())
        .collect();
    println!("Modules registered: {}", registry.module_count());
    println!(
        "Active modules: {}",
        if active.is_empty() {
            "(none)".to_string()
        } else {
            active.join(", ")
        }
    );
    if !bootloader.skipped_builtins().is_empty() {
        println!(
            "Skipped built-ins (not compiled in): {}",
            bootloader.skipped_builtins().join(", ")
        );
    }
}
