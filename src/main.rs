use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use sci_index::model::EvaluationRequest;

const EXIT_SUCCESS: i32 = 0;
const EXIT_INVALID_REQUEST: i32 = 1;
const EXIT_STORAGE: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a request file, print the result and store it
    Evaluate {
        /// Path to the JSON request file
        request: PathBuf,

        /// Compute and print without writing to the store
        #[arg(long)]
        no_store: bool,

        /// Print the full result as JSON instead of the summary
        #[arg(long)]
        json: bool,
    },
    /// List stored evaluations ordered by year (default if no subcommand)
    List,
    /// Export stored evaluations to a CSV file
    Export {
        /// Output file (defaults to a timestamped name in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "sci-index")]
#[command(about = "Scientific productivity index calculator", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/sci-index/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::List);

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match sci_index::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let store_path = config
        .data_path
        .clone()
        .unwrap_or_else(sci_index::store::get_store_path);

    if cli.verbose {
        eprintln!("Store: {}", store_path.display());
        if let Some(weights) = config.weights {
            eprintln!(
                "Default weights: R={} P={} O={} I={}",
                weights.r, weights.p, weights.o, weights.i
            );
        }
    }

    let use_colors = sci_index::output::should_use_colors();

    match command {
        Commands::Evaluate {
            request,
            no_store,
            json,
        } => {
            let content = match fs::read_to_string(&request) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Failed to read request file {}: {}", request.display(), e);
                    std::process::exit(EXIT_INVALID_REQUEST);
                }
            };

            let mut req: EvaluationRequest = match serde_json::from_str(&content) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Invalid request JSON: {}", e);
                    std::process::exit(EXIT_INVALID_REQUEST);
                }
            };

            // Requests without explicit weights fall back to the configured
            // defaults, then to equal weights
            if req.block_weights.is_none() {
                req.block_weights = config.weights;
            }

            if let Err(errors) = sci_index::scoring::validate_request(&req) {
                eprintln!("Invalid request:");
                for error in errors {
                    eprintln!("  - {}", error);
                }
                std::process::exit(EXIT_INVALID_REQUEST);
            }

            if cli.verbose {
                eprintln!("Scoring {} indicators", req.indicators.len());
            }

            let result = match sci_index::scoring::evaluate(&req) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Scoring failed: {}", e);
                    std::process::exit(EXIT_INVALID_REQUEST);
                }
            };

            if !no_store {
                let mut store = match sci_index::store::load_store(&store_path) {
                    Ok(s) => s,
                    Err(e) => {
                        eprintln!("Storage error: {}", e);
                        std::process::exit(EXIT_STORAGE);
                    }
                };
                let id = store.record(&result);
                if let Err(e) = sci_index::store::save_store(&store_path, &store) {
                    eprintln!("Storage error: {}", e);
                    std::process::exit(EXIT_STORAGE);
                }
                if cli.verbose {
                    eprintln!("Stored evaluation #{}", id);
                }
            }

            if json {
                match serde_json::to_string_pretty(&result) {
                    Ok(text) => println!("{}", text),
                    Err(e) => {
                        eprintln!("Failed to serialize result: {}", e);
                        std::process::exit(EXIT_STORAGE);
                    }
                }
            } else if cli.verbose {
                println!(
                    "{}",
                    sci_index::output::format_result_detail(&result, use_colors)
                );
            } else {
                println!("{}", sci_index::output::format_result(&result, use_colors));
            }
        }
        Commands::List => {
            let store = match sci_index::store::load_store(&store_path) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Storage error: {}", e);
                    std::process::exit(EXIT_STORAGE);
                }
            };

            let records = store.ordered();
            println!(
                "{}",
                sci_index::output::format_store_table(&records, use_colors)
            );

            if cli.verbose {
                eprintln!();
                eprintln!("Total: {} evaluations", records.len());
            }
        }
        Commands::Export { output } => {
            let store = match sci_index::store::load_store(&store_path) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Storage error: {}", e);
                    std::process::exit(EXIT_STORAGE);
                }
            };

            let output_path =
                output.unwrap_or_else(|| PathBuf::from(sci_index::export::default_export_filename()));

            let records = store.ordered();
            if let Err(e) = sci_index::export::write_csv(&output_path, &records) {
                eprintln!("Export error: {}", e);
                std::process::exit(EXIT_STORAGE);
            }

            println!(
                "Exported {} evaluations to {}",
                records.len(),
                output_path.display()
            );
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
