use clap::Parser;
use airwatch::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    let Some(command) = args.command else {
        show_help_and_commands();
        process::exit(0);
    };

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        let shutdown_signal = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("Failed to install CTRL+C signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            result = commands::run(command) => Some(result),
            _ = shutdown_signal => None,
        }
    });

    match result {
        Some(Ok(summary)) if summary.is_success() => process::exit(0),
        Some(Ok(summary)) => {
            eprintln!("Error: {} file(s) failed to normalize", summary.files_failed);
            process::exit(1);
        }
        Some(Err(error)) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
        None => {
            eprintln!("\nReceived CTRL+C, shutting down");
            process::exit(130);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("airwatch - Japanese regional air-quality normalizer");
    println!("===================================================");
    println!();
    println!("Normalize hourly air-quality tables published by regional authorities");
    println!("into one canonical station/unit schema.");
    println!();
    println!("USAGE:");
    println!("    airwatch <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    normalize   Normalize one raw regional CSV table");
    println!("    batch       Normalize many tables concurrently");
    println!("    stations    Query the national station registry");
    println!("    regions     List or describe region profiles");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    airwatch normalize -r chiba chiba_2024080823.csv");
    println!("    airwatch batch -r tokyo 'raw/tokyo_*.csv' --output-dir out");
    println!("    airwatch stations --resolve 野田宮崎 -r chiba");
    println!();
    println!("For more information on a specific command, use:");
    println!("    airwatch <COMMAND> --help");
}
