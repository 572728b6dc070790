//! Project management CLI for pulseboard.
//!
//! Every subcommand is a pass-through to an external tool with a fixed
//! argument list; the process exit code mirrors the wrapped tool's exit
//! code. `dev` is the one exception in shape (not logic): it starts the
//! API and dashboard binaries concurrently, one worker thread per child,
//! each blocking on its own process until interrupted.

use std::path::Path;
use std::process::Command;
use std::thread;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "pulseboard-devtool",
    version,
    about = "Development commands for the pulseboard workspace"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and build all dependencies
    Install,
    /// Start the API and dashboard servers together
    Dev,
    /// Run tests, optionally filtered by name
    Test {
        /// Only run tests whose names match this filter
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Run clippy with warnings denied
    Lint,
    /// Format the workspace
    Format,
    /// Type-check all targets without building
    Typecheck,
    /// Run lint, typecheck, and tests in sequence
    Quality,
    /// Remove build artifacts and the local dev database
    Clean,
    /// Build and run with Docker Compose
    Docker,
    /// Show project status and available commands
    Status,
}

fn main() {
    let cli = Cli::parse();

    let code = match cli.command {
        Commands::Install => run_install(),
        Commands::Dev => run_dev(),
        Commands::Test { filter } => run_test(filter),
        Commands::Lint => run("cargo", &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"]),
        Commands::Format => run("cargo", &["fmt", "--all"]),
        Commands::Typecheck => run("cargo", &["check", "--workspace", "--all-targets"]),
        Commands::Quality => run_quality(),
        Commands::Clean => run_clean(),
        Commands::Docker => run("docker", &["compose", "up", "--build"]),
        Commands::Status => run_status(),
    };

    std::process::exit(code);
}

/// Launch a tool and return its exit code (1 if it could not be launched
/// or was killed by a signal).
fn run(program: &str, args: &[&str]) -> i32 {
    println!("$ {} {}", program, args.join(" "));
    match Command::new(program).args(args).status() {
        Ok(status) => status.code().unwrap_or(1),
        Err(err) => {
            eprintln!("Failed to launch {}: {}", program, err);
            1
        }
    }
}

fn run_install() -> i32 {
    println!("Installing dependencies...");
    let code = run("cargo", &["fetch"]);
    if code != 0 {
        return code;
    }
    run("cargo", &["build", "--workspace"])
}

fn run_dev() -> i32 {
    println!("Starting development servers...");
    println!("  API:       http://localhost:8000");
    println!("  Dashboard: http://localhost:8501");
    println!("Press Ctrl-C to stop both.");

    let api = thread::spawn(|| run("cargo", &["run", "--bin", "pulseboard-api"]));
    let dashboard = thread::spawn(|| run("cargo", &["run", "--bin", "pulseboard-dashboard"]));

    let api_code = api.join().unwrap_or(1);
    let dashboard_code = dashboard.join().unwrap_or(1);
    if api_code != 0 {
        api_code
    } else {
        dashboard_code
    }
}

fn run_test(filter: Option<String>) -> i32 {
    match filter {
        Some(filter) => run("cargo", &["test", "--workspace", &filter]),
        None => run("cargo", &["test", "--workspace"]),
    }
}

fn run_quality() -> i32 {
    let steps: [(&str, &[&str]); 3] = [
        ("1/3 lint", &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"]),
        ("2/3 typecheck", &["check", "--workspace", "--all-targets"]),
        ("3/3 test", &["test", "--workspace"]),
    ];

    for (label, args) in steps {
        println!("{}", label);
        let code = run("cargo", args);
        if code != 0 {
            eprintln!("Quality checks failed at {}", label);
            return code;
        }
    }

    println!("All quality checks passed.");
    0
}

fn run_clean() -> i32 {
    let code = run("cargo", &["clean"]);
    // Local scratch files; missing files are not an error.
    for file in ["pulseboard.db", "pulseboard.db-shm", "pulseboard.db-wal"] {
        let _ = std::fs::remove_file(file);
    }
    code
}

fn run_status() -> i32 {
    println!("Project status\n");
    println!("{:<26} {:<10} {}", "Component", "Status", "Path");

    let files = [
        ("Workspace manifest", "Cargo.toml"),
        ("Environment file", ".env"),
        ("API server", "packages/core/src/main.rs"),
        ("Dashboard server", "packages/core/src/bin/dashboard.rs"),
        ("Test suite", "packages/core/tests"),
    ];

    for (label, path) in files {
        let status = if Path::new(path).exists() {
            "ready"
        } else {
            "missing"
        };
        println!("{:<26} {:<10} {}", label, status, path);
    }

    println!("\nAvailable commands:");
    for (cmd, desc) in [
        ("install", "Fetch and build dependencies"),
        ("dev", "Start both development servers"),
        ("test", "Run the test suite"),
        ("quality", "Run lint, typecheck, and tests"),
        ("docker", "Run with Docker Compose"),
    ] {
        println!("  {:<10} {}", cmd, desc);
    }

    0
}
