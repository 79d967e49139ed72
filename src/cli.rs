// Command-line surface
//
// Everything except the bare `freshbi` invocation is config management:
// `freshbi config --show|--reset|--edit|--path`. The dashboard itself
// takes no flags.

use crate::config::{Config, VERSION};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

/// Terminal BI dashboard for fresh-grocery e-commerce
#[derive(Parser)]
#[command(name = "freshbi", version = VERSION, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect and manage the config file
    Config {
        /// Print the merged configuration
        #[arg(long)]
        show: bool,

        /// Rewrite the config file with defaults
        #[arg(long)]
        reset: bool,

        /// Open the config file in your editor
        #[arg(long)]
        edit: bool,

        /// Print the config file location
        #[arg(long)]
        path: bool,
    },
}

/// Parse arguments and run any subcommand. Returns true when a command
/// ran and the process should exit instead of starting the dashboard.
pub fn handle_cli() -> bool {
    match Cli::parse().command {
        Some(Commands::Config {
            show,
            reset,
            edit,
            path,
        }) => {
            run_config_command(show, reset, edit, path);
            true
        }
        None => false,
    }
}

fn run_config_command(show: bool, reset: bool, edit: bool, path: bool) {
    if path {
        println!("{}", require_config_path().display());
    } else if show {
        print_effective_config();
    } else if reset {
        reset_config_file();
    } else if edit {
        open_in_editor();
    } else {
        println!("Usage: freshbi config [--show|--reset|--edit|--path]");
        println!();
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --edit    Open config file in $EDITOR");
        println!("  --path    Show config file path");
    }
}

/// Config path, or a clean exit when the home directory is unknown
fn require_config_path() -> PathBuf {
    match Config::config_path() {
        Some(path) => path,
        None => {
            eprintln!("Error: could not determine the config file path");
            std::process::exit(1);
        }
    }
}

fn print_effective_config() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    // The key value itself is never printed
    let key_state = if config.api_key.is_some() {
        "<set>"
    } else {
        "<unset>"
    };
    println!("api_key = {}", key_state);
    println!("api_base = {:?}", config.api_base);
    println!("model = {:?}", config.model);
    println!("theme = {:?}", config.theme);
    println!();
    println!("[logging]");
    println!("level = {:?}", config.logging.level);
    println!("file_enabled = {}", config.logging.file_enabled);
    println!("file_dir = {:?}", config.logging.file_dir.display().to_string());
    println!("file_rotation = {:?}", config.logging.file_rotation.as_str());
    println!("file_prefix = {:?}", config.logging.file_prefix);
    println!();

    let path = require_config_path();
    if path.exists() {
        println!("# Source: {}", path.display());
    } else {
        println!("# Source: defaults (no config file)");
    }
}

fn reset_config_file() {
    let path = require_config_path();

    if path.exists() {
        eprint!("Config file exists at {}. Overwrite it? [y/N] ", path.display());
        let _ = std::io::stderr().flush();

        let mut answer = String::new();
        if std::io::stdin().read_line(&mut answer).is_err()
            || !answer.trim().eq_ignore_ascii_case("y")
        {
            println!("Aborted.");
            return;
        }
    }

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating {}: {}", parent.display(), e);
            std::process::exit(1);
        }
    }
    if let Err(e) = std::fs::write(&path, Config::default().to_toml()) {
        eprintln!("Error writing {}: {}", path.display(), e);
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}

fn open_in_editor() {
    let path = require_config_path();

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
    }

    let fallback = if cfg!(windows) { "notepad" } else { "nano" };
    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| fallback.to_string());

    println!("Opening {} with {}", path.display(), editor);

    match std::process::Command::new(&editor).arg(&path).status() {
        Ok(status) if status.success() => {}
        Ok(status) => {
            eprintln!("Editor exited with status: {}", status);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Failed to launch '{}': {}", editor, e);
            eprintln!("Set $EDITOR to your preferred editor");
            std::process::exit(1);
        }
    }
}
