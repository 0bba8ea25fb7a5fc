// File: src/main.rs
//
// Main entry point for the defgraph command-line tool.
// Handles command-line argument parsing and dispatches to the appropriate
// subcommand (render, serve, or repl).

use clap::{Parser as ClapParser, Subcommand, ValueEnum};
use colored::Colorize;
use defgraph::dot;
use defgraph::graph::GraphContext;
use defgraph::parser;
use defgraph::repl::Repl;
use defgraph::server;
use defgraph::translate::translate;
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process;

#[derive(ClapParser)]
#[command(
    name = "defgraph",
    about = "Visualize definition expressions as labeled directed graphs",
    version = env!("CARGO_PKG_VERSION"),
    arg_required_else_help = true,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a definition to a graph description
    Render {
        /// The definition text; reads standard input when omitted
        definition: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "dot")]
        format: Format,

        /// Write the output to FILE instead of standard output
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Serve the web UI
    Serve {
        /// Port to listen on
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },

    /// Launch the interactive REPL
    Repl,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Dot,
    Json,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            definition,
            format,
            output,
        } => {
            if let Err(message) = run_render(definition, format, output) {
                fail(&message);
            }
        }

        Commands::Serve { port } => {
            if let Err(err) = server::serve(port) {
                fail(&format!("server failed: {}", err));
            }
        }

        Commands::Repl => match Repl::new() {
            Ok(mut repl) => {
                if let Err(err) = repl.run() {
                    fail(&err.to_string());
                }
            }
            Err(err) => fail(&err.to_string()),
        },
    }
}

fn run_render(
    definition: Option<String>,
    format: Format,
    output: Option<PathBuf>,
) -> Result<(), String> {
    let definition = match definition {
        Some(text) => text,
        None => read_stdin()?,
    };

    let expr = parser::parse_definition(&definition).map_err(|err| err.to_string())?;
    let mut ctx = GraphContext::new();
    translate(&expr, &mut ctx).map_err(|err| err.to_string())?;

    let rendered = match format {
        Format::Dot => dot::to_dot(&ctx),
        Format::Json => {
            let mut json = serde_json::to_string_pretty(&ctx)
                .map_err(|err| format!("serialization failed: {}", err))?;
            json.push('\n');
            json
        }
    };

    match output {
        Some(path) => fs::write(&path, rendered)
            .map_err(|err| format!("failed to write {}: {}", path.display(), err)),
        None => {
            print!("{}", rendered);
            Ok(())
        }
    }
}

fn read_stdin() -> Result<String, String> {
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|err| format!("failed to read standard input: {}", err))?;
    Ok(buffer)
}

fn fail(message: &str) -> ! {
    eprintln!("{} {}", "Error:".bright_red().bold(), message);
    process::exit(1);
}
