// File: src/repl.rs
//
// Interactive REPL (Read-Eval-Print Loop) for definition expressions.
// Provides an interactive shell for exploring how definitions render,
// with features like:
// - Multi-line input support for long definitions
// - Command history with up/down arrow navigation
// - Special commands (:help, :clear, :dot, :json, :quit)
// - Switchable output format per session
//
// Each evaluated definition gets a fresh graph context, so inputs never
// influence each other.

use crate::dot;
use crate::errors::DefGraphError;
use crate::graph::GraphContext;
use crate::parser;
use crate::translate::translate;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Output format for evaluated definitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Dot,
    Json,
}

/// REPL session that renders definitions and handles user interaction
pub struct Repl {
    editor: DefaultEditor,
    format: OutputFormat,
}

impl Repl {
    /// Creates a new REPL session that prints DOT by default
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let editor = DefaultEditor::new()?;
        Ok(Repl {
            editor,
            format: OutputFormat::Dot,
        })
    }

    /// Displays the welcome banner with help information
    fn show_banner(&self) {
        println!("{}", "╔══════════════════════════════════════════╗".bright_cyan());
        println!("{}", "║   defgraph REPL - definition explorer    ║".bright_cyan());
        println!("{}", "╚══════════════════════════════════════════╝".bright_cyan());
        println!();
        println!(
            "  {} Type a definition to see its graph, {}{}{}",
            "Welcome!".bright_green(),
            ":".bright_blue(),
            "help".bright_yellow(),
            " for commands".bright_blue()
        );
        println!(
            "  {} Multi-line input: leave parentheses or brackets unclosed",
            "Tip:".bright_magenta()
        );
        println!();
    }

    /// Starts the REPL loop
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.show_banner();

        let mut buffer = String::new();

        loop {
            // Determine prompt based on whether we're in multi-line mode
            let prompt = if buffer.is_empty() {
                "defgraph> ".bright_green().to_string()
            } else {
                "........> ".bright_blue().to_string()
            };

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    // Add to history
                    let _ = self.editor.add_history_entry(line.as_str());

                    // Check for special commands (only when not in multi-line mode)
                    if buffer.is_empty() && line.trim().starts_with(':') {
                        if self.handle_command(line.trim()) {
                            continue;
                        } else {
                            break; // :quit was called
                        }
                    }

                    // Accumulate input
                    buffer.push_str(&line);
                    buffer.push('\n');

                    // Check if input is complete
                    if is_input_complete(&buffer) {
                        self.eval_input(&buffer);
                        buffer.clear();
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!(
                        "{}",
                        "^C (Ctrl+C to interrupt, :quit to exit)".bright_yellow()
                    );
                    buffer.clear();
                }
                Err(ReadlineError::Eof) => {
                    println!("{}", "\nGoodbye!".bright_cyan());
                    break;
                }
                Err(err) => {
                    eprintln!("{} {}", "Error:".bright_red(), err);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Handles special REPL commands starting with ':'
    /// Returns true to continue REPL, false to quit
    fn handle_command(&mut self, cmd: &str) -> bool {
        match cmd {
            ":help" | ":h" => {
                self.show_help();
                true
            }
            ":quit" | ":q" | ":exit" => {
                println!("{}", "Goodbye!".bright_cyan());
                false
            }
            ":clear" | ":c" => {
                // Clear the screen
                print!("\x1B[2J\x1B[1;1H");
                self.show_banner();
                true
            }
            ":dot" => {
                self.format = OutputFormat::Dot;
                println!("{}", "✓ Output format set to DOT".bright_green());
                true
            }
            ":json" => {
                self.format = OutputFormat::Json;
                println!("{}", "✓ Output format set to JSON".bright_green());
                true
            }
            _ => {
                println!(
                    "{} Unknown command: {}. Type {}{}{}",
                    "Error:".bright_red(),
                    cmd.bright_yellow(),
                    ":".bright_blue(),
                    "help".bright_yellow(),
                    " for available commands.".bright_blue()
                );
                true
            }
        }
    }

    /// Displays help information about available commands
    fn show_help(&self) {
        println!();
        println!("{}", "REPL Commands:".bright_cyan().bold());
        println!();
        println!(
            "  {}{}  Display this help message",
            ":help".bright_yellow(),
            " or :h ".dimmed()
        );
        println!(
            "  {}{}  Exit the REPL",
            ":quit".bright_yellow(),
            " or :q ".dimmed()
        );
        println!(
            "  {}{}  Clear the screen",
            ":clear".bright_yellow(),
            " or :c".dimmed()
        );
        println!("  {}        Print graphs as Graphviz DOT", ":dot".bright_yellow());
        println!("  {}       Print graphs as JSON", ":json".bright_yellow());
        println!();
        println!("{}", "Navigation:".bright_cyan().bold());
        println!();
        println!("  {}  Navigate command history", "↑/↓ arrows".bright_blue());
        println!("  {}  Interrupt current input", "Ctrl+C    ".bright_blue());
        println!("  {}  Exit REPL", "Ctrl+D    ".bright_blue());
        println!();
        println!("{}", "Examples:".bright_cyan().bold());
        println!();
        println!("  {}", "defgraph> 1 + 2".dimmed());
        println!("  {}", "defgraph> any(2, [alice, bob])".dimmed());
        println!("  {}", "defgraph> all([".dimmed());
        println!("  {}", "........>     owners,".dimmed());
        println!("  {}", "........> ])".dimmed());
        println!();
    }

    /// Renders the definition and prints the result in the session format
    fn eval_input(&mut self, input: &str) {
        let trimmed = input.trim();

        // Skip empty input
        if trimmed.is_empty() {
            return;
        }

        let expr = match parser::parse_definition(trimmed) {
            Ok(expr) => expr,
            Err(err) => {
                self.print_error(&err);
                return;
            }
        };

        let mut ctx = GraphContext::new();
        if let Err(err) = translate(&expr, &mut ctx) {
            self.print_error(&err);
            return;
        }

        let rendered = match self.format {
            OutputFormat::Dot => dot::to_dot(&ctx),
            OutputFormat::Json => match serde_json::to_string_pretty(&ctx) {
                Ok(json) => json,
                Err(err) => {
                    println!("{} {}", "Error:".bright_red().bold(), err);
                    return;
                }
            },
        };

        println!("{}", rendered.trim_end());
        println!(
            "{}",
            format!("({} nodes, {} edges)", ctx.node_count(), ctx.edge_count()).dimmed()
        );
    }

    /// Displays an error message
    fn print_error(&self, err: &DefGraphError) {
        println!(
            "{} {}",
            "Error:".bright_red().bold(),
            err.to_string().bright_red()
        );
    }
}

/// Checks if the input is syntactically complete.
/// Returns true if all brackets and parentheses are balanced and no
/// string literal is left open.
fn is_input_complete(input: &str) -> bool {
    let trimmed = input.trim();

    // Empty input is complete
    if trimmed.is_empty() {
        return true;
    }

    let mut bracket_count = 0;
    let mut paren_count = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for ch in trimmed.chars() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => {
                escape_next = true;
            }
            '"' => {
                in_string = !in_string;
            }
            '[' if !in_string => bracket_count += 1,
            ']' if !in_string => bracket_count -= 1,
            '(' if !in_string => paren_count += 1,
            ')' if !in_string => paren_count -= 1,
            _ => {}
        }
    }

    !in_string && bracket_count == 0 && paren_count == 0
}
