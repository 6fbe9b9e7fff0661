//! Command-line parsing
//!
//! Parses invocations like `cinema search <query>` and `cinema movie <id>`.

/// Parsed command from the process arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open the window: no arguments
    Browse,
    /// Open the window at a route: open <path>
    Open { path: String },
    /// Print search results: search <query>
    Search { query: String },
    /// Print one movie with its reviews: movie <id>
    Movie { id: u64 },
    /// Show help: help
    Help,
    /// Anything else, with the message to print
    Invalid { message: String },
}

impl Command {
    /// Parse arguments, excluding the program name
    pub fn parse(args: &[String]) -> Self {
        let Some(cmd) = args.first() else {
            return Command::Browse;
        };
        let rest = args[1..].join(" ");
        let rest = rest.trim();

        match cmd.to_lowercase().as_str() {
            "search" | "s" => Command::Search {
                query: rest.to_string(),
            },
            "open" | "o" => {
                if rest.is_empty() {
                    Command::Browse
                } else {
                    Command::Open {
                        path: rest.to_string(),
                    }
                }
            }
            "movie" | "m" => match rest.parse() {
                Ok(id) => Command::Movie { id },
                Err(_) => Command::Invalid {
                    message: "Usage: cinema movie <id>".to_string(),
                },
            },
            "help" | "--help" | "-h" => Command::Help,
            other => Command::Invalid {
                message: format!("Unknown command: {}. Run 'cinema help' for usage.", other),
            },
        }
    }

    /// Get help text for all commands
    pub fn help_text() -> &'static str {
        r#"Hanip Cinema - movie catalog browser

Usage: cinema [command]

Commands:
  (none)          Open the catalog window
  open <path>     Open the window at /search?q=... or /movie/<id>
  search <query>  Print movies matching <query>
  movie <id>      Print a movie and its reviews
  help            Show this help

Set CINEMA_API_URL to point at a different catalog server."#
    }
}
