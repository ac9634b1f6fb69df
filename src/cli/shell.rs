//! Interactive shell mode for the Insight CLI
//!
//! Provides a REPL with command history and tab completion. The shell keeps
//! one recommendation controller for its whole session, so `query`, `tone`
//! and `submit` build on each other.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper};

use super::commands::recommend::format_cards;
use super::output::{print_error, print_formatted, OutputFormat};
use super::{dispatch, Cli, Commands};
use crate::config::Config;
use crate::recommend::HttpRecommendationClient;
use crate::state::{RecommendationController, RequestStatus};
use crate::tone::Tone;

/// A completable word and the words that may follow it
struct CompletionEntry {
    name: String,
    next: Vec<String>,
}

fn entry(name: &str, next: &[&str]) -> CompletionEntry {
    CompletionEntry {
        name: name.to_string(),
        next: next.iter().map(|w| w.to_string()).collect(),
    }
}

/// Command completer for the shell.
///
/// Session built-ins are listed by hand; everything else comes from the clap
/// command tree, so completion follows the real subcommands.
struct ShellCompleter {
    entries: Vec<CompletionEntry>,
}

impl ShellCompleter {
    fn new() -> Self {
        let tones: Vec<&str> = Tone::all()[1..].iter().map(Tone::as_str).collect();
        let mut entries = vec![
            entry("query", &[]),
            entry("tone", &tones),
            entry("submit", &["--json"]),
            entry("status", &[]),
        ];

        entries.extend(
            Cli::command()
                .get_subcommands()
                .filter(|cmd| cmd.get_name() != "shell")
                .map(|cmd| CompletionEntry {
                    name: cmd.get_name().to_string(),
                    next: cmd.get_subcommands().map(|sub| sub.get_name().to_string()).collect(),
                }),
        );

        entries.extend(["help", "exit", "quit"].map(|name| entry(name, &[])));
        Self { entries }
    }

    /// Start offset and candidates for the word under the cursor
    fn candidates(&self, line: &str) -> (usize, Vec<Pair>) {
        let start = line.rfind(' ').map(|i| i + 1).unwrap_or(0);
        let (head, partial) = line.split_at(start);

        let pool: Vec<&str> = match head.split_whitespace().collect::<Vec<_>>().as_slice() {
            [] => self.entries.iter().map(|e| e.name.as_str()).collect(),
            [cmd] => self
                .entries
                .iter()
                .find(|e| e.name == *cmd)
                .map(|e| e.next.iter().map(String::as_str).collect())
                .unwrap_or_default(),
            _ => Vec::new(),
        };

        let pairs = pool
            .into_iter()
            .filter(|word| word.starts_with(partial))
            .map(|word| Pair {
                display: word.to_string(),
                replacement: word.to_string(),
            })
            .collect();

        (start, pairs)
    }
}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(&line[..pos]))
    }
}

impl Hinter for ShellCompleter {
    type Hint = String;
}

impl Highlighter for ShellCompleter {}
impl Validator for ShellCompleter {}
impl Helper for ShellCompleter {}

/// Parse a command line into arguments, handling quotes
fn parse_args(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quote_char = ' ';

    for c in line.chars() {
        match c {
            '"' | '\'' if !in_quotes => {
                in_quotes = true;
                quote_char = c;
            }
            c if c == quote_char && in_quotes => {
                in_quotes = false;
            }
            ' ' if !in_quotes => {
                if !current.is_empty() {
                    args.push(current.clone());
                    current.clear();
                }
            }
            _ => {
                current.push(c);
            }
        }
    }

    if !current.is_empty() {
        args.push(current);
    }

    args
}

/// State carried between shell commands
struct Session {
    config: Config,
    controller: RecommendationController,
}

impl Session {
    fn new(config: Config) -> Result<Self> {
        let client = HttpRecommendationClient::new(&config.service)?;
        Ok(Self {
            controller: RecommendationController::new(Arc::new(client)),
            config,
        })
    }

    fn print_status(&self) {
        let query = self.controller.query();
        let state = match self.controller.current_state() {
            RequestStatus::Idle => "idle".to_string(),
            RequestStatus::Loading => "loading".to_string(),
            RequestStatus::Success(games) => format!("{} results", games.len()),
            RequestStatus::Failed(e) => e.to_string(),
        };
        println!("query: {:?}", query.query);
        println!("tone:  {}", query.tone);
        println!("state: {}", state);
    }

    async fn submit(&mut self, format: OutputFormat) -> Result<()> {
        self.controller.submit();
        self.controller.wait().await;

        if let RequestStatus::Failed(e) = self.controller.current_state() {
            return Err(anyhow::Error::new(*e));
        }
        let games = self.controller.results();
        print_formatted(&games, format, |games| format_cards(games))?;
        Ok(())
    }
}

/// Run a single command in the shell.
/// Returns Ok(true) to continue, Ok(false) to exit gracefully.
async fn run_command(session: &mut Session, args: Vec<String>) -> Result<bool> {
    if args.is_empty() {
        return Ok(true);
    }

    // Handle shell built-in commands
    let cmd = args[0].as_str();
    match cmd {
        "help" => {
            print_help();
            return Ok(true);
        }
        "exit" | "quit" => {
            return Ok(false);
        }
        "query" => {
            session.controller.set_query(args[1..].join(" "));
            return Ok(true);
        }
        "tone" => {
            session.controller.set_tone_value(args.get(1).map(String::as_str).unwrap_or(""));
            println!("tone: {}", session.controller.query().tone);
            return Ok(true);
        }
        "status" => {
            session.print_status();
            return Ok(true);
        }
        "submit" => {
            let format = if args.iter().any(|a| a == "--json") {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            };
            session.submit(format).await?;
            return Ok(true);
        }
        _ => {}
    }

    // Build a fake argv for clap: ["insight", ...args]
    let mut argv: Vec<String> = vec!["insight".to_string()];
    argv.extend(args);

    // Parse using clap
    let cli = match Cli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            // Print clap's error message (includes usage hints)
            println!("{}", e);
            return Ok(true);
        }
    };

    let Some(command) = cli.command else {
        return Ok(true);
    };

    // Reject nested shell command
    if matches!(command, Commands::Shell) {
        println!("Already in shell mode.");
        return Ok(true);
    }

    let mut config = session.config.clone();
    if let Some(url) = cli.base_url {
        config.service.base_url = url;
    }

    dispatch(command, &config, cli.output.format(), cli.output.quiet).await?;
    Ok(true)
}

fn print_help() {
    println!(
        r#"Insight Interactive Shell

Session:
  query <text>             Set the query text (empty clears it)
  tone <value>             Set the tone; unknown values mean no tone
  submit [--json]          Send the current query and tone
  status                   Show the current query, tone and request state

Commands:
  recommend <query> [--tone <tone>]
                           One-off request, leaves the session untouched

  config show              Show current configuration
  config get <key>         Get a specific setting
  config set <key> <value> Set a configuration value
  config path              Show config file path

  diag paths               Show data paths and the service endpoint
  diag tilt <x> <y>        Compute the card tilt for a pointer position

  help                     Show this help
  exit, quit               Exit the shell

Tones: happy, sad, angry, surprising, suspenseful

Flags (can be added to any command):
  --json                   Output in JSON format
  --quiet, -q              Suppress non-essential output
  --base-url <URL>         Use a different recommendation service
"#
    );
}

/// Get the history file path
pub fn history_path() -> Option<PathBuf> {
    Config::project_dirs()
        .ok()
        .map(|dirs| dirs.data_dir().join("shell_history"))
}

/// Run the interactive shell
pub async fn run(config: Config) -> Result<()> {
    println!("Insight Interactive Shell v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'help' for available commands, 'exit' to quit.\n");

    let mut session = Session::new(config)?;

    let editor_config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let mut rl = Editor::with_config(editor_config)?;
    rl.set_helper(Some(ShellCompleter::new()));

    // Load history
    if let Some(path) = history_path() {
        let _ = rl.load_history(&path);
    }

    loop {
        match rl.readline("insight> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                rl.add_history_entry(line)?;

                let args = parse_args(line);
                match run_command(&mut session, args).await {
                    Ok(true) => continue,
                    Ok(false) => break,
                    Err(e) => print_error(&e.to_string()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("exit");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    // Save history
    if let Some(path) = history_path() {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = rl.save_history(&path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(Config::default()).unwrap()
    }

    fn args(line: &str) -> Vec<String> {
        parse_args(line)
    }

    #[test]
    fn test_parse_args_quotes() {
        assert_eq!(parse_args("query zombie survival"), vec!["query", "zombie", "survival"]);
        assert_eq!(
            parse_args("recommend \"open world\" --tone happy"),
            vec!["recommend", "open world", "--tone", "happy"]
        );
        assert_eq!(parse_args("  "), Vec::<String>::new());
    }

    #[tokio::test]
    async fn test_query_and_tone_builtins() {
        let mut session = session();

        assert!(run_command(&mut session, args("query open world racing")).await.unwrap());
        assert!(run_command(&mut session, args("tone Happy")).await.unwrap());

        let query = session.controller.query();
        assert_eq!(query.query, "open world racing");
        assert_eq!(query.tone, Tone::Happy);
    }

    #[tokio::test]
    async fn test_unknown_tone_clears_filter() {
        let mut session = session();
        run_command(&mut session, args("tone sad")).await.unwrap();
        run_command(&mut session, args("tone ecstatic")).await.unwrap();

        assert_eq!(session.controller.query().tone, Tone::Any);
    }

    #[tokio::test]
    async fn test_exit_and_empty_lines() {
        let mut session = session();
        assert!(run_command(&mut session, vec![]).await.unwrap());
        assert!(!run_command(&mut session, args("quit")).await.unwrap());
    }

    fn completions(line: &str) -> Vec<String> {
        let (_, pairs) = ShellCompleter::new().candidates(line);
        pairs.into_iter().map(|p| p.replacement).collect()
    }

    #[test]
    fn test_completer_follows_clap_commands() {
        let top = completions("");
        for name in ["query", "tone", "submit", "recommend", "config", "diag", "exit"] {
            assert!(top.iter().any(|c| c == name), "missing {}", name);
        }
        assert!(!top.iter().any(|c| c == "shell"));

        assert_eq!(completions("diag "), vec!["paths", "tilt"]);
        assert_eq!(completions("config s"), vec!["show", "set"]);
        assert_eq!(completions("rec"), vec!["recommend"]);
    }

    #[test]
    fn test_completer_lists_tones() {
        assert_eq!(completions("tone su"), vec!["surprising", "suspenseful"]);
        assert_eq!(completions("tone happy "), Vec::<String>::new());
    }
}
