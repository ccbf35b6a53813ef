//! Interactive REPL (Read-Eval-Print Loop) mode.
//!
//! The REPL holds one form (price, taste, free text). Field commands edit it,
//! `submit` runs a request, and the last successful answer is kept until the
//! next success, so a failed submission never clears it.

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::{LiveAdvisor, Session};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use sommelier_advisor::{Advisor, Recommendation};
use sommelier_domain::traits::{InventorySource, LlmProvider};
use sommelier_domain::{PriceBucket, RecommendationRequest, Scale, TasteAxis, TastePreference};
use std::path::PathBuf;

/// Run the interactive REPL.
pub fn run_repl(session: &Session) -> Result<()> {
    let formatter = &session.formatter;

    // Key and inventory location problems end the program before the prompt
    let mut advisor = session.advisor()?;

    println!("{}", formatter.info("Sommelier - Type 'help' for commands, 'wizard' for a guided form, 'exit' to quit"));
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(session.config.settings.history_size)
        .map_err(|e| CliError::Config(format!("Invalid history size: {}", e)))?
        .auto_add_history(false)
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(|e| {
        CliError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Failed to initialize editor: {}", e),
        ))
    })?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    let mut form = RecommendationRequest::default();
    let mut last: Option<Recommendation> = None;

    loop {
        match editor.readline("sommelier> ") {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => print_help(formatter),
                    Ok(ReplCommand::Wizard) => {
                        if let Err(e) = advisor.begin() {
                            eprintln!("{}", formatter.error(&e.to_string()));
                            continue;
                        }
                        let mut ask = |prompt: &str| editor.readline(prompt).ok();
                        if run_wizard(&mut form, &mut ask) {
                            println!("{}", formatter.format_request(&form));
                            submit(&mut advisor, &form, &mut last, formatter);
                        } else {
                            println!("{}", formatter.info("Wizard cancelled; form kept as it was"));
                        }
                    }
                    Ok(command) => {
                        if let Err(e) = execute_repl_command(command, &mut advisor, &mut form, &mut last, formatter) {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    // Save history
    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug, Clone, PartialEq)]
enum ReplCommand {
    Exit,
    Help,
    Price(PriceBucket),
    Taste(TastePreference),
    Axis(TasteAxis, Scale),
    Ask(String),
    Show,
    Candidates,
    Prompt,
    Submit,
    Wizard,
    Last,
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    if word.is_empty() {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    }

    match word.to_lowercase().as_str() {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "price" => parse_price_command(&args),
        "taste" => parse_taste_command(&args),
        "ask" => Ok(ReplCommand::Ask(rest.to_string())),
        "show" => Ok(ReplCommand::Show),
        "candidates" => Ok(ReplCommand::Candidates),
        "prompt" => Ok(ReplCommand::Prompt),
        "submit" | "go" => Ok(ReplCommand::Submit),
        "wizard" => Ok(ReplCommand::Wizard),
        "last" => Ok(ReplCommand::Last),
        other => match TasteAxis::parse(other) {
            Some(axis) => parse_axis_command(axis, &args),
            None => Err(CliError::InvalidInput(format!(
                "Unknown command: {}. Type 'help' for available commands.",
                word
            ))),
        },
    }
}

fn parse_price_command(args: &[&str]) -> Result<ReplCommand> {
    let usage = || {
        CliError::InvalidInput(
            "Usage: price <all|low|mid|high|premium> (or 1-5)".to_string(),
        )
    };
    let [bucket] = args else {
        return Err(usage());
    };
    PriceBucket::parse(*bucket).map(ReplCommand::Price).ok_or_else(usage)
}

fn parse_taste_command(args: &[&str]) -> Result<ReplCommand> {
    let usage = || CliError::InvalidInput("Usage: taste auto | taste <body> <sweet> <acid> <tannin> (1-5 each)".to_string());

    match args {
        ["auto"] => Ok(ReplCommand::Taste(TastePreference::NoPreference)),
        [body, sweetness, acidity, tannin] => {
            let scale = |s: &str| s.parse::<Scale>().map_err(|_| usage());
            Ok(ReplCommand::Taste(TastePreference::Explicit {
                body: scale(*body)?,
                sweetness: scale(*sweetness)?,
                acidity: scale(*acidity)?,
                tannin: scale(*tannin)?,
            }))
        }
        _ => Err(usage()),
    }
}

fn parse_axis_command(axis: TasteAxis, args: &[&str]) -> Result<ReplCommand> {
    let usage = || {
        CliError::InvalidInput(format!(
            "Usage: {} <1-5> ({})",
            axis_command_name(axis),
            axis.labels().join(" / ")
        ))
    };
    let [value] = args else {
        return Err(usage());
    };
    let scale = value.parse::<Scale>().map_err(|_| usage())?;
    Ok(ReplCommand::Axis(axis, scale))
}

fn axis_command_name(axis: TasteAxis) -> &'static str {
    match axis {
        TasteAxis::Body => "body",
        TasteAxis::Sweetness => "sweet",
        TasteAxis::Acidity => "acid",
        TasteAxis::Tannin => "tannin",
    }
}

/// Execute a REPL command.
fn execute_repl_command(
    command: ReplCommand,
    advisor: &mut LiveAdvisor,
    form: &mut RecommendationRequest,
    last: &mut Option<Recommendation>,
    formatter: &Formatter,
) -> Result<()> {
    match command {
        ReplCommand::Price(_)
        | ReplCommand::Taste(_)
        | ReplCommand::Axis(_, _)
        | ReplCommand::Ask(_) => {
            advisor.begin()?;
            apply_edit(form, command);
            println!("{}", formatter.format_request(form));
        }
        ReplCommand::Show => {
            println!("{}", formatter.format_request(form));
        }
        ReplCommand::Candidates => {
            let prepared = advisor.prepare(form)?;
            println!("{}", formatter.format_selection(&prepared.selection, form.bucket)?);
        }
        ReplCommand::Prompt => {
            let prepared = advisor.prepare(form)?;
            println!("{}", formatter.format_prompt(&prepared)?);
        }
        ReplCommand::Submit => {
            submit(advisor, form, last, formatter);
        }
        ReplCommand::Last => match last {
            Some(recommendation) => println!("{}", formatter.format_recommendation(recommendation)?),
            None => println!("{}", formatter.info("No recommendation yet. Use 'submit'.")),
        },
        ReplCommand::Exit | ReplCommand::Help | ReplCommand::Wizard => {}
    }
    Ok(())
}

/// Apply a field command to the form; other commands leave it unchanged.
fn apply_edit(form: &mut RecommendationRequest, command: ReplCommand) {
    match command {
        ReplCommand::Price(bucket) => form.bucket = bucket,
        ReplCommand::Taste(taste) => form.taste = taste,
        ReplCommand::Axis(axis, scale) => form.taste = form.taste.with_axis(axis, scale),
        ReplCommand::Ask(query) => form.query = query,
        _ => {}
    }
}

/// Run one request; on failure the previous answer stays in `last`.
fn submit<S, L>(
    advisor: &mut Advisor<S, L>,
    form: &RecommendationRequest,
    last: &mut Option<Recommendation>,
    formatter: &Formatter,
) where
    S: InventorySource,
    L: LlmProvider,
    S::Error: std::fmt::Display,
    L::Error: std::fmt::Display,
{
    println!("{}", formatter.info("Asking the sommelier..."));
    match advisor.recommend(form) {
        Ok(recommendation) => {
            match formatter.format_recommendation(&recommendation) {
                Ok(text) => println!("{}", text),
                Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
            }
            *last = Some(recommendation);
        }
        Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
    }
}

/// Guided form filling. Returns false if the user cancelled.
///
/// `ask` returns `None` on Ctrl-C / Ctrl-D. An empty answer keeps the
/// current value; invalid answers are asked again.
fn run_wizard(form: &mut RecommendationRequest, ask: &mut dyn FnMut(&str) -> Option<String>) -> bool {
    let mut draft = form.clone();

    println!("Price range:");
    for bucket in PriceBucket::BUCKETS {
        println!("  {}) {}", bucket.option_number(), bucket.label());
    }
    let prompt = format!("price [1-5, enter = {}]> ", draft.bucket.option_number());
    match ask_until(ask, &prompt, PriceBucket::parse) {
        Some(Some(bucket)) => draft.bucket = bucket,
        Some(None) => {}
        None => return false,
    }

    let current_auto = draft.taste == TastePreference::NoPreference;
    let prompt = format!(
        "let the sommelier pick popular wines? [y/n, enter = {}]> ",
        if current_auto { "y" } else { "n" }
    );
    let auto = ask_until(ask, &prompt, |s| match s.to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    });
    match auto.map(|answer| answer.unwrap_or(current_auto)) {
        None => return false,
        Some(true) => draft.taste = TastePreference::NoPreference,
        Some(false) => {
            for axis in TasteAxis::AXES {
                let current = draft.taste.get(axis).unwrap_or_default();
                let labels: Vec<String> = axis
                    .labels()
                    .iter()
                    .enumerate()
                    .map(|(i, label)| format!("{} {}", i + 1, label))
                    .collect();
                println!("{}: {}", axis.name(), labels.join(" | "));
                let prompt = format!("{} [1-5, enter = {}]> ", axis_command_name(axis), current.position());
                match ask_until(ask, &prompt, |s| s.parse::<Scale>().ok()) {
                    Some(Some(scale)) => draft.taste = draft.taste.with_axis(axis, scale),
                    Some(None) => draft.taste = draft.taste.with_axis(axis, current),
                    None => return false,
                }
            }
        }
    }

    match ask("request (enter for none)> ") {
        Some(query) => draft.query = query.trim().to_string(),
        None => return false,
    }

    *form = draft;
    true
}

/// Ask until the answer parses. `Some(None)` means an empty answer.
fn ask_until<T>(
    ask: &mut dyn FnMut(&str) -> Option<String>,
    prompt: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<Option<T>> {
    loop {
        let answer = ask(prompt)?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Some(None);
        }
        match parse(answer) {
            Some(value) => return Some(Some(value)),
            None => println!("  '{}' is not one of the options", answer),
        }
    }
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Form fields:"));
    println!();
    println!("  price <all|low|mid|high|premium|1-5>  - Price range");
    println!("  taste auto                            - Let the sommelier pick popular wines");
    println!("  taste <b> <s> <a> <t>                 - All four sliders (1-5 each)");
    println!("  body|sweet|acid|tannin <1-5>          - Move one slider");
    println!("  ask <text>                            - Free-text request (empty clears)");
    println!();
    println!("{}", formatter.info("Actions:"));
    println!();
    println!("  show                                  - Show the form");
    println!("  candidates                            - Preview the stock sent to the model");
    println!("  prompt                                - Show the prompt without sending it");
    println!("  submit, go                            - Get a recommendation");
    println!("  wizard                                - Fill the form step by step, then submit");
    println!("  last                                  - Show the last recommendation again");
    println!("  help, ?                               - Show this help");
    println!("  exit, quit, q                         - Exit");
    println!();
}
