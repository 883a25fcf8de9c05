mod loader;

use std::path::Path;
use std::process;

use clap::{Parser, Subcommand};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};

#[derive(Parser)]
#[command(name = "fable", version, about = "BDD story document checker")]
struct Cli {
    /// Disable colored error output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse every .feature document under a path and report failures
    Check(CheckArgs),

    /// Print one parsed story
    Show(ShowArgs),
}

#[derive(clap::Args)]
struct CheckArgs {
    /// A .feature file or a directory tree containing them
    path: String,

    /// Language symbol used for keyword matching
    #[arg(short, long, default_value = "en")]
    language: String,
}

#[derive(clap::Args)]
struct ShowArgs {
    /// Story document to parse
    file: String,

    /// Print the parsed story as JSON
    #[arg(long)]
    json: bool,

    /// Language symbol used for keyword matching
    #[arg(short, long, default_value = "en")]
    language: String,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Check(args) => {
            let exit_code = loader::check_path(Path::new(&args.path), cli.no_color, &args.language);
            process::exit(exit_code);
        }
        Command::Show(args) => do_show(args, cli.no_color),
    }
}

fn do_show(args: ShowArgs, no_color: bool) {
    let source = match std::fs::read_to_string(&args.file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", args.file, e);
            process::exit(1);
        }
    };

    let mut files = SimpleFiles::new();
    let file_id = files.add(args.file.clone(), source.clone());

    let story = match fable::Parser::new(args.file.clone(), source.clone())
        .language(&args.language)
        .parse()
    {
        Ok(story) => story,
        Err(error) => {
            let color_choice = if no_color {
                ColorChoice::Never
            } else {
                ColorChoice::Auto
            };
            let writer = StandardStream::stderr(color_choice);
            let config = term::Config::default();
            let diagnostic = error.to_diagnostic(file_id, &source);
            let _ = term::emit_to_write_style(&mut writer.lock(), &config, &files, &diagnostic);
            process::exit(1);
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&story) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: cannot serialize story: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    println!("Feature: {} ({})", story.title, story.path);
    for line in story.description.lines() {
        println!("  {}", line);
    }
    for scenario in &story.scenarios {
        println!();
        println!("  Scenario: {} (line {})", scenario.title, scenario.start_at + 1);
        let mut contexts = scenario.contexts.iter();
        if let Some(first) = contexts.next() {
            println!("    Given {}", first);
        }
        for context in contexts {
            println!("    And {}", context);
        }
        println!("    When {}", scenario.event);
        let mut postconditions = scenario.postconditions.iter();
        if let Some(first) = postconditions.next() {
            println!("    Then {}", first);
        }
        for postcondition in postconditions {
            println!("    And {}", postcondition);
        }
    }
}
