// mel: parse Mel source files and print or inspect their syntax tree

use std::fs;
use std::io;
use std::path::Path;
use std::process;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use mel::parser::{self, StartSymbol};
use mel::tree::render_tree;
use mel::ui::App;

/// Command-line options
struct Options {
    path: String,
    tui: bool,
    start: StartSymbol,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut path = None;
    let mut tui = false;
    let mut start = StartSymbol::default();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--tui" => tui = true,
            "--start" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--start needs a value".to_string())?;
                start = value.parse().map_err(|e| format!("{}", e))?;
            }
            flag if flag.starts_with("--") => return Err(format!("unknown option '{}'", flag)),
            file => {
                if path.replace(file.to_string()).is_some() {
                    return Err("more than one input file given".to_string());
                }
            }
        }
    }

    let path = path.ok_or_else(|| "no input file provided".to_string())?;
    Ok(Options { path, tui, start })
}

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} <file.mel> [--tui] [--start program|stmts|expr]", program_name);
    eprintln!();
    eprintln!("Examples:");
    eprintln!(
        "  {} demos/functions.mel            # Print the syntax tree",
        program_name
    );
    eprintln!(
        "  {} demos/functions.mel --tui      # Browse the tree interactively",
        program_name
    );
    eprintln!(
        "  {} demos/script.mel --start stmts # Parse a bare statement list",
        program_name
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("mel");

    let options = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!();
            print_usage(program_name);
            process::exit(1);
        }
    };

    if !Path::new(&options.path).exists() {
        eprintln!("Error: File '{}' not found", options.path);
        process::exit(1);
    }

    let source = fs::read_to_string(&options.path)?;

    if options.tui {
        eprintln!("Opening inspector for {}...", options.path);
        return run_tui(source, &options);
    }

    eprintln!("Parsing {} as {}...", options.path, options.start);
    let root = match parser::parse(&source, options.start) {
        Ok(root) => root,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let lines = render_tree(&root);
    eprintln!("Parsed successfully. Tree has {} nodes.", lines.len());
    for line in &lines {
        println!("{}", line);
    }

    Ok(())
}

fn run_tui(source: String, options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(source, options.path.clone(), options.start);

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    if let Some(e) = &app.error {
        eprintln!("{}", e);
        process::exit(1);
    }

    Ok(())
}
