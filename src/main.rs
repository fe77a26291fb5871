// cfront: token explorer for a miniature C front end

use std::fs;
use std::io;
use std::path::Path;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use cfront::lexer::{Lexer, Token};
use cfront::semantic::Analyzer;
use cfront::ui::App;

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} [--dump] <file.c>", program_name);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --dump    Print the token table instead of opening the explorer");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} demos/scopes.c          # Step through the tokens", program_name);
    eprintln!("  {} --dump demos/scopes.c   # Token table on stdout", program_name);
}

/// Print the token table in the same layout as the explorer's token pane
fn dump_tokens(tokens: &[Token<'_>]) {
    println!("{:>4}  {:<12} {:<16} LOC", "#", "TYPE", "LEXEME");
    for (idx, token) in tokens.iter().enumerate() {
        let lexeme = if token.is_eof() {
            "<EOF>".to_string()
        } else {
            token.lexeme.escape_default().to_string()
        };
        println!(
            "{:>4}  {:<12} {:<16} {}",
            idx + 1,
            token.kind.name(),
            lexeme,
            token.location
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("cfront");

    let dump = args.iter().skip(1).any(|a| a == "--dump");
    let Some(input_file) = args.iter().skip(1).find(|a| !a.starts_with("--")) else {
        eprintln!("Error: No input file provided");
        eprintln!();
        print_usage(program_name);
        std::process::exit(1);
    };

    if !Path::new(input_file).exists() {
        eprintln!("Error: File '{}' not found", input_file);
        print_usage(program_name);
        std::process::exit(1);
    }

    let source = fs::read_to_string(input_file)?;

    eprintln!("Tokenizing {}...", input_file);
    let mut lexer = Lexer::new(&source);
    let tokens = lexer.tokenize();

    let mut analyzer = Analyzer::new();
    analyzer.lexical_errors(&tokens, lexer.unterminated_comment());
    eprintln!(
        "Produced {} tokens, {} lexical error(s), {} warning(s).",
        tokens.len(),
        analyzer.error_count(),
        analyzer.warning_count()
    );

    if dump {
        dump_tokens(&tokens);
        for diag in analyzer.diagnostics() {
            eprintln!("{}", diag);
        }
        if analyzer.has_errors() {
            std::process::exit(1);
        }
        return Ok(());
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&source, tokens, analyzer.into_diagnostics());
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
