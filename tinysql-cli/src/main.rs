use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tinysql::{connect_with, ConnectOptions};
use tracing::{error, info};

/// Interactive REPL for exercising the tinysql engine.
#[derive(Parser, Debug)]
#[command(name = "tinysql", about = "An embeddable, in-memory SQL engine")]
struct Cli {
    /// Database filename. Connections sharing a filename see each other's
    /// committed writes; every other filename is a wholly separate database.
    #[arg(default_value = ":memory:")]
    filename: String,

    /// Busy-wait timeout in seconds, accepted for interface parity and
    /// otherwise unused: this engine has no busy-retry loop to bound.
    #[arg(long)]
    timeout: Option<f64>,
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let options = ConnectOptions {
        timeout: cli.timeout,
        isolation_level: None,
    };
    let mut conn = connect_with(cli.filename.clone(), options);
    info!(filename = %cli.filename, "connected");

    let mut editor = DefaultEditor::new().expect("failed to initialize line editor");
    let mut buffer = String::new();

    loop {
        let prompt = if buffer.is_empty() { "tinysql> " } else { "   ...> " };
        match editor.readline(prompt) {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                buffer.push_str(&line);
                buffer.push(' ');

                if !buffer.trim_end().ends_with(';') {
                    continue;
                }

                let statement = buffer.trim().to_string();
                buffer.clear();

                if statement.eq_ignore_ascii_case(".exit;") || statement.eq_ignore_ascii_case(".quit;") {
                    break;
                }

                match conn.execute(&statement) {
                    Ok(rows) => print_rows(&rows),
                    Err(err) => error!(%err, "statement failed"),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                error!(%err, "readline error");
                break;
            }
        }
    }
}

fn print_rows(rows: &[Vec<tinysql::ast::Value>]) {
    for row in rows {
        let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        println!("{}", cells.join(" | "));
    }
    if rows.is_empty() {
        println!("(0 rows)");
    }
}
