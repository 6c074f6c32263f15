use std::io::{self, BufRead, BufWriter, IsTerminal, Write};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use kubetint::cli::{Cli, ColorMode};
use kubetint::config::Config;
use kubetint::error::KubetintError;
use kubetint::formatter::Formatter;

fn main() -> ExitCode {
    // Reset SIGPIPE to default behavior so upstream writers get a clean
    // SIGPIPE signal instead of a BrokenPipeError when kubetint exits early.
    reset_sigpipe();

    // RUST_LOG overrides the default `warn` level.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "kubetint", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    let config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("kubetint: {e}");
            return ExitCode::from(e.exit_code());
        }
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(KubetintError::Io(e)) if e.kind() == io::ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("kubetint: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(config: &Config) -> Result<(), KubetintError> {
    let formatter = Formatter::new(config, resolve_color_mode(config.color_mode));

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    let mut line_buf = String::new();

    for (index, line_result) in stdin.lock().lines().enumerate() {
        let line = match line_result {
            Ok(l) => l,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => continue,
            Err(e) => return Err(e.into()),
        };
        if line.trim().is_empty() {
            continue;
        }

        line_buf.clear();
        if let Err(e) = formatter.format_record_into(line.as_bytes(), &mut line_buf) {
            if config.fail_fast {
                writer.flush()?;
                return Err(e.into());
            }
            tracing::warn!(line = index + 1, "{e}");
            continue;
        }

        writeln!(writer, "{line_buf}")?;
    }

    writer.flush()?;
    Ok(())
}

fn resolve_color_mode(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some_and(|v| !v.is_empty()) {
                return true;
            }
            if !io::stdout().is_terminal() {
                return false;
            }
            !std::env::var("TERM").is_ok_and(|v| v == "dumb")
        }
    }
}

/// Reset SIGPIPE to the default (terminate) behavior.
///
/// By default, Rust ignores SIGPIPE to surface `BrokenPipe` I/O errors.
/// For a filter sitting behind a log tailer this makes the tailer see a
/// write error when kubetint exits; restoring `SIG_DFL` lets the OS handle
/// the signal normally.
#[cfg(unix)]
fn reset_sigpipe() {
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn reset_sigpipe() {}
