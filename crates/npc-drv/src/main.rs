//! `npc` CLI entry point.

mod autofix;
mod backend;
mod config;
mod error;
mod session;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::{Config, EmitType};
use error::CompileError;
use session::Session;

#[derive(Parser, Debug)]
#[command(name = "npc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Ahead-of-time compiler for NeoPaquet", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a source file to IR, assembly, or a linked executable
    Compile(CompileArgs),

    /// Run lexing, parsing, and semantic analysis without emitting output
    Check(CheckArgs),

    /// Insert missing statement separators into a source file
    AutoFix(AutoFixArgs),

    /// Print the compiler version
    Version,
}

#[derive(Parser, Debug)]
struct CompileArgs {
    /// NeoPaquet source file
    file: PathBuf,

    /// Output path (default: a.out, or a.exe on Windows for --emit exe)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// What to emit
    #[arg(long, value_enum, default_value_t = EmitArg::Exe)]
    emit: EmitArg,

    /// Enable debug-level logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Treat warnings as errors
    #[arg(short = 'W', long = "Werror")]
    werror: bool,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// NeoPaquet source file
    file: PathBuf,

    /// Enable debug-level logging
    #[arg(long, global = true)]
    verbose: bool,
}

#[derive(Parser, Debug)]
struct AutoFixArgs {
    /// NeoPaquet source file
    file: PathBuf,

    /// Output path (default: overwrite the input file)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum EmitArg {
    Ir,
    Asm,
    Exe,
}

impl From<EmitArg> for EmitType {
    fn from(value: EmitArg) -> Self {
        match value {
            EmitArg::Ir => EmitType::Ir,
            EmitArg::Asm => EmitType::Asm,
            EmitArg::Exe => EmitType::Executable,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let verbose = match &cli.command {
        Commands::Compile(args) => args.verbose,
        Commands::Check(args) => args.verbose,
        Commands::AutoFix(_) | Commands::Version => false,
    };
    init_logging(verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env("NP_LOG")
        .or_else(|_| EnvFilter::try_from_env("RUST_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    let subscriber = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry().with(filter).with(subscriber).try_init();
}

fn run(command: Commands) -> error::Result<()> {
    match command {
        Commands::Compile(args) => run_compile(args),
        Commands::Check(args) => run_check(args),
        Commands::AutoFix(args) => run_auto_fix(args),
        Commands::Version => {
            println!("npc {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn run_compile(args: CompileArgs) -> error::Result<()> {
    let emit: EmitType = args.emit.into();
    let output_file = args.output.unwrap_or_else(|| Config::default_output_for(emit));
    let config = Config {
        input_file: args.file,
        output_file,
        emit,
        verbose: args.verbose,
        warnings_as_errors: args.werror,
    };
    Session::new(config).compile()
}

fn run_check(args: CheckArgs) -> error::Result<()> {
    let config = Config {
        input_file: args.file,
        output_file: Config::default_output_for(EmitType::Ir),
        emit: EmitType::Ir,
        verbose: args.verbose,
        warnings_as_errors: false,
    };
    match Session::new(config).check()? {
        0 => Ok(()),
        count => Err(CompileError::DiagnosticsReported(count)),
    }
}

fn run_auto_fix(args: AutoFixArgs) -> error::Result<()> {
    let source = std::fs::read_to_string(&args.file)
        .map_err(|e| CompileError::Io(args.file.clone(), e))?;
    let (fixed, changed) = autofix::auto_fix(&source);
    let output_path = args.output.unwrap_or_else(|| args.file.clone());
    std::fs::write(&output_path, fixed).map_err(|e| CompileError::Io(output_path.clone(), e))?;
    if changed {
        println!("fixed {}", output_path.display());
    } else {
        println!("{} already clean", output_path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compile_with_emit_and_output() {
        let cli = Cli::parse_from(["npc", "compile", "a.np", "--emit", "ir", "-o", "out.ll"]);
        match cli.command {
            Commands::Compile(args) => {
                assert_eq!(args.file, PathBuf::from("a.np"));
                assert_eq!(args.output, Some(PathBuf::from("out.ll")));
                assert!(matches!(args.emit, EmitArg::Ir));
            }
            _ => panic!("expected Compile"),
        }
    }

    #[test]
    fn compile_defaults_to_executable_emit() {
        let cli = Cli::parse_from(["npc", "compile", "a.np"]);
        match cli.command {
            Commands::Compile(args) => assert!(matches!(args.emit, EmitArg::Exe)),
            _ => panic!("expected Compile"),
        }
    }

    #[test]
    fn parses_check() {
        let cli = Cli::parse_from(["npc", "check", "a.np", "--verbose"]);
        match cli.command {
            Commands::Check(args) => assert!(args.verbose),
            _ => panic!("expected Check"),
        }
    }

    #[test]
    fn parses_werror_short_flag() {
        let cli = Cli::parse_from(["npc", "compile", "a.np", "-W"]);
        match cli.command {
            Commands::Compile(args) => assert!(args.werror),
            _ => panic!("expected Compile"),
        }
    }

    #[test]
    fn parses_version() {
        let cli = Cli::parse_from(["npc", "version"]);
        assert!(matches!(cli.command, Commands::Version));
    }
}
