//! Pipeline orchestration: lex, parse, check, and (for `compile`) build IR
//! and emit. Each run compiles exactly one source file; there is no
//! incremental cache or source map across files.

use inkwell::context::Context;

use npc_ir::IrBuilder;
use npc_lex::{Lexer, Token, TokenKind};
use npc_par::{Parser, Program};
use npc_sem::SemanticAnalyzer;
use npc_util::{Handler, Level};

use crate::backend;
use crate::config::Config;
use crate::error::{CompileError, Result};

pub struct Session {
    pub config: Config,
    handler: Handler,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            handler: Handler::new(),
        }
    }

    /// Runs phases 1-4 and returns the number of blocking diagnostics
    /// found. Zero means clean.
    pub fn check(&mut self) -> Result<usize> {
        let source = self.read_source()?;
        let program = self.analyze(&source)?;
        self.print_diagnostics();
        if program.is_none() || self.has_blocking_errors() {
            Ok(self.error_count().max(1))
        } else {
            Ok(0)
        }
    }

    /// Runs the full pipeline: lex, parse, check, build IR, emit.
    pub fn compile(&mut self) -> Result<()> {
        let source = self.read_source()?;
        let program = self.analyze(&source)?;
        self.print_diagnostics();

        let Some(program) = program else {
            return Err(CompileError::DiagnosticsReported(self.error_count()));
        };
        if self.has_blocking_errors() {
            return Err(CompileError::DiagnosticsReported(self.error_count()));
        }

        tracing::debug!("building IR");
        let context = Context::create();
        let module_name = module_name(&self.config.input_file);
        let module = IrBuilder::new(&context, &module_name).build(&program);

        tracing::info!(output = %self.config.output_file.display(), emit = ?self.config.emit, "emitting");
        backend::emit(&module, self.config.emit, &self.config.output_file)?;
        println!("{}", self.config.output_file.display());
        Ok(())
    }

    fn read_source(&self) -> Result<String> {
        tracing::debug!(file = %self.config.input_file.display(), "reading source");
        std::fs::read_to_string(&self.config.input_file)
            .map_err(|e| CompileError::Io(self.config.input_file.clone(), e))
    }

    /// Runs lexing, parsing, and semantic analysis, merging every phase's
    /// diagnostics into `self.handler` in source order. Returns `None`
    /// only when the parser aborted before producing a `Program` — there
    /// is no error recovery, so phase 4 never runs on a partial tree.
    fn analyze(&mut self, source: &str) -> Result<Option<Program>> {
        tracing::debug!("lexing");
        let mut lex_handler = Handler::new();
        let tokens = lex_all(source, &mut lex_handler);
        self.handler.merge(lex_handler);

        tracing::debug!("parsing");
        let mut par_handler = Handler::new();
        let mut parser = Parser::new(tokens, &mut par_handler);
        let program = parser.parse();
        let parsed_cleanly = !par_handler.has_errors();
        self.handler.merge(par_handler);

        if !parsed_cleanly {
            return Ok(None);
        }

        tracing::debug!("semantic analysis");
        let mut sem_handler = Handler::new();
        SemanticAnalyzer::analyze(&program, &mut sem_handler);
        self.handler.merge(sem_handler);

        Ok(Some(program))
    }

    fn has_blocking_errors(&self) -> bool {
        self.handler.has_errors()
            || (self.config.warnings_as_errors
                && self.handler.diagnostics().iter().any(|d| d.level == Level::Warning))
    }

    fn error_count(&self) -> usize {
        self.handler.diagnostics().iter().filter(|d| d.level == Level::Error).count()
    }

    /// Diagnostics go to stderr; artifact paths and progress go to stdout.
    fn print_diagnostics(&self) {
        for diagnostic in self.handler.diagnostics() {
            eprintln!("{diagnostic}");
        }
    }
}

fn lex_all(source: &str, handler: &mut Handler) -> Vec<Token> {
    let mut lexer = Lexer::new(source, handler);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let is_eof = matches!(token.kind, TokenKind::Eof);
        tokens.push(token);
        if is_eof {
            break;
        }
    }
    tokens
}

fn module_name(path: &std::path::Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("module")
        .to_string()
}
