//! Backend emission: IR text, assembly, or a linked native executable.

use std::path::Path;
use std::process::Command;

use inkwell::module::Module;
use inkwell::targets::{CodeModel, FileType, InitializationConfig, RelocMode, Target, TargetMachine, TargetTriple};

use crate::config::EmitType;
use crate::error::{CompileError, Result};

/// Native target triple for this host, overridable via `TARGET`.
fn default_target() -> String {
    std::env::var("TARGET").unwrap_or_else(|_| {
        if cfg!(target_os = "macos") {
            "x86_64-apple-darwin".to_string()
        } else if cfg!(target_os = "windows") {
            "x86_64-pc-windows-msvc".to_string()
        } else {
            "x86_64-unknown-linux-gnu".to_string()
        }
    })
}

fn target_machine(triple: &str) -> Result<TargetMachine> {
    Target::initialize_native(&InitializationConfig::default())
        .map_err(CompileError::TargetUnavailable)?;
    let llvm_triple = TargetTriple::create(triple);
    let target = Target::from_triple(&llvm_triple)
        .map_err(|_| CompileError::TargetUnavailable(triple.to_string()))?;
    target
        .create_target_machine(
            &llvm_triple,
            "generic",
            "",
            inkwell::OptimizationLevel::None,
            RelocMode::Default,
            CodeModel::Default,
        )
        .ok_or_else(|| CompileError::TargetUnavailable(triple.to_string()))
}

/// Emits `module` per `emit`, writing the final artifact to `output`.
pub fn emit(module: &Module, emit: EmitType, output: &Path) -> Result<()> {
    match emit {
        EmitType::Ir => {
            let ir = module.print_to_string().to_string();
            std::fs::write(output, ir).map_err(|e| CompileError::EmitFailed(e.to_string()))
        }
        EmitType::Asm => {
            let machine = target_machine(&default_target())?;
            machine
                .write_to_file(module, FileType::Assembly, output)
                .map_err(|e| CompileError::EmitFailed(e.to_string()))
        }
        EmitType::Executable => emit_executable(module, output),
    }
}

/// `TargetMachine::write_to_file(.., FileType::Object, ..)` into a
/// `tempfile::TempDir`-scoped object, then `clang` links it into `output`.
/// The temp dir is removed on every exit path via drop.
fn emit_executable(module: &Module, output: &Path) -> Result<()> {
    let machine = target_machine(&default_target())?;

    let dir = tempfile::TempDir::new().map_err(|e| CompileError::EmitFailed(e.to_string()))?;
    let object_path = dir.path().join("npc_out.o");
    machine
        .write_to_file(module, FileType::Object, &object_path)
        .map_err(|e| CompileError::EmitFailed(e.to_string()))?;

    let mut output = output.to_path_buf();
    if cfg!(target_os = "windows") && output.extension().is_none() {
        output.set_extension("exe");
    }

    let status = Command::new("clang")
        .arg(&object_path)
        .arg("-o")
        .arg(&output)
        .status()
        .map_err(CompileError::ClangNotFound)?;

    if !status.success() {
        return Err(CompileError::LinkFailed(status.code().unwrap_or(-1)));
    }

    Ok(())
}
