//! Compiler configuration, built directly from parsed CLI args. There is
//! no on-disk config file: there is no module linking or incremental
//! compilation, leaving nothing else to configure, so this is a plain
//! struct rather than a file-loading layer.

use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitType {
    Ir,
    Asm,
    Executable,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub input_file: PathBuf,
    pub output_file: PathBuf,
    pub emit: EmitType,
    pub verbose: bool,
    pub warnings_as_errors: bool,
}

impl Config {
    pub fn default_output_for(emit: EmitType) -> PathBuf {
        match emit {
            EmitType::Ir | EmitType::Asm => PathBuf::from("a.out"),
            EmitType::Executable if cfg!(target_os = "windows") => PathBuf::from("a.exe"),
            EmitType::Executable => PathBuf::from("a.out"),
        }
    }
}
