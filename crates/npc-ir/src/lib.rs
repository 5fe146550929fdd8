//! npc-ir - lowers a checked AST straight to LLVM IR via inkwell.
//!
//! There is no separate mid-level or low-level IR: what a larger compiler
//! would split into MIR/LIR stages is collapsed into a direct walk of the
//! [`npc_par::Program`] AST, emitting inkwell instructions as it goes.
//! Callers must only invoke [`IrBuilder::build`] on a program that
//! [`npc_sem::SemanticAnalyzer`] already accepted without errors; anything
//! this crate can't resolve is treated as an internal compiler error (a
//! `panic!`), never a `Diagnostic`.

mod function;
mod strings;
#[cfg(test)]
mod tests;
mod types;

use rustc_hash::FxHashMap;

use inkwell::context::Context;
use inkwell::module::{Linkage, Module};
use inkwell::types::BasicMetadataTypeEnum;
use inkwell::values::FunctionValue;
use inkwell::AddressSpace;

use npc_par::{Param, Program, StmtKind};
use npc_sem::Type;
use npc_util::Symbol;

use function::{FunctionLowerer, ModuleCtx};
use strings::StringTable;
pub use types::{StructLayout, TypeMapper};

/// A function's declared signature, cached so call sites don't need to
/// re-resolve param/return types from the AST.
#[derive(Clone)]
pub(crate) struct FunctionInfo<'ctx> {
    value: FunctionValue<'ctx>,
    ret: Type,
}

/// Builds one LLVM [`Module`] per compiled source file — the compiler
/// processes one file per run.
pub struct IrBuilder<'ctx> {
    context: &'ctx Context,
    module: Module<'ctx>,
    types: TypeMapper<'ctx>,
    strings: StringTable<'ctx>,
    functions: FxHashMap<Symbol, FunctionInfo<'ctx>>,
    printf: FunctionValue<'ctx>,
    strlen_fn: FunctionValue<'ctx>,
    malloc_fn: FunctionValue<'ctx>,
    strcpy_fn: FunctionValue<'ctx>,
    strcat_fn: FunctionValue<'ctx>,
    strcmp_fn: FunctionValue<'ctx>,
}

impl<'ctx> IrBuilder<'ctx> {
    pub fn new(context: &'ctx Context, module_name: &str) -> Self {
        let module = context.create_module(module_name);
        let i8_ptr = context.i8_type().ptr_type(AddressSpace::default());
        let i64_type = context.i64_type();
        let i32_type = context.i32_type();

        let printf = module.add_function(
            "printf",
            i32_type.fn_type(&[i8_ptr.into()], true),
            Some(Linkage::External),
        );
        let strlen_fn = module.add_function(
            "strlen",
            i64_type.fn_type(&[i8_ptr.into()], false),
            Some(Linkage::External),
        );
        let malloc_fn = module.add_function(
            "malloc",
            i8_ptr.fn_type(&[i64_type.into()], false),
            Some(Linkage::External),
        );
        let strcpy_fn = module.add_function(
            "strcpy",
            i8_ptr.fn_type(&[i8_ptr.into(), i8_ptr.into()], false),
            Some(Linkage::External),
        );
        let strcat_fn = module.add_function(
            "strcat",
            i8_ptr.fn_type(&[i8_ptr.into(), i8_ptr.into()], false),
            Some(Linkage::External),
        );
        let strcmp_fn = module.add_function(
            "strcmp",
            i32_type.fn_type(&[i8_ptr.into(), i8_ptr.into()], false),
            Some(Linkage::External),
        );

        Self {
            context,
            module,
            types: TypeMapper::new(context),
            strings: StringTable::new(),
            functions: FxHashMap::default(),
            printf,
            strlen_fn,
            malloc_fn,
            strcpy_fn,
            strcat_fn,
            strcmp_fn,
        }
    }

    /// Lowers `program` and returns the finished module, ready for the
    /// driver to hand to a `TargetMachine`.
    pub fn build(mut self, program: &Program) -> Module<'ctx> {
        self.types.register_structs(program);

        for stmt in program {
            if let StmtKind::FnDef { name, params, return_type, .. } = &stmt.kind {
                self.declare_function(*name, params, *return_type);
            }
        }

        for stmt in program {
            if let StmtKind::FnDef { name, params, body, .. } = &stmt.kind {
                let info = self
                    .functions
                    .get(name)
                    .expect("internal compiler error: function not pre-declared")
                    .clone();
                let builder = self.context.create_builder();
                let ctx = ModuleCtx {
                    context: self.context,
                    builder: &builder,
                    types: &self.types,
                    functions: &self.functions,
                    printf: self.printf,
                    strlen_fn: self.strlen_fn,
                    malloc_fn: self.malloc_fn,
                    strcpy_fn: self.strcpy_fn,
                    strcat_fn: self.strcat_fn,
                    strcmp_fn: self.strcmp_fn,
                };
                let mut lowerer = FunctionLowerer::new(ctx, &mut self.strings, info.value, info.ret);
                lowerer.lower_function(params, body);
            }
        }

        self.module
    }

    fn declare_function(&mut self, name: Symbol, params: &[Param], return_type: Option<Symbol>) {
        let param_types: Vec<Type> = params
            .iter()
            .map(|p| self.types.resolve_type_ref(p.ty))
            .collect();
        let ret_ty = return_type
            .map(|t| self.types.resolve_type_ref(t))
            .unwrap_or(Type::Void);

        let llvm_param_types: Vec<BasicMetadataTypeEnum> = param_types
            .iter()
            .map(|ty| self.types.llvm_type(ty).into())
            .collect();
        let fn_type = if ret_ty == Type::Void {
            self.context.void_type().fn_type(&llvm_param_types, false)
        } else {
            self.types.llvm_type(&ret_ty).fn_type(&llvm_param_types, false)
        };

        let function = self.module.add_function(name.as_str(), fn_type, None);
        self.functions.insert(name, FunctionInfo { value: function, ret: ret_ty });
    }
}
