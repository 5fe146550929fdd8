//! AST type refs → LLVM types, concretized onto inkwell.
//!
//! The semantic analyzer's symbol tables are discarded once analysis
//! finishes, so the IR builder re-resolves type refs and struct layouts
//! itself from the already-checked AST. It trusts that checking already
//! happened: an unresolvable type ref here is an internal-compiler-error,
//! not a `Diagnostic`.

use rustc_hash::FxHashMap;

use inkwell::context::Context;
use inkwell::types::{BasicTypeEnum, StructType};
use inkwell::AddressSpace;
use npc_par::{Program, Stmt, StmtKind};
use npc_sem::Type;
use npc_util::Symbol;

/// Maps the closed type system onto concrete LLVM types, and holds the
/// named LLVM struct types built from the program's `StructDef`s.
pub struct TypeMapper<'ctx> {
    context: &'ctx Context,
    structs: FxHashMap<Symbol, StructLayout<'ctx>>,
}

/// A struct's field order and LLVM layout, built once per module so member
/// access can GEP by index.
pub struct StructLayout<'ctx> {
    pub llvm_ty: StructType<'ctx>,
    pub fields: Vec<(Symbol, Type)>,
}

impl<'ctx> TypeMapper<'ctx> {
    pub fn new(context: &'ctx Context) -> Self {
        Self {
            context,
            structs: FxHashMap::default(),
        }
    }

    /// First pass: register every struct name with an opaque LLVM type so
    /// mutually-referencing fields resolve, then fill in field bodies.
    pub fn register_structs(&mut self, program: &Program) {
        let mut defs: Vec<&Stmt> = Vec::new();
        for stmt in program {
            if let StmtKind::StructDef { name, .. } = &stmt.kind {
                let opaque = self.context.opaque_struct_type(name.as_str());
                self.structs.insert(
                    *name,
                    StructLayout {
                        llvm_ty: opaque,
                        fields: Vec::new(),
                    },
                );
                defs.push(stmt);
            }
        }
        for stmt in defs {
            let StmtKind::StructDef { name, fields } = &stmt.kind else {
                unreachable!()
            };
            let resolved: Vec<(Symbol, Type)> = fields
                .iter()
                .map(|f| (f.name, self.resolve_type_ref(f.ty)))
                .collect();
            let field_tys: Vec<BasicTypeEnum> =
                resolved.iter().map(|(_, ty)| self.llvm_type(ty)).collect();
            let layout = self.structs.get_mut(name).expect("struct pre-registered above");
            layout.llvm_ty.set_body(&field_tys, false);
            layout.fields = resolved;
        }
    }

    pub fn struct_layout(&self, name: Symbol) -> &StructLayout<'ctx> {
        self.structs
            .get(&name)
            .unwrap_or_else(|| panic!("internal compiler error: unresolved struct type '{name}'"))
    }

    /// Resolves a type-ref symbol the same way the semantic analyzer does:
    /// a primitive name, else an already-registered struct.
    pub fn resolve_type_ref(&self, name: Symbol) -> Type {
        if let Some(ty) = Type::primitive(name.as_str()) {
            return ty;
        }
        if self.structs.contains_key(&name) {
            return Type::Struct(name);
        }
        panic!("internal compiler error: unresolved type '{name}' reached IR construction");
    }

    /// Maps a resolved `Type` to its LLVM storage type. `Type::Void` has no
    /// `BasicTypeEnum` representation; callers needing a function's return
    /// type check for `Type::Void` separately.
    pub fn llvm_type(&self, ty: &Type) -> BasicTypeEnum<'ctx> {
        match ty {
            Type::I32 | Type::U32 => self.context.i32_type().into(),
            Type::I64 | Type::U64 => self.context.i64_type().into(),
            Type::F32 => self.context.f32_type().into(),
            Type::F64 => self.context.f64_type().into(),
            Type::Bool => self.context.bool_type().into(),
            Type::String | Type::Version => {
                self.context.i8_type().ptr_type(AddressSpace::default()).into()
            }
            Type::Struct(name) => self.struct_layout(*name).llvm_ty.into(),
            Type::Void => panic!("internal compiler error: void has no storage type"),
            Type::Unknown => {
                panic!("internal compiler error: Unknown type reached IR construction")
            }
        }
    }

    pub fn is_signed(ty: &Type) -> bool {
        matches!(ty, Type::I32 | Type::I64)
    }
}
