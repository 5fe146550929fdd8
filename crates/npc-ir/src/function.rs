//! Per-function lowering: locals, statements, and expressions.
//!
//! Locals are stack slots (`alloca` + load/store), not SSA registers
//! directly — applied uniformly to every `let` and parameter, which keeps
//! shadowing and reassignment trivial to model as ordinary stores. `scopes`
//! is a stack of name→(pointer, type) maps, one per lexical scope; entering
//! `If.then`, `While.body`, etc. pushes a scope, which is popped on exit.

use rustc_hash::FxHashMap;

use inkwell::builder::Builder;
use inkwell::context::Context;
use inkwell::values::{BasicValue, BasicValueEnum, FunctionValue, PointerValue};
use inkwell::{FloatPredicate, IntPredicate};

use npc_par::{BinOp, Block, Expr, ExprKind, Literal, Param, Stmt, StmtKind, UnOp};
use npc_sem::Type;
use npc_util::Symbol;

use crate::strings::StringTable;
use crate::types::TypeMapper;
use crate::FunctionInfo;

/// The module-wide pieces every function lowering needs read access to:
/// the LLVM context, the IR builder cursor, resolved types, sibling
/// function signatures, and the handful of libc externs this crate
/// declares once per module: `printf`, plus the libc string primitives
/// backing `String + String` concatenation and comparison.
pub(crate) struct ModuleCtx<'a, 'ctx> {
    pub context: &'ctx Context,
    pub builder: &'a Builder<'ctx>,
    pub types: &'a TypeMapper<'ctx>,
    pub functions: &'a FxHashMap<Symbol, FunctionInfo<'ctx>>,
    pub printf: FunctionValue<'ctx>,
    pub strlen_fn: FunctionValue<'ctx>,
    pub malloc_fn: FunctionValue<'ctx>,
    pub strcpy_fn: FunctionValue<'ctx>,
    pub strcat_fn: FunctionValue<'ctx>,
    pub strcmp_fn: FunctionValue<'ctx>,
}

pub(crate) struct FunctionLowerer<'a, 'ctx> {
    ctx: ModuleCtx<'a, 'ctx>,
    strings: &'a mut StringTable<'ctx>,
    function: FunctionValue<'ctx>,
    return_type: Type,
    scopes: Vec<FxHashMap<Symbol, (PointerValue<'ctx>, Type)>>,
}

impl<'a, 'ctx> FunctionLowerer<'a, 'ctx> {
    pub(crate) fn new(
        ctx: ModuleCtx<'a, 'ctx>,
        strings: &'a mut StringTable<'ctx>,
        function: FunctionValue<'ctx>,
        return_type: Type,
    ) -> Self {
        Self {
            ctx,
            strings,
            function,
            return_type,
            scopes: Vec::new(),
        }
    }

    /// Lowers a whole function body into `self.function`'s entry block:
    /// the declared signature, a single entry block, and a walk of the
    /// body.
    pub(crate) fn lower_function(&mut self, params: &[Param], body: &Block) {
        let entry = self.ctx.context.append_basic_block(self.function, "entry");
        self.ctx.builder.position_at_end(entry);
        self.scopes.push(FxHashMap::default());

        for (index, param) in params.iter().enumerate() {
            let ty = self.ctx.types.resolve_type_ref(param.ty);
            let llvm_ty = self.ctx.types.llvm_type(&ty);
            let alloca = self
                .ctx
                .builder
                .build_alloca(llvm_ty, param.name.as_str())
                .expect("internal compiler error: failed to allocate parameter slot");
            let arg_value = self
                .function
                .get_nth_param(index as u32)
                .expect("internal compiler error: parameter count mismatch");
            self.ctx
                .builder
                .build_store(alloca, arg_value)
                .expect("internal compiler error: failed to store parameter");
            self.bind(param.name, alloca, ty);
        }

        self.lower_stmts(&body.statements);
        self.terminate_if_missing();
        self.scopes.pop();
    }

    /// Appends `return 0` / `return void` if the current block fell off
    /// the end of the function without a terminator.
    fn terminate_if_missing(&mut self) {
        let block = self
            .ctx
            .builder
            .get_insert_block()
            .expect("internal compiler error: builder has no current block");
        if block.get_terminator().is_some() {
            return;
        }
        if self.return_type == Type::Void {
            self.ctx.builder.build_return(None)
        } else {
            let zero = self.zero_value(&self.return_type);
            self.ctx.builder.build_return(Some(&zero))
        }
        .expect("internal compiler error: failed to append implicit return");
    }

    fn zero_value(&self, ty: &Type) -> BasicValueEnum<'ctx> {
        match ty {
            Type::I32 | Type::U32 => self.ctx.context.i32_type().const_int(0, false).into(),
            Type::I64 | Type::U64 => self.ctx.context.i64_type().const_int(0, false).into(),
            Type::F32 => self.ctx.context.f32_type().const_float(0.0).into(),
            Type::F64 => self.ctx.context.f64_type().const_float(0.0).into(),
            Type::Bool => self.ctx.context.bool_type().const_int(0, false).into(),
            Type::String | Type::Version => self
                .ctx
                .types
                .llvm_type(ty)
                .into_pointer_type()
                .const_null()
                .into(),
            Type::Struct(name) => self.ctx.types.struct_layout(*name).llvm_ty.const_zero().into(),
            Type::Void | Type::Unknown => {
                panic!("internal compiler error: no zero value for {ty}")
            }
        }
    }

    // -- scopes ---------------------------------------------------------

    fn push_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    fn bind(&mut self, name: Symbol, ptr: PointerValue<'ctx>, ty: Type) {
        self.scopes
            .last_mut()
            .expect("internal compiler error: no active scope")
            .insert(name, (ptr, ty));
    }

    fn lookup(&self, name: Symbol) -> Option<(PointerValue<'ctx>, Type)> {
        self.scopes.iter().rev().find_map(|scope| scope.get(&name).cloned())
    }

    // -- statements -------------------------------------------------------

    fn lower_stmts(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.lower_stmt(stmt);
        }
    }

    /// Lowers one block in a fresh child scope.
    fn lower_block_scoped(&mut self, block: &Block) {
        self.push_scope();
        self.lower_stmts(&block.statements);
        self.pop_scope();
    }

    fn lower_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Let { name, ty, value } => self.lower_let(*name, *ty, value.as_ref()),
            StmtKind::FnDef { .. } => {
                // Top-level only by invariant (a); nested definitions never
                // reach IR construction from a semantically valid program.
                panic!("internal compiler error: nested function definition reached IR construction")
            }
            StmtKind::Return(value) => self.lower_return(value.as_ref()),
            StmtKind::If { cond, then_branch, else_branch } => {
                self.lower_if(cond, then_branch, else_branch.as_ref())
            }
            StmtKind::While { cond, body } => self.lower_while(cond, body),
            StmtKind::For { var, iterable, body } => self.lower_for(*var, iterable, body),
            StmtKind::Block(block) => self.lower_block_scoped(block),
            StmtKind::StructDef { .. } => {
                // Field layout was already built by `TypeMapper::register_structs`.
            }
            StmtKind::Import { .. } | StmtKind::PackageDecl { .. } => {
                // Module metadata only; no runtime representation.
            }
            StmtKind::ExprStmt(expr) => {
                self.lower_expr(expr);
            }
            StmtKind::Assign { name, value } => self.lower_assign(*name, value),
            StmtKind::Print(text) => self.lower_print(text),
        }
    }

    fn lower_let(&mut self, name: Symbol, ty: Option<Symbol>, value: Option<&Expr>) {
        let declared_ty = ty.map(|t| self.ctx.types.resolve_type_ref(t));
        let value_pair = value.map(|v| self.lower_expr(v));
        let final_ty = declared_ty
            .or_else(|| value_pair.as_ref().map(|(_, t)| t.clone()))
            .expect("internal compiler error: let with neither type nor initializer reached IR");

        let llvm_ty = self.ctx.types.llvm_type(&final_ty);
        let alloca = self
            .ctx
            .builder
            .build_alloca(llvm_ty, name.as_str())
            .expect("internal compiler error: failed to allocate local");
        if let Some((value, _)) = value_pair {
            self.ctx
                .builder
                .build_store(alloca, value)
                .expect("internal compiler error: failed to store let initializer");
        }
        self.bind(name, alloca, final_ty);
    }

    fn lower_return(&mut self, value: Option<&Expr>) {
        match value {
            Some(expr) => {
                let (value, _) = self.lower_expr(expr);
                self.ctx.builder.build_return(Some(&value))
            }
            None => self.ctx.builder.build_return(None),
        }
        .expect("internal compiler error: failed to build return");
    }

    /// `Assign(name, literal)` binds the base-12 "dodecagram" reading of
    /// a legacy-dialect integer literal; any other right-hand side lowers
    /// through the ordinary (base-10) expression path with a store.
    fn lower_assign(&mut self, name: Symbol, value: &Expr) {
        let (ptr, declared_ty) = self
            .lookup(name)
            .unwrap_or_else(|| panic!("internal compiler error: unresolved variable '{name}' in IR"));

        let value = if let ExprKind::Literal(Literal::Int(lexeme)) = &value.kind {
            let parsed = i64::from_str_radix(lexeme, 12).unwrap_or_else(|_| {
                panic!("internal compiler error: invalid base-12 literal '{lexeme}'")
            });
            self.int_constant(&declared_ty, parsed)
        } else {
            self.lower_expr(value).0
        };

        self.ctx
            .builder
            .build_store(ptr, value)
            .expect("internal compiler error: failed to store assignment");
    }

    fn int_constant(&self, ty: &Type, value: i64) -> BasicValueEnum<'ctx> {
        match ty {
            Type::I64 | Type::U64 => self.ctx.context.i64_type().const_int(value as u64, true).into(),
            _ => self.ctx.context.i32_type().const_int(value as u64, true).into(),
        }
    }

    fn lower_print(&mut self, text: &str) {
        let ptr = self.strings.intern(self.ctx.builder, text);
        self.ctx
            .builder
            .build_call(self.ctx.printf, &[ptr.into()], "print_call")
            .expect("internal compiler error: failed to build printf call");
    }

    /// `If`/`While`: standard condition/then/else/merge basic-block
    /// plumbing.
    fn lower_if(&mut self, cond: &Expr, then_branch: &Block, else_branch: Option<&Block>) {
        let (cond_value, _) = self.lower_expr(cond);
        let cond_value = cond_value.into_int_value();

        let then_block = self.ctx.context.append_basic_block(self.function, "if.then");
        let else_block = self.ctx.context.append_basic_block(self.function, "if.else");
        let merge_block = self.ctx.context.append_basic_block(self.function, "if.merge");

        self.ctx
            .builder
            .build_conditional_branch(cond_value, then_block, else_block)
            .expect("internal compiler error: failed to build conditional branch");

        self.ctx.builder.position_at_end(then_block);
        self.lower_block_scoped(then_branch);
        self.branch_to_if_missing(merge_block);

        self.ctx.builder.position_at_end(else_block);
        if let Some(else_branch) = else_branch {
            self.lower_block_scoped(else_branch);
        }
        self.branch_to_if_missing(merge_block);

        self.ctx.builder.position_at_end(merge_block);
    }

    fn lower_while(&mut self, cond: &Expr, body: &Block) {
        let header = self.ctx.context.append_basic_block(self.function, "while.header");
        let body_block = self.ctx.context.append_basic_block(self.function, "while.body");
        let exit_block = self.ctx.context.append_basic_block(self.function, "while.exit");

        self.branch_to_if_missing(header);

        self.ctx.builder.position_at_end(header);
        let (cond_value, _) = self.lower_expr(cond);
        self.ctx
            .builder
            .build_conditional_branch(cond_value.into_int_value(), body_block, exit_block)
            .expect("internal compiler error: failed to build loop condition branch");

        self.ctx.builder.position_at_end(body_block);
        self.lower_block_scoped(body);
        self.branch_to_if_missing(header);

        self.ctx.builder.position_at_end(exit_block);
    }

    /// `For var iterable body`: the grammar has no iteration protocol, so
    /// this lowers as a single pass over `body` with `var` bound as `i32`
    /// — `iterable` is still evaluated once, for its side effects,
    /// matching the semantic analyzer's own treatment.
    fn lower_for(&mut self, var: Symbol, iterable: &Expr, body: &Block) {
        self.lower_expr(iterable);
        self.push_scope();
        let i32_ty = self.ctx.context.i32_type();
        let alloca = self
            .ctx
            .builder
            .build_alloca(i32_ty, var.as_str())
            .expect("internal compiler error: failed to allocate loop variable");
        self.ctx
            .builder
            .build_store(alloca, i32_ty.const_int(0, false))
            .expect("internal compiler error: failed to initialize loop variable");
        self.bind(var, alloca, Type::I32);
        self.lower_stmts(&body.statements);
        self.pop_scope();
    }

    /// Branches the current block to `target` unless it already ended in
    /// a terminator (e.g. an inner `return`).
    fn branch_to_if_missing(&mut self, target: inkwell::basic_block::BasicBlock<'ctx>) {
        let block = self
            .ctx
            .builder
            .get_insert_block()
            .expect("internal compiler error: builder has no current block");
        if block.get_terminator().is_none() {
            self.ctx
                .builder
                .build_unconditional_branch(target)
                .expect("internal compiler error: failed to build branch");
        }
    }

    // -- expressions ------------------------------------------------------

    fn lower_expr(&mut self, expr: &Expr) -> (BasicValueEnum<'ctx>, Type) {
        match &expr.kind {
            ExprKind::Literal(Literal::Int(lexeme)) => {
                // The lexer accepts `a`/`b` as extra digits for the legacy
                // dialect's base-12 literals wherever an integer literal can
                // appear, not just on an assignment's right-hand side, so a
                // lexeme reaching this general expression path may still use
                // them; fall back to base 12 when base 10 doesn't parse.
                let value: i64 = lexeme.parse().or_else(|_| i64::from_str_radix(lexeme, 12))
                    .unwrap_or_else(|_| panic!("internal compiler error: invalid integer literal '{lexeme}'"));
                (
                    self.ctx.context.i32_type().const_int(value as u64, true).into(),
                    Type::I32,
                )
            }
            ExprKind::Literal(Literal::Float(value)) => {
                (self.ctx.context.f64_type().const_float(*value).into(), Type::F64)
            }
            ExprKind::Literal(Literal::Str(text)) => {
                let ptr = self.strings.intern(self.ctx.builder, text);
                (ptr.into(), Type::String)
            }
            ExprKind::Literal(Literal::Bool(value)) => (
                self.ctx.context.bool_type().const_int(*value as u64, false).into(),
                Type::Bool,
            ),
            ExprKind::Ident(name) => self.lower_ident(*name),
            ExprKind::Binary { op, left, right } => self.lower_binary(*op, left, right),
            ExprKind::Unary { op, operand } => self.lower_unary(*op, operand),
            ExprKind::Call { callee, args } => self.lower_call(callee, args),
            ExprKind::Member { .. } => {
                let (ptr, ty) = self.lower_place(expr);
                let llvm_ty = self.ctx.types.llvm_type(&ty);
                let value = self
                    .ctx
                    .builder
                    .build_load(llvm_ty, ptr, "field_load")
                    .expect("internal compiler error: failed to load field");
                (value, ty)
            }
        }
    }

    fn lower_ident(&mut self, name: Symbol) -> (BasicValueEnum<'ctx>, Type) {
        let (ptr, ty) = self
            .lookup(name)
            .unwrap_or_else(|| panic!("internal compiler error: unresolved variable '{name}' in IR"));
        let llvm_ty = self.ctx.types.llvm_type(&ty);
        let value = self
            .ctx
            .builder
            .build_load(llvm_ty, ptr, name.as_str())
            .expect("internal compiler error: failed to load variable");
        (value, ty)
    }

    /// Resolves an lvalue expression (`Ident` or a chain of `Member`s) to
    /// its storage pointer, mirroring the `Place`/`Projection` split a
    /// fuller mid-level IR would use for field access.
    fn lower_place(&mut self, expr: &Expr) -> (PointerValue<'ctx>, Type) {
        match &expr.kind {
            ExprKind::Ident(name) => self
                .lookup(*name)
                .unwrap_or_else(|| panic!("internal compiler error: unresolved variable '{name}' in IR")),
            ExprKind::Member { object, field } => {
                let (obj_ptr, obj_ty) = self.lower_place(object);
                let Type::Struct(struct_name) = obj_ty else {
                    panic!("internal compiler error: member access on a non-struct type reached IR")
                };
                let layout = self.ctx.types.struct_layout(struct_name);
                let index = layout
                    .fields
                    .iter()
                    .position(|(name, _)| *name == *field)
                    .unwrap_or_else(|| panic!("internal compiler error: unresolved field '{field}'"));
                let field_ty = layout.fields[index].1.clone();
                let field_ptr = self
                    .ctx
                    .builder
                    .build_struct_gep(layout.llvm_ty, obj_ptr, index as u32, field.as_str())
                    .expect("internal compiler error: failed to build field GEP");
                (field_ptr, field_ty)
            }
            _ => panic!("internal compiler error: expression is not an lvalue"),
        }
    }

    fn lower_unary(&mut self, op: UnOp, operand: &Expr) -> (BasicValueEnum<'ctx>, Type) {
        let (value, ty) = self.lower_expr(operand);
        match op {
            UnOp::Not => {
                let negated = self
                    .ctx
                    .builder
                    .build_not(value.into_int_value(), "nottmp")
                    .expect("internal compiler error: failed to build logical not");
                (negated.into(), Type::Bool)
            }
            UnOp::Neg if ty == Type::F32 || ty == Type::F64 => {
                let negated = self
                    .ctx
                    .builder
                    .build_float_neg(value.into_float_value(), "negtmp")
                    .expect("internal compiler error: failed to build float negation");
                (negated.into(), ty)
            }
            UnOp::Neg => {
                let negated = self
                    .ctx
                    .builder
                    .build_int_neg(value.into_int_value(), "negtmp")
                    .expect("internal compiler error: failed to build integer negation");
                (negated.into(), ty)
            }
        }
    }

    fn lower_binary(&mut self, op: BinOp, left: &Expr, right: &Expr) -> (BasicValueEnum<'ctx>, Type) {
        let (lval, lty) = self.lower_expr(left);
        let (rval, _) = self.lower_expr(right);

        match op {
            BinOp::Add if lty == Type::String => {
                (self.build_string_concat(lval.into_pointer_value(), rval.into_pointer_value()), Type::String)
            }
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Rem => {
                self.lower_arithmetic(op, lval, rval, lty)
            }
            BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => {
                self.lower_comparison(op, lval, rval, lty)
            }
            BinOp::And => {
                let result = self
                    .ctx
                    .builder
                    .build_and(lval.into_int_value(), rval.into_int_value(), "andtmp")
                    .expect("internal compiler error: failed to build logical and");
                (result.into(), Type::Bool)
            }
            BinOp::Or => {
                let result = self
                    .ctx
                    .builder
                    .build_or(lval.into_int_value(), rval.into_int_value(), "ortmp")
                    .expect("internal compiler error: failed to build logical or");
                (result.into(), Type::Bool)
            }
        }
    }

    fn lower_arithmetic(
        &mut self,
        op: BinOp,
        lval: BasicValueEnum<'ctx>,
        rval: BasicValueEnum<'ctx>,
        ty: Type,
    ) -> (BasicValueEnum<'ctx>, Type) {
        let builder = self.ctx.builder;
        if ty == Type::F32 || ty == Type::F64 {
            let (l, r) = (lval.into_float_value(), rval.into_float_value());
            let result = match op {
                BinOp::Add => builder.build_float_add(l, r, "addtmp"),
                BinOp::Sub => builder.build_float_sub(l, r, "subtmp"),
                BinOp::Mul => builder.build_float_mul(l, r, "multmp"),
                BinOp::Div => builder.build_float_div(l, r, "divtmp"),
                BinOp::Rem => builder.build_float_rem(l, r, "remtmp"),
                _ => unreachable!(),
            };
            (
                result.expect("internal compiler error: failed to build float arithmetic").into(),
                ty,
            )
        } else {
            let (l, r) = (lval.into_int_value(), rval.into_int_value());
            let signed = TypeMapper::is_signed(&ty);
            let result = match op {
                BinOp::Add => builder.build_int_add(l, r, "addtmp"),
                BinOp::Sub => builder.build_int_sub(l, r, "subtmp"),
                BinOp::Mul => builder.build_int_mul(l, r, "multmp"),
                BinOp::Div if signed => builder.build_int_signed_div(l, r, "divtmp"),
                BinOp::Div => builder.build_int_unsigned_div(l, r, "divtmp"),
                BinOp::Rem if signed => builder.build_int_signed_rem(l, r, "remtmp"),
                BinOp::Rem => builder.build_int_unsigned_rem(l, r, "remtmp"),
                _ => unreachable!(),
            };
            (
                result.expect("internal compiler error: failed to build integer arithmetic").into(),
                ty,
            )
        }
    }

    fn lower_comparison(
        &mut self,
        op: BinOp,
        lval: BasicValueEnum<'ctx>,
        rval: BasicValueEnum<'ctx>,
        ty: Type,
    ) -> (BasicValueEnum<'ctx>, Type) {
        let builder = self.ctx.builder;
        let result = if ty == Type::String {
            let cmp = builder
                .build_call(self.ctx.strcmp_fn, &[lval.into(), rval.into()], "strcmp_call")
                .expect("internal compiler error: failed to build strcmp call")
                .try_as_basic_value()
                .left()
                .expect("internal compiler error: strcmp returned no value")
                .into_int_value();
            let zero = self.ctx.context.i32_type().const_int(0, false);
            let predicate = match op {
                BinOp::Eq => IntPredicate::EQ,
                BinOp::Ne => IntPredicate::NE,
                BinOp::Lt => IntPredicate::SLT,
                BinOp::Le => IntPredicate::SLE,
                BinOp::Gt => IntPredicate::SGT,
                BinOp::Ge => IntPredicate::SGE,
                _ => unreachable!(),
            };
            builder.build_int_compare(predicate, cmp, zero, "strcmptmp")
        } else if ty == Type::F32 || ty == Type::F64 {
            let predicate = match op {
                BinOp::Eq => FloatPredicate::OEQ,
                BinOp::Ne => FloatPredicate::ONE,
                BinOp::Lt => FloatPredicate::OLT,
                BinOp::Le => FloatPredicate::OLE,
                BinOp::Gt => FloatPredicate::OGT,
                BinOp::Ge => FloatPredicate::OGE,
                _ => unreachable!(),
            };
            builder.build_float_compare(predicate, lval.into_float_value(), rval.into_float_value(), "cmptmp")
        } else {
            let signed = TypeMapper::is_signed(&ty) || ty == Type::Bool;
            let predicate = match (op, signed) {
                (BinOp::Eq, _) => IntPredicate::EQ,
                (BinOp::Ne, _) => IntPredicate::NE,
                (BinOp::Lt, true) => IntPredicate::SLT,
                (BinOp::Lt, false) => IntPredicate::ULT,
                (BinOp::Le, true) => IntPredicate::SLE,
                (BinOp::Le, false) => IntPredicate::ULE,
                (BinOp::Gt, true) => IntPredicate::SGT,
                (BinOp::Gt, false) => IntPredicate::UGT,
                (BinOp::Ge, true) => IntPredicate::SGE,
                (BinOp::Ge, false) => IntPredicate::UGE,
                _ => unreachable!(),
            };
            builder.build_int_compare(predicate, lval.into_int_value(), rval.into_int_value(), "cmptmp")
        };
        (result.expect("internal compiler error: failed to build comparison").into(), Type::Bool)
    }

    /// Concatenates two strings with the libc primitives already linked
    /// in for `printf`: `malloc(strlen(l)+strlen(r)+1)` then
    /// `strcpy`/`strcat`.
    fn build_string_concat(&mut self, left: PointerValue<'ctx>, right: PointerValue<'ctx>) -> BasicValueEnum<'ctx> {
        let builder = self.ctx.builder;
        let i64_type = self.ctx.context.i64_type();

        let len_l = builder
            .build_call(self.ctx.strlen_fn, &[left.into()], "strlen_l")
            .expect("internal compiler error: failed to call strlen")
            .try_as_basic_value()
            .left()
            .unwrap()
            .into_int_value();
        let len_r = builder
            .build_call(self.ctx.strlen_fn, &[right.into()], "strlen_r")
            .expect("internal compiler error: failed to call strlen")
            .try_as_basic_value()
            .left()
            .unwrap()
            .into_int_value();
        let total_len = builder
            .build_int_add(len_l, len_r, "concat_len")
            .expect("internal compiler error: failed to add lengths");
        let total_len = builder
            .build_int_add(total_len, i64_type.const_int(1, false), "concat_len_nul")
            .expect("internal compiler error: failed to add nul terminator length");

        let buffer = builder
            .build_call(self.ctx.malloc_fn, &[total_len.into()], "concat_buf")
            .expect("internal compiler error: failed to call malloc")
            .try_as_basic_value()
            .left()
            .unwrap()
            .into_pointer_value();

        builder
            .build_call(self.ctx.strcpy_fn, &[buffer.into(), left.into()], "concat_cpy")
            .expect("internal compiler error: failed to call strcpy");
        builder
            .build_call(self.ctx.strcat_fn, &[buffer.into(), right.into()], "concat_cat")
            .expect("internal compiler error: failed to call strcat");

        buffer.as_basic_value_enum()
    }

    fn lower_call(&mut self, callee: &Expr, args: &[Expr]) -> (BasicValueEnum<'ctx>, Type) {
        let ExprKind::Ident(name) = &callee.kind else {
            panic!("internal compiler error: call target is not a function name")
        };

        match name.as_str() {
            "print" => self.lower_print_call(args),
            "len" => self.lower_len_call(args),
            _ => self.lower_user_call(*name, args),
        }
    }

    fn lower_print_call(&mut self, args: &[Expr]) -> (BasicValueEnum<'ctx>, Type) {
        let (value, _) = self.lower_expr(&args[0]);
        let format = self.strings.intern(self.ctx.builder, "%s");
        self.ctx
            .builder
            .build_call(self.ctx.printf, &[format.into(), value.into()], "print_call")
            .expect("internal compiler error: failed to build printf call");
        (self.ctx.context.i32_type().const_int(0, false).into(), Type::Void)
    }

    fn lower_len_call(&mut self, args: &[Expr]) -> (BasicValueEnum<'ctx>, Type) {
        let (value, _) = self.lower_expr(&args[0]);
        let call = self
            .ctx
            .builder
            .build_call(self.ctx.strlen_fn, &[value.into()], "len_call")
            .expect("internal compiler error: failed to build strlen call")
            .try_as_basic_value()
            .left()
            .unwrap()
            .into_int_value();
        let truncated = self
            .ctx
            .builder
            .build_int_truncate(call, self.ctx.context.i32_type(), "len_u32")
            .expect("internal compiler error: failed to truncate strlen result");
        (truncated.into(), Type::U32)
    }

    fn lower_user_call(&mut self, name: Symbol, args: &[Expr]) -> (BasicValueEnum<'ctx>, Type) {
        let info = self
            .ctx
            .functions
            .get(&name)
            .unwrap_or_else(|| panic!("internal compiler error: unresolved function '{name}'"))
            .clone();
        let arg_values: Vec<_> = args
            .iter()
            .map(|arg| self.lower_expr(arg).0.into())
            .collect();
        let call = self
            .ctx
            .builder
            .build_call(info.value, &arg_values, "call_tmp")
            .expect("internal compiler error: failed to build function call");
        match call.try_as_basic_value().left() {
            Some(value) => (value, info.ret),
            None => (self.ctx.context.i32_type().const_int(0, false).into(), Type::Void),
        }
    }
}
