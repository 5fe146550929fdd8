//! npc-sem - semantic analyzer.
//!
//! Walks a `Program` once, resolving names against an arena of scopes and
//! checking the closed type system. Diagnostics are accumulated into the
//! caller's `Handler`; the AST itself is never mutated, and the symbol
//! tables built while walking are discarded once analysis finishes.

pub mod scope;
pub mod types;
#[cfg(test)]
mod tests;

use std::collections::HashMap;

use npc_par::{BinOp, Block, Expr, ExprKind, Literal, Program, Stmt, StmtKind, UnOp};
use npc_util::{DiagnosticBuilder, DiagnosticKind, Handler, Span, Symbol};

use scope::{BindingKind, ScopeTree};
pub use types::Type;

struct StructInfo {
    fields: Vec<(Symbol, Type)>,
}

pub struct SemanticAnalyzer<'a> {
    scopes: ScopeTree,
    structs: HashMap<Symbol, StructInfo>,
    /// The enclosing function's declared return type, `None` at top level.
    current_return_type: Option<Type>,
    handler: &'a mut Handler,
}

impl<'a> SemanticAnalyzer<'a> {
    pub fn new(handler: &'a mut Handler) -> Self {
        let mut scopes = ScopeTree::new();
        scopes.bind(
            Symbol::intern("print"),
            BindingKind::Function {
                params: vec![Type::String],
                ret: Type::Void,
            },
        );
        scopes.bind(
            Symbol::intern("len"),
            BindingKind::Function {
                params: vec![Type::String],
                ret: Type::U32,
            },
        );

        Self {
            scopes,
            structs: HashMap::new(),
            current_return_type: None,
            handler,
        }
    }

    /// Runs a full analysis pass over `program`, reporting into the
    /// analyzer's handler. Mirrors the free-function entry points the
    /// other phases expose.
    pub fn analyze(program: &Program, handler: &'a mut Handler) {
        let mut analyzer = Self::new(handler);
        analyzer.run(program);
    }

    fn run(&mut self, program: &Program) {
        self.collect_top_level(program);
        for stmt in program {
            self.check_stmt(stmt);
        }
        let unused = self.scopes.unused_in(self.scopes.current);
        self.report_unused(&unused);
    }

    /// First pass: register every `FnDef`/`StructDef` name in the global
    /// scope before any body is walked, so forward and mutual references
    /// between top-level declarations resolve.
    fn collect_top_level(&mut self, program: &Program) {
        for stmt in program {
            match &stmt.kind {
                StmtKind::FnDef { name, params, return_type, .. } => {
                    if self.scopes.is_bound_locally(*name) {
                        self.redefinition(*name, stmt.span);
                        continue;
                    }
                    let param_types = params
                        .iter()
                        .map(|p| self.resolve_type_ref(p.ty, stmt.span))
                        .collect();
                    let ret = return_type
                        .map(|t| self.resolve_type_ref(t, stmt.span))
                        .unwrap_or(Type::Void);
                    self.scopes.bind(*name, BindingKind::Function { params: param_types, ret });
                }
                StmtKind::StructDef { name, fields } => {
                    if self.scopes.is_bound_locally(*name) {
                        self.redefinition(*name, stmt.span);
                        continue;
                    }
                    let mut seen = HashMap::new();
                    let mut resolved_fields = Vec::new();
                    for field in fields {
                        if seen.insert(field.name, ()).is_some() {
                            self.redefinition(field.name, stmt.span);
                            continue;
                        }
                        let ty = self.resolve_type_ref(field.ty, stmt.span);
                        resolved_fields.push((field.name, ty));
                    }
                    self.structs.insert(*name, StructInfo { fields: resolved_fields });
                    self.scopes.bind(*name, BindingKind::Struct);
                }
                _ => {}
            }
        }
    }

    fn resolve_type_ref(&mut self, name: Symbol, span: Span) -> Type {
        if let Some(ty) = Type::primitive(name.as_str()) {
            return ty;
        }
        if self.structs.contains_key(&name) || matches!(self.scopes.resolve(name), Some(BindingKind::Struct)) {
            return Type::Struct(name);
        }
        DiagnosticBuilder::new(DiagnosticKind::UndefinedType, format!("undefined type '{}'", name.as_str()))
            .span(span)
            .emit(self.handler);
        Type::Unknown
    }

    fn check_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Let { name, ty, value } => {
                let value_ty = value.as_ref().map(|v| self.check_expr(v));
                let declared_ty = ty.map(|t| self.resolve_type_ref(t, stmt.span));

                let final_ty = match (&declared_ty, &value_ty) {
                    (Some(declared), Some(found)) => {
                        if !declared.compatible(found) {
                            self.type_error(
                                format!("cannot assign {found} to variable of type {declared}"),
                                stmt.span,
                            );
                        }
                        declared.clone()
                    }
                    (Some(declared), None) => declared.clone(),
                    (None, Some(found)) => found.clone(),
                    (None, None) => {
                        self.type_error("cannot determine type", stmt.span);
                        Type::Unknown
                    }
                };

                if self.scopes.is_bound_locally(*name) {
                    self.redefinition(*name, stmt.span);
                }
                self.scopes.bind(*name, BindingKind::Variable(final_ty));
            }
            StmtKind::FnDef { params, return_type, body, .. } => {
                self.scopes.enter_scope();
                let ret_ty = return_type
                    .map(|t| self.resolve_type_ref(t, stmt.span))
                    .unwrap_or(Type::Void);
                for param in params {
                    let ty = self.resolve_type_ref(param.ty, stmt.span);
                    self.scopes.bind(param.name, BindingKind::Variable(ty));
                }
                let previous_return = self.current_return_type.replace(ret_ty);
                self.check_block_in_current_scope(body);
                self.current_return_type = previous_return;
                let rib = self.scopes.exit_scope();
                let unused = self.scopes.unused_in(rib);
                self.report_unused(&unused);
            }
            StmtKind::Return(value) => {
                let value_ty = value.as_ref().map(|v| self.check_expr(v));
                match (&self.current_return_type, value_ty) {
                    (None, _) => {
                        self.semantic_error("return statement outside a function", stmt.span);
                    }
                    (Some(Type::Void), Some(found)) if found != Type::Void => {
                        self.type_error(
                            format!("function returning void cannot return a value of type {found}"),
                            stmt.span,
                        );
                    }
                    (Some(expected), None) if *expected != Type::Void => {
                        self.type_error(
                            format!("function declared to return {expected} must return a value"),
                            stmt.span,
                        );
                    }
                    (Some(expected), Some(found)) if !expected.compatible(&found) => {
                        self.type_error(
                            format!("expected return type {expected}, found {found}"),
                            stmt.span,
                        );
                    }
                    _ => {}
                }
            }
            StmtKind::If { cond, then_branch, else_branch } => {
                let cond_ty = self.check_expr(cond);
                if !cond_ty.compatible(&Type::Bool) {
                    self.type_error(format!("if condition must be bool, found {cond_ty}"), cond.span);
                }
                self.check_block(then_branch);
                if let Some(else_branch) = else_branch {
                    self.check_block(else_branch);
                }
            }
            StmtKind::While { cond, body } => {
                let cond_ty = self.check_expr(cond);
                if !cond_ty.compatible(&Type::Bool) {
                    self.type_error(format!("while condition must be bool, found {cond_ty}"), cond.span);
                }
                self.check_block(body);
            }
            StmtKind::For { var, iterable, body } => {
                self.check_expr(iterable);
                self.scopes.enter_scope();
                self.scopes.bind(*var, BindingKind::Variable(Type::I32));
                self.check_block_in_current_scope(body);
                let rib = self.scopes.exit_scope();
                let unused = self.scopes.unused_in(rib);
                self.report_unused(&unused);
            }
            StmtKind::Block(block) => self.check_block(block),
            StmtKind::StructDef { .. } => {
                // Registered during the top-level pre-pass; nothing left
                // to walk (no field-initializer expressions in this
                // grammar).
            }
            StmtKind::Import { .. } | StmtKind::PackageDecl { .. } => {
                // No semantic content beyond the names they introduce;
                // dependency/version resolution is the driver's concern.
            }
            StmtKind::ExprStmt(expr) => {
                self.check_expr(expr);
            }
            StmtKind::Assign { name, value } => {
                let value_ty = self.check_expr(value);
                match self.scopes.resolve(*name) {
                    Some(BindingKind::Variable(declared)) => {
                        if !declared.compatible(&value_ty) {
                            self.type_error(
                                format!("cannot assign {value_ty} to variable of type {declared}"),
                                stmt.span,
                            );
                        }
                    }
                    Some(_) => {
                        self.semantic_error(format!("'{}' is not a variable", name.as_str()), stmt.span);
                    }
                    None => {
                        self.undefined_variable(*name, stmt.span);
                    }
                }
            }
            StmtKind::Print(_) => {
                // Legacy `print [ "…" ]` sugar; always well-typed since
                // the parser only accepts a string literal there.
            }
        }
    }

    /// Checks a block's statements in a freshly entered scope, running the
    /// unused-symbol pass on exit.
    fn check_block(&mut self, block: &Block) {
        self.scopes.enter_scope();
        self.check_block_in_current_scope(block);
        let rib = self.scopes.exit_scope();
        let unused = self.scopes.unused_in(rib);
        self.report_unused(&unused);
    }

    /// Checks a block's statements without entering a new scope; used
    /// when the caller already entered one (e.g. a function body sharing
    /// its parameter scope).
    fn check_block_in_current_scope(&mut self, block: &Block) {
        for stmt in &block.statements {
            self.check_stmt(stmt);
        }
    }

    fn check_expr(&mut self, expr: &Expr) -> Type {
        match &expr.kind {
            ExprKind::Literal(Literal::Int(_)) => Type::I32,
            ExprKind::Literal(Literal::Float(_)) => Type::F64,
            ExprKind::Literal(Literal::Str(_)) => Type::String,
            ExprKind::Literal(Literal::Bool(_)) => Type::Bool,
            ExprKind::Ident(name) => match self.scopes.resolve(*name) {
                Some(BindingKind::Variable(ty)) => ty.clone(),
                Some(BindingKind::Function { .. }) | Some(BindingKind::Struct) => {
                    // Referenced as a value rather than called/instantiated;
                    // not an error in this grammar (functions are callable
                    // via `Call`), just has no first-class type to report.
                    Type::Unknown
                }
                None => {
                    self.undefined_variable(*name, expr.span);
                    Type::Unknown
                }
            },
            ExprKind::Binary { op, left, right } => self.check_binary(*op, left, right, expr.span),
            ExprKind::Unary { op, operand } => self.check_unary(*op, operand, expr.span),
            ExprKind::Call { callee, args } => self.check_call(callee, args, expr.span),
            ExprKind::Member { object, field } => self.check_member(object, *field, expr.span),
        }
    }

    fn check_binary(&mut self, op: BinOp, left: &Expr, right: &Expr, span: Span) -> Type {
        let left_ty = self.check_expr(left);
        let right_ty = self.check_expr(right);

        match op {
            BinOp::Add => {
                if left_ty == Type::String && right_ty == Type::String {
                    return Type::String;
                }
                if left_ty.is_numeric() && left_ty.compatible(&right_ty) {
                    return left_ty;
                }
                self.type_error(format!("cannot add {left_ty} and {right_ty}"), span);
                Type::Unknown
            }
            BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Rem => {
                if left_ty.is_numeric() && left_ty.compatible(&right_ty) {
                    left_ty
                } else {
                    self.type_error(format!("arithmetic requires matching numeric types, found {left_ty} and {right_ty}"), span);
                    Type::Unknown
                }
            }
            BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => {
                if !left_ty.compatible(&right_ty) {
                    self.type_error(format!("cannot compare {left_ty} with {right_ty}"), span);
                }
                Type::Bool
            }
            BinOp::And | BinOp::Or => {
                if !left_ty.compatible(&Type::Bool) || !right_ty.compatible(&Type::Bool) {
                    self.type_error(format!("logical operator requires bool operands, found {left_ty} and {right_ty}"), span);
                }
                Type::Bool
            }
        }
    }

    fn check_unary(&mut self, op: UnOp, operand: &Expr, span: Span) -> Type {
        let ty = self.check_expr(operand);
        match op {
            UnOp::Not => {
                if !ty.compatible(&Type::Bool) {
                    self.type_error(format!("'!' requires bool, found {ty}"), span);
                }
                Type::Bool
            }
            UnOp::Neg => {
                if ty.is_numeric() || ty == Type::Unknown {
                    ty
                } else {
                    self.type_error(format!("unary '-' requires a numeric type, found {ty}"), span);
                    Type::Unknown
                }
            }
        }
    }

    fn check_call(&mut self, callee: &Expr, args: &[Expr], span: Span) -> Type {
        let arg_types: Vec<Type> = args.iter().map(|a| self.check_expr(a)).collect();

        let ExprKind::Ident(name) = &callee.kind else {
            self.semantic_error("call target must be a function name", span);
            return Type::Unknown;
        };

        match self.scopes.resolve(*name) {
            Some(BindingKind::Function { params, ret }) => {
                let params = params.clone();
                let ret = ret.clone();
                if params.len() != arg_types.len() {
                    self.type_error(
                        format!(
                            "'{}' expects {} argument(s), found {}",
                            name.as_str(),
                            params.len(),
                            arg_types.len()
                        ),
                        span,
                    );
                } else {
                    for (expected, found) in params.iter().zip(arg_types.iter()) {
                        if !expected.compatible(found) {
                            self.type_error(
                                format!("argument type mismatch: expected {expected}, found {found}"),
                                span,
                            );
                        }
                    }
                }
                ret
            }
            Some(_) => {
                self.semantic_error(format!("'{}' is not callable", name.as_str()), span);
                Type::Unknown
            }
            None => {
                self.undefined_function(*name, span);
                Type::Unknown
            }
        }
    }

    fn check_member(&mut self, object: &Expr, field: Symbol, span: Span) -> Type {
        let object_ty = self.check_expr(object);
        let struct_name = match &object_ty {
            Type::Struct(name) => *name,
            _ => {
                if object_ty != Type::Unknown {
                    self.semantic_error(format!("{object_ty} has no fields"), span);
                }
                return Type::Unknown;
            }
        };

        let field_ty = self.structs.get(&struct_name).and_then(|info| {
            info.fields
                .iter()
                .find(|(name, _)| *name == field)
                .map(|(_, ty)| ty.clone())
        });

        match field_ty {
            Some(ty) => ty,
            None => {
                self.type_error(
                    format!("'{}' has no field '{}'", struct_name.as_str(), field.as_str()),
                    span,
                );
                Type::Unknown
            }
        }
    }

    fn report_unused(&mut self, names: &[Symbol]) {
        for name in names {
            self.semantic_error(format!("unused variable '{}'", name.as_str()), Span::DUMMY);
        }
    }

    fn redefinition(&mut self, name: Symbol, span: Span) {
        DiagnosticBuilder::new(DiagnosticKind::Redefinition, format!("'{}' is already defined in this scope", name.as_str()))
            .span(span)
            .emit(self.handler);
    }

    fn undefined_variable(&mut self, name: Symbol, span: Span) {
        DiagnosticBuilder::new(DiagnosticKind::UndefinedVariable, format!("undefined variable '{}'", name.as_str()))
            .span(span)
            .emit(self.handler);
    }

    fn undefined_function(&mut self, name: Symbol, span: Span) {
        DiagnosticBuilder::new(DiagnosticKind::UndefinedFunction, format!("undefined function '{}'", name.as_str()))
            .span(span)
            .emit(self.handler);
    }

    fn type_error(&mut self, message: impl Into<String>, span: Span) {
        DiagnosticBuilder::new(DiagnosticKind::TypeError, message)
            .span(span)
            .emit(self.handler);
    }

    fn semantic_error(&mut self, message: impl Into<String>, span: Span) {
        DiagnosticBuilder::new(DiagnosticKind::SemanticError, message)
            .span(span)
            .emit(self.handler);
    }
}
