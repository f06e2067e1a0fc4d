use crate::ast::*;

pub trait Walk<'ast> {
    fn walk<V: Visitor<'ast> + ?Sized>(&self, a: &'ast AstArena, v: &mut V);
}

/// Hooks called for every arena node reached from the root. The defaults
/// keep descending; overriders call `walk` themselves to continue.
pub trait Visitor<'ast> {
    #[inline(always)]
    fn visit_source_file(&mut self, a: &'ast AstArena, f: &'ast SourceFile) {
        f.walk(a, self);
    }

    #[inline(always)]
    fn visit_decl(&mut self, a: &'ast AstArena, id: DeclId) {
        a.decls[id].walk(a, self);
    }

    #[inline(always)]
    fn visit_func_decl(&mut self, a: &'ast AstArena, id: FuncDeclId) {
        a.funcs[id].walk(a, self);
    }

    #[inline(always)]
    fn visit_stmt(&mut self, a: &'ast AstArena, id: StmtId) {
        a.stmts[id].walk(a, self);
    }

    #[inline(always)]
    fn visit_simple_stmt(&mut self, a: &'ast AstArena, id: SimpleStmtId) {
        a.simple_stmts[id].walk(a, self);
    }

    #[inline(always)]
    fn visit_expr(&mut self, a: &'ast AstArena, id: ExprId) {
        a.exprs[id].walk(a, self);
    }

    #[inline(always)]
    fn visit_type(&mut self, a: &'ast AstArena, id: TypeId) {
        a.types[id].walk(a, self);
    }

    #[inline(always)]
    fn visit_field(&mut self, a: &'ast AstArena, id: FieldId) {
        a.fields[id].walk(a, self);
    }

    #[inline(always)]
    fn visit_signature(&mut self, a: &'ast AstArena, id: SignatureId) {
        a.signatures[id].walk(a, self);
    }
}

macro_rules! impl_walk_for_ids {
    ($($id:ty => $visit:ident),* $(,)?) => {
        $(
            impl<'ast> Walk<'ast> for $id {
                #[inline(always)]
                fn walk<V: Visitor<'ast> + ?Sized>(&self, a: &'ast AstArena, v: &mut V) {
                    v.$visit(a, *self);
                }
            }
        )*
    };
}

impl_walk_for_ids! {
    DeclId => visit_decl,
    FuncDeclId => visit_func_decl,
    StmtId => visit_stmt,
    SimpleStmtId => visit_simple_stmt,
    ExprId => visit_expr,
    TypeId => visit_type,
    FieldId => visit_field,
    SignatureId => visit_signature,
}

pub trait ListSlice<T> {
    fn slice(&self, r: ListRef<T>) -> &[T];
}

impl<'ast, T> Walk<'ast> for ListRef<T>
where
    AstArena: ListSlice<T>,
    T: Walk<'ast>,
{
    #[inline(always)]
    fn walk<V: Visitor<'ast> + ?Sized>(&self, a: &'ast AstArena, v: &mut V) {
        for item in a.slice(*self) {
            item.walk(a, v);
        }
    }
}

macro_rules! impl_list_slice {
    ($($t:ty => $getter:ident),* $(,)?) => {
        $(
            impl ListSlice<$t> for AstArena {
                #[inline(always)]
                fn slice(&self, r: ListRef<$t>) -> &[$t] {
                    self.$getter(r)
                }
            }
        )*
    };
}

impl_list_slice! {
    ExprId => exprs_list,
    StmtId => stmts_list,
    FieldId => fields_list,
    Spec => specs_list,
    DeclId => decl_ids,
    TopLevelDecl => top_decls,
    IdentName => ident_names,
}

impl<'ast, T: Walk<'ast>> Walk<'ast> for Option<T> {
    #[inline(always)]
    fn walk<V: Visitor<'ast> + ?Sized>(&self, a: &'ast AstArena, v: &mut V) {
        if let Some(x) = self {
            x.walk(a, v);
        }
    }
}

/// Counts `Bad` placeholders left behind by resilient parsing.
#[derive(Debug, Default)]
pub struct BadNodeCounter {
    pub count: usize,
}

impl<'ast> Visitor<'ast> for BadNodeCounter {
    fn visit_decl(&mut self, a: &'ast AstArena, id: DeclId) {
        if matches!(a.decls[id], Decl::Bad(_)) {
            self.count += 1;
        }
        a.decls[id].walk(a, self);
    }

    fn visit_stmt(&mut self, a: &'ast AstArena, id: StmtId) {
        if matches!(a.stmts[id], Stmt::Bad(_)) {
            self.count += 1;
        }
        a.stmts[id].walk(a, self);
    }

    fn visit_expr(&mut self, a: &'ast AstArena, id: ExprId) {
        if matches!(a.exprs[id], Expr::Bad(_)) {
            self.count += 1;
        }
        a.exprs[id].walk(a, self);
    }
}
