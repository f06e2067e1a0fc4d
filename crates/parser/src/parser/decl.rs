//! File structure and declarations.

use super::{PResult, Parser, Sync};
use crate::ast::*;
use crate::token::{Keyword, Punct, Tok};

/// Type and values of the last explicit const spec in a group.
#[derive(Clone, Copy)]
struct ConstInit {
    typ: Option<TypeId>,
    values: ListRef<ExprId>,
}

impl<'src> Parser<'src> {
    /// ```text
    /// SourceFile = PackageClause ";" { ImportDecl ";" } { TopLevelDecl ";" }
    /// ```
    pub(crate) fn parse_source_file(&mut self) -> PResult<SourceFile> {
        self.advance()?;

        let package_pos = self.expect_kw(Keyword::Package)?;
        let name = self.ident()?;
        self.expect_semi()?;
        let package = PackageClause { package_pos, name };

        let mut imports = Vec::new();
        while self.at_kw(Keyword::Import) {
            let start = self.pos();
            match self.parse_gen_decl(GenDeclKind::Import).and_then(|d| {
                self.expect_semi()?;
                Ok(d)
            }) {
                Ok(decl) => imports.push(decl),
                Err(err) => {
                    let span = self.recover(err, Sync::Decl)?;
                    imports.push(self.arena.decls.alloc(Decl::Bad(span), start.to(span)));
                }
            }
        }

        let mut decls = Vec::new();
        while !self.at_eof() {
            let start = self.pos();
            match self.parse_top_level_decl() {
                Ok(decl) => decls.push(decl),
                Err(err) => {
                    let span = self.recover(err, Sync::Decl)?;
                    let bad = self.arena.decls.alloc(Decl::Bad(span), start.to(span));
                    decls.push(TopLevelDecl::Decl(bad));
                }
            }
        }

        let imports = self.arena.list_decl_ids(imports);
        let decls = self.arena.list_top_decls(decls);
        tracing::trace!(decls = decls.len(), "source file parsed");
        Ok(SourceFile {
            package,
            imports,
            decls,
        })
    }

    fn parse_top_level_decl(&mut self) -> PResult<TopLevelDecl> {
        let decl = match self.tok.tok {
            Tok::Keyword(Keyword::Func) => TopLevelDecl::Func(self.parse_func_decl()?),
            Tok::Keyword(Keyword::Const) => {
                TopLevelDecl::Decl(self.parse_gen_decl(GenDeclKind::Const)?)
            }
            Tok::Keyword(Keyword::Var) => TopLevelDecl::Decl(self.parse_gen_decl(GenDeclKind::Var)?),
            Tok::Keyword(Keyword::Type) => {
                TopLevelDecl::Decl(self.parse_gen_decl(GenDeclKind::Type)?)
            }
            _ => return Err(self.unexpected("declaration")),
        };
        if !self.at_eof() {
            self.expect(Punct::Semi)?;
        }
        Ok(decl)
    }

    /// ```text
    /// FunctionDecl = "func" [ Receiver ] FunctionName Signature [ FunctionBody ]
    /// ```
    fn parse_func_decl(&mut self) -> PResult<FuncDeclId> {
        let func_pos = self.expect_kw(Keyword::Func)?;
        let recv = if self.at(Punct::LParen) {
            Some(self.parse_params()?)
        } else {
            None
        };
        let name = self.ident()?;
        let signature = self.parse_signature_after_func(func_pos)?;
        let body = if self.at(Punct::LBrace) {
            Some(self.parse_block()?)
        } else {
            None
        };

        let span = self.span_from(func_pos);
        tracing::trace!(start = span.start, "func decl");
        Ok(self.arena.funcs.alloc(
            FuncDecl {
                func_pos,
                recv,
                name,
                signature,
                body,
            },
            span,
        ))
    }

    /// `import`, `const`, `var` or `type` declaration, single or grouped.
    pub(crate) fn parse_gen_decl(&mut self, kind: GenDeclKind) -> PResult<DeclId> {
        let kw_pos = self.pos();
        self.advance()?;

        let mut specs = Vec::new();
        let (l_paren, r_paren) = if self.at(Punct::LParen) {
            let l_paren = self.pos();
            self.advance()?;
            let mut prev = None;
            while !self.at(Punct::RParen) && !self.at_eof() {
                specs.push(self.parse_spec(kind, &mut prev)?);
                if self.at(Punct::RParen) {
                    break;
                }
                self.expect(Punct::Semi)?;
            }
            (Some(l_paren), Some(self.expect(Punct::RParen)?))
        } else {
            specs.push(self.parse_spec(kind, &mut None)?);
            (None, None)
        };

        let specs = self.arena.list_specs(specs);
        let span = self.span_from(kw_pos);
        Ok(self.arena.decls.alloc(
            Decl::Gen(GenDecl {
                kw_pos,
                kind,
                l_paren,
                specs,
                r_paren,
            }),
            span,
        ))
    }

    fn parse_spec(&mut self, kind: GenDeclKind, prev: &mut Option<ConstInit>) -> PResult<Spec> {
        Ok(match kind {
            GenDeclKind::Import => Spec::Import(self.parse_import_spec()?),
            GenDeclKind::Const => Spec::Value(self.parse_const_spec(prev)?),
            GenDeclKind::Var => Spec::Value(self.parse_var_spec()?),
            GenDeclKind::Type => Spec::Type(self.parse_type_spec()?),
        })
    }

    /// `ImportSpec = [ "." | PackageName ] ImportPath`
    fn parse_import_spec(&mut self) -> PResult<ImportSpec> {
        let name = match self.tok.tok {
            Tok::Punct(Punct::Dot) => {
                let pos = self.pos();
                self.advance()?;
                Some(ImportName::Dot(pos))
            }
            Tok::Ident("_") => {
                let pos = self.pos();
                self.advance()?;
                Some(ImportName::Blank(pos))
            }
            Tok::Ident(_) => Some(ImportName::Name(self.ident()?)),
            _ => None,
        };
        let path = self.string_lit()?;
        Ok(ImportSpec { name, path })
    }

    /// `ConstSpec = IdentifierList [ [ Type ] "=" ExpressionList ]`
    ///
    /// A spec with neither type nor values repeats the previous spec's, as
    /// fresh copies.
    fn parse_const_spec(&mut self, prev: &mut Option<ConstInit>) -> PResult<ValueSpec> {
        let names = self.ident_list()?;
        let names = self.arena.list_ident_names(names);

        let typ = if self.at_type_start() {
            Some(self.parse_type()?)
        } else {
            None
        };

        if typ.is_some() || self.at(Punct::Assign) {
            self.expect(Punct::Assign)?;
            let values = self.parse_expr_list()?;
            let values = self.arena.list_exprs(values);
            *prev = Some(ConstInit { typ, values });
            return Ok(ValueSpec {
                names,
                typ,
                values,
                inherited: false,
            });
        }

        let Some(init) = *prev else {
            return Err(self.unexpected("`=`"));
        };
        Ok(ValueSpec {
            names,
            typ: init.typ.map(|t| self.arena.deep_copy_type(t)),
            values: self.arena.deep_copy_exprs(init.values),
            inherited: true,
        })
    }

    /// `VarSpec = IdentifierList ( Type [ "=" ExpressionList ] | "=" ExpressionList )`
    fn parse_var_spec(&mut self) -> PResult<ValueSpec> {
        let names = self.ident_list()?;
        let names = self.arena.list_ident_names(names);

        let typ = if self.at(Punct::Assign) {
            None
        } else if self.at_type_start() {
            Some(self.parse_type()?)
        } else {
            return Err(self.unexpected("type or `=`"));
        };

        let values = if self.eat(Punct::Assign)? {
            let values = self.parse_expr_list()?;
            self.arena.list_exprs(values)
        } else {
            ListRef::EMPTY
        };

        Ok(ValueSpec {
            names,
            typ,
            values,
            inherited: false,
        })
    }

    /// `TypeSpec = identifier [ "=" ] Type`
    fn parse_type_spec(&mut self) -> PResult<TypeSpec> {
        let name = self.ident()?;
        let assign_pos = if self.at(Punct::Assign) {
            let pos = self.pos();
            self.advance()?;
            Some(pos)
        } else {
            None
        };
        let typ = self.parse_type()?;
        Ok(TypeSpec {
            name,
            assign_pos,
            typ,
        })
    }
}
