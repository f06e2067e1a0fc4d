//! Statements and blocks.

use super::{PResult, Parser, Sync};
use crate::ast::*;
use crate::error::{Error, ParseError, Span};
use crate::token::{Keyword, Punct, Tok};

/// A simple statement, or the range clause that may stand in its place in a
/// `for` header.
enum Header {
    Simple(SimpleStmtId),
    Range {
        key: Option<ExprId>,
        value: Option<ExprId>,
        define: bool,
        expr: ExprId,
    },
}

impl<'src> Parser<'src> {
    /// `Block = "{" StatementList "}"`
    pub(crate) fn parse_block(&mut self) -> PResult<Block> {
        self.nested(Self::block)
    }

    fn block(&mut self) -> PResult<Block> {
        let l_brace = self.expect(Punct::LBrace)?;
        let stmts = self.parse_stmt_list()?;
        let r_brace = self.expect(Punct::RBrace)?;
        Ok(Block {
            l_brace,
            stmts,
            r_brace,
        })
    }

    fn parse_stmt_list(&mut self) -> PResult<ListRef<StmtId>> {
        let mut stmts = Vec::new();
        while !self.at(Punct::RBrace) && !self.at_eof() {
            let start = self.pos();
            match self.parse_stmt_and_semi() {
                Ok(stmt) => stmts.push(stmt),
                Err(err) => {
                    let span = self.recover(err, Sync::Stmt)?;
                    stmts.push(self.arena.stmts.alloc(Stmt::Bad(span), start.to(span)));
                }
            }
        }
        Ok(self.arena.list_stmts(stmts))
    }

    fn parse_stmt_and_semi(&mut self) -> PResult<StmtId> {
        let stmt = self.parse_stmt()?;
        self.expect_semi()?;
        Ok(stmt)
    }

    #[inline]
    fn alloc_stmt(&mut self, stmt: Stmt, start: Span) -> StmtId {
        let span = self.span_from(start);
        self.arena.stmts.alloc(stmt, span)
    }

    pub(crate) fn parse_stmt(&mut self) -> PResult<StmtId> {
        let start = self.pos();
        if matches!(self.tok.tok, Tok::Ident(_)) && self.peek()?.is_punct(Punct::Colon) {
            return self.parse_labeled_stmt();
        }

        let stmt = match self.tok.tok {
            Tok::Keyword(Keyword::Const) => Stmt::Decl(self.parse_gen_decl(GenDeclKind::Const)?),
            Tok::Keyword(Keyword::Var) => Stmt::Decl(self.parse_gen_decl(GenDeclKind::Var)?),
            Tok::Keyword(Keyword::Type) => Stmt::Decl(self.parse_gen_decl(GenDeclKind::Type)?),
            Tok::Keyword(Keyword::Go) => {
                self.advance()?;
                let call = self.parse_call_operand()?;
                Stmt::Go {
                    go_pos: start,
                    call,
                }
            }
            Tok::Keyword(Keyword::Defer) => {
                self.advance()?;
                let call = self.parse_call_operand()?;
                Stmt::Defer {
                    defer_pos: start,
                    call,
                }
            }
            Tok::Keyword(Keyword::Return) => {
                self.advance()?;
                let results = if self.at(Punct::Semi) || self.at(Punct::RBrace) {
                    ListRef::EMPTY
                } else {
                    let results = self.parse_expr_list()?;
                    self.arena.list_exprs(results)
                };
                Stmt::Return {
                    return_pos: start,
                    results,
                }
            }
            Tok::Keyword(Keyword::Break) => self.parse_branch(BranchKind::Break)?,
            Tok::Keyword(Keyword::Continue) => self.parse_branch(BranchKind::Continue)?,
            Tok::Keyword(Keyword::Goto) => self.parse_branch(BranchKind::Goto)?,
            Tok::Keyword(Keyword::Fallthrough) => self.parse_branch(BranchKind::Fallthrough)?,
            Tok::Punct(Punct::LBrace) => Stmt::Block(self.parse_block()?),
            Tok::Keyword(Keyword::If) => return self.parse_if_stmt(),
            Tok::Keyword(Keyword::For) => return self.parse_for_stmt(),
            Tok::Punct(Punct::Semi | Punct::RBrace) => {
                let span = Span::empty_at(start.start as usize);
                let empty = self.arena.simple_stmts.alloc(SimpleStmt::Empty(span), span);
                return Ok(self.arena.stmts.alloc(Stmt::Simple(empty), span));
            }
            _ => Stmt::Simple(self.parse_simple_stmt()?),
        };
        Ok(self.alloc_stmt(stmt, start))
    }

    /// `LabeledStmt = Label ":" Statement`
    fn parse_labeled_stmt(&mut self) -> PResult<StmtId> {
        let start = self.pos();
        let label = self.ident()?;
        let colon_pos = self.expect(Punct::Colon)?;
        let stmt = self.parse_stmt()?;
        Ok(self.alloc_stmt(
            Stmt::Labeled {
                label,
                colon_pos,
                stmt,
            },
            start,
        ))
    }

    fn parse_branch(&mut self, kind: BranchKind) -> PResult<Stmt> {
        let pos = self.pos();
        self.advance()?;
        let has_label = match kind {
            BranchKind::Goto => true,
            BranchKind::Break | BranchKind::Continue => matches!(self.tok.tok, Tok::Ident(_)),
            BranchKind::Fallthrough => false,
        };
        let label = if has_label { Some(self.ident()?) } else { None };
        Ok(Stmt::Branch(BranchStmt { kind, pos, label }))
    }

    /// Operand of `go`/`defer`: must be a function or method call.
    fn parse_call_operand(&mut self) -> PResult<ExprId> {
        let call = self.parse_expr()?;
        if matches!(self.arena.exprs[call], Expr::Call { .. }) {
            return Ok(call);
        }

        let span = self.arena.exprs.span(call);
        let err: Error = ParseError::new(span, "function call", "expression").into();
        if !self.config.resilient {
            return Err(err);
        }
        tracing::debug!(error = %err, "operand replaced by bad expression");
        self.diags.push(err.diag());
        Ok(self.arena.exprs.alloc(Expr::Bad(span), span))
    }

    /// `if [ SimpleStmt ";" ] Expression Block [ "else" ( IfStmt | Block ) ]`
    fn parse_if_stmt(&mut self) -> PResult<StmtId> {
        self.nested(Self::if_stmt)
    }

    fn if_stmt(&mut self) -> PResult<StmtId> {
        let if_pos = self.expect_kw(Keyword::If)?;

        let (init, cond) = if self.eat(Punct::Semi)? {
            (None, self.parse_cond()?)
        } else {
            let simple = self.parse_simple_stmt()?;
            if self.eat(Punct::Semi)? {
                (Some(simple), self.parse_cond()?)
            } else {
                (None, self.simple_as_cond(simple)?)
            }
        };

        let then_block = self.parse_block()?;
        let else_stmt = if self.at_kw(Keyword::Else) {
            self.advance()?;
            match self.tok.tok {
                Tok::Keyword(Keyword::If) => Some(self.parse_if_stmt()?),
                Tok::Punct(Punct::LBrace) => {
                    let start = self.pos();
                    let block = self.parse_block()?;
                    Some(self.alloc_stmt(Stmt::Block(block), start))
                }
                _ => return Err(self.unexpected("`if` or block after `else`")),
            }
        } else {
            None
        };

        Ok(self.alloc_stmt(
            Stmt::If {
                if_pos,
                init,
                cond,
                then_block,
                else_stmt,
            },
            if_pos,
        ))
    }

    fn parse_cond(&mut self) -> PResult<ExprId> {
        if self.at(Punct::LBrace) {
            return Err(self.unexpected("condition"));
        }
        self.parse_expr()
    }

    /// The header's only simple statement must be a bare expression to serve
    /// as the condition.
    fn simple_as_cond(&mut self, simple: SimpleStmtId) -> PResult<ExprId> {
        match self.arena.simple_stmts[simple] {
            SimpleStmt::Expr(e) => Ok(e),
            _ => Err(ParseError::new(
                self.arena.simple_stmts.span(simple),
                "boolean expression",
                "simple statement",
            )
            .into()),
        }
    }

    /// ```text
    /// ForStmt = "for" [ Condition | ForClause | RangeClause ] Block
    /// ```
    fn parse_for_stmt(&mut self) -> PResult<StmtId> {
        let for_pos = self.expect_kw(Keyword::For)?;

        let kind = if self.at(Punct::LBrace) {
            ForKind::Infinite
        } else {
            let first = if self.at(Punct::Semi) {
                None
            } else {
                Some(self.parse_header()?)
            };
            match first {
                Some(Header::Range {
                    key,
                    value,
                    define,
                    expr,
                }) => ForKind::Range {
                    key,
                    value,
                    define,
                    expr,
                },
                Some(Header::Simple(simple)) if !self.at(Punct::Semi) => {
                    ForKind::Cond(self.simple_as_cond(simple)?)
                }
                Some(Header::Simple(simple)) => self.parse_for_clause(Some(simple))?,
                None => self.parse_for_clause(None)?,
            }
        };

        let body = self.parse_block()?;
        Ok(self.alloc_stmt(Stmt::For { for_pos, kind, body }, for_pos))
    }

    /// `ForClause = [ InitStmt ] ";" [ Condition ] ";" [ PostStmt ]`, after the
    /// init statement.
    fn parse_for_clause(&mut self, init: Option<SimpleStmtId>) -> PResult<ForKind> {
        self.expect(Punct::Semi)?;
        let cond = if self.at(Punct::Semi) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(Punct::Semi)?;
        let post = if self.at(Punct::LBrace) {
            None
        } else {
            let post = self.parse_simple_stmt()?;
            if let SimpleStmt::ShortVarDecl { op_pos, .. } = self.arena.simple_stmts[post] {
                return Err(ParseError::new(op_pos, "assignment or increment", "`:=`").into());
            }
            Some(post)
        };
        Ok(ForKind::Clause { init, cond, post })
    }

    pub(crate) fn parse_simple_stmt(&mut self) -> PResult<SimpleStmtId> {
        let start = self.pos();
        let lhs = self.parse_expr_list()?;
        self.finish_simple_stmt(lhs, start)
    }

    /// Simple statement or range clause of a `for` header.
    fn parse_header(&mut self) -> PResult<Header> {
        let start = self.pos();
        if self.at_kw(Keyword::Range) {
            self.advance()?;
            let expr = self.parse_expr()?;
            return Ok(Header::Range {
                key: None,
                value: None,
                define: false,
                expr,
            });
        }

        let lhs = self.parse_expr_list()?;
        let define = self.at(Punct::Define);
        if (define || self.at(Punct::Assign)) && self.peek()?.is_keyword(Keyword::Range) {
            self.advance()?;
            self.advance()?;
            let (key, value) = match lhs[..] {
                [k] => (Some(k), None),
                [k, v] => (Some(k), Some(v)),
                _ => {
                    let span = self.arena.exprs.span(lhs[lhs.len() - 1]);
                    return Err(ParseError::new(span, "at most 2 range variables", "more").into());
                }
            };
            let expr = self.parse_expr()?;
            return Ok(Header::Range {
                key,
                value,
                define,
                expr,
            });
        }
        Ok(Header::Simple(self.finish_simple_stmt(lhs, start)?))
    }

    /// ```text
    /// SimpleStmt = ExpressionStmt | SendStmt | IncDecStmt | Assignment | ShortVarDecl
    /// ```
    fn finish_simple_stmt(&mut self, lhs: Vec<ExprId>, start: Span) -> PResult<SimpleStmtId> {
        let op_pos = self.pos();
        let assign = match self.tok.tok {
            Tok::Punct(p) => AssignOp::from_punct(p),
            _ => None,
        };

        let simple = if self.at(Punct::Define) {
            self.advance()?;
            let names = self.idents_of(&lhs)?;
            let names = self.arena.list_ident_names(names);
            let values = self.parse_expr_list()?;
            let values = self.arena.list_exprs(values);
            SimpleStmt::ShortVarDecl {
                names,
                op_pos,
                values,
            }
        } else if let Some(op) = assign {
            self.advance()?;
            let lhs = self.arena.list_exprs(lhs);
            let rhs = self.parse_expr_list()?;
            let rhs = self.arena.list_exprs(rhs);
            SimpleStmt::Assign {
                lhs,
                op,
                op_pos,
                rhs,
            }
        } else {
            let [x] = lhs[..] else {
                return Err(self.unexpected("`:=` or `=`"));
            };
            match self.tok.tok {
                Tok::Punct(Punct::Arrow) => {
                    self.advance()?;
                    let value = self.parse_expr()?;
                    SimpleStmt::Send {
                        chan: x,
                        op_pos,
                        value,
                    }
                }
                Tok::Punct(Punct::Inc) => {
                    self.advance()?;
                    SimpleStmt::IncDec {
                        expr: x,
                        op: IncDecOp::Inc,
                        op_pos,
                    }
                }
                Tok::Punct(Punct::Dec) => {
                    self.advance()?;
                    SimpleStmt::IncDec {
                        expr: x,
                        op: IncDecOp::Dec,
                        op_pos,
                    }
                }
                _ => SimpleStmt::Expr(x),
            }
        };

        let span = self.span_from(start);
        Ok(self.arena.simple_stmts.alloc(simple, span))
    }

    /// Left-hand side of `:=`, which must be plain identifiers.
    fn idents_of(&self, lhs: &[ExprId]) -> PResult<Vec<IdentName>> {
        lhs.iter()
            .map(|&e| match &self.arena.exprs[e] {
                Expr::Ident(name) => Ok(*name),
                _ => Err(ParseError::new(self.arena.exprs.span(e), "identifier", "expression").into()),
            })
            .collect()
    }
}
