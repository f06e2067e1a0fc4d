//! Types, parameter lists and signatures.

use super::{PResult, Parser};
use crate::ast::*;
use crate::error::{ParseError, Span};
use crate::token::{Keyword, Punct, Tok};

/// One comma-separated entry of a parameter list before grouping.
enum ParamEntry {
    /// A lone identifier: a parameter name or a type name, decided by the
    /// rest of the list.
    Bare(IdentName),
    Typed {
        name: Option<IdentName>,
        ellipsis_pos: Option<Span>,
        typ: TypeId,
        span: Span,
    },
}

/// What an identifier at the start of a parameter entry turns out to be.
enum Lead {
    Bare,
    QualifiedType,
    Name,
}

impl<'src> Parser<'src> {
    /// Whether the current token can begin a type.
    pub(crate) fn at_type_start(&self) -> bool {
        match self.tok.tok {
            Tok::Ident(_) => true,
            Tok::Keyword(k) => matches!(k, Keyword::Map | Keyword::Chan | Keyword::Func | Keyword::Struct),
            Tok::Punct(p) => matches!(p, Punct::Star | Punct::LBrack | Punct::LParen | Punct::Arrow),
            _ => false,
        }
    }

    pub(crate) fn parse_type(&mut self) -> PResult<TypeId> {
        self.nested(Self::type_inner)
    }

    fn type_inner(&mut self) -> PResult<TypeId> {
        let start = self.pos();
        let ty = match self.tok.tok {
            Tok::Ident(_) => return self.parse_type_name(),
            Tok::Punct(Punct::Star) => {
                self.advance()?;
                let elem = self.parse_type()?;
                Type::Pointer {
                    star_pos: start,
                    elem,
                }
            }
            Tok::Punct(Punct::LBrack) => return self.parse_array_or_slice_type(),
            Tok::Punct(Punct::LParen) => {
                self.advance()?;
                let typ = self.parse_type()?;
                let r_paren = self.expect(Punct::RParen)?;
                Type::Paren {
                    l_paren: start,
                    typ,
                    r_paren,
                }
            }
            Tok::Punct(Punct::Arrow) => {
                self.advance()?;
                let chan_pos = self.expect_kw(Keyword::Chan)?;
                let elem = self.parse_type()?;
                Type::Chan {
                    chan_pos,
                    dir: ChanDir::Recv,
                    elem,
                }
            }
            Tok::Keyword(Keyword::Chan) => {
                self.advance()?;
                let dir = if self.eat(Punct::Arrow)? {
                    ChanDir::Send
                } else {
                    ChanDir::Both
                };
                let elem = self.parse_type()?;
                Type::Chan {
                    chan_pos: start,
                    dir,
                    elem,
                }
            }
            Tok::Keyword(Keyword::Map) => {
                self.advance()?;
                self.expect(Punct::LBrack)?;
                let key = self.parse_type()?;
                self.expect(Punct::RBrack)?;
                let value = self.parse_type()?;
                Type::Map {
                    map_pos: start,
                    key,
                    value,
                }
            }
            Tok::Keyword(Keyword::Func) => {
                self.advance()?;
                let sig = self.parse_signature_after_func(start)?;
                Type::Func {
                    func_pos: start,
                    sig,
                }
            }
            Tok::Keyword(Keyword::Struct) => {
                self.advance()?;
                let fields = self.parse_struct_fields()?;
                Type::Struct {
                    struct_pos: start,
                    fields,
                }
            }
            _ => return Err(self.unexpected("type")),
        };
        let span = self.span_from(start);
        Ok(self.arena.types.alloc(ty, span))
    }

    /// `TypeName = identifier | PackageName "." identifier`
    fn parse_type_name(&mut self) -> PResult<TypeId> {
        let first = self.ident()?;
        let ty = if self.eat(Punct::Dot)? {
            let name = self.ident()?;
            Type::Named {
                pkg: Some(first),
                name,
            }
        } else {
            Type::Named {
                pkg: None,
                name: first,
            }
        };
        let span = self.span_from(first.pos);
        Ok(self.arena.types.alloc(ty, span))
    }

    /// `[N]T`, `[...]T` or `[]T`.
    fn parse_array_or_slice_type(&mut self) -> PResult<TypeId> {
        let l_brack = self.expect(Punct::LBrack)?;
        let (len, is_slice) = if self.eat(Punct::RBrack)? {
            (None, true)
        } else if self.eat(Punct::Ellipsis)? {
            self.expect(Punct::RBrack)?;
            (None, false)
        } else {
            let len = self.parse_expr()?;
            self.expect(Punct::RBrack)?;
            (Some(len), false)
        };
        let elem = self.parse_type()?;
        let ty = if is_slice {
            Type::Slice { l_brack, elem }
        } else {
            Type::Array { l_brack, len, elem }
        };
        let span = self.span_from(l_brack);
        Ok(self.arena.types.alloc(ty, span))
    }

    /// `Signature = Parameters [ Result ]`, after `func` (and a name, for
    /// declarations).
    pub(crate) fn parse_signature_after_func(&mut self, func_pos: Span) -> PResult<SignatureId> {
        let params = self.parse_params()?;
        let results = if self.at(Punct::LParen) {
            Some(Results::Params(self.parse_params()?))
        } else if self.at_type_start() {
            Some(Results::Type(self.parse_type()?))
        } else {
            None
        };
        let span = self.span_from(func_pos);
        Ok(self.arena.signatures.alloc(Signature { params, results }, span))
    }

    /// `Parameters = "(" [ ParameterList [ "," ] ] ")"`
    ///
    /// Entries are read as written, then grouped: if any entry is `name Type`,
    /// bare identifiers are names sharing the next type (`a, b int`);
    /// otherwise every entry is a type (`(int, string)`).
    pub(crate) fn parse_params(&mut self) -> PResult<FieldList> {
        let open = self.expect(Punct::LParen)?;
        let mut entries = Vec::new();
        while !self.at(Punct::RParen) && !self.at_eof() {
            entries.push(self.parse_param_entry()?);
            if !self.eat(Punct::Comma)? {
                break;
            }
        }
        let close = self.expect(Punct::RParen)?;

        let fields = self.group_params(entries)?;
        let fields = self.arena.list_fields(fields);
        Ok(FieldList {
            open,
            fields,
            close,
        })
    }

    fn parse_param_entry(&mut self) -> PResult<ParamEntry> {
        let start = self.pos();
        if let Tok::Ident(_) = self.tok.tok {
            let lead = match self.peek()? {
                Tok::Punct(Punct::Comma | Punct::RParen) => Lead::Bare,
                Tok::Punct(Punct::Dot) => Lead::QualifiedType,
                _ => Lead::Name,
            };
            match lead {
                Lead::Bare => return Ok(ParamEntry::Bare(self.ident()?)),
                Lead::QualifiedType => {}
                Lead::Name => {
                    let name = self.ident()?;
                    return self.finish_param(start, Some(name));
                }
            }
        }
        self.finish_param(start, None)
    }

    fn finish_param(&mut self, start: Span, name: Option<IdentName>) -> PResult<ParamEntry> {
        let ellipsis_pos = self.eat_ellipsis()?;
        let typ = self.parse_type()?;
        Ok(ParamEntry::Typed {
            name,
            ellipsis_pos,
            typ,
            span: self.span_from(start),
        })
    }

    fn eat_ellipsis(&mut self) -> PResult<Option<Span>> {
        if self.at(Punct::Ellipsis) {
            let pos = self.pos();
            self.advance()?;
            Ok(Some(pos))
        } else {
            Ok(None)
        }
    }

    fn group_params(&mut self, entries: Vec<ParamEntry>) -> PResult<Vec<FieldId>> {
        let named = entries
            .iter()
            .any(|e| matches!(e, ParamEntry::Typed { name: Some(_), .. }));
        let mut fields = Vec::new();

        if !named {
            for entry in entries {
                let (typ, ellipsis_pos, span) = match entry {
                    ParamEntry::Bare(name) => {
                        let ty = Type::Named { pkg: None, name };
                        (self.arena.types.alloc(ty, name.pos), None, name.pos)
                    }
                    ParamEntry::Typed {
                        ellipsis_pos,
                        typ,
                        span,
                        ..
                    } => (typ, ellipsis_pos, span),
                };
                let field = Field {
                    names: ListRef::EMPTY,
                    ellipsis_pos,
                    typ,
                    tag: None,
                    is_embed: false,
                };
                fields.push(self.arena.fields.alloc(field, span));
            }
            return Ok(fields);
        }

        let mut pending: Vec<IdentName> = Vec::new();
        for entry in entries {
            match entry {
                ParamEntry::Bare(name) => pending.push(name),
                ParamEntry::Typed {
                    name: Some(name),
                    ellipsis_pos,
                    typ,
                    span,
                } => {
                    let start = pending.first().map_or(span, |n| n.pos);
                    pending.push(name);
                    let names = self.arena.list_ident_names(pending.drain(..));
                    let field = Field {
                        names,
                        ellipsis_pos,
                        typ,
                        tag: None,
                        is_embed: false,
                    };
                    fields.push(self.arena.fields.alloc(field, start.to(span)));
                }
                ParamEntry::Typed { name: None, span, .. } => {
                    return Err(ParseError::new(span, "parameter name", "type").into());
                }
            }
        }
        if let Some(last) = pending.last() {
            return Err(ParseError::new(last.pos, "parameter type", "`)`").into());
        }
        Ok(fields)
    }

    /// `StructType = "struct" "{" { FieldDecl ";" } "}"`
    fn parse_struct_fields(&mut self) -> PResult<FieldList> {
        let open = self.expect(Punct::LBrace)?;
        let mut fields = Vec::new();
        while !self.at(Punct::RBrace) && !self.at_eof() {
            fields.push(self.parse_field_decl()?);
            if self.at(Punct::RBrace) {
                break;
            }
            self.expect(Punct::Semi)?;
        }
        let close = self.expect(Punct::RBrace)?;
        let fields = self.arena.list_fields(fields);
        Ok(FieldList {
            open,
            fields,
            close,
        })
    }

    /// `FieldDecl = (IdentifierList Type | EmbeddedField) [ Tag ]`
    fn parse_field_decl(&mut self) -> PResult<FieldId> {
        let start = self.pos();
        let embedded = match self.tok.tok {
            Tok::Punct(Punct::Star) => true,
            Tok::Ident(_) => matches!(
                self.peek()?,
                Tok::Punct(Punct::Dot | Punct::Semi | Punct::RBrace) | Tok::Str(_)
            ),
            _ => return Err(self.unexpected("field name or embedded type")),
        };

        let (names, typ) = if embedded {
            (ListRef::EMPTY, self.parse_type()?)
        } else {
            let names = self.ident_list()?;
            let names = self.arena.list_ident_names(names);
            (names, self.parse_type()?)
        };

        let tag = if let Tok::Str(_) = self.tok.tok {
            Some(self.string_lit()?)
        } else {
            None
        };

        let span = self.span_from(start);
        Ok(self.arena.fields.alloc(
            Field {
                names,
                ellipsis_pos: None,
                typ,
                tag,
                is_embed: embedded,
            },
            span,
        ))
    }
}
