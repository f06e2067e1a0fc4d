//! Canonical text renderings of token streams and syntax trees.
//!
//! Token mode prints one line per token. AST mode prints nested
//! `Kind [ ... ]` blocks, one tab of indentation per depth:
//!
//! ```text
//! ImportSpec [ path: StringLiteral(literal: "math") ]
//! IncDecStmt [ op: ++
//! 	target: Identifier(ident: x)
//! ]
//! ```
//!
//! A node with only scalar fields fits on one line. Otherwise its scalars
//! stay on the header line and each child field gets its own line. Both
//! modes share the literal formatters, so an identifier or literal reads the
//! same in either output.

use crate::ast::*;
use crate::parser::ParsedFile;
use crate::token::{FloatLit, IntLit, Number, Tok, Token};

// =============================================================================
// Literal formatting
// =============================================================================

fn int_literal(raw: &str, lit: &IntLit) -> String {
    format!(
        "IntLiteral(lit: {raw}, value: {}, radix: {})",
        lit.value, lit.radix
    )
}

fn float_literal(lit: &FloatLit) -> String {
    format!(
        "FloatLiteral(mantissa: {}, exponent: {}, radix: {}, negative_exponent: {})",
        lit.mantissa, lit.exponent, lit.radix, lit.negative_exponent
    )
}

fn imaginary_literal(raw: &str, inner: &Number) -> String {
    let digits = raw.strip_suffix('i').unwrap_or(raw);
    let inner = match inner {
        Number::Int(lit) => int_literal(digits, lit),
        Number::Float(lit) => float_literal(lit),
    };
    format!("ImaginaryLiteral(inner: {inner})")
}

fn identifier(name: &str) -> String {
    format!("Identifier(ident: {name})")
}

fn string_literal(raw: &str) -> String {
    format!("StringLiteral(literal: {raw})")
}

fn rune_literal(raw: &str) -> String {
    format!("RuneLiteral(literal: {raw})")
}

// =============================================================================
// Token mode
// =============================================================================

/// One line for a single token, without the trailing newline.
pub fn render_token(tok: &Tok<'_>) -> String {
    match tok {
        Tok::Keyword(k) => format!("Keyword(kind: {k})"),
        Tok::Ident(name) => identifier(name),
        Tok::Punct(p) => format!("Punctuation(kind: {p})"),
        Tok::Int(raw, lit) => int_literal(raw, lit),
        Tok::Float(_, lit) => float_literal(lit),
        Tok::Imag(raw, inner) => imaginary_literal(raw, inner),
        Tok::Rune(raw) => rune_literal(raw),
        Tok::Str(raw) => string_literal(raw),
        Tok::Comment { text, multiline } => format!("Comment(multiline: {multiline}, text: {text})"),
        Tok::Eof => "EOF".to_string(),
    }
}

/// Renders every token on its own line, synthesized semicolons included.
pub fn render_tokens(tokens: &[Token<'_>]) -> String {
    let mut out = String::with_capacity(tokens.len() * 24);
    for token in tokens {
        out.push_str(&render_token(&token.tok));
        out.push('\n');
    }
    out
}

// =============================================================================
// AST mode: layout
// =============================================================================

enum Item {
    /// Leaf rendered in token syntax (identifiers, literals).
    Atom(String),
    Node(Node),
}

enum Child {
    One(Item),
    Many(Vec<Item>),
}

struct Node {
    kind: &'static str,
    scalars: Vec<(&'static str, String)>,
    children: Vec<(&'static str, Child)>,
}

impl Node {
    fn new(kind: &'static str) -> Self {
        Self {
            kind,
            scalars: Vec::new(),
            children: Vec::new(),
        }
    }

    fn scalar(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.scalars.push((name, value.into()));
        self
    }

    fn flag(self, name: &'static str, set: bool) -> Self {
        if set { self.scalar(name, "true") } else { self }
    }

    fn child(mut self, name: &'static str, item: Item) -> Self {
        self.children.push((name, Child::One(item)));
        self
    }

    fn child_opt(self, name: &'static str, item: Option<Item>) -> Self {
        match item {
            Some(item) => self.child(name, item),
            None => self,
        }
    }

    fn list(mut self, name: &'static str, items: Vec<Item>) -> Self {
        self.children.push((name, Child::Many(items)));
        self
    }

    fn item(self) -> Item {
        Item::Node(self)
    }

    fn write(&self, out: &mut String, depth: usize) {
        out.push_str(self.kind);
        out.push_str(" [");

        let scalars = self
            .scalars
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join(", ");

        if self.children.is_empty() {
            if scalars.is_empty() {
                out.push_str("]\n");
            } else {
                out.push(' ');
                out.push_str(&scalars);
                out.push_str(" ]\n");
            }
            return;
        }

        if !scalars.is_empty() {
            out.push(' ');
            out.push_str(&scalars);
        }
        out.push('\n');

        for (name, child) in &self.children {
            indent(out, depth + 1);
            out.push_str(name);
            out.push_str(": ");
            match child {
                Child::One(item) => item.write(out, depth + 1),
                Child::Many(items) if items.is_empty() => out.push_str("[]\n"),
                Child::Many(items) => {
                    out.push_str("[\n");
                    for item in items {
                        indent(out, depth + 2);
                        item.write(out, depth + 2);
                    }
                    indent(out, depth + 1);
                    out.push_str("]\n");
                }
            }
        }

        indent(out, depth);
        out.push_str("]\n");
    }
}

impl Item {
    fn write(&self, out: &mut String, depth: usize) {
        match self {
            Item::Atom(text) => {
                out.push_str(text);
                out.push('\n');
            }
            Item::Node(node) => node.write(out, depth),
        }
    }
}

#[inline]
fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push('\t');
    }
}

// =============================================================================
// AST mode: tree to layout
// =============================================================================

/// Renders the whole file, starting at `SourceFile`.
pub fn render_ast(parsed: &ParsedFile) -> String {
    let dumper = AstDumper {
        a: &parsed.arena,
        interner: &parsed.interner,
    };
    let mut out = String::new();
    dumper.source_file(&parsed.file).write(&mut out, 0);
    out
}

struct AstDumper<'a> {
    a: &'a AstArena,
    interner: &'a Interner,
}

impl AstDumper<'_> {
    fn name(&self, ident: IdentName) -> String {
        self.interner.resolve(ident.sym).to_string()
    }

    fn names(&self, list: ListRef<IdentName>) -> String {
        let names = self
            .a
            .ident_names(list)
            .iter()
            .map(|n| self.interner.resolve(n.sym))
            .collect::<Vec<_>>();
        format!("[{}]", names.join(", "))
    }

    fn source_file(&self, file: &SourceFile) -> Item {
        let package = Node::new("PackageClause").scalar("ident", self.name(file.package.name));
        let imports = self.a.decl_ids(file.imports).iter().map(|&d| self.decl(d)).collect();
        let decls = self
            .a
            .top_decls(file.decls)
            .iter()
            .map(|d| match *d {
                TopLevelDecl::Decl(d) => self.decl(d),
                TopLevelDecl::Func(f) => self.func_decl(f),
            })
            .collect();

        Node::new("SourceFile")
            .child("package", package.item())
            .list("imports", imports)
            .list("decls", decls)
            .item()
    }

    fn decl(&self, id: DeclId) -> Item {
        let Decl::Gen(decl) = self.a.decls[id] else {
            return Node::new("BadDecl").item();
        };
        let kind = match decl.kind {
            GenDeclKind::Import => "ImportDecl",
            GenDeclKind::Const => "ConstDecl",
            GenDeclKind::Var => "VarDecl",
            GenDeclKind::Type => "TypeDecl",
        };
        let specs = self
            .a
            .specs_list(decl.specs)
            .iter()
            .map(|spec| self.spec(decl.kind, spec))
            .collect();
        Node::new(kind).list("specs", specs).item()
    }

    fn spec(&self, kind: GenDeclKind, spec: &Spec) -> Item {
        match spec {
            Spec::Import(s) => {
                let node = Node::new("ImportSpec");
                let node = match s.name {
                    Some(ImportName::Dot(_)) => node.scalar("name", "."),
                    Some(ImportName::Blank(_)) => node.scalar("name", "_"),
                    Some(ImportName::Name(n)) => node.scalar("name", self.name(n)),
                    None => node,
                };
                node.scalar("path", string_literal(self.interner.resolve(s.path.raw)))
                    .item()
            }
            Spec::Value(v) => {
                let kind = if kind == GenDeclKind::Const { "ConstSpec" } else { "VarSpec" };
                Node::new(kind)
                    .scalar("names", self.names(v.names))
                    .flag("inherited", v.inherited)
                    .child_opt("type", v.typ.map(|t| self.typ(t)))
                    .list("values", self.exprs(v.values))
                    .item()
            }
            Spec::Type(t) => Node::new("TypeSpec")
                .scalar("name", self.name(t.name))
                .flag("alias", t.is_alias())
                .child("type", self.typ(t.typ))
                .item(),
        }
    }

    fn func_decl(&self, id: FuncDeclId) -> Item {
        let f = self.a.funcs[id];
        let node = Node::new("FuncDecl").scalar("name", self.name(f.name));
        let node = match f.recv {
            Some(recv) => node.list("recv", self.fields(recv)),
            None => node,
        };
        self.signature(node, f.signature)
            .child_opt("body", f.body.map(|b| self.block(b)))
            .item()
    }

    /// Appends `params` and, when present, `results` to `node`.
    fn signature(&self, node: Node, id: SignatureId) -> Node {
        let sig = self.a.signatures[id];
        let node = node.list("params", self.fields(sig.params));
        match sig.results {
            None => node,
            Some(Results::Params(list)) => node.list("results", self.fields(list)),
            Some(Results::Type(t)) => node.child("results", self.typ(t)),
        }
    }

    fn fields(&self, list: FieldList) -> Vec<Item> {
        self.a
            .fields_list(list.fields)
            .iter()
            .map(|&id| {
                let f = self.a.fields[id];
                let mut node = Node::new("Field");
                if !f.names.is_empty() {
                    node = node.scalar("names", self.names(f.names));
                }
                node = node
                    .flag("variadic", f.ellipsis_pos.is_some())
                    .flag("embedded", f.is_embed);
                if let Some(tag) = f.tag {
                    node = node.scalar("tag", self.interner.resolve(tag.raw));
                }
                node.child("type", self.typ(f.typ)).item()
            })
            .collect()
    }

    fn block(&self, block: Block) -> Item {
        let stmts = self.a.stmts_list(block.stmts).iter().map(|&s| self.stmt(s)).collect();
        Node::new("Block").list("statements", stmts).item()
    }

    fn stmt(&self, id: StmtId) -> Item {
        match self.a.stmts[id] {
            Stmt::Simple(s) => self.simple(s),
            Stmt::Decl(d) => Node::new("DeclStmt").child("decl", self.decl(d)).item(),
            Stmt::Labeled { label, stmt, .. } => Node::new("LabeledStmt")
                .scalar("label", self.name(label))
                .child("stmt", self.stmt(stmt))
                .item(),
            Stmt::Go { call, .. } => Node::new("GoStmt").child("call", self.expr(call)).item(),
            Stmt::Defer { call, .. } => Node::new("DeferStmt").child("call", self.expr(call)).item(),
            Stmt::Return { results, .. } => Node::new("ReturnStmt")
                .list("results", self.exprs(results))
                .item(),
            Stmt::Branch(b) => {
                let node = Node::new("BranchStmt").scalar("tok", b.kind.as_str());
                match b.label {
                    Some(label) => node.scalar("label", self.name(label)),
                    None => node,
                }
                .item()
            }
            Stmt::Block(b) => self.block(b),
            Stmt::If {
                init,
                cond,
                then_block,
                else_stmt,
                ..
            } => Node::new("IfStmt")
                .child_opt("init", init.map(|s| self.simple(s)))
                .child("cond", self.expr(cond))
                .child("then", self.block(then_block))
                .child_opt("else", else_stmt.map(|s| self.stmt(s)))
                .item(),
            Stmt::For { kind, body, .. } => self.for_stmt(kind, body),
            Stmt::Bad(_) => Node::new("BadStmt").item(),
        }
    }

    fn for_stmt(&self, kind: ForKind, body: Block) -> Item {
        let node = match kind {
            ForKind::Infinite => Node::new("ForStmt"),
            ForKind::Cond(cond) => Node::new("ForStmt").child("cond", self.expr(cond)),
            ForKind::Clause { init, cond, post } => Node::new("ForStmt")
                .child_opt("init", init.map(|s| self.simple(s)))
                .child_opt("cond", cond.map(|e| self.expr(e)))
                .child_opt("post", post.map(|s| self.simple(s))),
            ForKind::Range {
                key,
                value,
                define,
                expr,
            } => Node::new("RangeStmt")
                .flag("define", define)
                .child_opt("key", key.map(|e| self.expr(e)))
                .child_opt("value", value.map(|e| self.expr(e)))
                .child("expr", self.expr(expr)),
        };
        node.child("body", self.block(body)).item()
    }

    fn simple(&self, id: SimpleStmtId) -> Item {
        match self.a.simple_stmts[id] {
            SimpleStmt::Empty(_) => Node::new("EmptyStmt").item(),
            SimpleStmt::Expr(e) => Node::new("ExprStmt").child("expr", self.expr(e)).item(),
            SimpleStmt::Send { chan, value, .. } => Node::new("SendStmt")
                .child("chan", self.expr(chan))
                .child("value", self.expr(value))
                .item(),
            SimpleStmt::IncDec { expr, op, .. } => Node::new("IncDecStmt")
                .scalar("op", op.as_str())
                .child("target", self.expr(expr))
                .item(),
            SimpleStmt::Assign { lhs, op, rhs, .. } => Node::new("AssignStmt")
                .scalar("op", op.as_str())
                .list("lhs", self.exprs(lhs))
                .list("rhs", self.exprs(rhs))
                .item(),
            SimpleStmt::ShortVarDecl { names, values, .. } => Node::new("ShortVarDecl")
                .scalar("names", self.names(names))
                .list("values", self.exprs(values))
                .item(),
        }
    }

    fn exprs(&self, list: ListRef<ExprId>) -> Vec<Item> {
        self.a.exprs_list(list).iter().map(|&e| self.expr(e)).collect()
    }

    fn expr(&self, id: ExprId) -> Item {
        match &self.a.exprs[id] {
            Expr::Ident(name) => Item::Atom(identifier(self.interner.resolve(name.sym))),
            Expr::BasicLit(lit) => Item::Atom(self.basic_lit(lit)),
            Expr::FuncLit { sig, body, .. } => self
                .signature(Node::new("FuncLit"), *sig)
                .child("body", self.block(*body))
                .item(),
            Expr::Paren { expr, .. } => Node::new("ParenExpr").child("expr", self.expr(*expr)).item(),
            Expr::Selector { expr, sel, .. } => Node::new("SelectorExpr")
                .scalar("field", self.name(*sel))
                .child("base", self.expr(*expr))
                .item(),
            Expr::Index { expr, index, .. } => Node::new("IndexExpr")
                .child("base", self.expr(*expr))
                .child("index", self.expr(*index))
                .item(),
            Expr::Slice {
                expr, lo, hi, max, ..
            } => Node::new("SliceExpr")
                .child("base", self.expr(*expr))
                .child_opt("low", lo.map(|e| self.expr(e)))
                .child_opt("high", hi.map(|e| self.expr(e)))
                .child_opt("max", max.map(|e| self.expr(e)))
                .item(),
            Expr::TypeAssert { expr, typ, .. } => Node::new("TypeAssertExpr")
                .child("expr", self.expr(*expr))
                .child("type", self.typ(*typ))
                .item(),
            Expr::Call {
                callee,
                args,
                ellipsis,
                ..
            } => Node::new("CallExpr")
                .flag("variadic", ellipsis.is_some())
                .child("callee", self.expr(*callee))
                .list("args", self.exprs(*args))
                .item(),
            Expr::Unary { op, expr, .. } => Node::new("UnaryExpr")
                .scalar("op", op.as_str())
                .child("operand", self.expr(*expr))
                .item(),
            Expr::Binary {
                left, op, right, ..
            } => Node::new("BinaryExpr")
                .scalar("op", op.as_str())
                .child("left", self.expr(*left))
                .child("right", self.expr(*right))
                .item(),
            Expr::Type(t) => self.typ(*t),
            Expr::Bad(_) => Node::new("BadExpr").item(),
        }
    }

    fn basic_lit(&self, lit: &BasicLit) -> String {
        let raw = self.interner.resolve(lit.raw);
        match &lit.value {
            LitValue::Int(v) => int_literal(raw, v),
            LitValue::Float(v) => float_literal(v),
            LitValue::Imag(v) => imaginary_literal(raw, v),
            LitValue::Rune => rune_literal(raw),
            LitValue::String => string_literal(raw),
        }
    }

    fn typ(&self, id: TypeId) -> Item {
        match self.a.types[id] {
            Type::Named { pkg, name } => {
                let node = Node::new("NamedType");
                match pkg {
                    Some(pkg) => node.scalar("package", self.name(pkg)),
                    None => node,
                }
                .scalar("name", self.name(name))
                .item()
            }
            Type::Pointer { elem, .. } => Node::new("PointerType").child("elem", self.typ(elem)).item(),
            Type::Array { len, elem, .. } => {
                let node = Node::new("ArrayType");
                match len {
                    Some(len) => node.child("len", self.expr(len)),
                    None => node.scalar("len", "..."),
                }
                .child("elem", self.typ(elem))
                .item()
            }
            Type::Slice { elem, .. } => Node::new("SliceType").child("elem", self.typ(elem)).item(),
            Type::Map { key, value, .. } => Node::new("MapType")
                .child("key", self.typ(key))
                .child("value", self.typ(value))
                .item(),
            Type::Chan { dir, elem, .. } => {
                let dir = match dir {
                    ChanDir::Both => "both",
                    ChanDir::Send => "send",
                    ChanDir::Recv => "recv",
                };
                Node::new("ChanType")
                    .scalar("dir", dir)
                    .child("elem", self.typ(elem))
                    .item()
            }
            Type::Func { sig, .. } => self.signature(Node::new("FuncType"), sig).item(),
            Type::Struct { fields, .. } => Node::new("StructType")
                .list("fields", self.fields(fields))
                .item(),
            Type::Paren { typ, .. } => Node::new("ParenType").child("type", self.typ(typ)).item(),
        }
    }
}
