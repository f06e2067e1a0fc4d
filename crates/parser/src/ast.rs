//! # Go syntax tree
//!
//! Arena-allocated AST for the subset of Go this front-end parses.
//!
//! ## Architecture
//!
//! - **Nodes**: every node family lives in a typed arena (`SpannedArena<T>`)
//!   and is referenced through `Id<T>` handles, so a subtree has exactly one
//!   owner and the tree cannot contain cycles.
//! - **Lists**: child lists are `ListRef<T>` windows into shared buffers in
//!   `ExtraData`, not per-node `Vec`s.
//! - **Spans**: stored next to each node in the arena side tables.
//! - **Symbols**: identifiers and literal spellings are interned.
//! - **Literals**: literal payloads are the token model's (`IntLit`,
//!   `FloatLit`, `Number`), so the dump renderer formats both the same way.
//!
//! Walk/Visitor infrastructure lives in `crate::walk`; `#[derive(WalkAst)]`
//! generates `impl crate::walk::Walk`.

use ast_derive::WalkAst;
use core::marker::PhantomData;
use core::ops::{Index, IndexMut};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::hash::{BuildHasher, BuildHasherDefault, Hasher, RandomState};

pub use crate::error::Span;
use crate::token::{FloatLit, IntLit, Number, Punct};

// =============================================================================
// Core Foundation Types
// =============================================================================

/// Type-safe handle for arena-allocated nodes.
#[derive(Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Id<T> {
    raw: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Copy for Id<T> {}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Id<T> {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn to_usize(&self) -> usize {
        self.raw as usize
    }

    #[inline]
    pub const fn raw(&self) -> u32 {
        self.raw
    }
}

/// Typed window into one of the `ExtraData` list buffers.
#[derive(Debug, PartialEq, Eq)]
pub struct ListRef<T> {
    start: u32,
    len: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Copy for ListRef<T> {}

impl<T> Clone for ListRef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Default for ListRef<T> {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl<T> ListRef<T> {
    pub const EMPTY: Self = Self {
        start: 0,
        len: 0,
        _marker: PhantomData,
    };

    #[inline]
    pub const fn new(start: u32, len: u32) -> Self {
        Self {
            start,
            len,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn start(&self) -> u32 {
        self.start
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.len
    }

    #[inline]
    pub const fn end(&self) -> u32 {
        self.start + self.len
    }
}

// =============================================================================
// Symbol Interning
// =============================================================================

/// Interned string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Symbol(u32);

/// Identifier occurrence: interned name plus its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub struct IdentName {
    #[walk(skip)]
    pub sym: Symbol,
    #[walk(skip)]
    pub pos: Span,
}

/// Identity hasher for precomputed u64 keys.
#[derive(Default)]
struct U64IdentityHasher(u64);

impl Hasher for U64IdentityHasher {
    // Keys arrive through `write_u64`; this path only folds stray bytes.
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = self.0.rotate_left(8) ^ u64::from(b);
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.0 = i;
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }
}

type U64IdentityBuild = BuildHasherDefault<U64IdentityHasher>;

/// String interner; symbols index into `strings`, buckets are keyed by a
/// seeded hash of the text.
#[derive(Debug, Default)]
pub struct Interner {
    strings: Vec<Box<str>>,
    buckets: HashMap<u64, SmallVec<[Symbol; 1]>, U64IdentityBuild>,
    state: RandomState,
}

impl Interner {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.strings.reserve(additional);
        self.buckets.reserve(additional);
    }

    pub fn intern(&mut self, s: &str) -> Symbol {
        let h = self.state.hash_one(s);
        let entry = self.buckets.entry(h).or_default();

        for &sym in entry.iter() {
            if self.strings[sym.0 as usize].as_ref() == s {
                return sym;
            }
        }

        let sym = Symbol(self.strings.len() as u32);
        self.strings.push(s.into());
        entry.push(sym);
        sym
    }

    /// Text of a symbol produced by this interner.
    ///
    /// # Panics
    /// Panics if `sym` came from another interner.
    #[inline]
    pub fn resolve(&self, sym: Symbol) -> &str {
        &self.strings[sym.0 as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

// =============================================================================
// Arena Allocation
// =============================================================================

/// Nodes and their spans, stored in parallel vectors.
#[derive(Debug)]
pub struct SpannedArena<T> {
    data: Vec<T>,
    spans: Vec<Span>,
}

impl<T> Default for SpannedArena<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            spans: Vec::new(),
        }
    }
}

impl<T> SpannedArena<T> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc(&mut self, node: T, span: Span) -> Id<T> {
        let id = Id::from_raw(self.data.len() as u32);
        self.data.push(node);
        self.spans.push(span);
        id
    }

    #[inline]
    pub fn get(&self, id: Id<T>) -> &T {
        &self.data[id.to_usize()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: Id<T>) -> &mut T {
        &mut self.data[id.to_usize()]
    }

    #[inline]
    pub fn span(&self, id: Id<T>) -> Span {
        self.spans[id.to_usize()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T> Index<Id<T>> for SpannedArena<T> {
    type Output = T;
    fn index(&self, id: Id<T>) -> &T {
        self.get(id)
    }
}

impl<T> IndexMut<Id<T>> for SpannedArena<T> {
    fn index_mut(&mut self, id: Id<T>) -> &mut T {
        self.get_mut(id)
    }
}

pub type DeclId = Id<Decl>;
pub type StmtId = Id<Stmt>;
pub type SimpleStmtId = Id<SimpleStmt>;
pub type ExprId = Id<Expr>;
pub type TypeId = Id<Type>;
pub type FieldId = Id<Field>;
pub type SignatureId = Id<Signature>;
pub type FuncDeclId = Id<FuncDecl>;

// =============================================================================
// Centralized List Storage
// =============================================================================

/// Buffers that every `ListRef<T>` points into.
#[derive(Debug, Default)]
pub struct ExtraData {
    pub ident_names: Vec<IdentName>,
    pub exprs: Vec<ExprId>,
    pub stmts: Vec<StmtId>,
    pub fields: Vec<FieldId>,
    pub specs: Vec<Spec>,
    pub decl_ids: Vec<DeclId>,
    pub top_decls: Vec<TopLevelDecl>,
}

// =============================================================================
// Main AST Arena
// =============================================================================

#[derive(Debug, Default)]
pub struct AstArena {
    pub decls: SpannedArena<Decl>,
    pub stmts: SpannedArena<Stmt>,
    pub simple_stmts: SpannedArena<SimpleStmt>,
    pub exprs: SpannedArena<Expr>,
    pub types: SpannedArena<Type>,
    pub signatures: SpannedArena<Signature>,
    pub funcs: SpannedArena<FuncDecl>,
    pub fields: SpannedArena<Field>,
    pub extras: ExtraData,
}

impl AstArena {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn push_list<T>(buf: &mut Vec<T>, items: impl IntoIterator<Item = T>) -> ListRef<T> {
        let start = buf.len();
        buf.extend(items);
        let len = buf.len() - start;
        debug_assert!(start <= u32::MAX as usize);
        debug_assert!(len <= u32::MAX as usize);
        ListRef::new(start as u32, len as u32)
    }

    #[inline]
    fn slice<T>(buf: &[T], r: ListRef<T>) -> &[T] {
        &buf[r.start() as usize..r.end() as usize]
    }

    // List builders

    pub fn list_ident_names(
        &mut self,
        i: impl IntoIterator<Item = IdentName>,
    ) -> ListRef<IdentName> {
        Self::push_list(&mut self.extras.ident_names, i)
    }

    pub fn list_exprs(&mut self, i: impl IntoIterator<Item = ExprId>) -> ListRef<ExprId> {
        Self::push_list(&mut self.extras.exprs, i)
    }

    pub fn list_stmts(&mut self, i: impl IntoIterator<Item = StmtId>) -> ListRef<StmtId> {
        Self::push_list(&mut self.extras.stmts, i)
    }

    pub fn list_fields(&mut self, i: impl IntoIterator<Item = FieldId>) -> ListRef<FieldId> {
        Self::push_list(&mut self.extras.fields, i)
    }

    pub fn list_specs(&mut self, i: impl IntoIterator<Item = Spec>) -> ListRef<Spec> {
        Self::push_list(&mut self.extras.specs, i)
    }

    pub fn list_decl_ids(&mut self, i: impl IntoIterator<Item = DeclId>) -> ListRef<DeclId> {
        Self::push_list(&mut self.extras.decl_ids, i)
    }

    pub fn list_top_decls(
        &mut self,
        i: impl IntoIterator<Item = TopLevelDecl>,
    ) -> ListRef<TopLevelDecl> {
        Self::push_list(&mut self.extras.top_decls, i)
    }

    // List accessors

    pub fn ident_names(&self, r: ListRef<IdentName>) -> &[IdentName] {
        Self::slice(&self.extras.ident_names, r)
    }

    pub fn exprs_list(&self, r: ListRef<ExprId>) -> &[ExprId] {
        Self::slice(&self.extras.exprs, r)
    }

    pub fn stmts_list(&self, r: ListRef<StmtId>) -> &[StmtId] {
        Self::slice(&self.extras.stmts, r)
    }

    pub fn fields_list(&self, r: ListRef<FieldId>) -> &[FieldId] {
        Self::slice(&self.extras.fields, r)
    }

    pub fn specs_list(&self, r: ListRef<Spec>) -> &[Spec] {
        Self::slice(&self.extras.specs, r)
    }

    pub fn decl_ids(&self, r: ListRef<DeclId>) -> &[DeclId] {
        Self::slice(&self.extras.decl_ids, r)
    }

    pub fn top_decls(&self, r: ListRef<TopLevelDecl>) -> &[TopLevelDecl] {
        Self::slice(&self.extras.top_decls, r)
    }
}

// =============================================================================
// Source File (Root Node)
// =============================================================================

/// ```text
/// SourceFile = PackageClause ";" { ImportDecl ";" } { TopLevelDecl ";" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub struct SourceFile {
    pub package: PackageClause,
    /// `import` declarations, in source order
    pub imports: ListRef<DeclId>,
    pub decls: ListRef<TopLevelDecl>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub struct PackageClause {
    #[walk(skip)]
    pub package_pos: Span,
    pub name: IdentName,
}

// =============================================================================
// Declarations
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub enum TopLevelDecl {
    Decl(DeclId),
    Func(FuncDeclId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub enum Decl {
    Gen(GenDecl),
    Bad(#[walk(skip)] Span),
}

/// `import`, `const`, `type` or `var` declaration, grouped or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub struct GenDecl {
    #[walk(skip)]
    pub kw_pos: Span,
    #[walk(skip)]
    pub kind: GenDeclKind,
    #[walk(skip)]
    pub l_paren: Option<Span>,
    pub specs: ListRef<Spec>,
    #[walk(skip)]
    pub r_paren: Option<Span>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum GenDeclKind {
    Import,
    Const,
    Type,
    Var,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub enum Spec {
    Import(ImportSpec),
    Value(ValueSpec),
    Type(TypeSpec),
}

/// `ImportSpec = [ "." | PackageName ] ImportPath`
#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub struct ImportSpec {
    pub name: Option<ImportName>,
    #[walk(skip)]
    pub path: StringLit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub enum ImportName {
    /// `import . "pkg"`
    Dot(#[walk(skip)] Span),
    /// `import _ "pkg"`
    Blank(#[walk(skip)] Span),
    /// `import name "pkg"`
    Name(IdentName),
}

/// Const or var spec.
///
/// ```text
/// ConstSpec = IdentifierList [ [ Type ] "=" ExpressionList ]
/// VarSpec   = IdentifierList ( Type [ "=" ExpressionList ] | "=" ExpressionList )
/// ```
///
/// A bare const spec continues the previous one: `typ` and `values` are deep
/// copies of the preceding spec's and `inherited` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub struct ValueSpec {
    pub names: ListRef<IdentName>,
    pub typ: Option<TypeId>,
    pub values: ListRef<ExprId>,
    #[walk(skip)]
    pub inherited: bool,
}

/// `TypeSpec = identifier [ "=" ] Type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub struct TypeSpec {
    pub name: IdentName,
    /// Present for aliases (`type A = B`)
    #[walk(skip)]
    pub assign_pos: Option<Span>,
    pub typ: TypeId,
}

impl TypeSpec {
    #[inline]
    pub fn is_alias(&self) -> bool {
        self.assign_pos.is_some()
    }
}

/// ```text
/// FunctionDecl = "func" FunctionName Signature [ FunctionBody ]
/// MethodDecl   = "func" Receiver MethodName Signature [ FunctionBody ]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub struct FuncDecl {
    #[walk(skip)]
    pub func_pos: Span,
    pub recv: Option<FieldList>,
    pub name: IdentName,
    pub signature: SignatureId,
    /// `None` for declarations without a body
    pub body: Option<Block>,
}

// =============================================================================
// Signatures and Fields
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub struct Signature {
    pub params: FieldList,
    pub results: Option<Results>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub enum Results {
    /// `(x int, err error)` or `(int, error)`
    Params(FieldList),
    /// Single unparenthesized result type
    Type(TypeId),
}

/// Parameters, results or struct fields between their delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub struct FieldList {
    #[walk(skip)]
    pub open: Span,
    pub fields: ListRef<FieldId>,
    #[walk(skip)]
    pub close: Span,
}

/// `ParameterDecl = [ IdentifierList ] [ "..." ] Type`, or a struct field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub struct Field {
    /// Empty for unnamed parameters and embedded fields
    pub names: ListRef<IdentName>,
    /// `...` of a variadic parameter
    #[walk(skip)]
    pub ellipsis_pos: Option<Span>,
    pub typ: TypeId,
    /// Struct tag
    #[walk(skip)]
    pub tag: Option<StringLit>,
    #[walk(skip)]
    pub is_embed: bool,
}

// =============================================================================
// Statements
// =============================================================================

/// `SimpleStmt = EmptyStmt | ExpressionStmt | SendStmt | IncDecStmt | Assignment | ShortVarDecl`
#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub enum SimpleStmt {
    Empty(#[walk(skip)] Span),
    Expr(ExprId),

    /// `ch <- v`
    Send {
        chan: ExprId,
        #[walk(skip)]
        op_pos: Span,
        value: ExprId,
    },

    IncDec {
        expr: ExprId,
        #[walk(skip)]
        op: IncDecOp,
        #[walk(skip)]
        op_pos: Span,
    },

    Assign {
        lhs: ListRef<ExprId>,
        #[walk(skip)]
        op: AssignOp,
        #[walk(skip)]
        op_pos: Span,
        rhs: ListRef<ExprId>,
    },

    ShortVarDecl {
        names: ListRef<IdentName>,
        #[walk(skip)]
        op_pos: Span,
        values: ListRef<ExprId>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub enum Stmt {
    Simple(SimpleStmtId),
    Decl(DeclId),

    Labeled {
        label: IdentName,
        #[walk(skip)]
        colon_pos: Span,
        stmt: StmtId,
    },

    /// Operand is always a call expression.
    Go {
        #[walk(skip)]
        go_pos: Span,
        call: ExprId,
    },

    /// Operand is always a call expression.
    Defer {
        #[walk(skip)]
        defer_pos: Span,
        call: ExprId,
    },

    Return {
        #[walk(skip)]
        return_pos: Span,
        results: ListRef<ExprId>,
    },

    Branch(BranchStmt),

    Block(Block),

    If {
        #[walk(skip)]
        if_pos: Span,
        init: Option<SimpleStmtId>,
        cond: ExprId,
        then_block: Block,
        /// Either another `If` or a `Block`
        else_stmt: Option<StmtId>,
    },

    For {
        #[walk(skip)]
        for_pos: Span,
        kind: ForKind,
        body: Block,
    },

    Bad(#[walk(skip)] Span),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub enum ForKind {
    /// `for { }`
    Infinite,

    /// `for cond { }`
    Cond(ExprId),

    /// `for init; cond; post { }`
    Clause {
        init: Option<SimpleStmtId>,
        cond: Option<ExprId>,
        post: Option<SimpleStmtId>,
    },

    /// `for k, v := range x { }`
    Range {
        key: Option<ExprId>,
        value: Option<ExprId>,
        #[walk(skip)]
        define: bool,
        expr: ExprId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub struct BranchStmt {
    #[walk(skip)]
    pub kind: BranchKind,
    #[walk(skip)]
    pub pos: Span,
    pub label: Option<IdentName>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    Break,
    Continue,
    Goto,
    Fallthrough,
}

impl BranchKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            BranchKind::Break => "break",
            BranchKind::Continue => "continue",
            BranchKind::Goto => "goto",
            BranchKind::Fallthrough => "fallthrough",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub struct Block {
    #[walk(skip)]
    pub l_brace: Span,
    pub stmts: ListRef<StmtId>,
    #[walk(skip)]
    pub r_brace: Span,
}

// =============================================================================
// Expressions
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, WalkAst)]
pub enum Expr {
    Ident(IdentName),

    BasicLit(#[walk(skip)] BasicLit),

    FuncLit {
        #[walk(skip)]
        func_pos: Span,
        sig: SignatureId,
        body: Block,
    },

    Paren {
        #[walk(skip)]
        l_paren: Span,
        expr: ExprId,
        #[walk(skip)]
        r_paren: Span,
    },

    Selector {
        expr: ExprId,
        #[walk(skip)]
        dot_pos: Span,
        sel: IdentName,
    },

    Index {
        expr: ExprId,
        #[walk(skip)]
        l_brack: Span,
        index: ExprId,
        #[walk(skip)]
        r_brack: Span,
    },

    Slice {
        expr: ExprId,
        #[walk(skip)]
        l_brack: Span,
        lo: Option<ExprId>,
        hi: Option<ExprId>,
        max: Option<ExprId>,
        #[walk(skip)]
        r_brack: Span,
    },

    /// `x.(T)`
    TypeAssert {
        expr: ExprId,
        #[walk(skip)]
        dot_pos: Span,
        typ: TypeId,
    },

    /// Calls and conversions; they are indistinguishable without types.
    Call {
        callee: ExprId,
        #[walk(skip)]
        l_paren: Span,
        args: ListRef<ExprId>,
        /// `f(xs...)`
        #[walk(skip)]
        ellipsis: Option<Span>,
        #[walk(skip)]
        r_paren: Span,
    },

    Unary {
        #[walk(skip)]
        op: UnaryOp,
        #[walk(skip)]
        op_pos: Span,
        expr: ExprId,
    },

    Binary {
        left: ExprId,
        #[walk(skip)]
        op: BinaryOp,
        #[walk(skip)]
        op_pos: Span,
        right: ExprId,
    },

    /// A type in operand position: `[]int` in `make([]int, n)`, `[]byte(s)`.
    Type(TypeId),

    Bad(#[walk(skip)] Span),
}

/// Literal spelling (interned) and its decoded payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicLit {
    pub raw: Symbol,
    pub value: LitValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LitValue {
    Int(IntLit),
    Float(FloatLit),
    Imag(Number),
    Rune,
    String,
}

/// String literal with delimiters, as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringLit {
    pub raw: Symbol,
    pub pos: Span,
}

// =============================================================================
// Types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub enum Type {
    /// `T` or `pkg.T`
    Named {
        pkg: Option<IdentName>,
        name: IdentName,
    },

    Pointer {
        #[walk(skip)]
        star_pos: Span,
        elem: TypeId,
    },

    /// `[N]T`; `len` is `None` for `[...]T`
    Array {
        #[walk(skip)]
        l_brack: Span,
        len: Option<ExprId>,
        elem: TypeId,
    },

    Slice {
        #[walk(skip)]
        l_brack: Span,
        elem: TypeId,
    },

    Map {
        #[walk(skip)]
        map_pos: Span,
        key: TypeId,
        value: TypeId,
    },

    Chan {
        #[walk(skip)]
        chan_pos: Span,
        #[walk(skip)]
        dir: ChanDir,
        elem: TypeId,
    },

    Func {
        #[walk(skip)]
        func_pos: Span,
        sig: SignatureId,
    },

    Struct {
        #[walk(skip)]
        struct_pos: Span,
        fields: FieldList,
    },

    Paren {
        #[walk(skip)]
        l_paren: Span,
        typ: TypeId,
        #[walk(skip)]
        r_paren: Span,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    /// `chan T`
    Both,
    /// `chan<- T`
    Send,
    /// `<-chan T`
    Recv,
}

// =============================================================================
// Operators
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Pos,
    Neg,
    Not,
    Xor,
    Deref,
    Addr,
    Recv,
}

impl UnaryOp {
    pub fn from_punct(p: Punct) -> Option<Self> {
        Some(match p {
            Punct::Plus => UnaryOp::Pos,
            Punct::Minus => UnaryOp::Neg,
            Punct::Bang => UnaryOp::Not,
            Punct::Caret => UnaryOp::Xor,
            Punct::Star => UnaryOp::Deref,
            Punct::Amp => UnaryOp::Addr,
            Punct::Arrow => UnaryOp::Recv,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Pos => "+",
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
            UnaryOp::Xor => "^",
            UnaryOp::Deref => "*",
            UnaryOp::Addr => "&",
            UnaryOp::Recv => "<-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    LOr,
    LAnd,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Or,
    Xor,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    And,
    AndNot,
}

impl BinaryOp {
    pub fn from_punct(p: Punct) -> Option<Self> {
        Some(match p {
            Punct::LOr => BinaryOp::LOr,
            Punct::LAnd => BinaryOp::LAnd,
            Punct::EqEq => BinaryOp::Eq,
            Punct::NotEq => BinaryOp::Ne,
            Punct::Lt => BinaryOp::Lt,
            Punct::Le => BinaryOp::Le,
            Punct::Gt => BinaryOp::Gt,
            Punct::Ge => BinaryOp::Ge,
            Punct::Plus => BinaryOp::Add,
            Punct::Minus => BinaryOp::Sub,
            Punct::Pipe => BinaryOp::Or,
            Punct::Caret => BinaryOp::Xor,
            Punct::Star => BinaryOp::Mul,
            Punct::Slash => BinaryOp::Div,
            Punct::Percent => BinaryOp::Rem,
            Punct::Shl => BinaryOp::Shl,
            Punct::Shr => BinaryOp::Shr,
            Punct::Amp => BinaryOp::And,
            Punct::AndNot => BinaryOp::AndNot,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            BinaryOp::LOr => "||",
            BinaryOp::LAnd => "&&",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Or => "|",
            BinaryOp::Xor => "^",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::And => "&",
            BinaryOp::AndNot => "&^",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    AndNot,
}

impl AssignOp {
    pub fn from_punct(p: Punct) -> Option<Self> {
        Some(match p {
            Punct::Assign => AssignOp::Assign,
            Punct::AddAssign => AssignOp::Add,
            Punct::SubAssign => AssignOp::Sub,
            Punct::MulAssign => AssignOp::Mul,
            Punct::DivAssign => AssignOp::Div,
            Punct::ModAssign => AssignOp::Rem,
            Punct::AndAssign => AssignOp::And,
            Punct::OrAssign => AssignOp::Or,
            Punct::XorAssign => AssignOp::Xor,
            Punct::ShlAssign => AssignOp::Shl,
            Punct::ShrAssign => AssignOp::Shr,
            Punct::AndNotAssign => AssignOp::AndNot,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::Add => "+=",
            AssignOp::Sub => "-=",
            AssignOp::Mul => "*=",
            AssignOp::Div => "/=",
            AssignOp::Rem => "%=",
            AssignOp::And => "&=",
            AssignOp::Or => "|=",
            AssignOp::Xor => "^=",
            AssignOp::Shl => "<<=",
            AssignOp::Shr => ">>=",
            AssignOp::AndNot => "&^=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncDecOp {
    Inc,
    Dec,
}

impl IncDecOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            IncDecOp::Inc => "++",
            IncDecOp::Dec => "--",
        }
    }
}

// =============================================================================
// Deep copies (const/var spec continuation)
// =============================================================================

impl AstArena {
    /// Copies the list element-wise through `f`, then stores the copies as a
    /// new list.
    fn copy_list<T: Copy>(
        &mut self,
        items: &[T],
        mut f: impl FnMut(&mut Self, T) -> T,
    ) -> Vec<T> {
        let mut out = Vec::with_capacity(items.len());
        for &item in items {
            out.push(f(self, item));
        }
        out
    }

    pub fn deep_copy_exprs(&mut self, r: ListRef<ExprId>) -> ListRef<ExprId> {
        let items = self.exprs_list(r).to_vec();
        let copied = self.copy_list(&items, Self::deep_copy_expr);
        self.list_exprs(copied)
    }

    fn copy_opt_expr(&mut self, id: Option<ExprId>) -> Option<ExprId> {
        id.map(|e| self.deep_copy_expr(e))
    }

    /// Clones the expression subtree rooted at `id` into fresh nodes.
    pub fn deep_copy_expr(&mut self, id: ExprId) -> ExprId {
        let span = self.exprs.span(id);
        let node = match self.exprs[id].clone() {
            e @ (Expr::Ident(_) | Expr::BasicLit(_) | Expr::Bad(_)) => e,
            Expr::FuncLit {
                func_pos,
                sig,
                body,
            } => Expr::FuncLit {
                func_pos,
                sig: self.deep_copy_signature(sig),
                body: self.deep_copy_block(body),
            },
            Expr::Paren {
                l_paren,
                expr,
                r_paren,
            } => Expr::Paren {
                l_paren,
                expr: self.deep_copy_expr(expr),
                r_paren,
            },
            Expr::Selector { expr, dot_pos, sel } => Expr::Selector {
                expr: self.deep_copy_expr(expr),
                dot_pos,
                sel,
            },
            Expr::Index {
                expr,
                l_brack,
                index,
                r_brack,
            } => Expr::Index {
                expr: self.deep_copy_expr(expr),
                l_brack,
                index: self.deep_copy_expr(index),
                r_brack,
            },
            Expr::Slice {
                expr,
                l_brack,
                lo,
                hi,
                max,
                r_brack,
            } => Expr::Slice {
                expr: self.deep_copy_expr(expr),
                l_brack,
                lo: self.copy_opt_expr(lo),
                hi: self.copy_opt_expr(hi),
                max: self.copy_opt_expr(max),
                r_brack,
            },
            Expr::TypeAssert { expr, dot_pos, typ } => Expr::TypeAssert {
                expr: self.deep_copy_expr(expr),
                dot_pos,
                typ: self.deep_copy_type(typ),
            },
            Expr::Call {
                callee,
                l_paren,
                args,
                ellipsis,
                r_paren,
            } => Expr::Call {
                callee: self.deep_copy_expr(callee),
                l_paren,
                args: self.deep_copy_exprs(args),
                ellipsis,
                r_paren,
            },
            Expr::Unary { op, op_pos, expr } => Expr::Unary {
                op,
                op_pos,
                expr: self.deep_copy_expr(expr),
            },
            Expr::Binary {
                left,
                op,
                op_pos,
                right,
            } => Expr::Binary {
                left: self.deep_copy_expr(left),
                op,
                op_pos,
                right: self.deep_copy_expr(right),
            },
            Expr::Type(t) => Expr::Type(self.deep_copy_type(t)),
        };
        self.exprs.alloc(node, span)
    }

    pub fn deep_copy_type(&mut self, id: TypeId) -> TypeId {
        let span = self.types.span(id);
        let node = match self.types[id] {
            t @ Type::Named { .. } => t,
            Type::Pointer { star_pos, elem } => Type::Pointer {
                star_pos,
                elem: self.deep_copy_type(elem),
            },
            Type::Array { l_brack, len, elem } => Type::Array {
                l_brack,
                len: self.copy_opt_expr(len),
                elem: self.deep_copy_type(elem),
            },
            Type::Slice { l_brack, elem } => Type::Slice {
                l_brack,
                elem: self.deep_copy_type(elem),
            },
            Type::Map {
                map_pos,
                key,
                value,
            } => Type::Map {
                map_pos,
                key: self.deep_copy_type(key),
                value: self.deep_copy_type(value),
            },
            Type::Chan {
                chan_pos,
                dir,
                elem,
            } => Type::Chan {
                chan_pos,
                dir,
                elem: self.deep_copy_type(elem),
            },
            Type::Func { func_pos, sig } => Type::Func {
                func_pos,
                sig: self.deep_copy_signature(sig),
            },
            Type::Struct { struct_pos, fields } => Type::Struct {
                struct_pos,
                fields: self.deep_copy_field_list(fields),
            },
            Type::Paren {
                l_paren,
                typ,
                r_paren,
            } => Type::Paren {
                l_paren,
                typ: self.deep_copy_type(typ),
                r_paren,
            },
        };
        self.types.alloc(node, span)
    }

    fn deep_copy_field_list(&mut self, list: FieldList) -> FieldList {
        let items = self.fields_list(list.fields).to_vec();
        let copied = self.copy_list(&items, |a, id| {
            let span = a.fields.span(id);
            let mut field = a.fields[id];
            field.names = a.list_ident_names(a.ident_names(field.names).to_vec());
            field.typ = a.deep_copy_type(field.typ);
            a.fields.alloc(field, span)
        });
        FieldList {
            fields: self.list_fields(copied),
            ..list
        }
    }

    fn deep_copy_signature(&mut self, id: SignatureId) -> SignatureId {
        let span = self.signatures.span(id);
        let sig = self.signatures[id];
        let params = self.deep_copy_field_list(sig.params);
        let results = match sig.results {
            None => None,
            Some(Results::Params(list)) => Some(Results::Params(self.deep_copy_field_list(list))),
            Some(Results::Type(t)) => Some(Results::Type(self.deep_copy_type(t))),
        };
        self.signatures.alloc(Signature { params, results }, span)
    }

    fn deep_copy_block(&mut self, block: Block) -> Block {
        let items = self.stmts_list(block.stmts).to_vec();
        let copied = self.copy_list(&items, Self::deep_copy_stmt);
        Block {
            stmts: self.list_stmts(copied),
            ..block
        }
    }

    fn deep_copy_simple(&mut self, id: SimpleStmtId) -> SimpleStmtId {
        let span = self.simple_stmts.span(id);
        let node = match self.simple_stmts[id] {
            s @ SimpleStmt::Empty(_) => s,
            SimpleStmt::Expr(e) => SimpleStmt::Expr(self.deep_copy_expr(e)),
            SimpleStmt::Send {
                chan,
                op_pos,
                value,
            } => SimpleStmt::Send {
                chan: self.deep_copy_expr(chan),
                op_pos,
                value: self.deep_copy_expr(value),
            },
            SimpleStmt::IncDec { expr, op, op_pos } => SimpleStmt::IncDec {
                expr: self.deep_copy_expr(expr),
                op,
                op_pos,
            },
            SimpleStmt::Assign {
                lhs,
                op,
                op_pos,
                rhs,
            } => SimpleStmt::Assign {
                lhs: self.deep_copy_exprs(lhs),
                op,
                op_pos,
                rhs: self.deep_copy_exprs(rhs),
            },
            SimpleStmt::ShortVarDecl {
                names,
                op_pos,
                values,
            } => SimpleStmt::ShortVarDecl {
                names: self.list_ident_names(self.ident_names(names).to_vec()),
                op_pos,
                values: self.deep_copy_exprs(values),
            },
        };
        self.simple_stmts.alloc(node, span)
    }

    fn deep_copy_stmt(&mut self, id: StmtId) -> StmtId {
        let span = self.stmts.span(id);
        let node = match self.stmts[id] {
            s @ (Stmt::Branch(_) | Stmt::Bad(_)) => s,
            Stmt::Simple(s) => Stmt::Simple(self.deep_copy_simple(s)),
            Stmt::Decl(d) => Stmt::Decl(self.deep_copy_decl(d)),
            Stmt::Labeled {
                label,
                colon_pos,
                stmt,
            } => Stmt::Labeled {
                label,
                colon_pos,
                stmt: self.deep_copy_stmt(stmt),
            },
            Stmt::Go { go_pos, call } => Stmt::Go {
                go_pos,
                call: self.deep_copy_expr(call),
            },
            Stmt::Defer { defer_pos, call } => Stmt::Defer {
                defer_pos,
                call: self.deep_copy_expr(call),
            },
            Stmt::Return {
                return_pos,
                results,
            } => Stmt::Return {
                return_pos,
                results: self.deep_copy_exprs(results),
            },
            Stmt::Block(b) => Stmt::Block(self.deep_copy_block(b)),
            Stmt::If {
                if_pos,
                init,
                cond,
                then_block,
                else_stmt,
            } => Stmt::If {
                if_pos,
                init: init.map(|s| self.deep_copy_simple(s)),
                cond: self.deep_copy_expr(cond),
                then_block: self.deep_copy_block(then_block),
                else_stmt: else_stmt.map(|s| self.deep_copy_stmt(s)),
            },
            Stmt::For {
                for_pos,
                kind,
                body,
            } => {
                let kind = match kind {
                    ForKind::Infinite => ForKind::Infinite,
                    ForKind::Cond(c) => ForKind::Cond(self.deep_copy_expr(c)),
                    ForKind::Clause { init, cond, post } => ForKind::Clause {
                        init: init.map(|s| self.deep_copy_simple(s)),
                        cond: self.copy_opt_expr(cond),
                        post: post.map(|s| self.deep_copy_simple(s)),
                    },
                    ForKind::Range {
                        key,
                        value,
                        define,
                        expr,
                    } => ForKind::Range {
                        key: self.copy_opt_expr(key),
                        value: self.copy_opt_expr(value),
                        define,
                        expr: self.deep_copy_expr(expr),
                    },
                };
                Stmt::For {
                    for_pos,
                    kind,
                    body: self.deep_copy_block(body),
                }
            }
        };
        self.stmts.alloc(node, span)
    }

    fn deep_copy_decl(&mut self, id: DeclId) -> DeclId {
        let span = self.decls.span(id);
        let node = match self.decls[id] {
            d @ Decl::Bad(_) => d,
            Decl::Gen(gen_decl) => {
                let specs = self.specs_list(gen_decl.specs).to_vec();
                let copied = self.copy_list(&specs, |a, spec| match spec {
                    Spec::Import(_) => spec,
                    Spec::Value(v) => Spec::Value(ValueSpec {
                        names: a.list_ident_names(a.ident_names(v.names).to_vec()),
                        typ: v.typ.map(|t| a.deep_copy_type(t)),
                        values: a.deep_copy_exprs(v.values),
                        inherited: v.inherited,
                    }),
                    Spec::Type(t) => Spec::Type(TypeSpec {
                        typ: a.deep_copy_type(t.typ),
                        ..t
                    }),
                });
                Decl::Gen(GenDecl {
                    specs: self.list_specs(copied),
                    ..gen_decl
                })
            }
        };
        self.decls.alloc(node, span)
    }
}
