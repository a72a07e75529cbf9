use logos::Logos;

/// The raw token patterns, derived with `logos`.
///
/// This enum is private: it only exists to drive the generated state
/// machine. The public surface is [`TokenKind`], which adds the `Eof` and
/// `Illegal` kinds the derive has no pattern for.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(extras = LexerExtras)]
#[logos(skip r"[ \t\u{00a0}]+")]
enum RawToken {
    /// Newlines bump the line counter and are otherwise treated as
    /// whitespace.
    #[token("\n", newline)]
    Newline,

    /// `let`
    #[token("let")]
    Let,
    /// `fn`
    #[token("fn")]
    Function,
    /// `true`
    #[token("true")]
    True,
    /// `false`
    #[token("false")]
    False,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `return`
    #[token("return")]
    Return,

    /// Identifier tokens: maximal letter/underscore runs. Digits are not
    /// part of identifiers in this language.
    #[regex(r"[a-zA-Z_]+")]
    Ident,
    /// Integer literal tokens: maximal digit runs.
    #[regex(r"[0-9]+")]
    Int,
    /// String literal tokens, `"`-delimited with no escape processing.
    #[regex(r#""[^"]*""#, string_literal)]
    Str,
    /// A string literal that reaches the end of input before its closing
    /// quote. Lexing never fails; the failure is encoded in the token.
    #[regex(r#""[^"]*"#, string_literal)]
    Unterminated,

    /// `==`
    #[token("==")]
    Eq,
    /// `=`
    #[token("=")]
    Assign,
    /// `!=`
    #[token("!=")]
    NotEq,
    /// `!`
    #[token("!")]
    Bang,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Asterisk,
    /// `/`
    #[token("/")]
    Slash,
    /// `<`
    #[token("<")]
    Lt,
    /// `>`
    #[token(">")]
    Gt,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for diagnostics, and the line a string
/// literal started on (a string may span several lines, and its token
/// should report the line of the opening quote).
pub struct LexerExtras {
    /// The current line number in the source being tokenized, 1-based.
    pub line:   usize,
    start_line: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line:       1,
               start_line: 1, }
    }
}

/// Skips a newline while counting it.
fn newline(lex: &mut logos::Lexer<RawToken>) -> logos::Skip {
    lex.extras.line += 1;
    logos::Skip
}

/// Records the line a string literal opens on and counts the newlines it
/// spans.
fn string_literal(lex: &mut logos::Lexer<RawToken>) {
    lex.extras.start_line = lex.extras.line;
    lex.extras.line += lex.slice().matches('\n').count();
}

/// The closed set of token kinds produced by the lexer.
///
/// Unlike the derived raw patterns, this enum also covers the two kinds no
/// source pattern produces directly: `Eof`, appended once when the stream
/// is exhausted, and `Illegal`, which encodes lexical failure (an
/// unterminated string or a character no rule accepts) instead of raising
/// an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// End of input. Every token array ends with exactly one.
    Eof,
    /// Input no lexical rule accepts.
    Illegal,
    /// `let`
    Let,
    /// A name.
    Ident,
    /// An integer literal.
    Int,
    /// A string literal.
    Str,
    /// `=`
    Assign,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `!`
    Bang,
    /// `*`
    Asterisk,
    /// `/`
    Slash,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `true`
    True,
    /// `false`
    False,
    /// `if`
    If,
    /// `else`
    Else,
    /// `fn`
    Function,
    /// `return`
    Return,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Eof => "end of file",
            Self::Illegal => "illegal token",
            Self::Let => "'let'",
            Self::Ident => "an identifier",
            Self::Int => "an integer",
            Self::Str => "a string",
            Self::Assign => "'='",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Bang => "'!'",
            Self::Asterisk => "'*'",
            Self::Slash => "'/'",
            Self::Lt => "'<'",
            Self::Gt => "'>'",
            Self::Eq => "'=='",
            Self::NotEq => "'!='",
            Self::Comma => "','",
            Self::Semicolon => "';'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::True => "'true'",
            Self::False => "'false'",
            Self::If => "'if'",
            Self::Else => "'else'",
            Self::Function => "'fn'",
            Self::Return => "'return'",
        };
        write!(f, "{name}")
    }
}

/// A minimal but meaningful unit of source text.
///
/// A token pairs its [`TokenKind`] with the literal text it was read from
/// and the 1-based source line it started on. For string literals the
/// literal is the text between the quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What kind of token this is.
    pub kind:    TokenKind,
    /// The literal text of the token.
    pub literal: String,
    /// The 1-based source line the token started on.
    pub line:    usize,
}

impl Token {
    /// Creates a token from its parts.
    #[must_use]
    pub fn new(kind: TokenKind, literal: impl Into<String>, line: usize) -> Self {
        Self { kind,
               literal: literal.into(),
               line }
    }
}

/// Converts source text into a finite, re-readable token array.
///
/// The lexer never fails: malformed input becomes an `Illegal` token and
/// tokenization continues. [`Lexer::lexing`] exhausts the source into the
/// internal token array (terminated by one `Eof` token), which the parser
/// then consumes by index. [`Lexer::lexing_observed`] does the same while
/// notifying an observer of every produced token together with its byte
/// span, which is the hook the editing surface uses for live highlighting.
///
/// # Example
/// ```
/// use ember::interpreter::lexer::{Lexer, TokenKind};
///
/// let mut lexer = Lexer::new("let x = 5;");
/// let kinds = lexer.lexing()
///                  .iter()
///                  .map(|token| token.kind)
///                  .collect::<Vec<_>>();
///
/// assert_eq!(kinds,
///            vec![TokenKind::Let,
///                 TokenKind::Ident,
///                 TokenKind::Assign,
///                 TokenKind::Int,
///                 TokenKind::Semicolon,
///                 TokenKind::Eof]);
/// ```
pub struct Lexer {
    source: String,
    tokens: Vec<Token>,
}

impl Lexer {
    /// Creates a lexer over the given source text.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self { source: source.into(),
               tokens: Vec::new(), }
    }

    /// Tokenizes the whole source into the internal token array.
    ///
    /// The array always ends with exactly one `Eof` token. Calling
    /// `lexing` again re-tokenizes from the start, so the array is
    /// re-readable.
    pub fn lexing(&mut self) -> &[Token] {
        self.lexing_observed(|_, _, _| {})
    }

    /// Tokenizes the whole source, notifying `observer` once per token.
    ///
    /// The observer receives each token together with the byte offsets of
    /// its span in the source, synchronously and in order. It cannot
    /// affect lexer state; any context it needs lives in its own captured
    /// environment.
    ///
    /// # Parameters
    /// - `observer`: Callback invoked as `(token, start, end)` per token,
    ///   including the final `Eof`.
    ///
    /// # Returns
    /// The completed token array.
    pub fn lexing_observed<F>(&mut self, mut observer: F) -> &[Token]
        where F: FnMut(&Token, usize, usize)
    {
        self.tokens.clear();

        let mut lexer = RawToken::lexer(&self.source);
        while let Some(result) = lexer.next() {
            let span = lexer.span();
            let token = match result {
                Ok(raw) => raw_token(raw, lexer.slice(), &lexer.extras),
                // Input no rule accepts, e.g. a stray '@'.
                Err(()) => {
                    Token::new(TokenKind::Illegal, lexer.slice(), lexer.extras.line)
                },
            };
            observer(&token, span.start, span.end);
            self.tokens.push(token);
        }

        let eof = Token::new(TokenKind::Eof, "", lexer.extras.line);
        observer(&eof, self.source.len(), self.source.len());
        self.tokens.push(eof);

        &self.tokens
    }

    /// The token array produced by the last call to [`Lexer::lexing`],
    /// empty if lexing has not run yet.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

/// Builds the public token for a raw match.
fn raw_token(raw: RawToken, slice: &str, extras: &LexerExtras) -> Token {
    let kind = match raw {
        RawToken::Let => TokenKind::Let,
        RawToken::Function => TokenKind::Function,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::Return => TokenKind::Return,
        RawToken::Ident => TokenKind::Ident,
        RawToken::Int => TokenKind::Int,
        RawToken::Str => TokenKind::Str,
        RawToken::Unterminated => TokenKind::Illegal,
        RawToken::Eq => TokenKind::Eq,
        RawToken::Assign => TokenKind::Assign,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Asterisk => TokenKind::Asterisk,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::Newline => unreachable!("newlines are skipped during lexing"),
    };

    match raw {
        // The literal of a string token is the text between the quotes;
        // its line is the line of the opening quote.
        RawToken::Str => {
            Token::new(kind, &slice[1..slice.len() - 1], extras.start_line)
        },
        RawToken::Unterminated => Token::new(kind, slice, extras.start_line),
        _ => Token::new(kind, slice, extras.line),
    }
}
