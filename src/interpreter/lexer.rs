use logos::Logos;

use crate::{error::ParseError, interpreter::parser::core::ParseResult};

/// Represents a lexical token in the source input.
///
/// Tokens are tagged once, here, so the parser never has to re-classify a
/// lexeme. Whitespace, newlines and `//` comments are skipped; the line
/// counter in [`LexerExtras`] keeps advancing over them.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Numeric literal tokens, such as `42`, `3.14` or `.5`.
    #[regex(r"[0-9]+(\.[0-9]+)?", parse_number)]
    #[regex(r"\.[0-9]+", parse_number)]
    Number(f64),
    /// String literal tokens; holds the text between the quotes.
    #[regex(r#""[^"]*""#, parse_text)]
    Text(String),
    /// Boolean literal tokens, `true` or `false`.
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Boolean(bool),
    /// `fn`
    #[token("fn")]
    Fn,
    /// `num`
    #[token("num")]
    Num,
    /// `str`
    #[token("str")]
    Str,
    /// `arr`
    #[token("arr")]
    Arr,
    /// `bool`
    #[token("bool")]
    Bool,
    /// `lada`, which opens a conditional chain.
    #[token("lada")]
    Lada,
    /// `badlada`, an else-if arm.
    #[token("badlada")]
    Badlada,
    /// `hynrei`, the final else arm.
    #[token("hynrei")]
    Hynrei,
    /// `naduh`, which opens a counting loop.
    #[token("naduh")]
    Naduh,
    /// `haduh`, separating the loop bounds.
    #[token("haduh")]
    Haduh,
    /// `da`, introducing the loop variable.
    #[token("da")]
    Da,
    /// `while`, reserved.
    #[token("while")]
    While,
    /// Identifier tokens; variable or function names such as `x` or `fib`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip)]
    Comment,
    /// `=>`
    #[token("=>")]
    Arrow,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `=`
    #[token("=")]
    Equals,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `:`, the wrapper around every body.
    #[token(":")]
    Colon,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// Newlines only advance the line counter.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Parses a numeric literal from the current token slice.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Strips the quotes off a string literal. Strings may span lines, so the
/// line counter is advanced past any newline inside.
fn parse_text(lex: &mut logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    let text = slice[1..slice.len() - 1].to_string();
    lex.extras.line += text.matches('\n').count();
    text
}

/// Splits source text into `(Token, line)` pairs.
///
/// Lines are 1-based. Empty or whitespace-only input yields an empty vector.
///
/// # Errors
/// Any text that does not form a token (for example `#`, `!` or an
/// unterminated string) is reported as [`ParseError::UnexpectedToken`] rather
/// than dropped.
///
/// # Example
/// ```
/// use kpl::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("num x = 5").unwrap();
/// let kinds: Vec<Token> = tokens.into_iter().map(|(token, _)| token).collect();
///
/// assert_eq!(kinds,
///            vec![Token::Num,
///                 Token::Identifier("x".to_string()),
///                 Token::Equals,
///                 Token::Number(5.0)]);
///
/// assert!(tokenize("  \n\t ").unwrap().is_empty());
/// assert!(tokenize("num x = 5 # 2").is_err());
/// ```
pub fn tokenize(source: &str) -> ParseResult<Vec<(Token, usize)>> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        if let Ok(tok) = token {
            tokens.push((tok, lexer.extras.line));
        } else {
            return Err(ParseError::UnexpectedToken { token: lexer.slice().to_string(),
                                                     line:  lexer.extras.line, });
        }
    }

    Ok(tokens)
}
