use super::error::{CalcError, CalcResult};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(String),
    Ident(String),
    Op(&'static str),
    LParen,
    RParen,
    /// Bracketed vector text with whitespace removed, e.g. `[1,2.5,3]`.
    Vector(String),
}

/// Splits infix text into tokens. Characters outside the grammar are
/// rejected here rather than passed through.
pub fn tokenize(input: &str) -> CalcResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                tokens.push(Token::LParen);
                chars.next();
            }
            ')' => {
                tokens.push(Token::RParen);
                chars.next();
            }
            '/' => {
                chars.next();
                if chars.peek() == Some(&'/') {
                    chars.next();
                    tokens.push(Token::Op("//"));
                } else {
                    tokens.push(Token::Op("/"));
                }
            }
            '+' | '-' | '*' | '^' | '%' => {
                tokens.push(Token::Op(match c {
                    '+' => "+",
                    '-' => "-",
                    '*' => "*",
                    '^' => "^",
                    _ => "%",
                }));
                chars.next();
            }
            '0'..='9' => {
                let mut num_str = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch.is_ascii_digit() {
                        num_str.push(ch);
                        chars.next();
                    } else {
                        break;
                    }
                }
                // A fraction needs digits on both sides of the dot.
                let mut lookahead = chars.clone();
                if lookahead.next() == Some('.')
                    && lookahead.peek().is_some_and(|d| d.is_ascii_digit())
                {
                    chars.next();
                    num_str.push('.');
                    while let Some(&ch) = chars.peek() {
                        if ch.is_ascii_digit() {
                            num_str.push(ch);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                }
                tokens.push(Token::Number(num_str));
            }
            'a'..='z' | 'A'..='Z' | '_' => {
                let mut ident = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch.is_ascii_alphanumeric() || ch == '_' {
                        ident.push(ch);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(ident));
            }
            '[' => {
                let mut text = String::new();
                let mut closed = false;
                for ch in chars.by_ref() {
                    if ch.is_whitespace() {
                        continue;
                    }
                    text.push(ch);
                    if ch == ']' {
                        closed = true;
                        break;
                    }
                }
                if !closed {
                    return Err(CalcError::syntax(format!(
                        "unterminated vector literal '{}'",
                        text
                    )));
                }
                tokens.push(Token::Vector(text));
            }
            _ => return Err(CalcError::syntax(format!("unknown character '{}'", c))),
        }
    }
    Ok(tokens)
}
