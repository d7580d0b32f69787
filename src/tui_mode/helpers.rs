use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use rpncalc::calc_engine::operators::{constant, is_reserved_word};
use rpncalc::calc_engine::Value;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Greedy word wrap by display width; words wider than a line are split on
/// grapheme boundaries.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if word.width() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let mut chunk = String::new();
            for g in word.graphemes(true) {
                if chunk.width() + g.width() > width {
                    lines.push(std::mem::take(&mut chunk));
                }
                chunk.push_str(g);
            }
            current = chunk;
            continue;
        }

        let needed = if current.is_empty() {
            word.width()
        } else {
            current.width() + 1 + word.width()
        };
        if needed > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

pub fn format_number(x: f64) -> String {
    if x.abs() > 1e10 || (x.abs() < 1e-5 && x != 0.0) {
        format!("{:.6e}", x)
    } else {
        let s = format!("{:.6}", x);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

pub fn format_value(value: &Value) -> String {
    match value {
        Value::Scalar(_) if value.as_integer().is_some() => value.to_string(),
        Value::Scalar(x) => format_number(*x),
        Value::Vector(v) => {
            let parts: Vec<String> = v.iter().map(|x| format_number(*x)).collect();
            format!("[{}]", parts.join(", "))
        }
    }
}

/// Puts single spaces around operators and parentheses for display. Bracketed
/// vector text is kept intact.
pub fn format_with_spaces(expr: &str) -> String {
    let mut result = String::new();
    let mut chars = expr.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '[' => {
                result.push(' ');
                result.push(c);
                for ch in chars.by_ref() {
                    if !ch.is_whitespace() {
                        result.push(ch);
                    }
                    if ch == ']' {
                        break;
                    }
                }
                result.push(' ');
            }
            '/' if chars.peek() == Some(&'/') => {
                chars.next();
                result.push_str(" // ");
            }
            '+' | '-' | '*' | '/' | '^' | '%' | '(' | ')' | '=' => {
                result.push(' ');
                result.push(c);
                result.push(' ');
            }
            _ => result.push(c),
        }
    }

    result.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn is_known_word(word: &str) -> bool {
    is_reserved_word(word) || constant(word).is_some()
}

/// Splits a display line into styled spans: words from the operator table,
/// numbers, operator symbols and everything else.
pub fn highlight_tokens(expr: &str, base_style: Style) -> Vec<Span<'static>> {
    let function_style = Style::default()
        .fg(Color::LightBlue)
        .add_modifier(Modifier::BOLD);
    let operator_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let number_style = Style::default().fg(Color::LightGreen);

    let mut spans = Vec::new();
    for (i, word) in expr.split(' ').enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let style = if is_known_word(word) && word.chars().all(|c| c.is_ascii_alphabetic()) {
            function_style
        } else if word.parse::<f64>().is_ok() || word.starts_with('[') {
            number_style
        } else if !word.is_empty() && word.chars().all(|c| "+-*/^%()=".contains(c)) {
            operator_style
        } else {
            base_style
        };
        spans.push(Span::styled(word.to_string(), style));
    }
    spans
}
