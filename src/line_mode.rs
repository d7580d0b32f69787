use std::io::{stdin, stdout, Write};
use std::time::Instant;

use anyhow::Result;
use rpncalc::calc_engine::{EvaluationTrace, Session};
use termion::{
    clear::CurrentLine as ClearLine,
    cursor::{DetectCursorPos, Goto},
    event::Key,
    input::TermRead,
    raw::IntoRawMode,
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const PROMPT: &str = "Expression: ";

// Byte offset of the grapheme at `index`, or the end of the string.
fn grapheme_to_byte_index(s: &str, index: usize) -> usize {
    s.grapheme_indices(true)
        .nth(index)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

fn grapheme_count(s: &str) -> usize {
    s.graphemes(true).count()
}

// Inserts `c` at the grapheme cursor and returns the new cursor.
fn insert_at(s: &mut String, cursor: usize, c: char) -> usize {
    let byte_idx = grapheme_to_byte_index(s, cursor);
    s.insert(byte_idx, c);
    grapheme_count(&s[..byte_idx + c.len_utf8()])
}

/// Splits a leading `details` keyword off a trimmed input line.
fn split_details(input: &str) -> (bool, &str) {
    match input.strip_prefix("details") {
        Some("") => (true, ""),
        Some(rest) if rest.starts_with(char::is_whitespace) => (true, rest.trim()),
        _ => (false, input),
    }
}

fn print_banner() {
    print!("RPN / Infix Calculator\r\n");
    print!("Infix: 3 + 6 * (3 - 2)    RPN: 3 6 3 2 - * +    Vectors: [1,2,3] [4,5,6] +\r\n");
    print!("Operators: + - * / // % ^, postfix angle dot; functions: neg sqrt sin cos tan abs\r\n");
    print!("Assign with 'name = expr'; 'vars' lists variables, 'reset' clears them\r\n");
    print!("Navigation: ←/→, Backspace/Delete, Home/End, ↑/↓ for history\r\n");
    print!("Commands: 'help' shows this text, 'clear' resets history, 'quit' exits\r\n");
    print!("Add 'details' before a line for the RPN form and step-by-step evaluation\r\n\r\n");
}

fn remove_grapheme(s: &mut String, index: usize) {
    let start = grapheme_to_byte_index(s, index);
    let end = grapheme_to_byte_index(s, index + 1);
    s.drain(start..end);
}

pub fn run_line() -> Result<()> {
    print_banner();

    let mut stdout = stdout().into_raw_mode()?;
    let mut session = Session::new();
    let mut history: Vec<String> = Vec::new();
    let mut history_index = 0;

    loop {
        write!(stdout, "{}{}", ClearLine, PROMPT)?;
        stdout.flush()?;

        let mut line = String::new();
        let mut cursor_pos = 0;
        let (_, initial_y) = stdout.cursor_pos()?;

        let stdin = stdin();
        let mut keys = stdin.keys();

        loop {
            write!(stdout, "{}{}{}{}", Goto(1, initial_y), ClearLine, PROMPT, line)?;

            let byte_pos = grapheme_to_byte_index(&line, cursor_pos);
            let column = PROMPT.width() + line[..byte_pos].width() + 1;
            write!(stdout, "{}", Goto(column as u16, initial_y))?;
            stdout.flush()?;

            let Some(key) = keys.next() else {
                return Ok(());
            };
            match key? {
                Key::Char('\n') => break,
                Key::Ctrl('c') | Key::Ctrl('d') => {
                    println!("\r\nGoodbye!");
                    return Ok(());
                }
                Key::Char(c) => cursor_pos = insert_at(&mut line, cursor_pos, c),
                Key::Backspace if cursor_pos > 0 => {
                    cursor_pos -= 1;
                    remove_grapheme(&mut line, cursor_pos);
                }
                Key::Delete if cursor_pos < grapheme_count(&line) => {
                    remove_grapheme(&mut line, cursor_pos);
                }
                Key::Left if cursor_pos > 0 => cursor_pos -= 1,
                Key::Right if cursor_pos < grapheme_count(&line) => cursor_pos += 1,
                Key::Home => cursor_pos = 0,
                Key::End => cursor_pos = grapheme_count(&line),
                Key::Up => {
                    if history_index > 0 {
                        history_index -= 1;
                        line = history[history_index].clone();
                        cursor_pos = grapheme_count(&line);
                    }
                }
                Key::Down => {
                    if history_index < history.len().saturating_sub(1) {
                        history_index += 1;
                        line = history[history_index].clone();
                        cursor_pos = grapheme_count(&line);
                    } else {
                        history_index = history.len();
                        line.clear();
                        cursor_pos = 0;
                    }
                }
                _ => {}
            }
        }

        let input = line.trim();
        if input.is_empty() {
            print!("\r\n");
            continue;
        }

        match input.to_lowercase().as_str() {
            "quit" | "exit" | "q" => {
                println!("\r\nGoodbye!");
                return Ok(());
            }
            "clear" => {
                history.clear();
                history_index = 0;
                println!("\r\nHistory cleared\r\n");
                continue;
            }
            "reset" => {
                session.clear_variables();
                println!("\r\nVariables cleared\r\n");
                continue;
            }
            "help" => {
                print!("\r\n");
                print_banner();
                continue;
            }
            "vars" => {
                print!("\r\n");
                if session.variables().is_empty() {
                    print!("  (no variables)\r\n");
                }
                for (name, value) in session.variables() {
                    print!("  {} = {}\r\n", name, value);
                }
                print!("\r\n");
                continue;
            }
            _ => {}
        }

        let (detailed_mode, processed_input) = split_details(input);

        history.push(input.to_string());
        history_index = history.len();

        let mut trace = EvaluationTrace::new(detailed_mode);
        let started = Instant::now();
        let result = session.eval_line_traced(processed_input, &mut trace);
        let elapsed = started.elapsed();

        match result {
            Ok(Some(outcome)) => {
                match &outcome.target {
                    Some(name) => print!("\r\n  {} = {}\r\n", name, outcome.value),
                    None => print!("\r\n  {} = {}\r\n", processed_input, outcome.value),
                }
                if detailed_mode {
                    print!("\r\n  RPN: {}\r\n", outcome.rpn);
                    for (i, step) in trace.steps.iter().enumerate() {
                        print!("\r  Step {}: {} = {}\r\n", i + 1, step.operation, step.result);
                    }
                    print!("  Time: {:.6} ms\r\n", elapsed.as_secs_f64() * 1000.0);
                }
                print!("\r\n");
            }
            Ok(None) => print!("\r\n  Please enter an expression after 'details'\r\n\r\n"),
            Err(e) => print!("\r\n  {} = Error: {}\r\n\r\n", processed_input, e),
        }
        stdout.flush()?;
    }
}
