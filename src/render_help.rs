use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui_mode::app::App;

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
    ))
}

pub fn render_help(frame: &mut Frame, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" rpncalc Help ")
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(Color::Black));

    let help_text = vec![
        Line::from(Span::styled(
            "rpncalc - Infix / RPN calculator with vectors",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        heading("Input forms:"),
        Line::from("  Infix: any line containing + - * / ^ % ( )   e.g. 3 + 6 * (3 - 2)"),
        Line::from("  RPN:   operands first, operators after        e.g. 3 6 3 2 - * +"),
        Line::from("  Unary minus in infix becomes 'neg':           -2 ^ 2  ->  2 neg 2 ^"),
        Line::from(""),
        heading("Binary operators:"),
        Line::from("  +  : Addition         (scalars, or vectors of equal length)"),
        Line::from("  -  : Subtraction      (scalars, or vectors of equal length)"),
        Line::from("  *  : Multiplication   (scalar * scalar, vector * scalar)"),
        Line::from("  /  : Division         (scalars, e.g. 7 / 2 = 3.5)"),
        Line::from("  // : Floor division   (e.g. -7 // 2 = -4)"),
        Line::from("  %  : Modulo           (sign follows the divisor)"),
        Line::from("  ^  : Power            (right-associative)"),
        Line::from("  angle : Angle between two vectors in radians (RPN only)"),
        Line::from("  dot   : Dot product of two vectors (RPN only)"),
        Line::from(""),
        heading("Functions:"),
        Line::from("  neg(x)  : Negation (element-wise for vectors)"),
        Line::from("  abs(x)  : Absolute value, or length of a vector"),
        Line::from("  sqrt(x) : Square root (x >= 0)"),
        Line::from("  sin(x), cos(x), tan(x) : Trigonometry, x in radians"),
        Line::from(""),
        heading("Values:"),
        Line::from("  Numbers : 42, 2.5"),
        Line::from("  Vectors : [1,2,3], []"),
        Line::from("  Constants : pi, e (a variable of the same name takes priority)"),
        Line::from(""),
        heading("Variables:"),
        Line::from("  name = expr : Bind the result, e.g. a = 4, c = a b +"),
        Line::from("  vars  : Show/hide the variables panel (also F2)"),
        Line::from("  reset : Remove all variables"),
        Line::from(""),
        heading("Commands:"),
        Line::from("  details <line> : Show the RPN form, each step, and the time taken"),
        Line::from("  clear : Clear calculation history"),
        Line::from("  help  : Show this help screen (also F1, Esc to close)"),
        Line::from("  quit  : Exit the calculator (also Ctrl+C)"),
        Line::from(""),
        heading("Navigation:"),
        Line::from("  ← → : Move cursor left/right"),
        Line::from("  Ctrl+←/→ : Move cursor by words"),
        Line::from("  Home/End : Move to start/end of line"),
        Line::from("  ↑ ↓ : Navigate calculation history"),
        Line::from("  PgUp/PgDn : Page through history"),
        Line::from("  Ctrl+U : Clear current input"),
        Line::from("  Mouse wheel : Scroll through history"),
        Line::from(""),
        heading("Examples:"),
        Line::from("  [1,2,3] [4,5,6] +"),
        Line::from("  v = [3,4]"),
        Line::from("  abs(v) * 2"),
        Line::from("  [1,0] [0,1] angle"),
        Line::from("  details 5 * 3 + 2 ^ 4 % 5"),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true })
        .scroll((app.help_scroll as u16, 0));

    frame.render_widget(Clear, frame.size());
    frame.render_widget(paragraph, frame.size());
}
