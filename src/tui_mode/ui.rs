use super::app::App;
use anyhow::Result;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use std::time::Duration;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;
use super::helpers::{format_value, format_with_spaces, highlight_tokens, wrap_text};
use crate::render_help::render_help;

const MIN_TERMINAL_WIDTH: u16 = 50;
const MIN_TERMINAL_HEIGHT: u16 = 10;
const VARIABLES_PANEL_WIDTH: u16 = 28;

pub fn run_ui_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            if app.show_help {
                render_help(f, app);
            } else {
                ui(f, app);
            }
        })?;

        if app.should_quit {
            break;
        }

        if crossterm::event::poll(Duration::from_millis(50))? {
            match crossterm::event::read()? {
                Event::Key(KeyEvent {
                    code,
                    modifiers,
                    kind,
                    ..
                }) if kind == KeyEventKind::Press => {
                    handle_key_event(app, code, modifiers);
                }
                Event::Mouse(event) => handle_mouse_event(app, event),
                _ => {}
            }
        }
    }
    Ok(())
}

fn handle_key_event(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    if app.show_help {
        match code {
            KeyCode::Down => app.help_scroll = app.help_scroll.saturating_add(1),
            KeyCode::Up => app.help_scroll = app.help_scroll.saturating_sub(1),
            KeyCode::PageDown => app.help_scroll = app.help_scroll.saturating_add(10),
            KeyCode::PageUp => app.help_scroll = app.help_scroll.saturating_sub(10),
            KeyCode::Esc | KeyCode::F(1) => {
                app.show_help = false;
                app.help_scroll = 0;
            }
            _ => {}
        }
        return;
    }

    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => app.should_quit = true,
        KeyCode::Char('u') | KeyCode::Char('U') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_input();
        }
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => app.insert_char(c),
        KeyCode::Backspace => app.delete_before_cursor(),
        KeyCode::Delete => app.delete_at_cursor(),
        KeyCode::Left if modifiers.contains(KeyModifiers::CONTROL) => app.move_cursor_by_words(-1),
        KeyCode::Right if modifiers.contains(KeyModifiers::CONTROL) => app.move_cursor_by_words(1),
        KeyCode::Left => app.move_cursor(-1),
        KeyCode::Right => app.move_cursor(1),
        KeyCode::Home => {
            app.cursor_position = 0;
            app.input_scroll = 0;
        }
        KeyCode::End => app.cursor_position = app.input_len(),
        KeyCode::Up => app.navigate_history(-1),
        KeyCode::Down => app.navigate_history(1),
        KeyCode::PageUp => app.scroll_history(-1),
        KeyCode::PageDown => app.scroll_history(1),
        KeyCode::Enter => app.submit(),
        KeyCode::F(1) => {
            app.show_help = true;
            app.help_scroll = 0;
        }
        KeyCode::F(2) => app.show_variables = !app.show_variables,
        _ => {}
    }
}

fn handle_mouse_event(app: &mut App, event: MouseEvent) {
    let scroll = if app.show_help { &mut app.help_scroll } else { &mut app.history_scroll };
    match event.kind {
        MouseEventKind::ScrollDown => *scroll = scroll.saturating_add(3),
        MouseEventKind::ScrollUp => *scroll = scroll.saturating_sub(3),
        _ => {}
    }
}

fn ui(frame: &mut Frame, app: &mut App) {
    let terminal_size = frame.size();

    app.terminal_too_small = terminal_size.width < MIN_TERMINAL_WIDTH
        || terminal_size.height < MIN_TERMINAL_HEIGHT;

    if app.terminal_too_small {
        render_resize_message(frame, terminal_size);
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .split(terminal_size);

    render_input(frame, app, layout[0]);
    render_status(frame, app, layout[1]);

    let history_area = if app.show_variables {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Min(20), Constraint::Length(VARIABLES_PANEL_WIDTH)])
            .split(layout[2]);
        render_variables(frame, app, columns[1]);
        columns[0]
    } else {
        layout[2]
    };
    render_history(frame, app, history_area);
    app.list_height = history_area.height as usize;
}

fn render_resize_message(frame: &mut Frame, area: Rect) {
    let message = format!(
        "Terminal too small! Min size: {}x{}. Current: {}x{}",
        MIN_TERMINAL_WIDTH, MIN_TERMINAL_HEIGHT, area.width, area.height
    );

    let text = vec![
        Line::from(Span::styled(
            message,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Please resize your terminal window",
            Style::default().fg(Color::Yellow),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Resize Required ")
        .title_alignment(Alignment::Center);

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn render_variables(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Variables ")
        .title_alignment(Alignment::Center);

    let variables = app.session.variables();
    if variables.is_empty() {
        let empty = Paragraph::new("none yet (name = expr)")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = variables
        .into_iter()
        .map(|(name, value)| {
            ListItem::new(Line::from(vec![
                Span::styled(name.to_string(), Style::default().fg(Color::Cyan)),
                Span::styled(" = ", Style::default().fg(Color::Gray)),
                Span::styled(format_value(value), Style::default().fg(Color::LightMagenta)),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

// Dimmed, wrapped sub-lines under a history entry.
fn push_detail_lines(items: &mut Vec<ListItem<'static>>, text: &str, width: usize, style: Style) {
    for (idx, line) in wrap_text(text, width).into_iter().enumerate() {
        let prefix = if idx == 0 { "    - " } else { "      " };
        items.push(ListItem::new(Line::from(Span::styled(format!("{}{}", prefix, line), style))));
    }
}

fn render_history(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" History ")
        .title_alignment(Alignment::Center);

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    if app.history.is_empty() {
        let empty_msg =
            Paragraph::new("No calculations yet. Enter an expression to see results here.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
        frame.render_widget(empty_msg, inner_area);
        return;
    }

    let mut items = Vec::new();
    app.item_start_indices.clear();

    let wrap_width = inner_area.width.saturating_sub(4) as usize;

    for (i, entry) in app.history.iter().enumerate() {
        app.item_start_indices.push(items.len());

        let is_selected = i == app.cursor_history;
        let base_style = Style::default().fg(if is_selected { Color::Yellow } else { Color::Cyan });

        let input = format_with_spaces(&entry.input);
        for (line_idx, line) in wrap_text(&input, wrap_width).into_iter().enumerate() {
            let mut spans = vec![if line_idx == 0 {
                Span::styled("> ", Style::default().fg(Color::Green))
            } else {
                Span::raw("  ")
            }];
            spans.extend(highlight_tokens(&line, base_style));

            if line_idx == 0 {
                spans.push(Span::styled(" = ", Style::default().fg(Color::Gray)));
                match &entry.result {
                    Ok(outcome) => spans.push(Span::styled(
                        format_value(&outcome.value),
                        Style::default().fg(Color::LightMagenta).add_modifier(Modifier::BOLD),
                    )),
                    Err(e) => spans.push(Span::styled(
                        format!("Error: {}", e),
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
                }
            }

            items.push(ListItem::new(Line::from(spans)));
        }

        if entry.detailed_mode {
            let dim = Style::default().fg(Color::DarkGray);
            if let Ok(outcome) = &entry.result {
                push_detail_lines(&mut items, &format!("RPN: {}", outcome.rpn), wrap_width, dim);
            }
            for (j, step) in entry.detailed_steps.iter().enumerate() {
                let text = format!(
                    "Step {}: {} = {}",
                    j + 1,
                    step.operation,
                    format_value(&step.result)
                );
                push_detail_lines(&mut items, &text, wrap_width, dim);
            }
            let time = format!("Time: {:.6} ms", entry.duration.as_secs_f64() * 1000.0);
            push_detail_lines(&mut items, &time, wrap_width, Style::default().fg(Color::Magenta));
        }

        if i < app.history.len() - 1 {
            let separator = Span::styled(
                "-".repeat(inner_area.width as usize),
                Style::default().fg(Color::DarkGray),
            );
            items.push(ListItem::new(Line::from(separator)));
        }
    }

    if app.scroll_to_bottom {
        app.history_scroll = items.len().saturating_sub(inner_area.height as usize);
        app.scroll_to_bottom = false;
    }

    let selected_index = app.item_start_indices.get(app.cursor_history).copied();

    let list = List::new(items)
        .block(Block::default())
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let mut state = ListState::default()
        .with_selected(selected_index)
        .with_offset(app.history_scroll);

    frame.render_stateful_widget(list, inner_area, &mut state);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(status) = &app.status {
        let line = Line::from(Span::styled(status.clone(), Style::default().fg(Color::Green)));
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let keys = [
        ("Enter", "Calculate"),
        ("Up/Down", "History"),
        ("F1", "Help"),
        ("F2", "Variables"),
        ("Ctrl+U", "Clear Input"),
    ];

    let spans: Vec<Span> = keys
        .iter()
        .flat_map(|(key, desc)| {
            vec![
                Span::styled(*key, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                Span::styled(format!(" {} ", desc), Style::default().fg(Color::DarkGray)),
            ]
        })
        .collect();

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_input(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Expression ")
        .title_alignment(Alignment::Center);

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let visible_width = inner_area.width.saturating_sub(2) as usize;
    let total = app.input_len();
    app.adjust_input_scroll(visible_width);

    let visible_input: String = app
        .input
        .graphemes(true)
        .skip(app.input_scroll)
        .take(visible_width)
        .collect();

    frame.render_widget(Paragraph::new(format!("> {}", visible_input)), inner_area);

    let visible_cursor = app.cursor_position.saturating_sub(app.input_scroll);
    let visible_prefix: String = visible_input.graphemes(true).take(visible_cursor).collect();
    let cursor_x = inner_area.x + 2 + visible_prefix.width() as u16;
    frame.set_cursor(cursor_x, inner_area.y);

    let scroll_indicator_style = Style::default().fg(Color::DarkGray);

    if app.input_scroll > 0 {
        let left_indicator = Paragraph::new("<").style(scroll_indicator_style);
        frame.render_widget(left_indicator, Rect::new(inner_area.x, inner_area.y, 1, 1));
    }

    if total > app.input_scroll + visible_width {
        let right_indicator = Paragraph::new(">").style(scroll_indicator_style);
        frame.render_widget(
            right_indicator,
            Rect::new(inner_area.x + inner_area.width - 1, inner_area.y, 1, 1),
        );
    }
}
