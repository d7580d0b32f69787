use rpncalc::calc_engine::{CalcError, EvaluationTrace, LineOutcome, Session, Step};
use unicode_segmentation::UnicodeSegmentation;

pub struct HistoryEntry {
    pub input: String,
    pub result: Result<LineOutcome, CalcError>,
    pub detailed_steps: Vec<Step>,
    pub detailed_mode: bool,
    pub duration: std::time::Duration,
}

pub struct App {
    pub session: Session,
    pub input: String,
    pub cursor_position: usize,
    pub input_scroll: usize,
    pub history: Vec<HistoryEntry>,
    pub cursor_history: usize,
    pub should_quit: bool,
    pub show_help: bool,
    pub show_variables: bool,
    pub help_scroll: usize,
    pub list_height: usize,
    pub item_start_indices: Vec<usize>,
    pub history_scroll: usize,
    pub scroll_to_bottom: bool,
    pub terminal_too_small: bool,
    /// Feedback from the last command that produced no history entry.
    pub status: Option<String>,
}

impl App {
    pub fn new() -> Self {
        App {
            session: Session::new(),
            input: String::new(),
            cursor_position: 0,
            input_scroll: 0,
            history: Vec::new(),
            cursor_history: 0,
            should_quit: false,
            show_help: false,
            show_variables: true,
            help_scroll: 0,
            list_height: 5,
            item_start_indices: Vec::new(),
            history_scroll: 0,
            scroll_to_bottom: false,
            terminal_too_small: false,
            status: None,
        }
    }

    pub fn input_len(&self) -> usize {
        self.input.graphemes(true).count()
    }

    pub fn adjust_input_scroll(&mut self, visible_width: usize) {
        let total = self.input_len();

        if self.cursor_position < self.input_scroll {
            self.input_scroll = self.cursor_position;
        } else if self.cursor_position >= self.input_scroll + visible_width {
            self.input_scroll = self.cursor_position + 1 - visible_width;
        }

        if self.input_scroll > total.saturating_sub(visible_width) {
            self.input_scroll = total.saturating_sub(visible_width);
        }
    }

    pub fn submit(&mut self) {
        let input = self.input.trim().to_string();
        if input.is_empty() {
            return;
        }
        self.status = None;

        match input.to_lowercase().as_str() {
            "quit" | "exit" | "q" => {
                self.should_quit = true;
                return;
            }
            "clear" => {
                self.history.clear();
                self.cursor_history = 0;
                self.history_scroll = 0;
                self.clear_input();
                return;
            }
            "reset" => {
                self.session.clear_variables();
                self.status = Some("Variables cleared".to_string());
                self.clear_input();
                return;
            }
            "vars" => {
                self.show_variables = !self.show_variables;
                self.clear_input();
                return;
            }
            "help" => {
                self.show_help = true;
                self.clear_input();
                return;
            }
            _ => {}
        }

        let (detailed_mode, line) = match input.strip_prefix("details") {
            Some("") => (true, String::new()),
            Some(rest) if rest.starts_with(char::is_whitespace) => (true, rest.trim().to_string()),
            _ => (false, input),
        };

        let start_time = std::time::Instant::now();
        let mut trace = EvaluationTrace::new(detailed_mode);
        let result = self.session.eval_line_traced(&line, &mut trace);
        let duration = start_time.elapsed();

        let result = match result {
            Ok(Some(outcome)) => Ok(outcome),
            Ok(None) => {
                self.status = Some("Please enter an expression after 'details'".to_string());
                self.clear_input();
                return;
            }
            Err(e) => Err(e),
        };

        self.history.push(HistoryEntry {
            input: line,
            result,
            detailed_steps: trace.steps,
            detailed_mode,
            duration,
        });

        self.cursor_history = self.history.len().saturating_sub(1);
        self.clear_input();
        self.scroll_to_bottom = true;
    }

    pub fn insert_char(&mut self, c: char) {
        let byte_idx = Self::grapheme_to_byte_index(&self.input, self.cursor_position);
        self.input.insert(byte_idx, c);
        // A combining mark joins the grapheme before it.
        self.cursor_position = self.input[..byte_idx + c.len_utf8()].graphemes(true).count();
    }

    pub fn delete_before_cursor(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            self.remove_grapheme(self.cursor_position);
        }
    }

    pub fn delete_at_cursor(&mut self) {
        if self.cursor_position < self.input_len() {
            self.remove_grapheme(self.cursor_position);
        }
    }

    fn remove_grapheme(&mut self, index: usize) {
        let start = Self::grapheme_to_byte_index(&self.input, index);
        let end = Self::grapheme_to_byte_index(&self.input, index + 1);
        self.input.drain(start..end);
    }

    pub fn move_cursor(&mut self, direction: i32) {
        match direction {
            -1 => self.cursor_position = self.cursor_position.saturating_sub(1),
            1 => self.cursor_position = (self.cursor_position + 1).min(self.input_len()),
            _ => {}
        }
    }

    pub fn move_cursor_by_words(&mut self, direction: i32) {
        let graphemes: Vec<&str> = self.input.graphemes(true).collect();
        let blank = |g: &str| g.chars().all(char::is_whitespace);
        let mut pos = self.cursor_position.min(graphemes.len());

        if direction < 0 {
            while pos > 0 && blank(graphemes[pos - 1]) {
                pos -= 1;
            }
            while pos > 0 && !blank(graphemes[pos - 1]) {
                pos -= 1;
            }
        } else {
            let len = graphemes.len();
            while pos < len && !blank(graphemes[pos]) {
                pos += 1;
            }
            while pos < len && blank(graphemes[pos]) {
                pos += 1;
            }
        }
        self.cursor_position = pos;
    }

    pub fn navigate_history(&mut self, direction: i32) {
        if direction < 0 && self.cursor_history > 0 {
            self.cursor_history -= 1;
        } else if direction > 0 && self.cursor_history < self.history.len().saturating_sub(1) {
            self.cursor_history += 1;
        }

        if self.cursor_history < self.history.len() {
            self.input = self.history[self.cursor_history].input.clone();
        } else {
            self.input.clear();
        }
        self.cursor_position = self.input_len();
        self.input_scroll = 0;
        self.scroll_to_bottom = false;
    }

    pub fn scroll_history(&mut self, direction: i32) {
        let step = self.list_height.saturating_sub(1);
        if direction < 0 {
            self.cursor_history = self.cursor_history.saturating_sub(step);
        } else {
            self.cursor_history = self
                .cursor_history
                .saturating_add(step)
                .min(self.history.len().saturating_sub(1));
        }

        if self.cursor_history < self.history.len() {
            self.input = self.history[self.cursor_history].input.clone();
        }
        self.cursor_position = self.input_len();
        self.input_scroll = 0;
        self.scroll_to_bottom = false;
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.cursor_position = 0;
        self.input_scroll = 0;
    }

    pub fn grapheme_to_byte_index(s: &str, index: usize) -> usize {
        s.grapheme_indices(true)
            .nth(index)
            .map(|(i, _)| i)
            .unwrap_or(s.len())
    }
}
