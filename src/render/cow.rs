//! ASCII cow speech bubbles

/// Eyes used for ordinary output
pub const DEFAULT_EYES: &str = "oo";
/// Eyes used when reporting an error
pub const ERROR_EYES: &str = "xx";
pub const ERROR_TONGUE: &str = "U ";
/// Eyes used for the welcome message
pub const WELCOME_EYES: &str = "^^";
pub const WELCOME_TONGUE: &str = "U ";

const TAB_WIDTH: usize = 4;

/// Appearance of the cow and its bubble
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CowStyle {
    pub eyes: String,
    pub tongue: String,
    /// Column at which bubble lines wrap; 0 disables wrapping
    pub wrap_width: usize,
}

impl Default for CowStyle {
    fn default() -> Self {
        Self {
            eyes: DEFAULT_EYES.to_string(),
            tongue: "  ".to_string(),
            wrap_width: 40,
        }
    }
}

impl CowStyle {
    pub fn with_eyes(mut self, eyes: &str) -> Self {
        self.eyes = eyes.to_string();
        self
    }

    pub fn with_tongue(mut self, tongue: &str) -> Self {
        self.tongue = tongue.to_string();
        self
    }
}

/// Render `text` as spoken by the cow
pub fn say(text: &str, style: &CowStyle) -> String {
    let lines = wrap_text(text, style.wrap_width);
    let mut out = bubble(&lines);
    out.push_str(&cow(&two_chars(&style.eyes), &two_chars(&style.tongue)));
    out
}

fn bubble(lines: &[String]) -> String {
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let mut out = format!(" {}\n", "_".repeat(width + 2));

    let last = lines.len().saturating_sub(1);
    for (i, line) in lines.iter().enumerate() {
        let (open, close) = match (i, lines.len()) {
            (_, 1) => ('<', '>'),
            (0, _) => ('/', '\\'),
            (i, _) if i == last => ('\\', '/'),
            _ => ('|', '|'),
        };
        let padding = width - line.chars().count();
        out.push_str(&format!("{open} {line}{} {close}\n", " ".repeat(padding)));
    }

    out.push_str(&format!(" {}\n", "-".repeat(width + 2)));
    out
}

fn cow(eyes: &str, tongue: &str) -> String {
    format!(
        "        \\   ^__^\n         \\  ({eyes})\\_______\n            (__)\\       )\\/\\\n             {tongue} ||----w |\n                ||     ||\n"
    )
}

/// Exactly two characters, space padded
fn two_chars(s: &str) -> String {
    let mut chars: String = s.chars().take(2).collect();
    while chars.chars().count() < 2 {
        chars.push(' ');
    }
    chars
}

/// Word-wrap each line at `width`, keeping leading indentation on
/// continuation lines. Words longer than the available room are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let text = text.trim_end_matches('\n');
    if text.is_empty() {
        return vec![String::new()];
    }

    let mut lines = Vec::new();
    for raw in text.split('\n') {
        let line = raw.trim_end().replace('\t', &" ".repeat(TAB_WIDTH));
        if width == 0 || line.chars().count() <= width {
            lines.push(line);
            continue;
        }
        wrap_line(&line, width, &mut lines);
    }
    lines
}

fn wrap_line(line: &str, width: usize, lines: &mut Vec<String>) {
    let indent_len = line.chars().take_while(|c| *c == ' ').count();
    // Keep at least half the width for text on continuation lines
    let indent = " ".repeat(indent_len.min(width / 2));

    let mut current = " ".repeat(indent_len.min(width.saturating_sub(1)));
    let mut current_len = current.chars().count();
    let mut has_word = false;

    for word in line.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        loop {
            let sep = usize::from(has_word);
            if current_len + sep + word.len() <= width {
                if has_word {
                    current.push(' ');
                }
                current.extend(word.iter());
                current_len += sep + word.len();
                has_word = true;
                break;
            }

            if has_word {
                lines.push(std::mem::replace(&mut current, indent.clone()));
                current_len = indent.chars().count();
                has_word = false;
                continue;
            }

            let room = width.saturating_sub(current_len).max(1);
            let rest = word.split_off(room.min(word.len()));
            current.extend(word.iter());
            lines.push(std::mem::replace(&mut current, indent.clone()));
            current_len = indent.chars().count();
            if rest.is_empty() {
                break;
            }
            word = rest;
        }
    }

    if has_word {
        lines.push(current);
    }
}
