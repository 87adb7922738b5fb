use std::fmt;

use folio_motion::Theme;

/// One scenario step.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Let `ms` milliseconds pass, presenting frames along the way.
    Wait(u64),
    Theme(Theme),
    /// Toggle the theme selector.
    Open,
    Escape,
    ClickOutside,
    /// Move the hero's top edge to this viewport offset.
    Scroll(f32),
    /// Change the viewport height.
    Resize(f32),
    /// Present a single frame.
    Frame,
    Reduced(bool),
    Status,
}

/// A scenario line that could not be read.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptError {
    pub message: String,
    /// 1-based source line number.
    pub line: usize,
    /// 1-based column of the offending word.
    pub col: usize,
}

impl ScriptError {
    fn new(msg: impl Into<String>, line: usize, col: usize) -> Self {
        Self { message: msg.into(), line, col }
    }
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "script error at {}:{}: {}", self.line, self.col, self.message)
    }
}

impl std::error::Error for ScriptError {}

/// A whitespace-separated word with its 1-based column.
struct Word<'a> {
    text: &'a str,
    col: usize,
}

fn words(line: &str) -> Vec<Word<'_>> {
    let mut out = Vec::new();
    let mut start = None;
    for (i, c) in line.char_indices() {
        match (c.is_whitespace(), start) {
            (false, None) => start = Some(i),
            (true, Some(s)) => {
                out.push(Word { text: &line[s..i], col: line[..s].chars().count() + 1 });
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        out.push(Word { text: &line[s..], col: line[..s].chars().count() + 1 });
    }
    out
}

/// The single argument of a command.
fn arg<'w, 'a>(ws: &'w [Word<'a>], line: usize) -> Result<&'w Word<'a>, ScriptError> {
    let head = &ws[0];
    match ws.len() {
        2 => Ok(&ws[1]),
        1 => Err(ScriptError::new(
            format!("`{}` needs an argument", head.text),
            line,
            head.col + head.text.chars().count(),
        )),
        _ => Err(ScriptError::new("unexpected extra argument", line, ws[2].col)),
    }
}

fn no_arg(ws: &[Word<'_>], line: usize) -> Result<(), ScriptError> {
    match ws.get(1) {
        None => Ok(()),
        Some(w) => Err(ScriptError::new("unexpected argument", line, w.col)),
    }
}

fn number(w: &Word<'_>, line: usize) -> Result<f32, ScriptError> {
    w.text
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ScriptError::new(format!("expected a number, got {:?}", w.text), line, w.col))
}

/// Parses a scenario. Blank lines and `#` comments are skipped.
pub fn parse_script(src: &str) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();

    for (idx, raw) in src.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.split('#').next().unwrap_or("");
        let ws = words(line);
        let Some(head) = ws.first() else { continue };

        let cmd = match head.text {
            "wait" => {
                let w = arg(&ws, line_no)?;
                let ms = w.text.parse::<u64>().map_err(|_| {
                    ScriptError::new(format!("expected milliseconds, got {:?}", w.text), line_no, w.col)
                })?;
                Command::Wait(ms)
            }
            "theme" => {
                let w = arg(&ws, line_no)?;
                let theme = w
                    .text
                    .parse::<Theme>()
                    .map_err(|e| ScriptError::new(e.to_string(), line_no, w.col))?;
                Command::Theme(theme)
            }
            "scroll" => Command::Scroll(number(arg(&ws, line_no)?, line_no)?),
            "resize" => {
                let w = arg(&ws, line_no)?;
                let h = number(w, line_no)?;
                if h <= 0.0 {
                    return Err(ScriptError::new("viewport height must be positive", line_no, w.col));
                }
                Command::Resize(h)
            }
            "reduced" => {
                let w = arg(&ws, line_no)?;
                match w.text {
                    "on" => Command::Reduced(true),
                    "off" => Command::Reduced(false),
                    other => {
                        return Err(ScriptError::new(format!("expected on/off, got {other:?}"), line_no, w.col));
                    }
                }
            }
            "open" => { no_arg(&ws, line_no)?; Command::Open }
            "escape" => { no_arg(&ws, line_no)?; Command::Escape }
            "click-outside" => { no_arg(&ws, line_no)?; Command::ClickOutside }
            "frame" => { no_arg(&ws, line_no)?; Command::Frame }
            "status" => { no_arg(&ws, line_no)?; Command::Status }
            other => return Err(ScriptError::new(format!("unknown command {other:?}"), line_no, head.col)),
        };
        commands.push(cmd);
    }

    Ok(commands)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(src: &str) -> Vec<Command> { parse_script(src).unwrap() }
    fn err(src: &str) -> ScriptError { parse_script(src).unwrap_err() }

    #[test] fn empty_script() { assert!(ok("").is_empty()); }
    #[test] fn comments_and_blanks() { assert!(ok("# header\n\n   # indented\n").is_empty()); }
    #[test] fn trailing_comment() { assert_eq!(ok("frame # one frame"), vec![Command::Frame]); }
    #[test] fn wait_ms() { assert_eq!(ok("wait 170"), vec![Command::Wait(170)]); }
    #[test] fn theme_ids() {
        assert_eq!(ok("theme spotify\ntheme apple"), vec![Command::Theme(Theme::Spotify), Command::Theme(Theme::Apple)]);
    }
    #[test] fn scroll_negative_float() { assert_eq!(ok("scroll -412.5"), vec![Command::Scroll(-412.5)]); }
    #[test] fn reduced_flags() {
        assert_eq!(ok("reduced on\nreduced off"), vec![Command::Reduced(true), Command::Reduced(false)]);
    }
    #[test] fn selector_commands() {
        assert_eq!(ok("open\nescape\nclick-outside"), vec![Command::Open, Command::Escape, Command::ClickOutside]);
    }
    #[test] fn built_in_tour_parses() {
        assert!(!ok(include_str!("../scripts/tour.folio")).is_empty());
    }

    #[test] fn err_unknown_command_position() {
        let e = err("frame\n  jump 3");
        assert_eq!((e.line, e.col), (2, 3));
    }
    #[test] fn err_unknown_theme() {
        let e = err("theme neon");
        assert_eq!(e.col, 7);
        assert!(e.message.contains("neon"));
    }
    #[test] fn err_missing_argument() { assert_eq!(err("wait").col, 5); }
    #[test] fn err_extra_argument() { assert_eq!(err("status now").col, 8); }
    #[test] fn err_bad_number() { assert_eq!(err("scroll far").col, 8); }
    #[test] fn err_non_positive_resize() { err("resize 0"); }
    #[test] fn err_negative_wait() { err("wait -5"); }
}
