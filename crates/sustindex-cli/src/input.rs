use std::path::PathBuf;

/// One line typed at the questionnaire prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TakeInput {
    /// Toggle the choice shown with this 1-based number.
    Toggle(usize),
    Next,
    Previous,
    Attach(PathBuf),
    /// Remove the pending file shown with this 1-based number.
    Remove(usize),
    /// Replace the notes; empty text clears them.
    Note(String),
    Submit,
    Quit,
    Help,
}

pub const HELP: &str = "\
  <number>       toggle that choice
  n              save and go to the next question
  p              previous question
  a <path>       attach a file to this answer
  r <number>     remove a pending file
  note <text>    set notes (empty clears)
  s              submit on the last question
  q              quit";

pub fn parse_input(line: &str) -> Result<TakeInput, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "" => Err("type ? for help".to_string()),
        "n" | "next" if rest.is_empty() => Ok(TakeInput::Next),
        "p" | "prev" | "previous" if rest.is_empty() => Ok(TakeInput::Previous),
        "s" | "submit" if rest.is_empty() => Ok(TakeInput::Submit),
        "q" | "quit" if rest.is_empty() => Ok(TakeInput::Quit),
        "?" | "h" | "help" => Ok(TakeInput::Help),
        "a" | "attach" if !rest.is_empty() => Ok(TakeInput::Attach(PathBuf::from(rest))),
        "a" | "attach" => Err("usage: a <path>".to_string()),
        "r" | "remove" => positive(rest)
            .map(TakeInput::Remove)
            .ok_or_else(|| "usage: r <number>".to_string()),
        "note" | "notes" => Ok(TakeInput::Note(rest.to_string())),
        other if rest.is_empty() => positive(other)
            .map(TakeInput::Toggle)
            .ok_or_else(|| format!("unknown command: {other} (type ? for help)")),
        _ => Err(format!("unknown command: {line} (type ? for help)")),
    }
}

fn positive(s: &str) -> Option<usize> {
    s.parse::<usize>().ok().filter(|n| *n > 0)
}
