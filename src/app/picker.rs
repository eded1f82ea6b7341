//! Choosing the base class and the new class name.

use crate::error::{ClassGenError, Result};
use crate::services::ClassIndex;
use regex::Regex;
use std::io::{BufRead, Write};
use tracing::warn;

/// How many matches are listed before asking for a narrower filter.
const MAX_LISTED: usize = 40;

/// Outcome of the selection step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The user chose a base class and named the new class
    Confirmed {
        /// Base class as chosen (resolved against the index later)
        base_class: String,
        /// Validated new class name
        new_class_name: String,
    },
    /// The user backed out
    Cancelled,
}

/// Source of the base class / class name choice.
pub trait ClassPicker {
    /// Picks a base class from `index` and a name for the new class.
    ///
    /// # Errors
    ///
    /// Returns [`ClassGenError::InvalidClassName`] when a non-interactive picker
    /// is handed an unusable name.
    fn pick(&mut self, index: &ClassIndex) -> Result<Selection>;
}

/// Trims `name` and checks it is a C++ identifier.
///
/// # Errors
///
/// Returns [`ClassGenError::InvalidClassName`] for blank names and names that
/// are not identifiers.
pub fn validate_class_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ClassGenError::InvalidClassName {
            name: name.to_string(),
            reason: "class name cannot be empty".to_string(),
        });
    }

    let identifier = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
    if !identifier.is_match(trimmed) {
        return Err(ClassGenError::InvalidClassName {
            name: trimmed.to_string(),
            reason: "must start with a letter or underscore and contain only letters, digits, and underscores"
                .to_string(),
        });
    }

    Ok(trimmed.to_string())
}

/// Non-interactive picker fed from command-line arguments.
#[derive(Debug, Clone)]
pub struct ArgsPicker {
    base_class: String,
    new_class_name: String,
}

impl ArgsPicker {
    /// Creates a picker that always answers with the given names.
    pub fn new(base_class: impl Into<String>, new_class_name: impl Into<String>) -> Self {
        Self {
            base_class: base_class.into(),
            new_class_name: new_class_name.into(),
        }
    }
}

impl ClassPicker for ArgsPicker {
    fn pick(&mut self, _index: &ClassIndex) -> Result<Selection> {
        let base_class = self.base_class.trim();
        if base_class.is_empty() {
            return Ok(Selection::Cancelled);
        }

        Ok(Selection::Confirmed {
            base_class: base_class.to_string(),
            new_class_name: validate_class_name(&self.new_class_name)?,
        })
    }
}

/// Line-oriented picker over any reader/writer pair.
///
/// Flow: type a filter (case-insensitive substring, empty lists everything),
/// choose a class by number or name (`/` filters again), then enter the new
/// class name. Empty input at the selection or name prompt, or end of input,
/// cancels. Either step can be preset to skip its prompt.
pub struct PromptPicker<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    preset_base: Option<String>,
    preset_name: Option<String>,
}

enum Choice {
    Picked(String),
    Refilter,
    Unknown,
    Cancel,
}

impl<R: BufRead, W: Write> PromptPicker<R, W> {
    /// Creates a picker reading answers from `reader` and prompting on `writer`.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            preset_base: None,
            preset_name: None,
        }
    }

    /// Skips the base class prompt.
    #[must_use]
    pub fn with_base(mut self, base: Option<String>) -> Self {
        self.preset_base = base.filter(|b| !b.trim().is_empty());
        self
    }

    /// Skips the class name prompt (the name is still validated).
    #[must_use]
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.preset_name = name;
        self
    }

    /// Writes `prompt` and reads one trimmed line; `None` on end of input.
    fn ask(&mut self, prompt: &str) -> Option<String> {
        if let Err(e) = write!(self.writer, "{prompt}").and_then(|()| self.writer.flush()) {
            warn!("Failed to write prompt: {e}");
            return None;
        }

        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_string()),
            Err(e) => {
                warn!("Failed to read input: {e}");
                None
            }
        }
    }

    fn say(&mut self, text: &str) {
        if let Err(e) = writeln!(self.writer, "{text}") {
            warn!("Failed to write output: {e}");
        }
    }

    fn choose_base(&mut self, index: &ClassIndex) -> Option<String> {
        loop {
            let filter = self.ask("Filter base classes (empty lists all): ")?;
            let matches = index.filter(&filter);

            if matches.is_empty() {
                self.say(&format!("No classes match '{filter}'."));
                continue;
            }

            for (i, name) in matches.iter().take(MAX_LISTED).enumerate() {
                self.say(&format!("  {:>3}) {name}", i + 1));
            }
            if matches.len() > MAX_LISTED {
                self.say(&format!(
                    "  ... and {} more; refine the filter to see them",
                    matches.len() - MAX_LISTED
                ));
            }

            loop {
                let answer = self.ask("Base class (number or name, '/' to filter again): ")?;
                match Self::interpret(&answer, &matches, index) {
                    Choice::Picked(name) => return Some(name),
                    Choice::Refilter => break,
                    Choice::Unknown => self.say(&format!("'{answer}' is not in the list.")),
                    Choice::Cancel => return None,
                }
            }
        }
    }

    fn interpret(answer: &str, matches: &[&str], index: &ClassIndex) -> Choice {
        if answer.is_empty() {
            return Choice::Cancel;
        }
        if answer == "/" {
            return Choice::Refilter;
        }
        if let Ok(number) = answer.parse::<usize>() {
            if let Some(name) = number
                .checked_sub(1)
                .and_then(|i| matches.iter().take(MAX_LISTED).nth(i))
            {
                return Choice::Picked((*name).to_string());
            }
        }
        if let Ok(record) = index.lookup(answer) {
            return Choice::Picked(record.class_name.clone());
        }
        Choice::Unknown
    }

    fn choose_name(&mut self) -> Option<String> {
        loop {
            let answer = self.ask("New class name: ")?;
            if answer.is_empty() {
                return None;
            }
            match validate_class_name(&answer) {
                Ok(name) => return Some(name),
                Err(e) => self.say(&e.to_string()),
            }
        }
    }
}

impl<R: BufRead, W: Write> ClassPicker for PromptPicker<R, W> {
    fn pick(&mut self, index: &ClassIndex) -> Result<Selection> {
        let base_class = match self.preset_base.clone() {
            Some(base) => base.trim().to_string(),
            None => match self.choose_base(index) {
                Some(base) => base,
                None => return Ok(Selection::Cancelled),
            },
        };

        let new_class_name = match self.preset_name.clone() {
            Some(name) => validate_class_name(&name)?,
            None => match self.choose_name() {
                Some(name) => name,
                None => return Ok(Selection::Cancelled),
            },
        };

        Ok(Selection::Confirmed {
            base_class,
            new_class_name,
        })
    }
}
