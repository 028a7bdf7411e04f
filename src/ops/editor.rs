use std::time::{Duration, Instant};

use crate::model::{ColorTag, Layers};
use crate::ops::apply::{Edit, EditTarget};
use crate::ops::debounce::Debouncer;
use crate::ops::history::{DuplicatePolicy, History};
use crate::util::markup::BREAK_TAG;

/// Inline text colors offered by the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColor {
    Black,
    Red,
    Blue,
    Green,
}

impl TextColor {
    pub const ALL: [TextColor; 4] = [
        TextColor::Black,
        TextColor::Red,
        TextColor::Blue,
        TextColor::Green,
    ];

    pub fn hex(self) -> &'static str {
        match self {
            TextColor::Black => "#000000",
            TextColor::Red => "#dc2626",
            TextColor::Blue => "#1d4ed8",
            TextColor::Green => "#16a34a",
        }
    }
}

/// A discrete formatting action, recorded in the editor history as soon as it runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatCommand {
    Bold,
    ForeColor(TextColor),
    InsertResident(String),
}

/// Applies formatting commands to editor markup
pub trait Formatter {
    fn apply(&mut self, markup: &str, command: &FormatCommand) -> String;
}

/// Line-oriented formatter: styles act on the last line of the content,
/// resident names are appended on a line of their own.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkupFormatter;

impl MarkupFormatter {
    fn wrap_last_line(markup: &str, open: &str, close: &str) -> String {
        let split = markup.rfind(BREAK_TAG).map_or(0, |i| i + BREAK_TAG.len());
        let (head, last) = markup.split_at(split);
        if last.is_empty() {
            return markup.to_string();
        }
        format!("{head}{open}{last}{close}")
    }
}

impl Formatter for MarkupFormatter {
    fn apply(&mut self, markup: &str, command: &FormatCommand) -> String {
        match command {
            FormatCommand::Bold => Self::wrap_last_line(markup, "<b>", "</b>"),
            FormatCommand::ForeColor(color) => {
                let open = format!("<font color=\"{}\">", color.hex());
                Self::wrap_last_line(markup, &open, "</font>")
            }
            FormatCommand::InsertResident(name) => {
                if name.is_empty() {
                    return markup.to_string();
                }
                let needs_break = !markup.is_empty() && !markup.ends_with(BREAK_TAG);
                let mut out = String::with_capacity(markup.len() + name.len() + 8);
                out.push_str(markup);
                if needs_break {
                    out.push_str(BREAK_TAG);
                }
                out.push_str(name);
                out.push_str(BREAK_TAG);
                out
            }
        }
    }
}

/// An open edit of one day slot or week footer.
///
/// Typed input is committed to the local history only after a quiet period;
/// formatting commands commit immediately. Dropping the session discards it.
#[derive(Debug)]
pub struct EditorSession {
    target: EditTarget,
    markup: String,
    color: ColorTag,
    propagate: bool,
    history: History<String>,
    pending: Debouncer<String>,
}

impl EditorSession {
    /// Open on the target's currently resolved content
    pub fn open(target: EditTarget, layers: &Layers, debounce: Duration) -> Self {
        let initial = target.resolve(layers);
        EditorSession {
            target,
            markup: initial.text.clone(),
            color: initial.color,
            propagate: false,
            history: History::new(initial.text).with_policy(DuplicatePolicy::Suppress),
            pending: Debouncer::new(debounce),
        }
    }

    pub fn target(&self) -> EditTarget {
        self.target
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn color(&self) -> ColorTag {
        self.color
    }

    pub fn propagate(&self) -> bool {
        self.propagate
    }

    pub fn history(&self) -> &History<String> {
        &self.history
    }

    /// The content changed by typing; schedule a deferred history commit
    pub fn input(&mut self, markup: String, now: Instant) {
        self.markup = markup;
        self.pending.schedule(self.markup.clone(), now);
    }

    /// Commit typed content whose quiet period has elapsed. Returns true if an entry was recorded.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.pending.take_due(now) {
            Some(markup) => self.history.commit(markup),
            None => false,
        }
    }

    /// When the pending typed content is due, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.deadline()
    }

    /// Run a formatting command and record the result right away
    pub fn format(&mut self, formatter: &mut dyn Formatter, command: &FormatCommand) {
        self.flush_pending();
        self.markup = formatter.apply(&self.markup, command);
        self.history.commit(self.markup.clone());
    }

    /// Step back through this edit's history. Returns false at the oldest entry.
    pub fn undo(&mut self) -> bool {
        self.flush_pending();
        match self.history.undo() {
            Some(markup) => {
                self.markup = markup.clone();
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        self.flush_pending();
        match self.history.redo() {
            Some(markup) => {
                self.markup = markup.clone();
                true
            }
            None => false,
        }
    }

    pub fn set_color(&mut self, color: ColorTag) {
        self.color = color;
    }

    pub fn cycle_color(&mut self) {
        self.color = self.color.next();
    }

    /// Flip the "apply to this row every month" flag. Only week targets carry it.
    pub fn toggle_propagate(&mut self) -> bool {
        if self.target.is_week() {
            self.propagate = !self.propagate;
        }
        self.propagate
    }

    /// Confirm the edit
    pub fn finish(mut self) -> Edit {
        self.pending.cancel();
        Edit {
            target: self.target,
            content: self.markup,
            color: self.color,
            propagate: self.propagate && self.target.is_week(),
        }
    }

    fn flush_pending(&mut self) {
        if let Some(markup) = self.pending.flush() {
            self.history.commit(markup);
        }
    }
}
