use std::fmt;

use chrono::Weekday;

use crate::model::{ColorTag, MasterSchedule, ResidentList, ScheduleSlot, SlotId};
use crate::ops::history::{DuplicatePolicy, HISTORY_LIMIT, History};
use crate::util::markup::{BREAK_TAG, markup_to_editable, plain_to_markup};

/// Row footers offered for editing in the panel
pub const CONFIG_FOOTER_ROWS: u8 = 5;

/// An editable field of the master schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    Slot { weekday: Weekday, slot: SlotId },
    /// Recurring footer for one grid row
    Footer { row: u8 },
    /// Footer used when no row footer exists
    DefaultFooter,
}

impl ConfigField {
    /// Every field in panel order: row footers, default footer, then the weekday pattern
    pub fn all() -> Vec<ConfigField> {
        let mut fields: Vec<ConfigField> = (0..CONFIG_FOOTER_ROWS)
            .map(|row| ConfigField::Footer { row })
            .collect();
        fields.push(ConfigField::DefaultFooter);
        for weekday in [
            Weekday::Sun,
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
        ] {
            for slot in SlotId::ALL {
                fields.push(ConfigField::Slot { weekday, slot });
            }
        }
        fields
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigField::Slot { weekday, slot } => write!(f, "{} {}", weekday, slot.label()),
            ConfigField::Footer { row } => write!(f, "week {} footer", row + 1),
            ConfigField::DefaultFooter => write!(f, "default footer"),
        }
    }
}

/// Read a field; footers that were never set read as `None`
pub fn field_value(master: &MasterSchedule, field: ConfigField) -> Option<&ScheduleSlot> {
    match field {
        ConfigField::Slot { weekday, slot } => Some(master.slot(weekday, slot)),
        ConfigField::Footer { row } => master.weekly_footer_at(usize::from(row)),
        ConfigField::DefaultFooter => master.global_footer(),
    }
}

/// Mutable access to a field, creating an empty yellow footer where needed
pub fn field_value_mut(master: &mut MasterSchedule, field: ConfigField) -> &mut ScheduleSlot {
    match field {
        ConfigField::Slot { weekday, slot } => master.slot_mut(weekday, slot),
        ConfigField::Footer { row } => master.weekly_footer_at_mut(row),
        ConfigField::DefaultFooter => master.global_footer_mut(),
    }
}

/// An open configuration panel: a draft of the master schedule and resident list.
///
/// Text edits change the draft live and are recorded on blur; color changes and resident
/// insertions are recorded immediately. Nothing reaches the workspace until the session is
/// saved via [`ConfigSession::into_parts`].
#[derive(Debug, Clone)]
pub struct ConfigSession {
    draft: MasterSchedule,
    residents: ResidentList,
    history: History<MasterSchedule>,
}

impl ConfigSession {
    pub fn open(master: &MasterSchedule, residents: &ResidentList) -> Self {
        Self::with_limit(master, residents, HISTORY_LIMIT)
    }

    pub fn with_limit(master: &MasterSchedule, residents: &ResidentList, limit: usize) -> Self {
        ConfigSession {
            draft: master.clone(),
            residents: residents.clone(),
            history: History::new(master.clone())
                .with_limit(limit)
                .with_policy(DuplicatePolicy::Suppress),
        }
    }

    pub fn draft(&self) -> &MasterSchedule {
        &self.draft
    }

    pub fn residents(&self) -> &ResidentList {
        &self.residents
    }

    pub fn history(&self) -> &History<MasterSchedule> {
        &self.history
    }

    pub fn field(&self, field: ConfigField) -> Option<&ScheduleSlot> {
        field_value(&self.draft, field)
    }

    /// Field text as shown in an edit box, one line per stored break
    pub fn field_text(&self, field: ConfigField) -> String {
        self.field(field)
            .map(|s| markup_to_editable(&s.text))
            .unwrap_or_default()
    }

    /// Replace a field's text from edit-box content. Not recorded until [`ConfigSession::blur`].
    pub fn edit_text(&mut self, field: ConfigField, text: &str) {
        field_value_mut(&mut self.draft, field).text = plain_to_markup(text);
    }

    /// Leaving a text field records the draft. Returns true if anything changed.
    pub fn blur(&mut self) -> bool {
        self.history.commit(self.draft.clone())
    }

    pub fn set_color(&mut self, field: ConfigField, color: ColorTag) {
        field_value_mut(&mut self.draft, field).color = color;
        self.history.commit(self.draft.clone());
    }

    /// Append a resident name as a new line of a field
    pub fn append_resident(&mut self, field: ConfigField, name: &str) {
        if name.is_empty() {
            return;
        }
        let slot = field_value_mut(&mut self.draft, field);
        slot.text = if slot.text.is_empty() {
            name.to_string()
        } else {
            format!("{}{}{}", slot.text, BREAK_TAG, name)
        };
        self.history.commit(self.draft.clone());
    }

    /// Step back. An unrecorded live edit is recorded first so it can be redone.
    pub fn undo(&mut self) -> bool {
        if self.draft != *self.history.current() {
            self.history.commit(self.draft.clone());
        }
        match self.history.undo() {
            Some(master) => {
                self.draft = master.clone();
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(master) => {
                self.draft = master.clone();
                true
            }
            None => false,
        }
    }

    pub fn add_resident(&mut self, name: &str) -> bool {
        self.residents.add(name)
    }

    pub fn remove_resident(&mut self, name: &str) -> bool {
        self.residents.remove(name)
    }

    /// Consume the session for saving
    pub fn into_parts(self) -> (MasterSchedule, ResidentList) {
        (self.draft, self.residents)
    }
}
