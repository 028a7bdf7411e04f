use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info};

use crate::io::backup::{ExportDocument, ImportDocument, ImportError};
use crate::io::board_io::{WriteBatch, load_board, save_value};
use crate::io::store::{Store, StoreError, StoreKey};
use crate::model::{Board, Layers, ResidentList, Settings};
use crate::ops::apply::{Edit, EditTarget, apply_edit};
use crate::ops::calendar::YearMonth;
use crate::ops::check::{WeekReport, check_month};
use crate::ops::config_panel::ConfigSession;
use crate::ops::editor::EditorSession;
use crate::ops::history::History;

/// What an import replaced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub replaced: Vec<StoreKey>,
}

/// The live schedule: board state, its global undo history, and where it is persisted.
///
/// Every mutation persists the keys it touched and then records one history entry.
#[derive(Debug)]
pub struct Workspace<S: Store> {
    board: Board,
    history: History<Layers>,
    store: S,
    settings: Settings,
}

impl<S: Store> Workspace<S> {
    /// Load the board from `store`; the history starts with the loaded layers
    pub fn open(store: S, settings: Settings, today: NaiveDate) -> Self {
        let board = load_board(&store, &settings, today);
        let history = History::new(board.layers.clone()).with_limit(settings.history.limit);
        Workspace {
            board,
            history,
            store,
            settings,
        }
    }

    /// Continue a previously persisted history. If the stored layers moved on since it
    /// was written, they are recorded as the newest entry.
    pub fn adopt_history(&mut self, history: History<Layers>) {
        let mut history = history.with_limit(self.settings.history.limit);
        if *history.current() != self.board.layers {
            debug!("stored layers differ from history, recording them");
            history.commit(self.board.layers.clone());
        }
        self.history = history;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn layers(&self) -> &Layers {
        &self.board.layers
    }

    pub fn residents(&self) -> &ResidentList {
        &self.board.residents
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn history(&self) -> &History<Layers> {
        &self.history
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Start an editor session on a day slot or week footer
    pub fn edit(&self, target: EditTarget) -> EditorSession {
        EditorSession::open(
            target,
            &self.board.layers,
            Duration::from_millis(self.settings.editor.debounce_ms),
        )
    }

    /// Apply a confirmed edit, persist what it touched, and record it
    pub fn apply_edit(&mut self, edit: &Edit) -> Result<(), StoreError> {
        let (next, touched) = apply_edit(&self.board.layers, edit);
        let mut batch = WriteBatch::new();
        if touched.overrides {
            batch.put(StoreKey::Overrides, &next.overrides)?;
        }
        if touched.weekly_data {
            batch.put(StoreKey::WeeklyData, &next.weekly_data)?;
        }
        if touched.master_schedule {
            batch.put(StoreKey::MasterSchedule, &next.master_schedule)?;
        }
        batch.commit(&mut self.store)?;
        debug!(edit = %edit.target, propagate = edit.propagate, "applied edit");
        self.board.layers = next;
        self.history.commit(self.board.layers.clone());
        Ok(())
    }

    /// Restore the previous layers. Returns false at the oldest entry.
    pub fn undo(&mut self) -> Result<bool, StoreError> {
        let Some(layers) = self.history.undo().cloned() else {
            return Ok(false);
        };
        if let Err(e) = self.persist_layers(&layers) {
            self.history.redo();
            return Err(e);
        }
        self.board.layers = layers;
        info!(cursor = self.history.cursor(), "undo");
        Ok(true)
    }

    pub fn redo(&mut self) -> Result<bool, StoreError> {
        let Some(layers) = self.history.redo().cloned() else {
            return Ok(false);
        };
        if let Err(e) = self.persist_layers(&layers) {
            self.history.undo();
            return Err(e);
        }
        self.board.layers = layers;
        info!(cursor = self.history.cursor(), "redo");
        Ok(true)
    }

    fn persist_layers(&mut self, layers: &Layers) -> Result<(), StoreError> {
        WriteBatch::layers(layers)?.commit(&mut self.store)
    }

    /// Open the configuration panel on the live master and residents
    pub fn open_config(&self) -> ConfigSession {
        ConfigSession::with_limit(
            &self.board.layers.master_schedule,
            &self.board.residents,
            self.settings.history.limit,
        )
    }

    /// Save a configuration session: master and residents are persisted and recorded
    pub fn save_config(&mut self, session: ConfigSession) -> Result<(), StoreError> {
        let (master, residents) = session.into_parts();
        let mut batch = WriteBatch::new();
        batch.put(StoreKey::MasterSchedule, &master)?;
        batch.put(StoreKey::ResidentList, &residents)?;
        batch.commit(&mut self.store)?;
        self.board.layers.master_schedule = master;
        self.board.residents = residents;
        self.history.commit(self.board.layers.clone());
        info!(residents = self.board.residents.len(), "saved configuration");
        Ok(())
    }

    pub fn set_update_label(&mut self, label: &str) -> Result<(), StoreError> {
        save_value(&mut self.store, StoreKey::UpdateDateLabel, label)?;
        self.board.update_label = label.to_string();
        Ok(())
    }

    pub fn set_facility_name(&mut self, name: &str) -> Result<(), StoreError> {
        save_value(&mut self.store, StoreKey::FacilityName, name)?;
        self.board.facility_name = name.to_string();
        Ok(())
    }

    /// Weekly compliance report for a month with the configured minimum
    pub fn check(&self, month: YearMonth) -> Vec<WeekReport> {
        check_month(
            &self.board.layers,
            month,
            &self.board.residents,
            self.settings.check.min_visits_per_week,
        )
    }

    pub fn export(&self, now: DateTime<Utc>) -> ExportDocument {
        ExportDocument::from_board(&self.board, now)
    }

    /// Import a backup. The document is parsed completely before anything changes; then
    /// every present field is written in one batch, replaces live state, and one history
    /// entry is recorded. A failed write leaves both the store and live state as they were.
    pub fn import_json(&mut self, json: &str) -> Result<ImportSummary, ImportError> {
        let doc = ImportDocument::parse(json)?;
        let mut board = self.board.clone();
        let mut batch = WriteBatch::new();

        if let Some(master) = doc.master_schedule {
            batch.put(StoreKey::MasterSchedule, &master)?;
            board.layers.master_schedule = master;
        }
        if let Some(overrides) = doc.overrides {
            batch.put(StoreKey::Overrides, &overrides)?;
            board.layers.overrides = overrides;
        }
        if let Some(weekly) = doc.weekly_data {
            batch.put(StoreKey::WeeklyData, &weekly)?;
            board.layers.weekly_data = weekly;
        }
        if let Some(residents) = doc.resident_list {
            batch.put(StoreKey::ResidentList, &residents)?;
            board.residents = residents;
        }
        if let Some(label) = doc.manual_update_date.filter(|s| !s.is_empty()) {
            batch.put(StoreKey::UpdateDateLabel, &label)?;
            board.update_label = label;
        }
        if let Some(name) = doc.facility_name.filter(|s| !s.is_empty()) {
            batch.put(StoreKey::FacilityName, &name)?;
            board.facility_name = name;
        }

        let replaced: Vec<StoreKey> = batch.keys().collect();
        batch.commit(&mut self.store)?;
        self.board = board;
        self.history.commit(self.board.layers.clone());
        info!(fields = replaced.len(), "imported backup");
        Ok(ImportSummary { replaced })
    }
}
