//! Active program persistence with file locking.
//!
//! The active program is the caller-owned record of a built block plus the
//! bookkeeping the engine does not compute: which day and week the user is
//! on.

use crate::history::{RecencyHistory, HISTORY_CAPACITY};
use crate::{Error, Goals, ProgramDay, Result};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use uuid::Uuid;

/// A user's current program
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ActiveProgram {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub goals: Goals,
    pub days: Vec<ProgramDay>,
    /// 0-based index into `days`
    pub current_day: usize,
    /// 1-based week of the current day
    pub current_week: u32,
}

impl ActiveProgram {
    /// Wrap a freshly built program, positioned on its first day
    pub fn new(goals: Goals, days: Vec<ProgramDay>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at,
            goals,
            days,
            current_day: 0,
            current_week: 1,
        }
    }

    pub fn current(&self) -> Option<&ProgramDay> {
        self.days.get(self.current_day)
    }

    pub fn is_finished(&self) -> bool {
        self.current_day + 1 >= self.days.len()
    }

    /// Move to the next day, staying on the last one once reached
    ///
    /// Returns whether the pointer moved.
    pub fn advance(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.current_day += 1;
        self.current_week = self.days[self.current_day].week;
        tracing::debug!(
            "Advanced to day {} (week {})",
            self.current_day + 1,
            self.current_week
        );
        true
    }

    /// Exercises done so far, most recent last, for seeding the next build
    pub fn recent_history(&self) -> RecencyHistory {
        let end = (self.current_day + 1).min(self.days.len());
        let ids: Vec<&str> = self.days[..end]
            .iter()
            .flat_map(|day| day.exercises.iter().map(|e| e.exercise.id.as_str()))
            .collect();
        let start = ids.len().saturating_sub(HISTORY_CAPACITY);
        ids[start..].iter().copied().collect()
    }

    /// Load the active program with shared locking
    ///
    /// Returns `None` if the file doesn't exist.
    /// If the file is corrupted, logs a warning and returns `None`.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            tracing::info!("No active program found at {:?}", path);
            return Ok(None);
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Unable to open active program {:?}: {}", path, e);
                return Ok(None);
            }
        };

        if let Err(e) = file.lock_shared() {
            tracing::warn!("Unable to lock active program {:?}: {}", path, e);
            return Ok(None);
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!("Failed to read active program {:?}: {}", path, e);
            return Ok(None);
        }

        file.unlock()?;

        match serde_json::from_str::<ActiveProgram>(&contents) {
            Ok(program) => {
                tracing::debug!("Loaded active program {} from {:?}", program.id, path);
                Ok(Some(program))
            }
            Err(e) => {
                tracing::warn!("Failed to parse active program {:?}: {}", path, e);
                Ok(None)
            }
        }
    }

    /// Save the active program with exclusive locking
    ///
    /// Atomically writes by:
    /// 1. Writing to a temp file
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    pub fn save(&self, path: &Path) -> Result<()> {
        let parent = path
            .parent()
            .ok_or_else(|| Error::State(format!("{:?} has no parent directory", path)))?;
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string_pretty(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved active program {} to {:?}", self.id, path);
        Ok(())
    }

    /// Load, modify and save back; fails if there is no active program
    pub fn update<F>(path: &Path, f: F) -> Result<Self>
    where
        F: FnOnce(&mut ActiveProgram) -> Result<()>,
    {
        let mut program = Self::load(path)?
            .ok_or_else(|| Error::State("No active program".into()))?;
        f(&mut program)?;
        program.save(path)?;
        Ok(program)
    }
}
