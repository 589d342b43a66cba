//! Persisted login flag.
//!
//! The only state that survives a restart. Stored as `session.json` in the
//! data directory and replaced atomically on every change.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;

pub const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub logged_in: bool,
    #[serde(default)]
    pub logged_in_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct Session {
    path: PathBuf,
    state: SessionState,
}

impl Session {
    /// Load the session from `data_dir`.
    ///
    /// A missing file means logged out. So does an unreadable one, with a warning.
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join(SESSION_FILE);
        let state = if !path.exists() {
            SessionState::default()
        } else {
            match read_state(&path) {
                Ok(state) => state,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "ignoring unreadable session file");
                    SessionState::default()
                }
            }
        };
        Self { path, state }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.logged_in
    }

    pub fn login(&mut self) -> Result<()> {
        self.state = SessionState {
            logged_in: true,
            logged_in_at: Some(Utc::now()),
        };
        self.save()?;
        info!(path = %self.path.display(), "logged in");
        Ok(())
    }

    pub fn logout(&mut self) -> Result<()> {
        self.state = SessionState::default();
        self.save()?;
        info!(path = %self.path.display(), "logged out");
        Ok(())
    }

    /// Write via temp file + rename.
    fn save(&self) -> Result<()> {
        let tmp = self.path.with_extension("json.tmp");
        let mut f = File::create(&tmp)?;
        let data = serde_json::to_string_pretty(&self.state)?;
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, &self.path)?;
        Ok(())
    }
}

fn read_state(path: &Path) -> Result<SessionState> {
    let buf = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&buf)?)
}
