use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::info;
use url::Url;

use crate::models::MemberId;

/// Identity of the signed-in member, handed to commands read-only
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    user_id: Option<MemberId>,
}

impl Session {
    pub fn new(user_id: MemberId) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    pub fn user_id(&self) -> Option<MemberId> {
        self.user_id
    }

    pub fn require_user(&self) -> Result<MemberId> {
        self.user_id
            .ok_or_else(|| anyhow!("no signed-in member; run `dispute-desk session set <id>` first"))
    }
}

/// Accepts either a bare member id or the redirect URL the sign-in flow
/// lands on, which carries `user_id` (or the older `userId`).
pub fn parse_user_id(input: &str) -> Result<MemberId> {
    let input = input.trim();
    if let Ok(id) = input.parse::<MemberId>() {
        return Ok(id);
    }

    let url = Url::parse(input).with_context(|| format!("not a member id or URL: {input}"))?;
    let value = ["user_id", "userId"]
        .iter()
        .find_map(|key| {
            url.query_pairs()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.into_owned())
        })
        .ok_or_else(|| anyhow!("no user_id in {input}"))?;

    value
        .trim()
        .parse()
        .with_context(|| format!("invalid user_id {value:?}"))
}

/// JSON file holding the session. `save` and `clear` are only called from
/// the `session` command.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty session
    pub fn load(&self) -> Result<Session> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents)
                .with_context(|| format!("parse failed for {}", self.path.display())),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Session::default()),
            Err(err) => {
                Err(err).with_context(|| format!("failed to read {}", self.path.display()))
            }
        }
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(session).context("failed to encode session")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        info!(path = %self.path.display(), user_id = ?session.user_id, "Session saved");
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(err).with_context(|| format!("failed to remove {}", self.path.display()))
            }
        }
    }
}
