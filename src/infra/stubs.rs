#![cfg(test)]

use anyhow::Result;

use crate::{
    domain::session::SessionRecord,
    infra::{
        config::AppConfig,
        contracts::{ConfigAdapter, SessionStoreAdapter},
        error::AppError,
    },
};

#[derive(Debug, Clone, Default)]
pub struct StubConfigAdapter;

impl ConfigAdapter for StubConfigAdapter {
    fn load(&self) -> Result<AppConfig> {
        Ok(AppConfig::default())
    }
}

/// In-memory session store for orchestrator tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    pub record: Option<SessionRecord>,
    pub save_count: usize,
    pub clear_count: usize,
}

impl SessionStoreAdapter for MemorySessionStore {
    fn load(&self) -> Option<SessionRecord> {
        self.record.clone()
    }

    fn save(&mut self, record: &SessionRecord) -> Result<(), AppError> {
        self.record = Some(record.clone());
        self.save_count += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<bool, AppError> {
        self.clear_count += 1;
        Ok(self.record.take().is_some())
    }
}
