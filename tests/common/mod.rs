// Shared fakes for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use gig_matcher::models::{ProfileRecord, RawProfileRow, RawSkills};
use gig_matcher::services::{OracleError, RankingOracle, StoreConnector, StoreError, StoreSession};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// How the fake store should behave on the next fetch
#[derive(Clone)]
pub enum StoreBehavior {
    Rows(Vec<RawProfileRow>),
    RefuseConnection,
    FailQuery,
}

/// Store connector that counts opened and closed sessions
pub struct FakeStore {
    behavior: StoreBehavior,
    opened: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
}

impl FakeStore {
    pub fn new(behavior: StoreBehavior) -> Self {
        Self {
            behavior,
            opened: Arc::new(AtomicUsize::new(0)),
            closed: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_rows(rows: Vec<RawProfileRow>) -> Self {
        Self::new(StoreBehavior::Rows(rows))
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

struct FakeSession {
    behavior: StoreBehavior,
    closed: Arc<AtomicUsize>,
}

#[async_trait]
impl StoreConnector for FakeStore {
    async fn connect(&self) -> Result<Box<dyn StoreSession>, StoreError> {
        if matches!(self.behavior, StoreBehavior::RefuseConnection) {
            return Err(StoreError::Unavailable("connection refused".to_string()));
        }
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeSession {
            behavior: self.behavior.clone(),
            closed: self.closed.clone(),
        }))
    }
}

#[async_trait]
impl StoreSession for FakeSession {
    async fn fetch_rows(&mut self) -> Result<Vec<RawProfileRow>, StoreError> {
        match &self.behavior {
            StoreBehavior::Rows(rows) => Ok(rows.clone()),
            _ => Err(StoreError::Read("relation \"gig_workers\" does not exist".to_string())),
        }
    }

    async fn close(self: Box<Self>) -> Result<(), StoreError> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Oracle that records prompts and replays a canned answer
pub struct FakeOracle {
    reply: Result<String, fn() -> OracleError>,
    prompts: Mutex<Vec<String>>,
}

impl FakeOracle {
    pub fn answering(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: fn() -> OracleError) -> Self {
        Self {
            reply: Err(error),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl RankingOracle for FakeOracle {
    async fn rank(&self, prompt: &str) -> Result<String, OracleError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(make) => Err(make()),
        }
    }
}

pub fn raw_row(name: &str, skills: RawSkills) -> RawProfileRow {
    RawProfileRow {
        name: name.to_string(),
        about: Some(format!("{} gets things done", name)),
        skills,
        rating: 4.8,
        trust_score: 90.0,
        ninja_level: "Pro".to_string(),
        task_experience: 120.0,
        availability: "Available".to_string(),
    }
}

pub fn profile(name: &str, skills: &[&str]) -> ProfileRecord {
    ProfileRecord {
        name: name.to_string(),
        about: String::new(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        rating: 4.8,
        trust_score: 90.0,
        ninja_level: "Pro".to_string(),
        task_experience: 120.0,
        availability: "Available".to_string(),
    }
}
