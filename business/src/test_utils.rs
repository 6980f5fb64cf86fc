//! In-memory CRUD backend and helpers for screen tests.

#![cfg(all(test, not(target_arch = "wasm32")))]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::json;

use crate::api::{ApiError, ApiResult, CreateApi, DeleteApi, ListApi, Page, UpdateApi};
use crate::record::{Record, RowId};
use crate::resource::{ResourceConfig, ResourceSchema};
use crate::screen::TableScreen;
use crate::search::SearchParams;

/// Backend keeping rows in memory and counting calls.
#[derive(Debug, Default)]
pub struct MemoryApi {
    pub rows: Mutex<Vec<Record>>,
    pub gets: AtomicUsize,
    pub get_ones: AtomicUsize,
    pub posts: AtomicUsize,
    pub puts: AtomicUsize,
    pub deletes: AtomicUsize,
    /// When set, every call except `get` fails with this server message.
    pub reject_with: Mutex<Option<String>>,
}

impl MemoryApi {
    pub fn with_rows(count: i64) -> Self {
        let rows = (1..=count)
            .map(|id| sample_row(id, &format!("node-{id}")))
            .collect();
        Self {
            rows: Mutex::new(rows),
            ..Self::default()
        }
    }

    pub fn reject(&self, msg: Option<&str>) {
        *self.reject_with.lock().unwrap() = Some(msg.unwrap_or_default().to_owned());
    }

    fn check(&self) -> ApiResult<()> {
        match self.reject_with.lock().unwrap().as_ref() {
            Some(msg) if msg.is_empty() => Err(ApiError::Rejected { msg: None }),
            Some(msg) => Err(ApiError::Rejected {
                msg: Some(msg.clone()),
            }),
            None => Ok(()),
        }
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ListApi for MemoryApi {
    async fn get(&self, search: &SearchParams) -> ApiResult<Page> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        let rows = self.rows.lock().unwrap();
        let offset = usize::try_from(search.offset).unwrap_or(usize::MAX);
        let limit = search.limit as usize;
        Ok(Page {
            rows: rows.iter().skip(offset).take(limit).cloned().collect(),
            count: rows.len() as u64,
        })
    }

    async fn get_one(&self, id: RowId) -> ApiResult<Record> {
        self.get_ones.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|row| row.id() == Some(id))
            .cloned()
            .ok_or(ApiError::Rejected {
                msg: Some("not found".to_owned()),
            })
    }
}

#[async_trait]
impl CreateApi for MemoryApi {
    async fn post(&self, data: &Record) -> ApiResult<()> {
        self.posts.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().filter_map(Record::id).max().unwrap_or(0) + 1;
        let mut row = data.clone();
        row.insert("id", id);
        rows.push(row);
        Ok(())
    }
}

#[async_trait]
impl UpdateApi for MemoryApi {
    async fn put(&self, id: RowId, data: &Record) -> ApiResult<()> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|row| row.id() == Some(id))
            .ok_or(ApiError::Rejected { msg: None })?;
        *row = data.clone();
        row.insert("id", id);
        Ok(())
    }
}

#[async_trait]
impl DeleteApi for MemoryApi {
    async fn delete(&self, id: RowId) -> ApiResult<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.rows.lock().unwrap().retain(|row| row.id() != Some(id));
        Ok(())
    }
}

pub fn sample_row(id: RowId, name: &str) -> Record {
    Record::try_from(json!({
        "id": id,
        "name": name,
        "traffic": 1.5,
        "updated": "2024-05-06 07:08:09",
        "expire_date": "0001-01-01",
    }))
    .unwrap()
}

pub fn node_schema() -> ResourceSchema {
    let config: ResourceConfig = serde_json::from_value(json!({
        "form": ["name", "traffic", "expire_date", "enabled"],
        "info": ["name", "traffic", "updated"],
        "search": ["name"],
        "example": {"name": "", "traffic": 10, "enabled": true},
    }))
    .unwrap();
    ResourceSchema::new(config)
}

/// Sync until no request is in flight and nothing is queued.
pub async fn settle(screen: &mut TableScreen) {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        tokio::time::sleep(Duration::from_millis(5)).await;
        screen.sync();
        if screen.is_idle() {
            return;
        }
        assert!(Instant::now() < deadline, "timed out waiting for the screen");
    }
}
