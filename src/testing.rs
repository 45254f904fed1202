//! テスト用のスクレイパー実装とヘルパー

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ScraperError;
use crate::service::ScraperFactory;
use crate::timesjobs::JobRecord;
use crate::traits::Scraper;

#[derive(Debug, Clone)]
pub enum FakeOutcome {
    Jobs(Vec<JobRecord>),
    FailInitialize,
    FailNavigation,
    FailExtraction,
}

/// 起動・終了回数の観測用
#[derive(Debug, Default)]
pub struct Probe {
    launches: AtomicUsize,
    closes: AtomicUsize,
    open: AtomicBool,
}

impl Probe {
    pub fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }
}

pub struct FakeScraper {
    outcome: FakeOutcome,
    probe: Arc<Probe>,
}

impl FakeScraper {
    pub fn factory(outcome: FakeOutcome) -> (ScraperFactory, Arc<Probe>) {
        let probe = Arc::new(Probe::default());
        let shared = probe.clone();
        let factory: ScraperFactory = Arc::new(move || {
            Box::new(FakeScraper {
                outcome: outcome.clone(),
                probe: shared.clone(),
            }) as Box<dyn Scraper>
        });
        (factory, probe)
    }
}

#[async_trait]
impl Scraper for FakeScraper {
    async fn initialize(&mut self) -> Result<(), ScraperError> {
        if let FakeOutcome::FailInitialize = self.outcome {
            return Err(ScraperError::BrowserInit("chrome not found".into()));
        }
        self.probe.launches.fetch_add(1, Ordering::SeqCst);
        self.probe.open.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn navigate(&mut self) -> Result<(), ScraperError> {
        match self.outcome {
            FakeOutcome::FailNavigation => {
                Err(ScraperError::Navigation("net::ERR_NAME_NOT_RESOLVED".into()))
            }
            _ => Ok(()),
        }
    }

    async fn extract(&mut self) -> Result<Vec<JobRecord>, ScraperError> {
        match &self.outcome {
            FakeOutcome::Jobs(jobs) => Ok(jobs.clone()),
            _ => Err(ScraperError::JavaScript("Execution context was destroyed".into())),
        }
    }

    async fn close(&mut self) -> Result<(), ScraperError> {
        self.probe.closes.fetch_add(1, Ordering::SeqCst);
        self.probe.open.store(false, Ordering::SeqCst);
        Ok(())
    }
}

/// 会社名が2件おきに重複する求人リスト
pub fn sample_jobs(n: usize) -> Vec<JobRecord> {
    (0..n)
        .map(|i| JobRecord {
            title: format!("Engineer {}", i),
            company: format!("Company {}", i / 2),
            location: "Bengaluru".to_string(),
            ..Default::default()
        })
        .collect()
}

pub fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "job-scraper-{}-{}-{}",
        name,
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
