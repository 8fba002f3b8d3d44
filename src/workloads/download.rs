//! Fetch-and-aggregate workload: download a set of images and total their size.
//!
//! Each leaf downloads one image. Failed downloads are logged and counted as
//! zero bytes so one unreachable image never aborts the batch; the separate
//! `failures` tally keeps that loss visible.

use crate::error::{Error, Result};
use crate::forkjoin::ExecutionStrategy;
use serde::Serialize;
use std::io::Read;
use std::ops::Add;
use std::time::Duration;

/// Source of image bytes, keyed by normalized image number `1..=image_count`
pub trait Fetcher: Sync {
    /// Download the image fully and return the number of bytes read
    fn fetch(&self, image_number: u32) -> Result<u64>;
}

impl<F> Fetcher for F
where
    F: Fn(u32) -> Result<u64> + Sync,
{
    fn fetch(&self, image_number: u32) -> Result<u64> {
        self(image_number)
    }
}

/// Aggregate of a batch of downloads
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DownloadTotal {
    pub bytes: u64,
    /// Leaves whose fetch failed and contributed zero bytes
    pub failures: usize,
}

impl Add for DownloadTotal {
    type Output = DownloadTotal;

    fn add(self, other: DownloadTotal) -> DownloadTotal {
        DownloadTotal {
            bytes: self.bytes + other.bytes,
            failures: self.failures + other.failures,
        }
    }
}

/// Map any identifier into `1..=image_count` as `(|id| mod image_count) + 1`
pub fn normalize_image_number(id: i64, image_count: u32) -> u32 {
    (id.unsigned_abs() % u64::from(image_count)) as u32 + 1
}

/// Identifiers `1..=count`, the default download batch
pub fn sample_ids(count: usize) -> Vec<i64> {
    (1..=count as i64).collect()
}

/// Download every identifier in `ids` and sum the bytes received.
pub fn download_all<F: Fetcher>(
    strategy: &ExecutionStrategy,
    ids: &[i64],
    image_count: u32,
    fetcher: &F,
) -> Result<DownloadTotal> {
    if image_count == 0 {
        return Err(Error::config("download.image_count", "must be at least 1"));
    }

    strategy.reduce(
        ids.len(),
        |i| Ok(download_one(fetcher, ids[i], image_count)),
        |left, right| Ok(left + right),
    )
}

fn download_one<F: Fetcher>(fetcher: &F, id: i64, image_count: u32) -> DownloadTotal {
    let image_number = normalize_image_number(id, image_count);
    match fetcher.fetch(image_number) {
        Ok(bytes) => DownloadTotal { bytes, failures: 0 },
        Err(e) => {
            tracing::warn!("Image {} counted as 0 bytes: {}", image_number, e);
            DownloadTotal {
                bytes: 0,
                failures: 1,
            }
        }
    }
}

/// Blocking HTTP fetcher
pub struct HttpFetcher {
    agent: ureq::Agent,
    url_template: String,
    retries: u32,
}

impl HttpFetcher {
    /// `url_template` must contain `{n}`, replaced by the zero-padded image number
    pub fn new(url_template: impl Into<String>, timeout: Duration, retries: u32) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            url_template: url_template.into(),
            retries,
        }
    }

    pub fn url_for(&self, image_number: u32) -> String {
        self.url_template
            .replace("{n}", &format!("{image_number:03}"))
    }

    fn fetch_once(&self, url: &str) -> Result<u64> {
        let fetch_error = |message: String| Error::Fetch {
            url: url.to_string(),
            message,
        };

        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| fetch_error(e.to_string()))?;

        let mut reader = response.into_reader();
        let mut buffer = [0u8; 1024];
        let mut total_bytes = 0u64;
        loop {
            match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => total_bytes += n as u64,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(fetch_error(e.to_string())),
            }
        }
        Ok(total_bytes)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, image_number: u32) -> Result<u64> {
        let url = self.url_for(image_number);
        let mut attempt = 0;
        loop {
            match self.fetch_once(&url) {
                Ok(bytes) => {
                    tracing::trace!("{}: {} bytes", url, bytes);
                    return Ok(bytes);
                }
                Err(e) if attempt < self.retries => {
                    attempt += 1;
                    tracing::debug!("Retrying {} ({}/{}): {}", url, attempt, self.retries, e);
                }
                Err(e) => return Err(e),
            }
        }
    }
}
