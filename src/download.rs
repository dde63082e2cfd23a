//! Blocking downloader for WEO release files.
//!
//! One streamed GET per file, written straight to the destination path. There
//! is no retry and no atomic rename: an interrupted transfer leaves a
//! truncated file behind, and [`Client::fetch`] will later treat it as
//! complete. Check [`size_mb`] if that matters.
//!
//! Transport and filesystem errors are returned as-is inside `anyhow::Error`
//! and can be recovered with `downcast_ref::<reqwest::Error>()` or
//! `downcast_ref::<std::io::Error>()`.
//!
//! Typical usage:
//! ```no_run
//! # use weo_rs::{Client, Release};
//! let client = Client::new()?;
//! let release: Release = "2019-Oct".parse()?;
//! client.download(release, weo_rs::Flavor::Countries, "weo_2019_2.csv", false)?;
//! # Ok::<(), anyhow::Error>(())
//! ```
use crate::address::{Flavor, address};
use crate::dataset::Dataset;
use crate::release::{self, Release};
use anyhow::{Context, Result};
use log::info;
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Client {
    http: HttpClient,
}

impl Client {
    /// Client with a 10s connect timeout and a 10 minute overall timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(600))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(timeout) // whole transfer, files are tens of MB
            .connect_timeout(Duration::from_secs(10))
            .redirect(Policy::limited(5))
            .user_agent(concat!("weo_rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build http client")?;
        Ok(Self { http })
    }

    /// Download `flavor` of `release` to `path`.
    ///
    /// ### Errors
    /// - [`crate::DateError`] if the release is before October 2007 or not yet published
    /// - `io::ErrorKind::AlreadyExists` if `path` exists and `overwrite` is false
    /// - HTTP status or network failure
    pub fn download<P: AsRef<Path>>(
        &self,
        release: Release,
        flavor: Flavor,
        path: P,
        overwrite: bool,
    ) -> Result<PathBuf> {
        release.validate()?;
        let path = path.as_ref();
        if path.exists() && !overwrite {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists", path.display()),
            )
            .into());
        }
        let url = address(release, flavor);
        self.stream_to_file(&url, path)?;
        info!(
            "downloaded {} WEO dataset to {} ({} MB)",
            release,
            path.display(),
            size_mb(path)?
        );
        Ok(path.to_path_buf())
    }

    /// Download the by-country table unless `path` already exists (or `force`).
    pub fn fetch<P: AsRef<Path>>(&self, release: Release, path: P, force: bool) -> Result<PathBuf> {
        let path = path.as_ref();
        if path.exists() && !force {
            info!("{} exists, skipping download", path.display());
            return Ok(path.to_path_buf());
        }
        self.download(release, Flavor::Countries, path, true)
    }

    /// Download every published release into `dir`, skipping files already present.
    /// Returns the paths in chronological order.
    pub fn download_all<P: AsRef<Path>>(&self, dir: P, flavor: Flavor) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        let mut out = Vec::new();
        for r in release::all_releases() {
            let path = dir.join(file_name(r, flavor));
            if path.exists() {
                info!("{} exists, skipping", path.display());
            } else {
                self.download(r, flavor, &path, false)
                    .with_context(|| format!("download {}", r))?;
            }
            out.push(path);
        }
        Ok(out)
    }

    fn stream_to_file(&self, url: &str, path: &Path) -> Result<()> {
        info!("GET {}", url);
        let mut resp = self.http.get(url).send()?.error_for_status()?;
        let mut out = BufWriter::new(File::create(path)?);
        resp.copy_to(&mut out)?;
        out.flush()?;
        Ok(())
    }
}

/// Local file name used by [`Client::download_all`], e.g. `weo_2019_2.csv`.
pub fn file_name(release: Release, flavor: Flavor) -> String {
    let prefix = match flavor {
        Flavor::Countries => "weo",
        Flavor::Commodities => "weo_commodities",
    };
    format!("{}_{}_{}.csv", prefix, release.year, release.half.number())
}

/// File size in MiB, one decimal.
pub fn size_mb<P: AsRef<Path>>(path: P) -> io::Result<f64> {
    let bytes = std::fs::metadata(path)?.len() as f64;
    Ok((bytes / (1024.0 * 1024.0) * 10.0).round() / 10.0)
}

/// Download the by-country table of `release` to `path` if missing, then open it.
pub fn get<P: AsRef<Path>>(release: Release, path: P) -> Result<Dataset> {
    let path = Client::new()?.fetch(release, path, false)?;
    Ok(Dataset::open(&path)?)
}
