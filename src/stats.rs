use crate::error::ExplorerError;
use serde::Deserialize;
use std::path::Path;

/// Shown when an instance has no icon of its own.
pub const DEFAULT_ICON: &str = "/static/assets/images/lemmy.svg";

/// Activity counters reported by an instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Counts {
    pub users: u64,
    pub comments: u64,
    pub users_active_month: u64,
}

/// One crawled instance. Never mutated once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceRecord {
    pub domain: String,
    pub description: String,
    pub sidebar: Option<String>,
    pub icon: Option<String>,
    pub banner: Option<String>,
    pub counts: Counts,
}

impl InstanceRecord {
    /// Long-form markdown for the details view; the description stands in
    /// when the instance has no sidebar.
    pub fn sidebar_or_description(&self) -> &str {
        match self.sidebar.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => &self.description,
        }
    }

    pub fn icon_or_default(&self) -> &str {
        match self.icon.as_deref() {
            Some(i) if !i.is_empty() => i,
            _ => DEFAULT_ICON,
        }
    }

    /// Where a visitor goes to sign up.
    pub fn join_url(&self) -> String {
        build_url(&self.domain)
    }
}

pub fn build_url(domain: &str) -> String {
    format!("https://{}", domain)
}

/// The full crawl snapshot.
#[derive(Debug, Clone, Default)]
pub struct InstanceStats {
    pub crawled_instances: u64,
    pub users_active_month: u64,
    pub instances: Vec<InstanceRecord>,
}

// ── Wire format ──

#[derive(Deserialize)]
struct StatsFile {
    stats: RawStats,
}

#[derive(Deserialize)]
struct RawStats {
    #[serde(default)]
    crawled_instances: u64,
    #[serde(default)]
    users_active_month: u64,
    #[serde(default)]
    instance_details: Vec<RawInstance>,
}

#[derive(Deserialize)]
struct RawInstance {
    domain: String,
    site_info: RawSiteInfo,
}

#[derive(Deserialize)]
struct RawSiteInfo {
    site_view: RawSiteView,
}

#[derive(Deserialize)]
struct RawSiteView {
    site: RawSite,
    #[serde(default)]
    counts: Counts,
}

#[derive(Deserialize)]
struct RawSite {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    sidebar: Option<String>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    banner: Option<String>,
}

impl From<RawInstance> for InstanceRecord {
    fn from(raw: RawInstance) -> Self {
        let site = raw.site_info.site_view.site;
        Self {
            domain: raw.domain,
            description: site.description.unwrap_or_default(),
            sidebar: site.sidebar,
            icon: site.icon,
            banner: site.banner,
            counts: raw.site_info.site_view.counts,
        }
    }
}

impl InstanceStats {
    pub fn from_json(data: &str) -> Result<Self, ExplorerError> {
        let file: StatsFile = serde_json::from_str(data)?;
        Ok(Self {
            crawled_instances: file.stats.crawled_instances,
            users_active_month: file.stats.users_active_month,
            instances: file
                .stats
                .instance_details
                .into_iter()
                .map(InstanceRecord::from)
                .collect(),
        })
    }

    /// Load a crawl snapshot from disk.
    pub fn load(path: &Path) -> Result<Self, ExplorerError> {
        if !path.exists() {
            return Err(ExplorerError::StatsNotFound(path.to_path_buf()));
        }
        let data = std::fs::read_to_string(path)?;
        let stats = Self::from_json(&data)?;
        tracing::info!(
            path = %path.display(),
            instances = stats.instances.len(),
            "loaded instance stats"
        );
        Ok(stats)
    }
}
