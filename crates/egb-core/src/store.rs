use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::{messaging::types::UserId, Result};

/// Electives a member can subscribe to for class notifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Elective {
    DataMining,
    Networking,
    SoftModelling,
}

impl Elective {
    pub const ALL: [Elective; 3] = [Self::DataMining, Self::Networking, Self::SoftModelling];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "datamining" | "data-mining" | "mining" | "d" => Some(Self::DataMining),
            "networking" | "net" | "n" => Some(Self::Networking),
            "softmodelling" | "soft-modelling" | "modelling" | "s" => Some(Self::SoftModelling),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::DataMining => "Data Mining",
            Self::Networking => "Networking",
            Self::SoftModelling => "Soft. Modelling",
        }
    }
}

/// The one shared document. Field names are stable: they are the on-disk
/// JSON schema.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
struct StoreDoc {
    is_muted: bool,
    is_notifs_on: bool,
    super_admins: Vec<i64>,
    elective_data_mining: Vec<i64>,
    elective_networking: Vec<i64>,
    elective_soft_modelling: Vec<i64>,
    forwarded_links: Vec<String>,
    forwarded_announcements: Vec<String>,
}

impl Default for StoreDoc {
    fn default() -> Self {
        Self {
            is_muted: false,
            is_notifs_on: true,
            super_admins: Vec::new(),
            elective_data_mining: Vec::new(),
            elective_networking: Vec::new(),
            elective_soft_modelling: Vec::new(),
            forwarded_links: Vec::new(),
            forwarded_announcements: Vec::new(),
        }
    }
}

impl StoreDoc {
    fn list_for(&mut self, elective: Elective) -> &mut Vec<i64> {
        match elective {
            Elective::DataMining => &mut self.elective_data_mining,
            Elective::Networking => &mut self.elective_networking,
            Elective::SoftModelling => &mut self.elective_soft_modelling,
        }
    }
}

/// The bot's shared mutable state: mute flag, notification flag, admin list,
/// per-elective subscriber lists and the forwarded-content logs used for
/// dedup. One JSON document on disk, written through on every mutation.
pub struct BotStore {
    path: PathBuf,
    doc: Mutex<StoreDoc>,
}

impl BotStore {
    /// Open the store, creating the document if missing. The seed admin is
    /// guaranteed to be present afterwards.
    pub async fn open(path: impl Into<PathBuf>, seed_admin: UserId) -> Result<Self> {
        let path = path.into();
        let mut doc = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoreDoc::default(),
            Err(e) => return Err(e.into()),
        };

        if !doc.super_admins.contains(&seed_admin.0) {
            doc.super_admins.push(seed_admin.0);
        }

        let store = Self {
            path,
            doc: Mutex::new(doc),
        };
        {
            let doc = store.doc.lock().await;
            store.persist(&doc).await?;
        }
        Ok(store)
    }

    async fn persist(&self, doc: &StoreDoc) -> Result<()> {
        let raw = serde_json::to_string_pretty(doc)?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }

    pub async fn is_muted(&self) -> bool {
        self.doc.lock().await.is_muted
    }

    pub async fn set_muted(&self, muted: bool) -> Result<()> {
        let mut doc = self.doc.lock().await;
        doc.is_muted = muted;
        self.persist(&doc).await
    }

    pub async fn is_notifs_on(&self) -> bool {
        self.doc.lock().await.is_notifs_on
    }

    pub async fn set_notifs_on(&self, on: bool) -> Result<()> {
        let mut doc = self.doc.lock().await;
        doc.is_notifs_on = on;
        self.persist(&doc).await
    }

    pub async fn is_admin(&self, user: UserId) -> bool {
        self.doc.lock().await.super_admins.contains(&user.0)
    }

    /// Returns false if the user already was an admin.
    pub async fn promote(&self, user: UserId) -> Result<bool> {
        let mut doc = self.doc.lock().await;
        if doc.super_admins.contains(&user.0) {
            return Ok(false);
        }
        doc.super_admins.push(user.0);
        self.persist(&doc).await?;
        Ok(true)
    }

    /// Returns false if the user was not an admin.
    pub async fn demote(&self, user: UserId) -> Result<bool> {
        let mut doc = self.doc.lock().await;
        let before = doc.super_admins.len();
        doc.super_admins.retain(|id| *id != user.0);
        if doc.super_admins.len() == before {
            return Ok(false);
        }
        self.persist(&doc).await?;
        Ok(true)
    }

    /// Returns false if the user already subscribes to this elective.
    pub async fn subscribe(&self, elective: Elective, user: UserId) -> Result<bool> {
        let mut doc = self.doc.lock().await;
        let list = doc.list_for(elective);
        if list.contains(&user.0) {
            return Ok(false);
        }
        list.push(user.0);
        self.persist(&doc).await?;
        Ok(true)
    }

    /// Returns false if the user did not subscribe to this elective.
    pub async fn unsubscribe(&self, elective: Elective, user: UserId) -> Result<bool> {
        let mut doc = self.doc.lock().await;
        let list = doc.list_for(elective);
        let before = list.len();
        list.retain(|id| *id != user.0);
        if list.len() == before {
            return Ok(false);
        }
        self.persist(&doc).await?;
        Ok(true)
    }

    pub async fn subscribers(&self, elective: Elective) -> Vec<i64> {
        let mut doc = self.doc.lock().await;
        doc.list_for(elective).clone()
    }

    /// Record a link if unseen. Returns whether it was new (i.e. worth
    /// forwarding).
    pub async fn record_link(&self, link: &str) -> Result<bool> {
        let mut doc = self.doc.lock().await;
        if doc.forwarded_links.iter().any(|l| l == link) {
            return Ok(false);
        }
        doc.forwarded_links.push(link.to_string());
        self.persist(&doc).await?;
        Ok(true)
    }

    /// Record an announcement body if unseen. Returns whether it was new.
    pub async fn record_announcement(&self, body: &str) -> Result<bool> {
        let mut doc = self.doc.lock().await;
        if doc.forwarded_announcements.iter().any(|a| a == body) {
            return Ok(false);
        }
        doc.forwarded_announcements.push(body.to_string());
        self.persist(&doc).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp_file(prefix: &str) -> PathBuf {
        let ts = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let pid = std::process::id();
        PathBuf::from(format!("/tmp/{prefix}-{pid}-{ts}.json"))
    }

    #[tokio::test]
    async fn seed_admin_is_always_present() {
        let path = tmp_file("egb-store-seed");
        let store = BotStore::open(&path, UserId(42)).await.unwrap();
        assert!(store.is_admin(UserId(42)).await);
        assert!(!store.is_admin(UserId(7)).await);
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn mutations_survive_reopen() {
        let path = tmp_file("egb-store-reopen");
        {
            let store = BotStore::open(&path, UserId(1)).await.unwrap();
            store.set_muted(true).await.unwrap();
            store.set_notifs_on(false).await.unwrap();
            store
                .subscribe(Elective::SoftModelling, UserId(5))
                .await
                .unwrap();
        }
        let store = BotStore::open(&path, UserId(1)).await.unwrap();
        assert!(store.is_muted().await);
        assert!(!store.is_notifs_on().await);
        assert_eq!(store.subscribers(Elective::SoftModelling).await, vec![5]);
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn forwarded_content_dedups_by_containment() {
        let path = tmp_file("egb-store-dedup");
        let store = BotStore::open(&path, UserId(1)).await.unwrap();

        assert!(store.record_link("https://example.com/a").await.unwrap());
        assert!(!store.record_link("https://example.com/a").await.unwrap());
        assert!(store.record_link("https://example.com/b").await.unwrap());

        assert!(store.record_announcement("❗ exam moved").await.unwrap());
        assert!(!store.record_announcement("❗ exam moved").await.unwrap());
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn subscribe_twice_is_rejected() {
        let path = tmp_file("egb-store-sub");
        let store = BotStore::open(&path, UserId(1)).await.unwrap();
        assert!(store.subscribe(Elective::Networking, UserId(9)).await.unwrap());
        assert!(!store.subscribe(Elective::Networking, UserId(9)).await.unwrap());
        assert!(store.unsubscribe(Elective::Networking, UserId(9)).await.unwrap());
        assert!(!store
            .unsubscribe(Elective::Networking, UserId(9))
            .await
            .unwrap());
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn promote_and_demote_round_trip() {
        let path = tmp_file("egb-store-admin");
        let store = BotStore::open(&path, UserId(1)).await.unwrap();
        assert!(store.promote(UserId(2)).await.unwrap());
        assert!(!store.promote(UserId(2)).await.unwrap());
        assert!(store.is_admin(UserId(2)).await);
        assert!(store.demote(UserId(2)).await.unwrap());
        assert!(!store.demote(UserId(2)).await.unwrap());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn elective_aliases_parse() {
        assert_eq!(Elective::parse("s"), Some(Elective::SoftModelling));
        assert_eq!(Elective::parse("Networking"), Some(Elective::Networking));
        assert_eq!(Elective::parse("data-mining"), Some(Elective::DataMining));
        assert_eq!(Elective::parse("basket weaving"), None);
    }
}
