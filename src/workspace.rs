use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};

use crate::kv::{FileKvStore, write_atomic};
use crate::model::QuotebookConfig;
use crate::store::EntryStore;

const DATA_DIR: &str = ".quotebook";
const CONFIG_FILE: &str = "config.json";
const KV_DIR: &str = "kv";

/// On-disk home of one quote collection: `config.json` plus the key/value directory.
#[derive(Clone, Debug)]
pub struct Workspace {
    root: PathBuf,
    kv: Arc<FileKvStore>,
}

impl Workspace {
    pub fn data_dir(parent: &Path) -> PathBuf {
        parent.join(DATA_DIR)
    }

    pub fn init(parent: &Path, force: bool) -> Result<Self> {
        let root = Self::data_dir(parent);
        if root.exists() && !force {
            return Err(anyhow!(
                "{} already exists at {} (use --force to re-init)",
                DATA_DIR,
                root.display()
            ));
        }
        if root.exists() {
            fs::remove_dir_all(&root).with_context(|| format!("remove {}", root.display()))?;
        }
        fs::create_dir_all(&root).with_context(|| format!("create {}", root.display()))?;

        let ws = Self::at(root)?;
        ws.write_config(&QuotebookConfig::default())?;
        Ok(ws)
    }

    pub fn open(parent: &Path) -> Result<Self> {
        let root = Self::data_dir(parent);
        if !root.is_dir() {
            return Err(anyhow!(
                "No {} directory found at {} (run `quotebook init`)",
                DATA_DIR,
                root.display()
            ));
        }
        Self::at(root)
    }

    /// Walks up from `start` to the nearest directory holding a data dir.
    pub fn discover(start: &Path) -> Result<Self> {
        let mut cur = Some(start);
        while let Some(dir) = cur {
            if Self::data_dir(dir).is_dir() {
                return Self::open(dir);
            }
            cur = dir.parent();
        }
        Err(anyhow!(
            "No {} directory found in {} or any parent (run `quotebook init`)",
            DATA_DIR,
            start.display()
        ))
    }

    fn at(root: PathBuf) -> Result<Self> {
        let kv = FileKvStore::open(&root.join(KV_DIR))?;
        Ok(Self {
            root,
            kv: Arc::new(kv),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn read_config(&self) -> Result<QuotebookConfig> {
        let path = self.root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(QuotebookConfig::default());
        }
        let bytes = fs::read(&path).context("read config.json")?;
        let cfg: QuotebookConfig = serde_json::from_slice(&bytes).context("parse config.json")?;
        if cfg.version != 1 {
            anyhow::bail!("unsupported config version {}", cfg.version);
        }
        Ok(cfg)
    }

    pub fn write_config(&self, cfg: &QuotebookConfig) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(cfg).context("serialize config")?;
        write_atomic(&self.root.join(CONFIG_FILE), &bytes).context("write config.json")?;
        Ok(())
    }

    pub fn open_store(&self) -> Result<EntryStore> {
        EntryStore::open(self.kv.clone()).context("open quote store")
    }
}
