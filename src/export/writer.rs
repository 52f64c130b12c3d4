use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::ItemRecord;

pub struct DatabaseWriter;

impl DatabaseWriter {
    pub fn save_to_path(path: impl AsRef<Path>, items: &[ItemRecord]) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("não foi possível criar o diretório {:?}", parent))?;
        }
        let data = serde_json::to_string_pretty(items)
            .context("não foi possível serializar a base de traços em JSON")?;
        fs::write(path, data)
            .with_context(|| format!("não foi possível escrever a base em {:?}", path))?;
        Ok(())
    }
}
