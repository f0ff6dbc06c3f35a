use crate::walker::FileWalker;
use anyhow::{anyhow, Result};
use java_harness::{AssertionConfig, JavaHarness};
use protocol::Class;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// One extracted class, keyed by its signature for downstream joins.
#[derive(Debug, Clone, Serialize)]
pub struct ScanRecord {
    pub file: String,
    pub signature: String,
    pub sig_hash: String,
    pub class: Class,
}

pub fn scan(root: &Path, config: &AssertionConfig) -> Result<Vec<ScanRecord>> {
    let files = FileWalker::new(root.to_path_buf()).walk()?;
    let records = scan_files(&files, config)?;
    info!("Extracted {} classes from {} files", records.len(), files.len());
    Ok(records)
}

/// Builds the file-named class of every file, in input order.
///
/// Each rayon worker owns its own harness. Files that cannot be read or do
/// not declare their target class are skipped.
pub fn scan_files(files: &[PathBuf], config: &AssertionConfig) -> Result<Vec<ScanRecord>> {
    let results: Vec<Option<ScanRecord>> = files
        .par_iter()
        .map_init(
            || JavaHarness::with_config(config.clone()),
            |harness, path| -> Result<Option<ScanRecord>> {
                let harness = harness.as_mut().map_err(|e| anyhow!("{:#}", e))?;
                Ok(scan_file(harness, path))
            },
        )
        .collect::<Result<_>>()?;

    Ok(results.into_iter().flatten().collect())
}

fn scan_file(harness: &mut JavaHarness, path: &Path) -> Option<ScanRecord> {
    let target_class_name = FileWalker::target_class_name(path)?;
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Could not read {:?}: {}. Skipped.", path, e);
            return None;
        }
    };

    let Some(class) = harness.parse_class(&content, Some(&target_class_name)) else {
        warn!("No class {} in {:?}. Skipped.", target_class_name, path);
        return None;
    };

    Some(ScanRecord {
        file: path.to_string_lossy().to_string(),
        signature: class.signature(),
        sig_hash: class.sig_hash(),
        class,
    })
}
