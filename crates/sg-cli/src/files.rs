use std::fs;
use std::path::Path;

use sg_core::{Registry, StoredRecord};

/// Load a registry JSON file, or `None` to use the built-in tables.
pub fn load_registry(path: Option<&str>) -> Result<Option<Registry>, String> {
    let Some(path) = path else {
        return Ok(None);
    };

    let text = read_text(Path::new(path))?;
    let registry = Registry::from_json(&text)
        .map_err(|e| format!("Invalid registry '{}': {}", path, e))?;

    log::info!("Loaded registry from '{}' ({} platforms)", path, registry.platforms().count());
    Ok(Some(registry))
}

/// URLs from the command line followed by those in `input`, one per line.
/// Blank lines and `#` comments are skipped.
pub fn collect_urls(urls: &[String], input: Option<&str>) -> Result<Vec<String>, String> {
    let mut out = urls.to_vec();

    if let Some(path) = input {
        let text = read_text(Path::new(path))?;
        out.extend(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_string),
        );
    }

    if out.is_empty() {
        return Err("No URLs given".to_string());
    }
    Ok(out)
}

/// Read stored records from a JSON Lines file.
pub fn read_records(path: &str) -> Result<Vec<StoredRecord>, String> {
    let text = read_text(Path::new(path))?;
    let mut out = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let record: StoredRecord = serde_json::from_str(trimmed)
            .map_err(|e| format!("{}:{}: invalid record: {}", path, idx + 1, e))?;
        out.push(record);
    }

    if out.is_empty() {
        return Err(format!("Loaded 0 records from '{}'", path));
    }
    Ok(out)
}

pub fn write_text(path: &Path, text: &str) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create '{}': {}", parent.display(), e))?;
    }
    fs::write(path, text)
        .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))
}

pub fn read_text(path: &Path) -> Result<String, String> {
    fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))
}
