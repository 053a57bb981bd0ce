//! Downloading and unpacking toolchain archives.

use std::io::Cursor;
use std::path::{Component, Path};

use anyhow::{bail, Context, Result};
use flate2::read::GzDecoder;
use tar::Archive;

/// Download `url` into memory.
pub fn download(url: &str) -> Result<Vec<u8>> {
    tracing::info!("Downloading {}", url);

    let response =
        reqwest::blocking::get(url).with_context(|| format!("failed to download {}", url))?;

    if !response.status().is_success() {
        bail!("failed to download {}: HTTP {}", url, response.status());
    }

    let bytes = response
        .bytes()
        .with_context(|| format!("failed to read response body from {}", url))?;
    Ok(bytes.to_vec())
}

/// Extract a gzipped tarball into `dest`, optionally stripping a leading
/// directory from every entry.
pub fn extract_tarball(data: &[u8], dest: &Path, strip_prefix: Option<&str>) -> Result<()> {
    let mut archive = Archive::new(GzDecoder::new(Cursor::new(data)));

    std::fs::create_dir_all(dest)
        .with_context(|| format!("failed to create destination directory: {}", dest.display()))?;
    let canonical_dest = dest
        .canonicalize()
        .with_context(|| format!("failed to resolve destination: {}", dest.display()))?;

    for entry in archive
        .entries()
        .context("failed to read tarball entries")?
    {
        let mut entry = entry.context("failed to read tarball entry")?;
        let entry_path = entry.path().context("failed to get entry path")?.into_owned();
        let normalized = entry_path.to_string_lossy().replace('\\', "/");

        let relative = match strip_prefix.map(|p| p.trim_end_matches('/')) {
            Some(prefix) if normalized == prefix => continue,
            Some(prefix) => match normalized.strip_prefix(&format!("{}/", prefix)) {
                Some(rest) => rest.to_string(),
                None => normalized.clone(),
            },
            None => normalized.clone(),
        };

        if relative.is_empty() {
            continue;
        }
        // Only plain names may appear; a root or prefix component would make
        // `join` discard `dest` entirely.
        if !Path::new(&relative)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        {
            bail!("tarball entry escapes destination directory: {}", normalized);
        }

        let output_path = dest.join(&relative);
        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory: {}", parent.display()))?;

            // A symlink extracted earlier could still redirect the parent.
            let canonical_parent = parent
                .canonicalize()
                .with_context(|| format!("failed to resolve directory: {}", parent.display()))?;
            if !canonical_parent.starts_with(&canonical_dest) {
                bail!("tarball entry escapes destination directory: {}", normalized);
            }
        }

        let entry_type = entry.header().entry_type();
        match entry_type {
            tar::EntryType::Directory => {
                std::fs::create_dir_all(&output_path).with_context(|| {
                    format!("failed to create directory: {}", output_path.display())
                })?;
            }
            tar::EntryType::Regular
            | tar::EntryType::Continuous
            | tar::EntryType::Link
            | tar::EntryType::Symlink => {
                entry.unpack(&output_path).with_context(|| {
                    format!("failed to extract file: {}", output_path.display())
                })?;
            }
            _ => {
                tracing::debug!(
                    "Skipping unsupported entry type {:?}: {}",
                    entry_type,
                    normalized
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
pub(crate) fn build_tarball(files: &[(&str, &[u8])]) -> Vec<u8> {
    use flate2::write::GzEncoder;
    use flate2::Compression;

    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    for (path, content) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o755);
        header.set_cksum();
        builder.append_data(&mut header, path, *content).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap()
}
