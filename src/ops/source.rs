//! Fetch and extract the source archive.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use flate2::read::GzDecoder;
use indicatif::{ProgressBar, ProgressStyle};
use tar::Archive;
use tempfile::{NamedTempFile, TempDir};

use crate::builder::BuildContext;
use crate::util::fs::ensure_dir;
use crate::util::hash::verify_sha256;

/// Options for the source step.
#[derive(Debug, Clone, Default)]
pub struct SourceOptions {
    /// Re-extract even if the source folder already exists
    pub force: bool,
    /// Use a local archive instead of downloading
    pub archive: Option<PathBuf>,
}

/// Fetch the source archive and extract it into the work directory.
///
/// Returns the extracted source folder.
pub fn fetch_source(ctx: &BuildContext, opts: &SourceOptions) -> Result<PathBuf> {
    let source_dir = ctx.source_dir();
    if source_dir.exists() && !opts.force {
        tracing::info!("Source already present at {}", source_dir.display());
        return Ok(source_dir);
    }

    ensure_dir(&ctx.work_dir)?;
    if source_dir.exists() {
        std::fs::remove_dir_all(&source_dir)
            .with_context(|| format!("failed to remove {}", source_dir.display()))?;
    }

    let (archive, downloaded) = match opts.archive {
        Some(ref path) => (path.clone(), false),
        None => {
            let dest = ctx.work_dir.join(ctx.recipe.archive_name());
            let url = ctx.recipe.source_url(&ctx.source_url)?;
            download(url.as_str(), &dest)?;
            (dest, true)
        }
    };

    if let Some(ref expected) = ctx.source_sha256 {
        verify_sha256(&archive, expected)?;
    }

    // Extract next to the final location; the folder is moved into place
    // only once the whole archive unpacked.
    let staging = TempDir::new_in(&ctx.work_dir)
        .with_context(|| format!("failed to create staging directory in {}", ctx.work_dir.display()))?;
    extract_tarball(&archive, staging.path())
        .with_context(|| format!("failed to extract {}", archive.display()))?;

    if downloaded {
        std::fs::remove_file(&archive)
            .with_context(|| format!("failed to remove {}", archive.display()))?;
    }

    let staged = staging.path().join(ctx.recipe.folder_name());
    if !staged.is_dir() {
        bail!(
            "archive {} did not contain the expected folder `{}`",
            archive.display(),
            ctx.recipe.folder_name()
        );
    }
    std::fs::rename(&staged, &source_dir)
        .with_context(|| format!("failed to move source into {}", source_dir.display()))?;

    tracing::info!("Extracted source to {}", source_dir.display());
    Ok(source_dir)
}

/// Download `url` to `dest`, showing progress.
pub fn download(url: &str, dest: &Path) -> Result<()> {
    tracing::info!("Downloading {}", url);

    let response = reqwest::blocking::get(url)
        .with_context(|| format!("failed to download {}", url))?;

    if !response.status().is_success() {
        bail!("failed to download {}: HTTP {}", url, response.status());
    }

    let pb = match response.content_length() {
        Some(len) => {
            let pb = ProgressBar::new(len);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            pb
        }
        None => ProgressBar::new_spinner(),
    };
    pb.set_message(dest.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default());

    // `dest` only appears once the download is complete.
    let dir = dest.parent().unwrap_or_else(|| Path::new("."));
    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;
    let mut reader = pb.wrap_read(response);
    io::copy(&mut reader, &mut file)
        .with_context(|| format!("failed to write {}", dest.display()))?;
    pb.finish_and_clear();

    file.persist(dest)
        .with_context(|| format!("failed to write {}", dest.display()))?;
    Ok(())
}

/// Extract a gzip-compressed tarball into `dest`.
///
/// Entries that would land outside `dest` are skipped.
pub fn extract_tarball(archive: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive)
        .with_context(|| format!("failed to open archive: {}", archive.display()))?;
    let mut tarball = Archive::new(GzDecoder::new(BufReader::new(file)));

    ensure_dir(dest)?;

    for entry in tarball.entries().context("failed to read tarball entries")? {
        let mut entry = entry.context("failed to read tarball entry")?;
        let path = entry.path().context("failed to get entry path")?.into_owned();

        let unpacked = entry
            .unpack_in(dest)
            .with_context(|| format!("failed to extract {}", path.display()))?;
        if !unpacked {
            tracing::debug!("Skipping entry outside destination: {}", path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BuildOptions, BuildSettings};
    use flate2::write::GzEncoder;
    use flate2::Compression;

    fn write_archive(path: &Path, files: &[(&str, &str)]) {
        let file = File::create(path).unwrap();
        let encoder = GzEncoder::new(file, Compression::default());
        let mut builder = tar::Builder::new(encoder);

        for (name, contents) in files {
            let mut header = tar::Header::new_gnu();
            header.set_size(contents.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder
                .append_data(&mut header, name, contents.as_bytes())
                .unwrap();
        }

        builder.into_inner().unwrap().finish().unwrap();
    }

    fn context(root: &Path) -> BuildContext {
        BuildContext::new(BuildSettings::host(), BuildOptions::default(), root)
    }

    #[test]
    fn test_extract_local_archive() {
        let tmp = TempDir::new().unwrap();
        let archive = tmp.path().join("boost_1_63_0.tar.gz");
        write_archive(
            &archive,
            &[
                ("boost_1_63_0/bootstrap.sh", "#!/bin/sh\n"),
                ("boost_1_63_0/boost/version.hpp", "#define BOOST_VERSION 106300\n"),
            ],
        );

        let ctx = context(tmp.path());
        let opts = SourceOptions {
            force: false,
            archive: Some(archive.clone()),
        };
        let source_dir = fetch_source(&ctx, &opts).unwrap();

        assert_eq!(source_dir, ctx.source_dir());
        assert!(source_dir.join("boost/version.hpp").exists());
        // Local archives are left in place
        assert!(archive.exists());
    }

    #[test]
    fn test_existing_source_is_reused() {
        let tmp = TempDir::new().unwrap();
        let ctx = context(tmp.path());
        std::fs::create_dir_all(ctx.source_dir()).unwrap();
        std::fs::write(ctx.source_dir().join("marker"), "").unwrap();

        let opts = SourceOptions {
            force: false,
            archive: Some(tmp.path().join("missing.tar.gz")),
        };
        fetch_source(&ctx, &opts).unwrap();
        assert!(ctx.source_dir().join("marker").exists());
    }

    #[test]
    fn test_wrong_top_level_folder() {
        let tmp = TempDir::new().unwrap();
        let archive = tmp.path().join("other.tar.gz");
        write_archive(&archive, &[("boost_1_64_0/README", "x")]);

        let ctx = context(tmp.path());
        let opts = SourceOptions {
            force: true,
            archive: Some(archive),
        };
        let err = fetch_source(&ctx, &opts).unwrap_err();
        assert!(err.to_string().contains("boost_1_63_0"));
    }

    #[test]
    fn test_checksum_mismatch_aborts() {
        let tmp = TempDir::new().unwrap();
        let archive = tmp.path().join("boost_1_63_0.tar.gz");
        write_archive(&archive, &[("boost_1_63_0/README", "x")]);

        let mut ctx = context(tmp.path());
        ctx.source_sha256 = Some("00".repeat(32));
        let opts = SourceOptions {
            force: false,
            archive: Some(archive),
        };
        assert!(fetch_source(&ctx, &opts).is_err());
        assert!(!ctx.source_dir().exists());
    }

    #[test]
    fn test_truncated_archive_leaves_no_source() {
        let tmp = TempDir::new().unwrap();
        let archive = tmp.path().join("boost_1_63_0.tar.gz");

        // Hex of an LCG stream: large enough that half the gzip stream ends
        // inside the header data.
        let mut state: u64 = 0x2545_f491;
        let header: String = (0..25_000)
            .map(|_| {
                state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
                format!("{:08x}", (state >> 32) as u32)
            })
            .collect();
        write_archive(
            &archive,
            &[
                ("boost_1_63_0/bootstrap.sh", "#!/bin/sh\n"),
                ("boost_1_63_0/boost/version.hpp", &header),
            ],
        );

        let bytes = std::fs::read(&archive).unwrap();
        let truncated = tmp.path().join("truncated.tar.gz");
        std::fs::write(&truncated, &bytes[..bytes.len() / 2]).unwrap();

        let ctx = context(tmp.path());
        let opts = SourceOptions {
            force: false,
            archive: Some(truncated),
        };
        assert!(fetch_source(&ctx, &opts).is_err());
        assert!(!ctx.source_dir().exists());

        // A later run with the intact archive extracts everything.
        let opts = SourceOptions {
            force: false,
            archive: Some(archive),
        };
        let source_dir = fetch_source(&ctx, &opts).unwrap();
        let extracted = std::fs::read_to_string(source_dir.join("boost/version.hpp")).unwrap();
        assert_eq!(extracted.len(), header.len());

        // No staging directories are left behind.
        let leftovers: Vec<_> = std::fs::read_dir(&ctx.work_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, vec![std::ffi::OsString::from("boost_1_63_0")]);
    }
}
