//! DirectML runtime prefetch for Windows builds.
//!
//! The Windows build links against Microsoft.AI.DirectML. The nupkg is
//! fetched from nuget.org and extracted into the working directory before
//! the first restore so the toolchain resolves it locally.

use std::fs::File;
use std::path::Path;

use crate::ReleaseConfig;
use crate::error::{FilesystemError, ReleaseError, Result};

const DIRECTML_URL: &str = "https://www.nuget.org/api/v2/package/Microsoft.AI.DirectML/1.12.0";
const NUPKG_FILE: &str = "Microsoft.AI.DirectML.nupkg";
const PACKAGE_DIR: &str = "Microsoft.AI.DirectML";

/// Download and extract the DirectML package into the working directory.
pub async fn prefetch(config: &ReleaseConfig) -> Result<()> {
    let nupkg = config.work_dir.join(NUPKG_FILE);
    download(DIRECTML_URL, &nupkg).await?;
    extract_nupkg(&nupkg, &config.work_dir.join(PACKAGE_DIR)).await
}

/// Download `url` to `dest`, treating an HTTP error status as failure.
async fn download(url: &str, dest: &Path) -> Result<()> {
    log::info!("downloading {url}");
    let response = reqwest::get(url)
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| ReleaseError::Download {
            url: url.to_string(),
            source: e,
        })?;
    let bytes = response.bytes().await.map_err(|e| ReleaseError::Download {
        url: url.to_string(),
        source: e,
    })?;
    tokio::fs::write(dest, &bytes).await?;
    Ok(())
}

/// Extract a nupkg (a zip archive) into `dest`.
pub async fn extract_nupkg(nupkg: &Path, dest: &Path) -> Result<()> {
    let nupkg = nupkg.to_path_buf();
    let dest = dest.to_path_buf();
    tokio::task::spawn_blocking(move || extract(&nupkg, &dest))
        .await
        .map_err(anyhow::Error::from)?
}

fn extract(nupkg: &Path, dest: &Path) -> Result<()> {
    let file = File::open(nupkg).map_err(|_| FilesystemError::MissingSource {
        path: nupkg.to_path_buf(),
    })?;
    let mut archive = zip::ZipArchive::new(file)?;
    std::fs::create_dir_all(dest)?;
    archive.extract(dest)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use zip::write::SimpleFileOptions;

    #[tokio::test]
    async fn nupkg_contents_are_extracted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nupkg = dir.path().join(NUPKG_FILE);
        let file = File::create(&nupkg).expect("create");
        let mut writer = zip::ZipWriter::new(file);
        writer
            .start_file("bin/x64-win/DirectML.dll", SimpleFileOptions::default())
            .expect("entry");
        writer.write_all(b"dml").expect("write");
        writer
            .start_file("LICENSE.txt", SimpleFileOptions::default())
            .expect("entry");
        writer.write_all(b"MIT").expect("write");
        writer.finish().expect("finish");

        let dest = dir.path().join(PACKAGE_DIR);
        extract_nupkg(&nupkg, &dest).await.expect("extract");

        assert!(dest.join("bin/x64-win/DirectML.dll").is_file());
        assert!(dest.join("LICENSE.txt").is_file());
    }

    #[tokio::test]
    async fn missing_package_is_a_filesystem_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = extract_nupkg(&dir.path().join("nope.nupkg"), &dir.path().join("out"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ReleaseError::Filesystem(FilesystemError::MissingSource { .. })
        ));
    }

    #[tokio::test]
    async fn refused_connection_is_a_download_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = download("http://127.0.0.1:9/unreachable", &dir.path().join("pkg"))
            .await
            .unwrap_err();
        assert!(matches!(err, ReleaseError::Download { .. }));
    }
}
