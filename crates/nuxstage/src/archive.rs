//! Server archive preparation.
//!
//! The bundle we stage from is a resources directory containing the server
//! archive (`nuxeo.zip`), the droplet descriptor (`droplet.yaml`) and the
//! launch-time configuration helper. Preparation stages that directory
//! into the droplet, unpacks the server next to it, drops the staged
//! archive copy and relocates the descriptor to the droplet root.

use crate::error::{Result, StagingError};
use nuxstage_protocol::{defaults, paths};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;
use zip::ZipArchive;

/// Stage `resources` into `dest` and unpack the bundled server.
///
/// Returns the plugin drop-in directory of the unpacked server.
pub fn prepare(dest: &Path, resources: &Path) -> Result<PathBuf> {
    let staged_resources = paths::resources_dir(dest);
    copy_tree(resources, &staged_resources)?;

    let archive_path = staged_resources.join(defaults::SERVER_ARCHIVE);
    if !archive_path.is_file() {
        return Err(StagingError::ArchiveLayout(format!(
            "resources directory {} does not contain {}",
            resources.display(),
            defaults::SERVER_ARCHIVE
        )));
    }
    unpack(&archive_path, dest)?;
    // The droplet keeps the helper scripts; the archive itself would only
    // bloat the staged application.
    fs::remove_file(&archive_path)?;

    let descriptor = staged_resources.join(defaults::DROPLET_DESCRIPTOR);
    if !descriptor.is_file() {
        return Err(StagingError::ArchiveLayout(format!(
            "resources directory {} does not contain {}",
            resources.display(),
            defaults::DROPLET_DESCRIPTOR
        )));
    }
    fs::rename(&descriptor, dest.join(defaults::DROPLET_DESCRIPTOR))?;

    let plugins = paths::plugins_dir(dest);
    if !plugins.is_dir() {
        return Err(StagingError::ArchiveLayout(format!(
            "unpacked server has no plugin directory at {}",
            plugins.display()
        )));
    }
    Ok(plugins)
}

/// Recursively copy a directory tree. `fs::copy` carries permission bits,
/// so bundled helper scripts stay executable.
pub(crate) fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry?;
        let rel = entry.path().strip_prefix(src).map_err(|_| {
            StagingError::ArchiveLayout(format!(
                "walked outside the copy root: {}",
                entry.path().display()
            ))
        })?;
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

fn unpack(archive_path: &Path, dest: &Path) -> Result<()> {
    let file = fs::File::open(archive_path)?;
    let mut archive = ZipArchive::new(file)?;
    let entries = archive.len();
    archive.extract(dest)?;
    info!(
        "Unpacked server archive ({} entries) into {}",
        entries,
        dest.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn write_server_archive(path: &Path) {
        let file = fs::File::create(path).unwrap();
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default();
        zip.start_file("nuxeo/bin/nuxeoctl", options.unix_permissions(0o755))
            .unwrap();
        zip.write_all(b"#!/bin/bash\necho server\n").unwrap();
        zip.start_file("nuxeo/bin/nuxeo.conf.sample", options).unwrap();
        zip.write_all(b"# sample\n").unwrap();
        zip.start_file("nuxeo/nxserver/plugins/README", options).unwrap();
        zip.write_all(b"drop plugins here\n").unwrap();
        zip.finish().unwrap();
    }

    fn resources_fixture() -> TempDir {
        let temp = TempDir::new().unwrap();
        write_server_archive(&temp.path().join("nuxeo.zip"));
        fs::write(temp.path().join("droplet.yaml"), "state_file: run.pid\n").unwrap();
        fs::write(
            temp.path().join("update_nuxeo_conf"),
            "#!/bin/bash\nexit 0\n",
        )
        .unwrap();
        temp
    }

    #[test]
    fn test_prepare_unpacks_and_returns_plugins_dir() {
        let resources = resources_fixture();
        let dest = TempDir::new().unwrap();

        let plugins = prepare(dest.path(), resources.path()).unwrap();

        assert_eq!(plugins, dest.path().join("nuxeo/nxserver/plugins"));
        assert!(plugins.is_dir());
        assert!(dest.path().join("nuxeo/bin/nuxeoctl").is_file());
    }

    #[test]
    fn test_prepare_relocates_descriptor_and_drops_archive() {
        let resources = resources_fixture();
        let dest = TempDir::new().unwrap();

        prepare(dest.path(), resources.path()).unwrap();

        assert!(dest.path().join("droplet.yaml").is_file());
        assert!(!dest.path().join("resources/droplet.yaml").exists());
        assert!(!dest.path().join("resources/nuxeo.zip").exists());
        assert!(dest.path().join("resources/update_nuxeo_conf").is_file());
    }

    #[cfg(unix)]
    #[test]
    fn test_prepare_restores_executable_bits() {
        use std::os::unix::fs::PermissionsExt;

        let resources = resources_fixture();
        let dest = TempDir::new().unwrap();

        prepare(dest.path(), resources.path()).unwrap();

        let mode = fs::metadata(dest.path().join("nuxeo/bin/nuxeoctl"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn test_prepare_requires_server_archive() {
        let resources = TempDir::new().unwrap();
        fs::write(resources.path().join("droplet.yaml"), "x: y\n").unwrap();
        let dest = TempDir::new().unwrap();

        let err = prepare(dest.path(), resources.path()).unwrap_err();
        assert!(matches!(err, StagingError::ArchiveLayout(_)));
        assert!(err.to_string().contains("nuxeo.zip"));
    }

    #[test]
    fn test_prepare_requires_plugins_dir_in_archive() {
        let resources = TempDir::new().unwrap();
        let file = fs::File::create(resources.path().join("nuxeo.zip")).unwrap();
        let mut zip = ZipWriter::new(file);
        zip.start_file("nuxeo/bin/nuxeoctl", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"#!/bin/bash\n").unwrap();
        zip.finish().unwrap();
        fs::write(resources.path().join("droplet.yaml"), "x: y\n").unwrap();
        let dest = TempDir::new().unwrap();

        let err = prepare(dest.path(), resources.path()).unwrap_err();
        assert!(matches!(err, StagingError::ArchiveLayout(_)));
        assert!(err.to_string().contains("plugin"));
    }

    #[test]
    fn test_copy_tree_copies_nested_files() {
        let src = TempDir::new().unwrap();
        fs::create_dir_all(src.path().join("a/b")).unwrap();
        fs::write(src.path().join("a/b/file.txt"), "nested").unwrap();
        fs::write(src.path().join("top.txt"), "top").unwrap();

        let dst = TempDir::new().unwrap();
        let target = dst.path().join("copy");
        copy_tree(src.path(), &target).unwrap();

        assert_eq!(fs::read_to_string(target.join("a/b/file.txt")).unwrap(), "nested");
        assert_eq!(fs::read_to_string(target.join("top.txt")).unwrap(), "top");
    }
}
