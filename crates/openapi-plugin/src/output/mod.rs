//! Delivery of response files in standalone mode.
//!
//! The output descriptor selects one of three strategies: `!` discards
//! everything, `-` streams each file to stdout behind a separator line, and
//! any other value names a directory that receives one file per entry.

use std::fs;
use std::io::Write;
use std::path::{Component, Path};

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::error::PluginError;
use crate::protocol::{Response, ResponseFile};

/// Descriptor that discards all output.
pub const DISCARD: &str = "!";
/// Descriptor that streams output to stdout.
pub const STDOUT: &str = "-";

const STDOUT_TARGET: &str = "stdout";

#[cfg(unix)]
const DIRECTORY_MODE: u32 = 0o755;

/// Where files produced by a run are delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write nothing.
    Discard,
    /// Concatenate every file onto stdout.
    Stdout,
    /// Write files beneath a directory.
    Directory(Utf8PathBuf),
}

impl OutputTarget {
    /// Interprets an output descriptor.
    #[must_use]
    pub fn parse(descriptor: &str) -> Self {
        match descriptor {
            DISCARD => Self::Discard,
            STDOUT => Self::Stdout,
            path => Self::Directory(Utf8PathBuf::from(path)),
        }
    }
}

/// Delivers the files of a finished response.
///
/// `stdout` receives the concatenated stream for the `-` descriptor and is
/// left untouched otherwise.
///
/// # Errors
///
/// Returns [`PluginError::Reported`] when the response carries errors,
/// [`PluginError::OutputConflict`] when the directory path is an existing
/// plain file, and [`PluginError::DeliveryFailure`] for I/O failures or file
/// names that would escape the output directory. Files written before a
/// failure are left in place.
pub fn deliver(
    response: &Response,
    descriptor: &str,
    stdout: &mut impl Write,
) -> Result<(), PluginError> {
    if response.has_errors() {
        return Err(PluginError::Reported {
            errors: response.errors().to_vec(),
        });
    }

    match OutputTarget::parse(descriptor) {
        OutputTarget::Discard => Ok(()),
        OutputTarget::Stdout => write_stream(response.files(), stdout),
        OutputTarget::Directory(root) => write_tree(response.files(), &root),
    }
}

fn write_stream(files: &[ResponseFile], stdout: &mut impl Write) -> Result<(), PluginError> {
    for file in files {
        write!(stdout, "\n\n{} -------------------- \n", file.name())
            .and_then(|()| stdout.write_all(file.data()))
            .map_err(|source| PluginError::delivery(STDOUT_TARGET, source))?;
    }
    stdout
        .flush()
        .map_err(|source| PluginError::delivery(STDOUT_TARGET, source))
}

fn write_tree(files: &[ResponseFile], root: &Utf8Path) -> Result<(), PluginError> {
    if fs::metadata(root).is_ok_and(|metadata| !metadata.is_dir()) {
        return Err(PluginError::OutputConflict {
            path: root.to_path_buf(),
        });
    }

    create_directory(root.as_std_path())
        .map_err(|source| PluginError::delivery(root.as_str(), source))?;

    for file in files {
        let relative = validate_file_name(file.name())?;
        let target = root.as_std_path().join(relative);
        let target_name = target.display().to_string();

        if let Some(parent) = target.parent() {
            create_directory(parent)
                .map_err(|source| PluginError::delivery(&target_name, source))?;
        }
        write_file(&target, file.data())
            .map_err(|source| PluginError::delivery(&target_name, source))?;
        debug!(path = %target_name, bytes = file.data().len(), "wrote output file");
    }
    Ok(())
}

fn write_file(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut handle = fs::File::create(path)?;
    handle.write_all(data)?;
    handle.flush()
}

fn create_directory(path: &Path) -> std::io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIRECTORY_MODE);
    }
    builder.create(path)
}

fn validate_file_name(name: &str) -> Result<&Path, PluginError> {
    let path = Path::new(name);
    let escapes = path.is_absolute()
        || path.components().any(|component| {
            matches!(
                component,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
    if escapes || name.is_empty() {
        return Err(PluginError::delivery(
            name,
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "file name must be a relative path inside the output directory",
            ),
        ));
    }
    Ok(path)
}
