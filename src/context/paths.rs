use camino::{Utf8Path, Utf8PathBuf};

use super::ContextError;

/// The current directory of the process, as a UTF-8 path.
pub fn current_dir() -> Result<Utf8PathBuf, ContextError> {
    let current_dir = std::env::current_dir().map_err(ContextError::CurrentDir)?;
    Utf8PathBuf::from_path_buf(current_dir).map_err(ContextError::NonUtf8Path)
}

/// Makes `path` absolute by joining it onto `base` if it's relative.
///
/// This is purely lexical: `.` and `..` components are collapsed but
/// symlinks are left alone and nothing is required to exist.
pub fn absolute(base: &Utf8Path, path: impl Into<Utf8PathBuf>) -> Utf8PathBuf {
    let path = path.into();
    let joined = match path.is_absolute() {
        true => path,
        false => base.join(path),
    };

    Utf8PathBuf::from(path_clean::clean(joined.as_str()))
}
