use std::path::PathBuf;

use thiserror::Error;

pub type BbResult<T> = Result<T, BbError>;

#[derive(Debug, Error)]
pub enum BbError {
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("json failure: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("missing command `{command}`")]
    CommandMissing { command: String },

    #[error("could not start `{command}`: {detail}")]
    CommandUnlaunchable { command: String, detail: String },

    #[error("folder has no usable name: `{0}`")]
    FolderUnnamed(PathBuf),
}

impl BbError {
    /// True for errors that invalidate the whole run before any folder is
    /// processed, as opposed to folder-level failures.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidConfig(_))
    }
}

#[cfg(test)]
mod tests {
    use super::BbError;

    #[test]
    fn command_missing_displays_command_name() {
        let err = BbError::CommandMissing {
            command: "ffmpeg".to_owned(),
        };
        let text = err.to_string();
        assert!(text.contains("ffmpeg"), "should mention command: {text}");
    }

    #[test]
    fn command_unlaunchable_displays_detail() {
        let err = BbError::CommandUnlaunchable {
            command: "/opt/tool".to_owned(),
            detail: "permission denied".to_owned(),
        };
        let text = err.to_string();
        assert!(text.contains("/opt/tool"), "got: {text}");
        assert!(text.contains("permission denied"), "got: {text}");
    }

    #[test]
    fn folder_unnamed_displays_path() {
        let err = BbError::FolderUnnamed(std::path::PathBuf::from("/"));
        assert!(err.to_string().contains('/'));
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BbError = io_err.into();
        assert!(matches!(err, BbError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn only_invalid_config_is_a_config_error() {
        assert!(BbError::InvalidConfig("bad root".to_owned()).is_config_error());
        assert!(!BbError::CommandMissing {
            command: "x".to_owned()
        }
        .is_config_error());
        assert!(!BbError::Io(std::io::Error::other("disk")).is_config_error());
    }

    #[test]
    fn bb_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        assert_send::<BbError>();
        assert_sync::<BbError>();
    }
}
