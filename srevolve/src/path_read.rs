use std::io::{self, Read};
use std::path::PathBuf;

/// Contents of a file, together with its path.
pub struct PathRead {
    pub path: String,
    pub read: String,
}

impl TryFrom<&PathBuf> for PathRead {
    type Error = io::Error;

    /// Read a file, or standard input if the path is "-".
    fn try_from(path: &PathBuf) -> Result<Self, Self::Error> {
        let read = if path.as_os_str() == "-" {
            let mut read = String::new();
            io::stdin().read_to_string(&mut read)?;
            read
        } else {
            std::fs::read_to_string(path)?
        };
        let path = path.display().to_string();
        Ok(Self { path, read })
    }
}
