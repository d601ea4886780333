use std::io;

/// Central error type.
#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    /// parse error in the given file
    Parse(String, setreplace_parse::Error),
    Sr(setreplace::Error),
    ThreadPool(rayon::ThreadPoolBuildError),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<setreplace::Error> for Error {
    fn from(err: setreplace::Error) -> Self {
        Self::Sr(err)
    }
}

impl From<setreplace::rule::Error> for Error {
    fn from(err: setreplace::rule::Error) -> Self {
        Self::Sr(err.into())
    }
}

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Self::ThreadPool(err)
    }
}
