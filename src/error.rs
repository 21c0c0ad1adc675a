/// What went wrong, coarse enough to pick an exit code from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The time-series store could not be reached or answered with a non-2xx status.
    UnreachableSource,
    /// The store answered, but not with the envelope we expect.
    MalformedResponse,
    /// A date argument is not `YYYY[-MM[-DD]]` or not a real calendar day.
    InvalidDateFormat,
    /// The requested end date lies before the start date.
    RangeInverted,
    /// The location file exists but cannot be used.
    Location,
    /// Bad configuration (e.g. an unknown timezone name).
    Config,
    /// Local file output failed.
    Io,
}

impl ErrorKind {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::UnreachableSource
            | ErrorKind::MalformedResponse
            | ErrorKind::InvalidDateFormat
            | ErrorKind::RangeInverted => 1,
            ErrorKind::Location | ErrorKind::Config | ErrorKind::Io => 2,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn exit_code(&self) -> u8 {
        self.kind.exit_code()
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
