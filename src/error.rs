use crate::state::ModuleState;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[non_exhaustive]
pub enum Error {
    // Precondition errors, raised before any byte is sent
    InvalidState(ModuleState),
    MessageTooLong,
    InvalidClock,

    // Protocol errors
    /// The expected reply did not arrive before the active timeout elapsed.
    ///
    /// A reply that never matches is reported the same way, since the
    /// scanner keeps consuming bytes until its deadline.
    Timeout,
    /// A numeric or structured reply field could not be decoded.
    Unparseable,
    /// A fixed-capacity buffer was too small for the data at hand.
    Overflow,

    // Transport errors
    Io(embedded_io::ErrorKind),
    IoPin,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter<'_>) {
        match self {
            Self::InvalidState(s) => defmt::write!(f, "InvalidState({:?})", s),
            Self::MessageTooLong => defmt::write!(f, "MessageTooLong"),
            Self::InvalidClock => defmt::write!(f, "InvalidClock"),
            Self::Timeout => defmt::write!(f, "Timeout"),
            Self::Unparseable => defmt::write!(f, "Unparseable"),
            Self::Overflow => defmt::write!(f, "Overflow"),
            Self::Io(e) => defmt::write!(f, "Io({:?})", e),
            Self::IoPin => defmt::write!(f, "IoPin"),
        }
    }
}

impl From<base64ct::InvalidLengthError> for Error {
    fn from(_: base64ct::InvalidLengthError) -> Self {
        Self::Overflow
    }
}

impl From<core::str::Utf8Error> for Error {
    fn from(_: core::str::Utf8Error) -> Self {
        Self::Unparseable
    }
}

impl Error {
    /// Whether this error means the serial transport itself is faulty.
    pub fn is_transport_fault(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
