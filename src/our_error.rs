use thiserror::Error;

#[derive(Error, Debug)]
pub enum OurError {
    /// A builder was finished with fields missing, or with fields that can't go together
    #[error(transparent)]
    ShapeMismatch(#[from] eyre::Report),

    #[error("Address must have 4 or 8 components, got {0}")]
    InvalidAddressArity(usize),

    #[error("{0} does not fit in an IPv4 octet")]
    OctetOutOfRange(u16),

    // bendy's error type only implements Debug + Display, so no #[from] here
    #[error("Bendy complained {0}")]
    BendyEncodeError(bendy::encoding::Error),
}
