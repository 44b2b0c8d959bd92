//! Channel error types

/// Why a value could not be placed into a consumer queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryError {
    /// Queue was full and the channel does not wait
    Full,
    /// Queue stayed full for the whole delivery timeout
    TimedOut,
    /// Consumer dropped its read handle
    Closed,
}

impl std::fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryError::Full => write!(f, "Consumer queue full"),
            DeliveryError::TimedOut => write!(f, "Consumer did not accept value before timeout"),
            DeliveryError::Closed => write!(f, "Consumer closed"),
        }
    }
}

impl std::error::Error for DeliveryError {}

/// Error returned by [`Publisher`] writes, carrying the rejected value
///
/// [`Publisher`]: super::Publisher
#[derive(PartialEq, Eq)]
pub enum PublishError<T> {
    /// Intake queue is full (only from `try_send`)
    Full(T),
    /// Forwarding task has stopped
    Closed(T),
}

impl<T> PublishError<T> {
    /// Take back the value that was not published
    pub fn into_inner(self) -> T {
        match self {
            PublishError::Full(value) | PublishError::Closed(value) => value,
        }
    }
}

impl<T> std::fmt::Debug for PublishError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PublishError::Full(_) => write!(f, "Full(..)"),
            PublishError::Closed(_) => write!(f, "Closed(..)"),
        }
    }
}

impl<T> std::fmt::Display for PublishError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PublishError::Full(_) => write!(f, "Publisher intake queue full"),
            PublishError::Closed(_) => write!(f, "Publisher forwarding task stopped"),
        }
    }
}

impl<T> std::error::Error for PublishError<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_error_returns_value() {
        assert_eq!(PublishError::Full(3).into_inner(), 3);
        assert_eq!(PublishError::Closed("x").into_inner(), "x");
    }

    #[test]
    fn test_display() {
        assert_eq!(DeliveryError::Full.to_string(), "Consumer queue full");
        assert_eq!(
            PublishError::Closed(1).to_string(),
            "Publisher forwarding task stopped"
        );
    }
}
