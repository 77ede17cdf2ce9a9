//! Limits applied by the command assembler.

use std::num::NonZeroU64;

/// Settings bounding the resources a single assembler may buffer.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroU64;
///
/// use amqp_command::AssemblerConfig;
///
/// let limit = NonZeroU64::new(128 * 1024).expect("non-zero limit");
/// let config = AssemblerConfig::new().with_max_body_size(limit);
/// assert_eq!(config.max_body_size, Some(limit));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AssemblerConfig {
    /// Largest body a content header may declare. `None` accepts any size.
    pub max_body_size: Option<NonZeroU64>,
}

impl AssemblerConfig {
    /// Configuration with no limits.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_body_size: None,
        }
    }

    /// Reject content headers declaring more than `limit` body bytes.
    #[must_use]
    pub const fn with_max_body_size(mut self, limit: NonZeroU64) -> Self {
        self.max_body_size = Some(limit);
        self
    }
}
