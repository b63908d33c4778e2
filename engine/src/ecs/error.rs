use std::fmt;

/// The kind of type a registration was attempted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// A component type.
    Component,
    /// A system type.
    System,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Component => write!(f, "component"),
            Kind::System => write!(f, "system"),
        }
    }
}

/// An error indicating a type could not be registered because the configured limit for its kind
/// has been reached. The type stays unregistered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityError {
    /// What was being registered.
    kind: Kind,

    /// The name of the refused type.
    name: &'static str,

    /// The configured limit that was hit.
    limit: usize,
}

impl CapacityError {
    /// Constructs a new `CapacityError`.
    #[inline]
    pub const fn new(kind: Kind, name: &'static str, limit: usize) -> Self {
        Self { kind, name, limit }
    }

    /// The kind of type that was refused.
    #[inline]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// The name of the refused type.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The limit which was reached.
    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "failed to register {} '{}': limit of {} reached",
            self.kind, self.name, self.limit
        )
    }
}

impl std::error::Error for CapacityError {}
