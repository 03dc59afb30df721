use super::Serializer;

use molecule_core::driver::{Capability, Dialect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Flavor {
    Postgresql,
    Sqlite,
    Mysql,
}

impl Serializer {
    pub fn sqlite() -> Serializer {
        Serializer {
            flavor: Flavor::Sqlite,
        }
    }

    pub fn postgresql() -> Serializer {
        Serializer {
            flavor: Flavor::Postgresql,
        }
    }

    pub fn mysql() -> Serializer {
        Serializer {
            flavor: Flavor::Mysql,
        }
    }

    /// Picks the flavor matching an executor's dialect.
    pub fn for_capability(capability: &Capability) -> Serializer {
        match capability.dialect {
            Dialect::Sqlite => Self::sqlite(),
            Dialect::Postgresql => Self::postgresql(),
            Dialect::Mysql => Self::mysql(),
        }
    }
}
