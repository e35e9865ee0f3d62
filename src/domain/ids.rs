use uuid::Uuid;

// ============================================================================
// Typed Identifiers
// ============================================================================
//
// Newtype wrappers so a LineId can never be passed where an AddressId is
// expected. All ids are UUIDs; orders use v7 so they sort by creation time.
//
// ============================================================================

macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub const fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            pub const fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(LineId);
define_id!(AddressId);
define_id!(CustomerId);
define_id!(OrderId);

impl OrderId {
    /// Time-ordered id for a freshly placed order
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}
