//! Data models
//!
//! Rows shared between the settlement engine and the reporting layer.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (Postgres BIGINT), all timestamps are Unix millis.

/// Unknown text value for a text-backed enum column
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Declares a lowercase text-backed enum.
///
/// Columns are stored as TEXT; rows decode through `#[sqlx(try_from = "String")]`
/// and writes bind `as_str()`.
macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $text ),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::models::ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $text => Ok(Self::$variant), )+
                    other => Err($crate::models::ParseEnumError {
                        kind: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::models::ParseEnumError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use text_enum;

pub mod courier;
pub mod garant;
pub mod order;
pub mod performance;
pub mod pricing;
pub mod settlement;
pub mod terminal;
pub mod transaction;
pub mod work_schedule;

// Re-exports
pub use courier::*;
pub use garant::*;
pub use order::*;
pub use performance::*;
pub use pricing::*;
pub use settlement::*;
pub use terminal::*;
pub use transaction::*;
pub use work_schedule::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_enum_round_trip() {
        assert_eq!("active".parse::<CourierStatus>(), Ok(CourierStatus::Active));
        assert_eq!(DriveType::Car.as_str(), "car");
        assert_eq!(
            PricingKind::try_from("order_bonus".to_string()),
            Ok(PricingKind::OrderBonus)
        );
    }

    #[test]
    fn test_text_enum_rejects_unknown() {
        let err = "frozen".parse::<CourierStatus>().unwrap_err();
        assert_eq!(err.kind, "CourierStatus");
        assert_eq!(err.value, "frozen");
    }
}
