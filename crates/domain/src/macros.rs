//! Macro for implementing Display and FromStr for wire-name enums
//!
//! Several service enums travel as bare strings (query parameters, path
//! segments). This macro keeps the string form in one place.
//!
//! # Example
//!
//! ```rust
//! use konexus_domain::impl_wire_name_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Channel {
//!     Email,
//!     TextMessage,
//! }
//!
//! impl_wire_name_conversions!(Channel {
//!     Email => "Email",
//!     TextMessage => "TextMessage",
//! });
//!
//! assert_eq!(Channel::TextMessage.to_string(), "TextMessage");
//! assert_eq!("email".parse::<Channel>().unwrap(), Channel::Email);
//! ```

/// Implements Display and FromStr traits for enums sent as plain strings
///
/// - Display writes the wire name verbatim
/// - FromStr matches the wire name case-insensitively
#[macro_export]
macro_rules! impl_wire_name_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Wire representation of this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($str) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}
