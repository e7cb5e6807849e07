//! Macro for implementing Display and FromStr for wire-level enums
//!
//! Request methods and credential field names travel as fixed strings. This
//! macro keeps the enum ↔ string mapping in one place and parses
//! case-insensitively.
//!
//! # Example
//!
//! ```rust
//! use courier_domain::impl_domain_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Scheme {
//!     Http,
//!     Https,
//! }
//!
//! impl_domain_enum_conversions!(Scheme {
//!     Http => "http",
//!     Https => "https",
//! });
//!
//! assert_eq!(Scheme::Https.to_string(), "https");
//! assert_eq!("HTTP".parse::<Scheme>(), Ok(Scheme::Http));
//! ```

/// Implements `Display`, `FromStr` and an `as_str` accessor for simple enums
///
/// - `Display` writes the mapped string exactly as given
/// - `FromStr` accepts any ASCII casing of the mapped string
#[macro_export]
macro_rules! impl_domain_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Canonical string form of the variant.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
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

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($str) {
                        return std::result::Result::Ok(Self::$variant);
                    }
                )+
                std::result::Result::Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestVerb {
        Fetch,
        Store,
    }

    impl_domain_enum_conversions!(TestVerb {
        Fetch => "FETCH",
        Store => "STORE",
    });

    #[test]
    fn test_display_uses_mapped_string() {
        assert_eq!(TestVerb::Fetch.to_string(), "FETCH");
        assert_eq!(TestVerb::Store.as_str(), "STORE");
    }

    #[test]
    fn test_fromstr_ignores_case() {
        assert_eq!(TestVerb::from_str("fetch").unwrap(), TestVerb::Fetch);
        assert_eq!(TestVerb::from_str("StOrE").unwrap(), TestVerb::Store);
    }

    #[test]
    fn test_fromstr_invalid() {
        let result = TestVerb::from_str("delete");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid TestVerb"));
    }

    mod with_result_alias {
        use crate::Result;

        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum Channel {
            Push,
            Pull,
        }

        impl_domain_enum_conversions!(Channel {
            Push => "push",
            Pull => "pull",
        });

        #[test]
        fn test_expands_next_to_result_alias() {
            let parsed: Result<Channel> = "PULL"
                .parse::<Channel>()
                .map_err(crate::CourierError::Config);
            assert_eq!(parsed, Ok(Channel::Pull));
            assert!("fetch".parse::<Channel>().is_err());
        }
    }
}
