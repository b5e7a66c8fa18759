//! Text-backed enumerations.
//!
//! Catwatch stores every enumerated column (roles, issue statuses, coupon
//! durations, ...) as its lowercase text value. Use the `define_text_enum!`
//! macro to declare such an enum once and get the text mapping, `Display`,
//! `FromStr` and serde support from the same variant list.

use thiserror::Error;

/// Error returned when text does not name a variant of a text enum.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid {kind}: {value}")]
pub struct ParseEnumError {
    /// Name of the enum being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseEnumError {
    /// Create a new parse error.
    #[must_use]
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

/// Macro to define an enum stored as text.
///
/// Creates a fieldless enum with:
/// - `Serialize`/`Deserialize` using the given text for each variant
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - `ALL` listing every variant in declaration order
/// - `as_str()`, `Display` and `FromStr`
///
/// # Example
///
/// ```rust
/// # use catwatch_core::define_text_enum;
/// define_text_enum! {
///     /// Traffic light colour.
///     Light {
///         Red => "red",
///         Green => "green",
///     }
/// }
///
/// assert_eq!(Light::Red.as_str(), "red");
/// assert_eq!("green".parse::<Light>().ok(), Some(Light::Green));
/// assert_eq!(Light::ALL.len(), 2);
/// ```
#[macro_export]
macro_rules! define_text_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The text stored in the database for this variant.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::ParseEnumError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    _ => Err($crate::ParseEnumError::new(stringify!($name), s)),
                }
            }
        }
    };
}
