//! Declarative helpers shared by the domain enums.

/// Define a closed enum that is stored as TEXT and travels as a
/// SCREAMING_SNAKE_CASE JSON string.
///
/// Generates `as_str`, an `ALL` slice, `Display`, a case-insensitive
/// `FromStr`, and `TryFrom<String>` (used by `#[sqlx(try_from = "String")]`
/// in the db crate). Parse failures are [`CoreError::Validation`] errors that
/// list the accepted values.
///
/// [`CoreError::Validation`]: crate::error::CoreError::Validation
macro_rules! define_text_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The canonical database / wire representation.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case($text) {
                        return Ok($name::$variant);
                    }
                )+
                Err($crate::error::CoreError::Validation(format!(
                    "Invalid {} '{}'. Must be one of: {}",
                    $label,
                    s,
                    [$($text),+].join(", ")
                )))
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::error::CoreError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}
