//! Macros to reduce boilerplate in the codebase

/// Macro to generate Display and FromStr implementations for label enums
///
/// The first string is the display label. Parsing is case-insensitive and
/// also accepts any `|`-separated aliases.
///
/// # Usage
///
/// ```rust,ignore
/// use crate::error::AlertDeskError;
///
/// enum_display_fromstr!(
///     MyEnum,
///     AlertDeskError::invalid_sort_column,
///     {
///         Variant1 => "variant1",
///         Variant2 => "variant2" | "v2",
///     }
/// );
/// ```
#[macro_export]
macro_rules! enum_display_fromstr {
    (
        $enum_name:ident,
        $error_fn:path,
        { $($variant:ident => $str:literal $(| $alias:literal)*),+ $(,)? }
    ) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $($enum_name::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = $crate::error::AlertDeskError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case($str) $(|| s.eq_ignore_ascii_case($alias))* {
                        return Ok($enum_name::$variant);
                    }
                )+
                Err($error_fn(s.to_string()))
            }
        }
    };
}

/// Macro to generate only Display implementation for enums
///
/// # Usage
///
/// ```rust,ignore
/// enum_display!(
///     MyEnum,
///     {
///         Variant1 => "variant1",
///         Variant2 => "variant2",
///     }
/// );
/// ```
#[macro_export]
macro_rules! enum_display {
    (
        $enum_name:ident,
        { $($variant:ident => $str:expr),+ $(,)? }
    ) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $($enum_name::$variant => write!(f, $str),)+
                }
            }
        }
    };
}
