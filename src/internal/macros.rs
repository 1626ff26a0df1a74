//! A set of macros for easily working with internals.

/// Defines an enum backed by an integer tag with a catch-all `Unknown` variant, so payloads
/// carrying tags newer than this library still decode.
macro_rules! enum_number {
    ($(#[$outer:meta])* $vis:vis enum $Enum:ident {
        $(
            $(#[$inner:meta])*
            $Variant:ident = $value:literal,
        )*
        _ => Unknown($T:ty),
    }) => {
        $(#[$outer])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        $vis enum $Enum {
            $(
                $(#[$inner])*
                $Variant,
            )*
            /// Variant value is unknown.
            Unknown($T),
        }

        impl From<$T> for $Enum {
            fn from(value: $T) -> Self {
                match value {
                    $($value => Self::$Variant,)*
                    unknown => Self::Unknown(unknown),
                }
            }
        }

        impl From<$Enum> for $T {
            fn from(value: $Enum) -> Self {
                match value {
                    $($Enum::$Variant => $value,)*
                    $Enum::Unknown(unknown) => unknown,
                }
            }
        }

        impl serde::Serialize for $Enum {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error> {
                serde::Serialize::serialize(&<$T>::from(*self), serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $Enum {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> ::std::result::Result<Self, D::Error> {
                <$T as serde::Deserialize>::deserialize(deserializer).map(Self::from)
            }
        }
    };
}
