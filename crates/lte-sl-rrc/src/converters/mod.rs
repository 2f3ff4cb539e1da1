//! Conversions between NR sidelink 3GPP enumerations and the integer or
//! physical value they stand for. The value direction is total. The enum
//! direction panics on anything outside the enumeration.

/// Declares a 3GPP enumeration, its raw decoding and its pair of converters
macro_rules! value_enum {
    (
        $(#[$meta:meta])*
        $name:ident: $ty:ty, $value_fn:ident, $enum_fn:ident, $err:literal {
            $($var:ident = $val:expr),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[repr(u8)]
        pub enum $name {
            $($var),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$var),+];

            /// Convert this enum back into the raw integer value
            pub fn into_raw(self) -> u64 {
                self as u64
            }
        }

        impl std::convert::TryFrom<u64> for $name {
            type Error = ();
            fn try_from(x: u64) -> Result<Self, Self::Error> {
                $name::ALL.get(x as usize).copied().ok_or(())
            }
        }

        impl From<$name> for u64 {
            fn from(e: $name) -> Self { e.into_raw() }
        }

        pub fn $value_fn(e: $name) -> $ty {
            match e {
                $($name::$var => $val),+
            }
        }

        pub fn $enum_fn(v: $ty) -> $name {
            $(if v == $val { return $name::$var; })+
            panic!($err, v)
        }
    };
}

pub mod nr_sl;
