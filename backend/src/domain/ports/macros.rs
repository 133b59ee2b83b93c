//! Helper macro for port error enums.
//!
//! Every variant carries named fields and gets a snake_case constructor
//! taking `impl Into<T>` per field, e.g. `StoreError::io(err.to_string())`.

macro_rules! define_port_error {
    (@ctor $variant:ident ($($params:tt)*) ($($inits:tt)*)) => {
        ::paste::paste! {
            #[doc = concat!("Build [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };
    (@ctor $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty $(, $($rest:tt)*)?) => {
        define_port_error!(
            @ctor $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($($rest)*)?
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),+ $(,)? } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $(#[doc = "Failure detail."] $field : $ty),+ },
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant () () $($field : $ty),+);
            )*
        }
    };
}

pub(crate) use define_port_error;
