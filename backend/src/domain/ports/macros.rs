//! `define_port_error!`: port error enums with snake_case constructors.
//!
//! Every variant gets a constructor named after it, so adapters write
//! `CatalogueTransportError::timeout(msg)` instead of spelling out the struct
//! literal. `String` fields accept anything `Into<String>`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            #[must_use]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            #[must_use]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        /// Failures of a pretend upstream call.
        pub enum UpstreamError {
            /// Nothing answered.
            Silent => "upstream is silent",
            /// The upstream refused the connection.
            Refused { message: String } => "refused: {message}",
            /// The upstream answered with an unexpected status.
            Status { status: u16 } => "status {status}",
            /// Both a status and a reason were reported.
            Rejected { reason: String, status: u16 } => "{reason} ({status})",
        }
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(UpstreamError::silent(), UpstreamError::Silent);
        assert_eq!(UpstreamError::silent().to_string(), "upstream is silent");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = UpstreamError::refused("connection reset");
        assert_eq!(err.to_string(), "refused: connection reset");
    }

    #[test]
    fn numeric_fields_keep_their_type() {
        assert_eq!(UpstreamError::status(429_u16), UpstreamError::Status { status: 429 });
    }

    #[test]
    fn fields_are_passed_in_declaration_order() {
        let err = UpstreamError::rejected("rate limited", 429_u16);
        assert_eq!(err.to_string(), "rate limited (429)");
    }
}
