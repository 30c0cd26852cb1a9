//! Enum accessor macros
//!
//! All macros use `paste` internally for identifier concatenation.

/// Generate is_xxx, as_xxx, as_xxx_mut for enums with typed variants
///
/// Uses paste's `:camel` modifier to convert method name to variant name.
/// # Generated methods per variant:
/// - `is_xxx(&self) -> bool`
/// - `as_xxx(&self) -> Option<&Type>`
/// - `as_xxx_mut(&mut self) -> Option<&mut Type>`
///
/// # Example
/// ```ignore
/// impl Node {
///     // element -> Element, text -> Text
///     impl_enum_accessors!(element, text);
/// }
/// ```
#[macro_export]
macro_rules! impl_enum_accessors {
    ($($variant:ident),* $(,)?) => {
        ::paste::paste! {
            $(
                #[doc = "Check if this is a " [<$variant:camel>] " node"]
                #[inline]
                pub fn [<is_ $variant>](&self) -> bool {
                    matches!(self, Self::[<$variant:camel>](_))
                }

                #[doc = "Try to get as " $variant " reference"]
                #[inline]
                pub fn [<as_ $variant>](&self) -> Option<&[<$variant:camel>]> {
                    match self { Self::[<$variant:camel>](v) => Some(v), _ => None }
                }

                #[doc = "Try to get as mutable " $variant " reference"]
                #[inline]
                pub fn [<as_ $variant _mut>](&mut self) -> Option<&mut [<$variant:camel>]> {
                    match self { Self::[<$variant:camel>](v) => Some(v), _ => None }
                }
            )*
        }
    };
}

/// Generate `name(&self) -> &'static str` for fieldless or data-carrying
/// enum variants, used by debug records.
///
/// # Example
/// ```ignore
/// impl RepairRule {
///     impl_variant_names!(CommandCall => "command-call", MarkerWord => "marker-word");
/// }
/// ```
#[macro_export]
macro_rules! impl_variant_names {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// Stable kebab-case name used in debug output
        pub fn name(&self) -> &'static str {
            match self {
                $(Self::$variant { .. } => $name,)*
            }
        }
    };
}

#[cfg(test)]
mod tests {
    #[derive(Debug)]
    struct Alpha(u8);
    #[derive(Debug)]
    struct Beta(&'static str);

    enum Pair {
        Alpha(Alpha),
        Beta(Beta),
    }

    impl Pair {
        impl_enum_accessors!(alpha, beta);
        impl_variant_names!(Alpha => "alpha", Beta => "beta");
    }

    #[test]
    fn test_enum_accessors() {
        let mut pair = Pair::Alpha(Alpha(3));
        assert!(pair.is_alpha());
        assert!(!pair.is_beta());
        assert_eq!(pair.as_alpha().map(|a| a.0), Some(3));
        assert!(pair.as_beta().is_none());

        if let Some(a) = pair.as_alpha_mut() {
            a.0 = 9;
        }
        assert_eq!(pair.as_alpha().map(|a| a.0), Some(9));

        let pair = Pair::Beta(Beta("b"));
        assert_eq!(pair.as_beta().map(|b| b.0), Some("b"));
    }

    #[test]
    fn test_variant_names() {
        assert_eq!(Pair::Alpha(Alpha(0)).name(), "alpha");
        assert_eq!(Pair::Beta(Beta("")).name(), "beta");
    }
}
