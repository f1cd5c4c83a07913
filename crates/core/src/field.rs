//! Typed field keys.
//!
//! Every form declares its fields as a closed enum so that schemas, values and
//! errors are keyed by something the compiler can check. The wire name is
//! only used at the edges (JSON records, snapshots, reports).

use std::fmt;
use std::hash::Hash;

/// A field of one particular form.
pub trait FormField: Copy + Ord + Hash + fmt::Debug + Send + Sync + 'static {
    /// Every field of the form, in declaration order.
    const ALL: &'static [Self];

    /// Wire name (the JSON key used by the REST records).
    fn name(self) -> &'static str;

    /// Human-readable label, used in default cross-field messages.
    fn label(self) -> &'static str;

    /// Look up a field by its wire name.
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }
}

/// Declare a field enum together with its [`FormField`] impl.
///
/// ```
/// coursework_core::form_fields! {
///     pub enum LoginField {
///         Email => ("email", "Email"),
///         Password => ("password", "Password"),
///     }
/// }
///
/// use coursework_core::field::FormField;
/// assert_eq!(LoginField::from_name("email"), Some(LoginField::Email));
/// assert_eq!(LoginField::Password.label(), "Password");
/// ```
#[macro_export]
macro_rules! form_fields {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => ($wire:literal, $label:literal)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::field::FormField for $name {
            const ALL: &'static [Self] = &[ $( Self::$variant ),+ ];

            fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => $wire ),+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $( Self::$variant => $label ),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::field::FormField::name(*self))
            }
        }
    };
}
