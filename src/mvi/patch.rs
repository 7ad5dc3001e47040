//! Merge rules for state values and state fragments.
//!
//! A transition returns a partial result rather than a whole new state.
//! [`Patchable`] describes how such a result folds into the value it
//! replaces:
//!
//! - **Record** values (object-shaped) merge field-by-field, one level deep,
//!   with the new fields winning over the old ones.
//! - **Opaque** values (everything else) are replaced wholesale.
//!
//! # Absent results
//!
//! `adopt(None)` is the value an opaque slot takes when a transition returns
//! nothing. It is adopted as-is: `serde_json::Value` becomes `Null`, `Option`
//! becomes `None`, and scalar types that cannot be absent fall back to their
//! `Default`.

use serde_json::Value;

/// A value that a partial update can be folded into.
pub trait Patchable: Clone {
    /// Shape of a partial result ("only the changed fields").
    type Patch;

    /// True when this value is object-shaped and merges field-by-field.
    fn is_record(&self) -> bool;

    /// True when a partial result is object-shaped.
    fn is_record_patch(patch: &Self::Patch) -> bool;

    /// Shallow merge, new fields win. Only meaningful when both `self` and
    /// `patch` are records.
    fn merge(&self, patch: Self::Patch) -> Self;

    /// Wholesale replacement. `None` is adopted as the new value.
    fn adopt(patch: Option<Self::Patch>) -> Self;
}

/// A partial update result: a patch, or nothing.
pub type Maybe<M> = Option<<M as Patchable>::Patch>;

impl Patchable for Value {
    type Patch = Value;

    fn is_record(&self) -> bool {
        self.is_object()
    }

    fn is_record_patch(patch: &Value) -> bool {
        patch.is_object()
    }

    fn merge(&self, patch: Value) -> Self {
        match (self, patch) {
            (Value::Object(old), Value::Object(fields)) => {
                let mut merged = old.clone();
                for (key, value) in fields {
                    merged.insert(key, value);
                }
                Value::Object(merged)
            }
            (_, other) => other,
        }
    }

    fn adopt(patch: Option<Value>) -> Self {
        patch.unwrap_or(Value::Null)
    }
}

impl<T: Clone> Patchable for Option<T> {
    type Patch = Option<T>;

    fn is_record(&self) -> bool {
        false
    }

    fn is_record_patch(_: &Option<T>) -> bool {
        false
    }

    fn merge(&self, patch: Option<T>) -> Self {
        patch
    }

    fn adopt(patch: Option<Option<T>>) -> Self {
        patch.flatten()
    }
}

macro_rules! opaque_patchable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Patchable for $ty {
                type Patch = $ty;

                fn is_record(&self) -> bool {
                    false
                }

                fn is_record_patch(_: &$ty) -> bool {
                    false
                }

                fn merge(&self, patch: $ty) -> Self {
                    patch
                }

                fn adopt(patch: Option<$ty>) -> Self {
                    patch.unwrap_or_default()
                }
            }
        )*
    };
}

opaque_patchable!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
    String, (),
);

/// Declares a record struct together with its patch struct.
///
/// Every field of the patch is an `Option` of the record's field; `None`
/// leaves the old field untouched.
///
/// ```
/// elmish::record! {
///     #[derive(Debug)]
///     pub struct Item => ItemPatch {
///         pub text: String,
///         pub done: bool,
///     }
/// }
///
/// use elmish::Patchable;
///
/// let item = Item { text: "milk".into(), done: false };
/// let done = item.merge(ItemPatch { done: Some(true), ..Default::default() });
/// assert_eq!(done.text, "milk");
/// assert!(done.done);
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident => $patch:ident {
            $($fvis:vis $field:ident : $ty:ty),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Default)]
        $vis struct $name {
            $($fvis $field: $ty,)*
        }

        #[derive(Debug, Clone, PartialEq, Default)]
        $vis struct $patch {
            $($fvis $field: ::core::option::Option<$ty>,)*
        }

        impl $crate::Patchable for $name {
            type Patch = $patch;

            fn is_record(&self) -> bool {
                true
            }

            fn is_record_patch(_: &$patch) -> bool {
                true
            }

            fn merge(&self, patch: $patch) -> Self {
                Self {
                    $($field: match patch.$field {
                        ::core::option::Option::Some(value) => value,
                        ::core::option::Option::None => ::core::clone::Clone::clone(&self.$field),
                    },)*
                }
            }

            fn adopt(patch: ::core::option::Option<$patch>) -> Self {
                match patch {
                    ::core::option::Option::Some(patch) => {
                        let base = <Self as ::core::default::Default>::default();
                        $crate::Patchable::merge(&base, patch)
                    }
                    ::core::option::Option::None => ::core::default::Default::default(),
                }
            }
        }
    };
}
