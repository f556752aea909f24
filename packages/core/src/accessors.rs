//! Typed getters on sections.
//!
//! Everything here is built on two lookups: [`SectionRef::get_safe`] and
//! [`SectionRef::get_as_safe`]. The `*_safe` getters return `None` when the
//! entry is missing or doesn't coerce; the plain getters return the
//! document's configured default instead.

use indexmap::IndexMap;

use crate::address::Address;
use crate::coerce::{coerce_list, Fallback, FromValue};
use crate::{Key, SectionRef, Value};

impl<'a> SectionRef<'a> {
    /// The leaf value at `address`, coerced to `T`.
    ///
    /// Sections never coerce.
    pub fn get_as_safe<T: FromValue>(&self, address: impl Into<Address>) -> Option<T> {
        self.get_safe(address)?.as_value().and_then(T::from_value)
    }

    /// Like [`get_as_safe`](Self::get_as_safe), falling back to the configured default.
    pub fn get_as<T: FromValue + Fallback>(&self, address: impl Into<Address>) -> T {
        self.get_as_safe(address)
            .unwrap_or_else(|| T::fallback(self.settings()))
    }

    /// Like [`get_as_safe`](Self::get_as_safe), falling back to `default`.
    pub fn get_as_or<T: FromValue>(&self, address: impl Into<Address>, default: T) -> T {
        self.get_as_safe(address).unwrap_or(default)
    }

    /// Whether the leaf at `address` already has `T`'s natural shape.
    pub fn is_as<T: FromValue>(&self, address: impl Into<Address>) -> bool {
        self.get_safe(address)
            .and_then(|item| item.as_value())
            .is_some_and(T::is_exact)
    }

    pub fn is_number(&self, address: impl Into<Address>) -> bool {
        self.get_safe(address)
            .and_then(|item| item.as_value())
            .is_some_and(Value::is_number)
    }

    pub fn is_list(&self, address: impl Into<Address>) -> bool {
        self.is_as::<Vec<Value>>(address)
    }

    /// The list at `address`, borrowed.
    pub fn get_list_safe(&self, address: impl Into<Address>) -> Option<&'a [Value]> {
        self.get_safe(address)?.as_value()?.as_list()
    }

    /// The list at `address`, or the configured default list.
    pub fn get_list(&self, address: impl Into<Address>) -> Vec<Value> {
        self.get_as(address)
    }

    /// The list at `address` with each element coerced to `T`.
    ///
    /// Elements that don't coerce are dropped; the rest keep their order.
    pub fn get_list_of_safe<T: FromValue>(&self, address: impl Into<Address>) -> Option<Vec<T>> {
        self.get_list_safe(address).map(coerce_list)
    }

    /// Like [`get_list_of_safe`](Self::get_list_of_safe); on a miss the
    /// configured default list is coerced instead.
    pub fn get_list_of<T: FromValue>(&self, address: impl Into<Address>) -> Vec<T> {
        self.get_list_of_safe(address)
            .unwrap_or_else(|| coerce_list(self.settings().default_list()))
    }

    pub fn get_map_list_safe(
        &self,
        address: impl Into<Address>,
    ) -> Option<Vec<IndexMap<Key, Value>>> {
        self.get_list_of_safe(address)
    }

    pub fn get_map_list(&self, address: impl Into<Address>) -> Vec<IndexMap<Key, Value>> {
        self.get_list_of(address)
    }
}

macro_rules! typed_accessors {
    ($($t:ty => $get:ident, $safe:ident, $or:ident, $is:ident, $list:ident, $list_safe:ident;)*) => {
        impl<'a> SectionRef<'a> {
            $(
                #[doc = concat!("The `", stringify!($t), "` at `address`, or the configured default.")]
                pub fn $get(&self, address: impl Into<Address>) -> $t {
                    self.get_as(address)
                }

                #[doc = concat!("The `", stringify!($t), "` at `address`, if present and coercible.")]
                pub fn $safe(&self, address: impl Into<Address>) -> Option<$t> {
                    self.get_as_safe(address)
                }

                #[doc = concat!("The `", stringify!($t), "` at `address`, or `default`.")]
                pub fn $or(&self, address: impl Into<Address>, default: $t) -> $t {
                    self.get_as_or(address, default)
                }

                #[doc = concat!("Whether the entry at `address` is stored as a `", stringify!($t), "`.")]
                pub fn $is(&self, address: impl Into<Address>) -> bool {
                    self.is_as::<$t>(address)
                }

                #[doc = concat!("Elements of the list at `address` that coerce to `", stringify!($t), "`, or the configured default list.")]
                pub fn $list(&self, address: impl Into<Address>) -> Vec<$t> {
                    self.get_list_of(address)
                }

                #[doc = concat!("Elements of the list at `address` that coerce to `", stringify!($t), "`, or `None` without a list.")]
                pub fn $list_safe(&self, address: impl Into<Address>) -> Option<Vec<$t>> {
                    self.get_list_of_safe(address)
                }
            )*
        }
    };
}

typed_accessors! {
    i8 => get_i8, get_i8_safe, get_i8_or, is_i8, get_i8_list, get_i8_list_safe;
    i16 => get_i16, get_i16_safe, get_i16_or, is_i16, get_i16_list, get_i16_list_safe;
    i32 => get_i32, get_i32_safe, get_i32_or, is_i32, get_i32_list, get_i32_list_safe;
    i64 => get_i64, get_i64_safe, get_i64_or, is_i64, get_i64_list, get_i64_list_safe;
    i128 => get_i128, get_i128_safe, get_i128_or, is_i128, get_i128_list, get_i128_list_safe;
    f32 => get_f32, get_f32_safe, get_f32_or, is_f32, get_f32_list, get_f32_list_safe;
    f64 => get_f64, get_f64_safe, get_f64_or, is_f64, get_f64_list, get_f64_list_safe;
    bool => get_bool, get_bool_safe, get_bool_or, is_bool, get_bool_list, get_bool_list_safe;
    char => get_char, get_char_safe, get_char_or, is_char, get_char_list, get_char_list_safe;
    String => get_string, get_string_safe, get_string_or, is_string, get_string_list, get_string_list_safe;
}
