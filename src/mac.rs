/// Implements [`Fields`](crate::Fields) and [`Decode`](crate::Decode) for a
/// struct by listing its fields.
///
/// Each field is decoded under its own name, or under the name given with
/// `as "..."`. A field marked `#[json(skip)]` is recognized but its value is
/// discarded. Keys that match no field are skipped. The name table is sorted
/// at compile time, and listing a name twice fails to compile.
///
/// ```
/// #[derive(Default, Debug, PartialEq)]
/// struct Point {
///     x: f64,
///     y: f64,
///     label: String,
///     cache: Vec<u8>,
/// }
///
/// pocojson::json_fields! {
///     Point {
///         x,
///         y,
///         label as "display-name",
///         #[json(skip)] cache,
///     }
/// }
///
/// let p: Point = pocojson::from_str(
///     r#"{"y": 2, "display-name": "origin", "x": 0.5, "cache": [1, 2], "z": {}}"#,
/// ).unwrap();
/// assert_eq!(p, Point { x: 0.5, y: 2.0, label: "origin".into(), cache: vec![] });
/// ```
#[macro_export]
macro_rules! json_fields {
    ($ty:ty { $( $(#[json($opt:ident)])? $field:ident $(as $name:literal)? ),* $(,)? }) => {
        impl $crate::Fields for $ty {
            const FIELDS: $crate::FieldTable = {
                const NAMES: &[&str] = &[$($crate::__field_name!($field $(, $name)?)),*];
                const OPTIONS: &[$crate::FieldOption] = &[$($crate::__field_option!($($opt)?)),*];
                const ENTRIES: &[$crate::Entry] =
                    &$crate::fields::sort_entries::<{ NAMES.len() }>(NAMES, OPTIONS);
                $crate::FieldTable::new(ENTRIES)
            };

            #[allow(unused_mut, unused_assignments)]
            fn decode_field<C: $crate::Cursor>(
                &mut self,
                slot: usize,
                r: &mut $crate::Reader<C>,
            ) -> $crate::Result<()> {
                let mut at = 0usize;
                $(
                    if slot == at {
                        return $crate::__decode_slot!(self.$field, r $(, $opt)?);
                    }
                    at += 1;
                )*
                r.ignore_value()
            }
        }

        impl $crate::Decode for $ty {
            fn decode<C: $crate::Cursor>(
                &mut self,
                r: &mut $crate::Reader<C>,
            ) -> $crate::Result<()> {
                $crate::fields::decode_fields(self, r)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __field_name {
    ($field:ident) => {
        stringify!($field)
    };
    ($field:ident, $name:literal) => {
        $name
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __field_option {
    () => {
        $crate::FieldOption::Decode
    };
    (skip) => {
        $crate::FieldOption::Skip
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __decode_slot {
    ($place:expr, $r:ident) => {
        $crate::Decode::decode(&mut $place, $r)
    };
    ($place:expr, $r:ident, skip) => {
        $r.ignore_value()
    };
}
