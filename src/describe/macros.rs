/// Implements [`Describe`](crate::Describe) for a struct from a field list.
///
/// Each entry is `Ident: Type`, optionally followed by `=> "tag string"` and
/// preceded by markers: `#[embedded]` for an embedded field (its identifier is
/// the embedded type's name) and `#[private]` for a field that is not exported.
/// Fields are listed in declaration order, which is the order of the
/// generated `properties`.
///
/// # Example
///
/// ```rust
/// use typeschema::{describe, reflect};
/// use serde_json::json;
///
/// struct Audit;
/// struct User;
///
/// describe! {
///     Audit {
///         CreatedBy: String,
///     }
/// }
///
/// describe! {
///     User {
///         #[embedded] Audit: Audit,
///         Name: String,
///         Age: i64 => r#"json:",omitempty" jsonschema:"minimum=0""#,
///         #[private] password: String,
///     }
/// }
///
/// let schema = reflect::<User>().unwrap().to_value().unwrap();
/// assert_eq!(schema["definitions"]["User"]["required"], json!(["CreatedBy", "Name"]));
/// ```
#[macro_export]
macro_rules! describe {
    (
        $ty:ident {
            $(
                $(#[$marker:ident])*
                $field:ident : $field_ty:ty $(=> $tag:expr)?
            ),* $(,)?
        }
    ) => {
        impl $crate::Describe for $ty {
            fn describe() -> $crate::TypeDescriptor {
                $crate::TypeDescriptor::structure::<$ty>(stringify!($ty))
                    $(
                        .field(
                            $crate::Field::new::<$field_ty>(stringify!($field))
                                $(.tag($tag))?
                                $(.$marker())*
                        )
                    )*
            }
        }
    };
}
