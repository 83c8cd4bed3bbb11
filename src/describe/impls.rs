//! [`Describe`] implementations for standard library and ecosystem types.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::rc::Rc;
use std::sync::mpsc::{Receiver, Sender, SyncSender};
use std::sync::Arc;
use std::time::SystemTime;

use indexmap::IndexMap;

use super::{Describe, FloatKind, IntegerKind, Kind, TypeDescriptor, WellKnown};

macro_rules! describe_unnamed {
    ($($ty:ty => $kind:expr),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::anonymous::<$ty>($kind)
                }
            }
        )*
    };
}

describe_unnamed! {
    bool => Kind::Bool,
    i8 => Kind::Integer(IntegerKind::I8),
    i16 => Kind::Integer(IntegerKind::I16),
    i32 => Kind::Integer(IntegerKind::I32),
    i64 => Kind::Integer(IntegerKind::I64),
    i128 => Kind::Integer(IntegerKind::I128),
    isize => Kind::Integer(IntegerKind::Isize),
    u8 => Kind::Integer(IntegerKind::U8),
    u16 => Kind::Integer(IntegerKind::U16),
    u32 => Kind::Integer(IntegerKind::U32),
    u64 => Kind::Integer(IntegerKind::U64),
    u128 => Kind::Integer(IntegerKind::U128),
    usize => Kind::Integer(IntegerKind::Usize),
    f32 => Kind::Float(FloatKind::F32),
    f64 => Kind::Float(FloatKind::F64),
    char => Kind::String,
    String => Kind::String,
    &'static str => Kind::String,
    serde_json::Value => Kind::Interface,
}

macro_rules! describe_sequence {
    ($($ty:ident),*) => {
        $(
            impl<T: Describe> Describe for $ty<T> {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::anonymous::<Self>(Kind::Slice(T::describe))
                }
            }
        )*
    };
}

describe_sequence!(Vec, VecDeque, LinkedList, BTreeSet);

impl<T: Describe, S: 'static> Describe for HashSet<T, S> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::anonymous::<Self>(Kind::Slice(T::describe))
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::anonymous::<Self>(Kind::Array(T::describe, N))
    }
}

macro_rules! describe_pointer {
    ($($ty:ident),*) => {
        $(
            impl<T: Describe> Describe for $ty<T> {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::anonymous::<Self>(Kind::Pointer(T::describe))
                }
            }
        )*
    };
}

describe_pointer!(Option, Box, Rc, Arc);

impl<K: Describe, V: Describe, S: 'static> Describe for HashMap<K, V, S> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::anonymous::<Self>(Kind::Map {
            key: K::describe,
            value: V::describe,
        })
    }
}

impl<K: Describe, V: Describe> Describe for BTreeMap<K, V> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::anonymous::<Self>(Kind::Map {
            key: K::describe,
            value: V::describe,
        })
    }
}

impl<K: Describe, V: Describe, S: 'static> Describe for IndexMap<K, V, S> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::anonymous::<Self>(Kind::Map {
            key: K::describe,
            value: V::describe,
        })
    }
}

impl Describe for serde_json::Map<String, serde_json::Value> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::anonymous::<Self>(Kind::Map {
            key: String::describe,
            value: serde_json::Value::describe,
        })
    }
}

impl Describe for Box<serde_json::value::RawValue> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::well_known::<Self>("RawValue", WellKnown::RawJson)
    }
}

impl Describe for SystemTime {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::well_known::<Self>("SystemTime", WellKnown::Timestamp)
    }
}

impl Describe for IpAddr {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::well_known::<Self>("IpAddr", WellKnown::IpAddr)
    }
}

impl Describe for Ipv4Addr {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::well_known::<Self>("Ipv4Addr", WellKnown::Ipv4Addr)
    }
}

impl Describe for Ipv6Addr {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::well_known::<Self>("Ipv6Addr", WellKnown::Ipv6Addr)
    }
}

impl<R: 'static> Describe for fn() -> R {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::anonymous::<Self>(Kind::Function)
    }
}

impl<A: 'static, R: 'static> Describe for fn(A) -> R {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::anonymous::<Self>(Kind::Function)
    }
}

impl<A: 'static, B: 'static, R: 'static> Describe for fn(A, B) -> R {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::anonymous::<Self>(Kind::Function)
    }
}

impl<T: 'static> Describe for Sender<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::anonymous::<Self>(Kind::Channel)
    }
}

impl<T: 'static> Describe for SyncSender<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::anonymous::<Self>(Kind::Channel)
    }
}

impl<T: 'static> Describe for Receiver<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::anonymous::<Self>(Kind::Channel)
    }
}

#[cfg(feature = "chrono")]
impl<Tz: chrono::TimeZone + 'static> Describe for chrono::DateTime<Tz> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::well_known::<Self>("DateTime", WellKnown::Timestamp)
    }
}

#[cfg(feature = "chrono")]
impl Describe for chrono::NaiveDateTime {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::well_known::<Self>("NaiveDateTime", WellKnown::Timestamp)
    }
}
