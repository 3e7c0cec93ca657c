// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Construction strategies.
//!
//! A [`Construction`] turns the decoded member values of one object, in
//! declaration order, into the target value. It is chosen once when the
//! schema is bound:
//!
//! - [`Construction::direct`] calls a constructor function with the values
//!   as positional arguments.
//! - [`Construction::aggregate`] builds an argument tuple and converts it
//!   with `From`, for plain structs whose fields follow declaration order.
//!
//! Each argument type converts its own value through [`FromField`]. Scalar,
//! class, sequence and nullable conversions live in the submodules.
//! Binding checks every argument against its member declaration, so a
//! schema that cannot be constructed is rejected before anything is parsed.

pub mod nullable;
pub mod scalar;
pub mod sequence;

use std::any::type_name;
use std::fmt;

use crate::core::error::{JsonLinkError, Result};
use crate::core::value::FieldValue;
use crate::schema::descriptor::MemberDescriptor;
use crate::schema::member::TypeTag;

pub use nullable::Nullable;
pub use sequence::{construct_array, construct_vec, reserve_hint};

/// How a [`FromField`] type builds itself from a decoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldStrategy {
    /// Number, bool, string or date
    Scalar,
    /// Nested class
    Class,
    /// Growable sequence
    Sequence,
    /// Fixed-length sequence
    FixedSequence,
    /// Empty or value-bearing wrapper
    Nullable,
}

/// A type that can be built from one decoded member value.
pub trait FromField: Sized {
    const STRATEGY: FieldStrategy;

    /// Whether a member declared with `tag` and `nullable` can build this
    /// type. Checked once at binding time.
    fn accepts(tag: &TypeTag, nullable: bool) -> bool;

    /// Build the value.
    fn from_field(value: FieldValue<'_>) -> Result<Self>;
}

/// Error for a value that does not match the type being built.
pub(crate) fn mismatch<T>(value: &FieldValue<'_>) -> JsonLinkError {
    JsonLinkError::Other(format!(
        "cannot build {} from a {} value",
        type_name::<T>(),
        value.type_name()
    ))
}

fn check_member<A: FromField>(member: &MemberDescriptor) -> std::result::Result<(), String> {
    if A::accepts(&member.tag, member.nullable) {
        return Ok(());
    }
    Err(format!(
        "member '{}' declared as {}{} cannot build argument {} of type {}",
        member.name,
        if member.nullable { "nullable " } else { "" },
        member.tag.describe(),
        member.position,
        type_name::<A>()
    ))
}

/// An ordered argument tuple built from decoded values.
pub trait ArgList: Sized {
    const ARITY: usize;

    /// Check the declared members against the argument types.
    fn check(members: &[MemberDescriptor]) -> std::result::Result<(), String>;

    /// Build the tuple from values in declaration order.
    fn from_values(values: Vec<FieldValue<'_>>) -> Result<Self>;
}

/// A function accepting an argument tuple's elements as parameters.
pub trait Constructor<T, Args>: Send + Sync + 'static {
    fn construct(&self, args: Args) -> T;
}

fn next_value<'a>(values: &mut std::vec::IntoIter<FieldValue<'a>>) -> Result<FieldValue<'a>> {
    values
        .next()
        .ok_or_else(|| JsonLinkError::Other("too few member values for constructor".to_string()))
}

macro_rules! impl_arg_list {
    ($n:expr; $($ty:ident $var:ident $idx:tt),*) => {
        impl<$($ty: FromField),*> ArgList for ($($ty,)*) {
            const ARITY: usize = $n;

            fn check(members: &[MemberDescriptor]) -> std::result::Result<(), String> {
                if members.len() != $n {
                    return Err(format!(
                        "{} members declared but the constructor takes {} arguments",
                        members.len(),
                        $n
                    ));
                }
                $( check_member::<$ty>(&members[$idx])?; )*
                Ok(())
            }

            #[allow(unused_mut, unused_variables)]
            fn from_values(values: Vec<FieldValue<'_>>) -> Result<Self> {
                let mut values = values.into_iter();
                Ok(($( $ty::from_field(next_value(&mut values)?)?, )*))
            }
        }

        impl<T, F, $($ty),*> Constructor<T, ($($ty,)*)> for F
        where
            F: Fn($($ty),*) -> T + Send + Sync + 'static,
        {
            fn construct(&self, args: ($($ty,)*)) -> T {
                let ($($var,)*) = args;
                (self)($($var),*)
            }
        }
    };
}

impl_arg_list!(0;);
impl_arg_list!(1; A a 0);
impl_arg_list!(2; A a 0, B b 1);
impl_arg_list!(3; A a 0, B b 1, C c 2);
impl_arg_list!(4; A a 0, B b 1, C c 2, D d 3);
impl_arg_list!(5; A a 0, B b 1, C c 2, D d 3, E e 4);
impl_arg_list!(6; A a 0, B b 1, C c 2, D d 3, E e 4, G g 5);
impl_arg_list!(7; A a 0, B b 1, C c 2, D d 3, E e 4, G g 5, H h 6);
impl_arg_list!(8; A a 0, B b 1, C c 2, D d 3, E e 4, G g 5, H h 6, I i 7);
impl_arg_list!(9; A a 0, B b 1, C c 2, D d 3, E e 4, G g 5, H h 6, I i 7, J j 8);
impl_arg_list!(10; A a 0, B b 1, C c 2, D d 3, E e 4, G g 5, H h 6, I i 7, J j 8, K k 9);
impl_arg_list!(11; A a 0, B b 1, C c 2, D d 3, E e 4, G g 5, H h 6, I i 7, J j 8, K k 9, L l 10);
impl_arg_list!(12; A a 0, B b 1, C c 2, D d 3, E e 4, G g 5, H h 6, I i 7, J j 8, K k 9, L l 10, M m 11);

/// Which construction path a schema uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstructionKind {
    Direct,
    Aggregate,
}

impl fmt::Display for ConstructionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstructionKind::Direct => f.write_str("direct"),
            ConstructionKind::Aggregate => f.write_str("aggregate"),
        }
    }
}

type CheckFn = fn(&[MemberDescriptor]) -> std::result::Result<(), String>;
type BuildFn<T> = Box<dyn for<'a> Fn(Vec<FieldValue<'a>>) -> Result<T> + Send + Sync>;

fn boxed<T, F>(build: F) -> BuildFn<T>
where
    F: for<'a> Fn(Vec<FieldValue<'a>>) -> Result<T> + Send + Sync + 'static,
{
    Box::new(build)
}

/// Bound construction strategy for `T`.
pub struct Construction<T> {
    kind: ConstructionKind,
    arity: usize,
    check: CheckFn,
    build: BuildFn<T>,
}

impl<T: 'static> Construction<T> {
    /// Construct by calling `constructor` with the member values as
    /// positional arguments.
    ///
    /// ```
    /// use jsonlink::construct::Construction;
    ///
    /// struct Point {
    ///     x: i32,
    ///     y: i32,
    /// }
    ///
    /// let construction = Construction::direct(|x: i32, y: i32| Point { x, y });
    /// assert_eq!(construction.arity(), 2);
    /// ```
    pub fn direct<Args, F>(constructor: F) -> Self
    where
        Args: ArgList + 'static,
        F: Constructor<T, Args>,
    {
        Self {
            kind: ConstructionKind::Direct,
            arity: Args::ARITY,
            check: Args::check,
            build: boxed(move |values| Args::from_values(values).map(|args| constructor.construct(args))),
        }
    }

    /// Construct by building the argument tuple and converting it with
    /// `From`.
    pub fn aggregate<Args>() -> Self
    where
        Args: ArgList + 'static,
        T: From<Args>,
    {
        Self {
            kind: ConstructionKind::Aggregate,
            arity: Args::ARITY,
            check: Args::check,
            build: boxed(|values| Args::from_values(values).map(T::from)),
        }
    }
}

impl<T> Construction<T> {
    pub fn kind(&self) -> ConstructionKind {
        self.kind
    }

    /// Number of member values the strategy consumes.
    pub fn arity(&self) -> usize {
        self.arity
    }

    pub(crate) fn check(&self, members: &[MemberDescriptor]) -> std::result::Result<(), String> {
        (self.check)(members)
    }

    pub(crate) fn build(&self, values: Vec<FieldValue<'_>>) -> Result<T> {
        (self.build)(values)
    }
}

impl<T> fmt::Debug for Construction<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Construction")
            .field("kind", &self.kind)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}
