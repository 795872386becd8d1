//! the types terms are annotated with

use std::fmt::{Display, Formatter, Result as FmtResult};

/// A fully-known type. This is what the annotation slots of a checked
/// term hold; inference lives upstream and only ever hands over complete
/// types, so there is no variable case and nothing mutable in here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Type {
    Unit,
    Int,
    Str,
    Bool,
    Dir,
    Func(Box<Type>, Box<Type>),
    Cmd(Box<Type>),
}

impl Type {
    pub fn func(par: Type, ret: Type) -> Type {
        Type::Func(Box::new(par), Box::new(ret))
    }

    pub fn cmd(ret: Type) -> Type {
        Type::Cmd(Box::new(ret))
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Type::Unit => write!(f, "unit"),
            Type::Int => write!(f, "int"),
            Type::Str => write!(f, "str"),
            Type::Bool => write!(f, "bool"),
            Type::Dir => write!(f, "dir"),

            // the arrow hangs to the right, `cmd` binds tighter than it
            Type::Func(par, ret) => {
                let funcarg = matches!(**par, Type::Func(_, _));
                if funcarg {
                    write!(f, "({par}) -> {ret}")
                } else {
                    write!(f, "{par} -> {ret}")
                }
            }

            Type::Cmd(ret) => {
                let wrapped = matches!(**ret, Type::Func(_, _) | Type::Cmd(_));
                if wrapped {
                    write!(f, "cmd ({ret})")
                } else {
                    write!(f, "cmd {ret}")
                }
            }
        }
    }
}

#[test]
fn test() {
    use insta::assert_snapshot;

    assert_snapshot!(Type::Unit, @"unit");
    assert_snapshot!(Type::func(Type::Int, Type::Bool), @"int -> bool");
    assert_snapshot!(
        Type::func(Type::Int, Type::func(Type::Int, Type::Int)),
        @"int -> int -> int"
    );
    assert_snapshot!(
        Type::func(Type::func(Type::Int, Type::Int), Type::Int),
        @"(int -> int) -> int"
    );
    assert_snapshot!(Type::cmd(Type::Unit), @"cmd unit");
    assert_snapshot!(
        Type::func(Type::Str, Type::cmd(Type::Unit)),
        @"str -> cmd unit"
    );
    assert_snapshot!(
        Type::func(Type::cmd(Type::Int), Type::Bool),
        @"cmd int -> bool"
    );
    assert_snapshot!(Type::cmd(Type::cmd(Type::Unit)), @"cmd (cmd unit)");
    assert_snapshot!(
        Type::cmd(Type::func(Type::Dir, Type::cmd(Type::Unit))),
        @"cmd (dir -> cmd unit)"
    );
}
