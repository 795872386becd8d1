use crate::builtin::Const;
use crate::term::{BareTerm, Direction, HintedTerm, Term, TypedTerm};
use crate::types::Type;

// utils {{{
// let f = \d. turn d in x <- rand 3; {f west}
fn sample() -> (Type, TypedTerm) {
    let signal = Type::func(Type::Dir, Type::cmd(Type::Unit));
    let turner = Term::lam(
        "d",
        Type::Dir,
        Term::app(Type::Dir, Term::Const(Const::Turn), Term::var("d")),
    );
    let run = Term::bind(
        Some("x"),
        Type::Int,
        Term::app(Type::Int, Term::Const(Const::Rand), Term::Int(3)),
        Term::delay(Term::app(
            Type::Dir,
            Term::var("f"),
            Term::Dir(Direction::West),
        )),
    );
    (Type::cmd(Type::Unit), Term::let_in("f", signal, turner, run))
}

fn kind<A>(t: &Term<A>) -> &'static str {
    use Term::*;
    match t {
        Unit => "unit",
        Const(_) => "const",
        Dir(_) => "dir",
        Int(_) => "int",
        Str(_) => "str",
        Bool(_) => "bool",
        Var(_) => "var",
        Lam(_, _, _) => "lam",
        App(_, _, _) => "app",
        Let(_, _, _, _) => "let",
        Bind(_, _, _, _) => "bind",
        Noop => "noop",
        Delay(_) => "delay",
    }
}

fn kinds<A>(t: &Term<A>, out: &mut Vec<&'static str>) {
    use Term::*;
    out.push(kind(t));
    match t {
        Lam(_, _, body) | Delay(body) => kinds(body, out),
        App(_, fst, snd) | Let(_, _, fst, snd) | Bind(_, _, fst, snd) => {
            kinds(fst, out);
            kinds(snd, out);
        }
        _ => (),
    }
}
// }}}

// mapping and erasure {{{
#[test]
fn mapping() {
    let (_, t) = sample();

    let mut before = Vec::new();
    kinds(&t, &mut before);
    assert_eq!(13, before.len());

    // slots change, nothing else moves
    let relabeled = t.clone().map_ann(Some);
    let mut after = Vec::new();
    kinds(&relabeled, &mut after);
    assert_eq!(before, after);

    // and the transform reaches every slot, node before children
    let mut seen = Vec::new();
    t.map_ann(|ty| seen.push(ty.to_string()));
    assert_eq!(
        "dir -> cmd unit, dir, dir, int, int, dir",
        seen.join(", ")
    );
}

#[test]
fn erasure() {
    let (_, t) = sample();

    // erasing is independent of whatever happened to the slots before
    let plain = t.clone().erase();
    let hinted: HintedTerm = t.clone().map_ann(Some);
    let relabeled = t.map_ann(|_| Type::Unit);
    assert_eq!(plain, hinted.erase());
    assert_eq!(plain, relabeled.erase());
}
// }}}

// type-directed traversal {{{
#[test]
fn reconstruction() {
    use insta::assert_snapshot;

    let (ty, t) = sample();

    // the identity rewrite rebuilds the exact same tree
    let same = t.clone().bottom_up(&ty, |_, node| node);
    assert_eq!(t, same);

    // every node is seen once, children before parents, each at the
    // type its parent's shape dictates
    let mut log = Vec::new();
    t.bottom_up(&ty, |at, node| {
        log.push(format!("{} :: {at}", kind(&node)));
        node
    });
    assert_snapshot!(log.join("\n"), @r"
    const :: dir -> cmd unit
    var :: dir
    app :: cmd unit
    lam :: dir -> cmd unit
    const :: int -> cmd int
    int :: int
    app :: cmd int
    var :: dir -> cmd unit
    dir :: dir
    app :: cmd unit
    delay :: cmd unit
    bind :: cmd unit
    let :: cmd unit
    ");
}

#[test]
fn reconstruction_is_innermost_first() {
    // the parent is handed its already-rewritten children, so one pass
    // of constant folding reduces nested arithmetic all the way down
    fn fold(t: TypedTerm) -> TypedTerm {
        let (head, args) = t.spine();
        if let Term::Const(c) = head {
            match (c, args.as_slice()) {
                (Const::Add, [Term::Int(a), Term::Int(b)]) => return Term::Int(a + b),
                (Const::Neg, [Term::Int(a)]) => return Term::Int(-a),
                _ => (),
            }
        }
        t
    }

    let sum = Term::app(
        Type::Int,
        Term::app(Type::Int, Term::Const(Const::Add), Term::Int(1)),
        Term::Int(2),
    );
    let negated = Term::app(Type::Int, Term::Const(Const::Neg), sum);
    assert_eq!(
        Term::Int(-3),
        negated.bottom_up(&Type::Int, |_, node| fold(node))
    );
}

#[test]
#[should_panic]
fn reconstruction_needs_checked_trees() {
    let broken: TypedTerm = Term::lam("x", Type::Int, Term::var("x"));
    broken.bottom_up(&Type::Int, |_, node| node);
}
// }}}

// free-variable rewriting {{{
#[test]
fn rewriting_misses() {
    let (_, t) = sample();
    let bare = t.erase();

    // a name that never occurs free comes through untouched
    assert_eq!(bare, bare.clone().map_free("zzz", |_| Term::Noop));
    // "f" and "d" occur, but only below their binders
    assert_eq!(bare, bare.clone().map_free("f", |_| Term::Noop));
    assert_eq!(bare, bare.clone().map_free("d", |_| Term::Noop));
}

#[test]
fn rewriting_shadows() {
    let gone = |_: BareTerm| BareTerm::Noop;

    // a rebinding lambda protects its whole body
    let wrap: BareTerm = Term::lam("x", (), Term::app((), Term::var("f"), Term::var("x")));
    assert_eq!(wrap.clone(), wrap.clone().map_free("x", gone));

    // same for a rebinding let, bound side included
    let rebound: BareTerm = Term::let_in("x", (), Term::var("x"), Term::var("x"));
    assert_eq!(rebound.clone(), rebound.clone().map_free("x", gone));

    // a bind shadows its continuation only: the producer runs before
    // the name exists
    let seq: BareTerm = Term::bind(Some("x"), (), Term::var("x"), Term::var("x"));
    assert_eq!(
        Term::bind(Some("x"), (), Term::Noop, Term::var("x")),
        seq.map_free("x", gone)
    );

    // an anonymous bind shadows nothing
    let anon: BareTerm = Term::bind(None, (), Term::var("x"), Term::var("x"));
    assert_eq!(
        Term::bind(None, (), Term::Noop, Term::Noop),
        anon.map_free("x", gone)
    );
}

#[test]
fn rewriting_captures() {
    // there is no alpha-renaming: substituting in a term whose free
    // name an inner binder reuses gets that name captured
    let t: BareTerm = Term::lam("y", (), Term::var("x"));
    assert!(t.has_free("x"));

    let swapped = t.map_free("x", |_| Term::var("y"));
    assert_eq!(Term::lam("y", (), Term::var("y")), swapped);
    assert!(!swapped.has_free("y"));
}

#[test]
fn rewriting_agrees_with_has_free() {
    fn agree(t: &BareTerm, names: &[&str]) {
        for name in names {
            let mut hit = false;
            t.clone().map_free(name, |v| {
                hit = true;
                v
            });
            assert_eq!(t.has_free(name), hit, "for {name:?}");
        }
    }

    let (_, t) = sample();
    agree(&t.erase(), &["f", "d", "x", "west", "turn", "zzz"]);

    let open: BareTerm = Term::bind(
        Some("x"),
        (),
        Term::app((), Term::var("f"), Term::var("x")),
        Term::app((), Term::var("g"), Term::var("x")),
    );
    agree(&open, &["f", "g", "x", "zzz"]);
}
// }}}

// storage {{{
#[cfg(feature = "serde")]
#[test]
fn storage() {
    let (_, t) = sample();
    let bare = t.erase();

    let json = serde_json::to_string(&bare).unwrap();
    assert_eq!(bare, serde_json::from_str::<BareTerm>(&json).unwrap());
}
// }}}
