use std::collections::HashMap;

use ast::ast::Position;
use parser::parse;
use typechecker::subst::Substitution;
use typechecker::types::Type;
use typechecker::{typecheck, Program, TCResult, TypingError};

const MAIN: &str = "main(args: [[Int]]): Int = 0";

fn check(src: &str) -> TCResult<Program> {
    let _ = env_logger::try_init();
    let p = parse(src).unwrap();
    typecheck(&p)
}

fn check_with_main(src: &str) -> TCResult<Program> {
    check(&format!("{}\n{}", src, MAIN))
}

fn generic_fn(generics: &[&str], ret: Type, params: Vec<(&str, Type)>) -> Type {
    match Type::function(ret, params) {
        Type::Function {
            ret, params, names, ..
        } => Type::Function {
            ret,
            params,
            names,
            generics: generics.iter().map(|g| g.to_string()).collect(),
        },
        _ => unreachable!(),
    }
}

#[test]
fn typing_test() {
    for src in [
        include_str!("./files/generics.az"),
        include_str!("./files/lists.az"),
        include_str!("./files/effects.az"),
    ] {
        if let Err(e) = check(src) {
            panic!("{} at {}", e, e.position());
        }
    }
}

#[test]
fn structural_equality() {
    let int_bool = Type::Tuple(vec![Type::Int, Type::Bool]);
    let bool_int = Type::Tuple(vec![Type::Bool, Type::Int]);
    assert_eq!(int_bool, int_bool.clone());
    assert_ne!(int_bool, bool_int);
    assert_ne!(Type::list(Type::Int), Type::list(Type::Bool));
    assert_ne!(Type::list(Type::Int), Type::Tuple(vec![Type::Int]));
    assert_eq!(Type::Generic("a".into()), Type::Generic("a".into()));
    assert_ne!(Type::Generic("a".into()), Type::Generic("b".into()));
    assert_ne!(Type::nil(), Type::Tuple(vec![Type::nil()]));

    let named = Type::function(Type::Int, vec![("x", Type::Int)]);
    let renamed = Type::function(Type::Int, vec![("y", Type::Int)]);
    let unary = Type::function(Type::Int, vec![("x", Type::Int), ("y", Type::Int)]);
    assert_eq!(named, renamed);
    assert_eq!(renamed, named);
    assert_ne!(named, unary);
    assert_ne!(named, Type::function(Type::Bool, vec![("x", Type::Int)]));
}

#[test]
fn substitution_instantiates_every_occurrence() {
    let t = || Type::Generic("T".into());
    let u = || Type::Generic("U".into());
    let generic = generic_fn(
        &["T", "U"],
        Type::Tuple(vec![Type::list(t()), u()]),
        vec![
            ("x", t()),
            ("xs", Type::list(Type::Tuple(vec![t(), Type::Bool]))),
            ("f", Type::function(u(), vec![("y", t())])),
        ],
    );
    let subst: Substitution = [
        ("T".to_string(), Type::list(Type::Int)),
        ("U".to_string(), Type::Bool),
    ]
    .into_iter()
    .collect();
    let instantiated = subst.apply(&generic);

    let int_list = || Type::list(Type::Int);
    let by_hand = Type::function(
        Type::Tuple(vec![Type::list(int_list()), Type::Bool]),
        vec![
            ("x", int_list()),
            ("xs", Type::list(Type::Tuple(vec![int_list(), Type::Bool]))),
            ("f", Type::function(Type::Bool, vec![("y", int_list())])),
        ],
    );
    assert_eq!(instantiated, by_hand);
    match instantiated {
        Type::Function { generics, .. } => assert!(generics.is_empty()),
        other => panic!("expected a function type, found {}", other),
    }
    assert_eq!(generic.to_string(), "{T, U} ([T], U)(x: T, xs: [(T, Bool)], f: U(y: T))");
}

#[test]
fn substitution_leaves_unknown_generics() {
    let subst = Substitution::from(HashMap::from([("T".to_string(), Type::Int)]));
    assert_eq!(subst.apply(&Type::Generic("S".into())), Type::Generic("S".into()));
}

#[test]
fn substitution_renames_nested_binders_it_would_capture() {
    let u = || Type::Generic("U".into());
    let nested = generic_fn(&["U"], Type::Generic("T".into()), vec![("x", u())]);
    let subst: Substitution = [("T".to_string(), u())].into_iter().collect();
    match subst.apply(&nested) {
        Type::Function {
            ret,
            params,
            generics,
            ..
        } => {
            assert_eq!(*ret, u());
            assert_eq!(params, vec![Type::Generic("U'".into())]);
            assert_eq!(generics, vec!["U'".to_string()]);
        }
        other => panic!("expected a function type, found {}", other),
    }

    let subst: Substitution = [("T".to_string(), Type::Int)].into_iter().collect();
    assert_eq!(subst.apply(&nested).to_string(), "{U} Int(x: U)");
}

#[test]
fn instantiation_does_not_capture_caller_generics() {
    let src = "g{T}(h: {U} T(x: U)): T = h{Int}(5)
idu{U}(x: U): U = x
k{U}(y: U): U = g{U}(idu)
main(args: [[Int]]): Int = if k{Bool}(true) then 1 else 0";
    let err = check(src).unwrap_err();
    assert!(matches!(err, TypingError::TypeMismatch { .. }));
    assert_eq!(err.position(), Position::new(3, 22));
    assert!(err.to_string().contains("{U'} U(x: U')"));

    let src = "g{T}(h: {U} T(x: U)): T = h{Int}(5)
seven{U}(x: U): Int = 7
main(args: [[Int]]): Int = g{Int}(seven)";
    assert!(check(src).is_ok());
}

#[test]
fn checked_program_keeps_globals_and_declarations() {
    let program = check("double(n: Int): Int = n * 2\nmain(args: [[Int]]): Int = double(21)").unwrap();
    assert_eq!(
        program.globals["double"],
        Type::function(Type::Int, vec![("n", Type::Int)])
    );
    assert!(program.globals.contains_key("print"));
    assert!(program.globals.contains_key("rand"));
    let labels: Vec<_> = program.declarations.iter().map(|d| d.label.as_str()).collect();
    assert_eq!(labels, vec!["double", "main"]);
    assert_eq!(
        program.declarations[0].params(),
        Some(&["n".to_string()][..])
    );
    assert_eq!(program.declarations[0].ty.to_string(), "Int(n: Int)");
}

#[test]
fn empty_lists_need_an_annotation() {
    assert!(check_with_main("xs: [Int] = [] of Int").is_ok());
    let err = check_with_main("xs: [Int] = []").unwrap_err();
    assert!(matches!(err, TypingError::UntypedEmptyList { .. }));
    assert_eq!(err.kind(), "TypeError");
    assert_eq!(err.position(), Position::new(1, 13));
}

#[test]
fn unpacking_binds_head_and_tail() {
    assert!(check_with_main(
        "lst: [Int] = 3 ~ (4 ~ [] of Int)\nx: Int = if (h ~ t) <- lst then h + length(t) else 0\nlength(l: [Int]): Int = 0"
    )
    .is_ok());
    let err = check_with_main("x: Int = if (h ~ t) <- 5 then h else 0").unwrap_err();
    assert!(matches!(err, TypingError::ExpectedList { .. }));
}

#[test]
fn generic_calls_take_explicit_arguments() {
    let id = "id{T}(x: T): T = x";
    assert!(check(&format!("{}\nmain(args: [[Int]]): Int = id{{Int}}(5)", id)).is_ok());

    let err = check(&format!("{}\nmain(args: [[Int]]): Int = id{{Int, Int}}(5)", id)).unwrap_err();
    assert!(matches!(err, TypingError::GenericArgumentCount { expected: 1, found: 2, .. }));
    assert_eq!(err.kind(), "TypeError");
    assert_eq!(err.position(), Position::new(2, 28));

    let err = check(&format!("{}\nmain(args: [[Int]]): Int = id(5)", id)).unwrap_err();
    assert!(matches!(err, TypingError::MissingGenericArguments { .. }));

    let err = check(&format!("{}\nmain(args: [[Int]]): Int = id{{Bool}}(5)", id)).unwrap_err();
    assert!(matches!(err, TypingError::TypeMismatch { .. }));

    let err = check_with_main("x: Int = rand{Int}(5)").unwrap_err();
    assert!(matches!(err, TypingError::UnexpectedGenericArguments { .. }));
}

#[test]
fn generic_names_are_scoped_to_their_declarator() {
    let err = check_with_main("f(x: T): T = x").unwrap_err();
    assert!(matches!(err, TypingError::UnknownType { .. }));
    assert_eq!(err.kind(), "NameError");

    let err = check_with_main("f{T, T}(x: T): T = x").unwrap_err();
    assert!(matches!(err, TypingError::RedeclaredGeneric { .. }));

    let err = check_with_main("f{T}(g: {T} T(x: T)): Int = 0").unwrap_err();
    assert!(matches!(err, TypingError::RedeclaredGeneric { .. }));
}

#[test]
fn duplicate_globals_fail_before_bodies() {
    let err = check_with_main("x: Int = true\nx: Int = 1").unwrap_err();
    assert!(matches!(err, TypingError::MultipleDefinitions { .. }));
    assert_eq!(err.position(), Position::new(2, 1));
    assert_eq!(err.kind(), "NameError");

    let err = check_with_main("print: Int = 1").unwrap_err();
    assert!(matches!(err, TypingError::MultipleDefinitions { .. }));
}

#[test]
fn branch_bindings_stay_in_the_branch() {
    let err = check_with_main("f(l: [Int]): Int = if (h ~ t) <- l then h else h").unwrap_err();
    assert!(matches!(err, TypingError::UnknownIdentifier { .. }));
    assert_eq!(err.position(), Position::new(1, 48));

    let err = check_with_main(
        "f(l: [Int]): Int = let y <- if (h ~ t) <- l then h else 0 in h",
    )
    .unwrap_err();
    assert!(matches!(err, TypingError::UnknownIdentifier { .. }));
    assert_eq!(err.position(), Position::new(1, 62));

    assert!(check_with_main(
        "f(b: Bool): Int = if b then let y <- 1 in y else let y <- 2 in y"
    )
    .is_ok());
}

#[test]
fn locals_cannot_shadow_or_repeat() {
    let err = check_with_main("g: Int = let print <- 1 in 0").unwrap_err();
    assert!(matches!(err, TypingError::ShadowsGlobal { .. }));
    assert_eq!(err.position(), Position::new(1, 14));

    let err = check_with_main("g: Int = 1\nf(g: Int): Int = g").unwrap_err();
    assert!(matches!(err, TypingError::ShadowsGlobal { .. }));

    let err = check_with_main("f(a: Int, a: Int): Int = a").unwrap_err();
    assert!(matches!(err, TypingError::DuplicateBinding { .. }));
    assert_eq!(err.position(), Position::new(1, 11));

    let err = check_with_main("f(a: Int): Int = let (b, a) <- (1, 2) in b").unwrap_err();
    assert!(matches!(err, TypingError::DuplicateBinding { .. }));
    assert_eq!(err.kind(), "NameError");
}

#[test]
fn main_signature_is_fixed() {
    let err = check("x: Int = 1").unwrap_err();
    assert!(matches!(err, TypingError::NoMain { .. }));
    assert_eq!(err.position(), Position::new(1, 10));
    assert_eq!(err.kind(), "NameError");

    let err = check("main(args: [Int]): Int = 0").unwrap_err();
    assert!(matches!(err, TypingError::InvalidMain { .. }));
    assert_eq!(err.kind(), "TypeError");

    let err = check("main: Int = 0").unwrap_err();
    assert!(matches!(err, TypingError::InvalidMain { .. }));

    let err = check("main{T}(args: [[Int]]): Int = 0").unwrap_err();
    assert!(matches!(err, TypingError::InvalidMain { .. }));

    assert!(typecheck(&[]).is_err());
}

#[test]
fn expression_type_errors() {
    let err = check_with_main("x: Int = if true then 1 else false").unwrap_err();
    assert!(matches!(err, TypingError::BranchMismatch { .. }));
    assert_eq!(err.position(), Position::new(1, 30));

    let err = check_with_main("xs: [Int] = [1, true]").unwrap_err();
    assert!(matches!(err, TypingError::TypeMismatch { .. }));
    assert_eq!(err.position(), Position::new(1, 17));
    assert_eq!(
        err.to_string(),
        "couldn't match expected type 'Int' with actual type 'Bool'"
    );

    let err = check_with_main("x: Int = 1\ny: Int = x(1)").unwrap_err();
    assert!(matches!(err, TypingError::NotCallable { .. }));

    let err = check("zero(): Int = 0\nmain(args: [[Int]]): Int = zero(1)").unwrap_err();
    assert!(matches!(err, TypingError::ArgumentCount { expected: 0, found: 1, .. }));
    assert_eq!(err.position(), Position::new(2, 28));

    let err = check_with_main("x: Bool = 1 + true").unwrap_err();
    assert!(matches!(err, TypingError::TypeMismatch { .. }));

    let err = check_with_main("x: Bool = 1 < 2 & 3").unwrap_err();
    assert!(matches!(err, TypingError::TypeMismatch { .. }));

    let err = check_with_main("x: Int = let (a, b) <- (1, 2, 3) in a").unwrap_err();
    assert!(matches!(err, TypingError::PatternMismatch { expected: 2, .. }));

    let err = check_with_main("x: [Int] = true ~ [] of Int").unwrap_err();
    assert!(matches!(err, TypingError::TypeMismatch { .. }));

    let err = check_with_main("x: Int = y").unwrap_err();
    assert!(matches!(err, TypingError::UnknownIdentifier { .. }));
}
