//! Type checker benchmarks for whilec
//!
//! Each iteration checks a freshly built tree: annotations and `var` cells
//! are written during checking, so a tree can only be checked once.

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use whilec_syntax::ast::{
    BinaryOp, Decl, Expr, MethodDecl, Parameter, Stmt, TypeDecl, UnaryOp, VariableDeclaration,
    WhileFile,
};
use whilec_typecheck::{Registry, Subtyping, Type, check};

/// A file with `count` methods, each a loop over an array of records.
fn build_file(count: usize) -> WhileFile {
    let mut declarations = vec![
        Decl::Type(TypeDecl::new(
            "Point",
            Type::record([(Type::Int, "x"), (Type::Int, "y")]),
        )),
        Decl::Type(TypeDecl::new(
            "Shape",
            Type::union([
                Type::named("Point"),
                Type::record([(Type::Int, "x"), (Type::Bool, "filled")]),
            ]),
        )),
    ];

    for i in 0..count {
        let index = VariableDeclaration {
            name: "i".to_string(),
            ty: Type::Int,
            init: Some(Expr::int(0)),
        };
        let body = vec![
            Stmt::infer("total", Expr::int(0)),
            Stmt::for_loop(
                index,
                Expr::binary(
                    BinaryOp::Lt,
                    Expr::var("i"),
                    Expr::unary(UnaryOp::LengthOf, Expr::var("shapes")),
                ),
                Stmt::assign(Expr::var("i"), Expr::add(Expr::var("i"), Expr::int(1))),
                vec![Stmt::assign(
                    Expr::var("total"),
                    Expr::add(
                        Expr::var("total"),
                        Expr::access(Expr::index(Expr::var("shapes"), Expr::var("i")), "x"),
                    ),
                )],
            ),
            Stmt::if_else(
                Expr::binary(BinaryOp::Gt, Expr::var("total"), Expr::int(100)),
                vec![Stmt::assign(Expr::var("total"), Expr::bool(true))],
                vec![],
            ),
            Stmt::print(Expr::var("total")),
            Stmt::ret(Some(Expr::int(0))),
        ];
        declarations.push(Decl::Method(MethodDecl::new(
            format!("sum{i}"),
            vec![Parameter::new("shapes", Type::array(Type::named("Shape")))],
            Type::Int,
            body,
        )));
    }

    WhileFile::new(declarations)
}

/// Checks a small file end to end.
fn bench_small_file(c: &mut Criterion) {
    c.bench_function("check_small_file", |b| {
        b.iter_batched(
            || build_file(4),
            |file| check(black_box(&file)),
            BatchSize::SmallInput,
        )
    });
}

/// Checks a file with many methods.
fn bench_many_methods(c: &mut Criterion) {
    c.bench_function("check_many_methods", |b| {
        b.iter_batched(
            || build_file(200),
            |file| check(black_box(&file)),
            BatchSize::LargeInput,
        )
    });
}

/// Union-against-union subtype queries through aliases.
fn bench_union_subtyping(c: &mut Criterion) {
    let file = build_file(0);
    let registry = Registry::build(&file).unwrap();
    let subtyping = Subtyping::new(&registry);
    let sup = Type::union([Type::named("Shape"), Type::Int, Type::Bool]);
    let sub = Type::union([
        Type::record([(Type::Int, "x"), (Type::Int, "y"), (Type::Char, "tag")]),
        Type::Bool,
    ]);

    c.bench_function("union_subtyping", |b| {
        b.iter(|| subtyping.is_subtype(black_box(&sup), black_box(&sub)))
    });
}

criterion_group!(benches, bench_small_file, bench_many_methods, bench_union_subtyping);
criterion_main!(benches);
