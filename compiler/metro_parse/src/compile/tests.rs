#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use metro_ir::{BindPlan, Magnitude, MeasureId, TargetLanguage, UnitDef};
use pretty_assertions::assert_eq;
use smallvec::smallvec;

struct Fixture {
    registry: Registry,
    arena: ExprArena,
}

impl Fixture {
    fn new(target: TargetLanguage) -> Self {
        Fixture {
            registry: Registry::new(target),
            arena: ExprArena::new(),
        }
    }

    fn base_unit(&mut self, name: &str, symbol: &str, magnitude: Magnitude) -> MeasureId {
        let id = self.arena.alloc(ExprKind::Magnitude(Some(magnitude)));
        let (sense, factor) = self.compile(id, NumericType::Double).unwrap();
        let plan = BindPlan::new(self.registry.next_id());
        self.registry.add_unit(
            UnitDef {
                name: name.to_owned(),
                numeric: NumericType::Double,
                sense,
                factor,
                format: "{0} {1}".to_owned(),
                tags: smallvec![symbol.to_owned()],
            },
            plan,
        )
    }

    fn num(&mut self, text: &str) -> ExprId {
        self.arena.alloc(ExprKind::Number(text.to_owned()))
    }

    fn alloc(&mut self, kind: ExprKind) -> ExprId {
        self.arena.alloc(kind)
    }

    fn compile(&self, id: ExprId, numeric: NumericType) -> Result<(DimExpr, NumExpr), CompileError> {
        ExprCompiler::new(&self.arena, &self.registry, numeric).compile(id)
    }
}

#[test]
fn test_number_and_magnitude() {
    let mut fx = Fixture::new(TargetLanguage::CSharp);
    let number = fx.num("0.3048");
    let (dim, num) = fx.compile(number, NumericType::Double).unwrap();
    assert_eq!(dim, DimExpr::new(Dimension::NONE, "Dimension.None"));
    assert_eq!(num, NumExpr::new(true, 0.3048, "0.3048d"));

    let length = fx.alloc(ExprKind::Magnitude(Some(Magnitude::Length)));
    let (dim, num) = fx.compile(length, NumericType::Decimal).unwrap();
    assert_eq!(dim, DimExpr::new(Dimension::LENGTH, "Dimension.Length"));
    assert_eq!(num.simple, "decimal.One");

    let none = fx.alloc(ExprKind::Magnitude(None));
    let (dim, _) = fx.compile(none, NumericType::Double).unwrap();
    assert!(dim.value.is_none());
    assert_eq!(dim.simple, "Dimension.None");
}

#[test]
fn test_literals() {
    let mut fx = Fixture::new(TargetLanguage::CSharp);

    let pi = fx.alloc(ExprKind::Literal("Math.PI".to_owned()));
    let (_, num) = fx.compile(pi, NumericType::Double).unwrap();
    assert_eq!(num, NumExpr::new(true, std::f64::consts::PI, "System.Math.PI"));

    let numeric = fx.alloc(ExprKind::Literal("2.5".to_owned()));
    let (_, num) = fx.compile(numeric, NumericType::Double).unwrap();
    assert_eq!(num, NumExpr::new(true, 2.5, "2.5"));

    let opaque = fx.alloc(ExprKind::Literal("Constants.Avogadro".to_owned()));
    let (dim, num) = fx.compile(opaque, NumericType::Double).unwrap();
    assert!(dim.value.is_none());
    assert_eq!(num, NumExpr::new(false, 1.0, "Constants.Avogadro"));
}

#[test]
fn test_unit_quotient_codes() {
    let mut fx = Fixture::new(TargetLanguage::CSharp);
    let meter = fx.base_unit("Meter", "m", Magnitude::Length);
    let second = fx.base_unit("Second", "s", Magnitude::Time);

    let lhs = fx.alloc(ExprKind::UnitRef(meter));
    let rhs = fx.alloc(ExprKind::UnitRef(second));
    let speed = fx.alloc(ExprKind::Quotient { lhs, rhs });
    let (dim, num) = fx.compile(speed, NumericType::Double).unwrap();

    assert_eq!(
        dim,
        DimExpr::with_unfolded(
            Dimension::LENGTH.checked_div(Dimension::TIME).unwrap(),
            "Meter.Sense / Second.Sense",
            "(Dimension.Length / Dimension.Time)",
        )
    );
    assert_eq!(
        num,
        NumExpr::with_unfolded(true, 1.0, "Meter.Factor / Second.Factor", "(1d / 1d)")
    );
}

#[test]
fn test_numeric_factor_keeps_unit_dimension() {
    let mut fx = Fixture::new(TargetLanguage::CSharp);
    let meter = fx.base_unit("Meter", "m", Magnitude::Length);

    let factor = fx.num("100");
    let unit = fx.alloc(ExprKind::UnitRef(meter));
    let product = fx.alloc(ExprKind::Product {
        lhs: factor,
        rhs: unit,
        wedge: false,
    });
    let (dim, num) = fx.compile(product, NumericType::Double).unwrap();

    assert_eq!(
        dim,
        DimExpr::with_unfolded(Dimension::LENGTH, "Meter.Sense", "Dimension.Length")
    );
    assert_eq!(num.value, 100.0);
    assert_eq!(num.simple, "100d * Meter.Factor");
    assert_eq!(num.unfolded, "(100d * 1d)");
}

#[test]
fn test_unary_and_parentheses() {
    let mut fx = Fixture::new(TargetLanguage::CSharp);
    let two = fx.num("2");
    let minus = fx.alloc(ExprKind::Unary {
        plus: false,
        operand: two,
    });
    let (_, num) = fx.compile(minus, NumericType::Double).unwrap();
    assert_eq!(num, NumExpr::new(true, -2.0, "-2d"));

    let paren = fx.alloc(ExprKind::Parenthesized(minus));
    let (dim, num) = fx.compile(paren, NumericType::Double).unwrap();
    assert_eq!(num.simple, "(-2d)");
    assert_eq!(num.unfolded, "(-2d)");
    assert_eq!(dim.simple, "(Dimension.None)");

    // Already enclosed as a whole: no second pair.
    let twice = fx.alloc(ExprKind::Parenthesized(paren));
    let (_, num) = fx.compile(twice, NumericType::Double).unwrap();
    assert_eq!(num.simple, "(-2d)");
}

#[test]
fn test_parenthesize() {
    assert_eq!(parenthesize("a"), "(a)");
    assert_eq!(parenthesize("(a)"), "(a)");
    assert_eq!(parenthesize(" (a * b) "), " (a * b) ");
    assert_eq!(parenthesize("(a) * (b)"), "((a) * (b))");
}

#[test]
fn test_sum_and_difference() {
    let mut fx = Fixture::new(TargetLanguage::CSharp);
    let a = fx.num("2");
    let b = fx.num("0.5");
    let sum = fx.alloc(ExprKind::Sum { lhs: a, rhs: b });
    let (dim, num) = fx.compile(sum, NumericType::Double).unwrap();
    assert!(dim.value.is_none());
    assert_eq!(num.value, 2.5);
    assert_eq!(num.simple, "2d + 0.5d");

    let c = fx.num("1");
    let difference = fx.alloc(ExprKind::Difference { lhs: sum, rhs: c });
    let (_, num) = fx.compile(difference, NumericType::Double).unwrap();
    assert_eq!(num.value, 1.5);
    assert_eq!(num.unfolded, "((2d + 0.5d) - 1d)");
}

#[test]
fn test_sum_of_different_dimensions_is_rejected() {
    let mut fx = Fixture::new(TargetLanguage::CSharp);
    let length = fx.alloc(ExprKind::Magnitude(Some(Magnitude::Length)));
    let one = fx.num("1");
    let sum = fx.alloc(ExprKind::Sum {
        lhs: length,
        rhs: one,
    });
    assert_eq!(
        fx.compile(sum, NumericType::Double),
        Err(CompileError::MixedDimensions {
            lhs: Dimension::LENGTH,
            rhs: Dimension::NONE,
        })
    );
}

#[test]
fn test_dimension_overflow_surfaces() {
    let mut fx = Fixture::new(TargetLanguage::CSharp);
    let mut expr = fx.alloc(ExprKind::Magnitude(Some(Magnitude::Mass)));
    for _ in 0..127 {
        let mass = fx.alloc(ExprKind::Magnitude(Some(Magnitude::Mass)));
        expr = fx.alloc(ExprKind::Product {
            lhs: expr,
            rhs: mass,
            wedge: false,
        });
    }
    let err = fx.compile(expr, NumericType::Double).unwrap_err();
    assert!(matches!(
        err,
        CompileError::Dimension(DimensionError::ProductOverflow { .. })
    ));
}

#[test]
fn test_float_values_are_rounded() {
    let mut fx = Fixture::new(TargetLanguage::CSharp);
    let one = fx.num("1");
    let three = fx.num("3");
    let third = fx.alloc(ExprKind::Quotient {
        lhs: one,
        rhs: three,
    });
    let (_, num) = fx.compile(third, NumericType::Float).unwrap();
    assert_eq!(num.value, f64::from(1.0f32 / 3.0f32));
    assert_eq!(num.simple, "1f / 3f");
}

#[test]
fn test_cpp_codes() {
    let mut fx = Fixture::new(TargetLanguage::Cpp);
    let meter = fx.base_unit("Meter", "m", Magnitude::Length);
    let factor = fx.num("5280");
    let unit = fx.alloc(ExprKind::UnitRef(meter));
    let product = fx.alloc(ExprKind::Product {
        lhs: unit,
        rhs: factor,
        wedge: false,
    });
    let (dim, num) = fx.compile(product, NumericType::Double).unwrap();
    assert_eq!(dim.simple, "Meter::sense");
    assert_eq!(dim.unfolded, "Dimension::Length");
    assert_eq!(num.simple, "Meter::factor * 5280.0");
    assert_eq!(num.unfolded, "(1.0 * 5280.0)");
}
