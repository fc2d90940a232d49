//! Metro IR - core types of the units and scales compiler.
//!
//! - [`Dimension`]: packed exponent vectors over the base magnitudes
//! - [`DimExpr`] / [`NumExpr`]: compiled dimension and value expressions
//! - [`ExprArena`]: definition trees, their normal form and binding
//! - [`Registry`]: units, scales, families and derived operators
//! - [`TargetLanguage`]: code spelling for the emitting backend
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: expression nodes and measures are addressed by
//!   `u32` ids into arenas; there are no owning pointers between them.
//! - **Commit on Success**: parsing computes what a definition implies
//!   ([`BindPlan`]) and the registry applies it in one step, so a rejected
//!   definition leaves no trace.

pub mod ast;
mod dimension;
mod expr;
mod line_index;
mod numeric;
mod operation;
pub mod registry;
mod span;
pub mod stack;
mod target;
mod term;

pub use ast::{BindPlan, ExprArena, ExprDisplay, ExprId, ExprKind};
pub use dimension::{Dimension, DimensionError, Magnitude};
pub use expr::{DimExpr, NumExpr};
pub use line_index::LineOffsetTable;
pub use numeric::{math_constant, NumericType};
pub use operation::{BinaryOperation, Operand, Operator};
pub use registry::{
    FamilyId, Measure, MeasureId, MeasureKind, Registry, Scale, ScaleDef, SeedError, SeedScale,
    SeedUnit, Unit, UnitDef,
};
pub use span::{LinePosition, LinePositionSpan, Span};
pub use stack::ensure_sufficient_stack;
pub use target::{TargetLanguage, UnknownTarget};
pub use term::Term;
