//! Embeddable, sandboxed expression language.
//!
//! A tokenizer, recursive-descent parser, and tree-walking evaluator for a
//! small expression-only language. Identifiers resolve against a
//! caller-supplied context; everything else callable comes from a
//! whitelisted builtin registry, which is the sole path from expression
//! text to host behavior. Parse once, evaluate many times:
//!
//! ```
//! use rule_expr::{context_from_json, parse, Evaluator};
//! use serde_json::json;
//!
//! let program = parse("price * quantity > limit").unwrap();
//! let evaluator = Evaluator::new();
//! let context = context_from_json(&json!({
//!     "price": 12.5, "quantity": 4, "limit": 40,
//! })).unwrap();
//! let result = evaluator.evaluate(&program, &context).unwrap();
//! assert!(result.is_truthy());
//! ```

pub mod ast;
pub mod builtins;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod value;

pub use ast::{BinaryOp, Expr, Program, UnaryOp};
pub use builtins::{default_builtins, Builtins};
pub use error::ExprError;
pub use eval::{context_from_json, Context, Evaluator};
pub use lexer::{lex, Token, TokenKind};
pub use parser::{parse, parse_with_token_limit};
pub use value::{Callable, Value};
