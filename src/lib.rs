//! Tree-walking interpreter for a prototype-based ECMAScript subset.
//!
//! Source text is lexed into tokens, parsed into an AST and evaluated
//! directly against a mark-and-sweep heap of tagged values. There is no
//! bytecode and no separate analysis pass.
//!
//! # Example
//!
//! ```
//! use jsrun::Interpreter;
//!
//! let mut interp = Interpreter::new();
//! let result = interp.eval("var x = 1 + 2; x * 4").unwrap();
//! assert_eq!(result.as_number(), Some(12.0));
//! ```

pub mod ast;
pub mod error;
pub mod heap;
mod interpreter;
pub mod lexer;
pub mod parser;
pub mod platform;
pub mod scope;
pub mod value;

pub use error::Error;
pub use heap::{Heap, HeapStats, Value};
pub use interpreter::{Completion, Control, Interpreter};
pub use platform::{BufferedConsole, ConsoleSink, StdConsole};
pub use value::{JsString, ValueKind};
