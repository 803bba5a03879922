//! Host output abstraction.
//!
//! The interpreter writes program output (`console.log`) and uncaught
//! error reports through a [`ConsoleSink`], so embedders and tests can
//! capture both streams instead of touching the process stdout/stderr.

use std::cell::RefCell;
use std::rc::Rc;

/// Destination for the interpreter's two output streams.
pub trait ConsoleSink {
    /// A line of program output (`console.log`).
    fn write_out(&self, line: &str);

    /// A line of error output (`console.error`, uncaught errors).
    fn write_err(&self, line: &str);
}

/// Writes to the process stdout/stderr.
pub struct StdConsole;

impl ConsoleSink for StdConsole {
    fn write_out(&self, line: &str) {
        println!("{}", line);
    }

    fn write_err(&self, line: &str) {
        eprintln!("{}", line);
    }
}

/// Buffers both streams in memory; used by tests.
#[derive(Default)]
pub struct BufferedConsole {
    out: RefCell<Vec<String>>,
    err: RefCell<Vec<String>>,
}

impl BufferedConsole {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn out_lines(&self) -> Vec<String> {
        self.out.borrow().clone()
    }

    pub fn err_lines(&self) -> Vec<String> {
        self.err.borrow().clone()
    }
}

impl ConsoleSink for BufferedConsole {
    fn write_out(&self, line: &str) {
        self.out.borrow_mut().push(line.to_string());
    }

    fn write_err(&self, line: &str) {
        self.err.borrow_mut().push(line.to_string());
    }
}
