//! Tree-walking evaluator.
//!
//! Walks the AST directly, threading the heap and a stack of scope chains.
//! Non-local control flow (`return`, `throw`) travels through the
//! [`Control`] result sum so `try`/`catch` can intercept thrown values
//! without ever seeing a `return` in flight.

pub mod builtins;

use std::rc::Rc;

use crate::ast::*;
use crate::error::Error;
use crate::heap::{Heap, HeapStats, Value};
use crate::parser::Parser;
use crate::platform::{ConsoleSink, StdConsole};
use crate::scope::{ScopeChain, ScopeFrame, ScopeRef};
use crate::value::{
    value_to_string, JsFunction, JsString, NativeFunction, NativeFn, UserFunction, ValueKind, PROTO,
};

/// Carrier for non-local control flow. `Return` unwinds to the nearest call
/// boundary; `Throw` unwinds to the nearest `try`/`catch` or out of the
/// program.
#[derive(Debug)]
pub enum Control {
    Return(Value),
    Throw(Value),
}

/// Outcome of evaluating a node.
pub type Completion = Result<Value, Control>;

pub struct Interpreter {
    heap: Heap,
    /// Active scope chains, one per call depth; the bottom entry is the
    /// global chain and is never popped.
    scope_stack: Vec<ScopeChain>,

    pub global: Value,
    undefined: Value,

    pub object_prototype: Value,
    pub array_prototype: Value,
    pub function_prototype: Value,
    pub string_prototype: Value,
    pub number_prototype: Value,
    pub boolean_prototype: Value,
    pub error_prototype: Value,
    pub reference_error_prototype: Value,
    pub type_error_prototype: Value,

    permanent_roots: Vec<Value>,
    console: Rc<dyn ConsoleSink>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_console(Rc::new(StdConsole))
    }

    pub fn with_console(console: Rc<dyn ConsoleSink>) -> Self {
        let mut heap = Heap::new();

        let global = heap.alloc(ValueKind::Object);
        let undefined = heap.alloc(ValueKind::Undefined);
        let object_prototype = heap.alloc(ValueKind::Object);
        let array_prototype = heap.alloc(ValueKind::Object);
        let function_prototype = heap.alloc(ValueKind::Object);
        let string_prototype = heap.alloc(ValueKind::Object);
        let number_prototype = heap.alloc(ValueKind::Object);
        let boolean_prototype = heap.alloc(ValueKind::Object);
        let error_prototype = heap.alloc(ValueKind::Object);
        let reference_error_prototype = heap.alloc(ValueKind::Object);
        let type_error_prototype = heap.alloc(ValueKind::Object);

        // Prototype chain: everything bottoms out at Object.prototype,
        // whose own chain ends.
        for prototype in [
            array_prototype,
            function_prototype,
            string_prototype,
            number_prototype,
            boolean_prototype,
            error_prototype,
        ] {
            prototype.set_property(PROTO, object_prototype);
        }
        reference_error_prototype.set_property(PROTO, error_prototype);
        type_error_prototype.set_property(PROTO, error_prototype);
        global.set_property(PROTO, object_prototype);

        let permanent_roots = vec![
            global,
            undefined,
            object_prototype,
            array_prototype,
            function_prototype,
            string_prototype,
            number_prototype,
            boolean_prototype,
            error_prototype,
            reference_error_prototype,
            type_error_prototype,
        ];

        let global_frame = ScopeFrame::global(global);

        let mut interp = Self {
            heap,
            scope_stack: vec![vec![global_frame]],
            global,
            undefined,
            object_prototype,
            array_prototype,
            function_prototype,
            string_prototype,
            number_prototype,
            boolean_prototype,
            error_prototype,
            reference_error_prototype,
            type_error_prototype,
            permanent_roots,
            console,
        };

        builtins::install(&mut interp);
        interp
    }

    // ============ PUBLIC SURFACE ============

    /// Execute a program. `Ok` carries the value of the last top-level
    /// statement; `Err` carries an uncaught thrown value.
    pub fn execute(&mut self, program: &Program) -> Result<Value, Value> {
        let mut result = self.undefined;

        for statement in &program.body {
            match self.eval_statement(statement) {
                Ok(value) => result = value,
                // A top-level `return` ends the program normally.
                Err(Control::Return(value)) => return Ok(value),
                Err(Control::Throw(thrown)) => {
                    self.pin(thrown);
                    return Err(thrown);
                }
            }
            self.statement_boundary(Some(result));
        }

        Ok(result)
    }

    /// Execute a program to completion. An uncaught thrown value is
    /// stringified through its `toString` and written to the error stream;
    /// this is not a host error.
    pub fn run(&mut self, program: &Program) {
        if let Err(thrown) = self.execute(program) {
            let message = self.to_display_string(thrown);
            self.console.write_err(&message);
        }
    }

    /// Lex, parse and execute a source string.
    pub fn eval(&mut self, source: &str) -> Result<Value, Error> {
        let program = Parser::parse_source(source)?;
        match self.execute(&program) {
            Ok(value) => Ok(value),
            Err(thrown) => {
                let message = self.to_display_string(thrown);
                Err(Error::Uncaught(message))
            }
        }
    }

    /// The shared undefined sentinel.
    pub fn undefined(&self) -> Value {
        self.undefined
    }

    pub fn scope_depth(&self) -> usize {
        self.scope_stack.len()
    }

    pub fn heap_stats(&self) -> HeapStats {
        self.heap.stats()
    }

    pub fn set_gc_threshold(&mut self, threshold: usize) {
        self.heap.set_threshold(threshold);
    }

    /// Force a collection cycle.
    pub fn collect_garbage(&mut self) {
        let mut roots = self.permanent_roots.clone();
        for chain in &self.scope_stack {
            for frame in chain {
                frame.borrow().trace(&mut roots);
            }
        }
        self.heap.collect(roots);
    }

    pub(crate) fn console(&self) -> Rc<dyn ConsoleSink> {
        self.console.clone()
    }

    // ============ ALLOCATION ============

    /// Allocate a value, wiring `__proto__` to the matching host prototype
    /// and pinning it in the innermost frame. Collection runs here when the
    /// heap is over threshold.
    pub fn alloc(&mut self, kind: ValueKind) -> Value {
        if self.heap.should_collect() {
            self.collect_garbage();
        }

        let prototype = match &kind {
            ValueKind::Object => Some(self.object_prototype),
            ValueKind::Array(_) => Some(self.array_prototype),
            ValueKind::Function(_) => Some(self.function_prototype),
            ValueKind::Number(_) => Some(self.number_prototype),
            ValueKind::String(_) => Some(self.string_prototype),
            ValueKind::Boolean(_) => Some(self.boolean_prototype),
            ValueKind::Undefined | ValueKind::Null => None,
        };

        let value = self.heap.alloc(kind);
        if let Some(prototype) = prototype {
            value.set_property(PROTO, prototype);
        }
        self.pin(value);
        value
    }

    pub fn number(&mut self, n: f64) -> Value {
        self.alloc(ValueKind::Number(n))
    }

    pub fn string(&mut self, s: impl Into<JsString>) -> Value {
        self.alloc(ValueKind::String(s.into()))
    }

    pub fn boolean(&mut self, b: bool) -> Value {
        self.alloc(ValueKind::Boolean(b))
    }

    pub fn null_value(&mut self) -> Value {
        self.alloc(ValueKind::Null)
    }

    pub fn object(&mut self) -> Value {
        self.alloc(ValueKind::Object)
    }

    pub fn array(&mut self, elements: Vec<Value>) -> Value {
        self.alloc(ValueKind::Array(elements))
    }

    pub fn native_function(&mut self, name: &'static str, func: NativeFn) -> Value {
        self.alloc(ValueKind::Function(JsFunction::Native(NativeFunction {
            name,
            func,
        })))
    }

    /// Allocate a native function and install it as a property.
    pub fn register_method(&mut self, target: Value, name: &'static str, func: NativeFn) {
        let function = self.native_function(name, func);
        target.set_property(name, function);
    }

    /// Keep a value alive across collection cycles until the next statement
    /// boundary of the innermost frame.
    pub fn pin(&mut self, value: Value) {
        if let Some(frame) = self.scope_stack.last().and_then(|chain| chain.last()) {
            frame.borrow_mut().allocated.insert(value);
        }
    }

    /// Expression temporaries are dead between statements; drop their pins,
    /// keeping only the statement's own result.
    fn statement_boundary(&mut self, keep: Option<Value>) {
        if let Some(frame) = self.scope_stack.last().and_then(|chain| chain.last()) {
            let mut frame = frame.borrow_mut();
            frame.allocated.clear();
            if let Some(value) = keep {
                frame.allocated.insert(value);
            }
        }
    }

    // ============ SCOPE ============

    fn current_chain(&self) -> &ScopeChain {
        // The global chain is installed at construction and never popped.
        self.scope_stack.last().expect("scope stack is never empty")
    }

    fn current_this(&self) -> Value {
        match self.current_chain().last() {
            Some(frame) => frame.borrow().this_value,
            None => self.global,
        }
    }

    fn capture_scope(&self) -> Vec<ScopeRef> {
        self.current_chain().clone()
    }

    fn lookup(&self, name: &str) -> Option<Value> {
        for frame in self.current_chain().iter().rev() {
            if let Some(value) = frame.borrow().get(name) {
                return Some(value);
            }
        }
        None
    }

    /// Bind a name in the innermost frame.
    fn declare(&mut self, name: &str, value: Value) {
        if let Some(frame) = self.scope_stack.last().and_then(|chain| chain.last()) {
            frame.borrow_mut().define(JsString::from(name), value);
        }
    }

    /// Assign to an existing binding, or fall through to the global object
    /// for undeclared names.
    fn assign_variable(&mut self, name: &str, value: Value) {
        {
            let chain = match self.scope_stack.last() {
                Some(chain) => chain,
                None => return,
            };
            for frame in chain.iter().rev() {
                if frame.borrow_mut().assign(name, value) {
                    return;
                }
            }
        }
        self.global.set_property(name, value);
    }

    // ============ ERRORS ============

    /// Build a language error value chained to the given prototype and
    /// return it as a `Throw` carrier.
    pub fn throw_error_value(&mut self, prototype: Value, name: &str, message: String) -> Control {
        let error = self.object();
        error.set_property(PROTO, prototype);
        let name_value = self.string(name);
        error.set_property("name", name_value);
        let message_value = self.string(message);
        error.set_property("message", message_value);
        Control::Throw(error)
    }

    pub fn throw_type_error(&mut self, message: String) -> Control {
        let prototype = self.type_error_prototype;
        self.throw_error_value(prototype, "TypeError", message)
    }

    pub fn throw_reference_error(&mut self, message: String) -> Control {
        let prototype = self.reference_error_prototype;
        self.throw_error_value(prototype, "ReferenceError", message)
    }

    /// Stringify a value through its prototype-chain `toString` when
    /// callable, falling back to the native rendering.
    pub fn to_display_string(&mut self, value: Value) -> String {
        if let Some(to_string) = value.get_property("toString") {
            if to_string.is_function() {
                if let Ok(result) = self.call_value(to_string, value, &[]) {
                    return value_to_string(result);
                }
            }
        }
        value_to_string(value)
    }

    // ============ STATEMENTS ============

    pub fn eval_statement(&mut self, statement: &Statement) -> Completion {
        match statement {
            Statement::Expression(s) => self.eval_expression(&s.expression),
            Statement::Block(s) => self.eval_block(s),
            Statement::If(s) => self.eval_if(s),
            Statement::While(s) => self.eval_while(s),
            Statement::For(s) => self.eval_for(s),
            Statement::FunctionDeclaration(s) => self.eval_function_declaration(s),
            Statement::Return(s) => self.eval_return(s),
            Statement::Throw(s) => self.eval_throw(s),
            Statement::TryCatch(s) => self.eval_try_catch(s),
        }
    }

    fn eval_block(&mut self, block: &BlockStatement) -> Completion {
        let mut result = self.undefined;
        for statement in &block.body {
            result = self.eval_statement(statement)?;
            self.statement_boundary(Some(result));
        }
        Ok(result)
    }

    fn eval_if(&mut self, statement: &IfStatement) -> Completion {
        let test = self.eval_expression(&statement.test)?;
        if test.is_truthy() {
            self.eval_statement(&statement.consequent)
        } else if let Some(alternative) = &statement.alternative {
            self.eval_statement(alternative)
        } else {
            Ok(self.undefined)
        }
    }

    fn eval_while(&mut self, statement: &WhileStatement) -> Completion {
        loop {
            let test = self.eval_expression(&statement.test)?;
            if !test.is_truthy() {
                break;
            }
            self.eval_statement(&statement.body)?;
            self.statement_boundary(None);
        }
        Ok(self.undefined)
    }

    fn eval_for(&mut self, statement: &ForStatement) -> Completion {
        self.eval_expression(&statement.init)?;
        loop {
            let test = self.eval_expression(&statement.test)?;
            if !test.is_truthy() {
                break;
            }
            self.eval_statement(&statement.body)?;
            self.eval_expression(&statement.update)?;
            self.statement_boundary(None);
        }
        Ok(self.undefined)
    }

    fn eval_function_declaration(&mut self, decl: &FunctionDeclarationStatement) -> Completion {
        let function = self.make_user_function(
            Some(JsString::from(decl.name.as_str())),
            &decl.parameters,
            decl.body.clone(),
            false,
        );
        self.declare(&decl.name, function);
        Ok(self.undefined)
    }

    fn eval_return(&mut self, statement: &ReturnStatement) -> Completion {
        let value = match &statement.argument {
            Some(argument) => self.eval_expression(argument)?,
            None => self.undefined,
        };
        Err(Control::Return(value))
    }

    fn eval_throw(&mut self, statement: &ThrowStatement) -> Completion {
        let value = self.eval_expression(&statement.argument)?;
        Err(Control::Throw(value))
    }

    fn eval_try_catch(&mut self, statement: &TryCatchStatement) -> Completion {
        match self.eval_statement(&statement.try_body) {
            Err(Control::Throw(thrown)) => {
                let frame = ScopeFrame::local(self.current_this());
                frame
                    .borrow_mut()
                    .define(JsString::from(statement.catch_identifier.as_str()), thrown);

                let mut chain = self.current_chain().clone();
                chain.push(frame);
                self.scope_stack.push(chain);
                let completion = self.eval_statement(&statement.catch_body);
                self.scope_stack.pop();

                // Values escaping the catch frame lost its pins; re-pin in
                // the surrounding frame.
                match completion {
                    Ok(value) => {
                        self.pin(value);
                        Ok(value)
                    }
                    Err(Control::Return(value)) => {
                        self.pin(value);
                        Err(Control::Return(value))
                    }
                    Err(Control::Throw(value)) => {
                        self.pin(value);
                        Err(Control::Throw(value))
                    }
                }
            }
            completion => completion,
        }
    }

    // ============ EXPRESSIONS ============

    pub fn eval_expression(&mut self, expression: &Expression) -> Completion {
        let value = self.eval_expression_inner(expression)?;
        // Pin every intermediate so a collection triggered later in the
        // same statement cannot free a handle still held by the walker.
        self.pin(value);
        Ok(value)
    }

    fn eval_expression_inner(&mut self, expression: &Expression) -> Completion {
        match expression {
            Expression::NumberLiteral(n) => Ok(self.number(*n)),
            Expression::StringLiteral(s) => Ok(self.string(s.as_str())),
            Expression::BooleanLiteral(b) => Ok(self.boolean(*b)),
            Expression::NullLiteral => Ok(self.null_value()),
            Expression::Identifier(name) => match self.lookup(name) {
                Some(value) => Ok(value),
                None => Err(self.throw_reference_error(format!("{} is not defined", name))),
            },
            Expression::This => Ok(self.current_this()),
            Expression::Array(e) => {
                let mut elements = Vec::with_capacity(e.elements.len());
                for element in &e.elements {
                    elements.push(self.eval_expression(element)?);
                }
                Ok(self.array(elements))
            }
            Expression::Object(e) => {
                let object = self.object();
                for (key, value_expr) in &e.properties {
                    let value = self.eval_expression(value_expr)?;
                    object.set_property(key.as_str(), value);
                }
                Ok(object)
            }
            Expression::Function(e) => {
                let name = e.name.as_deref().map(JsString::from);
                Ok(self.make_user_function(name, &e.parameters, e.body.clone(), false))
            }
            Expression::ArrowFunction(e) => {
                Ok(self.make_user_function(None, &e.parameters, e.body.clone(), true))
            }
            Expression::VariableDeclaration(e) => {
                let value = match &e.init {
                    Some(init) => self.eval_expression(init)?,
                    None => self.undefined,
                };
                for name in &e.identifiers {
                    self.declare(name, value);
                }
                Ok(value)
            }
            Expression::Call(e) => self.eval_call(e),
            Expression::New(e) => self.eval_new(e),
            Expression::Member(e) => {
                let object = self.eval_expression(&e.object)?;
                self.member_get(object, e)
            }
            Expression::Binary(e) => self.eval_binary(e),
            Expression::Unary(e) => self.eval_unary(e),
            Expression::Update(e) => self.eval_update(e),
            Expression::Assignment(e) => self.eval_assignment(e),
            Expression::Ternary(e) => {
                let test = self.eval_expression(&e.test)?;
                if test.is_truthy() {
                    self.eval_expression(&e.consequent)
                } else {
                    self.eval_expression(&e.alternative)
                }
            }
        }
    }

    fn eval_unary(&mut self, e: &UnaryExpression) -> Completion {
        let operand = self.eval_expression(&e.operand)?;
        match e.operator {
            Operator::Not => {
                let result = !operand.is_truthy();
                Ok(self.boolean(result))
            }
            Operator::Typeof => {
                let name = operand.type_of();
                Ok(self.string(name))
            }
            other => Err(self.throw_type_error(format!("invalid unary operator '{}'", other))),
        }
    }

    // ============ FUNCTIONS ============

    fn make_user_function(
        &mut self,
        name: Option<JsString>,
        parameters: &[String],
        body: Rc<Statement>,
        is_arrow: bool,
    ) -> Value {
        let function = UserFunction {
            name,
            parameters: parameters
                .iter()
                .map(|p| JsString::from(p.as_str()))
                .collect(),
            body,
            scope: self.capture_scope(),
            is_arrow,
        };
        let value = self.alloc(ValueKind::Function(JsFunction::User(Rc::new(function))));

        let prototype = self.object();
        prototype.set_property("constructor", value);
        value.set_property("prototype", prototype);
        value
    }

    fn eval_call(&mut self, e: &CallExpression) -> Completion {
        // A member callee supplies its object as `this`; anything else is
        // called with the global object.
        let (callee, this_value) = match &*e.callee {
            Expression::Member(member) => {
                let object = self.eval_expression(&member.object)?;
                let callee = self.member_get(object, member)?;
                (callee, object)
            }
            // An unbound callee name reads as undefined so the diagnostic
            // below can name it, instead of a bare ReferenceError.
            Expression::Identifier(name) => {
                let callee = self.lookup(name).unwrap_or(self.undefined);
                (callee, self.global)
            }
            other => (self.eval_expression(other)?, self.global),
        };

        if !callee.is_function() {
            let description = describe_callee(&e.callee);
            return Err(self.throw_type_error(format!("{} is not a function", description)));
        }
        self.pin(callee);
        self.pin(this_value);

        let mut args = Vec::with_capacity(e.arguments.len());
        for argument in &e.arguments {
            args.push(self.eval_expression(argument)?);
        }

        self.call_value(callee, this_value, &args)
    }

    /// Invoke a callable value. Used by the evaluator and by builtins that
    /// take callbacks.
    pub fn call_value(&mut self, callee: Value, this_value: Value, args: &[Value]) -> Completion {
        let function = match &callee.borrow().kind {
            ValueKind::Function(function) => Some(function.clone()),
            _ => None,
        };
        let Some(function) = function else {
            return Err(self.throw_type_error("value is not a function".to_string()));
        };
        match function {
            JsFunction::Native(native) => {
                let result = (native.func)(self, this_value, args)?;
                self.pin(result);
                Ok(result)
            }
            JsFunction::User(function) => self.call_user(&function, this_value, args),
        }
    }

    fn call_user(&mut self, func: &UserFunction, this_value: Value, args: &[Value]) -> Completion {
        let frame = ScopeFrame::local(this_value);
        {
            let mut frame = frame.borrow_mut();
            for (i, parameter) in func.parameters.iter().enumerate() {
                let value = args.get(i).copied().unwrap_or(self.undefined);
                frame.define(parameter.clone(), value);
            }
        }

        let mut chain = func.scope.clone();
        chain.push(frame.clone());
        self.scope_stack.push(chain);

        let arguments = self.array(args.to_vec());
        frame.borrow_mut().define(JsString::from("arguments"), arguments);

        let completion = self.eval_statement(&func.body);
        self.scope_stack.pop();

        let result = match completion {
            Err(Control::Return(value)) => value,
            Err(Control::Throw(thrown)) => {
                self.pin(thrown);
                return Err(Control::Throw(thrown));
            }
            Ok(value) => {
                // An arrow function whose body is a bare expression yields
                // that expression's value; statement bodies yield undefined.
                if func.is_arrow && matches!(&*func.body, Statement::Expression(_)) {
                    value
                } else {
                    self.undefined
                }
            }
        };
        self.pin(result);
        Ok(result)
    }

    fn eval_new(&mut self, e: &NewExpression) -> Completion {
        let callee = self.eval_expression(&e.callee)?;
        if !callee.is_function() {
            let description = describe_callee(&e.callee);
            return Err(self.throw_type_error(format!("{} is not a constructor", description)));
        }

        let mut args = Vec::with_capacity(e.arguments.len());
        for argument in &e.arguments {
            args.push(self.eval_expression(argument)?);
        }

        let instance = self.object();
        if let Some(prototype) = callee.get_own("prototype") {
            instance.set_property(PROTO, prototype);
        }

        let returned = self.call_value(callee, instance, &args)?;
        if returned.is_undefined() {
            Ok(instance)
        } else {
            Ok(returned)
        }
    }

    // ============ MEMBER ACCESS ============

    fn member_get(&mut self, object: Value, member: &MemberExpression) -> Completion {
        if object.is_undefined() || object.is_null() {
            let name = describe_property(member);
            let kind = if object.is_null() { "null" } else { "undefined" };
            return Err(self.throw_type_error(format!(
                "Cannot read properties of {} (reading '{}')",
                kind, name
            )));
        }

        if member.computed {
            let key = self.eval_expression(&member.property)?;
            if let Some(index) = key.as_number() {
                if object.is_array() {
                    return Ok(self.array_index_get(object, index));
                }
            }
            let name = value_to_string(key);
            Ok(self.get_named(object, &name))
        } else {
            match &*member.property {
                Expression::Identifier(name) => {
                    let name = name.clone();
                    Ok(self.get_named(object, &name))
                }
                _ => {
                    let message = "property access expects an identifier".to_string();
                    Err(self.throw_type_error(message))
                }
            }
        }
    }

    fn get_named(&mut self, object: Value, name: &str) -> Value {
        if name == "length" {
            let length = match &object.borrow().kind {
                ValueKind::Array(elements) => Some(elements.len() as f64),
                ValueKind::String(s) => Some(s.len() as f64),
                _ => None,
            };
            if let Some(length) = length {
                return self.number(length);
            }
        }

        object.get_property(name).unwrap_or(self.undefined)
    }

    fn array_index_get(&mut self, array: Value, index: f64) -> Value {
        if index < 0.0 || index.fract() != 0.0 {
            return self.undefined;
        }
        let element = match &array.borrow().kind {
            ValueKind::Array(elements) => elements.get(index as usize).copied(),
            _ => None,
        };
        element.unwrap_or(self.undefined)
    }

    // ============ OPERATORS ============

    fn eval_binary(&mut self, e: &BinaryExpression) -> Completion {
        match e.operator {
            Operator::And => {
                let left = self.eval_expression(&e.left)?;
                if !left.is_truthy() {
                    return Ok(self.boolean(false));
                }
                let right = self.eval_expression(&e.right)?;
                let truthy = right.is_truthy();
                Ok(self.boolean(truthy))
            }
            Operator::Or => {
                let left = self.eval_expression(&e.left)?;
                if left.is_truthy() {
                    return Ok(self.boolean(true));
                }
                let right = self.eval_expression(&e.right)?;
                let truthy = right.is_truthy();
                Ok(self.boolean(truthy))
            }
            operator => {
                let left = self.eval_expression(&e.left)?;
                let right = self.eval_expression(&e.right)?;
                self.apply_binary(operator, left, right)
            }
        }
    }

    pub(crate) fn apply_binary(
        &mut self,
        operator: Operator,
        left: Value,
        right: Value,
    ) -> Completion {
        match operator {
            Operator::Plus => {
                let concat = matches!(left.borrow().kind, ValueKind::String(_))
                    || matches!(right.borrow().kind, ValueKind::String(_));
                if concat {
                    let joined = format!("{}{}", value_to_string(left), value_to_string(right));
                    return Ok(self.string(joined));
                }
                let (l, r) = self.numeric_operands(operator, left, right)?;
                Ok(self.number(l + r))
            }
            Operator::Minus => {
                let (l, r) = self.numeric_operands(operator, left, right)?;
                Ok(self.number(l - r))
            }
            Operator::Multiply => {
                let (l, r) = self.numeric_operands(operator, left, right)?;
                Ok(self.number(l * r))
            }
            Operator::Divide => {
                // IEEE-754 semantics: dividing by zero yields an infinity,
                // not an error.
                let (l, r) = self.numeric_operands(operator, left, right)?;
                Ok(self.number(l / r))
            }
            Operator::Modulo => {
                let (l, r) = self.numeric_operands(operator, left, right)?;
                Ok(self.number(l % r))
            }
            Operator::Exponent => {
                let (l, r) = self.numeric_operands(operator, left, right)?;
                Ok(self.number(l.powf(r)))
            }
            Operator::BitAnd => {
                let (l, r) = self.numeric_operands(operator, left, right)?;
                Ok(self.number(((l as i64) & (r as i64)) as f64))
            }
            Operator::BitOr => {
                let (l, r) = self.numeric_operands(operator, left, right)?;
                Ok(self.number(((l as i64) | (r as i64)) as f64))
            }
            Operator::EqualTo | Operator::EqualToStrict => {
                let equal = values_equal(left, right);
                Ok(self.boolean(equal))
            }
            Operator::NotEqualTo | Operator::NotEqualToStrict => {
                let equal = values_equal(left, right);
                Ok(self.boolean(!equal))
            }
            Operator::LessThan => {
                let ordering = compare_values(left, right);
                Ok(self.boolean(ordering == Some(std::cmp::Ordering::Less)))
            }
            Operator::LessThanOrEqualTo => {
                let ordering = compare_values(left, right);
                let result = matches!(
                    ordering,
                    Some(std::cmp::Ordering::Less) | Some(std::cmp::Ordering::Equal)
                );
                Ok(self.boolean(result))
            }
            Operator::GreaterThan => {
                let ordering = compare_values(left, right);
                Ok(self.boolean(ordering == Some(std::cmp::Ordering::Greater)))
            }
            Operator::GreaterThanOrEqualTo => {
                let ordering = compare_values(left, right);
                let result = matches!(
                    ordering,
                    Some(std::cmp::Ordering::Greater) | Some(std::cmp::Ordering::Equal)
                );
                Ok(self.boolean(result))
            }
            Operator::And => {
                let result = left.is_truthy() && right.is_truthy();
                Ok(self.boolean(result))
            }
            Operator::Or => {
                let result = left.is_truthy() || right.is_truthy();
                Ok(self.boolean(result))
            }
            other => Err(self.throw_type_error(format!("invalid binary operator '{}'", other))),
        }
    }

    fn numeric_operands(
        &mut self,
        operator: Operator,
        left: Value,
        right: Value,
    ) -> Result<(f64, f64), Control> {
        let (Some(l), Some(r)) = (left.as_number(), right.as_number()) else {
            return Err(self.throw_type_error(format!(
                "operands of '{}' must be numbers",
                operator
            )));
        };
        Ok((l, r))
    }

    fn eval_update(&mut self, e: &UpdateExpression) -> Completion {
        let Expression::Identifier(name) = &*e.target else {
            return Err(self.throw_type_error("invalid update target".to_string()));
        };

        let current = match self.lookup(name) {
            Some(value) => value,
            None => return Err(self.throw_reference_error(format!("{} is not defined", name))),
        };
        self.pin(current);

        let Some(n) = current.as_number() else {
            return Err(self.throw_type_error(format!("{} is not a number", name)));
        };

        let updated = match e.operator {
            Operator::Increment => n + 1.0,
            Operator::Decrement => n - 1.0,
            other => {
                return Err(self.throw_type_error(format!("invalid update operator '{}'", other)))
            }
        };

        let new_value = self.number(updated);
        self.assign_variable(name, new_value);

        Ok(if e.prefix { new_value } else { current })
    }

    fn eval_assignment(&mut self, e: &AssignmentExpression) -> Completion {
        match e.operator {
            Operator::Assign => {
                let value = self.eval_expression(&e.value)?;
                self.assign_to_target(&e.target, value)?;
                Ok(value)
            }
            Operator::AddAssign
            | Operator::SubtractAssign
            | Operator::MultiplyAssign
            | Operator::DivideAssign => {
                let binary_op = match e.operator {
                    Operator::AddAssign => Operator::Plus,
                    Operator::SubtractAssign => Operator::Minus,
                    Operator::MultiplyAssign => Operator::Multiply,
                    _ => Operator::Divide,
                };
                let current = self.eval_expression(&e.target)?;
                let rhs = self.eval_expression(&e.value)?;
                let combined = self.apply_binary(binary_op, current, rhs)?;
                self.assign_to_target(&e.target, combined)?;
                Ok(combined)
            }
            other => Err(self.throw_type_error(format!("invalid assignment operator '{}'", other))),
        }
    }

    fn assign_to_target(&mut self, target: &Expression, value: Value) -> Result<(), Control> {
        match target {
            Expression::Identifier(name) => {
                self.assign_variable(name, value);
                Ok(())
            }
            Expression::Member(member) => {
                let object = self.eval_expression(&member.object)?;
                if object.is_undefined() || object.is_null() {
                    let name = describe_property(member);
                    return Err(self.throw_type_error(format!(
                        "Cannot set properties of {} (setting '{}')",
                        if object.is_null() { "null" } else { "undefined" },
                        name
                    )));
                }

                if member.computed {
                    let key = self.eval_expression(&member.property)?;
                    if let Some(index) = key.as_number() {
                        if object.is_array() && index >= 0.0 && index.fract() == 0.0 {
                            self.array_index_set(object, index as usize, value);
                            return Ok(());
                        }
                    }
                    let name = value_to_string(key);
                    object.set_property(name, value);
                } else {
                    match &*member.property {
                        Expression::Identifier(name) => object.set_property(name.as_str(), value),
                        _ => {
                            let message = "property access expects an identifier".to_string();
                            return Err(self.throw_type_error(message));
                        }
                    }
                }
                Ok(())
            }
            _ => {
                let message = "Invalid left-hand side in assignment".to_string();
                Err(self.throw_reference_error(message))
            }
        }
    }

    fn array_index_set(&mut self, array: Value, index: usize, value: Value) {
        let undefined = self.undefined;
        if let ValueKind::Array(elements) = &mut array.borrow_mut().kind {
            if index < elements.len() {
                elements[index] = value;
            } else {
                elements.resize(index, undefined);
                elements.push(value);
            }
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Source-form description of a callee for "X is not a function" messages.
fn describe_callee(expression: &Expression) -> String {
    match expression {
        Expression::Identifier(name) => name.clone(),
        Expression::This => "this".to_string(),
        Expression::Member(member) if !member.computed => {
            if let Expression::Identifier(name) = &*member.property {
                format!("{}.{}", describe_callee(&member.object), name)
            } else {
                "expression".to_string()
            }
        }
        _ => "expression".to_string(),
    }
}

fn describe_property(member: &MemberExpression) -> String {
    match &*member.property {
        Expression::Identifier(name) => name.clone(),
        Expression::StringLiteral(s) => s.clone(),
        Expression::NumberLiteral(n) => crate::value::number_to_string(*n),
        _ => "expression".to_string(),
    }
}

/// Equality: numeric for two numbers, lexical for two strings, truthiness
/// otherwise. Loose and strict comparison coincide in this language.
fn values_equal(left: Value, right: Value) -> bool {
    let left_data = left.borrow();
    let right_data = right.borrow();
    match (&left_data.kind, &right_data.kind) {
        (ValueKind::Number(a), ValueKind::Number(b)) => a == b,
        (ValueKind::String(a), ValueKind::String(b)) => a == b,
        _ => {
            drop(left_data);
            drop(right_data);
            left.is_truthy() == right.is_truthy()
        }
    }
}

fn compare_values(left: Value, right: Value) -> Option<std::cmp::Ordering> {
    let left_data = left.borrow();
    let right_data = right.borrow();
    match (&left_data.kind, &right_data.kind) {
        (ValueKind::Number(a), ValueKind::Number(b)) => a.partial_cmp(b),
        _ => {
            drop(left_data);
            drop(right_data);
            Some(left.is_truthy().cmp(&right.is_truthy()))
        }
    }
}
