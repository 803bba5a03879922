//! Runtime value representation.
//!
//! Every runtime datum is a heap-allocated [`ValueData`]: a type tag plus a
//! property map. Objects, arrays and functions carry extra payload in the
//! tag; `__proto__` is an ordinary property wired by the allocator, so
//! prototype-chain lookup is plain property-map traversal.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use rustc_hash::FxHashSet;

use crate::ast::Statement;
use crate::heap::Value;
use crate::interpreter::{Completion, Interpreter};
use crate::scope::ScopeRef;

/// Property key under which the prototype link is stored.
pub const PROTO: &str = "__proto__";

/// Reference-counted string used for identifiers, property keys and string
/// payloads. Clones are cheap.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JsString(Rc<str>);

impl JsString {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl AsRef<str> for JsString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for JsString {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for JsString {
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for JsString {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl From<&str> for JsString {
    fn from(s: &str) -> Self {
        JsString(s.into())
    }
}

impl From<String> for JsString {
    fn from(s: String) -> Self {
        JsString(s.into())
    }
}

impl fmt::Debug for JsString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.0)
    }
}

impl fmt::Display for JsString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Property map. Insertion order is preserved so debug output and the
/// JSON-like console rendering are deterministic.
pub type PropertyMap = IndexMap<JsString, Value>;

/// Signature of native (builtin) functions: `(interpreter, this, args)`.
pub type NativeFn = fn(&mut Interpreter, Value, &[Value]) -> Completion;

/// Payload of a Function value.
#[derive(Clone)]
pub enum JsFunction {
    Native(NativeFunction),
    User(Rc<UserFunction>),
}

#[derive(Clone, Copy)]
pub struct NativeFunction {
    pub name: &'static str,
    pub func: NativeFn,
}

/// A user-defined function: parameter names, the body subtree shared with
/// the AST, and the scope chain captured at creation time.
pub struct UserFunction {
    pub name: Option<JsString>,
    pub parameters: Vec<JsString>,
    pub body: Rc<Statement>,
    pub scope: Vec<ScopeRef>,
    pub is_arrow: bool,
}

impl JsFunction {
    pub fn name(&self) -> Option<&str> {
        match self {
            JsFunction::Native(f) => Some(f.name),
            JsFunction::User(f) => f.name.as_ref().map(|n| n.as_str()),
        }
    }
}

impl fmt::Debug for JsFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "[Function: {}]", name),
            None => write!(f, "[Function]"),
        }
    }
}

/// The type tag of a runtime value, with type-specific payloads.
#[derive(Debug, Default)]
pub enum ValueKind {
    #[default]
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    String(JsString),
    Object,
    Array(Vec<Value>),
    Function(JsFunction),
}

/// A heap-resident value: tag plus property map.
#[derive(Debug, Default)]
pub struct ValueData {
    pub kind: ValueKind,
    pub properties: PropertyMap,
}

impl ValueData {
    pub fn new(kind: ValueKind) -> Self {
        Self {
            kind,
            properties: PropertyMap::new(),
        }
    }

    /// Reset to a clean state for pool reuse. Dropping the payload releases
    /// shared AST bodies and captured scope frames.
    pub fn reset(&mut self) {
        self.kind = ValueKind::Undefined;
        self.properties.clear();
    }
}

impl Value {
    pub fn is_undefined(&self) -> bool {
        matches!(self.borrow().kind, ValueKind::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self.borrow().kind, ValueKind::Null)
    }

    pub fn is_function(&self) -> bool {
        matches!(self.borrow().kind, ValueKind::Function(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self.borrow().kind, ValueKind::Array(_))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self.borrow().kind {
            ValueKind::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.borrow().kind {
            ValueKind::Boolean(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_js_string(&self) -> Option<JsString> {
        match &self.borrow().kind {
            ValueKind::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    /// Truthiness: undefined, null, false, 0, NaN and the empty string are
    /// falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match &self.borrow().kind {
            ValueKind::Undefined | ValueKind::Null => false,
            ValueKind::Boolean(b) => *b,
            ValueKind::Number(n) => *n != 0.0 && !n.is_nan(),
            ValueKind::String(s) => !s.is_empty(),
            ValueKind::Object | ValueKind::Array(_) | ValueKind::Function(_) => true,
        }
    }

    /// The `typeof` string for this value. `null` reports "object".
    pub fn type_of(&self) -> &'static str {
        match &self.borrow().kind {
            ValueKind::Undefined => "undefined",
            ValueKind::Null => "object",
            ValueKind::Boolean(_) => "boolean",
            ValueKind::Number(_) => "number",
            ValueKind::String(_) => "string",
            ValueKind::Object | ValueKind::Array(_) => "object",
            ValueKind::Function(_) => "function",
        }
    }

    /// Own-property read; does not walk the prototype chain.
    pub fn get_own(&self, name: &str) -> Option<Value> {
        self.borrow().properties.get(name).copied()
    }

    /// Property read through the prototype chain. The visited set makes
    /// lookup terminate even when user code builds a `__proto__` cycle.
    pub fn get_property(&self, name: &str) -> Option<Value> {
        let mut seen: FxHashSet<usize> = FxHashSet::default();
        let mut current = *self;

        loop {
            if !seen.insert(current.id()) {
                return None;
            }
            if let Some(found) = current.get_own(name) {
                return Some(found);
            }
            match current.get_own(PROTO) {
                Some(proto) if !proto.is_undefined() => current = proto,
                _ => return None,
            }
        }
    }

    pub fn set_property(&self, name: impl Into<JsString>, value: Value) {
        self.borrow_mut().properties.insert(name.into(), value);
    }
}

/// Numeric coercion used by builtins: numbers pass through, strings parse
/// as decimals, booleans map to 1/0, null to 0; everything else is NaN.
pub fn to_number(value: Value) -> f64 {
    match &value.borrow().kind {
        ValueKind::Number(n) => *n,
        ValueKind::Boolean(true) => 1.0,
        ValueKind::Boolean(false) => 0.0,
        ValueKind::Null => 0.0,
        ValueKind::String(s) => s.as_str().trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

/// Number rendering: shortest decimal form, integers without a fraction.
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// The language-level `toString` of a value: numbers in shortest decimal
/// form, arrays comma-joined, objects as `[object Name]` using the
/// constructor's name when reachable.
pub fn value_to_string(value: Value) -> String {
    let mut seen = FxHashSet::default();
    value_to_string_inner(value, &mut seen)
}

fn value_to_string_inner(value: Value, seen: &mut FxHashSet<usize>) -> String {
    if !seen.insert(value.id()) {
        return String::new();
    }

    let result = match &value.borrow().kind {
        ValueKind::Undefined => "undefined".to_string(),
        ValueKind::Null => "null".to_string(),
        ValueKind::Boolean(b) => b.to_string(),
        ValueKind::Number(n) => number_to_string(*n),
        ValueKind::String(s) => s.to_string(),
        ValueKind::Array(elements) => elements
            .iter()
            .map(|e| value_to_string_inner(*e, seen))
            .collect::<Vec<_>>()
            .join(","),
        ValueKind::Function(_) => "Function".to_string(),
        ValueKind::Object => {
            let name = constructor_name(value).unwrap_or_else(|| "Object".to_string());
            format!("[object {}]", name)
        }
    };

    seen.remove(&value.id());
    result
}

fn constructor_name(value: Value) -> Option<String> {
    let constructor = value.get_property("constructor")?;
    if let ValueKind::Function(f) = &constructor.borrow().kind {
        return f.name().map(|n| n.to_string());
    }
    None
}

/// JSON-like rendering used by `console.log`: strings print raw at the top
/// level and quoted inside containers; `__proto__` entries are omitted.
pub fn render_console_value(value: Value) -> String {
    match &value.borrow().kind {
        ValueKind::String(s) => s.to_string(),
        _ => {
            let mut seen = FxHashSet::default();
            render_nested(value, &mut seen)
        }
    }
}

fn render_nested(value: Value, seen: &mut FxHashSet<usize>) -> String {
    if !seen.insert(value.id()) {
        return "[Circular]".to_string();
    }

    let result = match &value.borrow().kind {
        ValueKind::Undefined => "undefined".to_string(),
        ValueKind::Null => "null".to_string(),
        ValueKind::Boolean(b) => b.to_string(),
        ValueKind::Number(n) => number_to_string(*n),
        ValueKind::String(s) => {
            serde_json::to_string(s.as_str()).unwrap_or_else(|_| format!("\"{}\"", s))
        }
        ValueKind::Array(elements) => {
            let rendered: Vec<String> = elements.iter().map(|e| render_nested(*e, seen)).collect();
            format!("[{}]", rendered.join(", "))
        }
        ValueKind::Function(f) => match f.name() {
            Some(name) if !name.is_empty() => format!("[Function: {}]", name),
            _ => "[Function]".to_string(),
        },
        ValueKind::Object => {
            let data = value.borrow();
            let rendered: Vec<String> = data
                .properties
                .iter()
                .filter(|(key, _)| key.as_str() != PROTO)
                .map(|(key, val)| {
                    let key_json = serde_json::to_string(key.as_str())
                        .unwrap_or_else(|_| format!("\"{}\"", key));
                    format!("{}: {}", key_json, render_nested(*val, seen))
                })
                .collect();
            format!("{{{}}}", rendered.join(", "))
        }
    };

    seen.remove(&value.id());
    result
}
