use std::collections::HashMap;
use std::rc::Rc;

use log::trace;

use crate::value::Value;

/// Local bindings of one function invocation. Globals live in the evaluator.
#[derive(Debug, Clone, Default)]
pub(crate) struct Env {
    env: HashMap<String, Rc<Value>>,
}

impl Env {
    pub fn new() -> Env {
        Env {
            env: HashMap::new(),
        }
    }

    pub fn extended(&self, name: &str, val: Value) -> Env {
        trace!("Binding {} = {}", name, val);
        let mut env = self.env.clone();
        env.insert(name.to_string(), Rc::new(val));
        Env { env }
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.env.get(name).map(|val| (**val).clone())
    }
}
