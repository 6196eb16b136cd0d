use std::collections::HashMap;

use log::{debug, info};

use crate::types::Type;

/// Generic name to concrete type, applied by rebuilding the type tree.
#[derive(Clone, Debug, Default)]
pub struct Substitution {
    map: HashMap<String, Type>,
}

impl Substitution {
    pub fn from(map: HashMap<String, Type>) -> Substitution {
        if !map.is_empty() {
            info!(
                "Building substitution {{ {} }}",
                map.iter()
                    .map(|(from, to)| format!("{} <-s> {}", from, to))
                    .collect::<Vec<_>>()
                    .join("; ")
            );
        }
        Substitution { map }
    }

    /// Instantiated generics are dropped from the generics of a function
    /// type. A nested declarator keeps its own generics, renamed when a
    /// replacement type mentions the same name.
    pub fn apply(&self, t: &Type) -> Type {
        match t {
            Type::Bool | Type::Int => t.clone(),
            Type::List(element) => Type::List(Box::new(self.apply(element))),
            Type::Tuple(ts) => Type::Tuple(ts.iter().map(|t| self.apply(t)).collect()),
            Type::Generic(name) => self.map.get(name).cloned().unwrap_or_else(|| t.clone()),
            Type::Function {
                ret,
                params,
                names,
                generics,
            } => {
                let mut ret = *ret.clone();
                let mut params = params.clone();
                let mut kept = Vec::with_capacity(generics.len());
                for generic in generics.iter().filter(|g| !self.map.contains_key(*g)) {
                    if !self.introduces(generic) {
                        kept.push(generic.clone());
                        continue;
                    }
                    let fresh = self.fresh_name(generic, t);
                    debug!("Renaming bound generic {} to {}", generic, fresh);
                    let rename = Substitution {
                        map: HashMap::from([(generic.clone(), Type::Generic(fresh.clone()))]),
                    };
                    ret = rename.apply(&ret);
                    params = params.iter().map(|param| rename.apply(param)).collect();
                    kept.push(fresh);
                }
                Type::Function {
                    ret: Box::new(self.apply(&ret)),
                    params: params.iter().map(|param| self.apply(param)).collect(),
                    names: names.clone(),
                    generics: kept,
                }
            }
        }
    }

    /// Whether some replacement type mentions `name`, so that a binder of
    /// that name would capture it.
    fn introduces(&self, name: &str) -> bool {
        self.map.values().any(|t| t.mentions(name))
    }

    // Primed names cannot be written in source, so they never clash with
    // user generics.
    fn fresh_name(&self, name: &str, within: &Type) -> String {
        let mut fresh = format!("{}'", name);
        while within.mentions(&fresh) || self.introduces(&fresh) || self.map.contains_key(&fresh) {
            fresh.push('\'');
        }
        fresh
    }
}

impl FromIterator<(String, Type)> for Substitution {
    fn from_iter<I: IntoIterator<Item = (String, Type)>>(iter: I) -> Self {
        Substitution::from(iter.into_iter().collect())
    }
}
