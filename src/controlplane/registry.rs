//! Operator Registry
//!
//! Explicit table of installable add-on operators. Handed to the
//! orchestrator at construction time; registration order is preserved.

use crate::domain::cluster::Cluster;
use crate::domain::ports::OperatorRef;
use crate::error::{Error, Result};
use indexmap::{IndexMap, IndexSet};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

/// Registry of operator plugins keyed by name
#[derive(Default)]
pub struct OperatorRegistry {
    operators: RwLock<IndexMap<String, OperatorRef>>,
}

impl OperatorRegistry {
    /// Create an empty registry
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Create a registry holding the given operators
    pub fn with_operators(operators: impl IntoIterator<Item = OperatorRef>) -> Result<Arc<Self>> {
        let registry = Self::default();
        for operator in operators {
            registry.register(operator)?;
        }
        Ok(Arc::new(registry))
    }

    /// Register an operator plugin
    pub fn register(&self, operator: OperatorRef) -> Result<()> {
        let name = operator.name().to_string();
        let mut operators = self.operators.write();
        if operators.contains_key(&name) {
            return Err(Error::OperatorAlreadyRegistered { name });
        }
        info!(operator = %name, "registering operator");
        operators.insert(name, operator);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<OperatorRef> {
        self.operators.read().get(name).cloned()
    }

    /// Operator names in registration order
    pub fn names(&self) -> Vec<String> {
        self.operators.read().keys().cloned().collect()
    }

    /// All operators in registration order
    pub fn all(&self) -> Vec<OperatorRef> {
        self.operators.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.operators.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.read().is_empty()
    }

    /// Expand `requested` with transitive dependencies.
    ///
    /// Dependencies come before their dependents; otherwise request order is
    /// kept. Unknown names and dependency cycles are errors.
    pub fn resolve_dependencies(
        &self,
        cluster: &Cluster,
        requested: &[String],
    ) -> Result<Vec<OperatorRef>> {
        let operators = self.operators.read();
        let mut ordered: IndexSet<String> = IndexSet::new();
        let mut visiting: Vec<String> = Vec::new();

        for name in requested {
            visit(&operators, cluster, name, &mut visiting, &mut ordered)?;
        }

        Ok(ordered
            .iter()
            .filter_map(|name| operators.get(name).cloned())
            .collect())
    }
}

fn visit(
    operators: &IndexMap<String, OperatorRef>,
    cluster: &Cluster,
    name: &str,
    visiting: &mut Vec<String>,
    ordered: &mut IndexSet<String>,
) -> Result<()> {
    if ordered.contains(name) {
        return Ok(());
    }
    if let Some(pos) = visiting.iter().position(|n| n == name) {
        let mut path = visiting[pos..].to_vec();
        path.push(name.to_string());
        return Err(Error::DependencyCycle { path });
    }

    let operator = operators.get(name).ok_or_else(|| Error::OperatorNotFound {
        name: name.to_string(),
    })?;

    visiting.push(name.to_string());
    for dependency in operator.dependencies(cluster) {
        visit(operators, cluster, &dependency, visiting, ordered)?;
    }
    visiting.pop();

    ordered.insert(name.to_string());
    Ok(())
}
