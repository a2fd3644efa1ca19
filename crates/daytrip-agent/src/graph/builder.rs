use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use daytrip_core::error::{DaytripError, Result};

use super::executor::{CompiledStep, CompiledWorkflow, Transition};
use super::step::Step;

/// Terminal marker: connecting a step to `END` finishes the run after it.
pub const END: &str = "__end__";

/// Collects steps and connections before validation.
pub struct WorkflowBuilder<S> {
    steps: Vec<(String, Arc<dyn Step<S>>)>,
    index: HashMap<String, usize>,
    edges: HashMap<String, String>,
    entry: Option<String>,
}

impl<S: Send + 'static> Default for WorkflowBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Send + 'static> WorkflowBuilder<S> {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            index: HashMap::new(),
            edges: HashMap::new(),
            entry: None,
        }
    }

    /// Add a named step. Names are unique and `END` is reserved.
    pub fn register(&mut self, name: impl Into<String>, step: impl Step<S>) -> Result<&mut Self> {
        let name = name.into();
        if name == END {
            return Err(DaytripError::Graph(format!("'{}' is reserved", END)));
        }
        if self.index.contains_key(&name) {
            return Err(DaytripError::DuplicateStep(name));
        }
        let step: Arc<dyn Step<S>> = Arc::new(step);
        self.index.insert(name.clone(), self.steps.len());
        self.steps.push((name, step));
        Ok(self)
    }

    /// Choose the first step to run.
    pub fn set_entry(&mut self, name: &str) -> Result<&mut Self> {
        if !self.index.contains_key(name) {
            return Err(DaytripError::UnknownStep(name.to_string()));
        }
        self.entry = Some(name.to_string());
        Ok(self)
    }

    /// Pass control from `from` to `to` (a step name or `END`).
    pub fn connect(&mut self, from: &str, to: &str) -> Result<&mut Self> {
        if from == END {
            return Err(DaytripError::Graph(format!("'{}' cannot have a successor", END)));
        }
        if !self.index.contains_key(from) {
            return Err(DaytripError::UnknownStep(from.to_string()));
        }
        if to != END && !self.index.contains_key(to) {
            return Err(DaytripError::UnknownStep(to.to_string()));
        }
        if let Some(existing) = self.edges.get(from) {
            return Err(DaytripError::Graph(format!(
                "step '{}' is already connected to '{}'",
                from, existing
            )));
        }
        self.edges.insert(from.to_string(), to.to_string());
        Ok(self)
    }

    /// Validate the chain and resolve connections to table indices.
    pub fn compile(self) -> Result<CompiledWorkflow<S>> {
        let entry_name = self.entry.as_deref().ok_or(DaytripError::MissingEntry)?;

        for (name, _) in &self.steps {
            if !self.edges.contains_key(name) {
                return Err(DaytripError::Graph(format!(
                    "step '{}' has no outgoing connection",
                    name
                )));
            }
        }

        // Walk from the entry; every step must be reached exactly once.
        let mut seen = HashSet::new();
        let mut current = entry_name;
        while current != END {
            if !seen.insert(current) {
                return Err(DaytripError::Graph(format!(
                    "cycle through step '{}'",
                    current
                )));
            }
            current = self.edges[current].as_str();
        }

        let unreachable: Vec<&str> = self
            .steps
            .iter()
            .map(|(name, _)| name.as_str())
            .filter(|name| !seen.contains(name))
            .collect();
        if !unreachable.is_empty() {
            return Err(DaytripError::Graph(format!(
                "unreachable from entry '{}': {}",
                entry_name,
                unreachable.join(", ")
            )));
        }

        let entry = self.index[entry_name];
        let steps: Vec<CompiledStep<S>> = self
            .steps
            .iter()
            .map(|(name, step)| {
                let target = &self.edges[name];
                let next = if target == END {
                    Transition::End
                } else {
                    Transition::Step(self.index[target])
                };
                CompiledStep {
                    name: name.clone(),
                    step: Arc::clone(step),
                    next,
                }
            })
            .collect();

        let workflow = CompiledWorkflow::new(steps, entry);
        debug!(path = %workflow.path().join(" -> "), "Workflow compiled");
        Ok(workflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::step::FnStep;

    fn noop() -> impl Step<u32> {
        FnStep::new(|n: u32| async move { Ok::<_, DaytripError>(n) })
    }

    fn chain(names: &[&str]) -> WorkflowBuilder<u32> {
        let mut b = WorkflowBuilder::new();
        for name in names {
            b.register(*name, noop()).unwrap();
        }
        b
    }

    #[test]
    fn test_duplicate_step_rejected() {
        let mut b = chain(&["a"]);
        let err = b.register("a", noop()).err().unwrap();
        assert!(matches!(err, DaytripError::DuplicateStep(ref n) if n == "a"));
        assert!(err.is_config());
    }

    #[test]
    fn test_end_is_reserved() {
        let mut b = WorkflowBuilder::<u32>::new();
        assert!(matches!(b.register(END, noop()), Err(DaytripError::Graph(_))));
    }

    #[test]
    fn test_entry_must_be_registered() {
        let mut b = chain(&["a"]);
        assert!(matches!(b.set_entry("b"), Err(DaytripError::UnknownStep(ref n)) if n == "b"));
    }

    #[test]
    fn test_connect_unknown_names() {
        let mut b = chain(&["a"]);
        assert!(matches!(b.connect("x", "a"), Err(DaytripError::UnknownStep(_))));
        assert!(matches!(b.connect("a", "x"), Err(DaytripError::UnknownStep(_))));
        assert!(matches!(b.connect(END, "a"), Err(DaytripError::Graph(_))));
        assert!(b.connect("a", END).is_ok());
    }

    #[test]
    fn test_second_connection_rejected() {
        let mut b = chain(&["a", "b"]);
        b.connect("a", "b").unwrap();
        let err = b.connect("a", END).err().unwrap();
        assert!(err.to_string().contains("already connected to 'b'"));
    }

    #[test]
    fn test_compile_requires_entry() {
        let mut b = chain(&["a"]);
        b.connect("a", END).unwrap();
        assert!(matches!(b.compile(), Err(DaytripError::MissingEntry)));
    }

    #[test]
    fn test_compile_rejects_dangling_step() {
        let mut b = chain(&["a", "b"]);
        b.set_entry("a").unwrap().connect("a", "b").unwrap();
        let err = b.compile().err().unwrap();
        assert!(err.to_string().contains("'b' has no outgoing connection"));
    }

    #[test]
    fn test_compile_rejects_cycle() {
        let mut b = chain(&["a", "b"]);
        b.set_entry("a")
            .unwrap()
            .connect("a", "b")
            .unwrap()
            .connect("b", "a")
            .unwrap();
        let err = b.compile().err().unwrap();
        assert!(err.to_string().contains("cycle"));
    }

    #[test]
    fn test_compile_rejects_unreachable() {
        let mut b = chain(&["a", "b"]);
        b.set_entry("a")
            .unwrap()
            .connect("a", END)
            .unwrap()
            .connect("b", END)
            .unwrap();
        let err = b.compile().err().unwrap();
        assert!(err.to_string().contains("unreachable from entry 'a': b"));
    }

    #[test]
    fn test_compile_resolves_path() {
        let mut b = chain(&["third", "first", "second"]);
        b.set_entry("first")
            .unwrap()
            .connect("first", "second")
            .unwrap()
            .connect("second", "third")
            .unwrap()
            .connect("third", END)
            .unwrap();
        let wf = b.compile().unwrap();
        assert_eq!(wf.path(), vec!["first", "second", "third"]);
        assert_eq!(wf.len(), 3);
    }
}
