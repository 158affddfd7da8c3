//! Evaluation Environment
//!
//! Workflows are not evaluated from source text. Each workflow identifier maps
//! to an [`Invocation`]: the name of a callable bound in the [`Environment`]
//! plus the fixed arguments it is called with. Resolution happens once, up
//! front, so an unknown name fails the batch before any timing occurs.

use crate::error::HarnessError;
use fxhash::FxHashMap;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Default read function passed to every workflow
pub const DEFAULT_READIN_FUNC: &str = "cp.read";

/// Default input path passed to every workflow
pub const DEFAULT_INPUT_PATH: &str = "path/to/file.parquet";

/// Arguments a workflow receives on each call
#[derive(Debug, Clone, Copy)]
pub struct CallArgs<'a> {
    /// Name of the read function the workflow should use
    pub readin_func: &'a str,
    /// Data source
    pub input_path: &'a Path,
    /// Swept sampling fraction, `percent / 100`
    pub fraction: f64,
}

/// A benchmarkable procedure
pub type WorkflowFn = dyn Fn(&CallArgs<'_>) -> anyhow::Result<()> + Send + Sync;

/// Arguments bound to an invocation once, before the sweep starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedArgs {
    /// Read function name
    pub readin_func: String,
    /// Input data path
    pub input_path: PathBuf,
}

impl Default for FixedArgs {
    fn default() -> Self {
        Self {
            readin_func: DEFAULT_READIN_FUNC.to_string(),
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
        }
    }
}

/// A callable name plus its fixed arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Name looked up in the environment
    pub target: String,
    /// Arguments bound before the sweep
    pub args: FixedArgs,
}

impl Invocation {
    /// Invocation of `target` with the default fixed arguments
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            args: FixedArgs::default(),
        }
    }

    /// Replace the fixed arguments
    pub fn with_args(mut self, args: FixedArgs) -> Self {
        self.args = args;
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(readin_func={:?}, input_path={:?}, fraction=…)",
            self.target,
            self.args.readin_func,
            self.args.input_path.display().to_string()
        )
    }
}

/// Workflow identifier to invocation, in caller order
pub type WorkflowMap = IndexMap<String, Invocation>;

/// Name bindings that make workflow callables resolvable
#[derive(Default)]
pub struct Environment {
    bindings: FxHashMap<String, Box<WorkflowFn>>,
}

impl Environment {
    /// Create an empty environment
    pub fn new() -> Self {
        Self {
            bindings: FxHashMap::default(),
        }
    }

    /// Bind `name` to a callable, replacing any earlier binding
    pub fn register<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&CallArgs<'_>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.bindings.insert(name.into(), Box::new(f));
        self
    }

    /// Whether `name` is bound
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Bound names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.bindings.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether nothing is bound
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Look up the callable an invocation names
    pub fn resolve<'a>(
        &'a self,
        workflow: &'a str,
        invocation: &'a Invocation,
    ) -> Result<ResolvedWorkflow<'a>, HarnessError> {
        let func = self
            .bindings
            .get(&invocation.target)
            .ok_or_else(|| HarnessError::Resolution {
                workflow: workflow.to_string(),
                target: invocation.target.clone(),
            })?;

        Ok(ResolvedWorkflow {
            id: workflow,
            invocation,
            func: func.as_ref(),
        })
    }

    /// Resolve every workflow of a map, failing on the first unknown name
    pub fn resolve_all<'a>(
        &'a self,
        workflows: &'a WorkflowMap,
    ) -> Result<Vec<ResolvedWorkflow<'a>>, HarnessError> {
        workflows
            .iter()
            .map(|(id, invocation)| self.resolve(id, invocation))
            .collect()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("bindings", &self.names())
            .finish()
    }
}

/// A workflow whose callable has been found, ready to be timed
#[derive(Clone, Copy)]
pub struct ResolvedWorkflow<'a> {
    id: &'a str,
    invocation: &'a Invocation,
    func: &'a WorkflowFn,
}

impl<'a> ResolvedWorkflow<'a> {
    /// Workflow identifier
    pub fn id(&self) -> &'a str {
        self.id
    }

    /// Invocation the workflow was resolved from
    pub fn invocation(&self) -> &'a Invocation {
        self.invocation
    }

    /// Call the workflow once with the swept parameter
    #[inline]
    pub fn call(&self, fraction: f64) -> anyhow::Result<()> {
        let args = CallArgs {
            readin_func: &self.invocation.args.readin_func,
            input_path: &self.invocation.args.input_path,
            fraction,
        };
        (self.func)(&args)
    }
}

impl fmt::Debug for ResolvedWorkflow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedWorkflow")
            .field("id", &self.id)
            .field("invocation", &self.invocation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::Mutex;

    #[test]
    fn test_resolve_and_call() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let mut env = Environment::new();
        env.register("io.read_workflow", move |args: &CallArgs<'_>| {
            sink.lock().unwrap().push((
                args.readin_func.to_string(),
                args.input_path.to_path_buf(),
                args.fraction,
            ));
            Ok(())
        });

        let invocation = Invocation::new("io.read_workflow");
        let resolved = env.resolve("read", &invocation).unwrap();
        assert_eq!(resolved.id(), "read");
        assert_eq!(resolved.invocation(), &invocation);
        resolved.call(0.6).unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, DEFAULT_READIN_FUNC);
        assert_eq!(seen[0].1, PathBuf::from(DEFAULT_INPUT_PATH));
        assert!((seen[0].2 - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_name() {
        let env = Environment::new();
        let invocation = Invocation::new("nowhere.fn");
        let err = env.resolve("w", &invocation).unwrap_err();

        match err {
            HarnessError::Resolution { workflow, target } => {
                assert_eq!(workflow, "w");
                assert_eq!(target, "nowhere.fn");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_resolve_all_stops_at_first_unknown() {
        let mut env = Environment::new();
        env.register("a", |_: &CallArgs<'_>| Ok(()));

        let mut workflows = WorkflowMap::new();
        workflows.insert("first".to_string(), Invocation::new("a"));
        workflows.insert("second".to_string(), Invocation::new("b"));

        let err = env.resolve_all(&workflows).unwrap_err();
        assert!(err.to_string().contains("'second'"));
    }

    #[test]
    fn test_custom_args_and_display() {
        let args = FixedArgs {
            readin_func: "pl.read_parquet".to_string(),
            input_path: PathBuf::from("/data/trips.parquet"),
        };
        let invocation = Invocation::new("bench.lazy").with_args(args);
        let rendered = invocation.to_string();

        assert!(rendered.starts_with("bench.lazy("));
        assert!(rendered.contains("pl.read_parquet"));
        assert!(rendered.contains("/data/trips.parquet"));
    }

    #[test]
    fn test_names_sorted() {
        let mut env = Environment::new();
        env.register("zeta", |_: &CallArgs<'_>| Ok(()))
            .register("alpha", |_: &CallArgs<'_>| Ok(()));

        assert_eq!(env.names(), vec!["alpha", "zeta"]);
        assert_eq!(env.len(), 2);
        assert!(env.contains("zeta"));
    }
}
