use std::fmt;
use std::sync::Arc;

/// An output format that can be requested with `-<id> <file>`.
pub trait Transform: fmt::Debug + Send + Sync {
    fn id(&self) -> &str;
    fn description(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformDescriptor {
    pub id: String,
    pub description: String,
}

impl TransformDescriptor {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
        }
    }
}

impl Transform for TransformDescriptor {
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Default)]
pub struct TransformRegistry {
    transforms: Vec<Arc<dyn Transform>>,
}

impl TransformRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The result formats every runner ships with.
    pub fn builtin() -> Self {
        [
            ("xml", "output results to xUnit.net v2+ XML file"),
            ("xmlv1", "output results to xUnit.net v1 XML file"),
            ("html", "output results to HTML file"),
            ("nunit", "output results to NUnit v2.5 XML file"),
            ("junit", "output results to JUnit XML file"),
            ("trx", "output results to Visual Studio TRX file"),
        ]
        .into_iter()
        .fold(Self::new(), |registry, (id, description)| {
            registry.with(Arc::new(TransformDescriptor::new(id, description)))
        })
    }

    pub fn with(mut self, transform: Arc<dyn Transform>) -> Self {
        self.transforms.push(transform);
        self
    }

    pub fn transforms(&self) -> &[Arc<dyn Transform>] {
        &self.transforms
    }
}
