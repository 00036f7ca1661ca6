//! Template resolution.
//!
//! # Responsibilities
//! - Load `.ehtml` files relative to the template root
//! - Expand `<include>` directives, guarding against cycles and runaway depth
//! - Collect `<set>` definitions and the `<use-plugins>` flag
//! - Substitute placeholders case-insensitively
//!
//! # Design Decisions
//! - Tokenize once, resolve once: no repeated passes over a growing buffer
//! - `<set>` applies to the whole page (including text before it) and
//!   overrides caller values; later definitions win
//! - Unknown placeholders are emitted verbatim, so `<b>` stays markup
//! - No HTML escaping: values are inserted as given

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::template::lexer::{tokenize, Token};
use crate::template::{RESERVED_NAMES, TEMPLATE_EXTENSION};

/// Default limit on nested `<include>` directives.
pub const DEFAULT_MAX_INCLUDE_DEPTH: usize = 16;

/// Errors raised while rendering a template.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("unsupported template extension: {0} (expected .ehtml)")]
    UnsupportedExtension(String),

    #[error("failed to read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("include cycle detected at {0}")]
    IncludeCycle(PathBuf),

    #[error("include depth limit of {limit} exceeded at {path}")]
    IncludeTooDeep { path: PathBuf, limit: usize },
}

/// Output of a render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub body: String,
    /// Whether the page asked for plugin assets via `<use-plugins>`.
    pub use_plugins: bool,
}

/// Renders `.ehtml` templates from a root directory.
#[derive(Debug, Clone)]
pub struct TemplateEngine {
    root: PathBuf,
    max_include_depth: usize,
}

#[derive(Default)]
struct Expansion {
    nodes: Vec<Node>,
    sets: Vec<(String, String)>,
    use_plugins: bool,
}

enum Node {
    Text(String),
    Placeholder(String),
}

/// Whether `path` names an `.ehtml` file.
pub fn has_template_extension(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e == TEMPLATE_EXTENSION)
}

impl TemplateEngine {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
        }
    }

    pub fn with_max_include_depth(mut self, depth: usize) -> Self {
        self.max_include_depth = depth;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Render the template at `path` (relative to the root) with `vars`.
    pub fn render<I, K, V>(&self, path: &str, vars: I) -> Result<Rendered, TemplateError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        if !has_template_extension(path) {
            return Err(TemplateError::UnsupportedExtension(path.to_string()));
        }

        let full_path = self.resolve(path);
        let source = read(&full_path)?;
        let mut stack = vec![identity(&full_path)?];

        let mut expansion = Expansion::default();
        self.expand(&source, &mut stack, 0, &mut expansion)?;

        tracing::debug!(template = %full_path.display(), "Template rendered");
        Ok(finish(expansion, vars))
    }

    /// Render an in-memory template. Includes resolve against the root.
    pub fn render_str<I, K, V>(&self, source: &str, vars: I) -> Result<Rendered, TemplateError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        let mut expansion = Expansion::default();
        self.expand(source, &mut Vec::new(), 0, &mut expansion)?;
        Ok(finish(expansion, vars))
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }

    fn expand(
        &self,
        source: &str,
        stack: &mut Vec<PathBuf>,
        depth: usize,
        out: &mut Expansion,
    ) -> Result<(), TemplateError> {
        for token in tokenize(source) {
            match token {
                Token::Text(text) => out.nodes.push(Node::Text(text.to_string())),
                Token::UsePlugins => out.use_plugins = true,
                Token::Set { name, value } => {
                    out.sets.push((name.to_string(), value.to_string()));
                }
                Token::Placeholder(name) => out.nodes.push(Node::Placeholder(name.to_string())),
                Token::Include(path) => {
                    let full_path = self.resolve(path);
                    let included = read(&full_path)?;
                    let key = identity(&full_path)?;

                    if stack.contains(&key) {
                        tracing::warn!(include = %full_path.display(), "Include cycle rejected");
                        return Err(TemplateError::IncludeCycle(full_path));
                    }
                    if depth >= self.max_include_depth {
                        return Err(TemplateError::IncludeTooDeep {
                            path: full_path,
                            limit: self.max_include_depth,
                        });
                    }

                    stack.push(key);
                    self.expand(&included, stack, depth + 1, out)?;
                    stack.pop();
                }
            }
        }
        Ok(())
    }
}

fn read(path: &Path) -> Result<String, TemplateError> {
    fs::read_to_string(path).map_err(|source| TemplateError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn identity(path: &Path) -> Result<PathBuf, TemplateError> {
    fs::canonicalize(path).map_err(|source| TemplateError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn finish<I, K, V>(expansion: Expansion, vars: I) -> Rendered
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: ToString,
{
    let mut values: HashMap<String, String> = HashMap::new();

    for (key, value) in vars {
        let key: String = key.into();
        if RESERVED_NAMES.iter().any(|r| r.eq_ignore_ascii_case(&key)) {
            tracing::debug!(variable = %key, "Reserved variable name ignored");
            continue;
        }
        values.insert(key.to_lowercase(), value.to_string());
    }
    for (name, value) in expansion.sets {
        values.insert(name.to_lowercase(), value);
    }

    let mut body = String::new();
    for node in expansion.nodes {
        match node {
            Node::Text(text) => body.push_str(&text),
            Node::Placeholder(name) => match values.get(&name.to_lowercase()) {
                Some(value) => body.push_str(value),
                None => {
                    body.push('<');
                    body.push_str(&name);
                    body.push('>');
                }
            },
        }
    }

    Rendered {
        body,
        use_plugins: expansion.use_plugins,
    }
}
