//! Plugin asset injection for pages that declare `<use-plugins>`.

use crate::config::PluginConfig;

/// Stylesheets and scripts linked into plugin-enabled pages.
#[derive(Debug, Clone, Default)]
pub struct PluginAssets {
    stylesheets: Vec<String>,
    scripts: Vec<String>,
}

impl PluginAssets {
    pub fn new(stylesheets: Vec<String>, scripts: Vec<String>) -> Self {
        Self {
            stylesheets,
            scripts,
        }
    }

    pub fn from_config(config: &PluginConfig) -> Self {
        Self::new(config.stylesheets.clone(), config.scripts.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.stylesheets.is_empty() && self.scripts.is_empty()
    }

    /// The `<link>` and `<script>` tags, one per line.
    pub fn tags(&self) -> String {
        let links = self
            .stylesheets
            .iter()
            .map(|href| format!("<link rel=\"stylesheet\" href=\"{href}\">\n"));
        let scripts = self
            .scripts
            .iter()
            .map(|src| format!("<script src=\"{src}\"></script>\n"));
        links.chain(scripts).collect()
    }

    /// Insert the tags before `</head>`, or at the top when there is no head.
    pub fn inject(&self, body: &str) -> String {
        if self.is_empty() {
            return body.to_string();
        }

        let tags = self.tags();
        // ASCII lowercasing keeps byte offsets aligned with `body`.
        match body.to_ascii_lowercase().find("</head>") {
            Some(at) => {
                let mut out = String::with_capacity(body.len() + tags.len());
                out.push_str(&body[..at]);
                out.push_str(&tags);
                out.push_str(&body[at..]);
                out
            }
            None => format!("{tags}{body}"),
        }
    }
}
