use std::collections::HashMap;

// =============================================================================
// App Links
// =============================================================================

/// Navigation target carried by an app node.
///
/// Opening an app node hands this to the host UI, which decides what the
/// scene/tab/component identifiers mean.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppLink {
    /// Scene identifier (e.g. `main`, `login`, `bootup`).
    pub scene: String,
    /// Optional tab inside the scene.
    pub tab: Option<String>,
    /// Optional sub-component inside the scene.
    pub component: Option<String>,
}

impl AppLink {
    pub fn scene(scene: impl Into<String>) -> Self {
        Self {
            scene: scene.into(),
            ..Self::default()
        }
    }

    pub fn with_tab(mut self, tab: impl Into<String>) -> Self {
        self.tab = Some(tab.into());
        self
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }
}

// =============================================================================
// Filesystem Nodes
// =============================================================================

/// A node in the virtual filesystem tree.
#[derive(Clone, Debug, PartialEq)]
pub enum FsNode {
    /// Directory with named children.
    Directory(HashMap<String, FsNode>),
    /// Read-only text file.
    File(String),
    /// Link into the host application.
    App(AppLink),
    /// Marker for built-in binaries under `/bin`.
    System,
}

impl FsNode {
    /// Build a directory from `(name, node)` pairs.
    pub fn dir<I, S>(children: I) -> Self
    where
        I: IntoIterator<Item = (S, FsNode)>,
        S: Into<String>,
    {
        Self::Directory(
            children
                .into_iter()
                .map(|(name, node)| (name.into(), node))
                .collect(),
        )
    }

    pub fn file(content: impl Into<String>) -> Self {
        Self::File(content.into())
    }

    pub fn app(link: AppLink) -> Self {
        Self::App(link)
    }

    #[inline]
    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory(_))
    }

    /// Children of a directory node, `None` for every other kind.
    pub fn children(&self) -> Option<&HashMap<String, FsNode>> {
        match self {
            Self::Directory(children) => Some(children),
            _ => None,
        }
    }

    /// Name as rendered by `ls`: `dir/`, `app*`, plain for files and binaries.
    pub fn display_name(&self, name: &str) -> String {
        match self {
            Self::Directory(_) => format!("{}/", name),
            Self::App(_) => format!("{}*", name),
            Self::File(_) | Self::System => name.to_string(),
        }
    }
}
