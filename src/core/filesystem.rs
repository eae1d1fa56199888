use std::cmp::Ordering;

use crate::config::HOME_DIR;
use crate::models::{AppLink, FsNode};

/// Directory entry returned by [`VirtualFs::list_dir`].
#[derive(Clone, Debug)]
pub struct DirEntry<'a> {
    pub name: &'a str,
    pub node: &'a FsNode,
}

impl DirEntry<'_> {
    #[inline]
    pub fn is_dir(&self) -> bool {
        self.node.is_directory()
    }
}

/// Read-only virtual filesystem.
///
/// # Path Convention
///
/// - Paths are absolute strings starting with `/`
/// - Root `/` is the root node with zero segments
/// - Empty segments are ignored, so `//home/` and `/home` are the same path
#[derive(Clone, Debug)]
pub struct VirtualFs {
    root: FsNode,
}

impl VirtualFs {
    /// Create a filesystem around an existing tree.
    pub fn from_root(root: FsNode) -> Self {
        Self { root }
    }

    /// The built-in NuCaloric tree: home documents, site links, system logs
    /// and `/bin`.
    pub fn nucaloric() -> Self {
        Self::from_root(nucaloric_tree())
    }

    /// Resolve a path string against the current directory.
    ///
    /// - Absolute paths pass through unchanged
    /// - `.` stays in `current`
    /// - Empty input means the home directory
    /// - `~` and `~/...` are relative to the home directory
    /// - Otherwise segments are applied left to right; `..` pops (never past
    ///   root) and `.` is skipped
    ///
    /// This never touches the tree and never fails.
    pub fn resolve_path(path: &str, current: &str) -> String {
        if path.starts_with('/') {
            return path.to_string();
        }
        if path == "." {
            return current.to_string();
        }
        if path.is_empty() || path == "~" {
            return HOME_DIR.to_string();
        }

        let (base, rest) = match path.strip_prefix("~/") {
            Some(rest) => (HOME_DIR, rest),
            None => (current, path),
        };

        let mut parts: Vec<&str> = segments(base).collect();
        for part in rest.split('/').filter(|s| !s.is_empty()) {
            match part {
                ".." => {
                    parts.pop();
                }
                "." => {}
                _ => parts.push(part),
            }
        }

        format!("/{}", parts.join("/"))
    }

    /// Look up the node at an absolute path by descending segment by segment.
    pub fn get_object_at_path(&self, path: &str) -> Option<&FsNode> {
        let mut current = &self.root;
        for part in segments(path) {
            current = current.children()?.get(part)?;
        }
        Some(current)
    }

    pub fn path_exists(&self, path: &str) -> bool {
        self.get_object_at_path(path).is_some()
    }

    pub fn is_directory(&self, path: &str) -> bool {
        matches!(self.get_object_at_path(path), Some(FsNode::Directory(_)))
    }

    /// App link at `path`, if the node there is an app.
    pub fn app_at(&self, path: &str) -> Option<&AppLink> {
        match self.get_object_at_path(path)? {
            FsNode::App(link) => Some(link),
            _ => None,
        }
    }

    /// List a directory, directories first and alphabetical within each group.
    ///
    /// Returns `None` if `path` is missing or not a directory.
    pub fn list_dir(&self, path: &str) -> Option<Vec<DirEntry<'_>>> {
        let children = self.get_object_at_path(path)?.children()?;
        let mut items: Vec<_> = children
            .iter()
            .map(|(name, node)| DirEntry { name, node })
            .collect();
        items.sort_by(|a, b| match (a.is_dir(), b.is_dir()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => a.name.cmp(b.name),
        });
        Some(items)
    }
}

impl Default for VirtualFs {
    fn default() -> Self {
        Self::nucaloric()
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

// =============================================================================
// Built-in Tree
// =============================================================================

const REPORT_TXT: &str = "NuCaloric System Report - Version 3.2.1

System Status: Operational
Last Maintenance: 2025-03-15
Next Scheduled Check: 2025-04-30

Alert Level: Normal
Security Protocols: Active";

const NOTES_TXT: &str = "Remember to check the security logs weekly.
Backup schedule changed to Tuesdays at 2am.";

const SYSTEM_LOG: &str = "2025-04-16 08:32:14 INFO: System startup completed
2025-04-16 08:35:22 INFO: User login: admin
2025-04-16 09:12:45 WARNING: High CPU usage detected
2025-04-16 09:15:33 INFO: CPU usage returned to normal
2025-04-16 10:22:18 INFO: Backup started
2025-04-16 10:45:02 INFO: Backup completed successfully";

const SECURITY_LOG: &str = "2025-04-15 23:42:18 WARNING: Failed login attempt: username \"root\"
2025-04-16 02:15:33 WARNING: Unusual access pattern detected
2025-04-16 02:16:45 INFO: Security countermeasures activated
2025-04-16 02:17:12 INFO: Threat contained
2025-04-16 08:35:22 INFO: Admin login successful";

const NETWORK_CONF: &str = "# Network Configuration
DNS=192.168.1.1
GATEWAY=192.168.1.1
IP_MODE=DHCP

# Security Settings
FIREWALL=ENABLED
INTRUSION_DETECTION=ACTIVE
PORT_SCANNING_PROTECTION=TRUE";

const BIN_COMMANDS: &[&str] = &[
    "ls", "cd", "pwd", "cat", "nano", "help", "clear", "echo", "date", "whoami",
];

fn nucaloric_tree() -> FsNode {
    let documents = FsNode::dir([
        ("report.txt", FsNode::file(REPORT_TXT)),
        ("notes.txt", FsNode::file(NOTES_TXT)),
    ]);

    let sites = FsNode::dir([
        (
            "dashboard",
            FsNode::dir([
                ("main", FsNode::app(AppLink::scene("main"))),
                ("modern", FsNode::app(AppLink::scene("modernMain"))),
            ]),
        ),
        (
            "profile",
            FsNode::dir([(
                "user",
                FsNode::app(AppLink::scene("main").with_tab("profile")),
            )]),
        ),
        (
            "directory",
            FsNode::app(AppLink::scene("main").with_component("siteDirectory")),
        ),
        (
            "propaganda",
            FsNode::app(AppLink::scene("main").with_component("propaganda")),
        ),
        ("login", FsNode::app(AppLink::scene("login"))),
        ("boot", FsNode::app(AppLink::scene("bootup"))),
    ]);

    let system = FsNode::dir([
        (
            "logs",
            FsNode::dir([
                ("system.log", FsNode::file(SYSTEM_LOG)),
                ("security.log", FsNode::file(SECURITY_LOG)),
            ]),
        ),
        (
            "config",
            FsNode::dir([("network.conf", FsNode::file(NETWORK_CONF))]),
        ),
    ]);

    let user = FsNode::dir([
        ("documents", documents),
        ("sites", sites),
        ("system", system),
    ]);

    FsNode::dir([
        ("home", FsNode::dir([("user", user)])),
        (
            "bin",
            FsNode::dir(BIN_COMMANDS.iter().map(|name| (*name, FsNode::System))),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fs() -> VirtualFs {
        VirtualFs::nucaloric()
    }

    #[test]
    fn test_resolve_path_absolute_passthrough() {
        assert_eq!(VirtualFs::resolve_path("/bin", "/home/user"), "/bin");
        assert_eq!(VirtualFs::resolve_path("/", "/home/user"), "/");
    }

    #[test]
    fn test_resolve_path_special_inputs() {
        assert_eq!(VirtualFs::resolve_path(".", "/home/user/sites"), "/home/user/sites");
        assert_eq!(VirtualFs::resolve_path("", "/bin"), "/home/user");
        assert_eq!(VirtualFs::resolve_path("~", "/bin"), "/home/user");
        assert_eq!(
            VirtualFs::resolve_path("~/documents", "/bin"),
            "/home/user/documents"
        );
    }

    #[test]
    fn test_resolve_path_parent_is_clamped() {
        assert_eq!(VirtualFs::resolve_path("..", "/home/user"), "/home");
        assert_eq!(VirtualFs::resolve_path("..", "/"), "/");
        assert_eq!(VirtualFs::resolve_path("../../../..", "/home/user"), "/");
    }

    #[test]
    fn test_resolve_path_relative_segments() {
        assert_eq!(
            VirtualFs::resolve_path("documents/./report.txt", "/home/user"),
            "/home/user/documents/report.txt"
        );
        assert_eq!(
            VirtualFs::resolve_path("sites//dashboard/", "/home/user"),
            "/home/user/sites/dashboard"
        );
        assert_eq!(
            VirtualFs::resolve_path("../user/system", "/home/user/documents"),
            "/home/user/user/system"
        );
    }

    #[test]
    fn test_get_object_at_path() {
        let fs = fs();
        assert!(fs.get_object_at_path("/").is_some_and(FsNode::is_directory));
        assert!(matches!(
            fs.get_object_at_path("/home/user/documents/notes.txt"),
            Some(FsNode::File(content)) if content.starts_with("Remember")
        ));
        assert_eq!(fs.get_object_at_path("/bin/ls"), Some(&FsNode::System));
        assert!(fs.get_object_at_path("/home/nobody").is_none());
        // Descending through a file fails.
        assert!(fs.get_object_at_path("/home/user/documents/notes.txt/x").is_none());
    }

    #[test]
    fn test_repeated_slashes_collapse() {
        let fs = fs();
        assert!(fs.is_directory("//home///user/"));
    }

    #[test]
    fn test_resolved_absolute_paths_match_direct_lookup() {
        let fs = fs();
        let paths = [
            "/",
            "/home",
            "/home/user/sites/login",
            "/home/user/system/config/network.conf",
            "/bin/echo",
        ];
        for path in paths {
            for cwd in ["/", "/bin", "/home/user/documents"] {
                let resolved = VirtualFs::resolve_path(path, cwd);
                assert_eq!(fs.get_object_at_path(&resolved), fs.get_object_at_path(path));
            }
        }
    }

    #[test]
    fn test_list_dir_sorting() {
        let fs = fs();
        let names: Vec<_> = fs
            .list_dir("/home/user/sites")
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(
            names,
            vec!["dashboard", "profile", "boot", "directory", "login", "propaganda"]
        );
    }

    #[test]
    fn test_list_dir_on_file() {
        let fs = fs();
        assert!(fs.list_dir("/home/user/documents/report.txt").is_none());
        assert!(fs.list_dir("/missing").is_none());
    }

    #[test]
    fn test_app_links() {
        let fs = fs();
        let link = fs.app_at("/home/user/sites/profile/user").unwrap();
        assert_eq!(link.scene, "main");
        assert_eq!(link.tab.as_deref(), Some("profile"));
        assert!(fs.app_at("/home/user/documents").is_none());
    }
}
