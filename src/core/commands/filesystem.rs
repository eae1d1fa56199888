use super::{CommandContext, CommandInfo, CommandModule};
use crate::config::{BURGER_FLAG_KEY, HOME_DIR, RELOAD_DELAY_MS};
use crate::core::error::{FsError, NavigationError};
use crate::core::filesystem::VirtualFs;
use crate::core::modes::Burger;
use crate::models::{AppLink, FsNode};
use crate::utils::console;

const COMMANDS: &[CommandInfo] = &[
    CommandInfo::new("ls", "List directory contents"),
    CommandInfo::new("cd", "Change directory"),
    CommandInfo::new("pwd", "Print working directory"),
    CommandInfo::new("cat", "Display file contents"),
    CommandInfo::new("nano", "Open file or app in editor"),
];

/// Navigation and inspection of the virtual filesystem.
pub struct FilesystemCommands;

impl CommandModule for FilesystemCommands {
    fn commands(&self) -> &'static [CommandInfo] {
        COMMANDS
    }

    fn execute(&self, name: &str, args: &[&str], ctx: &mut dyn CommandContext) {
        let result = match name {
            "ls" => list(args, ctx),
            "cd" => change_dir(args, ctx),
            "pwd" => {
                let cwd = ctx.current_dir().to_string();
                ctx.output(&cwd);
                Ok(())
            }
            "cat" => open(Opener::Cat, args, ctx),
            "nano" => open(Opener::Nano, args, ctx),
            _ => Ok(()),
        };
        if let Err(msg) = result {
            ctx.error(&msg);
        }
    }
}

fn list(args: &[&str], ctx: &mut dyn CommandContext) -> Result<(), String> {
    let target = match args.first() {
        Some(arg) => VirtualFs::resolve_path(arg, ctx.current_dir()),
        None => ctx.current_dir().to_string(),
    };

    let listing = ctx.filesystem().list_dir(&target).map(|entries| {
        entries
            .iter()
            .map(|e| e.node.display_name(e.name))
            .collect::<Vec<_>>()
            .join("  ")
    });

    match listing {
        Some(text) if text.is_empty() => ctx.output("(empty directory)"),
        Some(text) => ctx.output(&text),
        None => {
            return Err(FsError::CannotAccess {
                cmd: "ls",
                path: args.first().copied().unwrap_or_default().to_string(),
            }
            .to_string());
        }
    }
    Ok(())
}

fn change_dir(args: &[&str], ctx: &mut dyn CommandContext) -> Result<(), String> {
    let arg = args.first().copied().unwrap_or(HOME_DIR);
    let path = VirtualFs::resolve_path(arg, ctx.current_dir());

    let fs = ctx.filesystem();
    if !fs.path_exists(&path) {
        return Err(FsError::NoSuchDirectory {
            cmd: "cd",
            path: arg.to_string(),
        }
        .to_string());
    }
    if !fs.is_directory(&path) {
        return Err(FsError::NotADirectory {
            cmd: "cd",
            path: arg.to_string(),
        }
        .to_string());
    }

    ctx.set_current_dir(path);
    Ok(())
}

/// `cat` and `nano` share lookup and app handling but differ in wording.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Opener {
    Cat,
    Nano,
}

impl Opener {
    fn cmd(self) -> &'static str {
        match self {
            Self::Cat => "cat",
            Self::Nano => "nano",
        }
    }

    fn verb(self) -> &'static str {
        match self {
            Self::Cat => "display",
            Self::Nano => "edit",
        }
    }
}

fn open(opener: Opener, args: &[&str], ctx: &mut dyn CommandContext) -> Result<(), String> {
    let cmd = opener.cmd();
    let Some(&arg) = args.first() else {
        return Err(FsError::MissingOperand { cmd }.to_string());
    };

    match (opener, arg) {
        (_, "on_burger") => {
            if let Err(e) = ctx.start_mode(Box::new(Burger::new()), None) {
                return Err(e.to_string());
            }
            return Ok(());
        }
        (Opener::Cat, "mida") => {
            ctx.output("🫃 Male Pregnancy Emoji Activated!");
            return Ok(());
        }
        (Opener::Cat, "burger_is_cool") => {
            activate_burger_reload(ctx);
            return Ok(());
        }
        _ => {}
    }

    let path = VirtualFs::resolve_path(arg, ctx.current_dir());
    let node = match ctx.filesystem().get_object_at_path(&path) {
        Some(node) => node.clone(),
        None if opener == Opener::Nano => {
            ctx.output(&format!("Creating new file: {}", arg));
            return Ok(());
        }
        None => {
            return Err(FsError::NotFound {
                cmd,
                path: arg.to_string(),
            }
            .to_string());
        }
    };

    match node {
        FsNode::Directory(_) => Err(FsError::IsADirectory {
            cmd,
            path: arg.to_string(),
        }
        .to_string()),
        FsNode::App(link) => open_app(opener, arg, &link, ctx),
        FsNode::File(content) => {
            match opener {
                Opener::Cat => ctx.output(&content),
                Opener::Nano => {
                    ctx.output(&format!("Opening file in editor: {}", arg));
                    ctx.output(&content);
                    ctx.output("[Nano editor simulation - read only mode]");
                }
            }
            Ok(())
        }
        FsNode::System => Err(FsError::UnknownFileType {
            cmd,
            path: arg.to_string(),
        }
        .to_string()),
    }
}

fn open_app(
    opener: Opener,
    arg: &str,
    link: &AppLink,
    ctx: &mut dyn CommandContext,
) -> Result<(), String> {
    let target = if link.component.is_some() {
        "component"
    } else {
        "application"
    };

    if !ctx.navigate(link) {
        return Err(NavigationError {
            cmd: opener.cmd(),
            path: arg.to_string(),
            verb: opener.verb(),
            target,
        }
        .to_string());
    }

    console::info(&format!("navigate: {} -> {}", arg, link.scene));
    let label = if link.component.is_some() {
        "Opening component"
    } else {
        "Opening application"
    };
    ctx.output(&format!("{}: {}", label, arg));
    Ok(())
}

/// Persist the burger flag and reload the page shortly after.
fn activate_burger_reload(ctx: &mut dyn CommandContext) {
    console::info("BURGER MODE ACTIVATED");
    ctx.clear_scrollback();
    if let Err(e) = ctx.persist_flag(BURGER_FLAG_KEY, "true") {
        console::warn(&e.to_string());
    }
    ctx.output("Activating burger mode... Please wait...");
    ctx.schedule_reload(RELOAD_DELAY_MS);
}
