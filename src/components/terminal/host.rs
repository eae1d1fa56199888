//! Browser side of [`TerminalHost`].

use chrono::{DateTime, Local};

use crate::core::TerminalHost;
use crate::core::error::HostError;
use crate::models::AppLink;
use crate::utils::{console, dom, run_after};

/// Host backed by the page: hash routing, localStorage and `location.reload`.
#[derive(Debug, Default)]
pub struct BrowserHost;

impl BrowserHost {
    /// Hash route for an app link: `#/scene[/tab][/component]`.
    pub fn route_for(link: &AppLink) -> String {
        let mut route = format!("#/{}", link.scene);
        for part in [&link.tab, &link.component].into_iter().flatten() {
            route.push('/');
            route.push_str(part);
        }
        route
    }
}

impl TerminalHost for BrowserHost {
    fn navigate(&mut self, link: &AppLink) -> bool {
        let Some(window) = dom::window() else {
            return false;
        };
        let route = Self::route_for(link);
        match window.location().set_hash(&route) {
            Ok(()) => true,
            Err(_) => {
                console::warn(&format!("navigation to {} failed", route));
                false
            }
        }
    }

    fn persist_flag(&mut self, key: &str, value: &str) -> Result<(), HostError> {
        dom::store_flag(key, value)
    }

    fn schedule_reload(&mut self, delay_ms: u32) {
        run_after(delay_ms, dom::reload_page);
    }

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
