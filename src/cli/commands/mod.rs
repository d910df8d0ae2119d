//! Command implementations

pub mod build;
pub mod clear;
pub mod completions;
pub mod init;
pub mod install;
pub mod nodes;
pub mod part;
pub mod remove;
pub mod reset;
pub mod select;
pub mod status;

use miette::Result;

use crate::cli::GlobalOpts;
use crate::core::catalog::Catalog;
use crate::core::project::Workspace;
use crate::core::session::Session;
use crate::model::notice::{Notice, NoticeKind, Severity};

/// Workspace, catalog, and restored session for session-mutating commands.
///
/// Commands mutate `session` and call [`SessionContext::save`] once at the
/// end, so a rejected operation leaves the session file with the recorded
/// rejection and nothing else changed.
pub(crate) struct SessionContext {
    pub workspace: Workspace,
    pub catalog: Catalog,
    pub session: Session,
}

impl SessionContext {
    pub fn open(global: &GlobalOpts) -> Result<Self> {
        let workspace = open_workspace(global)?;
        let catalog = Catalog::load(&workspace.catalog_dir())?;
        let mut session = Session::load(&workspace.session_path(), &catalog)
            .map_err(|e| miette::miette!("{}", e))?;

        // An empty catalog means every part lookup will fail; surface it
        // like any other build problem instead of erroring each command.
        if catalog.is_empty()
            && !session
                .notices()
                .iter()
                .any(|n| n.kind == NoticeKind::CatalogUnavailable)
        {
            session.push_notice(Notice::new(
                NoticeKind::CatalogUnavailable,
                Severity::Critical,
                "No part documents could be loaded from the catalog directory",
            ));
        }

        Ok(Self {
            workspace,
            catalog,
            session,
        })
    }

    pub fn save(&self) -> Result<()> {
        self.session
            .save(&self.workspace.session_path())
            .map_err(|e| miette::miette!("{}", e))
    }
}

/// Resolve the workspace from `--workspace` or by upward discovery
pub(crate) fn open_workspace(global: &GlobalOpts) -> Result<Workspace> {
    let workspace = match &global.workspace {
        Some(path) => Workspace::discover_from(path),
        None => Workspace::discover(),
    };
    workspace.map_err(|e| miette::miette!("{}", e))
}
