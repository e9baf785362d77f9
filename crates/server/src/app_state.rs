use std::path::PathBuf;

use viewer_api::ViewerContext;

use crate::{config::Settings, render::Branding};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) viewer: ViewerContext,
    pub(crate) branding: Branding,
    pub(crate) logo_path: PathBuf,
}

impl AppState {
    pub(crate) fn new(viewer: ViewerContext, settings: &Settings) -> Self {
        // A local logo is served from /logo.png; otherwise pages point at the remote image.
        let logo_src = if settings.logo_path.is_file() {
            "/logo.png".to_string()
        } else {
            settings.logo_fallback_url.clone()
        };
        Self {
            viewer,
            branding: Branding {
                title: settings.app_title.clone(),
                logo_src,
            },
            logo_path: settings.logo_path.clone(),
        }
    }
}
