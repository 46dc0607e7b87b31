use std::sync::Arc;

use wsie_core::application::WsieService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: WsieService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: WsieService) -> Self {
        Self { args, service }
    }
}
