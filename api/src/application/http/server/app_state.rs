use std::sync::Arc;

use vitalog_core::application::VitalogService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: VitalogService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: VitalogService) -> Self {
        Self { args, service }
    }
}
