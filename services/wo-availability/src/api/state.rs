use std::sync::Arc;

use monopilot_auth_core::TokenService;

use crate::application::AvailabilityHandler;
use monopilot_ports::DependencyCheck;

/// 路由共享状态
#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<AvailabilityHandler>,
    pub token_service: TokenService,
    /// `/ready` 探测的依赖
    pub dependencies: Arc<Vec<Arc<dyn DependencyCheck>>>,
}

impl AppState {
    pub fn new(
        handler: AvailabilityHandler,
        token_service: TokenService,
        dependencies: Vec<Arc<dyn DependencyCheck>>,
    ) -> Self {
        Self {
            handler: Arc::new(handler),
            token_service,
            dependencies: Arc::new(dependencies),
        }
    }
}
